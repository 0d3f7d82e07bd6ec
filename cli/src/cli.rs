use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "apichanges")]
#[command(
    author,
    version,
    about = "Turn a package's API change ledger into DocBook XML",
    after_help = "With no output option the ledger is only validated and summarised."
)]
pub struct Cli {
    /// Package name shown in titles and used for anchor ids unless --package is given
    #[clap(value_name = "PACKAGE-NAME")]
    pub package_name: String,

    /// Tab-separated change ledger to read
    #[clap(value_name = "TSV-FILE")]
    pub tsv_file: PathBuf,

    /// Write the DocBook XML chapter to FILE
    #[clap(long, value_name = "FILE")]
    pub docbook_xml: Option<PathBuf>,

    /// Print the changes as terminal tables on stdout
    #[clap(long, default_value_t = false)]
    pub text: bool,

    /// Write every change as one CSV row to FILE
    #[clap(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Prefix for generated anchor ids
    #[clap(long = "package", value_name = "PREFIX")]
    pub id_prefix: Option<String>,

    /// Do not warn about unchanged functions whose old version is VERSION
    #[clap(long, value_name = "VERSION")]
    pub no_warn_version: Option<String>,

    /// TOML configuration file
    #[clap(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output with additional information
    #[clap(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Whether any report output was requested
    pub fn has_output(&self) -> bool {
        self.docbook_xml.is_some() || self.text || self.csv.is_some()
    }
}
