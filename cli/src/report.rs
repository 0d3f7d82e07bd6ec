use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use changes::{ChangeLedger, ChangesConfig, ReportFormat, create_renderer};
use tempfile::NamedTempFile;

use crate::cli::Cli;
use crate::error::{CliError, Result, ResultExt};
use crate::progress::ProgressTracker;
use crate::ui;

/// Where one rendered report goes
enum Destination {
    File(PathBuf),
    Stdout,
}

pub fn execute(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let mut progress = ProgressTracker::new("API Changes", config.verbose).with_steps(vec![
        format!("Reading {}", cli.tsv_file.display()),
        "Rendering reports".to_string(),
        "Writing reports".to_string(),
    ]);

    progress.start_step();
    let ledger = ChangeLedger::from_path(&cli.tsv_file, &config)?;
    for diagnostic in ledger.diagnostics() {
        ui::warning_message(&diagnostic.to_string());
    }
    progress.complete_step();

    // Everything is rendered before anything is written
    progress.start_step();
    let reports = render_reports(&cli, &config, &ledger)?;
    if reports.is_empty() {
        progress.skip_step("no output requested");
    } else {
        progress.complete_step();
    }

    progress.start_step();
    if reports.is_empty() {
        progress.skip_step("no output requested");
    } else {
        write_reports(&reports)?;
        progress.complete_step();
    }

    progress.complete();
    if config.verbose || !cli.has_output() {
        print_summary(&cli, &ledger);
    }
    Ok(())
}

/// Config file values with command line flags layered on top
fn load_config(cli: &Cli) -> Result<ChangesConfig> {
    let mut config = match &cli.config {
        Some(path) => ChangesConfig::load_from_file(path)?,
        None => ChangesConfig::default(),
    };

    if let Some(prefix) = &cli.id_prefix {
        config.id_prefix = Some(prefix.clone());
    }
    if let Some(version) = &cli.no_warn_version {
        config.no_warn_version = Some(version.clone());
    }
    config.verbose |= cli.verbose;

    Ok(config)
}

fn render_reports(
    cli: &Cli,
    config: &ChangesConfig,
    ledger: &ChangeLedger,
) -> Result<Vec<(Destination, String)>> {
    let mut requested = Vec::new();
    if let Some(path) = &cli.docbook_xml {
        requested.push((ReportFormat::DocbookXml, Destination::File(path.clone())));
    }
    if let Some(path) = &cli.csv {
        requested.push((ReportFormat::Csv, Destination::File(path.clone())));
    }
    if cli.text {
        requested.push((ReportFormat::Text, Destination::Stdout));
    }

    requested
        .into_iter()
        .map(|(format, destination)| -> Result<(Destination, String)> {
            let renderer = create_renderer(format, &cli.package_name, config)?;
            let content = renderer
                .render(ledger)
                .with_context(|| format!("Rendering {format}"))?;
            Ok((destination, content))
        })
        .collect()
}

/// Write every report or none: files are staged next to their targets and
/// only moved into place once all of them were written.
fn write_reports(reports: &[(Destination, String)]) -> Result<()> {
    let mut staged = Vec::new();
    for (destination, content) in reports {
        if let Destination::File(path) = destination {
            staged.push((stage_file(path, content)?, path));
        }
    }

    for (file, path) in staged {
        file.persist(path).map_err(|e| unwritable(path, e.error))?;
    }

    for (destination, content) in reports {
        if let Destination::Stdout = destination {
            print!("{content}");
        }
    }
    Ok(())
}

fn stage_file(path: &Path, content: &str) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| unwritable(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| unwritable(path, e))?;

    // Temporary files are created owner-only; reports are ordinary files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .map_err(|e| unwritable(path, e))?;
    }
    Ok(file)
}

fn unwritable(path: &Path, source: std::io::Error) -> CliError {
    CliError::Unwritable {
        path: path.to_path_buf(),
        source,
    }
}

fn print_summary(cli: &Cli, ledger: &ChangeLedger) {
    let sections = ledger.sections();
    ui::info_message(&format!(
        "{} rows, {} changes across {} version pairs",
        ledger.record_count(),
        ledger.change_count(),
        sections.len()
    ));
    for (pair, changes) in &sections {
        ui::info_message(&format!("  {pair}: {} changes", changes.len()));
    }

    match ledger.diagnostics().len() {
        0 => ui::success_message(&format!("{} is valid", cli.tsv_file.display())),
        n => ui::warning_message(&format!("{n} warnings in {}", cli.tsv_file.display())),
    }
}
