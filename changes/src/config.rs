use std::path::Path;

use serde::Deserialize;

use crate::error::ChangesError;
use crate::linker::DEFAULT_SYMBOL_PREFIXES;
use crate::types::Result;

/// Configuration options for classifying and rendering a change ledger
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChangesConfig {
    /// Prefix for generated anchor ids; the package name when unset
    pub id_prefix: Option<String>,
    /// Old version whose unchanged function rows are not warned about
    pub no_warn_version: Option<String>,
    /// Symbol prefixes recognised by the notation linker
    pub symbol_prefixes: Vec<String>,
    pub chapter_title: String,
    pub verbose: bool,
}

impl Default for ChangesConfig {
    fn default() -> Self {
        Self {
            id_prefix: None,
            no_warn_version: None,
            symbol_prefixes: DEFAULT_SYMBOL_PREFIXES.map(String::from).to_vec(),
            chapter_title: "API Changes".to_string(),
            verbose: false,
        }
    }
}

/// Configuration loader trait
pub trait ConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ChangesConfig>;
    fn load_from_str(content: &str) -> Result<ChangesConfig>;
}

/// Reads `ChangesConfig` from TOML
pub struct TomlConfigLoader;

impl ConfigLoader for TomlConfigLoader {
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ChangesConfig> {
        let path_ref = path.as_ref();
        let content =
            std::fs::read_to_string(path_ref).map_err(|source| ChangesError::Unreadable {
                path: path_ref.to_path_buf(),
                source,
            })?;

        Self::load_from_str(&content).map_err(|e| e.with_context(path_ref.display().to_string()))
    }

    fn load_from_str(content: &str) -> Result<ChangesConfig> {
        toml::from_str(content).map_err(|e| ChangesError::InvalidConfig(e.to_string()))
    }
}

impl ChangesConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        TomlConfigLoader::load_from_file(path)
    }

    /// Anchor prefix to use for `package`
    pub fn id_prefix_for<'a>(&'a self, package: &'a str) -> &'a str {
        self.id_prefix.as_deref().unwrap_or(package)
    }
}
