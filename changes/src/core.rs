use std::path::Path;

use version::VersionPair;

use crate::classifier::{Classification, Classifier};
use crate::config::ChangesConfig;
use crate::parser::RecordParser;
use crate::registry::VersionRegistry;
use crate::types::*;

/// A fully parsed and classified change ledger
#[derive(Debug, Clone, Default)]
pub struct ChangeLedger {
    registry: VersionRegistry,
    diagnostics: Vec<Diagnostic>,
    record_count: usize,
}

impl ChangeLedger {
    /// Reads and classifies the ledger at `path`
    ///
    /// # Errors
    /// Returns error if the file cannot be read, a row has the wrong number of
    /// fields, or a new version is not numeric
    pub fn from_path(path: &Path, config: &ChangesConfig) -> Result<Self> {
        let records = RecordParser::new().parse_file(path)?;
        Self::from_records(&records, &Self::classifier(config))
    }

    /// Classifies ledger content already held in memory
    pub fn parse(content: &str, config: &ChangesConfig) -> Result<Self> {
        let records = RecordParser::new().parse_str(content)?;
        Self::from_records(&records, &Self::classifier(config))
    }

    pub fn from_records(records: &[ChangeRecord], classifier: &Classifier) -> Result<Self> {
        let mut ledger = Self::default();

        for record in records {
            let pair = VersionPair::new(record.old_version(), record.new_version());
            let changes = ledger.registry.register(pair, record.line)?;

            match classifier.classify(record) {
                Classification::Change(change) => changes.push(change),
                Classification::Unchanged => {}
                Classification::Warning(diagnostic) => ledger.diagnostics.push(diagnostic),
            }
            ledger.record_count += 1;
        }

        Ok(ledger)
    }

    fn classifier(config: &ChangesConfig) -> Classifier {
        Classifier::new(config.no_warn_version.clone())
    }

    #[must_use]
    pub fn registry(&self) -> &VersionRegistry {
        &self.registry
    }

    /// Warnings raised while classifying, in input order
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Version pairs with at least one change, ascending by new version
    #[must_use]
    pub fn sections(&self) -> Vec<(&VersionPair, &VersionChanges)> {
        self.registry
            .sorted()
            .into_iter()
            .filter(|(_, changes)| !changes.is_empty())
            .collect()
    }

    #[must_use]
    pub fn get(&self, old: &str, new: &str) -> Option<&VersionChanges> {
        self.registry.get(&VersionPair::new(old, new))
    }

    /// Number of data rows read, comments and blank lines excluded
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    #[must_use]
    pub fn change_count(&self) -> usize {
        self.registry.change_count()
    }
}
