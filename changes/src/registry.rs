use std::collections::HashMap;

use version::{DottedVersion, VersionPair};

use crate::error::ChangesError;
use crate::types::{Result, VersionChanges};

#[derive(Debug, Clone)]
struct Entry {
    pair: VersionPair,
    sort_version: DottedVersion,
    changes: VersionChanges,
}

/// Version pairs in first-seen order, each with its bucket of changes.
#[derive(Debug, Clone, Default)]
pub struct VersionRegistry {
    entries: Vec<Entry>,
    index: HashMap<VersionPair, usize>,
}

impl VersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bucket for `pair`, registering the pair on first sight.
    ///
    /// The new version is parsed on registration so a malformed version is
    /// reported against the first line that mentions it.
    pub fn register(&mut self, pair: VersionPair, line: u64) -> Result<&mut VersionChanges> {
        let idx = match self.index.get(&pair) {
            Some(&idx) => idx,
            None => {
                let sort_version = pair
                    .new
                    .parse::<DottedVersion>()
                    .map_err(|source| ChangesError::InvalidVersion { line, source })?;
                let idx = self.entries.len();
                self.index.insert(pair.clone(), idx);
                self.entries.push(Entry {
                    pair,
                    sort_version,
                    changes: VersionChanges::default(),
                });
                idx
            }
        };

        Ok(&mut self.entries[idx].changes)
    }

    pub fn get(&self, pair: &VersionPair) -> Option<&VersionChanges> {
        self.index.get(pair).map(|&idx| &self.entries[idx].changes)
    }

    /// Pairs in the order they were first seen
    pub fn pairs(&self) -> impl Iterator<Item = &VersionPair> + '_ {
        self.entries.iter().map(|entry| &entry.pair)
    }

    /// Pairs ascending by new version; equal new versions keep first-seen order
    pub fn sorted(&self) -> Vec<(&VersionPair, &VersionChanges)> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.sort_version.cmp(&b.sort_version));
        entries
            .into_iter()
            .map(|entry| (&entry.pair, &entry.changes))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of changes across all pairs
    pub fn change_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.changes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Change, NewType};

    fn new_type(name: &str) -> Change {
        Change::NewType(NewType {
            name: name.to_string(),
            notes: String::new(),
        })
    }

    #[test]
    fn test_pair_registered_once() {
        let mut registry = VersionRegistry::new();
        registry
            .register(VersionPair::new("1.4", "1.5"), 1)
            .unwrap()
            .push(new_type("raptor_a"));
        registry
            .register(VersionPair::new("1.4", "1.5"), 2)
            .unwrap()
            .push(new_type("raptor_b"));

        assert_eq!(registry.len(), 1);
        let changes = registry.get(&VersionPair::new("1.4", "1.5")).unwrap();
        assert_eq!(changes.new_types.len(), 2);
        assert_eq!(changes.new_types[0].name, "raptor_a");
        assert_eq!(registry.change_count(), 2);
    }

    #[test]
    fn test_sorted_by_new_version_numerically() {
        let mut registry = VersionRegistry::new();
        for (old, new) in [("1.10.0", "2.0.1"), ("1.9.0", "1.10.0"), ("1.8", "1.9.0"), ("1.10.0", "2.0")] {
            registry.register(VersionPair::new(old, new), 1).unwrap();
        }

        let order: Vec<&str> = registry
            .sorted()
            .into_iter()
            .map(|(pair, _)| pair.new.as_str())
            .collect();
        assert_eq!(order, vec!["1.9.0", "1.10.0", "2.0", "2.0.1"]);

        let first_seen: Vec<&str> = registry.pairs().map(|pair| pair.new.as_str()).collect();
        assert_eq!(first_seen, vec!["2.0.1", "1.10.0", "1.9.0", "2.0"]);
    }

    #[test]
    fn test_equal_new_versions_keep_registration_order() {
        let mut registry = VersionRegistry::new();
        registry.register(VersionPair::new("1.3", "1.5"), 1).unwrap();
        registry.register(VersionPair::new("1.4", "1.5"), 2).unwrap();
        registry.register(VersionPair::new("1.2", "1.5"), 3).unwrap();

        let olds: Vec<&str> = registry
            .sorted()
            .into_iter()
            .map(|(pair, _)| pair.old.as_str())
            .collect();
        assert_eq!(olds, vec!["1.3", "1.4", "1.2"]);
    }

    #[test]
    fn test_invalid_new_version_reports_line() {
        let mut registry = VersionRegistry::new();
        let err = registry
            .register(VersionPair::new("1.4", "1.5beta"), 17)
            .unwrap_err();

        assert_eq!(err.line(), Some(17));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_old_version_is_not_parsed() {
        let mut registry = VersionRegistry::new();
        assert!(registry.register(VersionPair::new("pre-release", "1.0"), 1).is_ok());
    }
}
