//! Shared fixtures for the end-to-end tests.

use std::fs;
use std::path::{Path, PathBuf};

/// A ledger touching every kind of change across three version pairs,
/// listed out of version order
pub const SAMPLE_LEDGER: &str = "\
# old\tkind\told name\told args\tnew\tkind\tnew name\tnew args\tnotes
1.9\tint\traptor_parse_chunk\t(raptor_parser* p)\t1.10\tint\traptor_parser_parse_chunk\t(raptor_parser* p)\t-
1.9\tenum\tRAPTOR_IDENTIFIER_TYPE_ANONYMOUS\t-\t1.10\t-\tRAPTOR_TERM_TYPE_BLANK\t-\tsee #raptor_term

1.4\tchar*\t-\t-\t1.5\tchar*\traptor_new_uri2\t(raptor_world* world, const char* s)\tuse instead of raptor_new_uri()
1.4\ttype\traptor_sequence\t-\t1.5\t-\t-\t-\t-
1.4\tvoid\traptor_free_uri\t(raptor_uri* uri)\t1.5\t-\t-\t-\t-
1.4\ttype\traptor_uri\t-\t1.5\t-\traptor_uri\t-\tnow reference counted
1.4\tint\traptor_uri_equals\t(raptor_uri* a, raptor_uri* b)\t1.5\tint\traptor_uri_equals\t(raptor_uri* a, raptor_uri* b)\t-
1.9.0\tenum\t-\t-\t1.9.1\t-\tRAPTOR_LOG_LEVEL_NONE\t-\t-
1.9.0\tint\traptor_stats\t(void)\t1.9.1\tlong\traptor_stats\t(raptor_world* world)\tpass a #raptor_world
";

/// Write `content` as `changes.tsv` under `dir`
pub fn write_ledger(dir: &Path, content: &str) -> std::io::Result<PathBuf> {
    let path = dir.join("changes.tsv");
    fs::write(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_ledger() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_ledger(temp_dir.path(), SAMPLE_LEDGER).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), SAMPLE_LEDGER);
    }
}
