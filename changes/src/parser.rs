use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::error::ChangesError;
use crate::types::{ChangeRecord, EXPECTED_FIELDS, Result};

const FIELD_SEPARATOR: char = '\t';
const COMMENT_MARKER: char = '#';

/// Reads the tab-separated change ledger into validated records.
///
/// Blank rows and rows whose first field starts with `#` are skipped. Any other
/// row must have exactly [`EXPECTED_FIELDS`] fields; anything else aborts the
/// whole parse.
/// Fields are kept verbatim, quotes included.
#[derive(Debug, Clone, Default)]
pub struct RecordParser;

impl RecordParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_file(&self, path: &Path) -> Result<Vec<ChangeRecord>> {
        let file = File::open(path).map_err(|source| ChangesError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_reader(file).map_err(|err| match err {
            ChangesError::Io(source) => ChangesError::Unreadable {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn parse_str(&self, content: &str) -> Result<Vec<ChangeRecord>> {
        self.parse_reader(content.as_bytes())
    }

    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<ChangeRecord>> {
        let mut records = Vec::new();

        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line_num = idx as u64 + 1;
            let line = line
                .map_err(|e| io::Error::new(e.kind(), format!("line {line_num}: {e}")))?;
            if let Some(record) = Self::parse_line(&line, line_num)? {
                records.push(record);
            }
        }

        Ok(records)
    }

    fn parse_line(line: &str, line_num: u64) -> Result<Option<ChangeRecord>> {
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            return Ok(None);
        }

        let fields: Vec<String> = line.split(FIELD_SEPARATOR).map(str::to_string).collect();
        let found = fields.len();
        let fields: [String; EXPECTED_FIELDS] =
            fields
                .try_into()
                .map_err(|fields: Vec<String>| ChangesError::FieldCount {
                    line: line_num,
                    found,
                    expected: EXPECTED_FIELDS,
                    fields,
                })?;

        Ok(Some(ChangeRecord {
            line: line_num,
            fields,
        }))
    }
}
