use serde::Serialize;

use crate::core::ChangeLedger;
use crate::error::ChangesError;
use crate::formatter::ReportRenderer;
use crate::types::Result;
use crate::view::subsections;

/// One flattened change, as written to CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow<'a> {
    pub old_version: &'a str,
    pub new_version: &'a str,
    pub change: &'static str,
    pub entity: &'static str,
    pub old: String,
    pub new: String,
    pub notes: &'a str,
}

/// Every change as one CSV row, in report order
#[derive(Debug, Clone, Default)]
pub struct CsvRenderer;

impl CsvRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn rows<'a>(&self, ledger: &'a ChangeLedger) -> Vec<ExportRow<'a>> {
        let mut rows = Vec::new();

        for (pair, changes) in ledger.sections() {
            for view in subsections(changes) {
                for group in &view.groups {
                    for row in &group.rows {
                        rows.push(ExportRow {
                            old_version: &pair.old,
                            new_version: &pair.new,
                            change: view.subsection.keyword(),
                            entity: group.entity.label(),
                            old: row.old.map_or(String::new(), |s| s.plain()),
                            new: row.new.map_or(String::new(), |s| s.plain()),
                            notes: row.notes,
                        });
                    }
                }
            }
        }
        rows
    }
}

impl ReportRenderer for CsvRenderer {
    fn render(&self, ledger: &ChangeLedger) -> Result<String> {
        let rows = self.rows(ledger);
        if rows.is_empty() {
            return Ok("old_version,new_version,change,entity,old,new,notes\n".to_string());
        }

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in &rows {
            writer.serialize(row)?;
        }

        let bytes = writer.into_inner().map_err(|e| ChangesError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| ChangesError::Other(format!("CSV output is not UTF-8: {e}")))
    }
}
