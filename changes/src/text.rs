use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table,
};
use version::VersionPair;

use crate::core::ChangeLedger;
use crate::formatter::ReportRenderer;
use crate::types::{Result, VersionChanges};
use crate::view::{subsections, EntityGroup, Subsection, SubsectionView};

/// Builder for consistently styled terminal tables
#[derive(Clone)]
pub struct TableBuilder {
    table: Table,
}

impl TableBuilder {
    pub fn new() -> Self {
        let mut table = Table::new();
        // Signatures are kept on one line whatever the terminal width
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Disabled);

        Self { table }
    }

    pub fn headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header_cells: Vec<Cell> = headers
            .into_iter()
            .map(|h| Cell::new(h.into()).add_attribute(Attribute::Bold))
            .collect();

        self.table.set_header(header_cells);
        self
    }

    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row_cells: Vec<Cell> = cells.into_iter().map(|cell| Cell::new(cell.into())).collect();

        self.table.add_row(row_cells);
        self
    }

    pub fn build(self) -> String {
        self.table.to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain terminal report: one table per subsection of each version pair
#[derive(Debug, Clone)]
pub struct TextRenderer {
    package: String,
}

impl TextRenderer {
    pub fn new(package: &str) -> Self {
        Self {
            package: package.to_string(),
        }
    }

    pub fn pair_section(&self, pair: &VersionPair, changes: &VersionChanges) -> String {
        let views = subsections(changes);
        if views.is_empty() {
            return String::new();
        }

        let mut out = format!(
            "Changes between {} {} and {}\n",
            self.package, pair.old, pair.new
        );
        for view in &views {
            out.push('\n');
            out.push_str(view.subsection.title());
            out.push('\n');
            out.push_str(&Self::subsection_table(pair, view));
            out.push('\n');
        }
        out
    }

    fn subsection_table(pair: &VersionPair, view: &SubsectionView<'_>) -> String {
        let mut builder = TableBuilder::new();

        if view.subsection.is_list() {
            builder.headers(["Kind", "Name", "Notes"]);
        } else {
            builder.headers(["Kind", pair.old.as_str(), pair.new.as_str(), "Notes"]);
        }

        for group in &view.groups {
            Self::add_rows(&mut builder, view.subsection, group);
        }
        builder.build()
    }

    fn add_rows(builder: &mut TableBuilder, subsection: Subsection, group: &EntityGroup<'_>) {
        let kind = group.entity.label();

        for row in &group.rows {
            if subsection.is_list() {
                let name = match (subsection, row.subject()) {
                    (Subsection::New, Some(symbol)) => symbol.plain(),
                    (_, Some(symbol)) => symbol.name.to_string(),
                    (_, None) => String::new(),
                };
                builder.row([kind.to_string(), name, row.notes.to_string()]);
            } else {
                let old = row.old.map_or(String::new(), |s| s.plain());
                let new = row.new.map_or(String::new(), |s| s.plain());
                builder.row([kind.to_string(), old, new, row.notes.to_string()]);
            }
        }
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, ledger: &ChangeLedger) -> Result<String> {
        let sections: Vec<String> = ledger
            .sections()
            .into_iter()
            .map(|(pair, changes)| self.pair_section(pair, changes))
            .collect();

        if sections.is_empty() {
            return Ok(format!("No API changes recorded for {}\n", self.package));
        }
        Ok(sections.join("\n"))
    }
}
