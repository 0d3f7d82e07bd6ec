//! DocBook XML chapter rendering.
//!
//! Every fragment is produced by a pure function returning a `String`; the
//! renderer only concatenates them, so the same ledger always yields the same
//! bytes.

use version::VersionPair;

use crate::config::ChangesConfig;
use crate::core::ChangeLedger;
use crate::formatter::ReportRenderer;
use crate::linker::{NotationLinker, SymbolKind};
use crate::types::{Result, VersionChanges};
use crate::utils::{escape_xml, to_id};
use crate::view::{subsections, ChangeRow, EntityGroup, EntityKind, Subsection, SubsectionView, Symbol};

const DOCTYPE: &str = concat!(
    "<!DOCTYPE chapter PUBLIC \"-//OASIS//DTD DocBook XML V4.3//EN\"\n",
    "               \"http://www.oasis-open.org/docbook/xml/4.3/docbookx.dtd\">\n",
);

const INTRODUCTION: &str = "<para>\n\
The following sections describe the changes in the API between\n\
versions including additions, deletions, renames (retaining the same\n\
number of parameters, types and return value type) and more complex\n\
changes to functions, types and enums.\n\
</para>\n";

/// Placeholder for an empty table cell
const EMPTY_CELL: &str = "&#160;";

#[derive(Debug, Clone)]
pub struct DocbookRenderer {
    package: String,
    id_prefix: String,
    chapter_title: String,
    linker: NotationLinker,
}

impl DocbookRenderer {
    pub fn new(package: &str, config: &ChangesConfig) -> Result<Self> {
        let linker = NotationLinker::new(&config.symbol_prefixes).map_err(|e| {
            e.with_operation_context(
                "Building notation linker",
                Some(config.symbol_prefixes.join(", ")),
            )
        })?;

        Ok(Self {
            package: package.to_string(),
            id_prefix: config.id_prefix_for(package).to_string(),
            chapter_title: config.chapter_title.clone(),
            linker,
        })
    }

    pub fn chapter_start(&self) -> String {
        let mut out = String::from(DOCTYPE);
        out.push_str(&format!(
            "<chapter id=\"{}\">\n<title>{}</title>\n\n",
            to_id(&format!("{}-changes", self.id_prefix)),
            escape_xml(&self.chapter_title)
        ));
        out.push_str(&format!(
            "<para>This chapter describes the API changes for {}.\n</para>\n",
            escape_xml(&self.package)
        ));
        out
    }

    pub fn introduction(&self) -> String {
        let id = to_id(&format!("{}-changes-intro", self.id_prefix));
        section(&id, "Introduction", INTRODUCTION)
    }

    pub fn chapter_end(&self) -> String {
        "\n</chapter>\n".to_string()
    }

    /// Anchor of the section for `pair`, or of one of its subsections
    pub fn section_id(&self, pair: &VersionPair, subsection: Option<Subsection>) -> String {
        let keyword = subsection.map_or(String::new(), |s| format!("{}-", s.keyword()));
        to_id(&format!(
            "{}-changes-{keyword}{}-to-{}",
            self.id_prefix, pair.old, pair.new
        ))
    }

    /// The whole section for one version pair, empty when it has no changes
    pub fn pair_section(&self, pair: &VersionPair, changes: &VersionChanges) -> String {
        let views = subsections(changes);
        if views.is_empty() {
            return String::new();
        }

        let body: String = views
            .iter()
            .map(|view| self.subsection(pair, view))
            .collect();
        let title = format!(
            "Changes between {} {} and {}",
            self.package, pair.old, pair.new
        );
        section(&self.section_id(pair, None), &escape_xml(&title), &body)
    }

    fn subsection(&self, pair: &VersionPair, view: &SubsectionView<'_>) -> String {
        let body: String = view
            .groups
            .iter()
            .map(|group| {
                if view.subsection.is_list() {
                    self.list(view.subsection, group)
                } else {
                    self.table(pair, view.subsection, group)
                }
            })
            .collect();

        section(
            &self.section_id(pair, Some(view.subsection)),
            view.subsection.title(),
            &body,
        )
    }

    fn list(&self, subsection: Subsection, group: &EntityGroup<'_>) -> String {
        let mut out = format!(
            "  <itemizedlist>\n    <title>{}</title>\n",
            group.entity.plural_title()
        );

        for row in &group.rows {
            let item = match (subsection, row.subject()) {
                (Subsection::New, Some(symbol)) => linked_symbol(group.entity, symbol),
                (_, Some(symbol)) => escape_xml(symbol.name).into_owned(),
                (_, None) => String::new(),
            };
            out.push_str(&format!(
                "    <listitem><para>{item}{}</para></listitem>\n",
                self.inline_notes(row.notes)
            ));
        }

        out.push_str("  </itemizedlist>\n");
        out
    }

    fn table(&self, pair: &VersionPair, subsection: Subsection, group: &EntityGroup<'_>) -> String {
        let label = group.entity.label();
        let mut out = String::from("<table border='1'>\n  <thead>\n  </thead>\n  <tbody>\n");
        out.push_str(&format!(
            "    <tr>\n      <th>{} {label}</th>\n      <th>{} {label}</th>\n      <th>Notes</th>\n    </tr>\n",
            escape_xml(&pair.old),
            escape_xml(&pair.new)
        ));

        for row in &group.rows {
            let (old, new) = self.table_cells(subsection, group.entity, row);
            out.push_str(&format!(
                "    <tr valign='top'>\n      <td>{old}</td> <td>{new}</td> <td>{}</td>\n    </tr>\n",
                self.cell_notes(row.notes)
            ));
        }

        out.push_str("  </tbody>\n</table>\n");
        out
    }

    /// Old side plain, new side linked; renamed rows show names only
    fn table_cells(&self, subsection: Subsection, entity: EntityKind, row: &ChangeRow<'_>) -> (String, String) {
        let old = row.old.map_or(String::new(), |symbol| match subsection {
            Subsection::Renamed => escape_xml(symbol.name).into_owned(),
            _ => escape_xml(&symbol.plain()).into_owned(),
        });
        let new = row.new.map_or(String::new(), |symbol| match subsection {
            Subsection::Renamed => symbol_kind(entity).link(symbol.name),
            _ => linked_symbol(entity, &symbol),
        });
        (old, new)
    }

    fn inline_notes(&self, notes: &str) -> String {
        if notes.is_empty() {
            String::new()
        } else {
            format!(" - {}", self.linker.link(&escape_xml(notes)))
        }
    }

    fn cell_notes(&self, notes: &str) -> String {
        if notes.is_empty() {
            EMPTY_CELL.to_string()
        } else {
            self.linker.link(&escape_xml(notes))
        }
    }
}

impl ReportRenderer for DocbookRenderer {
    fn render(&self, ledger: &ChangeLedger) -> Result<String> {
        let mut out = self.chapter_start();
        out.push_str(&self.introduction());
        for (pair, changes) in ledger.sections() {
            out.push_str(&self.pair_section(pair, changes));
        }
        out.push_str(&self.chapter_end());
        Ok(out)
    }
}

fn section(id: &str, title: &str, body: &str) -> String {
    format!("<section id=\"{id}\">\n<title>{title}</title>\n\n{body}\n</section>\n")
}

fn symbol_kind(entity: EntityKind) -> SymbolKind {
    match entity {
        EntityKind::Function => SymbolKind::Function,
        EntityKind::Type => SymbolKind::Type,
        EntityKind::Enum => SymbolKind::Enum,
    }
}

/// Linked name, wrapped in its escaped return type and args for functions
fn linked_symbol(entity: EntityKind, symbol: &Symbol<'_>) -> String {
    let link = symbol_kind(entity).link(symbol.name);
    match symbol.signature {
        Some((return_type, args)) => {
            format!("{} {link}{}", escape_xml(return_type), escape_xml(args))
        }
        None => link,
    }
}
