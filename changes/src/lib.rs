//! Parse an API change ledger, classify every row, and render the result.
//!
//! A ledger is a tab-separated file where each row records how one function,
//! type or enum moved between two library versions. Rows are classified into
//! new, deleted, renamed and changed entries, grouped per version pair, and
//! rendered as a DocBook chapter, terminal tables or CSV.
//!
//! ```no_run
//! use std::path::Path;
//! use changes::{create_renderer, ChangeLedger, ChangesConfig, ReportFormat};
//!
//! let config = ChangesConfig::default();
//! let ledger = ChangeLedger::from_path(Path::new("raptor2-changes.tsv"), &config)?;
//! let renderer = create_renderer(ReportFormat::DocbookXml, "raptor2", &config)?;
//! let xml = renderer.render(&ledger)?;
//! # Ok::<(), changes::ChangesError>(())
//! ```

pub mod classifier;
pub mod config;
pub mod core;
pub mod docbook;
pub mod error;
pub mod export;
pub mod formatter;
pub mod linker;
pub mod parser;
pub mod registry;
pub mod text;
pub mod types;
pub mod utils;
pub mod view;

pub use classifier::{Classification, Classifier};
pub use config::{ChangesConfig, ConfigLoader, TomlConfigLoader};
pub use crate::core::ChangeLedger;
pub use docbook::DocbookRenderer;
pub use error::{ChangesError, ErrorContext};
pub use export::CsvRenderer;
pub use formatter::{create_renderer, ReportFormat, ReportRenderer};
pub use linker::{NotationLinker, SymbolKind};
pub use parser::RecordParser;
pub use registry::VersionRegistry;
pub use text::TextRenderer;
pub use types::*;
