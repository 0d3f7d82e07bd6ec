use std::fmt;
use std::str::FromStr;

use crate::config::ChangesConfig;
use crate::core::ChangeLedger;
use crate::docbook::DocbookRenderer;
use crate::error::ChangesError;
use crate::export::CsvRenderer;
use crate::text::TextRenderer;
use crate::types::Result;

// --- Traits ---

pub trait ReportRenderer: Send + Sync {
    fn render(&self, ledger: &ChangeLedger) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    DocbookXml,
    Text,
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DocbookXml => "docbook-xml",
            Self::Text => "text",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}

impl FromStr for ReportFormat {
    type Err = ChangesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "docbook-xml" | "docbook" | "xml" => Ok(Self::DocbookXml),
            "text" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            other => Err(ChangesError::Other(format!("Unknown report format: {other}"))),
        }
    }
}

// --- Factory ---

pub fn create_renderer(
    format: ReportFormat,
    package: &str,
    config: &ChangesConfig,
) -> Result<Box<dyn ReportRenderer>> {
    Ok(match format {
        ReportFormat::DocbookXml => Box::new(DocbookRenderer::new(package, config)?),
        ReportFormat::Text => Box::new(TextRenderer::new(package)),
        ReportFormat::Csv => Box::new(CsvRenderer::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEDGER: &str = "1.4\tchar*\t-\t-\t1.5\tchar*\traptor_new_uri2\t(raptor_world* world)\t-\n";

    #[test]
    fn test_format_from_str() {
        assert_eq!("docbook-xml".parse::<ReportFormat>().unwrap(), ReportFormat::DocbookXml);
        assert_eq!("TEXT".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("csv".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert!("html".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for format in [ReportFormat::DocbookXml, ReportFormat::Text, ReportFormat::Csv] {
            assert_eq!(format.to_string().parse::<ReportFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_every_renderer_mentions_the_new_function() {
        let config = ChangesConfig::default();
        let ledger = ChangeLedger::parse(LEDGER, &config).unwrap();

        for format in [ReportFormat::DocbookXml, ReportFormat::Text, ReportFormat::Csv] {
            let renderer = create_renderer(format, "raptor2", &config).unwrap();
            let output = renderer.render(&ledger).unwrap();
            assert!(output.contains("raptor_new_uri2"), "{format} output: {output}");
        }
    }

    #[test]
    fn test_symbol_prefixes_are_escaped() {
        let config = ChangesConfig {
            symbol_prefixes: vec!["(".to_string()],
            ..ChangesConfig::default()
        };
        assert!(create_renderer(ReportFormat::DocbookXml, "raptor2", &config).is_ok());
    }
}
