use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use thiserror::Error;

/// Error context to enrich error messages
#[derive(Debug)]
pub struct ErrorContext {
    pub operation: String,
    pub source: Option<String>,
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Operation: {}", self.operation)?;
        if let Some(source) = &self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

/// Errors that can occur while reading, classifying or rendering a change ledger
#[derive(Error, Debug)]
pub enum ChangesError {
    #[error("Cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bad line has {found} fields, expected {expected} at line {line}: {fields:?}")]
    FieldCount {
        line: u64,
        found: usize,
        expected: usize,
        fields: Vec<String>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Bad version at line {line}: {source}")]
    InvalidVersion {
        line: u64,
        source: version::VersionError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("{0}")]
    Other(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<ChangesError>),

    #[error("{context}: {source}")]
    ContextualError {
        context: ErrorContext,
        source: Box<ChangesError>,
    },
}

impl ChangesError {
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    #[must_use]
    pub fn with_operation_context(
        self,
        operation: impl Into<String>,
        source: Option<impl Into<String>>,
    ) -> Self {
        Self::ContextualError {
            context: ErrorContext {
                operation: operation.into(),
                source: source.map(Into::into),
            },
            source: Box::new(self),
        }
    }

    /// Line number of the offending ledger row, when the error has one
    #[must_use]
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::FieldCount { line, .. } | Self::InvalidVersion { line, .. } => Some(*line),
            Self::WithContext(_, err) => err.line(),
            Self::ContextualError { source, .. } => source.line(),
            _ => None,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unreadable { path, source } => {
                format!("Cannot read {} - {source}", path.display())
            }
            Self::Io(e) => format!("File operation failed: {e}"),
            Self::FieldCount {
                line,
                found,
                expected,
                fields,
            } => format!(
                "Bad line has {found} fields, expected {expected} at line {line}: {fields:?}"
            ),
            Self::Csv(e) => format!("Failed to write CSV export: {e}"),
            Self::InvalidVersion { line, source } => {
                format!("Bad version at line {line}: {}", source.user_message())
            }
            Self::InvalidConfig(msg) => format!("Invalid configuration: {msg}"),
            Self::RegexError(e) => format!("Regular expression error: {e}"),
            Self::Other(msg) => msg.clone(),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
            Self::ContextualError { context, source } => {
                format!("{}: {}", context, source.user_message())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count_message_names_line_and_fields() {
        let err = ChangesError::FieldCount {
            line: 7,
            found: 2,
            expected: 9,
            fields: vec!["1.4".to_string(), "type".to_string()],
        };

        assert_eq!(
            err.user_message(),
            r#"Bad line has 2 fields, expected 9 at line 7: ["1.4", "type"]"#
        );
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_context_keeps_line() {
        let err = ChangesError::FieldCount {
            line: 3,
            found: 10,
            expected: 9,
            fields: Vec::new(),
        }
        .with_context("changes.tsv");

        assert_eq!(err.line(), Some(3));
        assert!(err.user_message().starts_with("changes.tsv: Bad line has 10 fields"));
    }

    #[test]
    fn test_operation_context_message() {
        let err = ChangesError::Other("boom".to_string())
            .with_operation_context("render", Some("docbook"));

        assert_eq!(
            err.user_message(),
            "Operation: render (source: docbook): boom"
        );
    }
}
