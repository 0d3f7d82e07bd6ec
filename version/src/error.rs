use std::result;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Empty version string")]
    Empty,

    #[error("Invalid version component '{component}' in '{version}'")]
    InvalidComponent { version: String, component: String },
}

impl VersionError {
    /// Get a user-friendly message for command line display
    pub fn user_message(&self) -> String {
        match self {
            VersionError::Empty => "Version string is empty".to_string(),
            VersionError::InvalidComponent { version, component } => format!(
                "Invalid version '{version}': component '{component}' is not a number"
            ),
        }
    }
}

pub type Result<T> = result::Result<T, VersionError>;
