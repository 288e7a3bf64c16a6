//! Error types for the bibliography list.

use std::path::PathBuf;

/// Errors produced by the bibliography list.
///
/// Interactive operations (edit, commit, delete) never return these to the
/// caller; they log them and leave the list unchanged. Parsing and
/// configuration entry points return them directly.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// The targeted row is not present in the store.
    #[error("Row not found in the list")]
    RowNotFound,

    /// An edit was committed with no edit session pending.
    #[error("No pending edit to commit")]
    NoPendingEdit,

    /// A position identifier received from a peer could not be resolved.
    #[error("Invalid row path '{0}'")]
    InvalidPath(String),

    /// A snapshot could not be encoded or decoded.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// A configuration document could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// A configuration file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for bibliography list operations.
pub type Result<T> = std::result::Result<T, ListError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(ListError::RowNotFound.to_string(), "Row not found in the list");
        assert_eq!(
            ListError::InvalidPath("x".into()).to_string(),
            "Invalid row path 'x'"
        );
    }

    #[test]
    fn test_snapshot_error_converts() {
        let err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err: ListError = err.into();
        assert!(matches!(err, ListError::Snapshot(_)));
        assert!(err.to_string().starts_with("Snapshot error"));
    }
}
