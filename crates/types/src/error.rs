//! Error types for the Event Admin service

use thiserror::Error;

/// Storage specific errors, classified into a closed set of kinds
///
/// Handlers map each kind to one HTTP status; callers never see the raw
/// underlying error.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The requested record does not exist
    #[error("record not found")]
    NotFound,

    /// A constraint violation (duplicate key, check failure)
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Transient loss of the storage backend (connection, pool)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Any other query failure
    #[error("query failed: {0}")]
    Query(String),
}

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more environment variables are missing or invalid.
    /// The message carries one line per offending variable.
    #[error("invalid environment configuration:\n{summary}")]
    Invalid { summary: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_message_lists_fields_per_line() {
        let err = ConfigError::Invalid {
            summary: "DB_CONNECTION_STRING: missing required value\nDB_MIGRATING: not a boolean".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("DB_CONNECTION_STRING"));
        assert!(message.contains('\n'));
    }

    #[test]
    fn storage_kinds_render_their_detail() {
        assert_eq!(StorageError::NotFound.to_string(), "record not found");
        let err = StorageError::Unavailable("pool closed".to_string());
        assert!(err.to_string().contains("pool closed"));
    }
}
