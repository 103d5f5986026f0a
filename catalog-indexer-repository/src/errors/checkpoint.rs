use thiserror::Error;

/// Represents errors that can occur within the checkpoint store.
///
/// A missing backing file is NOT represented here; it reads as an empty
/// record. These errors are all fatal: a checkpoint that cannot be read or
/// written makes resumption unsafe.
#[derive(Debug, Error)]
pub enum CheckpointStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid checkpoint timestamp '{raw}': {source}")]
    InvalidTimestamp {
        raw: String,
        source: chrono::ParseError,
    },
}

impl CheckpointStoreError {
    /// Create an invalid-timestamp error.
    pub fn invalid_timestamp(raw: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::InvalidTimestamp {
            raw: raw.into(),
            source,
        }
    }
}
