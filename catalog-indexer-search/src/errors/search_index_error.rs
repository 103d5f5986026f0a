//! Unified error type for all search index operations.

use catalog_indexer_shared::RetryClass;
use thiserror::Error;

/// Errors from search index operations.
///
/// Used by the `SearchIndexProvider` trait for all write operations.
/// Connection errors are the transient class retried by the loader's
/// backoff policy; everything else is fatal to the enclosing cycle.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to reach the search index backend (connect, send, receive).
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Bulk request rejected, or one or more documents in it failed.
    #[error("Bulk index error: {0}")]
    BulkIndexError(String),

    /// Failed to create a search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse a response from the search index backend.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize a document for the search index backend.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a bulk index error.
    pub fn bulk_index(msg: impl Into<String>) -> Self {
        Self::BulkIndexError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }
}

impl RetryClass for SearchIndexError {
    fn is_transient(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_errors_are_transient() {
        assert!(SearchIndexError::connection("refused").is_transient());
        assert!(!SearchIndexError::bulk_index("mapping conflict").is_transient());
        assert!(!SearchIndexError::parse("bad json").is_transient());
        assert!(!SearchIndexError::serialization("bad document").is_transient());
        assert!(!SearchIndexError::index_creation("exists with other mapping").is_transient());
    }
}
