use catalog_indexer_shared::RetryClass;
use thiserror::Error;

/// Represents errors that can occur within the catalog repository.
///
/// This enum consolidates error conditions specific to database
/// interactions, such as SQLx errors during query execution.
#[derive(Debug, Error)]
pub enum CatalogRepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RetryClass for CatalogRepositoryError {
    /// Transient database trouble is connectivity-shaped: broken sockets,
    /// TLS handshakes, pool exhaustion. Query, decode, and constraint
    /// errors are fatal.
    fn is_transient(&self) -> bool {
        match self {
            Self::Database(error) => matches!(
                error,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::WorkerCrashed
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_are_transient() {
        let error = CatalogRepositoryError::Database(sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        )));
        assert!(error.is_transient());

        assert!(CatalogRepositoryError::Database(sqlx::Error::PoolTimedOut).is_transient());
    }

    #[test]
    fn test_query_errors_are_fatal() {
        let error = CatalogRepositoryError::Database(sqlx::Error::RowNotFound);
        assert!(!error.is_transient());

        let error = CatalogRepositoryError::Database(sqlx::Error::ColumnNotFound(
            "modified".to_string(),
        ));
        assert!(!error.is_transient());
    }
}
