//! Error types for chainsql

use thiserror::Error;

/// Result type alias for chainsql operations
pub type StmtResult<T> = Result<T, StmtError>;

/// Error types for statement execution
#[derive(Debug, Error)]
pub enum StmtError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// The prepared statement reported an unsuccessful execution
    #[error("Statement rejected: {0}")]
    Rejected(String),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl StmtError {
    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a rejected-statement error
    pub fn rejected(sql: impl Into<String>) -> Self {
        Self::Rejected(sql.into())
    }

    /// Check if the statement was rejected by the connection
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Check if this is a row decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Wrap a tokio_postgres error, separating a dropped connection from a failed statement
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if err.is_closed() {
            return Self::Connection(err.to_string());
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for StmtError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_names_the_column() {
        let err = StmtError::decode("price", "unsupported type numeric");
        assert!(err.is_decode());
        assert_eq!(
            err.to_string(),
            "Decode error on column 'price': unsupported type numeric"
        );
    }

    #[test]
    fn rejected_is_detected() {
        let err = StmtError::rejected("UPDATE users SET a = 1");
        assert!(err.is_rejected());
        assert!(!StmtError::Other("x".into()).is_rejected());
    }
}
