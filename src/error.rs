//! Client error definitions.

use thiserror::Error;

use crate::runtime::RuntimeError;
use crate::store::StoreError;

/// Errors surfaced by the [`Client`](crate::Client).
#[derive(Debug, Error)]
pub enum ClientError {
    /// An operation that needs an open transaction was called without one.
    #[error("No active transaction for {operation}")]
    NoActiveTransaction { operation: &'static str },

    /// `start_transaction` was called while another transaction is open.
    #[error("Transaction {0} is already open")]
    TransactionAlreadyOpen(String),

    /// Configuration store error, passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Runtime channel error, passed through unchanged.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// A collaborator could not be established during `Client::init`.
    #[error("Client initialization failed: {0}")]
    Init(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_errors_are_transparent() {
        let store = StoreError::TransactionNotFound("abc".into());
        let expected = store.to_string();
        assert_eq!(ClientError::from(store).to_string(), expected);

        let runtime = RuntimeError::InvalidState("sleeping".into());
        let expected = runtime.to_string();
        assert_eq!(ClientError::from(runtime).to_string(), expected);
    }

    #[test]
    fn test_invalid_state_display() {
        let err = ClientError::NoActiveTransaction {
            operation: "backend_create",
        };
        assert_eq!(err.to_string(), "No active transaction for backend_create");
    }
}
