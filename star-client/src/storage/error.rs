use thiserror::Error;

/// Failures reported by the remote profile collection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Transport-level failure: connection, timeout, undecodable response, 5xx
    #[error("{0}")]
    Network(String),
    /// The target profile no longer exists on the server
    #[error("Profile not found: {0}")]
    NotFound(String),
    /// The payload passed local validation but the server refused it
    #[error("{0}")]
    ServerRejected(String),
}

impl SyncError {
    pub fn network(message: impl Into<String>) -> Self {
        SyncError::Network(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        SyncError::ServerRejected(message.into())
    }
}
