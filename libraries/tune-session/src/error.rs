//! Error types for sessions

use thiserror::Error;
use tune_transport::TransportError;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session loop has stopped
    #[error("Session closed")]
    Closed,

    /// Transport could not be built
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
