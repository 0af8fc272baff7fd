//! Error types for transport construction

use thiserror::Error;

/// Transport errors
///
/// Transport operations themselves never fail (out-of-range input is
/// clamped); only building a transport from configuration can.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransportError {
    /// Track duration is zero, negative or not finite
    #[error("Invalid track duration: {0}")]
    InvalidDuration(f64),

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;
