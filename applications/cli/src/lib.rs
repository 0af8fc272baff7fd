//! Tune Player - terminal front end
//!
//! A stand-in presentation layer: line commands in, progress line and
//! notifications out.

pub mod config;
pub mod error;
pub mod input;
pub mod player;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{CliError, Result};
