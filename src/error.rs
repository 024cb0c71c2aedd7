//! Error types for ev3native
//!
//! Every variant collapses to the same result code (255) on the way out.
//! The variants exist so the cause can be logged on the side channel.

use thiserror::Error;

/// Result type alias using NativeError
pub type Result<T> = std::result::Result<T, NativeError>;

/// Unified error type for ev3native operations
#[derive(Debug, Error)]
pub enum NativeError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Dispatch Errors
    // -------------------------------------------------------------------------
    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),

    // -------------------------------------------------------------------------
    // Parameter Errors
    // -------------------------------------------------------------------------
    #[error("Malformed parameters: {0}")]
    MalformedParameters(String),

    #[error("Parameter out of range: {0}")]
    InvalidRange(String),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Short read at offset {offset}: no byte available")]
    ShortRead { offset: u128 },

    #[error("Offset {0} exceeds the seekable range")]
    OffsetOutOfRange(u128),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
