//! # ev3native
//!
//! Native helper for a VM that cannot touch large files itself:
//! - Table lookups: one byte at `bytes_per_row * row + column` of any file
//! - Overflow-safe chunked seeking past the 32-bit seek range
//! - One-shot mode (result is the exit status)
//! - Persistent mode (line commands on stdin, results on stdout)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Runner                               │
//! │           (argv join  |  stdin line loop)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  command line
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Dispatcher                              │
//! │            (keyword prefix → CommandHandler)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  parameter tail
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Lookup Engine                             │
//! │        (parse → offset → chunked seek → read 1 byte)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!                 ResultCode 0..=255
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod lookup;
pub mod protocol;
pub mod dispatch;
pub mod runner;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{NativeError, Result};
pub use config::Config;
pub use dispatch::Dispatcher;
pub use protocol::ResultCode;
pub use runner::Runner;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ev3native
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
