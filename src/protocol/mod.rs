//! Protocol Module
//!
//! Defines the text protocol spoken with the calling VM.
//!
//! ## Request Format
//! ```text
//! <keyword> <parameters...>\n
//! ```
//!
//! ### Commands
//! - `tablelookup <path> <bytes_per_row> <row> <column>`
//!
//! ## Response Format
//! ```text
//! <code>\n          code in 0..=255, decimal, no padding
//! ```
//!
//! ### Result Codes
//! - 0..=254: the byte that was read
//! - 255:     failure (also a legitimate byte value; the two are indistinguishable)

mod code;

pub use code::ResultCode;

/// Keyword of the table lookup command
pub const TABLE_LOOKUP: &str = "tablelookup";

/// Separator between a keyword and its parameter tail
pub const KEYWORD_SEPARATOR: u8 = b' ';
