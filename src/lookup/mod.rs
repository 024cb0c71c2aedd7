//! Lookup Module
//!
//! Treats a flat file as a 2-D grid of fixed-width rows and extracts one byte.
//!
//! ## Responsibilities
//! - Parse and validate lookup parameters
//! - Compute the byte offset without overflow
//! - Seek in bounded steps so huge offsets never exceed the single-seek limit
//! - Read exactly one byte and release the file
//!
//! ## Addressing
//! ```text
//!            column →
//!          ┌────┬────┬────┬────┐
//!   row 0  │ 0  │ 1  │ 2  │ .. │   offset = bytes_per_row * row + column
//!          ├────┼────┼────┼────┤
//!   row 1  │bpr │ .. │ .. │ .. │
//!          └────┴────┴────┴────┘
//! ```

mod offset;
mod request;
mod table;

pub use offset::{seek_chunked, ByteOffset, SeekPlan, MAX_SEEK_STEP};
pub use request::LookupRequest;
pub use table::{lookup, TableLookup};
