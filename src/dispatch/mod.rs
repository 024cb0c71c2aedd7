//! Dispatch Module
//!
//! Routes command lines to handlers by keyword prefix.
//!
//! ## Matching
//! A line matches a handler when it starts with the handler's keyword
//! followed by a single space. The rest of the line is handed over
//! verbatim. Lines matching nothing answer 255.

mod handler;
mod registry;

pub use handler::{CommandHandler, TableLookupHandler};
pub use registry::Dispatcher;
