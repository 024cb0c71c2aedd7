//! Command handlers
//!
//! One handler per command keyword.

use crate::config::Config;
use crate::error::Result;
use crate::lookup::TableLookup;
use crate::protocol::TABLE_LOOKUP;

/// A command the dispatcher can route to
pub trait CommandHandler {
    /// Keyword that selects this handler (without the trailing space)
    fn keyword(&self) -> &str;

    /// Execute with the parameter tail that followed `keyword `
    fn handle(&self, params: &[u8]) -> Result<u8>;
}

/// Handler for `tablelookup <path> <bytes_per_row> <row> <column>`
#[derive(Debug, Clone, Default)]
pub struct TableLookupHandler {
    engine: TableLookup,
}

impl TableLookupHandler {
    pub fn new(config: Config) -> Self {
        Self {
            engine: TableLookup::new(config),
        }
    }
}

impl CommandHandler for TableLookupHandler {
    fn keyword(&self) -> &str {
        TABLE_LOOKUP
    }

    fn handle(&self, params: &[u8]) -> Result<u8> {
        self.engine.lookup_params(params)
    }
}
