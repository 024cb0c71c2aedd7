//! Table Lookup
//!
//! Opens the table file, seeks to the addressed cell and reads one byte.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::config::Config;
use crate::error::{NativeError, Result};
use crate::protocol::ResultCode;

use super::{seek_chunked, ByteOffset, LookupRequest};

/// Executes table lookups against files on disk
#[derive(Debug, Clone, Default)]
pub struct TableLookup {
    config: Config,
}

impl TableLookup {
    /// Create a lookup engine with the given config
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a parameter tail and perform the lookup
    pub fn lookup_params(&self, params: &[u8]) -> Result<u8> {
        let request = LookupRequest::parse(params, &self.config)?;
        self.lookup(&request)
    }

    /// Read the byte addressed by `request`
    ///
    /// The file handle lives only for the duration of this call.
    pub fn lookup(&self, request: &LookupRequest) -> Result<u8> {
        let mut file = File::open(request.path())?;
        let offset = request.offset();

        let position = seek_chunked(&mut file, offset, self.config.max_seek_step)?;
        tracing::trace!(
            "Seeked {} to position {} (offset {})",
            request.path().display(),
            position,
            offset
        );

        read_byte(&mut file, offset)
    }
}

/// Read exactly one byte at the current position
fn read_byte<R: Read>(reader: &mut R, offset: ByteOffset) -> Result<u8> {
    let mut buf = [0u8; 1];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(buf[0]),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(NativeError::ShortRead {
            offset: offset.get(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Look up one byte with the default config, collapsing failures to 255
pub fn lookup(path: impl AsRef<Path>, bytes_per_row: f64, row: f64, column: f64) -> ResultCode {
    let result = LookupRequest::new(path.as_ref(), bytes_per_row, row, column)
        .and_then(|request| TableLookup::default().lookup(&request));

    if let Err(ref e) = result {
        tracing::debug!("Lookup in {} failed: {}", path.as_ref().display(), e);
    }
    ResultCode::from(result)
}
