//! Lookup request parsing
//!
//! Turns the parameter tail of a `tablelookup` command into typed,
//! validated parameters.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{NativeError, Result};

use super::ByteOffset;

/// Parsed parameters of one table lookup
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    /// File treated as the table
    path: PathBuf,

    /// Row stride in bytes (>= 1)
    bytes_per_row: f64,

    /// Row index (>= 0)
    row: f64,

    /// Column index (>= 0)
    column: f64,
}

impl LookupRequest {
    /// Build a request from already-typed values, validating ranges
    pub fn new(path: impl Into<PathBuf>, bytes_per_row: f64, row: f64, column: f64) -> Result<Self> {
        let request = Self {
            path: path.into(),
            bytes_per_row,
            row,
            column,
        };
        request.validate()?;
        Ok(request)
    }

    /// Parse `<path> <bytes_per_row> <row> <column>`
    ///
    /// Fields are separated by ASCII whitespace. The path is taken as raw
    /// bytes. Tokens after the fourth are ignored.
    pub fn parse(params: impl AsRef<[u8]>, config: &Config) -> Result<Self> {
        let mut tokens = params
            .as_ref()
            .split(|b| b.is_ascii_whitespace())
            .filter(|token| !token.is_empty());

        let path = tokens
            .next()
            .ok_or_else(|| NativeError::MalformedParameters("missing path".to_string()))?;

        if path.len() > config.max_path_len {
            return Err(NativeError::MalformedParameters(format!(
                "path is {} bytes long (max {})",
                path.len(),
                config.max_path_len
            )));
        }
        let path = path_from_bytes(path)?;

        let bytes_per_row = parse_number(tokens.next(), "bytes_per_row")?;
        let row = parse_number(tokens.next(), "row")?;
        let column = parse_number(tokens.next(), "column")?;

        let extra = tokens.count();
        if extra > 0 {
            tracing::debug!("Ignoring {} trailing token(s) after column", extra);
        }

        Self::new(path, bytes_per_row, row, column)
    }

    /// Check `bytes_per_row >= 1`, `row >= 0`, `column >= 0`
    pub fn validate(&self) -> Result<()> {
        if self.bytes_per_row.is_nan() || self.bytes_per_row < 1.0 {
            return Err(NativeError::InvalidRange(format!(
                "bytes_per_row must be >= 1, got {}",
                self.bytes_per_row
            )));
        }
        if self.row.is_nan() || self.row < 0.0 {
            return Err(NativeError::InvalidRange(format!(
                "row must be >= 0, got {}",
                self.row
            )));
        }
        if self.column.is_nan() || self.column < 0.0 {
            return Err(NativeError::InvalidRange(format!(
                "column must be >= 0, got {}",
                self.column
            )));
        }
        Ok(())
    }

    /// Offset of the addressed cell
    pub fn offset(&self) -> ByteOffset {
        ByteOffset::compute(self.bytes_per_row, self.row, self.column)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes_per_row(&self) -> f64 {
        self.bytes_per_row
    }

    pub fn row(&self) -> f64 {
        self.row
    }

    pub fn column(&self) -> f64 {
        self.column
    }
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> Result<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Ok(PathBuf::from(OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> Result<PathBuf> {
    std::str::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|_| NativeError::MalformedParameters("path is not valid UTF-8".to_string()))
}

/// Parse one numeric field; NaN and infinities are rejected
fn parse_number(token: Option<&[u8]>, field: &str) -> Result<f64> {
    let token = token
        .ok_or_else(|| NativeError::MalformedParameters(format!("missing {}", field)))?;

    let value: f64 = std::str::from_utf8(token)
        .ok()
        .and_then(|text| text.parse().ok())
        .ok_or_else(|| {
            NativeError::MalformedParameters(format!(
                "{} is not a number: {:?}",
                field,
                String::from_utf8_lossy(token)
            ))
        })?;

    if !value.is_finite() {
        return Err(NativeError::MalformedParameters(format!(
            "{} is not finite: {}",
            field, value
        )));
    }

    Ok(value)
}
