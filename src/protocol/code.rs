//! Result code definitions
//!
//! The single integer that travels back to the caller, either as the
//! process exit status or as one decimal line on stdout.

use std::fmt;
use std::process::ExitCode;

use crate::error::Result;

/// A status/value code in `0..=255`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultCode(u8);

impl ResultCode {
    /// Universal failure sentinel
    pub const FAILURE: ResultCode = ResultCode(255);

    /// Wrap a byte that was read successfully
    pub fn from_byte(byte: u8) -> Self {
        Self(byte)
    }

    /// Raw numeric value
    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this code equals the failure sentinel.
    ///
    /// A stored byte of 255 also reports `true` here.
    pub fn is_failure(self) -> bool {
        self == Self::FAILURE
    }
}

impl<T: Into<u8>> From<Result<T>> for ResultCode {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(byte) => Self(byte.into()),
            Err(_) => Self::FAILURE,
        }
    }
}

impl From<ResultCode> for ExitCode {
    fn from(code: ResultCode) -> Self {
        ExitCode::from(code.0)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
