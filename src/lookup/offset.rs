//! Byte offsets and chunked seeking
//!
//! Offsets are held in `u128` so the product of two `u64` factors plus a
//! `u64` column can never overflow. Seeking is split into relative steps
//! of at most `max_step` bytes.

use std::fmt;
use std::io::{Seek, SeekFrom};

use crate::error::{NativeError, Result};

/// Largest relative seek performed in one call (i32::MAX)
pub const MAX_SEEK_STEP: u64 = 2_147_483_647;

/// Absolute position of one table cell within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ByteOffset(u128);

impl ByteOffset {
    /// Wrap a raw offset
    pub fn new(offset: u128) -> Self {
        Self(offset)
    }

    /// `floor(bytes_per_row) * floor(row) + floor(column)`
    ///
    /// Each factor is truncated toward zero and saturated into `u64`;
    /// negative and NaN inputs become 0. Callers validate ranges first.
    pub fn compute(bytes_per_row: f64, row: f64, column: f64) -> Self {
        let bytes_per_row = bytes_per_row.trunc() as u64;
        let row = row.trunc() as u64;
        let column = column.trunc() as u64;

        Self(u128::from(bytes_per_row) * u128::from(row) + u128::from(column))
    }

    /// Raw offset value
    pub fn get(self) -> u128 {
        self.0
    }

    /// Split this offset into relative seek steps no larger than `max_step`
    pub fn seek_plan(self, max_step: u64) -> SeekPlan {
        SeekPlan::new(self, max_step)
    }
}

impl fmt::Display for ByteOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Iterator over the relative steps that together cover an offset
///
/// Every step except the last equals `max_step`; the steps always sum to
/// the planned offset. A zero offset yields no steps.
#[derive(Debug, Clone)]
pub struct SeekPlan {
    remaining: u128,
    max_step: u64,
}

impl SeekPlan {
    /// Plan the steps for `offset`. A `max_step` of 0 is treated as 1.
    pub fn new(offset: ByteOffset, max_step: u64) -> Self {
        Self {
            remaining: offset.get(),
            max_step: max_step.max(1),
        }
    }

    /// Bytes not yet covered by yielded steps
    pub fn remaining(&self) -> u128 {
        self.remaining
    }
}

impl Iterator for SeekPlan {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let step = if self.remaining > u128::from(self.max_step) {
            self.max_step
        } else {
            // Fits: remaining <= max_step <= u64::MAX
            self.remaining as u64
        };
        self.remaining -= u128::from(step);
        Some(step)
    }
}

/// Advance `stream` by `offset` bytes from its current position
///
/// Uses `SeekFrom::Current` in steps of at most `max_step` bytes and
/// returns the resulting absolute position. Offsets past `i64::MAX` are
/// rejected up front since no file position can reach them.
pub fn seek_chunked<S: Seek + ?Sized>(
    stream: &mut S,
    offset: ByteOffset,
    max_step: u64,
) -> Result<u64> {
    if offset.get() > i64::MAX as u128 {
        return Err(NativeError::OffsetOutOfRange(offset.get()));
    }
    // SeekFrom::Current takes an i64
    let max_step = max_step.min(i64::MAX as u64);

    let mut position = None;
    for step in offset.seek_plan(max_step) {
        position = Some(stream.seek(SeekFrom::Current(step as i64))?);
    }

    match position {
        Some(position) => Ok(position),
        None => Ok(stream.stream_position()?),
    }
}
