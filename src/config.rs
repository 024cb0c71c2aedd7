//! Configuration for ev3native
//!
//! Centralized configuration with sensible defaults.

use crate::error::{NativeError, Result};
use crate::lookup::MAX_SEEK_STEP;

/// Main configuration for an ev3native process
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Lookup Configuration
    // -------------------------------------------------------------------------
    /// Largest distance covered by a single relative seek
    pub max_seek_step: u64,

    /// Longest accepted file path, in bytes
    pub max_path_len: usize,

    // -------------------------------------------------------------------------
    // Session Configuration
    // -------------------------------------------------------------------------
    /// Line written to the output stream once input is exhausted
    pub farewell: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_seek_step: MAX_SEEK_STEP,
            max_path_len: 999,
            farewell: "Ending native code process...".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the single-seek step limit (in bytes)
    pub fn max_seek_step(mut self, step: u64) -> Self {
        self.config.max_seek_step = step;
        self
    }

    /// Set the maximum path length (in bytes)
    pub fn max_path_len(mut self, len: usize) -> Self {
        self.config.max_path_len = len;
        self
    }

    /// Set the termination notice for persistent mode
    pub fn farewell(mut self, message: impl Into<String>) -> Self {
        self.config.farewell = message.into();
        self
    }

    /// Validate and produce the config
    pub fn build(self) -> Result<Config> {
        if self.config.max_seek_step == 0 {
            return Err(NativeError::Config(
                "max_seek_step must be at least 1".to_string(),
            ));
        }
        // SeekFrom::Current takes an i64
        if self.config.max_seek_step > i64::MAX as u64 {
            return Err(NativeError::Config(format!(
                "max_seek_step must not exceed {}",
                i64::MAX
            )));
        }
        if self.config.max_path_len == 0 {
            return Err(NativeError::Config(
                "max_path_len must be at least 1".to_string(),
            ));
        }
        if self.config.farewell.contains('\n') {
            return Err(NativeError::Config(
                "farewell must be a single line".to_string(),
            ));
        }
        Ok(self.config)
    }
}
