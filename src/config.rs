//! Configuration for huffpack

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::HuffError;

/// Largest input whose per-symbol counts always fit the container's `i32` fields.
pub const MAX_INPUT_SIZE: u64 = i32::MAX as u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub max_input_size: u64,
    /// When false the encoder writes a container even if it is larger than the input.
    pub enforce_feasibility: bool,
    pub buffer_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_input_size: MAX_INPUT_SIZE,
            enforce_feasibility: true,
            buffer_capacity: 64 * 1024, // 64 KiB
        }
    }
}

impl CodecConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HuffError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| HuffError::Config(format!("{}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| HuffError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), HuffError> {
        if self.buffer_capacity == 0 {
            return Err(HuffError::Config("buffer_capacity must be non-zero".into()));
        }
        if self.max_input_size > MAX_INPUT_SIZE {
            return Err(HuffError::Config(format!(
                "max_input_size {} exceeds {MAX_INPUT_SIZE}",
                self.max_input_size
            )));
        }
        Ok(())
    }
}
