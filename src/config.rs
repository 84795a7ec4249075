//! Configuration for huffman-coder

use serde::{Deserialize, Serialize};

use crate::error::{CodingError, Result};

/// How the decoder matches codes at the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeStrategy {
    /// Try every code against the cursor, longest codes first.
    #[default]
    LongestFirst,
    /// Accumulate bits until they form a known code.
    PrefixLookup,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoderConfig {
    pub decode_strategy: DecodeStrategy,
    pub max_input_symbols: usize,
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self {
            decode_strategy: DecodeStrategy::LongestFirst,
            max_input_symbols: 100 * 1024 * 1024,
        }
    }
}

impl CoderConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CodingError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CodingError::Serialization(e.to_string()))
    }
}
