//! Decoder configuration types
//!
//! The file format does not say which byte order its float payloads use, so
//! the decoder makes it an explicit setting. Row counts are always big-endian.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Byte order of the float64 payload values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatOrder {
    /// Little-endian (what common producer hardware writes)
    #[default]
    Little,
    /// Big-endian
    Big,
    /// Whatever the decoding host uses
    Native,
}

impl fmt::Display for FloatOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatOrder::Little => write!(f, "little"),
            FloatOrder::Big => write!(f, "big"),
            FloatOrder::Native => write!(f, "native"),
        }
    }
}

impl FromStr for FloatOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(FloatOrder::Little),
            "big" | "be" => Ok(FloatOrder::Big),
            "native" => Ok(FloatOrder::Native),
            other => Err(format!(
                "unknown float order '{}' (expected little, big or native)",
                other
            )),
        }
    }
}

/// Configuration for the decoder library
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Byte order used to read dataset values
    #[serde(default)]
    pub float_order: FloatOrder,
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the float payload byte order
    pub fn with_float_order(mut self, order: FloatOrder) -> Self {
        self.float_order = order;
        self
    }
}
