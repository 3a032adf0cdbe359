//! BinDat Decoder Library
//!
//! A stateless, reusable library for reading BinDat files: a JSON metadata
//! block followed by any number of length-prefixed float64 datasets.
//!
//! # Architecture
//!
//! This library is intentionally minimal and focused on decoding:
//! - Scans for the null-terminated metadata block and parses it as JSON
//! - Decodes datasets until the input is exhausted
//! - Makes the float payload byte order explicit ([`FloatOrder`])
//!
//! The library does NOT:
//! - Write BinDat files
//! - Validate metadata against any schema
//! - Print or report results
//!
//! Presentation lives in the application layer (bindat-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use bindat_decoder::{Decoder, DecoderConfig, FloatOrder};
//! use std::path::Path;
//!
//! let config = DecoderConfig::new().with_float_order(FloatOrder::Little);
//! let decoder = Decoder::new(config);
//!
//! let container = decoder.decode_file(Path::new("test.dat")).unwrap();
//! println!("{}", container.metadata);
//! for dataset in &container.datasets {
//!     println!("{} rows", dataset.len());
//! }
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod types;

// Re-export main types for convenience
pub use config::{DecoderConfig, FloatOrder};
pub use decoder::{decode, Decoder};
pub use types::{Container, DatasetSummary, DecodeError, MetadataError, Result};

// Re-exported so callers can work with metadata without a direct dependency
pub use serde_json;

// Internal modules (not exposed in public API)
mod format;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
