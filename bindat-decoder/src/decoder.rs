//! Main decoder API
//!
//! This module provides the primary interface for the decoder library.
//! The Decoder struct holds the configuration and turns a byte source into a
//! [`Container`].

use crate::config::DecoderConfig;
use crate::format::{read_metadata, DatasetIterator};
use crate::types::{Container, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// The main decoder struct - entry point for all decoding operations
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a new decoder instance
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Configuration this decoder was built with
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a complete BinDat stream
    ///
    /// The source is read to its end. Decoding is all-or-nothing: on error
    /// every dataset decoded so far is dropped.
    ///
    /// # Example
    /// ```
    /// use bindat_decoder::{Decoder, DecoderConfig};
    ///
    /// let mut bytes = b"{\"a\":1}\0".to_vec();
    /// bytes.extend_from_slice(&1u64.to_be_bytes());
    /// bytes.extend_from_slice(&2.5f64.to_le_bytes());
    ///
    /// let decoder = Decoder::new(DecoderConfig::new());
    /// let container = decoder.decode(bytes.as_slice()).unwrap();
    /// assert_eq!(container.datasets, vec![vec![2.5]]);
    /// ```
    pub fn decode<R: Read>(&self, reader: R) -> Result<Container> {
        let mut reader = BufReader::new(reader);

        let (metadata, offset) = read_metadata(&mut reader)?;
        let datasets = DatasetIterator::new(reader, self.config.float_order, offset)
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Decoded container with {} datasets", datasets.len());
        Ok(Container { metadata, datasets })
    }

    /// Decode an in-memory buffer
    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Container> {
        self.decode(bytes)
    }

    /// Open and decode a file
    ///
    /// # Example
    /// ```no_run
    /// use bindat_decoder::Decoder;
    /// use std::path::Path;
    ///
    /// let container = Decoder::default().decode_file(Path::new("test.dat")).unwrap();
    /// println!("{}", container.metadata);
    /// ```
    pub fn decode_file(&self, path: &Path) -> Result<Container> {
        log::info!("Decoding BinDat file: {:?}", path);

        let file = File::open(path)?;
        let container = self.decode(file)?;

        log::info!(
            "Decoded {:?}: {} datasets, {} values",
            path,
            container.num_datasets(),
            container.total_values()
        );
        Ok(container)
    }
}

/// Decode a BinDat stream with the default configuration
///
/// Float values are read as little-endian.
pub fn decode<R: Read>(reader: R) -> Result<Container> {
    Decoder::default().decode(reader)
}
