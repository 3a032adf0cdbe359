//! BinDat framing
//!
//! ```text
//! <metadata-json-bytes> 0x00
//! { <row-count: u64, big-endian> <row-count * 8 bytes of f64> } *
//! ```
//!
//! There is no magic number and no version field. The only valid end of
//! input is right after the metadata terminator or right after a complete
//! dataset.

use crate::config::FloatOrder;
use crate::types::{DecodeError, MetadataError, Result};
use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian};
use std::io::{BufRead, Read};

/// Size of the row-count field preceding every dataset
pub const ROW_COUNT_SIZE: usize = 8;

/// Size of one dataset value
pub const VALUE_SIZE: u64 = 8;

/// Metadata terminator
pub const METADATA_TERMINATOR: u8 = 0x00;

/// Read and parse the metadata block
///
/// Returns the parsed value and the number of bytes consumed, terminator
/// included.
pub(crate) fn read_metadata<R: BufRead>(reader: &mut R) -> Result<(serde_json::Value, u64)> {
    let mut raw = Vec::new();
    let scanned = reader.read_until(METADATA_TERMINATOR, &mut raw)?;

    if raw.last() != Some(&METADATA_TERMINATOR) {
        return Err(DecodeError::UnterminatedMetadata { scanned });
    }
    raw.pop();

    let text = std::str::from_utf8(&raw).map_err(MetadataError::from)?;
    let metadata = serde_json::from_str(text).map_err(MetadataError::from)?;

    log::debug!("Parsed metadata block ({} bytes)", raw.len());
    Ok((metadata, scanned as u64))
}

/// Reinterpret raw payload bytes as f64 values
///
/// `bytes.len()` must be a multiple of 8.
pub(crate) fn bytes_to_f64(bytes: &[u8], order: FloatOrder) -> Vec<f64> {
    let mut values = vec![0f64; bytes.len() / VALUE_SIZE as usize];
    match order {
        FloatOrder::Little => LittleEndian::read_f64_into(bytes, &mut values),
        FloatOrder::Big => BigEndian::read_f64_into(bytes, &mut values),
        FloatOrder::Native => NativeEndian::read_f64_into(bytes, &mut values),
    }
    values
}

/// Iterator over the datasets that follow the metadata block
///
/// Stops after the first error.
pub(crate) struct DatasetIterator<R: Read> {
    reader: R,
    float_order: FloatOrder,
    offset: u64,
    index: usize,
    finished: bool,
}

impl<R: Read> DatasetIterator<R> {
    /// `offset` is the absolute position of `reader` in the file
    pub(crate) fn new(reader: R, float_order: FloatOrder, offset: u64) -> Self {
        Self {
            reader,
            float_order,
            offset,
            index: 0,
            finished: false,
        }
    }

    /// Read one row count. `Ok(None)` means clean end of input.
    fn read_row_count(&mut self) -> Result<Option<u64>> {
        let mut header = Vec::with_capacity(ROW_COUNT_SIZE);
        (&mut self.reader)
            .take(ROW_COUNT_SIZE as u64)
            .read_to_end(&mut header)?;

        match header.len() {
            0 => Ok(None),
            ROW_COUNT_SIZE => {
                self.offset += ROW_COUNT_SIZE as u64;
                Ok(Some(BigEndian::read_u64(&header)))
            }
            available => Err(DecodeError::TruncatedHeader {
                offset: self.offset,
                available,
            }),
        }
    }

    fn read_dataset(&mut self, rows: u64) -> Result<Vec<f64>> {
        // Saturates on overflow; such a length is never satisfiable
        let expected = rows.saturating_mul(VALUE_SIZE);

        // Grows with the bytes actually present instead of the declared count
        let mut payload = Vec::new();
        (&mut self.reader).take(expected).read_to_end(&mut payload)?;

        let available = payload.len() as u64;
        if available < expected || rows.checked_mul(VALUE_SIZE).is_none() {
            return Err(DecodeError::TruncatedDataset {
                index: self.index,
                offset: self.offset,
                expected,
                available,
            });
        }
        self.offset += available;

        Ok(bytes_to_f64(&payload, self.float_order))
    }

    fn next_dataset(&mut self) -> Result<Option<Vec<f64>>> {
        let Some(rows) = self.read_row_count()? else {
            return Ok(None);
        };
        log::trace!("Dataset {} at offset {}: {} rows", self.index, self.offset, rows);

        let values = self.read_dataset(rows)?;
        log::debug!("Decoded dataset {} ({} values)", self.index, values.len());
        self.index += 1;
        Ok(Some(values))
    }
}

impl<R: Read> Iterator for DatasetIterator<R> {
    type Item = Result<Vec<f64>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.next_dataset() {
            Ok(Some(values)) => Some(Ok(values)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
