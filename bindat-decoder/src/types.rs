//! Core types for the BinDat decoder library
//!
//! This module defines the decoded container, the per-dataset summary used by
//! callers that print results, and the error taxonomy of the decoder.

use serde::{Deserialize, Serialize};
use std::str::Utf8Error;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// A fully decoded BinDat file
///
/// Built once per decode call. The decoder never touches it again after
/// returning it; the caller owns the metadata and every dataset buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Metadata block, kept as an untyped JSON value (key order preserved)
    pub metadata: serde_json::Value,
    /// Numeric datasets in file order
    pub datasets: Vec<Vec<f64>>,
}

impl Container {
    /// Create a container from already decoded parts
    pub fn new(metadata: serde_json::Value, datasets: Vec<Vec<f64>>) -> Self {
        Self { metadata, datasets }
    }

    /// Number of datasets in the container
    pub fn num_datasets(&self) -> usize {
        self.datasets.len()
    }

    /// Total number of float values across all datasets
    pub fn total_values(&self) -> usize {
        self.datasets.iter().map(Vec::len).sum()
    }

    /// True if the file carried no datasets at all
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Get a dataset by index
    pub fn dataset(&self, index: usize) -> Option<&[f64]> {
        self.datasets.get(index).map(Vec::as_slice)
    }

    /// Split the container into its metadata and datasets
    pub fn into_parts(self) -> (serde_json::Value, Vec<Vec<f64>>) {
        (self.metadata, self.datasets)
    }
}

/// Basic statistics over one dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Number of values in the dataset
    pub rows: usize,
    /// Smallest non-NaN value
    pub min: Option<f64>,
    /// Largest non-NaN value
    pub max: Option<f64>,
    /// Mean of the non-NaN values
    pub mean: Option<f64>,
}

impl DatasetSummary {
    /// Summarize a slice of values. NaNs count towards `rows` only.
    pub fn from_values(values: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut counted = 0usize;

        for &v in values.iter().filter(|v| !v.is_nan()) {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            counted += 1;
        }

        if counted == 0 {
            return Self {
                rows: values.len(),
                min: None,
                max: None,
                mean: None,
            };
        }

        Self {
            rows: values.len(),
            min: Some(min),
            max: Some(max),
            mean: Some(sum / counted as f64),
        }
    }
}

/// Why the metadata block could not be parsed
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("not valid UTF-8: {0}")]
    Utf8(#[from] Utf8Error),

    #[error("not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during decoding
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata block is not terminated by a null byte ({scanned} bytes scanned)")]
    UnterminatedMetadata { scanned: usize },

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(#[from] MetadataError),

    #[error("Truncated row count at offset {offset}: expected 8 bytes, found {available}")]
    TruncatedHeader { offset: u64, available: usize },

    #[error(
        "Truncated dataset {index} at offset {offset}: expected {expected} bytes, found {available}"
    )]
    TruncatedDataset {
        index: usize,
        offset: u64,
        expected: u64,
        available: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_container_queries() {
        let container = Container::new(json!({"a": 1}), vec![vec![1.0, 2.0], vec![], vec![3.5]]);

        assert_eq!(container.num_datasets(), 3);
        assert_eq!(container.total_values(), 3);
        assert!(!container.is_empty());
        assert_eq!(container.dataset(0), Some(&[1.0, 2.0][..]));
        assert_eq!(container.dataset(1), Some(&[][..]));
        assert_eq!(container.dataset(3), None);

        let (metadata, datasets) = container.into_parts();
        assert_eq!(metadata, json!({"a": 1}));
        assert_eq!(datasets.len(), 3);
    }

    #[test]
    fn test_summary_skips_nan() {
        let summary = DatasetSummary::from_values(&[1.0, f64::NAN, 3.0, -2.0]);
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.min, Some(-2.0));
        assert_eq!(summary.max, Some(3.0));
        assert_eq!(summary.mean, Some(2.0 / 3.0));
    }

    #[test]
    fn test_summary_of_empty_dataset() {
        let summary = DatasetSummary::from_values(&[]);
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.min, None);
        assert_eq!(summary.mean, None);
    }

    #[test]
    fn test_error_display() {
        let err = DecodeError::TruncatedHeader { offset: 12, available: 3 };
        assert_eq!(
            err.to_string(),
            "Truncated row count at offset 12: expected 8 bytes, found 3"
        );

        let err = DecodeError::UnterminatedMetadata { scanned: 7 };
        assert!(err.to_string().contains("7 bytes scanned"));
    }
}
