use std::path::PathBuf;

use thiserror::Error;

use ordermig_core::ConversionError;

/// Batch driver failure.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The input document is valid JSON but not a list of orders.
    #[error("input document must be an array of orders (found {found})")]
    NotAnArray { found: &'static str },

    /// An order failed conversion in fail-fast mode.
    #[error("order at index {index} could not be converted: {source}")]
    Conversion {
        index: usize,
        #[source]
        source: ConversionError,
    },

    #[error("failed to serialize normalized orders: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
