//! Batch conversion of legacy order documents.
//!
//! Loads a JSON array of legacy orders, normalizes each one and writes the
//! result next to the configured output location.

pub mod config;
pub mod driver;
pub mod error;

pub use config::{BatchConfig, FailureMode, OUTPUT_DIR_ENV, OUTPUT_FILE_NAME};
pub use driver::{
    BatchOutcome, OrderFailure, RunSummary, load_orders, normalize_all, render_orders, run,
    write_orders,
};
pub use error::BatchError;
