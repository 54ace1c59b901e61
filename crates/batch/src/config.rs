//! Batch driver configuration.

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the output directory.
pub const OUTPUT_DIR_ENV: &str = "CHALLENGE_OUTPUT_DIR";

/// Name of the document written into the output directory.
pub const OUTPUT_FILE_NAME: &str = "data-transformed.json";

/// What to do when an order fails conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureMode {
    /// Abort the batch at the first failing order.
    #[default]
    FailFast,
    /// Convert every order that can be converted; report the rest by index.
    KeepGoing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub mode: FailureMode,
}

impl BatchConfig {
    /// Build a config, resolving the output directory from the explicit
    /// argument, then `CHALLENGE_OUTPUT_DIR`, then the working directory.
    pub fn new(input: PathBuf, output_dir: Option<PathBuf>, mode: FailureMode) -> Self {
        let output_dir = resolve_output_dir(output_dir, std::env::var_os(OUTPUT_DIR_ENV));
        Self {
            input,
            output_dir,
            mode,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(OUTPUT_FILE_NAME)
    }
}

pub fn resolve_output_dir(explicit: Option<PathBuf>, env_value: Option<OsString>) -> PathBuf {
    explicit
        .or_else(|| env_value.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}
