//! Batch pipeline: load -> normalize -> write.
//!
//! Each order is normalized independently; results keep the input order and
//! failures carry the index of the order that caused them.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use ordermig_core::ConversionError;
use ordermig_orders::{NormalizedOrder, normalize_order};

use crate::config::{BatchConfig, FailureMode, OUTPUT_FILE_NAME};
use crate::error::BatchError;

/// An order that could not be converted.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderFailure {
    pub index: usize,
    pub error: ConversionError,
}

/// Result of normalizing a batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutcome {
    /// Converted orders, in input order.
    pub orders: Vec<NormalizedOrder>,
    /// Always empty in fail-fast mode.
    pub failures: Vec<OrderFailure>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub converted: usize,
    /// Sum of revenue over every converted order.
    pub total_revenue: f64,
    pub failures: Vec<OrderFailure>,
}

/// Normalize every order in `orders`.
pub fn normalize_all(orders: &[Value], mode: FailureMode) -> Result<BatchOutcome, BatchError> {
    let mut outcome = BatchOutcome::default();

    for (index, order) in orders.iter().enumerate() {
        match normalize_order(Some(order)) {
            Ok(normalized) => outcome.orders.push(normalized),
            Err(error) => match mode {
                FailureMode::FailFast => {
                    return Err(BatchError::Conversion {
                        index,
                        source: error,
                    });
                }
                FailureMode::KeepGoing => {
                    tracing::warn!(
                        index,
                        envelope = error.is_envelope_error(),
                        error = %error,
                        "skipping order that failed conversion"
                    );
                    outcome.failures.push(OrderFailure { index, error });
                }
            },
        }
    }

    Ok(outcome)
}

/// Read a JSON document holding an array of legacy orders.
pub fn load_orders(path: &Path) -> Result<Vec<Value>, BatchError> {
    let text = std::fs::read_to_string(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&text).map_err(|source| BatchError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match document {
        Value::Array(orders) => Ok(orders),
        other => Err(BatchError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Render orders as pretty-printed JSON (one-space indent), newline-terminated.
pub fn render_orders(orders: &[NormalizedOrder]) -> Result<Vec<u8>, BatchError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    orders.serialize(&mut ser).map_err(BatchError::Serialize)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write `orders` to `data-transformed.json` inside `dir`.
pub fn write_orders(dir: &Path, orders: &[NormalizedOrder]) -> Result<PathBuf, BatchError> {
    let path = dir.join(OUTPUT_FILE_NAME);
    let bytes = render_orders(orders)?;
    std::fs::write(&path, bytes).map_err(|source| BatchError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Run a full batch as described by `config`.
pub fn run(config: &BatchConfig) -> Result<RunSummary, BatchError> {
    tracing::info!(input = %config.input.display(), "loading legacy orders");
    let orders = load_orders(&config.input)?;

    tracing::info!(count = orders.len(), mode = ?config.mode, "starting order conversions");
    let outcome = normalize_all(&orders, config.mode)?;
    let total_revenue: f64 = outcome.orders.iter().map(NormalizedOrder::total_revenue).sum();
    tracing::info!(
        converted = outcome.orders.len(),
        failed = outcome.failures.len(),
        total_revenue,
        "finished converting orders"
    );

    let output_path = write_orders(&config.output_dir, &outcome.orders)?;
    tracing::info!(output = %output_path.display(), "wrote converted orders");

    Ok(RunSummary {
        output_path,
        converted: outcome.orders.len(),
        total_revenue,
        failures: outcome.failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordermig_core::RequiredField;
    use serde_json::json;
    use tempfile::TempDir;

    fn legacy(id: u64, item_quantity: i64) -> Value {
        json!({
            "id": id,
            "vendor": "acme",
            "date": "03/03/2017",
            "customer": {"id": "8baa6dea-cc70-4748-9b27-b174e70e4b66"},
            "order": {
                "hat": {"quantity": item_quantity, "price": 8},
                "cup": {"quantity": 2, "price": 12}
            }
        })
    }

    #[test]
    fn results_keep_input_order() {
        let orders = vec![legacy(3, 1), legacy(1, 2), legacy(2, 3)];
        let outcome = normalize_all(&orders, FailureMode::FailFast).unwrap();
        let ids: Vec<_> = outcome.orders.iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec![json!(3), json!(1), json!(2)]);
        assert!(outcome.failures.is_empty());
    }

    #[test]
    fn fail_fast_reports_first_failing_index() {
        let orders = vec![legacy(1, 1), legacy(2, 0), json!({"vendor": "x"})];
        match normalize_all(&orders, FailureMode::FailFast).unwrap_err() {
            BatchError::Conversion { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source.item(), Some("hat"));
            }
            other => panic!("Expected Conversion error, got {other:?}"),
        }
    }

    #[test]
    fn keep_going_collects_failures_by_index() {
        let orders = vec![legacy(1, 1), legacy(2, 0), json!({"vendor": "x"}), legacy(4, 5)];
        let outcome = normalize_all(&orders, FailureMode::KeepGoing).unwrap();

        let ids: Vec<_> = outcome.orders.iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(4)]);

        let indexes: Vec<_> = outcome.failures.iter().map(|f| f.index).collect();
        assert_eq!(indexes, vec![1, 2]);
        assert_eq!(
            outcome.failures[1].error,
            ConversionError::missing_field(RequiredField::Id)
        );
        assert!(!outcome.failures[0].error.is_envelope_error());
        assert!(outcome.failures[1].error.is_envelope_error());
    }

    #[test]
    fn rendered_output_is_pretty_and_newline_terminated() {
        let orders = normalize_all(&[legacy(1, 1)], FailureMode::FailFast)
            .unwrap()
            .orders;
        let text = String::from_utf8(render_orders(&orders).unwrap()).unwrap();

        assert!(text.ends_with("]\n"));
        assert!(text.starts_with("[\n {\n  \"id\": 1,\n  \"vendor\": \"acme\","));
        assert!(text.contains("\"customerId\": \"8baa6dea-cc70-4748-9b27-b174e70e4b66\""));

        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["order"][0]["item"], json!("hat"));
        assert_eq!(parsed[0]["order"][1]["revenue"], json!(24));
    }

    #[test]
    fn run_converts_input_file_into_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("data.json");
        std::fs::write(&input, json!([legacy(1, 14), legacy(2, 1)]).to_string()).unwrap();

        let config = BatchConfig {
            input,
            output_dir: temp_dir.path().to_path_buf(),
            mode: FailureMode::FailFast,
        };
        let summary = run(&config).unwrap();

        assert_eq!(summary.converted, 2);
        // (14 * 8 + 2 * 12) + (1 * 8 + 2 * 12)
        assert_eq!(summary.total_revenue, 168.0);
        assert!(summary.failures.is_empty());
        assert_eq!(summary.output_path, temp_dir.path().join(OUTPUT_FILE_NAME));

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(&summary.output_path).unwrap()).unwrap();
        assert_eq!(written[0]["order"][0]["revenue"], json!(112));
        assert_eq!(written[1]["customerId"], json!("8baa6dea-cc70-4748-9b27-b174e70e4b66"));
    }

    #[test]
    fn run_fails_fast_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("data.json");
        std::fs::write(&input, json!([legacy(1, 0)]).to_string()).unwrap();

        let config = BatchConfig {
            input,
            output_dir: temp_dir.path().to_path_buf(),
            mode: FailureMode::FailFast,
        };
        assert!(matches!(
            run(&config).unwrap_err(),
            BatchError::Conversion { index: 0, .. }
        ));
        assert!(!temp_dir.path().join(OUTPUT_FILE_NAME).exists());
    }

    #[test]
    fn load_rejects_non_array_documents() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("data.json");
        std::fs::write(&input, r#"{"id": 1}"#).unwrap();

        assert!(matches!(
            load_orders(&input).unwrap_err(),
            BatchError::NotAnArray { found: "object" }
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.json");
        match load_orders(&missing).unwrap_err() {
            BatchError::Read { path, .. } => assert_eq!(path, missing),
            other => panic!("Expected Read error, got {other:?}"),
        }
    }
}
