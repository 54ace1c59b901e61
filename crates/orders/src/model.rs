use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Line item in the normalized schema.
///
/// `quantity` and `price` are carried over exactly as they appeared in the
/// legacy record; `revenue` is their product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedItem {
    pub item: String,
    pub quantity: Value,
    pub price: Value,
    pub revenue: Number,
}

/// Order in the normalized schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOrder {
    pub id: Value,
    pub vendor: Value,
    pub date: Value,
    pub customer_id: Value,
    pub order: Vec<NormalizedItem>,
}

impl NormalizedOrder {
    /// Sum of line revenues as `f64`.
    pub fn total_revenue(&self) -> f64 {
        self.order
            .iter()
            .filter_map(|line| line.revenue.as_f64())
            .sum()
    }
}
