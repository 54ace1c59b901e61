//! Line-item expansion: keyed legacy items -> ordered normalized items.

use serde_json::Value;

use ordermig_core::{ConversionError, ConversionResult, is_truthy, numeric_field};

use crate::model::NormalizedItem;

/// Expand a legacy item mapping into normalized items.
///
/// - absent or falsy `items` yields an empty list
/// - one output item per key, in the mapping's insertion order
/// - `revenue = price * quantity`
///
/// The first invalid item aborts the expansion; no partial list is returned.
pub fn expand_items(items: Option<&Value>) -> ConversionResult<Vec<NormalizedItem>> {
    let items = match items {
        Some(v) if is_truthy(v) => v,
        _ => return Ok(Vec::new()),
    };

    let map = items.as_object().ok_or_else(|| ConversionError::InvalidItems {
        found: items.to_string(),
    })?;

    let expanded = map
        .iter()
        .map(|(name, details)| expand_item(name, details))
        .collect::<ConversionResult<Vec<_>>>()?;

    tracing::trace!(items = expanded.len(), "expanded order items");
    Ok(expanded)
}

fn expand_item(name: &str, details: &Value) -> ConversionResult<NormalizedItem> {
    if !is_truthy(details) {
        return Err(ConversionError::item_missing(name));
    }

    let quantity = numeric_field(details, "quantity")
        .map_err(|reason| ConversionError::invalid_quantity(name, reason))?;
    let price = numeric_field(details, "price")
        .map_err(|reason| ConversionError::invalid_price(name, reason))?;

    let revenue = price
        .product(quantity)
        .ok_or_else(|| ConversionError::RevenueOutOfRange {
            item: name.to_string(),
        })?;

    Ok(NormalizedItem {
        item: name.to_string(),
        quantity: details["quantity"].clone(),
        price: details["price"].clone(),
        revenue,
    })
}
