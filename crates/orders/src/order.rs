//! Order normalization: legacy order envelope -> normalized order.
//!
//! Validation is a fixed, short-circuiting sequence:
//!
//! ```text
//! order present -> id -> vendor -> date -> customer.id -> items
//! ```
//!
//! When several fields are invalid at once, the first one in this sequence is
//! the one reported.

use serde_json::Value;

use ordermig_core::{ConversionError, ConversionResult, RequiredField, is_truthy, truthy_field};

use crate::items::expand_items;
use crate::model::NormalizedOrder;

/// Envelope fields checked before the customer, in reporting order.
pub const REQUIRED_FIELDS: [RequiredField; 3] =
    [RequiredField::Id, RequiredField::Vendor, RequiredField::Date];

/// Validated references into a legacy order envelope.
struct Envelope<'a> {
    id: &'a Value,
    vendor: &'a Value,
    date: &'a Value,
    customer_id: &'a Value,
}

fn validate_envelope(order: Option<&Value>) -> ConversionResult<(&Value, Envelope<'_>)> {
    let order = order
        .filter(|v| is_truthy(v))
        .ok_or(ConversionError::OrderMissing)?;

    let mut fields = [&Value::Null; REQUIRED_FIELDS.len()];
    for (slot, field) in fields.iter_mut().zip(REQUIRED_FIELDS) {
        *slot = truthy_field(order, field.as_str())
            .ok_or_else(|| ConversionError::missing_field(field))?;
    }
    let [id, vendor, date] = fields;

    let customer_id = order
        .get("customer")
        .and_then(|customer| truthy_field(customer, "id"))
        .ok_or(ConversionError::InvalidCustomer)?;

    Ok((
        order,
        Envelope {
            id,
            vendor,
            date,
            customer_id,
        },
    ))
}

/// Convert one legacy order into the normalized schema.
///
/// `id`, `vendor` and `date` are copied verbatim, `customer.id` becomes
/// `customerId`, and the `order` item mapping is expanded with
/// [`expand_items`]. Item-level errors are returned unchanged.
pub fn normalize_order(order: Option<&Value>) -> ConversionResult<NormalizedOrder> {
    let (order, envelope) = validate_envelope(order)?;
    let items = expand_items(order.get("order"))?;

    Ok(NormalizedOrder {
        id: envelope.id.clone(),
        vendor: envelope.vendor.clone(),
        date: envelope.date.clone(),
        customer_id: envelope.customer_id.clone(),
        order: items,
    })
}
