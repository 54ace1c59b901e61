//! Conversion error model.

use thiserror::Error;

/// Result type used across the conversion layer.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Envelope field that must be present and truthy on a legacy order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Id,
    Vendor,
    Date,
}

impl RequiredField {
    pub fn as_str(self) -> &'static str {
        match self {
            RequiredField::Id => "id",
            RequiredField::Vendor => "vendor",
            RequiredField::Date => "date",
        }
    }
}

impl core::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a numeric line-item attribute was rejected.
///
/// Rendered values are the JSON text of what was found, so the message can be
/// read without access to the input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidValue {
    /// Attribute absent or `null`.
    Missing,
    /// Attribute present but falsy (`0`, `false`, `""`).
    Falsy(String),
    /// Attribute truthy but not a number or numeric string.
    NotNumeric(String),
}

impl core::fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidValue::Missing => f.write_str("is missing"),
            InvalidValue::Falsy(found) => write!(f, "is empty or zero (found {found})"),
            InvalidValue::NotNumeric(found) => write!(f, "is not numeric (found {found})"),
        }
    }
}

/// Failure converting a legacy order into the normalized schema.
///
/// Envelope-level variants come from order validation, item-level variants
/// from line-item expansion. Every variant names the offending field or item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The order record itself was not supplied.
    #[error("order record is missing")]
    OrderMissing,

    /// A required envelope field is absent or falsy.
    #[error("order is missing the {field} attribute")]
    MissingField { field: RequiredField },

    /// `customer` is absent or carries no `id`.
    #[error("order has missing or invalid customer information")]
    InvalidCustomer,

    /// The item collection is present but is not a keyed mapping.
    #[error("order items must be a keyed mapping (found {found})")]
    InvalidItems { found: String },

    /// An item key maps to nothing.
    #[error("order item {item:?} is not a valid item")]
    ItemMissing { item: String },

    #[error("order item {item:?} quantity {reason}")]
    InvalidQuantity { item: String, reason: InvalidValue },

    #[error("order item {item:?} price {reason}")]
    InvalidPrice { item: String, reason: InvalidValue },

    /// `price * quantity` is not representable as a finite number.
    #[error("order item {item:?} revenue is out of range")]
    RevenueOutOfRange { item: String },
}

impl ConversionError {
    pub fn missing_field(field: RequiredField) -> Self {
        Self::MissingField { field }
    }

    pub fn item_missing(item: impl Into<String>) -> Self {
        Self::ItemMissing { item: item.into() }
    }

    pub fn invalid_quantity(item: impl Into<String>, reason: InvalidValue) -> Self {
        Self::InvalidQuantity {
            item: item.into(),
            reason,
        }
    }

    pub fn invalid_price(item: impl Into<String>, reason: InvalidValue) -> Self {
        Self::InvalidPrice {
            item: item.into(),
            reason,
        }
    }

    /// Item key the error refers to, for item-level failures.
    pub fn item(&self) -> Option<&str> {
        match self {
            Self::ItemMissing { item }
            | Self::InvalidQuantity { item, .. }
            | Self::InvalidPrice { item, .. }
            | Self::RevenueOutOfRange { item } => Some(item),
            _ => None,
        }
    }

    /// True for failures detected while validating the order envelope.
    pub fn is_envelope_error(&self) -> bool {
        matches!(
            self,
            Self::OrderMissing | Self::MissingField { .. } | Self::InvalidCustomer
        )
    }
}
