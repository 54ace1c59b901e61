//! `ordermig-core` — shared building blocks for order conversion.
//!
//! This crate contains **pure** primitives (no IO): the conversion error model
//! and the JSON value rules legacy records are validated against.

pub mod error;
pub mod value;

pub use error::{ConversionError, ConversionResult, InvalidValue, RequiredField};
pub use value::{Numeric, is_truthy, numeric_field, truthy_field};
