//! JSON value rules for legacy records.
//!
//! Legacy records were produced by a loosely-typed system, so presence is
//! judged by truthiness rather than by key existence:
//!
//! - falsy: `null`, `false`, `0`, `0.0`, `""` (and absent keys)
//! - truthy: everything else, including `[]`, `{}` and `"0"`
//!
//! Numeric attributes accept JSON numbers and strings that parse as a finite
//! decimal number once trimmed. A blank string is truthy but treated as an
//! empty attribute, so it is rejected like `""`.

use serde_json::{Number, Value};

use crate::error::InvalidValue;

/// Returns whether `value` counts as present under legacy truthiness rules.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Returns the value under `key` when it is truthy.
///
/// Non-object values have no fields, so this is `None` for them.
pub fn truthy_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_truthy(v))
}

/// A numeric attribute after coercion.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    /// Coerce a JSON value to a number, if it is numeric.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::from_number(n)),
            Value::String(s) => Self::parse(s),
            _ => None,
        }
    }

    fn from_number(n: &Number) -> Self {
        match n.as_i64() {
            Some(i) => Self::Int(i),
            // Floats and integers beyond i64 fall back to f64.
            None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
        }
    }

    fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return Some(Self::Int(i));
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Self::Float)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Multiply two values, staying integral when both sides are integers and
    /// the product fits in `i64`.
    ///
    /// Integral float products within `i64` range are also written as
    /// integers, so `1.5 * 2` yields `3` rather than `3.0`.
    ///
    /// Returns `None` when the product is not a finite number.
    pub fn product(self, other: Self) -> Option<Number> {
        if let (Self::Int(a), Self::Int(b)) = (self, other) {
            if let Some(p) = a.checked_mul(b) {
                return Some(Number::from(p));
            }
        }
        let p = self.as_f64() * other.as_f64();
        // i64::MAX as f64 is 2^63, which is already out of range.
        if p.fract() == 0.0 && p >= i64::MIN as f64 && p < i64::MAX as f64 {
            return Some(Number::from(p as i64));
        }
        Number::from_f64(p)
    }
}

/// Validate the numeric attribute `key` of `record`.
///
/// The attribute must be truthy and numeric; the error says which of the two
/// failed. Blank strings count as falsy.
pub fn numeric_field(record: &Value, key: &str) -> Result<Numeric, InvalidValue> {
    let value = match record.get(key) {
        None | Some(Value::Null) => return Err(InvalidValue::Missing),
        Some(v) => v,
    };
    let blank = value.as_str().is_some_and(|s| s.trim().is_empty());
    if blank || !is_truthy(value) {
        return Err(InvalidValue::Falsy(value.to_string()));
    }
    Numeric::from_value(value).ok_or_else(|| InvalidValue::NotNumeric(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn falsy_values_match_legacy_rules() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v} should be falsy");
        }
        for v in [json!(true), json!(1), json!(-2.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v} should be truthy");
        }
    }

    #[test]
    fn truthy_field_ignores_non_objects() {
        assert_eq!(truthy_field(&json!(42), "id"), None);
        assert_eq!(truthy_field(&json!({"id": 0}), "id"), None);
        assert_eq!(truthy_field(&json!({"id": 7}), "id"), Some(&json!(7)));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        assert_eq!(Numeric::from_value(&json!("3")), Some(Numeric::Int(3)));
        assert_eq!(Numeric::from_value(&json!(" 2.5 ")), Some(Numeric::Float(2.5)));
        assert_eq!(Numeric::from_value(&json!("someeval")), None);
        assert_eq!(Numeric::from_value(&json!("NaN")), None);
        assert_eq!(Numeric::from_value(&json!(true)), None);
        assert_eq!(Numeric::from_value(&json!([1])), None);
        assert_eq!(Numeric::from_value(&json!("  ")), None);
    }

    #[test]
    fn numeric_field_reports_reason() {
        let record = json!({"a": 0, "b": "x", "c": null, "d": 4});
        assert_eq!(numeric_field(&record, "a"), Err(InvalidValue::Falsy("0".into())));
        assert_eq!(
            numeric_field(&record, "b"),
            Err(InvalidValue::NotNumeric("\"x\"".into()))
        );
        assert_eq!(numeric_field(&record, "c"), Err(InvalidValue::Missing));
        assert_eq!(numeric_field(&record, "zz"), Err(InvalidValue::Missing));
        assert_eq!(numeric_field(&record, "d"), Ok(Numeric::Int(4)));

        let record = json!({"blank": "  "});
        assert_eq!(
            numeric_field(&record, "blank"),
            Err(InvalidValue::Falsy("\"  \"".into()))
        );
    }

    #[test]
    fn product_stays_integral_when_possible() {
        assert_eq!(Numeric::Int(2).product(Numeric::Int(350)), Some(Number::from(700)));
        assert_eq!(
            Numeric::Float(1.5).product(Numeric::Int(2)),
            Some(Number::from(3))
        );
        assert_eq!(
            Numeric::Float(1.5).product(Numeric::Float(1.5)),
            Number::from_f64(2.25)
        );
        // Overflowing integers degrade to f64.
        assert_eq!(
            Numeric::Int(i64::MAX).product(Numeric::Int(2)),
            Number::from_f64(i64::MAX as f64 * 2.0)
        );
        assert_eq!(Numeric::Float(f64::MAX).product(Numeric::Int(2)), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: integer products are exact when they fit.
        #[test]
        fn integer_product_is_exact(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            prop_assert_eq!(
                Numeric::Int(a).product(Numeric::Int(b)),
                Some(Number::from(a * b))
            );
        }
    }
}
