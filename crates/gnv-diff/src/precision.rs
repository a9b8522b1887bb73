//! Precision adjustment: bring numeric leaves to one comparable form.
//!
//! Integers, floats and all-digit strings all become floats, so `5`, `5.0`
//! and `"5"` compare equal. Floats are rounded to two decimals, half away
//! from zero, on the binary value scaled by 100 (so `2.675` rounds to `2.67`).

use serde_json::Value;

use crate::units::convert_units;

/// Adjust a (unit-converted) value to its canonical numeric form.
pub fn adjust_precision(value: &Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) => float(round2(f)).unwrap_or_else(|| value.clone()),
            None => value.clone(),
        },
        Value::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i as f64),
            None => n.as_u64().map_or_else(|| value.clone(), |u| Value::from(u as f64)),
        },
        Value::String(s) if is_all_digits(s) => s
            .parse::<f64>()
            .ok()
            .and_then(float)
            .unwrap_or_else(|| value.clone()),
        _ => value.clone(),
    }
}

/// Unit conversion followed by precision adjustment.
pub fn canonicalize(value: &Value) -> Value {
    adjust_precision(&convert_units(value))
}

fn round2(f: f64) -> f64 {
    (f * 100.0).round() / 100.0
}

fn float(f: f64) -> Option<Value> {
    f.is_finite().then(|| Value::from(f))
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
