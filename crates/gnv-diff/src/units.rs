//! Unit conversion for unit-suffixed string values.
//!
//! Sizes and counts convert to an integer number of base units, durations to
//! integer milliseconds, percentages to a float. Kilobytes and megabytes are
//! binary (1024, 1024 * 1024); gigabytes and terabytes are decimal, as are
//! the bare `K`/`M`/`G`/`T` multipliers.

use serde_json::Value;
use tracing::debug;

use crate::error::UnitError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Output {
    Integer,
    Float,
}

#[derive(Clone, Copy, Debug)]
struct UnitSuffix {
    suffix: &'static str,
    factor: f64,
    output: Output,
}

const fn int(suffix: &'static str, factor: f64) -> UnitSuffix {
    UnitSuffix { suffix, factor, output: Output::Integer }
}

/// Checked in order: a suffix must precede any shorter suffix it ends with.
const UNIT_TABLE: [UnitSuffix; 13] = [
    int("KB", 1024.0),
    int("K", 1_000.0),
    int("MB", 1024.0 * 1024.0),
    int("M", 1_000_000.0),
    int("GB", 1_000_000_000.0),
    int("G", 1_000_000_000.0),
    int("TB", 1_000_000_000_000.0),
    int("T", 1_000_000_000_000.0),
    int("ms", 1.0),
    int("s", 1_000.0),
    int("m", 60_000.0),
    int("h", 3_600_000.0),
    UnitSuffix { suffix: "%", factor: 1.0, output: Output::Float },
];

/// Convert a unit-suffixed string to its base unit.
///
/// Returns `Ok(None)` for non-strings and strings without a known suffix,
/// and an error when a suffix matches but its numeric prefix is unusable.
pub fn try_convert_units(value: &Value) -> Result<Option<Value>, UnitError> {
    let Value::String(text) = value else {
        return Ok(None);
    };

    let Some((unit, prefix)) = UNIT_TABLE
        .iter()
        .find_map(|unit| text.strip_suffix(unit.suffix).map(|prefix| (unit, prefix)))
    else {
        return Ok(None);
    };

    let unparsable = || UnitError::UnparsableNumericPrefix {
        input: text.clone(),
        suffix: unit.suffix,
    };

    let number: f64 = prefix.trim().parse().map_err(|_| unparsable())?;
    if !number.is_finite() {
        return Err(unparsable());
    }

    match unit.output {
        Output::Float => Ok(Some(Value::from(number * unit.factor))),
        Output::Integer => {
            let scaled = (number * unit.factor).trunc();
            if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
                return Err(unparsable());
            }
            Ok(Some(Value::from(scaled as i64)))
        }
    }
}

/// Convert a value to its base unit, passing it through unchanged when it
/// carries no recognised unit or its prefix does not parse.
pub fn convert_units(value: &Value) -> Value {
    match try_convert_units(value) {
        Ok(Some(converted)) => converted,
        Ok(None) => value.clone(),
        Err(e) => {
            debug!(error = %e, "comparing field unconverted");
            value.clone()
        }
    }
}
