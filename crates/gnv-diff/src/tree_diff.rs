//! Tree-level diff: align two state trees and report every disagreement.
//!
//! Keys on each side are normalized independently (a later key replaces an
//! earlier one that normalizes the same way), then:
//!
//! - keys only in A become `MissingInB`, keys only in B become `MissingInA`;
//! - two objects under the same key are diffed recursively and their
//!   discrepancies flattened into the same set;
//! - anything else is canonicalized on both sides and compared by value.
//!
//! Arrays are compared as opaque values; there is no element-wise diff.
//! An object against a non-object is a plain value mismatch.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::discrepancy::{Discrepancy, DiscrepancySet, Side};
use crate::error::{DiffError, DiffResult};
use crate::normalize::normalize_key;
use crate::precision::canonicalize;

/// Compare two top-level values, which must both be objects.
pub fn diff_values(side_a: &Value, side_b: &Value) -> DiffResult<DiscrepancySet> {
    let a = as_mapping(side_a, Side::A)?;
    let b = as_mapping(side_b, Side::B)?;
    Ok(diff_maps(a, b))
}

/// Compare two mappings.
pub fn diff_maps(side_a: &Map<String, Value>, side_b: &Map<String, Value>) -> DiscrepancySet {
    let mut out = DiscrepancySet::new();
    diff_into(&[], side_a, side_b, &mut out);
    out
}

/// Original key and value, indexed by normalized key.
type Normalized<'a> = BTreeMap<String, (&'a str, &'a Value)>;

fn normalize_entries(map: &Map<String, Value>) -> Normalized<'_> {
    map.iter()
        .map(|(key, value)| (normalize_key(key), (key.as_str(), value)))
        .collect()
}

fn diff_into(
    parents: &[&str],
    side_a: &Map<String, Value>,
    side_b: &Map<String, Value>,
    out: &mut DiscrepancySet,
) {
    let a = normalize_entries(side_a);
    let b = normalize_entries(side_b);

    for (key, &(field, a_value)) in &a {
        let path = join_path(parents, field);
        let Some(&(_, b_value)) = b.get(key) else {
            out.insert(Discrepancy::missing_in_b(key, field, path, a_value.clone()));
            continue;
        };

        match (a_value, b_value) {
            (Value::Object(a_child), Value::Object(b_child)) => {
                debug!(path = %path, "descending into nested mapping");
                let mut nested = parents.to_vec();
                nested.push(field);
                diff_into(&nested, a_child, b_child, out);
            }
            _ => {
                let a_canonical = canonicalize(a_value);
                let b_canonical = canonicalize(b_value);
                if a_canonical != b_canonical {
                    out.insert(Discrepancy::value_mismatch(
                        key,
                        field,
                        path,
                        a_canonical,
                        b_canonical,
                    ));
                }
            }
        }
    }

    for (key, &(field, b_value)) in &b {
        if !a.contains_key(key) {
            let path = join_path(parents, field);
            out.insert(Discrepancy::missing_in_a(key, field, path, b_value.clone()));
        }
    }
}

fn join_path(parents: &[&str], field: &str) -> String {
    if parents.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", parents.join("."), field)
    }
}

fn as_mapping(value: &Value, side: Side) -> DiffResult<&Map<String, Value>> {
    value.as_object().ok_or(DiffError::MalformedInput {
        side,
        found: kind_name(value),
    })
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
