//! Text and JSON renderings of a discrepancy set.

use gnv_diff::{Discrepancy, DiscrepancyKind, DiscrepancySet};
use serde_json::Value;

use crate::error::ReportResult;

/// Report text for a comparison without discrepancies.
pub const NO_DISCREPANCIES: &str = "No discrepancies found, all values match.";

/// One-sentence explanation of a discrepancy.
pub fn explain(discrepancy: &Discrepancy) -> String {
    let key = &discrepancy.key;
    match discrepancy.kind {
        DiscrepancyKind::MissingInB => {
            format!("{key} found in gNMI output but missing in CLI command output")
        }
        DiscrepancyKind::MissingInA => {
            format!("{key} found in CLI command output but missing in gNMI output")
        }
        DiscrepancyKind::ValueMismatch => format!(
            "{key} found in both gNMI output and CLI command output but has different values"
        ),
    }
}

/// Render every discrepancy as a text block, or [`NO_DISCREPANCIES`].
///
/// Values are shown as JSON; a side without the field shows `(absent)`.
pub fn render_text(set: &DiscrepancySet) -> String {
    if set.is_empty() {
        return NO_DISCREPANCIES.to_string();
    }

    set.iter()
        .map(|d| {
            format!(
                "Field: {}\n  Path: {}\n  gNMI: {}\n  CLI: {}\n  Explanation: {}",
                d.key,
                d.path,
                side(&d.side_a),
                side(&d.side_b),
                explain(d),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the set as a pretty JSON object keyed by normalized field.
pub fn render_json(set: &DiscrepancySet) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(set)?)
}

fn side(value: &Option<Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "(absent)".to_string(),
    }
}
