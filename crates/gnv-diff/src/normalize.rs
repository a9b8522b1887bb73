//! Key normalization for cross-source field alignment.
//!
//! Telemetry and command output spell the same field differently
//! (`in-octets`, `In Octets`, `in_octets`). Both sides are aligned on the
//! lower-cased key with spaces, hyphens and underscores removed.
//!
//! Distinct keys can collapse onto the same normalized key (`a_b` and `ab`).
//! They are then treated as the same field.

/// Canonicalize a key for lookup. Total and idempotent.
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect()
}
