//! Error types for the comparator.

use crate::discrepancy::Side;

/// Errors that abort a single comparison call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// One of the two top-level inputs is not a mapping.
    #[error("malformed input: {side} must be a mapping, got {found}")]
    MalformedInput { side: Side, found: &'static str },
}

/// Errors confined to a single field during unit conversion.
///
/// These never abort a comparison: the field is compared unconverted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnitError {
    /// The text in front of a recognised unit suffix is not a usable number.
    #[error("cannot parse numeric prefix of {input:?} (suffix {suffix:?})")]
    UnparsableNumericPrefix { input: String, suffix: &'static str },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
