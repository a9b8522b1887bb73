//! Comparator core for gnv.
//!
//! Reconciles a telemetry state tree (side A) against a command-output state
//! tree (side B) and reports every point where they disagree. Keys are
//! aligned after normalization, scalar leaves are compared after unit
//! conversion and precision adjustment.
//!
//! # Key Types
//!
//! - [`normalize_key`] -- spelling-insensitive key used for alignment
//! - [`convert_units`] / [`adjust_precision`] / [`canonicalize`] -- leaf canonicalization
//! - [`diff_maps`] / [`diff_values`] -- recursive tree diff
//! - [`Discrepancy`] / [`DiscrepancySet`] / [`DiscrepancyKind`] -- diff output
//!
//! Everything here is synchronous and holds no state between calls.

pub mod discrepancy;
pub mod error;
pub mod normalize;
pub mod precision;
pub mod tree_diff;
pub mod units;

pub use discrepancy::{Discrepancy, DiscrepancyKind, DiscrepancySet, Side};
pub use error::{DiffError, DiffResult, UnitError};
pub use normalize::normalize_key;
pub use precision::{adjust_precision, canonicalize};
pub use tree_diff::{diff_maps, diff_values};
pub use units::{convert_units, try_convert_units};
