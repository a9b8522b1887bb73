//! High-level SDK for gnv.
//!
//! [`Verifier`] looks a gNMI path up in the telemetry snapshot, runs the
//! mapped commands through the simulator, compares both sides, and records
//! the outcome in its [`History`](gnv_report::History).
//!
//! [`compare_outputs`] is the stateless entry point for callers that already
//! hold a telemetry tree and raw command-output text.

pub mod error;
pub mod verifier;

pub use error::{SdkError, SdkResult};
pub use verifier::{compare_outputs, Verification, Verifier};
