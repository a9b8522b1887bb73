//! Discrepancy reports and run history for gnv.
//!
//! - [`render_text`] / [`render_json`] -- human and machine renderings of a
//!   [`gnv_diff::DiscrepancySet`]
//! - [`History`] / [`RunRecord`] -- the runs of one session, persisted as
//!   txt, csv, or json via [`HistoryFormat`]

pub mod error;
pub mod history;
pub mod render;

pub use error::{ReportError, ReportResult};
pub use history::{History, HistoryFormat, RunOutcome, RunRecord};
pub use render::{explain, render_json, render_text, NO_DISCREPANCIES};
