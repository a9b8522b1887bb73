//! Run history: the outcome of every verification in a session.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use gnv_diff::DiscrepancySet;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ReportError, ReportResult};
use crate::render::render_text;

/// What happened when a path was verified.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Both sources were available and compared.
    Compared { discrepancies: DiscrepancySet },
    /// The comparison could not run.
    Failed { reason: String },
}

/// One verification of one gNMI path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub path: String,
    pub commands: Vec<String>,
    pub outcome: RunOutcome,
    pub recorded_at: DateTime<Utc>,
}

impl RunRecord {
    pub fn compared(path: impl Into<String>, commands: Vec<String>, discrepancies: DiscrepancySet) -> Self {
        Self {
            path: path.into(),
            commands,
            outcome: RunOutcome::Compared { discrepancies },
            recorded_at: Utc::now(),
        }
    }

    pub fn failed(path: impl Into<String>, commands: Vec<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            commands,
            outcome: RunOutcome::Failed { reason: reason.into() },
            recorded_at: Utc::now(),
        }
    }

    /// The text report for this run, or the failure reason.
    pub fn report(&self) -> String {
        match &self.outcome {
            RunOutcome::Compared { discrepancies } => render_text(discrepancies),
            RunOutcome::Failed { reason } => format!("Error: {reason}"),
        }
    }
}

/// File format for a saved history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFormat {
    /// One pretty-printed JSON record per entry.
    Txt,
    /// `Path,Comparison Report` rows.
    Csv,
    /// A single JSON array.
    #[default]
    Json,
}

impl HistoryFormat {
    pub fn extension(self) -> &'static str {
        match self {
            HistoryFormat::Txt => "txt",
            HistoryFormat::Csv => "csv",
            HistoryFormat::Json => "json",
        }
    }
}

impl fmt::Display for HistoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for HistoryFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(HistoryFormat::Txt),
            "csv" => Ok(HistoryFormat::Csv),
            "json" => Ok(HistoryFormat::Json),
            _ => Err(ReportError::UnknownFormat(s.trim().to_string())),
        }
    }
}

/// Ordered record of the runs in a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<RunRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RunRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the history to `base` plus the format's extension.
    ///
    /// Returns the path written. An existing file is overwritten.
    pub fn save(&self, base: &Path, format: HistoryFormat) -> ReportResult<PathBuf> {
        let mut name = base.as_os_str().to_owned();
        name.push(".");
        name.push(format.extension());
        let path = PathBuf::from(name);

        let mut out = BufWriter::new(File::create(&path)?);
        match format {
            HistoryFormat::Txt => {
                for record in &self.records {
                    serde_json::to_writer_pretty(&mut out, record)?;
                    writeln!(out)?;
                }
            }
            HistoryFormat::Csv => {
                writeln!(out, "Path,Comparison Report")?;
                for record in &self.records {
                    writeln!(out, "{},{}", csv_field(&record.path), csv_field(&record.report()))?;
                }
            }
            HistoryFormat::Json => {
                serde_json::to_writer_pretty(&mut out, &self.records)?;
                writeln!(out)?;
            }
        }
        out.flush()?;

        info!(file = %path.display(), records = self.len(), %format, "saved history");
        Ok(path)
    }
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnv_diff::Discrepancy;
    use serde_json::json;

    fn sample() -> History {
        let mut history = History::new();
        history.push(RunRecord::compared(
            "/system/memory/state",
            vec!["show memory".into()],
            DiscrepancySet::new(),
        ));
        history.push(RunRecord::compared(
            "/system/cpu/state/usage",
            vec!["show cpu".into()],
            std::iter::once(Discrepancy::value_mismatch(
                "cpuusage",
                "cpu-usage",
                "cpu-usage",
                json!(70.0),
                json!(65.0),
            ))
            .collect(),
        ));
        history.push(RunRecord::failed("/nope", vec![], "unknown path"));
        history
    }

    #[test]
    fn format_parsing() {
        assert_eq!("txt".parse::<HistoryFormat>().unwrap(), HistoryFormat::Txt);
        assert_eq!(" CSV ".parse::<HistoryFormat>().unwrap(), HistoryFormat::Csv);
        assert_eq!("Json".parse::<HistoryFormat>().unwrap(), HistoryFormat::Json);
        assert!(matches!(
            "xml".parse::<HistoryFormat>(),
            Err(ReportError::UnknownFormat(f)) if f == "xml"
        ));
    }

    #[test]
    fn record_reports() {
        let history = sample();
        assert_eq!(history.records()[0].report(), crate::NO_DISCREPANCIES);
        assert!(history.records()[1].report().starts_with("Field: cpuusage"));
        assert_eq!(history.records()[2].report(), "Error: unknown path");
    }

    #[test]
    fn save_json() {
        let dir = tempfile::tempdir().unwrap();
        let history = sample();

        let path = history.save(&dir.path().join("run"), HistoryFormat::Json).unwrap();
        assert_eq!(path, dir.path().join("run.json"));

        let loaded: History =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, history);
    }

    #[test]
    fn save_txt() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample().save(&dir.path().join("run"), HistoryFormat::Txt).unwrap();
        assert_eq!(path.extension().unwrap(), "txt");

        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text.matches("\"recorded_at\"").count(), 3);
        assert!(text.contains("\"status\": \"failed\""));
    }

    #[test]
    fn save_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = sample().save(&dir.path().join("run"), HistoryFormat::Csv).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Path,Comparison Report"));
        assert_eq!(
            lines.next(),
            Some("/system/memory/state,\"No discrepancies found, all values match.\"")
        );
        assert!(text.contains("/system/cpu/state/usage,\"Field: cpuusage\n"));
        assert!(text.ends_with("/nope,Error: unknown path\n"));
    }

    #[test]
    fn save_keeps_dots_in_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = History::new()
            .save(&dir.path().join("run.2026"), HistoryFormat::Txt)
            .unwrap();
        assert_eq!(path, dir.path().join("run.2026.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
