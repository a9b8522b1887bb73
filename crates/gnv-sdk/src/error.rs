use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("unknown gNMI path {path:?}: {}", missing_from(.in_telemetry, .in_commands))]
    UnknownPath {
        path: String,
        in_telemetry: bool,
        in_commands: bool,
    },

    #[error("comparison failed: {0}")]
    Diff(#[from] gnv_diff::DiffError),

    #[error("source error: {0}")]
    Source(#[from] gnv_source::SourceError),

    #[error("report error: {0}")]
    Report(#[from] gnv_report::ReportError),
}

fn missing_from(in_telemetry: &bool, in_commands: &bool) -> &'static str {
    match (*in_telemetry, *in_commands) {
        (false, false) => "not found in gNMI data or CLI commands",
        (false, true) => "not found in gNMI data",
        (true, false) => "not found in CLI commands",
        (true, true) => "found in both sources",
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
