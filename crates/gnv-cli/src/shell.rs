use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use colored::Colorize;
use gnv_report::HistoryFormat;
use gnv_sdk::{SdkError, Verifier};
use tracing::warn;

use crate::cli::OutputFormat;
use crate::commands::print_verification;
use crate::config::GnvConfig;

const PROMPT: &str = "Enter gNMI path: ";

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<Option<String>> {
    write!(out, "{}", question)?;
    out.flush()?;
    read_line(input)
}

/// Prompt for paths until `e`, `exit`, or end of input.
pub fn run<R: BufRead, W: Write>(
    verifier: &mut Verifier,
    format: OutputFormat,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    writeln!(out, "Type {} or {} to quit.", "e".bold(), "exit".bold())?;
    loop {
        writeln!(out)?;
        let Some(path) = ask(input, out, PROMPT)? else {
            writeln!(out)?;
            break;
        };
        if path.is_empty() {
            continue;
        }
        if path.eq_ignore_ascii_case("e") || path.eq_ignore_ascii_case("exit") {
            break;
        }
        match verifier.verify(&path) {
            Ok(run) => print_verification(out, &run, format)?,
            Err(e @ SdkError::UnknownPath { .. }) => {
                writeln!(out, "{} {}", "✗".red().bold(), e)?;
            }
            Err(e) => {
                warn!(path = %path, error = %e, "verification failed");
                writeln!(out, "{} {}", "Error:".red().bold(), e)?;
            }
        }
    }
    Ok(())
}

/// Ask whether to save the session history, then for a format and name.
/// Returns the written file, or `None` if the user declined.
pub fn offer_save<R: BufRead, W: Write>(
    verifier: &Verifier,
    config: &GnvConfig,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<PathBuf>> {
    loop {
        let Some(answer) = ask(input, out, "Save test history? [y/n]: ")? else {
            return Ok(None);
        };
        match answer.to_ascii_lowercase().as_str() {
            "y" => break,
            "n" => {
                writeln!(out, "Exiting without saving history.")?;
                return Ok(None);
            }
            _ => writeln!(out, "Invalid input. Please enter 'y' or 'n'.")?,
        }
    }

    let format = loop {
        let Some(answer) = ask(input, out, "Choose a file format (txt/csv/json): ")? else {
            return Ok(None);
        };
        match answer.parse::<HistoryFormat>() {
            Ok(format) => break format,
            Err(_) => writeln!(out, "Invalid file format. Please choose txt, csv, or json.")?,
        }
    };

    let name = loop {
        let Some(answer) = ask(input, out, "Enter the file name (without extension): ")? else {
            return Ok(None);
        };
        if !answer.is_empty() {
            break answer;
        }
    };

    let saved = verifier.save_history(&config.history_base(Path::new(&name)), format)?;
    writeln!(out, "{} History saved as {}", "✓".green(), saved.display())?;
    Ok(Some(saved))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gnv_source::{Catalogue, TelemetryStore};
    use serde_json::json;
    use std::io::Cursor;

    fn verifier() -> Verifier {
        colored::control::set_override(false);
        let telemetry = TelemetryStore::from_value(json!({
            "/system/memory/state": {"total-memory": "4000KB", "Available Memory": 1000000},
            "/system/cpu/state/usage": {"cpu-usage": "70%"}
        }))
        .unwrap();
        Verifier::new(telemetry, Catalogue::builtin())
    }

    fn session(v: &mut Verifier, script: &str) -> String {
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        run(v, OutputFormat::Text, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn exit_words_end_session() {
        for word in ["e", "E", "exit", "EXIT"] {
            let mut v = verifier();
            let text = session(&mut v, &format!("{word}\n/system/memory/state\n"));
            assert_eq!(text.matches(PROMPT).count(), 1, "{word}");
            assert!(v.history().is_empty());
        }
    }

    #[test]
    fn end_of_input_ends_session() {
        let mut v = verifier();
        let text = session(&mut v, "/system/memory/state\n");
        assert_eq!(text.matches(PROMPT).count(), 2);
        assert_eq!(v.history().len(), 1);
    }

    #[test]
    fn reports_each_path() {
        let mut v = verifier();
        let text = session(&mut v, "  /system/memory/state  \n\n/system/cpu/state/usage\nexit\n");
        assert!(text.contains("No discrepancies found, all values match."));
        assert!(text.contains("Field: cpuusage"));
        assert!(text.contains("CLI commands: show cpu"));
        assert_eq!(v.history().len(), 2);
    }

    #[test]
    fn unknown_path_names_missing_source() {
        let mut v = verifier();
        let text = session(
            &mut v,
            "/bgp/neighbors/neighbor[neighbor_address=10.0.0.1]/state\n/nowhere\ne\n",
        );
        assert!(text.contains("not found in gNMI data\n"));
        assert!(text.contains("not found in gNMI data or CLI commands"));
        assert_eq!(v.history().len(), 2);
    }

    #[test]
    fn save_dialog_reasks_until_valid() {
        let dir = tempfile::tempdir().unwrap();
        let config = GnvConfig { history_dir: dir.path().to_path_buf(), ..Default::default() };
        let mut v = verifier();
        session(&mut v, "/system/cpu/state/usage\ne\n");

        let mut input = Cursor::new("maybe\nY\nxml\nCSV\n\nrun1\n");
        let mut out = Vec::new();
        let saved = offer_save(&v, &config, &mut input, &mut out).unwrap().unwrap();
        assert_eq!(saved, dir.path().join("run1.csv"));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Invalid input. Please enter 'y' or 'n'."));
        assert!(text.contains("Invalid file format. Please choose txt, csv, or json."));
        let csv = std::fs::read_to_string(saved).unwrap();
        assert!(csv.starts_with("Path,Comparison Report\n/system/cpu/state/usage,"));
    }

    #[test]
    fn save_dialog_declined() {
        let dir = tempfile::tempdir().unwrap();
        let config = GnvConfig { history_dir: dir.path().to_path_buf(), ..Default::default() };
        let v = verifier();

        let mut out = Vec::new();
        let saved = offer_save(&v, &config, &mut Cursor::new("n\n"), &mut out).unwrap();
        assert!(saved.is_none());
        assert!(String::from_utf8(out).unwrap().contains("Exiting without saving history."));

        let mut out = Vec::new();
        assert!(offer_save(&v, &config, &mut Cursor::new(""), &mut out).unwrap().is_none());
    }
}
