use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use gnv_diff::{diff_values, DiffResult, DiscrepancySet};
use gnv_report::{History, HistoryFormat, RunRecord};
use gnv_source::{
    parse_command_output, Catalogue, CommandLookup, CommandSimulator, OutputLookup,
    TelemetryStore,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{SdkError, SdkResult};

/// Compare a telemetry tree against raw `key: value` command output.
pub fn compare_outputs(telemetry: &Value, command_text: &str) -> DiffResult<DiscrepancySet> {
    let command = Value::Object(parse_command_output(command_text));
    diff_values(telemetry, &command)
}

/// Everything produced by verifying one path.
#[derive(Clone, Debug, PartialEq)]
pub struct Verification {
    pub path: String,
    pub commands: Vec<String>,
    pub telemetry: Value,
    pub command_text: String,
    pub discrepancies: DiscrepancySet,
}

/// Verifies gNMI paths and remembers the outcome of every run.
pub struct Verifier<C = Catalogue> {
    telemetry: TelemetryStore,
    catalogue: C,
    history: History,
}

impl Verifier<Catalogue> {
    /// Load telemetry from a JSON file and a catalogue from a TOML file,
    /// falling back to the built-in catalogue.
    pub fn from_files(telemetry: &Path, catalogue: Option<&Path>) -> SdkResult<Self> {
        let store = TelemetryStore::load(telemetry)?;
        let catalogue = match catalogue {
            Some(path) => Catalogue::load(path)?,
            None => Catalogue::builtin(),
        };
        Ok(Self::new(store, catalogue))
    }
}

impl<C: CommandLookup + OutputLookup> Verifier<C> {
    pub fn new(telemetry: TelemetryStore, catalogue: C) -> Self {
        Self {
            telemetry,
            catalogue,
            history: History::new(),
        }
    }

    /// Verify one path. Failures are recorded in the history as well.
    pub fn verify(&mut self, path: &str) -> SdkResult<Verification> {
        let telemetry = self.telemetry.fetch(path);
        let execution = CommandSimulator::new(&self.catalogue, &self.catalogue).execute(path);

        let (telemetry, execution) = match (telemetry, execution) {
            (Some(t), Some(e)) => (t.clone(), e),
            (t, e) => {
                let err = SdkError::UnknownPath {
                    path: path.to_string(),
                    in_telemetry: t.is_some(),
                    in_commands: e.is_some(),
                };
                let commands = e.map(|e| e.commands).unwrap_or_default();
                self.history
                    .push(RunRecord::failed(path, commands, err.to_string()));
                return Err(err);
            }
        };

        let discrepancies = match compare_outputs(&telemetry, &execution.text) {
            Ok(set) => set,
            Err(e) => {
                self.history
                    .push(RunRecord::failed(path, execution.commands, e.to_string()));
                return Err(e.into());
            }
        };

        debug!(
            path,
            discrepancies = discrepancies.len(),
            missing_in_cli = discrepancies.missing_in_b(),
            missing_in_gnmi = discrepancies.missing_in_a(),
            mismatches = discrepancies.mismatches(),
            "verified path"
        );
        self.history.push(RunRecord::compared(
            path,
            execution.commands.clone(),
            discrepancies.clone(),
        ));

        Ok(Verification {
            path: path.to_string(),
            commands: execution.commands,
            telemetry,
            command_text: execution.text,
            discrepancies,
        })
    }

    /// Paths known to either source, sorted.
    pub fn paths(&self) -> Vec<&str> {
        self.telemetry
            .paths()
            .chain(self.catalogue.mapped_paths())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Telemetry paths that also have commands mapped.
    pub fn verifiable_paths(&self) -> Vec<&str> {
        self.telemetry
            .paths()
            .filter(|p| self.catalogue.commands_for(p).is_some())
            .collect()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Persist the history next to `base` with the format's extension.
    pub fn save_history(&self, base: &Path, format: HistoryFormat) -> SdkResult<PathBuf> {
        let path = self.history.save(base, format)?;
        info!(file = %path.display(), "history written");
        Ok(path)
    }
}
