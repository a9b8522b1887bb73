//! Simulated command execution.
//!
//! Resolves a gNMI path to its command(s), gathers their recorded outputs
//! into one flat mapping, and renders it as `key: value` text.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::output::render_command_output;
use crate::traits::{CommandLookup, OutputLookup};

/// The commands run for a path and the text they produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandExecution {
    pub commands: Vec<String>,
    pub text: String,
}

pub struct CommandSimulator<'a> {
    commands: &'a dyn CommandLookup,
    outputs: &'a dyn OutputLookup,
}

impl<'a> CommandSimulator<'a> {
    pub fn new(commands: &'a dyn CommandLookup, outputs: &'a dyn OutputLookup) -> Self {
        Self { commands, outputs }
    }

    /// Run the command(s) mapped to `path`. Returns `None` for unmapped paths.
    ///
    /// Object outputs contribute their fields; list outputs contribute the
    /// fields of each object element. Later fields replace earlier ones with
    /// the same key. Commands without recorded output contribute nothing.
    pub fn execute(&self, path: &str) -> Option<CommandExecution> {
        let set = self.commands.commands_for(path)?;
        let mut fields = Map::new();

        for command in set.commands() {
            match self.outputs.output_for(command) {
                Some(Value::Object(map)) => merge(&mut fields, map),
                Some(Value::Array(items)) => {
                    for item in items {
                        if let Value::Object(map) = item {
                            merge(&mut fields, map);
                        }
                    }
                }
                Some(other) => warn!(command, output = %other, "ignoring non-mapping command output"),
                None => warn!(command, "no output recorded for command"),
            }
        }

        debug!(path, fields = fields.len(), "simulated command output");
        Some(CommandExecution {
            commands: set.commands().into_iter().map(str::to_string).collect(),
            text: render_command_output(&fields),
        })
    }
}

fn merge(into: &mut Map<String, Value>, from: &Map<String, Value>) {
    for (key, value) in from {
        into.insert(key.clone(), value.clone());
    }
}
