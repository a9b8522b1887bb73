use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The command(s) that report the state behind one gNMI path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandSet {
    /// One command whose output covers the whole path.
    Single(String),
    /// Several commands whose outputs are merged, later keys winning.
    Multi(Vec<String>),
}

impl CommandSet {
    /// The commands in execution order.
    pub fn commands(&self) -> Vec<&str> {
        match self {
            CommandSet::Single(command) => vec![command.as_str()],
            CommandSet::Multi(commands) => commands.iter().map(String::as_str).collect(),
        }
    }
}

/// Maps a gNMI path to the command(s) that report it.
pub trait CommandLookup: Send + Sync {
    /// Returns `None` when the path is not mapped.
    fn commands_for(&self, path: &str) -> Option<CommandSet>;

    /// Every mapped path, sorted.
    fn mapped_paths(&self) -> Vec<&str>;
}

/// Maps a command line to its (simulated) structured output.
pub trait OutputLookup: Send + Sync {
    /// Returns `None` when the command has no recorded output.
    fn output_for(&self, command: &str) -> Option<&Value>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_and_multi_commands() {
        let single = CommandSet::Single("show cpu".into());
        assert_eq!(single.commands(), vec!["show cpu"]);

        let multi = CommandSet::Multi(vec!["show a".into(), "show b".into()]);
        assert_eq!(multi.commands(), vec!["show a", "show b"]);
    }

    #[test]
    fn untagged_serde() {
        let single: CommandSet = serde_json::from_str(r#""show memory""#).unwrap();
        assert_eq!(single, CommandSet::Single("show memory".into()));

        let multi: CommandSet = serde_json::from_str(r#"["show a", "show b"]"#).unwrap();
        assert!(matches!(multi, CommandSet::Multi(ref c) if c.len() == 2));
    }
}
