use std::path::{Path, PathBuf};

use anyhow::Context;
use gnv_report::HistoryFormat;
use serde::{Deserialize, Serialize};

/// Settings read from `gnv.toml`. Command-line flags take precedence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GnvConfig {
    /// Telemetry JSON document keyed by gNMI path.
    pub telemetry: PathBuf,
    /// TOML catalogue; the built-in catalogue is used when unset.
    pub catalogue: Option<PathBuf>,
    /// Directory relative history file names are saved under.
    pub history_dir: PathBuf,
    /// Format used when saving history without asking.
    pub history_format: HistoryFormat,
}

impl Default for GnvConfig {
    fn default() -> Self {
        Self {
            telemetry: PathBuf::from("gNMI_Data.json"),
            catalogue: None,
            history_dir: PathBuf::from("."),
            history_format: HistoryFormat::Json,
        }
    }
}

impl GnvConfig {
    pub const FILE_NAME: &'static str = "gnv.toml";

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `explicit` if given, else `gnv.toml` in `dir` if present, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = dir.join(Self::FILE_NAME);
        if local.is_file() {
            Self::load(&local)
        } else {
            Ok(Self::default())
        }
    }

    pub fn with_overrides(mut self, telemetry: Option<PathBuf>, catalogue: Option<PathBuf>) -> Self {
        if let Some(t) = telemetry {
            self.telemetry = t;
        }
        if catalogue.is_some() {
            self.catalogue = catalogue;
        }
        self
    }

    /// Where a history file named `name` is written.
    pub fn history_base(&self, name: &Path) -> PathBuf {
        if name.is_absolute() {
            name.to_path_buf()
        } else {
            self.history_dir.join(name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = GnvConfig::default();
        assert_eq!(c.telemetry, PathBuf::from("gNMI_Data.json"));
        assert!(c.catalogue.is_none());
        assert_eq!(c.history_format, HistoryFormat::Json);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let c: GnvConfig = toml::from_str(
            "telemetry = \"lab/telemetry.json\"\nhistory_format = \"csv\"\n",
        )
        .unwrap();
        assert_eq!(c.telemetry, PathBuf::from("lab/telemetry.json"));
        assert_eq!(c.history_format, HistoryFormat::Csv);
        assert_eq!(c.history_dir, PathBuf::from("."));
    }

    #[test]
    fn discover_prefers_explicit_then_local() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(GnvConfig::discover(None, dir.path()).unwrap(), GnvConfig::default());

        std::fs::write(dir.path().join("gnv.toml"), "history_dir = \"runs\"\n").unwrap();
        let local = GnvConfig::discover(None, dir.path()).unwrap();
        assert_eq!(local.history_dir, PathBuf::from("runs"));

        let other = dir.path().join("other.toml");
        std::fs::write(&other, "catalogue = \"c.toml\"\n").unwrap();
        let explicit = GnvConfig::discover(Some(&other), dir.path()).unwrap();
        assert_eq!(explicit.catalogue, Some(PathBuf::from("c.toml")));
        assert_eq!(explicit.history_dir, PathBuf::from("."));
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GnvConfig::discover(Some(&dir.path().join("none.toml")), dir.path()).is_err());
    }

    #[test]
    fn flags_override_file() {
        let c = GnvConfig::default()
            .with_overrides(Some("t.json".into()), None);
        assert_eq!(c.telemetry, PathBuf::from("t.json"));
        assert!(c.catalogue.is_none());
    }

    #[test]
    fn history_base_resolution() {
        let c = GnvConfig { history_dir: "runs".into(), ..Default::default() };
        assert_eq!(c.history_base(Path::new("today")), PathBuf::from("runs/today"));
        assert_eq!(c.history_base(Path::new("/tmp/today")), PathBuf::from("/tmp/today"));
    }
}
