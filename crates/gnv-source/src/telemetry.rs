//! Telemetry snapshots keyed by gNMI path.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{SourceError, SourceResult};

/// A telemetry document: a JSON object whose keys are gNMI path strings.
///
/// The store does not validate what lives under each path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TelemetryStore {
    data: Map<String, Value>,
}

impl TelemetryStore {
    /// Load a telemetry document from a JSON file.
    pub fn load(path: &Path) -> SourceResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
            _ => SourceError::Io(e),
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| SourceError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_value(value)?;
        debug!(file = %path.display(), paths = store.len(), "loaded telemetry");
        Ok(store)
    }

    /// Build a store from an already-parsed document.
    pub fn from_value(value: Value) -> SourceResult<Self> {
        match value {
            Value::Object(data) => Ok(Self { data }),
            Value::Array(_) => Err(SourceError::NotAMapping("sequence")),
            Value::String(_) => Err(SourceError::NotAMapping("string")),
            Value::Number(_) => Err(SourceError::NotAMapping("number")),
            Value::Bool(_) => Err(SourceError::NotAMapping("boolean")),
            Value::Null => Err(SourceError::NotAMapping("null")),
        }
    }

    /// The telemetry recorded under a path.
    pub fn fetch(&self, path: &str) -> Option<&Value> {
        self.data.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn fetch_by_path() {
        let store = TelemetryStore::from_value(json!({
            "/system/memory/state": {"total-memory": 4096000},
        }))
        .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.fetch("/system/memory/state"),
            Some(&json!({"total-memory": 4096000}))
        );
        assert!(store.fetch("/system/cpu/state").is_none());
    }

    #[test]
    fn rejects_non_mapping_document() {
        let err = TelemetryStore::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, SourceError::NotAMapping("sequence")));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"/a": {{"x": 1}}, "/b": {{"y": "2"}}}}"#).unwrap();

        let store = TelemetryStore::load(file.path()).unwrap();
        assert_eq!(store.paths().collect::<Vec<_>>(), vec!["/a", "/b"]);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TelemetryStore::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();

        let err = TelemetryStore::load(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidJson { .. }));
    }
}
