//! Path and command-output catalogue.
//!
//! A catalogue answers both lookups the simulator needs: which commands
//! report a gNMI path, and what each command prints. The built-in catalogue
//! covers a small lab device; others are loaded from TOML:
//!
//! ```toml
//! [paths]
//! "/system/memory/state" = "show memory"
//! "/system/disk/state" = ["show disk space", "show disk health"]
//!
//! [outputs."show memory"]
//! total_memory = 4096000
//! available_memory = 1000000
//! ```

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{SourceError, SourceResult};
use crate::traits::{CommandLookup, CommandSet, OutputLookup};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogue {
    /// gNMI path to the command(s) reporting it.
    #[serde(default)]
    pub paths: BTreeMap<String, CommandSet>,
    /// Command line to its structured output (an object, or a list of objects).
    #[serde(default)]
    pub outputs: BTreeMap<String, Value>,
}

impl Catalogue {
    /// Load a catalogue from a TOML file.
    pub fn load(path: &Path) -> SourceResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
            _ => SourceError::Io(e),
        })?;
        let catalogue: Self = toml::from_str(&text).map_err(|source| {
            SourceError::InvalidCatalogue {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(
            file = %path.display(),
            paths = catalogue.paths.len(),
            outputs = catalogue.outputs.len(),
            "loaded catalogue"
        );
        Ok(catalogue)
    }

    /// Mapped gNMI paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// The bundled lab-device catalogue.
    pub fn builtin() -> Self {
        let single = [
            ("/interfaces/interface[name=eth0]/state/counters", "show interfaces eth0 counters"),
            ("/system/memory/state", "show memory"),
            ("/interfaces/interface[name=eth1]/state/counters", "show interfaces eth1 counters"),
            ("/system/cpu/state/usage", "show cpu"),
            ("/routing/protocols/protocol[ospf]/ospf/state", "show ospf status"),
        ];
        let multi: [(&str, &[&str]); 5] = [
            (
                "/interfaces/interface[name=eth0]/state",
                &[
                    "show interfaces eth0 status",
                    "show interfaces eth0 mac-address",
                    "show interfaces eth0 mtu",
                    "show interfaces eth0 speed",
                ],
            ),
            (
                "/bgp/neighbors/neighbor[neighbor_address=10.0.0.1]/state",
                &[
                    "show bgp neighbors 10.0.0.1",
                    "show bgp neighbors 10.0.0.1 received-routes",
                    "show bgp neighbors 10.0.0.1 advertised-routes",
                ],
            ),
            (
                "/system/cpu/state",
                &["show cpu usage", "show cpu user", "show cpu system", "show cpu idle"],
            ),
            (
                "/ospf/areas/area[id=0.0.0.0]/state",
                &["show ospf area 0.0.0.0", "show ospf neighbors"],
            ),
            ("/system/disk/state", &["show disk space", "show disk health"]),
        ];

        let mut paths: BTreeMap<String, CommandSet> = single
            .into_iter()
            .map(|(path, command)| (path.to_string(), CommandSet::Single(command.to_string())))
            .collect();
        paths.extend(multi.into_iter().map(|(path, commands)| {
            let commands = commands.iter().map(|c| c.to_string()).collect();
            (path.to_string(), CommandSet::Multi(commands))
        }));

        let outputs = [
            (
                "show interfaces eth0 counters",
                json!({"in_octets": 1500000, "out_octets": 1400000, "in_errors": 10, "out_errors": 2}),
            ),
            ("show memory", json!({"total_memory": 4096000, "available_memory": 1000000})),
            ("show interfaces eth1 counters", json!({"in_octets": 200000, "out_octets": 100000})),
            ("show cpu", json!({"cpu_usage": 65})),
            ("show ospf status", json!({"ospf_area": "0.0.0.0", "ospf_state": "down"})),
            ("show interfaces eth0 status", json!({"admin_status": "up", "oper_status": "up"})),
            ("show interfaces eth0 mac-address", json!({"mac_address": "00:1C:42:2B:60:5A"})),
            ("show interfaces eth0 mtu", json!({"mtu": 1500})),
            ("show interfaces eth0 speed", json!({"speed": 1000})),
            ("show bgp neighbors 10.0.0.1", json!({"peer_as": 65001, "connection_state": "Established"})),
            ("show bgp neighbors 10.0.0.1 received-routes", json!({"received_prefix_count": 120})),
            ("show bgp neighbors 10.0.0.1 advertised-routes", json!({"sent_prefix_count": 95})),
            ("show cpu usage", json!({"cpu_usage": 75})),
            ("show cpu user", json!({"user_usage": 45})),
            ("show cpu system", json!({"system_usage": 20})),
            ("show cpu idle", json!({"idle_percentage": 25})),
            (
                "show ospf area 0.0.0.0",
                json!({"area_id": "0.0.0.0", "active_interfaces": 4, "lsdb_entries": 200}),
            ),
            (
                "show ospf neighbors",
                json!([
                    {"neighbor_id": "1.1.1.1", "state": "full"},
                    {"neighbor_id": "2.2.2.2", "state": "full"}
                ]),
            ),
            (
                "show disk space",
                json!({"total_space": 1024000, "used_space": 500000, "available_space": 524000}),
            ),
            ("show disk health", json!({"disk_health": "good"})),
        ]
        .into_iter()
        .map(|(command, output)| (command.to_string(), output))
        .collect();

        Self { paths, outputs }
    }
}

impl CommandLookup for Catalogue {
    fn commands_for(&self, path: &str) -> Option<CommandSet> {
        self.paths.get(path).cloned()
    }

    fn mapped_paths(&self) -> Vec<&str> {
        self.paths().collect()
    }
}

impl OutputLookup for Catalogue {
    fn output_for(&self, command: &str) -> Option<&Value> {
        self.outputs.get(command)
    }
}
