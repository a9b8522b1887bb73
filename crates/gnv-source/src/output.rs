//! `key: value` command-output text.
//!
//! The comparator relies on this exact contract: each line containing a
//! colon is split at the first colon and both halves are trimmed. Values are
//! kept as strings; numeric interpretation happens during comparison.

use serde_json::{Map, Value};

/// Parse command-output text into a flat mapping of string values.
///
/// Lines without a colon are ignored. A repeated key keeps its last value.
pub fn parse_command_output(text: &str) -> Map<String, Value> {
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), Value::String(value.trim().to_string())))
        .collect()
}

/// Render a flat mapping as `key: value` lines.
///
/// Strings are written raw; every other value as compact JSON.
pub fn render_command_output(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(key, value)| match value {
            Value::String(s) => format!("{key}: {s}"),
            other => format!("{key}: {other}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_at_first_colon_and_trims() {
        let map = parse_command_output("mac_address:  00:1C:42:2B:60:5A  \n  mtu : 1500");
        assert_eq!(map.get("mac_address"), Some(&json!("00:1C:42:2B:60:5A")));
        assert_eq!(map.get("mtu"), Some(&json!("1500")));
    }

    #[test]
    fn lines_without_colon_ignored() {
        let map = parse_command_output("header line\n\nstate: up\n----");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("state"), Some(&json!("up")));
    }

    #[test]
    fn empty_key_and_value_kept() {
        let map = parse_command_output(":\nname:");
        assert_eq!(map.get(""), Some(&json!("")));
        assert_eq!(map.get("name"), Some(&json!("")));
    }

    #[test]
    fn repeated_key_last_wins() {
        let map = parse_command_output("state: down\nstate: up");
        assert_eq!(map.get("state"), Some(&json!("up")));
    }

    #[test]
    fn crlf_lines() {
        let map = parse_command_output("a: 1\r\nb: 2\r\n");
        assert_eq!(map.get("a"), Some(&json!("1")));
        assert_eq!(map.get("b"), Some(&json!("2")));
    }

    #[test]
    fn render_then_parse_keeps_text_form() {
        let fields = json!({"in_octets": 1500000, "state": "up", "flags": [1, 2]});
        let text = render_command_output(fields.as_object().unwrap());
        assert_eq!(text, "flags: [1,2]\nin_octets: 1500000\nstate: up");

        let parsed = parse_command_output(&text);
        assert_eq!(parsed.get("in_octets"), Some(&json!("1500000")));
        assert_eq!(parsed.get("flags"), Some(&json!("[1,2]")));
    }
}
