//! Discrepancy types produced by the tree diff.
//!
//! A [`DiscrepancySet`] is keyed by normalized field name. Nested objects are
//! flattened into the same key space, so a later discrepancy for the same
//! normalized key replaces an earlier one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which input of a comparison a value or error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Telemetry snapshot.
    A,
    /// Command-output snapshot.
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "side A (telemetry)"),
            Side::B => write!(f, "side B (command output)"),
        }
    }
}

/// Classification of a single disagreement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Present in A, absent from B.
    MissingInB,
    /// Present in B, absent from A.
    MissingInA,
    /// Present in both with different canonical values.
    ValueMismatch,
}

impl DiscrepancyKind {
    /// The kind reported when A and B trade places.
    pub fn mirrored(self) -> Self {
        match self {
            DiscrepancyKind::MissingInB => DiscrepancyKind::MissingInA,
            DiscrepancyKind::MissingInA => DiscrepancyKind::MissingInB,
            DiscrepancyKind::ValueMismatch => DiscrepancyKind::ValueMismatch,
        }
    }
}

impl fmt::Display for DiscrepancyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscrepancyKind::MissingInB => write!(f, "MISSING_IN_B"),
            DiscrepancyKind::MissingInA => write!(f, "MISSING_IN_A"),
            DiscrepancyKind::ValueMismatch => write!(f, "VALUE_MISMATCH"),
        }
    }
}

/// One detected disagreement between the two sources.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// Normalized key; this is the identity of the entry in a set.
    pub key: String,
    /// The key as spelled by the side that produced this entry.
    pub field: String,
    /// Dotted path of original keys from the root, for display.
    pub path: String,
    /// Value on side A, `None` when the field is absent there.
    pub side_a: Option<Value>,
    /// Value on side B, `None` when the field is absent there.
    pub side_b: Option<Value>,
    pub kind: DiscrepancyKind,
}

impl Discrepancy {
    /// A field present in A only. Carries A's raw value.
    pub fn missing_in_b(
        key: impl Into<String>,
        field: impl Into<String>,
        path: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            key: key.into(),
            field: field.into(),
            path: path.into(),
            side_a: Some(value),
            side_b: None,
            kind: DiscrepancyKind::MissingInB,
        }
    }

    /// A field present in B only. Carries B's raw value.
    pub fn missing_in_a(
        key: impl Into<String>,
        field: impl Into<String>,
        path: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            key: key.into(),
            field: field.into(),
            path: path.into(),
            side_a: None,
            side_b: Some(value),
            kind: DiscrepancyKind::MissingInA,
        }
    }

    /// A field present on both sides whose canonical values differ.
    pub fn value_mismatch(
        key: impl Into<String>,
        field: impl Into<String>,
        path: impl Into<String>,
        a: Value,
        b: Value,
    ) -> Self {
        Self {
            key: key.into(),
            field: field.into(),
            path: path.into(),
            side_a: Some(a),
            side_b: Some(b),
            kind: DiscrepancyKind::ValueMismatch,
        }
    }

    /// This discrepancy as it would be reported with A and B swapped.
    pub fn swapped(&self) -> Self {
        Self {
            key: self.key.clone(),
            field: self.field.clone(),
            path: self.path.clone(),
            side_a: self.side_b.clone(),
            side_b: self.side_a.clone(),
            kind: self.kind.mirrored(),
        }
    }
}

/// The result of comparing two state trees.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscrepancySet {
    entries: BTreeMap<String, Discrepancy>,
}

impl DiscrepancySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a discrepancy, replacing any earlier one with the same key.
    pub fn insert(&mut self, discrepancy: Discrepancy) -> Option<Discrepancy> {
        self.entries.insert(discrepancy.key.clone(), discrepancy)
    }

    /// Returns `true` if the two sources agree everywhere.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of discrepancies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Look up a discrepancy by normalized key.
    pub fn get(&self, key: &str) -> Option<&Discrepancy> {
        self.entries.get(key)
    }

    /// Iterate in normalized-key order.
    pub fn iter(&self) -> impl Iterator<Item = &Discrepancy> {
        self.entries.values()
    }

    /// Normalized keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries of the given kind.
    pub fn count(&self, kind: DiscrepancyKind) -> usize {
        self.iter().filter(|d| d.kind == kind).count()
    }

    /// Number of fields present in A but not in B.
    pub fn missing_in_b(&self) -> usize {
        self.count(DiscrepancyKind::MissingInB)
    }

    /// Number of fields present in B but not in A.
    pub fn missing_in_a(&self) -> usize {
        self.count(DiscrepancyKind::MissingInA)
    }

    /// Number of fields whose values disagree.
    pub fn mismatches(&self) -> usize {
        self.count(DiscrepancyKind::ValueMismatch)
    }

    /// Every entry mirrored as if A and B had been swapped.
    pub fn swapped(&self) -> Self {
        self.iter().map(Discrepancy::swapped).collect()
    }
}

impl FromIterator<Discrepancy> for DiscrepancySet {
    fn from_iter<I: IntoIterator<Item = Discrepancy>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Discrepancy> for DiscrepancySet {
    fn extend<I: IntoIterator<Item = Discrepancy>>(&mut self, iter: I) {
        for discrepancy in iter {
            self.insert(discrepancy);
        }
    }
}

impl<'a> IntoIterator for &'a DiscrepancySet {
    type Item = &'a Discrepancy;
    type IntoIter = std::collections::btree_map::Values<'a, String, Discrepancy>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_set() {
        let set = DiscrepancySet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(serde_json::to_value(&set).unwrap(), json!({}));
    }

    #[test]
    fn insert_same_key_overwrites() {
        let mut set = DiscrepancySet::new();
        assert!(set
            .insert(Discrepancy::missing_in_b("up", "up", "up", json!(true)))
            .is_none());
        let previous = set.insert(Discrepancy::missing_in_a("up", "Up", "Up", json!(false)));

        assert_eq!(set.len(), 1);
        assert_eq!(previous.unwrap().kind, DiscrepancyKind::MissingInB);
        assert_eq!(set.get("up").unwrap().kind, DiscrepancyKind::MissingInA);
    }

    #[test]
    fn counts_per_kind() {
        let set: DiscrepancySet = vec![
            Discrepancy::missing_in_b("a", "a", "a", json!(1)),
            Discrepancy::missing_in_a("b", "b", "b", json!(2)),
            Discrepancy::value_mismatch("c", "c", "c", json!(1.0), json!(2.0)),
            Discrepancy::value_mismatch("d", "d", "d", json!("x"), json!("y")),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 4);
        assert_eq!(set.missing_in_b(), 1);
        assert_eq!(set.missing_in_a(), 1);
        assert_eq!(set.mismatches(), 2);
    }

    #[test]
    fn swapped_mirrors_kinds_and_sides() {
        let d = Discrepancy::missing_in_b("mtu", "mtu", "mtu", json!(1500));
        let s = d.swapped();
        assert_eq!(s.kind, DiscrepancyKind::MissingInA);
        assert_eq!(s.side_a, None);
        assert_eq!(s.side_b, Some(json!(1500)));

        let m = Discrepancy::value_mismatch("mtu", "mtu", "mtu", json!(1500.0), json!(9000.0));
        let s = m.swapped();
        assert_eq!(s.kind, DiscrepancyKind::ValueMismatch);
        assert_eq!(s.side_a, Some(json!(9000.0)));
        assert_eq!(s.side_b, Some(json!(1500.0)));
        assert_eq!(s.swapped(), m);
    }

    #[test]
    fn absent_side_distinct_from_null_value() {
        let absent = Discrepancy::missing_in_b("x", "x", "x", json!(null));
        let json = serde_json::to_value(&absent).unwrap();
        assert_eq!(json["side_a"], json!(null));
        assert_eq!(json["side_b"], json!(null));
        assert_eq!(json["kind"], json!("missing_in_b"));
        // The kind still tells which side is absent.
        let back: Discrepancy = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind, DiscrepancyKind::MissingInB);
    }

    #[test]
    fn kind_display() {
        assert_eq!(DiscrepancyKind::ValueMismatch.to_string(), "VALUE_MISMATCH");
        assert_eq!(Side::B.to_string(), "side B (command output)");
    }
}
