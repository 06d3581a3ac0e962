//! Named combinations of face values.
//!
//! A combination names a multiset of values, e.g. `venus = [1, 3, 4, 6]`.
//! A throw satisfies the combination when its values contain the required
//! multiset: every required value must appear at least as many times as
//! it is listed. One throw may satisfy several combinations at once.

pub mod multiset;

pub use multiset::ValueCounts;

use serde::{Deserialize, Serialize};

/// A named multiset of required face values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    /// Display name (e.g. "venus", "canis").
    pub name: String,
    /// Values that must all be present, with multiplicity.
    pub requires: Vec<i32>,
}

impl Combination {
    /// Create a combination from a name and its required values.
    pub fn new(name: impl Into<String>, requires: &[i32]) -> Self {
        Self {
            name: name.into(),
            requires: requires.to_vec(),
        }
    }

    /// Returns true if the rolled counts contain this combination.
    pub fn is_satisfied_by(&self, rolled: &ValueCounts) -> bool {
        rolled.contains(&ValueCounts::from_values(&self.requires))
    }
}

impl std::fmt::Display for Combination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.requires.iter().map(i32::to_string).collect();
        write!(f, "{} [{}]", self.name, values.join(", "))
    }
}

/// The configured set of combinations, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombinationTable {
    combinations: Vec<Combination>,
}

impl CombinationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            combinations: Vec::new(),
        }
    }

    /// Append a combination.
    pub fn with(mut self, name: impl Into<String>, requires: &[i32]) -> Self {
        self.combinations.push(Combination::new(name, requires));
        self
    }

    /// Names of every combination satisfied by `values`, in table order.
    pub fn matches(&self, values: &[i32]) -> Vec<String> {
        let rolled = ValueCounts::from_values(values);
        self.combinations
            .iter()
            .filter(|c| c.is_satisfied_by(&rolled))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Look up a combination by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&Combination> {
        self.combinations
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Iterate over all combinations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Combination> {
        self.combinations.iter()
    }

    /// Number of combinations.
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CombinationTable {
        CombinationTable::new()
            .with("pair of dogs", &[1, 1])
            .with("three dogs", &[1, 1, 1])
            .with("venus", &[1, 3, 4, 6])
    }

    #[test]
    fn pair_matches_but_triple_does_not() {
        let matched = table().matches(&[1, 1, 3, 4, 6]);
        assert!(matched.contains(&"pair of dogs".to_string()));
        assert!(!matched.contains(&"three dogs".to_string()));
    }

    #[test]
    fn several_combinations_can_match() {
        let matched = table().matches(&[1, 1, 3, 4, 6]);
        assert_eq!(matched, vec!["pair of dogs", "venus"]);
    }

    #[test]
    fn order_of_values_does_not_matter() {
        let t = table();
        assert_eq!(t.matches(&[6, 4, 1, 3, 1]), t.matches(&[1, 1, 3, 4, 6]));
    }

    #[test]
    fn nothing_matches() {
        assert!(table().matches(&[3, 3, 4, 4, 6]).is_empty());
    }

    #[test]
    fn get_by_name() {
        let t = table();
        assert_eq!(t.get("VENUS").map(|c| c.requires.len()), Some(4));
        assert!(t.get("senio").is_none());
    }

    #[test]
    fn json_is_a_plain_list() {
        let t = CombinationTable::new().with("canis", &[1, 1, 1, 1]);
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"[{"name":"canis","requires":[1,1,1,1]}]"#);
        let back: CombinationTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn combination_display() {
        let c = Combination::new("venus", &[1, 3, 4, 6]);
        insta::assert_snapshot!(c.to_string(), @"venus [1, 3, 4, 6]");
    }
}
