//! Scoring a finished throw.

use serde::{Deserialize, Serialize};

use crate::combination::CombinationTable;

/// The scored result of a throw: the face values, their sum, and every
/// combination they satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Outcome {
    /// Face value of each body, in body order.
    pub values: Vec<i32>,
    /// Sum of all values, saturating at the `i32` bounds.
    pub sum: i32,
    /// Names of the satisfied combinations, in table order.
    pub combos: Vec<String>,
}

impl Outcome {
    /// Score a set of face values against a combination table.
    ///
    /// The result does not depend on the order of `values` apart from
    /// `values` itself, which is kept as given.
    pub fn score(values: &[i32], table: &CombinationTable) -> Self {
        Self {
            values: values.to_vec(),
            sum: values.iter().fold(0i32, |acc, &v| acc.saturating_add(v)),
            combos: table.matches(values),
        }
    }

    /// Returns true if the named combination was satisfied.
    pub fn has_combo(&self, name: &str) -> bool {
        self.combos.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// The highest single value, or 0 if empty.
    pub fn highest(&self) -> i32 {
        self.values.iter().copied().max().unwrap_or(0)
    }

    /// The lowest single value, or 0 if empty.
    pub fn lowest(&self) -> i32 {
        self.values.iter().copied().min().unwrap_or(0)
    }

    /// How many bodies show `value`.
    pub fn count_of(&self, value: i32) -> usize {
        self.values.iter().filter(|&&v| v == value).count()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let values: Vec<String> = self.values.iter().map(i32::to_string).collect();
        write!(f, "[{}] = {}", values.join(", "), self.sum)?;
        if !self.combos.is_empty() {
            write!(f, " ({})", self.combos.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CombinationTable {
        CombinationTable::new()
            .with("pair", &[1, 1])
            .with("three of a kind", &[1, 1, 1])
    }

    #[test]
    fn sum_of_values() {
        let outcome = Outcome::score(&[1, 3, 4, 6, 1], &table());
        assert_eq!(outcome.sum, 15);
    }

    #[test]
    fn extreme_values_saturate_the_sum() {
        let high = Outcome::score(&[i32::MAX, 1, 6], &table());
        assert_eq!(high.sum, i32::MAX);
        let low = Outcome::score(&[i32::MIN, -1], &table());
        assert_eq!(low.sum, i32::MIN);
    }

    #[test]
    fn pair_matched_triple_not() {
        let outcome = Outcome::score(&[1, 1, 3, 4, 6], &table());
        assert!(outcome.has_combo("pair"));
        assert!(!outcome.has_combo("three of a kind"));
    }

    #[test]
    fn keeps_value_order() {
        let outcome = Outcome::score(&[6, 1, 4], &table());
        assert_eq!(outcome.values, vec![6, 1, 4]);
        assert_eq!(outcome.highest(), 6);
        assert_eq!(outcome.lowest(), 1);
        assert_eq!(outcome.count_of(1), 1);
    }

    #[test]
    fn empty_outcome() {
        let outcome = Outcome::default();
        assert_eq!(outcome.sum, 0);
        assert_eq!(outcome.highest(), 0);
        assert_eq!(outcome.lowest(), 0);
        assert!(outcome.combos.is_empty());
    }

    #[test]
    fn display_with_and_without_combos() {
        let matched = Outcome::score(&[1, 1, 3, 4, 6], &table());
        insta::assert_snapshot!(matched.to_string(), @"[1, 1, 3, 4, 6] = 15 (pair)");
        let plain = Outcome::score(&[3, 4], &table());
        insta::assert_snapshot!(plain.to_string(), @"[3, 4] = 7");
    }
}
