//! Counted multisets of face values.

use std::collections::BTreeMap;

/// How many times each value occurs in a collection of rolled values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueCounts {
    counts: BTreeMap<i32, u32>,
}

impl ValueCounts {
    /// Count the occurrences of each value.
    pub fn from_values(values: &[i32]) -> Self {
        let mut counts = BTreeMap::new();
        for &v in values {
            *counts.entry(v).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// How many times `value` occurs.
    pub fn count(&self, value: i32) -> u32 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Total number of values counted.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Returns true if every value in `required` occurs here at least as often.
    pub fn contains(&self, required: &ValueCounts) -> bool {
        required
            .counts
            .iter()
            .all(|(value, needed)| self.count(*value) >= *needed)
    }

    /// Iterate over `(value, count)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.counts.iter().map(|(v, c)| (*v, *c))
    }
}
