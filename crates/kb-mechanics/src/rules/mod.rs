//! Rule sets: face values plus the combination table.
//!
//! A [`RuleSet`] is loaded once before the first throw and never changes
//! afterwards. It can be read from JSON via [`RuleSet::from_json`] or
//! taken from the presets in [`preset`].

pub mod preset;

use serde::{Deserialize, Serialize};

use crate::combination::CombinationTable;
use crate::error::{MechError, MechResult};
use crate::faces::{FaceValues, NO_FACE_VALUE};
use crate::outcome::Outcome;

/// Scoring rules for a set of knucklebones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Face name to value.
    pub faces: FaceValues,
    /// Named combinations, checked in order.
    #[serde(default)]
    pub combinations: CombinationTable,
}

impl RuleSet {
    /// Create a rule set from its parts.
    pub fn new(faces: FaceValues, combinations: CombinationTable) -> Self {
        Self {
            faces,
            combinations,
        }
    }

    /// Parse a rule set from a JSON document.
    ///
    /// Unknown top-level keys are ignored so the same document can also
    /// carry other setup data.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let rules: Self = serde_json::from_str(json)?;
        rules.check()?;
        Ok(rules)
    }

    /// Value of the named face, or [`NO_FACE_VALUE`] if it is unknown.
    pub fn value_of(&self, face: &str) -> i32 {
        self.faces.value_of(face).unwrap_or(NO_FACE_VALUE)
    }

    /// Score a finished throw.
    pub fn score(&self, values: &[i32]) -> Outcome {
        Outcome::score(values, &self.combinations)
    }

    /// Reject combinations that can never be satisfied.
    pub fn check(&self) -> MechResult<()> {
        for combo in self.combinations.iter() {
            if combo.requires.is_empty() {
                return Err(MechError::EmptyCombination(combo.name.clone()));
            }
            if let Some(&value) = combo.requires.iter().find(|&&v| !self.faces.produces(v)) {
                return Err(MechError::UnknownFace {
                    combination: combo.name.clone(),
                    value,
                });
            }
        }
        Ok(())
    }
}
