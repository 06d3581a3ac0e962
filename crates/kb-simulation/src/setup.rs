//! The dice setup document: anchors, face values, and combinations.
//!
//! ```json
//! {
//!   "anchors": [{"name": "ventre", "up": [0, 1, 0]}],
//!   "faces": {"ventre": 3},
//!   "combinations": [{"name": "trias", "requires": [3, 3, 3]}]
//! }
//! ```

use glam::Vec3;
use kb_mechanics::rules::preset;
use kb_mechanics::{RuleSet, ValidationIssue, validate_rules};
use serde::{Deserialize, Serialize};

use crate::anchor::{AnchorSet, FaceAnchor};
use crate::body::BODY_COUNT;
use crate::error::{SimError, SimResult};

/// Everything the asset and configuration providers supply before the
/// first throw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiceSetup {
    /// Face anchor directions, in tie-break order.
    pub anchors: Vec<FaceAnchor>,
    /// Face values and combinations.
    #[serde(flatten)]
    pub rules: RuleSet,
}

impl DiceSetup {
    /// Parse a setup document and check its combinations.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let setup: Self = serde_json::from_str(json)?;
        setup.rules.check()?;
        Ok(setup)
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The classic astragalus: concave `ventre` on +Y, convex `dos` on -Y,
    /// flat `bassin` on +X, twisted `membres` on -X.
    pub fn classic() -> Self {
        let directions = [Vec3::Y, Vec3::NEG_Y, Vec3::X, Vec3::NEG_X];
        let anchors = preset::CLASSIC_FACES
            .iter()
            .zip(directions)
            .map(|(name, up)| FaceAnchor::new(*name, up))
            .collect();
        Self {
            anchors,
            rules: preset::classic(),
        }
    }

    /// Anchors paired with their values.
    pub fn anchor_set(&self) -> AnchorSet {
        AnchorSet::build(&self.anchors, &self.rules.faces)
    }

    /// Names of the declared anchors.
    pub fn anchor_names(&self) -> Vec<&str> {
        self.anchors.iter().map(|a| a.name.as_str()).collect()
    }

    /// Consistency report between anchors, faces, and combinations.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate_rules(&self.rules, &self.anchor_names(), BODY_COUNT)
    }

    /// Fail if any valued face lacks an anchor direction.
    pub fn ensure_complete(&self) -> SimResult<()> {
        let set = self.anchor_set();
        for name in self.rules.faces.names() {
            if !set.iter().any(|a| a.name == name) {
                return Err(SimError::MissingAnchor(name.to_string()));
            }
        }
        Ok(())
    }
}

impl Default for DiceSetup {
    fn default() -> Self {
        Self::classic()
    }
}
