//! Face anchors: the local "up" direction of each named face.
//!
//! Anchor directions come from the 3D model's named sub-transforms; the
//! simulation only needs the resulting direction vectors. Each anchor is
//! paired with its scored value once, at setup, and never changes.

use glam::Vec3;
use kb_mechanics::FaceValues;
use kb_mechanics::faces::normalize;
use serde::{Deserialize, Serialize};

/// Local-space direction that points straight up when the named face
/// lies on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceAnchor {
    /// Face name, matched case-insensitively against the face values.
    pub name: String,
    /// Local up direction. Need not be normalized.
    pub up: Vec3,
}

impl FaceAnchor {
    /// Create an anchor.
    pub fn new(name: impl Into<String>, up: Vec3) -> Self {
        Self {
            name: name.into(),
            up,
        }
    }
}

/// An anchor ready for face resolution: normalized direction plus value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAnchor {
    /// Canonical face name.
    pub name: String,
    /// Unit local up direction.
    pub up: Vec3,
    /// Scored value.
    pub value: i32,
}

/// The anchors shared by all five bodies, in declaration order.
///
/// Declaration order breaks ties during face resolution: the first anchor
/// wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSet {
    anchors: Vec<ScoredAnchor>,
}

impl AnchorSet {
    /// Pair anchors with their values.
    ///
    /// Anchors without a value are skipped, as are repeated names (the
    /// first declaration is kept). A zero-length direction is replaced by
    /// the local +Y axis.
    pub fn build(anchors: &[FaceAnchor], faces: &FaceValues) -> Self {
        let mut scored: Vec<ScoredAnchor> = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            let name = normalize(&anchor.name);
            let Some(value) = faces.value_of(&name) else {
                continue;
            };
            if scored.iter().any(|a| a.name == name) {
                continue;
            }
            scored.push(ScoredAnchor {
                name,
                up: anchor.up.try_normalize().unwrap_or(Vec3::Y),
                value,
            });
        }
        Self { anchors: scored }
    }

    /// Iterate over the anchors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ScoredAnchor> {
        self.anchors.iter()
    }

    /// Anchor at `index`.
    pub fn get(&self, index: usize) -> Option<&ScoredAnchor> {
        self.anchors.get(index)
    }

    /// Number of usable anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Returns true if no anchor is usable.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}
