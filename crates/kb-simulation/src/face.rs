//! Reading which face of a resting body points up.
//!
//! Every anchor's local up direction is rotated into world space and
//! compared against [`WORLD_UP`]. The anchor with the largest dot product
//! is the face on top; ties go to the anchor declared first.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;

use crate::anchor::AnchorSet;
use crate::body::Body;

/// The world's vertical axis.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// The best anchor for an orientation.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceChoice {
    /// Index into the anchor set.
    pub index: usize,
    /// Face name.
    pub name: String,
    /// Scored value.
    pub value: i32,
    /// Alignment with [`WORLD_UP`], in `-1.0..=1.0`.
    pub dot: f32,
    /// The anchor's direction in world space.
    pub world_up: Vec3,
}

/// Pick the anchor whose world direction is closest to vertical.
///
/// Returns `None` only when the set is empty.
pub fn best_face(orientation: Quat, anchors: &AnchorSet) -> Option<FaceChoice> {
    let mut best: Option<FaceChoice> = None;
    for (index, anchor) in anchors.iter().enumerate() {
        let world_up = (orientation * anchor.up).try_normalize().unwrap_or(WORLD_UP);
        let dot = world_up.dot(WORLD_UP);
        if best.as_ref().is_none_or(|b| dot > b.dot) {
            best = Some(FaceChoice {
                index,
                name: anchor.name.clone(),
                value: anchor.value,
                dot,
                world_up,
            });
        }
    }
    best
}

/// Orientation reached by rotating `orientation` so that `world_up`
/// lines up with [`WORLD_UP`] along the shortest arc.
pub fn snap_target(orientation: Quat, world_up: Vec3) -> Quat {
    let from = world_up.try_normalize().unwrap_or(WORLD_UP);
    let target = (Quat::from_rotation_arc(from, WORLD_UP) * orientation).normalize();
    if target.is_finite() { target } else { orientation }
}

/// What to do with a body that has come to rest.
#[derive(Debug, Clone, PartialEq)]
pub enum FaceDecision {
    /// A face is close enough to vertical; snap onto it.
    Lock(FaceChoice),
    /// The body rests on an edge or corner; knock it over.
    Nudge {
        /// Best alignment found, or `None` without any anchor.
        best_dot: Option<f32>,
    },
}

/// Lock the best face if its alignment reaches `dot_lock`.
pub fn decide(orientation: Quat, anchors: &AnchorSet, dot_lock: f32) -> FaceDecision {
    match best_face(orientation, anchors) {
        Some(choice) if choice.dot >= dot_lock => FaceDecision::Lock(choice),
        Some(choice) => FaceDecision::Nudge {
            best_dot: Some(choice.dot),
        },
        None => FaceDecision::Nudge { best_dot: None },
    }
}

/// Tip a body toward its nearest face, as gravity would topple it onto
/// a stable facet.
pub fn topple(body: &mut Body, anchors: &AnchorSet, rate: f32, dt: f32) {
    let Some(choice) = best_face(body.orientation, anchors) else {
        return;
    };
    // |axis| is the sine of the misalignment
    let axis = choice.world_up.cross(WORLD_UP);
    body.angular_velocity += axis * rate * dt;
}

/// Add a random horizontal spin of magnitude `spin` and an upward kick
/// of `lift`.
pub fn nudge<R: Rng + ?Sized>(body: &mut Body, rng: &mut R, spin: f32, lift: f32) {
    let angle = rng.random_range(0.0..TAU);
    let axis = Vec3::new(angle.cos(), 0.0, angle.sin());
    body.angular_velocity += axis * spin;
    body.linear_velocity.y += lift;
    body.settled_since = None;
}
