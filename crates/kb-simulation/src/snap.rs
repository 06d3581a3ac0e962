//! Snap-to-face animation.
//!
//! Progress lives on the body and is advanced once per frame from wall
//! time, independent of the physics step.

use glam::Vec3;

use crate::body::{Body, SnapAnimation};
use crate::face::{FaceChoice, snap_target};

/// Start rotating `body` onto `choice`. Returns false if the body is
/// already resolved or snapping.
pub fn begin_snap(body: &mut Body, choice: &FaceChoice, now_ms: f64) -> bool {
    if body.resolved || body.is_snapping() {
        return false;
    }
    body.stop();
    body.snap = Some(SnapAnimation {
        from: body.orientation,
        to: snap_target(body.orientation, choice.world_up),
        started_ms: now_ms,
        face: choice.name.clone(),
        value: choice.value,
        progress: 0.0,
    });
    true
}

/// Advance the running snap. Returns true on the frame it completes and
/// the body becomes resolved.
pub fn advance_snap(body: &mut Body, now_ms: f64, duration_ms: f64) -> bool {
    let Some(snap) = body.snap.as_mut() else {
        return false;
    };
    body.angular_velocity = Vec3::ZERO;

    let t = if duration_ms > 0.0 {
        ((now_ms - snap.started_ms) / duration_ms).clamp(0.0, 1.0) as f32
    } else {
        1.0
    };
    snap.progress = t;
    if t < 1.0 {
        let eased = t * t * (3.0 - 2.0 * t);
        body.orientation = snap.from.slerp(snap.to, eased).normalize();
        return false;
    }

    body.orientation = snap.to;
    let face = snap.face.clone();
    let value = snap.value;
    body.resolve(Some(&face), value, false)
}
