//! Forced resolution once a round has run too long.
//!
//! After the timeout every unresolved body is placed on its best face
//! immediately, whatever the alignment, so a body rocking on an edge can
//! never stall the round.

use kb_mechanics::NO_FACE_VALUE;

use crate::anchor::AnchorSet;
use crate::body::Body;
use crate::config::SimConfig;
use crate::face::{best_face, snap_target};
use crate::integrator::confine;

/// Returns true once `timeout_ms` has elapsed since the throw.
pub fn force_snap_due(thrown_at_ms: f64, now_ms: f64, timeout_ms: f64) -> bool {
    now_ms - thrown_at_ms >= timeout_ms
}

/// The face a body was forced onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForcedFace {
    /// Face name, or `None` when no anchor was available.
    pub face: Option<String>,
    /// Scored value ([`NO_FACE_VALUE`] without an anchor).
    pub value: i32,
}

/// Stop the body, drop it onto the floor, and resolve it without
/// animation.
///
/// A snap already in progress jumps to its own target. Otherwise the
/// best anchor is used regardless of alignment. With no anchor at all
/// the body stays unrotated and scores [`NO_FACE_VALUE`]. Returns `None`
/// if the body was already resolved.
pub fn force_resolve(
    body: &mut Body,
    anchors: &AnchorSet,
    config: &SimConfig,
) -> Option<ForcedFace> {
    if body.resolved {
        return None;
    }
    body.stop();
    body.settled_since = None;
    // resolved bodies are never integrated again
    body.position.y = config.floor_y + body.radius;
    confine(body, &config.bounds, 0.0);

    let forced = if let Some(snap) = body.snap.take() {
        body.orientation = snap.to;
        ForcedFace {
            face: Some(snap.face),
            value: snap.value,
        }
    } else if let Some(choice) = best_face(body.orientation, anchors) {
        body.orientation = snap_target(body.orientation, choice.world_up);
        ForcedFace {
            face: Some(choice.name),
            value: choice.value,
        }
    } else {
        ForcedFace {
            face: None,
            value: NO_FACE_VALUE,
        }
    };

    body.resolve(forced.face.as_deref(), forced.value, true);
    Some(forced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::{WORLD_UP, best_face};
    use crate::setup::DiceSetup;
    use crate::snap::begin_snap;
    use glam::{Quat, Vec3};
    use std::f32::consts::FRAC_PI_4;

    fn rocking() -> Body {
        let mut body = Body::new(Vec3::new(0.0, 0.35, 0.0), 0.35);
        // resting on the ventre/bassin edge, leaning toward ventre
        body.orientation = Quat::from_rotation_z(FRAC_PI_4 - 0.1);
        body.angular_velocity = Vec3::new(1.0, 0.0, 0.0);
        body
    }

    #[test]
    fn due_at_timeout() {
        assert!(!force_snap_due(1000.0, 3999.0, 3000.0));
        assert!(force_snap_due(1000.0, 4000.0, 3000.0));
    }

    #[test]
    fn edge_body_forced_onto_best_face() {
        let anchors = DiceSetup::classic().anchor_set();
        let mut body = rocking();
        let forced = force_resolve(&mut body, &anchors, &SimConfig::default()).unwrap();
        assert_eq!(forced.face.as_deref(), Some("ventre"));
        assert_eq!(forced.value, 3);
        assert!(body.resolved);
        assert!(body.forced);
        assert_eq!(body.angular_velocity, Vec3::ZERO);
        assert!(((body.orientation * Vec3::Y) - WORLD_UP).length() < 1e-4);
    }

    #[test]
    fn running_snap_finishes_on_its_target() {
        let anchors = DiceSetup::classic().anchor_set();
        let mut body = rocking();
        let choice = best_face(Quat::from_rotation_x(0.05), &anchors).unwrap();
        body.orientation = Quat::from_rotation_x(0.05);
        begin_snap(&mut body, &choice, 0.0);
        let target = body.snap.as_ref().unwrap().to;

        let forced = force_resolve(&mut body, &anchors, &SimConfig::default()).unwrap();
        assert_eq!(forced.value, choice.value);
        assert_eq!(body.orientation, target);
        assert!(body.snap.is_none());
    }

    #[test]
    fn airborne_body_lands_on_the_floor() {
        let config = SimConfig::default();
        let anchors = DiceSetup::classic().anchor_set();
        let mut body = rocking();
        body.position = Vec3::new(9.0, 3.2, 0.0);
        body.linear_velocity = Vec3::new(1.0, 4.0, 0.0);
        force_resolve(&mut body, &anchors, &config).unwrap();
        assert_eq!(body.position.y, config.floor_y + config.radius);
        assert!(config.bounds.contains(body.position.x, body.position.z));
        assert_eq!(body.linear_velocity, Vec3::ZERO);
    }

    #[test]
    fn no_anchor_gives_sentinel() {
        let mut body = rocking();
        let before = body.orientation;
        let config = SimConfig::default();
        let forced = force_resolve(&mut body, &AnchorSet::default(), &config).unwrap();
        assert_eq!(forced.value, NO_FACE_VALUE);
        assert_eq!(forced.face, None);
        assert!(body.resolved);
        assert_eq!(body.orientation, before);
    }

    #[test]
    fn resolved_body_untouched() {
        let mut body = rocking();
        body.resolve(Some("dos"), 4, false);
        let anchors = DiceSetup::classic().anchor_set();
        let forced = force_resolve(&mut body, &anchors, &SimConfig::default());
        assert_eq!(forced, None);
        assert_eq!(body.value, 4);
        assert!(!body.forced);
    }
}
