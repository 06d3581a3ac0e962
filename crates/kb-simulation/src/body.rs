//! Per-body kinematic state.

use glam::{Quat, Vec3};

/// Number of knucklebones thrown per round.
pub const BODY_COUNT: usize = 5;

/// An in-progress rotation onto a locked face.
///
/// Stored on the body and advanced once per frame until `progress`
/// reaches 1.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapAnimation {
    /// Orientation when the snap began.
    pub from: Quat,
    /// Orientation with the chosen face pointing straight up.
    pub to: Quat,
    /// Timestamp (ms) when the snap began.
    pub started_ms: f64,
    /// Name of the chosen face.
    pub face: String,
    /// Value the body resolves to when the snap completes.
    pub value: i32,
    /// Completion in `0.0..=1.0`.
    pub progress: f32,
}

/// One simulated knucklebone.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Center position in world space.
    pub position: Vec3,
    /// World-space orientation.
    pub orientation: Quat,
    /// Linear velocity (units/s).
    pub linear_velocity: Vec3,
    /// Angular velocity as a scaled axis (rad/s).
    pub angular_velocity: Vec3,
    /// Collision radius.
    pub radius: f32,
    /// Timestamp (ms) since which the body has been continuously still.
    pub settled_since: Option<f64>,
    /// Whether the body has been snapped onto a face.
    pub resolved: bool,
    /// Scored value; meaningful only once `resolved` is set.
    pub value: i32,
    /// Name of the face the body resolved to, if any anchor was found.
    pub face: Option<String>,
    /// Whether the body was resolved by the timeout rather than by settling.
    pub forced: bool,
    /// Snap animation in progress, if any.
    pub snap: Option<SnapAnimation>,
}

impl Body {
    /// A motionless, unresolved body at `position` with identity orientation.
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            radius,
            settled_since: None,
            resolved: false,
            value: 0,
            face: None,
            forced: false,
            snap: None,
        }
    }

    /// Combined linear and angular speed used for settle detection.
    pub fn speed(&self) -> f32 {
        self.linear_velocity.length() + self.angular_velocity.length()
    }

    /// Returns true while a snap animation is running.
    pub fn is_snapping(&self) -> bool {
        self.snap.is_some()
    }

    /// Returns true if the bottom of the body touches the floor.
    pub fn on_floor(&self, floor_y: f32) -> bool {
        self.position.y - self.radius <= floor_y + 1e-4
    }

    /// Zero both velocities.
    pub fn stop(&mut self) {
        self.linear_velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    /// Mark the body resolved. Returns false (and changes nothing) if it
    /// already was.
    pub fn resolve(&mut self, face: Option<&str>, value: i32, forced: bool) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        self.value = value;
        self.face = face.map(str::to_string);
        self.forced = forced;
        self.snap = None;
        true
    }

    /// Position and orientation for rendering.
    pub fn pose(&self) -> BodyPose {
        BodyPose {
            position: self.position,
            orientation: self.orientation,
        }
    }
}

/// What a renderer needs to draw one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPose {
    /// Center position in world space.
    pub position: Vec3,
    /// World-space orientation.
    pub orientation: Quat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_body_is_still_and_unresolved() {
        let body = Body::new(Vec3::new(1.0, 0.35, 0.0), 0.35);
        assert_eq!(body.speed(), 0.0);
        assert!(!body.resolved);
        assert!(body.settled_since.is_none());
        assert!(body.on_floor(0.0));
    }

    #[test]
    fn speed_adds_linear_and_angular() {
        let mut body = Body::new(Vec3::ZERO, 0.35);
        body.linear_velocity = Vec3::new(3.0, 4.0, 0.0);
        body.angular_velocity = Vec3::new(0.0, 0.0, 2.0);
        assert!((body.speed() - 7.0).abs() < 1e-6);
    }

    #[test]
    fn resolve_only_once() {
        let mut body = Body::new(Vec3::ZERO, 0.35);
        assert!(body.resolve(Some("dos"), 4, false));
        assert!(!body.resolve(Some("ventre"), 3, true));
        assert_eq!(body.value, 4);
        assert_eq!(body.face.as_deref(), Some("dos"));
        assert!(!body.forced);
    }

    #[test]
    fn airborne_body_is_not_on_floor() {
        let body = Body::new(Vec3::new(0.0, 2.0, 0.0), 0.35);
        assert!(!body.on_floor(0.0));
    }
}
