use crate::bounds::TableBounds;
use crate::error::{SimError, SimResult};

/// Start layout and jitter ranges for a throw.
///
/// Bodies start in a staggered row above the near edge of the table and
/// are thrown toward the far edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrowConfig {
    /// Height above the floor of the lowest body at release.
    pub drop_height: f32,
    /// Extra height added per body index so bodies land one after another.
    pub height_stagger: f32,
    /// Spacing along x between neighbouring bodies.
    pub spacing: f32,
    /// Distance of the release line from the near edge.
    pub edge_offset: f32,
    /// Maximum random offset applied to x and z at release.
    pub position_jitter: f32,
    /// Speed toward the far edge.
    pub speed: f32,
    /// Maximum random deviation applied to each horizontal velocity component.
    pub speed_jitter: f32,
    /// Maximum spin (rad/s) around each axis.
    pub spin: f32,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            drop_height: 2.5,
            height_stagger: 0.3,
            spacing: 0.9,
            edge_offset: 0.8,
            position_jitter: 0.3,
            speed: 4.0,
            speed_jitter: 1.5,
            spin: 12.0,
        }
    }
}

/// Physics, timing, and layout parameters for a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// RNG seed for deterministic throws and nudges.
    pub seed: u64,
    /// Vertical acceleration (negative is down).
    pub gravity: f32,
    /// Radius shared by all bodies.
    pub radius: f32,
    /// Height of the floor plane.
    pub floor_y: f32,
    /// Fraction of vertical speed kept when bouncing off the floor.
    pub floor_restitution: f32,
    /// Fraction of outward speed kept when bouncing off a wall.
    pub wall_restitution: f32,
    /// Restitution of body-to-body contacts.
    pub body_restitution: f32,
    /// Horizontal velocity damping per second while touching the floor.
    pub floor_friction: f32,
    /// Angular velocity damping per second while touching the floor.
    pub angular_friction: f32,
    /// Velocity components below this magnitude are set to zero.
    pub velocity_epsilon: f32,
    /// Floor bounces slower than this are absorbed entirely.
    pub bounce_epsilon: f32,
    /// Bodies collide once their distance drops below `2 * radius * contact_slop`.
    pub contact_slop: f32,
    /// Combined linear + angular speed below which a body counts as still.
    pub settle_speed: f32,
    /// How long (ms) a body must stay still before its face is read.
    pub settle_ms: f64,
    /// Minimum alignment between a face anchor and world up to lock that face.
    pub dot_lock: f32,
    /// Spin (rad/s) added when a body rests on an edge.
    pub nudge_spin: f32,
    /// Upward speed added when a body rests on an edge.
    pub nudge_lift: f32,
    /// Angular acceleration (rad/s² per unit of misalignment) tipping a
    /// body on the floor toward its nearest face.
    pub topple_rate: f32,
    /// Duration (ms) of the snap-to-face animation.
    pub snap_ms: f64,
    /// Time (ms) after the throw at which unresolved bodies are forced onto a face.
    pub force_snap_ms: f64,
    /// Largest physics step (seconds) taken for a single frame.
    pub max_dt: f32,
    /// The playable floor rectangle.
    pub bounds: TableBounds,
    /// Throw layout.
    pub throw: ThrowConfig,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            gravity: -24.0,
            radius: 0.35,
            floor_y: 0.0,
            floor_restitution: 0.35,
            wall_restitution: 0.2,
            body_restitution: 0.4,
            floor_friction: 4.0,
            angular_friction: 5.0,
            velocity_epsilon: 0.02,
            bounce_epsilon: 0.6,
            contact_slop: 0.98,
            settle_speed: 0.15,
            settle_ms: 250.0,
            dot_lock: 0.985,
            nudge_spin: 4.0,
            nudge_lift: 1.0,
            topple_rate: 20.0,
            snap_ms: 220.0,
            force_snap_ms: 3000.0,
            max_dt: 1.0 / 30.0,
            bounds: TableBounds::default(),
            throw: ThrowConfig::default(),
            max_events: 0,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the table bounds.
    pub fn with_bounds(mut self, bounds: TableBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the force-snap timeout in milliseconds.
    pub fn with_force_snap_ms(mut self, ms: f64) -> Self {
        self.force_snap_ms = ms;
        self
    }

    /// Set the snap animation duration in milliseconds.
    pub fn with_snap_ms(mut self, ms: f64) -> Self {
        self.snap_ms = ms;
        self
    }

    /// Set the face lock threshold.
    pub fn with_dot_lock(mut self, dot: f32) -> Self {
        self.dot_lock = dot;
        self
    }

    /// Set the throw layout.
    pub fn with_throw(mut self, throw: ThrowConfig) -> Self {
        self.throw = throw;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Check that every parameter is in range.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid(format!("radius must be positive, got {}", self.radius)));
        }
        for (name, value) in [
            ("floor_restitution", self.floor_restitution),
            ("wall_restitution", self.wall_restitution),
            ("body_restitution", self.body_restitution),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} must be within [0, 1], got {value}")));
            }
        }
        if !(self.contact_slop > 0.0 && self.contact_slop <= 1.0) {
            return Err(invalid(format!(
                "contact_slop must be within (0, 1], got {}",
                self.contact_slop
            )));
        }
        for (name, value) in [
            ("snap_ms", self.snap_ms),
            ("force_snap_ms", self.force_snap_ms),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.max_dt.is_finite() && self.max_dt > 0.0) {
            return Err(invalid(format!("max_dt must be positive, got {}", self.max_dt)));
        }
        if !self.bounds.is_valid() {
            return Err(invalid(format!("table bounds are inverted: {:?}", self.bounds)));
        }
        Ok(())
    }
}

fn invalid(message: String) -> SimError {
    SimError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 42);
        assert!((config.dot_lock - 0.985).abs() < f32::EPSILON);
        assert!((config.force_snap_ms - 3000.0).abs() < f64::EPSILON);
        assert_eq!(config.max_events, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_seed(123)
            .with_force_snap_ms(1500.0)
            .with_snap_ms(100.0)
            .with_dot_lock(0.9)
            .with_max_events(50);
        assert_eq!(config.seed, 123);
        assert!((config.force_snap_ms - 1500.0).abs() < f64::EPSILON);
        assert!((config.snap_ms - 100.0).abs() < f64::EPSILON);
        assert!((config.dot_lock - 0.9).abs() < f32::EPSILON);
        assert_eq!(config.max_events, 50);
    }

    #[test]
    fn rejects_bad_radius() {
        let config = SimConfig {
            radius: 0.0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_amplifying_restitution() {
        let config = SimConfig {
            body_restitution: 1.5,
            ..SimConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("body_restitution"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = SimConfig::default().with_force_snap_ms(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_inverted_bounds() {
        let config = SimConfig::default().with_bounds(TableBounds::new(1.0, -1.0, 0.0, 1.0));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("inverted"));
    }
}
