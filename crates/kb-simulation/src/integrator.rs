//! Per-body time integration: gravity, floor and wall contact, friction.

use glam::{Quat, Vec3};

use crate::body::Body;
use crate::bounds::TableBounds;
use crate::config::SimConfig;

/// Advance one body by `dt` seconds.
///
/// Applies gravity, integrates position and orientation, resolves floor
/// and wall contact, damps velocities while on the floor, and zeroes
/// velocity components inside the dead-zone. Resolved and snapping
/// bodies are held in place.
pub fn integrate(body: &mut Body, dt: f32, config: &SimConfig) {
    if body.resolved || body.is_snapping() {
        body.stop();
        return;
    }

    body.linear_velocity.y += config.gravity * dt;
    body.position += body.linear_velocity * dt;

    let rotated = (Quat::from_scaled_axis(body.angular_velocity * dt) * body.orientation).normalize();
    if rotated.is_finite() {
        body.orientation = rotated;
    }

    floor_contact(body, dt, config);
    confine(body, &config.bounds, config.wall_restitution);
    dead_zone(body, config.velocity_epsilon);
    sanitize(body, config);
}

fn floor_contact(body: &mut Body, dt: f32, config: &SimConfig) {
    let rest_y = config.floor_y + body.radius;
    if body.position.y > rest_y {
        return;
    }
    body.position.y = rest_y;
    if body.linear_velocity.y < 0.0 {
        let bounced = -body.linear_velocity.y * config.floor_restitution;
        body.linear_velocity.y = if bounced < config.bounce_epsilon {
            0.0
        } else {
            bounced
        };
    }

    let linear = (1.0 - config.floor_friction * dt).max(0.0);
    body.linear_velocity.x *= linear;
    body.linear_velocity.z *= linear;
    body.angular_velocity *= (1.0 - config.angular_friction * dt).max(0.0);
}

/// Clamp a body inside the table bounds, reflecting any outward velocity
/// component scaled by `restitution`.
pub fn confine(body: &mut Body, bounds: &TableBounds, restitution: f32) {
    let (min_x, max_x) = bounds.x_range(body.radius);
    let (min_z, max_z) = bounds.z_range(body.radius);

    if body.position.x < min_x {
        body.position.x = min_x;
        if body.linear_velocity.x < 0.0 {
            body.linear_velocity.x = -body.linear_velocity.x * restitution;
        }
    } else if body.position.x > max_x {
        body.position.x = max_x;
        if body.linear_velocity.x > 0.0 {
            body.linear_velocity.x = -body.linear_velocity.x * restitution;
        }
    }

    if body.position.z < min_z {
        body.position.z = min_z;
        if body.linear_velocity.z < 0.0 {
            body.linear_velocity.z = -body.linear_velocity.z * restitution;
        }
    } else if body.position.z > max_z {
        body.position.z = max_z;
        if body.linear_velocity.z > 0.0 {
            body.linear_velocity.z = -body.linear_velocity.z * restitution;
        }
    }
}

fn dead_zone(body: &mut Body, epsilon: f32) {
    let snap = |v: Vec3| {
        Vec3::new(
            if v.x.abs() < epsilon { 0.0 } else { v.x },
            if v.y.abs() < epsilon { 0.0 } else { v.y },
            if v.z.abs() < epsilon { 0.0 } else { v.z },
        )
    };
    body.linear_velocity = snap(body.linear_velocity);
    body.angular_velocity = snap(body.angular_velocity);
}

/// Replace any non-finite state with a motionless body resting at the
/// table center.
fn sanitize(body: &mut Body, config: &SimConfig) {
    if !body.linear_velocity.is_finite() {
        body.linear_velocity = Vec3::ZERO;
    }
    if !body.angular_velocity.is_finite() {
        body.angular_velocity = Vec3::ZERO;
    }
    if !body.position.is_finite() {
        let (x, z) = config.bounds.center();
        body.position = Vec3::new(x, config.floor_y + body.radius, z);
        body.stop();
    }
    if !body.orientation.is_finite() {
        body.orientation = Quat::IDENTITY;
    }
}
