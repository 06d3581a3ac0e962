//! Pairwise body-to-body contact in the horizontal plane.
//!
//! Each body is a circle of its radius in the (x, z) plane. Pairs are
//! visited once per frame in a fixed nested-loop order with no iterative
//! relaxation; leftover overlap is corrected on later frames.

use glam::Vec2;

use crate::body::Body;
use crate::config::SimConfig;
use crate::integrator::confine;

/// Resolve every overlapping pair once. Returns the number of contacts.
///
/// Bodies that are resolved or snapping do not move; a free body touching
/// one takes the whole separation and bounces off it.
pub fn resolve_collisions(bodies: &mut [Body], config: &SimConfig) -> usize {
    let mut contacts = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if resolve_pair(a, b, config.body_restitution, config.contact_slop) {
                contacts += 1;
            }
        }
    }
    if contacts > 0 {
        for body in bodies.iter_mut() {
            confine(body, &config.bounds, config.wall_restitution);
        }
    }
    contacts
}

/// Separate two overlapping bodies and exchange an equal and opposite
/// impulse along the contact normal. Returns false if they do not touch.
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f32, slop: f32) -> bool {
    let pinned_a = a.resolved || a.is_snapping();
    let pinned_b = b.resolved || b.is_snapping();
    if pinned_a && pinned_b {
        return false;
    }

    let delta = Vec2::new(b.position.x - a.position.x, b.position.z - a.position.z);
    let reach = (a.radius + b.radius) * slop;
    let distance = delta.length();
    if !distance.is_finite() || distance >= reach {
        return false;
    }

    // coincident centers
    let normal = delta.try_normalize().unwrap_or(Vec2::X);
    let overlap = reach - distance;
    let (share_a, share_b) = match (pinned_a, pinned_b) {
        (true, _) => (0.0, overlap),
        (_, true) => (overlap, 0.0),
        _ => (overlap * 0.5, overlap * 0.5),
    };
    a.position.x -= normal.x * share_a;
    a.position.z -= normal.y * share_a;
    b.position.x += normal.x * share_b;
    b.position.z += normal.y * share_b;

    let va = Vec2::new(a.linear_velocity.x, a.linear_velocity.z);
    let vb = Vec2::new(b.linear_velocity.x, b.linear_velocity.z);
    let approach = (vb - va).dot(normal);
    if approach >= 0.0 {
        return true;
    }

    if pinned_a {
        let dv = -(1.0 + restitution) * approach * normal;
        b.linear_velocity.x += dv.x;
        b.linear_velocity.z += dv.y;
    } else if pinned_b {
        let dv = -(1.0 + restitution) * approach * normal;
        a.linear_velocity.x -= dv.x;
        a.linear_velocity.z -= dv.y;
    } else {
        let impulse = -(1.0 + restitution) * approach * 0.5 * normal;
        a.linear_velocity.x -= impulse.x;
        a.linear_velocity.z -= impulse.y;
        b.linear_velocity.x += impulse.x;
        b.linear_velocity.z += impulse.y;
    }
    true
}
