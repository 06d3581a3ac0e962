//! Start positions for thrown and idle bodies.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;

use crate::body::{BODY_COUNT, Body};
use crate::config::SimConfig;
use crate::integrator::confine;

/// Bodies in a staggered row above the near edge, launched toward the
/// far edge with jittered position, velocity, spin, and orientation.
pub fn throw_layout<R: Rng + ?Sized>(config: &SimConfig, rng: &mut R) -> [Body; BODY_COUNT] {
    let throw = &config.throw;
    let (center_x, _) = config.bounds.center();
    let release_z = config.bounds.max_z - throw.edge_offset;
    let base_y = config.floor_y + config.radius + throw.drop_height;

    std::array::from_fn(|i| {
        let slot = i as f32 - (BODY_COUNT as f32 - 1.0) * 0.5;
        let position = Vec3::new(
            center_x + slot * throw.spacing + jitter(rng, throw.position_jitter),
            base_y + i as f32 * throw.height_stagger,
            release_z + jitter(rng, throw.position_jitter),
        );
        let mut body = Body::new(position, config.radius);
        body.orientation = random_orientation(rng);
        body.linear_velocity = Vec3::new(
            jitter(rng, throw.speed_jitter),
            0.0,
            -(throw.speed + jitter(rng, throw.speed_jitter).abs()),
        );
        body.angular_velocity = Vec3::new(
            jitter(rng, throw.spin),
            jitter(rng, throw.spin),
            jitter(rng, throw.spin),
        );
        confine(&mut body, &config.bounds, 0.0);
        body
    })
}

/// Bodies resting in a row across the table center, unrotated.
pub fn neutral_layout(config: &SimConfig) -> [Body; BODY_COUNT] {
    let (center_x, center_z) = config.bounds.center();
    std::array::from_fn(|i| {
        let slot = i as f32 - (BODY_COUNT as f32 - 1.0) * 0.5;
        let position = Vec3::new(
            center_x + slot * config.throw.spacing,
            config.floor_y + config.radius,
            center_z,
        );
        let mut body = Body::new(position, config.radius);
        confine(&mut body, &config.bounds, 0.0);
        body
    })
}

/// Uniformly distributed rotation (Shoemake's method).
pub fn random_orientation<R: Rng + ?Sized>(rng: &mut R) -> Quat {
    let u1: f32 = rng.random();
    let a = rng.random::<f32>() * TAU;
    let b = rng.random::<f32>() * TAU;
    let s1 = (1.0 - u1).sqrt();
    let s2 = u1.sqrt();
    let q = Quat::from_xyzw(s1 * a.sin(), s1 * a.cos(), s2 * b.sin(), s2 * b.cos()).normalize();
    if q.is_finite() { q } else { Quat::IDENTITY }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> f32 {
    if amount > 0.0 {
        rng.random_range(-amount..=amount)
    } else {
        0.0
    }
}
