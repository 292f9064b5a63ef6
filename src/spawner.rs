use std::f64::consts::TAU;

use log::debug;
use rand::Rng;

use crate::constants::*;
use crate::entities::Asteroid;
use crate::types::Vector2D;

/// Drops a large asteroid somewhere on the screen, unless `target` is already
/// at the asteroid cap.
pub fn spawn_random_asteroid(rng: &mut impl Rng, width: f64, height: f64, target: &mut Vec<Asteroid>) {
    if target.len() >= MAX_ASTEROIDS {
        debug!("Asteroid cap reached, random spawn dropped");
        return;
    }
    let position = Vector2D::new(random_coordinate(rng, width), random_coordinate(rng, height));
    spawn_asteroid(rng, position, LARGE_ASTEROID_SIZE, target);
}

// an empty range would panic in gen_range
fn random_coordinate(rng: &mut impl Rng, max: f64) -> f64 {
    if max > 0.0 { rng.gen_range(0.0..max) } else { 0.0 }
}

/// Builds one asteroid of `size` at `position` and appends it to `target`.
///
/// The caller owns the cap check, so children can be collected into a side
/// buffer while the live list is still being scanned.
pub fn spawn_asteroid(rng: &mut impl Rng, position: Vector2D, size: u8, target: &mut Vec<Asteroid>) {
    let tier = f64::from(size);
    let direction = rng.gen_range(0.0..TAU);
    let speed = ASTEROID_BASE_SPEED + tier * ASTEROID_SPEED_PER_SIZE;
    let asteroid = Asteroid {
        position,
        velocity: Vector2D::from_angle(direction) * speed,
        angle: 0.0,
        angular_velocity: rng.gen_range(-ASTEROID_MAX_SPIN..=ASTEROID_MAX_SPIN),
        size,
        model: generate_model(rng, size),
    };
    debug!("Spawned size {} asteroid at ({:.1}, {:.1})", size, position.x, position.y);
    target.push(asteroid);
}

/// Evenly spaced vertices around the centre, each pushed in or out from the
/// nominal radius by an independent random amount.
fn generate_model(rng: &mut impl Rng, size: u8) -> Vec<Vector2D> {
    let vertices = ASTEROID_BASE_VERTICES + usize::from(size) * ASTEROID_VERTICES_PER_SIZE;
    let radius = nominal_radius(size);
    let (min_radius, max_radius) = (
        radius * (1.0 - ASTEROID_RADIUS_JITTER),
        radius * (1.0 + ASTEROID_RADIUS_JITTER),
    );

    (0..vertices)
        .map(|i| {
            let theta = i as f64 / vertices as f64 * TAU;
            Vector2D::from_angle(theta) * rng.gen_range(min_radius..=max_radius)
        })
        .collect()
}

pub fn nominal_radius(size: u8) -> f64 {
    ASTEROID_BASE_RADIUS + f64::from(size) * ASTEROID_RADIUS_PER_SIZE
}
