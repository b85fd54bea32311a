//! Deterministic simulation module
//!
//! All body motion lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by slot)
//! - No rendering or platform dependencies

pub mod collision;
pub mod integrate;
pub mod store;
pub mod tick;

pub use collision::{contact_normal, reflect, resolve_collisions};
pub use integrate::integrate;
pub use store::{Body, BodyId, BodyStore};
pub use tick::{SimPhase, Simulation, TickInput};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// Add a uniform random kick (±magnitude) to both velocity axes.
///
/// Draws nothing from the RNG when the magnitude is zero, so disabling the
/// kick leaves the random stream untouched.
pub(crate) fn perturb_velocity(vel: &mut Vec2, magnitude: f32, rng: &mut Pcg32) {
    if magnitude <= 0.0 {
        return;
    }
    vel.x += rng.random_range(-magnitude..=magnitude);
    vel.y += rng.random_range(-magnitude..=magnitude);
}
