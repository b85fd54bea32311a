//! Pairwise circle collision resolution
//!
//! Every unordered pair of live bodies is tested each step, in increasing
//! (i, j) slot order, and each resolution is applied immediately — later
//! pairs in the same pass see the already-corrected positions and
//! velocities. There is no fixed-point iteration and no broad phase; the
//! body count is tens, so the O(n²) sweep is cheap.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::perturb_velocity;
use super::store::BodyStore;
use crate::config::SimConfig;

/// Contact normal used when two centers coincide exactly
const DEGENERATE_NORMAL: Vec2 = Vec2::X;

/// Reflect velocity off a surface: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Unit contact normal for a center-to-center delta, never NaN.
///
/// A zero-length delta (coincident centers) yields a fixed arbitrary axis;
/// the pair still separates and the perturbation kick breaks the symmetry
/// on the following step.
#[inline]
pub fn contact_normal(delta: Vec2) -> Vec2 {
    let normal = delta.normalize_or_zero();
    if normal == Vec2::ZERO {
        DEGENERATE_NORMAL
    } else {
        normal
    }
}

/// Separate and reflect every interpenetrating pair of bodies.
///
/// Separation is symmetric (half the overlap each, not mass-weighted) and
/// each body's velocity is reflected independently about the contact
/// normal — deliberately not a momentum-conserving two-body impulse.
pub fn resolve_collisions(store: &mut BodyStore, config: &SimConfig, rng: &mut Pcg32) {
    let slots = store.slot_count();

    for i in 0..slots {
        for j in (i + 1)..slots {
            let Some((a, b)) = store.pair_mut(i, j) else {
                continue;
            };

            let delta = a.pos - b.pos;
            let overlap = a.radius + b.radius - delta.length();
            if overlap <= 0.0 {
                continue;
            }

            let normal = contact_normal(delta);
            let push = normal * (overlap / 2.0);
            a.pos += push;
            b.pos -= push;

            a.vel = reflect(a.vel, normal);
            b.vel = reflect(b.vel, normal);
            perturb_velocity(&mut a.vel, config.perturbation, rng);
            perturb_velocity(&mut b.vel, config.perturbation, rng);
        }
    }
}
