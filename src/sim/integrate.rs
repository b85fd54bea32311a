//! Velocity/position integration and wall bounces
//!
//! One pass over the store per physics step. Per body, in order: gravity,
//! friction, speed clamp, position step, then wall resolution one axis at a
//! time. Each of the four walls is tested independently, so a body driven
//! into a corner is corrected on both axes in the same step.

use rand_pcg::Pcg32;

use super::perturb_velocity;
use super::store::BodyStore;
use crate::config::SimConfig;

/// Advance every body by `dt` seconds and keep it inside the arena.
///
/// Assumes `dt >= 0`; the frame driver clamps negative elapsed time before
/// it gets here. After this pass every body's center is at least one radius
/// from each wall, up to the perturbation kick injected after a bounce.
pub fn integrate(
    store: &mut BodyStore,
    config: &SimConfig,
    gravity_enabled: bool,
    dt: f32,
    rng: &mut Pcg32,
) {
    debug_assert!(dt >= 0.0, "elapsed time must be non-negative");

    let arena = config.arena;

    for (_, body) in store.iter_mut() {
        if body.affected_by_gravity && gravity_enabled {
            body.vel.y -= config.gravity * dt;
        }

        body.vel *= config.friction;
        body.vel = body.vel.clamp_length_max(config.max_speed);

        body.pos += body.vel * dt;

        if body.pos.x - body.radius < arena.left() {
            body.pos.x = arena.left() + body.radius;
            body.vel.x = -body.vel.x * config.restitution;
            perturb_velocity(&mut body.vel, config.perturbation, rng);
        }
        if body.pos.x + body.radius > arena.right() {
            body.pos.x = arena.right() - body.radius;
            body.vel.x = -body.vel.x * config.restitution;
            perturb_velocity(&mut body.vel, config.perturbation, rng);
        }
        if body.pos.y - body.radius < arena.bottom() {
            body.pos.y = arena.bottom() + body.radius;
            body.vel.y = -body.vel.y * config.restitution;
            perturb_velocity(&mut body.vel, config.perturbation, rng);
        }
        if body.pos.y + body.radius > arena.top() {
            body.pos.y = arena.top() - body.radius;
            body.vel.y = -body.vel.y * config.restitution;
            perturb_velocity(&mut body.vel, config.perturbation, rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 120.0;

    /// Default tuning with the random kick disabled, for exact assertions
    fn quiet_config() -> SimConfig {
        SimConfig {
            perturbation: 0.0,
            ..SimConfig::default()
        }
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_gravity_applies_only_when_flagged_and_enabled() {
        let config = quiet_config();
        let mut store = BodyStore::new();
        let heavy = store.create(Vec2::ZERO, 10.0, true);
        let floaty = store.create(Vec2::new(100.0, 0.0), 10.0, false);

        integrate(&mut store, &config, true, DT, &mut rng());
        let expected = -config.gravity * DT * config.friction;
        assert!((store.get(heavy).unwrap().vel.y - expected).abs() < 1e-4);
        assert_eq!(store.get(floaty).unwrap().vel.y, 0.0);

        // Gravity disabled: nobody accelerates
        let mut store = BodyStore::new();
        let heavy = store.create(Vec2::ZERO, 10.0, true);
        integrate(&mut store, &config, false, DT, &mut rng());
        assert_eq!(store.get(heavy).unwrap().vel.y, 0.0);
    }

    #[test]
    fn test_friction_monotonically_reduces_speed() {
        let config = quiet_config();
        let mut store = BodyStore::new();
        let id = store.create(Vec2::ZERO, 10.0, false);
        store.get_mut(id).unwrap().vel = Vec2::new(120.0, -45.0);

        let before = store.get(id).unwrap().vel.length();
        integrate(&mut store, &config, false, DT, &mut rng());
        let after = store.get(id).unwrap().vel.length();

        assert!((after - before * config.friction).abs() < 1e-3);
        assert!(after < before);
    }

    #[test]
    fn test_speed_clamped_to_max() {
        let config = quiet_config();
        let mut store = BodyStore::new();
        let id = store.create(Vec2::ZERO, 10.0, false);
        store.get_mut(id).unwrap().vel = Vec2::new(4000.0, -3000.0);

        integrate(&mut store, &config, false, DT, &mut rng());
        let vel = store.get(id).unwrap().vel;
        assert!(vel.length() <= config.max_speed + 1e-3);
        // Direction is preserved by the clamp
        assert!(vel.x > 0.0 && vel.y < 0.0);
    }

    #[test]
    fn test_wall_reflects_and_clamps_position() {
        let config = quiet_config();
        let arena = config.arena;
        let mut store = BodyStore::new();
        // Center already past the left wall allowance
        let id = store.create(Vec2::new(arena.left() + 4.0, 0.0), 10.0, false);
        store.get_mut(id).unwrap().vel = Vec2::new(-50.0, 0.0);

        integrate(&mut store, &config, false, 0.0, &mut rng());
        let body = store.get(id).unwrap();
        assert_eq!(body.pos.x, arena.left() + body.radius);
        let expected = 50.0 * config.friction * config.restitution;
        assert!((body.vel.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_corner_corrects_both_axes_in_one_step() {
        let config = quiet_config();
        let arena = config.arena;
        let mut store = BodyStore::new();
        let id = store.create(Vec2::new(arena.right() - 2.0, arena.top() - 2.0), 10.0, false);
        store.get_mut(id).unwrap().vel = Vec2::new(30.0, 40.0);

        integrate(&mut store, &config, false, 0.0, &mut rng());
        let body = store.get(id).unwrap();
        assert_eq!(body.pos.x, arena.right() - body.radius);
        assert_eq!(body.pos.y, arena.top() - body.radius);
        assert!(body.vel.x < 0.0);
        assert!(body.vel.y < 0.0);
    }

    #[test]
    fn test_zero_dt_leaves_position_unchanged() {
        let config = quiet_config();
        let mut store = BodyStore::new();
        let id = store.create(Vec2::new(50.0, 60.0), 10.0, true);
        store.get_mut(id).unwrap().vel = Vec2::new(200.0, 200.0);

        integrate(&mut store, &config, true, 0.0, &mut rng());
        assert_eq!(store.get(id).unwrap().pos, Vec2::new(50.0, 60.0));
    }

    proptest! {
        /// After any single step: speed capped, body inside the walls
        #[test]
        fn prop_step_clamps_speed_and_contains_body(
            px in -500.0f32..500.0,
            py in -400.0f32..400.0,
            vx in -5000.0f32..5000.0,
            vy in -5000.0f32..5000.0,
        ) {
            let config = quiet_config();
            let arena = config.arena;
            let mut store = BodyStore::new();
            let id = store.create(Vec2::new(px, py), 10.0, true);
            store.get_mut(id).unwrap().vel = Vec2::new(vx, vy);

            integrate(&mut store, &config, true, DT, &mut rng());

            let body = store.get(id).unwrap();
            prop_assert!(body.vel.length() <= config.max_speed + 1e-3);
            prop_assert!(body.pos.x - body.radius >= arena.left() - 1e-3);
            prop_assert!(body.pos.x + body.radius <= arena.right() + 1e-3);
            prop_assert!(body.pos.y - body.radius >= arena.bottom() - 1e-3);
            prop_assert!(body.pos.y + body.radius <= arena.top() + 1e-3);
        }
    }
}
