//! Frame driver
//!
//! Ties elapsed time, input, physics, and collisions together once per
//! platform frame. Input is polled on every call; the physics pass itself
//! sits behind a minimum-frame-time gate that approximates a fixed update
//! rate on fast displays.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::resolve_collisions;
use super::integrate::integrate;
use super::store::BodyStore;
use crate::config::SimConfig;
use crate::consts::{BODY_COUNT, BODY_MAX_RADIUS, BODY_MIN_RADIUS, MAX_FRAME_TIME};

/// Input flags for a single frame (edge triggers; the platform glue clears
/// them after the frame is processed)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flip the sticky gravity switch
    pub toggle_gravity: bool,
    /// Stop the simulation (window close / Escape)
    pub quit: bool,
}

/// Driver lifecycle. `Terminating` is terminal; the platform stops
/// scheduling frames once it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPhase {
    Running,
    Terminating,
}

/// Owns the body store, tuning, and RNG for one run
pub struct Simulation {
    pub config: SimConfig,
    pub store: BodyStore,
    pub phase: SimPhase,
    /// Sticky gravity switch, flipped by [`TickInput::toggle_gravity`]
    pub gravity_enabled: bool,
    /// Physics steps taken so far
    pub steps: u64,
    /// Run seed, logged for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Elapsed time waiting to be simulated (seconds)
    accumulator: f32,
}

impl Simulation {
    /// Build a simulation and spawn the startup set of bodies at RNG-chosen
    /// positions inside the arena, inset by their radius.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut store = BodyStore::with_capacity(BODY_COUNT);

        let arena = config.arena;
        for _ in 0..BODY_COUNT {
            let radius = rng.random_range(BODY_MIN_RADIUS..=BODY_MAX_RADIUS);
            let x = rng.random_range(arena.left() + radius..=arena.right() - radius);
            let y = rng.random_range(arena.bottom() + radius..=arena.top() - radius);
            store.create(Vec2::new(x, y), radius, true);
        }
        log::info!("Spawned {} bodies (seed {})", store.count(), seed);

        Self {
            config,
            store,
            phase: SimPhase::Running,
            gravity_enabled: true,
            steps: 0,
            seed,
            rng,
            accumulator: 0.0,
        }
    }

    /// Process one platform frame. Returns true when a physics step ran and
    /// the caller should draw.
    ///
    /// `elapsed` is seconds since the previous frame; negative values are
    /// treated as zero and stalls are capped so a long pause never turns
    /// into one huge catch-up step. While the accumulated time is below
    /// `min_frame_time` the physics pass is skipped, but quit and the
    /// gravity toggle are still handled.
    pub fn frame(&mut self, input: &TickInput, elapsed: f32) -> bool {
        if input.quit {
            self.request_stop();
        }
        if self.phase == SimPhase::Terminating {
            return false;
        }

        if input.toggle_gravity {
            self.gravity_enabled = !self.gravity_enabled;
            log::info!(
                "Gravity {}",
                if self.gravity_enabled { "on" } else { "off" }
            );
        }

        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_TIME);
        if self.accumulator < self.config.min_frame_time {
            return false;
        }

        let dt = (self.accumulator * self.config.time_scale).min(MAX_FRAME_TIME);
        self.accumulator = 0.0;
        self.step(dt);
        true
    }

    /// Advance physics by exactly `dt` seconds: integrate, then resolve.
    pub fn step(&mut self, dt: f32) {
        integrate(
            &mut self.store,
            &self.config,
            self.gravity_enabled,
            dt,
            &mut self.rng,
        );
        resolve_collisions(&mut self.store, &self.config, &mut self.rng);
        self.steps += 1;
    }

    /// Enter the terminal phase; frames become no-ops afterwards.
    pub fn request_stop(&mut self) {
        if self.phase != SimPhase::Terminating {
            log::info!("Simulation terminating after {} steps", self.steps);
            self.phase = SimPhase::Terminating;
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }
}
