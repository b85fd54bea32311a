//! Simulation tuning and arena geometry
//!
//! All physics tuning lives in [`SimConfig`] and is passed into the
//! simulation at construction instead of living in mutable globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangular arena, y-up (floor at `min.y`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Bottom-left corner
    pub min: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(min: Vec2, width: f32, height: f32) -> Self {
        Self { min, width, height }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + Vec2::new(self.width, self.height) / 2.0
    }

    /// True if a circle of `radius` at `pos` fits entirely inside the walls
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= self.left()
            && pos.x + radius <= self.right()
            && pos.y - radius >= self.bottom()
            && pos.y + radius <= self.top()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(Vec2::new(-400.0, -300.0), 800.0, 600.0)
    }
}

/// Physics tuning for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Forces ===
    /// Downward acceleration magnitude (units/s², applied along -y when enabled)
    pub gravity: f32,
    /// Per-step velocity decay factor, in (0, 1)
    pub friction: f32,
    /// Fraction of perpendicular velocity retained after a wall bounce
    pub restitution: f32,
    /// Velocity magnitude clamp (units/s)
    pub max_speed: f32,

    // === Geometry ===
    /// Arena walls
    pub arena: Arena,

    // === Jitter ===
    /// Uniform random velocity kick (±units/s) injected after bounces.
    /// Zero disables the kick entirely and keeps runs reproducible.
    pub perturbation: f32,

    // === Loop ===
    /// Multiplier on elapsed time before integration
    pub time_scale: f32,
    /// Minimum elapsed time before a physics step runs (seconds)
    pub min_frame_time: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 400.0,
            friction: 0.995,
            restitution: 0.85,
            max_speed: 600.0,

            arena: Arena::default(),

            perturbation: 0.05,

            time_scale: 1.0,
            min_frame_time: 1.0 / 120.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_edges() {
        let arena = Arena::new(Vec2::new(-10.0, -20.0), 100.0, 50.0);
        assert_eq!(arena.left(), -10.0);
        assert_eq!(arena.right(), 90.0);
        assert_eq!(arena.bottom(), -20.0);
        assert_eq!(arena.top(), 30.0);
        assert_eq!(arena.center(), Vec2::new(40.0, 5.0));
    }

    #[test]
    fn test_arena_contains_circle() {
        let arena = Arena::new(Vec2::ZERO, 100.0, 100.0);
        assert!(arena.contains_circle(Vec2::new(50.0, 50.0), 10.0));
        assert!(arena.contains_circle(Vec2::new(10.0, 10.0), 10.0));
        assert!(!arena.contains_circle(Vec2::new(5.0, 50.0), 10.0));
        assert!(!arena.contains_circle(Vec2::new(50.0, 95.0), 10.0));
    }

    #[test]
    fn test_default_tuning_is_sane() {
        let config = SimConfig::default();
        assert!(config.friction > 0.0 && config.friction < 1.0);
        assert!(config.restitution > 0.0 && config.restitution <= 1.0);
        assert!(config.max_speed > 0.0);
        assert!(config.min_frame_time > 0.0);
    }
}
