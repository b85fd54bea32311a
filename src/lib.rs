//! Ball Pit - a rectangular arena bouncing-ball sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (body store, physics, collisions, frame driver)
//! - `renderer`: WebGPU rendering pipeline
//! - `config`: Data-driven physics tuning

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{Arena, SimConfig};
pub use sim::{BodyId, BodyStore, Simulation, TickInput};

/// Structural constants (physics tuning lives in [`SimConfig`])
pub mod consts {
    /// Number of bodies spawned at startup
    pub const BODY_COUNT: usize = 24;
    /// Spawn radius range
    pub const BODY_MIN_RADIUS: f32 = 8.0;
    pub const BODY_MAX_RADIUS: f32 = 18.0;

    /// Boundary segments per circle fan
    pub const CIRCLE_SEGMENTS: u32 = 20;

    /// Cap on per-frame elapsed time to avoid huge catch-up steps
    pub const MAX_FRAME_TIME: f32 = 0.1;
}
