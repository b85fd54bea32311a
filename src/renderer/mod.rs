//! WebGPU rendering pipeline

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{arena_outline, circle, scene_vertices};
pub use vertex::Vertex;
