//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::config::Arena;
use crate::consts::CIRCLE_SEGMENTS;
use crate::sim::BodyStore;

/// Generate vertices for a filled circle, triangulated as a fan from the center
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Closed outline of the arena rectangle as a line strip.
///
/// The first corner is repeated at the end to close the loop.
pub fn arena_outline(arena: &Arena, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(arena.left(), arena.bottom(), color),
        Vertex::new(arena.right(), arena.bottom(), color),
        Vertex::new(arena.right(), arena.top(), color),
        Vertex::new(arena.left(), arena.top(), color),
        Vertex::new(arena.left(), arena.bottom(), color),
    ]
}

/// Assemble this frame's geometry from the store: one fan per body plus the
/// arena outline. Read access only.
pub fn scene_vertices(store: &BodyStore, arena: &Arena) -> (Vec<Vertex>, Vec<Vertex>) {
    let mut fills = Vec::with_capacity(store.count() * (CIRCLE_SEGMENTS as usize) * 3);
    for (_, body) in store.iter() {
        fills.extend(circle(body.pos, body.radius, colors::BODY, CIRCLE_SEGMENTS));
    }

    (fills, arena_outline(arena, colors::ARENA_WALL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_fan_vertex_count() {
        let vertices = circle(Vec2::ZERO, 10.0, colors::BODY, CIRCLE_SEGMENTS);
        assert_eq!(vertices.len(), (CIRCLE_SEGMENTS * 3) as usize);
        // Every third vertex is the fan center
        for triangle in vertices.chunks(3) {
            assert_eq!(triangle[0].position, [0.0, 0.0]);
        }
    }

    #[test]
    fn test_circle_edge_on_radius() {
        let vertices = circle(Vec2::new(5.0, -3.0), 10.0, colors::BODY, CIRCLE_SEGMENTS);
        for triangle in vertices.chunks(3) {
            for vertex in &triangle[1..] {
                let dx = vertex.position[0] - 5.0;
                let dy = vertex.position[1] + 3.0;
                assert!(((dx * dx + dy * dy).sqrt() - 10.0).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_arena_outline_is_closed() {
        let arena = Arena::default();
        let outline = arena_outline(&arena, colors::ARENA_WALL);
        assert_eq!(outline.len(), 5);
        assert_eq!(outline[0].position, outline[4].position);
    }

    #[test]
    fn test_scene_vertices_counts() {
        let mut store = BodyStore::new();
        store.create(Vec2::ZERO, 10.0, true);
        store.create(Vec2::new(50.0, 0.0), 5.0, true);

        let arena = Arena::default();
        let (fills, outline) = scene_vertices(&store, &arena);
        assert_eq!(fills.len(), 2 * (CIRCLE_SEGMENTS * 3) as usize);
        assert_eq!(outline.len(), 5);
    }
}
