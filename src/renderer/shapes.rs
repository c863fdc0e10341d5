//! Shape generation for 2D primitives
//!
//! Vertices are produced in playfield pixels; the pipeline maps them to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::{Primitive, Scene};
use super::vertex::{Palette, Vertex};

/// Segments used for every circle
pub const CIRCLE_SEGMENTS: u32 = 32;

/// Generate vertices for a filled circle
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

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let max = min + size;
    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Triangulate every primitive of a scene, in draw order
pub fn tessellate(scene: &Scene, palette: &Palette) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for primitive in &scene.primitives {
        match *primitive {
            Primitive::Circle {
                center,
                radius,
                role,
            } => vertices.extend(circle(center, radius, palette.color(role), CIRCLE_SEGMENTS)),
            Primitive::Rect { min, size, role } => {
                vertices.extend_from_slice(&rect(min, size, palette.color(role)))
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_vertex_count() {
        let v = circle(Vec2::new(10.0, 10.0), 5.0, [1.0; 4], 16);
        assert_eq!(v.len(), 48);
        for tri in v.chunks(3) {
            assert_eq!(tri[0].position, [10.0, 10.0]);
        }
    }

    #[test]
    fn test_rect_covers_corners() {
        let v = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), [1.0; 4]);
        assert!(v.iter().any(|p| p.position == [1.0, 2.0]));
        assert!(v.iter().any(|p| p.position == [4.0, 6.0]));
    }
}
