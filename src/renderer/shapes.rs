//! Shape generation for 2D primitives
//!
//! Every function returns a triangle list in world coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::bounds::BoundingRect;

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

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let (s1, c1) = ((i as f32 / segments as f32) * 2.0 * PI).sin_cos();
        let (s2, c2) = (((i + 1) as f32 / segments as f32) * 2.0 * PI).sin_cos();

        let inner1 = center + Vec2::new(c1, s1) * inner_radius;
        let outer1 = center + Vec2::new(c1, s1) * outer_radius;
        let inner2 = center + Vec2::new(c2, s2) * inner_radius;
        let outer2 = center + Vec2::new(c2, s2) * outer_radius;

        push_quad(&mut vertices, [inner1, outer1, inner2, outer2], color);
    }

    vertices
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(bounds: &BoundingRect, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [
            Vec2::new(bounds.left(), bounds.top()),
            Vec2::new(bounds.right(), bounds.top()),
            Vec2::new(bounds.left(), bounds.bottom()),
            Vec2::new(bounds.right(), bounds.bottom()),
        ],
        color,
    );
    vertices
}

/// Generate vertices for a line segment of the given thickness
pub fn line(from: Vec2, to: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = dir.perp() * (thickness / 2.0);

    let mut vertices = Vec::with_capacity(6);
    push_quad(
        &mut vertices,
        [from + perp, from - perp, to + perp, to - perp],
        color,
    );
    vertices
}

/// Two triangles: (a, b, c) and (c, b, d)
fn push_quad(vertices: &mut Vec<Vertex>, [a, b, c, d]: [Vec2; 4], color: [f32; 4]) {
    for p in [a, b, c, c, b, d] {
        vertices.push(Vertex::new(p.x, p.y, color));
    }
}
