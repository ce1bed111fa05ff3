//! Shape generation for 2D primitives (triangle lists)

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Segments used for ellipses
pub const ELLIPSE_SEGMENTS: usize = 24;

/// Axis-aligned rectangle from its top-left corner
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y1, color),
        Vertex::new(x0, y1, color),
    ]
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Filled ellipse as a triangle fan, rotated by `rotation` radians
pub fn ellipse(center: Vec2, radii: Vec2, rotation: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (sin_r, cos_r) = rotation.sin_cos();
    let point = |i: usize| {
        let t = i as f32 / ELLIPSE_SEGMENTS as f32 * TAU;
        let local = Vec2::new(t.cos() * radii.x, t.sin() * radii.y);
        center + Vec2::new(local.x * cos_r - local.y * sin_r, local.x * sin_r + local.y * cos_r)
    };

    let mut vertices = Vec::with_capacity(ELLIPSE_SEGMENTS * 3);
    for i in 0..ELLIPSE_SEGMENTS {
        let p1 = point(i);
        let p2 = point(i + 1);
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }
    vertices
}
