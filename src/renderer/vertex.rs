//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Bytes between consecutive vertices in a buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.024, 0.039, 0.086, 1.0];
    pub const GROUND: [f32; 4] = [0.059, 0.078, 0.125, 1.0];
    pub const GROUND_LINE: [f32; 4] = [0.39, 0.55, 0.71, 0.12];
    pub const BLOCK: [f32; 4] = [0.16, 0.21, 0.31, 1.0];
    pub const BLOCK_HIGHLIGHT: [f32; 4] = [0.71, 0.82, 0.94, 0.12];
    pub const SPIRE: [f32; 4] = [0.16, 0.21, 0.31, 1.0];
    pub const SPIRE_GLINT: [f32; 4] = [0.71, 0.82, 0.94, 0.15];
    pub const ROCK_DARK: [f32; 4] = [0.145, 0.176, 0.247, 1.0];
    pub const ROCK_MID: [f32; 4] = [0.118, 0.145, 0.208, 1.0];
    pub const ROCK_LIGHT: [f32; 4] = [0.176, 0.212, 0.314, 1.0];
    pub const DUST: [f32; 4] = [0.78, 0.86, 0.94, 0.18];
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.18];
}
