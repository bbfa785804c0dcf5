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

    /// Layout for a host pipeline: world position at location 0, color at 1
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLACED: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CAN_PLACE: [f32; 4] = [0.5, 0.5, 0.5, 0.8];
    pub const BLOCKED: [f32; 4] = [1.0, 0.2, 0.2, 0.8];
    pub const POWER_LINK: [f32; 4] = [0.2, 0.4, 1.0, 1.0];
    pub const MINING_LINK: [f32; 4] = [1.0, 0.1, 0.1, 1.0];
    pub const ASTEROID_FULL: [f32; 4] = [0.55, 0.45, 0.35, 1.0];
    pub const ASTEROID_EMPTY: [f32; 4] = [0.2, 0.2, 0.22, 1.0];
    pub const POWERED_RING: [f32; 4] = [1.0, 0.85, 0.3, 1.0]; // Gold

    /// Linear blend from `a` (t = 0) to `b` (t = 1)
    pub fn lerp(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        let t = t.clamp(0.0, 1.0);
        std::array::from_fn(|i| a[i] * (1.0 - t) + b[i] * t)
    }
}
