//! Vertex layout handed to presentation sinks.
//!
//! `MeshData` keeps its attributes in separate streams; a sink that wants a
//! single interleaved buffer asks for `MeshData::interleaved` and uploads the
//! `bytemuck` byte view of it.

/// One interleaved mesh vertex.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), chunk-local
/// - Normal: [f32; 3] (12 bytes)
/// - UV: [f32; 2] (8 bytes), atlas coordinates
/// - Color: [f32; 4] (16 bytes), alpha carries the light level
///
/// Total size: 48 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2], color: [f32; 4]) -> Self {
        Vertex {
            position,
            normal,
            uv,
            color,
        }
    }
}
