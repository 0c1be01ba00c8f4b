//! Presentation boundary of the voxel engine.
//!
//! The engine produces `MeshData` per chunk and hands it to whatever owns the
//! screen through a [`PresentationSink`]. Nothing in this crate talks to a GPU:
//! a windowed front end implements the sink and uploads the interleaved
//! vertex view, while the headless demo logs what it receives.

use log::{debug, trace};

use super::voxels::coordinates::ChunkCoord;

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use meshing::MeshData;
pub use vertex::Vertex;

/// Receives finished chunk meshes and visibility changes.
pub trait PresentationSink {
    /// A chunk has a new mesh. Replaces any mesh previously presented for
    /// `coordinate`.
    fn present(&mut self, coordinate: ChunkCoord, mesh: &MeshData);

    /// A chunk entered or left the view distance.
    fn set_active(&mut self, _coordinate: ChunkCoord, _active: bool) {}
}

/// A sink that logs hand-offs and keeps running totals.
#[derive(Debug, Default)]
pub struct LoggingSink {
    pub meshes_presented: usize,
    pub vertices_presented: usize,
    pub activation_changes: usize,
}

impl PresentationSink for LoggingSink {
    fn present(&mut self, coordinate: ChunkCoord, mesh: &MeshData) {
        self.meshes_presented += 1;
        self.vertices_presented += mesh.vertex_count();
        debug!(
            "Presenting chunk {}: {} vertices, {} opaque and {} transparent indices",
            coordinate,
            mesh.vertex_count(),
            mesh.opaque_indices.len(),
            mesh.transparent_indices.len()
        );
    }

    fn set_active(&mut self, coordinate: ChunkCoord, active: bool) {
        self.activation_changes += 1;
        trace!("Chunk {} active: {}", coordinate, active);
    }
}
