//! Triangulated chunk geometry.
//!
//! Attributes are stored as parallel streams with one entry per vertex. The
//! two index lists share those vertices: the opaque list is drawn first, the
//! transparent list afterwards with blending.

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::block_side::BlockSide;

use super::face::{atlas_uvs, face_positions, FACE_INDICES};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    /// Black with the light level of the face's neighbour in alpha.
    pub colors: Vec<[f32; 4]>,
    pub opaque_indices: Vec<u32>,
    pub transparent_indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Appends one quad.
    ///
    /// # Arguments
    /// * `side` - The face being emitted
    /// * `origin` - Chunk-local minimum corner of the voxel
    /// * `texture_id` - Atlas tile of the face
    /// * `light` - Light level of the voxel the face looks at
    /// * `transparent` - Which index list receives the quad
    pub fn push_face(&mut self, side: BlockSide, origin: [f32; 3], texture_id: u16, light: f32, transparent: bool) {
        let first = self.positions.len() as u32;

        self.positions.extend(face_positions(side, origin));
        self.normals.extend([side.normal(); 4]);
        self.uvs.extend(atlas_uvs(texture_id));
        self.colors.extend([[0.0, 0.0, 0.0, light]; 4]);

        let indices = if transparent {
            &mut self.transparent_indices
        } else {
            &mut self.opaque_indices
        };
        indices.extend(FACE_INDICES.iter().map(|index| first + index));
    }

    /// The vertex streams zipped into one buffer.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .zip(&self.colors)
            .map(|(((position, normal), uv), color)| Vertex::new(*position, *normal, *uv, *color))
            .collect()
    }

    /// Raw bytes of `vertices`, ready to upload.
    pub fn vertex_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }

    /// Raw bytes of both index lists, opaque first.
    pub fn index_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.opaque_indices.len() + self.transparent_indices.len()) * 4);
        bytes.extend_from_slice(bytemuck::cast_slice(&self.opaque_indices));
        bytes.extend_from_slice(bytemuck::cast_slice(&self.transparent_indices));
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_share_streams_but_not_index_lists() {
        let mut mesh = MeshData::new();
        mesh.push_face(BlockSide::TOP, [1.0, 2.0, 3.0], 7, 1.0, false);
        mesh.push_face(BlockSide::LEFT, [1.0, 2.0, 3.0], 3, 0.5, true);

        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.opaque_indices, vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(mesh.transparent_indices, vec![4, 5, 6, 6, 5, 7]);
        assert_eq!(mesh.normals[0], [0.0, 1.0, 0.0]);
        assert_eq!(mesh.colors[5], [0.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn interleaved_view_matches_streams() {
        let mut mesh = MeshData::new();
        mesh.push_face(BlockSide::FRONT, [0.0, 0.0, 0.0], 1, 0.25, false);

        let vertices = mesh.interleaved();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[2].position, mesh.positions[2]);
        assert_eq!(vertices[3].uv, mesh.uvs[3]);
        assert_eq!(MeshData::vertex_bytes(&vertices).len(), 4 * std::mem::size_of::<Vertex>());
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
