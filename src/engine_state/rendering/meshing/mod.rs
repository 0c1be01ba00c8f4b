//! Mesh generation for voxel chunks.
//!
//! Turns a lit chunk into `MeshData`, one quad per visible voxel face.
//!
//! # Architecture
//! - [`Mesher`]: walks a chunk and emits the faces that border see-through blocks
//! - [`VoxelLookup`]: resolves neighbours that lie outside the chunk being meshed
//! - [`MeshData`]: the resulting vertex streams and index lists
//! - `face`: cube corner tables and atlas UV math
//!
//! # Culling
//! A face is kept only when the voxel it looks at exists and is flagged
//! `render_neighbour_faces` (air, glass, leaves). Above the world ceiling the
//! neighbour is fully lit air; faces against any other voxel outside the world
//! are dropped. Faces between two see-through blocks go to the
//! transparent index list so they can be drawn after the opaque pass.

use cgmath::{EuclideanSpace, Point3};

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, AIR},
    catalog::WorldCatalog,
    chunk::{Chunk, Voxel},
    CHUNK_HEIGHT,
};

mod face;
mod mesh_data;

pub use face::{atlas_uvs, NORMALIZED_BLOCK_TEXTURE_SIZE, TEXTURE_ATLAS_SIZE_IN_BLOCKS};
pub use mesh_data::MeshData;

/// What a face sees above the top of the world.
const OPEN_SKY: Voxel = Voxel { id: AIR, light: 1.0 };

/// Read access to voxels by world position.
pub trait VoxelLookup {
    /// The voxel at `position`, or `None` outside the world.
    fn voxel_at(&self, position: Point3<i32>) -> Option<Voxel>;
}

/// A lookup that knows nothing beyond the chunk being meshed.
pub struct NoNeighbours;

impl VoxelLookup for NoNeighbours {
    fn voxel_at(&self, _position: Point3<i32>) -> Option<Voxel> {
        None
    }
}

pub struct Mesher<'a> {
    catalog: &'a WorldCatalog,
}

impl<'a> Mesher<'a> {
    pub fn new(catalog: &'a WorldCatalog) -> Self {
        Mesher { catalog }
    }

    /// Triangulates `chunk`, asking `neighbours` for voxels across its
    /// borders.
    pub fn build(&self, chunk: &Chunk, neighbours: &dyn VoxelLookup) -> MeshData {
        let mut mesh = MeshData::new();
        let origin = chunk.origin();

        for (index, voxel) in chunk.voxels().iter().enumerate() {
            let block = self.catalog.block(voxel.id);
            if !block.is_solid {
                continue;
            }

            let local = Chunk::position_of(index);
            let corner = [local.x as f32, local.y as f32, local.z as f32];

            for side in BlockSide::all() {
                let neighbour_position = local + side.offset();
                let neighbour = if neighbour_position.y >= CHUNK_HEIGHT {
                    Some(OPEN_SKY)
                } else {
                    chunk
                        .voxel(neighbour_position)
                        .or_else(|| neighbours.voxel_at(origin + neighbour_position.to_vec()))
                };
                let Some(neighbour) = neighbour else {
                    continue;
                };

                let neighbour_block = self.catalog.block(neighbour.id);
                if !neighbour_block.render_neighbour_faces {
                    continue;
                }

                let transparent = block.render_neighbour_faces && neighbour_block.render_neighbour_faces;
                mesh.push_face(side, corner, block.texture_id(side), neighbour.light, transparent);
            }
        }

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{AIR, GLASS, STONE};
    use crate::engine_state::voxels::coordinates::ChunkCoord;
    use crate::engine_state::voxels::CHUNK_WIDTH;

    fn chunk_with(blocks: &[(Point3<i32>, u8)]) -> Chunk {
        let mut chunk = Chunk::new(ChunkCoord::new(2, 2), true);
        let origin = chunk.origin();
        for &(local, id) in blocks {
            chunk.set_block_at_world(origin + local.to_vec(), id);
        }
        chunk
    }

    /// Every neighbour outside the chunk is lit air.
    struct OpenSky;

    impl VoxelLookup for OpenSky {
        fn voxel_at(&self, _position: Point3<i32>) -> Option<Voxel> {
            Some(Voxel { id: AIR, light: 1.0 })
        }
    }

    #[test]
    fn lone_block_emits_six_faces() {
        let catalog = WorldCatalog::default();
        let chunk = chunk_with(&[(Point3::new(4, 10, 4), STONE)]);
        let mesh = Mesher::new(&catalog).build(&chunk, &NoNeighbours);

        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.opaque_indices.len(), 36);
        assert!(mesh.transparent_indices.is_empty());
        assert!(mesh.positions.iter().all(|p| p[0] >= 4.0 && p[0] <= 5.0 && p[1] >= 10.0 && p[1] <= 11.0));
    }

    #[test]
    fn enclosed_block_contributes_nothing() {
        let catalog = WorldCatalog::default();
        let centre = Point3::new(8, 20, 8);
        let arms: Vec<_> = BlockSide::all().map(|side| (centre + side.offset(), STONE)).into();
        let mut filled = arms.clone();
        filled.push((centre, STONE));

        let mesher = Mesher::new(&catalog);
        let arms_only = mesher.build(&chunk_with(&arms), &NoNeighbours);
        let with_centre = mesher.build(&chunk_with(&filled), &NoNeighbours);

        // Filling the centre hides one face of each arm and adds none of its own.
        assert_eq!(arms_only.vertex_count(), 6 * 6 * 4);
        assert_eq!(with_centre.vertex_count(), 6 * 5 * 4);
    }

    #[test]
    fn border_faces_depend_on_the_lookup() {
        let catalog = WorldCatalog::default();
        let chunk = chunk_with(&[(Point3::new(0, 30, 5), STONE)]);
        let mesher = Mesher::new(&catalog);

        let blind = mesher.build(&chunk, &NoNeighbours);
        let open = mesher.build(&chunk, &OpenSky);
        assert_eq!(blind.vertex_count(), 20);
        assert_eq!(open.vertex_count(), 24);
    }

    #[test]
    fn ceiling_blocks_keep_their_top_face() {
        let catalog = WorldCatalog::default();
        let mesher = Mesher::new(&catalog);

        let floating = mesher.build(&chunk_with(&[(Point3::new(6, 200, 6), STONE)]), &NoNeighbours);
        let ceiling = mesher.build(&chunk_with(&[(Point3::new(6, CHUNK_HEIGHT - 1, 6), STONE)]), &NoNeighbours);
        assert_eq!(floating.vertex_count(), 24);
        assert_eq!(ceiling.vertex_count(), 24);

        let top = ceiling
            .normals
            .iter()
            .position(|normal| *normal == BlockSide::TOP.normal())
            .unwrap();
        assert_eq!(ceiling.colors[top][3], 1.0);
    }

    #[test]
    fn floor_blocks_drop_their_bottom_face() {
        let catalog = WorldCatalog::default();
        let chunk = chunk_with(&[(Point3::new(6, 0, 6), STONE)]);
        let mesh = Mesher::new(&catalog).build(&chunk, &NoNeighbours);

        assert_eq!(mesh.vertex_count(), 20);
        assert!(!mesh.normals.contains(&BlockSide::BOTTOM.normal()));
    }

    #[test]
    fn glass_against_air_is_transparent() {
        let catalog = WorldCatalog::default();
        let chunk = chunk_with(&[
            (Point3::new(3, 40, 3), GLASS),
            (Point3::new(4, 40, 3), STONE),
        ]);
        let mesh = Mesher::new(&catalog).build(&chunk, &NoNeighbours);

        // Glass shows five faces to air and stone shows its face to the glass,
        // but the glass face against stone is culled.
        assert_eq!(mesh.transparent_indices.len(), 5 * 6);
        assert_eq!(mesh.opaque_indices.len(), 6 * 6);
    }

    #[test]
    fn face_alpha_carries_neighbour_light() {
        let catalog = WorldCatalog::default();
        let mut chunk = chunk_with(&[(Point3::new(1, 1, CHUNK_WIDTH - 1), STONE)]);
        let above = Chunk::index_of(Point3::new(1, 2, CHUNK_WIDTH - 1));
        chunk.voxels_mut()[above].light = 0.7;

        let mesh = Mesher::new(&catalog).build(&chunk, &NoNeighbours);
        let top = mesh
            .normals
            .iter()
            .position(|normal| *normal == BlockSide::TOP.normal())
            .unwrap();
        assert!((mesh.colors[top][3] - 0.7).abs() < 1e-6);
    }
}
