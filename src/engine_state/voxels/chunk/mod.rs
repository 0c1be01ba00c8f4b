//! # Chunk Module
//!
//! A chunk is a full-height `CHUNK_WIDTH × CHUNK_HEIGHT × CHUNK_WIDTH` column
//! of voxels, the unit the world generates, lights, meshes and streams.
//!
//! ## Storage
//!
//! Voxels are plain `Copy` records kept in one contiguous arena. The index of
//! local position (x, y, z) is `x + z * CHUNK_WIDTH + y * CHUNK_WIDTH²`, so a
//! horizontal layer is contiguous and a column walk strides by one layer.
//! Voxels are only ever changed by index assignment.
//!
//! ## Lifecycle
//!
//! A chunk is created empty when its coordinate is queued, becomes
//! *populated* once the terrain generator has filled it, and holds a mesh once
//! the update pass has lit and triangulated it. Only populated chunks are
//! editable, lit or meshed. Deactivated chunks keep all of their data.

use std::collections::VecDeque;

use cgmath::Point3;
use log::debug;

use super::block::BlockId;
use super::coordinates::{ChunkCoord, VoxelEdit};
use super::generation::TerrainGenerator;
use super::{CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::engine_state::rendering::meshing::MeshData;

pub mod lighting;

/// Number of voxels in one horizontal layer of a chunk.
pub const CHUNK_LAYER_SIZE: usize = (CHUNK_WIDTH * CHUNK_WIDTH) as usize;
/// Number of voxels in a chunk.
pub const CHUNK_VOLUME: usize = CHUNK_LAYER_SIZE * CHUNK_HEIGHT as usize;

/// One voxel: its block id and the fraction of sunlight reaching it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Voxel {
    pub id: BlockId,
    /// Always within `[0, 1]`.
    pub light: f32,
}

impl Voxel {
    pub const AIR: Voxel = Voxel { id: 0, light: 0.0 };

    pub fn new(id: BlockId) -> Self {
        Voxel { id, light: 0.0 }
    }
}

pub struct Chunk {
    coordinate: ChunkCoord,
    voxels: Vec<Voxel>,
    pending_edits: VecDeque<VoxelEdit>,
    mesh: MeshData,
    populated: bool,
    active: bool,
}

impl Chunk {
    /// Creates an unpopulated chunk filled with air.
    pub fn new(coordinate: ChunkCoord, active: bool) -> Self {
        Chunk {
            coordinate,
            voxels: vec![Voxel::AIR; CHUNK_VOLUME],
            pending_edits: VecDeque::new(),
            mesh: MeshData::default(),
            populated: false,
            active,
        }
    }

    pub fn coordinate(&self) -> ChunkCoord {
        self.coordinate
    }

    /// World position of local voxel (0, 0, 0).
    pub fn origin(&self) -> Point3<i32> {
        self.coordinate.origin()
    }

    /// Whether the voxel grid has been generated. Only populated chunks are
    /// editable.
    pub fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Returns `true` if the local position lies inside this chunk.
    pub fn contains_local(position: Point3<i32>) -> bool {
        (0..CHUNK_WIDTH).contains(&position.x)
            && (0..CHUNK_HEIGHT).contains(&position.y)
            && (0..CHUNK_WIDTH).contains(&position.z)
    }

    /// Arena index of an in-chunk local position.
    pub fn index_of(position: Point3<i32>) -> usize {
        (position.x + position.z * CHUNK_WIDTH) as usize + position.y as usize * CHUNK_LAYER_SIZE
    }

    /// Local position of an arena index. Inverse of `index_of`.
    pub fn position_of(index: usize) -> Point3<i32> {
        let index = index as i32;
        let layer = CHUNK_LAYER_SIZE as i32;
        Point3::new(index % CHUNK_WIDTH, index / layer, (index % layer) / CHUNK_WIDTH)
    }

    /// The voxel at a local position, or `None` outside the chunk.
    pub fn voxel(&self, position: Point3<i32>) -> Option<Voxel> {
        Self::contains_local(position).then(|| self.voxels[Self::index_of(position)])
    }

    /// The voxel at a world position, or `None` if it belongs to another
    /// chunk.
    pub fn voxel_at_world(&self, position: Point3<i32>) -> Option<Voxel> {
        self.voxel(self.coordinate.to_local(position))
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub(crate) fn voxels_mut(&mut self) -> &mut [Voxel] {
        &mut self.voxels
    }

    /// Sets the block id at a world position. Returns `false` if the
    /// position belongs to another chunk.
    pub fn set_block_at_world(&mut self, position: Point3<i32>, id: BlockId) -> bool {
        let local = self.coordinate.to_local(position);
        if !Self::contains_local(local) {
            return false;
        }
        self.voxels[Self::index_of(local)].id = id;
        true
    }

    /// Fills the voxel grid from the generator and returns the flora batches
    /// rooted in this chunk.
    pub fn populate(&mut self, generator: &TerrainGenerator) -> Vec<Vec<VoxelEdit>> {
        let origin = self.origin();
        let mut flora = Vec::new();

        for z in 0..CHUNK_WIDTH {
            for x in 0..CHUNK_WIDTH {
                let profile = generator.sample_column(origin.x + x, origin.z + z);
                for y in 0..CHUNK_HEIGHT {
                    let world = Point3::new(origin.x + x, y, origin.z + z);
                    self.voxels[Self::index_of(Point3::new(x, y, z))] = Voxel::new(generator.block_at(&profile, world));
                }

                let surface = Point3::new(origin.x + x, profile.terrain_height, origin.z + z);
                if let Some(batch) = generator.flora_at(&profile, surface) {
                    flora.push(batch);
                }
            }
        }

        self.populated = true;
        debug!("Populated chunk {} with {} flora batches", self.coordinate, flora.len());
        flora
    }

    /// Queues an edit to be applied on the next update pass.
    pub fn enqueue_edit(&mut self, edit: VoxelEdit) {
        self.pending_edits.push_back(edit);
    }

    pub fn pending_edit_count(&self) -> usize {
        self.pending_edits.len()
    }

    /// Applies queued edits in order. Returns how many were applied.
    pub fn apply_pending_edits(&mut self) -> usize {
        let mut applied = 0;
        while let Some(edit) = self.pending_edits.pop_front() {
            if self.set_block_at_world(edit.position, edit.block_id) {
                applied += 1;
            }
        }
        applied
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn set_mesh(&mut self, mesh: MeshData) {
        self.mesh = mesh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_index_is_layer_major() {
        assert_eq!(Chunk::index_of(Point3::new(0, 0, 0)), 0);
        assert_eq!(Chunk::index_of(Point3::new(1, 0, 0)), 1);
        assert_eq!(Chunk::index_of(Point3::new(0, 0, 1)), CHUNK_WIDTH as usize);
        assert_eq!(Chunk::index_of(Point3::new(0, 1, 0)), CHUNK_LAYER_SIZE);
        assert_eq!(
            Chunk::index_of(Point3::new(CHUNK_WIDTH - 1, CHUNK_HEIGHT - 1, CHUNK_WIDTH - 1)),
            CHUNK_VOLUME - 1
        );
        for index in [0, 17, 300, CHUNK_VOLUME - 1] {
            assert_eq!(Chunk::index_of(Chunk::position_of(index)), index);
        }
    }

    #[test]
    fn world_positions_map_into_the_owning_chunk() {
        let mut chunk = Chunk::new(ChunkCoord::new(2, 3), true);
        let inside = Point3::new(2 * CHUNK_WIDTH + 5, 70, 3 * CHUNK_WIDTH + 15);
        let outside = Point3::new(3 * CHUNK_WIDTH, 70, 3 * CHUNK_WIDTH);

        assert!(chunk.set_block_at_world(inside, 9));
        assert!(!chunk.set_block_at_world(outside, 9));
        assert_eq!(chunk.voxel_at_world(inside).map(|v| v.id), Some(9));
        assert_eq!(chunk.voxel_at_world(outside), None);
    }

    #[test]
    fn pending_edits_apply_in_order() {
        let mut chunk = Chunk::new(ChunkCoord::new(1, 1), false);
        let position = Point3::new(CHUNK_WIDTH + 1, 10, CHUNK_WIDTH + 1);
        chunk.enqueue_edit(VoxelEdit::new(position, 3));
        chunk.enqueue_edit(VoxelEdit::new(position, 7));
        chunk.enqueue_edit(VoxelEdit::new(Point3::new(0, 10, 0), 7));

        assert_eq!(chunk.apply_pending_edits(), 2);
        assert_eq!(chunk.pending_edit_count(), 0);
        assert_eq!(chunk.voxel_at_world(position).map(|v| v.id), Some(7));
    }
}
