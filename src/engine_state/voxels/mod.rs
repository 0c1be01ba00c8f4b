//! # Voxel World Core
//!
//! Everything needed to describe, generate, store and edit the voxel grid.
//!
//! ## Architecture
//!
//! * **Block**: the static block catalog and the six block faces
//! * **Biome**: terrain profiles and their ore veins
//! * **Catalog**: the validated block and biome tables the world is built from
//! * **Noise field**: the seeded sampler every generator reads from
//! * **Generation**: per-column terrain decisions
//! * **Structure**: deferred flora edit batches
//! * **Chunk**: the voxel arena, its light pass and its pending edits
//! * **Chunk store**: the fixed registry of chunk slots
//! * **World**: shared context tying the above together behind one coarse lock
//! * **Tasks**: the unit of work the background worker repeats
//!
//! ## Coordinates
//!
//! World positions are integer voxel coordinates (`Point3<i32>`). The world is
//! `WORLD_SIZE_IN_VOXELS` wide along x and z and `CHUNK_HEIGHT` tall. Chunks
//! are full-height columns, so a chunk coordinate only has x and z.

pub mod biome;
pub mod block;
pub mod catalog;
pub mod chunk;
pub mod chunk_store;
pub mod coordinates;
pub mod generation;
pub mod noise_field;
pub mod structure;
pub mod tasks;
pub mod world;

use cgmath::Point3;

/// Width and depth of a chunk in voxels.
pub const CHUNK_WIDTH: i32 = 16;
/// Height of a chunk (and of the world) in voxels.
pub const CHUNK_HEIGHT: i32 = 256;
/// Number of chunks along each horizontal axis of the world.
pub const WORLD_SIZE_IN_CHUNKS: i32 = 100;
/// Number of voxels along each horizontal axis of the world.
pub const WORLD_SIZE_IN_VOXELS: i32 = WORLD_SIZE_IN_CHUNKS * CHUNK_WIDTH;
/// Horizontal centre of the world in voxels.
pub const WORLD_CENTRE: i32 = WORLD_SIZE_IN_VOXELS / 2;

/// Returns `true` if `position` lies inside the generated world volume.
pub fn is_voxel_in_world(position: Point3<i32>) -> bool {
    (0..WORLD_SIZE_IN_VOXELS).contains(&position.x)
        && (0..CHUNK_HEIGHT).contains(&position.y)
        && (0..WORLD_SIZE_IN_VOXELS).contains(&position.z)
}
