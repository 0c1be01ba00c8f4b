//! # Coordinates
//!
//! Chunk coordinates and the edit record that addresses a single voxel.

use std::fmt;

use cgmath::{Point3, Vector3};

use super::{CHUNK_WIDTH, WORLD_SIZE_IN_CHUNKS};

/// Horizontal position of a chunk, measured in chunks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        ChunkCoord { x, z }
    }

    /// The chunk containing the voxel at `position`.
    pub fn from_voxel(position: Point3<i32>) -> Self {
        ChunkCoord {
            x: position.x.div_euclid(CHUNK_WIDTH),
            z: position.z.div_euclid(CHUNK_WIDTH),
        }
    }

    /// The chunk containing a continuous position such as the reference point.
    pub fn from_position(position: Point3<f32>) -> Self {
        Self::from_voxel(Point3::new(
            position.x.floor() as i32,
            position.y.floor() as i32,
            position.z.floor() as i32,
        ))
    }

    /// World position of this chunk's (0, 0, 0) voxel.
    pub fn origin(&self) -> Point3<i32> {
        Point3::new(self.x * CHUNK_WIDTH, 0, self.z * CHUNK_WIDTH)
    }

    /// Returns `true` if this chunk may be streamed, stored and looked up.
    ///
    /// The outermost ring of chunks is excluded so that every streamed chunk
    /// has generated terrain on all four sides.
    pub fn is_in_world(&self) -> bool {
        self.x > 0 && self.x < WORLD_SIZE_IN_CHUNKS - 1 && self.z > 0 && self.z < WORLD_SIZE_IN_CHUNKS - 1
    }

    /// Chessboard distance between two chunk coordinates.
    pub fn chebyshev_distance(&self, other: &ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// Converts a world position into a position local to this chunk.
    pub fn to_local(&self, position: Point3<i32>) -> Point3<i32> {
        position - Vector3::new(self.x * CHUNK_WIDTH, 0, self.z * CHUNK_WIDTH)
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// A request to set the voxel at `position` to `block_id`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VoxelEdit {
    pub position: Point3<i32>,
    pub block_id: u8,
}

impl VoxelEdit {
    pub fn new(position: Point3<i32>, block_id: u8) -> Self {
        VoxelEdit { position, block_id }
    }
}
