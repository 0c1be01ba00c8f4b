//! # Block Side Module
//!
//! The six faces of a voxel, with the neighbour offset each one faces.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants index per-face tables: the texture ids of a
/// `BlockType` and the corner table used by the mesher.
///
/// The order is: [BACK, FRONT, TOP, BOTTOM, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The back face (facing negative Z)
    BACK = 0,

    /// The front face (facing positive Z)
    FRONT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns all six block faces in discriminant order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::BACK,
            BlockSide::FRONT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// Offset from a voxel to the neighbour this face looks at.
    pub fn offset(&self) -> Vector3<i32> {
        match self {
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// Outward unit normal of this face.
    pub fn normal(&self) -> [f32; 3] {
        let offset = self.offset();
        [offset.x as f32, offset.y as f32, offset.z as f32]
    }
}
