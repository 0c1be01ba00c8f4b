//! # Block Type Module
//!
//! Static properties of one kind of block: how it occludes, how much light
//! passes through it and which atlas tiles cover its faces.

use serde::{Deserialize, Serialize};

use super::block_side::BlockSide;

/// A catalog entry describing one block id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockType {
    pub name: String,
    /// Whether the block occupies its voxel. Only solid voxels are meshed.
    pub is_solid: bool,
    /// Whether faces of neighbouring blocks that touch this one are drawn.
    ///
    /// Set for air and for see-through blocks such as glass and leaves.
    pub render_neighbour_faces: bool,
    /// Fraction of sunlight passing through the block, from 0 (opaque) to 1.
    pub transparency: f32,
    #[serde(default = "default_stack_size")]
    pub max_stack_size: u32,
    /// Atlas indices in `BlockSide` order: back, front, top, bottom, left, right.
    pub textures: [u16; 6],
}

fn default_stack_size() -> u32 {
    64
}

impl BlockType {
    /// A solid, opaque block using `texture` on every face.
    pub fn opaque(name: &str, texture: u16) -> Self {
        BlockType {
            name: name.to_owned(),
            is_solid: true,
            render_neighbour_faces: false,
            transparency: 0.0,
            max_stack_size: default_stack_size(),
            textures: [texture; 6],
        }
    }

    /// A solid block with its own top and bottom tiles.
    pub fn capped(name: &str, side: u16, top: u16, bottom: u16) -> Self {
        BlockType {
            textures: [side, side, top, bottom, side, side],
            ..BlockType::opaque(name, side)
        }
    }

    /// A solid block that lets `transparency` of the light through.
    pub fn translucent(name: &str, texture: u16, transparency: f32) -> Self {
        BlockType {
            render_neighbour_faces: true,
            transparency,
            ..BlockType::opaque(name, texture)
        }
    }

    pub fn air() -> Self {
        BlockType {
            name: "Air".to_owned(),
            is_solid: false,
            render_neighbour_faces: true,
            transparency: 1.0,
            max_stack_size: 0,
            textures: [0; 6],
        }
    }

    /// Atlas index for the given face.
    pub fn texture_id(&self, side: BlockSide) -> u16 {
        self.textures[side as usize]
    }
}
