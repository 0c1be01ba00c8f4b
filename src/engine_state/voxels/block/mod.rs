//! # Block Module
//!
//! Block ids the engine relies on, the default block table and the face
//! enumeration used by lighting and meshing.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to store a block id in a voxel.
pub type BlockId = u8;

/// Empty space.
pub const AIR: BlockId = 0;
/// The indestructible floor placed at y == 0.
pub const BEDROCK: BlockId = 1;
/// Filler below the biome strata; the only block lodes may replace.
pub const STONE: BlockId = 4;
/// Tree trunks.
pub const LOG: BlockId = 12;
/// Tree canopies.
pub const LEAVES: BlockId = 13;
/// Desert flora.
pub const CACTUS: BlockId = 14;

pub const GRASS: BlockId = 2;
pub const DIRT: BlockId = 3;
pub const SAND: BlockId = 5;
pub const GRAVEL: BlockId = 6;
pub const COAL_ORE: BlockId = 7;
pub const IRON_ORE: BlockId = 8;
pub const GLASS: BlockId = 11;

/// The block table used when no catalog file is supplied.
///
/// Entry `i` describes block id `i`.
pub fn default_blocks() -> Vec<BlockType> {
    vec![
        BlockType::air(),
        BlockType::opaque("Bedrock", 9),
        BlockType::capped("Grass", 2, 7, 1),
        BlockType::opaque("Dirt", 1),
        BlockType::opaque("Stone", 0),
        BlockType::opaque("Sand", 10),
        BlockType::opaque("Gravel", 11),
        BlockType::opaque("Coal Ore", 12),
        BlockType::opaque("Iron Ore", 13),
        BlockType::opaque("Cobblestone", 8),
        BlockType::opaque("Planks", 4),
        BlockType::translucent("Glass", 3, 0.9),
        BlockType::capped("Oak Log", 5, 6, 6),
        BlockType::translucent("Oak Leaves", 16, 0.6),
        BlockType::capped("Cactus", 18, 19, 20),
    ]
}
