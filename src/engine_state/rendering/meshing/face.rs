use crate::engine_state::voxels::block::block_side::BlockSide;

/// Number of tiles along each edge of the texture atlas.
pub const TEXTURE_ATLAS_SIZE_IN_BLOCKS: u16 = 24;

/// Width of one atlas tile in UV space.
pub const NORMALIZED_BLOCK_TEXTURE_SIZE: f32 = 1.0 / TEXTURE_ATLAS_SIZE_IN_BLOCKS as f32;

/// The eight corners of the unit cube.
const CUBE_CORNERS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

/// Corners of each face in `BlockSide` order, wound so that indices
/// `0, 1, 2, 2, 1, 3` form two front-facing triangles.
const FACE_CORNERS: [[usize; 4]; 6] = [
    [0, 3, 1, 2], // back
    [5, 6, 4, 7], // front
    [3, 7, 2, 6], // top
    [1, 5, 0, 4], // bottom
    [4, 7, 0, 3], // left
    [1, 2, 5, 6], // right
];

/// Index pattern of one quad relative to its first vertex.
pub const FACE_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

/// The four positions of `side` of the voxel whose minimum corner is
/// `origin`.
pub fn face_positions(side: BlockSide, origin: [f32; 3]) -> [[f32; 3]; 4] {
    FACE_CORNERS[side as usize].map(|corner| {
        let offset = CUBE_CORNERS[corner];
        [origin[0] + offset[0], origin[1] + offset[1], origin[2] + offset[2]]
    })
}

/// UVs of atlas tile `texture_id` in face-corner order.
///
/// Tiles are numbered row by row from the top-left corner of the atlas, so v
/// is flipped.
pub fn atlas_uvs(texture_id: u16) -> [[f32; 2]; 4] {
    let row = (texture_id / TEXTURE_ATLAS_SIZE_IN_BLOCKS) as f32;
    let column = (texture_id % TEXTURE_ATLAS_SIZE_IN_BLOCKS) as f32;

    let u = column * NORMALIZED_BLOCK_TEXTURE_SIZE;
    let v = 1.0 - row * NORMALIZED_BLOCK_TEXTURE_SIZE - NORMALIZED_BLOCK_TEXTURE_SIZE;
    let size = NORMALIZED_BLOCK_TEXTURE_SIZE;

    [[u, v], [u, v + size], [u + size, v], [u + size, v + size]]
}
