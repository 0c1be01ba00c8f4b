//! # Structure Generation
//!
//! Flora is produced as batches of voxel edits instead of being written into
//! a chunk directly. A tree rooted near a chunk edge spills into its
//! neighbours, which may not exist yet, so batches travel through the world's
//! deferred modification queue and are routed to whichever chunk owns each
//! position.

use cgmath::{Point2, Point3};
use serde::{Deserialize, Serialize};

use super::block::{CACTUS, LEAVES, LOG};
use super::coordinates::VoxelEdit;
use super::noise_field::NoiseField;

/// Half-width of a tree canopy along x and z.
const CANOPY_HALF_WIDTH: i32 = 2;
/// Number of canopy layers above the trunk top.
const CANOPY_HEIGHT: i32 = 5;

/// The kinds of flora a biome can place on its surface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    /// A log trunk under a rectangular leaf canopy.
    Tree,
    /// A single column of cactus.
    Cactus,
}

impl StructureKind {
    /// Builds the edit batch for one instance rooted on the surface voxel at
    /// `origin`. The origin itself is never edited.
    pub fn generate(
        &self,
        noise: &NoiseField,
        origin: Point3<i32>,
        min_height: i32,
        max_height: i32,
    ) -> Vec<VoxelEdit> {
        match self {
            StructureKind::Tree => make_tree(noise, origin, min_height, max_height),
            StructureKind::Cactus => make_cactus(noise, origin, min_height, max_height),
        }
    }

    /// Block ids this structure writes.
    pub fn block_ids(&self) -> &'static [u8] {
        match self {
            StructureKind::Tree => &[LOG, LEAVES],
            StructureKind::Cactus => &[CACTUS],
        }
    }
}

fn trunk_height(
    noise: &NoiseField,
    origin: Point3<i32>,
    offset: f32,
    scale: f32,
    min_height: i32,
    max_height: i32,
) -> i32 {
    let sample = noise.sample_2d(Point2::new(origin.x as f32, origin.z as f32), offset, scale);
    ((max_height as f32 * sample) as i32).clamp(min_height, max_height.max(min_height))
}

fn make_tree(noise: &NoiseField, origin: Point3<i32>, min_height: i32, max_height: i32) -> Vec<VoxelEdit> {
    let height = trunk_height(noise, origin, 250.0, 3.0, min_height, max_height);
    let mut edits = Vec::new();

    for i in 1..height {
        edits.push(VoxelEdit::new(Point3::new(origin.x, origin.y + i, origin.z), LOG));
    }

    // The canopy is one voxel shorter along z than along x.
    for dx in -CANOPY_HALF_WIDTH..=CANOPY_HALF_WIDTH {
        for dy in 0..CANOPY_HEIGHT {
            for dz in -CANOPY_HALF_WIDTH..CANOPY_HALF_WIDTH {
                edits.push(VoxelEdit::new(
                    Point3::new(origin.x + dx, origin.y + height + dy, origin.z + dz),
                    LEAVES,
                ));
            }
        }
    }

    edits
}

fn make_cactus(noise: &NoiseField, origin: Point3<i32>, min_height: i32, max_height: i32) -> Vec<VoxelEdit> {
    let height = trunk_height(noise, origin, 128.0, 2.0, min_height, max_height);

    (1..=height)
        .map(|i| VoxelEdit::new(Point3::new(origin.x, origin.y + i, origin.z), CACTUS))
        .collect()
}
