//! # Terrain Column Generator
//!
//! Decides the block id of any voxel in the world from the seed and the
//! catalog alone. Chunks are filled from it, and lookups into chunks that were
//! never materialized fall back to it, so it must stay a pure function.
//!
//! ## Passes
//!
//! 1. Absolute bounds: air outside the world, bedrock at y == 0
//! 2. Biome blend: every biome contributes a weighted height; the strongest
//!    weight picks the biome supplying strata, lodes and flora
//! 3. Strata: surface, four layers of sub-surface, stone below
//! 4. Lodes: noise-gated veins overwrite stone, last match wins
//! 5. Flora: surface voxels passing two noise gates emit a structure batch
//!
//! The first two passes depend only on (x, z), so they are computed once per
//! column as a `ColumnProfile` and reused for every height.

use std::sync::Arc;

use cgmath::{Point2, Point3};

use super::block::{BlockId, AIR, BEDROCK, STONE};
use super::catalog::WorldCatalog;
use super::coordinates::VoxelEdit;
use super::is_voxel_in_world;
use super::noise_field::NoiseField;

/// Number of sub-surface layers between the surface block and stone.
const SUB_SURFACE_DEPTH: i32 = 4;

/// The per-column outcome of the biome blend.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnProfile {
    /// World y of the surface block.
    pub terrain_height: i32,
    /// Catalog index of the biome with the strongest weight.
    pub biome: usize,
}

#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    noise: NoiseField,
    catalog: Arc<WorldCatalog>,
    solid_ground_height: i32,
}

impl TerrainGenerator {
    pub fn new(seed: u32, solid_ground_height: i32, catalog: Arc<WorldCatalog>) -> Self {
        TerrainGenerator {
            noise: NoiseField::new(seed),
            catalog,
            solid_ground_height,
        }
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn catalog(&self) -> &Arc<WorldCatalog> {
        &self.catalog
    }

    /// Block id at `position`. Never emits flora.
    pub fn voxel_id(&self, position: Point3<i32>) -> BlockId {
        if !is_voxel_in_world(position) {
            return AIR;
        }
        let profile = self.sample_column(position.x, position.z);
        self.block_at(&profile, position)
    }

    /// Blends every biome at column (x, z).
    pub fn sample_column(&self, x: i32, z: i32) -> ColumnProfile {
        let point = Point2::new(x as f32, z as f32);
        let mut sum_of_heights = 0.0f32;
        let mut count = 0u32;
        let mut strongest_weight = 0.0f32;
        let mut strongest_biome = 0usize;

        for (index, biome) in self.catalog.biomes().iter().enumerate() {
            let weight = self.noise.sample_2d(point, biome.offset, biome.scale);

            // Strict comparison keeps the earliest biome on ties.
            if weight > strongest_weight {
                strongest_weight = weight;
                strongest_biome = index;
            }

            let height = biome.terrain_height * self.noise.sample_2d(point, 0.0, biome.terrain_scale) * weight;
            if height > 0.0 {
                sum_of_heights += height;
                count += 1;
            }
        }

        let average = if count > 0 {
            sum_of_heights / count as f32
        } else {
            0.0
        };

        ColumnProfile {
            terrain_height: (average + self.solid_ground_height as f32).floor() as i32,
            biome: strongest_biome,
        }
    }

    /// Block id at `position` for a column already sampled into `profile`.
    pub fn block_at(&self, profile: &ColumnProfile, position: Point3<i32>) -> BlockId {
        if !is_voxel_in_world(position) {
            return AIR;
        }
        let y = position.y;
        if y == 0 {
            return BEDROCK;
        }

        let terrain_height = profile.terrain_height;
        let biome = &self.catalog.biomes()[profile.biome];

        let mut id = if y == terrain_height {
            biome.surface_block
        } else if y < terrain_height && y > terrain_height - SUB_SURFACE_DEPTH {
            biome.sub_surface_block
        } else if y > terrain_height {
            return AIR;
        } else {
            STONE
        };

        if id == STONE {
            let point = Point3::new(position.x as f32, y as f32, position.z as f32);
            for lode in &biome.lodes {
                if lode.contains_height(y) && self.noise.sample_3d(point, lode.noise_offset, lode.scale, lode.threshold) {
                    id = lode.block_id;
                }
            }
        }

        id
    }

    /// The flora batch rooted at `position`, if the column's biome places one
    /// there.
    pub fn flora_at(&self, profile: &ColumnProfile, position: Point3<i32>) -> Option<Vec<VoxelEdit>> {
        let biome = &self.catalog.biomes()[profile.biome];
        if position.y != profile.terrain_height || !biome.place_major_flora || !is_voxel_in_world(position) {
            return None;
        }

        let point = Point2::new(position.x as f32, position.z as f32);
        if self.noise.sample_2d(point, 0.0, biome.major_flora_zone_scale) <= biome.major_flora_zone_threshold {
            return None;
        }
        if self.noise.sample_2d(point, 0.0, biome.major_flora_placement_scale) <= biome.major_flora_placement_threshold
        {
            return None;
        }

        Some(
            biome
                .major_flora
                .generate(&self.noise, position, biome.min_height, biome.max_height),
        )
    }
}
