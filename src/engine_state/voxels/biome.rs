//! # Biomes
//!
//! Terrain profiles blended by the column generator, each with its own strata,
//! flora and ordered ore veins.

use serde::{Deserialize, Serialize};

use super::block::{BlockId, AIR, COAL_ORE, DIRT, GRASS, GRAVEL, IRON_ORE, SAND};
use super::structure::StructureKind;

/// A height-banded, noise-gated vein that replaces stone with `block_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lode {
    pub name: String,
    pub block_id: BlockId,
    /// Exclusive lower bound of the band.
    pub min_height: i32,
    /// Exclusive upper bound of the band.
    pub max_height: i32,
    pub scale: f32,
    pub threshold: f32,
    pub noise_offset: f32,
}

impl Lode {
    pub fn new(name: &str, block_id: BlockId, band: (i32, i32), scale: f32, threshold: f32, noise_offset: f32) -> Self {
        Lode {
            name: name.to_owned(),
            block_id,
            min_height: band.0,
            max_height: band.1,
            scale,
            threshold,
            noise_offset,
        }
    }

    pub fn contains_height(&self, y: i32) -> bool {
        y > self.min_height && y < self.max_height
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeAttribute {
    pub name: String,
    /// Offset of this biome's weight field.
    pub offset: f32,
    /// Scale of this biome's weight field.
    pub scale: f32,
    /// Height above solid ground of this biome's tallest terrain.
    pub terrain_height: f32,
    /// Scale of the terrain undulation field.
    pub terrain_scale: f32,
    pub surface_block: BlockId,
    pub sub_surface_block: BlockId,

    pub major_flora: StructureKind,
    pub major_flora_zone_scale: f32,
    pub major_flora_zone_threshold: f32,
    pub major_flora_placement_scale: f32,
    pub major_flora_placement_threshold: f32,
    pub place_major_flora: bool,
    /// Tallest flora trunk.
    pub max_height: i32,
    /// Shortest flora trunk.
    pub min_height: i32,

    /// Applied in order; a later match overrides an earlier one.
    pub lodes: Vec<Lode>,
}

impl Default for BiomeAttribute {
    fn default() -> Self {
        BiomeAttribute {
            name: String::new(),
            offset: 0.0,
            scale: 1.0,
            terrain_height: 0.0,
            terrain_scale: 1.0,
            surface_block: GRASS,
            sub_surface_block: DIRT,
            major_flora: StructureKind::Tree,
            major_flora_zone_scale: 1.3,
            major_flora_zone_threshold: 0.6,
            major_flora_placement_scale: 15.0,
            major_flora_placement_threshold: 0.8,
            place_major_flora: true,
            max_height: 12,
            min_height: 5,
            lodes: Vec::new(),
        }
    }
}

fn common_lodes() -> Vec<Lode> {
    vec![
        Lode::new("Dirt", DIRT, (5, 60), 0.1, 0.5, 0.0),
        Lode::new("Gravel", GRAVEL, (5, 50), 0.15, 0.58, 250.0),
        Lode::new("Coal", COAL_ORE, (5, 45), 0.2, 0.6, 1000.0),
        Lode::new("Iron", IRON_ORE, (5, 30), 0.25, 0.62, 3000.0),
        Lode::new("Caves", AIR, (5, 40), 0.1, 0.57, 43534.0),
    ]
}

/// The biome set used when no catalog file is supplied.
pub fn default_biomes() -> Vec<BiomeAttribute> {
    vec![
        BiomeAttribute {
            name: "Grasslands".to_owned(),
            offset: 0.0,
            scale: 0.1,
            terrain_height: 22.0,
            terrain_scale: 0.25,
            major_flora_zone_threshold: 0.55,
            major_flora_placement_threshold: 0.7,
            lodes: common_lodes(),
            ..BiomeAttribute::default()
        },
        BiomeAttribute {
            name: "Desert".to_owned(),
            offset: 1250.0,
            scale: 0.05,
            terrain_height: 10.0,
            terrain_scale: 0.05,
            surface_block: SAND,
            sub_surface_block: SAND,
            major_flora: StructureKind::Cactus,
            major_flora_zone_scale: 0.06,
            major_flora_zone_threshold: 0.5,
            major_flora_placement_threshold: 0.72,
            max_height: 4,
            min_height: 2,
            lodes: common_lodes(),
            ..BiomeAttribute::default()
        },
        BiomeAttribute {
            name: "Forest".to_owned(),
            offset: 23423.0,
            scale: 0.2,
            terrain_height: 60.0,
            terrain_scale: 0.15,
            major_flora_zone_threshold: 0.45,
            major_flora_placement_threshold: 0.65,
            lodes: common_lodes(),
            ..BiomeAttribute::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lode_bands_are_exclusive() {
        let lode = Lode::new("Coal", COAL_ORE, (5, 10), 0.1, 0.5, 0.0);
        assert!(!lode.contains_height(5));
        assert!(lode.contains_height(6));
        assert!(lode.contains_height(9));
        assert!(!lode.contains_height(10));
    }

    #[test]
    fn partial_json_takes_flora_defaults() {
        let biome: BiomeAttribute = serde_json::from_str(
            r#"{"name":"Plains","terrain_height":12.0,"major_flora":"cactus"}"#,
        )
        .unwrap();
        assert_eq!(biome.major_flora, StructureKind::Cactus);
        assert_eq!(biome.major_flora_zone_scale, 1.3);
        assert_eq!(biome.max_height, 12);
        assert_eq!(biome.min_height, 5);
        assert!(biome.lodes.is_empty());
    }
}
