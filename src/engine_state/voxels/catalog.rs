//! # World Catalog
//!
//! The static block and biome tables a world is generated from. A catalog is
//! validated once on construction so the hot paths can index it without
//! bounds checks failing at runtime.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use super::biome::{default_biomes, BiomeAttribute};
use super::block::{block_type::BlockType, default_blocks, BlockId, AIR, BEDROCK, STONE};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldCatalog {
    blocks: Vec<BlockType>,
    biomes: Vec<BiomeAttribute>,
}

impl Default for WorldCatalog {
    fn default() -> Self {
        WorldCatalog {
            blocks: default_blocks(),
            biomes: default_biomes(),
        }
    }
}

impl WorldCatalog {
    /// Builds a catalog after checking that every id it references exists.
    pub fn new(blocks: Vec<BlockType>, biomes: Vec<BiomeAttribute>) -> anyhow::Result<Self> {
        let catalog = WorldCatalog { blocks, biomes };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let catalog: WorldCatalog = serde_json::from_str(json).context("malformed world catalog")?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("invalid catalog {}", path.display()))
    }

    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }

    pub fn biomes(&self) -> &[BiomeAttribute] {
        &self.biomes
    }

    /// Properties of `id`. Ids are validated on insertion, so any id stored
    /// in a voxel is present.
    pub fn block(&self, id: BlockId) -> &BlockType {
        &self.blocks[id as usize]
    }

    pub fn contains_block(&self, id: BlockId) -> bool {
        (id as usize) < self.blocks.len()
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.blocks.len() > BlockId::MAX as usize + 1 {
            bail!("catalog has {} blocks, at most 256 fit in a voxel", self.blocks.len());
        }
        for reserved in [AIR, BEDROCK, STONE] {
            if !self.contains_block(reserved) {
                bail!("catalog is missing reserved block id {}", reserved);
            }
        }
        if self.block(AIR).is_solid {
            bail!("block 0 must be non-solid air");
        }
        for (id, block) in self.blocks.iter().enumerate() {
            if !(0.0..=1.0).contains(&block.transparency) {
                bail!("block {} ({}) has transparency {} outside [0, 1]", id, block.name, block.transparency);
            }
        }

        if self.biomes.is_empty() {
            bail!("catalog needs at least one biome");
        }
        for biome in &self.biomes {
            let mut referenced = vec![biome.surface_block, biome.sub_surface_block];
            referenced.extend(biome.lodes.iter().map(|lode| lode.block_id));
            if biome.place_major_flora {
                referenced.extend_from_slice(biome.major_flora.block_ids());
                if biome.min_height > biome.max_height {
                    bail!(
                        "biome {} has flora min height {} above max height {}",
                        biome.name,
                        biome.min_height,
                        biome.max_height
                    );
                }
            }
            if let Some(missing) = referenced.into_iter().find(|id| !self.contains_block(*id)) {
                bail!("biome {} references unknown block id {}", biome.name, missing);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::biome::Lode;
    use crate::engine_state::voxels::block::default_blocks;

    #[test]
    fn default_catalog_is_valid() {
        let catalog = WorldCatalog::default();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.biomes().len(), 3);
    }

    #[test]
    fn empty_biome_list_is_rejected() {
        let error = WorldCatalog::new(default_blocks(), Vec::new()).unwrap_err();
        assert!(error.to_string().contains("at least one biome"));
    }

    #[test]
    fn unknown_lode_block_is_rejected() {
        let mut biome = BiomeAttribute {
            name: "Broken".to_owned(),
            ..BiomeAttribute::default()
        };
        biome.lodes.push(Lode::new("Mystery", 200, (1, 10), 0.1, 0.5, 0.0));

        let error = WorldCatalog::new(default_blocks(), vec![biome]).unwrap_err();
        assert!(error.to_string().contains("unknown block id 200"));
    }

    #[test]
    fn flora_blocks_must_exist() {
        let blocks = default_blocks().into_iter().take(5).collect();
        let biome = BiomeAttribute {
            name: "Bare".to_owned(),
            ..BiomeAttribute::default()
        };
        assert!(WorldCatalog::new(blocks, vec![biome]).is_err());
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let json = serde_json::to_string(&WorldCatalog::default()).unwrap();
        let catalog = WorldCatalog::from_json_str(&json).unwrap();
        assert_eq!(catalog.blocks(), WorldCatalog::default().blocks());
    }
}
