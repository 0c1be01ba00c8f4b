//! # World Settings
//!
//! The flat settings record persisted next to the executable as JSON. Missing
//! fields take their default values, so an older file keeps loading after new
//! settings are added.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};

/// Lower and upper bound of `mouse_sensitivity`.
pub const MOUSE_SENSITIVITY_RANGE: (f32, f32) = (1.0, 5.0);

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub version: String,
    /// Radius of the active area, in chunks.
    pub view_distance: i32,
    /// Run lighting and meshing on the chunk update worker.
    pub enable_threading: bool,
    pub mouse_sensitivity: f32,
    pub seed: u32,
    /// Base terrain height that biome heights are added to.
    pub solid_ground_height: i32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        WorldSettings {
            version: "0.0.0.1".to_owned(),
            view_distance: 6,
            enable_threading: true,
            mouse_sensitivity: 2.0,
            seed: 0,
            solid_ground_height: 42,
        }
    }
}

impl WorldSettings {
    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_context(|| format!("failed to read settings {}", path.display()))?;
        let settings: WorldSettings =
            serde_json::from_str(&json).with_context(|| format!("malformed settings {}", path.display()))?;
        Ok(settings.clamped())
    }

    /// Writes settings as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("failed to write settings {}", path.display()))
    }

    /// Loads `path`, or writes the defaults there if it does not exist.
    pub fn load_or_create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        let settings = WorldSettings::default();
        settings.save(path)?;
        info!("Created default settings at {}", path.display());
        Ok(settings)
    }

    /// Pulls out-of-range values back into range.
    pub fn clamped(mut self) -> Self {
        self.view_distance = self.view_distance.max(1);
        self.mouse_sensitivity = self
            .mouse_sensitivity
            .clamp(MOUSE_SENSITIVITY_RANGE.0, MOUSE_SENSITIVITY_RANGE.1);
        self
    }
}
