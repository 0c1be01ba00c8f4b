#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked voxel world engine: deterministic terrain generation, flora,
//! per-chunk sunlight, face-culled meshing and view-distance streaming with an
//! optional background update worker.
//!
//! ## Key Modules
//!
//! * `core` - Shared-ownership primitives used across threads
//! * `engine_state` - Streaming, meshing, the update worker and the voxel world itself
//!
//! ## Architecture
//!
//! The engine has no window or GPU of its own. A front end implements
//! [`PresentationSink`] to receive chunk meshes and visibility changes, then
//! drives an [`EngineState`] once per frame with the player position.
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_world::init_logger();
//!     if let Err(error) = voxel_world::run() {
//!         log::error!("{error:#}");
//!     }
//! }
//! ```

use std::env;
use std::sync::Arc;

use anyhow::Context;
use cgmath::{Point3, Vector3};
use log::info;

pub mod core;
pub mod engine_state;

pub use engine_state::rendering::{LoggingSink, MeshData, PresentationSink, Vertex};
pub use engine_state::settings::WorldSettings;
pub use engine_state::voxels::catalog::WorldCatalog;
pub use engine_state::voxels::coordinates::{ChunkCoord, VoxelEdit};
pub use engine_state::world_streamer::{StreamerStats, WorldStreamer};
pub use engine_state::EngineState;

/// Environment variable naming the settings file.
pub const SETTINGS_PATH_VAR: &str = "VOXEL_SETTINGS";
/// Environment variable naming an optional catalog file.
pub const CATALOG_PATH_VAR: &str = "VOXEL_CATALOG";
/// Environment variable setting how many frames the demo runs.
pub const DEMO_FRAMES_VAR: &str = "VOXEL_DEMO_FRAMES";

const DEFAULT_SETTINGS_PATH: &str = "settings.cfg";
const DEFAULT_DEMO_FRAMES: u64 = 2_000;
/// Frames between demo edits.
const EDIT_INTERVAL: u64 = 150;

/// Initializes `env_logger` on stdout, filtered by `RUST_LOG`.
pub fn init_logger() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG");
    // A logger installed earlier (for example by a test harness) wins.
    let _ = log_builder.try_init();
}

/// Runs the headless demo: streams the world along a jittered walk from the
/// spawn point and places a block beside the walker every so often.
pub fn run() -> anyhow::Result<()> {
    info!("Logger initialized");

    let settings_path = env::var(SETTINGS_PATH_VAR).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_owned());
    let settings = WorldSettings::load_or_create(&settings_path)?;

    let catalog = match env::var(CATALOG_PATH_VAR) {
        Ok(path) => WorldCatalog::load(&path)?,
        Err(_) => WorldCatalog::default(),
    };

    let frames = match env::var(DEMO_FRAMES_VAR) {
        Ok(value) => value
            .parse::<u64>()
            .with_context(|| format!("{DEMO_FRAMES_VAR} must be a frame count, got {value:?}"))?,
        Err(_) => DEFAULT_DEMO_FRAMES,
    };

    let mut rng = fastrand::Rng::with_seed(settings.seed as u64);
    let streamer = WorldStreamer::new(settings, Arc::new(catalog))?;
    let mut engine = EngineState::new(streamer, Box::new(LoggingSink::default()));

    let mut position = WorldStreamer::spawn_position();
    engine.start(position);

    for frame in 0..frames {
        position += Vector3::new(0.05 + rng.f32() * 0.1, 0.0, (rng.f32() - 0.5) * 0.1);
        engine.update(position);

        if frame % EDIT_INTERVAL == EDIT_INTERVAL - 1 {
            let target = Point3::new(position.x.floor() as i32, position.y as i32 - 1, position.z.floor() as i32);
            let block = rng.usize(1..engine.streamer.world().catalog().blocks().len()) as u8;
            let placed = engine.streamer.edit_voxel(target, block);
            info!("Frame {}: placing block {} at {:?}: {}", frame, block, target, placed);
        }
    }

    info!("Demo finished after {} frames: {}", engine.frame(), engine.stats());
    Ok(())
}
