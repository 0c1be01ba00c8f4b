//! # Engine State Module
//!
//! The core engine module that ties world streaming to a presentation sink.
//!
//! ## Key Components
//!
//! * `EngineState` - Drives the streamer once per frame and reports its progress
//! * `world_streamer` - Activates, creates, meshes and hands off chunks around the player
//! * `settings` - The persisted settings record
//! * `rendering` - Meshing and the presentation boundary
//! * `task_management` - The background chunk update worker
//! * `voxels` - Voxel data, chunks, terrain generation and the shared world
//!
//! ## Architecture
//!
//! The main thread owns the `EngineState`. Each frame it passes the player
//! position to `EngineState::update`, which ticks the streamer. Lighting and
//! meshing happen either inline in that tick or on the worker thread, which
//! shares the world through an `Arc`.

use std::time::{Duration, Instant};

use cgmath::Point3;
use log::debug;

use rendering::PresentationSink;
use world_streamer::{StreamerStats, WorldStreamer};

pub mod rendering;
pub mod settings;
pub mod task_management;
pub mod voxels;
pub mod world_streamer;

/// Interval between streamer statistics log lines.
const STATS_LOG_INTERVAL: Duration = Duration::from_secs(2);

/// The main state container for the engine.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use voxel_world::engine_state::{
///     rendering::LoggingSink, settings::WorldSettings, voxels::catalog::WorldCatalog,
///     world_streamer::WorldStreamer, EngineState,
/// };
///
/// let streamer = WorldStreamer::new(WorldSettings::default(), Arc::new(WorldCatalog::default()))?;
/// let mut engine = EngineState::new(streamer, Box::new(LoggingSink::default()));
/// engine.start(WorldStreamer::spawn_position());
///
/// // Main game loop
/// loop {
///     engine.update(WorldStreamer::spawn_position());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct EngineState {
    /// Streams chunks around the player
    pub streamer: WorldStreamer,
    /// Receives meshes and visibility changes
    sink: Box<dyn PresentationSink>,
    /// Number of `update` calls so far
    frame: u64,
    /// When statistics were last logged
    last_stats_log: Instant,
}

impl EngineState {
    pub fn new(streamer: WorldStreamer, sink: Box<dyn PresentationSink>) -> Self {
        EngineState {
            streamer,
            sink,
            frame: 0,
            last_stats_log: Instant::now(),
        }
    }

    /// Activates the area around `spawn`.
    pub fn start(&mut self, spawn: Point3<f32>) {
        self.streamer.start(spawn);
    }

    /// Advances the world by one frame for a player at `player_position`.
    pub fn update(&mut self, player_position: Point3<f32>) {
        self.streamer.tick(player_position, self.sink.as_mut());
        self.frame += 1;

        if self.last_stats_log.elapsed() >= STATS_LOG_INTERVAL {
            self.last_stats_log = Instant::now();
            debug!("Frame {}: {}", self.frame, self.streamer.stats());
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> StreamerStats {
        self.streamer.stats()
    }
}
