//! # World Streamer
//!
//! Keeps the chunks around a moving reference point generated, meshed and
//! handed to the presentation sink, one bounded step per tick.
//!
//! ## Tick
//!
//! 1. When the reference point enters a new chunk, the active set is
//!    recomputed: every in-world chunk within `view_distance` (chessboard
//!    distance) is activated, creating it if needed, and every chunk that
//!    dropped out is deactivated but kept
//! 2. One chunk is taken off the creation queue and populated
//! 3. The head of the draw queue is presented if its chunk is populated
//! 4. Without threading, one modification drain and one update step run
//!    inline; with threading, the chunk update worker is woken instead

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use cgmath::Point3;
use log::info;

use super::rendering::PresentationSink;
use super::settings::WorldSettings;
use super::task_management::ChunkUpdateWorker;
use super::voxels::{
    block::BlockId,
    catalog::WorldCatalog,
    chunk::{Chunk, Voxel},
    coordinates::ChunkCoord,
    generation::TerrainGenerator,
    tasks::chunk_update_task::ChunkUpdateTask,
    world::World,
    CHUNK_HEIGHT, WORLD_CENTRE,
};
use crate::core::MtResource;

/// Queue and active-set sizes for a debug overlay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StreamerStats {
    pub player_chunk: Option<ChunkCoord>,
    pub active_chunks: usize,
    pub stored_chunks: usize,
    pub chunks_to_create: usize,
    pub chunks_to_update: usize,
    pub chunks_to_draw: usize,
    pub pending_modifications: usize,
}

impl StreamerStats {
    /// Returns `true` when no queue holds any work.
    pub fn is_settled(&self) -> bool {
        self.chunks_to_create == 0
            && self.chunks_to_update == 0
            && self.chunks_to_draw == 0
            && self.pending_modifications == 0
    }
}

impl fmt::Display for StreamerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.player_chunk {
            Some(chunk) => write!(f, "chunk {}", chunk)?,
            None => write!(f, "chunk -")?,
        }
        write!(
            f,
            " | active {} | stored {} | create {} | update {} | draw {} | modifications {}",
            self.active_chunks,
            self.stored_chunks,
            self.chunks_to_create,
            self.chunks_to_update,
            self.chunks_to_draw,
            self.pending_modifications
        )
    }
}

pub struct WorldStreamer {
    world: Arc<World>,
    settings: WorldSettings,
    active_chunks: HashSet<ChunkCoord>,
    player_chunk: Option<ChunkCoord>,
    /// Activation changes not yet forwarded to a sink.
    activation_changes: Vec<(ChunkCoord, bool)>,
    worker: Option<ChunkUpdateWorker>,
}

impl WorldStreamer {
    /// Builds the world and, if threading is enabled, spawns its update
    /// worker.
    pub fn new(settings: WorldSettings, catalog: Arc<WorldCatalog>) -> anyhow::Result<Self> {
        let settings = settings.clamped();
        let generator = TerrainGenerator::new(settings.seed, settings.solid_ground_height, catalog);
        let world = Arc::new(World::new(generator));

        let worker = if settings.enable_threading {
            Some(ChunkUpdateWorker::spawn(Box::new(ChunkUpdateTask::new(world.clone())))?)
        } else {
            None
        };

        info!(
            "Created world with seed {}, view distance {}, threading {}",
            settings.seed,
            settings.view_distance,
            if worker.is_some() { "on" } else { "off" }
        );

        Ok(WorldStreamer {
            world,
            settings,
            active_chunks: HashSet::new(),
            player_chunk: None,
            activation_changes: Vec::new(),
            worker,
        })
    }

    /// Where a new player starts: the centre of the world, above the terrain.
    pub fn spawn_position() -> Point3<f32> {
        Point3::new(WORLD_CENTRE as f32, (CHUNK_HEIGHT - 75) as f32, WORLD_CENTRE as f32)
    }

    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn is_threaded(&self) -> bool {
        self.worker.is_some()
    }

    pub fn player_chunk(&self) -> Option<ChunkCoord> {
        self.player_chunk
    }

    pub fn active_chunks(&self) -> &HashSet<ChunkCoord> {
        &self.active_chunks
    }

    /// Activates the area around `spawn` without waiting for the first tick.
    pub fn start(&mut self, spawn: Point3<f32>) {
        let chunk = ChunkCoord::from_position(spawn);
        info!("Starting world at {:?} in chunk {}", spawn, chunk);
        self.player_chunk = Some(chunk);
        self.check_view_distance(chunk);
    }

    /// Advances streaming by one step for a reference point at `position`.
    pub fn tick(&mut self, position: Point3<f32>, sink: &mut dyn PresentationSink) {
        let chunk = ChunkCoord::from_position(position);
        if self.player_chunk != Some(chunk) {
            self.player_chunk = Some(chunk);
            self.check_view_distance(chunk);
        }
        for (coordinate, active) in self.activation_changes.drain(..) {
            sink.set_active(coordinate, active);
        }

        let created = self.world.create_next_chunk().is_some();

        if let Some((coordinate, chunk)) = self.world.next_drawable() {
            sink.present(coordinate, chunk.get().mesh());
        }

        match &self.worker {
            Some(worker) => {
                if created {
                    worker.notify();
                }
            }
            None => {
                self.world.apply_modifications();
                self.world.update_chunks();
            }
        }
    }

    fn check_view_distance(&mut self, centre: ChunkCoord) {
        let previously_active = std::mem::take(&mut self.active_chunks);
        let view_distance = self.settings.view_distance;

        {
            let mut queues = self.world.lock_queues();
            for x in centre.x - view_distance..=centre.x + view_distance {
                for z in centre.z - view_distance..=centre.z + view_distance {
                    let coordinate = ChunkCoord::new(x, z);
                    if !self.world.activate_chunk(&mut queues, coordinate) {
                        continue;
                    }
                    if !previously_active.contains(&coordinate) {
                        self.activation_changes.push((coordinate, true));
                    }
                    self.active_chunks.insert(coordinate);
                }
            }
        }

        for coordinate in previously_active.difference(&self.active_chunks) {
            self.world.deactivate_chunk(*coordinate);
            self.activation_changes.push((*coordinate, false));
        }
    }

    /// Edits a voxel and wakes the worker to re-mesh it.
    pub fn edit_voxel(&self, position: Point3<i32>, block_id: BlockId) -> bool {
        let edited = self.world.edit_voxel(position, block_id);
        if edited {
            if let Some(worker) = &self.worker {
                worker.notify();
            }
        }
        edited
    }

    pub fn get_voxel_id(&self, position: Point3<i32>) -> BlockId {
        self.world.get_voxel_id(position)
    }

    pub fn check_solid_at(&self, position: Point3<i32>) -> bool {
        self.world.check_solid_at(position)
    }

    pub fn get_voxel_state(&self, position: Point3<i32>) -> Option<Voxel> {
        self.world.get_voxel_state(position)
    }

    pub fn get_chunk_at(&self, position: Point3<i32>) -> Option<MtResource<Chunk>> {
        self.world.get_chunk_at(position)
    }

    pub fn stats(&self) -> StreamerStats {
        let queues = self.world.lock_queues();
        StreamerStats {
            player_chunk: self.player_chunk,
            active_chunks: self.active_chunks.len(),
            stored_chunks: self.world.chunk_count(),
            chunks_to_create: queues.create.len(),
            chunks_to_update: queues.update.len(),
            chunks_to_draw: queues.draw.len(),
            pending_modifications: queues.modifications.len(),
        }
    }
}
