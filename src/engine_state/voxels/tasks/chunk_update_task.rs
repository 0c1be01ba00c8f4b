//! # Chunk Update Task
//!
//! One background step: drain the deferred modifications, then light and mesh
//! one chunk from the update queue.

use std::sync::Arc;

use crate::engine_state::{
    task_management::task::{Task, TaskStatus},
    voxels::world::World,
};

/// The step the chunk update worker repeats.
pub struct ChunkUpdateTask {
    world: Arc<World>,
}

impl ChunkUpdateTask {
    pub fn new(world: Arc<World>) -> Self {
        ChunkUpdateTask { world }
    }
}

impl Task for ChunkUpdateTask {
    fn process(&mut self) -> TaskStatus {
        let drained = self.world.apply_modifications();
        let updated = self.world.update_chunks();

        if drained || updated {
            TaskStatus::Progressed
        } else {
            TaskStatus::Idle
        }
    }
}
