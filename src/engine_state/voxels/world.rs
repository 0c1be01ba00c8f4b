//! # World Module
//!
//! The shared context every thread works against: the terrain generator, the
//! chunk store and the work queues that move chunks from creation to
//! presentation.
//!
//! ## Architecture
//!
//! A `World` is created once and shared by `Arc` between the streamer on the
//! main thread and the optional chunk update worker. It owns no thread of its
//! own; callers drive it one step at a time through:
//!
//! * `create_next_chunk`: populate the head of the creation queue
//! * `apply_modifications`: route deferred edit batches into chunk edit queues
//! * `update_chunks`: light and mesh the first populated chunk awaiting update
//! * `next_drawable`: take the head of the draw queue once it is populated
//!
//! ## Locking
//!
//! Every queue sits behind one coarse `Mutex<WorkQueues>`. Edits, the
//! modification drain and the update step hold it for their whole duration,
//! which serializes every writer of a populated chunk. Locks are always taken
//! in the order queues, store, chunk. Initial population is the only writer
//! that runs without the queue lock, and it never holds a chunk lock while
//! waiting for the queues.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cgmath::Point3;
use log::{debug, trace, warn};

use super::block::{block_side::BlockSide, BlockId};
use super::catalog::WorldCatalog;
use super::chunk::{lighting::LightPropagator, Chunk, Voxel};
use super::chunk_store::ChunkStore;
use super::coordinates::{ChunkCoord, VoxelEdit};
use super::generation::TerrainGenerator;
use super::CHUNK_HEIGHT;
use crate::core::MtResource;
use crate::engine_state::rendering::meshing::{Mesher, VoxelLookup};

/// The queues that drive chunks through their lifecycle.
#[derive(Debug, Default)]
pub struct WorkQueues {
    /// Chunks stored but not yet populated, oldest first.
    pub create: VecDeque<ChunkCoord>,
    /// Chunks waiting to be lit and meshed. Edited chunks sit at the head.
    pub update: VecDeque<ChunkCoord>,
    /// Meshed chunks waiting for hand-off to the presentation sink.
    pub draw: VecDeque<ChunkCoord>,
    /// Edit batches not yet routed to their chunks.
    pub modifications: VecDeque<Vec<VoxelEdit>>,
}

impl WorkQueues {
    /// Moves `coordinate` to the head of the update queue.
    pub fn push_update_front(&mut self, coordinate: ChunkCoord) {
        if let Some(index) = self.update.iter().position(|queued| *queued == coordinate) {
            self.update.remove(index);
        }
        self.update.push_front(coordinate);
    }

    /// Appends `coordinate` to the update queue unless it is already queued.
    pub fn push_update_back(&mut self, coordinate: ChunkCoord) {
        if !self.update.contains(&coordinate) {
            self.update.push_back(coordinate);
        }
    }

    fn push_draw(&mut self, coordinate: ChunkCoord) {
        if !self.draw.contains(&coordinate) {
            self.draw.push_back(coordinate);
        }
    }
}

pub struct World {
    generator: TerrainGenerator,
    chunks: MtResource<ChunkStore>,
    queues: Mutex<WorkQueues>,
}

impl World {
    pub fn new(generator: TerrainGenerator) -> Self {
        World {
            generator,
            chunks: MtResource::new(ChunkStore::new()),
            queues: Mutex::new(WorkQueues::default()),
        }
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    pub fn catalog(&self) -> &WorldCatalog {
        self.generator.catalog()
    }

    /// Locks the work queues, recovering the guard if a holder panicked.
    pub fn lock_queues(&self) -> MutexGuard<'_, WorkQueues> {
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn chunk(&self, coordinate: ChunkCoord) -> Option<MtResource<Chunk>> {
        self.chunks.get().get(coordinate)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.get().len()
    }

    /// Returns the chunk at `coordinate`, storing a new unpopulated one and
    /// queueing its creation if the slot was empty.
    ///
    /// Returns `None` for coordinates outside the world.
    pub fn ensure_chunk(
        &self,
        queues: &mut WorkQueues,
        coordinate: ChunkCoord,
        active: bool,
    ) -> Option<MtResource<Chunk>> {
        let (chunk, inserted) = self
            .chunks
            .get_mut()
            .insert_if_absent(coordinate, || Chunk::new(coordinate, active))?;
        if inserted {
            queues.create.push_back(coordinate);
        }
        Some(chunk)
    }

    /// Returns `true` if `position` lies in a streamable chunk and within the
    /// world's height.
    pub fn is_in_bounds(position: Point3<i32>) -> bool {
        ChunkCoord::from_voxel(position).is_in_world() && (0..CHUNK_HEIGHT).contains(&position.y)
    }

    /// The generated block id at `position`, ignoring any edits.
    pub fn get_voxel_id(&self, position: Point3<i32>) -> BlockId {
        self.generator.voxel_id(position)
    }

    /// The voxel at `position`: from its chunk when that chunk is populated,
    /// otherwise straight from the generator with no light.
    pub fn get_voxel_state(&self, position: Point3<i32>) -> Option<Voxel> {
        if !Self::is_in_bounds(position) {
            return None;
        }

        if let Some(chunk) = self.chunk(ChunkCoord::from_voxel(position)) {
            let chunk = chunk.get();
            if chunk.is_populated() {
                return chunk.voxel_at_world(position);
            }
        }

        Some(Voxel::new(self.generator.voxel_id(position)))
    }

    pub fn check_solid_at(&self, position: Point3<i32>) -> bool {
        self.get_voxel_state(position)
            .is_some_and(|voxel| self.catalog().block(voxel.id).is_solid)
    }

    pub fn get_chunk_at(&self, position: Point3<i32>) -> Option<MtResource<Chunk>> {
        self.chunk(ChunkCoord::from_voxel(position))
    }

    /// Sets the voxel at `position` to `block_id`.
    ///
    /// Returns `false` if the id is not in the catalog, the position is out of
    /// bounds or no chunk is stored there. Edits to a chunk that is not yet
    /// populated are held until its first update.
    pub fn edit_voxel(&self, position: Point3<i32>, block_id: BlockId) -> bool {
        if !self.catalog().contains_block(block_id) {
            warn!("Rejected edit at {:?}: unknown block id {}", position, block_id);
            return false;
        }
        if !Self::is_in_bounds(position) {
            warn!("Rejected edit at {:?}: outside the world", position);
            return false;
        }

        let coordinate = ChunkCoord::from_voxel(position);
        let mut queues = self.lock_queues();
        let Some(chunk) = self.chunk(coordinate) else {
            warn!("Rejected edit at {:?}: chunk {} is not loaded", position, coordinate);
            return false;
        };

        {
            let mut chunk = chunk.get_mut();
            if !chunk.is_populated() {
                chunk.enqueue_edit(VoxelEdit::new(position, block_id));
                return true;
            }
            chunk.set_block_at_world(position, block_id);
        }

        // Neighbours sharing the edited face cull against this voxel.
        let local = coordinate.to_local(position);
        for side in [BlockSide::BACK, BlockSide::FRONT, BlockSide::LEFT, BlockSide::RIGHT] {
            if Chunk::contains_local(local + side.offset()) {
                continue;
            }
            let neighbour = ChunkCoord::from_voxel(position + side.offset());
            // An unpopulated neighbour is meshed after its creation anyway.
            if self.chunk(neighbour).is_some_and(|chunk| chunk.get().is_populated()) {
                queues.push_update_front(neighbour);
            }
        }
        queues.push_update_front(coordinate);

        true
    }

    /// Marks the chunk at `coordinate` active, storing it first if absent.
    ///
    /// A chunk whose creation was skipped while it was inactive is queued for
    /// creation again. Returns `false` for coordinates outside the world.
    pub fn activate_chunk(&self, queues: &mut WorkQueues, coordinate: ChunkCoord) -> bool {
        let Some(chunk) = self.ensure_chunk(queues, coordinate, true) else {
            return false;
        };

        let mut chunk = chunk.get_mut();
        if !chunk.is_active() {
            chunk.set_active(true);
            if !chunk.is_populated() && !queues.create.contains(&coordinate) {
                queues.create.push_back(coordinate);
            }
        }
        true
    }

    /// Marks the chunk at `coordinate` inactive. Its data is kept.
    pub fn deactivate_chunk(&self, coordinate: ChunkCoord) {
        if let Some(chunk) = self.chunk(coordinate) {
            chunk.get_mut().set_active(false);
        }
    }

    /// Populates the first active chunk in the creation queue and returns its
    /// coordinate.
    ///
    /// Its flora batches join the modification queue and the chunk joins the
    /// back of the update queue. Inactive chunks passed over on the way are
    /// dropped from the queue until they are activated.
    pub fn create_next_chunk(&self) -> Option<ChunkCoord> {
        loop {
            let coordinate = self.lock_queues().create.pop_front()?;
            let Some(chunk) = self.chunk(coordinate) else {
                continue;
            };

            let flora = {
                let mut chunk = chunk.get_mut();
                if chunk.is_populated() {
                    continue;
                }
                if !chunk.is_active() {
                    trace!("Deferred creation of inactive chunk {}", coordinate);
                    continue;
                }
                chunk.populate(&self.generator)
            };

            let mut queues = self.lock_queues();
            queues
                .modifications
                .extend(flora.into_iter().filter(|batch| !batch.is_empty()));
            queues.push_update_back(coordinate);

            return Some(coordinate);
        }
    }

    /// Routes every queued edit batch to the chunks owning its positions.
    ///
    /// Edits landing in a chunk that does not exist yet create it inactive.
    /// Returns `true` if any batch was drained.
    pub fn apply_modifications(&self) -> bool {
        let mut queues = self.lock_queues();
        if queues.modifications.is_empty() {
            return false;
        }

        while let Some(batch) = queues.modifications.pop_front() {
            for edit in batch {
                if !Self::is_in_bounds(edit.position) {
                    trace!("Dropped edit outside the world at {:?}", edit.position);
                    continue;
                }

                let coordinate = ChunkCoord::from_voxel(edit.position);
                let Some(chunk) = self.ensure_chunk(&mut queues, coordinate, false) else {
                    continue;
                };

                let mut chunk = chunk.get_mut();
                chunk.enqueue_edit(edit);
                if chunk.is_populated() {
                    queues.push_update_back(coordinate);
                }
            }
        }

        true
    }

    /// Lights and meshes the first populated chunk in the update queue, then
    /// queues it for drawing.
    ///
    /// Unpopulated entries ahead of it keep their place. Returns `true` if a
    /// chunk was updated.
    pub fn update_chunks(&self) -> bool {
        let mut queues = self.lock_queues();

        let found = queues.update.iter().enumerate().find_map(|(index, coordinate)| {
            let chunk = self.chunk(*coordinate)?;
            let populated = chunk.get().is_populated();
            populated.then_some((index, *coordinate, chunk))
        });
        let Some((index, coordinate, chunk)) = found else {
            return false;
        };
        queues.update.remove(index);

        let catalog = self.catalog();
        let applied = {
            let mut chunk = chunk.get_mut();
            let applied = chunk.apply_pending_edits();
            LightPropagator::new(catalog).propagate(&mut chunk);
            applied
        };

        let mesh = Mesher::new(catalog).build(&chunk.get(), self);
        debug!(
            "Meshed chunk {}: {} edits applied, {} vertices",
            coordinate,
            applied,
            mesh.vertex_count()
        );
        chunk.get_mut().set_mesh(mesh);

        queues.push_draw(coordinate);
        true
    }

    /// Removes and returns the head of the draw queue if its chunk is
    /// populated. A head that is not ready stays queued.
    pub fn next_drawable(&self) -> Option<(ChunkCoord, MtResource<Chunk>)> {
        let mut queues = self.lock_queues();
        let coordinate = *queues.draw.front()?;
        let chunk = self.chunk(coordinate)?;
        if !chunk.get().is_populated() {
            return None;
        }
        queues.draw.pop_front();
        Some((coordinate, chunk))
    }
}

impl VoxelLookup for World {
    fn voxel_at(&self, position: Point3<i32>) -> Option<Voxel> {
        self.get_voxel_state(position)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::engine_state::voxels::biome::BiomeAttribute;
    use crate::engine_state::voxels::block::{default_blocks, AIR, CACTUS, GLASS, SAND, STONE};
    use crate::engine_state::voxels::structure::StructureKind;
    use crate::engine_state::voxels::{CHUNK_WIDTH, WORLD_SIZE_IN_VOXELS};

    fn world() -> World {
        World::new(TerrainGenerator::new(3, 42, Arc::new(WorldCatalog::default())))
    }

    /// A single desert biome with a cactus on every column.
    fn cactus_world() -> World {
        let biome = BiomeAttribute {
            name: "Cacti".to_owned(),
            scale: 0.1,
            terrain_height: 10.0,
            terrain_scale: 0.25,
            surface_block: SAND,
            sub_surface_block: SAND,
            major_flora: StructureKind::Cactus,
            major_flora_zone_threshold: -1.0,
            major_flora_placement_threshold: -1.0,
            min_height: 2,
            max_height: 3,
            ..BiomeAttribute::default()
        };
        let catalog = WorldCatalog::new(default_blocks(), vec![biome]).unwrap();
        World::new(TerrainGenerator::new(3, 42, Arc::new(catalog)))
    }

    fn populated(world: &World, coordinates: &[ChunkCoord]) {
        {
            let mut queues = world.lock_queues();
            for coordinate in coordinates {
                world.ensure_chunk(&mut queues, *coordinate, true);
            }
        }
        while world.create_next_chunk().is_some() {}
    }

    fn drain_updates(world: &World) {
        while world.update_chunks() {}
    }

    #[test]
    fn edit_is_visible_through_voxel_state() {
        let world = world();
        let coordinate = ChunkCoord::new(5, 5);
        populated(&world, &[coordinate]);

        let position = coordinate.origin() + cgmath::Vector3::new(7, 100, 7);
        assert!(world.edit_voxel(position, GLASS));
        assert_eq!(world.get_voxel_state(position).map(|voxel| voxel.id), Some(GLASS));
        assert!(world.check_solid_at(position));

        assert!(world.edit_voxel(position, AIR));
        assert!(!world.check_solid_at(position));
        assert_eq!(world.lock_queues().update.front(), Some(&coordinate));
    }

    #[test]
    fn invalid_edits_are_rejected() {
        let world = world();
        let coordinate = ChunkCoord::new(5, 5);
        populated(&world, &[coordinate]);
        let inside = coordinate.origin() + cgmath::Vector3::new(1, 50, 1);

        assert!(!world.edit_voxel(inside, 200));
        assert!(!world.edit_voxel(Point3::new(inside.x, CHUNK_HEIGHT, inside.z), STONE));
        assert!(!world.edit_voxel(Point3::new(3, 50, 3), STONE));
        assert!(!world.edit_voxel(Point3::new(20 * CHUNK_WIDTH, 50, 20 * CHUNK_WIDTH), STONE));
    }

    #[test]
    fn boundary_edit_requeues_the_neighbour() {
        let world = world();
        let left = ChunkCoord::new(5, 5);
        let right = ChunkCoord::new(6, 5);
        let far = ChunkCoord::new(5, 6);
        populated(&world, &[left, right, far]);
        drain_updates(&world);
        assert!(world.lock_queues().update.is_empty());

        let on_face = Point3::new(6 * CHUNK_WIDTH - 1, 120, 5 * CHUNK_WIDTH + 3);
        assert!(world.edit_voxel(on_face, STONE));

        let queues = world.lock_queues();
        assert_eq!(queues.update.iter().copied().collect::<Vec<_>>(), vec![left, right]);
    }

    #[test]
    fn boundary_edit_skips_unpopulated_neighbours() {
        let world = world();
        let left = ChunkCoord::new(5, 5);
        let spilled = ChunkCoord::new(6, 5);
        populated(&world, &[left]);
        world
            .lock_queues()
            .modifications
            .push_back(vec![VoxelEdit::new(spilled.origin() + cgmath::Vector3::new(1, 200, 1), GLASS)]);
        world.apply_modifications();
        drain_updates(&world);
        assert!(!world.chunk(spilled).unwrap().get().is_populated());

        let on_face = Point3::new(6 * CHUNK_WIDTH - 1, 120, 5 * CHUNK_WIDTH + 3);
        assert!(world.edit_voxel(on_face, STONE));
        assert_eq!(world.lock_queues().update.iter().copied().collect::<Vec<_>>(), vec![left]);

        drain_updates(&world);
        assert!(world.lock_queues().update.is_empty());
    }

    #[test]
    fn ceiling_edit_meshes_a_whole_cube() {
        let world = world();
        let coordinate = ChunkCoord::new(8, 8);
        populated(&world, &[coordinate]);
        drain_updates(&world);
        let chunk = world.chunk(coordinate).unwrap();
        let before = chunk.get().mesh().vertex_count();

        assert!(world.edit_voxel(coordinate.origin() + cgmath::Vector3::new(8, CHUNK_HEIGHT - 1, 8), STONE));
        drain_updates(&world);
        assert_eq!(chunk.get().mesh().vertex_count(), before + 24);
    }

    #[test]
    fn flora_waits_for_the_modification_drain() {
        let world = cactus_world();
        let coordinate = ChunkCoord::new(7, 7);
        populated(&world, &[coordinate]);

        assert_eq!(world.lock_queues().modifications.len(), (CHUNK_WIDTH * CHUNK_WIDTH) as usize);
        let origin = coordinate.origin();
        let surface = world.generator().sample_column(origin.x + 3, origin.z + 3).terrain_height;
        let above = origin + cgmath::Vector3::new(3, surface + 1, 3);
        assert_eq!(world.get_voxel_state(above).map(|voxel| voxel.id), Some(AIR));

        assert!(world.apply_modifications());
        assert!(world.lock_queues().modifications.is_empty());
        drain_updates(&world);

        assert_eq!(world.get_voxel_state(above).map(|voxel| voxel.id), Some(CACTUS));
        assert_eq!(world.get_voxel_id(above), AIR);
        assert_eq!(world.chunk_count(), 1);
    }

    #[test]
    fn interior_edit_only_requeues_its_chunk() {
        let world = world();
        let centre = ChunkCoord::new(5, 5);
        populated(&world, &[centre, ChunkCoord::new(6, 5), ChunkCoord::new(4, 5)]);
        drain_updates(&world);

        assert!(world.edit_voxel(centre.origin() + cgmath::Vector3::new(8, 120, 8), STONE));
        assert_eq!(world.lock_queues().update.len(), 1);
    }

    #[test]
    fn edits_to_unpopulated_chunks_wait_for_the_first_update() {
        let world = world();
        let coordinate = ChunkCoord::new(9, 9);
        {
            let mut queues = world.lock_queues();
            world.ensure_chunk(&mut queues, coordinate, true);
        }
        let position = coordinate.origin() + cgmath::Vector3::new(2, 200, 2);
        assert!(world.edit_voxel(position, GLASS));
        assert_eq!(world.get_voxel_state(position).map(|voxel| voxel.id), Some(AIR));

        world.create_next_chunk();
        drain_updates(&world);
        assert_eq!(world.get_voxel_state(position).map(|voxel| voxel.id), Some(GLASS));
    }

    #[test]
    fn modification_spill_creates_inactive_chunks() {
        let world = world();
        let target = ChunkCoord::new(20, 30);
        let inside = target.origin() + cgmath::Vector3::new(4, 90, 4);
        world.lock_queues().modifications.push_back(vec![
            VoxelEdit::new(inside, GLASS),
            VoxelEdit::new(Point3::new(-5, 90, 4), GLASS),
            VoxelEdit::new(Point3::new(WORLD_SIZE_IN_VOXELS - 3, 90, 40), GLASS),
        ]);

        assert!(world.apply_modifications());
        assert!(!world.apply_modifications());

        let chunk = world.chunk(target).unwrap();
        assert!(!chunk.get().is_active());
        assert_eq!(chunk.get().pending_edit_count(), 1);
        assert_eq!(world.chunk_count(), 1);
        assert_eq!(world.lock_queues().create.iter().copied().collect::<Vec<_>>(), vec![target]);
    }

    #[test]
    fn inactive_chunks_are_created_once_activated() {
        let world = world();
        let spilled = ChunkCoord::new(20, 30);
        let position = spilled.origin() + cgmath::Vector3::new(4, 200, 4);
        world.lock_queues().modifications.push_back(vec![VoxelEdit::new(position, GLASS)]);
        world.apply_modifications();

        assert_eq!(world.create_next_chunk(), None);
        assert!(!world.chunk(spilled).unwrap().get().is_populated());
        assert!(world.lock_queues().create.is_empty());

        {
            let mut queues = world.lock_queues();
            assert!(world.activate_chunk(&mut queues, spilled));
            assert!(world.activate_chunk(&mut queues, spilled));
            assert_eq!(queues.create.len(), 1);
        }
        assert_eq!(world.create_next_chunk(), Some(spilled));
        drain_updates(&world);
        assert_eq!(world.get_voxel_state(position).map(|voxel| voxel.id), Some(GLASS));
    }

    #[test]
    fn drained_edits_into_populated_chunks_requeue_them() {
        let world = world();
        let coordinate = ChunkCoord::new(12, 12);
        populated(&world, &[coordinate]);
        drain_updates(&world);
        world.apply_modifications();
        drain_updates(&world);

        let position = coordinate.origin() + cgmath::Vector3::new(5, 150, 5);
        world.lock_queues().modifications.push_back(vec![VoxelEdit::new(position, STONE)]);
        world.apply_modifications();
        assert!(world.lock_queues().update.contains(&coordinate));

        drain_updates(&world);
        assert_eq!(world.get_voxel_state(position).map(|voxel| voxel.id), Some(STONE));
    }

    #[test]
    fn update_skips_unpopulated_entries() {
        let world = world();
        let waiting = ChunkCoord::new(30, 30);
        let ready = ChunkCoord::new(31, 30);
        populated(&world, &[ready]);
        {
            let mut queues = world.lock_queues();
            queues.update.clear();
            world.ensure_chunk(&mut queues, waiting, true);
            queues.push_update_back(waiting);
            queues.push_update_back(ready);
        }

        assert!(world.update_chunks());
        let queues = world.lock_queues();
        assert_eq!(queues.update.iter().copied().collect::<Vec<_>>(), vec![waiting]);
        assert_eq!(queues.draw.iter().copied().collect::<Vec<_>>(), vec![ready]);
        drop(queues);

        assert!(!world.update_chunks());
        let (drawn, chunk) = world.next_drawable().unwrap();
        assert_eq!(drawn, ready);
        assert!(!chunk.get().mesh().is_empty());
    }

    #[test]
    fn unpopulated_draw_head_stays_queued() {
        let world = world();
        let coordinate = ChunkCoord::new(40, 40);
        {
            let mut queues = world.lock_queues();
            world.ensure_chunk(&mut queues, coordinate, true);
            queues.draw.push_back(coordinate);
        }
        assert!(world.next_drawable().is_none());
        assert_eq!(world.lock_queues().draw.len(), 1);
    }

    #[test]
    fn lookups_outside_the_world_are_none() {
        let world = world();
        assert!(world.get_voxel_state(Point3::new(5, 10, 5)).is_none());
        assert!(world.get_voxel_state(Point3::new(800, -1, 800)).is_none());
        assert!(!world.check_solid_at(Point3::new(800, CHUNK_HEIGHT, 800)));

        let position = Point3::new(800, 0, 800);
        assert_eq!(world.get_voxel_state(position).map(|voxel| voxel.id), Some(world.get_voxel_id(position)));
        assert!(world.check_solid_at(position));
        assert!(world.get_chunk_at(position).is_none());
    }
}
