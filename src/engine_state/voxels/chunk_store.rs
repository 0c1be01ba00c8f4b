//! # Chunk Store
//!
//! A fixed grid of chunk slots, one per in-world chunk coordinate. Slots are
//! filled once and never cleared: deactivated chunks keep their data so that
//! walking back into range costs nothing.

use super::chunk::Chunk;
use super::coordinates::ChunkCoord;
use super::WORLD_SIZE_IN_CHUNKS;
use crate::core::MtResource;

pub struct ChunkStore {
    slots: Vec<Option<MtResource<Chunk>>>,
    len: usize,
}

impl Default for ChunkStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkStore {
    pub fn new() -> Self {
        let size = (WORLD_SIZE_IN_CHUNKS * WORLD_SIZE_IN_CHUNKS) as usize;
        ChunkStore {
            slots: vec![None; size],
            len: 0,
        }
    }

    fn slot_index(coordinate: ChunkCoord) -> Option<usize> {
        coordinate
            .is_in_world()
            .then(|| (coordinate.x + coordinate.z * WORLD_SIZE_IN_CHUNKS) as usize)
    }

    pub fn get(&self, coordinate: ChunkCoord) -> Option<MtResource<Chunk>> {
        Self::slot_index(coordinate).and_then(|index| self.slots[index].clone())
    }

    /// Stores the chunk built by `create` unless the slot is already filled.
    ///
    /// Returns the stored chunk and whether it was inserted by this call, or
    /// `None` if the coordinate is not in world.
    pub fn insert_if_absent(
        &mut self,
        coordinate: ChunkCoord,
        create: impl FnOnce() -> Chunk,
    ) -> Option<(MtResource<Chunk>, bool)> {
        let index = Self::slot_index(coordinate)?;
        if let Some(existing) = &self.slots[index] {
            return Some((existing.clone(), false));
        }

        let chunk = MtResource::new(create());
        self.slots[index] = Some(chunk.clone());
        self.len += 1;
        Some((chunk, true))
    }

    /// Number of stored chunks.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Coordinates of every stored chunk.
    pub fn coordinates(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref().map(|_| {
                let index = index as i32;
                ChunkCoord::new(index % WORLD_SIZE_IN_CHUNKS, index / WORLD_SIZE_IN_CHUNKS)
            })
        })
    }
}
