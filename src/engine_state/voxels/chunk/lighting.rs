//! # Light Propagation
//!
//! Sunlight is computed per chunk in two passes:
//!
//! 1. A column pass casts a ray down every (x, z) column. The ray starts at
//!    full strength and drops to the transparency of any block dimmer than
//!    itself, so light never increases on the way down.
//! 2. A breadth-first flood fill spreads light sideways and downwards from
//!    every lit voxel, losing `LIGHT_FALLOFF` per step, which lights overhangs
//!    and cave mouths.
//!
//! Both passes stay inside the chunk. Light does not bleed across chunk
//! borders, so voxels next to a border can be darker than their neighbours in
//! the adjacent chunk.

use std::collections::VecDeque;

use bitvec::prelude::BitVec;
use cgmath::Point3;

use super::{Chunk, CHUNK_VOLUME};
use crate::engine_state::voxels::block::{block_side::BlockSide, AIR};
use crate::engine_state::voxels::catalog::WorldCatalog;
use crate::engine_state::voxels::{CHUNK_HEIGHT, CHUNK_WIDTH};

/// Light lost per voxel step of the flood fill.
pub const LIGHT_FALLOFF: f32 = 0.08;

pub struct LightPropagator<'a> {
    catalog: &'a WorldCatalog,
}

impl<'a> LightPropagator<'a> {
    pub fn new(catalog: &'a WorldCatalog) -> Self {
        LightPropagator { catalog }
    }

    /// Recomputes the light of every voxel in `chunk`.
    pub fn propagate(&self, chunk: &mut Chunk) {
        let mut frontier = VecDeque::new();
        let mut queued: BitVec = BitVec::repeat(false, CHUNK_VOLUME);

        self.cast_columns(chunk, &mut frontier, &mut queued);
        Self::flood_fill(chunk, &mut frontier, &mut queued);
    }

    fn cast_columns(&self, chunk: &mut Chunk, frontier: &mut VecDeque<Point3<i32>>, queued: &mut BitVec) {
        let voxels = chunk.voxels_mut();

        for x in 0..CHUNK_WIDTH {
            for z in 0..CHUNK_WIDTH {
                let mut light_ray = 1.0f32;

                for y in (0..CHUNK_HEIGHT).rev() {
                    let position = Point3::new(x, y, z);
                    let index = Chunk::index_of(position);
                    let voxel = &mut voxels[index];

                    if voxel.id != AIR {
                        let transparency = self.catalog.block(voxel.id).transparency;
                        if transparency < light_ray {
                            light_ray = transparency;
                        }
                    }
                    voxel.light = light_ray;

                    if light_ray > LIGHT_FALLOFF {
                        frontier.push_back(position);
                        queued.set(index, true);
                    }
                }
            }
        }
    }

    fn flood_fill(chunk: &mut Chunk, frontier: &mut VecDeque<Point3<i32>>, queued: &mut BitVec) {
        let voxels = chunk.voxels_mut();

        while let Some(position) = frontier.pop_front() {
            let index = Chunk::index_of(position);
            queued.set(index, false);
            let spread = voxels[index].light - LIGHT_FALLOFF;

            for side in BlockSide::all() {
                let neighbour = position + side.offset();
                if !Chunk::contains_local(neighbour) {
                    continue;
                }

                let neighbour_index = Chunk::index_of(neighbour);
                if voxels[neighbour_index].light < spread {
                    voxels[neighbour_index].light = spread;

                    if spread > LIGHT_FALLOFF && !queued[neighbour_index] {
                        frontier.push_back(neighbour);
                        queued.set(neighbour_index, true);
                    }
                }
            }
        }
    }
}
