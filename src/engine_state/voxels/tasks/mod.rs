//! # Voxel Task System
//!
//! Background work over the shared `World`. The only task is the chunk update
//! step the worker repeats while threading is enabled.

pub mod chunk_update_task;
