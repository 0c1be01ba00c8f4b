//! # Core Module
//!
//! Shared-ownership primitives used by the world, the streamer and the
//! background worker.
//!
//! ## Key Components
//! - `MtResource`: thread-safe reference-counted value behind a read-write lock
//!
//! ## Usage
//! ```rust
//! use voxel_world::core::MtResource;
//!
//! let counter = MtResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod mt_resource;

pub use mt_resource::MtResource;
