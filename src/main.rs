//! # Voxel World Demo Entry Point
//!
//! Runs the headless streaming demo from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() {
    voxel_world::init_logger();

    if let Err(error) = voxel_world::run() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}
