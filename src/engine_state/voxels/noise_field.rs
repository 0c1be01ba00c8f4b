//! # Noise Field
//!
//! A seeded Perlin sampler shared by terrain, lode and flora generation.
//!
//! Terrain is regenerated on demand rather than stored, so every sample must
//! be a pure function of the seed and its arguments.

use cgmath::{Point2, Point3};
use noise::{NoiseFn, Perlin};

use super::CHUNK_WIDTH;

/// Offset applied to integer coordinates so samples never land on lattice
/// points, where Perlin noise is always zero.
const LATTICE_NUDGE: f32 = 0.1;

#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        NoiseField {
            perlin: Perlin::new(seed),
        }
    }

    /// Samples planar noise at `point`, returning a value in `[0, 1]`.
    ///
    /// `scale` is expressed per chunk width, so a scale of 1 spans one
    /// lattice cell every `CHUNK_WIDTH` voxels.
    pub fn sample_2d(&self, point: Point2<f32>, offset: f32, scale: f32) -> f32 {
        let x = (point.x + LATTICE_NUDGE) / CHUNK_WIDTH as f32 * scale + offset;
        let y = (point.y + LATTICE_NUDGE) / CHUNK_WIDTH as f32 * scale + offset;
        self.unit(x, y)
    }

    /// Tests a volumetric noise field against `threshold`.
    ///
    /// The field is the mean of the six ordered axis-pair samples of the
    /// scaled point, which gives an isotropic-looking 3D pattern from a 2D
    /// sampler.
    pub fn sample_3d(&self, point: Point3<f32>, offset: f32, scale: f32, threshold: f32) -> bool {
        let x = (point.x + offset + LATTICE_NUDGE) * scale;
        let y = (point.y + offset + LATTICE_NUDGE) * scale;
        let z = (point.z + offset + LATTICE_NUDGE) * scale;

        let ab = self.unit(x, y);
        let bc = self.unit(y, z);
        let ac = self.unit(x, z);
        let ba = self.unit(y, x);
        let cb = self.unit(z, y);
        let ca = self.unit(z, x);

        (ab + bc + ac + ba + cb + ca) / 6.0 > threshold
    }

    fn unit(&self, x: f32, y: f32) -> f32 {
        let raw = self.perlin.get([x as f64, y as f64]);
        (((raw + 1.0) * 0.5) as f32).clamp(0.0, 1.0)
    }
}
