use noise::{Fbm, MultiFractal, NoiseFn, OpenSimplex, Seedable};

/// A multi-octave (fBm) OpenSimplex2-family gradient noise field, sampled in 2D or 3D.
///
/// Wraps `noise::Fbm<OpenSimplex>` the way the rest of the pack wraps its noise
/// generators: a thin, seeded, stateless value type exposing plain `f64` samples
/// instead of handing the raw `noise` crate types to callers.
pub struct GradientNoise {
    fbm: Fbm<OpenSimplex>,
}

impl GradientNoise {
    /// `octaves` must be at least 1. `lacunarity` and `gain` follow the fBm
    /// convention: frequency multiplies by `lacunarity` and amplitude multiplies
    /// by `gain` each octave.
    pub fn new(seed: u32, octaves: usize, frequency: f64, lacunarity: f64, gain: f64) -> Self {
        let octaves = octaves.max(1);
        let fbm = Fbm::<OpenSimplex>::new(seed)
            .set_octaves(octaves)
            .set_frequency(frequency)
            .set_lacunarity(lacunarity)
            .set_persistence(gain);
        Self { fbm }
    }

    /// Samples the field at a 2D world position. Result is approximately `[-1, 1]`.
    pub fn sample2(&self, x: f64, z: f64) -> f64 {
        self.fbm.get([x, z])
    }

    /// Samples the field at a 3D world position. Result is approximately `[-1, 1]`.
    pub fn sample3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.fbm.get([x, y, z])
    }

    /// Convenience: same as [`Self::sample2`] but remapped to `[0, 1]`.
    pub fn sample2_unit(&self, x: f64, z: f64) -> f64 {
        (self.sample2(x, z) + 1.0) * 0.5
    }

    /// Convenience: same as [`Self::sample3`] but remapped to `[0, 1]`.
    pub fn sample3_unit(&self, x: f64, y: f64, z: f64) -> f64 {
        (self.sample3(x, y, z) + 1.0) * 0.5
    }

    pub fn seed(&self) -> u32 {
        self.fbm.seed()
    }
}
