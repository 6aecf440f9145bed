//! Climate field (C2): deterministic temperature and moisture scalars as a
//! function of world position, each a blend of a low-frequency base field and
//! a high-frequency variation field, nudged by a slow distance-from-origin
//! perturbation and a world-level bias.

use crate::noise::GradientNoise;

const VARIATION_WEIGHT: f64 = 0.15;
const DISTANCE_PERTURBATION_FREQUENCY: f64 = 2e-4;
const DISTANCE_PERTURBATION_FREQUENCY_2: f64 = 5e-4;
const BIAS_WEIGHT: f64 = 0.2;

pub struct ClimateField {
    temperature_base: GradientNoise,
    temperature_variation: GradientNoise,
    moisture_base: GradientNoise,
    moisture_variation: GradientNoise,
    temperature_bias: f64,
    moisture_bias: f64,
}

impl ClimateField {
    pub fn new(seed: i32, temperature_bias: f64, moisture_bias: f64) -> Self {
        let seed = seed as u32;
        Self {
            temperature_base: GradientNoise::new(seed ^ 0x5EED_0001, 3, 0.0015, 2.0, 0.5),
            temperature_variation: GradientNoise::new(seed ^ 0x5EED_0002, 2, 0.01, 2.0, 0.5),
            moisture_base: GradientNoise::new(seed ^ 0x5EED_0003, 3, 0.0015, 2.0, 0.5),
            moisture_variation: GradientNoise::new(seed ^ 0x5EED_0004, 2, 0.01, 2.0, 0.5),
            temperature_bias: temperature_bias.clamp(-1.0, 1.0),
            moisture_bias: moisture_bias.clamp(-1.0, 1.0),
        }
    }

    /// Temperature at a world position, always in `[0, 100]` (0 = coldest).
    ///
    /// §4.2 scopes the distance-from-origin perturbation to temperature only,
    /// applied multiplicatively: `combined *= 1 + 0.5*(0.15*sin(r*2e-4) +
    /// 0.08*sin(r*5e-4))`.
    pub fn temperature_at(&self, x: f64, z: f64) -> f64 {
        let combined = blend(&self.temperature_base, &self.temperature_variation, x, z) * distance_perturbation(x, z);
        (combined.clamp(-1.0, 1.0) + self.temperature_bias * BIAS_WEIGHT)
            .clamp(-1.0, 1.0)
            .mul_add(50.0, 50.0)
    }

    /// Moisture at a world position, always in `[0, 100]` (0 = driest). No
    /// distance-from-origin perturbation: §4.2 applies that term to
    /// temperature only.
    pub fn moisture_at(&self, x: f64, z: f64) -> f64 {
        let combined = blend(&self.moisture_base, &self.moisture_variation, x, z);
        (combined.clamp(-1.0, 1.0) + self.moisture_bias * BIAS_WEIGHT)
            .clamp(-1.0, 1.0)
            .mul_add(50.0, 50.0)
    }
}

/// Base+variation noise combined in raw `[-1, 1]` signal space, before any
/// perturbation or bias is applied.
fn blend(base: &GradientNoise, variation: &GradientNoise, x: f64, z: f64) -> f64 {
    let base_value = base.sample2(x, z);
    let variation_value = variation.sample2(x, z) * VARIATION_WEIGHT;
    base_value + variation_value
}

/// §4.2's temperature-only distance-from-origin perturbation multiplier:
/// `1 + 0.5*(0.15*sin(r*2e-4) + 0.08*sin(r*5e-4))`.
fn distance_perturbation(x: f64, z: f64) -> f64 {
    let r = (x * x + z * z).sqrt();
    1.0 + 0.5 * (0.15 * (r * DISTANCE_PERTURBATION_FREQUENCY).sin() + 0.08 * (r * DISTANCE_PERTURBATION_FREQUENCY_2).sin())
}
