//! Terrain surface height (C8, §4.8): a single shared fBm field samples the
//! raw variation; the dominant biome at a column (resolved through the same
//! 4-unit-quantized cache the public `biome_at` query uses) supplies the
//! `age`-derived variation range and a mountain-ring density boost for
//! biomes whose `height_multiplier` marks them as peak terrain.

use std::f64::consts::TAU;

use crate::biome::selector::BiomeSelectionCache;
use crate::biome::BiomeCatalog;
use crate::cache::BoundedCache;
use crate::climate::ClimateField;
use crate::constants::{BASE_HEIGHT, SNOW_LINE, SNOW_TRANSITION};
use crate::coords::{pack_xz, quantize};
use crate::noise::GradientNoise;

/// Resolution, in world units, at which the height cache quantizes a query
/// position (§4.8 step 1).
const HEIGHT_CACHE_RESOLUTION: i32 = 2;

/// `height_multiplier` threshold above which a biome counts as "mountainous"
/// for the ring-sampled density boost (§4.8 step 6).
const MOUNTAIN_MULTIPLIER_THRESHOLD: f64 = 1.5;

/// Radius, in world units, of the 8-point ring sampled around a mountainous
/// column to estimate how deep into a mountain range it sits (§4.8 step 6).
const RING_RADIUS: f64 = 500.0;
const RING_SAMPLES: usize = 8;

pub struct TerrainField {
    terrain_noise: GradientNoise,
    height_cache: BoundedCache<i32>,
    age_bias: f64,
}

impl TerrainField {
    pub fn new(seed: i32, age_bias: f64, max_cache_size: usize) -> Self {
        Self {
            terrain_noise: GradientNoise::new(seed as u32 ^ 0xC0DE_0000, 5, 0.015, 2.0, 0.5),
            height_cache: BoundedCache::new(max_cache_size),
            age_bias,
        }
    }

    pub fn height_at(
        &self,
        catalog: &BiomeCatalog,
        climate: &ClimateField,
        biome_cache: &BiomeSelectionCache,
        x: f64,
        z: f64,
    ) -> i32 {
        let key = pack_xz(
            quantize(x, HEIGHT_CACHE_RESOLUTION),
            quantize(z, HEIGHT_CACHE_RESOLUTION),
        );
        self.height_cache
            .get_or_insert_with(key, || self.compute_height(catalog, climate, biome_cache, x, z))
    }

    fn compute_height(
        &self,
        catalog: &BiomeCatalog,
        climate: &ClimateField,
        biome_cache: &BiomeSelectionCache,
        x: f64,
        z: f64,
    ) -> i32 {
        let biome = biome_cache.get(catalog, climate, x, z);

        let n = self.terrain_noise.sample2(x, z).clamp(-1.0, 1.0);
        let age_n = (biome.age / 100.0 - self.age_bias).clamp(0.0, 1.0);
        let variation = 30.0 - 25.0 * age_n;

        let mut multiplier = biome.height_multiplier;
        if multiplier > MOUNTAIN_MULTIPLIER_THRESHOLD {
            let density = self.mountain_ring_density(catalog, climate, biome_cache, x, z);
            multiplier *= 0.5 + 1.5 * density;
        }

        BASE_HEIGHT + (n * variation * multiplier).round() as i32
    }

    /// Fraction of 8 ring samples around `(x, z)` whose own dominant biome is
    /// also mountainous, used to push a peak even higher the deeper it sits
    /// inside a mountain range rather than at its edge (§4.8 step 6).
    fn mountain_ring_density(
        &self,
        catalog: &BiomeCatalog,
        climate: &ClimateField,
        biome_cache: &BiomeSelectionCache,
        x: f64,
        z: f64,
    ) -> f64 {
        let mut count = 0usize;
        for i in 0..RING_SAMPLES {
            let angle = i as f64 * TAU / RING_SAMPLES as f64;
            let rx = x + angle.cos() * RING_RADIUS;
            let rz = z + angle.sin() * RING_RADIUS;
            let ring_biome = biome_cache.get(catalog, climate, rx, rz);
            if ring_biome.height_multiplier > MOUNTAIN_MULTIPLIER_THRESHOLD {
                count += 1;
            }
        }
        count as f64 / RING_SAMPLES as f64
    }
}

/// How much colder a position is than its base climate temperature, purely
/// from being `y` blocks above `SNOW_LINE` (§4.8: `temp_drop(y) = max(0, (y -
/// SNOW_LINE) * k)`). Always non-negative.
pub fn temperature_altitude_modifier(y: i32) -> f64 {
    let above_snow_line = (y - SNOW_LINE).max(0) as f64;
    (above_snow_line * 0.05).min(40.0)
}

/// Whether snow should be rendered at a given temperature and altitude:
/// always above `SNOW_LINE`, never more than `SNOW_TRANSITION` blocks below
/// it, and only then if the local climate is cold enough to reach that low
/// into the transition band.
pub fn should_apply_snow(temperature: f64, y: i32) -> bool {
    if y >= SNOW_LINE {
        return true;
    }
    if y < SNOW_LINE - SNOW_TRANSITION {
        return false;
    }

    let band_position = (SNOW_LINE - y) as f64 / SNOW_TRANSITION as f64;
    let cold_factor = 1.0 - (temperature / 100.0);
    band_position <= cold_factor
}
