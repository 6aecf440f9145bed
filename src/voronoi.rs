//! Voronoi-based biome center clustering (C5, §4.5): a jittered, domain-
//! distorted uniform grid rather than a full polygon Voronoi diagram. Exactly
//! one candidate center is generated per grid cell, nudged within the cell by
//! low-frequency jitter noise; sample positions are themselves distorted
//! before the nearest cells are located, which is what keeps the boundaries
//! from looking like a perfectly geometric grid.

use smallvec::SmallVec;

use crate::biome::BiomeCatalog;
use crate::biome::selector;
use crate::cache::GrowOnlyCache;
use crate::coords::pack_grid;
use crate::noise::GradientNoise;

/// Fraction of `spacing` a center may be nudged from its cell's geometric
/// center, in each axis independently (§4.5: `[-0.3*spacing, +0.3*spacing]`).
const JITTER_FRACTION: f64 = 0.3;

/// Fraction of `spacing` used as the domain-distortion amplitude applied to a
/// sample position before locating its nearest cells (§4.5 step 1).
const DISTORTION_FRACTION: f64 = 0.15;

/// Neighborhood radius (in grid cells) searched around a sample's cell when
/// gathering nearest-center candidates. At `search_n <= 8` a 5x5 neighborhood
/// always has enough candidates, since each cell holds exactly one center.
const SEARCH_RING: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiCenter {
    pub x: f64,
    pub z: f64,
    pub temperature: f64,
    pub moisture: f64,
    /// The biome this center was assigned at generation time, selected via
    /// §4.4 from this center's own (lower-frequency) climate sample.
    pub biome_index: usize,
    pub id: u64,
}

pub struct VoronoiField {
    spacing: f64,
    jitter_noise_x: GradientNoise,
    jitter_noise_z: GradientNoise,
    distortion_noise_x: GradientNoise,
    distortion_noise_z: GradientNoise,
    temperature_noise: GradientNoise,
    moisture_noise: GradientNoise,
    cache: GrowOnlyCache<VoronoiCenter>,
}

impl VoronoiField {
    pub fn new(seed: i32, spacing: f64) -> Self {
        let seed = seed as u32;
        Self {
            spacing,
            jitter_noise_x: GradientNoise::new(seed ^ 0xA001, 1, 1.0, 2.0, 0.5),
            jitter_noise_z: GradientNoise::new(seed ^ 0xA002, 1, 1.0, 2.0, 0.5),
            distortion_noise_x: GradientNoise::new(seed ^ 0xA003, 2, 0.02, 2.0, 0.5),
            distortion_noise_z: GradientNoise::new(seed ^ 0xA004, 2, 0.02, 2.0, 0.5),
            // Lower-frequency climate sample than §4.2's base field, dedicated
            // to picking each Voronoi center's own biome (§4.5).
            temperature_noise: GradientNoise::new(seed ^ 0xA005, 3, 0.0005, 2.0, 0.5),
            moisture_noise: GradientNoise::new(seed ^ 0xA006, 3, 0.0006, 2.0, 0.5),
            cache: GrowOnlyCache::new(),
        }
    }

    fn generate_center(&self, catalog: &BiomeCatalog, gx: i32, gz: i32) -> VoronoiCenter {
        let cell_center_x = gx as f64 * self.spacing + self.spacing * 0.5;
        let cell_center_z = gz as f64 * self.spacing + self.spacing * 0.5;

        let jitter_x = self.jitter_noise_x.sample2(gx as f64, gz as f64) * JITTER_FRACTION * self.spacing;
        let jitter_z = self.jitter_noise_z.sample2(gx as f64, gz as f64) * JITTER_FRACTION * self.spacing;

        let x = cell_center_x + jitter_x;
        let z = cell_center_z + jitter_z;

        let temperature = self.temperature_noise.sample2_unit(x, z) * 100.0;
        let moisture = self.moisture_noise.sample2_unit(x, z) * 100.0;
        let biome_index = selector::select(catalog, temperature, moisture).catalog_index;

        VoronoiCenter {
            x,
            z,
            temperature,
            moisture,
            biome_index,
            id: pack_grid(gx, gz),
        }
    }

    /// Returns (and caches) the single center belonging to grid cell `(gx, gz)`.
    /// Grid cell side length; callers dividing a spatial distance down into
    /// climate-falloff space (§4.7 step 2) need this.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn center_at_cell(&self, catalog: &BiomeCatalog, gx: i32, gz: i32) -> VoronoiCenter {
        let key = pack_grid(gx, gz);
        self.cache.get_or_insert_with(key, || self.generate_center(catalog, gx, gz))
    }

    fn distort(&self, x: f64, z: f64) -> (f64, f64) {
        let dx = self.distortion_noise_x.sample2(x, z) * DISTORTION_FRACTION * self.spacing;
        let dz = self.distortion_noise_z.sample2(x, z) * DISTORTION_FRACTION * self.spacing;
        (x + dx, z + dz)
    }

    /// All centers whose (undistorted) position falls inside the given world
    /// region, generating any not-yet-cached cells it touches.
    pub fn centers_in_region(
        &self,
        catalog: &BiomeCatalog,
        min_x: f64,
        max_x: f64,
        min_z: f64,
        max_z: f64,
    ) -> Vec<VoronoiCenter> {
        let gx_min = (min_x / self.spacing).floor() as i32 - 1;
        let gx_max = (max_x / self.spacing).ceil() as i32 + 1;
        let gz_min = (min_z / self.spacing).floor() as i32 - 1;
        let gz_max = (max_z / self.spacing).ceil() as i32 + 1;

        let mut out = Vec::new();
        for gx in gx_min..=gx_max {
            for gz in gz_min..=gz_max {
                let center = self.center_at_cell(catalog, gx, gz);
                if center.x >= min_x && center.x <= max_x && center.z >= min_z && center.z <= max_z {
                    out.push(center);
                }
            }
        }
        out
    }

    /// The `n` nearest centers to a world position (§4.5): the sample
    /// position is domain-distorted first, then candidates are gathered from
    /// the surrounding grid cells and sorted by Euclidean distance.
    pub fn nearest_centers(
        &self,
        catalog: &BiomeCatalog,
        x: f64,
        z: f64,
        n: usize,
    ) -> SmallVec<[(VoronoiCenter, f64); 8]> {
        let (dx, dz) = self.distort(x, z);
        let gx = (dx / self.spacing).floor() as i32;
        let gz = (dz / self.spacing).floor() as i32;

        let mut candidates: SmallVec<[(VoronoiCenter, f64); 25]> = SmallVec::new();
        for ngx in (gx - SEARCH_RING)..=(gx + SEARCH_RING) {
            for ngz in (gz - SEARCH_RING)..=(gz + SEARCH_RING) {
                let center = self.center_at_cell(catalog, ngx, ngz);
                let distance = euclidean(dx, dz, center.x, center.z);
                candidates.push((center, distance));
            }
        }
        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
        candidates.into_iter().take(n).collect()
    }
}

fn euclidean(x1: f64, z1: f64, x2: f64, z2: f64) -> f64 {
    ((x1 - x2).powi(2) + (z1 - z2).powi(2)).sqrt()
}
