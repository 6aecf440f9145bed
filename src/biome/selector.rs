//! Biome selection (§4.4): picks the dominant biome for a climate pair in a
//! single pass over the catalog — early-exiting on a near-perfect match,
//! otherwise tracking the highest-weight biome within tolerance, and falling
//! back to the closest-climate biome by Manhattan distance if nothing
//! qualified.
//!
//! Both the early-exit and the fallback use Manhattan distance, the literal
//! §4.4 wording; this is a separate decision from `voronoi.rs`'s own nearest-
//! center search, which uses Euclidean distance per §4.5's own text — see the
//! grounding ledger for spec.md §9's open question.

use crate::cache::BoundedCache;
use crate::climate::ClimateField;
use crate::coords::{pack_xz, quantize};

use super::{BiomeCatalog, BiomeDefinition};

/// Per-axis tolerance within which a biome is even considered a candidate
/// (§4.4 step 3).
pub const TOLERANCE: f64 = 12.0;

/// Resolution, in world units, at which `BiomeSelectionCache` quantizes a
/// query position before selecting (§4.8 step 2: "through the biome cache,
/// which quantizes at 4-unit resolution").
const BIOME_CACHE_RESOLUTION: i32 = 4;

/// Selects the dominant biome for a climate pair (§4.4), in one pass:
/// - tracks the catalog-closest biome as a fallback (Manhattan distance),
/// - early-exits on a near-perfect match (`|dT| <= 1 && |dM| <= 1`),
/// - otherwise tracks the highest-weight biome among those within
///   `TOLERANCE` on both axes, weight = proximity * (rarity_weight / 50).
pub fn select(catalog: &BiomeCatalog, temperature: f64, moisture: f64) -> &BiomeDefinition {
    let mut fallback: Option<&BiomeDefinition> = None;
    let mut fallback_distance = f64::INFINITY;

    let mut best: Option<&BiomeDefinition> = None;
    let mut best_weight = f64::MIN;

    for biome in catalog.all() {
        let dt = (temperature - biome.temperature).abs();
        let dm = (moisture - biome.moisture).abs();
        let distance = dt + dm;

        if distance < fallback_distance {
            fallback_distance = distance;
            fallback = Some(biome);
        }

        if dt <= 1.0 && dm <= 1.0 {
            return biome;
        }

        if dt <= TOLERANCE && dm <= TOLERANCE {
            let proximity = 1.0 - distance / (2.0 * TOLERANCE);
            let weight = proximity * (biome.rarity_weight / 50.0);
            if weight > best_weight {
                best_weight = weight;
                best = Some(biome);
            }
        }
    }

    best.or(fallback)
        .expect("a loaded catalog is never empty")
}

/// The public `biome_at(x, z)` query (§6): the dominant biome directly from
/// the climate field at a column, with no Voronoi lookup involved — the
/// Voronoi/influence machinery exists only to blend *multiple* nearby
/// biomes, not to decide the single dominant one.
pub fn biome_at<'a>(catalog: &'a BiomeCatalog, climate: &ClimateField, x: f64, z: f64) -> &'a BiomeDefinition {
    let temperature = climate.temperature_at(x, z);
    let moisture = climate.moisture_at(x, z);
    select(catalog, temperature, moisture)
}

/// A bounded cache over `select`, quantizing query positions to 4-unit cells
/// (§4.8 step 2) so the terrain height ring-sampling and the public
/// `biome_at` query share one cache instead of re-running the O(biomes)
/// selection pass at every adjacent column.
pub struct BiomeSelectionCache {
    cache: BoundedCache<usize>,
}

impl BiomeSelectionCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: BoundedCache::new(max_size),
        }
    }

    pub fn get<'a>(&self, catalog: &'a BiomeCatalog, climate: &ClimateField, x: f64, z: f64) -> &'a BiomeDefinition {
        let key = pack_xz(quantize(x, BIOME_CACHE_RESOLUTION), quantize(z, BIOME_CACHE_RESOLUTION));
        let index = self.cache.get_or_insert_with(key, || biome_at(catalog, climate, x, z).catalog_index);
        catalog
            .get_by_index(index)
            .expect("cached index always refers to a live catalog entry")
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{BiomeFlags, FalloffConfig, SpawnLocation};
    use smallvec::SmallVec;

    fn make_biome(name: &str, temperature: f64, moisture: f64, rarity_weight: f64) -> BiomeDefinition {
        BiomeDefinition {
            catalog_index: 0,
            name: name.to_string(),
            temperature,
            moisture,
            temperature_min: (temperature - 10.0).max(0.0),
            temperature_max: (temperature + 10.0).min(100.0),
            moisture_min: (moisture - 10.0).max(0.0),
            moisture_max: (moisture + 10.0).min(100.0),
            age: 50.0,
            activity: 50.0,
            rarity_weight,
            spawn_location: SpawnLocation::AboveGround,
            lowest_y: 0,
            flags: BiomeFlags::default(),
            height_multiplier: 1.0,
            base_height_offset: 0,
            terrain_octaves: 5,
            terrain_lacunarity: 2.0,
            terrain_gain: 0.5,
            terrain_roughness: 0.5,
            tree_density: 50.0,
            primary_surface_block: crate::biome::BlockId::new(3),
            primary_stone_block: crate::biome::BlockId::new(1),
            primary_log_block: crate::biome::BlockId::new(6),
            primary_leaf_block: crate::biome::BlockId::new(7),
            falloff: FalloffConfig::default(),
            tree_templates: SmallVec::new(),
        }
    }

    fn catalog_of(biomes: Vec<BiomeDefinition>) -> BiomeCatalog {
        let mut name_index = hashbrown::HashMap::new();
        for (i, b) in biomes.iter().enumerate() {
            name_index.insert(b.name.clone(), i);
        }
        BiomeCatalog::from_parts(biomes, name_index)
    }

    #[test]
    fn early_exit_returns_a_near_perfect_match_immediately() {
        let biomes = vec![
            make_biome("cold", 10.0, 50.0, 50.0),
            make_biome("warm", 60.0, 50.0, 50.0),
        ];
        let catalog = catalog_of(biomes);
        let selected = select(&catalog, 10.4, 50.6);
        assert_eq!(selected.name, "cold");
    }

    #[test]
    fn within_tolerance_picks_the_highest_weighted_candidate() {
        let biomes = vec![
            make_biome("common", 20.0, 50.0, 90.0),
            make_biome("rare", 25.0, 50.0, 10.0),
        ];
        let catalog = catalog_of(biomes);
        // Distance 5 from "common", distance 0 from... neither is a perfect
        // match; both are within tolerance but "common"'s rarity dominates.
        let selected = select(&catalog, 22.0, 50.0);
        assert_eq!(selected.name, "common");
    }

    #[test]
    fn falls_back_to_closest_climate_when_nothing_is_in_tolerance() {
        let biomes = vec![make_biome("cold", 0.0, 0.0, 50.0), make_biome("hot", 100.0, 100.0, 50.0)];
        let catalog = catalog_of(biomes);
        let selected = select(&catalog, 30.0, 30.0);
        assert_eq!(selected.name, "cold");
    }
}
