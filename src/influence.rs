//! Biome influence engine (C7, §4.7): for a position, returns the set of
//! nearby biomes with normalized weights summing to 1, used by downstream
//! terrain/block placement to blend between biomes instead of hard-cutting
//! at a Voronoi boundary.

use smallvec::SmallVec;

use crate::biome::falloff::falloff_weight;
use crate::biome::{BiomeCatalog, BiomeDefinition};
use crate::terrain::temperature_altitude_modifier;
use crate::voronoi::VoronoiField;

#[derive(Debug, Clone, Copy)]
pub struct BiomeInfluence<'a> {
    pub biome: &'a BiomeDefinition,
    pub weight: f64,
}

/// 2D influence sample (§4.7): every one of the nearest `search_n` Voronoi
/// centers contributes its own (already-resolved) biome, weighted by the
/// falloff curve over the center's distance. If none pass the falloff's
/// cutoff, the single nearest center is used unweighted (step 3's `S == 0`
/// fallback) rather than re-deriving a biome from the raw climate field.
pub fn influences_at<'a>(
    catalog: &'a BiomeCatalog,
    voronoi: &VoronoiField,
    search_n: usize,
    x: f64,
    z: f64,
) -> SmallVec<[BiomeInfluence<'a>; 8]> {
    let nearest = voronoi.nearest_centers(catalog, x, z, search_n);
    let spacing = voronoi.spacing();

    let mut raw: SmallVec<[(&BiomeDefinition, f64); 8]> = SmallVec::new();
    for (center, distance) in nearest.iter() {
        if let Some(biome) = catalog.get_by_index(center.biome_index) {
            // §4.7 step 2: the spatial distance is divided by spacing before
            // the falloff call, landing it in the same climate-space range
            // `falloff_config.search_radius` is defined in.
            let climate_distance = distance / spacing;
            let weight = falloff_weight(climate_distance, &biome.falloff, biome.rarity_weight);
            if weight > 0.0 {
                raw.push((biome, weight));
            }
        }
    }

    if raw.is_empty() {
        if let Some((nearest_center, _)) = nearest.first() {
            if let Some(biome) = catalog.get_by_index(nearest_center.biome_index) {
                raw.push((biome, 1.0));
            }
        }
    }

    normalize(raw)
}

/// 3D influence sample: starts from [`influences_at`], then drops any biome
/// whose `spawn_location` or `lowest_y` forbids it at this altitude, modulates
/// each surviving weight by an altitude factor (§4.7: "additionally modulates
/// each weight by an altitude factor"), and renormalizes. If filtering would
/// remove every candidate, the original (unfiltered) set is kept so callers
/// never receive an empty set.
pub fn influences_3d_at<'a>(
    catalog: &'a BiomeCatalog,
    voronoi: &VoronoiField,
    search_n: usize,
    sea_level: i32,
    x: f64,
    y: i32,
    z: f64,
) -> SmallVec<[BiomeInfluence<'a>; 8]> {
    let base = influences_at(catalog, voronoi, search_n, x, z);
    let underground = y < sea_level;

    // Colder-than-base-climate altitudes (§4.8's `temp_drop`) bias influence
    // away from warm-preferring biomes and towards cold-preferring ones, so
    // a snowbound peak blends towards its alpine neighbor rather than the
    // warm biome that nominally owns the ground beneath it.
    let drop = temperature_altitude_modifier(y);

    let filtered: SmallVec<[(&BiomeDefinition, f64); 8]> = base
        .iter()
        .filter(|inf| {
            let allowed = if underground {
                inf.biome.spawn_location.allows_underground()
            } else {
                inf.biome.spawn_location.allows_above_ground()
            };
            allowed && y >= inf.biome.lowest_y
        })
        .map(|inf| {
            // Warm-preferring biomes (high `temperature`) lose more weight per
            // degree of altitude chill than cold-preferring ones.
            let altitude_factor = (1.0 - (drop / 100.0) * (inf.biome.temperature / 100.0)).clamp(0.05, 1.0);
            (inf.biome, inf.weight * altitude_factor)
        })
        .collect();

    if filtered.is_empty() {
        return base;
    }

    normalize(filtered)
}

fn normalize<'a>(items: SmallVec<[(&'a BiomeDefinition, f64); 8]>) -> SmallVec<[BiomeInfluence<'a>; 8]> {
    let total: f64 = items.iter().map(|(_, w)| w).sum();
    items
        .into_iter()
        .map(|(biome, weight)| BiomeInfluence {
            biome,
            weight: if total > 0.0 { weight / total } else { 0.0 },
        })
        .collect()
}
