//! Public entry point: ties the catalog, climate, Voronoi, terrain, cave, and
//! tree modules together behind one `WorldGenerator` that is safe to share
//! across worker threads via `Arc` (every internal cache already manages its
//! own interior mutability).

use std::path::Path;

use smallvec::SmallVec;

use crate::biome::selector::BiomeSelectionCache;
use crate::biome::{BiomeCatalog, BiomeDefinition};
use crate::caves::CaveField;
use crate::climate::ClimateField;
use crate::config::GeneratorConfig;
use crate::error::CoreResult;
use crate::influence::{self, BiomeInfluence};
use crate::terrain::{self, TerrainField};
use crate::trees::{TreeGenerator, WorldWriter};
use crate::voronoi::VoronoiField;

pub struct WorldGenerator {
    config: GeneratorConfig,
    catalog: BiomeCatalog,
    voronoi: VoronoiField,
    climate: ClimateField,
    terrain: TerrainField,
    caves: CaveField,
    biome_cache: BiomeSelectionCache,
}

impl WorldGenerator {
    /// Loads the catalog from `catalog_dir`, generates every biome's tree
    /// templates, and builds the noise fields for `config.seed`. Fails only if
    /// the catalog directory is unreadable or produces no valid biomes (§4.13).
    pub fn init(config: GeneratorConfig, catalog_dir: &Path) -> CoreResult<Self> {
        let mut catalog = BiomeCatalog::load_dir(catalog_dir)?;

        let tree_generator = TreeGenerator::new(config.seed, config.tree_rng_offset);
        tree_generator.generate_tree_templates(&mut catalog);

        let voronoi = VoronoiField::new(config.seed, config.center_spacing);
        let climate = ClimateField::new(config.seed, config.temperature_bias, config.moisture_bias);
        let terrain = TerrainField::new(config.seed, config.age_bias, config.max_cache_size);
        let caves = CaveField::new(config.seed);
        let biome_cache = BiomeSelectionCache::new(config.max_cache_size);

        Ok(Self {
            config,
            catalog,
            voronoi,
            climate,
            terrain,
            caves,
            biome_cache,
        })
    }

    pub fn biome_at(&self, x: f64, z: f64) -> &BiomeDefinition {
        self.biome_cache.get(&self.catalog, &self.climate, x, z)
    }

    pub fn temperature_at(&self, x: f64, z: f64) -> f64 {
        self.climate.temperature_at(x, z)
    }

    pub fn moisture_at(&self, x: f64, z: f64) -> f64 {
        self.climate.moisture_at(x, z)
    }

    pub fn height_at(&self, x: f64, z: f64) -> i32 {
        self.terrain
            .height_at(&self.catalog, &self.climate, &self.biome_cache, x, z)
    }

    pub fn influences_at(&self, x: f64, z: f64) -> SmallVec<[BiomeInfluence<'_>; 8]> {
        influence::influences_at(&self.catalog, &self.voronoi, self.config.search_n, x, z)
    }

    pub fn influences_3d_at(&self, x: f64, y: i32, z: f64) -> SmallVec<[BiomeInfluence<'_>; 8]> {
        influence::influences_3d_at(
            &self.catalog,
            &self.voronoi,
            self.config.search_n,
            self.config.sea_level,
            x,
            y,
            z,
        )
    }

    /// Cave density at a 3D position (§4.9). Internally samples the terrain
    /// height at `(x, z)` to evaluate the surface-entrance contribution.
    pub fn cave_density_at(&self, x: f64, y: f64, z: f64) -> f64 {
        let surface_height = self.height_at(x, z) as f64;
        self.caves.cave_density_at(x, y, z, surface_height)
    }

    /// Whether a carved void at `(x, y, z)` should be reported as flooded
    /// (below the local water table and inside the minority of positions that
    /// actually hold an aquifer).
    pub fn is_flooded_at(&self, x: f64, y: i32, z: f64) -> bool {
        self.caves.is_flooded_at(x, y, z)
    }

    /// Whether `(x, z)` at altitude `y` falls inside the dedicated
    /// underground-biome cellular field (§4.9 supplement).
    pub fn is_underground_biome_at(&self, x: f64, y: i32, z: f64) -> bool {
        self.caves.is_underground_biome_at(x, y, z)
    }

    pub fn temperature_altitude_modifier(&self, y: i32) -> f64 {
        terrain::temperature_altitude_modifier(y)
    }

    pub fn should_apply_snow(&self, temperature: f64, y: i32) -> bool {
        terrain::should_apply_snow(temperature, y)
    }

    pub fn sea_level(&self) -> i32 {
        self.config.sea_level
    }

    /// Instantiates one of `biome_name`'s pre-generated tree templates at a
    /// world position against a collaborator's `WorldWriter`, atomically
    /// (§4.10): either every target voxel is written, or (if the site lacks
    /// room) none are. Returns `None` if the biome or template index doesn't
    /// exist, `Some(false)` if the site was occupied, `Some(true)` on success.
    pub fn place_tree(
        &self,
        biome_name: &str,
        template_index: usize,
        world: &mut impl WorldWriter,
        origin_x: i32,
        origin_y: i32,
        origin_z: i32,
    ) -> Option<bool> {
        let biome = self.catalog.get_by_name(biome_name)?;
        let template = biome.tree_templates.get(template_index)?;
        Some(TreeGenerator::place_tree(template, world, origin_x, origin_y, origin_z))
    }

    pub fn catalog(&self) -> &BiomeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}
