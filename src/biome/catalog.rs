//! Biome catalog loading: one TOML file per biome in a directory, malformed
//! files logged and skipped, a wholly-empty result treated as fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::{BiomeFileError, CoreError, CoreResult};

use super::{BiomeDefinition, BiomeFlags, FalloffConfig, SpawnLocation};
use super::{BlockId, TreeTemplate};

/// On-disk shape of a biome file. Every field has a default so a minimal file
/// (just `name`, a temperature range, and a moisture range) is valid.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RawBiome {
    name: String,

    /// Preferred climate center. `-1.0` is the "missing" sentinel: these two
    /// are required keys per spec §6, so a negative value is rejected rather
    /// than clamped.
    temperature: f64,
    moisture: f64,

    /// `-1.0` is the "not set" sentinel (§3): an explicit range defaults to
    /// `temperature`/`moisture` center ± 10 when omitted.
    temperature_min: f64,
    temperature_max: f64,
    moisture_min: f64,
    moisture_max: f64,

    /// Required key per spec §6; `-1.0` sentinel for "missing".
    age: f64,
    /// Required key per spec §6; `-1.0` sentinel for "missing".
    activity: f64,

    rarity_weight: f64,

    spawn_location: SpawnLocation,
    lowest_y: i32,

    trees_spawn: bool,
    underwater_biome: bool,
    river_compatible: bool,
    hostile_spawn: bool,

    height_multiplier: f64,
    base_height_offset: i32,

    terrain_octaves: usize,
    terrain_lacunarity: f64,
    terrain_gain: f64,
    terrain_roughness: f64,

    tree_density: f64,

    primary_surface_block: u16,
    primary_stone_block: u16,
    primary_log_block: u16,
    primary_leaf_block: u16,

    #[serde(flatten)]
    falloff: FalloffConfig,
}

impl Default for RawBiome {
    fn default() -> Self {
        Self {
            name: String::new(),
            temperature: -1.0,
            moisture: -1.0,
            temperature_min: -1.0,
            temperature_max: -1.0,
            moisture_min: -1.0,
            moisture_max: -1.0,
            age: -1.0,
            activity: -1.0,
            rarity_weight: 50.0,
            spawn_location: SpawnLocation::default(),
            lowest_y: 0,
            trees_spawn: true,
            underwater_biome: false,
            river_compatible: true,
            hostile_spawn: true,
            height_multiplier: 1.0,
            base_height_offset: 0,
            terrain_octaves: 5,
            terrain_lacunarity: 2.0,
            terrain_gain: 0.5,
            terrain_roughness: 0.5,
            tree_density: 50.0,
            primary_surface_block: 3,
            primary_stone_block: 1,
            primary_log_block: 6,
            primary_leaf_block: 7,
            falloff: FalloffConfig::default(),
        }
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

fn validate(raw: RawBiome, path: &Path, catalog_index: usize) -> Result<BiomeDefinition, BiomeFileError> {
    if raw.name.trim().is_empty() {
        return Err(BiomeFileError::MissingField(path.to_path_buf(), "name"));
    }
    if raw.temperature < 0.0 {
        return Err(BiomeFileError::MissingField(path.to_path_buf(), "temperature"));
    }
    if raw.moisture < 0.0 {
        return Err(BiomeFileError::MissingField(path.to_path_buf(), "moisture"));
    }
    if raw.age < 0.0 {
        return Err(BiomeFileError::MissingField(path.to_path_buf(), "age"));
    }
    if raw.activity < 0.0 {
        return Err(BiomeFileError::MissingField(path.to_path_buf(), "activity"));
    }
    if !(1.0..=100.0).contains(&raw.rarity_weight) {
        return Err(BiomeFileError::InvalidField(
            path.to_path_buf(),
            "rarity_weight",
            format!("{} is outside [1, 100]", raw.rarity_weight),
        ));
    }

    let temperature = raw.temperature.clamp(0.0, 100.0);
    let moisture = raw.moisture.clamp(0.0, 100.0);
    let age = raw.age.clamp(0.0, 100.0);
    let activity = raw.activity.clamp(0.0, 100.0);

    // `-1` sentinel: an omitted range defaults to center +/- 10 (§3).
    let temperature_min = if raw.temperature_min < 0.0 {
        (temperature - 10.0).max(0.0)
    } else {
        raw.temperature_min.clamp(0.0, 100.0)
    };
    let temperature_max = if raw.temperature_max < 0.0 {
        (temperature + 10.0).min(100.0)
    } else {
        raw.temperature_max.clamp(0.0, 100.0)
    };
    let moisture_min = if raw.moisture_min < 0.0 {
        (moisture - 10.0).max(0.0)
    } else {
        raw.moisture_min.clamp(0.0, 100.0)
    };
    let moisture_max = if raw.moisture_max < 0.0 {
        (moisture + 10.0).min(100.0)
    } else {
        raw.moisture_max.clamp(0.0, 100.0)
    };

    if temperature_min > temperature_max {
        return Err(BiomeFileError::InvalidField(
            path.to_path_buf(),
            "temperature_min",
            "must not exceed temperature_max".to_string(),
        ));
    }
    if moisture_min > moisture_max {
        return Err(BiomeFileError::InvalidField(
            path.to_path_buf(),
            "moisture_min",
            "must not exceed moisture_max".to_string(),
        ));
    }

    let mut flags = BiomeFlags::empty();
    flags.set(BiomeFlags::TREES_SPAWN, raw.trees_spawn);
    flags.set(BiomeFlags::UNDERWATER_BIOME, raw.underwater_biome);
    flags.set(BiomeFlags::RIVER_COMPATIBLE, raw.river_compatible);
    flags.set(BiomeFlags::HOSTILE_SPAWN, raw.hostile_spawn);

    Ok(BiomeDefinition {
        catalog_index,
        name: normalize_name(&raw.name),
        temperature,
        moisture,
        temperature_min,
        temperature_max,
        moisture_min,
        moisture_max,
        age,
        activity,
        rarity_weight: raw.rarity_weight,
        spawn_location: raw.spawn_location,
        lowest_y: raw.lowest_y,
        flags,
        height_multiplier: raw.height_multiplier,
        base_height_offset: raw.base_height_offset,
        terrain_octaves: raw.terrain_octaves.max(1),
        terrain_lacunarity: raw.terrain_lacunarity,
        terrain_gain: raw.terrain_gain,
        terrain_roughness: raw.terrain_roughness,
        tree_density: raw.tree_density,
        primary_surface_block: BlockId::new(raw.primary_surface_block),
        primary_stone_block: BlockId::new(raw.primary_stone_block),
        primary_log_block: BlockId::new(raw.primary_log_block),
        primary_leaf_block: BlockId::new(raw.primary_leaf_block),
        falloff: raw.falloff,
        tree_templates: smallvec::SmallVec::new(),
    })
}

fn load_one(path: &Path, catalog_index: usize) -> Result<BiomeDefinition, BiomeFileError> {
    let text = fs::read_to_string(path).map_err(|e| BiomeFileError::Io(path.to_path_buf(), e))?;
    let raw: RawBiome =
        toml::from_str(&text).map_err(|e| BiomeFileError::Parse(path.to_path_buf(), e))?;
    validate(raw, path, catalog_index)
}

/// The set of biome definitions loaded at startup, read-only for the lifetime
/// of a `WorldGenerator`.
#[derive(Debug)]
pub struct BiomeCatalog {
    biomes: Vec<BiomeDefinition>,
    name_index: hashbrown::HashMap<String, usize>,
}

impl BiomeCatalog {
    /// Builds a catalog directly from already-validated parts, bypassing disk
    /// I/O. Used by other modules' unit tests that need a real `BiomeCatalog`
    /// without writing a temp directory of TOML files.
    #[doc(hidden)]
    pub fn from_parts(biomes: Vec<BiomeDefinition>, name_index: hashbrown::HashMap<String, usize>) -> Self {
        Self { biomes, name_index }
    }

    /// Loads every `*.toml` file directly inside `dir`. Per-file parse or
    /// validation errors are logged and skipped; a name collision between two
    /// files is also skipped (first file wins, matching directory iteration
    /// order). Only an empty result (no valid files at all) is fatal.
    pub fn load_dir(dir: &Path) -> CoreResult<Self> {
        let entries = fs::read_dir(dir).map_err(|e| {
            let err = CoreError::CatalogDirUnreadable(dir.to_path_buf(), e);
            error!(error = %err, "catalog load failed");
            err
        })?;

        let mut biomes = Vec::new();
        let mut name_index = hashbrown::HashMap::new();

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("toml"))
            .collect();
        paths.sort();

        for path in paths {
            match load_one(&path, biomes.len()) {
                Ok(biome) => {
                    if name_index.contains_key(&biome.name) {
                        warn!(
                            file = %path.display(),
                            name = %biome.name,
                            "skipping biome file: name collides with an already-loaded biome"
                        );
                        continue;
                    }
                    name_index.insert(biome.name.clone(), biomes.len());
                    biomes.push(biome);
                }
                Err(err) => {
                    warn!(error = %err, "skipping invalid biome file");
                }
            }
        }

        if biomes.is_empty() {
            let err = CoreError::EmptyCatalog(dir.to_path_buf());
            error!(error = %err, "catalog load failed");
            return Err(err);
        }

        let (temp_min, temp_max) = temperature_bounds(&biomes);
        info!(
            biome_count = biomes.len(),
            temp_min, temp_max, "biome catalog loaded"
        );

        Ok(Self { biomes, name_index })
    }

    pub fn get_by_name(&self, name: &str) -> Option<&BiomeDefinition> {
        self.name_index
            .get(&normalize_name(name))
            .map(|&idx| &self.biomes[idx])
    }

    pub fn get_by_index(&self, index: usize) -> Option<&BiomeDefinition> {
        self.biomes.get(index)
    }

    pub fn get_by_index_mut(&mut self, index: usize) -> Option<&mut BiomeDefinition> {
        self.biomes.get_mut(index)
    }

    pub fn count(&self) -> usize {
        self.biomes.len()
    }

    pub fn all(&self) -> &[BiomeDefinition] {
        &self.biomes
    }

    pub fn all_mut(&mut self) -> &mut [BiomeDefinition] {
        &mut self.biomes
    }

    /// Biomes whose climate range overlaps the given temperature/moisture box,
    /// used by the selector to gather neighboring candidates (§4.4).
    pub fn in_range(
        &self,
        temp_min: f64,
        temp_max: f64,
        moisture_min: f64,
        moisture_max: f64,
    ) -> Vec<&BiomeDefinition> {
        self.biomes
            .iter()
            .filter(|b| {
                b.temperature_max >= temp_min
                    && b.temperature_min <= temp_max
                    && b.moisture_max >= moisture_min
                    && b.moisture_min <= moisture_max
            })
            .collect()
    }
}

fn temperature_bounds(biomes: &[BiomeDefinition]) -> (f64, f64) {
    let min = biomes
        .iter()
        .map(|b| b.temperature_min)
        .fold(f64::INFINITY, f64::min);
    let max = biomes
        .iter()
        .map(|b| b.temperature_max)
        .fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}
