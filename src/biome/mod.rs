//! Biome data model (§3) and the falloff curve family (§4.6) that turns a
//! climate distance into an influence weight.

pub mod catalog;
pub mod falloff;
pub mod selector;

use smallvec::SmallVec;

pub use catalog::BiomeCatalog;
pub use falloff::{falloff_weight, FalloffConfig, FalloffType};

/// Opaque handle into a collaborator's own block-ID registry. This crate never
/// interprets the value, it only hands it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

bitflags::bitflags! {
    /// Small boolean properties of a biome that don't warrant their own field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BiomeFlags: u8 {
        const TREES_SPAWN       = 0b0001;
        const UNDERWATER_BIOME  = 0b0010;
        const RIVER_COMPATIBLE  = 0b0100;
        const HOSTILE_SPAWN     = 0b1000;
    }
}

impl Default for BiomeFlags {
    fn default() -> Self {
        BiomeFlags::TREES_SPAWN | BiomeFlags::RIVER_COMPATIBLE | BiomeFlags::HOSTILE_SPAWN
    }
}

/// Where a biome is permitted to be selected: only underground, only above
/// ground, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnLocation {
    Underground,
    AboveGround,
    Both,
}

impl Default for SpawnLocation {
    fn default() -> Self {
        SpawnLocation::AboveGround
    }
}

impl SpawnLocation {
    pub fn allows_underground(self) -> bool {
        matches!(self, SpawnLocation::Underground | SpawnLocation::Both)
    }

    pub fn allows_above_ground(self) -> bool {
        matches!(self, SpawnLocation::AboveGround | SpawnLocation::Both)
    }
}

/// A tree template: a seeded, recursive structure of offset/block pairs
/// relative to a trunk-base origin (§3 supplement, §4.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeTemplate {
    pub size: TreeSize,
    /// Offsets relative to the trunk base, paired with the block to place there.
    pub blocks: Vec<(glam_like::IVec3, BlockId)>,
}

/// A minimal integer 3-vector, avoiding a dependency on a full linear-algebra
/// crate for a type this crate only ever adds, compares, and iterates.
pub mod glam_like {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct IVec3 {
        pub x: i32,
        pub y: i32,
        pub z: i32,
    }

    impl IVec3 {
        pub const fn new(x: i32, y: i32, z: i32) -> Self {
            Self { x, y, z }
        }
    }
}

/// A fully resolved biome definition, as loaded from a single catalog file.
#[derive(Debug, Clone)]
pub struct BiomeDefinition {
    /// Position of this biome within its catalog's `all()` slice; stable for
    /// the catalog's lifetime, used to key per-biome terrain noise fields and
    /// as the identity stored by a Voronoi center (§4.5).
    pub catalog_index: usize,

    pub name: String,

    /// Preferred climate center, `[0, 100]` in both axes (§3 Biome descriptor).
    pub temperature: f64,
    pub moisture: f64,

    /// Explicit climate-space range this biome is eligible to be selected
    /// within; defaults to `temperature`/`moisture` center ± 10 when the
    /// catalog file omits them (§3 `-1` sentinel).
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub moisture_min: f64,
    pub moisture_max: f64,

    /// Terrain roughness control, `[0, 100]`; 0 = rough, 100 = flat (§3).
    /// Feeds `age_n` in the terrain height formula (§4.8 step 4).
    pub age: f64,

    /// Surface-structure spawn bias, `[0, 100]`; opaque to this core, carried
    /// through for collaborators that place structures.
    pub activity: f64,

    /// How common the biome is, `[1, 100]`; feeds the falloff weight and the
    /// catalog's weighted fallback selection.
    pub rarity_weight: f64,

    pub spawn_location: SpawnLocation,
    pub lowest_y: i32,
    pub flags: BiomeFlags,

    pub height_multiplier: f64,
    pub base_height_offset: i32,

    /// Per-biome terrain-roughness noise parameters, carried per §3 for
    /// collaborators (mesh generation, block selection) even though the
    /// terrain height formula of §4.8 samples one shared field across all
    /// biomes.
    pub terrain_octaves: usize,
    pub terrain_lacunarity: f64,
    pub terrain_gain: f64,
    pub terrain_roughness: f64,

    pub tree_density: f64,

    pub primary_surface_block: BlockId,
    pub primary_stone_block: BlockId,
    pub primary_log_block: BlockId,
    pub primary_leaf_block: BlockId,

    pub falloff: FalloffConfig,

    /// Populated by `generate_tree_templates` (§4.10); empty until then.
    pub tree_templates: SmallVec<[TreeTemplate; 10]>,
}

impl BiomeDefinition {
    pub fn contains_climate(&self, temperature: f64, moisture: f64) -> bool {
        temperature >= self.temperature_min
            && temperature <= self.temperature_max
            && moisture >= self.moisture_min
            && moisture <= self.moisture_max
    }
}
