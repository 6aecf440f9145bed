//! Procedural biome, climate, terrain, and cave generation core for a voxel
//! world engine.
//!
//! Every query is a deterministic, pure function of a world seed and integer
//! world coordinates: biome classification, surface height, climate scalars,
//! cave density, and smoothly-blended biome influence weights. The catalog of
//! biome definitions is loaded once at startup from a directory of files and
//! is read-only for the lifetime of a [`world::WorldGenerator`]; everything
//! downstream of it is safe to call concurrently from many worker threads via
//! `Arc<WorldGenerator>`.

pub mod biome;
pub mod cache;
pub mod caves;
pub mod climate;
pub mod config;
pub mod constants;
pub mod coords;
pub mod error;
pub mod influence;
pub mod noise;
pub mod terrain;
pub mod trees;
pub mod voronoi;
pub mod world;

pub use biome::{BiomeCatalog, BiomeDefinition, BlockId, FalloffConfig, FalloffType, SpawnLocation};
pub use config::GeneratorConfig;
pub use error::{BiomeFileError, CoreError, CoreResult};
pub use influence::BiomeInfluence;
pub use trees::WorldWriter;
pub use world::WorldGenerator;
