//! Named terrain constants shared across the climate, terrain, and cave
//! modules, so a magic number only needs a home once.

/// Terrain height around which variation noise is centered.
pub const BASE_HEIGHT: i32 = 64;

/// Default sea level, also `GeneratorConfig::sea_level`'s default.
pub const SEA_LEVEL: i32 = 62;

/// Y level above which snow is eligible to appear on exposed surfaces.
pub const SNOW_LINE: i32 = 95;

/// Width, in blocks, of the gradual snow/no-snow transition band below
/// `SNOW_LINE`.
pub const SNOW_TRANSITION: i32 = 5;

/// Default underground water table level.
pub const AQUIFER_LEVEL: i32 = -30;

/// The water table can vary by up to this many blocks from `AQUIFER_LEVEL`.
pub const AQUIFER_VARIATION: i32 = 15;

/// Fraction of below-water-table cave voids that are reported as flooded.
pub const AQUIFER_CHANCE: f64 = 0.25;
