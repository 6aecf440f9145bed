//! Error types surfaced by the generation core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a single biome definition file.
#[derive(Debug, Error)]
pub enum BiomeFileError {
    /// The file could not be read from disk.
    #[error("failed to read biome file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// The file did not parse as valid TOML.
    #[error("failed to parse biome file {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    /// A required field was missing from the definition.
    #[error("biome file {0} is missing required field `{1}`")]
    MissingField(PathBuf, &'static str),

    /// A field held a value outside its valid range and could not be clamped sensibly.
    #[error("biome file {0} has invalid field `{1}`: {2}")]
    InvalidField(PathBuf, &'static str, String),

    /// Two biomes normalized to the same registry name.
    #[error("biome `{0}` in {1} collides with an already-loaded biome of the same normalized name")]
    NameCollision(String, PathBuf),
}

/// Fatal errors that abort catalog loading (and therefore world initialization).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The catalog directory does not exist or could not be listed.
    #[error("catalog directory {0} could not be read: {1}")]
    CatalogDirUnreadable(PathBuf, #[source] std::io::Error),

    /// Every file in the catalog directory was invalid, or the directory contained no files.
    #[error("catalog at {0} produced no valid biomes")]
    EmptyCatalog(PathBuf),
}

/// Convenience alias for fallible catalog construction.
pub type CoreResult<T> = Result<T, CoreError>;
