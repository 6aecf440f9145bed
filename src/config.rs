//! Generator configuration (§4.11): the single, explicitly-constructed value
//! passed to `WorldGenerator::init`, replacing any notion of global tunables.

use crate::constants::SEA_LEVEL;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub seed: i32,

    pub temperature_bias: f64,
    pub moisture_bias: f64,
    pub age_bias: f64,

    pub center_spacing: f64,
    pub search_n: usize,
    pub max_cache_size: usize,
    pub sea_level: i32,
    pub tree_rng_offset: i32,
}

impl GeneratorConfig {
    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            temperature_bias: 0.0,
            moisture_bias: 0.0,
            age_bias: 0.0,
            center_spacing: 400.0,
            search_n: 4,
            max_cache_size: 100_000,
            sea_level: SEA_LEVEL,
            tree_rng_offset: 9999,
        }
    }

    pub fn with_temperature_bias(mut self, bias: f64) -> Self {
        self.temperature_bias = bias;
        self
    }

    pub fn with_moisture_bias(mut self, bias: f64) -> Self {
        self.moisture_bias = bias;
        self
    }

    pub fn with_age_bias(mut self, bias: f64) -> Self {
        self.age_bias = bias;
        self
    }

    pub fn with_center_spacing(mut self, spacing: f64) -> Self {
        self.center_spacing = spacing;
        self
    }

    pub fn with_search_n(mut self, search_n: usize) -> Self {
        self.search_n = search_n;
        self
    }

    pub fn with_max_cache_size(mut self, max_cache_size: usize) -> Self {
        self.max_cache_size = max_cache_size;
        self
    }

    pub fn with_sea_level(mut self, sea_level: i32) -> Self {
        self.sea_level = sea_level;
        self
    }

    pub fn with_tree_rng_offset(mut self, offset: i32) -> Self {
        self.tree_rng_offset = offset;
        self
    }
}
