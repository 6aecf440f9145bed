//! Falloff curve family (§4.6): normalizes a raw temperature/moisture distance
//! into an unnormalized influence weight. Every curve agrees on two endpoint
//! conditions — weight `1.0` at distance `0` (before multipliers), weight `0.0`
//! at or beyond `search_radius` — so biome influence never has a visible seam
//! at the boundary where a curve is swapped for another.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FalloffType {
    Linear,
    Smooth,
    VerySmooth,
    Sharp,
    Cosine,
    Polynomial2,
    Polynomial3,
    Polynomial4,
    InverseSquare,
    Sigmoid,
    Smoothstep,
    Smootherstep,
    Gaussian,
    Hyperbolic,
}

impl Default for FalloffType {
    fn default() -> Self {
        FalloffType::Smooth
    }
}

/// Per-biome falloff tuning. Defaults match the "natural" preset used for
/// biomes that don't override any of these fields in their catalog entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FalloffConfig {
    pub falloff_type: FalloffType,
    pub sharpness: f64,
    pub search_radius: f64,
    pub exponential_factor: f64,
    pub influence_multiplier: f64,
    pub edge_softness: f64,
}

impl Default for FalloffConfig {
    fn default() -> Self {
        Self {
            falloff_type: FalloffType::Smooth,
            sharpness: 1.0,
            search_radius: 28.0,
            exponential_factor: -3.0,
            influence_multiplier: 1.0,
            edge_softness: 1.0,
        }
    }
}

/// Computes the unnormalized influence weight of a biome `search_radius`/`rarity_weight`
/// away at `distance` (in climate space). The caller is responsible for normalizing
/// the resulting weights across all candidate biomes so they sum to 1.
pub fn falloff_weight(distance: f64, config: &FalloffConfig, rarity_weight: f64) -> f64 {
    if distance > config.search_radius || config.search_radius <= 0.0 {
        return 0.0;
    }

    let mut normalized = distance / config.search_radius;
    if (config.edge_softness - 1.0).abs() > f64::EPSILON {
        normalized = normalized.max(0.0).powf(config.edge_softness);
    }

    let mut base = match config.falloff_type {
        FalloffType::Linear => endpoints(normalized).unwrap_or(1.0 - normalized),
        FalloffType::Smooth => smooth_curve(normalized, config.exponential_factor),
        FalloffType::VerySmooth => smooth_curve(normalized, config.exponential_factor).sqrt(),
        FalloffType::Sharp => {
            endpoints(normalized).unwrap_or_else(|| (1.0 - normalized).powf(config.sharpness * 2.0))
        }
        FalloffType::Cosine => cosine_curve(normalized),
        FalloffType::Polynomial2 => polynomial_curve(normalized, 2.0),
        FalloffType::Polynomial3 => polynomial_curve(normalized, 3.0),
        FalloffType::Polynomial4 => polynomial_curve(normalized, 4.0),
        FalloffType::InverseSquare => inverse_square_curve(normalized, 2.0),
        FalloffType::Sigmoid => sigmoid_curve(normalized, 10.0),
        FalloffType::Smoothstep => smoothstep_curve(normalized),
        FalloffType::Smootherstep => smootherstep_curve(normalized),
        FalloffType::Gaussian => gaussian_curve(normalized, 0.35),
        FalloffType::Hyperbolic => hyperbolic_curve(normalized, 5.0),
    };

    if (config.sharpness - 1.0).abs() > f64::EPSILON && config.falloff_type != FalloffType::Sharp {
        base = base.max(0.0).powf(config.sharpness);
    }

    base *= config.influence_multiplier;
    base *= rarity_weight / 50.0;
    base.max(0.0)
}

/// Shared endpoint clamp: `Some(1.0)` at or below 0, `Some(0.0)` at or above 1,
/// `None` in the open interval where the curve-specific formula applies.
fn endpoints(x: f64) -> Option<f64> {
    if x >= 1.0 {
        Some(0.0)
    } else if x <= 0.0 {
        Some(1.0)
    } else {
        None
    }
}

fn smooth_curve(x: f64, exponential_factor: f64) -> f64 {
    endpoints(x).unwrap_or_else(|| (exponential_factor * x * x).exp())
}

fn cosine_curve(x: f64) -> f64 {
    endpoints(x).unwrap_or_else(|| (1.0 + (x * std::f64::consts::PI).cos()) * 0.5)
}

fn polynomial_curve(x: f64, power: f64) -> f64 {
    endpoints(x).unwrap_or_else(|| (1.0 - x).powf(power))
}

fn inverse_square_curve(x: f64, strength: f64) -> f64 {
    endpoints(x).unwrap_or_else(|| 1.0 / (1.0 + strength * x * x))
}

fn sigmoid_curve(x: f64, steepness: f64) -> f64 {
    endpoints(x).unwrap_or_else(|| {
        let centered = x - 0.5;
        let sigmoid = 1.0 / (1.0 + (steepness * centered).exp());
        let lo = 1.0 / (1.0 + (steepness * 0.5).exp());
        let hi = 1.0 / (1.0 + (-steepness * 0.5).exp());
        (sigmoid - lo) / (hi - lo)
    })
}

fn smoothstep_curve(x: f64) -> f64 {
    endpoints(x).unwrap_or_else(|| {
        let t = 1.0 - x;
        t * t * (3.0 - 2.0 * t)
    })
}

fn smootherstep_curve(x: f64) -> f64 {
    endpoints(x).unwrap_or_else(|| {
        let t = 1.0 - x;
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    })
}

fn gaussian_curve(x: f64, sigma: f64) -> f64 {
    endpoints(x).unwrap_or_else(|| (-(x * x) / (2.0 * sigma * sigma)).exp())
}

fn hyperbolic_curve(x: f64, steepness: f64) -> f64 {
    endpoints(x).unwrap_or_else(|| {
        let centered = x - 0.5;
        (1.0 - (steepness * centered).tanh()) * 0.5
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [FalloffType; 14] = [
        FalloffType::Linear,
        FalloffType::Smooth,
        FalloffType::VerySmooth,
        FalloffType::Sharp,
        FalloffType::Cosine,
        FalloffType::Polynomial2,
        FalloffType::Polynomial3,
        FalloffType::Polynomial4,
        FalloffType::InverseSquare,
        FalloffType::Sigmoid,
        FalloffType::Smoothstep,
        FalloffType::Smootherstep,
        FalloffType::Gaussian,
        FalloffType::Hyperbolic,
    ];

    #[test]
    fn zero_distance_is_full_weight_before_multipliers() {
        for ty in ALL_TYPES {
            let config = FalloffConfig {
                falloff_type: ty,
                ..Default::default()
            };
            let w = falloff_weight(0.0, &config, 50.0);
            assert!((w - 1.0).abs() < 1e-9, "{ty:?} gave {w} at distance 0");
        }
    }

    #[test]
    fn beyond_search_radius_is_zero() {
        for ty in ALL_TYPES {
            let config = FalloffConfig {
                falloff_type: ty,
                search_radius: 20.0,
                ..Default::default()
            };
            assert_eq!(falloff_weight(20.0001, &config, 50.0), 0.0);
            assert_eq!(falloff_weight(1_000.0, &config, 50.0), 0.0);
        }
    }

    #[test]
    fn weight_is_monotonically_non_increasing_with_distance() {
        for ty in ALL_TYPES {
            let config = FalloffConfig {
                falloff_type: ty,
                search_radius: 30.0,
                ..Default::default()
            };
            let mut prev = f64::MAX;
            let mut d = 0.0;
            while d <= 30.0 {
                let w = falloff_weight(d, &config, 50.0);
                assert!(w <= prev + 1e-9, "{ty:?} increased at distance {d}: {w} > {prev}");
                prev = w;
                d += 0.5;
            }
        }
    }

    #[test]
    fn rarity_weight_scales_linearly() {
        let config = FalloffConfig::default();
        let at_50 = falloff_weight(5.0, &config, 50.0);
        let at_25 = falloff_weight(5.0, &config, 25.0);
        assert!((at_25 - at_50 * 0.5).abs() < 1e-9);
    }
}
