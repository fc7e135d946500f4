//! Biome classification and derived surface signals.
//!
//! Consumes the climate signal (annual mean temperature, annual
//! precipitation) plus elevation to produce:
//! - a biome ID (Water for anything below sea level)
//! - vegetation density and fertility (both in [0,1])
//! - the semantic terrain type

mod config;
mod terrain_type;

pub use config::BiomeConfig;
pub use terrain_type::{classify_terrain_type, TerrainType};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::climate::Climate;
use crate::noise::{NoiseRegistry, NoiseRole};

/// Biome classification ID. `as_u8()` is stable and used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomeId {
    Water = 0,
    IceCap = 1,
    Tundra = 2,
    BorealForest = 3,
    TemperateGrassland = 4,
    TemperateDeciduousForest = 5,
    TemperateRainforest = 6,
    SubtropicalDesert = 7,
    Savanna = 8,
    TropicalSeasonalForest = 9,
    TropicalRainforest = 10,
    Mountain = 11,
}

impl BiomeId {
    pub const COUNT: usize = 12;

    pub fn all() -> [BiomeId; Self::COUNT] {
        [
            BiomeId::Water,
            BiomeId::IceCap,
            BiomeId::Tundra,
            BiomeId::BorealForest,
            BiomeId::TemperateGrassland,
            BiomeId::TemperateDeciduousForest,
            BiomeId::TemperateRainforest,
            BiomeId::SubtropicalDesert,
            BiomeId::Savanna,
            BiomeId::TropicalSeasonalForest,
            BiomeId::TropicalRainforest,
            BiomeId::Mountain,
        ]
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            BiomeId::Water => "water",
            BiomeId::IceCap => "ice_cap",
            BiomeId::Tundra => "tundra",
            BiomeId::BorealForest => "boreal_forest",
            BiomeId::TemperateGrassland => "temperate_grassland",
            BiomeId::TemperateDeciduousForest => "temperate_deciduous_forest",
            BiomeId::TemperateRainforest => "temperate_rainforest",
            BiomeId::SubtropicalDesert => "subtropical_desert",
            BiomeId::Savanna => "savanna",
            BiomeId::TropicalSeasonalForest => "tropical_seasonal_forest",
            BiomeId::TropicalRainforest => "tropical_rainforest",
            BiomeId::Mountain => "mountain",
        }
    }

    /// Base vegetation density for this biome (0..1).
    pub fn base_veg(self) -> f32 {
        match self {
            BiomeId::Water => 0.0,
            BiomeId::IceCap => 0.0,
            BiomeId::Tundra => 0.15,
            BiomeId::BorealForest => 0.65,
            BiomeId::TemperateGrassland => 0.45,
            BiomeId::TemperateDeciduousForest => 0.70,
            BiomeId::TemperateRainforest => 0.85,
            BiomeId::SubtropicalDesert => 0.05,
            BiomeId::Savanna => 0.35,
            BiomeId::TropicalSeasonalForest => 0.75,
            BiomeId::TropicalRainforest => 0.95,
            BiomeId::Mountain => 0.25,
        }
    }

    /// Linear RGB ground color for this biome.
    pub fn ground_rgb(self) -> [f32; 3] {
        match self {
            BiomeId::Water => [0.05, 0.18, 0.32],
            BiomeId::IceCap => [0.92, 0.95, 0.98],
            BiomeId::Tundra => [0.55, 0.60, 0.52],
            BiomeId::BorealForest => [0.14, 0.30, 0.17],
            BiomeId::TemperateGrassland => [0.48, 0.66, 0.34],
            BiomeId::TemperateDeciduousForest => [0.18, 0.45, 0.22],
            BiomeId::TemperateRainforest => [0.10, 0.38, 0.22],
            BiomeId::SubtropicalDesert => [0.84, 0.78, 0.53],
            BiomeId::Savanna => [0.72, 0.70, 0.38],
            BiomeId::TropicalSeasonalForest => [0.20, 0.56, 0.27],
            BiomeId::TropicalRainforest => [0.09, 0.50, 0.21],
            BiomeId::Mountain => [0.52, 0.50, 0.48],
        }
    }

    /// Base surface roughness (0..1).
    pub fn base_roughness(self) -> f32 {
        match self {
            BiomeId::Water => 0.05,
            BiomeId::IceCap => 0.25,
            BiomeId::SubtropicalDesert => 0.7,
            BiomeId::Mountain => 0.85,
            _ => 0.8,
        }
    }

    /// Biomes whose ground is rough to traverse even when level.
    pub fn is_rough(self) -> bool {
        matches!(
            self,
            BiomeId::IceCap
                | BiomeId::BorealForest
                | BiomeId::TemperateRainforest
                | BiomeId::TropicalRainforest
                | BiomeId::Mountain
        )
    }
}

/// Classify a single point into a biome using a Whittaker-like scheme.
///
/// Callers apply ecotone jitter to the temperature and precipitation beforehand.
pub fn classify_whittaker_like(elevation_m: f32, temp_mean_c: f32, precip_annual_cm: f32, cfg: &BiomeConfig) -> BiomeId {
    if elevation_m < 0.0 {
        return BiomeId::Water;
    }

    // High ground is its own biome regardless of climate.
    if elevation_m >= cfg.mountain_elevation_m {
        return BiomeId::Mountain;
    }

    // Too cold for anything to grow.
    if temp_mean_c <= -10.0 {
        return BiomeId::IceCap;
    }

    // Cold belt.
    if temp_mean_c < 0.0 {
        if precip_annual_cm < 35.0 {
            return BiomeId::Tundra;
        }
        return BiomeId::BorealForest;
    }

    // Hot belt, split by rainfall.
    if temp_mean_c >= 20.0 {
        if precip_annual_cm >= 250.0 {
            return BiomeId::TropicalRainforest;
        }
        if precip_annual_cm >= 120.0 {
            return BiomeId::TropicalSeasonalForest;
        }
        if precip_annual_cm >= 45.0 {
            return BiomeId::Savanna;
        }
        return BiomeId::SubtropicalDesert;
    }

    // Mid latitudes.
    if precip_annual_cm >= 160.0 {
        return BiomeId::TemperateRainforest;
    }
    if precip_annual_cm >= 80.0 {
        return BiomeId::TemperateDeciduousForest;
    }
    if precip_annual_cm >= 35.0 {
        return BiomeId::TemperateGrassland;
    }
    BiomeId::SubtropicalDesert
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Biome at `position` with ecotone jitter from the noise registry.
pub fn classify_biome(position: Vec3, elevation_m: f32, climate: &Climate, noise: &NoiseRegistry, cfg: &BiomeConfig) -> BiomeId {
    let j = noise.sample(NoiseRole::Ecotone, position);
    let t = climate.temperature_c + cfg.jitter_temp_c * j;
    let p = (climate.precipitation_cm + cfg.jitter_precip_cm * j).max(0.0);
    classify_whittaker_like(elevation_m, t, p, cfg)
}

/// Vegetation: combine biome base with climate signal.
pub fn vegetation_density(biome: BiomeId, climate: &Climate, slope_rad: f32) -> f32 {
    let mut veg = biome.base_veg();
    let temp_w = smoothstep(-5.0, 25.0, climate.temperature_c);
    let precip_w = smoothstep(10.0, 220.0, climate.precipitation_cm);
    veg *= 0.35 + 0.65 * temp_w * precip_w;

    // Mountains reduce vegetation with steepness.
    if biome == BiomeId::Mountain {
        veg *= 0.5 * (1.0 - slope_rad / std::f32::consts::FRAC_PI_2).clamp(0.2, 1.0);
    }
    veg.clamp(0.0, 1.0)
}

/// How well the ground supports crops and forests, 0..1.
pub fn fertility(biome: BiomeId, climate: &Climate) -> f32 {
    let moisture = smoothstep(20.0, 250.0, climate.precipitation_cm);
    let heat_stress = smoothstep(30.0, 42.0, climate.temperature_c);
    (biome.base_veg() * (0.6 + 0.4 * moisture) * (1.0 - 0.5 * heat_stress)).clamp(0.0, 1.0)
}
