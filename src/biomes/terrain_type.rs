//! Semantic terrain types used by gameplay and placement.

use serde::{Deserialize, Serialize};

use super::{BiomeConfig, BiomeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    Flat,
    Rough,
    SteepSlope,
    ShallowWater,
    DeepWater,
    Road,
}

impl TerrainType {
    pub fn name(self) -> &'static str {
        match self {
            TerrainType::Flat => "flat",
            TerrainType::Rough => "rough",
            TerrainType::SteepSlope => "steep_slope",
            TerrainType::ShallowWater => "shallow_water",
            TerrainType::DeepWater => "deep_water",
            TerrainType::Road => "road",
        }
    }

    pub fn is_water(self) -> bool {
        matches!(self, TerrainType::ShallowWater | TerrainType::DeepWater)
    }
}

/// Assigns a terrain type. Total over all inputs.
///
/// `on_region_border` marks points inside the road band between two regions.
pub fn classify_terrain_type(
    elevation_m: f32,
    slope_rad: f32,
    biome: BiomeId,
    on_region_border: bool,
    cfg: &BiomeConfig,
) -> TerrainType {
    if elevation_m < 0.0 || biome == BiomeId::Water {
        let depth = (-elevation_m).max(0.0);
        return if depth <= cfg.shallow_water_depth_m {
            TerrainType::ShallowWater
        } else {
            TerrainType::DeepWater
        };
    }
    if slope_rad >= cfg.steep_slope_rad {
        return TerrainType::SteepSlope;
    }
    if on_region_border && slope_rad < cfg.road_max_slope_rad {
        return TerrainType::Road;
    }
    if biome.is_rough() || slope_rad >= cfg.rough_slope_rad {
        return TerrainType::Rough;
    }
    TerrainType::Flat
}
