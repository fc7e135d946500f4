//! Biome and terrain-type configuration.

use serde::{Deserialize, Serialize};

/// Configuration for biome classification and terrain typing.
///
/// Notes:
/// - Elevations and depths are metres relative to the base shape.
/// - Temperatures are °C.
/// - Precipitation is cm/year.
/// - Slopes are radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeConfig {
    // --- Ecotone jitter (noise-perturbed boundaries) ---
    /// Jitter amplitude applied to temperature (°C).
    pub jitter_temp_c: f32,
    /// Jitter amplitude applied to precipitation (cm/year).
    pub jitter_precip_cm: f32,

    /// Elevation at/above which land is Mountain regardless of climate.
    pub mountain_elevation_m: f32,

    // --- Terrain types ---
    /// Radius of the tangent star sampled for slope.
    pub slope_radius_m: f32,
    /// Water no deeper than this is ShallowWater.
    pub shallow_water_depth_m: f32,
    /// Slope at/above which land is SteepSlope.
    pub steep_slope_rad: f32,
    /// Slope at/above which otherwise flat land is Rough.
    pub rough_slope_rad: f32,

    // --- Roads and regions ---
    /// Cell size of the region lattice whose borders carry roads.
    pub region_cell_size: f32,
    /// Half width of the road band around a region border.
    pub road_half_width_m: f32,
    /// Roads only run on slopes below this.
    pub road_max_slope_rad: f32,
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            jitter_temp_c: 1.5,
            jitter_precip_cm: 12.0,

            mountain_elevation_m: 30.0,

            slope_radius_m: 2.0,
            shallow_water_depth_m: 6.0,
            steep_slope_rad: 0.7,
            rough_slope_rad: 0.3,

            region_cell_size: 160.0,
            road_half_width_m: 2.5,
            road_max_slope_rad: 0.2,
        }
    }
}
