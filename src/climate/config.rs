//! Climate configuration parameters.

use serde::{Deserialize, Serialize};

/// Configuration for the per-point climate model.
///
/// Units:
/// - temperatures: °C
/// - precipitation: cm/year
/// - elevation: metres of world space, multiplied by `altitude_scale`
///   before the lapse rate and drying apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    // Temperature model
    pub equator_temp_c: f32,
    pub pole_temp_c: f32,
    pub lapse_rate_c_per_km: f32,
    /// Amplitude of the temperature noise field (°C).
    pub temperature_noise_c: f32,

    // Precipitation model
    pub equator_precip_cm: f32,
    pub pole_precip_cm: f32,
    /// Fractional swing of the precipitation noise field, 0..1.
    pub precip_noise: f32,
    /// Fraction of precipitation lost per km above sea level.
    pub drying_per_km: f32,

    /// Climate altitude in metres per world metre of elevation.
    pub altitude_scale: f32,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        // Tuned for believable biome spread on small planets.
        Self {
            equator_temp_c: 30.0,
            pole_temp_c: -20.0,
            lapse_rate_c_per_km: 6.5,
            temperature_noise_c: 6.0,

            equator_precip_cm: 260.0,
            pole_precip_cm: 30.0,
            precip_noise: 0.6,
            drying_per_km: 0.18,

            altitude_scale: 100.0,
        }
    }
}

impl ClimateConfig {
    pub fn earth_like() -> Self {
        Self::default()
    }

    /// Hot and dry with a weak polar gradient.
    pub fn arid() -> Self {
        Self {
            equator_temp_c: 38.0,
            pole_temp_c: 2.0,
            equator_precip_cm: 70.0,
            pole_precip_cm: 15.0,
            drying_per_km: 0.3,
            ..Self::default()
        }
    }

    /// Cold world with permanent polar ice.
    pub fn frozen() -> Self {
        Self {
            equator_temp_c: 6.0,
            pole_temp_c: -45.0,
            equator_precip_cm: 90.0,
            pole_precip_cm: 12.0,
            ..Self::default()
        }
    }

    /// Elevation above sea level in km of climate altitude.
    pub(crate) fn altitude_km(&self, elevation_m: f32) -> f32 {
        elevation_m.max(0.0) * self.altitude_scale / 1000.0
    }
}
