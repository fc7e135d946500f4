//! Climate model.
//!
//! Produces annual mean temperature and precipitation for a single surface
//! point from latitude, elevation and two independent noise fields.

mod config;
mod precipitation;
mod temperature;

pub use config::ClimateConfig;
pub use precipitation::precipitation_cm;
pub use temperature::temperature_c;

use glam::Vec3;

use crate::geometry::polar_factor;
use crate::noise::{NoiseRegistry, NoiseRole};

/// Climate signal at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Climate {
    /// Annual mean temperature (°C).
    pub temperature_c: f32,
    /// Annual precipitation (cm/year).
    pub precipitation_cm: f32,
}

/// Evaluates the climate at `position` with the given elevation in metres.
pub fn sample_climate(position: Vec3, elevation_m: f32, noise: &NoiseRegistry, cfg: &ClimateConfig) -> Climate {
    let polar = polar_factor(position);
    Climate {
        temperature_c: temperature_c(polar, elevation_m, noise.sample(NoiseRole::Temperature, position), cfg),
        precipitation_cm: precipitation_cm(polar, elevation_m, noise.sample01(NoiseRole::Precipitation, position), cfg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_deterministic_and_finite() {
        let noise = NoiseRegistry::new(11);
        let cfg = ClimateConfig::default();
        let p = Vec3::new(120.0, 410.0, -80.0);
        let a = sample_climate(p, 12.0, &noise, &cfg);
        let b = sample_climate(p, 12.0, &noise, &cfg);
        assert_eq!(a, b);
        assert!(a.temperature_c.is_finite() && a.precipitation_cm.is_finite());
    }

    #[test]
    fn presets_order_by_warmth() {
        let noise = NoiseRegistry::new(11);
        let p = Vec3::new(0.0, 250.0, 400.0);
        let t = |cfg: ClimateConfig| sample_climate(p, 0.0, &noise, &cfg).temperature_c;
        assert!(t(ClimateConfig::arid()) > t(ClimateConfig::earth_like()));
        assert!(t(ClimateConfig::earth_like()) > t(ClimateConfig::frozen()));
    }
}
