//! Annual precipitation model.

use super::ClimateConfig;

/// Precipitation (cm/year) for a point given its polar factor, elevation and noise.
///
/// `noise` is a sample in [0, 1]; 0.5 leaves the latitudinal baseline unchanged.
pub fn precipitation_cm(polar: f32, elevation_m: f32, noise: f32, cfg: &ClimateConfig) -> f32 {
    let t = polar.clamp(0.0, 1.0).powf(0.8);
    let baseline = cfg.equator_precip_cm * (1.0 - t) + cfg.pole_precip_cm * t;

    let swing = cfg.precip_noise.clamp(0.0, 1.0);
    let wet = 1.0 + swing * (2.0 * noise.clamp(0.0, 1.0) - 1.0);

    // Air dries out as it climbs.
    let drying = (-cfg.drying_per_km * cfg.altitude_km(elevation_m)).exp();

    (baseline * wet * drying).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tropics_are_wetter_than_poles() {
        let cfg = ClimateConfig::default();
        assert!(precipitation_cm(0.0, 0.0, 0.5, &cfg) > precipitation_cm(1.0, 0.0, 0.5, &cfg));
    }

    #[test]
    fn altitude_dries() {
        let cfg = ClimateConfig::default();
        let low = precipitation_cm(0.2, 0.0, 0.5, &cfg);
        let high = precipitation_cm(0.2, 25.0, 0.5, &cfg);
        assert!(high < low);
        assert!(high > 0.0);
    }

    #[test]
    fn never_negative() {
        let cfg = ClimateConfig { precip_noise: 1.0, ..ClimateConfig::default() };
        for n in [0.0, 0.25, 1.0] {
            assert!(precipitation_cm(0.7, 10.0, n, &cfg) >= 0.0);
        }
    }
}
