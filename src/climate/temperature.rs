//! Annual mean temperature model.

use super::ClimateConfig;

/// Temperature (°C) for a point given its polar factor, elevation and noise.
///
/// `polar` is 0 on the equator and 1 at the poles; `noise` is a signed
/// sample in [-1, 1].
pub fn temperature_c(polar: f32, elevation_m: f32, noise: f32, cfg: &ClimateConfig) -> f32 {
    // Latitudinal gradient. Nonlinear curve gives larger polar contrast.
    let lat_w = polar.clamp(0.0, 1.0).powf(1.15);
    let baseline = cfg.equator_temp_c * (1.0 - lat_w) + cfg.pole_temp_c * lat_w;

    // Altitude lapse relative to sea level.
    let lapse = cfg.lapse_rate_c_per_km * cfg.altitude_km(elevation_m);

    baseline - lapse + noise.clamp(-1.0, 1.0) * cfg.temperature_noise_c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equator_is_warmer_than_pole() {
        let cfg = ClimateConfig::default();
        assert!(temperature_c(0.0, 0.0, 0.0, &cfg) > temperature_c(1.0, 0.0, 0.0, &cfg));
        assert_eq!(temperature_c(0.0, 0.0, 0.0, &cfg), cfg.equator_temp_c);
    }

    #[test]
    fn higher_elevation_is_colder_by_lapse_rate() {
        let cfg = ClimateConfig::default();
        let one_km = 1000.0 / cfg.altitude_scale;
        let t0 = temperature_c(0.3, 0.0, 0.0, &cfg);
        let t1 = temperature_c(0.3, one_km, 0.0, &cfg);
        let actual_drop = t0 - t1;
        assert!(
            (actual_drop - cfg.lapse_rate_c_per_km).abs() < 1e-3,
            "expected drop ~{}, got {}",
            cfg.lapse_rate_c_per_km,
            actual_drop
        );
    }

    #[test]
    fn underwater_points_do_not_lapse() {
        let cfg = ClimateConfig::default();
        assert_eq!(temperature_c(0.5, -20.0, 0.0, &cfg), temperature_c(0.5, 0.0, 0.0, &cfg));
    }
}
