//! Multi-octave fractal noise in world space.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use simdnoise::NoiseBuilder;

/// How octaves of simplex noise are shaped before being summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseKind {
    /// Plain fractal Brownian motion, output in roughly [-1, 1].
    Fbm,
    /// Ridged multifractal (`1 - |n|`, squared), output in [0, 1].
    Ridged,
    /// Billowy (`|n|`), output in [0, 1].
    Billow,
}

/// Octave parameters for one fractal noise field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Octave shaping.
    pub kind: NoiseKind,
    /// Number of noise octaves.
    pub octaves: u8,
    /// Base frequency in cycles per world unit (metre).
    pub frequency: f32,
    /// Frequency gain between octaves.
    pub lacunarity: f32,
    /// Amplitude gain between octaves.
    pub persistence: f32,
    /// Base simdnoise seed; octaves offset it.
    pub seed: i32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            kind: NoiseKind::Fbm,
            octaves: 5,
            frequency: 0.01,
            lacunarity: 2.0,
            persistence: 0.5,
            seed: 42,
        }
    }
}

impl FractalNoiseConfig {
    /// Creates a plain fBm configuration.
    pub fn fbm(octaves: u8, frequency: f32, seed: i32) -> Self {
        Self {
            kind: NoiseKind::Fbm,
            octaves,
            frequency,
            seed,
            ..Default::default()
        }
    }

    /// Creates a ridged configuration, suited to mountain crests.
    pub fn ridged(octaves: u8, frequency: f32, seed: i32) -> Self {
        Self {
            kind: NoiseKind::Ridged,
            octaves,
            frequency,
            persistence: 0.55,
            seed,
            ..Default::default()
        }
    }

    /// Creates a billow configuration.
    pub fn billow(octaves: u8, frequency: f32, seed: i32) -> Self {
        Self {
            kind: NoiseKind::Billow,
            octaves,
            frequency,
            seed,
            ..Default::default()
        }
    }

    /// Returns a copy with a different seed.
    pub fn with_seed(&self, seed: i32) -> Self {
        Self { seed, ..self.clone() }
    }
}

/// Single octave of simplex noise in [-1, 1].
///
/// 4D simplex with `w = 0` keeps sampling isotropic on curved surfaces.
fn simplex_at(x: f32, y: f32, z: f32, seed: i32) -> f32 {
    NoiseBuilder::fbm_4d_offset(x, 1, y, 1, z, 1, 0.0, 1)
        .with_seed(seed)
        .with_freq(1.0)
        .with_octaves(1)
        .generate()
        .0[0]
}

/// Samples fractal noise at a world-space position.
///
/// Returns roughly [-1, 1] for [`NoiseKind::Fbm`] and [0, 1] for the other kinds,
/// normalized by the amplitude sum.
pub fn sample_fractal_noise(pos: Vec3, config: &FractalNoiseConfig) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = config.frequency;
    let mut max_amplitude = 0.0f32;

    for octave in 0..config.octaves.max(1) {
        let octave_seed = config.seed.wrapping_add(octave as i32 * 31337);
        let p = pos * frequency;
        let n = simplex_at(p.x, p.y, p.z, octave_seed).clamp(-1.0, 1.0);

        let shaped = match config.kind {
            NoiseKind::Fbm => n,
            NoiseKind::Ridged => {
                let r = 1.0 - n.abs();
                r * r
            }
            NoiseKind::Billow => n.abs(),
        };

        total += shaped * amplitude;
        max_amplitude += amplitude;
        amplitude *= config.persistence;
        frequency *= config.lacunarity;
    }

    total / max_amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FractalNoiseConfig::default();
        assert_eq!(config.kind, NoiseKind::Fbm);
        assert_eq!(config.lacunarity, 2.0);
        assert_eq!(config.persistence, 0.5);
    }

    #[test]
    fn test_noise_reproducibility() {
        let config = FractalNoiseConfig::fbm(4, 0.02, 12345);
        let pos = Vec3::new(50.0, 30.0, 70.0);

        let result1 = sample_fractal_noise(pos, &config);
        let result2 = sample_fractal_noise(pos, &config);

        assert_eq!(result1.to_bits(), result2.to_bits());
    }

    #[test]
    fn test_noise_range_per_kind() {
        let positions = [
            Vec3::new(100.0, 0.0, 0.0),
            Vec3::new(0.0, 250.0, 0.0),
            Vec3::new(-30.0, 12.5, 480.0),
            Vec3::new(288.0, 288.0, -288.0),
        ];

        for kind in [NoiseKind::Fbm, NoiseKind::Ridged, NoiseKind::Billow] {
            let config = FractalNoiseConfig { kind, ..Default::default() };
            for pos in positions {
                let v = sample_fractal_noise(pos, &config);
                assert!(v.is_finite());
                assert!((-1.0..=1.0).contains(&v), "{:?} value {} at {:?}", kind, v, pos);
                if kind != NoiseKind::Fbm {
                    assert!(v >= 0.0, "{:?} must be non-negative, got {}", kind, v);
                }
            }
        }
    }

    #[test]
    fn test_different_seeds_produce_different_results() {
        let config1 = FractalNoiseConfig::fbm(3, 0.05, 1);
        let config2 = config1.with_seed(2);
        let pos = Vec3::new(5.3, 3.1, 7.7);

        assert_ne!(sample_fractal_noise(pos, &config1), sample_fractal_noise(pos, &config2));
    }
}
