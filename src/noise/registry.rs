//! Seeded noise generators keyed by the role they play in the world.

use glam::Vec3;

use super::fractal::{sample_fractal_noise, FractalNoiseConfig, NoiseKind};

/// Semantic role of a noise field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NoiseRole {
    /// Low-frequency land/ocean bias.
    Continents = 0,
    /// Rolling hills.
    Hills = 1,
    /// Ridged mountain crests.
    Ridges = 2,
    /// Surface displacement for irregular base shapes.
    ShapeDetail = 3,
    /// Temperature anomaly.
    Temperature = 4,
    /// Precipitation anomaly.
    Precipitation = 5,
    /// Biome boundary jitter (ecotones).
    Ecotone = 6,
    /// Large-scale bedrock colour variation.
    Bedrock = 7,
    /// Fine bedrock strata.
    BedrockDetail = 8,
    /// Sparkly mineral inclusions.
    Mica = 9,
    /// Dirt patches.
    Dirt = 10,
    /// Sand drift.
    Sand = 11,
    /// Grass coverage.
    Grass = 12,
    /// Boulder fields.
    Boulders = 13,
    /// Tree stumps.
    Stumps = 14,
    /// Flowers on land, waterlilies on water.
    Flowers = 15,
    /// Ice sheets.
    Ice = 16,
    /// Snow cover.
    Snow = 17,
}

impl NoiseRole {
    /// Number of roles.
    pub const COUNT: usize = 18;

    /// Returns every role in index order.
    pub const fn all() -> [NoiseRole; Self::COUNT] {
        [
            NoiseRole::Continents,
            NoiseRole::Hills,
            NoiseRole::Ridges,
            NoiseRole::ShapeDetail,
            NoiseRole::Temperature,
            NoiseRole::Precipitation,
            NoiseRole::Ecotone,
            NoiseRole::Bedrock,
            NoiseRole::BedrockDetail,
            NoiseRole::Mica,
            NoiseRole::Dirt,
            NoiseRole::Sand,
            NoiseRole::Grass,
            NoiseRole::Boulders,
            NoiseRole::Stumps,
            NoiseRole::Flowers,
            NoiseRole::Ice,
            NoiseRole::Snow,
        ]
    }

    /// Returns the role index (0..COUNT).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns a short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            NoiseRole::Continents => "continents",
            NoiseRole::Hills => "hills",
            NoiseRole::Ridges => "ridges",
            NoiseRole::ShapeDetail => "shape_detail",
            NoiseRole::Temperature => "temperature",
            NoiseRole::Precipitation => "precipitation",
            NoiseRole::Ecotone => "ecotone",
            NoiseRole::Bedrock => "bedrock",
            NoiseRole::BedrockDetail => "bedrock_detail",
            NoiseRole::Mica => "mica",
            NoiseRole::Dirt => "dirt",
            NoiseRole::Sand => "sand",
            NoiseRole::Grass => "grass",
            NoiseRole::Boulders => "boulders",
            NoiseRole::Stumps => "stumps",
            NoiseRole::Flowers => "flowers",
            NoiseRole::Ice => "ice",
            NoiseRole::Snow => "snow",
        }
    }

    /// Default generator for this role at unit feature scale (metres).
    fn default_config(self) -> FractalNoiseConfig {
        match self {
            NoiseRole::Continents => FractalNoiseConfig::fbm(3, 1.0 / 450.0, 0),
            NoiseRole::Hills => FractalNoiseConfig::fbm(5, 1.0 / 120.0, 0),
            NoiseRole::Ridges => FractalNoiseConfig::ridged(5, 1.0 / 220.0, 0),
            NoiseRole::ShapeDetail => FractalNoiseConfig::fbm(4, 1.0 / 160.0, 0),
            NoiseRole::Temperature => FractalNoiseConfig::fbm(3, 1.0 / 300.0, 0),
            NoiseRole::Precipitation => FractalNoiseConfig::fbm(4, 1.0 / 240.0, 0),
            NoiseRole::Ecotone => FractalNoiseConfig::fbm(1, 1.0 / 60.0, 0),
            NoiseRole::Bedrock => FractalNoiseConfig::fbm(4, 1.0 / 40.0, 0),
            NoiseRole::BedrockDetail => FractalNoiseConfig::billow(3, 1.0 / 6.0, 0),
            NoiseRole::Mica => FractalNoiseConfig::fbm(2, 1.0 / 3.0, 0),
            NoiseRole::Dirt => FractalNoiseConfig::fbm(3, 1.0 / 25.0, 0),
            NoiseRole::Sand => FractalNoiseConfig::fbm(3, 1.0 / 35.0, 0),
            NoiseRole::Grass => FractalNoiseConfig::fbm(4, 1.0 / 18.0, 0),
            NoiseRole::Boulders => FractalNoiseConfig::billow(2, 1.0 / 12.0, 0),
            NoiseRole::Stumps => FractalNoiseConfig::fbm(2, 1.0 / 9.0, 0),
            NoiseRole::Flowers => FractalNoiseConfig::fbm(3, 1.0 / 7.0, 0),
            NoiseRole::Ice => FractalNoiseConfig::ridged(3, 1.0 / 30.0, 0),
            NoiseRole::Snow => FractalNoiseConfig::fbm(3, 1.0 / 20.0, 0),
        }
    }
}

/// Immutable set of constructed noise generators, one per [`NoiseRole`].
///
/// Built once up front and shared by reference; sampling never mutates it, so a
/// registry can be read from any number of threads.
#[derive(Debug, Clone)]
pub struct NoiseRegistry {
    seed: u64,
    fields: Vec<FractalNoiseConfig>,
}

impl NoiseRegistry {
    /// Builds every generator for the given master seed at unit feature scale.
    pub fn new(seed: u64) -> Self {
        Self::scaled(seed, 1.0)
    }

    /// Builds every generator, stretching feature sizes by `feature_scale`.
    ///
    /// A planet twice as large with `feature_scale = 2.0` keeps the same look.
    pub fn scaled(seed: u64, feature_scale: f32) -> Self {
        let scale = if feature_scale.is_finite() && feature_scale > 0.0 { feature_scale } else { 1.0 };
        let fields = NoiseRole::all()
            .iter()
            .map(|role| {
                let mut cfg = role.default_config();
                cfg.frequency /= scale;
                cfg.seed = role_seed(seed, *role);
                cfg
            })
            .collect();

        Self { seed, fields }
    }

    /// Master seed the registry was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generator configuration for a role.
    pub fn config(&self, role: NoiseRole) -> &FractalNoiseConfig {
        &self.fields[role.index()]
    }

    /// Replaces the generator for a role.
    ///
    /// Only callable while the registry is still exclusively owned, i.e. during
    /// initialization.
    pub fn set_config(&mut self, role: NoiseRole, mut config: FractalNoiseConfig) {
        config.seed = role_seed(self.seed, role);
        self.fields[role.index()] = config;
    }

    /// Samples the noise field for `role` at a world-space position.
    pub fn sample(&self, role: NoiseRole, pos: Vec3) -> f32 {
        sample_fractal_noise(pos, self.config(role))
    }

    /// Samples a role remapped to [0, 1].
    pub fn sample01(&self, role: NoiseRole, pos: Vec3) -> f32 {
        let cfg = self.config(role);
        let v = sample_fractal_noise(pos, cfg);
        match cfg.kind {
            NoiseKind::Fbm => (v * 0.5 + 0.5).clamp(0.0, 1.0),
            _ => v.clamp(0.0, 1.0),
        }
    }
}

/// Derives a per-role seed so roles stay decorrelated.
fn role_seed(seed: u64, role: NoiseRole) -> i32 {
    let mixed = seed
        .wrapping_add((role.index() as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .rotate_left(17);
    (mixed ^ (mixed >> 32)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_role_has_a_field() {
        let registry = NoiseRegistry::new(7);
        for (i, role) in NoiseRole::all().iter().enumerate() {
            assert_eq!(role.index(), i);
            assert!(registry.config(*role).frequency > 0.0);
        }
    }

    #[test]
    fn roles_are_decorrelated() {
        let registry = NoiseRegistry::new(7);
        let seeds: std::collections::HashSet<i32> =
            NoiseRole::all().iter().map(|r| registry.config(*r).seed).collect();
        assert_eq!(seeds.len(), NoiseRole::COUNT);
    }

    #[test]
    fn scaling_stretches_frequency() {
        let a = NoiseRegistry::new(1);
        let b = NoiseRegistry::scaled(1, 4.0);
        let fa = a.config(NoiseRole::Hills).frequency;
        let fb = b.config(NoiseRole::Hills).frequency;
        assert!((fa / fb - 4.0).abs() < 1e-4);
    }

    #[test]
    fn sample01_is_unit_range() {
        let registry = NoiseRegistry::new(99);
        let p = Vec3::new(120.0, -40.0, 310.0);
        for role in NoiseRole::all() {
            let v = registry.sample01(role, p);
            assert!((0.0..=1.0).contains(&v), "{} out of range: {}", role.name(), v);
        }
    }
}
