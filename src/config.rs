//! World configuration loaded from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes::BiomeConfig;
use crate::climate::ClimateConfig;
use crate::doodads::{DoodadCatalog, PlacementConfig};
use crate::materials::MaterialConfig;
use crate::mesh::MeshConfig;
use crate::noise::NoiseRole;
use crate::terrain::{ElevationProfile, Shape, TerrainConfig};

/// Largest accepted meshing resolution.
pub const MAX_RESOLUTION: u32 = 1024;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Everything a generation run needs besides the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub seed: u64,
    pub terrain: TerrainConfig,
    pub mesh: MeshConfig,
    pub climate: ClimateConfig,
    pub biomes: BiomeConfig,
    pub materials: MaterialConfig,
    pub doodads: PlacementConfig,
    /// Prototype catalog; the built-in Earth-like catalog when unset.
    pub catalog: Option<DoodadCatalog>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            terrain: TerrainConfig::default(),
            mesh: MeshConfig::default(),
            climate: ClimateConfig::default(),
            biomes: BiomeConfig::default(),
            materials: MaterialConfig::default(),
            doodads: PlacementConfig::default(),
            catalog: None,
        }
    }
}

impl WorldConfig {
    pub fn earth_like() -> Self {
        Self::default()
    }

    /// Dry planet of hills and dunes.
    pub fn arid() -> Self {
        Self {
            terrain: TerrainConfig {
                elevation: ElevationProfile::Hills.name().to_string(),
                ..TerrainConfig::default()
            },
            climate: ClimateConfig::arid(),
            ..Self::default()
        }
    }

    /// Cold cratered moon.
    pub fn frozen() -> Self {
        Self {
            terrain: TerrainConfig {
                elevation: ElevationProfile::Craters.name().to_string(),
                ..TerrainConfig::default()
            },
            climate: ClimateConfig::frozen(),
            ..Self::default()
        }
    }

    /// Preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "earth_like" | "earth" => Some(Self::earth_like()),
            "arid" => Some(Self::arid()),
            "frozen" => Some(Self::frozen()),
            _ => None,
        }
    }

    /// Parses a TOML document. Missing fields take their defaults.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// The catalog used for placement.
    pub fn catalog(&self) -> DoodadCatalog {
        self.catalog.clone().unwrap_or_else(DoodadCatalog::earth_like)
    }

    /// Feature scale applied to every noise role, relative to a 500 m planet.
    pub fn noise_scale(&self) -> f32 {
        self.terrain.radius / 500.0
    }

    /// Checks ranges and names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terrain;
        if !(t.radius.is_finite() && t.radius > 0.0) {
            return Err(ConfigError::Invalid(format!("terrain.radius must be positive, got {}", t.radius)));
        }
        if !(t.amplitude.is_finite() && t.amplitude >= 0.0) {
            return Err(ConfigError::Invalid(format!("terrain.amplitude must be non-negative, got {}", t.amplitude)));
        }
        if !(t.crater_cell_size.is_finite() && t.crater_cell_size > 0.0) {
            return Err(ConfigError::Invalid("terrain.crater_cell_size must be positive".into()));
        }
        Shape::from_name(&t.shape).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        ElevationProfile::from_name(&t.elevation).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.mesh.resolution == 0 || self.mesh.resolution > MAX_RESOLUTION {
            return Err(ConfigError::Invalid(format!(
                "mesh.resolution must be in 1..={}, got {}",
                MAX_RESOLUTION, self.mesh.resolution
            )));
        }
        if let Some(h) = self.mesh.half_extent {
            if !(h.is_finite() && h > 0.0) {
                return Err(ConfigError::Invalid(format!("mesh.half_extent must be positive, got {}", h)));
            }
        }
        if self.biomes.slope_radius_m <= 0.0 || self.biomes.region_cell_size <= 0.0 {
            return Err(ConfigError::Invalid("biome radii and cell sizes must be positive".into()));
        }
        if self.materials.detail_cell_size <= 0.0 {
            return Err(ConfigError::Invalid("materials.detail_cell_size must be positive".into()));
        }
        if self.doodads.vertex_stride == 0 {
            return Err(ConfigError::Invalid("doodads.vertex_stride must be at least 1".into()));
        }
        if let Some(catalog) = &self.catalog {
            for p in &catalog.prototypes {
                if p.name.is_empty() {
                    return Err(ConfigError::Invalid("doodad prototypes need a name".into()));
                }
                if !(0.0..=1.0).contains(&p.probability) {
                    return Err(ConfigError::Invalid(format!(
                        "doodad '{}' probability must be in [0,1], got {}",
                        p.name, p.probability
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Names of every noise role, for listings.
pub fn noise_role_names() -> Vec<&'static str> {
    NoiseRole::all().iter().map(|r| r.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_presets_validate() {
        for name in ["earth_like", "arid", "frozen"] {
            let cfg = WorldConfig::preset(name).unwrap();
            assert!(cfg.validate().is_ok(), "{}", name);
        }
        assert!(WorldConfig::preset("venus").is_none());
    }

    #[test]
    fn partial_toml_takes_defaults() {
        let cfg = WorldConfig::from_toml(
            r#"
            seed = 77

            [terrain]
            shape = "torus"
            radius = 800.0

            [mesh]
            resolution = 32
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, 77);
        assert_eq!(cfg.terrain.shape, "torus");
        assert_eq!(cfg.terrain.elevation, TerrainConfig::default().elevation);
        assert_eq!(cfg.mesh.resolution, 32);
        assert_eq!(cfg.climate, ClimateConfig::default());
        assert!(cfg.catalog.is_none());
    }

    #[test]
    fn embedded_catalog_parses() {
        let cfg = WorldConfig::from_toml(
            r#"
            [[catalog.prototypes]]
            name = "reed"
            probability = 0.2
            elevation = { min = -1.0, max = 1.0 }
            "#,
        )
        .unwrap();
        let catalog = cfg.catalog();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.prototypes[0].name, "reed");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut cfg = WorldConfig::default();
        cfg.mesh.resolution = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        let mut cfg = WorldConfig::default();
        cfg.terrain.shape = "pretzel".into();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(m)) if m.contains("pretzel")));

        assert!(matches!(WorldConfig::from_toml("seed = \"x\""), Err(ConfigError::Parse(_))));
        assert!(matches!(WorldConfig::load("/nonexistent/planet.toml"), Err(ConfigError::Io(_))));
    }
}
