//! Fully classified surface points.
//!
//! [`TileClassifier::classify`] runs the fixed stage sequence
//! (elevation, slope, climate, biome, terrain type, land overlays,
//! cross-purpose overlays, finalization) over a fresh [`Tile`].

mod classifier;
mod slope;

pub use classifier::{TileClassifier, TileStage};
pub use slope::{slope_angle, star_offsets};

use glam::Vec3;

use crate::biomes::{BiomeId, TerrainType};
use crate::materials::Material;
use crate::terrain::Purpose;

/// Visual and semantic attributes of one surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub position: Vec3,
    pub normal: Vec3,
    pub purpose: Purpose,
    /// Metres above (or below) sea level.
    pub elevation: f32,
    /// Radians.
    pub slope: f32,
    /// Annual mean, °C.
    pub temperature: f32,
    /// Annual total, cm/year.
    pub precipitation: f32,
    pub biome: BiomeId,
    pub terrain_type: TerrainType,
    pub material: Material,
    pub vegetation: f32,
    pub fertility: f32,
    /// Stable per-region value in [0,1).
    pub nationality: f32,
    pub buildable: bool,
}

impl Tile {
    /// Unclassified tile at a surface point.
    pub fn new(position: Vec3, normal: Vec3, purpose: Purpose) -> Self {
        Self {
            position,
            normal,
            purpose,
            elevation: 0.0,
            slope: 0.0,
            temperature: 0.0,
            precipitation: 0.0,
            biome: BiomeId::Water,
            terrain_type: TerrainType::Flat,
            material: Material::default(),
            vegetation: 0.0,
            fertility: 0.0,
            nationality: 0.0,
            buildable: false,
        }
    }

    pub fn is_water(&self) -> bool {
        self.terrain_type.is_water()
    }

    /// Depth below sea level, zero on land.
    pub fn depth(&self) -> f32 {
        (-self.elevation).max(0.0)
    }
}
