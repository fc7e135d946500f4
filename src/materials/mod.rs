//! Surface materials and the overlays composited onto them.
//!
//! Every tile starts from a base [`Material`] chosen by purpose and biome.
//! Overlays then blend their own material in proportion to an activation
//! mask; masks below [`MASK_EPSILON`] leave the material untouched.

mod cross;
mod land;
mod overlay;

pub use cross::{FlowersOverlay, IceOverlay, SnowOverlay};
pub use land::{
    BedrockOverlay, BouldersOverlay, CliffsOverlay, DirtOverlay, GrassOverlay, MicaOverlay, SandOverlay,
    StumpsOverlay,
};
pub use overlay::{default_overlays, MaterialOverlay, OverlayContext};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::biomes::{smoothstep, BiomeId};

/// Masks below this leave the material untouched.
pub const MASK_EPSILON: f32 = 1e-7;

/// Visual channels of a surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear RGB.
    pub albedo: Vec3,
    pub roughness: f32,
    pub metallic: f32,
    /// Bump height, 0.5 is neutral.
    pub height: f32,
    pub opacity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            albedo: Vec3::splat(0.5),
            roughness: 0.8,
            metallic: 0.0,
            height: 0.5,
            opacity: 1.0,
        }
    }
}

impl Material {
    pub fn new(albedo: Vec3, roughness: f32, metallic: f32, height: f32) -> Self {
        Self { albedo, roughness, metallic, height, opacity: 1.0 }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Ground of a land biome.
    pub fn land_base(biome: BiomeId) -> Self {
        Self::new(Vec3::from_array(biome.ground_rgb()), biome.base_roughness(), 0.0, 0.5)
    }

    /// Sea surface tinted by depth in metres; opacity rises with depth.
    pub fn water_base(depth_m: f32, cfg: &MaterialConfig) -> Self {
        let deep = smoothstep(0.0, cfg.deep_water_depth_m, depth_m.max(0.0));
        let albedo = Vec3::from_array(cfg.shallow_water_rgb).lerp(Vec3::from_array(cfg.deep_water_rgb), deep);
        Self::new(albedo, 0.05, 0.0, 0.5).with_opacity(0.55 + 0.45 * deep)
    }

    /// `lerp(self, overlay, mask)` on every channel; a no-op for masks below [`MASK_EPSILON`].
    pub fn blend(&mut self, overlay: &Material, mask: f32) {
        if !(mask >= MASK_EPSILON) {
            return;
        }
        let m = mask.min(1.0);
        self.albedo = self.albedo.lerp(overlay.albedo, m);
        self.roughness += (overlay.roughness - self.roughness) * m;
        self.metallic += (overlay.metallic - self.metallic) * m;
        self.height += (overlay.height - self.height) * m;
        self.opacity += (overlay.opacity - self.opacity) * m;
    }

    /// Clamps every channel to [0,1].
    pub fn clamp01(&mut self) {
        self.albedo = self.albedo.clamp(Vec3::ZERO, Vec3::ONE);
        self.roughness = self.roughness.clamp(0.0, 1.0);
        self.metallic = self.metallic.clamp(0.0, 1.0);
        self.height = self.height.clamp(0.0, 1.0);
        self.opacity = self.opacity.clamp(0.0, 1.0);
    }

    /// Channels in a fixed order, for finiteness and range checks.
    pub fn channels(&self) -> [(&'static str, f32); 7] {
        [
            ("albedo.r", self.albedo.x),
            ("albedo.g", self.albedo.y),
            ("albedo.b", self.albedo.z),
            ("roughness", self.roughness),
            ("metallic", self.metallic),
            ("height", self.height),
            ("opacity", self.opacity),
        ]
    }
}

/// Tuning for base materials and overlays.
///
/// Temperatures are °C, lengths metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialConfig {
    pub shallow_water_rgb: [f32; 3],
    pub deep_water_rgb: [f32; 3],
    /// Depth at which water reaches its deep tint and full opacity.
    pub deep_water_depth_m: f32,

    /// Height above sea level still covered by beach sand.
    pub beach_height_m: f32,
    /// Cell size of the detail lattice used by bedrock, boulders and stumps.
    pub detail_cell_size: f32,
    pub boulder_radius_m: f32,
    pub stump_radius_m: f32,

    /// Temperature at/above which snow is 0.
    pub snow_melt_temp_c: f32,
    /// Temperature at/below which snow is 1.
    pub snow_freeze_temp_c: f32,
    /// Temperature at/above which ice is 0.
    pub ice_melt_temp_c: f32,
    /// Temperature at/below which ice is 1.
    pub ice_full_temp_c: f32,

    /// Overlays skipped by name.
    pub disabled_overlays: Vec<String>,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            shallow_water_rgb: [0.12, 0.45, 0.52],
            deep_water_rgb: [0.02, 0.08, 0.22],
            deep_water_depth_m: 25.0,

            beach_height_m: 1.5,
            detail_cell_size: 12.0,
            boulder_radius_m: 1.6,
            stump_radius_m: 0.9,

            snow_melt_temp_c: 2.0,
            snow_freeze_temp_c: -12.0,
            ice_melt_temp_c: 0.0,
            ice_full_temp_c: -6.0,

            disabled_overlays: Vec::new(),
        }
    }
}
