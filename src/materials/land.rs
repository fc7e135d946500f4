//! Overlays that only apply to land and navigation surfaces.

use glam::Vec3;

use super::{Material, MaterialOverlay, OverlayContext};
use crate::biomes::{smoothstep, BiomeId};
use crate::noise::NoiseRole;
use crate::tile::Tile;

fn above_water(tile: &Tile) -> f32 {
    if tile.elevation >= 0.0 { 1.0 } else { 0.0 }
}

/// Relative luminance weights for linear RGB.
const LUMA: Vec3 = Vec3::new(0.2126, 0.7152, 0.0722);

/// Base layer: biome ground with cracked bedrock showing through where
/// vegetation is thin. Covers the tile fully so every later overlay
/// composites onto its albedo, roughness and height.
pub struct BedrockOverlay;

impl BedrockOverlay {
    fn exposure(tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        let n = ctx.noise.sample01(NoiseRole::Bedrock, tile.position);
        smoothstep(0.35, 0.85, 0.6 * n + 0.4 * (1.0 - tile.vegetation))
    }
}

impl MaterialOverlay for BedrockOverlay {
    fn name(&self) -> &'static str {
        "bedrock"
    }

    fn mask(&self, _tile: &Tile, _ctx: &OverlayContext<'_>) -> f32 {
        1.0
    }

    fn material(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> Material {
        let (f1, f2) = ctx.details.worley(tile.position, tile.normal);
        let crack = smoothstep(0.0, 0.15 * ctx.details.cell_size(), f2 - f1);
        let detail = ctx.noise.sample01(NoiseRole::BedrockDetail, tile.position);
        let rock = Vec3::new(0.42, 0.40, 0.38) * (0.7 + 0.3 * detail) * (0.6 + 0.4 * crack);

        let ground = Material::land_base(tile.biome);
        let exposure = Self::exposure(tile, ctx);
        let albedo = ground.albedo.lerp(rock, exposure);
        let roughness = ground.roughness + (0.9 - ground.roughness) * exposure;
        let height = 0.5 + exposure * (0.3 * crack - 0.15) + 0.1 * (detail - 0.5);
        Material::new(albedo, roughness, 0.0, height)
    }
}

/// Bare rock faces on steep ground: the current albedo loses its colour
/// as the slope steepens.
pub struct CliffsOverlay;

impl MaterialOverlay for CliffsOverlay {
    fn name(&self) -> &'static str {
        "cliffs"
    }

    fn mask(&self, tile: &Tile, _ctx: &OverlayContext<'_>) -> f32 {
        smoothstep(0.45, 0.8, tile.slope)
    }

    fn material(&self, tile: &Tile, _ctx: &OverlayContext<'_>) -> Material {
        let albedo = tile.material.albedo;
        let grey = Vec3::splat(albedo.dot(LUMA));
        let desaturation = 0.35 + 0.55 * smoothstep(0.45, 1.2, tile.slope);
        Material::new(albedo.lerp(grey, desaturation) * 0.9, 0.95, 0.0, 0.65)
    }
}

/// Glittering mineral veins in barren rock.
pub struct MicaOverlay;

impl MaterialOverlay for MicaOverlay {
    fn name(&self) -> &'static str {
        "mica"
    }

    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        let veins = smoothstep(0.72, 0.9, ctx.noise.sample01(NoiseRole::Mica, tile.position));
        let barren = smoothstep(0.3, 0.7, 1.0 - tile.vegetation);
        let rocky = if tile.biome == BiomeId::Mountain || tile.slope > 0.3 { 1.0 } else { 0.4 };
        veins * barren * rocky * above_water(tile)
    }

    fn material(&self, _tile: &Tile, _ctx: &OverlayContext<'_>) -> Material {
        Material::new(Vec3::new(0.78, 0.76, 0.72), 0.25, 0.55, 0.55)
    }
}

/// Patches of loose soil where vegetation thins out.
pub struct DirtOverlay;

impl MaterialOverlay for DirtOverlay {
    fn name(&self) -> &'static str {
        "dirt"
    }

    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        let n = ctx.noise.sample01(NoiseRole::Dirt, tile.position);
        0.8 * smoothstep(0.55, 0.8, n) * (1.0 - smoothstep(0.5, 0.9, tile.vegetation))
    }

    fn material(&self, _tile: &Tile, _ctx: &OverlayContext<'_>) -> Material {
        Material::new(Vec3::new(0.36, 0.25, 0.16), 0.9, 0.0, 0.45)
    }
}

/// Beaches along hot, dry shores and dunes in deserts.
pub struct SandOverlay;

impl MaterialOverlay for SandOverlay {
    fn name(&self) -> &'static str {
        "sand"
    }

    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        let h = ctx.config.beach_height_m.max(1e-3);
        let shore = if tile.elevation >= 0.0 {
            1.0 - smoothstep(0.0, h, tile.elevation)
        } else {
            1.0 - smoothstep(0.0, 2.0 * h, -tile.elevation)
        };
        let climate = smoothstep(12.0, 22.0, tile.temperature) * (1.0 - smoothstep(60.0, 140.0, tile.precipitation));
        let beach = shore * climate;
        let desert = if tile.biome == BiomeId::SubtropicalDesert {
            0.6 + 0.4 * ctx.noise.sample01(NoiseRole::Sand, tile.position)
        } else {
            0.0
        };
        beach.max(desert) * (1.0 - smoothstep(0.4, 0.7, tile.slope))
    }

    fn material(&self, _tile: &Tile, _ctx: &OverlayContext<'_>) -> Material {
        Material::new(Vec3::new(0.86, 0.79, 0.58), 0.75, 0.0, 0.48)
    }
}

/// Grass cover, yellowing where rain is scarce.
pub struct GrassOverlay;

impl MaterialOverlay for GrassOverlay {
    fn name(&self) -> &'static str {
        "grass"
    }

    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        let n = ctx.noise.sample01(NoiseRole::Grass, tile.position);
        tile.vegetation * smoothstep(0.25, 0.6, n) * (1.0 - smoothstep(0.35, 0.7, tile.slope)) * above_water(tile)
    }

    fn material(&self, tile: &Tile, _ctx: &OverlayContext<'_>) -> Material {
        let dry = 1.0 - smoothstep(15.0, 80.0, tile.precipitation);
        let albedo = Vec3::new(0.22, 0.48, 0.16).lerp(Vec3::new(0.62, 0.58, 0.30), dry);
        Material::new(albedo, 0.85, 0.0, 0.52)
    }
}

/// Scattered rocks around a subset of detail lattice points.
pub struct BouldersOverlay;

impl BouldersOverlay {
    /// Distance to the nearest boulder center, if one is close enough to matter.
    fn nearest_boulder(tile: &Tile, ctx: &OverlayContext<'_>) -> Option<f32> {
        let nearest = ctx.details.nearest(tile.position, tile.normal)[0];
        let chosen = ctx.details.region_value(&nearest) > 0.6
            && ctx.noise.sample01(NoiseRole::Boulders, nearest.source) > 0.4;
        (chosen && nearest.distance < ctx.config.boulder_radius_m).then_some(nearest.distance)
    }
}

impl MaterialOverlay for BouldersOverlay {
    fn name(&self) -> &'static str {
        "boulders"
    }

    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        let r = ctx.config.boulder_radius_m;
        match Self::nearest_boulder(tile, ctx) {
            Some(d) => (1.0 - smoothstep(0.4 * r, r, d)) * above_water(tile),
            None => 0.0,
        }
    }

    fn material(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> Material {
        let r = ctx.config.boulder_radius_m.max(1e-3);
        let d = Self::nearest_boulder(tile, ctx).unwrap_or(r);
        let dome = (1.0 - d / r).clamp(0.0, 1.0);
        Material::new(Vec3::new(0.47, 0.45, 0.43), 0.9, 0.0, 0.5 + 0.45 * dome)
    }
}

/// Tree stumps in forested biomes.
pub struct StumpsOverlay;

impl MaterialOverlay for StumpsOverlay {
    fn name(&self) -> &'static str {
        "stumps"
    }

    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        if tile.biome.base_veg() < 0.6 {
            return 0.0;
        }
        let nearest = ctx.details.nearest(tile.position, tile.normal)[0];
        let chosen = ctx.details.region_value(&nearest) < 0.15
            && ctx.noise.sample01(NoiseRole::Stumps, nearest.source) > 0.5;
        if !chosen {
            return 0.0;
        }
        let r = ctx.config.stump_radius_m;
        (1.0 - smoothstep(0.5 * r, r, nearest.distance)) * above_water(tile)
    }

    fn material(&self, _tile: &Tile, _ctx: &OverlayContext<'_>) -> Material {
        Material::new(Vec3::new(0.40, 0.28, 0.17), 0.8, 0.0, 0.7)
    }
}
