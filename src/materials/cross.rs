//! Overlays that apply to land and water alike.

use glam::Vec3;

use super::{Material, MaterialOverlay, OverlayContext};
use crate::biomes::smoothstep;
use crate::noise::NoiseRole;
use crate::terrain::Purpose;
use crate::tile::Tile;

const FLOWER_COLORS: [Vec3; 4] = [
    Vec3::new(0.85, 0.42, 0.60),
    Vec3::new(0.92, 0.82, 0.25),
    Vec3::new(0.93, 0.93, 0.90),
    Vec3::new(0.55, 0.38, 0.80),
];

/// Flower meadows on land, waterlilies on shallow warm water.
pub struct FlowersOverlay;

impl MaterialOverlay for FlowersOverlay {
    fn name(&self) -> &'static str {
        "flowers"
    }

    fn applies_to(&self, _purpose: Purpose) -> bool {
        true
    }

    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        let n = ctx.noise.sample01(NoiseRole::Flowers, tile.position);
        if tile.purpose == Purpose::Water {
            let depth = -tile.elevation;
            if depth <= 0.0 {
                return 0.0;
            }
            return smoothstep(0.6, 0.8, n)
                * (1.0 - smoothstep(1.0, 5.0, depth))
                * smoothstep(10.0, 18.0, tile.temperature);
        }
        if tile.elevation < 0.0 {
            return 0.0;
        }
        smoothstep(0.68, 0.85, n)
            * tile.vegetation
            * smoothstep(5.0, 15.0, tile.temperature)
            * smoothstep(30.0, 80.0, tile.precipitation)
    }

    fn material(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> Material {
        if tile.purpose == Purpose::Water {
            return Material::new(Vec3::new(0.18, 0.42, 0.16), 0.5, 0.0, 0.55).with_opacity(1.0);
        }
        let nearest = ctx.details.nearest(tile.position, tile.normal)[0];
        let pick = (ctx.details.region_value(&nearest) * FLOWER_COLORS.len() as f32) as usize;
        let albedo = FLOWER_COLORS[pick.min(FLOWER_COLORS.len() - 1)];
        Material::new(albedo, 0.7, 0.0, 0.53)
    }
}

fn ice_cover(tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
    1.0 - smoothstep(ctx.config.ice_full_temp_c, ctx.config.ice_melt_temp_c, tile.temperature)
}

/// Sea ice on cold water, glaciers on cold level land.
pub struct IceOverlay;

impl MaterialOverlay for IceOverlay {
    fn name(&self) -> &'static str {
        "ice"
    }

    fn applies_to(&self, _purpose: Purpose) -> bool {
        true
    }

    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        let cold = ice_cover(tile, ctx);
        let n = ctx.noise.sample01(NoiseRole::Ice, tile.position);
        if tile.purpose == Purpose::Water {
            cold * (0.75 + 0.25 * n)
        } else {
            cold * smoothstep(0.5, 0.8, n) * (1.0 - smoothstep(0.5, 0.9, tile.slope))
        }
    }

    fn material(&self, _tile: &Tile, _ctx: &OverlayContext<'_>) -> Material {
        Material::new(Vec3::new(0.78, 0.88, 0.95), 0.15, 0.0, 0.5).with_opacity(1.0)
    }
}

/// Snow on cold ground and on top of sea ice.
pub struct SnowOverlay;

impl MaterialOverlay for SnowOverlay {
    fn name(&self) -> &'static str {
        "snow"
    }

    fn applies_to(&self, _purpose: Purpose) -> bool {
        true
    }

    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32 {
        let cfg = ctx.config;
        // 1 at/below freeze, 0 at/above melt.
        let cold = if cfg.snow_freeze_temp_c >= cfg.snow_melt_temp_c {
            if tile.temperature <= cfg.snow_freeze_temp_c { 1.0 } else { 0.0 }
        } else {
            1.0 - smoothstep(cfg.snow_freeze_temp_c, cfg.snow_melt_temp_c, tile.temperature)
        };
        let n = ctx.noise.sample01(NoiseRole::Snow, tile.position);
        if tile.purpose == Purpose::Water {
            cold * ice_cover(tile, ctx) * (0.6 + 0.4 * n)
        } else {
            cold * (1.0 - smoothstep(0.6, 1.0, tile.slope)) * (0.8 + 0.2 * n)
        }
    }

    fn material(&self, _tile: &Tile, _ctx: &OverlayContext<'_>) -> Material {
        Material::new(Vec3::new(0.93, 0.95, 0.97), 0.6, 0.0, 0.55).with_opacity(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::BiomeId;
    use crate::materials::MaterialConfig;
    use crate::noise::NoiseRegistry;
    use crate::voronoi::VoronoiLattice;

    struct Fixture {
        noise: NoiseRegistry,
        details: VoronoiLattice,
        config: MaterialConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let config = MaterialConfig::default();
            Self {
                noise: NoiseRegistry::new(29),
                details: VoronoiLattice::new(29, config.detail_cell_size, 1),
                config,
            }
        }

        fn ctx(&self) -> OverlayContext<'_> {
            OverlayContext { noise: &self.noise, details: &self.details, config: &self.config }
        }
    }

    fn tile(position: Vec3, purpose: Purpose, elevation: f32, temperature: f32) -> Tile {
        let mut t = Tile::new(position, Vec3::Z, purpose);
        t.elevation = elevation;
        t.temperature = temperature;
        t.precipitation = 120.0;
        t.vegetation = 0.9;
        t.biome = if elevation < 0.0 { BiomeId::Water } else { BiomeId::TemperateGrassland };
        t
    }

    fn scan() -> impl Iterator<Item = Vec3> {
        (0..900).map(|i| Vec3::new((i % 30) as f32 * 4.7 + 0.3, (i / 30) as f32 * 4.7 + 0.3, 500.0))
    }

    #[test]
    fn snow_covers_cold_ground_only() {
        let fx = Fixture::new();
        let ctx = fx.ctx();
        for p in scan().take(100) {
            let cold = tile(p, Purpose::Land, 12.0, -20.0);
            assert!(SnowOverlay.mask(&cold, &ctx) >= 0.8);
            let warm = tile(p, Purpose::Land, 12.0, 10.0);
            assert_eq!(SnowOverlay.mask(&warm, &ctx), 0.0);
            let frozen_sea = tile(p, Purpose::Water, -4.0, -20.0);
            assert!(SnowOverlay.mask(&frozen_sea, &ctx) >= 0.6);
            let open_sea = tile(p, Purpose::Water, -4.0, 1.0);
            assert_eq!(SnowOverlay.mask(&open_sea, &ctx), 0.0);
        }
    }

    #[test]
    fn ice_forms_on_cold_water() {
        let fx = Fixture::new();
        let ctx = fx.ctx();
        for p in scan().take(100) {
            let cold = tile(p, Purpose::Water, -8.0, -10.0);
            assert!(IceOverlay.mask(&cold, &ctx) >= 0.75);
            let temperate = tile(p, Purpose::Water, -8.0, 5.0);
            assert_eq!(IceOverlay.mask(&temperate, &ctx), 0.0);
            let warm_land = tile(p, Purpose::Land, 3.0, 5.0);
            assert_eq!(IceOverlay.mask(&warm_land, &ctx), 0.0);
        }

        let mut sea = tile(Vec3::new(2.0, 3.0, 500.0), Purpose::Water, -8.0, -10.0);
        sea.material = Material::water_base(sea.depth(), &fx.config);
        let open = sea.material;
        IceOverlay.apply(&mut sea, &ctx);
        assert!(sea.material.albedo.min_element() > 0.55);
        assert!(sea.material.albedo.x > open.albedo.x);
        assert!(sea.material.opacity > open.opacity);
    }

    #[test]
    fn waterlilies_only_in_shallow_warm_water() {
        let fx = Fixture::new();
        let ctx = fx.ctx();
        let mut lilies = 0;
        for p in scan() {
            let shallow = tile(p, Purpose::Water, -2.0, 25.0);
            if FlowersOverlay.mask(&shallow, &ctx) > 0.0 {
                lilies += 1;
                let pad = FlowersOverlay.material(&shallow, &ctx);
                assert!(pad.albedo.y > pad.albedo.x && pad.albedo.y > pad.albedo.z);
            }
            let deep = tile(p, Purpose::Water, -10.0, 25.0);
            assert_eq!(FlowersOverlay.mask(&deep, &ctx), 0.0);
            let cold = tile(p, Purpose::Water, -2.0, 4.0);
            assert_eq!(FlowersOverlay.mask(&cold, &ctx), 0.0);
        }
        assert!(lilies > 0);
    }

    #[test]
    fn flowers_bloom_on_land_but_not_underwater() {
        let fx = Fixture::new();
        let ctx = fx.ctx();
        let mut meadows = 0;
        for p in scan() {
            let meadow = tile(p, Purpose::Land, 6.0, 18.0);
            if FlowersOverlay.mask(&meadow, &ctx) > 0.0 {
                meadows += 1;
            }
            let sunk = tile(p, Purpose::Land, -1.0, 18.0);
            assert_eq!(FlowersOverlay.mask(&sunk, &ctx), 0.0);
            let mut barren = meadow;
            barren.vegetation = 0.0;
            assert_eq!(FlowersOverlay.mask(&barren, &ctx), 0.0);
        }
        assert!(meadows > 0);
    }
}
