//! Overlay trait and the default overlay stack.

use crate::noise::NoiseRegistry;
use crate::terrain::Purpose;
use crate::tile::Tile;
use crate::voronoi::VoronoiLattice;

use super::{
    BedrockOverlay, BouldersOverlay, CliffsOverlay, DirtOverlay, FlowersOverlay, GrassOverlay, IceOverlay,
    Material, MaterialConfig, MicaOverlay, SandOverlay, SnowOverlay, StumpsOverlay,
};

/// Shared inputs of every overlay evaluation.
pub struct OverlayContext<'a> {
    pub noise: &'a NoiseRegistry,
    /// Fine lattice for rocks, cracks and stumps.
    pub details: &'a VoronoiLattice,
    pub config: &'a MaterialConfig,
}

/// A material layer blended onto a tile.
///
/// Overlays see the tile as classified so far and must not depend on any
/// state besides the tile and the context.
pub trait MaterialOverlay: Send + Sync {
    /// Name used in configs and logs.
    fn name(&self) -> &'static str;

    /// Whether the overlay runs for tiles of `purpose`.
    fn applies_to(&self, purpose: Purpose) -> bool {
        purpose != Purpose::Water
    }

    /// Activation in [0,1].
    fn mask(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> f32;

    /// Material blended in where the mask is active.
    fn material(&self, tile: &Tile, ctx: &OverlayContext<'_>) -> Material;

    /// Blends the overlay into the tile's material.
    fn apply(&self, tile: &mut Tile, ctx: &OverlayContext<'_>) {
        if !self.applies_to(tile.purpose) {
            return;
        }
        let mask = self.mask(tile, ctx).clamp(0.0, 1.0);
        if mask < super::MASK_EPSILON {
            return;
        }
        let layer = self.material(tile, ctx);
        tile.material.blend(&layer, mask);
    }
}

/// Land overlays followed by cross-purpose overlays, minus disabled names.
pub fn default_overlays(config: &MaterialConfig) -> Vec<Box<dyn MaterialOverlay>> {
    let all: Vec<Box<dyn MaterialOverlay>> = vec![
        Box::new(BedrockOverlay),
        Box::new(CliffsOverlay),
        Box::new(MicaOverlay),
        Box::new(DirtOverlay),
        Box::new(SandOverlay),
        Box::new(GrassOverlay),
        Box::new(BouldersOverlay),
        Box::new(StumpsOverlay),
        Box::new(FlowersOverlay),
        Box::new(IceOverlay),
        Box::new(SnowOverlay),
    ];
    all.into_iter()
        .filter(|o| !config.disabled_overlays.iter().any(|d| d == o.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stack_order() {
        let names: Vec<_> = default_overlays(&MaterialConfig::default()).iter().map(|o| o.name()).collect();
        assert_eq!(
            names,
            ["bedrock", "cliffs", "mica", "dirt", "sand", "grass", "boulders", "stumps", "flowers", "ice", "snow"]
        );
    }

    #[test]
    fn disabled_overlays_are_dropped() {
        let cfg = MaterialConfig {
            disabled_overlays: vec!["snow".into(), "mica".into()],
            ..MaterialConfig::default()
        };
        let stack = default_overlays(&cfg);
        assert_eq!(stack.len(), 9);
        assert!(stack.iter().all(|o| o.name() != "snow" && o.name() != "mica"));
    }

    #[test]
    fn land_overlays_skip_water() {
        for o in default_overlays(&MaterialConfig::default()).iter().take(8) {
            assert!(!o.applies_to(Purpose::Water), "{}", o.name());
            assert!(o.applies_to(Purpose::Land));
        }
        for o in default_overlays(&MaterialConfig::default()).iter().skip(8) {
            assert!(o.applies_to(Purpose::Water), "{}", o.name());
        }
    }
}
