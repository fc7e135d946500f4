//! Staged tile classification.

use glam::Vec3;

use super::{slope_angle, star_offsets, Tile};
use crate::biomes::{classify_biome, classify_terrain_type, fertility, vegetation_density, BiomeConfig, TerrainType};
use crate::climate::{sample_climate, Climate, ClimateConfig};
use crate::materials::{default_overlays, Material, MaterialConfig, MaterialOverlay, OverlayContext};
use crate::noise::NoiseRegistry;
use crate::terrain::{ensure_finite, FieldError, Purpose, Terrain};
use crate::voronoi::{mix64, VoronoiLattice};

/// Classification stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileStage {
    Elevation,
    Slope,
    Climate,
    Biome,
    TerrainType,
    LandOverlays,
    CrossOverlays,
    Finalize,
}

impl TileStage {
    pub const ALL: [TileStage; 8] = [
        TileStage::Elevation,
        TileStage::Slope,
        TileStage::Climate,
        TileStage::Biome,
        TileStage::TerrainType,
        TileStage::LandOverlays,
        TileStage::CrossOverlays,
        TileStage::Finalize,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TileStage::Elevation => "elevation",
            TileStage::Slope => "slope",
            TileStage::Climate => "climate",
            TileStage::Biome => "biome",
            TileStage::TerrainType => "terrain_type",
            TileStage::LandOverlays => "land_overlays",
            TileStage::CrossOverlays => "cross_overlays",
            TileStage::Finalize => "finalize",
        }
    }
}

/// Turns (position, normal, purpose) into a fully resolved [`Tile`].
///
/// Holds only immutable state, so one classifier can serve many threads and
/// identical queries always produce bit-identical tiles.
pub struct TileClassifier<'a> {
    terrain: Terrain,
    noise: &'a NoiseRegistry,
    climate: ClimateConfig,
    biomes: BiomeConfig,
    materials: MaterialConfig,
    /// Coarse lattice for nationality and roads.
    regions: VoronoiLattice,
    /// Fine lattice for rocks, cracks and flowers.
    details: VoronoiLattice,
    land_overlays: Vec<Box<dyn MaterialOverlay>>,
    cross_overlays: Vec<Box<dyn MaterialOverlay>>,
}

impl<'a> TileClassifier<'a> {
    /// Classifier with default climate, biome and material settings.
    pub fn new(terrain: Terrain, noise: &'a NoiseRegistry) -> Self {
        let mut classifier = Self {
            terrain,
            noise,
            climate: ClimateConfig::default(),
            biomes: BiomeConfig::default(),
            materials: MaterialConfig::default(),
            regions: VoronoiLattice::new(0, 1.0, 1),
            details: VoronoiLattice::new(0, 1.0, 1),
            land_overlays: Vec::new(),
            cross_overlays: Vec::new(),
        };
        classifier.rebuild_lattices();
        classifier.rebuild_overlays();
        classifier
    }

    pub fn with_climate(mut self, climate: ClimateConfig) -> Self {
        self.climate = climate;
        self
    }

    pub fn with_biomes(mut self, biomes: BiomeConfig) -> Self {
        self.biomes = biomes;
        self.rebuild_lattices();
        self
    }

    pub fn with_materials(mut self, materials: MaterialConfig) -> Self {
        self.materials = materials;
        self.rebuild_lattices();
        self.rebuild_overlays();
        self
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn noise(&self) -> &NoiseRegistry {
        self.noise
    }

    /// Names of the active overlays in blend order.
    pub fn overlay_names(&self) -> Vec<&'static str> {
        self.land_overlays.iter().chain(&self.cross_overlays).map(|o| o.name()).collect()
    }

    fn rebuild_lattices(&mut self) {
        let seed = self.noise.seed();
        self.regions = VoronoiLattice::new(mix64(seed ^ 0x5245_4749_4f4e), self.biomes.region_cell_size, 1);
        self.details = VoronoiLattice::new(mix64(seed ^ 0x4445_5441_494c), self.materials.detail_cell_size, 1);
    }

    fn rebuild_overlays(&mut self) {
        let (cross, land): (Vec<_>, Vec<_>) = default_overlays(&self.materials)
            .into_iter()
            .partition(|o| o.applies_to(Purpose::Water));
        self.land_overlays = land;
        self.cross_overlays = cross;
    }

    /// Classifies one surface point. Fails if any stage produces a non-finite value.
    pub fn classify(&self, position: Vec3, normal: Vec3, purpose: Purpose) -> Result<Tile, FieldError> {
        let mut tile = Tile::new(position, normal.normalize_or_zero(), purpose);
        for stage in TileStage::ALL {
            self.run_stage(stage, &mut tile)?;
        }
        Ok(tile)
    }

    /// Runs a single stage. Stages assume their predecessors already ran.
    pub fn run_stage(&self, stage: TileStage, tile: &mut Tile) -> Result<(), FieldError> {
        let p = tile.position;
        match stage {
            TileStage::Elevation => {
                let raw = self.terrain.elevation(p, self.noise);
                // Water keeps the raw value so depth stays known.
                tile.elevation = match tile.purpose {
                    Purpose::Navigation => raw.max(0.0),
                    Purpose::Land | Purpose::Water => raw,
                };
                ensure_finite("elevation", p, tile.elevation)?;
            }
            TileStage::Slope => {
                let radius = self.biomes.slope_radius_m;
                let samples = star_offsets(tile.normal, radius)
                    .map(|o| self.terrain.surface_elevation(p + o, tile.purpose, self.noise));
                tile.slope = ensure_finite("slope", p, slope_angle(&samples, radius))?;
            }
            TileStage::Climate => {
                let c = sample_climate(p, tile.elevation, self.noise, &self.climate);
                tile.temperature = ensure_finite("temperature", p, c.temperature_c)?;
                tile.precipitation = ensure_finite("precipitation", p, c.precipitation_cm)?;
            }
            TileStage::Biome => {
                let climate = Climate { temperature_c: tile.temperature, precipitation_cm: tile.precipitation };
                tile.biome = classify_biome(p, tile.elevation, &climate, self.noise, &self.biomes);
                tile.vegetation = vegetation_density(tile.biome, &climate, tile.slope);
                tile.fertility = fertility(tile.biome, &climate);
                let region = self.regions.nearest(p, tile.normal)[0];
                tile.nationality = self.regions.region_value(&region);
            }
            TileStage::TerrainType => {
                let nearest = self.regions.nearest(p, tile.normal);
                let border = nearest[1].distance - nearest[0].distance < 2.0 * self.biomes.road_half_width_m;
                tile.terrain_type = classify_terrain_type(tile.elevation, tile.slope, tile.biome, border, &self.biomes);
            }
            TileStage::LandOverlays => {
                tile.material = match tile.purpose {
                    Purpose::Water => Material::water_base(tile.depth(), &self.materials),
                    Purpose::Land | Purpose::Navigation => Material::land_base(tile.biome),
                };
                let ctx = self.overlay_context();
                for overlay in &self.land_overlays {
                    overlay.apply(tile, &ctx);
                }
            }
            TileStage::CrossOverlays => {
                let ctx = self.overlay_context();
                for overlay in &self.cross_overlays {
                    overlay.apply(tile, &ctx);
                }
            }
            TileStage::Finalize => {
                for (what, value) in tile.material.channels() {
                    ensure_finite(what, p, value)?;
                }
                tile.material.clamp01();
                tile.vegetation = tile.vegetation.clamp(0.0, 1.0);
                tile.fertility = tile.fertility.clamp(0.0, 1.0);
                tile.buildable = tile.purpose != Purpose::Water
                    && matches!(tile.terrain_type, TerrainType::Flat | TerrainType::Road);
            }
        }
        Ok(())
    }

    fn overlay_context(&self) -> OverlayContext<'_> {
        OverlayContext { noise: self.noise, details: &self.details, config: &self.materials }
    }
}
