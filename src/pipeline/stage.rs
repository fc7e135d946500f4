//! Generation stage trait and pipeline orchestration.

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, info_span};

use crate::config::{ConfigError, WorldConfig};
use crate::doodads::{place_doodad, Placement, PlacementContext};
use crate::geometry::Aabb;
use crate::mesh::{extract_mesh, Mesh};
use crate::noise::NoiseRegistry;
use crate::terrain::{FieldError, Purpose, ShapeError, Terrain, TerrainBuilder};
use crate::tile::{Tile, TileClassifier};
use crate::voronoi::mix64;

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Isosurface extraction of the land (and optionally water) surface.
    Mesh,
    /// Per-vertex tile classification.
    Classify,
    /// Sequential doodad placement.
    Placement,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Mesh => "mesh",
            StageId::Classify => "classify",
            StageId::Placement => "placement",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// State of one generation run, filled in by the stages.
#[derive(Debug)]
pub struct SurfaceJob {
    pub noise: NoiseRegistry,
    pub terrain: Terrain,
    /// Land surface.
    pub mesh: Option<Mesh>,
    /// Sea surface, when requested.
    pub water_mesh: Option<Mesh>,
    /// One tile per distinct mesh vertex: land vertices first, then water.
    pub tiles: Vec<Tile>,
    pub placements: Vec<Placement>,
    /// Instances per prototype name after placement.
    pub instance_counts: Vec<(String, u64)>,
}

impl SurfaceJob {
    /// Builds the noise registry and terrain, then runs the field self-test.
    ///
    /// Fails on unknown shape or elevation names and on non-finite fields.
    pub fn prepare(config: &WorldConfig) -> Result<Self, PipelineError> {
        let noise = NoiseRegistry::scaled(config.seed, config.noise_scale());
        let terrain = TerrainBuilder::from_config(&config.terrain, config.seed)?.build()?;
        terrain.preseed(&noise)?;
        info!(
            seed = config.seed,
            shape = %terrain.shape(),
            elevation = %terrain.elevation_profile(),
            radius = terrain.radius(),
            "surface job prepared"
        );
        Ok(Self {
            noise,
            terrain,
            mesh: None,
            water_mesh: None,
            tiles: Vec::new(),
            placements: Vec::new(),
            instance_counts: Vec::new(),
        })
    }

    /// Box meshed for this job.
    pub fn bounds(&self, config: &WorldConfig) -> Aabb {
        config.mesh.half_extent.map_or_else(|| self.terrain.bounds(), Aabb::cube)
    }

    /// Builds a classifier from the job's terrain and the config.
    pub fn classifier(&self, config: &WorldConfig) -> TileClassifier<'_> {
        TileClassifier::new(self.terrain, &self.noise)
            .with_climate(config.climate.clone())
            .with_biomes(config.biomes.clone())
            .with_materials(config.materials.clone())
    }
}

/// Trait for implementing generation stages.
///
/// Each stage transforms the job in some way, building upon previous
/// stages.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, modifying the job in place.
    fn execute(&self, job: &mut SurfaceJob, config: &WorldConfig) -> Result<(), PipelineError>;
}

/// Orchestrates multiple generation stages into a complete pipeline.
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
    config: WorldConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: WorldConfig) -> Self {
        Self { stages: Vec::new(), config }
    }

    /// Mesh, classify and place, in that order.
    pub fn standard(config: WorldConfig) -> Self {
        let mut pipeline = Self::new(config);
        pipeline.add_stage(MeshStage).add_stage(ClassifyStage);
        if pipeline.config.doodads.enabled {
            pipeline.add_stage(PlacementStage);
        }
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Prepares a job from the pipeline's config and runs every stage on it.
    pub fn generate(&self) -> Result<SurfaceJob, PipelineError> {
        let mut job = SurfaceJob::prepare(&self.config)?;
        self.run(&mut job)?;
        Ok(job)
    }

    /// Executes all stages in order on the given job.
    pub fn run(&self, job: &mut SurfaceJob) -> Result<(), PipelineError> {
        self.run_with_callbacks(job, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `job` - The job to fill in
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        job: &mut SurfaceJob,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            // Check dependencies
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            let span = info_span!("stage", name = stage.id().name());
            let _enter = span.enter();
            stage.execute(job, &self.config)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Isosurface extraction stage.
pub struct MeshStage;

impl GenerationStage for MeshStage {
    fn id(&self) -> StageId {
        StageId::Mesh
    }

    fn name(&self) -> &str {
        "Mesh Extraction"
    }

    fn execute(&self, job: &mut SurfaceJob, config: &WorldConfig) -> Result<(), PipelineError> {
        let bounds = job.bounds(config);
        let resolution = config.mesh.resolution as usize;

        let land = extract_mesh(&job.terrain.field(Purpose::Land, &job.noise), bounds, resolution)?;
        info!(triangles = land.triangle_count(), area = land.surface_area(), "land surface extracted");
        if land.is_empty() {
            return Err(PipelineError::StageFailed(
                self.name().to_string(),
                "land surface is empty; the bounds miss the shape".to_string(),
            ));
        }
        job.mesh = Some(land);

        if config.mesh.include_water {
            let water = extract_mesh(&job.terrain.field(Purpose::Water, &job.noise), bounds, resolution)?;
            info!(triangles = water.triangle_count(), "water surface extracted");
            job.water_mesh = Some(water);
        }
        Ok(())
    }
}

/// Tile classification for every mesh vertex, in parallel.
pub struct ClassifyStage;

impl GenerationStage for ClassifyStage {
    fn id(&self) -> StageId {
        StageId::Classify
    }

    fn name(&self) -> &str {
        "Tile Classification"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Mesh]
    }

    fn execute(&self, job: &mut SurfaceJob, config: &WorldConfig) -> Result<(), PipelineError> {
        let classifier = job.classifier(config);
        let mut tiles = Vec::new();
        for (mesh, purpose) in [(&job.mesh, Purpose::Land), (&job.water_mesh, Purpose::Water)] {
            let Some(mesh) = mesh else { continue };
            let classified = mesh
                .unique_vertices()
                .par_iter()
                .map(|v| classifier.classify(v.position, v.normal, purpose))
                .collect::<Result<Vec<Tile>, FieldError>>()?;
            debug!(purpose = purpose.name(), tiles = classified.len(), "tiles classified");
            tiles.extend(classified);
        }

        let buildable = tiles.iter().filter(|t| t.buildable).count();
        let water = tiles.iter().filter(|t| t.is_water()).count();
        info!(tiles = tiles.len(), buildable, water, "classification complete");
        job.tiles = tiles;
        Ok(())
    }
}

/// Doodad placement over the classified tiles in vertex order.
pub struct PlacementStage;

impl GenerationStage for PlacementStage {
    fn id(&self) -> StageId {
        StageId::Placement
    }

    fn name(&self) -> &str {
        "Doodad Placement"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Classify]
    }

    fn execute(&self, job: &mut SurfaceJob, config: &WorldConfig) -> Result<(), PipelineError> {
        let catalog = config.catalog();
        let mut context = PlacementContext::new(mix64(config.seed ^ 0xD00D_AD5E_ED00_0000));
        let stride = config.doodads.vertex_stride.max(1);

        let mut placements = Vec::new();
        for tile in job.tiles.iter().step_by(stride) {
            if let Some(prototype) = place_doodad(tile, &catalog, &mut context) {
                placements.push(Placement {
                    prototype: prototype.name.clone(),
                    position: tile.position,
                    normal: tile.normal,
                });
            }
        }

        job.instance_counts = context
            .counts_by_name(&catalog)
            .into_iter()
            .map(|(name, n)| (name.to_string(), n))
            .collect();
        for (name, n) in job.instance_counts.iter().filter(|(_, n)| *n > 0) {
            debug!(prototype = %name, instances = n, "doodads placed");
        }
        info!(placements = placements.len(), offered = job.tiles.len().div_ceil(stride), "placement complete");
        job.placements = placements;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> WorldConfig {
        let mut config = WorldConfig::default();
        config.seed = 5;
        config.mesh.resolution = 24;
        config
    }

    #[test]
    fn classify_requires_mesh() {
        let config = small_config();
        let mut pipeline = Pipeline::new(config.clone());
        pipeline.add_stage(ClassifyStage);
        let mut job = SurfaceJob::prepare(&config).unwrap();
        assert!(matches!(
            pipeline.run(&mut job),
            Err(PipelineError::MissingDependency(stage, dep)) if stage == "Tile Classification" && dep == "mesh"
        ));
    }

    #[test]
    fn unknown_shape_fails_prepare() {
        let mut config = small_config();
        config.terrain.shape = "blob".into();
        assert!(matches!(
            SurfaceJob::prepare(&config),
            Err(PipelineError::Shape(ShapeError::UnknownShape(_)))
        ));
    }

    #[test]
    fn standard_pipeline_fills_job() {
        let pipeline = Pipeline::standard(small_config());
        assert_eq!(pipeline.stage_count(), 3);
        let mut started = Vec::new();
        let mut job = SurfaceJob::prepare(pipeline.config()).unwrap();
        pipeline
            .run_with_callbacks(&mut job, |name, _, _| started.push(name.to_string()), |_, _, _| {})
            .unwrap();
        assert_eq!(started, ["Mesh Extraction", "Tile Classification", "Doodad Placement"]);

        let mesh = job.mesh.as_ref().unwrap();
        assert_eq!(job.tiles.len(), mesh.unique_vertices().len());
        assert!(job.tiles.len() < mesh.vertex_count());
        let counted: u64 = job.instance_counts.iter().map(|(_, n)| n).sum();
        assert_eq!(counted as usize, job.placements.len());
    }

    #[test]
    fn each_surface_point_gets_at_most_one_doodad() {
        let mut config = small_config();
        config.seed = 2024;
        config.mesh.resolution = 28;
        config.doodads.vertex_stride = 1;
        let job = Pipeline::standard(config).generate().unwrap();

        let mut tile_spots: Vec<[u32; 3]> = job.tiles.iter().map(|t| t.position.to_array().map(f32::to_bits)).collect();
        tile_spots.sort_unstable();
        tile_spots.dedup();
        assert_eq!(tile_spots.len(), job.tiles.len());

        assert!(!job.placements.is_empty());
        let mut spots: Vec<[u32; 3]> = job.placements.iter().map(|p| p.position.to_array().map(f32::to_bits)).collect();
        spots.sort_unstable();
        spots.dedup();
        assert_eq!(spots.len(), job.placements.len());
    }

    #[test]
    fn runs_are_reproducible() {
        let a = Pipeline::standard(small_config()).generate().unwrap();
        let b = Pipeline::standard(small_config()).generate().unwrap();
        assert_eq!(a.tiles, b.tiles);
        assert_eq!(a.placements, b.placements);
    }

    #[test]
    fn bounds_that_miss_the_shape_fail() {
        let mut config = small_config();
        config.mesh.half_extent = Some(10.0);
        assert!(matches!(
            Pipeline::standard(config).generate(),
            Err(PipelineError::StageFailed(_, _))
        ));
    }
}
