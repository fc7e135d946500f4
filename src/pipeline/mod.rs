//! Pipeline module for orchestrating surface generation stages.
//!
//! Provides a trait-based architecture in which mesh extraction, tile
//! classification and doodad placement are stages of one run.

mod stage;

pub use stage::{
    ClassifyStage, GenerationStage, MeshStage, Pipeline, PipelineError, PlacementStage, StageId, SurfaceJob,
};
