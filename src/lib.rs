//! Procedural planet surface synthesis.
//!
//! This crate turns a named signed-distance shape plus an elevation profile
//! into a triangle mesh, classifies every surface point into a tile
//! (elevation, slope, climate, biome, terrain type and a composited material)
//! and scatters doodads over the classified surface.

pub mod biomes;
pub mod climate;
pub mod config;
pub mod doodads;
pub mod geometry;
pub mod materials;
pub mod mesh;
pub mod noise;
pub mod pipeline;
pub mod terrain;
pub mod tile;
pub mod voronoi;

pub use config::{ConfigError, WorldConfig};
pub use doodads::{place_doodad, DoodadCatalog, DoodadPrototype, PlacementContext};
pub use geometry::Aabb;
pub use mesh::{extract_mesh, DensityField, Mesh, Triangle, Vertex};
pub use noise::{FractalNoiseConfig, NoiseRegistry, NoiseRole};
pub use pipeline::{GenerationStage, Pipeline, PipelineError, SurfaceJob};
pub use terrain::{ElevationProfile, FieldError, Purpose, Shape, ShapeError, Terrain, TerrainBuilder};
pub use tile::{Tile, TileClassifier};
pub use voronoi::VoronoiLattice;
