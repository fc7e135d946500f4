//! Density composition from a selected shape and elevation profile.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{ElevationProfile, Shape};
use crate::geometry::Aabb;
use crate::noise::NoiseRegistry;
use crate::voronoi::VoronoiLattice;

/// Errors raised while selecting the terrain functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Unknown shape '{0}'")]
    UnknownShape(String),
    #[error("Unknown elevation profile '{0}'")]
    UnknownElevation(String),
    #[error("No shape selected")]
    NoShapeSelected,
    #[error("No elevation profile selected")]
    NoElevationSelected,
}

/// Errors raised while evaluating a field.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{what} is not finite at {position}")]
    NonFinite { what: &'static str, position: Vec3 },
}

/// Returns `value` or a [`FieldError::NonFinite`] naming the quantity.
pub fn ensure_finite(what: &'static str, position: Vec3, value: f32) -> Result<f32, FieldError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FieldError::NonFinite { what, position })
    }
}

/// Which surface a density or tile query is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Purpose {
    /// Carved land surface.
    Land,
    /// Uncarved sea surface.
    Water,
    /// Walkable surface; underwater areas stay at the base shape.
    Navigation,
}

impl Purpose {
    pub const fn name(self) -> &'static str {
        match self {
            Purpose::Land => "land",
            Purpose::Water => "water",
            Purpose::Navigation => "navigation",
        }
    }
}

/// Terrain selection as it appears in a world config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Shape library name.
    pub shape: String,
    /// Elevation profile name.
    pub elevation: String,
    /// Planet radius in metres.
    pub radius: f32,
    /// Characteristic relief height in metres.
    pub amplitude: f32,
    /// Cell size of the crater lattice in metres.
    pub crater_cell_size: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            shape: Shape::Sphere.name().to_string(),
            elevation: ElevationProfile::Continents.name().to_string(),
            radius: 500.0,
            amplitude: 30.0,
            crater_cell_size: 120.0,
        }
    }
}

/// Collects the shape and elevation selection before a [`Terrain`] exists.
#[derive(Debug, Clone)]
pub struct TerrainBuilder {
    shape: Option<Shape>,
    elevation: Option<ElevationProfile>,
    radius: f32,
    amplitude: f32,
    crater_cell_size: f32,
    seed: u64,
}

impl Default for TerrainBuilder {
    fn default() -> Self {
        let defaults = TerrainConfig::default();
        Self {
            shape: None,
            elevation: None,
            radius: defaults.radius,
            amplitude: defaults.amplitude,
            crater_cell_size: defaults.crater_cell_size,
            seed: 0,
        }
    }
}

impl TerrainBuilder {
    /// Builder with default dimensions and nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder populated from a config, resolving names eagerly.
    pub fn from_config(config: &TerrainConfig, seed: u64) -> Result<Self, ShapeError> {
        Ok(Self::new()
            .shape_named(&config.shape)?
            .elevation_named(&config.elevation)?
            .radius(config.radius)
            .amplitude(config.amplitude)
            .crater_cell_size(config.crater_cell_size)
            .seed(seed))
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn shape_named(self, name: &str) -> Result<Self, ShapeError> {
        Ok(self.shape(Shape::from_name(name)?))
    }

    pub fn elevation(mut self, profile: ElevationProfile) -> Self {
        self.elevation = Some(profile);
        self
    }

    pub fn elevation_named(self, name: &str) -> Result<Self, ShapeError> {
        Ok(self.elevation(ElevationProfile::from_name(name)?))
    }

    pub fn radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    pub fn crater_cell_size(mut self, size: f32) -> Self {
        self.crater_cell_size = size;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Finishes the selection. Fails if a shape or profile is missing.
    pub fn build(self) -> Result<Terrain, ShapeError> {
        let shape = self.shape.ok_or(ShapeError::NoShapeSelected)?;
        let elevation = self.elevation.ok_or(ShapeError::NoElevationSelected)?;
        Ok(Terrain {
            shape,
            elevation,
            radius: self.radius,
            amplitude: self.amplitude,
            craters: VoronoiLattice::new(self.seed ^ 0xC7A7_E75E_ED00_0001, self.crater_cell_size, 1),
        })
    }
}

/// A resolved shape and elevation pair.
///
/// Evaluation is pure; the same terrain can be shared across threads once
/// [`Terrain::preseed`] has succeeded.
#[derive(Debug, Clone, Copy)]
pub struct Terrain {
    shape: Shape,
    elevation: ElevationProfile,
    radius: f32,
    amplitude: f32,
    craters: VoronoiLattice,
}

impl Terrain {
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn elevation_profile(&self) -> ElevationProfile {
        self.elevation
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Signed distance to the uncarved base shape.
    pub fn shape_distance(&self, p: Vec3, noise: &NoiseRegistry) -> f32 {
        self.shape.distance(p, self.radius, noise)
    }

    /// Raw elevation in metres relative to the base shape.
    pub fn elevation(&self, p: Vec3, noise: &NoiseRegistry) -> f32 {
        self.elevation.height(p, self.amplitude, noise, &self.craters)
    }

    /// Elevation the density of `purpose` carves with.
    pub fn surface_elevation(&self, p: Vec3, purpose: Purpose, noise: &NoiseRegistry) -> f32 {
        match purpose {
            Purpose::Land => self.elevation(p, noise),
            Purpose::Water => 0.0,
            Purpose::Navigation => self.elevation(p, noise).max(0.0),
        }
    }

    /// Density for `purpose`; negative inside the solid.
    pub fn density(&self, p: Vec3, purpose: Purpose, noise: &NoiseRegistry) -> f32 {
        self.shape_distance(p, noise) - self.surface_elevation(p, purpose, noise)
    }

    /// Density for `purpose` as a closure suitable for mesh extraction.
    pub fn field<'a>(&'a self, purpose: Purpose, noise: &'a NoiseRegistry) -> impl Fn(Vec3) -> f32 + Sync + 'a {
        move |p| self.density(p, purpose, noise)
    }

    /// Box that contains every surface this terrain can produce.
    pub fn bounds(&self) -> Aabb {
        Aabb::cube(1.35 * self.radius + 2.0 * self.amplitude.abs())
    }

    /// Samples every field once and fails on the first non-finite value.
    pub fn preseed(&self, noise: &NoiseRegistry) -> Result<(), FieldError> {
        let probes = [
            Vec3::ZERO,
            Vec3::X * self.radius,
            Vec3::Y * self.radius,
            Vec3::NEG_Z * self.radius,
            Vec3::new(0.3, -0.6, 0.74) * self.radius,
        ];
        for p in probes {
            ensure_finite("shape", p, self.shape_distance(p, noise))?;
            ensure_finite("elevation", p, self.elevation(p, noise))?;
            for purpose in [Purpose::Land, Purpose::Water, Purpose::Navigation] {
                ensure_finite(purpose.name(), p, self.density(p, purpose, noise))?;
            }
        }
        debug!(shape = %self.shape, elevation = %self.elevation, "terrain preseed passed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terrain(shape: Shape, elevation: ElevationProfile) -> Terrain {
        TerrainBuilder::new()
            .shape(shape)
            .elevation(elevation)
            .radius(500.0)
            .amplitude(30.0)
            .seed(9)
            .build()
            .unwrap()
    }

    #[test]
    fn build_requires_selection() {
        assert_eq!(TerrainBuilder::new().build().err(), Some(ShapeError::NoShapeSelected));
        assert_eq!(
            TerrainBuilder::new().shape(Shape::Sphere).build().err(),
            Some(ShapeError::NoElevationSelected)
        );
    }

    #[test]
    fn unknown_names_fail_at_selection() {
        let config = TerrainConfig { shape: "blob".into(), ..TerrainConfig::default() };
        assert_eq!(
            TerrainBuilder::from_config(&config, 1).err(),
            Some(ShapeError::UnknownShape("blob".into()))
        );
        let config = TerrainConfig { elevation: "spikes".into(), ..TerrainConfig::default() };
        assert_eq!(
            TerrainBuilder::from_config(&config, 1).err(),
            Some(ShapeError::UnknownElevation("spikes".into()))
        );
    }

    #[test]
    fn purposes_compose_elevation() {
        let noise = NoiseRegistry::new(9);
        let t = terrain(Shape::Sphere, ElevationProfile::Continents);
        for i in 0..20 {
            let p = Vec3::new(i as f32 - 10.0, 3.0, 7.0).normalize() * 500.0;
            let shape = t.shape_distance(p, &noise);
            let elev = t.elevation(p, &noise);
            assert_eq!(t.density(p, Purpose::Land, &noise), shape - elev);
            assert_eq!(t.density(p, Purpose::Water, &noise), shape);
            assert_eq!(t.density(p, Purpose::Navigation, &noise), shape - elev.max(0.0));
        }
    }

    #[test]
    fn field_closure_matches_density() {
        let noise = NoiseRegistry::new(2);
        let t = terrain(Shape::Torus, ElevationProfile::Hills);
        let f = t.field(Purpose::Land, &noise);
        let p = Vec3::new(120.0, -40.0, 310.0);
        assert_eq!(f(p), t.density(p, Purpose::Land, &noise));
    }

    #[test]
    fn preseed_passes_for_every_selection() {
        let noise = NoiseRegistry::new(4);
        for shape in Shape::all() {
            for profile in ElevationProfile::all() {
                assert!(terrain(shape, profile).preseed(&noise).is_ok(), "{} / {}", shape, profile);
            }
        }
    }

    #[test]
    fn non_finite_amplitude_fails_preseed() {
        let noise = NoiseRegistry::new(4);
        let t = TerrainBuilder::new()
            .shape(Shape::Sphere)
            .elevation(ElevationProfile::Hills)
            .amplitude(f32::NAN)
            .build()
            .unwrap();
        assert!(matches!(t.preseed(&noise), Err(FieldError::NonFinite { what: "elevation", .. })));
    }

    #[test]
    fn bounds_contain_surface() {
        let t = terrain(Shape::Sphere, ElevationProfile::Mountains);
        let b = t.bounds();
        assert!(b.contains(Vec3::splat(500.0 / 3f32.sqrt())));
        assert!(b.contains(Vec3::X * 560.0));
    }
}
