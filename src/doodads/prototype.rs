//! Doodad prototypes and catalogs.

use serde::{Deserialize, Serialize};

/// Closed interval used for placement requirements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.min && x <= self.max
    }

    pub fn midpoint(&self) -> f32 {
        0.5 * (self.min + self.max)
    }

    /// Triangular membership: 1 at the midpoint, falling linearly to 0 at the edges.
    pub fn membership(&self, x: f32) -> f32 {
        let half = 0.5 * (self.max - self.min);
        if !(half > 0.0) {
            return if x == self.min { 1.0 } else { 0.0 };
        }
        (1.0 - (x - self.midpoint()).abs() / half).max(0.0)
    }
}

/// A placeable decorative object and the conditions it grows under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoodadPrototype {
    pub name: String,
    /// Asset reference handed to the renderer.
    pub asset: String,

    // Soft requirements, weighted by triangular membership.
    pub temperature: Option<Range>,
    pub precipitation: Option<Range>,
    pub nationality: Option<Range>,
    pub fertility: Option<Range>,

    // Hard requirements.
    pub elevation: Option<Range>,
    pub slope: Option<Range>,
    /// Only placed on water.
    pub ocean_only: bool,
    /// Only placed on steep slopes.
    pub slope_only: bool,

    /// Probability of a placement when every factor is 1.
    pub probability: f32,
}

impl Default for DoodadPrototype {
    fn default() -> Self {
        Self {
            name: String::new(),
            asset: String::new(),
            temperature: None,
            precipitation: None,
            nationality: None,
            fertility: None,
            elevation: None,
            slope: None,
            ocean_only: false,
            slope_only: false,
            probability: 0.05,
        }
    }
}

impl DoodadPrototype {
    pub fn new(name: &str, probability: f32) -> Self {
        Self {
            name: name.to_string(),
            asset: format!("doodads/{}", name),
            probability,
            ..Self::default()
        }
    }

    pub fn temperature(mut self, min: f32, max: f32) -> Self {
        self.temperature = Some(Range::new(min, max));
        self
    }

    pub fn precipitation(mut self, min: f32, max: f32) -> Self {
        self.precipitation = Some(Range::new(min, max));
        self
    }

    pub fn nationality(mut self, min: f32, max: f32) -> Self {
        self.nationality = Some(Range::new(min, max));
        self
    }

    pub fn fertility(mut self, min: f32, max: f32) -> Self {
        self.fertility = Some(Range::new(min, max));
        self
    }

    pub fn elevation(mut self, min: f32, max: f32) -> Self {
        self.elevation = Some(Range::new(min, max));
        self
    }

    pub fn slope(mut self, min: f32, max: f32) -> Self {
        self.slope = Some(Range::new(min, max));
        self
    }

    pub fn ocean_only(mut self) -> Self {
        self.ocean_only = true;
        self
    }

    pub fn slope_only(mut self) -> Self {
        self.slope_only = true;
        self
    }
}

/// An ordered set of prototypes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoodadCatalog {
    pub prototypes: Vec<DoodadPrototype>,
}

impl DoodadCatalog {
    pub fn new(prototypes: Vec<DoodadPrototype>) -> Self {
        Self { prototypes }
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&DoodadPrototype> {
        self.prototypes.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.prototypes.iter().position(|p| p.name == name)
    }

    /// Built-in catalog of trees, shrubs, rocks and sea life.
    ///
    /// Temperatures are °C, precipitation cm/year, elevation metres, slope radians.
    pub fn earth_like() -> Self {
        Self::new(vec![
            DoodadPrototype::new("oak_tree", 0.08)
                .temperature(0.0, 30.0)
                .precipitation(60.0, 300.0)
                .fertility(0.2, 1.0)
                .elevation(0.5, 25.0)
                .slope(0.0, 0.5),
            DoodadPrototype::new("pine_tree", 0.08)
                .temperature(-15.0, 15.0)
                .precipitation(30.0, 200.0)
                .elevation(0.5, 40.0)
                .slope(0.0, 0.6),
            DoodadPrototype::new("palm_tree", 0.05)
                .temperature(18.0, 40.0)
                .precipitation(80.0, 400.0)
                .elevation(0.0, 4.0)
                .slope(0.0, 0.3),
            DoodadPrototype::new("cactus", 0.04)
                .temperature(15.0, 45.0)
                .precipitation(0.0, 40.0)
                .elevation(0.0, 30.0),
            DoodadPrototype::new("shrub", 0.1)
                .temperature(-5.0, 35.0)
                .precipitation(20.0, 250.0)
                .elevation(0.0, 30.0)
                .slope(0.0, 0.6),
            DoodadPrototype::new("farmhouse", 0.01)
                .temperature(0.0, 30.0)
                .fertility(0.3, 1.0)
                .nationality(0.0, 1.0)
                .elevation(0.5, 15.0)
                .slope(0.0, 0.15),
            DoodadPrototype::new("ice_spire", 0.03).temperature(-60.0, -6.0).elevation(0.0, 80.0),
            DoodadPrototype::new("boulder", 0.1).slope(0.7, 1.6).slope_only(),
            DoodadPrototype::new("kelp", 0.06)
                .temperature(2.0, 28.0)
                .elevation(-25.0, -1.0)
                .ocean_only(),
            DoodadPrototype::new("coral", 0.05)
                .temperature(20.0, 40.0)
                .elevation(-8.0, -0.5)
                .ocean_only(),
        ])
    }
}
