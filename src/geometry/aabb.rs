//! Axis-aligned bounding boxes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box given by its inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: [f32; 3],
    /// Maximum corner.
    pub max: [f32; 3],
}

impl Aabb {
    /// Creates a box from two corners, sorting components.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b).to_array(),
            max: a.max(b).to_array(),
        }
    }

    /// Cube centred at the origin with the given half extent.
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent.abs();
        Self::new(Vec3::splat(-h), Vec3::splat(h))
    }

    /// An inverted box that grows from the first point it is extended with.
    pub fn empty() -> Self {
        Self {
            min: [f32::INFINITY; 3],
            max: [f32::NEG_INFINITY; 3],
        }
    }

    /// True if no point was ever added.
    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        Vec3::from_array(self.min)
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        Vec3::from_array(self.max)
    }

    /// Edge lengths.
    pub fn size(&self) -> Vec3 {
        self.max() - self.min()
    }

    /// Grows the box to contain `p`.
    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min().min(p).to_array();
        self.max = self.max().max(p).to_array();
    }

    /// True if `p` lies inside or on the box.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min()).all() && p.cmple(self.max()).all()
    }
}
