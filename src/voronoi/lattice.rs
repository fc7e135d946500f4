//! Jittered Voronoi lattice projected onto a query plane.

use std::cmp::Ordering;

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use super::hash::{hash_cell, mix64, next_state, unit_f32};

/// Number of feature points returned by [`VoronoiLattice::nearest`].
pub const NEAREST_COUNT: usize = 4;

/// A lattice feature point as seen from one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeaturePoint {
    /// Point projected onto the query plane.
    pub position: Vec3,
    /// Unprojected jittered point inside its cell.
    pub source: Vec3,
    /// Lattice cell that owns the point.
    pub cell: IVec3,
    /// Index of the point within its cell.
    pub index: u32,
    /// Planar distance from the query position.
    pub distance: f32,
}

impl FeaturePoint {
    fn placeholder() -> Self {
        Self {
            position: Vec3::ZERO,
            source: Vec3::ZERO,
            cell: IVec3::ZERO,
            index: u32::MAX,
            distance: f32::INFINITY,
        }
    }

    /// Total order used for ranking: distance, then cell, then index.
    fn rank(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.cell.x.cmp(&other.cell.x))
            .then_with(|| self.cell.y.cmp(&other.cell.y))
            .then_with(|| self.cell.z.cmp(&other.cell.z))
            .then_with(|| self.index.cmp(&other.index))
    }
}

/// Lattice parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Edge length of one lattice cell in world units.
    pub cell_size: f32,
    /// Jittered points generated per cell.
    pub points_per_cell: u32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self { cell_size: 8.0, points_per_cell: 1 }
    }
}

/// Deterministic jittered feature-point grid.
///
/// Holds nothing but its seed and dimensions, so queries are pure and can run
/// concurrently in any order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiLattice {
    seed: u64,
    cell_size: f32,
    points_per_cell: u32,
}

impl VoronoiLattice {
    /// Creates a lattice. Non-positive sizes fall back to 1.0, and at least one
    /// point is generated per cell.
    pub fn new(seed: u64, cell_size: f32, points_per_cell: u32) -> Self {
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 { cell_size } else { 1.0 };
        Self {
            seed,
            cell_size,
            points_per_cell: points_per_cell.max(1),
        }
    }

    /// Creates a lattice from a config block.
    pub fn from_config(seed: u64, config: &LatticeConfig) -> Self {
        Self::new(seed, config.cell_size, config.points_per_cell)
    }

    /// Cell edge length.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Integer cell containing a position.
    pub fn cell_of(&self, pos: Vec3) -> IVec3 {
        (pos / self.cell_size).floor().as_ivec3()
    }

    /// Jittered points of one cell, in generation order.
    pub fn cell_points(&self, cell: IVec3) -> impl Iterator<Item = Vec3> + '_ {
        let origin = cell.as_vec3() * self.cell_size;
        let size = self.cell_size;
        let mut state = hash_cell(self.seed, cell);
        (0..self.points_per_cell).map(move |_| {
            state = next_state(state);
            let x = unit_f32(state);
            state = next_state(state);
            let y = unit_f32(state);
            state = next_state(state);
            let z = unit_f32(state);
            origin + Vec3::new(x, y, z) * size
        })
    }

    /// Returns the four feature points nearest to `position` after projecting every
    /// candidate onto the plane through `position` with normal `normal`.
    ///
    /// Candidates come from the containing cell and its 26 neighbours. Results are
    /// sorted by non-decreasing planar distance. A zero normal disables projection.
    pub fn nearest(&self, position: Vec3, normal: Vec3) -> [FeaturePoint; NEAREST_COUNT] {
        let n = normal.normalize_or_zero();
        let center = self.cell_of(position);
        let mut best = [FeaturePoint::placeholder(); NEAREST_COUNT];

        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let cell = center + IVec3::new(dx, dy, dz);
                    for (index, source) in self.cell_points(cell).enumerate() {
                        let projected = source - n * (source - position).dot(n);
                        let candidate = FeaturePoint {
                            position: projected,
                            source,
                            cell,
                            index: index as u32,
                            distance: projected.distance(position),
                        };
                        insert_ranked(&mut best, candidate);
                    }
                }
            }
        }

        best
    }

    /// Distances to the nearest and second-nearest feature points (Worley F1, F2).
    pub fn worley(&self, position: Vec3, normal: Vec3) -> (f32, f32) {
        let nearest = self.nearest(position, normal);
        (nearest[0].distance, nearest[1].distance)
    }

    /// Stable value in [0, 1) identifying a feature point's region.
    pub fn region_value(&self, point: &FeaturePoint) -> f32 {
        unit_f32(mix64(hash_cell(self.seed, point.cell) ^ u64::from(point.index)))
    }
}

fn insert_ranked(best: &mut [FeaturePoint; NEAREST_COUNT], candidate: FeaturePoint) {
    if candidate.rank(&best[NEAREST_COUNT - 1]) != Ordering::Less {
        return;
    }
    let mut slot = NEAREST_COUNT - 1;
    while slot > 0 && candidate.rank(&best[slot - 1]) == Ordering::Less {
        best[slot] = best[slot - 1];
        slot -= 1;
    }
    best[slot] = candidate;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_is_deterministic() {
        let lattice = VoronoiLattice::new(1234, 5.0, 2);
        let pos = Vec3::new(12.3, -4.5, 88.0);
        let normal = Vec3::new(0.2, 1.0, 0.1);

        let a = lattice.nearest(pos, normal);
        // Unrelated queries in between must not influence the result.
        let _ = lattice.nearest(Vec3::new(-100.0, 3.0, 2.0), Vec3::X);
        let b = lattice.nearest(pos, normal);
        assert_eq!(a, b);

        let other = VoronoiLattice::new(1234, 5.0, 2);
        assert_eq!(a, other.nearest(pos, normal));
    }

    #[test]
    fn nearest_is_sorted_and_complete() {
        let lattice = VoronoiLattice::new(9, 3.0, 1);
        for i in 0..50 {
            let pos = Vec3::new(i as f32 * 1.7, (i * i) as f32 * 0.05, -(i as f32) * 0.9);
            let points = lattice.nearest(pos, Vec3::Y);
            for w in points.windows(2) {
                assert!(w[0].distance <= w[1].distance);
            }
            assert!(points.iter().all(|p| p.distance.is_finite()));
        }
    }

    #[test]
    fn projected_points_lie_on_query_plane() {
        let lattice = VoronoiLattice::new(77, 4.0, 3);
        let pos = Vec3::new(1.0, 2.0, 3.0);
        let normal = Vec3::new(1.0, 1.0, 0.0).normalize();
        for p in lattice.nearest(pos, normal) {
            assert!((p.position - pos).dot(normal).abs() < 1e-3);
        }
    }

    #[test]
    fn cell_points_stay_inside_their_cell() {
        let lattice = VoronoiLattice::new(5, 2.5, 4);
        let cell = IVec3::new(-3, 7, 0);
        for p in lattice.cell_points(cell) {
            assert_eq!(lattice.cell_of(p), cell);
        }
    }

    #[test]
    fn worley_f1_not_greater_than_f2() {
        let lattice = VoronoiLattice::new(3, 6.0, 1);
        let (f1, f2) = lattice.worley(Vec3::new(10.0, 10.0, 10.0), Vec3::Z);
        assert!(f1 <= f2);
    }

    #[test]
    fn region_value_is_stable_per_feature() {
        let lattice = VoronoiLattice::new(11, 50.0, 1);
        let a = lattice.nearest(Vec3::new(1.0, 1.0, 1.0), Vec3::Y)[0];
        let b = lattice.nearest(Vec3::new(1.5, 1.0, 1.2), Vec3::Y)[0];
        if a.cell == b.cell && a.index == b.index {
            assert_eq!(lattice.region_value(&a), lattice.region_value(&b));
        }
        let v = lattice.region_value(&a);
        assert!((0.0..1.0).contains(&v));
    }
}
