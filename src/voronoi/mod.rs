//! Deterministic jittered Voronoi lattice.
//!
//! Feature points are a pure function of (seed, cell, index), so any query can
//! be answered independently of every other query.

mod hash;
mod lattice;

pub use hash::{hash_cell, mix64, unit_f32};
pub use lattice::{FeaturePoint, LatticeConfig, VoronoiLattice, NEAREST_COUNT};
