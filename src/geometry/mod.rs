//! Geometry helpers shared by meshing and classification.

mod aabb;
mod basis;

pub use aabb::Aabb;
pub use basis::{latitude, polar_factor, tangent_basis, POLAR_AXIS};
