//! Terrain shape and elevation functions.
//!
//! A [`Terrain`] pairs one of the named base shapes with one of the named
//! elevation profiles and evaluates the signed density of land, water and
//! navigation surfaces from them.

pub mod sdf;
mod elevation;
mod field;
mod shapes;

pub use elevation::ElevationProfile;
pub use field::{ensure_finite, FieldError, Purpose, ShapeError, Terrain, TerrainBuilder, TerrainConfig};
pub use shapes::Shape;
