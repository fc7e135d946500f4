//! Isosurface extraction by marching tetrahedra over a dense grid.
//!
//! The zero set of a [`DensityField`] is polygonized over an axis-aligned
//! box. Each grid cube is split into six tetrahedra which are polygonized
//! independently, producing an unindexed triangle soup.

mod grid;
mod tetra;
mod types;

use glam::{IVec3, Vec3};
use rayon::prelude::*;
use tracing::debug;

use crate::geometry::Aabb;
use crate::terrain::FieldError;
use grid::SampleGrid;
use tetra::{polygonize, Corner, TETRAHEDRA};

pub use tetra::DEGENERATE_AREA;
pub use types::{Mesh, MeshConfig, Triangle, Vertex};

/// A scalar field whose sign encodes inside (negative) and outside (positive).
pub trait DensityField: Sync {
    fn density(&self, p: Vec3) -> f32;
}

impl<F> DensityField for F
where
    F: Fn(Vec3) -> f32 + Sync,
{
    fn density(&self, p: Vec3) -> f32 {
        self(p)
    }
}

/// Offset of cube corner `i` in grid units.
fn corner_offset(i: usize) -> IVec3 {
    IVec3::new((i & 1) as i32, ((i >> 1) & 1) as i32, ((i >> 2) & 1) as i32)
}

/// Extracts the zero isosurface of `field` inside `bounds`.
///
/// `resolution` is the number of cubes per axis. Fails if any sample is
/// not finite.
pub fn extract_mesh<F: DensityField + ?Sized>(field: &F, bounds: Aabb, resolution: usize) -> Result<Mesh, FieldError> {
    let side = resolution.max(1);
    let grid = SampleGrid::sample(field, &bounds, side)?;
    debug!(side, step = ?grid.step(), "density grid sampled");

    let slabs: Vec<Vec<Triangle>> = (0..grid.side())
        .into_par_iter()
        .map(|z| {
            let mut out = Vec::new();
            for y in 0..grid.side() {
                for x in 0..grid.side() {
                    let base = IVec3::new(x as i32, y as i32, z as i32);
                    let cube: [Corner; 8] = std::array::from_fn(|i| {
                        let c = base + corner_offset(i);
                        Corner { position: grid.position(c), value: grid.value(c), gradient: grid.gradient(c) }
                    });
                    for tet in TETRAHEDRA {
                        polygonize(&tet.map(|i| cube[i]), &mut out);
                    }
                }
            }
            out
        })
        .collect();

    let mesh = Mesh::new(slabs.into_iter().flatten().collect());
    debug!(triangles = mesh.triangle_count(), "mesh extracted");
    Ok(mesh)
}
