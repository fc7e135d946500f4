//! Dense sample grid with cached central-difference gradients.

use glam::{IVec3, Vec3};
use rayon::prelude::*;

use super::DensityField;
use crate::geometry::Aabb;
use crate::terrain::{ensure_finite, FieldError};

pub(crate) struct SampleGrid {
    origin: Vec3,
    step: Vec3,
    /// Samples per axis.
    n: usize,
    values: Vec<f32>,
    gradients: Vec<Vec3>,
}

impl SampleGrid {
    /// Samples `field` at `side + 1` points per axis over `bounds`.
    pub(crate) fn sample<F: DensityField + ?Sized>(field: &F, bounds: &Aabb, side: usize) -> Result<Self, FieldError> {
        let n = side + 1;
        let origin = bounds.min();
        let step = bounds.size() / side as f32;

        let slabs = (0..n)
            .into_par_iter()
            .map(|z| {
                let mut slab = Vec::with_capacity(n * n);
                for y in 0..n {
                    for x in 0..n {
                        let p = origin + step * Vec3::new(x as f32, y as f32, z as f32);
                        slab.push(ensure_finite("density", p, field.density(p))?);
                    }
                }
                Ok::<_, FieldError>(slab)
            })
            .collect::<Result<Vec<Vec<f32>>, FieldError>>()?;
        let values: Vec<f32> = slabs.into_iter().flatten().collect();

        let mut grid = Self { origin, step, n, values, gradients: Vec::new() };
        let gradients = (0..n * n * n)
            .into_par_iter()
            .map(|i| grid.central_difference(grid.unflatten(i)))
            .collect();
        grid.gradients = gradients;
        Ok(grid)
    }

    pub(crate) fn side(&self) -> usize {
        self.n - 1
    }

    pub(crate) fn step(&self) -> Vec3 {
        self.step
    }

    pub(crate) fn position(&self, c: IVec3) -> Vec3 {
        self.origin + self.step * c.as_vec3()
    }

    /// Sample at `c`; zero outside the grid.
    pub(crate) fn value(&self, c: IVec3) -> f32 {
        self.index(c).map_or(0.0, |i| self.values[i])
    }

    /// Cached gradient at `c`; zero outside the grid.
    pub(crate) fn gradient(&self, c: IVec3) -> Vec3 {
        self.index(c).map_or(Vec3::ZERO, |i| self.gradients[i])
    }

    fn index(&self, c: IVec3) -> Option<usize> {
        let n = self.n as i32;
        if c.cmplt(IVec3::ZERO).any() || c.cmpge(IVec3::splat(n)).any() {
            return None;
        }
        Some((c.z as usize * self.n + c.y as usize) * self.n + c.x as usize)
    }

    fn unflatten(&self, i: usize) -> IVec3 {
        let n = self.n;
        IVec3::new((i % n) as i32, ((i / n) % n) as i32, (i / (n * n)) as i32)
    }

    fn central_difference(&self, c: IVec3) -> Vec3 {
        let d = |axis: IVec3| self.value(c + axis) - self.value(c - axis);
        Vec3::new(d(IVec3::X), d(IVec3::Y), d(IVec3::Z)) / (2.0 * self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_field_has_exact_interior_gradient() {
        let field = |p: Vec3| 2.0 * p.x - p.z;
        let grid = SampleGrid::sample(&field, &Aabb::cube(4.0), 8).unwrap();
        assert_eq!(grid.side(), 8);
        let g = grid.gradient(IVec3::new(3, 4, 5));
        assert!((g - Vec3::new(2.0, 0.0, -1.0)).length() < 1e-5);
        assert_eq!(grid.value(IVec3::new(-1, 0, 0)), 0.0);
        assert_eq!(grid.value(IVec3::new(0, 9, 0)), 0.0);
    }

    #[test]
    fn non_finite_sample_is_fatal() {
        let field = |p: Vec3| if p.x > 1.0 { f32::NAN } else { p.x };
        let err = SampleGrid::sample(&field, &Aabb::cube(4.0), 4).err();
        assert!(matches!(err, Some(FieldError::NonFinite { what: "density", .. })));
    }
}
