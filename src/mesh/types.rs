//! Mesh data produced by the extractor.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;

/// A surface point with its unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        debug_assert!(
            (normal.length() - 1.0).abs() < 1e-3,
            "vertex normal must be unit length, got {}",
            normal.length()
        );
        Self { position, normal }
    }
}

/// One triangle of the unindexed soup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Unnormalized face normal following the winding.
    pub fn face_normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        (b.position - a.position).cross(c.position - a.position)
    }

    pub fn area(&self) -> f32 {
        0.5 * self.face_normal().length()
    }

    pub fn centroid(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        (a.position + b.position + c.position) / 3.0
    }

    /// Sum of the vertex normals.
    pub fn mean_vertex_normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        a.normal + b.normal + c.normal
    }

    /// Swaps the last two vertices when the winding disagrees with the vertex normals.
    pub(crate) fn orient(&mut self) {
        if self.face_normal().dot(self.mean_vertex_normal()) < 0.0 {
            self.vertices.swap(1, 2);
        }
    }
}

/// Unindexed triangle soup.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Every vertex in triangle order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    /// Distinct surface points in first-appearance order.
    ///
    /// Corners shared by neighbouring triangles come out of the extractor
    /// bit-identical; they are merged here and their normals averaged.
    pub fn unique_vertices(&self) -> Vec<Vertex> {
        let mut index: HashMap<[u32; 3], usize> = HashMap::with_capacity(self.vertex_count() / 4);
        let mut merged: Vec<(Vertex, Vec3)> = Vec::new();
        for v in self.vertices() {
            // Adding zero folds -0.0 into 0.0.
            let key = (v.position + Vec3::ZERO).to_array().map(f32::to_bits);
            match index.get(&key) {
                Some(&i) => merged[i].1 += v.normal,
                None => {
                    index.insert(key, merged.len());
                    merged.push((*v, v.normal));
                }
            }
        }
        merged
            .into_iter()
            .map(|(v, sum)| Vertex { position: v.position, normal: sum.try_normalize().unwrap_or(v.normal) })
            .collect()
    }

    /// Tight box around all vertices; empty for an empty mesh.
    pub fn bounds(&self) -> Aabb {
        let mut b = Aabb::empty();
        for v in self.vertices() {
            b.extend(v.position);
        }
        b
    }

    pub fn surface_area(&self) -> f32 {
        self.triangles.iter().map(Triangle::area).sum()
    }
}

/// Meshing parameters of a world config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Cubes per axis.
    pub resolution: u32,
    /// Half extent of the meshing cube in metres. Derived from the terrain when unset.
    pub half_extent: Option<f32>,
    /// Also extract the sea surface.
    pub include_water: bool,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            resolution: 64,
            half_extent: None,
            include_water: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32, z: f32, n: Vec3) -> Vertex {
        Vertex::new(Vec3::new(x, y, z), n)
    }

    #[test]
    fn orient_follows_vertex_normals() {
        let up = Vec3::Z;
        let mut t = Triangle::new(v(0.0, 0.0, 0.0, up), v(0.0, 1.0, 0.0, up), v(1.0, 0.0, 0.0, up));
        assert!(t.face_normal().z < 0.0);
        t.orient();
        assert!(t.face_normal().z > 0.0);
        assert!((t.area() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn mesh_summaries() {
        let up = Vec3::Z;
        let t = Triangle::new(v(0.0, 0.0, 0.0, up), v(2.0, 0.0, 0.0, up), v(0.0, 2.0, 1.0, up));
        let mesh = Mesh::new(vec![t, t]);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.bounds().max(), Vec3::new(2.0, 2.0, 1.0));
        assert!((mesh.surface_area() - 2.0 * t.area()).abs() < 1e-5);
        assert!(Mesh::default().bounds().is_empty());
    }

    #[test]
    fn shared_corners_merge_once() {
        let up = Vec3::Z;
        let tilted = Vec3::new(1.0, 0.0, 1.0).normalize();
        let a = Triangle::new(v(0.0, 0.0, 0.0, up), v(1.0, 0.0, 0.0, up), v(0.0, 1.0, 0.0, up));
        let b = Triangle::new(v(1.0, 0.0, 0.0, tilted), v(1.0, 1.0, 0.0, up), v(0.0, 1.0, 0.0, up));
        let c = Triangle::new(v(-0.0, 0.0, 0.0, up), v(2.0, 0.0, 0.0, up), v(0.0, 2.0, 0.0, up));
        let mesh = Mesh::new(vec![a, b, c]);
        assert_eq!(mesh.vertex_count(), 9);

        let unique = mesh.unique_vertices();
        let positions: Vec<Vec3> = unique.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            [
                Vec3::ZERO,
                Vec3::X,
                Vec3::Y,
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(0.0, 2.0, 0.0),
            ]
        );
        let shared = unique[1].normal;
        assert!((shared.length() - 1.0).abs() < 1e-5);
        assert!(shared.x > 0.0 && shared.z > shared.x);
        assert_eq!(unique[0].normal, up);
    }
}
