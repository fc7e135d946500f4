//! Signed distance primitives and combinators.
//!
//! All functions return negative values inside the solid. Some are bounds
//! rather than exact distances; they stay Lipschitz-1 so marching and slope
//! estimation behave.

use glam::{Vec2, Vec3};

pub fn sphere(p: Vec3, r: f32) -> f32 {
    p.length() - r
}

pub fn ellipsoid(p: Vec3, r: Vec3) -> f32 {
    let k0 = (p / r).length();
    let k1 = (p / (r * r)).length();
    if k1 <= f32::EPSILON {
        return -r.min_element();
    }
    k0 * (k0 - 1.0) / k1
}

pub fn cuboid(p: Vec3, b: Vec3) -> f32 {
    let q = p.abs() - b;
    q.max(Vec3::ZERO).length() + q.max_element().min(0.0)
}

pub fn box_frame(p: Vec3, b: Vec3, e: f32) -> f32 {
    let p = p.abs() - b;
    let q = (p + Vec3::splat(e)).abs() - Vec3::splat(e);
    let a = Vec3::new(p.x, q.y, q.z);
    let b2 = Vec3::new(q.x, p.y, q.z);
    let c = Vec3::new(q.x, q.y, p.z);
    let edge = |v: Vec3| v.max(Vec3::ZERO).length() + v.max_element().min(0.0);
    edge(a).min(edge(b2)).min(edge(c))
}

pub fn octahedron(p: Vec3, s: f32) -> f32 {
    let p = p.abs();
    (p.x + p.y + p.z - s) * 0.577_350_26
}

pub fn torus(p: Vec3, major: f32, minor: f32) -> f32 {
    let q = Vec2::new(Vec2::new(p.x, p.z).length() - major, p.y);
    q.length() - minor
}

/// Torus whose square cross-section rotates once and a half around the ring.
pub fn twisted_torus(p: Vec3, major: f32, half: f32) -> f32 {
    let ring = p.z.atan2(p.x);
    let q = Vec2::new(Vec2::new(p.x, p.z).length() - major, p.y);
    let (s, c) = (ring * 1.5).sin_cos();
    let r = Vec2::new(c * q.x - s * q.y, s * q.x + c * q.y);
    let d = r.abs() - Vec2::splat(half);
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

pub fn capsule(p: Vec3, a: Vec3, b: Vec3, r: f32) -> f32 {
    let pa = p - a;
    let ba = b - a;
    let h = (pa.dot(ba) / ba.length_squared()).clamp(0.0, 1.0);
    (pa - ba * h).length() - r
}

pub fn capped_cylinder(p: Vec3, r: f32, h: f32) -> f32 {
    let d = Vec2::new(Vec2::new(p.x, p.z).length() - r, p.y.abs() - h);
    d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length()
}

pub fn capped_cone(p: Vec3, h: f32, r1: f32, r2: f32) -> f32 {
    let q = Vec2::new(Vec2::new(p.x, p.z).length(), p.y);
    let k1 = Vec2::new(r2, h);
    let k2 = Vec2::new(r2 - r1, 2.0 * h);
    let cap = if q.y < 0.0 { r1 } else { r2 };
    let ca = Vec2::new(q.x - q.x.min(cap), q.y.abs() - h);
    let cb = q - k1 + k2 * ((k1 - q).dot(k2) / k2.length_squared()).clamp(0.0, 1.0);
    let s = if cb.x < 0.0 && ca.y < 0.0 { -1.0 } else { 1.0 };
    s * ca.length_squared().min(cb.length_squared()).sqrt()
}

pub fn hex_prism(p: Vec3, radius: f32, half_height: f32) -> f32 {
    const K: Vec3 = Vec3::new(-0.866_025_4, 0.5, 0.577_350_26);
    let mut p = p.abs();
    let kxy = Vec2::new(K.x, K.y);
    let fold = 2.0 * kxy.dot(Vec2::new(p.x, p.y)).min(0.0);
    p.x -= fold * K.x;
    p.y -= fold * K.y;
    let edge = Vec2::new(p.x - p.x.clamp(-K.z * radius, K.z * radius), p.y - radius);
    let d = Vec2::new(edge.length() * (p.y - radius).signum(), p.z - half_height);
    d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length()
}

pub fn tri_prism(p: Vec3, radius: f32, half_depth: f32) -> f32 {
    let q = p.abs();
    (q.z - half_depth).max((q.x * 0.866_025_4 + p.y * 0.5).max(-p.y) - radius * 0.5)
}

/// Square pyramid with its centroid near the origin.
pub fn pyramid(p: Vec3, half_base: f32, height: f32) -> f32 {
    let y = p.y + height / 3.0;
    let norm = (height * height + half_base * half_base).sqrt();
    let side_x = (height * p.x.abs() + half_base * y - height * half_base) / norm;
    let side_z = (height * p.z.abs() + half_base * y - height * half_base) / norm;
    side_x.max(side_z).max(-y)
}

pub fn link(p: Vec3, length: f32, r1: f32, r2: f32) -> f32 {
    let q = Vec3::new(p.x, (p.y.abs() - length).max(0.0), p.z);
    Vec2::new(Vec2::new(q.x, q.y).length() - r1, q.z).length() - r2
}

/// Convex polyhedron bound: `max |n·p| - s` over face normals.
pub fn polyhedron(p: Vec3, normals: &[Vec3], s: f32) -> f32 {
    normals.iter().fold(f32::MIN, |d, n| d.max(p.dot(*n).abs())) - s
}

/// Tetrahedron bound from its four face planes.
pub fn tetrahedron(p: Vec3, s: f32) -> f32 {
    let k = 0.577_350_26;
    let planes = [
        Vec3::new(k, k, k),
        Vec3::new(-k, -k, k),
        Vec3::new(k, -k, -k),
        Vec3::new(-k, k, -k),
    ];
    planes.iter().fold(f32::MIN, |d, n| d.max(p.dot(*n))) - s
}

/// Polynomial smooth minimum.
pub fn smooth_union(a: f32, b: f32, k: f32) -> f32 {
    if k <= 0.0 {
        return a.min(b);
    }
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    b + (a - b) * h - k * h * (1.0 - h)
}
