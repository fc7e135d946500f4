//! Named base shapes for planets.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use super::sdf;
use super::ShapeError;
use crate::noise::{NoiseRegistry, NoiseRole};

/// Base form of a planet, selected by name at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Sphere,
    Ellipsoid,
    Oblate,
    Prolate,
    Cube,
    RoundedCube,
    Octahedron,
    Torus,
    ThickTorus,
    Capsule,
    Cylinder,
    Cone,
    HexPrism,
    TriPrism,
    Pyramid,
    Link,
    Dumbbell,
    Peanut,
    TrefoilBlob,
    BoxFrame,
    Tetrahedron,
    Dodecahedron,
    Icosahedron,
    Lens,
    Egg,
    Cross,
    Star,
    Gear,
    TwistedTorus,
    Asteroid,
}

const PHI: f32 = 1.618_034;

impl Shape {
    /// Number of shapes in the library.
    pub const COUNT: usize = 30;

    /// Every shape in library order.
    pub const fn all() -> [Shape; Self::COUNT] {
        [
            Shape::Sphere,
            Shape::Ellipsoid,
            Shape::Oblate,
            Shape::Prolate,
            Shape::Cube,
            Shape::RoundedCube,
            Shape::Octahedron,
            Shape::Torus,
            Shape::ThickTorus,
            Shape::Capsule,
            Shape::Cylinder,
            Shape::Cone,
            Shape::HexPrism,
            Shape::TriPrism,
            Shape::Pyramid,
            Shape::Link,
            Shape::Dumbbell,
            Shape::Peanut,
            Shape::TrefoilBlob,
            Shape::BoxFrame,
            Shape::Tetrahedron,
            Shape::Dodecahedron,
            Shape::Icosahedron,
            Shape::Lens,
            Shape::Egg,
            Shape::Cross,
            Shape::Star,
            Shape::Gear,
            Shape::TwistedTorus,
            Shape::Asteroid,
        ]
    }

    /// Library name used in configs and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Shape::Sphere => "sphere",
            Shape::Ellipsoid => "ellipsoid",
            Shape::Oblate => "oblate",
            Shape::Prolate => "prolate",
            Shape::Cube => "cube",
            Shape::RoundedCube => "rounded_cube",
            Shape::Octahedron => "octahedron",
            Shape::Torus => "torus",
            Shape::ThickTorus => "thick_torus",
            Shape::Capsule => "capsule",
            Shape::Cylinder => "cylinder",
            Shape::Cone => "cone",
            Shape::HexPrism => "hex_prism",
            Shape::TriPrism => "tri_prism",
            Shape::Pyramid => "pyramid",
            Shape::Link => "link",
            Shape::Dumbbell => "dumbbell",
            Shape::Peanut => "peanut",
            Shape::TrefoilBlob => "trefoil_blob",
            Shape::BoxFrame => "box_frame",
            Shape::Tetrahedron => "tetrahedron",
            Shape::Dodecahedron => "dodecahedron",
            Shape::Icosahedron => "icosahedron",
            Shape::Lens => "lens",
            Shape::Egg => "egg",
            Shape::Cross => "cross",
            Shape::Star => "star",
            Shape::Gear => "gear",
            Shape::TwistedTorus => "twisted_torus",
            Shape::Asteroid => "asteroid",
        }
    }

    /// Looks a shape up by library name.
    pub fn from_name(name: &str) -> Result<Shape, ShapeError> {
        let key = name.trim().to_ascii_lowercase().replace('-', "_");
        Shape::all()
            .into_iter()
            .find(|s| s.name() == key)
            .ok_or_else(|| ShapeError::UnknownShape(name.to_string()))
    }

    /// True if evaluating the shape reads the noise registry.
    pub const fn uses_noise(self) -> bool {
        matches!(self, Shape::Asteroid)
    }

    /// Signed distance to the shape scaled to `radius`; negative inside.
    pub fn distance(self, p: Vec3, radius: f32, noise: &NoiseRegistry) -> f32 {
        let r = radius;
        match self {
            Shape::Sphere => sdf::sphere(p, r),
            Shape::Ellipsoid => sdf::ellipsoid(p, Vec3::new(r, 0.8 * r, 0.65 * r)),
            Shape::Oblate => sdf::ellipsoid(p, Vec3::new(r, 0.7 * r, r)),
            Shape::Prolate => sdf::ellipsoid(p, Vec3::new(0.75 * r, 1.3 * r, 0.75 * r)),
            Shape::Cube => sdf::cuboid(p, Vec3::splat(0.8 * r)),
            Shape::RoundedCube => sdf::cuboid(p, Vec3::splat(0.65 * r)) - 0.2 * r,
            Shape::Octahedron => sdf::octahedron(p, 1.2 * r),
            Shape::Torus => sdf::torus(p, 0.75 * r, 0.3 * r),
            Shape::ThickTorus => sdf::torus(p, 0.6 * r, 0.45 * r),
            Shape::Capsule => {
                sdf::capsule(p, Vec3::new(0.0, -0.5 * r, 0.0), Vec3::new(0.0, 0.5 * r, 0.0), 0.55 * r)
            }
            Shape::Cylinder => sdf::capped_cylinder(p, 0.7 * r, 0.7 * r),
            Shape::Cone => sdf::capped_cone(p, 0.75 * r, 0.9 * r, 0.25 * r),
            Shape::HexPrism => sdf::hex_prism(p, 0.8 * r, 0.6 * r),
            Shape::TriPrism => sdf::tri_prism(p, r, 0.6 * r),
            Shape::Pyramid => sdf::pyramid(p, 0.9 * r, 1.3 * r),
            Shape::Link => sdf::link(p, 0.4 * r, 0.45 * r, 0.2 * r),
            Shape::Dumbbell => {
                let a = sdf::sphere(p - Vec3::new(0.0, 0.55 * r, 0.0), 0.5 * r);
                let b = sdf::sphere(p + Vec3::new(0.0, 0.55 * r, 0.0), 0.5 * r);
                let bar = sdf::capsule(p, Vec3::new(0.0, -0.5 * r, 0.0), Vec3::new(0.0, 0.5 * r, 0.0), 0.2 * r);
                sdf::smooth_union(sdf::smooth_union(a, b, 0.1 * r), bar, 0.15 * r)
            }
            Shape::Peanut => {
                let a = sdf::sphere(p - Vec3::new(0.4 * r, 0.0, 0.0), 0.65 * r);
                let b = sdf::sphere(p + Vec3::new(0.4 * r, 0.0, 0.0), 0.65 * r);
                sdf::smooth_union(a, b, 0.3 * r)
            }
            Shape::TrefoilBlob => {
                let lobe = |k: u32| {
                    let angle = k as f32 * std::f32::consts::TAU / 3.0;
                    let c = Vec3::new(angle.cos(), 0.0, angle.sin()) * 0.45 * r;
                    sdf::sphere(p - c, 0.55 * r)
                };
                let d = sdf::smooth_union(lobe(0), lobe(1), 0.25 * r);
                sdf::smooth_union(d, lobe(2), 0.25 * r)
            }
            Shape::BoxFrame => sdf::box_frame(p, Vec3::splat(0.8 * r), 0.15 * r),
            Shape::Tetrahedron => sdf::tetrahedron(p, 0.6 * r),
            Shape::Dodecahedron => {
                let n = [
                    Vec3::new(0.0, 1.0, PHI).normalize(),
                    Vec3::new(0.0, -1.0, PHI).normalize(),
                    Vec3::new(1.0, PHI, 0.0).normalize(),
                    Vec3::new(-1.0, PHI, 0.0).normalize(),
                    Vec3::new(PHI, 0.0, 1.0).normalize(),
                    Vec3::new(-PHI, 0.0, 1.0).normalize(),
                ];
                sdf::polyhedron(p, &n, 0.85 * r)
            }
            Shape::Icosahedron => {
                let k = 0.577_350_26;
                let ip = 1.0 / PHI;
                let n = [
                    Vec3::new(k, k, k),
                    Vec3::new(-k, k, k),
                    Vec3::new(k, -k, k),
                    Vec3::new(k, k, -k),
                    Vec3::new(0.0, ip, PHI).normalize(),
                    Vec3::new(0.0, -ip, PHI).normalize(),
                    Vec3::new(ip, PHI, 0.0).normalize(),
                    Vec3::new(-ip, PHI, 0.0).normalize(),
                    Vec3::new(PHI, 0.0, ip).normalize(),
                    Vec3::new(-PHI, 0.0, ip).normalize(),
                ];
                sdf::polyhedron(p, &n, 0.85 * r)
            }
            Shape::Lens => {
                let a = sdf::sphere(p - Vec3::new(0.0, 0.6 * r, 0.0), 1.2 * r);
                let b = sdf::sphere(p + Vec3::new(0.0, 0.6 * r, 0.0), 1.2 * r);
                a.max(b)
            }
            Shape::Egg => {
                let len = p.length();
                let up = if len > 0.0 { p.y / len } else { 0.0 };
                (len - r * (1.0 - 0.18 * up)) * 0.85
            }
            Shape::Cross => {
                let arm_x = sdf::cuboid(p, Vec3::new(r, 0.35 * r, 0.35 * r));
                let arm_y = sdf::cuboid(p, Vec3::new(0.35 * r, r, 0.35 * r));
                let arm_z = sdf::cuboid(p, Vec3::new(0.35 * r, 0.35 * r, r));
                arm_x.min(arm_y).min(arm_z)
            }
            Shape::Star => {
                let len = p.length();
                if len <= f32::EPSILON {
                    return -0.8 * r;
                }
                let d = (p / len).abs();
                let spike = d.x.powi(8).max(d.y.powi(8)).max(d.z.powi(8));
                (len - r * (0.75 + 0.35 * spike)) * 0.6
            }
            Shape::Gear => {
                let angle = p.z.atan2(p.x);
                let teeth = 0.8 * r + 0.1 * r * ((angle * 12.0).cos() * 3.0).clamp(-1.0, 1.0);
                let radial = glam::Vec2::new(p.x, p.z).length() - teeth;
                let d = glam::Vec2::new(radial * 0.7, p.y.abs() - 0.35 * r);
                d.x.max(d.y).min(0.0) + d.max(glam::Vec2::ZERO).length()
            }
            Shape::TwistedTorus => sdf::twisted_torus(p, 0.7 * r, 0.22 * r) * 0.8,
            Shape::Asteroid => {
                let bumps = noise.sample(NoiseRole::ShapeDetail, p);
                (sdf::sphere(p, r) - 0.25 * r * bumps) * 0.7
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for shape in Shape::all() {
            assert_eq!(Shape::from_name(shape.name()).ok(), Some(shape));
        }
        assert_eq!(Shape::from_name("Rounded-Cube").ok(), Some(Shape::RoundedCube));
    }

    #[test]
    fn unknown_name_fails() {
        assert!(matches!(Shape::from_name("banana"), Err(ShapeError::UnknownShape(n)) if n == "banana"));
    }

    #[test]
    fn every_shape_has_solid_core_and_empty_far_field() {
        let noise = NoiseRegistry::new(3);
        let r = 100.0;
        for shape in Shape::all() {
            let far = shape.distance(Vec3::new(3.0 * r, 2.9 * r, -3.1 * r), r, &noise);
            assert!(far > 0.0, "{} far field should be outside, got {}", shape, far);
            for probe in [Vec3::ZERO, Vec3::X * 0.75 * r] {
                let d = shape.distance(probe, r, &noise);
                assert!(d.is_finite(), "{} produced non-finite {}", shape, d);
            }
        }
    }

    #[test]
    fn convex_shapes_contain_origin() {
        let noise = NoiseRegistry::new(3);
        for shape in Shape::all() {
            if matches!(shape, Shape::Torus | Shape::ThickTorus | Shape::Link | Shape::BoxFrame | Shape::TwistedTorus | Shape::TrefoilBlob) {
                continue;
            }
            assert!(shape.distance(Vec3::ZERO, 50.0, &noise) < 0.0, "{} should contain the origin", shape);
        }
    }
}
