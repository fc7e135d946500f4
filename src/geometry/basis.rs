//! Tangent frames and polar angles on arbitrary surfaces.

use glam::Vec3;

/// Axis the planet spins around; latitude is measured against it.
pub const POLAR_AXIS: Vec3 = Vec3::Y;

/// Returns `(tangent, bitangent)` unit vectors spanning the plane orthogonal to
/// `normal`.
///
/// The tangent is the projection of the polar axis when that is well defined
/// and falls back to the world axis least aligned with the normal otherwise, so
/// the frame is a fixed function of the normal.
pub fn tangent_basis(normal: Vec3) -> (Vec3, Vec3) {
    let n = normal.normalize_or_zero();
    if n == Vec3::ZERO {
        return (Vec3::X, Vec3::Z);
    }

    let mut tangent = POLAR_AXIS - n * POLAR_AXIS.dot(n);
    let len = tangent.length();
    if len < 1e-4 {
        let a = if n.x.abs() < 0.9 { Vec3::X } else { Vec3::Z };
        tangent = (a - n * a.dot(n)).normalize_or_zero();
    } else {
        tangent /= len;
    }
    let bitangent = n.cross(tangent).normalize_or_zero();
    (tangent, bitangent)
}

/// Latitude of a direction in radians, in [-π/2, π/2].
pub fn latitude(direction: Vec3) -> f32 {
    let d = direction.normalize_or_zero();
    d.dot(POLAR_AXIS).clamp(-1.0, 1.0).asin()
}

/// Normalized polar proximity: 0 at the equator, 1 at either pole.
pub fn polar_factor(direction: Vec3) -> f32 {
    (latitude(direction).abs() / std::f32::consts::FRAC_PI_2).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_is_orthonormal() {
        let normals = [
            Vec3::X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::new(0.3, 0.9, -0.2),
            Vec3::new(-1.0, 0.001, 0.0),
        ];
        for n in normals {
            let n = n.normalize();
            let (t, b) = tangent_basis(n);
            assert!((t.length() - 1.0).abs() < 1e-5);
            assert!((b.length() - 1.0).abs() < 1e-5);
            assert!(t.dot(n).abs() < 1e-5);
            assert!(b.dot(n).abs() < 1e-5);
            assert!(t.dot(b).abs() < 1e-5);
        }
    }

    #[test]
    fn poles_and_equator() {
        assert!((polar_factor(Vec3::Y) - 1.0).abs() < 1e-6);
        assert!((polar_factor(Vec3::NEG_Y) - 1.0).abs() < 1e-6);
        assert!(polar_factor(Vec3::X).abs() < 1e-6);
        assert!(latitude(Vec3::new(1.0, 1.0, 0.0)) > 0.7);
    }
}
