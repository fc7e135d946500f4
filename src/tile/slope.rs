//! Slope from elevation samples on a tangent-plane star.

use glam::Vec3;

use crate::geometry::tangent_basis;

/// The 8 star offsets around a point: 4 along the tangent axes and 4 diagonals,
/// each at distance `radius`.
pub fn star_offsets(normal: Vec3, radius: f32) -> [Vec3; 8] {
    let (t, b) = tangent_basis(normal);
    let d = std::f32::consts::FRAC_1_SQRT_2;
    [
        t,
        -t,
        b,
        -b,
        (t + b) * d,
        (t - b) * d,
        (-t + b) * d,
        (-t - b) * d,
    ]
    .map(|dir| dir * radius)
}

/// Slope angle (radians) from the elevation spread across the star.
pub fn slope_angle(samples: &[f32; 8], radius: f32) -> f32 {
    let (lo, hi) = samples
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| (lo.min(h), hi.max(h)));
    let spread = hi - lo;
    (spread / radius.max(f32::EPSILON)).atan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_lie_in_tangent_plane() {
        let n = Vec3::new(0.2, 0.9, -0.4).normalize();
        for o in star_offsets(n, 3.0) {
            assert!(o.dot(n).abs() < 1e-5);
            assert!((o.length() - 3.0).abs() < 1e-5);
        }
    }

    #[test]
    fn flat_is_zero_and_ramp_matches_atan() {
        assert_eq!(slope_angle(&[2.0; 8], 1.0), 0.0);
        let mut s = [0.0; 8];
        s[0] = 1.0;
        s[1] = -1.0;
        assert!((slope_angle(&s, 2.0) - 1.0f32.atan()).abs() < 1e-6);
    }
}
