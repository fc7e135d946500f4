//! Seeded integer mixing used to derive lattice feature points.

use glam::IVec3;

const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer.
#[inline]
pub fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Hashes a lattice cell coordinate under a seed.
#[inline]
pub fn hash_cell(seed: u64, cell: IVec3) -> u64 {
    let mut h = mix64(seed ^ GOLDEN);
    h = mix64(h ^ (cell.x as i64 as u64).wrapping_mul(0x8CB9_2BA7_2F3D_8DD7));
    h = mix64(h ^ (cell.y as i64 as u64).wrapping_mul(0xD6E8_FEB8_6659_FD93));
    mix64(h ^ (cell.z as i64 as u64).wrapping_mul(0xA076_1D64_78BD_642F))
}

/// Advances a mixing state by one step and returns the new state.
#[inline]
pub fn next_state(state: u64) -> u64 {
    mix64(state.wrapping_add(GOLDEN))
}

/// Maps the top 24 bits of a hash to [0, 1).
#[inline]
pub fn unit_f32(h: u64) -> f32 {
    (h >> 40) as f32 / (1u64 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_hash_depends_on_every_axis() {
        let base = hash_cell(1, IVec3::new(3, 4, 5));
        assert_ne!(base, hash_cell(1, IVec3::new(4, 4, 5)));
        assert_ne!(base, hash_cell(1, IVec3::new(3, 5, 5)));
        assert_ne!(base, hash_cell(1, IVec3::new(3, 4, 6)));
        assert_ne!(base, hash_cell(2, IVec3::new(3, 4, 5)));
    }

    #[test]
    fn unit_f32_stays_below_one() {
        assert_eq!(unit_f32(0), 0.0);
        assert!(unit_f32(u64::MAX) < 1.0);
    }
}
