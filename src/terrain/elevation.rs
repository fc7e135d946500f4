//! Named elevation profiles carved into the base shape.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use super::ShapeError;
use crate::noise::{NoiseRegistry, NoiseRole};
use crate::voronoi::VoronoiLattice;

/// Relief applied on top of a [`super::Shape`], selected by name at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElevationProfile {
    /// No relief; the whole surface sits at sea level.
    Flat,
    /// Rolling hills, mostly above sea level.
    Hills,
    /// Ridged ranges with foothills.
    Mountains,
    /// Large landmasses and ocean basins.
    Continents,
    /// Mostly ocean with scattered islands.
    Archipelago,
    /// Impact bowls with raised rims over gentle hills.
    Craters,
}

impl ElevationProfile {
    /// Number of profiles in the library.
    pub const COUNT: usize = 6;

    /// Every profile in library order.
    pub const fn all() -> [ElevationProfile; Self::COUNT] {
        [
            ElevationProfile::Flat,
            ElevationProfile::Hills,
            ElevationProfile::Mountains,
            ElevationProfile::Continents,
            ElevationProfile::Archipelago,
            ElevationProfile::Craters,
        ]
    }

    /// Library name used in configs and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            ElevationProfile::Flat => "flat",
            ElevationProfile::Hills => "hills",
            ElevationProfile::Mountains => "mountains",
            ElevationProfile::Continents => "continents",
            ElevationProfile::Archipelago => "archipelago",
            ElevationProfile::Craters => "craters",
        }
    }

    /// Looks a profile up by library name.
    pub fn from_name(name: &str) -> Result<ElevationProfile, ShapeError> {
        let key = name.trim().to_ascii_lowercase();
        ElevationProfile::all()
            .into_iter()
            .find(|e| e.name() == key)
            .ok_or_else(|| ShapeError::UnknownElevation(name.to_string()))
    }

    /// Elevation in metres above (positive) or below (negative) sea level.
    ///
    /// `amplitude` is the characteristic relief height in metres.
    pub fn height(self, p: Vec3, amplitude: f32, noise: &NoiseRegistry, craters: &VoronoiLattice) -> f32 {
        let a = amplitude;
        match self {
            ElevationProfile::Flat => 0.0,
            ElevationProfile::Hills => {
                let hills = noise.sample(NoiseRole::Hills, p);
                a * (0.6 * hills + 0.15)
            }
            ElevationProfile::Mountains => {
                let ridges = noise.sample(NoiseRole::Ridges, p);
                let hills = noise.sample(NoiseRole::Hills, p);
                a * (1.2 * ridges + 0.3 * hills - 0.25)
            }
            ElevationProfile::Continents => {
                // Fractal detail over a low-frequency continent bias.
                let hills = noise.sample(NoiseRole::Hills, p);
                let continents = noise.sample(NoiseRole::Continents, p);
                a * (0.45 * hills + 0.9 * continents)
            }
            ElevationProfile::Archipelago => {
                let hills = noise.sample(NoiseRole::Hills, p);
                let continents = noise.sample(NoiseRole::Continents, p);
                a * (0.5 * hills + 0.8 * continents - 0.45)
            }
            ElevationProfile::Craters => {
                let hills = noise.sample(NoiseRole::Hills, p);
                let f1 = craters.nearest(p, Vec3::ZERO)[0].distance;
                let rim_radius = 0.45 * craters.cell_size();
                let t = f1 / rim_radius;
                let bowl = if t < 1.0 { -0.5 * a * (1.0 - t * t) } else { 0.0 };
                let rim = 0.15 * a * (-((t - 1.0) / 0.15).powi(2)).exp();
                a * (0.2 * hills + 0.05) + bowl + rim
            }
        }
    }
}

impl fmt::Display for ElevationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElevationProfile {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElevationProfile::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for profile in ElevationProfile::all() {
            assert_eq!(ElevationProfile::from_name(profile.name()).ok(), Some(profile));
        }
        assert!(matches!(
            ElevationProfile::from_name("plateaus"),
            Err(ShapeError::UnknownElevation(_))
        ));
    }

    #[test]
    fn flat_is_sea_level() {
        let noise = NoiseRegistry::new(1);
        let lattice = VoronoiLattice::new(1, 80.0, 1);
        assert_eq!(ElevationProfile::Flat.height(Vec3::new(1.0, 2.0, 3.0), 30.0, &noise, &lattice), 0.0);
    }

    #[test]
    fn relief_is_bounded_by_amplitude() {
        let noise = NoiseRegistry::new(5);
        let lattice = VoronoiLattice::new(5, 80.0, 1);
        let a = 30.0;
        for profile in ElevationProfile::all() {
            for i in 0..40 {
                let p = Vec3::new(i as f32 * 13.0, 500.0 - i as f32 * 7.0, i as f32 * -3.5);
                let h = profile.height(p, a, &noise, &lattice);
                assert!(h.is_finite());
                assert!(h.abs() <= 2.0 * a, "{} height {} exceeds bound", profile, h);
            }
        }
    }
}
