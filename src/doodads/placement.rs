//! Weighted probabilistic doodad placement.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::{DoodadCatalog, DoodadPrototype};
use crate::biomes::TerrainType;
use crate::tile::Tile;

/// Candidates whose weighted probability falls below this are dropped.
pub const MIN_PROBABILITY: f32 = 1e-3;
/// Probabilities closer than this count as tied.
pub const TIE_EPSILON: f32 = 1e-5;

/// Placement settings of a world config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub enabled: bool,
    /// Only every n-th mesh vertex is offered a doodad.
    pub vertex_stride: usize,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self { enabled: true, vertex_stride: 3 }
    }
}

/// Mutable state threaded through one sequential placement run.
#[derive(Debug, Clone)]
pub struct PlacementContext {
    rng: ChaCha8Rng,
    counts: Vec<u64>,
}

impl PlacementContext {
    pub fn new(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), counts: Vec::new() }
    }

    /// Instances of prototype `index` placed so far.
    pub fn instance_count(&self, index: usize) -> u64 {
        self.counts.get(index).copied().unwrap_or(0)
    }

    pub fn total_placed(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Per-prototype counts paired with names, in catalog order.
    pub fn counts_by_name<'c>(&self, catalog: &'c DoodadCatalog) -> Vec<(&'c str, u64)> {
        catalog
            .prototypes
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name.as_str(), self.instance_count(i)))
            .collect()
    }

    fn record(&mut self, index: usize) {
        if self.counts.len() <= index {
            self.counts.resize(index + 1, 0);
        }
        self.counts[index] += 1;
    }

    fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// A placed doodad.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub prototype: String,
    pub position: Vec3,
    pub normal: Vec3,
}

/// A prototype that survived filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Index into the catalog.
    pub index: usize,
    /// Base probability times all membership factors.
    pub raw: f32,
    /// Probability actually rolled against.
    pub adjusted: f32,
}

fn flags_match(prototype: &DoodadPrototype, tile: &Tile) -> bool {
    prototype.ocean_only == tile.is_water() && prototype.slope_only == (tile.terrain_type == TerrainType::SteepSlope)
}

fn hard_ranges_match(prototype: &DoodadPrototype, tile: &Tile) -> bool {
    prototype.elevation.map_or(true, |r| r.contains(tile.elevation))
        && prototype.slope.map_or(true, |r| r.contains(tile.slope))
}

/// Weighted probability of `prototype` on `tile`, or `None` if it is filtered out.
pub fn weighted_probability(prototype: &DoodadPrototype, tile: &Tile) -> Option<f32> {
    if !flags_match(prototype, tile) || !hard_ranges_match(prototype, tile) {
        return None;
    }
    let factors = [
        (prototype.temperature, tile.temperature),
        (prototype.precipitation, tile.precipitation),
        (prototype.nationality, tile.nationality),
        (prototype.fertility, tile.fertility),
    ];
    let product = factors
        .iter()
        .filter_map(|(range, value)| range.map(|r| r.membership(*value)))
        .fold(prototype.probability, |acc, f| acc * f);
    (product >= MIN_PROBABILITY).then_some(product)
}

/// Filters the catalog down to candidates for `tile`, in catalog order.
pub fn candidates(tile: &Tile, catalog: &DoodadCatalog) -> Vec<Candidate> {
    catalog
        .prototypes
        .iter()
        .enumerate()
        .filter_map(|(index, p)| weighted_probability(p, tile).map(|raw| Candidate { index, raw, adjusted: raw }))
        .collect()
}

/// Sorts by raw probability, highest first. Runs of near-tied candidates are
/// ordered by fewest instances placed so far.
pub fn rank_candidates(candidates: &mut [Candidate], context: &PlacementContext) {
    candidates.sort_by(|a, b| b.raw.total_cmp(&a.raw).then(a.index.cmp(&b.index)));
    let mut start = 0;
    while start < candidates.len() {
        let leader = candidates[start].raw;
        let end = candidates[start..]
            .iter()
            .position(|c| (leader - c.raw).abs() >= TIE_EPSILON)
            .map_or(candidates.len(), |offset| start + offset);
        candidates[start..end].sort_by_key(|c| context.instance_count(c.index));
        start = end;
    }
}

/// The top candidate keeps its raw probability; the others are scaled by `top / Σ raw`.
pub fn normalize_candidates(candidates: &mut [Candidate]) {
    let Some(top) = candidates.first().map(|c| c.raw) else {
        return;
    };
    let sum: f32 = candidates.iter().map(|c| c.raw).sum();
    let scale = if sum > 0.0 { top / sum } else { 0.0 };
    for (i, c) in candidates.iter_mut().enumerate() {
        c.adjusted = if i == 0 { c.raw } else { c.raw * scale };
    }
}

/// Picks at most one doodad for `tile` and records it in `context`.
pub fn place_doodad<'c>(
    tile: &Tile,
    catalog: &'c DoodadCatalog,
    context: &mut PlacementContext,
) -> Option<&'c DoodadPrototype> {
    let mut ranked = candidates(tile, catalog);
    if ranked.is_empty() {
        return None;
    }
    rank_candidates(&mut ranked, context);
    normalize_candidates(&mut ranked);

    for c in &ranked {
        if context.roll() < c.adjusted {
            context.record(c.index);
            return catalog.get(c.index);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biomes::BiomeId;
    use crate::terrain::Purpose;

    fn land_tile() -> Tile {
        let mut t = Tile::new(Vec3::new(0.0, 0.0, 500.0), Vec3::Z, Purpose::Land);
        t.elevation = 5.0;
        t.slope = 0.1;
        t.temperature = 15.0;
        t.precipitation = 120.0;
        t.biome = BiomeId::TemperateDeciduousForest;
        t.terrain_type = TerrainType::Flat;
        t.fertility = 0.6;
        t.nationality = 0.5;
        t
    }

    fn candidate(index: usize, raw: f32) -> Candidate {
        Candidate { index, raw, adjusted: raw }
    }

    #[test]
    fn flags_filter_water_and_slopes() {
        let tile = land_tile();
        assert!(weighted_probability(&DoodadPrototype::new("kelp", 0.5).ocean_only(), &tile).is_none());
        assert!(weighted_probability(&DoodadPrototype::new("rock", 0.5).slope_only(), &tile).is_none());
        assert!(weighted_probability(&DoodadPrototype::new("bush", 0.5), &tile).is_some());

        let mut water = tile;
        water.elevation = -3.0;
        water.terrain_type = TerrainType::ShallowWater;
        assert!(weighted_probability(&DoodadPrototype::new("kelp", 0.5).ocean_only(), &water).is_some());
        assert!(weighted_probability(&DoodadPrototype::new("bush", 0.5), &water).is_none());
    }

    #[test]
    fn hard_ranges_and_threshold() {
        let tile = land_tile();
        assert!(weighted_probability(&DoodadPrototype::new("a", 0.5).elevation(10.0, 20.0), &tile).is_none());
        // Midpoint factor is 1; off-center the product drops under the threshold.
        let weak = DoodadPrototype::new("b", 0.0018).temperature(10.0, 20.0);
        assert!((weighted_probability(&weak, &tile).unwrap() - 0.0018).abs() < 1e-7);
        let weaker = DoodadPrototype::new("c", 0.0018).temperature(14.0, 20.0);
        assert!(weighted_probability(&weaker, &tile).is_none());
    }

    #[test]
    fn membership_factors_multiply() {
        let tile = land_tile();
        let p = DoodadPrototype::new("d", 0.8).temperature(5.0, 25.0).fertility(0.4, 1.2);
        // temperature factor 1.0, fertility factor 1 - 0.2/0.4 = 0.5
        assert!((weighted_probability(&p, &tile).unwrap() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn near_ties_prefer_fewer_instances() {
        let mut ctx = PlacementContext::new(1);
        ctx.record(0);
        ctx.record(0);
        ctx.record(2);
        let mut c = vec![candidate(0, 0.5), candidate(1, 0.2), candidate(2, 0.5 - 5e-6), candidate(3, 0.5)];
        rank_candidates(&mut c, &ctx);
        let order: Vec<_> = c.iter().map(|c| c.index).collect();
        assert_eq!(order, [3, 2, 0, 1]);
    }

    #[test]
    fn normalization_keeps_top_and_shrinks_rest() {
        let mut c = vec![candidate(0, 0.6), candidate(1, 0.3), candidate(2, 0.1)];
        normalize_candidates(&mut c);
        assert_eq!(c[0].adjusted, c[0].raw);
        for x in &c[1..] {
            assert!(x.adjusted <= x.raw);
        }
        assert!((c[1].adjusted - 0.3 * 0.6).abs() < 1e-6);
    }

    #[test]
    fn placement_is_reproducible_and_counted() {
        let catalog = DoodadCatalog::earth_like();
        let tile = land_tile();
        let run = |seed| {
            let mut ctx = PlacementContext::new(seed);
            let picks: Vec<Option<String>> =
                (0..200).map(|_| place_doodad(&tile, &catalog, &mut ctx).map(|p| p.name.clone())).collect();
            (picks, ctx)
        };
        let (a, ctx) = run(42);
        let (b, _) = run(42);
        assert_eq!(a, b);
        let hits = a.iter().filter(|p| p.is_some()).count() as u64;
        assert!(hits > 0);
        assert_eq!(ctx.total_placed(), hits);
    }

    #[test]
    fn no_candidates_means_no_placement() {
        let mut ctx = PlacementContext::new(0);
        let catalog = DoodadCatalog::new(vec![DoodadPrototype::new("only_hot", 1.0).temperature(40.0, 60.0)]);
        assert!(place_doodad(&land_tile(), &catalog, &mut ctx).is_none());
        assert_eq!(ctx.total_placed(), 0);
    }
}
