//! Decorative object placement.
//!
//! Each classified tile is offered to the catalog once. Matching prototypes
//! are weighted by how well the tile fits their requirements, ranked, and
//! rolled against in order; at most one is placed per tile. Instance counts
//! live in the [`PlacementContext`], so a run must be strictly sequential.

mod placement;
mod prototype;

pub use placement::{
    candidates, normalize_candidates, place_doodad, rank_candidates, weighted_probability, Candidate, Placement,
    PlacementConfig, PlacementContext, MIN_PROBABILITY, TIE_EPSILON,
};
pub use prototype::{DoodadCatalog, DoodadPrototype, Range};
