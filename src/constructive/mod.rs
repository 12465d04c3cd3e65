//! Constructive heuristics for building initial solutions.
//!
//! - [`nearest_neighbor`] — Round-robin nearest-neighbor with a
//!   cheapest-insertion fallback, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor;
