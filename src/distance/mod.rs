//! Distance matrices.
//!
//! Provides a dense integer cost matrix for routing problems.

mod matrix;

pub use matrix::{DistanceMatrix, DISTANCE_SCALE};
