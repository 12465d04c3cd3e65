//! Error types returned at the optimizer boundary.

use thiserror::Error;

use crate::models::Violation;

/// A malformed problem definition or search configuration.
///
/// Always detected before any search work begins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("fleet has no vehicles")]
    EmptyFleet,

    #[error("{locations} locations cannot host {vehicles} distinct depots")]
    FewerLocationsThanVehicles { locations: usize, vehicles: usize },

    #[error("vehicle {vehicle} has depot {depot}, but there are only {locations} locations")]
    DepotOutOfRange {
        vehicle: usize,
        depot: usize,
        locations: usize,
    },

    #[error("depot {depot} is shared by vehicles {first} and {second}")]
    DuplicateDepot {
        depot: usize,
        first: usize,
        second: usize,
    },

    #[error("vehicle {vehicle} has zero capacity while stops remain to be served")]
    ZeroCapacity { vehicle: usize },

    #[error("route distance ceiling must be non-negative, got {0}")]
    NegativeDistanceCeiling(i64),

    #[error("{depots} depots given for {capacities} capacities")]
    MismatchedFleet { depots: usize, capacities: usize },

    #[error("matrix row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("negative distance {distance} from {from} to {to}")]
    NegativeDistance { from: usize, to: usize, distance: i64 },

    #[error("distance from {from} to {to} differs from the reverse direction")]
    AsymmetricDistance { from: usize, to: usize },

    #[error("distance from node {node} to itself is not zero")]
    NonZeroDiagonal { node: usize },

    #[error("scaled distance from {from} to {to} does not fit in an i64")]
    DistanceOutOfRange { from: usize, to: usize },

    #[error("largest distance {max_distance} over {locations} locations can overflow route costs")]
    DistanceOverflow { max_distance: i64, locations: usize },

    #[error("distance scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("invalid search configuration: {0}")]
    InvalidSearchConfig(String),
}

/// Construction could not place every stop under the given capacities and
/// distance ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} stop(s) could not be placed on any route", .unplaced.len())]
pub struct InfeasibleSolutionError {
    /// Stops left without a vehicle, ascending.
    pub unplaced: Vec<usize>,
}

impl InfeasibleSolutionError {
    /// Number of stops that could not be placed.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }
}

/// Any failure of an optimization run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Infeasible(#[from] InfeasibleSolutionError),

    /// The final solution broke an invariant the search is meant to keep.
    /// This is a solver defect, never a property of the input.
    #[error("solver produced an invalid solution ({} violation(s))", .0.len())]
    InvariantViolation(Vec<Violation>),
}
