//! Solution and violation types.

use serde::Serialize;

use super::Route;

/// A type of invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViolationType {
    /// The solution does not hold exactly one route per vehicle.
    RouteCountMismatch {
        /// Routes present.
        routes: usize,
        /// Vehicles in the fleet.
        vehicles: usize,
    },
    /// Route at `route_index` does not belong to vehicle `route_index` or
    /// does not start at that vehicle's depot.
    WrongEndpoints {
        /// Route index in the solution.
        route_index: usize,
        /// Depot the route claims.
        depot: usize,
        /// Depot of the vehicle at that index.
        expected: usize,
    },
    /// A stop is not on any route.
    StopMissing {
        /// The stop node.
        node: usize,
    },
    /// A stop is visited more than once across the solution.
    StopDuplicated {
        /// The stop node.
        node: usize,
        /// Total number of visits.
        visits: usize,
    },
    /// A depot node appears inside a route.
    DepotMisplaced {
        /// Route index in the solution.
        route_index: usize,
        /// The depot node.
        depot: usize,
    },
    /// A route references a node outside the distance matrix.
    UnknownNode {
        /// Route index in the solution.
        route_index: usize,
        /// The offending node.
        node: usize,
    },
    /// A route serves more stops than its vehicle allows.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Stops on the route.
        stops: usize,
        /// Vehicle capacity.
        capacity: usize,
    },
    /// Route distance exceeds the shared ceiling.
    MaxDistanceExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Actual distance.
        distance: i64,
        /// Maximum allowed distance.
        max_distance: i64,
    },
    /// The reported solution cost disagrees with the routes.
    CostMismatch {
        /// Total distance reported by the search.
        recorded_distance: i64,
        /// Sum of route distances.
        actual_distance: i64,
        /// Span reported by the search.
        recorded_span: i64,
        /// Longest minus shortest route distance.
        actual_span: i64,
    },
    /// The cached route distance disagrees with the matrix.
    DistanceMismatch {
        /// Route index in the solution.
        route_index: usize,
        /// Distance stored on the route.
        recorded: i64,
        /// Distance recomputed from the matrix.
        actual: i64,
    },
}

/// An invariant violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// One route per vehicle, plus any stops construction could not place.
///
/// Route `i` always belongs to vehicle `i`.
///
/// # Examples
///
/// ```
/// use u_fleet::models::{Route, Solution};
///
/// let sol = Solution::new(vec![Route::new(0, 0), Route::new(1, 5)]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_unassigned(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
}

impl Solution {
    /// Creates a solution from per-vehicle routes with nothing unassigned.
    pub fn new(routes: Vec<Route>) -> Self {
        Self {
            routes,
            unassigned: Vec::new(),
        }
    }

    /// Marks a stop as unassigned.
    pub fn add_unassigned(&mut self, node: usize) {
        self.unassigned.push(node);
    }

    /// Returns the routes in vehicle order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns a mutable reference to the routes.
    pub fn routes_mut(&mut self) -> &mut [Route] {
        &mut self.routes
    }

    /// Returns the route of vehicle `v`.
    pub fn route(&self, v: usize) -> &Route {
        &self.routes[v]
    }

    /// Returns the number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns the stops no route serves.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Returns the number of unassigned stops.
    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Sum of route distances.
    pub fn total_distance(&self) -> i64 {
        self.routes.iter().map(Route::distance).sum()
    }

    /// Difference between the longest and shortest route.
    pub fn span(&self) -> i64 {
        let max = self.routes.iter().map(Route::distance).max().unwrap_or(0);
        let min = self.routes.iter().map(Route::distance).min().unwrap_or(0);
        max - min
    }

    /// Total number of stops served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }
}
