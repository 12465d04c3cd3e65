//! Routing problem definition.

use crate::distance::DistanceMatrix;
use crate::error::ConfigurationError;

use super::Vehicle;

/// A validated multi-depot routing problem.
///
/// Packages the distance matrix with the fleet and the shared per-route
/// distance ceiling. Every node that is not some vehicle's depot is a stop
/// that must be served exactly once.
///
/// Vehicles are identified by their position in the fleet; IDs are
/// renumbered on construction to match.
///
/// # Examples
///
/// ```
/// use u_fleet::distance::DistanceMatrix;
/// use u_fleet::models::RoutingProblem;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0, 3, 4],
///     vec![3, 0, 5],
///     vec![4, 5, 0],
/// ]).unwrap();
/// let problem = RoutingProblem::from_parts(dm, &[0], &[2], 100).unwrap();
///
/// assert_eq!(problem.num_nodes(), 3);
/// assert_eq!(problem.stops(), &[1, 2]);
/// assert!(problem.is_depot(0));
/// ```
#[derive(Debug, Clone)]
pub struct RoutingProblem {
    distances: DistanceMatrix,
    vehicles: Vec<Vehicle>,
    max_route_distance: i64,
    depot_owner: Vec<Option<usize>>,
    stops: Vec<usize>,
}

impl RoutingProblem {
    /// Validates and builds a problem.
    ///
    /// Fails if the fleet is empty, if there are fewer locations than
    /// vehicles, if the ceiling is negative, if a depot is out of range or
    /// shared by two vehicles, or if a vehicle has zero capacity while there
    /// are stops to serve.
    pub fn new(
        distances: DistanceMatrix,
        vehicles: Vec<Vehicle>,
        max_route_distance: i64,
    ) -> Result<Self, ConfigurationError> {
        let n = distances.size();
        if vehicles.is_empty() {
            return Err(ConfigurationError::EmptyFleet);
        }
        if n < vehicles.len() {
            return Err(ConfigurationError::FewerLocationsThanVehicles {
                locations: n,
                vehicles: vehicles.len(),
            });
        }
        if max_route_distance < 0 {
            return Err(ConfigurationError::NegativeDistanceCeiling(
                max_route_distance,
            ));
        }

        let vehicles: Vec<Vehicle> = vehicles
            .into_iter()
            .enumerate()
            .map(|(id, v)| Vehicle::new(id, v.depot(), v.capacity()))
            .collect();

        let mut depot_owner = vec![None; n];
        for v in &vehicles {
            let depot = v.depot();
            if depot >= n {
                return Err(ConfigurationError::DepotOutOfRange {
                    vehicle: v.id(),
                    depot,
                    locations: n,
                });
            }
            if let Some(first) = depot_owner[depot] {
                return Err(ConfigurationError::DuplicateDepot {
                    depot,
                    first,
                    second: v.id(),
                });
            }
            depot_owner[depot] = Some(v.id());
        }

        let stops: Vec<usize> = (0..n).filter(|&i| depot_owner[i].is_none()).collect();
        if !stops.is_empty() {
            if let Some(v) = vehicles.iter().find(|v| v.capacity() == 0) {
                return Err(ConfigurationError::ZeroCapacity { vehicle: v.id() });
            }
        }

        Ok(Self {
            distances,
            vehicles,
            max_route_distance,
            depot_owner,
            stops,
        })
    }

    /// Builds a problem from parallel depot and capacity arrays.
    pub fn from_parts(
        distances: DistanceMatrix,
        depots: &[usize],
        capacities: &[usize],
        max_route_distance: i64,
    ) -> Result<Self, ConfigurationError> {
        let vehicles = Vehicle::fleet(depots, capacities)?;
        Self::new(distances, vehicles, max_route_distance)
    }

    /// The distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Travel distance between two nodes.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> i64 {
        self.distances.get(from, to)
    }

    /// The fleet, in vehicle order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Vehicle `v`.
    pub fn vehicle(&self, v: usize) -> &Vehicle {
        &self.vehicles[v]
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of locations (depots and stops).
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }

    /// Shared upper bound on each route's closed-loop distance.
    pub fn max_route_distance(&self) -> i64 {
        self.max_route_distance
    }

    /// Stops to serve, ascending.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Returns `true` if `node` is some vehicle's depot.
    pub fn is_depot(&self, node: usize) -> bool {
        self.depot_owner.get(node).is_some_and(Option::is_some)
    }

    /// Vehicle whose depot is `node`, if any.
    pub fn depot_owner(&self, node: usize) -> Option<usize> {
        self.depot_owner.get(node).copied().flatten()
    }
}
