//! Route type.

/// An ordered sequence of stops served by a single vehicle.
///
/// The route starts and ends at the vehicle's depot; only the interior
/// stops are stored. `distance` is the full closed-loop distance and is kept
/// in sync by whoever edits the stops.
///
/// # Examples
///
/// ```
/// use u_fleet::models::Route;
///
/// let route = Route::with_stops(0, 3, vec![1, 2], 14);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.nodes(), vec![3, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle_id: usize,
    depot: usize,
    stops: Vec<usize>,
    distance: i64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize, depot: usize) -> Self {
        Self::with_stops(vehicle_id, depot, Vec::new(), 0)
    }

    /// Creates a route from known stops and their closed-loop distance.
    pub fn with_stops(vehicle_id: usize, depot: usize, stops: Vec<usize>, distance: i64) -> Self {
        Self {
            vehicle_id,
            depot,
            stops,
            distance,
        }
    }

    /// Vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Depot node at both ends of the route.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Interior stops in visit order.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Number of interior stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the vehicle stays home.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Closed-loop distance, depot to depot.
    pub fn distance(&self) -> i64 {
        self.distance
    }

    /// Last node visited so far: the final stop, or the depot if empty.
    pub fn tail(&self) -> usize {
        self.stops.last().copied().unwrap_or(self.depot)
    }

    /// Full node sequence `[depot, stop_1, ..., stop_k, depot]`.
    pub fn nodes(&self) -> Vec<usize> {
        let mut nodes = Vec::with_capacity(self.stops.len() + 2);
        nodes.push(self.depot);
        nodes.extend_from_slice(&self.stops);
        nodes.push(self.depot);
        nodes
    }

    /// Appends a stop and records the new closed-loop distance.
    pub fn push_stop(&mut self, stop: usize, distance: i64) {
        self.stops.push(stop);
        self.distance = distance;
    }

    /// Mutable access to the stops for in-place moves. The caller must
    /// follow up with [`set_distance`](Self::set_distance).
    pub(crate) fn stops_mut(&mut self) -> &mut Vec<usize> {
        &mut self.stops
    }

    pub(crate) fn set_distance(&mut self, distance: i64) {
        self.distance = distance;
    }
}
