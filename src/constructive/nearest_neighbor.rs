//! Round-robin nearest-neighbor construction for multi-depot fleets.
//!
//! Each vehicle in turn extends its route from its current tail to the
//! nearest unassigned stop, as long as the stop fits both its stop limit and
//! the distance ceiling (return leg included). A vehicle whose nearest stop
//! does not fit yields to the next vehicle. Rounds repeat while any vehicle
//! makes progress.
//!
//! When a full round places nothing but stops remain, the single cheapest
//! feasible insertion over all vehicles and positions is applied and rounds
//! resume. Construction ends when every stop is placed or no insertion fits
//! anywhere.
//!
//! # Complexity
//!
//! O(n²) for the nearest-neighbor rounds; each fallback insertion costs
//! O(n² × V) in the worst case.

use tracing::{debug, instrument, warn};

use crate::models::{Route, RoutingProblem, Solution};

/// Constructs an initial solution with one route per vehicle.
///
/// Equidistant stops resolve to the lowest node index and vehicles are
/// served in index order, so the result is fully deterministic. Stops that
/// fit nowhere are left in [`Solution::unassigned`].
///
/// # Examples
///
/// ```
/// use u_fleet::distance::DistanceMatrix;
/// use u_fleet::models::RoutingProblem;
/// use u_fleet::constructive::nearest_neighbor;
///
/// let dm = DistanceMatrix::from_points_scaled(
///     &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)],
///     1.0,
/// ).unwrap();
/// let problem = RoutingProblem::from_parts(dm, &[0], &[3], 100).unwrap();
///
/// let solution = nearest_neighbor(&problem);
/// assert_eq!(solution.route(0).stops(), &[1, 2, 3]);
/// assert_eq!(solution.num_unassigned(), 0);
/// ```
#[instrument(skip_all, level = "debug")]
pub fn nearest_neighbor(problem: &RoutingProblem) -> Solution {
    let mut routes: Vec<Route> = problem
        .vehicles()
        .iter()
        .map(|v| Route::new(v.id(), v.depot()))
        .collect();
    let mut remaining: Vec<usize> = problem.stops().to_vec();

    let mut fallback_insertions = 0usize;
    while !remaining.is_empty() {
        let mut progress = false;
        for route in routes.iter_mut() {
            while let Some(stop) = problem
                .distances()
                .nearest_neighbor(route.tail(), &remaining)
            {
                let Some(distance) = append_distance(problem, route, stop) else {
                    break;
                };
                route.push_stop(stop, distance);
                remove_sorted(&mut remaining, stop);
                progress = true;
            }
        }

        if remaining.is_empty() || progress {
            continue;
        }

        match cheapest_insertion(problem, &routes, &remaining) {
            Some(ins) => {
                let route = &mut routes[ins.vehicle];
                route.stops_mut().insert(ins.position, ins.stop);
                route.set_distance(route.distance() + ins.delta);
                remove_sorted(&mut remaining, ins.stop);
                fallback_insertions += 1;
            }
            None => break,
        }
    }

    debug!(
        placed = problem.stops().len() - remaining.len(),
        fallback_insertions, "Construction finished"
    );
    if !remaining.is_empty() {
        warn!(
            unplaced = remaining.len(),
            "Construction could not place every stop"
        );
    }

    let mut solution = Solution::new(routes);
    for stop in remaining {
        solution.add_unassigned(stop);
    }
    solution
}

/// Closed-loop distance after appending `stop`, or `None` if the append
/// breaks the stop limit or the distance ceiling.
fn append_distance(problem: &RoutingProblem, route: &Route, stop: usize) -> Option<i64> {
    let capacity = problem.vehicle(route.vehicle_id()).capacity();
    if route.len() >= capacity {
        return None;
    }
    let tail = route.tail();
    let depot = route.depot();
    let distance = route.distance() - problem.distance(tail, depot)
        + problem.distance(tail, stop)
        + problem.distance(stop, depot);
    (distance <= problem.max_route_distance()).then_some(distance)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Insertion {
    stop: usize,
    vehicle: usize,
    position: usize,
    delta: i64,
}

/// Finds the feasible insertion with the smallest distance increase.
///
/// Ties resolve to the lowest stop, then vehicle, then position.
fn cheapest_insertion(
    problem: &RoutingProblem,
    routes: &[Route],
    remaining: &[usize],
) -> Option<Insertion> {
    let mut best: Option<Insertion> = None;
    for &stop in remaining {
        for (vehicle, route) in routes.iter().enumerate() {
            if route.len() >= problem.vehicle(vehicle).capacity() {
                continue;
            }
            let stops = route.stops();
            for position in 0..=stops.len() {
                let prev = if position == 0 {
                    route.depot()
                } else {
                    stops[position - 1]
                };
                let next = stops.get(position).copied().unwrap_or(route.depot());
                let delta = problem.distance(prev, stop) + problem.distance(stop, next)
                    - problem.distance(prev, next);
                if route.distance() + delta > problem.max_route_distance() {
                    continue;
                }
                if best.is_none_or(|b| delta < b.delta) {
                    best = Some(Insertion {
                        stop,
                        vehicle,
                        position,
                        delta,
                    });
                }
            }
        }
    }
    best
}

fn remove_sorted(remaining: &mut Vec<usize>, stop: usize) {
    if let Ok(idx) = remaining.binary_search(&stop) {
        remaining.remove(idx);
    }
}
