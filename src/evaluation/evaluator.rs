//! Route distance, route feasibility and span-penalized solution cost.

use serde::{Deserialize, Serialize};

use crate::models::{Route, RoutingProblem, Solution, Violation, ViolationType};

/// Cost breakdown of a solution.
///
/// `objective = total_distance + span_cost_coefficient × span`, where `span`
/// is the gap between the longest and the shortest route (idle vehicles
/// count as zero-length routes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionCost {
    /// Sum of route distances.
    pub total_distance: i64,
    /// Longest route distance minus shortest route distance.
    pub span: i64,
    /// Value minimized by the local search.
    pub objective: i64,
}

impl SolutionCost {
    /// Computes the cost of a solution.
    pub fn of(solution: &Solution, span_cost_coefficient: i64) -> Self {
        Self::from_parts(solution.total_distance(), solution.span(), span_cost_coefficient)
    }

    /// Combines a total distance and a span into an objective.
    pub fn from_parts(total_distance: i64, span: i64, span_cost_coefficient: i64) -> Self {
        Self {
            total_distance,
            span,
            objective: objective(total_distance, span, span_cost_coefficient),
        }
    }
}

/// Span-penalized objective; saturates instead of overflowing.
#[inline]
pub fn objective(total_distance: i64, span: i64, span_cost_coefficient: i64) -> i64 {
    total_distance.saturating_add(span_cost_coefficient.saturating_mul(span))
}

/// Closed-loop distance `depot → stops[0] → ... → stops[k-1] → depot`.
///
/// An empty route has distance zero.
pub fn route_distance(problem: &RoutingProblem, depot: usize, stops: &[usize]) -> i64 {
    let Some((&first, _)) = stops.split_first() else {
        return 0;
    };
    let mut dist = problem.distance(depot, first);
    for pair in stops.windows(2) {
        dist += problem.distance(pair[0], pair[1]);
    }
    dist + problem.distance(stops[stops.len() - 1], depot)
}

/// Builds and checks routes against a problem's capacity and distance
/// constraints.
///
/// # Examples
///
/// ```
/// use u_fleet::distance::DistanceMatrix;
/// use u_fleet::evaluation::RouteEvaluator;
/// use u_fleet::models::RoutingProblem;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0, 3, 4],
///     vec![3, 0, 5],
///     vec![4, 5, 0],
/// ]).unwrap();
/// let problem = RoutingProblem::from_parts(dm, &[0], &[2], 100).unwrap();
///
/// let evaluator = RouteEvaluator::new(&problem);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.distance(), 12);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    problem: &'a RoutingProblem,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a RoutingProblem) -> Self {
        Self { problem }
    }

    /// Builds vehicle `v`'s route from a stop sequence.
    ///
    /// Returns the route and any constraint violations found.
    pub fn build_route(&self, v: usize, stops: &[usize]) -> (Route, Vec<Violation>) {
        let depot = self.problem.vehicle(v).depot();
        let n = self.problem.num_nodes();
        let distance = if stops.iter().all(|&s| s < n) {
            route_distance(self.problem, depot, stops)
        } else {
            0
        };
        let route = Route::with_stops(v, depot, stops.to_vec(), distance);
        let violations = self.check_route(v, &route);
        (route, violations)
    }

    /// Checks a route held at `route_index` in a solution.
    ///
    /// Verifies endpoints, node validity, depot placement, capacity, the
    /// recorded distance and the distance ceiling.
    pub fn check_route(&self, route_index: usize, route: &Route) -> Vec<Violation> {
        let problem = self.problem;
        let mut violations = Vec::new();

        let Some(vehicle) = problem.vehicles().get(route_index) else {
            return violations;
        };
        if route.vehicle_id() != route_index || route.depot() != vehicle.depot() {
            violations.push(Violation::new(ViolationType::WrongEndpoints {
                route_index,
                depot: route.depot(),
                expected: vehicle.depot(),
            }));
        }

        let mut unknown = false;
        for &node in route.stops() {
            if node >= problem.num_nodes() {
                unknown = true;
                violations.push(Violation::new(ViolationType::UnknownNode { route_index, node }));
            } else if problem.is_depot(node) {
                violations.push(Violation::new(ViolationType::DepotMisplaced {
                    route_index,
                    depot: node,
                }));
            }
        }

        if route.len() > vehicle.capacity() {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index,
                stops: route.len(),
                capacity: vehicle.capacity(),
            }));
        }

        // Distances are meaningless once a node falls outside the matrix.
        if unknown || route.depot() >= problem.num_nodes() {
            return violations;
        }

        let actual = route_distance(problem, route.depot(), route.stops());
        if actual != route.distance() {
            violations.push(Violation::new(ViolationType::DistanceMismatch {
                route_index,
                recorded: route.distance(),
                actual,
            }));
        }
        if actual > problem.max_route_distance() {
            violations.push(Violation::new(ViolationType::MaxDistanceExceeded {
                route_index,
                distance: actual,
                max_distance: problem.max_route_distance(),
            }));
        }

        violations
    }

    /// Checks every route of a solution.
    pub fn evaluate_solution(&self, solution: &Solution) -> Vec<Violation> {
        solution
            .routes()
            .iter()
            .enumerate()
            .flat_map(|(idx, route)| self.check_route(idx, route))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    // Depot 0 at the origin, stops 1..=3 on a line.
    fn setup(capacity: usize, ceiling: i64) -> RoutingProblem {
        let dm = DistanceMatrix::from_points_scaled(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)],
            1.0,
        )
        .expect("valid");
        RoutingProblem::from_parts(dm, &[0], &[capacity], ceiling).expect("valid")
    }

    #[test]
    fn test_route_distance() {
        let problem = setup(3, 100);
        assert_eq!(route_distance(&problem, 0, &[]), 0);
        assert_eq!(route_distance(&problem, 0, &[2]), 4);
        assert_eq!(route_distance(&problem, 0, &[1, 2, 3]), 6);
        assert_eq!(route_distance(&problem, 0, &[3, 1, 2]), 8);
    }

    #[test]
    fn test_build_route_empty() {
        let problem = setup(3, 100);
        let eval = RouteEvaluator::new(&problem);
        let (route, violations) = eval.build_route(0, &[]);
        assert!(route.is_empty());
        assert!(violations.is_empty());
        assert_eq!(route.distance(), 0);
    }

    #[test]
    fn test_build_route_capacity_violated() {
        let problem = setup(2, 100);
        let eval = RouteEvaluator::new(&problem);
        let (route, violations) = eval.build_route(0, &[1, 2, 3]);
        assert_eq!(route.len(), 3);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                stops: 3,
                capacity: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_build_route_max_distance_violated() {
        let problem = setup(3, 5);
        let eval = RouteEvaluator::new(&problem);
        let (_, violations) = eval.build_route(0, &[3]);
        assert_eq!(
            violations,
            vec![Violation::new(ViolationType::MaxDistanceExceeded {
                route_index: 0,
                distance: 6,
                max_distance: 5,
            })]
        );
    }

    #[test]
    fn test_check_route_flags_stale_distance() {
        let problem = setup(3, 100);
        let eval = RouteEvaluator::new(&problem);
        let route = Route::with_stops(0, 0, vec![1, 2], 3);
        let violations = eval.check_route(0, &route);
        assert!(matches!(
            violations[0].kind,
            ViolationType::DistanceMismatch {
                recorded: 3,
                actual: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_check_route_unknown_node_and_wrong_depot() {
        let problem = setup(3, 100);
        let eval = RouteEvaluator::new(&problem);
        let route = Route::with_stops(0, 2, vec![9], 0);
        let violations = eval.check_route(0, &route);
        assert!(violations
            .iter()
            .any(|v| matches!(v.kind, ViolationType::WrongEndpoints { expected: 0, .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v.kind, ViolationType::UnknownNode { node: 9, .. })));
    }

    #[test]
    fn test_solution_cost() {
        let sol = Solution::new(vec![
            Route::with_stops(0, 0, vec![1], 10),
            Route::with_stops(1, 5, vec![2, 3], 25),
        ]);
        let cost = SolutionCost::of(&sol, 100);
        assert_eq!(cost.total_distance, 35);
        assert_eq!(cost.span, 15);
        assert_eq!(cost.objective, 35 + 1500);
        assert_eq!(SolutionCost::of(&sol, 0).objective, 35);
    }

    #[test]
    fn test_objective_saturates() {
        assert_eq!(objective(1, i64::MAX, 100), i64::MAX);
    }
}
