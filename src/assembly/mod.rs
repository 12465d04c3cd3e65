//! Final validation and output shaping.
//!
//! [`validate`] re-checks a finished solution from scratch: stop coverage,
//! one route per vehicle, endpoints, capacity and the distance ceiling.
//! [`assemble`] turns a solution that passes into a [`RoutePlan`].

use serde::Serialize;
use tracing::{error, instrument};

use crate::error::{InfeasibleSolutionError, RoutingError};
use crate::evaluation::RouteEvaluator;
use crate::local_search::SearchOutcome;
use crate::models::{RoutingProblem, Solution, Violation, ViolationType};

/// Validated routes, one per vehicle in fleet order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    /// Node sequences `[depot, stop, ..., depot]`. An idle vehicle gets
    /// `[depot, depot]`.
    pub routes: Vec<Vec<usize>>,
    /// Distance of each route, same order as `routes`.
    pub route_distances: Vec<i64>,
    /// Sum of route distances.
    pub total_distance: i64,
    /// Span-penalized objective of the plan.
    pub objective: i64,
    /// How the local search went.
    pub search: SearchOutcome,
}

impl RoutePlan {
    /// Node sequence of vehicle `v`.
    pub fn route(&self, v: usize) -> &[usize] {
        &self.routes[v]
    }

    /// Number of routes (equals the fleet size).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Longest route distance minus shortest route distance.
    pub fn span(&self) -> i64 {
        let max = self.route_distances.iter().copied().max().unwrap_or(0);
        let min = self.route_distances.iter().copied().min().unwrap_or(0);
        max - min
    }

    /// Consumes the plan, keeping only the node sequences.
    pub fn into_routes(self) -> Vec<Vec<usize>> {
        self.routes
    }
}

/// Checks every structural and constraint invariant of `solution`.
///
/// Returns an empty list when the solution is valid. Unassigned stops are
/// not reported here; see [`assemble`].
pub fn validate(problem: &RoutingProblem, solution: &Solution) -> Vec<Violation> {
    let mut violations = Vec::new();

    if solution.num_routes() != problem.num_vehicles() {
        violations.push(Violation::new(ViolationType::RouteCountMismatch {
            routes: solution.num_routes(),
            vehicles: problem.num_vehicles(),
        }));
    }

    let mut visits = vec![0usize; problem.num_nodes()];
    for route in solution.routes() {
        for &node in route.stops() {
            if let Some(count) = visits.get_mut(node) {
                *count += 1;
            }
        }
    }
    for &stop in problem.stops() {
        match visits[stop] {
            0 if solution.unassigned().contains(&stop) => {}
            0 => violations.push(Violation::new(ViolationType::StopMissing { node: stop })),
            1 => {}
            n => violations.push(Violation::new(ViolationType::StopDuplicated {
                node: stop,
                visits: n,
            })),
        }
    }

    violations.extend(RouteEvaluator::new(problem).evaluate_solution(solution));
    violations
}

/// Validates `solution` and shapes it into a [`RoutePlan`].
///
/// # Errors
///
/// - [`RoutingError::Infeasible`] if any stop was never placed.
/// - [`RoutingError::InvariantViolation`] if validation finds a defect or
///   `search.final_cost` does not describe `solution`.
#[instrument(skip_all, level = "debug")]
pub fn assemble(
    problem: &RoutingProblem,
    solution: Solution,
    search: SearchOutcome,
) -> Result<RoutePlan, RoutingError> {
    if solution.num_unassigned() > 0 {
        return Err(InfeasibleSolutionError {
            unplaced: solution.unassigned().to_vec(),
        }
        .into());
    }

    let mut violations = validate(problem, &solution);
    let recorded = search.final_cost;
    if recorded.total_distance != solution.total_distance() || recorded.span != solution.span() {
        violations.push(Violation::new(ViolationType::CostMismatch {
            recorded_distance: recorded.total_distance,
            actual_distance: solution.total_distance(),
            recorded_span: recorded.span,
            actual_span: solution.span(),
        }));
    }
    if !violations.is_empty() {
        error!(
            violations = violations.len(),
            first = ?violations[0].kind,
            "Final solution failed validation"
        );
        return Err(RoutingError::InvariantViolation(violations));
    }

    let routes = solution.routes().iter().map(|r| r.nodes()).collect();
    let route_distances = solution.routes().iter().map(|r| r.distance()).collect();
    Ok(RoutePlan {
        routes,
        route_distances,
        total_distance: solution.total_distance(),
        objective: recorded.objective,
        search,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::SolutionCost;
    use crate::local_search::StopReason;
    use crate::models::Route;

    fn problem() -> RoutingProblem {
        let points: Vec<(f64, f64)> = (0..5).map(|i| (i as f64, 0.0)).collect();
        let dm = DistanceMatrix::from_points_scaled(&points, 1.0).expect("valid");
        RoutingProblem::from_parts(dm, &[0, 4], &[2, 2], 100).expect("valid")
    }

    fn outcome(solution: &Solution) -> SearchOutcome {
        let cost = SolutionCost::of(solution, 100);
        SearchOutcome {
            iterations: 0,
            initial_cost: cost,
            final_cost: cost,
            stop_reason: StopReason::Converged,
            cost_history: Vec::new(),
        }
    }

    #[test]
    fn test_assemble_valid() {
        let problem = problem();
        let sol = Solution::new(vec![
            Route::with_stops(0, 0, vec![1, 2], 4),
            Route::with_stops(1, 4, vec![3], 2),
        ]);
        let search = outcome(&sol);
        let plan = assemble(&problem, sol, search).expect("valid");
        assert_eq!(plan.route(0), &[0, 1, 2, 0]);
        assert_eq!(plan.route(1), &[4, 3, 4]);
        assert_eq!(plan.route_distances, vec![4, 2]);
        assert_eq!(plan.total_distance, 6);
        assert_eq!(plan.objective, 6 + 100 * 2);
        assert_eq!(plan.span(), 2);
        assert_eq!(plan.into_routes().len(), 2);
    }

    #[test]
    fn test_idle_vehicle_gets_depot_pair() {
        let dm = DistanceMatrix::from_points_scaled(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)],
            1.0,
        )
        .expect("valid");
        let problem = RoutingProblem::from_parts(dm, &[0, 4], &[3, 3], 100).expect("valid");
        let sol = Solution::new(vec![
            Route::with_stops(0, 0, vec![1, 2, 3], 6),
            Route::new(1, 4),
        ]);
        let search = outcome(&sol);
        let plan = assemble(&problem, sol, search).expect("valid");
        assert_eq!(plan.route(1), &[4, 4]);
        assert_eq!(plan.route_distances, vec![6, 0]);
    }

    #[test]
    fn test_capacity_overflow_detected() {
        let problem = problem();
        let sol = Solution::new(vec![
            Route::with_stops(0, 0, vec![1, 2, 3], 6),
            Route::new(1, 4),
        ]);
        let kinds: Vec<_> = validate(&problem, &sol).into_iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationType::CapacityExceeded {
                route_index: 0,
                stops: 3,
                capacity: 2
            }]
        );
    }

    #[test]
    fn test_unassigned_is_infeasible() {
        let problem = problem();
        let mut sol = Solution::new(vec![
            Route::with_stops(0, 0, vec![1, 2], 4),
            Route::new(1, 4),
        ]);
        sol.add_unassigned(3);
        let search = outcome(&sol);
        match assemble(&problem, sol, search) {
            Err(RoutingError::Infeasible(err)) => assert_eq!(err.unplaced, vec![3]),
            other => panic!("expected infeasible, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_and_duplicated_stops() {
        let problem = problem();
        let sol = Solution::new(vec![
            Route::with_stops(0, 0, vec![1, 2], 4),
            Route::with_stops(1, 4, vec![2], 4),
        ]);
        let kinds: Vec<_> = validate(&problem, &sol).into_iter().map(|v| v.kind).collect();
        assert!(kinds.contains(&ViolationType::StopMissing { node: 3 }));
        assert!(kinds.contains(&ViolationType::StopDuplicated { node: 2, visits: 2 }));
    }

    #[test]
    fn test_broken_solution_is_invariant_violation() {
        let problem = problem();
        // Stale distance on route 0.
        let sol = Solution::new(vec![
            Route::with_stops(0, 0, vec![1, 2], 3),
            Route::with_stops(1, 4, vec![3], 2),
        ]);
        let search = outcome(&sol);
        let err = assemble(&problem, sol, search).expect_err("invalid");
        assert!(matches!(err, RoutingError::InvariantViolation(ref v) if v.len() == 1));
    }

    #[test]
    fn test_stale_search_outcome_rejected() {
        let problem = problem();
        let sol = Solution::new(vec![
            Route::with_stops(0, 0, vec![1], 2),
            Route::with_stops(1, 4, vec![3, 2], 4),
        ]);
        // Cost left over from an earlier solution.
        let mut search = outcome(&sol);
        search.final_cost = SolutionCost::from_parts(9, 2, 100);

        let err = assemble(&problem, sol, search).expect_err("stale");
        match err {
            RoutingError::InvariantViolation(v) => assert_eq!(
                v.last().map(|v| &v.kind),
                Some(&ViolationType::CostMismatch {
                    recorded_distance: 9,
                    actual_distance: 6,
                    recorded_span: 2,
                    actual_span: 2,
                })
            ),
            other => panic!("expected invariant violation, got {other:?}"),
        }
    }

    #[test]
    fn test_route_count_mismatch() {
        let problem = problem();
        let sol = Solution::new(vec![Route::with_stops(0, 0, vec![1, 2, 3], 6)]);
        let kinds: Vec<_> = validate(&problem, &sol).into_iter().map(|v| v.kind).collect();
        assert!(kinds.contains(&ViolationType::RouteCountMismatch {
            routes: 1,
            vehicles: 2
        }));
    }
}
