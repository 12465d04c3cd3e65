//! End-to-end optimization pipeline.
//!
//! ```text
//! RoutingProblem → nearest_neighbor → LocalSearch::improve → assemble → RoutePlan
//! ```

use std::time::Instant;

use tracing::{info, instrument, warn};

use crate::assembly::{assemble, RoutePlan};
use crate::constructive::nearest_neighbor;
use crate::error::{InfeasibleSolutionError, RoutingError};
use crate::local_search::{LocalSearch, SearchConfig};
use crate::models::RoutingProblem;

/// Runs construction, local search and validation for a routing problem.
///
/// # Examples
///
/// ```
/// use u_fleet::distance::DistanceMatrix;
/// use u_fleet::local_search::SearchConfig;
/// use u_fleet::models::RoutingProblem;
/// use u_fleet::optimizer::Optimizer;
///
/// let dm = DistanceMatrix::from_points(&[
///     (0.0, 0.0), (5.0, 0.0), (1.0, 1.0), (4.0, 1.0), (0.0, 2.0), (5.0, 2.0),
/// ]).unwrap();
/// let problem = RoutingProblem::from_parts(dm, &[0, 1], &[3, 3], i64::MAX).unwrap();
///
/// let plan = Optimizer::new(SearchConfig::default()).optimize(&problem).unwrap();
/// assert_eq!(plan.num_routes(), 2);
/// assert_eq!(plan.route(0).first(), Some(&0));
/// assert_eq!(plan.route(1).last(), Some(&1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    search: LocalSearch,
}

impl Optimizer {
    /// Creates an optimizer with the given search configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            search: LocalSearch::new(config),
        }
    }

    /// Returns the search configuration.
    pub fn config(&self) -> &SearchConfig {
        self.search.config()
    }

    /// Optimizes `problem` and returns one validated route per vehicle.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::Configuration`] if the search configuration is
    ///   invalid. Nothing is constructed in that case.
    /// - [`RoutingError::Infeasible`] if construction cannot place every
    ///   stop. The search is skipped.
    /// - [`RoutingError::InvariantViolation`] if the final solution fails
    ///   validation.
    #[instrument(skip_all, fields(nodes = problem.num_nodes(), vehicles = problem.num_vehicles()))]
    pub fn optimize(&self, problem: &RoutingProblem) -> Result<RoutePlan, RoutingError> {
        self.config().validate()?;
        let start = Instant::now();

        let mut solution = nearest_neighbor(problem);
        if solution.num_unassigned() > 0 {
            warn!(
                unplaced = solution.num_unassigned(),
                "Problem is infeasible under the given capacities and ceiling"
            );
            return Err(InfeasibleSolutionError {
                unplaced: solution.unassigned().to_vec(),
            }
            .into());
        }

        let outcome = self.search.improve(problem, &mut solution);
        let plan = assemble(problem, solution, outcome)?;

        info!(
            total_distance = plan.total_distance,
            objective = plan.objective,
            moves = plan.search.iterations,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Optimization finished"
        );
        Ok(plan)
    }
}

/// Optimizes `problem` with the default [`SearchConfig`].
///
/// # Examples
///
/// ```
/// use u_fleet::distance::DistanceMatrix;
/// use u_fleet::models::RoutingProblem;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0, 2, 3, 4],
///     vec![2, 0, 2, 3],
///     vec![3, 2, 0, 2],
///     vec![4, 3, 2, 0],
/// ]).unwrap();
/// let problem = RoutingProblem::from_parts(dm, &[0], &[3], 100).unwrap();
///
/// let plan = u_fleet::optimize(&problem).unwrap();
/// assert_eq!(plan.total_distance, 10);
/// ```
pub fn optimize(problem: &RoutingProblem) -> Result<RoutePlan, RoutingError> {
    Optimizer::default().optimize(problem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::error::ConfigurationError;

    fn line(depots: &[usize], capacities: &[usize], ceiling: i64) -> RoutingProblem {
        let points: Vec<(f64, f64)> = (0..6).map(|i| (i as f64, 0.0)).collect();
        let dm = DistanceMatrix::from_points_scaled(&points, 1.0).expect("valid");
        RoutingProblem::from_parts(dm, depots, capacities, ceiling).expect("valid")
    }

    #[test]
    fn test_optimize_covers_every_stop() {
        let problem = line(&[0, 5], &[3, 3], 100);
        let plan = optimize(&problem).expect("feasible");
        let mut served: Vec<usize> = plan
            .routes
            .iter()
            .flat_map(|r| r[1..r.len() - 1].iter().copied())
            .collect();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3, 4]);
        assert_eq!(plan.total_distance, plan.route_distances.iter().sum::<i64>());
    }

    #[test]
    fn test_invalid_config_rejected_first() {
        let problem = line(&[0], &[1], 0);
        let optimizer = Optimizer::new(SearchConfig::default().with_span_cost_coefficient(-5));
        assert!(matches!(
            optimizer.optimize(&problem),
            Err(RoutingError::Configuration(
                ConfigurationError::InvalidSearchConfig(_)
            ))
        ));
    }

    #[test]
    fn test_infeasible_reports_unplaced() {
        let problem = line(&[0], &[2], 100);
        match optimize(&problem) {
            Err(RoutingError::Infeasible(err)) => {
                assert_eq!(err.unplaced_count(), 3);
                assert_eq!(err.unplaced, vec![3, 4, 5]);
            }
            other => panic!("expected infeasible, got {other:?}"),
        }
    }
}
