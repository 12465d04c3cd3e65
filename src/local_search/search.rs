//! First-improvement local search driver.

use std::time::{Duration, Instant};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::evaluation::SolutionCost;
use crate::models::{RoutingProblem, Solution};

use super::config::SearchConfig;
use super::sweep::{Candidate, SweepContext};
use super::{relocate, swap, two_opt};

/// Scans one source route for the first improving move of one neighborhood.
type Operator = for<'a> fn(&SweepContext<'a>, usize) -> Option<Candidate>;

/// Neighborhoods in priority order.
const OPERATORS: [Operator; 3] = [
    relocate::first_improving,
    swap::first_improving,
    two_opt::first_improving,
];

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    /// A full sweep found no improving feasible move.
    Converged,
    /// The accepted-move cap was reached.
    IterationLimit,
    /// The wall-clock budget ran out.
    TimeLimit,
}

/// Summary of one local search run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Number of accepted moves.
    pub iterations: usize,
    /// Cost of the solution handed to the search.
    pub initial_cost: SolutionCost,
    /// Cost of the solution left behind.
    pub final_cost: SolutionCost,
    /// Why the search stopped.
    pub stop_reason: StopReason,
    /// Objective before the first move and after every accepted move.
    /// Empty unless [`SearchConfig::record_history`] is set.
    pub cost_history: Vec<i64>,
}

/// Relocate / swap / 2-opt local search with a span-balancing penalty.
///
/// Each sweep scans Relocate, then Swap, then 2-opt. Within a neighborhood,
/// source routes, target routes and positions are visited in increasing
/// order. The first move that is feasible and strictly lowers the objective
/// is applied and the sweep restarts. Every intermediate solution is
/// feasible, so stopping on a budget always leaves a valid solution.
///
/// # Examples
///
/// ```
/// use u_fleet::constructive::nearest_neighbor;
/// use u_fleet::distance::DistanceMatrix;
/// use u_fleet::local_search::{LocalSearch, SearchConfig, StopReason};
/// use u_fleet::models::RoutingProblem;
///
/// let dm = DistanceMatrix::from_points_scaled(
///     &[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0), (9.0, 0.0), (2.0, 0.0), (8.0, 0.0)],
///     1.0,
/// ).unwrap();
/// let problem = RoutingProblem::from_parts(dm, &[0, 1], &[4, 4], 100).unwrap();
///
/// let mut solution = nearest_neighbor(&problem);
/// let outcome = LocalSearch::new(SearchConfig::default()).improve(&problem, &mut solution);
/// assert_eq!(outcome.stop_reason, StopReason::Converged);
/// assert!(outcome.final_cost.objective <= outcome.initial_cost.objective);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalSearch {
    config: SearchConfig,
}

impl LocalSearch {
    /// Creates a search with the given configuration.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Improves `solution` in place until no improving move remains or the
    /// budget runs out. Budgets are checked before each sweep.
    #[instrument(skip_all, level = "debug")]
    pub fn improve(&self, problem: &RoutingProblem, solution: &mut Solution) -> SearchOutcome {
        let start = Instant::now();
        let time_limit = self.config.time_limit_ms.map(Duration::from_millis);
        let coefficient = self.config.span_cost_coefficient;

        let initial_cost = SolutionCost::of(solution, coefficient);
        let mut cost_history = Vec::new();
        if self.config.record_history {
            cost_history.push(initial_cost.objective);
        }

        let mut iterations = 0usize;
        let stop_reason = loop {
            if self.config.max_iterations.is_some_and(|max| iterations >= max) {
                break StopReason::IterationLimit;
            }
            if time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                break StopReason::TimeLimit;
            }

            let found = {
                let ctx = SweepContext::new(problem, solution, coefficient);
                self.find_move(&ctx)
            };
            let Some(candidate) = found else {
                break StopReason::Converged;
            };

            candidate.mv.apply(problem, solution);
            iterations += 1;
            debug_assert_eq!(
                SolutionCost::of(solution, coefficient).objective,
                candidate.objective
            );
            debug!(
                iteration = iterations,
                operator = candidate.mv.operator_name(),
                objective = candidate.objective,
                "Accepted move"
            );
            if self.config.record_history {
                cost_history.push(candidate.objective);
            }
        };

        let final_cost = SolutionCost::of(solution, coefficient);
        info!(
            iterations,
            initial = initial_cost.objective,
            best = final_cost.objective,
            ?stop_reason,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Local search finished"
        );

        SearchOutcome {
            iterations,
            initial_cost,
            final_cost,
            stop_reason,
            cost_history,
        }
    }

    /// First improving move of the sweep, trying neighborhoods in priority
    /// order.
    fn find_move(&self, ctx: &SweepContext<'_>) -> Option<Candidate> {
        OPERATORS.iter().find_map(|op| self.scan(ctx, *op))
    }

    #[cfg(feature = "parallel")]
    fn scan(&self, ctx: &SweepContext<'_>, op: Operator) -> Option<Candidate> {
        if self.config.parallel {
            // `find_map_first` keeps the lowest source route, same as the
            // sequential scan.
            (0..ctx.num_routes())
                .into_par_iter()
                .find_map_first(|route| op(ctx, route))
        } else {
            (0..ctx.num_routes()).find_map(|route| op(ctx, route))
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn scan(&self, ctx: &SweepContext<'_>, op: Operator) -> Option<Candidate> {
        (0..ctx.num_routes()).find_map(|route| op(ctx, route))
    }
}
