//! Shared state for one sweep over the move neighborhoods.

use crate::evaluation::objective;
use crate::models::{Route, RoutingProblem, Solution};

use super::moves::LocalSearchMove;

/// An improving, feasible move and the objective it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The move to apply.
    pub mv: LocalSearchMove,
    /// Solution objective after the move.
    pub objective: i64,
}

/// Read-only view of the current solution used to price candidate moves.
///
/// Route distances are indexed by ascending value so that the longest and
/// shortest route outside the one or two routes a move touches are found in
/// constant time.
pub(crate) struct SweepContext<'a> {
    pub problem: &'a RoutingProblem,
    pub solution: &'a Solution,
    pub objective: i64,
    coefficient: i64,
    total_distance: i64,
    by_distance: Vec<(i64, usize)>,
}

impl<'a> SweepContext<'a> {
    pub fn new(problem: &'a RoutingProblem, solution: &'a Solution, coefficient: i64) -> Self {
        let mut by_distance: Vec<(i64, usize)> = solution
            .routes()
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.distance(), idx))
            .collect();
        by_distance.sort_unstable();
        let total_distance = solution.total_distance();
        Self {
            problem,
            solution,
            objective: objective(total_distance, solution.span(), coefficient),
            coefficient,
            total_distance,
            by_distance,
        }
    }

    #[inline]
    pub fn route(&self, idx: usize) -> &'a Route {
        self.solution.route(idx)
    }

    #[inline]
    pub fn num_routes(&self) -> usize {
        self.solution.num_routes()
    }

    #[inline]
    pub fn d(&self, from: usize, to: usize) -> i64 {
        self.problem.distance(from, to)
    }

    #[inline]
    pub fn fits(&self, distance: i64) -> bool {
        distance <= self.problem.max_route_distance()
    }

    /// Objective after route `a` changes to `new_a` and, optionally, route
    /// `b` changes to `new_b`.
    pub fn objective_with(&self, a: usize, new_a: i64, b: Option<(usize, i64)>) -> i64 {
        let mut total = self.total_distance - self.route(a).distance() + new_a;
        let mut max = new_a;
        let mut min = new_a;
        if let Some((b, new_b)) = b {
            total += new_b - self.route(b).distance();
            max = max.max(new_b);
            min = min.min(new_b);
        }
        let b_idx = b.map(|(idx, _)| idx);
        let untouched = |&&(_, idx): &&(i64, usize)| idx != a && Some(idx) != b_idx;
        if let Some(&(d, _)) = self.by_distance.iter().rev().find(untouched) {
            max = max.max(d);
        }
        if let Some(&(d, _)) = self.by_distance.iter().find(untouched) {
            min = min.min(d);
        }
        objective(total, max - min, self.coefficient)
    }

    /// Wraps `mv` as a candidate if it strictly lowers the objective.
    pub fn improving(&self, mv: LocalSearchMove, objective: i64) -> Option<Candidate> {
        (objective < self.objective).then_some(Candidate { mv, objective })
    }

    /// Node before position `pos` of route `r` (the depot at the front).
    #[inline]
    pub fn prev(&self, r: &Route, pos: usize) -> usize {
        if pos == 0 {
            r.depot()
        } else {
            r.stops()[pos - 1]
        }
    }

    /// Node after position `pos` of route `r` (the depot past the end).
    #[inline]
    pub fn next(&self, r: &Route, pos: usize) -> usize {
        r.stops().get(pos + 1).copied().unwrap_or(r.depot())
    }
}
