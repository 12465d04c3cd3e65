//! Local search move representation.

use serde::Serialize;

use crate::evaluation::route_distance;
use crate::models::{RoutingProblem, Solution};

/// A move in one of the three neighborhoods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LocalSearchMove {
    /// Moves the stop at `from_pos` of `from_route` to `to_pos` of
    /// `to_route`. When both routes are the same, `to_pos` indexes the
    /// route with the stop already removed.
    Relocate {
        from_route: usize,
        from_pos: usize,
        to_route: usize,
        to_pos: usize,
    },
    /// Exchanges the stop at `pos_a` of `route_a` with the stop at `pos_b`
    /// of `route_b` (`route_a < route_b`).
    Swap {
        route_a: usize,
        pos_a: usize,
        route_b: usize,
        pos_b: usize,
    },
    /// Reverses the stops at positions `start..=end` of `route`.
    TwoOpt {
        route: usize,
        start: usize,
        end: usize,
    },
}

impl LocalSearchMove {
    /// Returns the name of the operator that produced this move.
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::Relocate { .. } => "Relocate",
            LocalSearchMove::Swap { .. } => "Swap",
            LocalSearchMove::TwoOpt { .. } => "Two-Opt",
        }
    }

    /// Routes changed by this move.
    pub fn updated_routes(&self) -> (usize, Option<usize>) {
        match *self {
            LocalSearchMove::Relocate {
                from_route,
                to_route,
                ..
            } if from_route != to_route => (from_route, Some(to_route)),
            LocalSearchMove::Relocate { from_route, .. } => (from_route, None),
            LocalSearchMove::Swap {
                route_a, route_b, ..
            } => (route_a, Some(route_b)),
            LocalSearchMove::TwoOpt { route, .. } => (route, None),
        }
    }

    /// Applies the move and refreshes the distances of the changed routes.
    pub fn apply(&self, problem: &RoutingProblem, solution: &mut Solution) {
        let routes = solution.routes_mut();
        match *self {
            LocalSearchMove::Relocate {
                from_route,
                from_pos,
                to_route,
                to_pos,
            } => {
                let stop = routes[from_route].stops_mut().remove(from_pos);
                routes[to_route].stops_mut().insert(to_pos, stop);
            }
            LocalSearchMove::Swap {
                route_a,
                pos_a,
                route_b,
                pos_b,
            } => {
                let a = routes[route_a].stops()[pos_a];
                let b = routes[route_b].stops()[pos_b];
                routes[route_a].stops_mut()[pos_a] = b;
                routes[route_b].stops_mut()[pos_b] = a;
            }
            LocalSearchMove::TwoOpt { route, start, end } => {
                routes[route].stops_mut()[start..=end].reverse();
            }
        }

        let (a, b) = self.updated_routes();
        for idx in std::iter::once(a).chain(b) {
            let route = &mut routes[idx];
            let distance = route_distance(problem, route.depot(), route.stops());
            route.set_distance(distance);
        }
    }
}
