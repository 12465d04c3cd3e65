//! Relocate operator: move one stop to another position, in the same route
//! or in a different one.
//!
//! # Algorithm
//!
//! Removing stop `x` between `p` and `n` and reinserting it between `u` and
//! `w` changes route distances by
//!
//! ```text
//! removal   = d(p, n) - d(p, x) - d(x, n)
//! insertion = d(u, x) + d(x, w) - d(u, w)
//! ```
//!
//! Within a single route both terms apply to the same route, with the
//! insertion neighbors read from the route after removal.
//!
//! # Complexity
//!
//! O(n² × R) per source route, where n = stops per route and R = routes.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::models::Route;

use super::moves::LocalSearchMove;
use super::sweep::{Candidate, SweepContext};

/// Scans relocations out of `from_route` in sweep order (target route, then
/// source position, then target position) and returns the first improving
/// feasible one.
pub(crate) fn first_improving(ctx: &SweepContext<'_>, from_route: usize) -> Option<Candidate> {
    let source = ctx.route(from_route);
    if source.is_empty() {
        return None;
    }

    for to_route in 0..ctx.num_routes() {
        let target = ctx.route(to_route);
        let same = to_route == from_route;
        if !same && target.len() >= ctx.problem.vehicle(to_route).capacity() {
            continue;
        }

        for from_pos in 0..source.len() {
            let removed = removal_distance(ctx, source, from_pos);
            if !same && !ctx.fits(removed) {
                continue;
            }

            let found = if same {
                first_within(ctx, from_route, from_pos, removed)
            } else {
                first_between(ctx, from_route, from_pos, removed, to_route)
            };
            if found.is_some() {
                return found;
            }
        }
    }
    None
}

/// Distance of `route` once the stop at `pos` is taken out.
fn removal_distance(ctx: &SweepContext<'_>, route: &Route, pos: usize) -> i64 {
    let x = route.stops()[pos];
    let p = ctx.prev(route, pos);
    let n = ctx.next(route, pos);
    route.distance() + ctx.d(p, n) - ctx.d(p, x) - ctx.d(x, n)
}

fn first_between(
    ctx: &SweepContext<'_>,
    from_route: usize,
    from_pos: usize,
    removed: i64,
    to_route: usize,
) -> Option<Candidate> {
    let x = ctx.route(from_route).stops()[from_pos];
    let target = ctx.route(to_route);
    for to_pos in 0..=target.len() {
        let u = if to_pos == 0 {
            target.depot()
        } else {
            target.stops()[to_pos - 1]
        };
        let w = target.stops().get(to_pos).copied().unwrap_or(target.depot());
        let inserted = target.distance() + ctx.d(u, x) + ctx.d(x, w) - ctx.d(u, w);
        if !ctx.fits(inserted) {
            continue;
        }
        let objective = ctx.objective_with(from_route, removed, Some((to_route, inserted)));
        let mv = LocalSearchMove::Relocate {
            from_route,
            from_pos,
            to_route,
            to_pos,
        };
        if let Some(candidate) = ctx.improving(mv, objective) {
            return Some(candidate);
        }
    }
    None
}

fn first_within(
    ctx: &SweepContext<'_>,
    route_idx: usize,
    from_pos: usize,
    removed: i64,
) -> Option<Candidate> {
    let route = ctx.route(route_idx);
    let stops = route.stops();
    let x = stops[from_pos];
    let reduced_len = stops.len() - 1;
    // Position `k` of the route with `x` taken out.
    let reduced = |k: usize| if k < from_pos { stops[k] } else { stops[k + 1] };

    for to_pos in 0..=reduced_len {
        if to_pos == from_pos {
            continue;
        }
        let u = if to_pos == 0 {
            route.depot()
        } else {
            reduced(to_pos - 1)
        };
        let w = if to_pos == reduced_len {
            route.depot()
        } else {
            reduced(to_pos)
        };
        let moved = removed + ctx.d(u, x) + ctx.d(x, w) - ctx.d(u, w);
        if !ctx.fits(moved) {
            continue;
        }
        let objective = ctx.objective_with(route_idx, moved, None);
        let mv = LocalSearchMove::Relocate {
            from_route: route_idx,
            from_pos,
            to_route: route_idx,
            to_pos,
        };
        if let Some(candidate) = ctx.improving(mv, objective) {
            return Some(candidate);
        }
    }
    None
}
