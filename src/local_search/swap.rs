//! Inter-route swap operator.
//!
//! # Algorithm
//!
//! Exchanges stop `x` of route A with stop `y` of route B. With `p`/`n` the
//! neighbors of `x` and `u`/`w` the neighbors of `y`:
//!
//! ```text
//! A' = A - d(p, x) - d(x, n) + d(p, y) + d(y, n)
//! B' = B - d(u, y) - d(y, w) + d(u, x) + d(x, w)
//! ```
//!
//! Stop counts never change, so only the distance ceiling can reject a swap.
//!
//! # Complexity
//!
//! O(n² × R) per source route, where n = stops per route and R = routes.

use super::moves::LocalSearchMove;
use super::sweep::{Candidate, SweepContext};

/// Scans swaps between `route_a` and every later route and returns the
/// first improving feasible one.
pub(crate) fn first_improving(ctx: &SweepContext<'_>, route_a: usize) -> Option<Candidate> {
    let a = ctx.route(route_a);
    if a.is_empty() {
        return None;
    }

    for route_b in (route_a + 1)..ctx.num_routes() {
        let b = ctx.route(route_b);
        if b.is_empty() {
            continue;
        }

        for pos_a in 0..a.len() {
            let x = a.stops()[pos_a];
            let (p, n) = (ctx.prev(a, pos_a), ctx.next(a, pos_a));
            let a_without = a.distance() - ctx.d(p, x) - ctx.d(x, n);

            for pos_b in 0..b.len() {
                let y = b.stops()[pos_b];
                let (u, w) = (ctx.prev(b, pos_b), ctx.next(b, pos_b));

                let new_a = a_without + ctx.d(p, y) + ctx.d(y, n);
                let new_b = b.distance() - ctx.d(u, y) - ctx.d(y, w) + ctx.d(u, x) + ctx.d(x, w);
                if !ctx.fits(new_a) || !ctx.fits(new_b) {
                    continue;
                }

                let objective = ctx.objective_with(route_a, new_a, Some((route_b, new_b)));
                let mv = LocalSearchMove::Swap {
                    route_a,
                    pos_a,
                    route_b,
                    pos_b,
                };
                if let Some(candidate) = ctx.improving(mv, objective) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}
