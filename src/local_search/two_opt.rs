//! Intra-route 2-opt edge reversal.
//!
//! # Algorithm
//!
//! Reversing stops `i..=j` of a route replaces edges `(p, s[i])` and
//! `(s[j], n)` with `(p, s[j])` and `(s[i], n)`, where `p` and `n` are the
//! nodes just outside the segment (the depot at either end):
//!
//! ```text
//! delta = d(p, s[j]) + d(s[i], n) - d(p, s[i]) - d(s[j], n)
//! ```
//!
//! Distances are symmetric, so the reversed interior costs the same.
//!
//! # Complexity
//!
//! O(n²) per route.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::moves::LocalSearchMove;
use super::sweep::{Candidate, SweepContext};

/// Returns the first improving feasible reversal inside `route`.
pub(crate) fn first_improving(ctx: &SweepContext<'_>, route: usize) -> Option<Candidate> {
    let r = ctx.route(route);
    let stops = r.stops();
    if stops.len() < 2 {
        return None;
    }

    for start in 0..stops.len() - 1 {
        let p = ctx.prev(r, start);
        let first = stops[start];
        for end in (start + 1)..stops.len() {
            let last = stops[end];
            let n = ctx.next(r, end);
            let distance =
                r.distance() - ctx.d(p, first) - ctx.d(last, n) + ctx.d(p, last) + ctx.d(first, n);
            if !ctx.fits(distance) {
                continue;
            }
            let objective = ctx.objective_with(route, distance, None);
            let mv = LocalSearchMove::TwoOpt { route, start, end };
            if let Some(candidate) = ctx.improving(mv, objective) {
                return Some(candidate);
            }
        }
    }
    None
}
