//! Local search improvement for multi-depot routing solutions.
//!
//! Neighborhoods, in the order each sweep tries them:
//!
//! - Relocate: move one stop within its route or onto another route
//! - Swap: exchange two stops between routes
//! - 2-opt: reverse a segment inside one route
//!
//! [`LocalSearch`] drives the sweep under a [`SearchConfig`] budget.

mod config;
mod moves;
mod relocate;
mod search;
mod swap;
mod sweep;
mod two_opt;

pub use config::{SearchConfig, DEFAULT_SPAN_COST_COEFFICIENT};
pub use moves::LocalSearchMove;
pub use search::{LocalSearch, SearchOutcome, StopReason};
