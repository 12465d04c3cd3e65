//! Domain model types for multi-depot vehicle routing.
//!
//! Vehicles with a home depot and a stop limit, routes as ordered stop
//! sequences, solutions holding one route per vehicle, and the validated
//! problem definition that ties them to a distance matrix.

mod problem;
mod route;
mod solution;
mod vehicle;

pub use problem::RoutingProblem;
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::Vehicle;
