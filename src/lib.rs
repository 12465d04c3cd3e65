//! # u-fleet
//!
//! Multi-depot vehicle routing: every vehicle starts and ends at its own
//! depot, serves at most a fixed number of stops, and stays under a shared
//! route distance ceiling. Routes are built greedily and then improved by
//! local search on total distance plus a penalty on the gap between the
//! longest and shortest route.
//!
//! ## Modules
//!
//! - [`distance`] — Integer distance matrix
//! - [`models`] — Vehicles, routes, solutions and the validated problem
//! - [`evaluation`] — Route distance, constraint checks and solution cost
//! - [`constructive`] — Round-robin nearest-neighbor construction
//! - [`local_search`] — Relocate, swap and 2-opt improvement
//! - [`assembly`] — Final validation and [`RoutePlan`](assembly::RoutePlan) output
//! - [`optimizer`] — The full pipeline
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use u_fleet::distance::DistanceMatrix;
//! use u_fleet::models::RoutingProblem;
//!
//! // Two drivers living at nodes 0 and 1, four stops to serve.
//! let dm = DistanceMatrix::from_points(&[
//!     (0.0, 0.0), (10.0, 0.0),
//!     (1.0, 1.0), (2.0, -1.0), (9.0, 1.0), (8.0, -1.0),
//! ]).unwrap();
//! let problem = RoutingProblem::from_parts(dm, &[0, 1], &[2, 2], i64::MAX).unwrap();
//!
//! let plan = u_fleet::optimize(&problem).unwrap();
//! for route in &plan.routes {
//!     assert_eq!(route.first(), route.last());
//! }
//! ```

pub mod assembly;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod optimizer;

pub use error::{ConfigurationError, InfeasibleSolutionError, RoutingError};
pub use optimizer::{optimize, Optimizer};
