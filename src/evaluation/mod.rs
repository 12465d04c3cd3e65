//! Route feasibility checking and cost evaluation.

mod evaluator;

pub use evaluator::{objective, route_distance, RouteEvaluator, SolutionCost};
