//! Local search configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Span penalty used when none is configured.
pub const DEFAULT_SPAN_COST_COEFFICIENT: i64 = 100;

/// Configuration parameters for the local search improver.
///
/// Missing fields fall back to [`SearchConfig::default`] when deserializing.
///
/// # Examples
///
/// ```
/// use u_fleet::local_search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_span_cost_coefficient(50)
///     .with_time_limit_ms(2_000);
/// assert_eq!(config.span_cost_coefficient, 50);
/// assert_eq!(config.time_limit_ms, Some(2_000));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Weight of `max route distance − min route distance` in the objective.
    pub span_cost_coefficient: i64,
    /// Maximum number of accepted moves (None for no cap).
    pub max_iterations: Option<usize>,
    /// Wall-clock budget in milliseconds (None for no limit).
    pub time_limit_ms: Option<u64>,
    /// Evaluate source routes on the rayon pool. Requires the `parallel`
    /// feature; ignored otherwise. Results match the sequential sweep.
    pub parallel: bool,
    /// Record the objective after every accepted move.
    pub record_history: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            span_cost_coefficient: DEFAULT_SPAN_COST_COEFFICIENT,
            max_iterations: Some(100_000),
            time_limit_ms: None,
            parallel: false,
            record_history: false,
        }
    }
}

impl SearchConfig {
    /// Sets the span penalty coefficient.
    pub fn with_span_cost_coefficient(mut self, coefficient: i64) -> Self {
        self.span_cost_coefficient = coefficient;
        self
    }

    /// Sets the accepted-move cap.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    /// Removes the accepted-move cap.
    pub fn without_iteration_limit(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Enables or disables parallel candidate evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables the per-move cost history.
    pub fn with_record_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    /// Checks that the parameters describe a runnable search.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.span_cost_coefficient < 0 {
            return Err(ConfigurationError::InvalidSearchConfig(format!(
                "span_cost_coefficient must be non-negative, got {}",
                self.span_cost_coefficient
            )));
        }
        if self.max_iterations == Some(0) {
            return Err(ConfigurationError::InvalidSearchConfig(
                "max_iterations must be positive".into(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigurationError::InvalidSearchConfig(
                "time_limit_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}
