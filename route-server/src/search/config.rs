//! Search configuration for the route engine.

use crate::domain::WeightMode;

use super::SearchError;

/// Lower bound applied to the speed divisor of the duration heuristic.
pub const SPEED_EPSILON: f64 = 1e-6;

/// Upper bound on hill-climbing walks per search.
pub const MAX_RESTARTS: usize = 1_000;

/// Upper bound on moves per hill-climbing walk.
pub const MAX_STEPS: usize = 100_000;

/// Configuration parameters for route search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// What edge weights measure.
    pub mode: WeightMode,

    /// Speed (m/s) converting great-circle distance into a time estimate
    /// in `Duration` mode.
    ///
    /// The duration heuristic is only admissible if no edge is travelled
    /// faster than this. The engine cannot verify that; callers must pick a
    /// speed at least as fast as the fastest plausible edge.
    pub speed_mps: f64,

    /// Maximum moves per hill-climbing walk.
    pub max_steps: usize,

    /// Number of independent hill-climbing walks.
    pub restarts: usize,

    /// Non-improving moves tolerated in a row before a walk stops.
    pub allow_sideways: usize,

    /// Relative noise applied to neighbour scores on every restart after
    /// the first. Zero makes every restart identical.
    pub restart_jitter: f64,

    /// Seed for restart noise. `None` draws a fresh seed per search.
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        mode: WeightMode,
        speed_mps: f64,
        max_steps: usize,
        restarts: usize,
        allow_sideways: usize,
    ) -> Self {
        Self {
            mode,
            speed_mps,
            max_steps,
            restarts,
            allow_sideways,
            ..Self::default()
        }
    }

    /// Fix the restart noise seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the restart noise level.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.restart_jitter = jitter;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.speed_mps.is_finite() || self.speed_mps <= 0.0 {
            return Err(SearchError::InvalidRequest(
                "speed must be a positive number".to_string(),
            ));
        }

        if self.max_steps == 0 || self.max_steps > MAX_STEPS {
            return Err(SearchError::InvalidRequest(format!(
                "max_steps must be between 1 and {MAX_STEPS}"
            )));
        }

        if self.restarts == 0 || self.restarts > MAX_RESTARTS {
            return Err(SearchError::InvalidRequest(format!(
                "restarts must be between 1 and {MAX_RESTARTS}"
            )));
        }

        if !self.restart_jitter.is_finite() || self.restart_jitter < 0.0 {
            return Err(SearchError::InvalidRequest(
                "restart jitter must be a nonnegative number".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: WeightMode::Distance,
            speed_mps: 10.0,
            max_steps: 200,
            restarts: 5,
            allow_sideways: 3,
            restart_jitter: 0.25,
            seed: None,
        }
    }
}
