//! Search output values.

use std::time::Instant;

use serde::Serialize;

use crate::domain::NodeId;

/// Outcome of one search strategy.
///
/// `cost` is present iff `found`, and then equals the sum of edge weights
/// along `path`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub start: NodeId,
    pub goal: NodeId,
    pub path: Vec<NodeId>,
    pub cost: Option<f64>,
    /// Nodes finalised (A*) or moves taken across all walks (hill climbing).
    pub expanded: usize,
    pub runtime_ms: f64,
    pub found: bool,
    /// Per-restart walks, hill climbing only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<Vec<Attempt>>,
}

impl SearchResult {
    /// A successful result.
    pub fn found(
        start: NodeId,
        goal: NodeId,
        path: Vec<NodeId>,
        cost: f64,
        expanded: usize,
        runtime_ms: f64,
    ) -> Self {
        Self {
            start,
            goal,
            path,
            cost: Some(cost),
            expanded,
            runtime_ms,
            found: true,
            attempts: None,
        }
    }

    /// A result for a goal that could not be reached.
    pub fn unreachable(start: NodeId, goal: NodeId, expanded: usize, runtime_ms: f64) -> Self {
        Self {
            start,
            goal,
            path: Vec::new(),
            cost: None,
            expanded,
            runtime_ms,
            found: false,
            attempts: None,
        }
    }

    /// Attach hill-climbing attempts.
    pub fn with_attempts(mut self, attempts: Vec<Attempt>) -> Self {
        self.attempts = Some(attempts);
        self
    }
}

/// One hill-climbing walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attempt {
    /// Zero-based restart index.
    pub restart: usize,
    /// Nodes visited by the walk, starting at the start node.
    pub path: Vec<NodeId>,
    /// Summed edge weights of the walk, absent if an edge is missing.
    pub cost: Option<f64>,
    /// Whether the walk ended at the goal.
    pub reached_goal: bool,
}

/// Milliseconds since `since`, rounded to microsecond precision.
pub(crate) fn elapsed_ms(since: Instant) -> f64 {
    (since.elapsed().as_secs_f64() * 1_000_000.0).round() / 1000.0
}
