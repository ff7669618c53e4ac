//! A* best-first search.
//!
//! Uses great-circle distance to the goal as the heuristic. In `Distance`
//! mode that never overestimates a road distance, so the returned cost is
//! optimal. In `Duration` mode the estimate is distance divided by the
//! caller's speed, which is admissible only if no edge is travelled faster.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::time::Instant;

use tracing::{debug, trace};

use crate::domain::{NodeId, WeightMode};
use crate::graph::{Graph, Positions};

use super::heuristic::Heuristic;
use super::result::elapsed_ms;
use super::{SearchError, SearchResult};

/// Frontier entry ordered so `BinaryHeap` pops the lowest `f` first.
///
/// Equal `f` values pop in ascending `NodeId` order, which keeps results
/// reproducible.
#[derive(Debug)]
struct FrontierEntry {
    f: f64,
    g: f64,
    node: NodeId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Find a least-cost path from `start` to `goal`.
///
/// Fails with `NotFound` before searching if `start` or `goal` has no
/// position, or during the search if a reached node has none. An
/// unreachable goal yields `found == false` with `expanded` equal to the
/// size of the start node's reachable component.
pub fn astar(
    graph: &Graph,
    positions: &Positions,
    start: &NodeId,
    goal: &NodeId,
    mode: WeightMode,
    speed_mps: f64,
) -> Result<SearchResult, SearchError> {
    let timer = Instant::now();
    let heuristic = Heuristic::new(positions, start, goal, mode, speed_mps)?;

    let mut frontier = BinaryHeap::new();
    let mut best_cost: HashMap<NodeId, f64> = HashMap::new();
    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut closed: HashSet<NodeId> = HashSet::new();
    let mut expanded = 0;
    let mut goal_cost = None;

    best_cost.insert(start.clone(), 0.0);
    frontier.push(FrontierEntry {
        f: heuristic.estimate(start)?,
        g: 0.0,
        node: start.clone(),
    });

    while let Some(FrontierEntry { g, node, .. }) = frontier.pop() {
        // Stale duplicate of an already finalised node
        if !closed.insert(node.clone()) {
            continue;
        }
        expanded += 1;
        trace!(node = %node, g, "expanded");

        if node == *goal {
            goal_cost = Some(g);
            break;
        }

        for (next, weight) in graph.neighbors(&node) {
            if closed.contains(next) {
                continue;
            }
            let tentative = g + weight;
            let known = best_cost.get(next).copied().unwrap_or(f64::INFINITY);
            if tentative < known {
                best_cost.insert(next.clone(), tentative);
                came_from.insert(next.clone(), node.clone());
                frontier.push(FrontierEntry {
                    f: tentative + heuristic.estimate(next)?,
                    g: tentative,
                    node: next.clone(),
                });
            }
        }
    }

    let runtime_ms = elapsed_ms(timer);

    let result = match goal_cost {
        Some(cost) => {
            let path = reconstruct_path(&came_from, start, goal);
            SearchResult::found(start.clone(), goal.clone(), path, cost, expanded, runtime_ms)
        }
        None => SearchResult::unreachable(start.clone(), goal.clone(), expanded, runtime_ms),
    };

    debug!(
        start = %start,
        goal = %goal,
        found = result.found,
        expanded,
        runtime_ms,
        "a* search finished"
    );
    Ok(result)
}

/// Follow predecessors from `goal` back to `start`.
fn reconstruct_path(
    came_from: &HashMap<NodeId, NodeId>,
    start: &NodeId,
    goal: &NodeId,
) -> Vec<NodeId> {
    let mut path = vec![goal.clone()];
    let mut current = goal;
    while current != start {
        match came_from.get(current) {
            Some(prev) => {
                path.push(prev.clone());
                current = prev;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
