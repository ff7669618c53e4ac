//! Hill climbing with restarts.
//!
//! Each walk greedily moves to the neighbour minimising
//! `weight + h(neighbour)`. A move is improving when that score is strictly
//! below `h(current)`; non-improving (sideways) moves are tolerated only up to
//! `allow_sideways` in a row. The first restart is the plain greedy walk;
//! later restarts perturb neighbour scores with seeded noise so they can
//! settle in different local optima. No result is guaranteed optimal.

use std::collections::HashSet;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::domain::NodeId;
use crate::graph::{Graph, Positions};

use super::heuristic::Heuristic;
use super::result::elapsed_ms;
use super::{Attempt, SearchConfig, SearchError, SearchResult};

/// Margin a move must beat `h(current)` by to count as improving.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Bounds of a single walk.
struct WalkLimits {
    max_steps: usize,
    allow_sideways: usize,
    jitter: f64,
}

/// Run `config.restarts` greedy walks from `start` toward `goal`.
///
/// The result carries one `Attempt` per restart; its path and cost are those
/// of the cheapest walk that reached the goal. `expanded` counts moves taken
/// across all walks.
pub fn hill_climbing(
    graph: &Graph,
    positions: &Positions,
    start: &NodeId,
    goal: &NodeId,
    config: &SearchConfig,
) -> Result<SearchResult, SearchError> {
    config.validate()?;
    let timer = Instant::now();
    let heuristic = Heuristic::new(positions, start, goal, config.mode, config.speed_mps)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut attempts = Vec::new();
    let mut expanded = 0;

    for restart in 0..config.restarts {
        let limits = WalkLimits {
            max_steps: config.max_steps,
            allow_sideways: config.allow_sideways,
            jitter: if restart == 0 { 0.0 } else { config.restart_jitter },
        };
        let path = greedy_walk(graph, &heuristic, start, goal, &limits, &mut rng)?;
        let cost = graph.path_cost(&path);
        let reached_goal = path.last() == Some(goal);
        expanded += path.len().saturating_sub(1);

        trace!(restart, steps = path.len() - 1, reached_goal, ?cost, "walk finished");
        attempts.push(Attempt {
            restart,
            path,
            cost,
            reached_goal,
        });
    }

    let best = attempts
        .iter()
        .filter(|a| a.reached_goal)
        .filter_map(|a| a.cost.map(|c| (c, a)))
        .min_by(|(ca, a), (cb, b)| ca.total_cmp(cb).then_with(|| a.restart.cmp(&b.restart)));

    let runtime_ms = elapsed_ms(timer);
    let result = match best {
        Some((cost, attempt)) => SearchResult::found(
            start.clone(),
            goal.clone(),
            attempt.path.clone(),
            cost,
            expanded,
            runtime_ms,
        ),
        None => SearchResult::unreachable(start.clone(), goal.clone(), expanded, runtime_ms),
    };

    debug!(
        start = %start,
        goal = %goal,
        found = result.found,
        restarts = config.restarts,
        expanded,
        runtime_ms,
        "hill climbing finished"
    );
    Ok(result.with_attempts(attempts))
}

/// One greedy walk. Never revisits a node.
fn greedy_walk(
    graph: &Graph,
    heuristic: &Heuristic<'_>,
    start: &NodeId,
    goal: &NodeId,
    limits: &WalkLimits,
    rng: &mut StdRng,
) -> Result<Vec<NodeId>, SearchError> {
    let mut current = start.clone();
    let mut path = vec![current.clone()];
    let mut visited = HashSet::from([current.clone()]);
    let mut sideways = 0;

    for _ in 0..limits.max_steps {
        if current == *goal {
            break;
        }

        let h_current = heuristic.estimate(&current)?;

        // (noisy score, true score, node); neighbours arrive in id order so
        // a strict comparison keeps the smallest id on ties.
        let mut choice: Option<(f64, f64, &NodeId)> = None;
        for (next, weight) in graph.neighbors(&current) {
            let f = weight + heuristic.estimate(next)?;
            let score = if limits.jitter > 0.0 {
                f * (1.0 + rng.random_range(0.0..limits.jitter))
            } else {
                f
            };
            if choice.is_none_or(|(best, _, _)| score < best) {
                choice = Some((score, f, next));
            }
        }

        let Some((_, f, next)) = choice else {
            break; // dead end
        };
        if visited.contains(next) {
            break; // cycle guard
        }

        if f < h_current - IMPROVEMENT_EPSILON {
            sideways = 0;
        } else {
            if sideways >= limits.allow_sideways {
                break;
            }
            sideways += 1;
        }

        current = next.clone();
        visited.insert(current.clone());
        path.push(current.clone());
    }

    Ok(path)
}
