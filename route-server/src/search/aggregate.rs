//! Runs one or both strategies and compares them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::NodeId;
use crate::graph::{Graph, Positions};

use super::{SearchConfig, SearchError, SearchResult, astar, hill_climbing};

/// A search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    AStar,
    HillClimbing,
}

impl Algorithm {
    /// Name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::AStar => "a_star",
            Algorithm::HillClimbing => "hill_climbing",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which strategies to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmChoice {
    #[default]
    AStar,
    HillClimbing,
    Both,
}

impl AlgorithmChoice {
    /// Strategies to run, in execution order.
    pub fn algorithms(&self) -> &'static [Algorithm] {
        match self {
            AlgorithmChoice::AStar => &[Algorithm::AStar],
            AlgorithmChoice::HillClimbing => &[Algorithm::HillClimbing],
            AlgorithmChoice::Both => &[Algorithm::HillClimbing, Algorithm::AStar],
        }
    }
}

impl FromStr for AlgorithmChoice {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a_star" | "astar" => Ok(AlgorithmChoice::AStar),
            "hill_climbing" => Ok(AlgorithmChoice::HillClimbing),
            "both" => Ok(AlgorithmChoice::Both),
            _ => Err(SearchError::InvalidRequest(
                "algorithm must be 'hill_climbing', 'a_star', or 'both'".to_string(),
            )),
        }
    }
}

/// The inputs shared by every strategy in a comparison.
#[derive(Debug, Clone, Copy)]
pub struct RouteQuery<'a> {
    pub graph: &'a Graph,
    pub positions: &'a Positions,
    pub start: &'a NodeId,
    pub goal: &'a NodeId,
}

/// Headline metrics of one strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchEntry {
    pub cost: Option<f64>,
    pub expanded: usize,
    pub runtime_ms: f64,
}

/// Results of every strategy that ran, plus the one chosen as primary.
#[derive(Debug, Clone)]
pub struct Comparison {
    results: BTreeMap<Algorithm, SearchResult>,
    primary: Algorithm,
}

impl Comparison {
    /// The strategy whose path feeds downstream consumers.
    pub fn primary(&self) -> Algorithm {
        self.primary
    }

    /// The primary strategy's result.
    pub fn primary_result(&self) -> &SearchResult {
        &self.results[&self.primary]
    }

    /// Result of a specific strategy, if it ran.
    pub fn get(&self, algorithm: Algorithm) -> Option<&SearchResult> {
        self.results.get(&algorithm)
    }

    /// All results in `Algorithm` order.
    pub fn results(&self) -> impl Iterator<Item = (Algorithm, &SearchResult)> {
        self.results.iter().map(|(a, r)| (*a, r))
    }

    /// Benchmark table: strategy -> cost, expansions, runtime.
    pub fn bench(&self) -> BTreeMap<Algorithm, BenchEntry> {
        self.results
            .iter()
            .map(|(algorithm, r)| {
                (
                    *algorithm,
                    BenchEntry {
                        cost: r.cost,
                        expanded: r.expanded,
                        runtime_ms: r.runtime_ms,
                    },
                )
            })
            .collect()
    }
}

/// Run the chosen strategies on `query`.
///
/// `primary` selects which result feeds path consumers; it defaults to the
/// single strategy that ran, or A* when both ran. Asking for a primary that
/// was not run is an invalid request.
pub fn compare(
    query: &RouteQuery<'_>,
    choice: AlgorithmChoice,
    config: &SearchConfig,
    primary: Option<Algorithm>,
) -> Result<Comparison, SearchError> {
    config.validate()?;

    let algorithms = choice.algorithms();
    let primary = match primary {
        Some(p) if algorithms.contains(&p) => p,
        Some(p) => {
            return Err(SearchError::InvalidRequest(format!(
                "primary algorithm {p} was not run"
            )));
        }
        None if algorithms.len() == 1 => algorithms[0],
        None => Algorithm::AStar,
    };

    let mut results = BTreeMap::new();
    for &algorithm in algorithms {
        let result = run_one(query, algorithm, config)?;
        info!(
            algorithm = %algorithm,
            found = result.found,
            cost = ?result.cost,
            unit = config.mode.unit(),
            expanded = result.expanded,
            runtime_ms = result.runtime_ms,
            "strategy finished"
        );
        results.insert(algorithm, result);
    }

    Ok(Comparison { results, primary })
}

fn run_one(
    query: &RouteQuery<'_>,
    algorithm: Algorithm,
    config: &SearchConfig,
) -> Result<SearchResult, SearchError> {
    match algorithm {
        Algorithm::AStar => astar(
            query.graph,
            query.positions,
            query.start,
            query.goal,
            config.mode,
            config.speed_mps,
        ),
        Algorithm::HillClimbing => hill_climbing(
            query.graph,
            query.positions,
            query.start,
            query.goal,
            config,
        ),
    }
}
