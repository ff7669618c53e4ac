//! Route search engine.
//!
//! Two interchangeable strategies over a [`Graph`](crate::graph::Graph) and
//! its [`Positions`](crate::graph::Positions):
//!
//! - [`astar`]: optimal best-first search guided by great-circle distance.
//! - [`hill_climbing`]: fast greedy local search with randomised restarts.
//!
//! [`compare`] runs one or both and produces a benchmark table. The engine
//! is synchronous, holds no state between calls and never mutates its
//! inputs.

mod aggregate;
mod astar;
mod config;
mod error;
mod heuristic;
mod hill_climbing;
mod result;

#[cfg(test)]
mod search_tests;

pub use aggregate::{Algorithm, AlgorithmChoice, BenchEntry, Comparison, RouteQuery, compare};
pub use astar::astar;
pub use config::{MAX_RESTARTS, MAX_STEPS, SPEED_EPSILON, SearchConfig};
pub use error::SearchError;
pub use hill_climbing::hill_climbing;
pub use result::{Attempt, SearchResult};
