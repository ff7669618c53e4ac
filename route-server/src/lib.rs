//! Bus route planner server.
//!
//! Finds a route between two points over the bus stations near each end,
//! using A* and hill-climbing search over a graph of pairwise travel costs.

pub mod cache;
pub mod config;
pub mod directions;
pub mod domain;
pub mod geo;
pub mod graph;
pub mod matrix;
pub mod search;
pub mod stations;
pub mod web;
