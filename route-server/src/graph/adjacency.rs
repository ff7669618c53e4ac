//! Weighted directed adjacency structure.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::NodeId;

use super::GraphError;

/// Adjacency as it arrives from an untrusted source: weights may be absent.
pub type RawAdjacency = BTreeMap<NodeId, BTreeMap<NodeId, Option<f64>>>;

/// An immutable-after-construction weighted directed graph.
///
/// Every weight is finite and nonnegative by construction. Nodes and their
/// neighbours iterate in `NodeId` order, so any search that walks the graph
/// is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawAdjacency")]
pub struct Graph {
    adjacency: BTreeMap<NodeId, BTreeMap<NodeId, f64>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, to, weight)` triples.
    pub fn from_edges<I, S>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: Into<String>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.add_edge(NodeId::new(from), NodeId::new(to), weight)?;
        }
        Ok(graph)
    }

    /// Ensure a node exists, possibly with no outgoing edges.
    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Add or replace the edge `from -> to`.
    ///
    /// Both endpoints become graph keys. Self-loops are dropped since no path
    /// search can use them.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) -> Result<(), GraphError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(GraphError::InvalidWeight { from, to, weight });
        }
        if from == to {
            self.add_node(from);
            return Ok(());
        }
        self.add_node(to.clone());
        self.adjacency.entry(from).or_default().insert(to, weight);
        Ok(())
    }

    /// Outgoing edges of `node`. Empty if the node is absent.
    pub fn neighbors<'a>(&'a self, node: &NodeId) -> impl Iterator<Item = (&'a NodeId, f64)> + 'a {
        self.adjacency
            .get(node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(to, w)| (to, *w)))
    }

    /// Weight of the edge `from -> to`, if present.
    pub fn edge_weight(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// Sum of edge weights along `path`.
    ///
    /// Returns `None` if any consecutive pair has no edge. Empty and
    /// single-node paths cost zero.
    pub fn path_cost(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(&pair[0], &pair[1]))
            .sum()
    }

    /// Whether `id` is a node of the graph.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// All node ids in order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.adjacency.keys()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }
}

impl TryFrom<RawAdjacency> for Graph {
    type Error = GraphError;

    fn try_from(raw: RawAdjacency) -> Result<Self, Self::Error> {
        let mut graph = Graph::new();
        for (from, edges) in raw {
            graph.add_node(from.clone());
            for (to, weight) in edges {
                let weight = weight.ok_or_else(|| GraphError::MissingWeight {
                    from: from.clone(),
                    to: to.clone(),
                })?;
                graph.add_edge(from.clone(), to, weight)?;
            }
        }
        Ok(graph)
    }
}
