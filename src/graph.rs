use std::fmt::Debug;

use serde::Deserialize;

use crate::indexer::Indexer;
use crate::primitives::{Distance, Length};

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(pub u32);

impl Debug for NodeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("n#{}", self.0))
    }
}

/// An undirected edge as it comes from the outside world.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ExtEdge {
    #[serde(default)]
    pub name: Option<String>,
    pub from: String,
    pub to: String,
    pub distance: Length,
}

/// A directed half of an edge. Also used as priority queue entry, where `distance` is the
/// cumulative distance from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub to: NodeIdx,
    pub distance: Distance,
}

type NodeIndexer = Indexer<String, NodeIdx, fn(usize) -> NodeIdx>;

pub struct Graph {
    nodes: NodeIndexer,
    adjacency: Vec<Vec<Hop>>,
    num_edges: usize,
}

impl Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("num_nodes", &self.num_nodes())
            .field("num_edges", &self.num_edges)
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Indexer::new((|it: usize| NodeIdx(it as u32)) as fn(usize) -> NodeIdx),
            adjacency: Vec::new(),
            num_edges: 0,
        }
    }

    pub fn create(edges: &[ExtEdge]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(&edge.from, &edge.to, edge.distance);
        }
        graph
    }

    /// Interns `label`. Labels without any incident edge are isolated nodes.
    pub fn add_node(&mut self, label: &str) -> NodeIdx {
        if let Some(node_idx) = self.nodes.get(label) {
            return node_idx;
        }
        let node_idx = self.nodes.index(label.to_string());
        self.adjacency.push(Vec::new());
        node_idx
    }

    pub fn add_edge(&mut self, from: &str, to: &str, length: Length) {
        debug_assert!(length > 0, "edge distances must be positive");
        let distance = Distance::from(length);
        let from = self.add_node(from);
        let to = self.add_node(to);
        self.adjacency[from.0 as usize].push(Hop { to, distance });
        self.adjacency[to.0 as usize].push(Hop { to: from, distance });
        self.num_edges += 1;
    }

    pub fn node_idx(&self, label: &str) -> Option<NodeIdx> {
        self.nodes.get(label)
    }

    pub fn label(&self, node_idx: NodeIdx) -> &str {
        self.nodes.id(node_idx.0 as usize)
    }

    pub fn hops(&self, node_idx: NodeIdx) -> &[Hop] {
        &self.adjacency[node_idx.0 as usize]
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeIdx> {
        (0..self.num_nodes()).map(|it| NodeIdx(it as u32))
    }
}
