use crate::col::{map_new, HashMap};
use crate::error::ScheduleError;
use crate::graph::{Graph, NodeIdx};
use crate::primitives::Distance;

pub mod dijkstra;
pub mod min_heap;

/// An intermediate node of a shortest path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub node: NodeIdx,
    /// Distance from the source of the path to this node.
    pub offset: Distance,
    /// Length of the physical edge that ends in this node.
    pub hop: Distance,
}

/// A shortest path from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub from: NodeIdx,
    pub to: NodeIdx,
    pub distance: Distance,
    /// Length of the physical edge that ends in `to`. Zero for the trivial path.
    pub last_hop: Distance,
    pub checkpoints: Vec<Checkpoint>,
}

/// A single physical edge of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    pub from: NodeIdx,
    pub to: NodeIdx,
    pub distance: Distance,
}

impl PathResult {
    pub fn trivial(node: NodeIdx) -> Self {
        PathResult {
            from: node,
            to: node,
            distance: 0,
            last_hop: 0,
            checkpoints: Vec::new(),
        }
    }

    /// Decomposes the path into the physical edges it traverses, in order.
    pub fn legs(&self) -> Vec<Leg> {
        if self.distance == 0 {
            return Vec::new();
        }
        let mut legs = Vec::with_capacity(self.checkpoints.len() + 1);
        let mut from = self.from;
        for checkpoint in &self.checkpoints {
            legs.push(Leg {
                from,
                to: checkpoint.node,
                distance: checkpoint.hop,
            });
            from = checkpoint.node;
        }
        legs.push(Leg {
            from,
            to: self.to,
            distance: self.last_hop,
        });
        legs
    }
}

/// Shortest path from a fixed source to every node, `None` for unreachable nodes.
pub type PathTable = Vec<Option<PathResult>>;

/// Shortest paths on an immutable graph, computed lazily once per source.
pub struct ShortestPaths {
    graph: Graph,
    cache: HashMap<NodeIdx, PathTable>,
}

impl ShortestPaths {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            cache: map_new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn num_cached_sources(&self) -> usize {
        self.cache.len()
    }

    pub fn paths_from(&mut self, source: NodeIdx) -> &PathTable {
        let graph = &self.graph;
        self.cache
            .entry(source)
            .or_insert_with(|| dijkstra::dijkstra(graph, source))
    }

    pub fn destination(&mut self, from: NodeIdx, to: NodeIdx) -> Result<&PathResult, ScheduleError> {
        let graph = &self.graph;
        let table = self
            .cache
            .entry(from)
            .or_insert_with(|| dijkstra::dijkstra(graph, from));
        table[to.0 as usize]
            .as_ref()
            .ok_or_else(|| ScheduleError::NotFound {
                from: graph.label(from).to_string(),
                to: graph.label(to).to_string(),
            })
    }
}
