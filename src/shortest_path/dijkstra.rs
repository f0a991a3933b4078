use crate::graph::{Graph, Hop, NodeIdx};

use super::min_heap::MinHeap;
use super::{Checkpoint, PathResult, PathTable};

/// Computes the shortest path from `source` to every node of the graph.
///
/// Every path remembers its intermediate nodes as checkpoints, so the caller can replay it
/// edge by edge. The checkpoints of a node are the checkpoints of its predecessor, plus the
/// predecessor itself unless the predecessor is the source.
pub fn dijkstra(graph: &Graph, source: NodeIdx) -> PathTable {
    let mut table: PathTable = vec![None; graph.num_nodes()];
    let mut visited = vec![false; graph.num_nodes()];
    table[source.0 as usize] = Some(PathResult::trivial(source));

    let mut queue = MinHeap::new();
    queue.insert(Hop {
        to: source,
        distance: 0,
    });

    while let Some(Hop {
        to: current,
        distance: _,
    }) = queue.extract_min()
    {
        if visited[current.0 as usize] {
            continue;
        }
        visited[current.0 as usize] = true;

        let Some(current_path) = table[current.0 as usize].as_ref() else {
            continue;
        };
        let current_distance = current_path.distance;
        let checkpoints = if current == source {
            Vec::new()
        } else {
            let mut checkpoints = current_path.checkpoints.clone();
            checkpoints.push(Checkpoint {
                node: current,
                offset: current_distance,
                hop: current_path.last_hop,
            });
            checkpoints
        };

        for hop in graph.hops(current) {
            let distance = current_distance + hop.distance;
            let next = &mut table[hop.to.0 as usize];
            if next.as_ref().is_some_and(|known| known.distance <= distance) {
                continue;
            }
            *next = Some(PathResult {
                from: source,
                to: hop.to,
                distance,
                last_hop: hop.distance,
                checkpoints: checkpoints.clone(),
            });
            queue.insert(Hop {
                to: hop.to,
                distance,
            });
        }
    }

    table
}
