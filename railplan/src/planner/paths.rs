//! Simple-path enumeration under a hop limit.
//!
//! Works purely on the graph's station topology; which trains actually run
//! each hop is the itinerary builder's problem. Enumeration is exhaustive:
//! every simple path of at most `max_hops` edges comes out, in breadth-first
//! order, and the same graph always yields the same sequence.

use std::collections::{HashSet, VecDeque};

use crate::domain::StationCode;
use crate::graph::StationPairGraph;

/// An ordered list of (board, alight) station pairs with matching endpoints.
pub type StationPath = Vec<(StationCode, StationCode)>;

/// BFS frontier entry: a partial path ending at `current`.
struct Frontier {
    current: StationCode,
    path: StationPath,
    visited: HashSet<StationCode>,
}

/// Enumerate every simple station path from `from` to `to` of at most
/// `max_hops` edges.
pub fn enumerate_paths(
    graph: &StationPairGraph,
    from: StationCode,
    to: StationCode,
    max_hops: usize,
) -> Vec<StationPath> {
    let mut found = Vec::new();
    if max_hops == 0 || from == to {
        return found;
    }

    let mut queue = VecDeque::new();
    queue.push_back(Frontier {
        current: from,
        path: Vec::new(),
        visited: HashSet::from([from]),
    });

    while let Some(state) = queue.pop_front() {
        for &neighbor in graph.neighbors(&state.current) {
            if neighbor == to {
                let mut path = state.path.clone();
                path.push((state.current, neighbor));
                found.push(path);
                continue;
            }
            if state.visited.contains(&neighbor) {
                continue;
            }
            // Growing the path by one more edge must leave room to still
            // reach the destination within the hop limit.
            if state.path.len() + 1 >= max_hops {
                continue;
            }

            let mut path = state.path.clone();
            path.push((state.current, neighbor));
            let mut visited = state.visited.clone();
            visited.insert(neighbor);
            queue.push_back(Frontier {
                current: neighbor,
                path,
                visited,
            });
        }
    }

    found
}
