//! Phase 3: layer assignment. Three strategies, all operating on the now
//! acyclic node/edge graph (self-loops and `FIRST`/`LAST` constraints
//! aside).
//!
//! `NETWORK_SIMPLEX` initializes with longest-path, then alternates
//! repairing any edge that still violates `layer(t) > layer(s)` with a
//! move of every node to its "ideal" layer when that move stays feasible
//! against both its predecessors and successors, for up to 50 rounds or
//! until a round changes nothing — not a full simplex solve over the
//! tight spanning tree, but the same local-improvement shape.
//!
//! `COFFMAN_GRAHAM` is a distinct, named strategy that currently delegates
//! to longest-path; it is not silently merged into it, so a future width-
//! bounded implementation has a clear seam to land in (see `DESIGN.md`).

use super::internal::{Constraint, LGraph, NodeIdx};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayeringStrategy {
    LongestPath,
    NetworkSimplex,
    CoffmanGraham,
}

impl LayeringStrategy {
    pub fn from_str(s: &str) -> LayeringStrategy {
        match s.to_ascii_uppercase().as_str() {
            "NETWORK_SIMPLEX" => LayeringStrategy::NetworkSimplex,
            "COFFMAN_GRAHAM" => LayeringStrategy::CoffmanGraham,
            _ => LayeringStrategy::LongestPath,
        }
    }
}

pub fn assign_layers(graph: &mut LGraph, strategy: LayeringStrategy) {
    longest_path(graph);
    if strategy == LayeringStrategy::NetworkSimplex {
        network_simplex(graph);
    }
    apply_constraints(graph);
    normalize_layers(graph);
}

fn topological_order(graph: &LGraph) -> Vec<NodeIdx> {
    let n = graph.nodes.len();
    let mut indegree = vec![0usize; n];
    for edge in &graph.edges {
        if edge.self_loop {
            continue;
        }
        indegree[edge.target.idx()] += 1;
    }
    let mut queue: std::collections::VecDeque<NodeIdx> = (0..n)
        .filter(|&i| indegree[i] == 0)
        .map(NodeIdx::from_usize)
        .collect();
    let mut order = Vec::with_capacity(n);
    while let Some(u) = queue.pop_front() {
        order.push(u);
        for v in graph.node(u).successors(&graph.edges) {
            indegree[v.idx()] -= 1;
            if indegree[v.idx()] == 0 {
                queue.push_back(v);
            }
        }
    }
    // Any node not reached (shouldn't happen once cycles are broken, but a
    // residual self-loop-only node never enters the queue above its own
    // in-degree bookkeeping) is appended in index order.
    if order.len() < n {
        for i in 0..n {
            let idx = NodeIdx::from_usize(i);
            if !order.contains(&idx) {
                order.push(idx);
            }
        }
    }
    order
}

/// Height-from-sink: each node's layer is the longest path to any sink
/// reachable from it, computed in reverse topological order so every
/// successor's height is already known, then inverted so layer 0 sits at
/// the sources rather than the sinks. A node with several paths to a
/// shared descendant of different lengths is pushed down to the layer its
/// longest path demands, not just its shortest.
fn longest_path(graph: &mut LGraph) {
    let order = topological_order(graph);
    let mut height = vec![0i64; graph.nodes.len()];
    for &u in order.iter().rev() {
        let successors: Vec<NodeIdx> = graph.node(u).successors(&graph.edges).collect();
        height[u.idx()] = successors.iter().map(|&v| 1 + height[v.idx()]).max().unwrap_or(0);
    }
    let max_height = height.iter().copied().max().unwrap_or(0);
    for (i, node) in graph.nodes.iter_mut().enumerate() {
        node.layer = max_height - height[i];
    }
}

const NETWORK_SIMPLEX_MAX_ROUNDS: usize = 50;

fn network_simplex(graph: &mut LGraph) {
    for _round in 0..NETWORK_SIMPLEX_MAX_ROUNDS {
        let mut changed = false;

        for i in 0..graph.edges.len() {
            let e = super::internal::EdgeIdx::from_usize(i);
            if graph.edge(e).self_loop {
                continue;
            }
            let (s, t) = (graph.edge(e).source, graph.edge(e).target);
            if graph.node(t).layer <= graph.node(s).layer {
                graph.node_mut(t).layer = graph.node(s).layer + 1;
                changed = true;
            }
        }

        for i in 0..graph.nodes.len() {
            let u = NodeIdx::from_usize(i);
            let successors: Vec<NodeIdx> = graph.node(u).successors(&graph.edges).collect();
            let predecessors: Vec<NodeIdx> = graph.node(u).predecessors(&graph.edges).collect();

            let ideal = if !successors.is_empty() {
                successors.iter().map(|&v| graph.node(v).layer).min().unwrap() - 1
            } else if !predecessors.is_empty() {
                predecessors.iter().map(|&v| graph.node(v).layer).max().unwrap() + 1
            } else {
                continue;
            };

            if ideal == graph.node(u).layer {
                continue;
            }
            let feasible = predecessors.iter().all(|&v| graph.node(v).layer < ideal)
                && successors.iter().all(|&v| graph.node(v).layer > ideal);
            if feasible {
                graph.node_mut(u).layer = ideal;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }
}

fn apply_constraints(graph: &mut LGraph) {
    if graph.nodes.iter().all(|n| n.constraint.is_none()) {
        return;
    }
    let min_layer = graph.min_layer();
    for node in &mut graph.nodes {
        if node.constraint == Some(Constraint::First) {
            node.layer = min_layer;
        }
    }
    let max_layer = graph
        .nodes
        .iter()
        .filter(|n| n.constraint != Some(Constraint::Last))
        .map(|n| n.layer)
        .max()
        .unwrap_or(min_layer);
    for node in &mut graph.nodes {
        if node.constraint == Some(Constraint::Last) {
            node.layer = max_layer + 1;
        }
    }
}

/// Compact the set of distinct layer values used to a dense `0..n` range.
fn normalize_layers(graph: &mut LGraph) {
    let mut distinct: Vec<i64> = graph.nodes.iter().map(|n| n.layer).collect();
    distinct.sort_unstable();
    distinct.dedup();
    for node in &mut graph.nodes {
        node.layer = distinct.binary_search(&node.layer).unwrap() as i64;
    }
}
