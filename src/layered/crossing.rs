//! Phase 5: crossing reduction. One forward sweep (layers `1..L-1`,
//! ordering each layer by the barycenter of its predecessors' positions)
//! followed by one backward sweep (layers `L-2..0`, ordering by the
//! barycenter of successors' positions). Nodes with no neighbor in the
//! reference layer sort to the end.

use super::internal::{LGraph, NodeIdx};
use std::collections::HashMap;

pub fn reduce_crossings(graph: &mut LGraph) {
    let max_layer = graph.max_layer();
    if max_layer <= 0 {
        assign_positions(graph);
        return;
    }
    let mut layers = layer_buckets(graph, max_layer);

    // Forward: layers 1..L-1, barycenter of predecessors (reference layer - 1).
    for l in 1..max_layer as usize {
        sweep_layer(graph, &mut layers, l, -1);
    }
    // Backward: layers L-2..0, barycenter of successors (reference layer + 1).
    for l in (0..max_layer as usize).rev() {
        sweep_layer(graph, &mut layers, l, 1);
    }

    for (layer, nodes) in layers.iter().enumerate() {
        for (position, &node) in nodes.iter().enumerate() {
            graph.node_mut(node).layer = layer as i64;
            graph.node_mut(node).position = position;
        }
    }
}

fn layer_buckets(graph: &LGraph, max_layer: i64) -> Vec<Vec<NodeIdx>> {
    let mut layers = vec![Vec::new(); max_layer as usize + 1];
    let mut indices: Vec<NodeIdx> = (0..graph.nodes.len()).map(NodeIdx::from_usize).collect();
    indices.sort_by_key(|&i| graph.node(i).position);
    for idx in indices {
        layers[graph.node(idx).layer as usize].push(idx);
    }
    layers
}

/// Reorder `layers[layer]` by barycenter of neighbors in `layer + direction`.
fn sweep_layer(graph: &LGraph, layers: &mut [Vec<NodeIdx>], layer: usize, direction: i64) {
    let neighbor_layer = layer as i64 + direction;
    if neighbor_layer < 0 || neighbor_layer as usize >= layers.len() {
        return;
    }
    let mut position_of: HashMap<NodeIdx, usize> = HashMap::new();
    for (pos, &n) in layers[neighbor_layer as usize].iter().enumerate() {
        position_of.insert(n, pos);
    }

    let mut keyed: Vec<(f64, usize, NodeIdx)> = layers[layer]
        .iter()
        .enumerate()
        .map(|(fallback_pos, &node)| {
            let neighbors: Vec<usize> = graph
                .segments
                .iter()
                .filter_map(|seg| {
                    if direction < 0 && seg.to == node {
                        position_of.get(&seg.from).copied()
                    } else if direction > 0 && seg.from == node {
                        position_of.get(&seg.to).copied()
                    } else {
                        None
                    }
                })
                .collect();
            let key = if neighbors.is_empty() {
                f64::INFINITY
            } else {
                neighbors.iter().sum::<usize>() as f64 / neighbors.len() as f64
            };
            (key, fallback_pos, node)
        })
        .collect();

    keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    layers[layer] = keyed.into_iter().map(|(_, _, n)| n).collect();
}

fn assign_positions(graph: &mut LGraph) {
    for (position, node) in graph.nodes.iter_mut().enumerate() {
        node.position = position;
    }
}
