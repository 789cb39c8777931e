//! Phase 4: dummy node insertion. Every non-self-loop edge spanning more
//! than one layer gets a chain of dummy nodes, one per layer it passes
//! through, so crossing reduction and coordinate assignment only ever
//! have to reason about adjacent layers. [`Segment`](super::internal::Segment)
//! records each adjacent-layer hop (real-to-dummy, dummy-to-dummy, or
//! dummy-to-real) against the original edge it belongs to.

use super::internal::{EdgeIdx, LGraph, LNode, NodeIdx, Segment};

pub fn insert_dummies(graph: &mut LGraph) {
    let edge_indices: Vec<EdgeIdx> = (0..graph.edges.len()).map(EdgeIdx::from_usize).collect();
    let mut segments = Vec::new();

    for e in edge_indices {
        if graph.edge(e).self_loop {
            continue;
        }
        let source = graph.edge(e).source;
        let target = graph.edge(e).target;
        let source_layer = graph.node(source).layer;
        let target_layer = graph.node(target).layer;
        let span = target_layer - source_layer;

        if span.abs() <= 1 {
            segments.push(Segment { from: source, to: target, orig_edge: e });
            continue;
        }

        let step = if span > 0 { 1 } else { -1 };
        let mut chain = Vec::new();
        let mut layer = source_layer + step;
        loop {
            let idx = NodeIdx::from_usize(graph.nodes.len());
            graph.nodes.push(LNode {
                id: format!("$dummy_{}_{}", graph.edge(e).id, chain.len()),
                width: 1.0,
                height: 1.0,
                is_dummy: true,
                layer,
                position: 0,
                x: 0.0,
                y: 0.0,
                incoming: Vec::new(),
                outgoing: Vec::new(),
                ports: Vec::new(),
                constraint: None,
                orig_child_index: None,
            });
            chain.push(idx);
            if layer == target_layer {
                break;
            }
            layer += step;
        }

        let mut prev = source;
        for &dummy in &chain {
            segments.push(Segment { from: prev, to: dummy, orig_edge: e });
            prev = dummy;
        }
        segments.push(Segment { from: prev, to: target, orig_edge: e });

        graph.edge_mut(e).dummies = chain;
    }

    graph.segments = segments;
}

/// Every dummy node shares a layer-constraint ancestry of `None`, so
/// constraint checking never needs to worry about them; kept as a named
/// helper in case a later pass wants to assert the invariant.
#[allow(dead_code)]
fn dummies_are_unconstrained(graph: &LGraph) -> bool {
    graph
        .nodes
        .iter()
        .filter(|n| n.is_dummy)
        .all(|n| n.constraint.is_none())
}
