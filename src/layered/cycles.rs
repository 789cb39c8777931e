//! Phase 2: cycle breaking. A depth-first search over non-self-loop edges;
//! any edge discovered to close a back-reference to a node currently on
//! the DFS stack is reversed in place, the standard greedy cycle-removal
//! heuristic. Self-loops are left untouched — they are not cycles for
//! layering purposes, just edges routed later as loops.

use super::internal::{EdgeIdx, LGraph, NodeIdx};

pub fn break_cycles(graph: &mut LGraph) {
    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }
    let n = graph.nodes.len();
    let mut color = vec![Color::White; n];
    let mut to_reverse: Vec<EdgeIdx> = Vec::new();

    fn visit(
        graph: &LGraph,
        u: NodeIdx,
        color: &mut [Color],
        to_reverse: &mut Vec<EdgeIdx>,
    ) {
        color[u.idx()] = Color::Gray;
        let outgoing = graph.node(u).outgoing.clone();
        for e in outgoing {
            if graph.edge(e).self_loop {
                continue;
            }
            let v = graph.edge(e).target;
            match color[v.idx()] {
                Color::White => visit(graph, v, color, to_reverse),
                Color::Gray => to_reverse.push(e),
                Color::Black => {}
            }
        }
        color[u.idx()] = Color::Black;
    }

    for i in 0..n {
        if color[i] == Color::White {
            visit(graph, NodeIdx::from_usize(i), &mut color, &mut to_reverse);
        }
    }

    for e in to_reverse {
        reverse_edge(graph, e);
    }
}

fn reverse_edge(graph: &mut LGraph, e: EdgeIdx) {
    let (old_source, old_target) = {
        let edge = graph.edge(e);
        (edge.source, edge.target)
    };
    graph.node_mut(old_source).outgoing.retain(|&x| x != e);
    graph.node_mut(old_target).incoming.retain(|&x| x != e);

    let edge = graph.edge_mut(e);
    edge.source = old_target;
    edge.target = old_source;
    edge.reversed = !edge.reversed;

    graph.node_mut(old_target).outgoing.push(e);
    graph.node_mut(old_source).incoming.push(e);
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::internal::LEdge;
    use super::super::build::build;
    use crate::graph::{Container, Edge};

    fn make_container(edges: &[(&str, &str)], ids: &[&str]) -> Container {
        let mut c = Container { id: "root".to_string(), ..Default::default() };
        for id in ids {
            c.children.push(Container { id: id.to_string(), ..Default::default() });
        }
        for (i, (s, t)) in edges.iter().enumerate() {
            c.edges.push(Edge {
                id: format!("e{i}"),
                sources: vec![s.to_string()],
                targets: vec![t.to_string()],
                ..Default::default()
            });
        }
        c
    }

    #[test]
    fn reverses_back_edge_to_break_cycle() {
        let c = make_container(&[("a", "b"), ("b", "c"), ("c", "a")], &["a", "b", "c"]);
        let mut graph = build(&c);
        break_cycles(&mut graph);
        // no node should still see a cyclic path after the pass: some edge must be reversed.
        assert!(graph.edges.iter().any(|e| e.reversed));
    }

    #[test]
    fn self_loops_are_untouched() {
        let c = make_container(&[("a", "a")], &["a"]);
        let mut graph = build(&c);
        break_cycles(&mut graph);
        assert!(!graph.edges[0].reversed);
        assert!(graph.edges[0].self_loop);
    }

    #[test]
    fn reverse_edge_updates_adjacency_lists() {
        let mut graph = LGraph::default();
        graph.nodes.push(super::super::internal::LNode {
            id: "a".into(), width: 0.0, height: 0.0, is_dummy: false, layer: 0, position: 0,
            x: 0.0, y: 0.0, incoming: Vec::new(), outgoing: Vec::new(), ports: Vec::new(),
            constraint: None, orig_child_index: Some(0),
        });
        graph.nodes.push(super::super::internal::LNode {
            id: "b".into(), width: 0.0, height: 0.0, is_dummy: false, layer: 0, position: 0,
            x: 0.0, y: 0.0, incoming: Vec::new(), outgoing: Vec::new(), ports: Vec::new(),
            constraint: None, orig_child_index: Some(1),
        });
        graph.edges.push(LEdge {
            id: "e".into(), source: NodeIdx(0), target: NodeIdx(1), source_port: None,
            target_port: None, orig_edge_index: 0, reversed: false, self_loop: false, dummies: Vec::new(),
        });
        graph.node_mut(NodeIdx(0)).outgoing.push(EdgeIdx(0));
        graph.node_mut(NodeIdx(1)).incoming.push(EdgeIdx(0));

        reverse_edge(&mut graph, EdgeIdx(0));
        assert_eq!(graph.edge(EdgeIdx(0)).source, NodeIdx(1));
        assert_eq!(graph.edge(EdgeIdx(0)).target, NodeIdx(0));
        assert!(graph.node(NodeIdx(1)).outgoing.contains(&EdgeIdx(0)));
        assert!(graph.node(NodeIdx(0)).incoming.contains(&EdgeIdx(0)));
    }
}
