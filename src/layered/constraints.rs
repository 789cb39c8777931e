//! Phase 1: constraint check. If two or more `FIRST`-constrained nodes
//! participate in a directed cycle restricted to the subgraph induced by
//! the `FIRST`-constrained set (ignoring self-loops), the layering that
//! phase 3 would produce is unsatisfiable — fail before it gets the
//! chance to silently reverse one of those edges.

use super::internal::{Constraint, LGraph, NodeIdx};
use crate::error::{LayoutError, Result};

pub fn check_constraints(graph: &LGraph) -> Result<()> {
    let first_nodes: Vec<NodeIdx> = (0..graph.nodes.len())
        .map(NodeIdx::from_usize)
        .filter(|&i| graph.node(i).constraint == Some(Constraint::First))
        .collect();
    if first_nodes.len() < 2 {
        return Ok(());
    }
    let in_first: Vec<bool> = {
        let mut v = vec![false; graph.nodes.len()];
        for &i in &first_nodes {
            v[i.idx()] = true;
        }
        v
    };

    #[derive(Clone, Copy, PartialEq)]
    enum Color {
        White,
        Gray,
        Black,
    }
    let mut color = vec![Color::White; graph.nodes.len()];
    let mut cyclic = false;

    fn visit(
        graph: &LGraph,
        u: NodeIdx,
        in_first: &[bool],
        color: &mut [Color],
        cyclic: &mut bool,
    ) {
        color[u.idx()] = Color::Gray;
        for e in &graph.node(u).outgoing {
            if graph.edge(*e).self_loop {
                continue;
            }
            let v = graph.edge(*e).target;
            if !in_first[v.idx()] {
                continue;
            }
            match color[v.idx()] {
                Color::White => visit(graph, v, in_first, color, cyclic),
                Color::Gray => *cyclic = true,
                Color::Black => {}
            }
        }
        color[u.idx()] = Color::Black;
    }

    for &u in &first_nodes {
        if color[u.idx()] == Color::White {
            visit(graph, u, &in_first, &mut color, &mut cyclic);
        }
        if cyclic {
            break;
        }
    }

    if cyclic {
        return Err(LayoutError::UnsupportedConfiguration(
            "Cycle among nodes with FIRST layer constraint".to_string(),
        ));
    }
    Ok(())
}
