//! Phase 7: edge routing. A connection point is placed on the source/
//! target port's side if the edge has one (falling back to a side
//! inferred from the layout direction when the port's side is
//! `UNDEFINED`); without a port, the node boundary midpoint on the
//! inferred side is used directly. Bend points are the dummy chain's
//! centers in source-to-target order. Self-loops get a fixed two-bend
//! routing out of the node's top-right corner.

use super::internal::{Direction, LEdge, LGraph, LNode};
use crate::graph::{Point, PortSide, Section};

const SELF_LOOP_OFFSET: f64 = 20.0;

pub fn route_edges(graph: &LGraph, direction: Direction) -> Vec<(usize, Section)> {
    let mut out = Vec::new();
    for edge in &graph.edges {
        let section = if edge.self_loop {
            self_loop_section(graph, edge)
        } else {
            routed_section(graph, edge, direction)
        };
        out.push((edge.orig_edge_index, section));
    }
    out
}

fn inferred_side(direction: Direction, is_source: bool) -> PortSide {
    match (direction.is_horizontal(), is_source) {
        (true, true) => PortSide::East,
        (true, false) => PortSide::West,
        (false, true) => PortSide::South,
        (false, false) => PortSide::North,
    }
}

fn connection_point(
    graph: &LGraph,
    node: &LNode,
    port: Option<super::internal::PortIdx>,
    direction: Direction,
    is_source: bool,
) -> Point {
    let side = port
        .map(|p| graph.port(p).side)
        .filter(|&s| s != PortSide::Undefined)
        .unwrap_or_else(|| inferred_side(direction, is_source));

    if let Some(p) = port {
        let port = graph.port(p);
        let (px, py) = (node.x + port.x, node.y + port.y);
        return match side {
            PortSide::East => Point::new(px + port.width, py + port.height / 2.0),
            PortSide::West => Point::new(px, py + port.height / 2.0),
            PortSide::North => Point::new(px + port.width / 2.0, py),
            PortSide::South => Point::new(px + port.width / 2.0, py + port.height),
            PortSide::Undefined => Point::new(px + port.width / 2.0, py + port.height / 2.0),
        };
    }

    match side {
        PortSide::East => Point::new(node.x + node.width, node.y + node.height / 2.0),
        PortSide::West => Point::new(node.x, node.y + node.height / 2.0),
        PortSide::North => Point::new(node.x + node.width / 2.0, node.y),
        PortSide::South => Point::new(node.x + node.width / 2.0, node.y + node.height),
        PortSide::Undefined => Point::new(node.x + node.width / 2.0, node.y + node.height / 2.0),
    }
}

fn routed_section(graph: &LGraph, edge: &LEdge, direction: Direction) -> Section {
    let source = graph.node(edge.source);
    let target = graph.node(edge.target);
    let start = connection_point(graph, source, edge.source_port, direction, true);
    let end = connection_point(graph, target, edge.target_port, direction, false);

    let bend_points: Vec<Point> = edge
        .dummies
        .iter()
        .map(|&d| {
            let n = graph.node(d);
            Point::new(n.x + n.width / 2.0, n.y + n.height / 2.0)
        })
        .collect();

    if edge.reversed {
        Section {
            start_point: end,
            end_point: start,
            bend_points: bend_points.into_iter().rev().collect(),
        }
    } else {
        Section { start_point: start, end_point: end, bend_points }
    }
}

/// Out by ~20 units from the top-right corner, down by the node's
/// height, and back to a point below the start.
fn self_loop_section(graph: &LGraph, edge: &LEdge) -> Section {
    let node = graph.node(edge.source);
    let top_right = Point::new(node.x + node.width, node.y);
    let below_start = Point::new(node.x + node.width, node.y + node.height);
    let out = Point::new(node.x + node.width + SELF_LOOP_OFFSET, node.y);
    let down = Point::new(node.x + node.width + SELF_LOOP_OFFSET, node.y + node.height);
    Section {
        start_point: top_right,
        end_point: below_start,
        bend_points: vec![out, down],
    }
}
