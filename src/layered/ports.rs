//! Phase 8: port placement. Ports are grouped by side, sorted within a
//! side by `elk.port.index`, and distributed evenly along it
//! (`x = w·(i+1)/(n+1)`, minus half the port width for N/S; symmetric for
//! E/W). `UNDEFINED`-sided ports are left at `(0, 0)` rather than
//! assigned to an inferred side — routing (phase 7) infers a side for
//! drawing purposes, but a port's own box position is untouched here.

use super::internal::{Direction, LGraph};
use crate::graph::PortSide;

pub fn place_ports(graph: &mut LGraph, _direction: Direction) {
    let node_count = graph.nodes.len();
    for node_i in 0..node_count {
        let port_idxs = graph.nodes[node_i].ports.clone();
        if port_idxs.is_empty() {
            continue;
        }
        let (node_w, node_h) = (graph.nodes[node_i].width, graph.nodes[node_i].height);

        for &p in &port_idxs {
            if graph.port(p).side == PortSide::Undefined {
                let port = &mut graph.ports[p.idx()];
                port.x = 0.0;
                port.y = 0.0;
            }
        }

        for side in [PortSide::North, PortSide::South, PortSide::East, PortSide::West] {
            let mut on_side: Vec<_> = port_idxs
                .iter()
                .filter(|&&p| graph.port(p).side == side)
                .copied()
                .collect();
            on_side.sort_by(|&a, &b| {
                graph
                    .port(a)
                    .index
                    .partial_cmp(&graph.port(b).index)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let n = on_side.len();
            if n == 0 {
                continue;
            }
            for (i, p) in on_side.into_iter().enumerate() {
                let t = (i as f64 + 1.0) / (n as f64 + 1.0);
                let port_w = graph.port(p).width;
                let port_h = graph.port(p).height;
                let (x, y) = match side {
                    PortSide::North => (t * node_w - port_w / 2.0, -port_h / 2.0),
                    PortSide::South => (t * node_w - port_w / 2.0, node_h - port_h / 2.0),
                    PortSide::West => (-port_w / 2.0, t * node_h - port_h / 2.0),
                    PortSide::East => (node_w - port_w / 2.0, t * node_h - port_h / 2.0),
                    PortSide::Undefined => unreachable!(),
                };
                let port = &mut graph.ports[p.idx()];
                port.x = x;
                port.y = y;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::build::build;
    use crate::graph::{Container, Port};

    #[test]
    fn south_side_ports_are_distributed_along_the_bottom() {
        let mut c = Container { id: "root".into(), ..Default::default() };
        let mut child = Container { id: "a".into(), width: 40.0, height: 20.0, ..Default::default() };
        let mut p = Port { id: "p1".into(), width: 5.0, height: 5.0, ..Default::default() };
        p.layout_options.insert(
            crate::options::keys::PORT_SIDE.to_string(),
            serde_json::Value::String("SOUTH".to_string()),
        );
        child.ports.push(p);
        c.children.push(child);
        let mut graph = build(&c);
        place_ports(&mut graph, Direction::Down);
        let port = &graph.ports[0];
        assert!((port.y - (graph.nodes[0].height - port.height / 2.0)).abs() < 1e-6);
    }

    #[test]
    fn undefined_side_ports_stay_at_origin() {
        let mut c = Container { id: "root".into(), ..Default::default() };
        let mut child = Container { id: "a".into(), width: 40.0, height: 20.0, ..Default::default() };
        child.ports.push(Port { id: "p1".into(), width: 5.0, height: 5.0, ..Default::default() });
        c.children.push(child);
        let mut graph = build(&c);
        place_ports(&mut graph, Direction::Down);
        assert_eq!(graph.ports[0].x, 0.0);
        assert_eq!(graph.ports[0].y, 0.0);
    }
}
