//! Phase 0: build the internal [`LGraph`] from a container's direct
//! children, ports, and edges.

use super::internal::{LEdge, LGraph, LNode, LPort, NodeIdx};
use crate::graph::Container;
use crate::options::{self, get_own_option, keys};
use std::collections::HashMap;

pub fn build(container: &Container) -> LGraph {
    let mut graph = LGraph::default();
    let mut id_to_node: HashMap<String, NodeIdx> = HashMap::new();
    let mut port_id_to_owner: HashMap<String, NodeIdx> = HashMap::new();

    for (child_idx, child) in container.children.iter().enumerate() {
        let node_idx = NodeIdx::from_usize(graph.nodes.len());
        let constraint = get_own_option(&child.layout_options, &child.properties, keys::LAYER_CONSTRAINT)
            .map(options::as_str)
            .and_then(|s| match s.as_str() {
                "FIRST" => Some(super::internal::Constraint::First),
                "LAST" => Some(super::internal::Constraint::Last),
                _ => None,
            });
        graph.nodes.push(LNode {
            id: child.id.clone(),
            width: child.width,
            height: child.height,
            is_dummy: false,
            layer: 0,
            position: child_idx,
            x: child.x,
            y: child.y,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            ports: Vec::new(),
            constraint,
            orig_child_index: Some(child_idx),
        });
        id_to_node.insert(child.id.clone(), node_idx);

        for (port_idx, port) in child.ports.iter().enumerate() {
            let side = get_own_option(&port.layout_options, &port.properties, keys::PORT_SIDE)
                .map(options::as_str)
                .and_then(|s| match s.as_str() {
                    "NORTH" => Some(crate::graph::PortSide::North),
                    "SOUTH" => Some(crate::graph::PortSide::South),
                    "EAST" => Some(crate::graph::PortSide::East),
                    "WEST" => Some(crate::graph::PortSide::West),
                    _ => None,
                })
                .unwrap_or(crate::graph::PortSide::Undefined);
            let index = get_own_option(&port.layout_options, &port.properties, keys::PORT_INDEX)
                .and_then(|v| options::as_number(v).ok())
                .unwrap_or(port_idx as f64);
            let lport_idx = super::internal::PortIdx::from_usize(graph.ports.len());
            graph.ports.push(LPort {
                id: port.id.clone(),
                width: port.width,
                height: port.height,
                side,
                index,
                owner: node_idx,
                x: port.x,
                y: port.y,
                orig_port_index: port_idx,
            });
            graph.node_mut(node_idx).ports.push(lport_idx);
            port_id_to_owner.insert(port.id.clone(), node_idx);
        }
    }

    for (edge_idx, edge) in container.edges.iter().enumerate() {
        let resolve = |id: &str| -> Option<NodeIdx> {
            id_to_node.get(id).copied().or_else(|| port_id_to_owner.get(id).copied())
        };

        // Hyperedges carry more than one source/target; one `LEdge` is
        // built per (source, target) pair of the full cross product.
        for src_id in &edge.sources {
            for tgt_id in &edge.targets {
                let (Some(source), Some(target)) = (resolve(src_id), resolve(tgt_id)) else { continue };
                let source_port = port_id_to_owner.contains_key(src_id).then(|| {
                    super::internal::PortIdx::from_usize(
                        graph.ports.iter().position(|p| &p.id == src_id).unwrap(),
                    )
                });
                let target_port = port_id_to_owner.contains_key(tgt_id).then(|| {
                    super::internal::PortIdx::from_usize(
                        graph.ports.iter().position(|p| &p.id == tgt_id).unwrap(),
                    )
                });

                let ledge_idx = super::internal::EdgeIdx::from_usize(graph.edges.len());
                let self_loop = source == target;
                graph.edges.push(LEdge {
                    id: edge.id.clone(),
                    source,
                    target,
                    source_port,
                    target_port,
                    orig_edge_index: edge_idx,
                    reversed: false,
                    self_loop,
                    dummies: Vec::new(),
                });
                if !self_loop {
                    graph.node_mut(source).outgoing.push(ledge_idx);
                    graph.node_mut(target).incoming.push(ledge_idx);
                }
            }
        }
    }

    graph
}
