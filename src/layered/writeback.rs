//! Phase 10: write-back. Copies computed geometry from the internal
//! [`LGraph`] onto the external [`Container`] tree, then sizes the
//! container to enclose its children plus padding.

use super::internal::{Direction, LGraph};
use crate::graph::{Container, OptionMap};
use crate::options::Padding;

pub fn write_back(
    container: &mut Container,
    graph: &LGraph,
    direction: Direction,
    padding: Padding,
    global_options: &OptionMap,
) {
    for node in &graph.nodes {
        let Some(child_idx) = node.orig_child_index else { continue };
        container.children[child_idx].x = node.x;
        container.children[child_idx].y = node.y;
    }

    for port in &graph.ports {
        let owner = graph.node(port.owner);
        let Some(child_idx) = owner.orig_child_index else { continue };
        container.children[child_idx].ports[port.orig_port_index].x = port.x;
        container.children[child_idx].ports[port.orig_port_index].y = port.y;
    }

    // A wire-format edge with several sources/targets expands to one
    // `LEdge` per pair in `build`, so its sections accumulate here rather
    // than overwrite one another.
    for edge in &mut container.edges {
        edge.sections.clear();
    }
    for (orig_edge_index, section) in super::routing::route_edges(graph, direction) {
        container.edges[orig_edge_index].sections.push(section);
    }

    super::labels::place_node_labels(container, global_options);
    super::labels::place_edge_labels(container);

    let mut max_x = container.children.iter().map(|c| c.x + c.width).fold(0.0_f64, f64::max);
    let mut max_y = container.children.iter().map(|c| c.y + c.height).fold(0.0_f64, f64::max);
    for child in &container.children {
        for port in &child.ports {
            max_x = max_x.max(child.x + port.x + port.width);
            max_y = max_y.max(child.y + port.y + port.height);
        }
    }
    container.width = max_x + padding.right;
    container.height = max_y + padding.bottom;
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::build::build;
    use super::super::coords::assign_coordinates;
    use super::super::layering::{assign_layers, LayeringStrategy};
    use crate::graph::Edge;

    #[test]
    fn write_back_copies_coordinates_and_sizes_container() {
        let mut c = Container { id: "root".into(), ..Default::default() };
        for id in ["a", "b"] {
            c.children.push(Container { id: id.to_string(), width: 10.0, height: 10.0, ..Default::default() });
        }
        c.edges.push(Edge { id: "e".into(), sources: vec!["a".into()], targets: vec!["b".into()], ..Default::default() });
        let mut graph = build(&c);
        assign_layers(&mut graph, LayeringStrategy::LongestPath);
        for (position, node) in graph.nodes.iter_mut().enumerate() {
            node.position = position;
        }
        assign_coordinates(&mut graph, Direction::Down, 20.0, 20.0, Padding { left: 12.0, top: 12.0, right: 12.0, bottom: 12.0 });
        write_back(
            &mut c,
            &graph,
            Direction::Down,
            Padding { left: 12.0, top: 12.0, right: 12.0, bottom: 12.0 },
            &crate::graph::OptionMap::new(),
        );

        assert!(c.children[1].y > c.children[0].y);
        assert!(c.width > 0.0);
        assert!(c.height > 0.0);
        assert_eq!(c.edges[0].sections.len(), 1);
    }
}
