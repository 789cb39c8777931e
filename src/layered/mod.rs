//! The layered engine (`org.eclipse.elk.layered`): a ten-phase Sugiyama-
//! style pipeline from a container's direct children and edges to a
//! complete layout. Each phase lives in its own module here, operating on the
//! flat [`internal::LGraph`] representation built on entry and discarded
//! after write-back.

mod build;
mod constraints;
mod coords;
mod crossing;
mod cycles;
mod dummies;
mod internal;
mod labels;
mod layering;
mod ports;
mod routing;
mod writeback;

use crate::error::Result;
use crate::graph::{Container, OptionMap};
use crate::options::{self, keys};
use crate::registry::LayoutProvider;
use internal::Direction;
use layering::LayeringStrategy;

pub struct LayeredProvider;

impl LayoutProvider for LayeredProvider {
    fn layout(&self, container: &mut Container, global_options: &OptionMap) -> Result<()> {
        let padding = global_options
            .get(keys::PADDING)
            .map(options::as_str)
            .map(|s| options::parse_padding(&s))
            .transpose()?
            .unwrap_or_default();

        if container.children.is_empty() {
            container.width = padding.left + padding.right;
            container.height = padding.top + padding.bottom;
            return Ok(());
        }

        let direction = global_options
            .get(keys::DIRECTION)
            .map(options::as_str)
            .map(|s| Direction::from_str(&s))
            .unwrap_or(Direction::Down);
        let strategy = global_options
            .get(keys::LAYERING_STRATEGY)
            .map(options::as_str)
            .map(|s| LayeringStrategy::from_str(&s))
            .unwrap_or(LayeringStrategy::LongestPath);
        let node_spacing = global_options
            .get(keys::SPACING_NODE_NODE)
            .map(options::as_number)
            .transpose()?
            .unwrap_or(20.0);
        let layer_spacing = global_options
            .get(keys::SPACING_NODE_NODE_BETWEEN_LAYERS)
            .map(options::as_number)
            .transpose()?
            .unwrap_or(20.0);

        let mut graph = build::build(container);
        constraints::check_constraints(&graph)?;
        cycles::break_cycles(&mut graph);
        layering::assign_layers(&mut graph, strategy);
        dummies::insert_dummies(&mut graph);
        crossing::reduce_crossings(&mut graph);
        coords::assign_coordinates(&mut graph, direction, node_spacing, layer_spacing, padding);
        ports::place_ports(&mut graph, direction);
        writeback::write_back(container, &graph, direction, padding, global_options);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use indexmap::IndexMap;

    #[test]
    fn two_node_chain_lays_out_top_to_bottom_by_default() {
        let mut container = Container { id: "root".into(), ..Default::default() };
        for id in ["a", "b"] {
            container.children.push(Container {
                id: id.to_string(),
                width: 20.0,
                height: 20.0,
                ..Default::default()
            });
        }
        container.edges.push(Edge {
            id: "e".into(),
            sources: vec!["a".into()],
            targets: vec!["b".into()],
            ..Default::default()
        });
        let global = options::defaults();
        LayeredProvider.layout(&mut container, &global).unwrap();

        assert!(container.children[1].y > container.children[0].y);
        assert_eq!(container.edges[0].sections.len(), 1);
        assert!(container.width > 0.0 && container.height > 0.0);
    }

    #[test]
    fn right_direction_overrides_default_down() {
        let mut container = Container { id: "root".into(), ..Default::default() };
        for id in ["a", "b"] {
            container.children.push(Container {
                id: id.to_string(),
                width: 20.0,
                height: 20.0,
                ..Default::default()
            });
        }
        container.edges.push(Edge {
            id: "e".into(),
            sources: vec!["a".into()],
            targets: vec!["b".into()],
            ..Default::default()
        });
        let mut global = options::defaults();
        global.insert(keys::DIRECTION.to_string(), serde_json::Value::String("RIGHT".to_string()));
        LayeredProvider.layout(&mut container, &global).unwrap();
        assert!(container.children[1].x > container.children[0].x);
    }

    #[test]
    fn empty_container_sizes_to_padding_only() {
        let mut container = Container { id: "root".into(), ..Default::default() };
        LayeredProvider.layout(&mut container, &IndexMap::new()).unwrap();
        assert_eq!(container.width, 0.0);
        assert_eq!(container.height, 0.0);
    }

    #[test]
    fn first_constrained_cycle_is_rejected() {
        let mut container = Container { id: "root".into(), ..Default::default() };
        for id in ["a", "b"] {
            let mut c = Container { id: id.to_string(), width: 10.0, height: 10.0, ..Default::default() };
            c.layout_options.insert(
                keys::LAYER_CONSTRAINT.to_string(),
                serde_json::Value::String("FIRST".to_string()),
            );
            container.children.push(c);
        }
        container.edges.push(Edge { id: "e1".into(), sources: vec!["a".into()], targets: vec!["b".into()], ..Default::default() });
        container.edges.push(Edge { id: "e2".into(), sources: vec!["b".into()], targets: vec!["a".into()], ..Default::default() });

        let global = options::defaults();
        let err = LayeredProvider.layout(&mut container, &global).unwrap_err();
        assert!(matches!(err, crate::error::LayoutError::UnsupportedConfiguration(_)));
    }
}
