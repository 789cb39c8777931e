//! The `fixed` provider: positions come from the graph itself rather than
//! from an algorithm. Reads an optional `position` vector on each child,
//! falling back to the padding origin, and reads an optional `bendPoints`
//! vector chain on each edge to build its section directly.

use super::common::{finalize_bounds, padding_of, route_unrouted_edges};
use crate::error::Result;
use crate::graph::{Container, OptionMap, Point, Section};
use crate::options::{self, keys};
use crate::registry::LayoutProvider;

pub struct FixedProvider;

impl LayoutProvider for FixedProvider {
    fn layout(&self, container: &mut Container, global_options: &OptionMap) -> Result<()> {
        let padding = padding_of(global_options);

        for child in &mut container.children {
            let position = options::get_own_option(&child.layout_options, &child.properties, keys::POSITION)
                .map(options::as_str)
                .and_then(|s| options::parse_vector(&s).ok());
            let (x, y) = position.unwrap_or((padding.left, padding.top));
            child.x = x;
            child.y = y;
        }

        for edge in &mut container.edges {
            if !edge.sections.is_empty() {
                continue;
            }
            let chain = options::get_own_option(&edge.layout_options, &edge.properties, keys::BEND_POINTS)
                .map(options::as_str)
                .and_then(|s| options::parse_vector_chain(&s).ok());
            if let Some(points) = chain {
                if points.len() >= 2 {
                    let mut points = points.into_iter().map(|(x, y)| Point::new(x, y));
                    let start = points.next().unwrap();
                    let rest: Vec<Point> = points.collect();
                    let end = *rest.last().unwrap();
                    let bend_points = rest[..rest.len() - 1].to_vec();
                    edge.sections.push(Section {
                        start_point: start,
                        end_point: end,
                        bend_points,
                    });
                }
            }
        }

        route_unrouted_edges(container);
        finalize_bounds(container, padding);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use indexmap::IndexMap;
    use serde_json::Value;

    #[test]
    fn child_uses_explicit_position() {
        let mut container = Container {
            id: "root".to_string(),
            ..Default::default()
        };
        let mut child = Container {
            id: "n1".to_string(),
            width: 10.0,
            height: 10.0,
            ..Default::default()
        };
        child
            .layout_options
            .insert(keys::POSITION.to_string(), Value::String("(23, 43)".to_string()));
        container.children.push(child);

        FixedProvider.layout(&mut container, &IndexMap::new()).unwrap();
        assert_eq!(container.children[0].x, 23.0);
        assert_eq!(container.children[0].y, 43.0);
    }

    #[test]
    fn edge_bend_points_build_section() {
        let mut container = Container {
            id: "root".to_string(),
            ..Default::default()
        };
        container.children.push(Container {
            id: "n1".to_string(),
            ..Default::default()
        });
        container.children.push(Container {
            id: "n2".to_string(),
            ..Default::default()
        });
        let mut edge = Edge {
            id: "e1".to_string(),
            sources: vec!["n1".to_string()],
            targets: vec!["n2".to_string()],
            ..Default::default()
        };
        edge.layout_options.insert(
            keys::BEND_POINTS.to_string(),
            Value::String("( {1,2}, {3,4} )".to_string()),
        );
        container.edges.push(edge);

        FixedProvider.layout(&mut container, &IndexMap::new()).unwrap();
        let section = &container.edges[0].sections[0];
        assert_eq!(section.start_point, Point::new(1.0, 2.0));
        assert_eq!(section.end_point, Point::new(3.0, 4.0));
        assert!(section.bend_points.is_empty());
    }
}
