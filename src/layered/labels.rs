//! Phase 9: label placement. Reads `elk.nodeLabels.placement`, a
//! whitespace-separated token string drawn from `{INSIDE, OUTSIDE,
//! H_LEFT, H_CENTER, H_RIGHT, V_TOP, V_CENTER, V_BOTTOM}`. Horizontal
//! placement is independent of INSIDE/OUTSIDE; vertical placement is not.

use crate::graph::{Container, Label, OptionMap, Section};
use crate::options::{self, get_own_option, keys};

const LABEL_NODE_SPACING: f64 = 5.0;

/// `global_options` is the effective option set already resolved for the
/// container itself; a child's own `layoutOptions.elk.nodeLabels.placement`
/// overrides it, exactly as `effective_options` scopes any other option.
pub fn place_node_labels(container: &mut Container, global_options: &OptionMap) {
    for child in &mut container.children {
        let placement = get_own_option(&child.layout_options, &child.properties, keys::NODE_LABELS_PLACEMENT)
            .map(options::as_str)
            .or_else(|| global_options.get(keys::NODE_LABELS_PLACEMENT).map(options::as_str))
            .unwrap_or_default();
        let tokens: Vec<&str> = placement.split_whitespace().collect();
        let (width, height) = (child.width, child.height);
        for label in &mut child.labels {
            place_one_label(label, width, height, &tokens);
        }
    }
}

fn place_one_label(label: &mut Label, node_w: f64, node_h: f64, tokens: &[&str]) {
    let (lw, lh) = (label.width, label.height);

    label.x = if tokens.contains(&"H_LEFT") {
        0.0
    } else if tokens.contains(&"H_RIGHT") {
        node_w - lw
    } else {
        (node_w - lw) / 2.0
    };

    label.y = if tokens.contains(&"OUTSIDE") {
        if tokens.contains(&"V_TOP") {
            -(lh + LABEL_NODE_SPACING)
        } else if tokens.contains(&"V_BOTTOM") {
            node_h + LABEL_NODE_SPACING
        } else {
            (node_h - lh) / 2.0
        }
    } else if tokens.contains(&"V_TOP") {
        0.0
    } else if tokens.contains(&"V_BOTTOM") {
        node_h - lh
    } else {
        (node_h - lh) / 2.0
    };
}

/// Edge labels aren't covered by the node-label placement tokens above;
/// centered on the routed section's midpoint instead.
pub fn place_edge_labels(container: &mut Container) {
    for edge in &mut container.edges {
        let Some(section) = edge.sections.first() else { continue };
        let mid = midpoint(section);
        for label in &mut edge.labels {
            label.x = mid.0 - label.width / 2.0;
            label.y = mid.1 - label.height / 2.0;
        }
    }
}

fn midpoint(section: &Section) -> (f64, f64) {
    (
        (section.start_point.x + section.end_point.x) / 2.0,
        (section.start_point.y + section.end_point.y) / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Point;
    use serde_json::Value;

    #[test]
    fn outside_v_top_places_label_above_the_node() {
        let mut container = Container { id: "root".into(), ..Default::default() };
        let mut child = Container { id: "a".into(), width: 50.0, height: 30.0, ..Default::default() };
        child.layout_options.insert(
            keys::NODE_LABELS_PLACEMENT.to_string(),
            Value::String("H_CENTER OUTSIDE V_TOP".to_string()),
        );
        child.labels.push(Label { width: 10.0, height: 8.0, ..Default::default() });
        container.children.push(child);
        place_node_labels(&mut container, &OptionMap::new());
        assert_eq!(container.children[0].labels[0].y, -13.0);
        assert_eq!(container.children[0].labels[0].x, 20.0);
    }

    #[test]
    fn inside_default_centers_the_label() {
        let mut container = Container { id: "root".into(), ..Default::default() };
        let mut child = Container { id: "a".into(), width: 50.0, height: 30.0, ..Default::default() };
        child.labels.push(Label { width: 10.0, height: 8.0, ..Default::default() });
        container.children.push(child);
        place_node_labels(&mut container, &OptionMap::new());
        assert_eq!(container.children[0].labels[0].y, 11.0);
    }

    #[test]
    fn global_placement_applies_when_child_has_no_own_override() {
        let mut container = Container { id: "root".into(), ..Default::default() };
        let mut child = Container { id: "a".into(), width: 50.0, height: 30.0, ..Default::default() };
        child.labels.push(Label { width: 10.0, height: 8.0, ..Default::default() });
        container.children.push(child);
        let mut global = OptionMap::new();
        global.insert(
            keys::NODE_LABELS_PLACEMENT.to_string(),
            Value::String("H_CENTER OUTSIDE V_TOP".to_string()),
        );
        place_node_labels(&mut container, &global);
        assert_eq!(container.children[0].labels[0].y, -13.0);
    }

    #[test]
    fn child_own_override_wins_over_global_placement() {
        let mut container = Container { id: "root".into(), ..Default::default() };
        let mut child = Container { id: "a".into(), width: 50.0, height: 30.0, ..Default::default() };
        child.layout_options.insert(
            keys::NODE_LABELS_PLACEMENT.to_string(),
            Value::String("INSIDE V_CENTER H_CENTER".to_string()),
        );
        child.labels.push(Label { width: 10.0, height: 8.0, ..Default::default() });
        container.children.push(child);
        let mut global = OptionMap::new();
        global.insert(
            keys::NODE_LABELS_PLACEMENT.to_string(),
            Value::String("H_CENTER OUTSIDE V_TOP".to_string()),
        );
        place_node_labels(&mut container, &global);
        assert_eq!(container.children[0].labels[0].y, 11.0);
    }

    #[test]
    fn edge_label_centers_on_section_midpoint() {
        let mut container = Container { id: "root".into(), ..Default::default() };
        let mut edge = crate::graph::Edge { id: "e".into(), ..Default::default() };
        edge.sections.push(Section {
            start_point: Point::new(0.0, 0.0),
            end_point: Point::new(100.0, 0.0),
            bend_points: Vec::new(),
        });
        edge.labels.push(Label { width: 20.0, height: 10.0, ..Default::default() });
        container.edges.push(edge);
        place_edge_labels(&mut container);
        assert_eq!(container.edges[0].labels[0].x, 40.0);
    }
}
