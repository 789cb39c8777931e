//! End-to-end acceptance tests driving the crate through its JSON entry
//! point.

use elk_layout::{LayoutDriver, LayoutError, OptionMap};
use serde_json::{json, Value};

fn driver() -> LayoutDriver {
    LayoutDriver::new(elk_layout::options::defaults())
}

#[test]
fn two_node_left_to_right_layout_respects_between_layer_spacing() {
    let graph = json!({
        "id": "root",
        "layoutOptions": {"elk.direction": "RIGHT"},
        "children": [
            {"id": "n1", "width": 10.0, "height": 10.0},
            {"id": "n2", "width": 10.0, "height": 10.0}
        ],
        "edges": [{"id": "e1", "sources": ["n1"], "targets": ["n2"]}]
    });

    let mut overrides = OptionMap::new();
    overrides.insert(
        "layered.spacing.nodeNodeBetweenLayers".to_string(),
        json!(11.0),
    );

    let out = driver().layout_json(Some(graph), Some(overrides), false, false).unwrap();
    let n1 = &out["children"][0];
    let n2 = &out["children"][1];
    assert_eq!(n1["y"], n2["y"]);
    let dx = (n1["x"].as_f64().unwrap() - n2["x"].as_f64().unwrap()).abs();
    assert_eq!(dx, 21.0);
}

#[test]
fn per_call_globals_do_not_override_element_options() {
    let graph = json!({
        "id": "root",
        "layoutOptions": {"elk.direction": "RIGHT"},
        "children": [
            {"id": "n1", "width": 10.0, "height": 10.0},
            {"id": "n2", "width": 10.0, "height": 10.0}
        ],
        "edges": [{"id": "e1", "sources": ["n1"], "targets": ["n2"]}]
    });

    let mut overrides = OptionMap::new();
    overrides.insert("org.eclipse.elk.direction".to_string(), json!("DOWN"));

    let out = driver().layout_json(Some(graph), Some(overrides), false, false).unwrap();
    assert_eq!(out["layoutOptions"]["elk.direction"], "RIGHT");
    let n1 = &out["children"][0];
    let n2 = &out["children"][1];
    assert_eq!(n1["y"], n2["y"]);
    assert_ne!(n1["x"], n2["x"]);
}

#[test]
fn padding_parse_sizes_container_around_one_child() {
    let graph = json!({
        "id": "root",
        "layoutOptions": {"elk.padding": "[left=2, top=3, right=3, bottom=2]"},
        "children": [{"id": "n1", "width": 10.0, "height": 10.0}]
    });

    let out = driver().layout_json(Some(graph), None, false, false).unwrap();
    assert_eq!(out["children"][0]["x"], 2.0);
    assert_eq!(out["children"][0]["y"], 3.0);
    assert_eq!(out["width"], 15.0);
    assert_eq!(out["height"], 15.0);
}

#[test]
fn fixed_provider_places_child_at_explicit_vector() {
    let graph = json!({
        "id": "root",
        "layoutOptions": {"elk.algorithm": "fixed"},
        "children": [{
            "id": "n1",
            "width": 10.0,
            "height": 10.0,
            "layoutOptions": {"elk.position": "(23, 43)"}
        }]
    });

    let out = driver().layout_json(Some(graph), None, false, false).unwrap();
    assert_eq!(out["children"][0]["x"], 23.0);
    assert_eq!(out["children"][0]["y"], 43.0);
}

#[test]
fn fixed_provider_builds_section_from_vector_chain_bend_points() {
    let graph = json!({
        "id": "root",
        "layoutOptions": {"elk.algorithm": "fixed"},
        "children": [
            {"id": "n1", "width": 10.0, "height": 10.0},
            {"id": "n2", "width": 10.0, "height": 10.0}
        ],
        "edges": [{
            "id": "e1",
            "sources": ["n1"],
            "targets": ["n2"],
            "layoutOptions": {"elk.bendPoints": "( {1,2}, {3,4} )"}
        }]
    });

    let out = driver().layout_json(Some(graph), None, false, false).unwrap();
    let section = &out["edges"][0]["sections"][0];
    assert_eq!(section["startPoint"], json!({"x": 1.0, "y": 2.0}));
    assert_eq!(section["endPoint"], json!({"x": 3.0, "y": 4.0}));
}

fn cross_hierarchy_graph() -> Value {
    json!({
        "id": "root",
        "children": [{
            "id": "A",
            "children": [
                {"id": "a1", "width": 10.0, "height": 10.0},
                {"id": "a2", "width": 10.0, "height": 10.0}
            ],
            "edges": [{"id": "bad", "sources": ["a1"], "targets": ["A"]}]
        }]
    })
}

#[test]
fn cross_hierarchy_edge_is_rejected_under_separate_children() {
    let err = driver().layout_json(Some(cross_hierarchy_graph()), None, false, false).unwrap_err();
    assert!(matches!(err, LayoutError::UnsupportedGraph(_)));
    assert!(err.to_string().contains("org.eclipse.elk.core.UnsupportedGraphException"));
}

#[test]
fn include_children_routes_the_container_referencing_edge() {
    let mut graph = cross_hierarchy_graph();
    graph["layoutOptions"] = json!({"elk.hierarchyHandling": "INCLUDE_CHILDREN"});

    let out = driver().layout_json(Some(graph), None, false, false).unwrap();
    let section = &out["children"][0]["edges"][0]["sections"][0];
    assert!(section["startPoint"].is_object());
    assert!(section["endPoint"].is_object());
}

#[test]
fn unknown_algorithm_is_rejected_with_quoted_id() {
    let graph = json!({
        "id": "root",
        "layoutOptions": {"elk.algorithm": "foo.bar.baz"},
        "children": [{"id": "n1", "width": 10.0, "height": 10.0}]
    });

    let err = driver().layout_json(Some(graph), None, false, false).unwrap_err();
    assert!(matches!(err, LayoutError::UnsupportedConfiguration(_)));
    assert!(err.to_string().contains("foo.bar.baz"));
}

#[test]
fn label_placement_honors_outside_and_inside_overrides() {
    let graph = json!({
        "id": "root",
        "children": [
            {
                "id": "n1", "width": 100.0, "height": 100.0,
                "labels": [{"id": "l1", "width": 0.0, "height": 0.0}]
            },
            {
                "id": "n2", "width": 100.0, "height": 100.0,
                "layoutOptions": {"elk.nodeLabels.placement": "INSIDE V_CENTER H_CENTER"},
                "labels": [{"id": "l2", "width": 0.0, "height": 0.0}]
            }
        ]
    });

    let mut overrides = OptionMap::new();
    overrides.insert(
        "elk.nodeLabels.placement".to_string(),
        json!("OUTSIDE V_TOP H_CENTER"),
    );

    let out = driver().layout_json(Some(graph), Some(overrides), false, false).unwrap();
    let l1 = &out["children"][0]["labels"][0];
    assert_eq!(l1["x"], 50.0);
    assert_eq!(l1["y"], -5.0);
    let l2 = &out["children"][1]["labels"][0];
    assert_eq!(l2["x"], 50.0);
    assert_eq!(l2["y"], 50.0);
}

#[test]
fn self_loop_is_tolerated_under_coffman_graham() {
    let graph = json!({
        "id": "root",
        "layoutOptions": {"elk.layered.layering.strategy": "COFFMAN_GRAHAM"},
        "children": [
            {"id": "n1", "width": 10.0, "height": 10.0},
            {"id": "n2", "width": 10.0, "height": 10.0},
            {"id": "n3", "width": 10.0, "height": 10.0}
        ],
        "edges": [
            {"id": "e1", "sources": ["n1"], "targets": ["n2"]},
            {"id": "e2", "sources": ["n2"], "targets": ["n3"]},
            {"id": "loop", "sources": ["n1"], "targets": ["n1"]}
        ]
    });

    let out = driver().layout_json(Some(graph), None, false, false).unwrap();
    assert_eq!(out["children"].as_array().unwrap().len(), 3);
}

#[test]
fn first_constraint_cycle_is_rejected() {
    let graph = json!({
        "id": "root",
        "children": [
            {"id": "n1", "width": 10.0, "height": 10.0, "layoutOptions": {"elk.layered.layering.layerConstraint": "FIRST"}},
            {"id": "n2", "width": 10.0, "height": 10.0, "layoutOptions": {"elk.layered.layering.layerConstraint": "FIRST"}},
            {"id": "n3", "width": 10.0, "height": 10.0, "layoutOptions": {"elk.layered.layering.layerConstraint": "FIRST"}}
        ],
        "edges": [
            {"id": "e1", "sources": ["n1"], "targets": ["n2"]},
            {"id": "e2", "sources": ["n2"], "targets": ["n3"]},
            {"id": "e3", "sources": ["n3"], "targets": ["n1"]}
        ]
    });

    let err = driver().layout_json(Some(graph), None, false, false).unwrap_err();
    assert!(matches!(err, LayoutError::UnsupportedConfiguration(_)));
}

#[test]
fn id_validation_matrix() {
    assert!(driver().layout_json(Some(json!({"id": "x"})), None, false, false).is_ok());
    assert!(driver().layout_json(Some(json!({"id": 2})), None, false, false).is_ok());
    assert!(matches!(
        driver().layout_json(Some(json!({})), None, false, false).unwrap_err(),
        LayoutError::InvalidGraph(_)
    ));
    assert!(matches!(
        driver().layout_json(Some(json!({"id": 1.2})), None, false, false).unwrap_err(),
        LayoutError::InvalidGraph(_)
    ));
    assert!(matches!(
        driver().layout_json(Some(json!({"id": true})), None, false, false).unwrap_err(),
        LayoutError::InvalidGraph(_)
    ));
    assert!(matches!(
        driver().layout_json(Some(json!({"id": []})), None, false, false).unwrap_err(),
        LayoutError::InvalidGraph(_)
    ));
    assert!(matches!(
        driver().layout_json(Some(json!({"id": {}})), None, false, false).unwrap_err(),
        LayoutError::InvalidGraph(_)
    ));
}

#[test]
fn missing_graph_argument_is_reported() {
    let err = driver().layout_json(None, None, false, false).unwrap_err();
    assert!(matches!(err, LayoutError::MissingArgument));
}

#[test]
fn layout_is_idempotent_across_repeated_calls() {
    let graph = json!({
        "id": "root",
        "children": [
            {"id": "n1", "width": 10.0, "height": 10.0},
            {"id": "n2", "width": 10.0, "height": 10.0},
            {"id": "n3", "width": 10.0, "height": 10.0}
        ],
        "edges": [
            {"id": "e1", "sources": ["n1"], "targets": ["n2"]},
            {"id": "e2", "sources": ["n2"], "targets": ["n3"]}
        ]
    });

    let once = driver().layout_json(Some(graph.clone()), None, false, false).unwrap();
    let twice = driver().layout_json(Some(once.clone()), None, false, false).unwrap();
    assert_eq!(once["children"], twice["children"]);
}

#[test]
fn unknown_algorithm_error_display_matches_java_exception_prefix() {
    let err = LayoutError::UnsupportedConfiguration("\"x.y.z\"".to_string());
    assert_eq!(
        err.to_string(),
        "org.eclipse.elk.core.UnsupportedConfigurationException: \"x.y.z\""
    );
}
