//! External graph data model.
//!
//! The external graph is a tree of [`Container`]s: a container carries an id,
//! optional children, edges scoped to itself, ports (attachment points as
//! seen by its parent), labels, a size, and layout options. This mirrors the
//! nested-mapping shape of the wire format while giving the layered engine
//! and providers typed access to the geometry fields every phase touches.
//!
//! Ids are validated and coerced to their canonical string form by
//! [`crate::validate::validate_graph`] *before* a `serde_json::Value` is
//! deserialized into this typed tree, so by the time a [`Container`] exists
//! every `id` is already a plain string.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An option map keyed by option id. `IndexMap` rather than `HashMap`
/// because option iteration order is observable (spacing accumulation,
/// label placement tokens) and must be deterministic across runs.
pub type OptionMap = IndexMap<String, Value>;

/// A 2D point in the diagram's coordinate system, origin at top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A serialized polyline segment of an edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Section {
    #[serde(rename = "startPoint")]
    pub start_point: Point,
    #[serde(rename = "endPoint")]
    pub end_point: Point,
    #[serde(rename = "bendPoints", default, skip_serializing_if = "Vec::is_empty")]
    pub bend_points: Vec<Point>,
}

/// Side of a node a port is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PortSide {
    North,
    South,
    East,
    West,
    Undefined,
}

impl Default for PortSide {
    fn default() -> Self {
        PortSide::Undefined
    }
}

/// Layer constraint pinning a node to the minimum or maximum layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LayerConstraint {
    First,
    Last,
}

/// A label attached to a node or port.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Label {
    pub id: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(rename = "layoutOptions", default)]
    pub layout_options: OptionMap,
    #[serde(default)]
    pub properties: OptionMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An attachment point on a container, as seen by its parent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Port {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(rename = "layoutOptions", default)]
    pub layout_options: OptionMap,
    #[serde(default)]
    pub properties: OptionMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A directed edge. May be supplied in primitive form (`source`/`target`,
/// optionally `sourcePort`/`targetPort`) or already in multiset form
/// (`sources`/`targets`); [`crate::validate::normalize_edges`] rewrites the
/// former into the latter before anything else runs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Edge {
    pub id: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(rename = "sourcePort", default, skip_serializing_if = "Option::is_none")]
    pub source_port: Option<String>,
    #[serde(rename = "targetPort", default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(rename = "layoutOptions", default)]
    pub layout_options: OptionMap,
    #[serde(default)]
    pub properties: OptionMap,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of the optional execution-time/child-provider log tree attached
/// to the root container when `logging` or `measure_execution_time` is
/// requested.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LogNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<LogNode>,
    #[serde(rename = "executionTime", default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
}

/// A node in the graph tree. Containers nest arbitrarily; a container with
/// no children is a leaf node as far as the layout algorithms are concerned.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Container {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub children: Vec<Container>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(rename = "layoutOptions", default)]
    pub layout_options: OptionMap,
    #[serde(default)]
    pub properties: OptionMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LogNode>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Container {
    /// Ids of all descendants (children, grandchildren, ...) plus the ids of
    /// every port belonging to any of those descendants, plus this
    /// container's *own* ports. Used by the driver's `SEPARATE_CHILDREN`
    /// hierarchy check.
    pub fn descendant_and_own_port_ids(&self) -> std::collections::HashSet<String> {
        let mut ids = std::collections::HashSet::new();
        for port in &self.ports {
            ids.insert(port.id.clone());
        }
        fn walk(c: &Container, ids: &mut std::collections::HashSet<String>) {
            for child in &c.children {
                ids.insert(child.id.clone());
                for port in &child.ports {
                    ids.insert(port.id.clone());
                }
                walk(child, ids);
            }
        }
        walk(self, &mut ids);
        ids
    }
}
