//! Layout driver: the top-level, recursive entry point that walks a
//! container tree, resolves an algorithm and a provider at each level,
//! and dispatches to it.

use crate::error::{LayoutError, Result};
use crate::graph::{Container, LogNode, OptionMap};
use crate::options::{self, get_own_option, keys};
use crate::registry::{self, LayoutProvider};
use std::time::Instant;
use tracing::info_span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HierarchyHandling {
    SeparateChildren,
    IncludeChildren,
}

impl HierarchyHandling {
    fn from_str(s: &str) -> HierarchyHandling {
        match s {
            "INCLUDE_CHILDREN" => HierarchyHandling::IncludeChildren,
            _ => HierarchyHandling::SeparateChildren,
        }
    }
}

/// Owns the default option set and the algorithm registry; stateless
/// otherwise, so a single instance is reusable across many `layout` calls.
pub struct LayoutDriver {
    default_layout_options: OptionMap,
}

impl LayoutDriver {
    pub fn new(default_layout_options: OptionMap) -> Self {
        LayoutDriver { default_layout_options }
    }

    /// Recursively lays out `graph` in place.
    pub fn layout(
        &self,
        graph: &mut Container,
        layout_options: Option<OptionMap>,
        logging: bool,
        measure_execution_time: bool,
    ) -> Result<()> {
        graph.logging = None;
        let start = (logging || measure_execution_time).then(Instant::now);

        let mut global = self.default_layout_options.clone();
        if let Some(overrides) = layout_options {
            for (k, v) in overrides {
                global.insert(options::resolve_option_key(&k), v);
            }
        }

        let mut root_log = logging.then(|| LogNode {
            name: graph.id.clone(),
            children: Vec::new(),
            execution_time: None,
        });

        recurse(graph, None, &global, logging, root_log.as_mut())?;

        if let Some(mut log) = root_log {
            if let Some(t) = start {
                log.execution_time = Some(t.elapsed().as_secs_f64() * 1000.0);
            }
            graph.logging = Some(log);
        } else if let Some(t) = start {
            graph.logging = Some(LogNode {
                name: graph.id.clone(),
                children: Vec::new(),
                execution_time: Some(t.elapsed().as_secs_f64() * 1000.0),
            });
        }

        Ok(())
    }

    /// Entry point for callers at a dynamic-dispatch boundary (e.g. a
    /// JSON-RPC handler) where the graph argument may be absent entirely,
    /// distinct from the typed `layout` above where `&mut Container`
    /// already statically guarantees presence.
    pub fn layout_json(
        &self,
        graph: Option<serde_json::Value>,
        layout_options: Option<OptionMap>,
        logging: bool,
        measure_execution_time: bool,
    ) -> Result<serde_json::Value> {
        let mut value = graph.ok_or(LayoutError::MissingArgument)?;
        crate::validate::validate_graph(&value)?;
        crate::validate::coerce_ids(&mut value);
        crate::validate::normalize_edges(&mut value);
        let mut container: Container = serde_json::from_value(value)
            .map_err(|e| LayoutError::InvalidGraph(e.to_string()))?;
        self.layout(&mut container, layout_options, logging, measure_execution_time)?;
        serde_json::to_value(container).map_err(|e| LayoutError::InvalidGraph(e.to_string()))
    }

    pub fn known_algorithms(&self) -> &'static [&'static str] {
        registry::KNOWN_ALGORITHMS
    }

    pub fn known_options(&self) -> &'static [(&'static str, options::OptionKind)] {
        options::known_options()
    }

    pub fn known_categories(&self) -> &'static [&'static str] {
        options::known_categories()
    }
}

fn recurse(
    container: &mut Container,
    parent_effective: Option<&OptionMap>,
    global: &OptionMap,
    logging: bool,
    mut log_node: Option<&mut LogNode>,
) -> Result<()> {
    let effective = options::effective_options(
        global,
        parent_effective,
        &container.layout_options,
        &container.properties,
    );

    let hierarchy = effective
        .get(keys::HIERARCHY_HANDLING)
        .map(options::as_str)
        .map(|s| HierarchyHandling::from_str(&s))
        .unwrap_or(HierarchyHandling::SeparateChildren);

    if hierarchy == HierarchyHandling::SeparateChildren {
        for child in &container.children {
            if child.children.is_empty() {
                continue;
            }
            let valid = child.descendant_and_own_port_ids();
            for edge in &child.edges {
                for endpoint in edge.sources.iter().chain(edge.targets.iter()) {
                    if endpoint == &child.id || !valid.contains(endpoint) {
                        return Err(LayoutError::UnsupportedGraph(format!(
                            "edge \"{}\" in container \"{}\" references an id outside its own hierarchy: \"{endpoint}\"",
                            edge.id, child.id
                        )));
                    }
                }
            }
        }

        for child in &mut container.children {
            if child.children.is_empty() {
                continue;
            }
            let mut child_log = logging.then(|| LogNode {
                name: child.id.clone(),
                children: Vec::new(),
                execution_time: None,
            });
            recurse(child, Some(&effective), global, logging, child_log.as_mut())?;
            if let (Some(parent_log), Some(child_log)) = (log_node.as_deref_mut(), child_log) {
                parent_log.children.push(child_log);
            }
        }
    }

    let algorithm_name = get_own_option(&container.layout_options, &container.properties, keys::ALGORITHM)
        .map(options::as_str)
        .or_else(|| effective.get(keys::ALGORITHM).map(options::as_str));
    let algorithm_id = options::resolve_algorithm(algorithm_name.as_deref());
    let provider: Box<dyn LayoutProvider> = registry::get_layout_provider(&algorithm_id).ok_or_else(|| {
        LayoutError::UnsupportedConfiguration(format!("unknown layout algorithm \"{algorithm_id}\""))
    })?;

    if logging {
        if let Some(parent_log) = log_node.as_deref_mut() {
            parent_log.children.push(LogNode {
                name: format!("{algorithm_id} on {}", container.id),
                children: Vec::new(),
                execution_time: None,
            });
        }
    }
    let _span = logging.then(|| info_span!("layout", algorithm = %algorithm_id, container = %container.id));

    provider.layout(container, &effective)?;

    if hierarchy == HierarchyHandling::IncludeChildren {
        run_include_children(provider.as_ref(), container, &effective)?;
    }

    Ok(())
}

/// For `INCLUDE_CHILDREN`: reapply the same provider to every descendant
/// subcontainer, at every depth, flattening the usual per-level scoping.
fn run_include_children(
    provider: &dyn LayoutProvider,
    container: &mut Container,
    global_options: &OptionMap,
) -> Result<()> {
    for child in &mut container.children {
        if child.children.is_empty() {
            continue;
        }
        provider.layout(child, global_options)?;
        crate::providers::common::route_unrouted_edges_including_self(child);
        run_include_children(provider, child, global_options)?;
    }
    Ok(())
}
