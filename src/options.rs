//! Layout option keys, values, parsing, and scoping.
//!
//! Three concepts: *option keys* (canonical dot-qualified names, short
//! aliases, and `org.eclipse.`-prefixed forms, all normalized to one
//! canonical form), *option values* (scalars or structured strings that must
//! be parsed lazily at the query site), and *scoping* (how the effective
//! option set at a container is assembled from per-call globals, inherited
//! parent options, and the element's own `layoutOptions`/`properties`).

use crate::error::{LayoutError, Result};
use crate::graph::OptionMap;
use serde_json::Value;

pub mod keys {
    pub const ALGORITHM: &str = "elk.algorithm";
    pub const DIRECTION: &str = "elk.direction";
    pub const PADDING: &str = "elk.padding";
    pub const SPACING_NODE_NODE: &str = "elk.spacing.nodeNode";
    pub const SPACING_NODE_NODE_BETWEEN_LAYERS: &str =
        "elk.layered.spacing.nodeNodeBetweenLayers";
    pub const SPACING_EDGE_NODE: &str = "elk.spacing.edgeNode";
    pub const SPACING_EDGE_EDGE: &str = "elk.spacing.edgeEdge";
    pub const NODE_LABELS_PLACEMENT: &str = "elk.nodeLabels.placement";
    pub const PORT_CONSTRAINTS: &str = "elk.portConstraints";
    pub const PORT_SIDE: &str = "elk.port.side";
    pub const PORT_INDEX: &str = "elk.port.index";
    pub const LAYER_CONSTRAINT: &str = "elk.layered.layering.layerConstraint";
    pub const LAYERING_STRATEGY: &str = "elk.layered.layering.strategy";
    pub const HIERARCHY_HANDLING: &str = "elk.hierarchyHandling";
    pub const POSITION: &str = "elk.position";
    pub const BEND_POINTS: &str = "elk.bendPoints";
}

/// Short-name and `org.eclipse.`-free aliases, short form -> canonical form.
const ALIASES: &[(&str, &str)] = &[
    ("algorithm", keys::ALGORITHM),
    ("direction", keys::DIRECTION),
    ("spacing", keys::SPACING_NODE_NODE),
    ("layered.spacing.nodeNodeBetweenLayers", keys::SPACING_NODE_NODE_BETWEEN_LAYERS),
    ("layering.strategy", keys::LAYERING_STRATEGY),
    ("hierarchyHandling", keys::HIERARCHY_HANDLING),
    ("portConstraints", keys::PORT_CONSTRAINTS),
    ("port.side", keys::PORT_SIDE),
    ("port.index", keys::PORT_INDEX),
    ("layerConstraint", keys::LAYER_CONSTRAINT),
    ("position", keys::POSITION),
    ("bendPoints", keys::BEND_POINTS),
];

/// Short algorithm name (and its `elk.`-prefixed spelling) -> fully
/// qualified provider id.
const ALGORITHM_ALIASES: &[(&str, &str)] = &[
    ("layered", "org.eclipse.elk.layered"),
    ("elk.layered", "org.eclipse.elk.layered"),
    ("stress", "org.eclipse.elk.stress"),
    ("elk.stress", "org.eclipse.elk.stress"),
    ("mrtree", "org.eclipse.elk.mrtree"),
    ("elk.mrtree", "org.eclipse.elk.mrtree"),
    ("radial", "org.eclipse.elk.radial"),
    ("elk.radial", "org.eclipse.elk.radial"),
    ("force", "org.eclipse.elk.force"),
    ("elk.force", "org.eclipse.elk.force"),
    ("disco", "org.eclipse.elk.disco"),
    ("elk.disco", "org.eclipse.elk.disco"),
    ("sporeOverlap", "org.eclipse.elk.sporeOverlap"),
    ("elk.sporeOverlap", "org.eclipse.elk.sporeOverlap"),
    ("sporeCompaction", "org.eclipse.elk.sporeCompaction"),
    ("elk.sporeCompaction", "org.eclipse.elk.sporeCompaction"),
    ("rectpacking", "org.eclipse.elk.rectpacking"),
    ("elk.rectpacking", "org.eclipse.elk.rectpacking"),
    ("fixed", "org.eclipse.elk.fixed"),
    ("elk.fixed", "org.eclipse.elk.fixed"),
];

/// Resolve a short name, `elk.`-qualified name, or `org.eclipse.elk.`-
/// qualified name to its canonical `elk.<area>.<name>` form. Unknown keys
/// pass through unchanged.
pub fn resolve_option_key(key: &str) -> String {
    if let Some((_, canonical)) = ALIASES.iter().find(|(short, _)| *short == key) {
        return canonical.to_string();
    }
    if let Some(rest) = key.strip_prefix("org.eclipse.") {
        return rest.to_string();
    }
    key.to_string()
}

/// Resolve an algorithm short name or qualified name to its fully qualified
/// provider id. Unknown ids are returned unchanged (rejection happens at
/// provider lookup).
pub fn resolve_algorithm(name: Option<&str>) -> String {
    let name = match name {
        Some(n) => n,
        None => return "org.eclipse.elk.layered".to_string(),
    };
    if let Some((_, full)) = ALGORITHM_ALIASES.iter().find(|(short, _)| *short == name) {
        return full.to_string();
    }
    name.to_string()
}

/// All name variants under which a canonical key may appear in a
/// `layoutOptions`/`properties` map: the canonical form itself, its
/// `org.eclipse.`-prefixed form, and any short alias that maps to it.
fn key_variants(canonical: &str) -> Vec<String> {
    let mut variants = vec![canonical.to_string()];
    variants.push(format!("org.eclipse.{canonical}"));
    for (short, full) in ALIASES {
        if *full == canonical {
            variants.push((*short).to_string());
        }
    }
    variants
}

/// Look up `canonical_key` on an element: its own `layoutOptions` map first,
/// then its `properties` map, each checked under every name variant.
pub fn get_own_option<'a>(
    layout_options: &'a OptionMap,
    properties: &'a OptionMap,
    canonical_key: &str,
) -> Option<&'a Value> {
    let variants = key_variants(canonical_key);
    for map in [layout_options, properties] {
        for variant in &variants {
            if let Some(v) = map.get(variant) {
                return Some(v);
            }
        }
    }
    None
}

/// Parse ELK padding format: `[left=2, top=3, right=3, bottom=2]`, or the
/// same without brackets. Missing fields default to 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

pub fn parse_padding(value: &str) -> Result<Padding> {
    let mut padding = Padding::default();
    let s = value.trim();
    let s = s.strip_prefix('[').unwrap_or(s);
    let s = s.strip_suffix(']').unwrap_or(s);
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, raw) = part.split_once('=').ok_or_else(|| {
            LayoutError::InvalidGraph(format!("malformed padding entry: {part}"))
        })?;
        let number: f64 = raw.trim().parse().map_err(|_| {
            LayoutError::InvalidGraph(format!("malformed padding value: {raw}"))
        })?;
        match key.trim().to_ascii_lowercase().as_str() {
            "left" => padding.left = number,
            "top" => padding.top = number,
            "right" => padding.right = number,
            "bottom" => padding.bottom = number,
            other => {
                return Err(LayoutError::InvalidGraph(format!(
                    "unknown padding field: {other}"
                )))
            }
        }
    }
    Ok(padding)
}

/// Parse KVector format: `(23, 43)` -> `(x, y)`.
pub fn parse_vector(value: &str) -> Result<(f64, f64)> {
    let s = value.trim();
    let s = s.strip_prefix('(').unwrap_or(s);
    let s = s.strip_suffix(')').unwrap_or(s);
    let mut parts = s.split(',');
    let x: f64 = parts
        .next()
        .ok_or_else(|| LayoutError::InvalidGraph(format!("malformed vector: {value}")))?
        .trim()
        .parse()
        .map_err(|_| LayoutError::InvalidGraph(format!("malformed vector: {value}")))?;
    let y: f64 = parts
        .next()
        .ok_or_else(|| LayoutError::InvalidGraph(format!("malformed vector: {value}")))?
        .trim()
        .parse()
        .map_err(|_| LayoutError::InvalidGraph(format!("malformed vector: {value}")))?;
    Ok((x, y))
}

/// Parse KVectorChain format: `( {1,2}, {3,4} )` -> `[(1,2), (3,4)]`.
pub fn parse_vector_chain(value: &str) -> Result<Vec<(f64, f64)>> {
    let s = value.trim();
    let s = s.strip_prefix('(').unwrap_or(s);
    let s = s.strip_suffix(')').unwrap_or(s);
    let mut result = Vec::new();
    let mut rest = s;
    while let Some(open) = rest.find('{') {
        let close = rest[open..]
            .find('}')
            .ok_or_else(|| LayoutError::InvalidGraph(format!("malformed vector chain: {value}")))?
            + open;
        let inner = &rest[open + 1..close];
        let mut parts = inner.split(',');
        let x: f64 = parts
            .next()
            .ok_or_else(|| LayoutError::InvalidGraph(format!("malformed vector chain entry: {inner}")))?
            .trim()
            .parse()
            .map_err(|_| LayoutError::InvalidGraph(format!("malformed vector chain entry: {inner}")))?;
        let y: f64 = parts
            .next()
            .ok_or_else(|| LayoutError::InvalidGraph(format!("malformed vector chain entry: {inner}")))?
            .trim()
            .parse()
            .map_err(|_| LayoutError::InvalidGraph(format!("malformed vector chain entry: {inner}")))?;
        result.push((x, y));
        rest = &rest[close + 1..];
    }
    Ok(result)
}

/// Coerce a raw option `Value` to a number. Accepts numeric values and
/// numeric strings.
pub fn as_number(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| LayoutError::InvalidGraph("option value is not a finite number".to_string())),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| LayoutError::InvalidGraph(format!("malformed numeric option: {s}"))),
        other => Err(LayoutError::InvalidGraph(format!(
            "expected numeric option, got {other}"
        ))),
    }
}

/// Coerce a raw option `Value` to a string (strings pass through; anything
/// else is rendered via its JSON/display form).
pub fn as_str(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string().trim_matches('"').to_string(),
    }
}

/// Default layout option values, as an [`OptionMap`] keyed by canonical
/// option id. `elk.direction` resolves to `DOWN` here: the observed runtime
/// default observed at runtime (see `DESIGN.md`).
pub fn defaults() -> OptionMap {
    let mut map = OptionMap::new();
    map.insert(keys::DIRECTION.to_string(), Value::String("DOWN".to_string()));
    map.insert(
        keys::PADDING.to_string(),
        Value::String("[left=12, top=12, right=12, bottom=12]".to_string()),
    );
    map.insert(keys::SPACING_NODE_NODE.to_string(), Value::from(20.0));
    map.insert(
        keys::SPACING_NODE_NODE_BETWEEN_LAYERS.to_string(),
        Value::from(20.0),
    );
    map.insert(keys::SPACING_EDGE_NODE.to_string(), Value::from(10.0));
    map.insert(keys::SPACING_EDGE_EDGE.to_string(), Value::from(10.0));
    map.insert(
        keys::NODE_LABELS_PLACEMENT.to_string(),
        Value::String(String::new()),
    );
    map.insert(
        keys::PORT_CONSTRAINTS.to_string(),
        Value::String("UNDEFINED".to_string()),
    );
    map.insert(
        keys::LAYERING_STRATEGY.to_string(),
        Value::String("LONGEST_PATH".to_string()),
    );
    map.insert(
        keys::HIERARCHY_HANDLING.to_string(),
        Value::String("SEPARATE_CHILDREN".to_string()),
    );
    map
}

/// Merge maps in scoping order, normalizing every key to its canonical
/// form: per-call globals, then the inherited parent effective map, then
/// the element's own `layoutOptions`, then its own `properties`. Later
/// sources overwrite earlier ones, so an element's own settings always win
/// over anything inherited or passed in per-call.
pub fn effective_options(
    global: &OptionMap,
    parent_effective: Option<&OptionMap>,
    own_layout_options: &OptionMap,
    own_properties: &OptionMap,
) -> OptionMap {
    let mut result = OptionMap::new();
    let mut layer = |source: &OptionMap, result: &mut OptionMap| {
        for (k, v) in source {
            result.insert(resolve_option_key(k), v.clone());
        }
    };
    layer(global, &mut result);
    if let Some(parent) = parent_effective {
        layer(parent, &mut result);
    }
    layer(own_layout_options, &mut result);
    layer(own_properties, &mut result);
    result
}

/// The shape of value a known option id expects, for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Number,
    Padding,
    Vector,
    VectorChain,
    Enum,
}

/// Every canonical option key this engine understands, with the value
/// shape it expects.
pub fn known_options() -> &'static [(&'static str, OptionKind)] {
    &[
        (keys::ALGORITHM, OptionKind::String),
        (keys::DIRECTION, OptionKind::Enum),
        (keys::PADDING, OptionKind::Padding),
        (keys::SPACING_NODE_NODE, OptionKind::Number),
        (keys::SPACING_NODE_NODE_BETWEEN_LAYERS, OptionKind::Number),
        (keys::SPACING_EDGE_NODE, OptionKind::Number),
        (keys::SPACING_EDGE_EDGE, OptionKind::Number),
        (keys::NODE_LABELS_PLACEMENT, OptionKind::String),
        (keys::PORT_CONSTRAINTS, OptionKind::Enum),
        (keys::PORT_SIDE, OptionKind::Enum),
        (keys::PORT_INDEX, OptionKind::Number),
        (keys::LAYER_CONSTRAINT, OptionKind::Enum),
        (keys::LAYERING_STRATEGY, OptionKind::Enum),
        (keys::HIERARCHY_HANDLING, OptionKind::Enum),
        (keys::POSITION, OptionKind::Vector),
        (keys::BEND_POINTS, OptionKind::VectorChain),
    ]
}

/// The `elk.<category>.*` prefixes this engine recognizes options under.
pub fn known_categories() -> &'static [&'static str] {
    &["elk", "elk.layered", "elk.spacing", "elk.port", "elk.nodeLabels"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_option_key_handles_aliases_and_prefixes() {
        assert_eq!(resolve_option_key("direction"), keys::DIRECTION);
        assert_eq!(resolve_option_key("elk.direction"), "elk.direction");
        assert_eq!(resolve_option_key("org.eclipse.elk.direction"), "elk.direction");
        assert_eq!(resolve_option_key("unknown.key"), "unknown.key");
    }

    #[test]
    fn resolve_algorithm_aliases() {
        assert_eq!(resolve_algorithm(Some("layered")), "org.eclipse.elk.layered");
        assert_eq!(resolve_algorithm(Some("elk.force")), "org.eclipse.elk.force");
        assert_eq!(resolve_algorithm(Some("foo.bar.baz")), "foo.bar.baz");
        assert_eq!(resolve_algorithm(None), "org.eclipse.elk.layered");
    }

    #[test]
    fn parse_padding_with_and_without_brackets() {
        let p = parse_padding("[left=2, top=3, right=3, bottom=2]").unwrap();
        assert_eq!(p, Padding { left: 2.0, top: 3.0, right: 3.0, bottom: 2.0 });

        let p2 = parse_padding("left=1, top=2").unwrap();
        assert_eq!(p2, Padding { left: 1.0, top: 2.0, right: 0.0, bottom: 0.0 });
    }

    #[test]
    fn parse_vector_basic() {
        assert_eq!(parse_vector("(23, 43)").unwrap(), (23.0, 43.0));
    }

    #[test]
    fn parse_vector_chain_basic() {
        let chain = parse_vector_chain("( {1,2}, {3,4} )").unwrap();
        assert_eq!(chain, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn effective_options_element_wins_over_global() {
        let mut global = OptionMap::new();
        global.insert("org.eclipse.elk.direction".to_string(), Value::String("DOWN".to_string()));
        let mut own = OptionMap::new();
        own.insert(keys::DIRECTION.to_string(), Value::String("RIGHT".to_string()));

        let eff = effective_options(&global, None, &own, &OptionMap::new());
        assert_eq!(eff.get(keys::DIRECTION).unwrap(), "RIGHT");
    }

    #[test]
    fn get_own_option_checks_both_maps_all_variants() {
        let mut props = OptionMap::new();
        props.insert("port.side".to_string(), Value::String("EAST".to_string()));
        let layout_options = OptionMap::new();
        let v = get_own_option(&layout_options, &props, keys::PORT_SIDE);
        assert_eq!(v.unwrap(), "EAST");
    }
}
