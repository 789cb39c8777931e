//! Shared helpers used by every auxiliary provider: routing any edges the
//! provider itself didn't route as straight center-to-center segments, and
//! finalizing the container's bounding size — both done identically across
//! Fixed, Force, Stress, MrTree, Radial, Rectpacking, and Spore.

use crate::graph::{Container, Point, Section};
use crate::options::{self, keys, OptionMap};
use std::collections::HashMap;

/// Center point of every direct child, keyed by id.
pub fn center_points(container: &Container) -> HashMap<String, Point> {
    container
        .children
        .iter()
        .map(|c| {
            (
                c.id.clone(),
                Point::new(c.x + c.width / 2.0, c.y + c.height / 2.0),
            )
        })
        .collect()
}

/// Give every edge that still has no `sections` a single straight segment
/// between the center points of its first source and first target.
pub fn route_unrouted_edges(container: &mut Container) {
    route_unrouted_edges_with(container, center_points(container));
}

/// As [`route_unrouted_edges`], but an endpoint equal to `container`'s own
/// id resolves to the container's own center. Used by `INCLUDE_CHILDREN`
/// flattening, where an edge endpoint may reference the subcontainer
/// itself rather than one of its children.
pub fn route_unrouted_edges_including_self(container: &mut Container) {
    let mut centers = center_points(container);
    centers.insert(
        container.id.clone(),
        Point::new(
            container.x + container.width / 2.0,
            container.y + container.height / 2.0,
        ),
    );
    route_unrouted_edges_with(container, centers);
}

fn route_unrouted_edges_with(container: &mut Container, centers: HashMap<String, Point>) {
    for edge in &mut container.edges {
        if !edge.sections.is_empty() {
            continue;
        }
        let (Some(src_id), Some(tgt_id)) = (edge.sources.first(), edge.targets.first()) else {
            continue;
        };
        let (Some(start), Some(end)) = (centers.get(src_id), centers.get(tgt_id)) else {
            continue;
        };
        edge.sections.push(Section {
            start_point: *start,
            end_point: *end,
            bend_points: Vec::new(),
        });
    }
}

/// Resolve `elk.padding` from an option map, defaulting to zero padding on
/// any parse failure or absence (callers have already validated option
/// values during earlier phases; a missing padding here just means "use the
/// outer default" rather than failing the whole layout).
pub fn padding_of(effective: &OptionMap) -> options::Padding {
    effective
        .get(keys::PADDING)
        .map(options::as_str)
        .and_then(|s| options::parse_padding(&s).ok())
        .unwrap_or_default()
}

pub fn spacing_of(effective: &OptionMap, key: &str, default: f64) -> f64 {
    effective
        .get(key)
        .and_then(|v| options::as_number(v).ok())
        .unwrap_or(default)
}

/// Size the container to enclose all direct children plus right/bottom
/// padding, exactly as the layered engine's write-back phase does.
pub fn finalize_bounds(container: &mut Container, padding: options::Padding) {
    let max_x = container
        .children
        .iter()
        .map(|c| c.x + c.width)
        .fold(0.0_f64, f64::max);
    let max_y = container
        .children
        .iter()
        .map(|c| c.y + c.height)
        .fold(0.0_f64, f64::max);
    container.width = max_x + padding.right;
    container.height = max_y + padding.bottom;
}

/// Seed a deterministic PRNG from a container id, so Force/Stress runs are
/// reproducible across calls for the same graph (see `DESIGN.md`).
pub fn seed_from_id(id: &str) -> u64 {
    // FNV-1a
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in id.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
