//! The `mrtree` provider: a straightforward rooted-tree layout. Roots are
//! nodes with no incoming edge; subtrees are sized recursively and placed
//! in bands per depth level.

use super::common::{finalize_bounds, padding_of, route_unrouted_edges, spacing_of};
use crate::error::Result;
use crate::graph::{Container, OptionMap};
use crate::options::keys;
use crate::registry::LayoutProvider;
use std::collections::{HashMap, HashSet};

pub struct MrTreeProvider;

impl LayoutProvider for MrTreeProvider {
    fn layout(&self, container: &mut Container, global_options: &OptionMap) -> Result<()> {
        let padding = padding_of(global_options);
        let node_spacing = spacing_of(global_options, keys::SPACING_NODE_NODE, 20.0);
        let layer_spacing = spacing_of(
            global_options,
            keys::SPACING_NODE_NODE_BETWEEN_LAYERS,
            20.0,
        );
        let n = container.children.len();
        if n == 0 {
            container.width = padding.left + padding.right;
            container.height = padding.top + padding.bottom;
            return Ok(());
        }

        let index_of: HashMap<&str, usize> = container
            .children
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.as_str(), i))
            .collect();
        let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut has_incoming = vec![false; n];
        for edge in &container.edges {
            if let (Some(s), Some(t)) = (edge.sources.first(), edge.targets.first()) {
                if let (Some(&si), Some(&ti)) = (index_of.get(s.as_str()), index_of.get(t.as_str())) {
                    if si != ti {
                        children_of[si].push(ti);
                        has_incoming[ti] = true;
                    }
                }
            }
        }

        let roots: Vec<usize> = (0..n).filter(|&i| !has_incoming[i]).collect();
        let roots: Vec<usize> = if roots.is_empty() { vec![0] } else { roots };

        let sizes = container
            .children
            .iter()
            .map(|c| (c.width.max(1.0), c.height.max(1.0)))
            .collect::<Vec<_>>();

        let mut subtree_width = vec![0.0_f64; n];
        let mut depth = vec![0usize; n];
        let mut visited = HashSet::new();
        for &root in &roots {
            compute_subtree(root, &children_of, &sizes, node_spacing, &mut subtree_width, &mut visited);
        }
        for &root in &roots {
            assign_depth(root, 0, &children_of, &mut depth, &mut HashSet::new());
        }

        let mut cursor_x = padding.left;
        let mut layer_y: HashMap<usize, f64> = HashMap::new();
        let max_height_per_depth = {
            let mut m: HashMap<usize, f64> = HashMap::new();
            for i in 0..n {
                let h = sizes[i].1;
                let entry = m.entry(depth[i]).or_insert(0.0);
                if h > *entry {
                    *entry = h;
                }
            }
            m
        };
        let mut running_y = padding.top;
        let mut depths: Vec<usize> = max_height_per_depth.keys().copied().collect();
        depths.sort_unstable();
        for d in depths {
            layer_y.insert(d, running_y);
            running_y += max_height_per_depth[&d] + layer_spacing;
        }

        for &root in &roots {
            cursor_x = place_subtree(root, cursor_x, &children_of, &sizes, &subtree_width, &layer_y, &depth, node_spacing, container);
        }
        let _ = cursor_x;

        route_unrouted_edges(container);
        finalize_bounds(container, padding);
        Ok(())
    }
}

fn compute_subtree(
    node: usize,
    children_of: &[Vec<usize>],
    sizes: &[(f64, f64)],
    spacing: f64,
    subtree_width: &mut [f64],
    visited: &mut HashSet<usize>,
) -> f64 {
    if !visited.insert(node) {
        return subtree_width[node];
    }
    let own_width = sizes[node].0;
    let children_width: f64 = children_of[node]
        .iter()
        .map(|&c| compute_subtree(c, children_of, sizes, spacing, subtree_width, visited))
        .sum::<f64>()
        + spacing * children_of[node].len().saturating_sub(1) as f64;
    let width = own_width.max(children_width);
    subtree_width[node] = width;
    width
}

fn assign_depth(node: usize, d: usize, children_of: &[Vec<usize>], depth: &mut [usize], visited: &mut HashSet<usize>) {
    if !visited.insert(node) {
        return;
    }
    depth[node] = d;
    for &c in &children_of[node] {
        assign_depth(c, d + 1, children_of, depth, visited);
    }
}

#[allow(clippy::too_many_arguments)]
fn place_subtree(
    node: usize,
    left: f64,
    children_of: &[Vec<usize>],
    sizes: &[(f64, f64)],
    subtree_width: &[f64],
    layer_y: &HashMap<usize, f64>,
    depth: &[usize],
    spacing: f64,
    container: &mut Container,
) -> f64 {
    let width = subtree_width[node];
    let x = left + (width - sizes[node].0) / 2.0;
    let y = layer_y[&depth[node]];
    container.children[node].x = x;
    container.children[node].y = y;

    let mut child_cursor = left;
    for &child in &children_of[node] {
        child_cursor = place_subtree(child, child_cursor, children_of, sizes, subtree_width, layer_y, depth, spacing, container) + spacing;
    }
    left + width
}
