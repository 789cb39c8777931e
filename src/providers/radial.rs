//! The `radial` provider: BFS rings around the most-connected node.

use super::common::{finalize_bounds, padding_of, route_unrouted_edges, spacing_of};
use crate::error::Result;
use crate::graph::{Container, OptionMap};
use crate::options::keys;
use crate::registry::LayoutProvider;
use std::collections::{HashMap, VecDeque};
use std::f64::consts::PI;

pub struct RadialProvider;

impl LayoutProvider for RadialProvider {
    fn layout(&self, container: &mut Container, global_options: &OptionMap) -> Result<()> {
        let padding = padding_of(global_options);
        let node_spacing = spacing_of(global_options, keys::SPACING_NODE_NODE, 20.0);
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
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); n];
        for edge in &container.edges {
            if let (Some(s), Some(t)) = (edge.sources.first(), edge.targets.first()) {
                if let (Some(&si), Some(&ti)) = (index_of.get(s.as_str()), index_of.get(t.as_str())) {
                    if si != ti {
                        adjacency[si].push(ti);
                        adjacency[ti].push(si);
                    }
                }
            }
        }

        let center = (0..n)
            .max_by_key(|&i| adjacency[i].len())
            .unwrap_or(0);

        let mut level = vec![usize::MAX; n];
        level[center] = 0;
        let mut queue = VecDeque::new();
        queue.push_back(center);
        while let Some(u) = queue.pop_front() {
            for &v in &adjacency[u] {
                if level[v] == usize::MAX {
                    level[v] = level[u] + 1;
                    queue.push_back(v);
                }
            }
        }
        // Disconnected nodes: place on an outer ring beyond any reached level.
        let max_level = level.iter().copied().filter(|&l| l != usize::MAX).max().unwrap_or(0);
        for l in level.iter_mut() {
            if *l == usize::MAX {
                *l = max_level + 1;
            }
        }

        let mut rings: HashMap<usize, Vec<usize>> = HashMap::new();
        for i in 0..n {
            rings.entry(level[i]).or_default().push(i);
        }

        let cx = padding.left + node_spacing * 4.0;
        let cy = padding.top + node_spacing * 4.0;
        for (ring_level, members) in &rings {
            let radius = *ring_level as f64 * 2.0 * node_spacing;
            let count = members.len();
            for (k, &idx) in members.iter().enumerate() {
                let angle = if count == 0 { 0.0 } else { 2.0 * PI * k as f64 / count as f64 };
                let (w, h) = (container.children[idx].width, container.children[idx].height);
                container.children[idx].x = cx + radius * angle.cos() - w / 2.0;
                container.children[idx].y = cy + radius * angle.sin() - h / 2.0;
            }
        }

        let min_x = container.children.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
        let min_y = container.children.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
        let shift_x = padding.left - min_x.min(padding.left);
        let shift_y = padding.top - min_y.min(padding.top);
        for child in &mut container.children {
            child.x += shift_x;
            child.y += shift_y;
        }

        route_unrouted_edges(container);
        finalize_bounds(container, padding);
        Ok(())
    }
}
