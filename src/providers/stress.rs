//! The `stress` provider: Kamada-Kawai style stress majorization.

use super::common::{finalize_bounds, padding_of, route_unrouted_edges, seed_from_id, spacing_of};
use crate::error::Result;
use crate::graph::{Container, OptionMap};
use crate::options::keys;
use crate::registry::LayoutProvider;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::collections::VecDeque;

const MAX_ITERATIONS: usize = 200;
const CONVERGENCE_THRESHOLD: f64 = 0.01;

pub struct StressProvider;

impl LayoutProvider for StressProvider {
    fn layout(&self, container: &mut Container, global_options: &OptionMap) -> Result<()> {
        let padding = padding_of(global_options);
        let node_spacing = spacing_of(global_options, keys::SPACING_NODE_NODE, 20.0);
        let n = container.children.len();

        if n == 0 {
            container.width = padding.left + padding.right;
            container.height = padding.top + padding.bottom;
            return Ok(());
        }

        let index_of: std::collections::HashMap<&str, usize> = container
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

        let graph_distance = bfs_all_pairs(&adjacency);
        let max_dist = graph_distance
            .iter()
            .flatten()
            .copied()
            .filter(|d| d.is_finite())
            .fold(0.0_f64, f64::max);
        let ideal: Vec<Vec<f64>> = graph_distance
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&d| if d.is_finite() { d * node_spacing } else { (max_dist + 1.0) * node_spacing })
                    .collect()
            })
            .collect();

        let mut rng = Pcg64::seed_from_u64(seed_from_id(&container.id));
        let mut positions: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.gen_range(-1.0..1.0) * node_spacing * n as f64, rng.gen_range(-1.0..1.0) * node_spacing * n as f64))
            .collect();

        for _ in 0..MAX_ITERATIONS {
            let mut max_move = 0.0_f64;
            for i in 0..n {
                if n == 1 {
                    break;
                }
                let mut sum_x = 0.0;
                let mut sum_y = 0.0;
                let mut sum_w = 0.0;
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let d = ideal[i][j].max(0.01);
                    let w = 1.0 / (d * d);
                    let dx = positions[j].0;
                    let dy = positions[j].1;
                    let cur_dx = positions[i].0 - positions[j].0;
                    let cur_dy = positions[i].1 - positions[j].1;
                    let cur_dist = (cur_dx * cur_dx + cur_dy * cur_dy).sqrt().max(0.001);
                    sum_x += w * (dx + d * cur_dx / cur_dist);
                    sum_y += w * (dy + d * cur_dy / cur_dist);
                    sum_w += w;
                }
                let new_x = sum_x / sum_w;
                let new_y = sum_y / sum_w;
                let moved = ((new_x - positions[i].0).powi(2) + (new_y - positions[i].1).powi(2)).sqrt();
                max_move = max_move.max(moved);
                positions[i] = (new_x, new_y);
            }
            if max_move < CONVERGENCE_THRESHOLD {
                break;
            }
        }

        let min_x = positions.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let min_y = positions.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        for (i, child) in container.children.iter_mut().enumerate() {
            child.x = positions[i].0 - min_x + padding.left;
            child.y = positions[i].1 - min_y + padding.top;
        }

        route_unrouted_edges(container);
        finalize_bounds(container, padding);
        Ok(())
    }
}

/// Graph-theoretic distance between every pair of nodes via BFS from each
/// node. Unreachable pairs are `f64::INFINITY`, later saturated to
/// `max_dist + 1` by the caller.
fn bfs_all_pairs(adjacency: &[Vec<usize>]) -> Vec<Vec<f64>> {
    let n = adjacency.len();
    (0..n)
        .map(|start| {
            let mut dist = vec![f64::INFINITY; n];
            dist[start] = 0.0;
            let mut queue = VecDeque::new();
            queue.push_back(start);
            while let Some(u) = queue.pop_front() {
                for &v in &adjacency[u] {
                    if dist[v].is_infinite() {
                        dist[v] = dist[u] + 1.0;
                        queue.push_back(v);
                    }
                }
            }
            dist
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn single_node_placed_at_padding_origin() {
        let mut container = Container {
            id: "g".to_string(),
            ..Default::default()
        };
        container.children.push(Container {
            id: "a".to_string(),
            ..Default::default()
        });
        StressProvider.layout(&mut container, &IndexMap::new()).unwrap();
        assert_eq!(container.children[0].x, 0.0);
        assert_eq!(container.children[0].y, 0.0);
    }

    #[test]
    fn deterministic_for_same_seed() {
        let mut c1 = Container {
            id: "g".to_string(),
            ..Default::default()
        };
        for id in ["a", "b", "c"] {
            c1.children.push(Container {
                id: id.to_string(),
                width: 10.0,
                height: 10.0,
                ..Default::default()
            });
        }
        let mut c2 = c1.clone();
        StressProvider.layout(&mut c1, &IndexMap::new()).unwrap();
        StressProvider.layout(&mut c2, &IndexMap::new()).unwrap();
        for (a, b) in c1.children.iter().zip(c2.children.iter()) {
            assert!((a.x - b.x).abs() < 1e-9);
        }
    }
}
