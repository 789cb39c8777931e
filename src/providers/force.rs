//! The `force` provider: Fruchterman-Reingold force-directed placement.

use super::common::{finalize_bounds, padding_of, route_unrouted_edges, seed_from_id, spacing_of};
use crate::error::Result;
use crate::graph::{Container, OptionMap};
use crate::options::keys;
use crate::registry::LayoutProvider;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

const MAX_ITERATIONS: usize = 300;
const COOLING_FACTOR: f64 = 0.95;
const MIN_TEMPERATURE: f64 = 0.01;

pub struct ForceProvider;

impl LayoutProvider for ForceProvider {
    fn layout(&self, container: &mut Container, global_options: &OptionMap) -> Result<()> {
        let padding = padding_of(global_options);
        let node_spacing = spacing_of(global_options, keys::SPACING_NODE_NODE, 20.0);
        let n = container.children.len();

        if n == 0 {
            container.width = padding.left + padding.right;
            container.height = padding.top + padding.bottom;
            return Ok(());
        }

        let mut rng = Pcg64::seed_from_u64(seed_from_id(&container.id));
        let area = n as f64 * node_spacing * node_spacing;
        let k = (area / n as f64).sqrt();
        if n == 1 {
            container.children[0].x = padding.left;
            container.children[0].y = padding.top;
            route_unrouted_edges(container);
            finalize_bounds(container, padding);
            return Ok(());
        }

        let mut positions: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.gen_range(-k..k) * n as f64, rng.gen_range(-k..k) * n as f64))
            .collect();

        let index_of: std::collections::HashMap<&str, usize> = container
            .children
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.as_str(), i))
            .collect();
        let edges: Vec<(usize, usize)> = container
            .edges
            .iter()
            .filter_map(|e| {
                let s = index_of.get(e.sources.first()?.as_str())?;
                let t = index_of.get(e.targets.first()?.as_str())?;
                Some((*s, *t))
            })
            .collect();

        let mut temperature = k;
        for _ in 0..MAX_ITERATIONS {
            if temperature < MIN_TEMPERATURE {
                break;
            }
            let mut displacement = vec![(0.0_f64, 0.0_f64); n];

            for i in 0..n {
                for j in 0..n {
                    if i == j {
                        continue;
                    }
                    let dx = positions[i].0 - positions[j].0;
                    let dy = positions[i].1 - positions[j].1;
                    let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                    let repulsive = k * k / dist;
                    displacement[i].0 += dx / dist * repulsive;
                    displacement[i].1 += dy / dist * repulsive;
                }
            }

            for &(s, t) in &edges {
                let dx = positions[s].0 - positions[t].0;
                let dy = positions[s].1 - positions[t].1;
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                let attractive = dist * dist / k;
                let (ux, uy) = (dx / dist, dy / dist);
                displacement[s].0 -= ux * attractive;
                displacement[s].1 -= uy * attractive;
                displacement[t].0 += ux * attractive;
                displacement[t].1 += uy * attractive;
            }

            for i in 0..n {
                let (dx, dy) = displacement[i];
                let dist = (dx * dx + dy * dy).sqrt().max(0.01);
                let capped = dist.min(temperature);
                positions[i].0 += dx / dist * capped;
                positions[i].1 += dy / dist * capped;
            }

            temperature *= COOLING_FACTOR;
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
