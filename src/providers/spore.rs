//! The `spore` providers (overlap removal and compaction). Both registry
//! ids (`sporeOverlap`, `sporeCompaction`) share this one implementation,
//! mirroring a single-module, two-entry-point shape for the
//! `elkpy/algorithms/spore.py`.
//!
//! Nodes keep their original radial direction from the center of gravity
//! and are pulled in (or pushed out) to the nearest distance along that
//! direction that clears every already-placed node, processed nearest to
//! the center first.

use super::common::{finalize_bounds, padding_of, route_unrouted_edges, spacing_of};
use crate::error::Result;
use crate::graph::{Container, OptionMap};
use crate::options::keys;
use crate::registry::LayoutProvider;

pub struct SporeProvider;

impl LayoutProvider for SporeProvider {
    fn layout(&self, container: &mut Container, global_options: &OptionMap) -> Result<()> {
        let padding = padding_of(global_options);
        let spacing = spacing_of(global_options, keys::SPACING_NODE_NODE, 20.0);
        let n = container.children.len();
        if n == 0 {
            container.width = padding.left + padding.right;
            container.height = padding.top + padding.bottom;
            return Ok(());
        }

        let cx = container.children.iter().map(|c| c.x + c.width / 2.0).sum::<f64>() / n as f64;
        let cy = container.children.iter().map(|c| c.y + c.height / 2.0).sum::<f64>() / n as f64;

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            let da = dist_sq(container.children[a].x + container.children[a].width / 2.0 - cx,
                container.children[a].y + container.children[a].height / 2.0 - cy);
            let db = dist_sq(container.children[b].x + container.children[b].width / 2.0 - cx,
                container.children[b].y + container.children[b].height / 2.0 - cy);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut placed: Vec<(f64, f64, f64, f64)> = Vec::with_capacity(n);
        for &idx in &order {
            let child = &container.children[idx];
            let (w, h) = (child.width, child.height);
            let center_x = child.x + w / 2.0;
            let center_y = child.y + h / 2.0;
            let (mut dx, mut dy) = (center_x - cx, center_y - cy);
            let mut dir_len = (dx * dx + dy * dy).sqrt();
            if dir_len < 1e-9 {
                dx = 1.0;
                dy = 0.0;
                dir_len = 1.0;
            }
            let (ux, uy) = (dx / dir_len, dy / dir_len);

            let mut radius = dir_len;
            loop {
                let candidate_x = cx + ux * radius - w / 2.0;
                let candidate_y = cy + uy * radius - h / 2.0;
                if !overlaps_any(candidate_x, candidate_y, w, h, &placed, spacing) {
                    placed.push((candidate_x, candidate_y, w, h));
                    container.children[idx].x = candidate_x;
                    container.children[idx].y = candidate_y;
                    break;
                }
                radius += spacing.max(1.0);
            }
        }

        let min_x = container.children.iter().map(|c| c.x).fold(f64::INFINITY, f64::min);
        let min_y = container.children.iter().map(|c| c.y).fold(f64::INFINITY, f64::min);
        for child in &mut container.children {
            child.x += padding.left - min_x;
            child.y += padding.top - min_y;
        }

        route_unrouted_edges(container);
        finalize_bounds(container, padding);
        Ok(())
    }
}

fn dist_sq(dx: f64, dy: f64) -> f64 {
    dx * dx + dy * dy
}

fn overlaps_any(x: f64, y: f64, w: f64, h: f64, placed: &[(f64, f64, f64, f64)], spacing: f64) -> bool {
    placed.iter().any(|&(px, py, pw, ph)| {
        x < px + pw + spacing && x + w + spacing > px && y < py + ph + spacing && y + h + spacing > py
    })
}
