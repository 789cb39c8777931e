//! The `rectpacking` provider: a shelf-packing algorithm. Children are
//! sorted by height descending and packed left-to-right into shelves whose
//! target width is `max(sqrt(total_expanded_area), widest_child + 2*spacing)`.

use super::common::{finalize_bounds, padding_of, route_unrouted_edges, spacing_of};
use crate::error::Result;
use crate::graph::{Container, OptionMap};
use crate::options::keys;
use crate::registry::LayoutProvider;

pub struct RectpackingProvider;

impl LayoutProvider for RectpackingProvider {
    fn layout(&self, container: &mut Container, global_options: &OptionMap) -> Result<()> {
        let padding = padding_of(global_options);
        let spacing = spacing_of(global_options, keys::SPACING_NODE_NODE, 20.0);

        if container.children.is_empty() {
            container.width = padding.left + padding.right;
            container.height = padding.top + padding.bottom;
            return Ok(());
        }

        let total_expanded_area: f64 = container
            .children
            .iter()
            .map(|c| (c.width + spacing) * (c.height + spacing))
            .sum();
        let widest = container
            .children
            .iter()
            .map(|c| c.width)
            .fold(0.0_f64, f64::max);
        let shelf_width = total_expanded_area.sqrt().max(widest + 2.0 * spacing);

        let mut order: Vec<usize> = (0..container.children.len()).collect();
        order.sort_by(|&a, &b| {
            container.children[b]
                .height
                .partial_cmp(&container.children[a].height)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut cursor_x = padding.left;
        let mut cursor_y = padding.top;
        let mut shelf_height = 0.0_f64;

        for idx in order {
            let (w, h) = (container.children[idx].width, container.children[idx].height);
            if cursor_x > padding.left && cursor_x + w > padding.left + shelf_width {
                cursor_x = padding.left;
                cursor_y += shelf_height + spacing;
                shelf_height = 0.0;
            }
            container.children[idx].x = cursor_x;
            container.children[idx].y = cursor_y;
            cursor_x += w + spacing;
            shelf_height = shelf_height.max(h);
        }

        route_unrouted_edges(container);
        finalize_bounds(container, padding);
        Ok(())
    }
}
