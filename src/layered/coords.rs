//! Phase 6: coordinate assignment. Layer index becomes the primary axis
//! (vertical for `DOWN`/`UP`, horizontal for `RIGHT`/`LEFT`); within-layer
//! position becomes the secondary axis. Each layer is centered on the
//! secondary axis within the widest layer. `UP`/`LEFT` are expressed as
//! the same stacking routine fed a reversed layer sequence, mirrored by
//! direct analogy with the rest of the `Direction` enum.

use super::internal::{Direction, LGraph};
use crate::options::Padding;

pub fn assign_coordinates(
    graph: &mut LGraph,
    direction: Direction,
    node_spacing: f64,
    layer_spacing: f64,
    padding: Padding,
) {
    let max_layer = graph.max_layer();
    let horizontal = direction.is_horizontal();
    let layer_count = max_layer as usize + 1;

    let mut layers: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (i, node) in graph.nodes.iter().enumerate() {
        layers[node.layer as usize].push(i);
    }
    for bucket in &mut layers {
        bucket.sort_by_key(|&i| graph.nodes[i].position);
    }

    // Primary-axis extent of each layer (thickness along the layering
    // axis) and secondary-axis extent (sum of node sizes + spacing).
    let primary_extent: Vec<f64> = layers
        .iter()
        .map(|bucket| {
            bucket
                .iter()
                .map(|&i| if horizontal { graph.nodes[i].width } else { graph.nodes[i].height })
                .fold(0.0_f64, f64::max)
        })
        .collect();
    let secondary_extent: Vec<f64> = layers
        .iter()
        .map(|bucket| {
            if bucket.is_empty() {
                return 0.0;
            }
            let sizes: f64 = bucket
                .iter()
                .map(|&i| if horizontal { graph.nodes[i].height } else { graph.nodes[i].width })
                .sum();
            sizes + node_spacing * (bucket.len() as f64 - 1.0)
        })
        .collect();
    let widest = secondary_extent.iter().cloned().fold(0.0_f64, f64::max);

    let mut layer_offset = vec![0.0_f64; layer_count + 1];
    for l in 0..layer_count {
        layer_offset[l + 1] = layer_offset[l] + primary_extent[l] + layer_spacing;
    }
    let total_primary = layer_offset[layer_count] - layer_spacing;

    for (logical_layer, bucket) in layers.iter().enumerate() {
        let rendered_layer = match direction {
            Direction::Down | Direction::Right => logical_layer,
            Direction::Up | Direction::Left => layer_count - 1 - logical_layer,
        };
        let primary = layer_offset[rendered_layer];
        let secondary_start = (widest - secondary_extent[logical_layer]) / 2.0;
        let mut cursor = secondary_start;

        for &i in bucket {
            let secondary_size = if horizontal { graph.nodes[i].height } else { graph.nodes[i].width };
            let primary_size = if horizontal { graph.nodes[i].width } else { graph.nodes[i].height };
            let primary_pos = match direction {
                Direction::Down | Direction::Right => primary,
                Direction::Up | Direction::Left => total_primary - primary - primary_size,
            };
            let (x, y) = if horizontal {
                (primary_pos, cursor)
            } else {
                (cursor, primary_pos)
            };
            graph.nodes[i].x = x + padding.left;
            graph.nodes[i].y = y + padding.top;
            cursor += secondary_size + node_spacing;
        }
    }
}
