//! Path serializer: node ring → SVG path data.
//!
//! The path always wraps from the last node back to the first, so it has one
//! segment per node. Smooth output uses each node's outgoing handle and the
//! next node's incoming handle as cubic control points.

use crate::model::Node;
use kurbo::Point;
use std::fmt::Write;

/// Collapse negative zero so it prints as `0`. Coordinates are otherwise
/// printed in their shortest round-trip form (`520`, `400.5`).
pub fn clean_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

fn push_point(out: &mut String, p: Point) {
    let _ = write!(out, "{} {}", clean_zero(p.x), clean_zero(p.y));
}

/// Serialize `nodes` as a closed path. Empty input gives an empty string.
pub fn nodes_to_path(nodes: &[Node], smooth_corners: bool) -> String {
    let Some(first) = nodes.first() else {
        return String::new();
    };

    let mut out = String::with_capacity(nodes.len() * if smooth_corners { 64 } else { 24 });
    out.push_str("M ");
    push_point(&mut out, first.pos);

    for (index, current) in nodes.iter().enumerate() {
        let next = &nodes[(index + 1) % nodes.len()];
        if smooth_corners {
            out.push_str(" C ");
            push_point(&mut out, current.handle2);
            out.push_str(", ");
            push_point(&mut out, next.handle1);
            out.push_str(", ");
            push_point(&mut out, next.pos);
        } else {
            out.push_str(" L ");
            push_point(&mut out, next.pos);
        }
    }

    out
}

/// Number of drawing segments (`C` or `L` commands) in serialized path data.
pub fn segment_count(path: &str) -> usize {
    path.split_whitespace()
        .filter(|token| matches!(*token, "C" | "L"))
        .count()
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::compute_nodes;
    use crate::params::Params;
    use pretty_assertions::assert_eq;

    fn node(x: f64, y: f64) -> Node {
        Node {
            pos: Point::new(x, y),
            theta: 0.0,
            handle1: Point::new(x - 1.0, y),
            handle2: Point::new(x + 1.0, y),
            symmetry_group: 0,
        }
    }

    #[test]
    fn empty_ring_gives_empty_path() {
        assert_eq!(nodes_to_path(&[], true), "");
        assert_eq!(nodes_to_path(&[], false), "");
    }

    #[test]
    fn sharp_path_wraps_to_start() {
        let nodes = [node(0.0, 0.0), node(10.0, 0.0), node(10.0, 10.0)];
        assert_eq!(
            nodes_to_path(&nodes, false),
            "M 0 0 L 10 0 L 10 10 L 0 0"
        );
    }

    #[test]
    fn smooth_path_uses_outgoing_and_incoming_handles() {
        let nodes = [node(0.0, 0.0), node(10.0, 5.5)];
        assert_eq!(
            nodes_to_path(&nodes, true),
            "M 0 0 C 1 0, 9 5.5, 10 5.5 C 11 5.5, -1 0, 0 0"
        );
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        let nodes = [node(-0.0, -0.0)];
        assert!(nodes_to_path(&nodes, false).starts_with("M 0 0"));
    }

    #[test]
    fn default_ring_path_shape() {
        let nodes = compute_nodes(&Params::default());
        let smooth = nodes_to_path(&nodes, true);
        let sharp = nodes_to_path(&nodes, false);
        assert!(smooth.starts_with("M 520 400 "));
        assert!(sharp.starts_with("M 520 400 "));
        assert_eq!(smooth.matches(" C ").count(), 20);
        assert_eq!(sharp.matches(" L ").count(), 20);
        assert_eq!(segment_count(&smooth), nodes.len());
        assert_eq!(segment_count(&sharp), nodes.len());
    }
}
