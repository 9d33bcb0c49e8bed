//! Hit testing: view point → drag target.
//!
//! Walks the overlay layers front-to-back (nodes are painted above handles,
//! later nodes above earlier ones) and returns the first grabbable element
//! under the pointer. Hidden layers are never hit. The pointer is mapped
//! back through the view and shape transforms, so elements are grabbed
//! where they are drawn.

use kurbo::Point;
use wavy_core::{DragTarget, HandleKind, Node, UiState, ViewTransform};

/// Radius of a painted node circle, in canvas units.
pub const NODE_RADIUS: f64 = 5.0;

/// Radius of a painted handle circle, in canvas units.
pub const HANDLE_RADIUS: f64 = 4.0;

/// Grab radii, in node-space units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRadii {
    pub node: f64,
    pub handle: f64,
}

impl Default for HitRadii {
    fn default() -> Self {
        Self {
            node: NODE_RADIUS,
            handle: HANDLE_RADIUS,
        }
    }
}

fn within(a: Point, b: Point, radius: f64) -> bool {
    (a - b).hypot() <= radius
}

/// Find the topmost draggable element at view position `(px, py)`.
/// Returns `None` on empty canvas.
pub fn hit_test(
    nodes: &[Node],
    ui: &UiState,
    view: &ViewTransform,
    radii: HitRadii,
    px: f64,
    py: f64,
) -> Option<DragTarget> {
    if !ui.show_nodes {
        return None;
    }
    let p = view.locate(Point::new(px, py));

    if let Some(index) = nodes.iter().rposition(|n| within(n.pos, p, radii.node)) {
        return Some(DragTarget::node(index));
    }

    if !ui.handles_visible() {
        return None;
    }
    for (index, node) in nodes.iter().enumerate().rev() {
        for kind in [HandleKind::Handle2, HandleKind::Handle1] {
            if within(node.handle(kind), p, radii.handle) {
                return Some(DragTarget::handle(index, kind));
            }
        }
    }
    None
}
