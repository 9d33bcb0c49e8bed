//! Drag controller for symmetric node editing.
//!
//! A four-state machine: `Idle`, `DraggingNode`, `DraggingHandle1`,
//! `DraggingHandle2`. Pointer input is translated into [`RingMutation`]s that
//! the editor applies to its node ring in place.
//!
//! On every move the cumulative pointer delta since drag start is rotated per
//! sibling by the angle between that sibling and the dragged node's start
//! position, then damped. Siblings therefore move consistently with the
//! rotational symmetry instead of all shifting by the same screen delta.

use crate::input::InputEvent;
use kurbo::{Point, Vec2};
use wavy_core::model::polar_angle;
use wavy_core::{DragPart, DragTarget, HandleKind, Node, UiState, siblings_of};

/// Default damping applied to the cumulative pointer delta on each move.
pub const SMOOTH_DRAG_SCALE: f64 = 0.01;

/// State captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Index of the grabbed node.
    pub index: usize,
    /// Pointer position at pointer-down.
    pub pointer_start: Point,
    /// Position of the grabbed element (node or handle) at pointer-down.
    pub target_start: Point,
    /// Position of the grabbed node at pointer-down.
    pub node_start: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    DraggingNode(DragSession),
    DraggingHandle1(DragSession),
    DraggingHandle2(DragSession),
}

impl DragState {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::DraggingNode(s) | Self::DraggingHandle1(s) | Self::DraggingHandle2(s) => Some(s),
        }
    }

    /// The part being dragged, if any.
    pub fn part(&self) -> Option<DragPart> {
        match self {
            Self::Idle => None,
            Self::DraggingNode(_) => Some(DragPart::Node),
            Self::DraggingHandle1(_) => Some(DragPart::Handle(HandleKind::Handle1)),
            Self::DraggingHandle2(_) => Some(DragPart::Handle(HandleKind::Handle2)),
        }
    }

    fn start(part: DragPart, session: DragSession) -> Self {
        match part {
            DragPart::Node => Self::DraggingNode(session),
            DragPart::Handle(HandleKind::Handle1) => Self::DraggingHandle1(session),
            DragPart::Handle(HandleKind::Handle2) => Self::DraggingHandle2(session),
        }
    }
}

/// An in-place edit of the node ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingMutation {
    /// Move a node together with both of its handles.
    TranslateNode { index: usize, delta: Vec2 },
    /// Move one handle; with `mirror`, reflect it onto the opposite handle.
    TranslateHandle {
        index: usize,
        handle: HandleKind,
        delta: Vec2,
        mirror: bool,
    },
}

/// Apply one mutation. Returns `false` if the index is out of range.
pub fn apply_mutation(nodes: &mut [Node], mutation: &RingMutation) -> bool {
    match *mutation {
        RingMutation::TranslateNode { index, delta } => {
            let Some(node) = nodes.get_mut(index) else {
                return false;
            };
            node.translate(delta);
        }
        RingMutation::TranslateHandle {
            index,
            handle,
            delta,
            mirror,
        } => {
            let Some(node) = nodes.get_mut(index) else {
                return false;
            };
            *node.handle_mut(handle) += delta;
            if mirror {
                node.mirror_from(handle);
            }
        }
    }
    true
}

fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

pub struct DragController {
    state: DragState,
    damping: f64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(SMOOTH_DRAG_SCALE)
    }
}

impl DragController {
    pub fn new(damping: f64) -> Self {
        Self {
            state: DragState::Idle,
            damping,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Drop any session without producing mutations.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            log::debug!("drag cancelled");
        }
        self.state = DragState::Idle;
    }

    /// Handle an input event, returning the mutations to apply to `nodes`.
    ///
    /// `hit` is the element under the pointer for pointer-down events.
    /// Pointer-down is ignored unless symmetric editing is on.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        hit: Option<DragTarget>,
        nodes: &[Node],
        ui: &UiState,
    ) -> Vec<RingMutation> {
        match event {
            InputEvent::PointerDown { x, y } => {
                if !ui.symmetric_edit {
                    return vec![];
                }
                let Some(target) = hit else {
                    return vec![];
                };
                let Some(node) = nodes.get(target.index) else {
                    return vec![];
                };
                let session = DragSession {
                    index: target.index,
                    pointer_start: Point::new(*x, *y),
                    target_start: node.part(target.part),
                    node_start: node.pos,
                };
                log::debug!("drag start: node {} {:?}", target.index, target.part);
                self.state = DragState::start(target.part, session);
                vec![]
            }
            InputEvent::PointerMove { x, y } => {
                let (Some(session), Some(part)) = (self.state.session(), self.state.part()) else {
                    return vec![];
                };
                let delta = Point::new(*x, *y) - session.pointer_start;
                let base_angle = polar_angle(session.node_start);

                siblings_of(session.index, nodes)
                    .into_iter()
                    .map(|index| {
                        let angle = nodes[index].polar_angle() - base_angle;
                        let step = rotate(delta, angle) * self.damping;
                        match part {
                            DragPart::Node => RingMutation::TranslateNode { index, delta: step },
                            DragPart::Handle(handle) => RingMutation::TranslateHandle {
                                index,
                                handle,
                                delta: step,
                                mirror: ui.symmetrical_bezier,
                            },
                        }
                    })
                    .collect()
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                if let Some(session) = self.state.session() {
                    log::debug!("drag end: node {}", session.index);
                }
                self.state = DragState::Idle;
                vec![]
            }
            _ => vec![],
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
