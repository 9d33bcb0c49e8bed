//! Core data model for the wavy circle editor.
//!
//! A shape is a closed ring of [`Node`]s. Each node carries its on-curve
//! position, the angle it was generated at, two cubic Bezier handles, and the
//! symmetry group it belongs to. The ring is regenerated wholesale from
//! [`Params`](crate::params::Params) or patched in place by the drag
//! controller, never both at once.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ─── Canvas ──────────────────────────────────────────────────────────────

/// Logical canvas edge length. The canvas is always square.
pub const CANVAS_SIZE: f64 = 800.0;

/// Center of the logical canvas; every shape is generated around it.
pub const CANVAS_CENTER: Point = Point::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0);

// ─── Nodes ───────────────────────────────────────────────────────────────

/// One vertex of the generated curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// On-curve position in canvas coordinates.
    pub pos: Point,
    /// Angle (radians, `0..2π`) the node was generated at.
    pub theta: f64,
    /// Incoming Bezier handle.
    pub handle1: Point,
    /// Outgoing Bezier handle.
    pub handle2: Point,
    /// Nodes at the same phase within each repeated period share a group.
    pub symmetry_group: usize,
}

impl Node {
    pub fn handle(&self, kind: HandleKind) -> Point {
        match kind {
            HandleKind::Handle1 => self.handle1,
            HandleKind::Handle2 => self.handle2,
        }
    }

    pub fn handle_mut(&mut self, kind: HandleKind) -> &mut Point {
        match kind {
            HandleKind::Handle1 => &mut self.handle1,
            HandleKind::Handle2 => &mut self.handle2,
        }
    }

    /// Position of the given drag part of this node.
    pub fn part(&self, part: DragPart) -> Point {
        match part {
            DragPart::Node => self.pos,
            DragPart::Handle(kind) => self.handle(kind),
        }
    }

    /// Move the node and both of its handles by the same delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
        self.handle1 += delta;
        self.handle2 += delta;
    }

    /// Rewrite the handle opposite to `source` as the reflection of `source`
    /// through the node position, keeping the tangent line straight.
    pub fn mirror_from(&mut self, source: HandleKind) {
        let arm = self.handle(source) - self.pos;
        *self.handle_mut(source.opposite()) = self.pos - arm;
    }

    /// Angle of the node position around the canvas center.
    pub fn polar_angle(&self) -> f64 {
        polar_angle(self.pos)
    }
}

/// Angle of a point around [`CANVAS_CENTER`], in `(-π, π]`.
pub fn polar_angle(p: Point) -> f64 {
    (p - CANVAS_CENTER).atan2()
}

/// Which Bezier handle of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandleKind {
    Handle1,
    Handle2,
}

impl HandleKind {
    pub fn opposite(self) -> Self {
        match self {
            Self::Handle1 => Self::Handle2,
            Self::Handle2 => Self::Handle1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Handle1 => "handle1",
            Self::Handle2 => "handle2",
        }
    }
}

/// The part of a node a pointer can grab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragPart {
    Node,
    Handle(HandleKind),
}

/// A draggable element on the canvas: one part of one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragTarget {
    pub index: usize,
    pub part: DragPart,
}

impl DragTarget {
    pub const fn node(index: usize) -> Self {
        Self {
            index,
            part: DragPart::Node,
        }
    }

    pub const fn handle(index: usize, kind: HandleKind) -> Self {
        Self {
            index,
            part: DragPart::Handle(kind),
        }
    }
}

// ─── View ────────────────────────────────────────────────────────────────

/// Scale then rotate (degrees, clockwise on screen) about the canvas
/// center. Nodes live in shape space; every layer drawn from them, and
/// every hit test against them, goes through this transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTransform {
    pub scale: f64,
    pub rotate: f64,
}

impl Default for ShapeTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotate: 0.0,
        }
    }
}

impl ShapeTransform {
    pub fn new(scale: f64, rotate: f64) -> Self {
        Self { scale, rotate }
    }

    pub fn is_rotated(&self) -> bool {
        self.rotate != 0.0
    }

    pub fn is_scaled(&self) -> bool {
        (self.scale - 1.0).abs() > f64::EPSILON
    }

    pub fn is_identity(&self) -> bool {
        !self.is_rotated() && !self.is_scaled()
    }

    /// Shape space → canvas space.
    pub fn apply(&self, p: Point) -> Point {
        let v = (p - CANVAS_CENTER) * self.scale;
        CANVAS_CENTER + rotate_vec(v, self.rotate.to_radians())
    }

    /// Canvas space → shape space. A zero scale is treated as 1.
    pub fn invert(&self, p: Point) -> Point {
        let scale = if self.scale.abs() < f64::EPSILON {
            1.0
        } else {
            self.scale
        };
        let v = rotate_vec(p - CANVAS_CENTER, -self.rotate.to_radians());
        CANVAS_CENTER + v / scale
    }
}

fn rotate_vec(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Zoom about the canvas center followed by a pan offset.
///
/// Maps canvas coordinates to view coordinates as
/// `view = center·(1 − zoom) + zoom·(canvas + pan)`. The shape transform
/// sits underneath, between node coordinates and the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub zoom: f64,
    pub pan: Vec2,
    pub shape: ShapeTransform,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            shape: ShapeTransform::default(),
        }
    }
}

impl ViewTransform {
    pub fn new(zoom: f64, pan: Vec2) -> Self {
        Self {
            zoom,
            pan,
            shape: ShapeTransform::default(),
        }
    }

    pub fn with_shape(self, shape: ShapeTransform) -> Self {
        Self { shape, ..self }
    }

    /// Where a node-space point is drawn on screen.
    pub fn project(&self, p: Point) -> Point {
        self.to_view(self.shape.apply(p))
    }

    /// Inverse of [`project`](Self::project): the node-space point under a
    /// view position.
    pub fn locate(&self, p: Point) -> Point {
        self.shape.invert(self.to_canvas(p))
    }

    /// Translation applied before scaling so that zoom stays centered.
    pub fn origin(&self) -> Vec2 {
        CANVAS_CENTER.to_vec2() * (1.0 - self.zoom)
    }

    pub fn to_view(&self, p: Point) -> Point {
        (self.origin() + (p.to_vec2() + self.pan) * self.zoom).to_point()
    }

    /// Inverse of [`to_view`](Self::to_view). A zero zoom is treated as 1.
    pub fn to_canvas(&self, p: Point) -> Point {
        let zoom = if self.zoom.abs() < f64::EPSILON {
            1.0
        } else {
            self.zoom
        };
        ((p.to_vec2() - self.origin()) / zoom - self.pan).to_point()
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// A validated `#rrggbb` color, stored lowercase.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

fn is_hex_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl HexColor {
    pub const WHITE: &'static str = "#ffffff";

    /// Parse `#rgb` or `#rrggbb` (the `#` is optional). Short forms expand.
    pub fn parse(raw: &str) -> Option<Self> {
        let hex = raw.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !is_hex_digits(hex) {
            return None;
        }
        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return None,
        };
        Some(Self(format!("#{}", expanded.to_ascii_lowercase())))
    }

    pub fn white() -> Self {
        Self(Self::WHITE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::white()
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HexColor::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s}")))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
