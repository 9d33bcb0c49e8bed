//! SVG rendering of the drawing surface.
//!
//! The canvas view paints four layers, back to front: axes (grid), path,
//! handles, nodes. Every layer carries the same view transform (zoom about the
//! center, then pan); the layers drawn from node coordinates nest the shape
//! transform (scale and rotate about the center) inside it. The export variant drops the debug overlays and emits a
//! standalone document on the fixed `0 0 800 800` viewBox.

use std::fmt::Write;
use wavy_core::path::clean_zero;
use wavy_core::{
    CANVAS_CENTER, CANVAS_SIZE, Node, Params, ShapeTransform, UiState, ViewTransform,
};

use crate::hit::{HANDLE_RADIUS, NODE_RADIUS};

/// File name used when downloading the exported document.
pub const EXPORT_FILE_NAME: &str = "wavy_circle.svg";

/// MIME type of the exported document.
pub const SVG_MIME: &str = "image/svg+xml";

/// Overlay colors for the canvas view.
#[derive(Debug, Clone)]
pub struct CanvasTheme {
    pub axis: &'static str,
    pub handle_arm: &'static str,
    pub handle_fill: &'static str,
    pub handle_stroke: &'static str,
    pub node_fill: &'static str,
    pub node_stroke: &'static str,
}

impl CanvasTheme {
    pub fn dark() -> Self {
        Self {
            axis: "#5c5c5c",
            handle_arm: "#5c5c5c",
            handle_fill: "#7a6cff",
            handle_stroke: "#f2f2f2",
            node_fill: "#111111",
            node_stroke: "#f2f2f2",
        }
    }

    pub fn light() -> Self {
        Self {
            axis: "#b5b5b5",
            handle_arm: "#b5b5b5",
            handle_fill: "#7a6cff",
            handle_stroke: "#1a1a1a",
            node_fill: "#ffffff",
            node_stroke: "#1a1a1a",
        }
    }
}

impl Default for CanvasTheme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Everything a render pass reads.
#[derive(Debug, Clone, Copy)]
pub struct SvgScene<'a> {
    pub params: &'a Params,
    pub ui: &'a UiState,
    pub nodes: &'a [Node],
    pub path_data: &'a str,
    pub view: ViewTransform,
}

/// `transform` attribute value for the view (zoom about center, then pan).
pub fn view_transform_attr(view: &ViewTransform) -> String {
    let origin = view.origin();
    format!(
        "translate({}, {}) scale({}) translate({}, {})",
        clean_zero(origin.x),
        clean_zero(origin.y),
        view.zoom,
        clean_zero(view.pan.x),
        clean_zero(view.pan.y)
    )
}

/// `transform` attribute for the shape itself (rotate and scale about the
/// canvas center), or `None` when both are identity.
pub fn shape_transform_attr(shape: &ShapeTransform) -> Option<String> {
    if shape.is_identity() {
        return None;
    }
    let (cx, cy) = (CANVAS_CENTER.x, CANVAS_CENTER.y);
    let mut parts = Vec::with_capacity(2);
    if shape.is_rotated() {
        parts.push(format!("rotate({} {cx} {cy})", shape.rotate));
    }
    if shape.is_scaled() {
        parts.push(format!(
            "translate({cx} {cy}) scale({}) translate({} {})",
            shape.scale, -cx, -cy
        ));
    }
    Some(parts.join(" "))
}

/// Transform for layers drawn from node coordinates: the view, then the
/// shape transform nested inside it.
pub fn shape_layer_attr(view: &ViewTransform) -> String {
    let outer = view_transform_attr(view);
    match shape_transform_attr(&view.shape) {
        Some(inner) => format!("{outer} {inner}"),
        None => outer,
    }
}

fn paint(enabled: bool, color: &str) -> &str {
    if enabled { color } else { "none" }
}

fn render_path_group(out: &mut String, scene: &SvgScene<'_>, transform: &str) {
    let params = scene.params;
    let stroke = paint(params.path_enabled, params.path_color.as_str());
    let fill = paint(params.fill_enabled, params.fill_color.as_str());
    let _ = writeln!(out, "  <g id=\"pathGroup\" transform=\"{transform}\">");
    let _ = writeln!(
        out,
        "    <path d=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{}\" />",
        scene.path_data, params.stroke_width
    );
    out.push_str("  </g>\n");
}

fn render_axes_group(out: &mut String, transform: &str, theme: &CanvasTheme) {
    let (cx, cy) = (CANVAS_CENTER.x, CANVAS_CENTER.y);
    let (lo, hi) = (-CANVAS_SIZE, CANVAS_SIZE * 2.0);
    let _ = writeln!(out, "  <g id=\"axesGroup\" transform=\"{transform}\">");
    let _ = writeln!(
        out,
        "    <line x1=\"{lo}\" y1=\"{cy}\" x2=\"{hi}\" y2=\"{cy}\" stroke=\"{}\" stroke-width=\"1\" />",
        theme.axis
    );
    let _ = writeln!(
        out,
        "    <line x1=\"{cx}\" y1=\"{lo}\" x2=\"{cx}\" y2=\"{hi}\" stroke=\"{}\" stroke-width=\"1\" />",
        theme.axis
    );
    out.push_str("  </g>\n");
}

fn render_handles_group(out: &mut String, nodes: &[Node], transform: &str, theme: &CanvasTheme) {
    let _ = writeln!(out, "  <g id=\"handlesGroup\" transform=\"{transform}\">");
    for (index, node) in nodes.iter().enumerate() {
        let (x, y) = (clean_zero(node.pos.x), clean_zero(node.pos.y));
        for handle in [node.handle1, node.handle2] {
            let _ = writeln!(
                out,
                "    <line x1=\"{x}\" y1=\"{y}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"3 3\" />",
                clean_zero(handle.x),
                clean_zero(handle.y),
                theme.handle_arm
            );
        }
        for (kind, handle) in [("handle1", node.handle1), ("handle2", node.handle2)] {
            let _ = writeln!(
                out,
                "    <circle cx=\"{}\" cy=\"{}\" r=\"{HANDLE_RADIUS}\" class=\"wavy-handle\" data-node-index=\"{index}\" data-handle-type=\"{kind}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1.5\" />",
                clean_zero(handle.x),
                clean_zero(handle.y),
                theme.handle_fill,
                theme.handle_stroke
            );
        }
    }
    out.push_str("  </g>\n");
}

fn render_nodes_group(out: &mut String, nodes: &[Node], transform: &str, theme: &CanvasTheme) {
    let _ = writeln!(out, "  <g id=\"nodesGroup\" transform=\"{transform}\">");
    for (index, node) in nodes.iter().enumerate() {
        let _ = writeln!(
            out,
            "    <circle cx=\"{}\" cy=\"{}\" r=\"{NODE_RADIUS}\" class=\"wavy-node\" data-node-index=\"{index}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"2\" />",
            clean_zero(node.pos.x),
            clean_zero(node.pos.y),
            theme.node_fill,
            theme.node_stroke
        );
    }
    out.push_str("  </g>\n");
}

/// Render the interactive canvas, with overlays as the UI flags allow.
pub fn render_canvas(scene: &SvgScene<'_>, theme: &CanvasTheme) -> String {
    let transform = view_transform_attr(&scene.view);
    let layer = shape_layer_attr(&scene.view);
    let mut out = String::with_capacity(1024 + scene.path_data.len() + scene.nodes.len() * 512);
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100%\" height=\"100%\" viewBox=\"0 0 {CANVAS_SIZE} {CANVAS_SIZE}\" preserveAspectRatio=\"xMidYMid meet\">"
    );

    if scene.ui.show_grid {
        render_axes_group(&mut out, &transform, theme);
    }
    render_path_group(&mut out, scene, &layer);
    if scene.ui.handles_visible() {
        render_handles_group(&mut out, scene.nodes, &layer, theme);
    }
    if scene.ui.show_nodes {
        render_nodes_group(&mut out, scene.nodes, &layer, theme);
    }

    out.push_str("</svg>");
    log::trace!(
        "render canvas: {} nodes, {} bytes",
        scene.nodes.len(),
        out.len()
    );
    out
}

/// Render the standalone export document: the path layer only.
pub fn render_export(scene: &SvgScene<'_>) -> String {
    let transform = shape_layer_attr(&scene.view);
    let mut out = String::with_capacity(512 + scene.path_data.len());
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS_SIZE}\" height=\"{CANVAS_SIZE}\" viewBox=\"0 0 {CANVAS_SIZE} {CANVAS_SIZE}\">"
    );
    render_path_group(&mut out, scene, &transform);
    out.push_str("</svg>\n");
    out
}

// ─── Tests ───────────────────────────────────────────────────────────────
