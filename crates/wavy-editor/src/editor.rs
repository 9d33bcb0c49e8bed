//! The editor: composition root owning parameters, UI state, and the node
//! ring.
//!
//! The node ring is one owned buffer with two write paths. Parameter edits
//! replace it wholesale through the geometry engine; symmetric-edit drags
//! patch it by index. While symmetric editing is on, parameter edits leave
//! the ring alone so manual tweaks survive.

use crate::animation::{Animator, Clock, FrameHandle, FrameScheduler, is_animatable};
use crate::config::EditorConfig;
use crate::drag::{DragController, DragState, apply_mutation};
use crate::export::{ExportError, ExportTarget};
use crate::input::{InputEvent, Modifiers, is_space};
use crate::pan::PanController;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use kurbo::Point;
use serde::Serialize;
use wavy_core::{
    Node, ParamError, ParamKey, ParamValue, Params, UiFlag, UiState, ViewTransform,
    compute_nodes, nodes_to_path,
};
use wavy_render::{
    CanvasTheme, EXPORT_FILE_NAME, SVG_MIME, SvgScene, hit_test, render_canvas, render_export,
};

// ─── Stats ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Optimality {
    #[serde(rename = "Perfect symmetry")]
    PerfectSymmetry,
    #[serde(rename = "Manual tweaks")]
    ManualTweaks,
}

impl Optimality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PerfectSymmetry => "Perfect symmetry",
            Self::ManualTweaks => "Manual tweaks",
        }
    }
}

/// Summary shown next to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorStats {
    pub node_count: usize,
    pub handle_count: usize,
    pub optimality: Optimality,
}

// ─── Editor ──────────────────────────────────────────────────────────────

pub struct Editor<C: Clock, S: FrameScheduler> {
    params: Params,
    ui: UiState,
    nodes: Vec<Node>,
    path_data: String,
    drag: DragController,
    animator: Animator,
    pan: PanController,
    config: EditorConfig,
    theme: CanvasTheme,
    clock: C,
    scheduler: S,
    frame: Option<FrameHandle>,
}

impl<C: Clock, S: FrameScheduler> Editor<C, S> {
    pub fn new(clock: C, scheduler: S) -> Self {
        Self::with_config(EditorConfig::default(), clock, scheduler)
    }

    pub fn with_config(config: EditorConfig, clock: C, scheduler: S) -> Self {
        let mut editor = Self {
            params: Params::default(),
            ui: UiState::default(),
            nodes: Vec::new(),
            path_data: String::new(),
            drag: DragController::new(config.drag_damping),
            animator: Animator::new(),
            pan: PanController::new(),
            config,
            theme: CanvasTheme::default(),
            clock,
            scheduler,
            frame: None,
        };
        editor.regenerate();
        editor
    }

    // ── Accessors ──

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn path_data(&self) -> &str {
        &self.path_data
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The outstanding frame request, if any.
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.frame
    }

    pub fn set_theme(&mut self, theme: CanvasTheme) {
        self.theme = theme;
    }

    /// Current zoom and pan, over the shape's scale and rotation.
    pub fn view(&self) -> ViewTransform {
        ViewTransform::new(self.params.zoom, self.pan.offset())
            .with_shape(self.params.shape_transform())
    }

    pub fn stats(&self) -> EditorStats {
        let node_count = self.nodes.len();
        let optimality = if node_count == self.params.total_nodes() {
            Optimality::PerfectSymmetry
        } else {
            Optimality::ManualTweaks
        };
        EditorStats {
            node_count,
            handle_count: node_count * 2,
            optimality,
        }
    }

    // ── Ring maintenance ──

    /// Rebuild the ring from parameters and reserialize the path.
    pub fn regenerate(&mut self) {
        self.nodes = compute_nodes(&self.params);
        self.refresh_path();
        log::trace!("regenerated {} nodes", self.nodes.len());
    }

    fn refresh_path(&mut self) {
        self.path_data = nodes_to_path(&self.nodes, self.ui.smooth_corners);
    }

    fn regenerate_unless_editing(&mut self) {
        if !self.ui.symmetric_edit {
            self.regenerate();
        }
    }

    // ── Parameters ──

    /// Apply a typed parameter edit. Rejected edits keep the previous value
    /// and return `false`.
    pub fn set_param(&mut self, key: ParamKey, value: ParamValue) -> bool {
        let result = self.params.set(key, value);
        self.after_param_edit(key, result)
    }

    /// Apply text typed into a bound field.
    pub fn set_param_text(&mut self, key: ParamKey, input: &str) -> bool {
        let result = self.params.set_from_str(key, input);
        self.after_param_edit(key, result)
    }

    /// Like [`set_param_text`](Self::set_param_text) with the key given by
    /// its wire name.
    pub fn set_param_named(&mut self, name: &str, input: &str) -> bool {
        match name.parse::<ParamKey>() {
            Ok(key) => self.set_param_text(key, input),
            Err(err) => {
                log::debug!("ignored edit: {err}");
                false
            }
        }
    }

    fn after_param_edit(&mut self, key: ParamKey, result: Result<(), ParamError>) -> bool {
        if let Err(err) = result {
            log::debug!("ignored edit: {err}");
            return false;
        }
        if key == ParamKey::Shape {
            self.animator.rebase(&self.params);
        } else if self.ui.animated_params.contains(&key)
            && let Some(value) = self.params.number(key)
        {
            self.animator.set_offset(key, value);
        }
        self.regenerate_unless_editing();
        true
    }

    // ── UI state ──

    pub fn set_ui_flag(&mut self, flag: UiFlag, value: bool) {
        if self.ui.flag(flag) == value {
            return;
        }
        self.ui.set_flag(flag, value);
        log::debug!("{flag} = {value}");
        match flag {
            UiFlag::SymmetricEdit if !value => self.drag.cancel(),
            UiFlag::SmoothCorners => self.refresh_path(),
            UiFlag::Animate => self.sync_animation(),
            _ => {}
        }
    }

    pub fn toggle_ui_flag(&mut self, flag: UiFlag) {
        self.set_ui_flag(flag, !self.ui.flag(flag));
    }

    /// Set the animation speed multiplier. Non-positive values are ignored.
    pub fn set_animate_speed(&mut self, speed: f64) -> bool {
        if !speed.is_finite() || speed <= 0.0 {
            log::debug!("ignored animation speed {speed}");
            return false;
        }
        self.ui.animate_speed = speed;
        true
    }

    /// Add `key` to the animated set, or remove it (restoring its baseline).
    /// Returns whether `key` is animated afterwards.
    pub fn toggle_animated(&mut self, key: ParamKey) -> bool {
        if !is_animatable(key) {
            log::debug!("{key} cannot be animated");
            return false;
        }
        let animated = if self.ui.animated_params.remove(&key) {
            self.animator.release(key, &mut self.params);
            self.regenerate_unless_editing();
            false
        } else {
            self.ui.animated_params.insert(key);
            if self.animator.is_running() {
                self.animator.track(key, &self.params);
            }
            true
        };
        self.sync_animation();
        animated
    }

    fn sync_animation(&mut self) {
        let active = self.ui.animation_active();
        if active && !self.animator.is_running() {
            self.animator
                .start(self.clock.now(), &self.params, &self.ui.animated_params);
        } else if !active && self.animator.is_running() {
            self.animator.stop(&mut self.params);
            self.regenerate_unless_editing();
        }
        self.sync_frame();
    }

    /// Request or cancel the frame callback to match what needs to move.
    pub fn sync_frame(&mut self) {
        let wanted = self.animator.is_running() || self.pan.has_momentum();
        match (wanted, self.frame) {
            (true, None) => self.frame = Some(self.scheduler.request_frame()),
            (false, Some(handle)) => {
                self.scheduler.cancel_frame(handle);
                self.frame = None;
            }
            _ => {}
        }
    }

    /// Run one display frame. Returns `true` if anything visible changed.
    pub fn on_frame(&mut self) -> bool {
        self.frame = None;
        let now = self.clock.now();
        let mut changed = false;

        if self
            .animator
            .frame(now, self.ui.animate_speed, &mut self.params)
        {
            self.regenerate_unless_editing();
            changed = true;
        }
        if self.pan.step(now, &self.config) {
            changed = true;
        }

        self.sync_frame();
        changed
    }

    // ── Input ──

    /// Route one input event. Returns `true` if the canvas needs a redraw.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyDown { key, modifiers } => self.handle_key(key, *modifiers).is_some(),
            InputEvent::KeyUp { key } => {
                if is_space(key) {
                    self.pan.set_space_held(false);
                }
                false
            }
            InputEvent::PointerDown { x, y } => {
                let hit = hit_test(
                    &self.nodes,
                    &self.ui,
                    &self.view(),
                    self.config.hit_radii(),
                    *x,
                    *y,
                );
                if self.pan.space_held() && hit.is_none() {
                    self.pan.begin(Point::new(*x, *y), self.clock.now());
                    self.sync_frame();
                    return false;
                }
                self.drag.handle(event, hit, &self.nodes, &self.ui);
                false
            }
            InputEvent::PointerMove { x, y } => {
                if self.pan.is_panning() {
                    return self.pan.move_to(Point::new(*x, *y), self.clock.now());
                }
                let mutations = self.drag.handle(event, None, &self.nodes, &self.ui);
                let mut changed = false;
                for mutation in &mutations {
                    changed |= apply_mutation(&mut self.nodes, mutation);
                }
                if changed {
                    self.refresh_path();
                }
                changed
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => {
                if self.pan.is_panning() {
                    self.pan.end(self.clock.now(), &self.config);
                    self.sync_frame();
                }
                self.drag.handle(event, None, &self.nodes, &self.ui);
                false
            }
        }
    }

    /// Resolve and perform a keyboard shortcut.
    ///
    /// Export actions are returned for the host to carry out with its
    /// [`ExportTarget`].
    pub fn handle_key(&mut self, key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        let action = ShortcutMap::resolve(
            key,
            modifiers.ctrl,
            modifiers.shift,
            modifiers.alt,
            modifiers.meta,
        )?;
        if let Some(flag) = action.toggled_flag() {
            self.toggle_ui_flag(flag);
        }
        match action {
            ShortcutAction::PanStart => self.pan.set_space_held(true),
            ShortcutAction::CancelDrag => self.drag.cancel(),
            _ => {}
        }
        Some(action)
    }

    // ── Output ──

    fn scene(&self) -> SvgScene<'_> {
        SvgScene {
            params: &self.params,
            ui: &self.ui,
            nodes: &self.nodes,
            path_data: &self.path_data,
            view: self.view(),
        }
    }

    /// The interactive canvas document with every visible layer.
    pub fn render_canvas(&self) -> String {
        render_canvas(&self.scene(), &self.theme)
    }

    /// The standalone export document.
    pub fn render_export(&self) -> String {
        render_export(&self.scene())
    }

    /// Offer the export document as `wavy_circle.svg`.
    pub fn export_svg(&self, target: &mut dyn ExportTarget) {
        match target.download(EXPORT_FILE_NAME, SVG_MIME, &self.render_export()) {
            Ok(()) => log::debug!("exported {EXPORT_FILE_NAME}"),
            Err(ExportError::NoRenderTarget) => log::debug!("export skipped: no render target"),
            Err(err) => log::warn!("export failed: {err}"),
        }
    }

    /// Copy the path data to the clipboard. Failures are logged only.
    pub fn copy_path(&self, target: &mut dyn ExportTarget) {
        if let Err(err) = target.write_clipboard(&self.path_data) {
            log::warn!("copy path failed: {err}");
        }
    }
}

impl<C: Clock, S: FrameScheduler> Drop for Editor<C, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{ManualClock, ManualScheduler};
    use crate::export::MemoryExport;
    use pretty_assertions::assert_eq;
    use wavy_core::Shape;

    fn editor() -> Editor<ManualClock, ManualScheduler> {
        Editor::new(ManualClock::new(), ManualScheduler::new())
    }

    #[test]
    fn starts_with_default_ring() {
        let editor = editor();
        assert_eq!(editor.nodes().len(), 20);
        assert!(editor.path_data().starts_with("M 520 400 C"));
        assert_eq!(
            editor.stats(),
            EditorStats {
                node_count: 20,
                handle_count: 40,
                optimality: Optimality::PerfectSymmetry,
            }
        );
    }

    #[test]
    fn param_edit_regenerates() {
        let mut editor = editor();
        assert!(editor.set_param(ParamKey::Resolution, ParamValue::Number(6.0)));
        assert_eq!(editor.nodes().len(), 30);
    }

    #[test]
    fn rejected_edit_keeps_previous_value() {
        let mut editor = editor();
        assert!(!editor.set_param_text(ParamKey::Radius, "wide"));
        assert!(!editor.set_param(ParamKey::Frequency, ParamValue::Number(0.0)));
        assert!(!editor.set_param_named("nope", "1"));
        assert_eq!(editor.params(), &Params::default());
        assert_eq!(editor.nodes().len(), 20);
    }

    #[test]
    fn symmetric_edit_suspends_regeneration() {
        let mut editor = editor();
        editor.set_ui_flag(UiFlag::SymmetricEdit, true);
        let before = editor.nodes().to_vec();
        editor.set_param(ParamKey::Radius, ParamValue::Number(150.0));
        assert_eq!(editor.nodes(), before.as_slice());

        // Turning the mode off does not regenerate by itself.
        editor.set_ui_flag(UiFlag::SymmetricEdit, false);
        assert_eq!(editor.nodes(), before.as_slice());
        editor.set_param(ParamKey::Radius, ParamValue::Number(151.0));
        assert_ne!(editor.nodes(), before.as_slice());
    }

    #[test]
    fn smooth_corners_toggle_reserializes() {
        let mut editor = editor();
        editor.set_ui_flag(UiFlag::SmoothCorners, false);
        assert!(editor.path_data().contains(" L "));
        assert!(!editor.path_data().contains(" C "));
    }

    #[test]
    fn shape_preset_applies_atomically() {
        let mut editor = editor();
        assert!(editor.set_param_text(ParamKey::Shape, "hexagon"));
        assert_eq!(editor.params(), &Params::for_shape(Shape::Hexagon));
        assert_eq!(editor.nodes().len(), 48);
    }

    #[test]
    fn shortcut_toggles_flag() {
        let mut editor = editor();
        assert_eq!(
            editor.handle_key("g", Modifiers::NONE),
            Some(ShortcutAction::ToggleGrid)
        );
        assert!(!editor.ui().show_grid);
        assert_eq!(editor.handle_key("q", Modifiers::NONE), None);
    }

    #[test]
    fn export_and_copy_reach_target() {
        let editor = editor();
        let mut target = MemoryExport::default();
        editor.export_svg(&mut target);
        editor.copy_path(&mut target);
        assert_eq!(target.downloads.len(), 1);
        assert_eq!(target.downloads[0].file_name, "wavy_circle.svg");
        assert_eq!(target.downloads[0].mime, "image/svg+xml");
        assert_eq!(target.clipboard.as_deref(), Some(editor.path_data()));
    }

    #[test]
    fn clipboard_failure_is_not_fatal() {
        let editor = editor();
        let mut target = MemoryExport {
            clipboard_available: false,
            ..MemoryExport::default()
        };
        editor.copy_path(&mut target);
        assert_eq!(target.clipboard, None);
    }

    #[test]
    fn non_numeric_keys_cannot_animate() {
        let mut editor = editor();
        assert!(!editor.toggle_animated(ParamKey::MirrorX));
        assert!(editor.ui().animated_params.is_empty());
    }

    #[test]
    fn stats_serialize_with_labels() {
        let json = serde_json::to_string(&editor().stats()).unwrap();
        assert_eq!(
            json,
            r#"{"nodeCount":20,"handleCount":40,"optimality":"Perfect symmetry"}"#
        );
    }
}
