//! WASM bridge for the wavy circle editor, exposing the Rust editor to the
//! browser page.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the frame
//! loop: after any call it checks [`WavyCanvas::needs_frame`] and, if set,
//! calls [`WavyCanvas::tick`] from `requestAnimationFrame`.

mod browser;
mod console;

use browser::{BrowserExport, PerformanceClock};
use wasm_bindgen::prelude::*;
use wavy_core::{ParamKey, Shape, UiFlag};
use wavy_editor::{
    Editor, EditorConfig, InputEvent, ManualScheduler, Modifiers, ShortcutAction,
};
use wavy_render::CanvasTheme;

/// The main WASM-facing editor controller.
///
/// All interaction from the page goes through this struct.
#[wasm_bindgen]
pub struct WavyCanvas {
    editor: Editor<PerformanceClock, ManualScheduler>,
}

#[wasm_bindgen]
impl WavyCanvas {
    /// Create an editor with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_config(EditorConfig::default())
    }

    /// Create an editor from a JSON config; missing fields keep their
    /// defaults and malformed JSON falls back to the defaults entirely.
    pub fn with_config(json: &str) -> Self {
        let config = parse_config(json).unwrap_or_else(|err| {
            log::warn!("invalid editor config, using defaults: {err}");
            EditorConfig::default()
        });
        Self::from_config(config)
    }

    fn from_config(config: EditorConfig) -> Self {
        console::init_logging(log::LevelFilter::Warn);
        Self {
            editor: Editor::with_config(config, PerformanceClock::default(), ManualScheduler::new()),
        }
    }

    /// Change the console log level (`"error"` ... `"trace"`).
    pub fn set_log_level(&self, level: &str) {
        console::init_logging(console::parse_level(level));
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        let theme = if is_dark {
            CanvasTheme::dark()
        } else {
            CanvasTheme::light()
        };
        self.editor.set_theme(theme);
    }

    // ─── Parameters & UI ─────────────────────────────────────────────────

    /// Apply text from a bound control. Returns `false` if rejected.
    pub fn set_param(&mut self, name: &str, value: &str) -> bool {
        self.editor.set_param_named(name, value)
    }

    pub fn set_ui_flag(&mut self, name: &str, value: bool) -> bool {
        match name.parse::<UiFlag>() {
            Ok(flag) => {
                self.editor.set_ui_flag(flag, value);
                true
            }
            Err(()) => {
                log::debug!("unknown UI flag {name:?}");
                false
            }
        }
    }

    pub fn set_animate_speed(&mut self, speed: f64) -> bool {
        self.editor.set_animate_speed(speed)
    }

    /// Flip whether `name` is animated. Returns the new state.
    pub fn toggle_animated(&mut self, name: &str) -> bool {
        match name.parse::<ParamKey>() {
            Ok(key) => self.editor.toggle_animated(key),
            Err(err) => {
                log::debug!("{err}");
                false
            }
        }
    }

    // ─── Pointer & keyboard ──────────────────────────────────────────────

    /// Pointer coordinates are in the 800×800 view space. Each handler
    /// returns `true` if the canvas needs a redraw.
    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.editor.handle_event(&InputEvent::pointer_down(x, y))
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.editor.handle_event(&InputEvent::pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.editor.handle_event(&InputEvent::pointer_up(x, y))
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.editor.handle_event(&InputEvent::PointerLeave)
    }

    /// Handle a keyboard event. Returns a JSON string:
    /// `{"handled":bool,"action":"<action_name>"}`
    pub fn handle_key(&mut self, key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> String {
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        let Some(action) = self.editor.handle_key(key, modifiers) else {
            return r#"{"handled":false,"action":"none"}"#.to_string();
        };
        match action {
            ShortcutAction::DownloadSvg => self.export_svg(),
            ShortcutAction::CopyPath => self.copy_path(),
            _ => {}
        }
        format!(r#"{{"handled":true,"action":"{}"}}"#, action.as_str())
    }

    pub fn handle_key_up(&mut self, key: &str) {
        self.editor.handle_event(&InputEvent::key_up(key));
    }

    // ─── Frames ──────────────────────────────────────────────────────────

    /// Whether the page should schedule a `tick` on the next frame.
    pub fn needs_frame(&self) -> bool {
        self.editor.pending_frame().is_some()
    }

    /// Run one frame. Returns `true` if the canvas needs a redraw.
    pub fn tick(&mut self) -> bool {
        self.editor.scheduler_mut().take_pending();
        self.editor.on_frame()
    }

    // ─── Output ──────────────────────────────────────────────────────────

    pub fn path_data(&self) -> String {
        self.editor.path_data().to_string()
    }

    /// The interactive canvas as an SVG document.
    pub fn render_svg(&self) -> String {
        self.editor.render_canvas()
    }

    /// The standalone export document.
    pub fn export_document(&self) -> String {
        self.editor.render_export()
    }

    /// `{"nodeCount":..,"handleCount":..,"optimality":".."}`
    pub fn stats_json(&self) -> String {
        to_json(&self.editor.stats())
    }

    pub fn params_json(&self) -> String {
        to_json(self.editor.params())
    }

    pub fn ui_json(&self) -> String {
        to_json(self.editor.ui())
    }

    /// Per-parameter animation intensity in 0..1, keyed by wire name.
    pub fn intensities_json(&self) -> String {
        to_json(self.editor.animator().intensities())
    }

    /// Shape choices with their slider ranges:
    /// `[{"value":"circle","label":"Circle","radiusRange":{..},"amplitudeRange":{..}}, ..]`
    pub fn shapes_json(&self) -> String {
        let shapes: Vec<serde_json::Value> = Shape::ALL
            .iter()
            .map(|shape| {
                let preset = shape.preset();
                serde_json::json!({
                    "value": shape.as_str(),
                    "label": shape.label(),
                    "radiusRange": preset.radius_range,
                    "amplitudeRange": preset.amplitude_range,
                })
            })
            .collect();
        to_json(&shapes)
    }

    pub fn export_svg(&self) {
        self.editor.export_svg(&mut BrowserExport);
    }

    pub fn copy_path(&self) {
        self.editor.copy_path(&mut BrowserExport);
    }
}

impl Default for WavyCanvas {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_config(json: &str) -> Result<EditorConfig, serde_json::Error> {
    if json.trim().is_empty() {
        return Ok(EditorConfig::default());
    }
    serde_json::from_str(json)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::warn!("serialization failed: {err}");
        "null".to_string()
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────
