//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The map lives in Rust so the browser bridge and native hosts share it.

use wavy_core::UiFlag;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Layers ──
    ToggleGrid,
    ToggleNodes,
    ToggleHandles,

    // ── Editing modes ──
    ToggleSymmetricEdit,
    ToggleHandleMirroring,
    ToggleSmoothCorners,
    ToggleAnimate,

    // ── View ──
    PanStart,

    // ── Export ──
    DownloadSvg,
    CopyPath,

    // ── Drag ──
    CancelDrag,
}

impl ShortcutAction {
    /// The UI flag this action flips, for the toggle actions.
    pub fn toggled_flag(self) -> Option<UiFlag> {
        match self {
            Self::ToggleGrid => Some(UiFlag::ShowGrid),
            Self::ToggleNodes => Some(UiFlag::ShowNodes),
            Self::ToggleHandles => Some(UiFlag::ShowHandles),
            Self::ToggleSymmetricEdit => Some(UiFlag::SymmetricEdit),
            Self::ToggleHandleMirroring => Some(UiFlag::SymmetricalBezier),
            Self::ToggleSmoothCorners => Some(UiFlag::SmoothCorners),
            Self::ToggleAnimate => Some(UiFlag::Animate),
            _ => None,
        }
    }

    /// Stable kebab-case name handed to hosts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToggleGrid => "toggle-grid",
            Self::ToggleNodes => "toggle-nodes",
            Self::ToggleHandles => "toggle-handles",
            Self::ToggleSymmetricEdit => "toggle-symmetric-edit",
            Self::ToggleHandleMirroring => "toggle-handle-mirroring",
            Self::ToggleSmoothCorners => "toggle-smooth-corners",
            Self::ToggleAnimate => "toggle-animate",
            Self::PanStart => "pan-start",
            Self::DownloadSvg => "download-svg",
            Self::CopyPath => "copy-path",
            Self::CancelDrag => "cancel-drag",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"g"`, `"Escape"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        // ── Modifier combos first (most specific) ──
        if cmd && shift {
            return match key {
                "c" | "C" => Some(ShortcutAction::CopyPath),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "s" | "S" => Some(ShortcutAction::DownloadSvg),
                _ => None,
            };
        }

        if shift || alt {
            return None;
        }

        // ── Single keys (no modifiers) ──
        match key {
            "g" | "G" => Some(ShortcutAction::ToggleGrid),
            "n" | "N" => Some(ShortcutAction::ToggleNodes),
            "h" | "H" => Some(ShortcutAction::ToggleHandles),
            "e" | "E" => Some(ShortcutAction::ToggleSymmetricEdit),
            "m" | "M" => Some(ShortcutAction::ToggleHandleMirroring),
            "s" | "S" => Some(ShortcutAction::ToggleSmoothCorners),
            "p" | "P" => Some(ShortcutAction::ToggleAnimate),
            "Escape" => Some(ShortcutAction::CancelDrag),
            k if crate::input::is_space(k) => Some(ShortcutAction::PanStart),
            _ => None,
        }
    }
}
