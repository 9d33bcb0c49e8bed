//! Input abstraction layer.
//!
//! Normalizes pointer and keyboard events from the host page into a single
//! `InputEvent` enum consumed by the editor. Pointer coordinates are in view
//! space (the 800×800 viewBox, before the zoom/pan transform is undone).

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed over the drawing surface.
    PointerDown { x: f64, y: f64 },

    /// Pointer moved over the drawing surface.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the drawing surface. Ends any gesture like `PointerUp`.
    PointerLeave,

    /// Key pressed.
    KeyDown { key: String, modifiers: Modifiers },

    /// Key released.
    KeyUp { key: String },
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key_down(key: &str, modifiers: Modifiers) -> Self {
        Self::KeyDown {
            key: key.to_string(),
            modifiers,
        }
    }

    pub fn key_up(key: &str) -> Self {
        Self::KeyUp {
            key: key.to_string(),
        }
    }

    /// Extract position if this is a positioned pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } | Self::PointerUp { x, y } => {
                Some((*x, *y))
            }
            _ => None,
        }
    }
}

/// The space bar, which arms canvas panning while held.
pub fn is_space(key: &str) -> bool {
    key == " " || key == "Space" || key == "Spacebar"
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pointer_events_carry_position() {
        assert_eq!(InputEvent::pointer_move(3.0, 4.0).position(), Some((3.0, 4.0)));
        assert_eq!(InputEvent::PointerLeave.position(), None);
        assert_eq!(InputEvent::key_up("g").position(), None);
    }

    #[test]
    fn space_has_several_spellings() {
        assert!(is_space(" "));
        assert!(is_space("Spacebar"));
        assert!(!is_space("s"));
    }
}
