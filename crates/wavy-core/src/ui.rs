//! UI toggle state: render layers, editing modes, animation mode.

use crate::params::ParamKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub show_grid: bool,
    pub show_nodes: bool,
    pub show_handles: bool,
    /// Manual node editing; suspends regeneration from parameters.
    pub symmetric_edit: bool,
    /// Mirror the opposite handle while dragging one.
    pub symmetrical_bezier: bool,
    pub smooth_corners: bool,
    pub animate: bool,
    pub animate_speed: f64,
    pub animated_params: BTreeSet<ParamKey>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_nodes: true,
            show_handles: true,
            symmetric_edit: false,
            symmetrical_bezier: true,
            smooth_corners: true,
            animate: false,
            animate_speed: 1.0,
            animated_params: BTreeSet::new(),
        }
    }
}

impl UiState {
    pub fn flag(&self, flag: UiFlag) -> bool {
        match flag {
            UiFlag::ShowGrid => self.show_grid,
            UiFlag::ShowNodes => self.show_nodes,
            UiFlag::ShowHandles => self.show_handles,
            UiFlag::SymmetricEdit => self.symmetric_edit,
            UiFlag::SymmetricalBezier => self.symmetrical_bezier,
            UiFlag::SmoothCorners => self.smooth_corners,
            UiFlag::Animate => self.animate,
        }
    }

    pub fn set_flag(&mut self, flag: UiFlag, value: bool) {
        let slot = match flag {
            UiFlag::ShowGrid => &mut self.show_grid,
            UiFlag::ShowNodes => &mut self.show_nodes,
            UiFlag::ShowHandles => &mut self.show_handles,
            UiFlag::SymmetricEdit => &mut self.symmetric_edit,
            UiFlag::SymmetricalBezier => &mut self.symmetrical_bezier,
            UiFlag::SmoothCorners => &mut self.smooth_corners,
            UiFlag::Animate => &mut self.animate,
        };
        *slot = value;
    }

    /// Handles are only visible (and grabbable) with nodes shown too.
    pub fn handles_visible(&self) -> bool {
        self.show_nodes && self.show_handles
    }

    /// The animation loop runs only with the mode on and something to animate.
    pub fn animation_active(&self) -> bool {
        self.animate && !self.animated_params.is_empty()
    }
}

/// Boolean UI toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UiFlag {
    ShowGrid,
    ShowNodes,
    ShowHandles,
    SymmetricEdit,
    SymmetricalBezier,
    SmoothCorners,
    Animate,
}

impl UiFlag {
    pub const ALL: [UiFlag; 7] = [
        UiFlag::ShowGrid,
        UiFlag::ShowNodes,
        UiFlag::ShowHandles,
        UiFlag::SymmetricEdit,
        UiFlag::SymmetricalBezier,
        UiFlag::SmoothCorners,
        UiFlag::Animate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShowGrid => "showGrid",
            Self::ShowNodes => "showNodes",
            Self::ShowHandles => "showHandles",
            Self::SymmetricEdit => "symmetricEdit",
            Self::SymmetricalBezier => "symmetricalBezier",
            Self::SmoothCorners => "smoothCorners",
            Self::Animate => "animate",
        }
    }
}

impl fmt::Display for UiFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UiFlag {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UiFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_start_state() {
        let ui = UiState::default();
        assert!(ui.show_grid && ui.show_nodes && ui.show_handles);
        assert!(!ui.symmetric_edit);
        assert!(ui.symmetrical_bezier);
        assert!(ui.smooth_corners);
        assert!(!ui.animation_active());
    }

    #[test]
    fn flags_round_trip() {
        let mut ui = UiState::default();
        for flag in UiFlag::ALL {
            let before = ui.flag(flag);
            ui.set_flag(flag, !before);
            assert_eq!(ui.flag(flag), !before, "{flag}");
            assert_eq!(flag.as_str().parse::<UiFlag>(), Ok(flag));
        }
    }

    #[test]
    fn animated_params_is_a_set() {
        let mut ui = UiState::default();
        ui.animated_params.insert(ParamKey::Radius);
        ui.animated_params.insert(ParamKey::Radius);
        assert_eq!(ui.animated_params.len(), 1);
        assert!(!ui.animation_active());
        ui.animate = true;
        assert!(ui.animation_active());
    }

    #[test]
    fn handles_hidden_without_nodes() {
        let ui = UiState {
            show_nodes: false,
            ..UiState::default()
        };
        assert!(!ui.handles_visible());
    }
}
