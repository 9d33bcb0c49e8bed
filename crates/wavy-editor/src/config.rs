//! Editor tunables.

use serde::{Deserialize, Serialize};
use wavy_render::HitRadii;

/// Configuration for [`Editor`](crate::editor::Editor).
///
/// Every field has a default; a host can override a subset from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Fraction of the cumulative pointer delta applied per move during a
    /// symmetric drag. Default: **0.01**.
    pub drag_damping: f64,

    /// Grab radius around nodes, in canvas units. Default: **5**.
    pub node_hit_radius: f64,

    /// Grab radius around handles, in canvas units. Default: **4**.
    pub handle_hit_radius: f64,

    /// Pan velocity multiplier applied each momentum frame. Default: **0.92**.
    pub momentum_decay: f64,

    /// Pan speed (px/ms) below which momentum stops. Default: **0.002**.
    pub momentum_min_speed: f64,

    /// Longest time step (ms) a single momentum frame may cover. Default: **40**.
    pub momentum_max_step_ms: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drag_damping: 0.01,
            node_hit_radius: 5.0,
            handle_hit_radius: 4.0,
            momentum_decay: 0.92,
            momentum_min_speed: 0.002,
            momentum_max_step_ms: 40.0,
        }
    }
}

impl EditorConfig {
    pub fn hit_radii(&self) -> HitRadii {
        HitRadii {
            node: self.node_hit_radius,
            handle: self.handle_hit_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"dragDamping": 0.05}"#).unwrap();
        assert_eq!(
            config,
            EditorConfig {
                drag_damping: 0.05,
                ..EditorConfig::default()
            }
        );
    }

    #[test]
    fn hit_radii_match_painted_sizes() {
        assert_eq!(EditorConfig::default().hit_radii(), HitRadii::default());
    }
}
