pub mod geometry;
pub mod model;
pub mod params;
pub mod path;
pub mod preset;
pub mod symmetry;
pub mod ui;

pub use geometry::compute_nodes;
pub use model::*;
pub use params::{
    MAX_FREQUENCY, MAX_RESOLUTION, ParamError, ParamKey, ParamKind, ParamValue, Params, WaveType,
};
pub use path::nodes_to_path;
pub use preset::{Shape, ShapePreset, ValueRange};
pub use symmetry::{SiblingSet, siblings_of};
pub use ui::{UiFlag, UiState};

// Re-export kurbo geometry types so downstream crates share one definition
pub use kurbo::{Point, Vec2};
