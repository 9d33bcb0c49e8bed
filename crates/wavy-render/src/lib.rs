pub mod hit;
pub mod svg;

pub use hit::{HitRadii, hit_test};
pub use svg::{CanvasTheme, EXPORT_FILE_NAME, SVG_MIME, SvgScene, render_canvas, render_export};
