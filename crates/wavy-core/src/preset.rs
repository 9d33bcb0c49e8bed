//! Base shapes and their preset table.
//!
//! Selecting a shape resets the parameter set to the global defaults and then
//! overlays the preset's fields, so a preset switch is always one atomic
//! update. Each preset also carries the valid slider ranges for the two
//! primary fields, radius and amplitude.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Number of angular segments in the star profile (5 points, 5 valleys).
pub const STAR_SEGMENTS: u32 = 10;

/// Inner star radius as a fraction of the outer radius.
pub const STAR_INNER_RATIO: f64 = 0.5;

/// Smallest cosine used in the polygon radius formula.
pub const POLYGON_COS_FLOOR: f64 = 0.01;

/// Closed interval of valid slider values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Preset values applied on top of the defaults when a shape is selected.
/// `None` fields keep the global default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapePreset {
    pub radius: f64,
    pub amplitude: f64,
    pub frequency: u32,
    pub resolution: Option<u32>,
    pub scale: f64,
    pub rotate: Option<f64>,
    pub radius_range: ValueRange,
    pub amplitude_range: ValueRange,
}

const CIRCLE: ShapePreset = ShapePreset {
    radius: 120.0,
    amplitude: 25.0,
    frequency: 5,
    resolution: None,
    scale: 1.0,
    rotate: None,
    radius_range: ValueRange::new(50.0, 200.0),
    amplitude_range: ValueRange::new(-50.0, 50.0),
};

const RECTANGLE: ShapePreset = ShapePreset {
    radius: 128.0,
    amplitude: 20.0,
    frequency: 4,
    resolution: Some(8),
    scale: 1.0,
    rotate: Some(22.0),
    radius_range: ValueRange::new(80.0, 200.0),
    amplitude_range: ValueRange::new(-50.0, 50.0),
};

const TRIANGLE: ShapePreset = ShapePreset {
    radius: 200.0,
    amplitude: 100.0,
    frequency: 3,
    resolution: None,
    scale: 0.7,
    rotate: None,
    radius_range: ValueRange::new(100.0, 300.0),
    amplitude_range: ValueRange::new(50.0, 150.0),
};

const STAR: ShapePreset = ShapePreset {
    radius: 160.0,
    amplitude: 70.0,
    frequency: 8,
    resolution: None,
    scale: 1.0,
    rotate: None,
    radius_range: ValueRange::new(100.0, 250.0),
    amplitude_range: ValueRange::new(40.0, 100.0),
};

const HEXAGON: ShapePreset = ShapePreset {
    radius: 200.0,
    amplitude: 15.0,
    frequency: 6,
    resolution: Some(8),
    scale: 0.8,
    rotate: Some(15.0),
    radius_range: ValueRange::new(120.0, 280.0),
    amplitude_range: ValueRange::new(-30.0, 40.0),
};

/// Base shape the wave is superimposed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    #[default]
    Circle,
    Triangle,
    Rectangle,
    Star,
    Hexagon,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Circle,
        Shape::Triangle,
        Shape::Rectangle,
        Shape::Star,
        Shape::Hexagon,
    ];

    pub fn preset(self) -> &'static ShapePreset {
        match self {
            Self::Circle => &CIRCLE,
            Self::Triangle => &TRIANGLE,
            Self::Rectangle => &RECTANGLE,
            Self::Star => &STAR,
            Self::Hexagon => &HEXAGON,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Triangle => "triangle",
            Self::Rectangle => "rectangle",
            Self::Star => "star",
            Self::Hexagon => "hexagon",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Circle => "Circle",
            Self::Triangle => "Triangle",
            Self::Rectangle => "Rectangle",
            Self::Star => "Star",
            Self::Hexagon => "Hexagon",
        }
    }

    /// Number of polygon sides, for the polygon-profile shapes.
    pub fn sides(self) -> Option<u32> {
        match self {
            Self::Triangle => Some(3),
            Self::Rectangle => Some(4),
            Self::Hexagon => Some(6),
            Self::Circle | Self::Star => None,
        }
    }

    /// Base radial distance at `theta` and its derivative `dr/dθ`.
    ///
    /// Polygons use the inradius formula with `theta` folded into one side,
    /// so `radius` is the circumradius (vertices sit on multiples of
    /// `2π/sides`). The star interpolates linearly between alternating outer
    /// and inner radii.
    pub fn profile(self, radius: f64, theta: f64) -> (f64, f64) {
        if let Some(sides) = self.sides() {
            let segment = TAU / sides as f64;
            let folded = theta.rem_euclid(segment) - segment / 2.0;
            let apothem = radius * (PI / sides as f64).cos();
            let cos = folded.cos();
            if cos < POLYGON_COS_FLOOR {
                return (apothem / POLYGON_COS_FLOOR, 0.0);
            }
            return (apothem / cos, apothem * folded.sin() / (cos * cos));
        }

        match self {
            Self::Star => {
                let segment = TAU / STAR_SEGMENTS as f64;
                let outer = radius;
                let inner = radius * STAR_INNER_RATIO;
                let wrapped = theta.rem_euclid(TAU);
                let index = ((wrapped / segment).floor() as u32) % STAR_SEGMENTS;
                let t = wrapped.rem_euclid(segment) / segment;
                let (from, to) = if index % 2 == 0 {
                    (outer, inner)
                } else {
                    (inner, outer)
                };
                (from + (to - from) * t, (to - from) / segment)
            }
            _ => (radius, 0.0),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shape {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(Self::Circle),
            "triangle" => Ok(Self::Triangle),
            "rectangle" | "rect" | "square" => Ok(Self::Rectangle),
            "star" => Ok(Self::Star),
            "hexagon" | "hex" => Ok(Self::Hexagon),
            _ => Err(()),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_profile_is_constant() {
        for i in 0..16 {
            let theta = i as f64 * 0.4;
            assert_eq!(Shape::Circle.profile(120.0, theta), (120.0, 0.0));
        }
    }

    #[test]
    fn polygon_vertex_sits_on_circumradius() {
        for shape in [Shape::Triangle, Shape::Rectangle, Shape::Hexagon] {
            let (r, _) = shape.profile(100.0, 0.0);
            assert!((r - 100.0).abs() < 1e-9, "{shape}: vertex radius {r}");
        }
    }

    #[test]
    fn polygon_mid_side_sits_on_apothem() {
        let sides = 6.0;
        let mid = PI / sides;
        let (r, dr) = Shape::Hexagon.profile(100.0, mid);
        assert!((r - 100.0 * (PI / sides).cos()).abs() < 1e-9);
        assert!(dr.abs() < 1e-9);
    }

    #[test]
    fn star_alternates_outer_and_inner() {
        let segment = TAU / STAR_SEGMENTS as f64;
        let (outer, _) = Shape::Star.profile(160.0, 0.0);
        let (inner, _) = Shape::Star.profile(160.0, segment);
        let (outer_again, _) = Shape::Star.profile(160.0, 2.0 * segment);
        assert!((outer - 160.0).abs() < 1e-9);
        assert!((inner - 80.0).abs() < 1e-9);
        assert!((outer_again - 160.0).abs() < 1e-9);
    }

    #[test]
    fn profiles_are_finite_everywhere() {
        for shape in Shape::ALL {
            for i in 0..720 {
                let theta = i as f64 * TAU / 720.0;
                let (r, dr) = shape.profile(150.0, theta);
                assert!(r.is_finite() && dr.is_finite(), "{shape} at {theta}");
            }
        }
    }

    #[test]
    fn shape_names_parse() {
        for shape in Shape::ALL {
            assert_eq!(shape.as_str().parse::<Shape>(), Ok(shape));
        }
        assert!("blob".parse::<Shape>().is_err());
    }

    #[test]
    fn preset_ranges_contain_preset_values() {
        for shape in Shape::ALL {
            let preset = shape.preset();
            assert!(preset.radius_range.contains(preset.radius), "{shape}");
            assert!(preset.amplitude_range.contains(preset.amplitude), "{shape}");
        }
    }
}
