//! The flat parameter record driving the geometry engine.
//!
//! Every field has a default. Edits come in through [`Params::set`] (typed)
//! or [`Params::set_from_str`] (text typed into a bound field); both leave the
//! record untouched on error so callers can drop the error and keep the
//! previous value.

use crate::model::{HexColor, ShapeTransform};
use crate::preset::Shape;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};
use std::fmt;
use std::str::FromStr;

// ─── Wave types ──────────────────────────────────────────────────────────

/// LFO wave shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaveType {
    #[default]
    Sine,
    Triangle,
    Square,
    Random,
}

impl WaveType {
    pub const ALL: [WaveType; 4] = [
        WaveType::Sine,
        WaveType::Triangle,
        WaveType::Square,
        WaveType::Random,
    ];

    /// Sample the wave at `phase` (radians). Output lies in `[-1, 1]`.
    ///
    /// `Random` is a hash of the phase bucket (buckets are π/4 wide), so it
    /// is stepwise constant and reproducible for a given phase.
    pub fn sample(self, phase: f64) -> f64 {
        match self {
            Self::Sine => phase.sin(),
            Self::Triangle => (1.0 / FRAC_PI_2) * phase.sin().asin(),
            Self::Square => {
                if phase.sin() >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Random => {
                let seed = (phase / FRAC_PI_4).floor();
                let hashed = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
                hashed.rem_euclid(2.0) - 1.0
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Triangle => "triangle",
            Self::Square => "square",
            Self::Random => "random",
        }
    }
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" | "sin" => Ok(Self::Sine),
            "triangle" | "tri" => Ok(Self::Triangle),
            "square" | "sqr" => Ok(Self::Square),
            "random" | "noise" => Ok(Self::Random),
            _ => Err(()),
        }
    }
}

// ─── Keys & values ───────────────────────────────────────────────────────

/// Name of one field of [`Params`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamKey {
    Radius,
    Amplitude,
    Frequency,
    Resolution,
    LfoAmount,
    LfoFrequency,
    LfoSync,
    LfoSymmetryX,
    LfoSymmetryY,
    LfoWaveType,
    MirrorX,
    MirrorY,
    Scale,
    Zoom,
    Rotate,
    StrokeWidth,
    PathColor,
    PathEnabled,
    FillColor,
    FillEnabled,
    Shape,
}

/// What kind of value a key holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Number,
    Flag,
    Wave,
    Shape,
    Color,
}

impl ParamKey {
    pub const ALL: [ParamKey; 21] = [
        ParamKey::Radius,
        ParamKey::Amplitude,
        ParamKey::Frequency,
        ParamKey::Resolution,
        ParamKey::LfoAmount,
        ParamKey::LfoFrequency,
        ParamKey::LfoSync,
        ParamKey::LfoSymmetryX,
        ParamKey::LfoSymmetryY,
        ParamKey::LfoWaveType,
        ParamKey::MirrorX,
        ParamKey::MirrorY,
        ParamKey::Scale,
        ParamKey::Zoom,
        ParamKey::Rotate,
        ParamKey::StrokeWidth,
        ParamKey::PathColor,
        ParamKey::PathEnabled,
        ParamKey::FillColor,
        ParamKey::FillEnabled,
        ParamKey::Shape,
    ];

    /// Wire name, as used by the host page.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Radius => "radius",
            Self::Amplitude => "amplitude",
            Self::Frequency => "frequency",
            Self::Resolution => "resolution",
            Self::LfoAmount => "lfoAmount",
            Self::LfoFrequency => "lfoFrequency",
            Self::LfoSync => "lfoSync",
            Self::LfoSymmetryX => "lfoSymmetryX",
            Self::LfoSymmetryY => "lfoSymmetryY",
            Self::LfoWaveType => "lfoWaveType",
            Self::MirrorX => "mirrorX",
            Self::MirrorY => "mirrorY",
            Self::Scale => "scale",
            Self::Zoom => "zoom",
            Self::Rotate => "rotate",
            Self::StrokeWidth => "strokeWidth",
            Self::PathColor => "pathColor",
            Self::PathEnabled => "pathEnabled",
            Self::FillColor => "fillColor",
            Self::FillEnabled => "fillEnabled",
            Self::Shape => "shape",
        }
    }

    pub fn kind(self) -> ParamKind {
        match self {
            Self::Radius
            | Self::Amplitude
            | Self::Frequency
            | Self::Resolution
            | Self::LfoAmount
            | Self::LfoFrequency
            | Self::Scale
            | Self::Zoom
            | Self::Rotate
            | Self::StrokeWidth => ParamKind::Number,
            Self::LfoSync
            | Self::LfoSymmetryX
            | Self::LfoSymmetryY
            | Self::MirrorX
            | Self::MirrorY
            | Self::PathEnabled
            | Self::FillEnabled => ParamKind::Flag,
            Self::LfoWaveType => ParamKind::Wave,
            Self::Shape => ParamKind::Shape,
            Self::PathColor | Self::FillColor => ParamKind::Color,
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamKey {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ParamError::UnknownKey(s.to_string()))
    }
}

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Flag(bool),
    Wave(WaveType),
    Shape(Shape),
    Color(HexColor),
}

impl ParamValue {
    fn kind(&self) -> ParamKind {
        match self {
            Self::Number(_) => ParamKind::Number,
            Self::Flag(_) => ParamKind::Flag,
            Self::Wave(_) => ParamKind::Wave,
            Self::Shape(_) => ParamKind::Shape,
            Self::Color(_) => ParamKind::Color,
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────────

/// Why an edit was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    UnknownKey(String),
    WrongKind { key: ParamKey, expected: ParamKind },
    Unparseable { key: ParamKey, input: String },
    OutOfRange { key: ParamKey, value: f64 },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "unknown parameter '{key}'"),
            Self::WrongKind { key, expected } => {
                write!(f, "parameter '{key}' expects a {expected:?} value")
            }
            Self::Unparseable { key, input } => {
                write!(f, "cannot parse '{input}' for parameter '{key}'")
            }
            Self::OutOfRange { key, value } => {
                write!(f, "value {value} is out of range for parameter '{key}'")
            }
        }
    }
}

impl std::error::Error for ParamError {}

// ─── Params ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Params {
    pub radius: f64,
    pub amplitude: f64,
    /// Number of wave periods around the ring.
    pub frequency: u32,
    /// Nodes per wave period.
    pub resolution: u32,
    pub lfo_amount: f64,
    pub lfo_frequency: f64,
    /// Round the LFO frequency so the modulation closes over one revolution.
    pub lfo_sync: bool,
    pub lfo_symmetry_x: bool,
    pub lfo_symmetry_y: bool,
    pub lfo_wave_type: WaveType,
    pub mirror_x: bool,
    pub mirror_y: bool,
    pub scale: f64,
    pub zoom: f64,
    /// Degrees.
    pub rotate: f64,
    pub stroke_width: f64,
    pub path_color: HexColor,
    pub path_enabled: bool,
    pub fill_color: HexColor,
    pub fill_enabled: bool,
    pub shape: Shape,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            radius: 120.0,
            amplitude: 25.0,
            frequency: 5,
            resolution: 4,
            lfo_amount: 0.0,
            lfo_frequency: 2.0,
            lfo_sync: false,
            lfo_symmetry_x: false,
            lfo_symmetry_y: false,
            lfo_wave_type: WaveType::Sine,
            mirror_x: false,
            mirror_y: false,
            scale: 1.0,
            zoom: 1.0,
            rotate: 0.0,
            stroke_width: 2.0,
            path_color: HexColor::white(),
            path_enabled: true,
            fill_color: HexColor::white(),
            fill_enabled: false,
            shape: Shape::Circle,
        }
    }
}

/// Largest accepted `frequency`.
pub const MAX_FREQUENCY: u32 = 256;

/// Largest accepted `resolution`.
pub const MAX_RESOLUTION: u32 = 64;

fn bounded_int(key: ParamKey, value: f64, max: u32) -> Result<u32, ParamError> {
    let rounded = value.round();
    if rounded < 1.0 || rounded > f64::from(max) {
        return Err(ParamError::OutOfRange { key, value });
    }
    Ok(rounded as u32)
}

impl Params {
    /// Global defaults overlaid with the preset for `shape`.
    pub fn for_shape(shape: Shape) -> Self {
        let preset = shape.preset();
        let defaults = Self::default();
        Self {
            radius: preset.radius,
            amplitude: preset.amplitude,
            frequency: preset.frequency,
            resolution: preset.resolution.unwrap_or(defaults.resolution),
            scale: preset.scale,
            rotate: preset.rotate.unwrap_or(defaults.rotate),
            shape,
            ..defaults
        }
    }

    /// Total node count the geometry engine produces. Zero when either
    /// count is outside `1..=MAX_FREQUENCY` / `1..=MAX_RESOLUTION`.
    pub fn total_nodes(&self) -> usize {
        if self.frequency > MAX_FREQUENCY || self.resolution > MAX_RESOLUTION {
            return 0;
        }
        (self.frequency as usize)
            .checked_mul(self.resolution as usize)
            .unwrap_or(0)
    }

    /// Scale and rotation applied to the generated ring when drawn.
    pub fn shape_transform(&self) -> ShapeTransform {
        ShapeTransform::new(self.scale, self.rotate)
    }

    /// Read a numeric field. `None` for non-numeric keys.
    pub fn number(&self, key: ParamKey) -> Option<f64> {
        let value = match key {
            ParamKey::Radius => self.radius,
            ParamKey::Amplitude => self.amplitude,
            ParamKey::Frequency => self.frequency as f64,
            ParamKey::Resolution => self.resolution as f64,
            ParamKey::LfoAmount => self.lfo_amount,
            ParamKey::LfoFrequency => self.lfo_frequency,
            ParamKey::Scale => self.scale,
            ParamKey::Zoom => self.zoom,
            ParamKey::Rotate => self.rotate,
            ParamKey::StrokeWidth => self.stroke_width,
            _ => return None,
        };
        Some(value)
    }

    /// Read any field as a typed value.
    pub fn get(&self, key: ParamKey) -> ParamValue {
        if let Some(n) = self.number(key) {
            return ParamValue::Number(n);
        }
        match key {
            ParamKey::LfoSync => ParamValue::Flag(self.lfo_sync),
            ParamKey::LfoSymmetryX => ParamValue::Flag(self.lfo_symmetry_x),
            ParamKey::LfoSymmetryY => ParamValue::Flag(self.lfo_symmetry_y),
            ParamKey::MirrorX => ParamValue::Flag(self.mirror_x),
            ParamKey::MirrorY => ParamValue::Flag(self.mirror_y),
            ParamKey::PathEnabled => ParamValue::Flag(self.path_enabled),
            ParamKey::FillEnabled => ParamValue::Flag(self.fill_enabled),
            ParamKey::LfoWaveType => ParamValue::Wave(self.lfo_wave_type),
            ParamKey::Shape => ParamValue::Shape(self.shape),
            ParamKey::PathColor => ParamValue::Color(self.path_color.clone()),
            ParamKey::FillColor => ParamValue::Color(self.fill_color.clone()),
            _ => unreachable!("numeric keys are handled above"),
        }
    }

    /// Write a numeric field. Integer fields are rounded; frequency and
    /// resolution must stay within `1..=MAX_FREQUENCY` and
    /// `1..=MAX_RESOLUTION`; scale and zoom must stay positive.
    pub fn set_number(&mut self, key: ParamKey, value: f64) -> Result<(), ParamError> {
        if key.kind() != ParamKind::Number {
            return Err(ParamError::WrongKind {
                key,
                expected: key.kind(),
            });
        }
        if !value.is_finite() {
            return Err(ParamError::OutOfRange { key, value });
        }
        match key {
            ParamKey::Radius => self.radius = value,
            ParamKey::Amplitude => self.amplitude = value,
            ParamKey::Frequency => self.frequency = bounded_int(key, value, MAX_FREQUENCY)?,
            ParamKey::Resolution => self.resolution = bounded_int(key, value, MAX_RESOLUTION)?,
            ParamKey::LfoAmount => self.lfo_amount = value,
            ParamKey::LfoFrequency => self.lfo_frequency = value,
            ParamKey::Scale | ParamKey::Zoom if value <= 0.0 => {
                return Err(ParamError::OutOfRange { key, value });
            }
            ParamKey::Scale => self.scale = value,
            ParamKey::Zoom => self.zoom = value,
            ParamKey::Rotate => self.rotate = value,
            ParamKey::StrokeWidth if value < 0.0 => {
                return Err(ParamError::OutOfRange { key, value });
            }
            ParamKey::StrokeWidth => self.stroke_width = value,
            _ => unreachable!("kind checked above"),
        }
        Ok(())
    }

    /// Apply one edit. Selecting a shape replaces the whole record with that
    /// shape's preset.
    pub fn set(&mut self, key: ParamKey, value: ParamValue) -> Result<(), ParamError> {
        if value.kind() != key.kind() {
            return Err(ParamError::WrongKind {
                key,
                expected: key.kind(),
            });
        }
        match value {
            ParamValue::Number(n) => return self.set_number(key, n),
            ParamValue::Flag(flag) => {
                let slot = match key {
                    ParamKey::LfoSync => &mut self.lfo_sync,
                    ParamKey::LfoSymmetryX => &mut self.lfo_symmetry_x,
                    ParamKey::LfoSymmetryY => &mut self.lfo_symmetry_y,
                    ParamKey::MirrorX => &mut self.mirror_x,
                    ParamKey::MirrorY => &mut self.mirror_y,
                    ParamKey::PathEnabled => &mut self.path_enabled,
                    ParamKey::FillEnabled => &mut self.fill_enabled,
                    _ => unreachable!("kind checked above"),
                };
                *slot = flag;
            }
            ParamValue::Wave(wave) => self.lfo_wave_type = wave,
            ParamValue::Shape(shape) => {
                *self = Self::for_shape(shape);
                log::debug!("applied {shape} preset");
            }
            ParamValue::Color(color) => match key {
                ParamKey::PathColor => self.path_color = color,
                ParamKey::FillColor => self.fill_color = color,
                _ => unreachable!("kind checked above"),
            },
        }
        Ok(())
    }

    /// Parse text from a bound input field and apply it.
    pub fn set_from_str(&mut self, key: ParamKey, input: &str) -> Result<(), ParamError> {
        let value = parse_value(key, input)?;
        self.set(key, value)
    }
}

/// Parse raw field text into the value kind `key` expects.
pub fn parse_value(key: ParamKey, input: &str) -> Result<ParamValue, ParamError> {
    let unparseable = || ParamError::Unparseable {
        key,
        input: input.to_string(),
    };
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(unparseable());
    }
    match key.kind() {
        ParamKind::Number => trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(ParamValue::Number)
            .ok_or_else(unparseable),
        ParamKind::Flag => match trimmed {
            "true" | "1" | "on" => Ok(ParamValue::Flag(true)),
            "false" | "0" | "off" => Ok(ParamValue::Flag(false)),
            _ => Err(unparseable()),
        },
        ParamKind::Wave => trimmed
            .parse::<WaveType>()
            .map(ParamValue::Wave)
            .map_err(|_| unparseable()),
        ParamKind::Shape => trimmed
            .parse::<Shape>()
            .map(ParamValue::Shape)
            .map_err(|_| unparseable()),
        ParamKind::Color => HexColor::parse(trimmed)
            .map(ParamValue::Color)
            .ok_or_else(unparseable),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hexagon_preset_overwrites_atomically() {
        let mut params = Params {
            lfo_amount: 3.0,
            mirror_x: true,
            stroke_width: 4.5,
            ..Params::default()
        };
        params
            .set(ParamKey::Shape, ParamValue::Shape(Shape::Hexagon))
            .unwrap();

        let expected = Params {
            radius: 200.0,
            amplitude: 15.0,
            frequency: 6,
            resolution: 8,
            scale: 0.8,
            rotate: 15.0,
            shape: Shape::Hexagon,
            ..Params::default()
        };
        assert_eq!(params, expected);
    }

    #[test]
    fn circle_preset_keeps_default_resolution() {
        let params = Params::for_shape(Shape::Circle);
        assert_eq!(params, Params::default());
    }

    #[test]
    fn empty_or_garbage_text_keeps_previous_value() {
        let mut params = Params::default();
        assert!(params.set_from_str(ParamKey::Radius, "").is_err());
        assert!(params.set_from_str(ParamKey::Radius, "abc").is_err());
        assert!(params.set_from_str(ParamKey::Radius, "NaN").is_err());
        assert_eq!(params.radius, 120.0);

        params.set_from_str(ParamKey::Radius, " 150.5 ").unwrap();
        assert_eq!(params.radius, 150.5);
    }

    #[test]
    fn frequency_rounds_and_rejects_zero() {
        let mut params = Params::default();
        params.set_number(ParamKey::Frequency, 6.6).unwrap();
        assert_eq!(params.frequency, 7);
        assert!(matches!(
            params.set_number(ParamKey::Frequency, 0.2),
            Err(ParamError::OutOfRange { .. })
        ));
        assert_eq!(params.frequency, 7);
    }

    #[test]
    fn huge_counts_are_rejected() {
        let mut params = Params::default();
        for key in [ParamKey::Frequency, ParamKey::Resolution] {
            assert!(matches!(
                params.set_from_str(key, "4000000000"),
                Err(ParamError::OutOfRange { .. })
            ));
        }
        assert_eq!((params.frequency, params.resolution), (5, 4));

        params.set_number(ParamKey::Frequency, 256.0).unwrap();
        params.set_number(ParamKey::Resolution, 64.0).unwrap();
        assert_eq!(params.total_nodes(), 256 * 64);
        assert!(params.set_number(ParamKey::Frequency, 257.0).is_err());
        assert!(params.set_number(ParamKey::Resolution, 65.0).is_err());
    }

    #[test]
    fn out_of_range_record_counts_zero_nodes() {
        let params = Params {
            frequency: u32::MAX,
            resolution: u32::MAX,
            ..Params::default()
        };
        assert_eq!(params.total_nodes(), 0);
        assert!(crate::compute_nodes(&params).is_empty());
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let mut params = Params::default();
        let err = params
            .set(ParamKey::MirrorX, ParamValue::Number(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            ParamError::WrongKind {
                key: ParamKey::MirrorX,
                expected: ParamKind::Flag
            }
        );
        assert!(!params.mirror_x);
    }

    #[test]
    fn text_input_for_every_kind() {
        let mut params = Params::default();
        params.set_from_str(ParamKey::MirrorY, "true").unwrap();
        params.set_from_str(ParamKey::LfoWaveType, "square").unwrap();
        params.set_from_str(ParamKey::FillColor, "#0F0").unwrap();
        assert!(params.mirror_y);
        assert_eq!(params.lfo_wave_type, WaveType::Square);
        assert_eq!(params.fill_color.as_str(), "#00ff00");
        assert!(params.set_from_str(ParamKey::PathColor, "red").is_err());
    }

    #[test]
    fn keys_round_trip_through_wire_names() {
        for key in ParamKey::ALL {
            assert_eq!(key.as_str().parse::<ParamKey>(), Ok(key));
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        assert!("bogus".parse::<ParamKey>().is_err());
    }

    #[test]
    fn params_json_uses_camel_case_and_fills_defaults() {
        let params: Params = serde_json::from_str(r#"{"lfoAmount": 1.5}"#).unwrap();
        assert_eq!(params.lfo_amount, 1.5);
        assert_eq!(params.radius, 120.0);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["strokeWidth"], 2.0);
        assert_eq!(json["pathColor"], "#ffffff");
    }

    #[test]
    fn triangle_wave_peaks() {
        let peak = WaveType::Triangle.sample(FRAC_PI_2);
        assert!((peak - 1.0).abs() < 1e-12);
        let trough = WaveType::Triangle.sample(-FRAC_PI_2);
        assert!((trough + 1.0).abs() < 1e-12);
    }

    #[test]
    fn square_wave_treats_zero_as_high() {
        assert_eq!(WaveType::Square.sample(0.0), 1.0);
        assert_eq!(WaveType::Square.sample(4.0), -1.0);
    }

    #[test]
    fn random_wave_is_bounded_and_reproducible() {
        for i in -200..200 {
            let phase = i as f64 * 0.173;
            let a = WaveType::Random.sample(phase);
            let b = WaveType::Random.sample(phase);
            assert_eq!(a, b);
            assert!((-1.0..=1.0).contains(&a), "phase {phase} -> {a}");
        }
    }

    #[test]
    fn random_wave_is_constant_within_a_bucket() {
        let a = WaveType::Random.sample(0.1);
        let b = WaveType::Random.sample(0.7);
        assert_eq!(a, b);
    }
}
