//! Geometry engine: parameters → ring of Bezier nodes.
//!
//! For node `i` of `n = frequency × resolution`:
//!
//! 1. `θ = 2π·i/n`
//! 2. LFO phase `= lfoFreq·θ`, with `θ` folded first when LFO symmetry is
//!    on and `lfoFreq` rounded under sync.
//! 3. `frequencyMod = frequency + lfoAmount·wave(phase)`
//! 4. Mirror folding remaps `θ` for the wave phase only.
//! 5. `r = profile(θ) + amplitude·sin(frequencyMod·θ_folded)`
//! 6. Position is `center + r·(cos θ, sin θ)`.
//! 7. Handles sit at `±(2πr)/(3n)` along the normalized polar tangent.
//! 8. `symmetryGroup = i mod resolution`.
//!
//! `profile(θ)` comes from [`Shape::profile`](crate::preset::Shape::profile)
//! for every preset, LFO and mirroring included. Non-circle presets therefore
//! bend the base ring into a polygon or star instead of only retuning
//! radius, amplitude, and counts; a plain-circle ring is the `Circle` preset.
//!
//! Everything here is pure; the same parameters always give the same ring.

use crate::model::{CANVAS_CENTER, Node};
use crate::params::Params;
use kurbo::{Point, Vec2};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// LFO frequency after optional sync rounding.
pub fn effective_lfo_frequency(params: &Params) -> f64 {
    if params.lfo_sync {
        params.lfo_frequency.round()
    } else {
        params.lfo_frequency
    }
}

/// LFO phase at `theta`. Symmetry flags fold the direction vector into one
/// half-plane (or quadrant) before measuring its angle.
pub fn lfo_phase(theta: f64, lfo_frequency: f64, symmetry_x: bool, symmetry_y: bool) -> f64 {
    if !(symmetry_x || symmetry_y) {
        return lfo_frequency * theta;
    }
    let (sin, cos) = theta.sin_cos();
    let x = if symmetry_x { cos.abs() } else { cos };
    let y = if symmetry_y { sin.abs() } else { sin };
    lfo_frequency * y.atan2(x)
}

/// Angle fed to the wave phase once mirror folding is applied.
///
/// Both axes fold `θ` into one quadrant, reflecting every other quadrant.
/// A single axis folds into a half-turn; the second half is reflected.
pub fn mirror_fold(theta: f64, mirror_x: bool, mirror_y: bool) -> f64 {
    match (mirror_x, mirror_y) {
        (true, true) => {
            let quadrant = ((theta / FRAC_PI_2) % 4.0).floor() as i64;
            let base = theta % FRAC_PI_2;
            if quadrant % 2 == 0 {
                base
            } else {
                FRAC_PI_2 - base
            }
        }
        (true, false) => {
            let half = ((theta / PI) % 2.0).floor() as i64;
            let base = theta % PI;
            if half == 0 { base } else { TAU - base }
        }
        (false, true) => {
            let half = ((theta / PI) % 2.0).floor() as i64;
            if half == 0 { theta } else { TAU - theta }
        }
        (false, false) => theta,
    }
}

/// Compute the full node ring for `params`.
///
/// Returns an empty ring when frequency or resolution is zero or out of
/// range (see [`Params::total_nodes`]).
pub fn compute_nodes(params: &Params) -> Vec<Node> {
    let total = params.total_nodes();
    if total == 0 {
        return Vec::new();
    }
    let resolution = params.resolution as usize;
    let frequency = params.frequency as f64;
    let lfo_frequency = effective_lfo_frequency(params);

    let nodes: Vec<Node> = (0..total)
        .map(|index| {
            let theta = index as f64 / total as f64 * TAU;

            let phase = lfo_phase(
                theta,
                lfo_frequency,
                params.lfo_symmetry_x,
                params.lfo_symmetry_y,
            );
            let frequency_mod =
                frequency + params.lfo_amount * params.lfo_wave_type.sample(phase);

            let folded = mirror_fold(theta, params.mirror_x, params.mirror_y);
            let wave_phase = frequency_mod * folded;

            let (base_r, base_dr) = params.shape.profile(params.radius, theta);
            let r = base_r + params.amplitude * wave_phase.sin();
            let dr = base_dr + params.amplitude * frequency_mod * wave_phase.cos();

            let (sin, cos) = theta.sin_cos();
            let pos = CANVAS_CENTER + Vec2::new(r * cos, r * sin);

            let tangent = Vec2::new(dr * cos - r * sin, dr * sin + r * cos);
            let magnitude = match tangent.hypot() {
                m if m > 0.0 && m.is_finite() => m,
                _ => 1.0,
            };
            let direction = tangent / magnitude;
            let handle_length = TAU * r / (total as f64 * 3.0);
            let arm = direction * handle_length;

            Node {
                pos,
                theta,
                handle1: pos - arm,
                handle2: pos + arm,
                symmetry_group: index % resolution,
            }
        })
        .collect();
    log::trace!("computed {total} nodes");
    nodes
}

/// Distance of `p` from the canvas center.
pub fn radial_distance(p: Point) -> f64 {
    (p - CANVAS_CENTER).hypot()
}

// ─── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WaveType;
    use crate::preset::Shape;

    fn assert_finite(nodes: &[Node]) {
        for (i, n) in nodes.iter().enumerate() {
            for p in [n.pos, n.handle1, n.handle2] {
                assert!(p.x.is_finite() && p.y.is_finite(), "node {i}: {p:?}");
            }
        }
    }

    #[test]
    fn default_params_give_twenty_nodes() {
        let nodes = compute_nodes(&Params::default());
        assert_eq!(nodes.len(), 20);
        assert_eq!(nodes[0].pos, Point::new(520.0, 400.0));
        assert_finite(&nodes);
    }

    #[test]
    fn node_count_tracks_frequency_and_resolution() {
        for frequency in 1..=12 {
            for resolution in 1..=8 {
                let params = Params {
                    frequency,
                    resolution,
                    ..Params::default()
                };
                let nodes = compute_nodes(&params);
                assert_eq!(nodes.len(), (frequency * resolution) as usize);
                assert_finite(&nodes);
            }
        }
    }

    #[test]
    fn zero_resolution_gives_empty_ring() {
        let params = Params {
            resolution: 0,
            ..Params::default()
        };
        assert!(compute_nodes(&params).is_empty());
    }

    #[test]
    fn symmetry_group_is_phase_within_period() {
        let params = Params {
            frequency: 3,
            resolution: 4,
            ..Params::default()
        };
        let groups: Vec<usize> = compute_nodes(&params)
            .iter()
            .map(|n| n.symmetry_group)
            .collect();
        assert_eq!(groups, vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 1, 2, 3]);
    }

    #[test]
    fn handles_are_symmetric_about_node() {
        for node in compute_nodes(&Params::default()) {
            let mid = node.handle1.midpoint(node.handle2);
            assert!((mid - node.pos).hypot() < 1e-9);
        }
    }

    #[test]
    fn handle_length_follows_arc_share() {
        let params = Params::default();
        let nodes = compute_nodes(&params);
        let node = &nodes[0];
        let r = radial_distance(node.pos);
        let expected = TAU * r / (20.0 * 3.0);
        assert!(((node.handle2 - node.pos).hypot() - expected).abs() < 1e-9);
    }

    #[test]
    fn zero_radius_and_amplitude_falls_back_to_unit_tangent() {
        let params = Params {
            radius: 0.0,
            amplitude: 0.0,
            ..Params::default()
        };
        let nodes = compute_nodes(&params);
        assert_finite(&nodes);
        for n in nodes {
            assert_eq!(n.pos, CANVAS_CENTER);
            assert_eq!(n.handle1, CANVAS_CENTER);
        }
    }

    #[test]
    fn every_shape_and_wave_stays_finite() {
        for shape in Shape::ALL {
            for wave in WaveType::ALL {
                let params = Params {
                    lfo_amount: 2.5,
                    lfo_wave_type: wave,
                    lfo_symmetry_x: true,
                    mirror_x: true,
                    mirror_y: true,
                    ..Params::for_shape(shape)
                };
                let nodes = compute_nodes(&params);
                assert_eq!(nodes.len(), params.total_nodes());
                assert_finite(&nodes);
            }
        }
    }

    #[test]
    fn compute_is_deterministic() {
        let params = Params {
            lfo_amount: 1.0,
            lfo_wave_type: WaveType::Random,
            ..Params::default()
        };
        assert_eq!(compute_nodes(&params), compute_nodes(&params));
    }

    #[test]
    fn lfo_sync_rounds_frequency() {
        let params = Params {
            lfo_frequency: 2.6,
            lfo_sync: true,
            ..Params::default()
        };
        assert_eq!(effective_lfo_frequency(&params), 3.0);
    }

    #[test]
    fn lfo_symmetry_folds_lower_half() {
        let upper = lfo_phase(0.5, 1.0, false, true);
        let lower = lfo_phase(TAU - 0.5, 1.0, false, true);
        assert!((upper - lower).abs() < 1e-12);
    }

    #[test]
    fn mirror_both_axes_folds_into_quadrant() {
        assert!((mirror_fold(0.3, true, true) - 0.3).abs() < 1e-12);
        let second = mirror_fold(FRAC_PI_2 + 0.3, true, true);
        assert!((second - (FRAC_PI_2 - 0.3)).abs() < 1e-12);
    }

    #[test]
    fn mirror_y_reflects_second_half() {
        assert_eq!(mirror_fold(1.0, false, true), 1.0);
        assert!((mirror_fold(PI + 1.0, false, true) - (PI - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn mirror_disabled_is_identity() {
        assert_eq!(mirror_fold(4.2, false, false), 4.2);
    }
}
