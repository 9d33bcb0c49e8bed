//! Integration tests: geometry engine, path serializer, and symmetry
//! resolver working together across every shape preset.

use pretty_assertions::assert_eq;
use wavy_core::path::{clean_zero, segment_count};
use wavy_core::{
    ParamKey, ParamValue, Params, Shape, WaveType, compute_nodes, nodes_to_path, siblings_of,
};

fn variants() -> Vec<Params> {
    let mut out = Vec::new();
    for shape in Shape::ALL {
        for wave in WaveType::ALL {
            out.push(Params {
                lfo_amount: 1.5,
                lfo_wave_type: wave,
                lfo_sync: wave == WaveType::Square,
                lfo_symmetry_x: wave == WaveType::Triangle,
                mirror_x: wave != WaveType::Sine,
                mirror_y: wave == WaveType::Random,
                ..Params::for_shape(shape)
            });
        }
    }
    out
}

// ─── Geometry ───────────────────────────────────────────────────────────

#[test]
fn every_preset_yields_full_finite_ring() {
    for params in variants() {
        let nodes = compute_nodes(&params);
        assert_eq!(nodes.len(), params.total_nodes(), "{:?}", params.shape);
        for n in &nodes {
            for p in [n.pos, n.handle1, n.handle2] {
                assert!(p.x.is_finite() && p.y.is_finite(), "{:?}", params.shape);
            }
        }
    }
}

#[test]
fn handles_are_symmetric_about_node() {
    for params in variants() {
        for n in compute_nodes(&params) {
            let mid = n.handle1.midpoint(n.handle2);
            assert!((mid - n.pos).hypot() < 1e-9);
        }
    }
}

#[test]
fn generation_is_deterministic() {
    for params in variants() {
        assert_eq!(compute_nodes(&params), compute_nodes(&params));
    }
}

#[test]
fn degenerate_counts_yield_empty_ring() {
    let params = Params {
        frequency: 0,
        ..Params::default()
    };
    assert!(compute_nodes(&params).is_empty());
    assert_eq!(nodes_to_path(&compute_nodes(&params), true), "");
}

// ─── Path ───────────────────────────────────────────────────────────────

#[test]
fn path_has_one_segment_per_node() {
    for params in variants() {
        let nodes = compute_nodes(&params);
        for smooth in [true, false] {
            let path = nodes_to_path(&nodes, smooth);
            let first = nodes[0].pos;
            let start = format!("M {} {} ", clean_zero(first.x), clean_zero(first.y));
            assert!(path.starts_with(&start));
            assert_eq!(segment_count(&path), nodes.len());
        }
    }
}

#[test]
fn reference_ring_path_shape() {
    let nodes = compute_nodes(&Params::default());
    let smooth = nodes_to_path(&nodes, true);
    let sharp = nodes_to_path(&nodes, false);
    assert!(smooth.starts_with("M 520 400 C "));
    assert_eq!(smooth.matches(" C ").count(), 20);
    assert!(sharp.starts_with("M 520 400 L "));
    assert_eq!(sharp.matches(" L ").count(), 20);
}

// ─── Symmetry ───────────────────────────────────────────────────────────

#[test]
fn sibling_sets_cover_ring_once() {
    for params in variants() {
        let nodes = compute_nodes(&params);
        let mut seen = vec![0usize; nodes.len()];
        for i in 0..nodes.len() {
            let group = siblings_of(i, &nodes);
            assert!(group.contains(&i));
            assert_eq!(group.len(), params.frequency as usize);
            assert!(group.windows(2).all(|w| w[0] < w[1]));
            if group[0] == i {
                for &j in &group {
                    seen[j] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }
}

// ─── Presets ────────────────────────────────────────────────────────────

#[test]
fn hexagon_preset_replaces_record() {
    let mut params = Params {
        lfo_amount: 3.0,
        mirror_x: true,
        ..Params::default()
    };
    params
        .set(ParamKey::Shape, ParamValue::Shape(Shape::Hexagon))
        .unwrap();
    assert_eq!(
        params,
        Params {
            radius: 200.0,
            amplitude: 15.0,
            frequency: 6,
            resolution: 8,
            scale: 0.8,
            rotate: 15.0,
            shape: Shape::Hexagon,
            ..Params::default()
        }
    );
}
