//! Integration tests: animation loop driven through the editor.
//!
//! Time comes from a `ManualClock` and frames are fired by hand from the
//! `ManualScheduler`, so every frame lands at a known instant.

use pretty_assertions::assert_eq;
use std::time::Duration;
use wavy_core::{ParamKey, ParamValue, Params, UiFlag};
use wavy_editor::{Editor, ManualClock, ManualScheduler};

const FRAME: Duration = Duration::from_millis(16);

fn animated(keys: &[ParamKey]) -> (Editor<ManualClock, ManualScheduler>, ManualClock) {
    let clock = ManualClock::new();
    let mut editor = Editor::new(clock.clone(), ManualScheduler::new());
    for &key in keys {
        editor.toggle_animated(key);
    }
    editor.set_ui_flag(UiFlag::Animate, true);
    (editor, clock)
}

/// Fire the pending frame, if any. Returns whether one was pending.
fn pump(editor: &mut Editor<ManualClock, ManualScheduler>, clock: &ManualClock) -> bool {
    if editor.scheduler_mut().take_pending().is_none() {
        return false;
    }
    clock.advance(FRAME);
    editor.on_frame();
    true
}

#[test]
fn animation_requests_frames_only_when_active() {
    let clock = ManualClock::new();
    let mut editor = Editor::new(clock.clone(), ManualScheduler::new());

    editor.set_ui_flag(UiFlag::Animate, true);
    assert_eq!(editor.pending_frame(), None, "empty set must not animate");

    editor.toggle_animated(ParamKey::Radius);
    assert!(editor.pending_frame().is_some());
    assert!(pump(&mut editor, &clock));
    assert!(editor.pending_frame().is_some(), "loop keeps itself alive");
}

#[test]
fn radius_stays_in_band_and_ring_follows() {
    let (mut editor, clock) = animated(&[ParamKey::Radius]);
    for _ in 0..400 {
        assert!(pump(&mut editor, &clock));
        let radius = editor.params().radius;
        assert!((120.0 - 37.5 - 1e-9..=120.0 + 37.5 + 1e-9).contains(&radius));
        // The first node sits on the positive x axis at distance radius.
        assert!((editor.nodes()[0].pos.x - 400.0 - radius).abs() < 1e-9);
    }
    let intensity = editor.animator().intensity(ParamKey::Radius);
    assert!((0.0..=1.0).contains(&intensity));
}

#[test]
fn disabling_animation_restores_and_cancels() {
    let (mut editor, clock) = animated(&[ParamKey::Radius, ParamKey::Rotate]);
    for _ in 0..30 {
        pump(&mut editor, &clock);
    }
    assert_ne!(editor.params().radius, 120.0);

    editor.set_ui_flag(UiFlag::Animate, false);
    assert_eq!(editor.params(), &Params::default());
    assert_eq!(editor.pending_frame(), None);
    assert_eq!(editor.scheduler().cancelled(), 1);
    assert!(editor.animator().intensities().is_empty());
    assert!(editor.path_data().starts_with("M 520 400 "));
}

#[test]
fn removing_last_key_stops_loop() {
    let (mut editor, clock) = animated(&[ParamKey::Amplitude]);
    for _ in 0..10 {
        pump(&mut editor, &clock);
    }
    assert!(!editor.toggle_animated(ParamKey::Amplitude));
    assert_eq!(editor.params().amplitude, 25.0);
    assert_eq!(editor.pending_frame(), None);
    assert!(!editor.animator().is_running());
}

#[test]
fn manual_edit_recenters_oscillation() {
    let (mut editor, clock) = animated(&[ParamKey::Radius]);
    pump(&mut editor, &clock);
    assert!(editor.set_param(ParamKey::Radius, ParamValue::Number(160.0)));
    assert!(editor.ui().animate, "edit must not disable animation");

    for _ in 0..400 {
        pump(&mut editor, &clock);
        let radius = editor.params().radius;
        assert!((160.0 - 37.5 - 1e-9..=160.0 + 37.5 + 1e-9).contains(&radius));
    }
    editor.set_ui_flag(UiFlag::Animate, false);
    assert_eq!(editor.params().radius, 160.0);
}

#[test]
fn drop_cancels_pending_frame() {
    let mut scheduler = ManualScheduler::new();
    {
        let mut editor = Editor::new(ManualClock::new(), &mut scheduler);
        editor.toggle_animated(ParamKey::Scale);
        editor.set_ui_flag(UiFlag::Animate, true);
        assert!(editor.pending_frame().is_some());
    }
    assert_eq!(scheduler.pending(), None);
    assert_eq!(scheduler.cancelled(), 1);
}
