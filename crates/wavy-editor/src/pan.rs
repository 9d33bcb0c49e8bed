//! Canvas panning with release momentum.
//!
//! While Space is held, a pointer drag over empty canvas moves the pan
//! offset by the raw pointer delta. Releasing with enough speed lets the
//! view glide: each frame advances by `velocity·min(dt, max_step)` and
//! decays the velocity until it falls below the stop threshold.

use crate::config::EditorConfig;
use kurbo::{Point, Vec2};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Momentum {
    velocity: Vec2,
    last_time: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanGesture {
    last_pointer: Point,
    last_time: Duration,
    /// Pointer velocity in px/ms over the latest move.
    velocity: Vec2,
}

#[derive(Debug, Clone, Default)]
pub struct PanController {
    offset: Vec2,
    space_held: bool,
    gesture: Option<PanGesture>,
    momentum: Option<Momentum>,
}

impl PanController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn space_held(&self) -> bool {
        self.space_held
    }

    pub fn set_space_held(&mut self, held: bool) {
        self.space_held = held;
    }

    pub fn is_panning(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn has_momentum(&self) -> bool {
        self.momentum.is_some()
    }

    /// Start a pan at `pointer`. Cancels any running momentum.
    pub fn begin(&mut self, pointer: Point, now: Duration) {
        self.momentum = None;
        self.gesture = Some(PanGesture {
            last_pointer: pointer,
            last_time: now,
            velocity: Vec2::ZERO,
        });
        log::debug!("pan start at ({:.1}, {:.1})", pointer.x, pointer.y);
    }

    /// Follow the pointer. Returns `true` if the offset changed.
    pub fn move_to(&mut self, pointer: Point, now: Duration) -> bool {
        let Some(gesture) = self.gesture.as_mut() else {
            return false;
        };
        let delta = pointer - gesture.last_pointer;
        if delta == Vec2::ZERO {
            return false;
        }
        let dt = elapsed_ms(gesture.last_time, now).max(1.0);
        self.offset += delta;
        gesture.velocity = delta / dt;
        gesture.last_pointer = pointer;
        gesture.last_time = now;
        true
    }

    /// End the pan, handing its velocity to momentum if fast enough.
    /// Returns `true` if momentum started.
    pub fn end(&mut self, now: Duration, config: &EditorConfig) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        if gesture.velocity.hypot() < config.momentum_min_speed {
            log::debug!("pan end");
            return false;
        }
        self.momentum = Some(Momentum {
            velocity: gesture.velocity,
            last_time: now,
        });
        log::debug!("pan end with momentum {:?}", gesture.velocity);
        true
    }

    pub fn cancel_momentum(&mut self) {
        self.momentum = None;
    }

    /// Advance momentum by one frame. Returns `true` while still gliding.
    pub fn step(&mut self, now: Duration, config: &EditorConfig) -> bool {
        let Some(momentum) = self.momentum.as_mut() else {
            return false;
        };
        let dt = elapsed_ms(momentum.last_time, now).min(config.momentum_max_step_ms);
        momentum.last_time = now;
        let delta = momentum.velocity * dt;
        let next = momentum.velocity * config.momentum_decay;
        if next.hypot() < config.momentum_min_speed {
            self.momentum = None;
            return false;
        }
        self.offset += delta;
        momentum.velocity = next;
        true
    }
}

fn elapsed_ms(from: Duration, to: Duration) -> f64 {
    to.saturating_sub(from).as_secs_f64() * 1000.0
}
