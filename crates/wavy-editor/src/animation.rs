//! Parameter animation.
//!
//! While animation mode is on and at least one parameter is flagged, each
//! frame writes `offset + amplitude·sin(t·ω·speed)` into every animated
//! parameter, where `t` is wall-clock time since the animation started. The
//! offset is the parameter's last manually chosen value, so the oscillation
//! stays centered on what the user picked.
//!
//! Time and frame scheduling are injected through [`Clock`] and
//! [`FrameScheduler`] so tests can step the loop deterministically.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;
use wavy_core::{ParamKey, Params, Shape};

// ─── Clock ───────────────────────────────────────────────────────────────

/// A monotonic time source.
pub trait Clock {
    /// Time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Clock backed by `std::time::Instant`. Not available on wasm32, where the
/// host provides its own clock.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, to: Duration) {
        self.now.set(to);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// ─── Frame scheduling ────────────────────────────────────────────────────

/// Identifies one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Requests a callback on the next display refresh.
///
/// The editor holds at most one pending request and cancels it when nothing
/// needs to animate any more.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
}

/// Scheduler that only records requests; the driver polls and fires frames.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding frame request, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the outstanding request, as a display refresh would.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    pub fn cancelled(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
        self.cancelled += 1;
    }
}

// ─── Profiles ────────────────────────────────────────────────────────────

/// How one parameter oscillates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationProfile {
    /// Angular speed in radians per second at speed multiplier 1.
    pub angular_speed: f64,
    /// Fixed swing, or `None` to use a quarter of the preset's range.
    pub swing: Option<f64>,
    /// Values are clamped to at least this.
    pub floor: Option<f64>,
}

impl AnimationProfile {
    /// Oscillation amplitude for the active shape preset.
    pub fn amplitude(&self, key: ParamKey, shape: Shape) -> f64 {
        if let Some(swing) = self.swing {
            return swing;
        }
        let preset = shape.preset();
        match key {
            ParamKey::Amplitude => preset.amplitude_range.span() / 4.0,
            _ => preset.radius_range.span() / 4.0,
        }
    }
}

/// Animation profile for `key`, or `None` if it cannot be animated.
pub fn profile(key: ParamKey) -> Option<AnimationProfile> {
    let (angular_speed, swing, floor) = match key {
        ParamKey::Radius => (1.0, None, None),
        ParamKey::Amplitude => (1.5, None, None),
        ParamKey::Frequency => (0.5, Some(2.0), Some(1.0)),
        ParamKey::LfoAmount => (0.8, Some(1.0), None),
        ParamKey::LfoFrequency => (0.6, Some(1.0), Some(0.0)),
        ParamKey::Scale => (0.7, Some(0.15), Some(0.05)),
        ParamKey::Rotate => (0.3, Some(45.0), None),
        ParamKey::StrokeWidth => (2.0, Some(1.0), Some(0.5)),
        _ => return None,
    };
    Some(AnimationProfile {
        angular_speed,
        swing,
        floor,
    })
}

pub fn is_animatable(key: ParamKey) -> bool {
    profile(key).is_some()
}

// ─── Animator ────────────────────────────────────────────────────────────

/// Animation state: start time, offset baselines, and per-key intensities.
#[derive(Debug, Default)]
pub struct Animator {
    started_at: Option<Duration>,
    offsets: BTreeMap<ParamKey, f64>,
    intensities: BTreeMap<ParamKey, f64>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Baseline the parameter oscillates around, once captured.
    pub fn offset(&self, key: ParamKey) -> Option<f64> {
        self.offsets.get(&key).copied()
    }

    /// Normalized `|sin|` of the last frame for `key`, 0 when idle.
    pub fn intensity(&self, key: ParamKey) -> f64 {
        self.intensities.get(&key).copied().unwrap_or(0.0)
    }

    pub fn intensities(&self) -> &BTreeMap<ParamKey, f64> {
        &self.intensities
    }

    /// Begin animating `keys`, capturing their current values as offsets.
    pub fn start<'a>(
        &mut self,
        now: Duration,
        params: &Params,
        keys: impl IntoIterator<Item = &'a ParamKey>,
    ) {
        self.started_at = Some(now);
        self.offsets.clear();
        for &key in keys {
            self.track(key, params);
        }
        log::debug!("animation start: {} params", self.offsets.len());
    }

    /// Stop, restore every animated parameter to its baseline, and clear the
    /// intensities.
    pub fn stop(&mut self, params: &mut Params) {
        if self.started_at.take().is_none() {
            return;
        }
        for (&key, &offset) in &self.offsets {
            if let Err(err) = params.set_number(key, offset) {
                log::warn!("restoring {key} after animation: {err}");
            }
        }
        self.offsets.clear();
        self.intensities.clear();
        log::debug!("animation stop");
    }

    /// Start tracking `key`, capturing its offset if not already known.
    pub fn track(&mut self, key: ParamKey, params: &Params) {
        if let Some(value) = params.number(key) {
            self.offsets.entry(key).or_insert(value);
        }
    }

    /// Stop tracking `key` and put it back on its baseline.
    pub fn release(&mut self, key: ParamKey, params: &mut Params) {
        self.intensities.remove(&key);
        if let Some(offset) = self.offsets.remove(&key)
            && let Err(err) = params.set_number(key, offset)
        {
            log::warn!("restoring {key}: {err}");
        }
    }

    /// A manual edit moves the baseline.
    pub fn set_offset(&mut self, key: ParamKey, value: f64) {
        if self.is_running() {
            self.offsets.insert(key, value);
        }
    }

    /// Re-capture every tracked baseline from `params` (after a preset swap).
    pub fn rebase(&mut self, params: &Params) {
        for (key, offset) in self.offsets.iter_mut() {
            if let Some(value) = params.number(*key) {
                *offset = value;
            }
        }
    }

    /// Advance to `now`, writing oscillated values into `params`.
    /// Returns `false` when not running.
    pub fn frame(&mut self, now: Duration, speed: f64, params: &mut Params) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        let t = now.saturating_sub(started_at).as_secs_f64();
        let shape = params.shape;

        for (&key, &offset) in &self.offsets {
            let Some(profile) = profile(key) else {
                continue;
            };
            let wave = (t * profile.angular_speed * speed).sin();
            let mut value = offset + profile.amplitude(key, shape) * wave;
            if let Some(floor) = profile.floor {
                value = value.max(floor);
            }
            if let Err(err) = params.set_number(key, value) {
                log::debug!("animation frame skipped {key}: {err}");
            }
            self.intensities.insert(key, wave.abs());
        }
        log::trace!("animation frame t={t:.3}s");
        true
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────
