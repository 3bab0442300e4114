//! Time-based animation primitives.
//!
//! Nothing here owns a clock. Every animation is advanced explicitly with
//! `update(dt_ms)` from the host's frame loop and reports completion through
//! its listeners, exactly once, on the frame it finishes.
//!
//! - [`ShakeAnimator`]: horizontal sine oscillation ("incorrect").
//! - [`SpringAnimator`]: three-leg vertical bounce ("correct").
//! - [`ColorChangeAnimation`]: channel-wise color transition on one paint layer.

use std::f32::consts::PI;
use std::fmt;

use crate::style::Color;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Linear interpolation.
    #[default]
    Linear,
    /// Accelerates from rest and ends at full speed, cubic-bezier(0.4, 0, 1, 1).
    FastOutLinearIn,
    /// Accelerates quickly and settles gently, cubic-bezier(0.4, 0, 0.2, 1).
    FastOutSlowIn,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::FastOutLinearIn => cubic_bezier(0.4, 0.0, 1.0, 1.0, t),
            Self::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
        }
    }
}

/// Evaluates one axis of a unit cubic bezier at parameter `s`.
fn bezier_axis(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_axis_slope(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Solves x(s) = t for s, then returns y(s).
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    // Newton first, it converges in a handful of steps on well-formed curves.
    let mut s = t;
    for _ in 0..8 {
        let error = bezier_axis(x1, x2, s) - t;
        if error.abs() < 1e-6 {
            return bezier_axis(y1, y2, s);
        }
        let slope = bezier_axis_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s = (s - error / slope).clamp(0.0, 1.0);
    }

    // Flat spots: fall back to bisection, x(s) is monotonic for x1, x2 in 0-1.
    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    s = t;
    for _ in 0..32 {
        let x = bezier_axis(x1, x2, s);
        if (x - t).abs() < 1e-6 {
            break;
        }
        if x < t {
            low = s;
        } else {
            high = s;
        }
        s = (low + high) * 0.5;
    }
    bezier_axis(y1, y2, s)
}

/// Linearly interpolates between two values.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Elapsed-time bookkeeping shared by every primitive.
///
/// The timeline sits at fraction 0 for `delay_ms`, sweeps to 1 over
/// `duration_ms`, and is finished once both have elapsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timeline {
    duration_ms: f32,
    delay_ms: f32,
    elapsed_ms: f32,
}

impl Timeline {
    /// Creates a timeline at time zero.
    #[must_use]
    pub fn new(duration_ms: f32, delay_ms: f32) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            delay_ms: delay_ms.max(0.0),
            elapsed_ms: 0.0,
        }
    }

    /// Advances the clock.
    pub fn advance(&mut self, dt_ms: f32) {
        self.elapsed_ms += dt_ms.max(0.0);
    }

    /// Returns true once the start delay has passed.
    #[must_use]
    pub fn has_started(&self) -> bool {
        self.elapsed_ms >= self.delay_ms
    }

    /// Returns true once delay and duration have both passed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.delay_ms + self.duration_ms
    }

    /// Linear progress (0-1) through the active part of the timeline.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        let active = self.elapsed_ms - self.delay_ms;
        if active <= 0.0 {
            0.0
        } else if self.duration_ms <= 0.0 {
            1.0
        } else {
            (active / self.duration_ms).min(1.0)
        }
    }

    /// Time spent past the start delay, capped at the duration.
    #[must_use]
    pub fn active_ms(&self) -> f32 {
        (self.elapsed_ms - self.delay_ms).clamp(0.0, self.duration_ms)
    }
}

/// Callback fired when an animation reaches its natural end.
pub type CompletionListener = Box<dyn FnMut()>;

/// Listener list for one animation instance.
#[derive(Default)]
struct Listeners(Vec<CompletionListener>);

impl Listeners {
    fn add(&mut self, listener: CompletionListener) {
        self.0.push(listener);
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn notify(&mut self) {
        for listener in &mut self.0 {
            listener();
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listeners({})", self.0.len())
    }
}

/// Behaviour common to every animation primitive.
pub trait Animator {
    /// Returns true between `start` and the natural end (or `cancel`).
    fn is_running(&self) -> bool;

    /// Stops the animation without notifying listeners.
    fn cancel(&mut self);

    /// Registers a listener fired once at the natural end of each run.
    fn add_listener(&mut self, listener: CompletionListener);

    /// Drops every registered listener.
    fn remove_all_listeners(&mut self);
}

/// An animation that displaces its target from the resting position.
pub trait Motion: Animator {
    /// Starts (or restarts) the animation from time zero.
    fn start(&mut self);

    /// Advances the animation. Returns true on the frame it finishes, after
    /// listeners have been notified.
    fn update(&mut self, dt_ms: f32) -> bool;

    /// Current displacement `(dx, dy)` from the resting position.
    fn offset(&self) -> (f32, f32);
}

/// Horizontal shake: `sin(shake_times * PI * p) * shake_max_width / 2`.
///
/// The sine returns to zero at `p = 1`, so the target always comes to rest
/// where it started.
#[derive(Debug)]
pub struct ShakeAnimator {
    /// Active duration.
    pub duration_ms: f32,
    /// Delay before the shake starts moving.
    pub start_delay_ms: f32,
    /// Peak-to-peak displacement.
    pub shake_max_width: f32,
    /// Number of half oscillations.
    pub shake_times: u32,
    timeline: Option<Timeline>,
    listeners: Listeners,
}

impl ShakeAnimator {
    /// Creates an idle shake with the default timing (400 ms, 4 half
    /// oscillations, 40 units wide).
    #[must_use]
    pub fn new() -> Self {
        Self {
            duration_ms: 400.0,
            start_delay_ms: 0.0,
            shake_max_width: 40.0,
            shake_times: 4,
            timeline: None,
            listeners: Listeners::default(),
        }
    }
}

impl Default for ShakeAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for ShakeAnimator {
    fn is_running(&self) -> bool {
        self.timeline.is_some()
    }

    fn cancel(&mut self) {
        self.timeline = None;
    }

    fn add_listener(&mut self, listener: CompletionListener) {
        self.listeners.add(listener);
    }

    fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }
}

impl Motion for ShakeAnimator {
    fn start(&mut self) {
        // Restarting replaces the previous run.
        self.cancel();
        self.timeline = Some(Timeline::new(self.duration_ms, self.start_delay_ms));
    }

    fn update(&mut self, dt_ms: f32) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };
        timeline.advance(dt_ms);
        if !timeline.is_finished() {
            return false;
        }
        self.timeline = None;
        self.listeners.notify();
        true
    }

    fn offset(&self) -> (f32, f32) {
        let Some(timeline) = self.timeline else {
            return (0.0, 0.0);
        };
        #[allow(clippy::cast_precision_loss)]
        let times = self.shake_times as f32;
        let dx = (times * PI * timeline.fraction()).sin() * self.shake_max_width / 2.0;
        (dx, 0.0)
    }
}

/// Vertical bounce through three waypoints: up to `-top_y`, down to
/// `+bottom_y`, back to rest.
///
/// Each leg runs for the full `duration_ms`, one after the other, so a run
/// lasts `start_delay_ms + 3 * duration_ms`. The waypoints are absolute
/// offsets captured when the run starts; changing `top_y`/`bottom_y`
/// mid-run has no effect until the next `start`.
#[derive(Debug)]
pub struct SpringAnimator {
    /// Duration of each leg.
    pub duration_ms: f32,
    /// Delay before the first leg.
    pub start_delay_ms: f32,
    /// Rise above rest (positive, applied upward).
    pub top_y: f32,
    /// Dip below rest (positive, applied downward).
    pub bottom_y: f32,
    /// Easing applied to every leg.
    pub easing: Easing,
    waypoints: [f32; 4],
    timeline: Option<Timeline>,
    listeners: Listeners,
}

impl SpringAnimator {
    /// Number of sequential legs in one bounce.
    pub const LEGS: usize = 3;

    /// Creates an idle spring with the default timing (150 ms legs,
    /// 30 up, 10 down).
    #[must_use]
    pub fn new() -> Self {
        Self {
            duration_ms: 150.0,
            start_delay_ms: 0.0,
            top_y: 30.0,
            bottom_y: 10.0,
            easing: Easing::FastOutSlowIn,
            waypoints: [0.0; 4],
            timeline: None,
            listeners: Listeners::default(),
        }
    }
}

impl Default for SpringAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for SpringAnimator {
    fn is_running(&self) -> bool {
        self.timeline.is_some()
    }

    fn cancel(&mut self) {
        self.timeline = None;
    }

    fn add_listener(&mut self, listener: CompletionListener) {
        self.listeners.add(listener);
    }

    fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }
}

impl Motion for SpringAnimator {
    fn start(&mut self) {
        self.cancel();
        self.waypoints = [0.0, -self.top_y, self.bottom_y, 0.0];
        #[allow(clippy::cast_precision_loss)]
        let total = self.duration_ms * Self::LEGS as f32;
        self.timeline = Some(Timeline::new(total, self.start_delay_ms));
    }

    fn update(&mut self, dt_ms: f32) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };
        timeline.advance(dt_ms);
        if !timeline.is_finished() {
            return false;
        }
        self.timeline = None;
        self.listeners.notify();
        true
    }

    fn offset(&self) -> (f32, f32) {
        let Some(timeline) = self.timeline else {
            return (0.0, 0.0);
        };
        if self.duration_ms <= 0.0 {
            return (0.0, 0.0);
        }

        let active = timeline.active_ms();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let leg = ((active / self.duration_ms) as usize).min(Self::LEGS - 1);
        #[allow(clippy::cast_precision_loss)]
        let local = ((active - leg as f32 * self.duration_ms) / self.duration_ms).clamp(0.0, 1.0);
        let dy = lerp(self.waypoints[leg], self.waypoints[leg + 1], self.easing.apply(local));
        (0.0, dy)
    }
}

/// Which paint of an indicator a color animation drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorLayer {
    /// Inner color shown while empty.
    Fill,
    /// Ring shown while empty.
    Outline,
    /// Solid disk shown while filled.
    FillAndStroke,
}

/// Anything exposing readable and writable colors per layer.
pub trait ColorTarget {
    /// Current color of `layer`.
    fn color(&self, layer: ColorLayer) -> Color;

    /// Replaces the color of `layer`.
    fn set_color(&mut self, layer: ColorLayer, color: Color);
}

/// Interpolates one layer of a [`ColorTarget`] from its color at `start`
/// to `to_color`.
///
/// The target is left untouched during the start delay.
#[derive(Debug)]
pub struct ColorChangeAnimation {
    /// Layer being driven.
    pub layer: ColorLayer,
    /// Destination color.
    pub to_color: Color,
    /// Active duration.
    pub duration_ms: f32,
    /// Delay before the color starts moving.
    pub start_delay_ms: f32,
    from_color: Color,
    timeline: Option<Timeline>,
    listeners: Listeners,
}

impl ColorChangeAnimation {
    /// Creates an idle color change with the default timing (200 ms after
    /// a 100 ms delay).
    #[must_use]
    pub fn new(layer: ColorLayer, to_color: Color) -> Self {
        Self {
            layer,
            to_color,
            duration_ms: 200.0,
            start_delay_ms: 100.0,
            from_color: to_color,
            timeline: None,
            listeners: Listeners::default(),
        }
    }

    /// Starts the transition, capturing the target's current color as the
    /// source.
    pub fn start(&mut self, target: &impl ColorTarget) {
        self.from_color = target.color(self.layer);
        self.timeline = Some(Timeline::new(self.duration_ms, self.start_delay_ms));
    }

    /// Advances the transition and writes the interpolated color. Returns
    /// true on the frame it finishes.
    pub fn update(&mut self, dt_ms: f32, target: &mut impl ColorTarget) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };
        timeline.advance(dt_ms);
        if timeline.has_started() {
            let color = self.from_color.lerp(self.to_color, timeline.fraction());
            target.set_color(self.layer, color);
        }
        if !timeline.is_finished() {
            return false;
        }
        self.timeline = None;
        self.listeners.notify();
        true
    }

    /// Color captured when the run started.
    #[must_use]
    pub fn from_color(&self) -> Color {
        self.from_color
    }
}

impl Animator for ColorChangeAnimation {
    fn is_running(&self) -> bool {
        self.timeline.is_some()
    }

    fn cancel(&mut self) {
        self.timeline = None;
    }

    fn add_listener(&mut self, listener: CompletionListener) {
        self.listeners.add(listener);
    }

    fn remove_all_listeners(&mut self) {
        self.listeners.clear();
    }
}
