//! A single circular indicator.
//!
//! An indicator cross-fades between an "empty ring" and a "filled disk" as
//! its progress sweeps 0 → 1. Progress only changes through the toggle
//! transition (or a direct `set_progress` during configuration), and at
//! most one toggle runs at a time: a request made while one is in flight is
//! dropped, not queued.

use std::fmt;

use crate::animation::{lerp, ColorLayer, ColorTarget, Easing};
use crate::config::RowConfig;
use crate::render::{Canvas, Paint};
use crate::style::Color;
use crate::widget::Widget;

/// One-shot callback fired when a toggle transition completes.
pub type ToggleCompletion = Box<dyn FnOnce()>;

/// Toggle transition state.
enum ToggleState {
    Idle,
    Animating {
        from: f32,
        to: f32,
        elapsed_ms: f32,
        on_complete: Option<ToggleCompletion>,
    },
}

impl fmt::Debug for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Animating {
                from,
                to,
                elapsed_ms,
                on_complete,
            } => f
                .debug_struct("Animating")
                .field("from", from)
                .field("to", to)
                .field("elapsed_ms", elapsed_ms)
                .field("has_completion", &on_complete.is_some())
                .finish(),
        }
    }
}

/// One circular password slot.
#[derive(Debug)]
pub struct Indicator {
    radius: f32,
    outline_stroke_width: f32,
    fill_color: Color,
    outline_color: Color,
    fill_and_stroke_color: Color,
    progress: f32,
    toggle_duration_ms: f32,
    toggle: ToggleState,
    dirty: bool,
}

impl Indicator {
    /// Easing of the toggle transition.
    pub const TOGGLE_EASING: Easing = Easing::FastOutLinearIn;

    /// Creates an empty indicator styled from `config`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(config: &RowConfig) -> Self {
        Self {
            radius: config.radius,
            outline_stroke_width: config.outline_stroke_width,
            fill_color: config.not_input_color,
            outline_color: config.outline_color,
            fill_and_stroke_color: config.input_color,
            progress: 0.0,
            toggle_duration_ms: config.input_and_remove_duration_ms as f32,
            toggle: ToggleState::Idle,
            dirty: true,
        }
    }

    /// Current progress: 0 is empty, 1 is filled.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Sets progress directly and schedules a redraw.
    ///
    /// Keeping `p` within 0-1 is the caller's responsibility.
    pub fn set_progress(&mut self, p: f32) {
        self.progress = p;
        self.dirty = true;
    }

    /// Returns true while a toggle transition is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.toggle, ToggleState::Animating { .. })
    }

    /// Starts a transition to the opposite extreme (0 → 1, anything else → 0).
    ///
    /// Returns false, without touching `on_complete`'s captured state, when a
    /// transition is already running.
    pub fn animate_toggle(&mut self, on_complete: Option<ToggleCompletion>) -> bool {
        if self.is_animating() {
            return false;
        }

        #[allow(clippy::float_cmp)]
        let to = if self.progress == 0.0 { 1.0 } else { 0.0 };
        self.toggle = ToggleState::Animating {
            from: self.progress,
            to,
            elapsed_ms: 0.0,
            on_complete,
        };
        true
    }

    fn advance_toggle(&mut self, dt_ms: f32) {
        let duration = self.toggle_duration_ms;
        let ToggleState::Animating {
            from, to, elapsed_ms, ..
        } = &mut self.toggle
        else {
            return;
        };

        *elapsed_ms += dt_ms.max(0.0);
        let (from, to, elapsed) = (*from, *to, *elapsed_ms);
        if elapsed < duration {
            let t = Self::TOGGLE_EASING.apply(elapsed / duration);
            self.set_progress(lerp(from, to, t));
            return;
        }

        self.set_progress(to);
        if let ToggleState::Animating { on_complete, .. } =
            std::mem::replace(&mut self.toggle, ToggleState::Idle)
        {
            if let Some(callback) = on_complete {
                callback();
            }
        }
    }
}

impl ColorTarget for Indicator {
    fn color(&self, layer: ColorLayer) -> Color {
        match layer {
            ColorLayer::Fill => self.fill_color,
            ColorLayer::Outline => self.outline_color,
            ColorLayer::FillAndStroke => self.fill_and_stroke_color,
        }
    }

    fn set_color(&mut self, layer: ColorLayer, color: Color) {
        match layer {
            ColorLayer::Fill => self.fill_color = color,
            ColorLayer::Outline => self.outline_color = color,
            ColorLayer::FillAndStroke => self.fill_and_stroke_color = color,
        }
        self.dirty = true;
    }
}

impl Widget for Indicator {
    fn update(&mut self, dt_ms: f32) {
        self.advance_toggle(dt_ms);
    }

    /// Draws three concentric circles: the empty fill and the ring shrink
    /// to nothing while the solid disk grows to full size.
    fn render(&self, origin: (f32, f32), canvas: &mut dyn Canvas) {
        let half_stroke = self.outline_stroke_width / 2.0;
        let cx = origin.0 + self.radius + half_stroke;
        let cy = origin.1 + self.radius + half_stroke;
        let p = self.progress;

        canvas.draw_circle(
            cx,
            cy,
            lerp(self.radius - half_stroke, 0.0, p),
            &Paint::fill(self.fill_color),
        );
        canvas.draw_circle(
            cx,
            cy,
            lerp(self.radius, 0.0, p),
            &Paint::stroke(self.outline_color, self.outline_stroke_width),
        );
        canvas.draw_circle(
            cx,
            cy,
            lerp(0.0, self.radius + half_stroke, p),
            &Paint::fill_and_stroke(self.fill_and_stroke_color, 0.0),
        );
    }

    fn preferred_size(&self) -> (f32, f32) {
        let side = self.radius * 2.0 + self.outline_stroke_width;
        (side, side)
    }

    fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::render::{CommandRecorder, PaintStyle, RenderCommand};

    fn indicator() -> Indicator {
        Indicator::new(&RowConfig::default())
    }

    #[test]
    fn test_toggle_fills_then_empties() {
        let mut dot = indicator();
        assert!(dot.animate_toggle(None));
        assert!(dot.is_animating());

        dot.update(100.0);
        assert!(dot.progress() > 0.0 && dot.progress() < 1.0);

        dot.update(100.0);
        assert!(!dot.is_animating());
        assert!((dot.progress() - 1.0).abs() < f32::EPSILON);

        assert!(dot.animate_toggle(None));
        dot.update(250.0);
        assert!(dot.progress().abs() < f32::EPSILON);
    }

    #[test]
    fn test_toggle_request_while_animating_is_dropped() {
        let fired = Rc::new(Cell::new(0));
        let mut dot = indicator();
        let first = Rc::clone(&fired);
        assert!(dot.animate_toggle(Some(Box::new(move || first.set(first.get() + 1)))));

        let second = Rc::clone(&fired);
        assert!(!dot.animate_toggle(Some(Box::new(move || second.set(second.get() + 10)))));

        dot.update(200.0);
        assert_eq!(fired.get(), 1);
        assert!((dot.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_completion_fires_only_at_the_end() {
        let fired = Rc::new(Cell::new(false));
        let flag = Rc::clone(&fired);
        let mut dot = indicator();
        dot.animate_toggle(Some(Box::new(move || flag.set(true))));

        dot.update(199.0);
        assert!(!fired.get());
        dot.update(1.0);
        assert!(fired.get());
    }

    #[test]
    fn test_easing_lags_linear() {
        let mut dot = indicator();
        dot.animate_toggle(None);
        dot.update(50.0);
        assert!(dot.progress() < 0.25);
    }

    #[test]
    fn test_render_empty_and_filled() {
        let mut dot = indicator();
        let mut recorder = CommandRecorder::new();
        dot.render((10.0, 0.0), &mut recorder);

        let radii: Vec<f32> = recorder
            .commands()
            .iter()
            .map(|RenderCommand::Circle { radius, .. }| *radius)
            .collect();
        assert_eq!(radii, vec![18.0, 20.0, 0.0]);

        let RenderCommand::Circle { cx, cy, paint, .. } = recorder.commands()[1];
        assert!((cx - 32.0).abs() < f32::EPSILON);
        assert!((cy - 22.0).abs() < f32::EPSILON);
        assert_eq!(paint.style, PaintStyle::Stroke);
        assert_eq!(paint.color, Color::GRAY);

        dot.set_progress(1.0);
        recorder.begin_frame();
        dot.render((0.0, 0.0), &mut recorder);
        let RenderCommand::Circle { radius, paint, .. } = recorder.commands()[2];
        assert!((radius - 22.0).abs() < f32::EPSILON);
        assert_eq!(paint.color, Color::BLACK);
    }

    #[test]
    fn test_color_target_layers() {
        let mut dot = indicator();
        assert_eq!(dot.color(ColorLayer::Fill), Color::WHITE);
        assert_eq!(dot.color(ColorLayer::FillAndStroke), Color::BLACK);
        dot.set_color(ColorLayer::FillAndStroke, Color::GREEN);
        assert_eq!(dot.color(ColorLayer::FillAndStroke), Color::GREEN);
        assert_eq!(dot.color(ColorLayer::Outline), Color::GRAY);
    }

    #[test]
    fn test_redraw_flag() {
        let mut dot = indicator();
        assert!(dot.take_redraw());
        assert!(!dot.take_redraw());
        dot.set_color(ColorLayer::Fill, Color::RED);
        assert!(dot.take_redraw());
    }

    #[test]
    fn test_preferred_size() {
        assert_eq!(indicator().preferred_size(), (44.0, 44.0));
    }
}
