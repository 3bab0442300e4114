//! Password row controller.
//!
//! Owns the indicators and the input string, and turns host requests into
//! indicator animations:
//!
//! ```text
//! host request ──► input / judgement state ──► indicator animations
//!                                                   │ update(dt)
//! host listener ◄── queued notices ◄── completion handlers
//! ```
//!
//! The input string is the single source of truth for which indicators are
//! filled; indicator progress is its animated projection and may lag behind
//! for the length of one toggle. Completion handlers never call the host
//! directly. They queue notices that [`PasswordRow::update`] dispatches once
//! the frame has been fully advanced, so the listener is free to call back
//! into the row, `update` included.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, trace};

use crate::animation::{
    Animator, ColorChangeAnimation, ColorLayer, Motion, ShakeAnimator, SpringAnimator,
};
use crate::config::RowConfig;
use crate::error::RowResult;
use crate::indicator::Indicator;
use crate::layout::{layout_row, row_size, Rect};
use crate::render::Canvas;
use crate::style::Color;
use crate::widget::Widget;

/// Host notifications.
pub trait ActionListener {
    /// The last indicator finished filling. `input` is the complete input.
    fn on_complete_input(&mut self, input: &str, row: &mut PasswordRow);

    /// The highest-index indicator finished its correct/incorrect animation.
    ///
    /// Hosts usually answer with [`PasswordRow::reset`].
    fn on_end_judge_animation(&mut self, row: &mut PasswordRow);
}

/// Notification queued by a completion handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notice {
    /// The last indicator finished filling.
    InputFilled,
    /// A judgement animation finished on every indicator.
    JudgeAnimationEnded,
}

type NoticeQueue = Rc<RefCell<VecDeque<Notice>>>;

/// One indicator plus everything animating it.
struct Slot {
    indicator: Indicator,
    rect: Rect,
    motions: Vec<Box<dyn Motion>>,
    colors: Vec<ColorChangeAnimation>,
}

impl Slot {
    fn offset(&self) -> (f32, f32) {
        self.motions.iter().fold((0.0, 0.0), |(x, y), motion| {
            let (dx, dy) = motion.offset();
            (x + dx, y + dy)
        })
    }

    fn is_idle(&self) -> bool {
        !self.indicator.is_animating() && self.motions.is_empty() && self.colors.is_empty()
    }

    fn update(&mut self, dt_ms: f32) -> bool {
        let mut changed = false;

        self.indicator.update(dt_ms);
        changed |= self.indicator.take_redraw();

        if !self.motions.is_empty() {
            for motion in &mut self.motions {
                motion.update(dt_ms);
            }
            self.motions.retain(|motion| motion.is_running());
            changed = true;
        }

        if !self.colors.is_empty() {
            for change in &mut self.colors {
                change.update(dt_ms, &mut self.indicator);
            }
            self.colors.retain(|change| change.is_running());
            changed |= self.indicator.take_redraw();
        }

        changed
    }

    fn start_color_change(&mut self, layer: ColorLayer, to: Color, duration_ms: f32, delay_ms: f32) {
        // Newest request on a layer wins.
        self.colors.retain(|change| change.layer != layer);
        let mut change = ColorChangeAnimation::new(layer, to);
        change.duration_ms = duration_ms;
        change.start_delay_ms = delay_ms;
        change.start(&self.indicator);
        self.colors.push(change);
    }
}

/// Which feedback a judgement animation plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Judgement {
    Correct,
    Incorrect,
}

/// The password indicator row.
pub struct PasswordRow {
    config: RowConfig,
    slots: Vec<Slot>,
    input: String,
    listener: Option<Box<dyn ActionListener>>,
    listener_generation: u64,
    notices: NoticeQueue,
    dispatching: bool,
    dirty: bool,
}

impl fmt::Debug for PasswordRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordRow")
            .field("password_count", &self.slots.len())
            .field("input", &self.input)
            .field("has_listener", &self.listener.is_some())
            .field("pending_notices", &self.notices.borrow().len())
            .finish_non_exhaustive()
    }
}

impl PasswordRow {
    /// Creates a row with `config.password_count` empty indicators.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RowError::InvalidConfig`] when the configuration
    /// fails validation.
    pub fn new(config: RowConfig) -> RowResult<Self> {
        config.validate()?;
        let mut row = Self {
            config,
            slots: Vec::new(),
            input: String::new(),
            listener: None,
            listener_generation: 0,
            notices: Rc::new(RefCell::new(VecDeque::new())),
            dispatching: false,
            dirty: true,
        };
        row.rebuild(row.config.password_count)?;
        Ok(row)
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &RowConfig {
        &self.config
    }

    /// Current input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Number of indicators.
    #[must_use]
    pub fn password_count(&self) -> usize {
        self.slots.len()
    }

    /// Replaces every indicator with `count` new ones.
    ///
    /// Input beyond the new count is dropped; indicators for the input that
    /// remains start out filled. Animations running on the old indicators
    /// are discarded with them.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RowError::InvalidCount`] when `count` is too large
    /// to lay out.
    pub fn set_password_count(&mut self, count: usize) -> RowResult<()> {
        self.rebuild(count)?;
        self.config.password_count = count;
        Ok(())
    }

    /// Indicator at `index`.
    #[must_use]
    pub fn indicator(&self, index: usize) -> Option<&Indicator> {
        self.slots.get(index).map(|slot| &slot.indicator)
    }

    /// Resting bounds of indicator `index`, before shake/bounce displacement.
    #[must_use]
    pub fn indicator_rect(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).map(|slot| slot.rect)
    }

    /// Current bounds of indicator `index`, displacement included.
    #[must_use]
    pub fn indicator_position(&self, index: usize) -> Option<Rect> {
        self.slots.get(index).map(|slot| {
            let (dx, dy) = slot.offset();
            slot.rect.translate(dx, dy)
        })
    }

    /// Returns true when nothing is animating.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.slots.iter().all(Slot::is_idle)
    }

    /// Installs the host listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: Box<dyn ActionListener>) {
        self.listener = Some(listener);
        self.listener_generation += 1;
    }

    /// Removes the host listener. Later notifications are dropped.
    pub fn remove_listener(&mut self) {
        self.listener = None;
        self.listener_generation += 1;
    }

    /// Appends `text` to the input.
    ///
    /// Declined silently, leaving the input untouched, when the result would
    /// exceed the password length or when any indicator that `text` would
    /// fill is still animating.
    pub fn append_input_text(&mut self, text: &str) {
        let current = self.input_len();
        let added = text.chars().count();
        if current + added > self.slots.len() {
            debug!(current, added, capacity = self.slots.len(), "append rejected: overflow");
            return;
        }
        if self.slots[current..current + added]
            .iter()
            .any(|slot| slot.indicator.is_animating())
        {
            debug!(current, added, "append rejected: indicator still animating");
            return;
        }

        let mut next = self.input.clone();
        next.push_str(text);
        self.set_input(next);
    }

    /// Removes the last character of the input.
    ///
    /// Declined silently when the input is empty or the last filled
    /// indicator is still animating.
    pub fn remove_input_text(&mut self) {
        let current = self.input_len();
        if current == 0 {
            return;
        }
        if self.slots[current - 1].indicator.is_animating() {
            debug!(index = current - 1, "remove rejected: indicator still animating");
            return;
        }

        let mut next = self.input.clone();
        next.pop();
        self.set_input(next);
    }

    /// Clears the input and fades every indicator back to its base colors.
    ///
    /// Both the empty fill and the filled disk are faded, whatever their
    /// current colors are.
    pub fn reset(&mut self) {
        self.set_input(String::new());

        let duration = ms(self.config.color_change_duration_ms);
        let delay = ms(self.config.color_change_delay_ms);
        let (not_input, input) = (self.config.not_input_color, self.config.input_color);
        for slot in &mut self.slots {
            slot.start_color_change(ColorLayer::Fill, not_input, duration, delay);
            slot.start_color_change(ColorLayer::FillAndStroke, input, duration, delay);
        }
        self.dirty = true;
    }

    /// Bounces every indicator and fades the fill to the correct color.
    pub fn correct_animation(&mut self) {
        self.judge(Judgement::Correct);
    }

    /// Shakes every indicator and fades the fill to the incorrect color.
    pub fn incorrect_animation(&mut self) {
        self.judge(Judgement::Incorrect);
    }

    /// Advances every animation by `dt_ms` and then delivers the
    /// notifications their completions queued.
    ///
    /// Called from inside a listener callback, it only advances; whatever
    /// it queues is delivered by a later top-level `update`.
    pub fn update(&mut self, dt_ms: f32) {
        for slot in &mut self.slots {
            self.dirty |= slot.update(dt_ms);
        }
        if !self.dispatching {
            self.dispatch_notices();
        }
    }

    /// Draws every indicator at its displaced position.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        self.render((0.0, 0.0), canvas);
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    fn rebuild(&mut self, count: usize) -> RowResult<()> {
        let rects = layout_row(count, &self.config)?;

        if let Some((cut, _)) = self.input.char_indices().nth(count) {
            self.input.truncate(cut);
        }
        let filled = self.input_len();

        self.slots = rects
            .into_iter()
            .enumerate()
            .map(|(index, rect)| {
                let mut indicator = Indicator::new(&self.config);
                if index < filled {
                    indicator.set_progress(1.0);
                }
                Slot {
                    indicator,
                    rect,
                    motions: Vec::new(),
                    colors: Vec::new(),
                }
            })
            .collect();
        self.dirty = true;
        debug!(count, filled, "indicators rebuilt");
        Ok(())
    }

    /// Replaces the input and animates the indicators whose state changed.
    fn set_input(&mut self, next: String) {
        let old_len = self.input_len();
        let new_len = next.chars().count();
        self.input = next;

        if old_len != new_len || new_len <= self.slots.len() {
            self.animate_input_change(old_len, new_len);
        }
    }

    fn animate_input_change(&mut self, old_len: usize, new_len: usize) {
        let count = self.slots.len();

        if new_len > old_len {
            for index in old_len..new_len.min(count) {
                let completion = if index + 1 == count && new_len == count {
                    let notices = Rc::clone(&self.notices);
                    Some(Box::new(move || {
                        notices.borrow_mut().push_back(Notice::InputFilled);
                    }) as Box<dyn FnOnce()>)
                } else {
                    None
                };
                let started = self.slots[index].indicator.animate_toggle(completion);
                trace!(index, started, "fill");
            }
        } else {
            for index in new_len..old_len.min(count) {
                let started = self.slots[index].indicator.animate_toggle(None);
                trace!(index, started, "empty");
            }
        }
    }

    fn judge(&mut self, judgement: Judgement) {
        let count = self.slots.len();
        let remaining = Rc::new(Cell::new(count));
        if count == 0 {
            self.notices.borrow_mut().push_back(Notice::JudgeAnimationEnded);
            return;
        }

        let stagger = ms(self.config.judge_stagger_ms);
        for (index, slot) in self.slots.iter_mut().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let delay = index as f32 * stagger;
            let mut motion: Box<dyn Motion> = match judgement {
                Judgement::Correct => {
                    let mut spring = SpringAnimator::new();
                    spring.duration_ms = ms(self.config.correct_duration_ms);
                    spring.start_delay_ms = delay;
                    spring.top_y = self.config.correct_top;
                    spring.bottom_y = self.config.correct_bottom;
                    Box::new(spring)
                }
                Judgement::Incorrect => {
                    let mut shake = ShakeAnimator::new();
                    shake.duration_ms = ms(self.config.incorrect_duration_ms);
                    shake.start_delay_ms = delay;
                    shake.shake_max_width = self.config.incorrect_max_width;
                    shake.shake_times = self.config.shake_times;
                    Box::new(shake)
                }
            };

            let remaining = Rc::clone(&remaining);
            let notices = Rc::clone(&self.notices);
            motion.add_listener(Box::new(move || {
                let left = remaining.get().saturating_sub(1);
                remaining.set(left);
                if left == 0 {
                    notices.borrow_mut().push_back(Notice::JudgeAnimationEnded);
                }
            }));
            motion.start();
            slot.motions.push(motion);
        }

        let color = match judgement {
            Judgement::Correct => self.config.correct_color,
            Judgement::Incorrect => self.config.incorrect_color,
        };
        let duration = ms(self.config.color_change_duration_ms);
        let delay = ms(self.config.color_change_delay_ms);
        for slot in &mut self.slots {
            slot.start_color_change(ColorLayer::FillAndStroke, color, duration, delay);
        }

        self.dirty = true;
        debug!(?judgement, count, "judgement animation started");
    }

    /// Delivers the notices queued so far. Notices queued by the listener
    /// itself wait for the next frame.
    fn dispatch_notices(&mut self) {
        let pending: Vec<Notice> = self.notices.borrow_mut().drain(..).collect();
        self.dispatching = true;
        for notice in pending {
            // The input may have been cleared or shortened while the last
            // fill was still running.
            if notice == Notice::InputFilled && self.input_len() != self.slots.len() {
                debug!(input_len = self.input_len(), "input changed before fill finished");
                continue;
            }
            let Some(mut listener) = self.listener.take() else {
                debug!(?notice, "no listener, notice dropped");
                continue;
            };
            let generation = self.listener_generation;

            match notice {
                Notice::InputFilled => {
                    let input = self.input.clone();
                    info!(length = input.chars().count(), "input complete");
                    listener.on_complete_input(&input, self);
                }
                Notice::JudgeAnimationEnded => {
                    info!("judgement animation ended");
                    listener.on_end_judge_animation(self);
                }
            }

            // The callback may have installed or removed a listener itself.
            if self.listener_generation == generation {
                self.listener = Some(listener);
            }
        }
        self.dispatching = false;
    }
}

impl Widget for PasswordRow {
    fn update(&mut self, dt_ms: f32) {
        PasswordRow::update(self, dt_ms);
    }

    fn render(&self, origin: (f32, f32), canvas: &mut dyn Canvas) {
        for slot in &self.slots {
            let (dx, dy) = slot.offset();
            slot.indicator
                .render((origin.0 + slot.rect.x + dx, origin.1 + slot.rect.y + dy), canvas);
        }
    }

    fn preferred_size(&self) -> (f32, f32) {
        row_size(self.slots.len(), &self.config)
    }

    fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[allow(clippy::cast_precision_loss)]
fn ms(value: u32) -> f32 {
    value as f32
}
