//! # PINROW UI
//!
//! A password-entry row: circular indicators that fill as digits arrive,
//! empty as they are removed, and answer a judgement with a bounce
//! (correct) or a shake (incorrect) plus a color fade.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      FRAME PIPELINE                       │
//! ├──────────────────────────────────────────────────────────┤
//! │  Host request → PasswordRow → Indicator / Motion / Color │
//! │                      ↓ update(dt)                         │
//! │  Completions → notice queue → ActionListener              │
//! │                      ↓ render                             │
//! │  Canvas::draw_circle (CommandRecorder → CircleInstance)   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Threading
//!
//! Single-threaded and frame-driven. The host owns the clock and calls
//! [`PasswordRow::update`] once per frame; completions are delivered
//! serially from inside that call.
//!
//! ## Example
//!
//! ```rust
//! use pinrow_ui::{PasswordRow, RowConfig, CommandRecorder};
//!
//! let mut row = PasswordRow::new(RowConfig::default())?;
//! row.append_input_text("1");
//! row.update(16.0);
//!
//! let mut recorder = CommandRecorder::new();
//! row.draw(&mut recorder);
//! assert_eq!(recorder.command_count(), 12);
//! # Ok::<(), pinrow_ui::RowError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod error;
pub mod indicator;
pub mod layout;
pub mod render;
pub mod row;
pub mod style;
pub mod widget;

pub use animation::{
    Animator, ColorChangeAnimation, ColorLayer, ColorTarget, Easing, Motion, ShakeAnimator,
    SpringAnimator, Timeline,
};
pub use config::RowConfig;
pub use error::{RowError, RowResult};
pub use indicator::Indicator;
pub use layout::{calc_margin, layout_row, Margins, Rect};
pub use render::{Canvas, CircleInstance, CommandRecorder, Paint, PaintStyle, RenderCommand};
pub use row::{ActionListener, PasswordRow};
pub use style::Color;
pub use widget::Widget;
