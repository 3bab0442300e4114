//! Widget trait shared by the indicator and the row.

use crate::render::Canvas;

/// Base trait for frame-driven widgets.
pub trait Widget {
    /// Advances every running animation by `dt_ms` milliseconds.
    ///
    /// Called once per frame by the host, even when nothing is animating.
    fn update(&mut self, dt_ms: f32);

    /// Draws the widget with its top-left corner at `origin`.
    fn render(&self, origin: (f32, f32), canvas: &mut dyn Canvas);

    /// Returns the preferred size of this widget.
    fn preferred_size(&self) -> (f32, f32);

    /// Returns true if the widget changed since the last call, clearing the
    /// flag. Hosts use it to skip redrawing static frames.
    fn take_redraw(&mut self) -> bool;
}
