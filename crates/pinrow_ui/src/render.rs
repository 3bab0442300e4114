//! Rendering seam.
//!
//! The row never talks to a graphics API. It draws circles through the
//! [`Canvas`] trait; [`CommandRecorder`] is the stock implementation that
//! records a frame as [`RenderCommand`]s and can flatten it into
//! [`CircleInstance`]s for instanced GPU submission.

use crate::style::Color;

/// How a circle is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintStyle {
    /// Interior only.
    Fill,
    /// Ring of `stroke_width`, centered on the radius.
    Stroke,
    /// Interior plus ring.
    FillAndStroke,
}

/// Paint used for one draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Paint color.
    pub color: Color,
    /// Fill/stroke mode.
    pub style: PaintStyle,
    /// Stroke width, ignored for [`PaintStyle::Fill`].
    pub stroke_width: f32,
}

impl Paint {
    /// Solid fill.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
        }
    }

    /// Ring of the given width.
    #[must_use]
    pub const fn stroke(color: Color, stroke_width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke,
            stroke_width,
        }
    }

    /// Fill plus ring of the given width.
    #[must_use]
    pub const fn fill_and_stroke(color: Color, stroke_width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::FillAndStroke,
            stroke_width,
        }
    }
}

/// Drawing surface supplied by the host.
pub trait Canvas {
    /// Draws a circle centered at `(cx, cy)`.
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Circle.
    Circle {
        /// Center x.
        cx: f32,
        /// Center y.
        cy: f32,
        /// Radius.
        radius: f32,
        /// Paint.
        paint: Paint,
    },
}

/// Canvas that records commands for later submission.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<RenderCommand>,
}

impl CommandRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
        }
    }

    /// Begins a new frame, dropping the previous one.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Commands recorded so far.
    #[must_use]
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Ends the frame and hands over the recorded commands.
    pub fn end_frame(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Returns the recorded command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Flattens the frame into GPU instance data, skipping zero-radius circles.
    #[must_use]
    pub fn instances(&self) -> Vec<CircleInstance> {
        self.commands
            .iter()
            .filter_map(|command| match *command {
                RenderCommand::Circle { cx, cy, radius, paint } if radius > 0.0 => {
                    Some(CircleInstance::new(cx, cy, radius, &paint))
                }
                RenderCommand::Circle { .. } => None,
            })
            .collect()
    }
}

impl Canvas for CommandRecorder {
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        self.commands.push(RenderCommand::Circle {
            cx,
            cy,
            radius,
            paint: *paint,
        });
    }
}

/// One circle for instanced rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CircleInstance {
    /// Center (x, y).
    pub center: [f32; 2],
    /// Radius.
    pub radius: f32,
    /// Stroke width (0 for plain fills).
    pub stroke_width: f32,
    /// Color (RGBA, 0-1).
    pub color: [f32; 4],
    /// 0 = fill, 1 = stroke, 2 = fill and stroke.
    pub style: u32,
}

impl CircleInstance {
    /// Builds an instance from a draw call.
    #[must_use]
    pub fn new(cx: f32, cy: f32, radius: f32, paint: &Paint) -> Self {
        let (style, stroke_width) = match paint.style {
            PaintStyle::Fill => (0, 0.0),
            PaintStyle::Stroke => (1, paint.stroke_width),
            PaintStyle::FillAndStroke => (2, paint.stroke_width),
        };
        Self {
            center: [cx, cy],
            radius,
            stroke_width,
            color: paint.color.to_rgba_f32(),
            style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_frame() {
        let mut recorder = CommandRecorder::new();

        recorder.begin_frame();
        recorder.draw_circle(10.0, 10.0, 5.0, &Paint::fill(Color::WHITE));
        recorder.draw_circle(10.0, 10.0, 0.0, &Paint::stroke(Color::GRAY, 4.0));
        assert_eq!(recorder.command_count(), 2);

        let commands = recorder.end_frame();
        assert_eq!(commands.len(), 2);
        assert_eq!(recorder.command_count(), 0);
    }

    #[test]
    fn test_instances_skip_degenerate_circles() {
        let mut recorder = CommandRecorder::new();
        recorder.draw_circle(1.0, 2.0, 3.0, &Paint::stroke(Color::RED, 4.0));
        recorder.draw_circle(1.0, 2.0, 0.0, &Paint::fill(Color::WHITE));

        let instances = recorder.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].center, [1.0, 2.0]);
        assert_eq!(instances[0].style, 1);
        assert_eq!(instances[0].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_instance_is_plain_bytes() {
        let instance = CircleInstance::new(0.0, 0.0, 1.0, &Paint::fill(Color::BLACK));
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), std::mem::size_of::<CircleInstance>());
        assert_eq!(bytes.len(), 36);
    }
}
