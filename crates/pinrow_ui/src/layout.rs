//! Horizontal layout of the indicator row.
//!
//! Outer edges reserve half the shake width so an incorrect judgement never
//! clips; inner edges each take half the between-indicator spacing. Top and
//! bottom reserve room for the bounce.

use crate::config::RowConfig;
use crate::error::{RowError, RowResult};

/// A rectangle in row-local coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns a copy moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Spacing around one indicator.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Margins {
    /// Left margin.
    pub left: f32,
    /// Right margin.
    pub right: f32,
    /// Top margin.
    pub top: f32,
    /// Bottom margin.
    pub bottom: f32,
}

/// Computes the margins of indicator `index` in a row of `count`.
///
/// Returns `Ok(None)` for an empty row.
///
/// # Errors
///
/// [`RowError::InvalidCount`] when `count < 0`; [`RowError::InvalidIndex`]
/// when `index < 0` or `index >= count`.
pub fn calc_margin(index: i32, count: i32, config: &RowConfig) -> RowResult<Option<Margins>> {
    if count < 0 {
        return Err(RowError::InvalidCount(count));
    }
    if index < 0 {
        return Err(RowError::InvalidIndex { index, count });
    }
    if count == 0 {
        return Ok(None);
    }
    if index >= count {
        return Err(RowError::InvalidIndex { index, count });
    }

    let inner = config.between_margin / 2.0;
    let outer = config.incorrect_max_width / 2.0;
    let (left, right) = match (index, count) {
        (_, 1) => (outer, outer),
        (0, _) => (outer, inner),
        (i, n) if i == n - 1 => (inner, outer),
        _ => (inner, inner),
    };

    Ok(Some(Margins {
        left,
        right,
        top: config.correct_top,
        bottom: config.correct_bottom,
    }))
}

/// Places `count` indicators left to right.
///
/// # Errors
///
/// [`RowError::InvalidCount`] when `count` does not fit the margin
/// arithmetic.
pub fn layout_row(count: usize, config: &RowConfig) -> RowResult<Vec<Rect>> {
    let signed = i32::try_from(count).map_err(|_| RowError::InvalidCount(i32::MAX))?;
    let side = config.indicator_size();

    let mut rects = Vec::with_capacity(count);
    let mut cursor = 0.0;
    for index in 0..signed {
        let Some(margins) = calc_margin(index, signed, config)? else {
            break;
        };
        cursor += margins.left;
        rects.push(Rect::new(cursor, margins.top, side, side));
        cursor += side + margins.right;
    }
    Ok(rects)
}

/// Preferred size of a row of `count` indicators, margins included.
#[must_use]
pub fn row_size(count: usize, config: &RowConfig) -> (f32, f32) {
    if count == 0 {
        return (0.0, 0.0);
    }
    let side = config.indicator_size();
    #[allow(clippy::cast_precision_loss)]
    let n = count as f32;
    let width = n * side + (n - 1.0) * config.between_margin + config.incorrect_max_width;
    (width, side + config.correct_top + config.correct_bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margins(index: i32, count: i32) -> Margins {
        calc_margin(index, count, &RowConfig::default()).unwrap().unwrap()
    }

    #[test]
    fn test_empty_row_has_no_layout() {
        assert_eq!(calc_margin(0, 0, &RowConfig::default()), Ok(None));
    }

    #[test]
    fn test_single_indicator_is_symmetric() {
        let m = margins(0, 1);
        assert!((m.left - 20.0).abs() < f32::EPSILON);
        assert!((m.right - m.left).abs() < f32::EPSILON);
        assert!((m.top - 40.0).abs() < f32::EPSILON);
        assert!((m.bottom - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_two_indicators_share_the_inner_margin() {
        let first = margins(0, 2);
        let second = margins(1, 2);
        assert_eq!((first.left, first.right), (20.0, 36.0));
        assert_eq!((second.left, second.right), (36.0, 20.0));
    }

    #[test]
    fn test_middle_indicators_get_inner_margins() {
        for count in 3..8 {
            let mut outer_edges = 0;
            for index in 0..count {
                let m = margins(index, count);
                outer_edges += [m.left, m.right].iter().filter(|&&v| (v - 20.0).abs() < 1e-6).count();
                if index > 0 && index < count - 1 {
                    assert_eq!((m.left, m.right), (36.0, 36.0));
                }
            }
            assert_eq!(outer_edges, 2, "count {count}");
        }
    }

    #[test]
    fn test_invalid_arguments() {
        let config = RowConfig::default();
        assert_eq!(calc_margin(0, -1, &config), Err(RowError::InvalidCount(-1)));
        assert_eq!(
            calc_margin(-1, 3, &config),
            Err(RowError::InvalidIndex { index: -1, count: 3 })
        );
        assert_eq!(
            calc_margin(3, 3, &config),
            Err(RowError::InvalidIndex { index: 3, count: 3 })
        );
        assert_eq!(
            calc_margin(1, 1, &config),
            Err(RowError::InvalidIndex { index: 1, count: 1 })
        );
        // A negative index is rejected even for an empty row.
        assert!(calc_margin(-1, 0, &config).is_err());
    }

    #[test]
    fn test_layout_row_positions() {
        let config = RowConfig::default();
        let rects = layout_row(4, &config).unwrap();
        assert_eq!(rects.len(), 4);
        assert!((rects[0].x - 20.0).abs() < f32::EPSILON);
        assert!((rects[0].y - 40.0).abs() < f32::EPSILON);
        // 20 + 44 + 36 + 36
        assert!((rects[1].x - 136.0).abs() < f32::EPSILON);
        assert!((rects[3].right() + 20.0 - row_size(4, &config).0).abs() < 1e-3);
        assert!(layout_row(0, &config).unwrap().is_empty());
    }

    #[test]
    fn test_row_size() {
        let config = RowConfig::default();
        assert_eq!(row_size(0, &config), (0.0, 0.0));
        assert_eq!(row_size(1, &config), (84.0, 99.0));
    }
}
