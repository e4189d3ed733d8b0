//! Chart frame: outer dimensions, margins and the derived plotting area.
//!
//! Every chart is handed a `ChartFrame` value instead of inheriting layout
//! state. On resize only the width changes; height is fixed per chart or
//! derived from content.

use serde::Serialize;

/// Default chart height in pixels.
pub const DEFAULT_HEIGHT: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Margin::new(40.0, 20.0, 60.0, 60.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl ChartFrame {
    pub fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            margin,
        }
    }

    /// Width of the plotting area, never negative.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Height of the plotting area, never negative.
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Take a new container width; height is left alone.
    pub fn resize(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.width = width;
        }
    }

    /// Content-driven plotting height: `rows * row_height`, at least `min`.
    pub fn content_height(rows: usize, row_height: f64, min: f64) -> f64 {
        (rows as f64 * row_height).max(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_dimensions_subtract_margins() {
        let frame = ChartFrame::new(800.0, 500.0, Margin::default());
        assert_eq!(frame.inner_width(), 720.0);
        assert_eq!(frame.inner_height(), 400.0);
    }

    #[test]
    fn tiny_frames_clamp_to_zero() {
        let frame = ChartFrame::new(50.0, 20.0, Margin::default());
        assert_eq!(frame.inner_width(), 0.0);
        assert_eq!(frame.inner_height(), 0.0);
    }

    #[test]
    fn resize_only_touches_width() {
        let mut frame = ChartFrame::new(800.0, 500.0, Margin::default());
        frame.resize(1024.0);
        assert_eq!((frame.width, frame.height), (1024.0, 500.0));
        frame.resize(0.0);
        frame.resize(f64::NAN);
        assert_eq!(frame.width, 1024.0);
    }

    #[test]
    fn content_height_has_floor() {
        assert_eq!(ChartFrame::content_height(3, 25.0, 400.0), 400.0);
        assert_eq!(ChartFrame::content_height(40, 25.0, 400.0), 1000.0);
    }
}
