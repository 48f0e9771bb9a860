//! Dimension (measurement line) layer.

use super::{LayerId, default_visible};
use crate::geometry::{point_to_segment_distance, rect_from_corners};
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dimension line between two measurement points, rendered with end
/// ticks and a length label by the front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    pub(crate) id: LayerId,
    pub start: Point,
    pub end: Point,
    /// Label override; None means the front end formats the measured length.
    #[serde(default)]
    pub label: Option<String>,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Dimension {
    /// Create a new dimension line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            label: None,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    /// Measured length.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn bounds(&self) -> Rect {
        rect_from_corners(self.start, self.end)
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_distance(point, self.start, self.end)
            <= tolerance + self.style.stroke_width / 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_on_segment() {
        let dim = Dimension::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(dim.hit_test(Point::new(50.0, 5.0), 6.0));
        assert!(!dim.hit_test(Point::new(50.0, 20.0), 6.0));
    }

    #[test]
    fn test_length() {
        let dim = Dimension::new(Point::new(0.0, 0.0), Point::new(30.0, 40.0));
        assert!((dim.length() - 50.0).abs() < 1e-9);
    }
}
