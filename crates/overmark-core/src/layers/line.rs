//! Line layer.

use super::{LayerId, default_visible};
use crate::geometry::{point_to_segment_distance, quadratic_bezier_distance, rect_from_corners};
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A line segment, optionally bowed into a quadratic Bézier.
///
/// The line is curved iff the control point differs from the segment
/// midpoint; a control point at the midpoint degenerates to the
/// straight segment and is treated as such.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub(crate) id: LayerId,
    pub start: Point,
    pub end: Point,
    /// Quadratic Bézier control point (None = straight).
    #[serde(default)]
    pub control: Option<Point>,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Line {
    /// Create a new straight line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            control: None,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    /// Create a curved line with an explicit control point.
    pub fn curved(start: Point, end: Point, control: Point) -> Self {
        Self {
            control: Some(control),
            ..Self::new(start, end)
        }
    }

    /// Midpoint of the straight segment.
    pub fn midpoint(&self) -> Point {
        Point::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Whether the control point actually bends the line.
    pub fn is_curved(&self) -> bool {
        match self.control {
            Some(c) => c.distance(self.midpoint()) > 1e-6,
            None => false,
        }
    }

    /// Length of the straight segment.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn bounds(&self) -> Rect {
        let mut rect = rect_from_corners(self.start, self.end);
        if self.is_curved() {
            // The curve stays inside the hull of start/control/end.
            if let Some(c) = self.control {
                rect = rect.union_pt(c);
            }
        }
        rect
    }

    /// Distance from a point to the line's stroke path.
    pub fn distance_to(&self, point: Point) -> f64 {
        if self.is_curved() {
            let ctrl = self.control.unwrap_or_else(|| self.midpoint());
            quadratic_bezier_distance(point, self.start, ctrl, self.end)
        } else {
            point_to_segment_distance(point, self.start, self.end)
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.distance_to(point) <= tolerance + self.style.stroke_width / 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.start += delta;
        self.end += delta;
        if let Some(c) = self.control.as_mut() {
            *c += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_hit() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.hit_test(Point::new(50.0, 5.0), 6.0));
        assert!(!line.hit_test(Point::new(50.0, 20.0), 6.0));
    }

    #[test]
    fn test_control_at_midpoint_is_straight() {
        let line = Line::curved(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, 0.0),
        );
        assert!(!line.is_curved());
    }

    #[test]
    fn test_curved_hit_follows_curve() {
        let line = Line::curved(
            Point::new(100.0, 100.0),
            Point::new(300.0, 100.0),
            Point::new(200.0, 0.0),
        );
        assert!(line.is_curved());
        // The curve passes through (200, 50); the chord does not.
        assert!(line.hit_test(Point::new(200.0, 55.0), 6.0));
        assert!(!line.hit_test(Point::new(200.0, 100.0), 6.0));
    }

    #[test]
    fn test_bounds_include_control_hull() {
        let line = Line::curved(
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(50.0, 0.0),
        );
        assert!(line.bounds().y0 <= 50.0);
    }
}
