//! Arrow layer.

use super::{LayerId, default_visible};
use crate::geometry::{point_to_segment_distance, quadratic_bezier_distance, rect_from_corners};
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An arrow from `start` to `end` (the arrowhead sits at `end`).
///
/// Like [`super::Line`], an arrow carries an optional quadratic Bézier
/// control point and is curved iff that point leaves the segment
/// midpoint. Hit testing follows the shaft path only; the head is
/// rendering decoration within stroke reach of the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: LayerId,
    pub start: Point,
    pub end: Point,
    /// Quadratic Bézier control point (None = straight shaft).
    #[serde(default)]
    pub control: Option<Point>,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Arrow {
    /// Create a new straight arrow.
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

    /// Create a curved arrow with an explicit control point.
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

    /// Whether the control point actually bends the shaft.
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
            if let Some(c) = self.control {
                rect = rect.union_pt(c);
            }
        }
        rect
    }

    /// Distance from a point to the arrow's shaft path.
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
