//! Rectangle layer.

use super::{LayerId, default_visible};
use crate::geometry::{is_point_in_rect, rect_from_corners, unrotate_point};
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle, optionally rotated around its center.
///
/// Width and height may be negative (a rectangle dragged up-left); all
/// geometry queries normalize to the absolute span first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: LayerId,
    /// Anchor corner position (top-left when width/height are positive).
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation angle in degrees, clockwise, around the center.
    #[serde(default)]
    pub rotation: f64,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            width,
            height,
            rotation: 0.0,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let rect = rect_from_corners(p1, p2);
        Self::new(rect.origin(), rect.width(), rect.height())
    }

    /// The normalized (positive-span) axis-aligned rectangle.
    pub fn as_rect(&self) -> Rect {
        rect_from_corners(
            self.origin,
            Point::new(self.origin.x + self.width, self.origin.y + self.height),
        )
    }

    pub fn bounds(&self) -> Rect {
        self.as_rect()
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rect = self.as_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return false;
        }
        let local = unrotate_point(point, rect.center(), self.rotation);
        is_point_in_rect(local, rect.inflate(tolerance, tolerance))
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }
}
