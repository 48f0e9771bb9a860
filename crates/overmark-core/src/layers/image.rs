//! Embedded image layer.

use super::{LayerId, default_visible};
use crate::geometry::{is_point_in_rect, rect_from_corners, unrotate_point};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raster image placed over the background, optionally rotated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub(crate) id: LayerId,
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation angle in degrees, clockwise, around the center.
    #[serde(default)]
    pub rotation: f64,
    /// Source reference (file name or URL) resolved by the host.
    pub source: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Image {
    /// Create a new image layer.
    pub fn new(origin: Point, width: f64, height: f64, source: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            width,
            height,
            rotation: 0.0,
            source: source.into(),
            visible: true,
            locked: false,
        }
    }

    /// The normalized (positive-span) placement rectangle.
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
