//! Ellipse layer.

use super::{LayerId, default_visible};
use crate::geometry::unrotate_point;
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An ellipse with independent radii, optionally rotated around its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    pub(crate) id: LayerId,
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation angle in degrees, clockwise, around the center.
    #[serde(default)]
    pub rotation: f64,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Ellipse {
    /// Create a new ellipse.
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius_x,
            radius_y,
            rotation: 0.0,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    /// Create an ellipse from a bounding rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.center(), rect.width() / 2.0, rect.height() / 2.0)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return false;
        }
        // Map into the unrotated frame, then normalize by the radii.
        let local = unrotate_point(point, self.center, self.rotation);
        let nx = (local.x - self.center.x) / (self.radius_x + tolerance);
        let ny = (local.y - self.center.y) / (self.radius_y + tolerance);
        nx * nx + ny * ny <= 1.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}
