//! Circle layer.

use super::{LayerId, default_visible};
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle defined by center and radius. Rotation-invariant by nature,
/// so no rotation field is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: LayerId,
    pub center: Point,
    pub radius: f64,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.radius <= 0.0 {
            return false;
        }
        let reach = self.radius + tolerance;
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        dx * dx + dy * dy <= reach * reach
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_and_edge_hit() {
        let circle = Circle::new(Point::new(50.0, 50.0), 10.0);
        assert!(circle.hit_test(Point::new(50.0, 50.0), 0.0));
        assert!(circle.hit_test(Point::new(60.0, 50.0), 0.0));
        assert!(!circle.hit_test(Point::new(61.0, 50.0), 0.0));
    }

    #[test]
    fn test_zero_radius_never_hits() {
        let circle = Circle::new(Point::new(50.0, 50.0), 0.0);
        assert!(!circle.hit_test(Point::new(50.0, 50.0), 0.0));
        let negative = Circle::new(Point::new(50.0, 50.0), -5.0);
        assert!(!negative.hit_test(Point::new(50.0, 50.0), 0.0));
    }
}
