//! Regular polygon layer.

use super::{LayerId, default_visible};
use crate::geometry::is_point_in_polygon;
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use uuid::Uuid;

/// A regular polygon defined by center, circumradius, and side count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    pub(crate) id: LayerId,
    pub center: Point,
    /// Circumradius (center to vertex).
    pub radius: f64,
    pub sides: u32,
    /// Rotation angle in degrees, clockwise, around the center.
    #[serde(default)]
    pub rotation: f64,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Polygon {
    /// Create a new regular polygon.
    pub fn new(center: Point, radius: f64, sides: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            sides,
            rotation: 0.0,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    /// Compute the vertex list, honoring rotation. The first vertex sits
    /// at the top (12 o'clock) for rotation 0.
    pub fn vertices(&self) -> Vec<Point> {
        let base = self.rotation.to_radians() - FRAC_PI_2;
        (0..self.sides)
            .map(|i| {
                let angle = base + i as f64 * TAU / self.sides as f64;
                Point::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                )
            })
            .collect()
    }

    pub fn bounds(&self) -> Rect {
        let verts = self.vertices();
        let mut iter = verts.iter();
        let Some(first) = iter.next() else {
            return Rect::from_origin_size(self.center, (0.0, 0.0));
        };
        let mut rect = Rect::from_origin_size(*first, (0.0, 0.0));
        for p in iter {
            rect = rect.union_pt(*p);
        }
        rect
    }

    pub fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        if self.radius <= 0.0 || self.sides < 3 {
            return false;
        }
        is_point_in_polygon(point, &self.vertices())
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagon_center_hit() {
        let hex = Polygon::new(Point::new(0.0, 0.0), 50.0, 6);
        assert!(hex.hit_test(Point::new(0.0, 0.0), 0.0));
        assert!(!hex.hit_test(Point::new(60.0, 0.0), 0.0));
    }

    #[test]
    fn test_triangle_rotation_changes_shape() {
        let mut tri = Polygon::new(Point::new(0.0, 0.0), 50.0, 3);
        // Apex points up at rotation 0, so below-center left edge is thin.
        assert!(tri.hit_test(Point::new(0.0, -40.0), 0.0));
        tri.rotation = 180.0;
        assert!(!tri.hit_test(Point::new(0.0, -40.0), 0.0));
    }

    #[test]
    fn test_degenerate_polygon_never_hits() {
        let flat = Polygon::new(Point::new(0.0, 0.0), 50.0, 2);
        assert!(!flat.hit_test(Point::new(0.0, 0.0), 0.0));
        let tiny = Polygon::new(Point::new(0.0, 0.0), 0.0, 5);
        assert!(!tiny.hit_test(Point::new(0.0, 0.0), 0.0));
    }
}
