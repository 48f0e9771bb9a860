//! Star layer.

use super::{LayerId, default_visible};
use crate::geometry::is_point_in_polygon;
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use uuid::Uuid;

/// Inner radius as a fraction of the outer radius when not specified.
pub const DEFAULT_INNER_RADIUS_RATIO: f64 = 0.4;

/// A star polygon: alternating outer and inner vertices around a center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub(crate) id: LayerId,
    pub center: Point,
    /// Outer circumradius (center to spike tip).
    pub outer_radius: f64,
    /// Inner radius (center to notch). Defaults to 0.4 x outer.
    #[serde(default)]
    pub inner_radius: Option<f64>,
    /// Number of spikes. Accepts the legacy `points` field name.
    #[serde(alias = "points")]
    pub star_points: u32,
    /// Rotation angle in degrees, clockwise, around the center.
    #[serde(default)]
    pub rotation: f64,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Star {
    /// Create a new star.
    pub fn new(center: Point, outer_radius: f64, star_points: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            outer_radius,
            inner_radius: None,
            star_points,
            rotation: 0.0,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    /// Effective inner radius, applying the 0.4 x outer default.
    pub fn effective_inner_radius(&self) -> f64 {
        self.inner_radius
            .unwrap_or(self.outer_radius * DEFAULT_INNER_RADIUS_RATIO)
    }

    /// Compute the alternating outer/inner vertex list, honoring rotation.
    /// The first spike points up (12 o'clock) for rotation 0.
    pub fn vertices(&self) -> Vec<Point> {
        let inner = self.effective_inner_radius();
        let base = self.rotation.to_radians() - FRAC_PI_2;
        let step = PI / self.star_points as f64;
        (0..self.star_points * 2)
            .map(|i| {
                let radius = if i % 2 == 0 { self.outer_radius } else { inner };
                let angle = base + i as f64 * step;
                Point::new(
                    self.center.x + radius * angle.cos(),
                    self.center.y + radius * angle.sin(),
                )
            })
            .collect()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.outer_radius,
            self.center.y - self.outer_radius,
            self.center.x + self.outer_radius,
            self.center.y + self.outer_radius,
        )
    }

    pub fn hit_test(&self, point: Point, _tolerance: f64) -> bool {
        if self.outer_radius <= 0.0 || self.star_points < 2 {
            return false;
        }
        is_point_in_polygon(point, &self.vertices())
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}
