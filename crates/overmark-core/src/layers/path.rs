//! Freeform path layer.

use super::{LayerId, default_visible};
use crate::geometry::point_to_polyline_distance;
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freeform polyline, typically produced by the pen tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    pub(crate) id: LayerId,
    pub points: Vec<Point>,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Path {
    /// Create a path from a point sequence.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        let mut iter = self.points.iter();
        let Some(first) = iter.next() else {
            return Rect::ZERO;
        };
        let mut rect = Rect::from_origin_size(*first, (0.0, 0.0));
        for p in iter {
            rect = rect.union_pt(*p);
        }
        rect
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.points.len() < 2 {
            return false;
        }
        let dist = point_to_polyline_distance(point, &self.points);
        dist <= tolerance + self.style.stroke_width / 2.0
    }

    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }
}
