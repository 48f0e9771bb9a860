//! Marker (numbered callout) layer.

use super::{LayerId, default_visible};
use crate::geometry::point_to_segment_distance;
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A numbered callout badge: a filled disc with a label, optionally
/// pointing at something through a leader arrow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub(crate) id: LayerId,
    pub center: Point,
    pub radius: f64,
    /// Badge text, usually a sequence number.
    pub label: String,
    /// Optional leader-arrow endpoint.
    #[serde(default)]
    pub arrow_to: Option<Point>,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Marker {
    /// Create a new marker badge.
    pub fn new(center: Point, radius: f64, label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            label: label.into(),
            arrow_to: None,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        let mut rect = Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        );
        if let Some(tip) = self.arrow_to {
            rect = rect.union_pt(tip);
        }
        rect
    }

    /// Hit on the badge disc, or on the leader arrow when present.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.radius > 0.0 {
            let reach = self.radius + tolerance;
            let dx = point.x - self.center.x;
            let dy = point.y - self.center.y;
            if dx * dx + dy * dy <= reach * reach {
                return true;
            }
        }
        if let Some(tip) = self.arrow_to {
            return point_to_segment_distance(point, self.center, tip)
                <= tolerance + self.style.stroke_width / 2.0;
        }
        false
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
        if let Some(tip) = self.arrow_to.as_mut() {
            *tip += delta;
        }
    }
}
