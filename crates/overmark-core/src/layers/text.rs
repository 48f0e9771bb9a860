//! Text layers: free-floating labels and fixed text boxes.

use super::{LayerId, default_visible};
use crate::geometry::{is_point_in_rect, rect_from_corners, unrotate_point};
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

fn default_font_size() -> f64 {
    16.0
}

/// A free-floating text label anchored at its top-left corner.
///
/// The engine has no text shaper, so hit testing uses a conservative
/// per-character estimate. A front end with real measured bounds can
/// pre-empt this through the editor's bounds provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub(crate) id: LayerId,
    pub anchor: Point,
    pub content: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Text {
    /// Create a new text label.
    pub fn new(anchor: Point, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            anchor,
            content: content.into(),
            font_size: default_font_size(),
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    /// Estimated bounds from character count and font size.
    pub fn bounds(&self) -> Rect {
        let chars = self.content.chars().count().max(1) as f64;
        let width = (chars * self.font_size * 0.6).max(20.0);
        let height = self.font_size * 1.4;
        Rect::new(
            self.anchor.x,
            self.anchor.y,
            self.anchor.x + width,
            self.anchor.y + height,
        )
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        is_point_in_rect(point, self.bounds().inflate(tolerance, tolerance))
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.anchor += delta;
    }
}

/// A text box with fixed dimensions, optionally rotated around its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    pub(crate) id: LayerId,
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    pub content: String,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Rotation angle in degrees, clockwise, around the center.
    #[serde(default)]
    pub rotation: f64,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl TextBox {
    /// Create a new text box.
    pub fn new(origin: Point, width: f64, height: f64, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            width,
            height,
            content: content.into(),
            font_size: default_font_size(),
            rotation: 0.0,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    /// The normalized (positive-span) box rectangle.
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
