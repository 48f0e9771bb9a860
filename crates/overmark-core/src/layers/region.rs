//! Rectangular effect regions: blur and highlight.

use super::{LayerId, default_visible};
use crate::geometry::is_point_in_rect;
use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default highlight band height when none is stored.
pub const DEFAULT_HIGHLIGHT_HEIGHT: f64 = 20.0;

/// A rectangular region that pixelates the image underneath it.
/// Always axis-aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blur {
    pub(crate) id: LayerId,
    pub origin: Point,
    pub width: f64,
    pub height: f64,
    /// Blur strength passed through to the renderer.
    #[serde(default = "default_blur_radius")]
    pub blur_radius: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

fn default_blur_radius() -> f64 {
    8.0
}

impl Blur {
    /// Create a new blur region.
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            width,
            height,
            blur_radius: default_blur_radius(),
            visible: true,
            locked: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.height,
        )
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        is_point_in_rect(point, self.bounds().inflate(tolerance, tolerance))
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }
}

/// A translucent highlighter band. Height is optional; a missing height
/// falls back to [`DEFAULT_HIGHLIGHT_HEIGHT`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    pub(crate) id: LayerId,
    pub origin: Point,
    pub width: f64,
    #[serde(default)]
    pub height: Option<f64>,
    pub style: LayerStyle,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Highlight {
    /// Create a new highlight band with the default height.
    pub fn new(origin: Point, width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            width,
            height: None,
            style: LayerStyle::default(),
            visible: true,
            locked: false,
        }
    }

    /// Stored height or the documented default.
    pub fn effective_height(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_HIGHLIGHT_HEIGHT)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + self.width,
            self.origin.y + self.effective_height(),
        )
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.width <= 0.0 || self.effective_height() <= 0.0 {
            return false;
        }
        is_point_in_rect(point, self.bounds().inflate(tolerance, tolerance))
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
    }
}
