//! Layer definitions for the annotation document.

mod arrow;
mod circle;
mod dimension;
mod ellipse;
mod group;
mod image;
mod line;
mod marker;
mod path;
mod polygon;
mod rectangle;
mod region;
mod star;
mod text;

pub use arrow::Arrow;
pub use circle::Circle;
pub use dimension::Dimension;
pub use ellipse::Ellipse;
pub use group::Group;
pub use image::Image;
pub use line::Line;
pub use marker::Marker;
pub use path::Path;
pub use polygon::Polygon;
pub use rectangle::Rectangle;
pub use region::{Blur, DEFAULT_HIGHLIGHT_HEIGHT, Highlight};
pub use star::{DEFAULT_INNER_RADIUS_RATIO, Star};
pub use text::{Text, TextBox};

use crate::style::LayerStyle;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for layers.
pub type LayerId = Uuid;

/// Default hit tolerance for stroke-like layers (lines, arrows, paths,
/// dimensions, marker leaders), in pixels.
pub const DEFAULT_STROKE_TOLERANCE: f64 = 6.0;

pub(crate) fn default_visible() -> bool {
    true
}

/// One drawable annotation object.
///
/// A closed sum type: every geometry query is an exhaustive match, so
/// adding a layer kind forces every site to handle it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Layer {
    Rectangle(Rectangle),
    Circle(Circle),
    Ellipse(Ellipse),
    Line(Line),
    Arrow(Arrow),
    Polygon(Polygon),
    Star(Star),
    Path(Path),
    Marker(Marker),
    Dimension(Dimension),
    Text(Text),
    TextBox(TextBox),
    Blur(Blur),
    Highlight(Highlight),
    Image(Image),
    Group(Group),
}

impl Layer {
    pub fn id(&self) -> LayerId {
        match self {
            Layer::Rectangle(l) => l.id,
            Layer::Circle(l) => l.id,
            Layer::Ellipse(l) => l.id,
            Layer::Line(l) => l.id,
            Layer::Arrow(l) => l.id,
            Layer::Polygon(l) => l.id,
            Layer::Star(l) => l.id,
            Layer::Path(l) => l.id,
            Layer::Marker(l) => l.id,
            Layer::Dimension(l) => l.id,
            Layer::Text(l) => l.id,
            Layer::TextBox(l) => l.id,
            Layer::Blur(l) => l.id,
            Layer::Highlight(l) => l.id,
            Layer::Image(l) => l.id,
            Layer::Group(l) => l.id,
        }
    }

    /// Short kind name for diagnostics and layer-list labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Rectangle(_) => "rectangle",
            Layer::Circle(_) => "circle",
            Layer::Ellipse(_) => "ellipse",
            Layer::Line(_) => "line",
            Layer::Arrow(_) => "arrow",
            Layer::Polygon(_) => "polygon",
            Layer::Star(_) => "star",
            Layer::Path(_) => "path",
            Layer::Marker(_) => "marker",
            Layer::Dimension(_) => "dimension",
            Layer::Text(_) => "text",
            Layer::TextBox(_) => "textbox",
            Layer::Blur(_) => "blur",
            Layer::Highlight(_) => "highlight",
            Layer::Image(_) => "image",
            Layer::Group(_) => "group",
        }
    }

    /// Axis-aligned bounding box in document coordinates.
    ///
    /// Group bounds are the union of member bounds, which only the
    /// document can resolve; the bare variant reports an empty rect and
    /// [`crate::document::LayerDocument::layer_bounds`] does the union.
    pub fn bounds(&self) -> Rect {
        match self {
            Layer::Rectangle(l) => l.bounds(),
            Layer::Circle(l) => l.bounds(),
            Layer::Ellipse(l) => l.bounds(),
            Layer::Line(l) => l.bounds(),
            Layer::Arrow(l) => l.bounds(),
            Layer::Polygon(l) => l.bounds(),
            Layer::Star(l) => l.bounds(),
            Layer::Path(l) => l.bounds(),
            Layer::Marker(l) => l.bounds(),
            Layer::Dimension(l) => l.bounds(),
            Layer::Text(l) => l.bounds(),
            Layer::TextBox(l) => l.bounds(),
            Layer::Blur(l) => l.bounds(),
            Layer::Highlight(l) => l.bounds(),
            Layer::Image(l) => l.bounds(),
            Layer::Group(_) => Rect::ZERO,
        }
    }

    /// Check if a point (in document coordinates) hits this layer.
    ///
    /// Group members are hit individually through the document scan, so
    /// the group variant itself never reports a hit.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Layer::Rectangle(l) => l.hit_test(point, tolerance),
            Layer::Circle(l) => l.hit_test(point, tolerance),
            Layer::Ellipse(l) => l.hit_test(point, tolerance),
            Layer::Line(l) => l.hit_test(point, tolerance),
            Layer::Arrow(l) => l.hit_test(point, tolerance),
            Layer::Polygon(l) => l.hit_test(point, tolerance),
            Layer::Star(l) => l.hit_test(point, tolerance),
            Layer::Path(l) => l.hit_test(point, tolerance),
            Layer::Marker(l) => l.hit_test(point, tolerance),
            Layer::Dimension(l) => l.hit_test(point, tolerance),
            Layer::Text(l) => l.hit_test(point, tolerance),
            Layer::TextBox(l) => l.hit_test(point, tolerance),
            Layer::Blur(l) => l.hit_test(point, tolerance),
            Layer::Highlight(l) => l.hit_test(point, tolerance),
            Layer::Image(l) => l.hit_test(point, tolerance),
            Layer::Group(_) => false,
        }
    }

    /// Default hit tolerance for this layer kind: stroke-like layers get
    /// a reach of [`DEFAULT_STROKE_TOLERANCE`], area layers need none.
    pub fn default_tolerance(&self) -> f64 {
        match self {
            Layer::Line(_)
            | Layer::Arrow(_)
            | Layer::Path(_)
            | Layer::Dimension(_)
            | Layer::Marker(_) => DEFAULT_STROKE_TOLERANCE,
            _ => 0.0,
        }
    }

    /// Move the layer's positional fields by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Layer::Rectangle(l) => l.translate(delta),
            Layer::Circle(l) => l.translate(delta),
            Layer::Ellipse(l) => l.translate(delta),
            Layer::Line(l) => l.translate(delta),
            Layer::Arrow(l) => l.translate(delta),
            Layer::Polygon(l) => l.translate(delta),
            Layer::Star(l) => l.translate(delta),
            Layer::Path(l) => l.translate(delta),
            Layer::Marker(l) => l.translate(delta),
            Layer::Dimension(l) => l.translate(delta),
            Layer::Text(l) => l.translate(delta),
            Layer::TextBox(l) => l.translate(delta),
            Layer::Blur(l) => l.translate(delta),
            Layer::Highlight(l) => l.translate(delta),
            Layer::Image(l) => l.translate(delta),
            Layer::Group(_) => {}
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Layer::Rectangle(l) => l.visible,
            Layer::Circle(l) => l.visible,
            Layer::Ellipse(l) => l.visible,
            Layer::Line(l) => l.visible,
            Layer::Arrow(l) => l.visible,
            Layer::Polygon(l) => l.visible,
            Layer::Star(l) => l.visible,
            Layer::Path(l) => l.visible,
            Layer::Marker(l) => l.visible,
            Layer::Dimension(l) => l.visible,
            Layer::Text(l) => l.visible,
            Layer::TextBox(l) => l.visible,
            Layer::Blur(l) => l.visible,
            Layer::Highlight(l) => l.visible,
            Layer::Image(l) => l.visible,
            Layer::Group(l) => l.visible,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        match self {
            Layer::Rectangle(l) => l.visible = visible,
            Layer::Circle(l) => l.visible = visible,
            Layer::Ellipse(l) => l.visible = visible,
            Layer::Line(l) => l.visible = visible,
            Layer::Arrow(l) => l.visible = visible,
            Layer::Polygon(l) => l.visible = visible,
            Layer::Star(l) => l.visible = visible,
            Layer::Path(l) => l.visible = visible,
            Layer::Marker(l) => l.visible = visible,
            Layer::Dimension(l) => l.visible = visible,
            Layer::Text(l) => l.visible = visible,
            Layer::TextBox(l) => l.visible = visible,
            Layer::Blur(l) => l.visible = visible,
            Layer::Highlight(l) => l.visible = visible,
            Layer::Image(l) => l.visible = visible,
            Layer::Group(l) => l.visible = visible,
        }
    }

    pub fn is_locked(&self) -> bool {
        match self {
            Layer::Rectangle(l) => l.locked,
            Layer::Circle(l) => l.locked,
            Layer::Ellipse(l) => l.locked,
            Layer::Line(l) => l.locked,
            Layer::Arrow(l) => l.locked,
            Layer::Polygon(l) => l.locked,
            Layer::Star(l) => l.locked,
            Layer::Path(l) => l.locked,
            Layer::Marker(l) => l.locked,
            Layer::Dimension(l) => l.locked,
            Layer::Text(l) => l.locked,
            Layer::TextBox(l) => l.locked,
            Layer::Blur(l) => l.locked,
            Layer::Highlight(l) => l.locked,
            Layer::Image(l) => l.locked,
            Layer::Group(l) => l.locked,
        }
    }

    pub fn set_locked(&mut self, locked: bool) {
        match self {
            Layer::Rectangle(l) => l.locked = locked,
            Layer::Circle(l) => l.locked = locked,
            Layer::Ellipse(l) => l.locked = locked,
            Layer::Line(l) => l.locked = locked,
            Layer::Arrow(l) => l.locked = locked,
            Layer::Polygon(l) => l.locked = locked,
            Layer::Star(l) => l.locked = locked,
            Layer::Path(l) => l.locked = locked,
            Layer::Marker(l) => l.locked = locked,
            Layer::Dimension(l) => l.locked = locked,
            Layer::Text(l) => l.locked = locked,
            Layer::TextBox(l) => l.locked = locked,
            Layer::Blur(l) => l.locked = locked,
            Layer::Highlight(l) => l.locked = locked,
            Layer::Image(l) => l.locked = locked,
            Layer::Group(l) => l.locked = locked,
        }
    }

    /// Visible and unlocked: the precondition for hit testing, selection,
    /// and dragging.
    pub fn is_interactive(&self) -> bool {
        self.is_visible() && !self.is_locked()
    }

    /// The layer's style, for kinds that carry one (groups, blur regions,
    /// and images style themselves differently).
    pub fn style(&self) -> Option<&LayerStyle> {
        match self {
            Layer::Rectangle(l) => Some(&l.style),
            Layer::Circle(l) => Some(&l.style),
            Layer::Ellipse(l) => Some(&l.style),
            Layer::Line(l) => Some(&l.style),
            Layer::Arrow(l) => Some(&l.style),
            Layer::Polygon(l) => Some(&l.style),
            Layer::Star(l) => Some(&l.style),
            Layer::Path(l) => Some(&l.style),
            Layer::Marker(l) => Some(&l.style),
            Layer::Dimension(l) => Some(&l.style),
            Layer::Text(l) => Some(&l.style),
            Layer::TextBox(l) => Some(&l.style),
            Layer::Highlight(l) => Some(&l.style),
            Layer::Blur(_) | Layer::Image(_) | Layer::Group(_) => None,
        }
    }

    pub fn style_mut(&mut self) -> Option<&mut LayerStyle> {
        match self {
            Layer::Rectangle(l) => Some(&mut l.style),
            Layer::Circle(l) => Some(&mut l.style),
            Layer::Ellipse(l) => Some(&mut l.style),
            Layer::Line(l) => Some(&mut l.style),
            Layer::Arrow(l) => Some(&mut l.style),
            Layer::Polygon(l) => Some(&mut l.style),
            Layer::Star(l) => Some(&mut l.style),
            Layer::Path(l) => Some(&mut l.style),
            Layer::Marker(l) => Some(&mut l.style),
            Layer::Dimension(l) => Some(&mut l.style),
            Layer::Text(l) => Some(&mut l.style),
            Layer::TextBox(l) => Some(&mut l.style),
            Layer::Highlight(l) => Some(&mut l.style),
            Layer::Blur(_) | Layer::Image(_) | Layer::Group(_) => None,
        }
    }

    /// Rotation angle in degrees (0 for kinds that don't rotate).
    pub fn rotation(&self) -> f64 {
        match self {
            Layer::Rectangle(l) => l.rotation,
            Layer::Ellipse(l) => l.rotation,
            Layer::Polygon(l) => l.rotation,
            Layer::Star(l) => l.rotation,
            Layer::TextBox(l) => l.rotation,
            Layer::Image(l) => l.rotation,
            _ => 0.0,
        }
    }

    /// Set the rotation angle in degrees (no-op for kinds that don't rotate).
    pub fn set_rotation(&mut self, degrees: f64) {
        match self {
            Layer::Rectangle(l) => l.rotation = degrees,
            Layer::Ellipse(l) => l.rotation = degrees,
            Layer::Polygon(l) => l.rotation = degrees,
            Layer::Star(l) => l.rotation = degrees,
            Layer::TextBox(l) => l.rotation = degrees,
            Layer::Image(l) => l.rotation = degrees,
            _ => {}
        }
    }

    pub fn supports_rotation(&self) -> bool {
        matches!(
            self,
            Layer::Rectangle(_)
                | Layer::Ellipse(_)
                | Layer::Polygon(_)
                | Layer::Star(_)
                | Layer::TextBox(_)
                | Layer::Image(_)
        )
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Layer::Group(_))
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Layer::Group(g) => Some(g),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Layer::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Give the layer a fresh unique id (used by duplicate/paste).
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Layer::Rectangle(l) => l.id = new_id,
            Layer::Circle(l) => l.id = new_id,
            Layer::Ellipse(l) => l.id = new_id,
            Layer::Line(l) => l.id = new_id,
            Layer::Arrow(l) => l.id = new_id,
            Layer::Polygon(l) => l.id = new_id,
            Layer::Star(l) => l.id = new_id,
            Layer::Path(l) => l.id = new_id,
            Layer::Marker(l) => l.id = new_id,
            Layer::Dimension(l) => l.id = new_id,
            Layer::Text(l) => l.id = new_id,
            Layer::TextBox(l) => l.id = new_id,
            Layer::Blur(l) => l.id = new_id,
            Layer::Highlight(l) => l.id = new_id,
            Layer::Image(l) => l.id = new_id,
            Layer::Group(l) => l.id = new_id,
        }
    }
}
