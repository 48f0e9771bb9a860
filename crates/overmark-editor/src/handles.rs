//! Selection handles and their hit testing.

use kurbo::{Point, Rect};
use overmark_core::Layer;
use overmark_core::geometry::rotate_point;
use serde::{Deserialize, Serialize};

/// Visual handle square size in pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Extra hit margin around each handle's visual rectangle, in pixels.
pub const HANDLE_HIT_MARGIN: f64 = 4.0;
/// Distance from the shape's top edge to the rotation handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner resize handle.
    Corner(Corner),
    /// Edge midpoint resize handle.
    Edge(Edge),
    /// Rotation handle (positioned above the shape).
    Rotate,
    /// Endpoint handle for line-like layers (0 = start, 1 = end).
    Endpoint(usize),
    /// Bézier control-point handle for curved lines/arrows.
    Control,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    /// Position in document coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check a point against the handle's visual square plus the fixed
    /// hit margin.
    pub fn hit_test(&self, point: Point) -> bool {
        let half = HANDLE_SIZE / 2.0 + HANDLE_HIT_MARGIN;
        (point.x - self.position.x).abs() <= half && (point.y - self.position.y).abs() <= half
    }
}

/// Handles for a single selected layer.
///
/// Line-like layers expose endpoint (and control) handles; everything
/// else gets resize corners and edges on its bounds, plus a rotation
/// handle for kinds that rotate. Rotated layers have their handles
/// rotated into place around the bounds center.
pub fn handles_for_layer(layer: &Layer, bounds: Rect) -> Vec<Handle> {
    match layer {
        Layer::Line(line) => line_handles(line.start, line.end, line.control),
        Layer::Arrow(arrow) => line_handles(arrow.start, arrow.end, arrow.control),
        Layer::Dimension(dim) => vec![
            Handle::new(dim.start, HandleKind::Endpoint(0)),
            Handle::new(dim.end, HandleKind::Endpoint(1)),
        ],
        Layer::Group(_) => corner_handles(bounds),
        _ => {
            let mut handles = box_handles(bounds, layer.rotation());
            if layer.supports_rotation() {
                handles.push(rotate_handle(bounds, layer.rotation()));
            }
            handles
        }
    }
}

/// Handles for a multi-layer selection: plain corners on the union bounds.
pub fn handles_for_bounds(bounds: Rect) -> Vec<Handle> {
    corner_handles(bounds)
}

/// Find the first handle hit at a point.
pub fn hit_test_handles(handles: &[Handle], point: Point) -> Option<HandleKind> {
    handles.iter().find(|h| h.hit_test(point)).map(|h| h.kind)
}

fn line_handles(start: Point, end: Point, control: Option<Point>) -> Vec<Handle> {
    let mid = Point::new((start.x + end.x) / 2.0, (start.y + end.y) / 2.0);
    vec![
        Handle::new(start, HandleKind::Endpoint(0)),
        Handle::new(end, HandleKind::Endpoint(1)),
        Handle::new(control.unwrap_or(mid), HandleKind::Control),
    ]
}

fn corner_handles(bounds: Rect) -> Vec<Handle> {
    vec![
        Handle::new(Point::new(bounds.x0, bounds.y0), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y0), HandleKind::Corner(Corner::TopRight)),
        Handle::new(Point::new(bounds.x0, bounds.y1), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(Point::new(bounds.x1, bounds.y1), HandleKind::Corner(Corner::BottomRight)),
    ]
}

/// Corner and edge handles, rotated into place for rotated layers.
fn box_handles(bounds: Rect, rotation: f64) -> Vec<Handle> {
    let center = bounds.center();
    let place = |x: f64, y: f64| rotate_point(Point::new(x, y), center, rotation);
    vec![
        Handle::new(place(bounds.x0, bounds.y0), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(place(bounds.x1, bounds.y0), HandleKind::Corner(Corner::TopRight)),
        Handle::new(place(bounds.x0, bounds.y1), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(place(bounds.x1, bounds.y1), HandleKind::Corner(Corner::BottomRight)),
        Handle::new(place(center.x, bounds.y0), HandleKind::Edge(Edge::Top)),
        Handle::new(place(bounds.x1, center.y), HandleKind::Edge(Edge::Right)),
        Handle::new(place(center.x, bounds.y1), HandleKind::Edge(Edge::Bottom)),
        Handle::new(place(bounds.x0, center.y), HandleKind::Edge(Edge::Left)),
    ]
}

fn rotate_handle(bounds: Rect, rotation: f64) -> Handle {
    let center = bounds.center();
    let above = Point::new(center.x, bounds.y0 - ROTATE_HANDLE_OFFSET);
    Handle::new(rotate_point(above, center, rotation), HandleKind::Rotate)
}
