//! Built-in resize and rotation math.
//!
//! Operates on a pre-gesture snapshot of a layer plus the pointer
//! delta, never on the live layer, so repeated pointer-move events
//! can't accumulate rounding error.

use crate::handles::{Corner, Edge, HandleKind};
use kurbo::{Point, Rect, Vec2};
use overmark_core::Layer;

/// Minimum size a resize can shrink a layer to, in pixels.
const MIN_SIZE: f64 = 1.0;

/// Resize a layer from a handle by a pointer delta.
///
/// `base` is the pre-gesture snapshot. Returns the resized layer, or
/// None when the handle/kind combination is not resizable (groups,
/// rotate handle).
pub fn resize_layer(
    base: &Layer,
    handle: HandleKind,
    delta: Vec2,
    aspect_lock: bool,
) -> Option<Layer> {
    match handle {
        HandleKind::Endpoint(index) => move_endpoint(base, index, delta),
        HandleKind::Control => move_control(base, delta),
        HandleKind::Corner(corner) => {
            if base.is_group() {
                return None;
            }
            let old = base.bounds();
            let new = corner_resized(old, corner, delta, aspect_lock);
            Some(scale_into(base, old, new))
        }
        HandleKind::Edge(edge) => {
            if base.is_group() {
                return None;
            }
            let old = base.bounds();
            let new = edge_resized(old, edge, delta);
            Some(scale_into(base, old, new))
        }
        HandleKind::Rotate => None,
    }
}

/// Rotate a layer so its rotation handle tracks the cursor.
///
/// Returns the rotated layer (None for kinds that don't rotate).
/// `snap` quantizes the angle to 15-degree increments.
pub fn rotate_layer(base: &Layer, cursor: Point, snap: bool) -> Option<Layer> {
    if !base.supports_rotation() {
        return None;
    }
    let center = base.bounds().center();
    let dx = cursor.x - center.x;
    let dy = cursor.y - center.y;
    // Offset so 0 degrees points up, where the handle sits.
    let mut degrees = dy.atan2(dx).to_degrees() + 90.0;
    if snap {
        degrees = (degrees / 15.0).round() * 15.0;
    }
    let mut rotated = base.clone();
    rotated.set_rotation(degrees);
    Some(rotated)
}

fn move_endpoint(base: &Layer, index: usize, delta: Vec2) -> Option<Layer> {
    let mut layer = base.clone();
    match &mut layer {
        Layer::Line(line) => match index {
            0 => line.start += delta,
            1 => line.end += delta,
            _ => return None,
        },
        Layer::Arrow(arrow) => match index {
            0 => arrow.start += delta,
            1 => arrow.end += delta,
            _ => return None,
        },
        Layer::Dimension(dim) => match index {
            0 => dim.start += delta,
            1 => dim.end += delta,
            _ => return None,
        },
        _ => return None,
    }
    Some(layer)
}

fn move_control(base: &Layer, delta: Vec2) -> Option<Layer> {
    let mut layer = base.clone();
    match &mut layer {
        Layer::Line(line) => {
            let from = line.control.unwrap_or_else(|| line.midpoint());
            line.control = Some(from + delta);
        }
        Layer::Arrow(arrow) => {
            let from = arrow.control.unwrap_or_else(|| arrow.midpoint());
            arrow.control = Some(from + delta);
        }
        _ => return None,
    }
    Some(layer)
}

/// New bounds after dragging a corner by `delta`, normalized and
/// clamped to the minimum size. `aspect_lock` keeps the original
/// width:height ratio, growing to the larger of the two spans.
fn corner_resized(old: Rect, corner: Corner, delta: Vec2, aspect_lock: bool) -> Rect {
    let (x0, y0, x1, y1) = match corner {
        Corner::TopLeft => (old.x0 + delta.x, old.y0 + delta.y, old.x1, old.y1),
        Corner::TopRight => (old.x0, old.y0 + delta.y, old.x1 + delta.x, old.y1),
        Corner::BottomLeft => (old.x0 + delta.x, old.y0, old.x1, old.y1 + delta.y),
        Corner::BottomRight => (old.x0, old.y0, old.x1 + delta.x, old.y1 + delta.y),
    };
    let (x0, x1) = if x0 < x1 { (x0, x1) } else { (x1, x0) };
    let (y0, y1) = if y0 < y1 { (y0, y1) } else { (y1, y0) };

    let (width, height) = if aspect_lock {
        let aspect = old.width() / old.height().max(0.1);
        let size = (x1 - x0).max(y1 - y0).max(MIN_SIZE);
        (size, size / aspect)
    } else {
        ((x1 - x0).max(MIN_SIZE), (y1 - y0).max(MIN_SIZE))
    };
    Rect::new(x0, y0, x0 + width, y0 + height)
}

/// New bounds after dragging an edge midpoint by `delta`.
fn edge_resized(old: Rect, edge: Edge, delta: Vec2) -> Rect {
    let (x0, y0, x1, y1) = match edge {
        Edge::Top => (old.x0, old.y0 + delta.y, old.x1, old.y1),
        Edge::Right => (old.x0, old.y0, old.x1 + delta.x, old.y1),
        Edge::Bottom => (old.x0, old.y0, old.x1, old.y1 + delta.y),
        Edge::Left => (old.x0 + delta.x, old.y0, old.x1, old.y1),
    };
    let (x0, x1) = if x0 < x1 { (x0, x1) } else { (x1, x0) };
    let (y0, y1) = if y0 < y1 { (y0, y1) } else { (y1, y0) };
    Rect::new(
        x0,
        y0,
        x0 + (x1 - x0).max(MIN_SIZE),
        y0 + (y1 - y0).max(MIN_SIZE),
    )
}

/// Map a layer's geometry from `old` bounds into `new` bounds.
fn scale_into(base: &Layer, old: Rect, new: Rect) -> Layer {
    let sx = new.width() / old.width().max(f64::EPSILON);
    let sy = new.height() / old.height().max(f64::EPSILON);
    let map = |p: Point| {
        Point::new(
            new.x0 + (p.x - old.x0) * sx,
            new.y0 + (p.y - old.y0) * sy,
        )
    };

    let mut layer = base.clone();
    match &mut layer {
        Layer::Rectangle(rect) => {
            rect.origin = new.origin();
            rect.width = new.width();
            rect.height = new.height();
        }
        Layer::Circle(circle) => {
            circle.center = new.center();
            circle.radius = new.width().min(new.height()) / 2.0;
        }
        Layer::Ellipse(ellipse) => {
            ellipse.center = new.center();
            ellipse.radius_x = new.width() / 2.0;
            ellipse.radius_y = new.height() / 2.0;
        }
        Layer::Line(line) => {
            line.start = map(line.start);
            line.end = map(line.end);
            line.control = line.control.map(map);
        }
        Layer::Arrow(arrow) => {
            arrow.start = map(arrow.start);
            arrow.end = map(arrow.end);
            arrow.control = arrow.control.map(map);
        }
        Layer::Polygon(poly) => {
            poly.center = new.center();
            poly.radius *= (sx + sy) / 2.0;
        }
        Layer::Star(star) => {
            star.center = new.center();
            star.outer_radius *= (sx + sy) / 2.0;
            star.inner_radius = star.inner_radius.map(|r| r * (sx + sy) / 2.0);
        }
        Layer::Path(path) => {
            for p in &mut path.points {
                *p = map(*p);
            }
        }
        Layer::Marker(marker) => {
            marker.center = map(marker.center);
            marker.radius *= (sx + sy) / 2.0;
            marker.arrow_to = marker.arrow_to.map(map);
        }
        Layer::Dimension(dim) => {
            dim.start = map(dim.start);
            dim.end = map(dim.end);
        }
        Layer::Text(text) => {
            text.anchor = new.origin();
            text.font_size = (text.font_size * sy).max(4.0);
        }
        Layer::TextBox(tb) => {
            tb.origin = new.origin();
            tb.width = new.width();
            tb.height = new.height();
        }
        Layer::Blur(blur) => {
            blur.origin = new.origin();
            blur.width = new.width();
            blur.height = new.height();
        }
        Layer::Highlight(hl) => {
            hl.origin = new.origin();
            hl.width = new.width();
            hl.height = Some(new.height());
        }
        Layer::Image(img) => {
            img.origin = new.origin();
            img.width = new.width();
            img.height = new.height();
        }
        Layer::Group(_) => {}
    }
    layer
}
