//! Reusable 2D geometry primitives for hit testing.
//!
//! All rotation angles are in degrees, clockwise-positive in screen
//! space (y grows downward), rotating around an explicit center.

use kurbo::{Point, Rect};

/// Rotate a point around a center by the given angle in degrees.
pub fn rotate_point(point: Point, center: Point, degrees: f64) -> Point {
    let theta = degrees.to_radians();
    let (sin, cos) = theta.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Rotate a point around a center by the inverse of the given angle.
///
/// Used to map a query point into a rotated shape's local axis-aligned
/// frame before running the axis-aligned containment test.
pub fn unrotate_point(point: Point, center: Point, degrees: f64) -> Point {
    rotate_point(point, center, -degrees)
}

/// Distance from a point to a line segment (a→b).
///
/// Degenerate segments (a == b) reduce to point distance, and points
/// beyond either endpoint measure to the nearest endpoint rather than
/// the infinite line.
pub fn point_to_segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    point.distance(proj)
}

/// Perpendicular distance from a point to the infinite line through a and b.
pub fn point_to_line_distance(point: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return point.distance(a);
    }
    (dx * (a.y - point.y) - (a.x - point.x) * dy).abs() / len
}

/// Check whether a point lies within `tolerance` of the segment a→b.
pub fn is_point_near_line(point: Point, a: Point, b: Point, tolerance: f64) -> bool {
    point_to_segment_distance(point, a, b) <= tolerance
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// Returns infinity for polylines with fewer than two points.
pub fn point_to_polyline_distance(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_distance(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Number of flattening steps used to approximate a quadratic Bézier.
const BEZIER_SAMPLES: usize = 32;

/// Approximate distance from a point to a quadratic Bézier curve.
///
/// The curve is flattened into `BEZIER_SAMPLES` chords and the minimum
/// segment distance is taken; accurate to well under a pixel for
/// on-screen curve sizes.
pub fn quadratic_bezier_distance(point: Point, p0: Point, ctrl: Point, p1: Point) -> f64 {
    let mut prev = p0;
    let mut best = f64::INFINITY;
    for i in 1..=BEZIER_SAMPLES {
        let t = i as f64 / BEZIER_SAMPLES as f64;
        let mt = 1.0 - t;
        let q = Point::new(
            mt * mt * p0.x + 2.0 * mt * t * ctrl.x + t * t * p1.x,
            mt * mt * p0.y + 2.0 * mt * t * ctrl.y + t * t * p1.y,
        );
        best = best.min(point_to_segment_distance(point, prev, q));
        prev = q;
    }
    best
}

/// Check whether a point lies within `tolerance` of a quadratic Bézier curve.
pub fn is_point_near_quadratic_bezier(
    point: Point,
    p0: Point,
    ctrl: Point,
    p1: Point,
    tolerance: f64,
) -> bool {
    quadratic_bezier_distance(point, p0, ctrl, p1) <= tolerance
}

/// Even-odd ray-casting polygon containment test.
///
/// Handles concave polygons correctly. The crossing rule is half-open
/// (`v.y > p.y` on one endpoint, `<=` on the other), so a point exactly
/// on an edge counts as outside; callers that need boundary hits add a
/// tolerance ring themselves.
pub fn is_point_in_polygon(point: Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = vj.x + (point.y - vj.y) * (vi.x - vj.x) / (vi.y - vj.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Boundary-inclusive axis-aligned rectangle containment.
///
/// kurbo's `Rect::contains` is half-open; hit testing wants a point on
/// the far edge to count, so this compares inclusively on all sides.
pub fn is_point_in_rect(point: Point, rect: Rect) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Strict axis-aligned rectangle overlap test.
///
/// Rectangles that only touch along an edge or at a corner do NOT
/// intersect (strict comparisons), so a marquee must actually overlap
/// a layer's bounds to select it.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && a.x1 > b.x0 && a.y0 < b.y1 && a.y1 > b.y0
}

/// Build the rectangle spanned by two corner points, in any order.
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance_perpendicular() {
        let d = point_to_segment_distance(
            Point::new(50.0, 10.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_distance_beyond_endpoint() {
        // Distance to the nearest endpoint, not to the infinite line.
        let d = point_to_segment_distance(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(200.0, 0.0),
        );
        assert!((d - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_segment_distance_degenerate() {
        let a = Point::new(5.0, 5.0);
        let d = point_to_segment_distance(Point::new(8.0, 9.0), a, a);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_infinite_line_vs_segment() {
        // Past the endpoint the infinite line is still close, the segment is not.
        let p = Point::new(200.0, 5.0);
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert!((point_to_line_distance(p, a, b) - 5.0).abs() < 1e-9);
        assert!(point_to_segment_distance(p, a, b) > 100.0);
    }

    #[test]
    fn test_rotate_round_trip() {
        let center = Point::new(50.0, 50.0);
        let p = Point::new(80.0, 20.0);
        let rotated = rotate_point(p, center, 37.0);
        let back = unrotate_point(rotated, center, 37.0);
        assert!(back.distance(p) < 1e-9);
    }

    #[test]
    fn test_rotate_quarter_turn_clockwise() {
        // Screen space: +90 degrees takes (1, 0) to (0, 1), i.e. downward.
        let p = rotate_point(Point::new(1.0, 0.0), Point::ZERO, 90.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_bezier_distance_midpoint() {
        // Curve from (100,100) to (300,100) with control (200,0) passes
        // through (200,50) at t = 0.5.
        let d = quadratic_bezier_distance(
            Point::new(200.0, 55.0),
            Point::new(100.0, 100.0),
            Point::new(200.0, 0.0),
            Point::new(300.0, 100.0),
        );
        assert!((d - 5.0).abs() < 0.1);
    }

    #[test]
    fn test_polygon_triangle() {
        let triangle = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(50.0, 100.0),
        ];
        assert!(is_point_in_polygon(Point::new(50.0, 50.0), &triangle));
        assert!(!is_point_in_polygon(Point::new(150.0, 50.0), &triangle));
    }

    #[test]
    fn test_polygon_concave_notch() {
        // L-shape: the notch around (75, 75) is outside the polygon.
        let l_shape = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 50.0),
            Point::new(50.0, 100.0),
            Point::new(0.0, 100.0),
        ];
        assert!(is_point_in_polygon(Point::new(25.0, 25.0), &l_shape));
        assert!(is_point_in_polygon(Point::new(25.0, 75.0), &l_shape));
        assert!(!is_point_in_polygon(Point::new(75.0, 75.0), &l_shape));
    }

    #[test]
    fn test_polygon_too_few_points() {
        let segment = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        assert!(!is_point_in_polygon(Point::new(50.0, 0.0), &segment));
    }

    #[test]
    fn test_rect_containment_inclusive() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(is_point_in_rect(Point::new(20.0, 20.0), rect));
        assert!(is_point_in_rect(Point::new(10.0, 15.0), rect));
        assert!(!is_point_in_rect(Point::new(20.1, 20.0), rect));
    }

    #[test]
    fn test_rects_touching_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!rects_intersect(a, b));
        let c = Rect::new(9.0, 0.0, 20.0, 10.0);
        assert!(rects_intersect(a, c));
    }

    #[test]
    fn test_rect_from_corners_any_order() {
        let r1 = rect_from_corners(Point::new(0.0, 0.0), Point::new(200.0, 150.0));
        let r2 = rect_from_corners(Point::new(200.0, 150.0), Point::new(0.0, 0.0));
        assert_eq!(r1, r2);
    }
}
