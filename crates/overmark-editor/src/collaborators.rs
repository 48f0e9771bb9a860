//! Optional collaborator seams for the host front end.
//!
//! Each collaborator is a trait with a null-object default, so the
//! editor never checks for presence at runtime; a host that has
//! nothing better to offer just leaves the default in place.

use crate::handles::HandleKind;
use crate::transform;
use kurbo::{Point, Rect, Vec2};
use overmark_core::{Layer, LayerId};

/// Supplies measured bounds for layers whose real extent only the
/// renderer knows (shaped text, decoded images). Returning None falls
/// back to the layer's own estimate.
pub trait BoundsProvider {
    fn measured_bounds(&self, layer: &Layer) -> Option<Rect>;
}

/// Default bounds provider: always fall back to layer estimates.
#[derive(Debug, Default)]
pub struct NullBoundsProvider;

impl BoundsProvider for NullBoundsProvider {
    fn measured_bounds(&self, _layer: &Layer) -> Option<Rect> {
        None
    }
}

/// Supplies the resize and rotation math applied during handle drags.
///
/// `base` is always the pre-gesture snapshot of the layer. Returning
/// None declines the operation; the editor logs one diagnostic and the
/// gesture becomes a no-op.
pub trait TransformProvider {
    fn resize(
        &self,
        base: &Layer,
        handle: HandleKind,
        delta: Vec2,
        aspect_lock: bool,
    ) -> Option<Layer>;

    fn rotate(&self, base: &Layer, cursor: Point, snap: bool) -> Option<Layer>;
}

/// Default transform provider: the built-in corner/edge/rotation math.
#[derive(Debug, Default)]
pub struct BuiltinTransform;

impl TransformProvider for BuiltinTransform {
    fn resize(
        &self,
        base: &Layer,
        handle: HandleKind,
        delta: Vec2,
        aspect_lock: bool,
    ) -> Option<Layer> {
        transform::resize_layer(base, handle, delta, aspect_lock)
    }

    fn rotate(&self, base: &Layer, cursor: Point, snap: bool) -> Option<Layer> {
        transform::rotate_layer(base, cursor, snap)
    }
}

/// Notified after every effective selection change, for screen-reader
/// announcements and toolbar refresh.
pub trait SelectionObserver {
    fn selection_changed(&mut self, selected: &[LayerId]);
}

/// Default observer: ignores notifications.
#[derive(Debug, Default)]
pub struct NullObserver;

impl SelectionObserver for NullObserver {
    fn selection_changed(&mut self, _selected: &[LayerId]) {}
}
