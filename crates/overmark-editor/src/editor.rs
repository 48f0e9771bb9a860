//! Editor session: selection and gesture orchestration over a document.

use crate::clipboard::Clipboard;
use crate::collaborators::{
    BoundsProvider, BuiltinTransform, NullBoundsProvider, NullObserver, SelectionObserver,
    TransformProvider,
};
use crate::handles::{self, Handle, HandleKind};
use crate::repaint::RepaintScheduler;
use crate::selection::Selection;
use kurbo::{Point, Rect};
use overmark_core::geometry::{is_point_in_rect, rect_from_corners, unrotate_point};
use overmark_core::{Layer, LayerDocument, LayerId};
use std::collections::HashMap;

/// An in-flight pointer gesture. Starting a new gesture implicitly
/// abandons whatever was active before.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Rubber-band selection rectangle.
    Marquee { start: Point, end: Point },
    /// Moving the selected layers.
    Drag {
        anchor: Point,
        current: Point,
        snapshots: HashMap<LayerId, Layer>,
    },
    /// Resizing one layer from a handle.
    Resize {
        handle: HandleKind,
        anchor: Point,
        current: Point,
        aspect_lock: bool,
        target: LayerId,
        snapshot: Box<Layer>,
    },
    /// Rotating one layer from the rotation handle.
    Rotate {
        last_cursor: Option<Point>,
        snap: bool,
        target: LayerId,
        snapshot: Box<Layer>,
    },
}

/// The annotation editor: a document plus selection state, gesture
/// tracking, clipboard, and repaint coalescing.
///
/// Every geometry delta during a gesture is computed from the
/// pre-gesture snapshot, never from the live layer, so rapid
/// pointer-move events cannot compound rounding error.
pub struct Editor {
    document: LayerDocument,
    selection: Selection,
    gesture: Gesture,
    clipboard: Clipboard,
    repaint: RepaintScheduler,
    bounds_provider: Box<dyn BoundsProvider>,
    transform_provider: Box<dyn TransformProvider>,
    observer: Box<dyn SelectionObserver>,
    transform_warned: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor over an empty document with the built-in
    /// collaborators.
    pub fn new() -> Self {
        Self::with_document(LayerDocument::new())
    }

    /// Create an editor over an existing document.
    pub fn with_document(document: LayerDocument) -> Self {
        Self {
            document,
            selection: Selection::new(),
            gesture: Gesture::Idle,
            clipboard: Clipboard::new(),
            repaint: RepaintScheduler::new(),
            bounds_provider: Box::new(NullBoundsProvider),
            transform_provider: Box::new(BuiltinTransform),
            observer: Box::new(NullObserver),
            transform_warned: false,
        }
    }

    /// Swap in a renderer-backed bounds provider.
    pub fn set_bounds_provider(&mut self, provider: Box<dyn BoundsProvider>) {
        self.bounds_provider = provider;
    }

    /// Swap in a custom transform provider.
    pub fn set_transform_provider(&mut self, provider: Box<dyn TransformProvider>) {
        self.transform_provider = provider;
        self.transform_warned = false;
    }

    /// Swap in a selection observer (accessibility, toolbar refresh).
    pub fn set_observer(&mut self, observer: Box<dyn SelectionObserver>) {
        self.observer = observer;
    }

    pub fn document(&self) -> &LayerDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut LayerDocument {
        &mut self.document
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.gesture, Gesture::Idle)
    }

    // --- selection ------------------------------------------------------

    pub fn selected_ids(&self) -> &[LayerId] {
        self.selection.ids()
    }

    pub fn is_selected(&self, id: LayerId) -> bool {
        self.selection.contains(id)
    }

    pub fn last_selected(&self) -> Option<LayerId> {
        self.selection.last_selected()
    }

    /// Select a layer by id. Groups cascade; see [`Selection::select`].
    pub fn select_layer(&mut self, id: LayerId, add_to_selection: bool) -> bool {
        let changed = self.selection.select(&self.document, id, add_to_selection);
        if changed {
            self.selection_changed();
        }
        changed
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.selection_changed();
        }
    }

    pub fn select_all(&mut self) {
        self.selection.select_all(&self.document);
        self.selection_changed();
    }

    /// Hit test and select in one step: picks the topmost interactive
    /// layer under the point, or clears the selection on a miss (unless
    /// adding).
    pub fn select_at_point(&mut self, point: Point, add_to_selection: bool) -> Option<LayerId> {
        match self.layer_at_point(point) {
            Some(id) => {
                self.select_layer(id, add_to_selection);
                Some(id)
            }
            None => {
                if !add_to_selection {
                    self.clear_selection();
                }
                None
            }
        }
    }

    fn selection_changed(&mut self) {
        self.observer.selection_changed(self.selection.ids());
        self.repaint.request();
    }

    // --- hit testing ----------------------------------------------------

    /// Provider-aware layer hit test: measured bounds pre-empt the
    /// layer's own estimate for text and image kinds.
    fn hit_test_layer(&self, layer: &Layer, point: Point) -> bool {
        if matches!(layer, Layer::Text(_) | Layer::TextBox(_) | Layer::Image(_)) {
            if let Some(rect) = self.bounds_provider.measured_bounds(layer) {
                let local = unrotate_point(point, rect.center(), layer.rotation());
                return is_point_in_rect(local, rect);
            }
        }
        layer.hit_test(point, layer.default_tolerance())
    }

    /// Topmost visible, unlocked layer under the point.
    pub fn layer_at_point(&self, point: Point) -> Option<LayerId> {
        self.document
            .z_order()
            .iter()
            .rev()
            .filter_map(|&id| self.document.get(id))
            .find(|layer| layer.is_interactive() && self.hit_test_layer(layer, point))
            .map(|layer| layer.id())
    }

    /// Bounds of a layer as displayed: measured bounds when the provider
    /// has them, the document's computed bounds otherwise.
    pub fn layer_display_bounds(&self, id: LayerId) -> Option<Rect> {
        let layer = self.document.get(id)?;
        if !layer.is_group() {
            if let Some(rect) = self.bounds_provider.measured_bounds(layer) {
                return Some(rect);
            }
        }
        self.document.layer_bounds(id)
    }

    /// Union bounds of the selection.
    pub fn selection_bounds(&self) -> Option<Rect> {
        self.selection
            .ids()
            .iter()
            .filter_map(|&id| self.layer_display_bounds(id))
            .reduce(|a, b| a.union(b))
    }

    // --- handles --------------------------------------------------------

    /// The active selection handles: per-kind handles for a single
    /// selected layer, corner handles on the union bounds otherwise.
    pub fn selection_handles(&self) -> Vec<Handle> {
        match self.selection.ids() {
            [] => Vec::new(),
            [id] => {
                let Some(layer) = self.document.get(*id) else {
                    return Vec::new();
                };
                let Some(bounds) = self.layer_display_bounds(*id) else {
                    return Vec::new();
                };
                handles::handles_for_layer(layer, bounds)
            }
            _ => match self.selection_bounds() {
                Some(bounds) => handles::handles_for_bounds(bounds),
                None => Vec::new(),
            },
        }
    }

    /// Which selection handle, if any, sits under the point.
    pub fn hit_test_selection_handles(&self, point: Point) -> Option<HandleKind> {
        handles::hit_test_handles(&self.selection_handles(), point)
    }

    // --- marquee --------------------------------------------------------

    pub fn start_marquee(&mut self, point: Point) {
        self.gesture = Gesture::Marquee {
            start: point,
            end: point,
        };
        self.repaint.request();
    }

    pub fn update_marquee(&mut self, point: Point) {
        if let Gesture::Marquee { end, .. } = &mut self.gesture {
            *end = point;
            self.repaint.request();
        }
    }

    /// The current marquee rectangle (normalized), if a marquee is active.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::Marquee { start, end } => Some(rect_from_corners(start, end)),
            _ => None,
        }
    }

    /// Layers the active marquee would select right now.
    pub fn marquee_preview(&self) -> Vec<LayerId> {
        self.marquee_rect()
            .map(|rect| self.document.layers_intersecting(rect))
            .unwrap_or_default()
    }

    /// Commit the marquee: the intersecting set becomes the selection.
    /// Returns the number of selected layers.
    pub fn finish_marquee(&mut self) -> usize {
        if !matches!(self.gesture, Gesture::Marquee { .. }) {
            return self.selection.len();
        }
        let Gesture::Marquee { start, end } = std::mem::take(&mut self.gesture) else {
            return self.selection.len();
        };
        let rect = rect_from_corners(start, end);
        let hits = self.document.layers_intersecting(rect);
        self.selection.replace(hits);
        self.selection_changed();
        self.selection.len()
    }

    // --- drag -----------------------------------------------------------

    /// Begin dragging the selection. No-op when nothing is selected.
    pub fn start_drag(&mut self, point: Point) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let snapshots: HashMap<LayerId, Layer> = self
            .selection
            .ids()
            .iter()
            .filter_map(|&id| self.document.get(id).map(|layer| (id, layer.clone())))
            .collect();
        if snapshots.is_empty() {
            return false;
        }
        self.gesture = Gesture::Drag {
            anchor: point,
            current: point,
            snapshots,
        };
        true
    }

    /// Move the dragged layers to `pre-gesture position + (point - anchor)`.
    /// Layers locked since the gesture began stay put.
    pub fn update_drag(&mut self, point: Point) {
        let Gesture::Drag {
            anchor,
            current,
            snapshots,
        } = &mut self.gesture
        else {
            return;
        };
        *current = point;
        let delta = point - *anchor;
        for (id, snapshot) in snapshots.iter() {
            let Some(live) = self.document.get_mut(*id) else {
                continue;
            };
            if live.is_locked() {
                continue;
            }
            let mut moved = snapshot.clone();
            moved.translate(delta);
            *live = moved;
        }
        self.repaint.request();
    }

    /// Commit the drag and push one undo checkpoint for the whole move.
    pub fn finish_drag(&mut self) {
        if !matches!(self.gesture, Gesture::Drag { .. }) {
            return;
        }
        let Gesture::Drag {
            anchor,
            current,
            snapshots,
        } = std::mem::take(&mut self.gesture)
        else {
            return;
        };
        let delta = current - anchor;
        if delta.hypot2() < f64::EPSILON {
            return;
        }
        let moved: Vec<LayerId> = snapshots
            .keys()
            .copied()
            .filter(|&id| self.document.get(id).is_some_and(|l| !l.is_locked()))
            .collect();
        if moved.is_empty() {
            return;
        }
        // Rewind to the snapshot, checkpoint, then re-apply the final
        // delta so undo lands exactly on the pre-drag state.
        for &id in &moved {
            if let Some(live) = self.document.get_mut(id) {
                *live = snapshots[&id].clone();
            }
        }
        self.document.push_undo();
        for &id in &moved {
            if let Some(live) = self.document.get_mut(id) {
                let mut layer = snapshots[&id].clone();
                layer.translate(delta);
                *live = layer;
            }
        }
        self.repaint.request();
    }

    // --- resize ---------------------------------------------------------

    /// Begin resizing the last-selected layer from a handle. Returns
    /// false for the rotate handle, locked targets, or an empty
    /// selection.
    pub fn start_resize(&mut self, handle: HandleKind, point: Point) -> bool {
        if matches!(handle, HandleKind::Rotate) {
            return false;
        }
        let Some(target) = self.selection.last_selected() else {
            return false;
        };
        let Some(layer) = self.document.get(target) else {
            return false;
        };
        if layer.is_locked() {
            return false;
        }
        self.gesture = Gesture::Resize {
            handle,
            anchor: point,
            current: point,
            aspect_lock: false,
            target,
            snapshot: Box::new(layer.clone()),
        };
        true
    }

    /// Apply the resize for the current pointer position. `aspect_lock`
    /// mirrors the shift-key state.
    pub fn update_resize(&mut self, point: Point, aspect_lock: bool) {
        let Gesture::Resize {
            handle,
            anchor,
            current,
            aspect_lock: lock,
            target,
            snapshot,
        } = &mut self.gesture
        else {
            return;
        };
        *current = point;
        *lock = aspect_lock;
        let delta = point - *anchor;
        match self
            .transform_provider
            .resize(snapshot, *handle, delta, aspect_lock)
        {
            Some(resized) => {
                if let Some(live) = self.document.get_mut(*target) {
                    *live = resized;
                    self.repaint.request();
                }
            }
            None => {
                if !self.transform_warned {
                    log::warn!(
                        "transform provider declined resize of {} layer; gesture disabled",
                        snapshot.kind()
                    );
                    self.transform_warned = true;
                }
            }
        }
    }

    /// Commit the resize and push one undo checkpoint.
    pub fn finish_resize(&mut self) {
        if !matches!(self.gesture, Gesture::Resize { .. }) {
            return;
        }
        let Gesture::Resize {
            handle,
            anchor,
            current,
            aspect_lock,
            target,
            snapshot,
        } = std::mem::take(&mut self.gesture)
        else {
            return;
        };
        let delta = current - anchor;
        if delta.hypot2() < f64::EPSILON {
            return;
        }
        let Some(resized) = self
            .transform_provider
            .resize(&snapshot, handle, delta, aspect_lock)
        else {
            return;
        };
        if self.document.get(target).is_none() {
            return;
        }
        if let Some(live) = self.document.get_mut(target) {
            *live = (*snapshot).clone();
        }
        self.document.push_undo();
        if let Some(live) = self.document.get_mut(target) {
            *live = resized;
        }
        self.repaint.request();
    }

    // --- rotate ---------------------------------------------------------

    /// Begin rotating the last-selected layer.
    pub fn start_rotation(&mut self) -> bool {
        let Some(target) = self.selection.last_selected() else {
            return false;
        };
        let Some(layer) = self.document.get(target) else {
            return false;
        };
        if layer.is_locked() {
            return false;
        }
        self.gesture = Gesture::Rotate {
            last_cursor: None,
            snap: false,
            target,
            snapshot: Box::new(layer.clone()),
        };
        true
    }

    /// Rotate so the handle tracks the cursor. `snap` quantizes to
    /// 15-degree increments (shift key).
    pub fn update_rotation(&mut self, cursor: Point, snap: bool) {
        let Gesture::Rotate {
            last_cursor,
            snap: snap_state,
            target,
            snapshot,
        } = &mut self.gesture
        else {
            return;
        };
        *last_cursor = Some(cursor);
        *snap_state = snap;
        match self.transform_provider.rotate(snapshot, cursor, snap) {
            Some(rotated) => {
                if let Some(live) = self.document.get_mut(*target) {
                    *live = rotated;
                    self.repaint.request();
                }
            }
            None => {
                if !self.transform_warned {
                    log::warn!(
                        "transform provider declined rotation of {} layer; gesture disabled",
                        snapshot.kind()
                    );
                    self.transform_warned = true;
                }
            }
        }
    }

    /// Commit the rotation and push one undo checkpoint.
    pub fn finish_rotation(&mut self) {
        if !matches!(self.gesture, Gesture::Rotate { .. }) {
            return;
        }
        let Gesture::Rotate {
            last_cursor,
            snap,
            target,
            snapshot,
        } = std::mem::take(&mut self.gesture)
        else {
            return;
        };
        let Some(cursor) = last_cursor else {
            return;
        };
        let Some(rotated) = self.transform_provider.rotate(&snapshot, cursor, snap) else {
            return;
        };
        if self.document.get(target).is_none() {
            return;
        }
        if let Some(live) = self.document.get_mut(target) {
            *live = (*snapshot).clone();
        }
        self.document.push_undo();
        if let Some(live) = self.document.get_mut(target) {
            *live = rotated;
        }
        self.repaint.request();
    }

    // --- clipboard and lifecycle ---------------------------------------

    /// Delete the selected layers. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        self.document.push_undo();
        let ids: Vec<LayerId> = self.selection.ids().to_vec();
        let mut removed = 0;
        for id in ids {
            if self.document.remove_layer(id).is_some() {
                removed += 1;
            }
        }
        self.selection.clear();
        self.selection_changed();
        removed
    }

    /// Duplicate the selected layers and select the copies.
    pub fn duplicate_selected(&mut self) -> Vec<LayerId> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        self.document.push_undo();
        let copies = self.document.duplicate_layers(self.selection.ids());
        let mut new_selection = Vec::new();
        for &id in &copies {
            new_selection.extend(self.document.selection_closure(id));
        }
        self.selection.replace(new_selection);
        self.selection_changed();
        copies
    }

    /// Copy the selection to the internal clipboard.
    pub fn copy_selection(&mut self) -> usize {
        self.clipboard.copy(&self.document, self.selection.ids())
    }

    /// Copy, then delete, the selection.
    pub fn cut_selection(&mut self) -> usize {
        let copied = self.copy_selection();
        if copied > 0 {
            self.delete_selected();
        }
        copied
    }

    /// Paste the clipboard contents and select them.
    pub fn paste(&mut self) -> Vec<LayerId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        self.document.push_undo();
        let pasted = self.clipboard.paste(&mut self.document);
        let mut new_selection = Vec::new();
        for &id in &pasted {
            new_selection.extend(self.document.selection_closure(id));
        }
        self.selection.replace(new_selection);
        self.selection_changed();
        pasted
    }

    /// Undo the last checkpoint, dropping selection entries that no
    /// longer resolve.
    pub fn undo(&mut self) -> bool {
        let done = self.document.undo();
        if done {
            self.selection.prune(&self.document);
            self.selection_changed();
        }
        done
    }

    /// Redo the last undone checkpoint.
    pub fn redo(&mut self) -> bool {
        let done = self.document.redo();
        if done {
            self.selection.prune(&self.document);
            self.selection_changed();
        }
        done
    }

    // --- repaint --------------------------------------------------------

    pub fn needs_repaint(&self) -> bool {
        self.repaint.is_scheduled()
    }

    /// Called by the host at the top of a frame; true when a paint is owed.
    pub fn begin_frame(&mut self) -> bool {
        self.repaint.begin_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overmark_core::layers::{Group, Rectangle};

    fn rect_layer(x: f64, y: f64, w: f64, h: f64) -> Layer {
        Layer::Rectangle(Rectangle::new(Point::new(x, y), w, h))
    }

    fn editor_with_rects(n: usize) -> (Editor, Vec<LayerId>) {
        let mut editor = Editor::new();
        let ids = (0..n)
            .map(|i| {
                editor
                    .document_mut()
                    .add_layer(rect_layer(i as f64 * 50.0, 0.0, 40.0, 40.0))
            })
            .collect();
        (editor, ids)
    }

    #[test]
    fn test_select_at_point_topmost_wins() {
        let mut editor = Editor::new();
        let _below = editor.document_mut().add_layer(rect_layer(0.0, 0.0, 100.0, 100.0));
        let above = editor.document_mut().add_layer(rect_layer(50.0, 50.0, 100.0, 100.0));
        let hit = editor.select_at_point(Point::new(75.0, 75.0), false);
        assert_eq!(hit, Some(above));
        assert_eq!(editor.selected_ids(), &[above]);
    }

    #[test]
    fn test_click_on_empty_clears() {
        let (mut editor, ids) = editor_with_rects(1);
        editor.select_layer(ids[0], false);
        editor.select_at_point(Point::new(500.0, 500.0), false);
        assert!(editor.selected_ids().is_empty());
    }

    #[test]
    fn test_drag_applies_delta_from_snapshot() {
        let (mut editor, ids) = editor_with_rects(1);
        editor.select_layer(ids[0], false);
        editor.start_drag(Point::new(20.0, 20.0));
        // Two updates; the second must not compound the first.
        editor.update_drag(Point::new(30.0, 20.0));
        editor.update_drag(Point::new(25.0, 25.0));
        let bounds = editor.document().get(ids[0]).unwrap().bounds();
        assert_eq!(bounds.origin(), Point::new(5.0, 5.0));
        editor.finish_drag();
        assert!(editor.is_idle());
    }

    #[test]
    fn test_drag_undo_restores_pre_gesture() {
        let (mut editor, ids) = editor_with_rects(1);
        editor.select_layer(ids[0], false);
        editor.start_drag(Point::new(0.0, 0.0));
        editor.update_drag(Point::new(100.0, 0.0));
        editor.finish_drag();
        assert_eq!(
            editor.document().get(ids[0]).unwrap().bounds().origin(),
            Point::new(100.0, 0.0)
        );
        assert!(editor.undo());
        assert_eq!(
            editor.document().get(ids[0]).unwrap().bounds().origin(),
            Point::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_zero_delta_drag_pushes_no_undo() {
        let (mut editor, ids) = editor_with_rects(1);
        editor.select_layer(ids[0], false);
        editor.start_drag(Point::new(10.0, 10.0));
        editor.finish_drag();
        assert!(!editor.document().can_undo());
    }

    #[test]
    fn test_locked_mid_gesture_stays_put() {
        let (mut editor, ids) = editor_with_rects(2);
        editor.select_layer(ids[0], false);
        editor.select_layer(ids[1], true);
        editor.start_drag(Point::new(0.0, 0.0));
        editor.document_mut().set_layer_locked(ids[1], true);
        editor.update_drag(Point::new(10.0, 0.0));
        assert_eq!(
            editor.document().get(ids[0]).unwrap().bounds().origin(),
            Point::new(10.0, 0.0)
        );
        assert_eq!(
            editor.document().get(ids[1]).unwrap().bounds().origin(),
            Point::new(50.0, 0.0)
        );
    }

    #[test]
    fn test_marquee_symmetric() {
        let (mut editor, _ids) = editor_with_rects(3);
        editor.start_marquee(Point::new(0.0, 0.0));
        editor.update_marquee(Point::new(200.0, 150.0));
        let forward = editor.finish_marquee();

        editor.clear_selection();
        editor.start_marquee(Point::new(200.0, 150.0));
        editor.update_marquee(Point::new(0.0, 0.0));
        let reverse = editor.finish_marquee();
        assert_eq!(forward, reverse);
        assert_eq!(forward, 3);
    }

    #[test]
    fn test_new_marquee_abandons_old() {
        let (mut editor, _ids) = editor_with_rects(1);
        editor.start_marquee(Point::new(0.0, 0.0));
        editor.update_marquee(Point::new(500.0, 500.0));
        editor.start_marquee(Point::new(400.0, 400.0));
        editor.update_marquee(Point::new(410.0, 410.0));
        assert_eq!(editor.finish_marquee(), 0);
    }

    #[test]
    fn test_resize_via_handles() {
        let (mut editor, ids) = editor_with_rects(1);
        editor.select_layer(ids[0], false);
        let handle = editor
            .hit_test_selection_handles(Point::new(40.0, 40.0))
            .expect("bottom-right corner handle");
        assert!(editor.start_resize(handle, Point::new(40.0, 40.0)));
        editor.update_resize(Point::new(80.0, 80.0), false);
        editor.finish_resize();
        let bounds = editor.document().get(ids[0]).unwrap().bounds();
        assert_eq!(bounds.width(), 80.0);
        assert!(editor.undo());
        assert_eq!(editor.document().get(ids[0]).unwrap().bounds().width(), 40.0);
    }

    #[test]
    fn test_group_resize_declines_without_crash() {
        let mut editor = Editor::new();
        let a = editor.document_mut().add_layer(rect_layer(0.0, 0.0, 10.0, 10.0));
        let b = editor.document_mut().add_layer(rect_layer(20.0, 0.0, 10.0, 10.0));
        let group = editor.document_mut().group_layers(&[a, b]).expect("group");
        editor.select_layer(group, false);
        // Last-selected is the group; the built-in transform declines.
        assert!(editor.start_resize(
            HandleKind::Corner(crate::handles::Corner::TopLeft),
            Point::ZERO
        ));
        editor.update_resize(Point::new(10.0, 10.0), false);
        editor.finish_resize();
        assert_eq!(
            editor.document().get(a).unwrap().bounds().origin(),
            Point::new(0.0, 0.0)
        );
        assert!(!editor.document().can_undo());
    }

    #[test]
    fn test_rotation_gesture() {
        let (mut editor, ids) = editor_with_rects(1);
        editor.select_layer(ids[0], false);
        assert!(editor.start_rotation());
        let center = editor.document().get(ids[0]).unwrap().bounds().center();
        editor.update_rotation(Point::new(center.x + 100.0, center.y), true);
        editor.finish_rotation();
        assert!((editor.document().get(ids[0]).unwrap().rotation() - 90.0).abs() < 1e-9);
        assert!(editor.undo());
        assert_eq!(editor.document().get(ids[0]).unwrap().rotation(), 0.0);
    }

    #[test]
    fn test_delete_and_undo() {
        let (mut editor, ids) = editor_with_rects(2);
        editor.select_all();
        assert_eq!(editor.delete_selected(), 2);
        assert!(editor.document().is_empty());
        assert!(editor.undo());
        assert_eq!(editor.document().len(), 2);
        assert!(editor.selected_ids().is_empty());
        let _ = ids;
    }

    #[test]
    fn test_copy_paste_selects_copies() {
        let (mut editor, ids) = editor_with_rects(1);
        editor.select_layer(ids[0], false);
        assert_eq!(editor.copy_selection(), 1);
        let pasted = editor.paste();
        assert_eq!(pasted.len(), 1);
        assert_eq!(editor.selected_ids(), pasted.as_slice());
    }

    #[test]
    fn test_group_selection_drag_moves_members_once() {
        let mut editor = Editor::new();
        let a = editor.document_mut().add_layer(rect_layer(0.0, 0.0, 10.0, 10.0));
        let b = editor.document_mut().add_layer(rect_layer(20.0, 0.0, 10.0, 10.0));
        let group = editor.document_mut().group_layers(&[a, b]).expect("group");
        editor.select_layer(group, false);
        editor.start_drag(Point::ZERO);
        editor.update_drag(Point::new(5.0, 5.0));
        editor.finish_drag();
        assert_eq!(
            editor.document().get(a).unwrap().bounds().origin(),
            Point::new(5.0, 5.0)
        );
        assert_eq!(
            editor.document().get(b).unwrap().bounds().origin(),
            Point::new(25.0, 5.0)
        );
    }

    #[test]
    fn test_repaint_coalesces_across_mutations() {
        let (mut editor, ids) = editor_with_rects(1);
        editor.select_layer(ids[0], false);
        editor.start_drag(Point::ZERO);
        editor.update_drag(Point::new(1.0, 0.0));
        editor.update_drag(Point::new(2.0, 0.0));
        assert!(editor.needs_repaint());
        assert!(editor.begin_frame());
        assert!(!editor.begin_frame());
    }

    #[test]
    fn test_observer_notified() {
        use std::cell::RefCell;
        use std::rc::Rc;

        struct Recorder(Rc<RefCell<usize>>);
        impl SelectionObserver for Recorder {
            fn selection_changed(&mut self, selected: &[LayerId]) {
                *self.0.borrow_mut() = selected.len();
            }
        }

        let (mut editor, ids) = editor_with_rects(2);
        let count = Rc::new(RefCell::new(0usize));
        editor.set_observer(Box::new(Recorder(count.clone())));
        editor.select_layer(ids[0], false);
        assert_eq!(*count.borrow(), 1);
        editor.select_layer(ids[1], true);
        assert_eq!(*count.borrow(), 2);
        editor.clear_selection();
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_measured_bounds_preempt_estimate() {
        use overmark_core::layers::Text;

        struct FixedBounds;
        impl BoundsProvider for FixedBounds {
            fn measured_bounds(&self, layer: &Layer) -> Option<Rect> {
                matches!(layer, Layer::Text(_)).then(|| Rect::new(0.0, 0.0, 300.0, 30.0))
            }
        }

        let mut editor = Editor::new();
        let id = editor
            .document_mut()
            .add_layer(Layer::Text(Text::new(Point::ZERO, "hi")));
        // The estimate for "hi" is far narrower than 300px.
        assert_eq!(editor.layer_at_point(Point::new(250.0, 15.0)), None);
        editor.set_bounds_provider(Box::new(FixedBounds));
        assert_eq!(editor.layer_at_point(Point::new(250.0, 15.0)), Some(id));
    }

    #[test]
    fn test_group_variant_is_constructible() {
        // Sanity: the editor tolerates free-floating group layers.
        let mut editor = Editor::new();
        let group = editor
            .document_mut()
            .add_layer(Layer::Group(Group::new(vec![])));
        assert!(editor.select_layer(group, false));
    }
}
