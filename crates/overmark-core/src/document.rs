//! Layer document: arena storage, z-order, groups, and undo history.

use crate::error::DocumentError;
use crate::geometry::rects_intersect;
use crate::layers::{Group, Layer, LayerId};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// Offset applied to duplicated layers so the copy is visibly apart.
const DUPLICATE_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

/// A snapshot of document state for undo/redo.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentSnapshot {
    layers: HashMap<LayerId, Layer>,
    z_order: Vec<LayerId>,
}

/// An annotation document: all layers keyed by id, plus a z-order.
///
/// The arena owns every layer, including group members; the z-order
/// holds every layer id back-to-front (last = topmost). Groups
/// reference their members by id, forming a forest over the flat
/// arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name, shown in the host UI.
    pub name: String,
    layers: HashMap<LayerId, Layer>,
    z_order: Vec<LayerId>,
    #[serde(skip)]
    undo_stack: Vec<DocumentSnapshot>,
    #[serde(skip)]
    redo_stack: Vec<DocumentSnapshot>,
}

impl Default for LayerDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            layers: HashMap::new(),
            z_order: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    // --- undo/redo ------------------------------------------------------

    fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            layers: self.layers.clone(),
            z_order: self.z_order.clone(),
        }
    }

    /// Push the current state to the undo stack (call before a mutation
    /// that should be undoable as one step).
    pub fn push_undo(&mut self) {
        self.undo_stack.push(self.snapshot());
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last checkpointed change. Returns false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        if let Some(snapshot) = self.undo_stack.pop() {
            self.redo_stack.push(self.snapshot());
            self.layers = snapshot.layers;
            self.z_order = snapshot.z_order;
            true
        } else {
            false
        }
    }

    /// Redo the last undone change. Returns false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        if let Some(snapshot) = self.redo_stack.pop() {
            self.undo_stack.push(self.snapshot());
            self.layers = snapshot.layers;
            self.z_order = snapshot.z_order;
            true
        } else {
            false
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    // --- arena access ---------------------------------------------------

    /// Add a layer on top of the stack. Returns its id.
    pub fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = layer.id();
        self.z_order.push(id);
        self.layers.insert(id, layer);
        id
    }

    /// Remove a layer. Group members of a removed group stay in the
    /// document as free layers; the removed id is also scrubbed from any
    /// group that referenced it.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<Layer> {
        self.z_order.retain(|&layer_id| layer_id != id);
        for layer in self.layers.values_mut() {
            if let Some(group) = layer.as_group_mut() {
                group.children.retain(|&child| child != id);
            }
        }
        self.layers.remove(&id)
    }

    pub fn get(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(&id)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Layer ids back-to-front (last = topmost).
    pub fn z_order(&self) -> &[LayerId] {
        &self.z_order
    }

    /// Layers in z-order (back to front).
    pub fn layers_ordered(&self) -> impl Iterator<Item = &Layer> {
        self.z_order.iter().filter_map(|id| self.layers.get(id))
    }

    /// Set a layer's visibility. Returns false for unknown ids.
    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> bool {
        match self.layers.get_mut(&id) {
            Some(layer) => {
                layer.set_visible(visible);
                true
            }
            None => false,
        }
    }

    /// Set a layer's lock flag. Returns false for unknown ids.
    pub fn set_layer_locked(&mut self, id: LayerId, locked: bool) -> bool {
        match self.layers.get_mut(&id) {
            Some(layer) => {
                layer.set_locked(locked);
                true
            }
            None => false,
        }
    }

    // --- z-order --------------------------------------------------------

    /// Bring a layer to the front (topmost).
    pub fn bring_to_front(&mut self, id: LayerId) {
        if self.layers.contains_key(&id) {
            self.z_order.retain(|&layer_id| layer_id != id);
            self.z_order.push(id);
        }
    }

    /// Send a layer to the back (bottommost).
    pub fn send_to_back(&mut self, id: LayerId) {
        if self.layers.contains_key(&id) {
            self.z_order.retain(|&layer_id| layer_id != id);
            self.z_order.insert(0, id);
        }
    }

    /// Move a layer one slot toward the front. Returns false if already there.
    pub fn bring_forward(&mut self, id: LayerId) -> bool {
        if let Some(pos) = self.z_order.iter().position(|&layer_id| layer_id == id) {
            if pos < self.z_order.len() - 1 {
                self.z_order.swap(pos, pos + 1);
                return true;
            }
        }
        false
    }

    /// Move a layer one slot toward the back. Returns false if already there.
    pub fn send_backward(&mut self, id: LayerId) -> bool {
        if let Some(pos) = self.z_order.iter().position(|&layer_id| layer_id == id) {
            if pos > 0 {
                self.z_order.swap(pos, pos - 1);
                return true;
            }
        }
        false
    }

    // --- hit testing ----------------------------------------------------

    /// Find the topmost visible, unlocked layer at a point.
    ///
    /// Scans front-to-back, so overlapping layers resolve to the one
    /// drawn last. Stroke-like kinds use their default pick tolerance.
    pub fn layer_at_point(&self, point: Point) -> Option<LayerId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| self.layers.get(&id).map(|layer| (id, layer)))
            .find(|(_, layer)| {
                layer.is_interactive() && layer.hit_test(point, layer.default_tolerance())
            })
            .map(|(id, _)| id)
    }

    /// Like [`Self::layer_at_point`] with an explicit tolerance for every kind.
    pub fn layer_at_point_with_tolerance(&self, point: Point, tolerance: f64) -> Option<LayerId> {
        self.z_order
            .iter()
            .rev()
            .filter_map(|&id| self.layers.get(&id).map(|layer| (id, layer)))
            .find(|(_, layer)| layer.is_interactive() && layer.hit_test(point, tolerance))
            .map(|(id, _)| id)
    }

    /// All interactive layers whose bounds strictly overlap a rectangle,
    /// in z-order. Bounds that merely touch the rect edge do not count.
    pub fn layers_intersecting(&self, rect: Rect) -> Vec<LayerId> {
        self.z_order
            .iter()
            .filter(|&&id| {
                self.layers
                    .get(&id)
                    .is_some_and(|layer| layer.is_interactive())
                    && self
                        .layer_bounds(id)
                        .is_some_and(|bounds| rects_intersect(rect, bounds))
            })
            .copied()
            .collect()
    }

    // --- bounds ---------------------------------------------------------

    /// Bounds of one layer; group bounds are the union of member bounds,
    /// resolved recursively through the arena.
    pub fn layer_bounds(&self, id: LayerId) -> Option<Rect> {
        let mut visited = HashSet::new();
        self.layer_bounds_inner(id, &mut visited)
    }

    fn layer_bounds_inner(&self, id: LayerId, visited: &mut HashSet<LayerId>) -> Option<Rect> {
        if !visited.insert(id) {
            // Cycle guard: a well-formed forest never revisits a node.
            log::warn!("cyclic group reference at layer {id}");
            return None;
        }
        let layer = self.layers.get(&id)?;
        match layer.as_group() {
            Some(group) => group
                .children
                .iter()
                .filter_map(|&child| self.layer_bounds_inner(child, visited))
                .reduce(|a, b| a.union(b)),
            None => Some(layer.bounds()),
        }
    }

    /// Union bounds of every layer, or None for an empty document.
    pub fn bounds(&self) -> Option<Rect> {
        self.layers
            .values()
            .filter(|layer| !layer.is_group())
            .map(|layer| layer.bounds())
            .reduce(|a, b| a.union(b))
    }

    // --- groups ---------------------------------------------------------

    /// The group directly containing a layer, if any.
    pub fn parent_of(&self, id: LayerId) -> Option<LayerId> {
        self.layers.values().find_map(|layer| {
            layer
                .as_group()
                .filter(|group| group.contains_child(id))
                .map(|_| layer.id())
        })
    }

    /// All descendant ids of a group, recursively. Empty for non-groups.
    pub fn group_descendants(&self, id: LayerId) -> Vec<LayerId> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        visited.insert(id);
        self.collect_descendants(id, &mut out, &mut visited);
        out
    }

    fn collect_descendants(
        &self,
        id: LayerId,
        out: &mut Vec<LayerId>,
        visited: &mut HashSet<LayerId>,
    ) {
        let Some(group) = self.layers.get(&id).and_then(Layer::as_group) else {
            return;
        };
        for &child in &group.children {
            if visited.insert(child) {
                out.push(child);
                self.collect_descendants(child, out, visited);
            }
        }
    }

    /// The id plus, for groups, the full recursive descendant set. This
    /// is the unit selection operates on.
    pub fn selection_closure(&self, id: LayerId) -> Vec<LayerId> {
        let mut out = vec![id];
        out.extend(self.group_descendants(id));
        out
    }

    /// Group the given layers. Returns the new group id, or None when
    /// fewer than two of the ids exist in the document.
    ///
    /// Members keep their own z-order slots; the group layer is inserted
    /// just above the frontmost member.
    pub fn group_layers(&mut self, ids: &[LayerId]) -> Option<LayerId> {
        let members: Vec<LayerId> = self
            .z_order
            .iter()
            .filter(|&id| ids.contains(id))
            .copied()
            .collect();
        if members.len() < 2 {
            return None;
        }
        let front_pos = self.z_order.iter().rposition(|id| members.contains(id))?;

        let group = Group::new(members);
        let group_id = group.id;
        self.layers.insert(group_id, Layer::Group(group));
        self.z_order.insert(front_pos + 1, group_id);
        Some(group_id)
    }

    /// Dissolve a group, leaving its members as free layers. Returns the
    /// direct child ids, or None when the id is not a group.
    pub fn ungroup_layer(&mut self, group_id: LayerId) -> Option<Vec<LayerId>> {
        let children = self.layers.get(&group_id)?.as_group()?.children.clone();
        self.remove_layer(group_id);
        Some(children)
    }

    // --- duplication ----------------------------------------------------

    /// Duplicate the given layers (with their group subtrees), offset so
    /// the copies are visibly apart. Ids that are descendants of other
    /// ids in the set are skipped, so a selected group and its members
    /// duplicate once. Returns the new top-level ids.
    pub fn duplicate_layers(&mut self, ids: &[LayerId]) -> Vec<LayerId> {
        let id_set: HashSet<LayerId> = ids.iter().copied().collect();
        let roots: Vec<LayerId> = ids
            .iter()
            .filter(|&&id| {
                self.layers.contains_key(&id)
                    && !self.is_descendant_of_any(id, &id_set)
            })
            .copied()
            .collect();

        roots
            .iter()
            .filter_map(|&id| self.duplicate_subtree(id))
            .collect()
    }

    fn is_descendant_of_any(&self, id: LayerId, set: &HashSet<LayerId>) -> bool {
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if set.contains(&parent) {
                return true;
            }
            current = self.parent_of(parent);
        }
        false
    }

    fn duplicate_subtree(&mut self, id: LayerId) -> Option<LayerId> {
        let mut copy = self.layers.get(&id)?.clone();
        copy.regenerate_id();
        copy.translate(DUPLICATE_OFFSET);

        let children = match copy.as_group_mut() {
            Some(group) => std::mem::take(&mut group.children),
            None => Vec::new(),
        };
        if !children.is_empty() {
            let new_children: Vec<LayerId> = children
                .iter()
                .filter_map(|&child| self.duplicate_subtree(child))
                .collect();
            if let Some(group) = copy.as_group_mut() {
                group.children = new_children;
            }
        }
        Some(self.add_layer(copy))
    }

    // --- persistence ----------------------------------------------------

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Encode)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(DocumentError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{Circle, Line, Rectangle};

    fn rect_at(x: f64, y: f64, w: f64, h: f64) -> Layer {
        Layer::Rectangle(Rectangle::new(Point::new(x, y), w, h))
    }

    #[test]
    fn test_add_and_remove() {
        let mut doc = LayerDocument::new();
        let id = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        assert_eq!(doc.len(), 1);
        assert!(doc.remove_layer(id).is_some());
        assert!(doc.is_empty());
        assert!(doc.z_order().is_empty());
    }

    #[test]
    fn test_topmost_wins_in_overlap() {
        let mut doc = LayerDocument::new();
        let below = doc.add_layer(rect_at(0.0, 0.0, 100.0, 100.0));
        let above = doc.add_layer(rect_at(50.0, 50.0, 100.0, 100.0));
        // Overlap region: the later-added layer wins.
        assert_eq!(doc.layer_at_point(Point::new(75.0, 75.0)), Some(above));
        // Outside the overlap the lower layer is still reachable.
        assert_eq!(doc.layer_at_point(Point::new(10.0, 10.0)), Some(below));
    }

    #[test]
    fn test_invisible_and_locked_never_hit() {
        let mut doc = LayerDocument::new();
        let id = doc.add_layer(rect_at(0.0, 0.0, 100.0, 100.0));
        doc.set_layer_visible(id, false);
        assert_eq!(doc.layer_at_point(Point::new(50.0, 50.0)), None);
        doc.set_layer_visible(id, true);
        doc.set_layer_locked(id, true);
        assert_eq!(doc.layer_at_point(Point::new(50.0, 50.0)), None);
    }

    #[test]
    fn test_locked_layer_unmasks_layer_below() {
        let mut doc = LayerDocument::new();
        let below = doc.add_layer(rect_at(0.0, 0.0, 100.0, 100.0));
        let above = doc.add_layer(rect_at(0.0, 0.0, 100.0, 100.0));
        doc.set_layer_locked(above, true);
        assert_eq!(doc.layer_at_point(Point::new(50.0, 50.0)), Some(below));
    }

    #[test]
    fn test_z_order_moves() {
        let mut doc = LayerDocument::new();
        let a = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        let b = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        let c = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        doc.bring_to_front(a);
        assert_eq!(doc.z_order(), &[b, c, a]);
        doc.send_to_back(a);
        assert_eq!(doc.z_order(), &[a, b, c]);
        assert!(doc.bring_forward(a));
        assert_eq!(doc.z_order(), &[b, a, c]);
        assert!(doc.send_backward(a));
        assert!(!doc.send_backward(a));
    }

    #[test]
    fn test_marquee_strict_intersection() {
        let mut doc = LayerDocument::new();
        let inside = doc.add_layer(rect_at(10.0, 10.0, 30.0, 30.0));
        // Touches the marquee edge at x = 100 only.
        let touching = doc.add_layer(rect_at(100.0, 10.0, 30.0, 30.0));
        let hits = doc.layers_intersecting(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(hits.contains(&inside));
        assert!(!hits.contains(&touching));
    }

    #[test]
    fn test_group_descendants_three_levels() {
        let mut doc = LayerDocument::new();
        let a = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        let b = doc.add_layer(rect_at(20.0, 0.0, 10.0, 10.0));
        let inner = doc.group_layers(&[a, b]).expect("inner group");
        let c = doc.add_layer(rect_at(40.0, 0.0, 10.0, 10.0));
        let mid = doc.group_layers(&[inner, c]).expect("mid group");
        let d = doc.add_layer(rect_at(60.0, 0.0, 10.0, 10.0));
        let outer = doc.group_layers(&[mid, d]).expect("outer group");

        let descendants = doc.group_descendants(outer);
        for id in [mid, inner, a, b, c, d] {
            assert!(descendants.contains(&id));
        }
        assert_eq!(descendants.len(), 6);

        let closure = doc.selection_closure(outer);
        assert_eq!(closure.len(), 7);
        assert!(closure.contains(&outer));
    }

    #[test]
    fn test_group_bounds_union_of_members() {
        let mut doc = LayerDocument::new();
        let a = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        let b = doc.add_layer(rect_at(90.0, 90.0, 10.0, 10.0));
        let group = doc.group_layers(&[a, b]).expect("group");
        assert_eq!(
            doc.layer_bounds(group),
            Some(Rect::new(0.0, 0.0, 100.0, 100.0))
        );
    }

    #[test]
    fn test_ungroup_keeps_members() {
        let mut doc = LayerDocument::new();
        let a = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        let b = doc.add_layer(rect_at(20.0, 0.0, 10.0, 10.0));
        let group = doc.group_layers(&[a, b]).expect("group");
        let children = doc.ungroup_layer(group).expect("ungroup");
        assert_eq!(children, vec![a, b]);
        assert!(doc.get(group).is_none());
        assert!(doc.get(a).is_some());
        assert!(doc.get(b).is_some());
    }

    #[test]
    fn test_group_needs_two_members() {
        let mut doc = LayerDocument::new();
        let a = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        assert!(doc.group_layers(&[a]).is_none());
        assert!(doc.group_layers(&[a, Uuid::new_v4()]).is_none());
    }

    #[test]
    fn test_duplicate_offsets_copy() {
        let mut doc = LayerDocument::new();
        let id = doc.add_layer(Layer::Circle(Circle::new(Point::new(50.0, 50.0), 10.0)));
        let copies = doc.duplicate_layers(&[id]);
        assert_eq!(copies.len(), 1);
        let copy = doc.get(copies[0]).expect("copy exists");
        assert_ne!(copy.id(), id);
        assert_eq!(copy.bounds().center(), Point::new(60.0, 60.0));
    }

    #[test]
    fn test_duplicate_group_clones_subtree_once() {
        let mut doc = LayerDocument::new();
        let a = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        let b = doc.add_layer(rect_at(20.0, 0.0, 10.0, 10.0));
        let group = doc.group_layers(&[a, b]).expect("group");

        // Selection closure passes the group and both members.
        let copies = doc.duplicate_layers(&[group, a, b]);
        assert_eq!(copies.len(), 1);
        let new_group = doc.get(copies[0]).and_then(Layer::as_group).expect("group copy");
        assert_eq!(new_group.children.len(), 2);
        // 3 originals + 3 copies.
        assert_eq!(doc.len(), 6);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut doc = LayerDocument::new();
        let id = doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        doc.push_undo();
        doc.remove_layer(id);
        assert!(doc.is_empty());

        assert!(doc.undo());
        assert_eq!(doc.len(), 1);
        assert!(doc.get(id).is_some());

        assert!(doc.redo());
        assert!(doc.is_empty());
        assert!(!doc.redo());
    }

    #[test]
    fn test_json_round_trip() {
        let mut doc = LayerDocument::new();
        doc.add_layer(rect_at(0.0, 0.0, 10.0, 10.0));
        doc.add_layer(Layer::Line(Line::new(Point::ZERO, Point::new(5.0, 5.0))));
        let json = doc.to_json().expect("encode");
        let back = LayerDocument::from_json(&json).expect("decode");
        assert_eq!(back.len(), 2);
        assert_eq!(back.z_order(), doc.z_order());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(LayerDocument::from_json("not json").is_err());
    }
}
