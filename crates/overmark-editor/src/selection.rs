//! Selection set with group cascade.

use overmark_core::{LayerDocument, LayerId};

/// The current selection: an ordered id set plus a last-selected
/// pointer (range selection and rotation-handle placement key off it).
///
/// Invariant: every id in the set was visible and unlocked at the time
/// it was selected; membership operations on locked, hidden, or unknown
/// layers are silent no-ops.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    ids: Vec<LayerId>,
    last_selected: Option<LayerId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[LayerId] {
        &self.ids
    }

    pub fn last_selected(&self) -> Option<LayerId> {
        self.last_selected
    }

    pub fn contains(&self, id: LayerId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Select a layer, replacing the current selection unless
    /// `add_to_selection` is set, in which case the id toggles in or
    /// out. Groups cascade to their full descendant set either way.
    ///
    /// Returns true when the selection changed. Unknown, hidden, or
    /// locked ids leave the selection untouched.
    pub fn select(&mut self, doc: &LayerDocument, id: LayerId, add_to_selection: bool) -> bool {
        let Some(layer) = doc.get(id) else {
            return false;
        };
        if !layer.is_interactive() {
            return false;
        }
        let closure: Vec<LayerId> = doc
            .selection_closure(id)
            .into_iter()
            .filter(|&member| doc.get(member).is_some_and(|l| l.is_interactive()))
            .collect();

        if add_to_selection {
            if self.contains(id) {
                // Toggle off the whole subtree.
                self.ids.retain(|member| !closure.contains(member));
                if self
                    .last_selected
                    .is_some_and(|last| closure.contains(&last))
                {
                    self.last_selected = self.ids.last().copied();
                }
            } else {
                for member in closure {
                    if !self.contains(member) {
                        self.ids.push(member);
                    }
                }
                self.last_selected = Some(id);
            }
        } else {
            self.ids = closure;
            self.last_selected = Some(id);
        }
        true
    }

    /// Replace the selection wholesale (marquee commit).
    pub fn replace(&mut self, ids: Vec<LayerId>) {
        self.last_selected = ids.last().copied();
        self.ids = ids;
    }

    /// Select every visible, unlocked layer, in z-order.
    pub fn select_all(&mut self, doc: &LayerDocument) {
        self.ids = doc
            .z_order()
            .iter()
            .filter(|&&id| doc.get(id).is_some_and(|l| l.is_interactive()))
            .copied()
            .collect();
        self.last_selected = self.ids.last().copied();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.last_selected = None;
    }

    /// Drop ids that no longer exist in the document (after undo or
    /// external deletion).
    pub fn prune(&mut self, doc: &LayerDocument) {
        self.ids.retain(|&id| doc.get(id).is_some());
        if self
            .last_selected
            .is_some_and(|last| doc.get(last).is_none())
        {
            self.last_selected = self.ids.last().copied();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use overmark_core::Layer;
    use overmark_core::layers::Rectangle;
    use uuid::Uuid;

    fn doc_with_rects(n: usize) -> (LayerDocument, Vec<LayerId>) {
        let mut doc = LayerDocument::new();
        let ids = (0..n)
            .map(|i| {
                doc.add_layer(Layer::Rectangle(Rectangle::new(
                    Point::new(i as f64 * 20.0, 0.0),
                    10.0,
                    10.0,
                )))
            })
            .collect();
        (doc, ids)
    }

    #[test]
    fn test_replace_semantics() {
        let (doc, ids) = doc_with_rects(2);
        let mut sel = Selection::new();
        assert!(sel.select(&doc, ids[0], false));
        assert!(sel.select(&doc, ids[1], false));
        assert_eq!(sel.ids(), &[ids[1]]);
    }

    #[test]
    fn test_additive_toggle() {
        let (doc, ids) = doc_with_rects(2);
        let mut sel = Selection::new();
        sel.select(&doc, ids[0], false);
        sel.select(&doc, ids[1], true);
        assert_eq!(sel.len(), 2);
        // Re-selecting additively toggles off.
        sel.select(&doc, ids[1], true);
        assert_eq!(sel.ids(), &[ids[0]]);
        assert_eq!(sel.last_selected(), Some(ids[0]));
    }

    #[test]
    fn test_locked_and_hidden_are_noops() {
        let (mut doc, ids) = doc_with_rects(2);
        let mut sel = Selection::new();
        doc.set_layer_locked(ids[0], true);
        assert!(!sel.select(&doc, ids[0], false));
        assert!(sel.is_empty());
        doc.set_layer_visible(ids[1], false);
        assert!(!sel.select(&doc, ids[1], true));
        assert!(sel.is_empty());
        assert!(!sel.select(&doc, Uuid::new_v4(), false));
    }

    #[test]
    fn test_group_cascade_and_toggle_off() {
        let (mut doc, ids) = doc_with_rects(3);
        let group = doc.group_layers(&[ids[0], ids[1]]).expect("group");
        let mut sel = Selection::new();

        sel.select(&doc, group, false);
        assert_eq!(sel.len(), 3);
        assert!(sel.contains(group) && sel.contains(ids[0]) && sel.contains(ids[1]));

        sel.select(&doc, ids[2], true);
        assert_eq!(sel.len(), 4);

        // Toggling the group off removes the whole subtree.
        sel.select(&doc, group, true);
        assert_eq!(sel.ids(), &[ids[2]]);
    }

    #[test]
    fn test_select_all_skips_locked() {
        let (mut doc, ids) = doc_with_rects(3);
        doc.set_layer_locked(ids[1], true);
        let mut sel = Selection::new();
        sel.select_all(&doc);
        assert_eq!(sel.ids(), &[ids[0], ids[2]]);
        assert_eq!(sel.last_selected(), Some(ids[2]));
    }

    #[test]
    fn test_prune_after_removal() {
        let (mut doc, ids) = doc_with_rects(2);
        let mut sel = Selection::new();
        sel.select(&doc, ids[0], false);
        sel.select(&doc, ids[1], true);
        doc.remove_layer(ids[1]);
        sel.prune(&doc);
        assert_eq!(sel.ids(), &[ids[0]]);
        assert_eq!(sel.last_selected(), Some(ids[0]));
    }
}
