//! Internal clipboard for layer copy/paste.
//!
//! Document-level only: the system clipboard belongs to the host shell,
//! which can serialize the same layers through the document JSON.

use kurbo::Vec2;
use overmark_core::{Layer, LayerDocument, LayerId};
use std::collections::{HashMap, HashSet};

/// Offset applied to pasted layers so copies land visibly apart.
pub const PASTE_OFFSET: Vec2 = Vec2::new(16.0, 16.0);

/// Holds cloned layers between copy and paste.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    layers: Vec<Layer>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Copy the given layers (with their group subtrees) off the
    /// document, in z-order. Returns the number of layers captured.
    pub fn copy(&mut self, doc: &LayerDocument, ids: &[LayerId]) -> usize {
        let mut wanted: HashSet<LayerId> = HashSet::new();
        for &id in ids {
            for member in doc.selection_closure(id) {
                wanted.insert(member);
            }
        }
        self.layers = doc
            .z_order()
            .iter()
            .filter(|&id| wanted.contains(id))
            .filter_map(|&id| doc.get(id).cloned())
            .collect();
        self.layers.len()
    }

    /// Paste the held layers into a document with fresh ids and a small
    /// offset. Group children are remapped onto the pasted copies.
    /// Returns the new top-level ids (pasted group members excluded).
    pub fn paste(&self, doc: &mut LayerDocument) -> Vec<LayerId> {
        if self.layers.is_empty() {
            return Vec::new();
        }
        let mut clones = self.layers.clone();
        let mut id_map: HashMap<LayerId, LayerId> = HashMap::new();
        for layer in &mut clones {
            let old = layer.id();
            layer.regenerate_id();
            layer.translate(PASTE_OFFSET);
            id_map.insert(old, layer.id());
        }

        // Rewire group membership onto the copies; children that were
        // not part of the copy are dropped rather than aliased.
        let mut child_ids: HashSet<LayerId> = HashSet::new();
        for layer in &mut clones {
            if let Some(group) = layer.as_group_mut() {
                group.children = group
                    .children
                    .iter()
                    .filter_map(|old| id_map.get(old).copied())
                    .collect();
                child_ids.extend(group.children.iter().copied());
            }
        }

        clones
            .into_iter()
            .map(|layer| doc.add_layer(layer))
            .filter(|id| !child_ids.contains(id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use overmark_core::layers::Rectangle;

    fn rect_at(x: f64, y: f64) -> Layer {
        Layer::Rectangle(Rectangle::new(Point::new(x, y), 10.0, 10.0))
    }

    #[test]
    fn test_copy_paste_offsets_and_renames() {
        let mut doc = LayerDocument::new();
        let id = doc.add_layer(rect_at(0.0, 0.0));
        let mut clipboard = Clipboard::new();
        assert_eq!(clipboard.copy(&doc, &[id]), 1);

        let pasted = clipboard.paste(&mut doc);
        assert_eq!(pasted.len(), 1);
        assert_ne!(pasted[0], id);
        let copy = doc.get(pasted[0]).expect("pasted layer");
        assert_eq!(copy.bounds().origin(), Point::new(16.0, 16.0));
    }

    #[test]
    fn test_paste_twice_gives_distinct_ids() {
        let mut doc = LayerDocument::new();
        let id = doc.add_layer(rect_at(0.0, 0.0));
        let mut clipboard = Clipboard::new();
        clipboard.copy(&doc, &[id]);
        let first = clipboard.paste(&mut doc);
        let second = clipboard.paste(&mut doc);
        assert_ne!(first[0], second[0]);
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn test_group_pastes_as_group() {
        let mut doc = LayerDocument::new();
        let a = doc.add_layer(rect_at(0.0, 0.0));
        let b = doc.add_layer(rect_at(20.0, 0.0));
        let group = doc.group_layers(&[a, b]).expect("group");

        let mut clipboard = Clipboard::new();
        // Selecting the group captures the members through the closure.
        assert_eq!(clipboard.copy(&doc, &[group]), 3);

        let pasted = clipboard.paste(&mut doc);
        // One top-level id: the new group.
        assert_eq!(pasted.len(), 1);
        let new_group = doc.get(pasted[0]).and_then(Layer::as_group).expect("group");
        assert_eq!(new_group.children.len(), 2);
        assert!(!new_group.children.contains(&a));
    }

    #[test]
    fn test_paste_empty_clipboard_is_noop() {
        let mut doc = LayerDocument::new();
        let clipboard = Clipboard::new();
        assert!(clipboard.paste(&mut doc).is_empty());
        assert!(doc.is_empty());
    }
}
