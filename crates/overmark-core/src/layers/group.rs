//! Group layer.

use super::{LayerId, default_visible};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A composite layer that bundles other layers.
///
/// A group stores the ids of its direct children; the member layers
/// themselves stay in the document arena and keep their own z-order
/// slots. Selection and transforms cascade through the id list, and
/// groups may nest (a child id may name another group).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub(crate) id: LayerId,
    /// Direct children, in the z-order they had when grouped.
    pub children: Vec<LayerId>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub locked: bool,
}

impl Group {
    /// Create a new group over the given child ids.
    pub fn new(children: Vec<LayerId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            children,
            visible: true,
            locked: false,
        }
    }

    pub fn children(&self) -> &[LayerId] {
        &self.children
    }

    pub fn contains_child(&self, id: LayerId) -> bool {
        self.children.contains(&id)
    }
}
