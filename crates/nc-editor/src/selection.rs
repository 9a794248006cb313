//! The selection set.
//!
//! Every selection change in the editor goes through one of the named
//! operations here, so "never holds a deleted id" and "no duplicates" are
//! kept in one place.

use nc_core::id::NodeId;
use nc_core::scene::Scene;
use smallvec::SmallVec;

/// Ordered set of selected node ids. The first entry is the primary one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: SmallVec<[NodeId; 4]>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.ids
    }

    /// First-selected node, used for handles and the property panel.
    pub fn primary(&self) -> Option<NodeId> {
        self.ids.first().copied()
    }

    /// The single selected node, if exactly one is selected.
    pub fn sole(&self) -> Option<NodeId> {
        match self.ids.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Replace the selection with `{ id }`. Returns `true` if it changed.
    pub fn select_only(&mut self, id: NodeId) -> bool {
        if self.ids.as_slice() == [id] {
            return false;
        }
        self.ids.clear();
        self.ids.push(id);
        true
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: NodeId) {
        if let Some(pos) = self.ids.iter().position(|s| *s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    /// Replace the selection wholesale (marquee, select-all, new nodes).
    pub fn replace_with(&mut self, ids: impl IntoIterator<Item = NodeId>) -> bool {
        let mut next: SmallVec<[NodeId; 4]> = SmallVec::new();
        for id in ids {
            if !next.contains(&id) {
                next.push(id);
            }
        }
        if next == self.ids {
            return false;
        }
        self.ids = next;
        true
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.ids.is_empty();
        self.ids.clear();
        changed
    }

    /// Drop ids that no longer exist in `scene`.
    pub fn prune(&mut self, scene: &Scene) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| scene.contains(*id));
        self.ids.len() != before
    }
}
