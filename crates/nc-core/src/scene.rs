//! The scene graph store.
//!
//! Nodes sit in a petgraph arena with container → child edges; a node's
//! parent is the source of its single incoming edge. Every public mutation
//! leaves the store satisfying the invariants checked by [`Scene::validate`].

use crate::error::SceneError;
use crate::id::{ConnectionId, NodeId};
use crate::layout::apply_auto_layout;
use crate::model::{
    Bounds, CanvasNode, Connection, Layout, LayoutSizing, MIN_NODE_SIZE, NodeKind, ResizeHandle,
    Style, TextAutoResize,
};
use crate::text::TextMeasure;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use std::collections::{HashMap, HashSet};

/// Nodes, hierarchy and connections of one canvas.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    graph: StableDiGraph<CanvasNode, ()>,
    id_index: HashMap<NodeId, NodeIndex>,
    connections: Vec<Connection>,
    next_seq: u64,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Lookup ──────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.id_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_index.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.id_index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&CanvasNode> {
        self.id_index.get(&id).map(|idx| &self.graph[*idx])
    }

    /// Raw mutable access for in-crate passes that uphold the invariants
    /// themselves (layout, arrangement).
    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut CanvasNode> {
        self.id_index
            .get(&id)
            .copied()
            .map(|idx| &mut self.graph[idx])
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> Vec<&CanvasNode> {
        let mut nodes: Vec<&CanvasNode> = self.graph.node_weights().collect();
        nodes.sort_by_key(|n| n.seq);
        nodes
    }

    /// All nodes back to front: ascending `z_index`, ties by insertion.
    pub fn render_order(&self) -> Vec<&CanvasNode> {
        let mut nodes: Vec<&CanvasNode> = self.graph.node_weights().collect();
        nodes.sort_by_key(|n| (n.z_index, n.seq));
        nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    // ─── Hierarchy queries ───────────────────────────────────────────────

    fn parent_index(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph.neighbors_directed(idx, Direction::Incoming).next()
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        let idx = *self.id_index.get(&id)?;
        self.parent_index(idx).map(|p| self.graph[p].id)
    }

    /// Direct children in insertion order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(&idx) = self.id_index.get(&id) else {
            return Vec::new();
        };
        let mut children: Vec<&CanvasNode> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|c| &self.graph[c])
            .collect();
        children.sort_by_key(|n| n.seq);
        children.into_iter().map(|n| n.id).collect()
    }

    /// Every node below `id`, depth first. Excludes `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = self.children(id);
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let mut kids = self.children(next);
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Topmost ancestor of `id`, or `id` itself when it has no parent.
    pub fn root_ancestor(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            current = parent;
        }
        current
    }

    /// Whether `ancestor` sits strictly above `descendant`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        if ancestor == descendant {
            return false;
        }
        let mut current = descendant;
        while let Some(parent) = self.parent_of(current) {
            if parent == ancestor {
                return true;
            }
            current = parent;
        }
        false
    }

    /// Union of the bounds of every existing id.
    pub fn bounds_of(&self, ids: &[NodeId]) -> Option<Bounds> {
        ids.iter()
            .filter_map(|id| self.node(*id))
            .map(|n| n.bounds)
            .reduce(|a, b| a.union(&b))
    }

    // ─── Insertion & removal ─────────────────────────────────────────────

    /// Add a top-level node, assigning its insertion sequence.
    ///
    /// The size is floored at [`MIN_NODE_SIZE`]. Re-inserting an existing id
    /// replaces its data but keeps its place in the hierarchy. A node's kind
    /// is fixed at creation: a replacement of a different kind keeps the old
    /// kind and only takes the other fields.
    pub fn insert(&mut self, mut node: CanvasNode) -> NodeId {
        node.bounds.width = node.bounds.width.max(MIN_NODE_SIZE);
        node.bounds.height = node.bounds.height.max(MIN_NODE_SIZE);
        if let Some(layout) = node.kind.layout_mut() {
            *layout = layout.sanitized();
        }

        let id = node.id;
        if let Some(existing) = self.node_mut(id) {
            log::warn!("insert: replacing existing node {id}");
            node.seq = existing.seq;
            if std::mem::discriminant(&existing.kind) != std::mem::discriminant(&node.kind) {
                log::warn!("insert: {id} keeps its kind");
                node.kind = existing.kind.clone();
            }
            *existing = node;
            return id;
        }

        node.seq = self.next_seq;
        self.next_seq += 1;
        let idx = self.graph.add_node(node);
        self.id_index.insert(id, idx);
        log::trace!("insert {id}");
        id
    }

    /// Insert a node directly under `parent`.
    ///
    /// # Errors
    /// Fails like [`Scene::set_parent`]; the node is not inserted in that case.
    pub fn insert_child(&mut self, node: CanvasNode, parent: NodeId) -> Result<NodeId, SceneError> {
        self.check_parent(parent)?;
        let id = self.insert(node);
        self.set_parent(id, Some(parent))?;
        Ok(id)
    }

    /// Remove nodes with their whole subtrees and every touching connection.
    ///
    /// Surviving stack parents are laid out again. Returns the removed ids;
    /// unknown ids are ignored.
    pub fn remove(&mut self, ids: &[NodeId]) -> Vec<NodeId> {
        let mut doomed: Vec<NodeId> = Vec::new();
        let mut seen: HashSet<NodeId> = HashSet::new();
        for &id in ids {
            if !self.contains(id) || seen.contains(&id) {
                continue;
            }
            for victim in std::iter::once(id).chain(self.descendants(id)) {
                if seen.insert(victim) {
                    doomed.push(victim);
                }
            }
        }

        let mut parents: Vec<NodeId> = Vec::new();
        for &id in &doomed {
            if let Some(parent) = self.parent_of(id)
                && !seen.contains(&parent)
                && !parents.contains(&parent)
            {
                parents.push(parent);
            }
        }

        for id in &doomed {
            if let Some(idx) = self.id_index.remove(id) {
                self.graph.remove_node(idx);
            }
        }
        let before = self.connections.len();
        self.connections
            .retain(|c| !seen.contains(&c.from) && !seen.contains(&c.to));

        if !doomed.is_empty() {
            log::debug!(
                "removed {} node(s), {} connection(s)",
                doomed.len(),
                before - self.connections.len()
            );
        }

        for parent in parents {
            self.relayout(parent);
        }
        doomed
    }

    // ─── Reparenting ─────────────────────────────────────────────────────

    fn check_parent(&self, parent: NodeId) -> Result<(), SceneError> {
        let node = self
            .node(parent)
            .ok_or(SceneError::ParentNotFound(parent))?;
        if !node.is_container() {
            return Err(SceneError::NotAContainer(parent));
        }
        Ok(())
    }

    /// Move `id` under `parent` (or to the top level) without running layout.
    ///
    /// Returns the previous parent.
    ///
    /// # Errors
    /// Rejects missing nodes, missing or non-container parents, self-parenting,
    /// and any parent inside the node's own subtree.
    pub fn attach(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<Option<NodeId>, SceneError> {
        let idx = *self.id_index.get(&id).ok_or(SceneError::NodeNotFound(id))?;
        if let Some(parent) = parent {
            if parent == id {
                return Err(SceneError::SelfParent(id));
            }
            self.check_parent(parent)?;
            if self.is_ancestor_of(id, parent) {
                log::warn!("attach: rejected cycle {id} -> {parent}");
                return Err(SceneError::Cycle { node: id, parent });
            }
        }

        let old_parent = self.parent_index(idx);
        if let Some(old) = old_parent
            && let Some(edge) = self.graph.find_edge(old, idx)
        {
            self.graph.remove_edge(edge);
        }
        if let Some(parent) = parent
            && let Some(&pidx) = self.id_index.get(&parent)
        {
            self.graph.add_edge(pidx, idx, ());
        }
        Ok(old_parent.map(|p| self.graph[p].id))
    }

    /// [`Scene::attach`], then lay out the old and new stack parents.
    ///
    /// # Errors
    /// See [`Scene::attach`].
    pub fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) -> Result<(), SceneError> {
        let old = self.attach(id, parent)?;
        if old == parent {
            return Ok(());
        }
        log::debug!("reparent {id}: {old:?} -> {parent:?}");
        if let Some(old) = old {
            self.relayout(old);
        }
        if let Some(parent) = parent {
            self.relayout(parent);
        }
        Ok(())
    }

    // ─── Geometry ────────────────────────────────────────────────────────

    /// Move nodes and all their descendants rigidly. Each node moves once
    /// even when it is reachable through several of `ids`.
    pub fn translate(&mut self, ids: &[NodeId], dx: f32, dy: f32) {
        let mut moved: HashSet<NodeId> = HashSet::new();
        for &id in ids {
            if !self.contains(id) {
                continue;
            }
            for target in std::iter::once(id).chain(self.descendants(id)) {
                if moved.insert(target)
                    && let Some(node) = self.node_mut(target)
                {
                    node.bounds.x += dx;
                    node.bounds.y += dy;
                }
            }
        }
    }

    /// Move a node's top-left corner, carrying its subtree along.
    pub fn set_position(&mut self, id: NodeId, x: f32, y: f32) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let (dx, dy) = (x - node.bounds.x, y - node.bounds.y);
        let below = self.descendants(id);
        self.translate(&below, dx, dy);
        // Exact assignment keeps repeated layout passes bit-identical.
        if let Some(node) = self.node_mut(id) {
            node.bounds.x = x;
            node.bounds.y = y;
        }
        true
    }

    /// Set a node's size directly, as a property edit.
    ///
    /// Stacks switch to fixed sizing, text switches to a fixed box. The node
    /// (if a stack) and its stack parent are laid out again.
    pub fn set_size(&mut self, id: NodeId, width: f32, height: f32) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        node.bounds.width = width.max(MIN_NODE_SIZE);
        node.bounds.height = height.max(MIN_NODE_SIZE);
        take_ownership_of_size(node);

        self.relayout(id);
        if let Some(parent) = self.parent_of(id) {
            self.relayout(parent);
        }
        true
    }

    /// Drag a corner handle by a world-space delta.
    ///
    /// The opposite corner stays put and both axes floor at
    /// [`MIN_NODE_SIZE`]. A resized stack is laid out again; its parent is
    /// left to the caller once the gesture ends.
    pub fn resize(&mut self, id: NodeId, handle: ResizeHandle, dx: f32, dy: f32) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let b = node.bounds;

        let (x, width) = if handle.moves_west() {
            let width = (b.width - dx).max(MIN_NODE_SIZE);
            (b.right() - width, width)
        } else {
            (b.x, (b.width + dx).max(MIN_NODE_SIZE))
        };
        let (y, height) = if handle.moves_north() {
            let height = (b.height - dy).max(MIN_NODE_SIZE);
            (b.bottom() - height, height)
        } else {
            (b.y, (b.height + dy).max(MIN_NODE_SIZE))
        };

        node.bounds = Bounds::new(x, y, width, height);
        take_ownership_of_size(node);
        log::trace!("resize {id} {handle:?} -> {width}x{height}");

        self.relayout(id);
        true
    }

    // ─── Content & style ─────────────────────────────────────────────────

    /// Edit a node's style. Auto-sized text is measured again when the
    /// font metrics change.
    pub fn set_style(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut Style),
        measure: &dyn TextMeasure,
    ) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let before = node.style.clone();
        edit(&mut node.style);
        if node.style.metrics_differ(&before) {
            self.remeasure(id, measure);
        }
        true
    }

    /// Replace the content of a text node.
    pub fn set_text(&mut self, id: NodeId, text: &str, measure: &dyn TextMeasure) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let NodeKind::Text { content, .. } = &mut node.kind else {
            return false;
        };
        text.clone_into(content);
        self.remeasure(id, measure);
        true
    }

    pub fn set_text_auto_resize(
        &mut self,
        id: NodeId,
        mode: TextAutoResize,
        measure: &dyn TextMeasure,
    ) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let NodeKind::Text { auto_resize, .. } = &mut node.kind else {
            return false;
        };
        *auto_resize = mode;
        self.remeasure(id, measure);
        true
    }

    /// Fit an auto-sized text node to its content. Fixed boxes are left alone.
    fn remeasure(&mut self, id: NodeId, measure: &dyn TextMeasure) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let NodeKind::Text {
            content,
            auto_resize: TextAutoResize::Auto,
        } = &node.kind
        else {
            return;
        };
        let (w, h) = measure.measure(content, &node.style);
        let (w, h) = (w.max(MIN_NODE_SIZE), h.max(MIN_NODE_SIZE));
        if node.bounds.width == w && node.bounds.height == h {
            return;
        }
        node.bounds.width = w;
        node.bounds.height = h;
        if let Some(parent) = self.parent_of(id) {
            self.relayout(parent);
        }
    }

    /// Replace a container's layout settings and lay it out.
    pub fn set_layout(&mut self, id: NodeId, layout: Layout) -> bool {
        let Some(slot) = self.node_mut(id).and_then(|n| n.kind.layout_mut()) else {
            return false;
        };
        *slot = layout.sanitized();
        log::debug!("layout of {id} set to {:?}", slot.mode);
        self.relayout(id);
        true
    }

    // ─── Z-order ─────────────────────────────────────────────────────────

    fn z_range(&self) -> Option<(i32, i32)> {
        self.graph.node_weights().fold(None, |acc, n| match acc {
            None => Some((n.z_index, n.z_index)),
            Some((lo, hi)) => Some((lo.min(n.z_index), hi.max(n.z_index))),
        })
    }

    /// One above every node currently in the scene.
    pub fn next_z_index(&self) -> i32 {
        self.z_range().map_or(1, |(_, hi)| hi + 1)
    }

    pub fn set_z_index(&mut self, id: NodeId, z: i32) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.z_index = z;
                true
            }
            None => false,
        }
    }

    /// Raise every given node to `max(all) + 1`.
    pub fn bring_to_front(&mut self, ids: &[NodeId]) {
        let Some((_, hi)) = self.z_range() else {
            return;
        };
        for &id in ids {
            self.set_z_index(id, hi + 1);
        }
    }

    /// Lower every given node to `min(all) - 1`.
    pub fn send_to_back(&mut self, ids: &[NodeId]) {
        let Some((lo, _)) = self.z_range() else {
            return;
        };
        for &id in ids {
            self.set_z_index(id, lo - 1);
        }
    }

    // ─── Connections ─────────────────────────────────────────────────────

    /// Connect two distinct existing nodes.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Option<ConnectionId> {
        if from == to || !self.contains(from) || !self.contains(to) {
            return None;
        }
        let id = ConnectionId::with_prefix("conn");
        self.connections.push(Connection { id, from, to });
        log::debug!("connect {from} -> {to} as {id}");
        Some(id)
    }

    pub fn disconnect(&mut self, id: ConnectionId) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != id);
        self.connections.len() != before
    }

    // ─── Layout ──────────────────────────────────────────────────────────

    /// Run the auto-layout pass on `id` if it is a stack.
    pub fn relayout(&mut self, id: NodeId) -> bool {
        apply_auto_layout(self, id)
    }

    /// Lay out `id`, then every stack above it, innermost first.
    ///
    /// Plain [`Scene::relayout`] never climbs; this is the opt-in cascade for
    /// nested stacks.
    pub fn relayout_with_ancestors(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(next) = current {
            self.relayout(next);
            current = self.parent_of(next);
        }
    }

    // ─── Validation ──────────────────────────────────────────────────────

    /// Check every structural invariant.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), SceneError> {
        for node in self.graph.node_weights() {
            let id = node.id;
            if self.id_index.get(&id).is_none() {
                return Err(SceneError::InvariantViolation(format!("{id} missing from index")));
            }
            if node.bounds.width < MIN_NODE_SIZE || node.bounds.height < MIN_NODE_SIZE {
                return Err(SceneError::InvariantViolation(format!(
                    "{id} is {}x{}, below the minimum size",
                    node.bounds.width, node.bounds.height
                )));
            }
            let idx = self.id_index[&id];
            if self.graph.neighbors_directed(idx, Direction::Incoming).count() > 1 {
                return Err(SceneError::InvariantViolation(format!("{id} has several parents")));
            }
            if let Some(parent) = self.parent_of(id) {
                if !self.node(parent).is_some_and(CanvasNode::is_container) {
                    return Err(SceneError::NotAContainer(parent));
                }
                let mut seen = HashSet::from([id]);
                let mut current = parent;
                loop {
                    if !seen.insert(current) {
                        return Err(SceneError::Cycle { node: id, parent });
                    }
                    match self.parent_of(current) {
                        Some(p) => current = p,
                        None => break,
                    }
                }
            }
        }
        for c in &self.connections {
            for end in [c.from, c.to] {
                if !self.contains(end) {
                    return Err(SceneError::InvariantViolation(format!(
                        "connection {} references missing node {end}",
                        c.id
                    )));
                }
            }
        }
        Ok(())
    }
}

/// After a manual resize the user owns the box.
fn take_ownership_of_size(node: &mut CanvasNode) {
    match &mut node.kind {
        NodeKind::Text { auto_resize, .. } => *auto_resize = TextAutoResize::Fixed,
        kind => {
            if let Some(layout) = kind.layout_mut()
                && layout.is_stack()
            {
                layout.sizing = LayoutSizing::Fixed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LayoutMode;
    use crate::text::ApproxTextMetrics;
    use pretty_assertions::assert_eq;

    fn rect(scene: &mut Scene, x: f32, y: f32) -> NodeId {
        scene.insert(CanvasNode::new(
            NodeId::with_prefix("rect"),
            NodeKind::Rectangle,
            Bounds::new(x, y, 150.0, 100.0),
        ))
    }

    fn group(scene: &mut Scene, layout: Layout) -> NodeId {
        scene.insert(CanvasNode::new(
            NodeId::with_prefix("group"),
            NodeKind::Group { layout },
            Bounds::new(0.0, 0.0, 400.0, 300.0),
        ))
    }

    #[test]
    fn insert_assigns_sequence_and_floors_size() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0);
        let b = scene.insert(CanvasNode::new(
            NodeId::with_prefix("rect"),
            NodeKind::Rectangle,
            Bounds::new(0.0, 0.0, 2.0, -5.0),
        ));
        assert_eq!(scene.node(a).unwrap().seq, 0);
        assert_eq!(scene.node(b).unwrap().seq, 1);
        assert_eq!(scene.node(b).unwrap().bounds.width, MIN_NODE_SIZE);
        assert_eq!(scene.node(b).unwrap().bounds.height, MIN_NODE_SIZE);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn reinsert_keeps_kind_and_children() {
        let mut scene = Scene::new();
        let g = group(&mut scene, Layout::default());
        let child = rect(&mut scene, 10.0, 10.0);
        scene.set_parent(child, Some(g)).unwrap();

        let same = scene.insert(CanvasNode::new(
            g,
            NodeKind::Rectangle,
            Bounds::new(5.0, 5.0, 300.0, 200.0),
        ));

        assert_eq!(same, g);
        let node = scene.node(g).unwrap();
        assert!(node.is_container());
        assert_eq!(node.seq, 0);
        assert_eq!(node.bounds, Bounds::new(5.0, 5.0, 300.0, 200.0));
        assert_eq!(scene.children(g), vec![child]);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn set_parent_rejects_bad_targets() {
        let mut scene = Scene::new();
        let g = group(&mut scene, Layout::default());
        let inner = group(&mut scene, Layout::default());
        let r = rect(&mut scene, 10.0, 10.0);
        let missing = NodeId::intern("scene_missing");

        assert_eq!(scene.set_parent(r, Some(r)), Err(SceneError::SelfParent(r)));
        assert_eq!(scene.set_parent(g, Some(r)), Err(SceneError::NotAContainer(r)));
        assert_eq!(
            scene.set_parent(r, Some(missing)),
            Err(SceneError::ParentNotFound(missing))
        );
        assert_eq!(
            scene.set_parent(missing, Some(g)),
            Err(SceneError::NodeNotFound(missing))
        );

        scene.set_parent(inner, Some(g)).unwrap();
        assert_eq!(
            scene.set_parent(g, Some(inner)),
            Err(SceneError::Cycle {
                node: g,
                parent: inner
            })
        );
        assert_eq!(scene.parent_of(g), None);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn hierarchy_queries() {
        let mut scene = Scene::new();
        let outer = group(&mut scene, Layout::default());
        let inner = group(&mut scene, Layout::default());
        let leaf = rect(&mut scene, 0.0, 0.0);
        scene.set_parent(inner, Some(outer)).unwrap();
        scene.set_parent(leaf, Some(inner)).unwrap();

        assert_eq!(scene.children(outer), vec![inner]);
        assert_eq!(scene.descendants(outer), vec![inner, leaf]);
        assert_eq!(scene.root_ancestor(leaf), outer);
        assert!(scene.is_ancestor_of(outer, leaf));
        assert!(!scene.is_ancestor_of(leaf, outer));
        assert!(!scene.is_ancestor_of(leaf, leaf));
    }

    #[test]
    fn translate_moves_each_node_once() {
        let mut scene = Scene::new();
        let g = group(&mut scene, Layout::default());
        let r = rect(&mut scene, 10.0, 10.0);
        scene.set_parent(r, Some(g)).unwrap();

        // Both the group and its child are named; the child still moves once.
        scene.translate(&[g, r], 5.0, -5.0);
        assert_eq!(scene.node(r).unwrap().bounds.x, 15.0);
        assert_eq!(scene.node(r).unwrap().bounds.y, 5.0);
        assert_eq!(scene.node(g).unwrap().bounds.x, 5.0);
    }

    #[test]
    fn resize_floors_at_opposite_edge() {
        let mut scene = Scene::new();
        let r = rect(&mut scene, 0.0, 0.0);
        scene.resize(r, ResizeHandle::Nw, 500.0, 500.0);
        let b = scene.node(r).unwrap().bounds;
        assert_eq!(b, Bounds::new(130.0, 80.0, 20.0, 20.0));

        scene.resize(r, ResizeHandle::Se, 30.0, 10.0);
        let b = scene.node(r).unwrap().bounds;
        assert_eq!(b, Bounds::new(130.0, 80.0, 50.0, 30.0));
    }

    #[test]
    fn resize_takes_ownership_of_text_and_stacks() {
        let mut scene = Scene::new();
        let text = scene.insert(CanvasNode::new(
            NodeId::with_prefix("text"),
            NodeKind::Text {
                content: "hi".into(),
                auto_resize: TextAutoResize::Auto,
            },
            Bounds::new(0.0, 0.0, 40.0, 30.0),
        ));
        let stack = group(&mut scene, Layout::stack(LayoutMode::Vertical, 16.0, 16.0));

        scene.resize(text, ResizeHandle::Se, 10.0, 0.0);
        scene.resize(stack, ResizeHandle::Se, 10.0, 0.0);

        assert_eq!(
            scene.node(text).unwrap().kind.text_auto_resize(),
            Some(TextAutoResize::Fixed)
        );
        assert_eq!(
            scene.node(stack).unwrap().kind.layout().unwrap().sizing,
            LayoutSizing::Fixed
        );
    }

    #[test]
    fn remove_cascades_and_relayouts_parent() {
        let mut scene = Scene::new();
        let stack = group(&mut scene, Layout::stack(LayoutMode::Vertical, 10.0, 10.0));
        let inner = group(&mut scene, Layout::default());
        let a = rect(&mut scene, 0.0, 0.0);
        let b = rect(&mut scene, 0.0, 200.0);
        let other = rect(&mut scene, 900.0, 900.0);
        scene.set_parent(inner, Some(stack)).unwrap();
        scene.set_parent(a, Some(inner)).unwrap();
        scene.set_parent(b, Some(stack)).unwrap();
        scene.connect(a, other).unwrap();
        scene.connect(b, other).unwrap();

        let removed = scene.remove(&[inner]);
        assert_eq!(removed, vec![inner, a]);
        assert!(!scene.contains(a));
        assert_eq!(scene.connections().len(), 1);
        assert_eq!(scene.children(stack), vec![b]);
        // b is now first in the stack.
        assert_eq!(scene.node(b).unwrap().bounds.y, scene.node(stack).unwrap().bounds.y + 10.0);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn z_order_spans_whole_scene() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0);
        let b = rect(&mut scene, 0.0, 0.0);
        let c = rect(&mut scene, 0.0, 0.0);
        scene.set_z_index(a, 4);
        scene.set_z_index(b, -2);

        scene.bring_to_front(&[b, c]);
        assert_eq!(scene.node(b).unwrap().z_index, 5);
        assert_eq!(scene.node(c).unwrap().z_index, 5);
        let order: Vec<NodeId> = scene.render_order().iter().map(|n| n.id).collect();
        assert_eq!(order, vec![a, b, c]);

        // The minimum is a's own 4 now that b was raised.
        scene.send_to_back(&[a]);
        assert_eq!(scene.node(a).unwrap().z_index, 3);
        assert_eq!(scene.next_z_index(), 6);
    }

    #[test]
    fn connect_rejects_self_and_missing() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0);
        assert!(scene.connect(a, a).is_none());
        assert!(scene.connect(a, NodeId::intern("scene_nowhere")).is_none());
        let b = rect(&mut scene, 0.0, 0.0);
        let c = scene.connect(a, b).unwrap();
        assert!(scene.disconnect(c));
        assert!(!scene.disconnect(c));
    }

    #[test]
    fn auto_text_follows_content_and_font() {
        let mut scene = Scene::new();
        let t = scene.insert(CanvasNode::new(
            NodeId::with_prefix("text"),
            NodeKind::Text {
                content: String::new(),
                auto_resize: TextAutoResize::Auto,
            },
            Bounds::new(0.0, 0.0, 20.0, 30.0),
        ));
        scene.set_text(t, "hello world", &ApproxTextMetrics);
        let w1 = scene.node(t).unwrap().bounds.width;
        assert!(w1 > 20.0);

        scene.set_style(t, |s| s.font_size = 32.0, &ApproxTextMetrics);
        let b = scene.node(t).unwrap().bounds;
        assert!(b.width > w1);
        assert_eq!(b.height, 48.0);

        scene.set_text_auto_resize(t, TextAutoResize::Fixed, &ApproxTextMetrics);
        scene.set_text(t, "x", &ApproxTextMetrics);
        assert_eq!(scene.node(t).unwrap().bounds, b);
    }

    #[test]
    fn operations_on_missing_ids_are_noops() {
        let mut scene = Scene::new();
        let ghost = NodeId::intern("scene_ghost");
        assert!(!scene.resize(ghost, ResizeHandle::Se, 1.0, 1.0));
        assert!(!scene.set_position(ghost, 1.0, 1.0));
        assert!(!scene.set_layout(ghost, Layout::default()));
        assert!(scene.remove(&[ghost]).is_empty());
        scene.translate(&[ghost], 1.0, 1.0);
        assert!(scene.is_empty());
    }
}
