//! Structural commands over a set of nodes: grouping, stacks, duplication
//! and alignment.
//!
//! Every command ignores ids that no longer exist and returns what the
//! caller should select afterwards.

use crate::config::CanvasConfig;
use crate::id::NodeId;
use crate::model::{Bounds, CanvasNode, Layout, LayoutMode, LayoutSizing, NodeKind, Point};
use crate::scene::Scene;
use std::collections::{HashMap, HashSet};

/// Margin between a new group and the nodes it wraps.
pub const GROUP_MARGIN: f32 = 20.0;
/// Margin between a wrapping stack and the nodes it wraps.
pub const STACK_MARGIN: f32 = 16.0;
/// Offset of duplicated nodes from their source.
pub const DUPLICATE_OFFSET: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Existing ids, deduplicated, minus any whose ancestor is also listed.
fn topmost(scene: &Scene, ids: &[NodeId]) -> Vec<NodeId> {
    let listed: HashSet<NodeId> = ids.iter().copied().filter(|id| scene.contains(*id)).collect();
    let mut out = Vec::new();
    for &id in ids {
        if listed.contains(&id)
            && !out.contains(&id)
            && !listed.iter().any(|other| scene.is_ancestor_of(*other, id))
        {
            out.push(id);
        }
    }
    out
}

/// The parent shared by every id, if there is exactly one.
fn common_parent(scene: &Scene, ids: &[NodeId]) -> Option<NodeId> {
    let first = scene.parent_of(*ids.first()?)?;
    ids.iter()
        .all(|id| scene.parent_of(*id) == Some(first))
        .then_some(first)
}

/// Insert `container` around `members`: it takes their common parent (or
/// the top level) and they become its children.
fn wrap(scene: &mut Scene, container: CanvasNode, members: &[NodeId]) -> NodeId {
    let outer = common_parent(scene, members);
    let old_parents: Vec<NodeId> = members.iter().filter_map(|id| scene.parent_of(*id)).collect();

    let id = scene.insert(container);
    for &member in members {
        if let Err(err) = scene.attach(member, Some(id)) {
            log::warn!("wrap: could not move {member} into {id}: {err}");
        }
    }
    if let Some(outer) = outer
        && let Err(err) = scene.attach(id, Some(outer))
    {
        log::warn!("wrap: could not nest {id} under {outer}: {err}");
    }

    scene.relayout(id);
    let mut seen = HashSet::new();
    for parent in outer.into_iter().chain(old_parents) {
        if seen.insert(parent) {
            scene.relayout(parent);
        }
    }
    id
}

/// Group two or more nodes in a free group with a margin around them.
///
/// The group sits just below the lowest member in z-order.
pub fn group(scene: &mut Scene, ids: &[NodeId]) -> Option<NodeId> {
    let members = topmost(scene, ids);
    if members.len() < 2 {
        return None;
    }
    let bounds = scene.bounds_of(&members)?.inflate(GROUP_MARGIN);
    let z = min_z(scene, &members);

    let layout = Layout {
        mode: LayoutMode::None,
        sizing: LayoutSizing::Fixed,
        wrap: false,
        gap: 16.0,
        padding: GROUP_MARGIN,
    };
    let mut node = CanvasNode::new(NodeId::with_prefix("group"), NodeKind::Group { layout }, bounds)
        .with_z(z);
    node.style.corner_radius = 0.0;

    let id = wrap(scene, node, &members);
    log::debug!("grouped {} node(s) into {id}", members.len());
    Some(id)
}

/// Dissolve the given containers. Their children move up to the container's
/// own parent. Returns the released children.
pub fn ungroup(scene: &mut Scene, ids: &[NodeId]) -> Vec<NodeId> {
    let mut released = Vec::new();
    for &id in ids {
        let Some(node) = scene.node(id) else {
            continue;
        };
        if !node.is_container() {
            continue;
        }
        let outer = scene.parent_of(id);
        for child in scene.children(id) {
            if scene.attach(child, outer).is_ok() {
                released.push(child);
            }
        }
        scene.remove(&[id]);
        log::debug!("ungrouped {id}");
    }
    released.retain(|id| scene.contains(*id));
    released
}

/// Wrap nodes in a vertical hugging stack.
pub fn wrap_in_stack(scene: &mut Scene, ids: &[NodeId], config: &CanvasConfig) -> Option<NodeId> {
    let members = topmost(scene, ids);
    if members.is_empty() {
        return None;
    }
    let bounds = scene.bounds_of(&members)?.inflate(STACK_MARGIN);
    let z = min_z(scene, &members);
    let layout = Layout::stack(LayoutMode::Vertical, config.stack_gap, config.stack_padding);
    let node = CanvasNode::new(NodeId::with_prefix("stack"), NodeKind::Group { layout }, bounds)
        .with_z(z);
    Some(wrap(scene, node, &members))
}

/// New empty vertical stack with its top-left corner at `at`.
pub fn create_stack(scene: &mut Scene, at: Point, config: &CanvasConfig) -> NodeId {
    let layout = Layout::stack(LayoutMode::Vertical, config.stack_gap, config.stack_padding);
    let node = CanvasNode::new(
        NodeId::with_prefix("stack"),
        NodeKind::Group { layout },
        Bounds::new(at.x, at.y, config.stack_width, config.stack_height),
    )
    .with_z(scene.next_z_index());
    scene.insert(node)
}

/// New empty free frame with its top-left corner at `at`.
pub fn create_frame(scene: &mut Scene, at: Point, config: &CanvasConfig) -> NodeId {
    let node = CanvasNode::new(
        NodeId::with_prefix("frame"),
        NodeKind::Frame {
            layout: Layout::default(),
        },
        Bounds::new(at.x, at.y, config.frame_width, config.frame_height),
    )
    .with_z(scene.next_z_index());
    scene.insert(node)
}

/// Copy nodes (with their subtrees) offset by [`DUPLICATE_OFFSET`].
///
/// Copies land at the top level above everything else. Returns the copies
/// of the listed nodes, not of their descendants.
pub fn duplicate(scene: &mut Scene, ids: &[NodeId]) -> Vec<NodeId> {
    let sources = topmost(scene, ids);
    let z = scene.next_z_index();
    let mut copies = Vec::new();
    let mut mapping: HashMap<NodeId, NodeId> = HashMap::new();

    for source in sources {
        for original in std::iter::once(source).chain(scene.descendants(source)) {
            let Some(node) = scene.node(original) else {
                continue;
            };
            let mut copy = node.clone();
            copy.id = NodeId::with_prefix(node.kind.name());
            copy.bounds.x += DUPLICATE_OFFSET;
            copy.bounds.y += DUPLICATE_OFFSET;
            copy.z_index = z;
            let parent = scene.parent_of(original).and_then(|p| mapping.get(&p).copied());

            let id = scene.insert(copy);
            mapping.insert(original, id);
            if original == source {
                copies.push(id);
            } else if let Some(parent) = parent
                && let Err(err) = scene.attach(id, Some(parent))
            {
                log::warn!("duplicate: could not nest {id} under {parent}: {err}");
            }
        }
    }
    log::debug!("duplicated {} node(s)", copies.len());
    copies
}

/// Align nodes against each other, or a single node inside its parent's
/// padded box. Returns `false` when there is no reference box.
pub fn align(scene: &mut Scene, ids: &[NodeId], alignment: Alignment) -> bool {
    let targets = topmost(scene, ids);
    let reference = match targets.as_slice() {
        [] => return false,
        [single] => {
            let Some(parent) = scene.parent_of(*single).and_then(|p| scene.node(p)) else {
                return false;
            };
            let pad = parent.kind.layout().map_or(0.0, |l| l.padding);
            let b = parent.bounds;
            Bounds::new(b.x + pad, b.y + pad, b.width - 2.0 * pad, b.height - 2.0 * pad)
        }
        many => match scene.bounds_of(many) {
            Some(b) => b,
            None => return false,
        },
    };
    let center = reference.center();

    for id in targets {
        let Some(node) = scene.node(id) else {
            continue;
        };
        let b = node.bounds;
        let (x, y) = match alignment {
            Alignment::Left => (reference.x, b.y),
            Alignment::Center => (center.x - b.width / 2.0, b.y),
            Alignment::Right => (reference.right() - b.width, b.y),
            Alignment::Top => (b.x, reference.y),
            Alignment::Middle => (b.x, center.y - b.height / 2.0),
            Alignment::Bottom => (b.x, reference.bottom() - b.height),
        };
        scene.set_position(id, x, y);
    }
    true
}

fn min_z(scene: &Scene, ids: &[NodeId]) -> i32 {
    ids.iter()
        .filter_map(|id| scene.node(*id))
        .map(|n| n.z_index)
        .min()
        .unwrap_or(0)
        - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect(scene: &mut Scene, x: f32, y: f32, w: f32, h: f32) -> NodeId {
        scene.insert(CanvasNode::new(
            NodeId::with_prefix("rect"),
            NodeKind::Rectangle,
            Bounds::new(x, y, w, h),
        ))
    }

    #[test]
    fn group_wraps_with_margin_below_members() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 50.0, 50.0);
        let b = rect(&mut scene, 100.0, 100.0, 50.0, 50.0);
        scene.set_z_index(a, 3);
        scene.set_z_index(b, 5);

        let g = group(&mut scene, &[a, b]).unwrap();
        let node = scene.node(g).unwrap();
        assert_eq!(node.bounds, Bounds::new(-20.0, -20.0, 190.0, 190.0));
        assert_eq!(node.z_index, 2);
        assert_eq!(scene.children(g), vec![a, b]);
        assert!(group(&mut scene, &[a]).is_none());
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn group_stays_inside_shared_parent() {
        let mut scene = Scene::new();
        let frame = create_frame(&mut scene, Point::ZERO, &CanvasConfig::default());
        let a = rect(&mut scene, 10.0, 10.0, 30.0, 30.0);
        let b = rect(&mut scene, 60.0, 10.0, 30.0, 30.0);
        scene.attach(a, Some(frame)).unwrap();
        scene.attach(b, Some(frame)).unwrap();

        let g = group(&mut scene, &[a, b]).unwrap();
        assert_eq!(scene.parent_of(g), Some(frame));
        assert_eq!(scene.parent_of(a), Some(g));
    }

    #[test]
    fn group_ignores_missing_and_repeated_ids() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 50.0, 50.0);
        let b = rect(&mut scene, 100.0, 0.0, 50.0, 50.0);
        let missing = NodeId::intern("arrange_missing");

        let g = group(&mut scene, &[a, missing, b, a]).unwrap();
        assert_eq!(scene.children(g), vec![a, b]);
        assert!(!scene.contains(missing));
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn ungroup_releases_children_to_grandparent() {
        let mut scene = Scene::new();
        let frame = create_frame(&mut scene, Point::ZERO, &CanvasConfig::default());
        let a = rect(&mut scene, 10.0, 10.0, 30.0, 30.0);
        let b = rect(&mut scene, 60.0, 10.0, 30.0, 30.0);
        scene.attach(a, Some(frame)).unwrap();
        scene.attach(b, Some(frame)).unwrap();
        let g = group(&mut scene, &[a, b]).unwrap();

        let released = ungroup(&mut scene, &[g]);
        assert_eq!(released, vec![a, b]);
        assert!(!scene.contains(g));
        assert_eq!(scene.parent_of(a), Some(frame));

        let released = ungroup(&mut scene, &[frame]);
        assert_eq!(released, vec![a, b]);
        assert_eq!(scene.parent_of(a), None);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn wrap_in_stack_lays_out_members() {
        let mut scene = Scene::new();
        let config = CanvasConfig::default();
        let a = rect(&mut scene, 100.0, 300.0, 60.0, 40.0);
        let b = rect(&mut scene, 100.0, 100.0, 80.0, 20.0);

        let s = wrap_in_stack(&mut scene, &[a, b], &config).unwrap();
        let sb = scene.node(s).unwrap().bounds;
        assert_eq!((sb.x, sb.y), (84.0, 84.0));
        // b was higher up, so it comes first.
        assert_eq!(scene.node(b).unwrap().bounds.y, 100.0);
        assert_eq!(scene.node(a).unwrap().bounds.y, 100.0 + 20.0 + 16.0);
        assert_eq!(sb.height, 16.0 + 20.0 + 16.0 + 40.0 + 16.0);
        assert_eq!(sb.width, 16.0 + 80.0 + 16.0);
    }

    #[test]
    fn create_stack_and_frame_at_point() {
        let mut scene = Scene::new();
        let config = CanvasConfig::default();
        let s = create_stack(&mut scene, Point::new(5.0, 6.0), &config);
        let f = create_frame(&mut scene, Point::new(-5.0, 0.0), &config);
        assert_eq!(scene.node(s).unwrap().bounds, Bounds::new(5.0, 6.0, 200.0, 200.0));
        assert!(scene.node(s).unwrap().is_stack());
        assert_eq!(scene.node(f).unwrap().bounds, Bounds::new(-5.0, 0.0, 400.0, 300.0));
        assert!(!scene.node(f).unwrap().is_stack());
        assert!(scene.node(f).unwrap().z_index > scene.node(s).unwrap().z_index);
    }

    #[test]
    fn duplicate_copies_subtree_on_top() {
        let mut scene = Scene::new();
        let frame = create_frame(&mut scene, Point::ZERO, &CanvasConfig::default());
        let a = rect(&mut scene, 10.0, 10.0, 30.0, 30.0);
        scene.attach(a, Some(frame)).unwrap();
        let loose = rect(&mut scene, 500.0, 0.0, 30.0, 30.0);
        scene.set_z_index(loose, 9);

        let copies = duplicate(&mut scene, &[frame, a]);
        assert_eq!(copies.len(), 1);
        let copy = copies[0];
        assert_ne!(copy, frame);
        assert_eq!(scene.node(copy).unwrap().bounds.x, 20.0);
        assert_eq!(scene.node(copy).unwrap().z_index, 10);
        assert_eq!(scene.parent_of(copy), None);

        let kids = scene.children(copy);
        assert_eq!(kids.len(), 1);
        assert_eq!(scene.node(kids[0]).unwrap().bounds.x, 30.0);
        assert_eq!(scene.len(), 5);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn align_many_and_single() {
        let mut scene = Scene::new();
        let a = rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
        let b = rect(&mut scene, 80.0, 50.0, 40.0, 40.0);
        assert!(align(&mut scene, &[a, b], Alignment::Right));
        assert_eq!(scene.node(a).unwrap().bounds.x, 100.0);
        assert_eq!(scene.node(b).unwrap().bounds.x, 80.0);

        assert!(align(&mut scene, &[a, b], Alignment::Middle));
        assert_eq!(scene.node(a).unwrap().bounds.y, 35.0);

        // A lone top-level node has nothing to align against.
        assert!(!align(&mut scene, &[a], Alignment::Left));

        let frame = create_frame(&mut scene, Point::new(0.0, 0.0), &CanvasConfig::default());
        scene.attach(a, Some(frame)).unwrap();
        assert!(align(&mut scene, &[a], Alignment::Bottom));
        assert_eq!(scene.node(a).unwrap().bounds.y, 280.0);
    }
}
