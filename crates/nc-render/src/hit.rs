//! Hit testing: world point → node lookup.
//!
//! Everything here works on world coordinates and axis-aligned boxes;
//! rotation is not modeled. Callers convert pointer positions with
//! [`Viewport::to_world`](nc_core::Viewport::to_world) first.

use nc_core::id::NodeId;
use nc_core::model::{Bounds, CanvasNode, Point, ResizeHandle};
use nc_core::scene::Scene;

/// Find the topmost node containing `point`, or `None` for background.
pub fn hit_test(scene: &Scene, point: Point) -> Option<NodeId> {
    // Last painted = topmost.
    scene
        .render_order()
        .into_iter()
        .rev()
        .find(|n| n.bounds.contains(point))
        .map(|n| n.id)
}

/// Which corner handle of `node`, if any, is under `point`.
///
/// `handle_size` is the side of each square handle in world units, so
/// callers divide their screen-pixel size by the zoom scale.
pub fn hit_test_handle(node: &CanvasNode, point: Point, handle_size: f32) -> Option<ResizeHandle> {
    let half = handle_size / 2.0;
    ResizeHandle::ALL.into_iter().find(|h| {
        let corner = h.position(&node.bounds);
        Bounds::new(corner.x - half, corner.y - half, handle_size, handle_size).contains(point)
    })
}

/// Topmost `group`/`frame` containing `point`, skipping `excluded`.
///
/// Used to decide where a dragged node lands: the node's centre is tested,
/// highest z first, later insertion winning ties.
pub fn container_at(scene: &Scene, point: Point, excluded: &[NodeId]) -> Option<NodeId> {
    scene
        .render_order()
        .into_iter()
        .rev()
        .filter(|n| n.is_container() && !excluded.contains(&n.id))
        .find(|n| n.bounds.contains(point))
        .map(|n| n.id)
}

/// Every node whose centre lies inside `rect` (edges inclusive), in
/// insertion order.
pub fn marquee_select(scene: &Scene, rect: Bounds) -> Vec<NodeId> {
    scene
        .nodes()
        .into_iter()
        .filter(|n| rect.contains(n.center()))
        .map(|n| n.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_core::model::{Layout, NodeKind};
    use pretty_assertions::assert_eq;

    fn add(scene: &mut Scene, kind: NodeKind, b: Bounds, z: i32) -> NodeId {
        scene.insert(CanvasNode::new(NodeId::with_prefix("hit"), kind, b).with_z(z))
    }

    fn frame() -> NodeKind {
        NodeKind::Frame {
            layout: Layout::default(),
        }
    }

    #[test]
    fn topmost_wins_and_edges_count() {
        let mut scene = Scene::new();
        let low = add(&mut scene, NodeKind::Rectangle, Bounds::new(0.0, 0.0, 100.0, 100.0), 1);
        let high = add(&mut scene, NodeKind::Rectangle, Bounds::new(50.0, 50.0, 100.0, 100.0), 2);

        assert_eq!(hit_test(&scene, Point::new(75.0, 75.0)), Some(high));
        assert_eq!(hit_test(&scene, Point::new(10.0, 10.0)), Some(low));
        assert_eq!(hit_test(&scene, Point::new(150.0, 150.0)), Some(high));
        assert_eq!(hit_test(&scene, Point::new(151.0, 150.0)), None);
    }

    #[test]
    fn equal_z_prefers_later_insertion() {
        let mut scene = Scene::new();
        let _first = add(&mut scene, NodeKind::Rectangle, Bounds::new(0.0, 0.0, 50.0, 50.0), 0);
        let second = add(&mut scene, NodeKind::Rectangle, Bounds::new(0.0, 0.0, 50.0, 50.0), 0);
        assert_eq!(hit_test(&scene, Point::new(25.0, 25.0)), Some(second));
    }

    #[test]
    fn handles_are_centered_on_corners() {
        let node = CanvasNode::new(
            NodeId::intern("hit_handles"),
            NodeKind::Rectangle,
            Bounds::new(0.0, 0.0, 100.0, 60.0),
        );
        assert_eq!(hit_test_handle(&node, Point::new(-4.0, 4.0), 10.0), Some(ResizeHandle::Nw));
        assert_eq!(hit_test_handle(&node, Point::new(104.0, 64.0), 10.0), Some(ResizeHandle::Se));
        assert_eq!(hit_test_handle(&node, Point::new(100.0, 0.0), 10.0), Some(ResizeHandle::Ne));
        assert_eq!(hit_test_handle(&node, Point::new(50.0, 30.0), 10.0), None);
        // Tiny handles at high zoom.
        assert_eq!(hit_test_handle(&node, Point::new(3.0, 3.0), 2.0), None);
    }

    #[test]
    fn container_lookup_skips_excluded_and_leaves() {
        let mut scene = Scene::new();
        let back = add(&mut scene, frame(), Bounds::new(0.0, 0.0, 400.0, 300.0), 1);
        let front = add(&mut scene, frame(), Bounds::new(100.0, 100.0, 100.0, 100.0), 5);
        let _rect = add(&mut scene, NodeKind::Rectangle, Bounds::new(0.0, 0.0, 500.0, 500.0), 9);

        let p = Point::new(150.0, 150.0);
        assert_eq!(container_at(&scene, p, &[]), Some(front));
        assert_eq!(container_at(&scene, p, &[front]), Some(back));
        assert_eq!(container_at(&scene, Point::new(450.0, 10.0), &[]), None);
    }

    #[test]
    fn marquee_uses_centres_inclusively() {
        let mut scene = Scene::new();
        // Centre (50, 50): exactly on the marquee edge.
        let edge = add(&mut scene, NodeKind::Rectangle, Bounds::new(0.0, 0.0, 100.0, 100.0), 0);
        // Overlaps the marquee but its centre is outside.
        let _overlap = add(&mut scene, NodeKind::Rectangle, Bounds::new(80.0, 80.0, 200.0, 200.0), 0);
        let inside = add(&mut scene, NodeKind::Circle, Bounds::new(60.0, 60.0, 20.0, 20.0), 0);

        let picked = marquee_select(&scene, Bounds::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(picked, vec![edge, inside]);
    }
}
