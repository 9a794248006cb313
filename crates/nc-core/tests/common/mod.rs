//! Shared helpers for `nc-core` integration tests.

#![allow(dead_code)]

use nc_core::{Bounds, CanvasNode, Layout, NodeId, NodeKind, Scene};

/// Route `log` output through the test harness. Honors `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn rect(scene: &mut Scene, x: f32, y: f32, w: f32, h: f32) -> NodeId {
    scene.insert(CanvasNode::new(
        NodeId::with_prefix("rect"),
        NodeKind::Rectangle,
        Bounds::new(x, y, w, h),
    ))
}

pub fn group(scene: &mut Scene, layout: Layout, bounds: Bounds) -> NodeId {
    scene.insert(CanvasNode::new(
        NodeId::with_prefix("group"),
        NodeKind::Group { layout },
        bounds,
    ))
}
