//! Auto-layout for stack containers.
//!
//! A stack is a `group`/`frame` whose layout mode is horizontal or vertical.
//! The pass positions direct children only: nested stacks keep their own
//! layout and a hugging child never pushes its parent to re-run. Callers that
//! need the upward cascade use [`Scene::relayout_with_ancestors`].

use crate::id::NodeId;
use crate::model::{Bounds, Layout, LayoutMode, LayoutSizing};
use crate::scene::Scene;
use std::cmp::Ordering;

/// Smallest size a hugging stack shrinks to.
pub const HUG_MIN_WIDTH: f32 = 100.0;
pub const HUG_MIN_HEIGHT: f32 = 50.0;

/// Lay out the direct children of `container`.
///
/// Returns `false` when there was nothing to do: unknown id, not a stack, or
/// no children. Running it twice in a row gives the same positions.
pub fn apply_auto_layout(scene: &mut Scene, container: NodeId) -> bool {
    let Some(node) = scene.node(container) else {
        return false;
    };
    let Some(&layout) = node.kind.layout() else {
        return false;
    };
    if !layout.is_stack() {
        return false;
    }
    let frame = node.bounds;

    let mut children: Vec<(NodeId, Bounds, u64)> = scene
        .children(container)
        .into_iter()
        .filter_map(|id| scene.node(id).map(|n| (id, n.bounds, n.seq)))
        .collect();
    if children.is_empty() {
        return false;
    }

    let wraps = wraps(&layout);
    children.sort_by(|a, b| order(&layout, wraps, &a.1, &b.1).then(a.2.cmp(&b.2)));

    let (placements, extent) = place(&layout, wraps, frame, &children);
    for (id, x, y) in placements {
        scene.set_position(id, x, y);
    }

    if layout.sizing == LayoutSizing::Hug
        && let Some(node) = scene.node_mut(container)
    {
        node.bounds.width = extent.0.max(HUG_MIN_WIDTH);
        node.bounds.height = extent.1.max(HUG_MIN_HEIGHT);
    }

    log::debug!(
        "auto layout {container}: {} child(ren), {:?}, extent {:.1}x{:.1}",
        children.len(),
        layout.mode,
        extent.0,
        extent.1
    );
    true
}

/// Wrapping only applies to fixed-size horizontal stacks.
fn wraps(layout: &Layout) -> bool {
    layout.wrap && layout.sizing == LayoutSizing::Fixed && layout.mode == LayoutMode::Horizontal
}

/// Sort key on the primary axis.
///
/// A wrapping stack sorts in reading order `(y, x)`, not by x alone, so a
/// child placed on a lower row stays behind one above it even when it sits
/// further left. Other stacks sort by x (or y) alone.
fn order(layout: &Layout, wraps: bool, a: &Bounds, b: &Bounds) -> Ordering {
    match layout.mode {
        LayoutMode::Horizontal if wraps => a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)),
        LayoutMode::Horizontal => a.x.total_cmp(&b.x),
        _ => a.y.total_cmp(&b.y),
    }
}

/// Compute absolute child positions and the `(width, height)` content extent
/// (padding included).
fn place(
    layout: &Layout,
    wraps: bool,
    frame: Bounds,
    children: &[(NodeId, Bounds, u64)],
) -> (Vec<(NodeId, f32, f32)>, (f32, f32)) {
    let pad = layout.padding;
    let gap = layout.gap;

    let mut out = Vec::with_capacity(children.len());
    let mut cx = pad;
    let mut cy = pad;
    let mut row_height = 0.0f32;
    let mut max_w = 0.0f32;
    let mut max_h = 0.0f32;

    for (id, b, _) in children {
        match layout.mode {
            LayoutMode::Horizontal => {
                if wraps && cx > pad && cx + b.width + pad > frame.width {
                    cx = pad;
                    cy += row_height + gap;
                    row_height = 0.0;
                }
                out.push((*id, frame.x + cx, frame.y + cy));
                cx += b.width + gap;
                row_height = row_height.max(b.height);
                max_w = max_w.max(cx - gap + pad);
                max_h = max_h.max(cy + row_height + pad);
            }
            LayoutMode::Vertical | LayoutMode::None => {
                out.push((*id, frame.x + cx, frame.y + cy));
                cy += b.height + gap;
                max_w = max_w.max(cx + b.width + pad);
                max_h = max_h.max(cy - gap + pad);
            }
        }
    }

    (out, (max_w, max_h))
}
