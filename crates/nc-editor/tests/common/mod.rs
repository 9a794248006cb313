//! Shared helpers for `nc-editor` integration tests.

#![allow(dead_code)]

use nc_core::NodeId;
use nc_editor::{Canvas, CanvasEvent, InputEvent, Modifiers, ToolKind};

/// Route `log` output through the test harness. Honors `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn meta() -> Modifiers {
    Modifiers {
        meta: true,
        ..Modifiers::NONE
    }
}

/// Press and release at a screen point.
pub fn click(canvas: &mut Canvas, x: f32, y: f32) -> Vec<CanvasEvent> {
    let mut events = canvas.handle(&InputEvent::down(x, y));
    events.extend(canvas.handle(&InputEvent::PointerUp { x, y }));
    events
}

/// Press at `from`, move to `to` in one step, release.
pub fn drag(canvas: &mut Canvas, from: (f32, f32), to: (f32, f32)) -> Vec<CanvasEvent> {
    let mut events = canvas.handle(&InputEvent::down(from.0, from.1));
    events.extend(canvas.handle(&InputEvent::PointerMove { x: to.0, y: to.1 }));
    events.extend(canvas.handle(&InputEvent::PointerUp { x: to.0, y: to.1 }));
    events
}

/// Create a default rectangle centred on a screen point and return its id.
pub fn rectangle(canvas: &mut Canvas, x: f32, y: f32) -> NodeId {
    canvas.set_tool(ToolKind::Rectangle);
    let events = click(canvas, x, y);
    events
        .iter()
        .find_map(|e| match e {
            CanvasEvent::NodeCreated(id) => Some(*id),
            _ => None,
        })
        .expect("rectangle tool creates a node")
}
