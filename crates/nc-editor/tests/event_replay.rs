//! Property tests: replay random input sequences against a `Canvas`.
//!
//! Whatever order pointer, wheel, and key events arrive in, the scene must
//! stay structurally valid and the selection must only name live nodes.

mod common;

use nc_core::Point;
use nc_editor::{Canvas, InputEvent, Interaction, Modifiers, PointerButton, ToolKind};
use proptest::prelude::*;

fn modifiers() -> impl Strategy<Value = Modifiers> {
    (any::<bool>(), any::<bool>()).prop_map(|(shift, meta)| Modifiers {
        shift,
        meta,
        ..Modifiers::NONE
    })
}

fn button() -> impl Strategy<Value = PointerButton> {
    prop_oneof![
        6 => Just(PointerButton::Primary),
        1 => Just(PointerButton::Middle),
        1 => Just(PointerButton::Secondary),
    ]
}

fn key() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "v", "r", "o", "t", "p", "c", "Delete", "Backspace", "Escape", "Enter", "g", "d", "a",
        "]", "[", "=", "-",
    ])
}

fn event() -> impl Strategy<Value = InputEvent> {
    let coord = -200.0f32..800.0;
    prop_oneof![
        3 => (coord.clone(), coord.clone(), button(), modifiers()).prop_map(|(x, y, button, modifiers)| {
            InputEvent::PointerDown { x, y, button, modifiers }
        }),
        4 => (coord.clone(), coord.clone()).prop_map(|(x, y)| InputEvent::PointerMove { x, y }),
        3 => (coord.clone(), coord.clone()).prop_map(|(x, y)| InputEvent::PointerUp { x, y }),
        1 => (coord.clone(), coord.clone()).prop_map(|(x, y)| InputEvent::DoubleClick { x, y }),
        1 => (coord.clone(), coord, -300.0f32..300.0, -300.0f32..300.0, modifiers()).prop_map(
            |(x, y, dx, dy, modifiers)| InputEvent::Wheel { x, y, dx, dy, modifiers }
        ),
        2 => (key(), modifiers()).prop_map(|(key, modifiers)| InputEvent::Key {
            key: key.to_string(),
            modifiers,
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn invariants_hold_under_any_event_order(events in prop::collection::vec(event(), 1..80)) {
        common::init_logging();
        let mut canvas = Canvas::default();
        canvas.set_view_size(800.0, 600.0);

        for event in &events {
            canvas.handle(event);

            let scene = canvas.scene();
            prop_assert!(scene.validate().is_ok(), "{:?} after {:?}", scene.validate(), event);
            for id in canvas.selection().as_slice() {
                prop_assert!(scene.contains(*id), "selection holds deleted {id:?}");
            }

            let vp = canvas.viewport();
            prop_assert!(vp.scale >= 0.1 && vp.scale <= 5.0);

            match canvas.interaction() {
                Interaction::DrawingPath { .. } => {
                    prop_assert_eq!(canvas.tool(), ToolKind::Pen);
                }
                Interaction::Connecting { .. } => {
                    prop_assert_eq!(canvas.tool(), ToolKind::Connect);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn plain_wheel_pans_by_exact_delta(
        steps in prop::collection::vec((-100.0f32..100.0, -100.0f32..100.0), 1..20),
    ) {
        let mut canvas = Canvas::default();
        let (mut ex, mut ey) = (0.0f32, 0.0f32);
        for (dx, dy) in steps {
            canvas.wheel(Point::ZERO, dx, dy, Modifiers::NONE);
            ex -= dx;
            ey -= dy;
        }
        let offset = canvas.viewport().offset;
        prop_assert!((offset.x - ex).abs() < 1e-3 && (offset.y - ey).abs() < 1e-3);
        prop_assert_eq!(canvas.viewport().scale, 1.0);
    }
}
