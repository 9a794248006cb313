pub mod hit;
pub mod paint;

pub use hit::{container_at, hit_test, hit_test_handle, marquee_select};
pub use paint::{DisplayItem, ItemShape, Label, LabelKind, NodeItem, build_display_list, paint_scene};
