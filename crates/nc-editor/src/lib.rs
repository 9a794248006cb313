pub mod canvas;
pub mod input;
pub mod interaction;
pub mod selection;
pub mod shortcuts;
pub mod tools;

pub use canvas::{Canvas, CanvasEvent, ZOOM_STEP};
pub use input::{InputEvent, Modifiers, PointerButton};
pub use interaction::Interaction;
pub use selection::Selection;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use tools::{LinkTarget, ToolKind};
