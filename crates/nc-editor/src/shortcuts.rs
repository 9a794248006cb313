//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. What an action
//! does can depend on the current mode: `Confirm` and `Deselect` finish a pen
//! path while one is being drawn.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Tool switching ──
    ToolSelect,
    ToolRectangle,
    ToolCircle,
    ToolText,
    ToolPen,
    ToolConnect,

    // ── Edit ──
    Delete,
    SelectAll,
    Duplicate,
    Group,
    Ungroup,

    // ── View ──
    ZoomIn,
    ZoomOut,

    // ── Z-order ──
    BringToFront,
    SendToBack,

    // ── Modal ──
    /// Enter.
    Confirm,
    /// Escape.
    Deselect,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘; elsewhere `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"g"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, ctrl: bool, shift: bool, alt: bool, meta: bool) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;
        if alt {
            return None;
        }

        if cmd && shift {
            return match key {
                "g" | "G" => Some(ShortcutAction::Ungroup),
                // Shift+= arrives as "+".
                "+" => Some(ShortcutAction::ZoomIn),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "a" | "A" => Some(ShortcutAction::SelectAll),
                "d" | "D" => Some(ShortcutAction::Duplicate),
                "g" | "G" => Some(ShortcutAction::Group),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "]" => Some(ShortcutAction::BringToFront),
                "[" => Some(ShortcutAction::SendToBack),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        match key {
            "v" | "V" => Some(ShortcutAction::ToolSelect),
            "r" | "R" => Some(ShortcutAction::ToolRectangle),
            "o" | "O" => Some(ShortcutAction::ToolCircle),
            "t" | "T" => Some(ShortcutAction::ToolText),
            "p" | "P" => Some(ShortcutAction::ToolPen),
            "c" | "C" => Some(ShortcutAction::ToolConnect),
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "Enter" => Some(ShortcutAction::Confirm),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
