//! Keyboard shortcut mapping.
//!
//! Single letters switch modes, mirroring the mode buttons in the toolbar.
//! Combos holding Ctrl or ⌘ are left to the browser.

use poly_core::Mode;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SetMode(Mode),
    /// Abandon the gesture in progress (Escape).
    CancelGesture,
}

pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"e"`, `"Escape"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(key: &str, ctrl: bool, meta: bool) -> Option<ShortcutAction> {
        if ctrl || meta {
            return None;
        }
        let action = match key {
            "c" | "C" => ShortcutAction::SetMode(Mode::Create),
            "e" | "E" => ShortcutAction::SetMode(Mode::Edit),
            "h" | "H" => ShortcutAction::SetMode(Mode::Highlight),
            "s" | "S" => ShortcutAction::SetMode(Mode::Split),
            "r" | "R" => ShortcutAction::SetMode(Mode::Rules),
            "Escape" => ShortcutAction::CancelGesture,
            _ => return None,
        };
        Some(action)
    }
}
