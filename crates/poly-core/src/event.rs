//! Normalized host events consumed by the editor.
//!
//! Positions are canvas-local: the host subtracts the canvas element's page
//! offset before building a [`PointerEvent`].

use crate::constraint::LengthConstraint;
use crate::scene::SceneId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Which phase of a pointer interaction the host observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Click,
    ContextMenu,
    /// Pointer left the canvas or pointer capture was lost.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    #[serde(default)]
    pub button: PointerButton,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, button: PointerButton, x: f64, y: f64) -> Self {
        Self {
            kind,
            button,
            position: Point::new(x, y),
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, PointerButton::Primary, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, PointerButton::Primary, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, PointerButton::Primary, x, y)
    }

    pub fn click(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Click, PointerButton::Primary, x, y)
    }

    pub fn leave(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Leave, PointerButton::Primary, x, y)
    }

    /// Right-button press.
    pub fn secondary_down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, PointerButton::Secondary, x, y)
    }

    pub fn context_menu(x: f64, y: f64) -> Self {
        Self::new(PointerKind::ContextMenu, PointerButton::Secondary, x, y)
    }

    /// Both coordinates are finite numbers.
    pub fn is_well_formed(&self) -> bool {
        self.position.x.is_finite() && self.position.y.is_finite()
    }
}

/// A key press forwarded from the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// `KeyboardEvent.key` value (e.g. `"e"`, `"Escape"`).
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
}

impl KeyPress {
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ctrl: false,
            meta: false,
        }
    }
}

/// Everything the host can feed into an editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    Pointer(PointerEvent),
    Resize { width: f64, height: f64 },
    /// Mode change requested by a UI control, by name.
    SetMode { mode: String },
    /// Length-constraint update from the constraint controls.
    Configure { constraint: LengthConstraint },
    LoadScene { scene: SceneId },
    Key(KeyPress),
}

impl From<PointerEvent> for HostEvent {
    fn from(event: PointerEvent) -> Self {
        HostEvent::Pointer(event)
    }
}
