//! Gesture phases and the commands dispatched to the rendering engine.
//!
//! The gesture tracker produces mode-independent [`GestureCommand`]s. The
//! mode controller resolves each one into exactly one [`Command`], which is
//! what the engine consumes. Commands serialize to JSON as
//! `{"op": "<name>", ...fields}`.

use crate::constraint::LengthConstraint;
use crate::scene::SceneId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// One phase transition of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureCommand {
    /// Press and release without movement (a zero-length gesture).
    Click(Point),
    BeginDrag { origin: Point },
    UpdateDrag { origin: Point, current: Point },
    CommitDrag { origin: Point, current: Point },
    CancelDrag,
    /// Secondary-button press or context menu request.
    ContextAction(Point),
    /// Pointer moved with no gesture in progress.
    Hover(Point),
}

/// A validated, mode-resolved instruction for the rendering engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Command {
    AddPoint {
        position: Point,
    },
    AddLine {
        start: Point,
        end: Point,
        constraint: LengthConstraint,
    },
    BeginDrag {
        origin: Point,
    },
    UpdateDrag {
        origin: Point,
        current: Point,
    },
    /// Abandon the engine's drag state. Sent in every mode whenever a drag
    /// ends without committing, and safe to receive with no drag preview.
    CancelDrag,
    SelectOrMoveNear {
        position: Point,
    },
    MoveSelected {
        delta: Vec2,
    },
    ToggleHighlight {
        position: Point,
    },
    SplitEdgeNear {
        position: Point,
    },
    ShowRules {
        position: Point,
    },
    /// Remove the point (or whole polygon, when its center is hit) nearest
    /// to `position`.
    DeleteNear {
        position: Point,
    },
    /// Close the polygon being built from the points placed so far.
    ClosePolygon {
        position: Point,
    },
    Hover {
        position: Point,
    },
    LoadScene {
        scene: SceneId,
    },
    Redraw,
    NoOp,
}

impl Command {
    /// The `op` tag this command serializes with.
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddPoint { .. } => "addPoint",
            Command::AddLine { .. } => "addLine",
            Command::BeginDrag { .. } => "beginDrag",
            Command::UpdateDrag { .. } => "updateDrag",
            Command::CancelDrag => "cancelDrag",
            Command::SelectOrMoveNear { .. } => "selectOrMoveNear",
            Command::MoveSelected { .. } => "moveSelected",
            Command::ToggleHighlight { .. } => "toggleHighlight",
            Command::SplitEdgeNear { .. } => "splitEdgeNear",
            Command::ShowRules { .. } => "showRules",
            Command::DeleteNear { .. } => "deleteNear",
            Command::ClosePolygon { .. } => "closePolygon",
            Command::Hover { .. } => "hover",
            Command::LoadScene { .. } => "loadScene",
            Command::Redraw => "redraw",
            Command::NoOp => "noOp",
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Command::NoOp)
    }

    /// Serialize to the JSON form handed to the engine.
    pub fn to_json(&self) -> String {
        // Every field is a plain number, bool or string; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"op":"noOp"}"#.to_string())
    }
}
