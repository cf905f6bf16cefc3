//! Interaction modes.

use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The active interaction behavior. Exactly one mode is active per canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Place points and draw segments.
    #[default]
    Create,
    /// Select, move and delete existing geometry.
    Edit,
    /// Toggle highlight on edges; hover drives tooltips.
    Highlight,
    /// Insert a point in the middle of the clicked edge.
    Split,
    /// Read-only inspection of length rules.
    Rules,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Create,
        Mode::Edit,
        Mode::Highlight,
        Mode::Split,
        Mode::Rules,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Create => "create",
            Mode::Edit => "edit",
            Mode::Highlight => "highlight",
            Mode::Split => "split",
            Mode::Rules => "rules",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| EditorError::InvalidMode(s.to_string()))
    }
}
