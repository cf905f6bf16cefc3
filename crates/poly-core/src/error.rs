//! Errors surfaced at the configuration boundary.
//!
//! Pointer input never produces an error: malformed sequences are absorbed
//! by the gesture tracker. Only explicit requests from UI controls can be
//! rejected, and a rejection always leaves the previous value in place.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// A mode-change request named a mode outside the enumerated set.
    #[error("invalid mode `{0}` (expected create, edit, highlight, split or rules)")]
    InvalidMode(String),

    /// A configuration value was rejected; the prior value is retained.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
