//! Fixed-length rule for newly created segments.

use crate::error::EditorError;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Optional fixed-length rule applied to segments drawn in create mode.
///
/// Invariant: while `enabled`, `length` is finite and strictly positive.
/// Construct through [`LengthConstraint::new`] (or call [`validate`] on
/// deserialized values) to keep it.
///
/// [`validate`]: LengthConstraint::validate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthConstraint {
    pub enabled: bool,
    pub length: f64,
}

impl Default for LengthConstraint {
    fn default() -> Self {
        Self {
            enabled: false,
            length: 100.0,
        }
    }
}

impl LengthConstraint {
    pub fn new(enabled: bool, length: f64) -> Result<Self, EditorError> {
        let constraint = Self { enabled, length };
        constraint.validate()?;
        Ok(constraint)
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Check the invariant. A disabled constraint may carry any length.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.enabled && !(self.length.is_finite() && self.length > 0.0) {
            return Err(EditorError::InvalidConfig(format!(
                "segment length must be a positive number, got {}",
                self.length
            )));
        }
        Ok(())
    }

    /// Snap `end` so the segment `origin → end` has the constrained length.
    ///
    /// The direction of the segment is preserved. A zero-length segment has
    /// no direction, so `end` is returned unchanged, as it is when the
    /// constraint is disabled.
    pub fn apply(&self, origin: Point, end: Point) -> Point {
        if !self.enabled {
            return end;
        }
        let dir = end - origin;
        let len = dir.hypot();
        if len == 0.0 || !len.is_finite() {
            return end;
        }
        origin + dir * (self.length / len)
    }
}
