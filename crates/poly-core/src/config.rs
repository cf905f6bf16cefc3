//! Per-canvas editor configuration.
//!
//! Hosts usually build this from a small JSON object embedded in the page;
//! every key is optional and falls back to the defaults documented below.

use crate::constraint::LengthConstraint;
use crate::error::EditorError;
use crate::mode::Mode;
use serde::{Deserialize, Serialize};

/// Default click/drag tolerance in canvas pixels: a press released within
/// this distance of where it started is a click.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 3.0;

/// Configuration for an `Editor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Mode active when the canvas is created. Default: **create**.
    pub default_mode: Mode,

    /// Distance in canvas pixels the pointer must travel from the press
    /// position before a press becomes a drag. Default: **3.0**
    /// ([`DEFAULT_DRAG_THRESHOLD`]). `0.0` turns any movement into a drag.
    pub drag_threshold: f64,

    /// Emit `hover` commands for pointer movement with no gesture in
    /// progress (only highlight mode maps them to anything). Default: **true**.
    pub forward_hover: bool,

    /// Initial segment length rule. Default: disabled, length 100.
    pub length_constraint: LengthConstraint,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_mode: Mode::Create,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            forward_hover: true,
            length_constraint: LengthConstraint::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: EditorConfig = serde_json::from_str(json)
            .map_err(|e| EditorError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        if !(self.drag_threshold.is_finite() && self.drag_threshold >= 0.0) {
            return Err(EditorError::InvalidConfig(format!(
                "drag threshold must be a non-negative number, got {}",
                self.drag_threshold
            )));
        }
        self.length_constraint.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(EditorConfig::from_json("{}").unwrap(), EditorConfig::default());
    }

    #[test]
    fn partial_object_overrides_named_keys() {
        let config = EditorConfig::from_json(
            r#"{"defaultMode":"edit","dragThreshold":3.0,"lengthConstraint":{"enabled":true}}"#,
        )
        .unwrap();
        assert_eq!(config.default_mode, Mode::Edit);
        assert_eq!(config.drag_threshold, 3.0);
        assert!(config.forward_hover);
        assert!(config.length_constraint.enabled);
        assert_eq!(config.length_constraint.length, 100.0);
    }

    #[test]
    fn default_threshold_tolerates_click_jitter() {
        let config = EditorConfig::default();
        assert_eq!(config.drag_threshold, DEFAULT_DRAG_THRESHOLD);
        let exact = EditorConfig::from_json(r#"{"dragThreshold":0}"#).unwrap();
        assert_eq!(exact.drag_threshold, 0.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            EditorConfig::from_json(r#"{"dragThreshold":-1.0}"#),
            Err(EditorError::InvalidConfig(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"lengthConstraint":{"enabled":true,"length":0.0}}"#),
            Err(EditorError::InvalidConfig(_))
        ));
        assert!(matches!(
            EditorConfig::from_json(r#"{"defaultMode":"paint"}"#),
            Err(EditorError::InvalidConfig(_))
        ));
        assert!(EditorConfig::from_json("not json").is_err());
    }
}
