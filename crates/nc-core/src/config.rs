//! Tunable canvas constants.
//!
//! Hosts may hand these in as JSON; every field is optional and falls back
//! to the defaults below.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Interaction and creation parameters for a canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Lower zoom clamp. Default: **0.1**.
    pub min_scale: f32,
    /// Upper zoom clamp. Default: **5.0**.
    pub max_scale: f32,
    /// Scale change per wheel delta unit. Default: **0.001**.
    pub zoom_sensitivity: f32,
    /// Screen pixels a pointer must travel before a press becomes a drag.
    pub drag_threshold: f32,
    /// World units separating a text-tool click from a text-box drag.
    pub text_drag_threshold: f32,
    /// World radius around a path's first point that closes it.
    pub pen_close_radius: f32,
    /// Side of a corner resize handle, in screen pixels.
    pub handle_size: f32,

    pub shape_width: f32,
    pub shape_height: f32,
    pub text_width: f32,
    pub text_height: f32,
    /// Floor for the height of a drag-drawn text box.
    pub min_text_box_height: f32,
    pub frame_width: f32,
    pub frame_height: f32,

    pub stack_width: f32,
    pub stack_height: f32,
    pub stack_gap: f32,
    pub stack_padding: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.1,
            max_scale: 5.0,
            zoom_sensitivity: 0.001,
            drag_threshold: 3.0,
            text_drag_threshold: 5.0,
            pen_close_radius: 10.0,
            handle_size: 10.0,
            shape_width: 150.0,
            shape_height: 100.0,
            text_width: 20.0,
            text_height: 30.0,
            min_text_box_height: 30.0,
            frame_width: 400.0,
            frame_height: 300.0,
            stack_width: 200.0,
            stack_height: 200.0,
            stack_gap: 16.0,
            stack_padding: 16.0,
        }
    }
}

impl CanvasConfig {
    /// Parse a (possibly partial) JSON object.
    ///
    /// # Errors
    /// Returns [`ConfigError::Json`] on malformed input and
    /// [`ConfigError::Invalid`] when the zoom limits are unusable.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: CanvasConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(ConfigError::Invalid(format!(
                "zoom limits [{}, {}] are not a positive range",
                self.min_scale, self.max_scale
            )));
        }
        if self.drag_threshold < 0.0 || self.handle_size <= 0.0 {
            return Err(ConfigError::Invalid(
                "thresholds must be non-negative and handles non-empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json(r#"{ "max_scale": 8.0, "stack_gap": 4 }"#).unwrap();
        assert_eq!(config.max_scale, 8.0);
        assert_eq!(config.stack_gap, 4.0);
        assert_eq!(config.min_scale, 0.1);
        assert_eq!(config.shape_width, 150.0);
    }

    #[test]
    fn rejects_inverted_zoom_range() {
        let err = CanvasConfig::from_json(r#"{ "min_scale": 3.0, "max_scale": 2.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = CanvasConfig::from_json("{ max_scale: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
