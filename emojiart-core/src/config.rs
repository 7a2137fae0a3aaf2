//! Canvas configuration.

use serde::{Deserialize, Serialize};

use crate::{EmojiArtError, EmojiArtResult};

/// Default font size for newly dropped emoji, in points.
pub const DEFAULT_EMOJI_FONT_SIZE: f64 = 40.0;

/// Smallest committed zoom scale.
pub const DEFAULT_MIN_ZOOM: f64 = 0.01;

/// Tunables for the canvas state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Visual font size of a newly dropped emoji, independent of zoom.
    pub default_emoji_font_size: f64,
    /// Lower bound for the committed zoom scale.
    pub min_zoom: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_emoji_font_size: DEFAULT_EMOJI_FONT_SIZE,
            min_zoom: DEFAULT_MIN_ZOOM,
        }
    }
}

impl CanvasConfig {
    /// Check that every value is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns [`EmojiArtError::InvalidOperation`] naming the offending field.
    pub fn validate(&self) -> EmojiArtResult<()> {
        for (name, value) in [
            ("default_emoji_font_size", self.default_emoji_font_size),
            ("min_zoom", self.min_zoom),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(EmojiArtError::InvalidOperation(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CanvasConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.default_emoji_font_size - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        let config = CanvasConfig {
            min_zoom: 0.0,
            ..CanvasConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EmojiArtError::InvalidOperation(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: CanvasConfig =
            serde_json::from_str(r#"{"min_zoom":0.5}"#).expect("deserialize");
        assert!((config.min_zoom - 0.5).abs() < f64::EPSILON);
        assert!((config.default_emoji_font_size - DEFAULT_EMOJI_FONT_SIZE).abs() < f64::EPSILON);
    }
}
