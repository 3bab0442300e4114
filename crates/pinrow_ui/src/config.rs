//! Row configuration.
//!
//! Every option the row recognizes lives in [`RowConfig`], with its default
//! spelled out in [`RowConfig::default`]. Hosts either build one in code or
//! load it once at startup from TOML:
//!
//! ```toml
//! password_count = 6
//! radius = 16.0
//! correct_color = "#FF2ECC71"
//! incorrect_duration_ms = 500
//! ```
//!
//! Missing keys fall back to their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::{RowError, RowResult};
use crate::style::Color;

/// Complete styling and timing configuration of a password row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RowConfig {
    /// Number of indicators (password length).
    pub password_count: usize,
    /// Indicator radius.
    pub radius: f32,
    /// Spacing between two neighbouring indicators.
    pub between_margin: f32,
    /// Color of a filled indicator.
    pub input_color: Color,
    /// Inner color of an empty indicator.
    pub not_input_color: Color,
    /// Ring color of an empty indicator.
    pub outline_color: Color,
    /// Fill color the correct judgement fades to.
    pub correct_color: Color,
    /// Fill color the incorrect judgement fades to.
    pub incorrect_color: Color,
    /// Duration of each of the three bounce legs.
    pub correct_duration_ms: u32,
    /// Duration of the shake.
    pub incorrect_duration_ms: u32,
    /// Duration of color transitions.
    pub color_change_duration_ms: u32,
    /// Delay before a color transition starts moving.
    pub color_change_delay_ms: u32,
    /// Duration of the fill/empty transition of one indicator.
    pub input_and_remove_duration_ms: u32,
    /// How far the bounce rises above the resting position.
    pub correct_top: f32,
    /// How far the bounce dips below the resting position.
    pub correct_bottom: f32,
    /// Peak-to-peak width of the shake.
    pub incorrect_max_width: f32,
    /// Number of half oscillations in one shake.
    pub shake_times: u32,
    /// Ring stroke width.
    pub outline_stroke_width: f32,
    /// Start delay added per indicator index in judgement animations.
    pub judge_stagger_ms: u32,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            password_count: 4,
            radius: 20.0,
            between_margin: 72.0,
            input_color: Color::BLACK,
            not_input_color: Color::WHITE,
            outline_color: Color::GRAY,
            correct_color: Color::GREEN,
            incorrect_color: Color::RED,
            correct_duration_ms: 150,
            incorrect_duration_ms: 400,
            color_change_duration_ms: 200,
            color_change_delay_ms: 100,
            input_and_remove_duration_ms: 200,
            correct_top: 40.0,
            correct_bottom: 15.0,
            incorrect_max_width: 40.0,
            shake_times: 4,
            outline_stroke_width: 4.0,
            judge_stagger_ms: 40,
        }
    }
}

impl RowConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`RowError::ConfigParse`] for malformed TOML or unknown keys,
    /// and [`RowError::InvalidConfig`] when a value fails [`Self::validate`].
    pub fn from_toml_str(text: &str) -> RowResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| RowError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RowError::ConfigRead`] when the file cannot be read, plus
    /// everything [`Self::from_toml_str`] can return.
    pub fn load(path: impl AsRef<Path>) -> RowResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RowError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), count = config.password_count, "loaded row config");
        Ok(config)
    }

    /// Checks that every size is finite and non-negative and that the
    /// shake oscillates at least once.
    ///
    /// # Errors
    ///
    /// Returns [`RowError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> RowResult<()> {
        let sizes = [
            ("radius", self.radius),
            ("between_margin", self.between_margin),
            ("correct_top", self.correct_top),
            ("correct_bottom", self.correct_bottom),
            ("incorrect_max_width", self.incorrect_max_width),
            ("outline_stroke_width", self.outline_stroke_width),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(RowError::InvalidConfig(format!(
                    "{name} must be a finite value >= 0, got {value}"
                )));
            }
        }
        if self.shake_times == 0 {
            return Err(RowError::InvalidConfig("shake_times must be at least 1".to_owned()));
        }
        if i32::try_from(self.password_count).is_err() {
            return Err(RowError::InvalidConfig(format!(
                "password_count {} is too large",
                self.password_count
            )));
        }
        Ok(())
    }

    /// Side length of one indicator's square bounds.
    #[must_use]
    pub fn indicator_size(&self) -> f32 {
        self.radius * 2.0 + self.outline_stroke_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RowConfig::default();
        assert_eq!(config.password_count, 4);
        assert!((config.radius - 20.0).abs() < f32::EPSILON);
        assert!((config.between_margin - 72.0).abs() < f32::EPSILON);
        assert_eq!(config.not_input_color, Color::WHITE);
        assert_eq!(config.incorrect_duration_ms, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = RowConfig::from_toml_str(
            r##"
            password_count = 6
            correct_color = "#112233"
            incorrect_color = 4278190335
            "##,
        )
        .unwrap();

        assert_eq!(config.password_count, 6);
        assert_eq!(config.correct_color, Color::rgb(0x11, 0x22, 0x33));
        assert_eq!(config.incorrect_color, Color::from_argb(0xFF00_00FF));
        assert_eq!(config.input_color, Color::BLACK);
        assert_eq!(config.correct_duration_ms, 150);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = RowConfig::from_toml_str("pasword_count = 3").unwrap_err();
        assert!(matches!(err, RowError::ConfigParse(_)));
    }

    #[test]
    fn test_bad_color_rejected() {
        let err = RowConfig::from_toml_str("input_color = \"#12\"").unwrap_err();
        assert!(matches!(err, RowError::ConfigParse(_)));
    }

    #[test]
    fn test_negative_size_rejected() {
        let err = RowConfig::from_toml_str("radius = -1.0").unwrap_err();
        assert!(matches!(err, RowError::InvalidConfig(msg) if msg.contains("radius")));
    }

    #[test]
    fn test_zero_shake_rejected() {
        let config = RowConfig {
            shake_times: 0,
            ..RowConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = RowConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, RowError::ConfigRead { .. }));
    }

    #[test]
    fn test_indicator_size() {
        assert!((RowConfig::default().indicator_size() - 44.0).abs() < f32::EPSILON);
    }
}
