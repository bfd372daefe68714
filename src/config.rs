//! Preview configuration.
//!
//! [`DifficultySettings`] are the values a map ships with, usually read from the map
//! info file. [`PreviewConfig`] holds the viewer's choices, which may override them.

use thiserror::Error;

use crate::spawn::DEFAULT_BEHIND_CAMERA_Z;

/// Spawn related values of one difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultySettings {
    /// Base tempo of the song.
    pub base_bpm: f64,
    /// Note jump speed.
    pub note_jump_speed: f64,
    /// Spawn offset in beats.
    pub spawn_offset: f64,
}

/// Errors of reading or validating a [`PreviewConfig`].
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// The config source could not be parsed.
    #[error("failed to parse preview config: {0}")]
    Parse(String),
    /// A field has a value out of its range.
    #[error("invalid value {value} for `{field}`")]
    InvalidValue {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Viewer settings of a preview.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PreviewConfig {
    /// Overrides the difficulty's note jump speed.
    pub note_jump_speed: Option<f64>,
    /// Overrides the difficulty's spawn offset.
    pub spawn_offset: Option<f64>,
    /// Depth behind the player where objects despawn, in meters. Must not be positive.
    pub behind_camera_z: f64,
    /// Whether to preview the mirrored difficulty.
    pub mirrored: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            note_jump_speed: None,
            spawn_offset: None,
            behind_camera_z: DEFAULT_BEHIND_CAMERA_Z,
            mirrored: false,
        }
    }
}

impl PreviewConfig {
    /// Parses a config from JSON, where every field is optional, and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid JSON, or the error of [`Self::validate`].
    #[cfg(feature = "json")]
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is in its range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-positive or non-finite note jump
    /// speed, a non-finite spawn offset, or a positive or non-finite behind camera depth.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(njs) = self.note_jump_speed.filter(|v| !(v.is_finite() && *v > 0.0)) {
            return Err(ConfigError::InvalidValue {
                field: "note_jump_speed",
                value: njs,
            });
        }
        if let Some(offset) = self.spawn_offset.filter(|v| !v.is_finite()) {
            return Err(ConfigError::InvalidValue {
                field: "spawn_offset",
                value: offset,
            });
        }
        if !(self.behind_camera_z.is_finite() && self.behind_camera_z <= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "behind_camera_z",
                value: self.behind_camera_z,
            });
        }
        Ok(())
    }

    /// Applies the overrides to the values of a difficulty.
    #[must_use]
    pub fn apply(&self, settings: DifficultySettings) -> DifficultySettings {
        DifficultySettings {
            note_jump_speed: self.note_jump_speed.unwrap_or(settings.note_jump_speed),
            spawn_offset: self.spawn_offset.unwrap_or(settings.spawn_offset),
            ..settings
        }
    }
}
