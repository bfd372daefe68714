//! Conversion of difficulty files into the canonical [`Difficulty`].
//!
//! Two schema families are supported:
//!
//! - [`v2`]: the legacy format with long underscore prefixed keys such as `_time`, `_notes`.
//! - [`v3`]: the current format with short keys such as `b`, `colorNotes`.
//!
//! The family is selected by the version tag: `2.x` uses the legacy converter, `3.x` the
//! current one, anything else is [`ConvertError::UnsupportedVersion`].
//!
//! Missing fields are filled with defaults instead of failing. Problems which lose
//! information without making the payload unusable are reported as [`ConvertWarning`]s
//! next to the converted difficulty, and logged.
//!
//! # Example
//!
//! ```
//! use beatmap_rs::convert::convert;
//!
//! let payload = br#"{ "_version": "2.0.0", "_notes": [
//!     { "_time": 4, "_lineIndex": 1, "_lineLayer": 0, "_type": 0, "_cutDirection": 1 }
//! ] }"#;
//! let output = convert("2.0.0", payload).unwrap();
//! assert_eq!(output.difficulty.notes.len(), 1);
//! assert!(output.warnings.is_empty());
//! ```

pub mod v2;
pub mod v3;

use log::{debug, warn};
use serde::{Deserialize, Deserializer, de::DeserializeOwned, de::IgnoredAny};
use thiserror::Error;

use crate::map::{Difficulty, custom::CustomOverride};

/// Fatal conversion errors.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    /// The version tag selects no known schema.
    #[error("unsupported difficulty schema version: {0:?}")]
    UnsupportedVersion(String),
    /// The payload is not valid JSON, or a value has the wrong shape.
    #[error("malformed difficulty payload at `{path}`: {message}")]
    MalformedPayload {
        /// Path to the offending value, such as `_notes[3]._time`.
        path: String,
        /// Description of the problem.
        message: String,
    },
}

/// Non-fatal problems found while converting. The affected object is dropped.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Hash)]
pub enum ConvertWarning {
    /// A legacy note has a type which is neither a note nor a bomb.
    #[error("note #{index} has unknown type {note_type}")]
    UnknownNoteType {
        /// Index in the source array.
        index: usize,
        /// The unknown type.
        note_type: i32,
    },
    /// A legacy tempo event has no `_floatValue`.
    #[error("tempo event #{index} has no value")]
    TempoChangeWithoutValue {
        /// Index in the source array.
        index: usize,
    },
    /// A note, arc or chain has a color which is neither red nor blue.
    #[error("object #{index} has invalid color {color}")]
    InvalidColor {
        /// Index in the source array.
        index: usize,
        /// The invalid color code.
        color: i32,
    },
    /// A legacy rotation event has a value outside of the rotation table.
    #[error("rotation event #{index} has unknown value {value}")]
    UnknownRotationValue {
        /// Index in the source array.
        index: usize,
        /// The unknown value.
        value: i32,
    },
}

/// Output of a conversion, with the non-fatal warnings.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ConvertOutput {
    /// The converted difficulty, with every collection sorted.
    pub difficulty: Difficulty,
    /// Warnings found while converting.
    pub warnings: Vec<ConvertWarning>,
}

/// Schema family of a difficulty file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    /// Legacy long key format, versions `2.x`.
    V2,
    /// Current short key format, versions `3.x`.
    V3,
}

impl SchemaKind {
    /// Selects the schema family for a version tag.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::UnsupportedVersion`] for any tag other than `2.x` or `3.x`.
    pub fn resolve(version: &str) -> Result<Self, ConvertError> {
        let version = version.trim();
        if version.starts_with("2.") {
            Ok(Self::V2)
        } else if version.starts_with("3.") {
            Ok(Self::V3)
        } else {
            Err(ConvertError::UnsupportedVersion(version.to_string()))
        }
    }

    /// Version stored in the difficulty when the payload omits its tag.
    #[must_use]
    pub const fn default_version(self) -> &'static str {
        match self {
            Self::V2 => "2.0.0",
            Self::V3 => "3.0.0",
        }
    }
}

/// Converts a difficulty payload of the given schema version.
///
/// # Errors
///
/// Returns [`ConvertError::UnsupportedVersion`] for unknown versions, and
/// [`ConvertError::MalformedPayload`] when the payload cannot be read.
pub fn convert(version: &str, payload: &[u8]) -> Result<ConvertOutput, ConvertError> {
    match SchemaKind::resolve(version)? {
        SchemaKind::V2 => v2::convert(payload),
        SchemaKind::V3 => v3::convert(payload),
    }
}

#[derive(Debug, Deserialize)]
struct VersionHeader {
    version: Option<String>,
    #[serde(rename = "_version")]
    legacy_version: Option<String>,
    #[serde(rename = "_notes")]
    legacy_notes: Option<IgnoredAny>,
    #[serde(rename = "_events")]
    legacy_events: Option<IgnoredAny>,
    #[serde(rename = "_obstacles")]
    legacy_obstacles: Option<IgnoredAny>,
}

/// Reads the version tag of a payload.
///
/// Uses `version`, then `_version`. Without a tag, payloads with legacy collections are
/// `2.0.0` and everything else is `3.0.0`.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedPayload`] when the payload is not a JSON object.
pub fn detect_version(payload: &[u8]) -> Result<String, ConvertError> {
    let header: VersionHeader = from_json_slice(payload)?;
    if let Some(version) = header.version.or(header.legacy_version) {
        return Ok(version);
    }
    let legacy = header.legacy_notes.is_some()
        || header.legacy_events.is_some()
        || header.legacy_obstacles.is_some();
    let kind = if legacy { SchemaKind::V2 } else { SchemaKind::V3 };
    Ok(kind.default_version().to_string())
}

/// Converts a payload, reading the schema version from the payload itself.
///
/// # Errors
///
/// Same as [`convert`].
pub fn convert_auto(payload: &[u8]) -> Result<ConvertOutput, ConvertError> {
    let version = detect_version(payload)?;
    debug!("detected difficulty schema version {version}");
    convert(&version, payload)
}

/// Deserializes JSON, keeping the path to the first error.
pub(crate) fn from_json_slice<T: DeserializeOwned>(payload: &[u8]) -> Result<T, ConvertError> {
    let mut de = serde_json::Deserializer::from_slice(payload);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        ConvertError::MalformedPayload {
            path: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })?;
    de.end().map_err(|e| ConvertError::MalformedPayload {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    Ok(value)
}

/// Treats an explicit `null` like a missing value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Rounds a JSON number to an integer code. Some editors write codes as floats.
pub(crate) fn code(value: f64) -> i32 {
    value.round() as i32
}

/// Custom data of one object, for both schema families.
///
/// Legacy keys are underscore prefixed, the aliases are the current keys.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawObjectCustom {
    #[serde(rename = "_position", alias = "coordinates", default)]
    pub position: Option<Vec<f64>>,
    #[serde(rename = "_color", alias = "color", default)]
    pub color: Option<Vec<f64>>,
    #[serde(rename = "_scale", alias = "size", default)]
    pub size: Option<Vec<f64>>,
    #[serde(rename = "_cutDirection", alias = "angle", default)]
    pub cut_direction: Option<f64>,
    #[serde(rename = "_noteJumpMovementSpeed", alias = "noteJumpMovementSpeed", default)]
    pub note_jump_speed: Option<f64>,
    #[serde(rename = "_noteJumpStartBeatOffset", alias = "noteJumpStartBeatOffset", default)]
    pub spawn_offset: Option<f64>,
    #[serde(rename = "_rotation", default)]
    pub rotation: Option<f64>,
    #[serde(rename = "_lightGradient", default)]
    pub light_gradient: Option<RawLightGradient>,
}

/// Legacy light gradient block.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawLightGradient {
    #[serde(rename = "_duration", default)]
    pub duration: f64,
    #[serde(rename = "_startColor", default, deserialize_with = "null_as_default")]
    pub start_color: Vec<f64>,
    #[serde(rename = "_endColor", default, deserialize_with = "null_as_default")]
    pub end_color: Vec<f64>,
}

/// Reads an RGB or RGBA color. Alpha defaults to `1.0`.
pub(crate) fn color4(values: &[f64]) -> Option<[f64; 4]> {
    match *values {
        [r, g, b] => Some([r, g, b, 1.0]),
        [r, g, b, a, ..] => Some([r, g, b, a]),
        _ => None,
    }
}

fn pair(values: &[f64]) -> Option<[f64; 2]> {
    match *values {
        [x, y, ..] => Some([x, y]),
        _ => None,
    }
}

fn size3(values: &[f64]) -> Option<[f64; 3]> {
    match *values {
        [w] => Some([w, 1.0, 1.0]),
        [w, h] => Some([w, h, 1.0]),
        [w, h, d, ..] => Some([w, h, d]),
        [] => None,
    }
}

impl RawObjectCustom {
    /// Builds the canonical override, or `None` when nothing is overridden.
    pub fn to_override(&self) -> Option<CustomOverride> {
        CustomOverride {
            position: self.position.as_deref().and_then(pair),
            color: self.color.as_deref().and_then(color4),
            size: self.size.as_deref().and_then(size3),
            angle: self.cut_direction,
            note_jump_speed: self.note_jump_speed,
            spawn_offset: self.spawn_offset,
        }
        .into_option()
    }
}

/// Sorts the collections, logs the warnings and wraps the result.
pub(crate) fn finish(mut difficulty: Difficulty, warnings: Vec<ConvertWarning>) -> ConvertOutput {
    difficulty.sort_collections();
    for warning in &warnings {
        warn!("{warning}");
    }
    debug!(
        "converted difficulty {}: {} objects, {} warnings",
        difficulty.version,
        difficulty.object_count(),
        warnings.len()
    );
    ConvertOutput {
        difficulty,
        warnings,
    }
}
