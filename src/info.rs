//! The map info file (`Info.dat`).
//!
//! The info file lists the difficulties of a map and carries the values the spawn
//! scheduling needs besides the difficulty file itself: the base tempo, and per
//! difficulty the note jump speed and spawn offset.

use serde::Deserialize;

use crate::{
    config::DifficultySettings,
    convert::{ConvertError, code, from_json_slice, null_as_default},
};

/// Environment used when the info file names none.
pub const DEFAULT_ENVIRONMENT: &str = "DefaultEnvironment";
/// Environment for 360/90 degree characteristics when the info file names none.
pub const DEFAULT_ALL_DIRECTIONS_ENVIRONMENT: &str = "GlassDesertEnvironment";

/// Difficulty rank of a beatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DifficultyRank {
    /// Easy.
    Easy,
    /// Normal.
    Normal,
    /// Hard.
    Hard,
    /// Expert.
    Expert,
    /// Expert+.
    ExpertPlus,
}

impl DifficultyRank {
    /// Parses a difficulty name as written in info files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Easy" => Some(Self::Easy),
            "Normal" => Some(Self::Normal),
            "Hard" => Some(Self::Hard),
            "Expert" => Some(Self::Expert),
            "ExpertPlus" => Some(Self::ExpertPlus),
            _ => None,
        }
    }

    /// Name as written in info files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
            Self::ExpertPlus => "ExpertPlus",
        }
    }

    /// Note jump speed used when a difficulty specifies none.
    #[must_use]
    pub const fn default_note_jump_speed(self) -> f64 {
        match self {
            Self::Easy | Self::Normal | Self::Hard => 10.0,
            Self::Expert => 12.0,
            Self::ExpertPlus => 16.0,
        }
    }
}

/// One difficulty entry of a set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DifficultyInfo {
    /// Difficulty name, such as `ExpertPlus`.
    pub difficulty: String,
    /// Parsed rank, `None` for unknown names.
    pub rank: Option<DifficultyRank>,
    /// Rank number written in the file.
    pub difficulty_rank: i32,
    /// File name of the difficulty payload.
    pub beatmap_filename: String,
    /// Note jump speed, with the rank's default applied for `0`.
    pub note_jump_speed: f64,
    /// Spawn offset in beats.
    pub spawn_offset: f64,
}

/// Difficulties of one characteristic, such as `Standard` or `360Degree`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DifficultySet {
    /// Characteristic name.
    pub characteristic: String,
    /// Difficulties in file order.
    pub difficulties: Vec<DifficultyInfo>,
}

/// Contents of a map info file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapInfo {
    /// Version tag of the info file.
    pub version: String,
    /// Song title.
    pub song_name: String,
    /// Song subtitle.
    pub song_sub_name: String,
    /// Song artist.
    pub song_author_name: String,
    /// Mapper.
    pub level_author_name: String,
    /// Base tempo of the song.
    pub beats_per_minute: f64,
    /// Offset of the song in seconds.
    pub song_time_offset: f64,
    /// Environment for standard characteristics.
    pub environment_name: String,
    /// Environment for 360/90 degree characteristics.
    pub all_directions_environment_name: String,
    /// Difficulty sets in file order.
    pub difficulty_sets: Vec<DifficultySet>,
}

impl MapInfo {
    /// Finds a difficulty by characteristic and difficulty name.
    #[must_use]
    pub fn difficulty(&self, characteristic: &str, difficulty: &str) -> Option<&DifficultyInfo> {
        self.difficulty_sets
            .iter()
            .filter(|set| set.characteristic == characteristic)
            .flat_map(|set| &set.difficulties)
            .find(|info| info.difficulty == difficulty)
    }

    /// Spawn related values of a difficulty.
    #[must_use]
    pub fn settings_for(&self, characteristic: &str, difficulty: &str) -> Option<DifficultySettings> {
        self.difficulty(characteristic, difficulty)
            .map(|info| DifficultySettings {
                base_bpm: self.beats_per_minute,
                note_jump_speed: info.note_jump_speed,
                spawn_offset: info.spawn_offset,
            })
    }

    /// Iterates over every difficulty with its characteristic.
    pub fn difficulties(&self) -> impl Iterator<Item = (&str, &DifficultyInfo)> {
        self.difficulty_sets.iter().flat_map(|set| {
            set.difficulties
                .iter()
                .map(move |info| (set.characteristic.as_str(), info))
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(rename = "_version", default, deserialize_with = "null_as_default")]
    version: String,
    #[serde(rename = "_songName", default, deserialize_with = "null_as_default")]
    song_name: String,
    #[serde(rename = "_songSubName", default, deserialize_with = "null_as_default")]
    song_sub_name: String,
    #[serde(rename = "_songAuthorName", default, deserialize_with = "null_as_default")]
    song_author_name: String,
    #[serde(rename = "_levelAuthorName", default, deserialize_with = "null_as_default")]
    level_author_name: String,
    #[serde(rename = "_beatsPerMinute", default)]
    beats_per_minute: f64,
    #[serde(rename = "_songTimeOffset", default)]
    song_time_offset: f64,
    #[serde(rename = "_environmentName", default)]
    environment_name: Option<String>,
    #[serde(rename = "_allDirectionsEnvironmentName", default)]
    all_directions_environment_name: Option<String>,
    #[serde(
        rename = "_difficultyBeatmapSets",
        default,
        deserialize_with = "null_as_default"
    )]
    difficulty_sets: Vec<RawDifficultySet>,
}

#[derive(Debug, Deserialize)]
struct RawDifficultySet {
    #[serde(
        rename = "_beatmapCharacteristicName",
        default,
        deserialize_with = "null_as_default"
    )]
    characteristic: String,
    #[serde(rename = "_difficultyBeatmaps", default, deserialize_with = "null_as_default")]
    difficulties: Vec<RawDifficultyInfo>,
}

#[derive(Debug, Deserialize)]
struct RawDifficultyInfo {
    #[serde(rename = "_difficulty", default, deserialize_with = "null_as_default")]
    difficulty: String,
    #[serde(rename = "_difficultyRank", default)]
    difficulty_rank: f64,
    #[serde(rename = "_beatmapFilename", default, deserialize_with = "null_as_default")]
    beatmap_filename: String,
    #[serde(rename = "_noteJumpMovementSpeed", default)]
    note_jump_speed: f64,
    #[serde(rename = "_noteJumpStartBeatOffset", default)]
    spawn_offset: f64,
}

fn non_empty_or(name: Option<String>, default: &str) -> String {
    name.filter(|n| !n.is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl From<RawDifficultyInfo> for DifficultyInfo {
    fn from(raw: RawDifficultyInfo) -> Self {
        let rank = DifficultyRank::from_name(&raw.difficulty);
        let note_jump_speed = if raw.note_jump_speed > 0.0 {
            raw.note_jump_speed
        } else {
            rank.unwrap_or(DifficultyRank::ExpertPlus)
                .default_note_jump_speed()
        };
        Self {
            difficulty: raw.difficulty,
            rank,
            difficulty_rank: code(raw.difficulty_rank),
            beatmap_filename: raw.beatmap_filename,
            note_jump_speed,
            spawn_offset: raw.spawn_offset,
        }
    }
}

/// Parses a `2.x` map info file.
///
/// Missing names default to empty strings and missing environments to
/// [`DEFAULT_ENVIRONMENT`] and [`DEFAULT_ALL_DIRECTIONS_ENVIRONMENT`]. A note jump speed
/// of `0` is replaced by the default of the difficulty's rank.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedPayload`] when the payload cannot be read.
pub fn parse_info(payload: &[u8]) -> Result<MapInfo, ConvertError> {
    let raw: RawInfo = from_json_slice(payload)?;
    Ok(MapInfo {
        version: raw.version,
        song_name: raw.song_name,
        song_sub_name: raw.song_sub_name,
        song_author_name: raw.song_author_name,
        level_author_name: raw.level_author_name,
        beats_per_minute: raw.beats_per_minute,
        song_time_offset: raw.song_time_offset,
        environment_name: non_empty_or(raw.environment_name, DEFAULT_ENVIRONMENT),
        all_directions_environment_name: non_empty_or(
            raw.all_directions_environment_name,
            DEFAULT_ALL_DIRECTIONS_ENVIRONMENT,
        ),
        difficulty_sets: raw
            .difficulty_sets
            .into_iter()
            .map(|set| DifficultySet {
                characteristic: set.characteristic,
                difficulties: set.difficulties.into_iter().map(Into::into).collect(),
            })
            .collect(),
    })
}
