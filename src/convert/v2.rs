//! Legacy `2.x` difficulty conversion.
//!
//! # Rules
//!
//! - Notes of `_type` `0` and `1` are color notes, `3` is a bomb, `2` is an unused type
//!   which is dropped silently. Other types are dropped with a warning.
//! - A note with a custom `_cutDirection` keeps that angle as an override, and its
//!   direction becomes down unless it is a dot note.
//! - Walls of `_type` `0` are full height, mapping-extension types (`>= 1000`) carry a
//!   precise height, everything else is a crouch wall.
//! - Events of `_type` `14` and `15` are lane rotations, `5` switches the boost palette
//!   and `100` changes the tempo. Everything else is a lighting event.
//! - A `_lightGradient` on a lighting event expands into two events at the start and the
//!   end of the gradient.

use serde::Deserialize;

use super::{
    ConvertError, ConvertOutput, ConvertWarning, RawObjectCustom, SchemaKind, code, color4,
    finish, from_json_slice, null_as_default,
};
use crate::map::{
    Difficulty, SchemaVersion,
    custom::CustomOverride,
    objects::{
        Arc, Bomb, Bookmark, BoostEvent, CutDirection, LightEvent, MidAnchorMode, Note,
        NoteColor, RotationEvent, RotationTiming, TempoChange, Wall,
    },
    precision,
};

/// Lane rotation in degrees for legacy rotation values `0..=7`.
const ROTATION_TABLE: [f64; 8] = [-60.0, -45.0, -30.0, -15.0, 15.0, 30.0, 45.0, 60.0];

const BOOST_EVENT: i32 = 5;
const EARLY_ROTATION_EVENT: i32 = 14;
const LATE_ROTATION_EVENT: i32 = 15;
const TEMPO_EVENT: i32 = 100;

const RED_NOTE: i32 = 0;
const BLUE_NOTE: i32 = 1;
const UNUSED_NOTE: i32 = 2;
const BOMB_NOTE: i32 = 3;

#[derive(Debug, Deserialize)]
struct RawDifficulty {
    #[serde(rename = "_version", default)]
    version: Option<String>,
    #[serde(rename = "_notes", default, deserialize_with = "null_as_default")]
    notes: Vec<RawNote>,
    #[serde(rename = "_obstacles", default, deserialize_with = "null_as_default")]
    obstacles: Vec<RawObstacle>,
    #[serde(rename = "_events", default, deserialize_with = "null_as_default")]
    events: Vec<RawEvent>,
    #[serde(rename = "_sliders", default, deserialize_with = "null_as_default")]
    sliders: Vec<RawSlider>,
    #[serde(
        rename = "_useNormalEventsAsCompatibleEvents",
        default,
        deserialize_with = "null_as_default"
    )]
    use_normal_events_as_compatible_events: bool,
    #[serde(rename = "_customData", default)]
    custom_data: Option<RawDifficultyCustom>,
}

#[derive(Debug, Deserialize)]
struct RawNote {
    #[serde(rename = "_time")]
    time: f64,
    #[serde(rename = "_lineIndex", default)]
    line_index: f64,
    #[serde(rename = "_lineLayer", default)]
    line_layer: f64,
    #[serde(rename = "_type", default)]
    note_type: f64,
    #[serde(rename = "_cutDirection", default)]
    cut_direction: f64,
    #[serde(rename = "_customData", default)]
    custom_data: Option<RawObjectCustom>,
}

const fn one() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct RawObstacle {
    #[serde(rename = "_time")]
    time: f64,
    #[serde(rename = "_lineIndex", default)]
    line_index: f64,
    #[serde(rename = "_type", default)]
    obstacle_type: f64,
    #[serde(rename = "_duration", default)]
    duration: f64,
    #[serde(rename = "_width", default = "one")]
    width: f64,
    #[serde(rename = "_customData", default)]
    custom_data: Option<RawObjectCustom>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "_time")]
    time: f64,
    #[serde(rename = "_type", default)]
    event_type: f64,
    #[serde(rename = "_value", default)]
    value: f64,
    #[serde(rename = "_floatValue", default)]
    float_value: Option<f64>,
    #[serde(rename = "_customData", default)]
    custom_data: Option<RawObjectCustom>,
}

#[derive(Debug, Deserialize)]
struct RawSlider {
    #[serde(rename = "_colorType", default)]
    color: f64,
    #[serde(rename = "_time")]
    time: f64,
    #[serde(rename = "_headLineIndex", default)]
    head_line_index: f64,
    #[serde(rename = "_headLineLayer", default)]
    head_line_layer: f64,
    #[serde(rename = "_headCutDirection", default)]
    head_cut_direction: f64,
    #[serde(rename = "_headControlPointLengthMultiplier", default = "one")]
    head_multiplier: f64,
    #[serde(rename = "_tailTime", default)]
    tail_time: f64,
    #[serde(rename = "_tailLineIndex", default)]
    tail_line_index: f64,
    #[serde(rename = "_tailLineLayer", default)]
    tail_line_layer: f64,
    #[serde(rename = "_tailCutDirection", default)]
    tail_cut_direction: f64,
    #[serde(rename = "_tailControlPointLengthMultiplier", default = "one")]
    tail_multiplier: f64,
    #[serde(rename = "_sliderMidAnchorMode", default)]
    mid_anchor: f64,
    #[serde(rename = "_customData", default)]
    custom_data: Option<RawObjectCustom>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDifficultyCustom {
    #[serde(rename = "_bookmarks", default, deserialize_with = "null_as_default")]
    bookmarks: Vec<RawBookmark>,
    #[serde(
        rename = "_BPMChanges",
        alias = "_bpmChanges",
        default,
        deserialize_with = "null_as_default"
    )]
    tempo_changes: Vec<RawTempoChange>,
}

#[derive(Debug, Deserialize)]
struct RawBookmark {
    #[serde(rename = "_time", default)]
    time: f64,
    #[serde(rename = "_name", default, deserialize_with = "null_as_default")]
    name: String,
    #[serde(rename = "_color", default)]
    color: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct RawTempoChange {
    #[serde(rename = "_time", default)]
    time: f64,
    #[serde(rename = "_BPM", alias = "_bpm", default)]
    bpm: f64,
}

/// Converts a legacy `2.x` payload.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedPayload`] when the payload cannot be read.
pub fn convert(payload: &[u8]) -> Result<ConvertOutput, ConvertError> {
    let raw: RawDifficulty = from_json_slice(payload)?;
    let mut warnings = Vec::new();
    let version = raw
        .version
        .unwrap_or_else(|| SchemaKind::V2.default_version().to_string());
    let mut difficulty = Difficulty {
        version: SchemaVersion::new(version),
        use_normal_events_as_compatible_events: raw.use_normal_events_as_compatible_events,
        ..Difficulty::default()
    };

    for (index, note) in raw.notes.iter().enumerate() {
        convert_note(index, note, &mut difficulty, &mut warnings);
    }
    difficulty.walls = raw.obstacles.iter().map(convert_obstacle).collect();
    for (index, event) in raw.events.iter().enumerate() {
        convert_event(index, event, &mut difficulty, &mut warnings);
    }
    for (index, slider) in raw.sliders.iter().enumerate() {
        match convert_slider(slider) {
            Ok(arc) => difficulty.arcs.push(arc),
            Err(color) => warnings.push(ConvertWarning::InvalidColor { index, color }),
        }
    }
    if let Some(custom) = raw.custom_data {
        difficulty.custom_data.bookmarks = custom
            .bookmarks
            .into_iter()
            .map(|bookmark| Bookmark {
                beat: bookmark.time,
                name: bookmark.name,
                color: bookmark.color.as_deref().and_then(color4),
            })
            .collect();
        difficulty
            .tempo_changes
            .extend(custom.tempo_changes.iter().map(|change| TempoChange {
                beat: change.time,
                bpm: change.bpm,
            }));
    }

    Ok(finish(difficulty, warnings))
}

fn convert_note(
    index: usize,
    note: &RawNote,
    difficulty: &mut Difficulty,
    warnings: &mut Vec<ConvertWarning>,
) {
    let custom = note.custom_data.as_ref().and_then(RawObjectCustom::to_override);
    let x = code(note.line_index);
    let y = code(note.line_layer);
    let color = match code(note.note_type) {
        RED_NOTE => NoteColor::Red,
        BLUE_NOTE => NoteColor::Blue,
        BOMB_NOTE => {
            difficulty.bombs.push(Bomb {
                beat: note.time,
                x,
                y,
                custom,
            });
            return;
        }
        UNUSED_NOTE => return,
        other => {
            warnings.push(ConvertWarning::UnknownNoteType {
                index,
                note_type: other,
            });
            return;
        }
    };
    let raw_direction = CutDirection(code(note.cut_direction));
    let has_custom_angle = custom.as_ref().is_some_and(|c| c.angle.is_some());
    let direction = if has_custom_angle && !raw_direction.is_dot() {
        CutDirection::DOWN
    } else {
        raw_direction
    };
    difficulty.notes.push(Note {
        beat: note.time,
        x,
        y,
        color,
        direction,
        angle_offset: 0,
        custom,
    });
}

fn convert_obstacle(obstacle: &RawObstacle) -> Wall {
    let obstacle_type = code(obstacle.obstacle_type);
    let (y, height) = match obstacle_type {
        0 => (0, 5),
        t if t >= precision::PRECISION_OFFSET => precision::decode_legacy_wall_type(t)
            .map_or((0, 5), |placement| {
                (placement.encoded_offset(), placement.encoded_height())
            }),
        _ => (2, 3),
    };
    Wall {
        beat: obstacle.time,
        duration: obstacle.duration,
        x: code(obstacle.line_index),
        y,
        width: code(obstacle.width),
        height,
        custom: obstacle
            .custom_data
            .as_ref()
            .and_then(RawObjectCustom::to_override),
    }
}

fn legacy_rotation(value: i32) -> Option<f64> {
    if value >= precision::PRECISION_OFFSET {
        return Some(f64::from(value - 1360));
    }
    usize::try_from(value)
        .ok()
        .and_then(|i| ROTATION_TABLE.get(i))
        .copied()
}

/// The transition variant of a light value, used at the end of a gradient.
const fn transition_value(value: i32) -> i32 {
    match value {
        1..=4 => 4,
        5..=8 => 8,
        9..=12 => 12,
        other => other,
    }
}

fn convert_event(
    index: usize,
    event: &RawEvent,
    difficulty: &mut Difficulty,
    warnings: &mut Vec<ConvertWarning>,
) {
    let event_type = code(event.event_type);
    let value = code(event.value);
    match event_type {
        EARLY_ROTATION_EVENT | LATE_ROTATION_EVENT => {
            let execution = if event_type == EARLY_ROTATION_EVENT {
                RotationTiming::Early
            } else {
                RotationTiming::Late
            };
            let custom_rotation = event.custom_data.as_ref().and_then(|c| c.rotation);
            let Some(rotation) = custom_rotation.or_else(|| legacy_rotation(value)) else {
                warnings.push(ConvertWarning::UnknownRotationValue { index, value });
                return;
            };
            difficulty.rotation_events.push(RotationEvent {
                beat: event.time,
                execution,
                rotation,
            });
        }
        BOOST_EVENT => difficulty.boost_events.push(BoostEvent {
            beat: event.time,
            on: value > 0,
        }),
        TEMPO_EVENT => {
            let Some(bpm) = event.float_value else {
                warnings.push(ConvertWarning::TempoChangeWithoutValue { index });
                return;
            };
            difficulty.tempo_changes.push(TempoChange {
                beat: event.time,
                bpm,
            });
        }
        _ => push_light_events(event, event_type, value, difficulty),
    }
}

fn push_light_events(event: &RawEvent, event_type: i32, value: i32, difficulty: &mut Difficulty) {
    let float_value = event.float_value.unwrap_or(1.0);
    let custom = event.custom_data.as_ref();
    let Some(gradient) = custom.and_then(|c| c.light_gradient.as_ref()) else {
        difficulty.light_events.push(LightEvent {
            beat: event.time,
            event_type,
            value,
            float_value,
            custom: custom.and_then(RawObjectCustom::to_override),
        });
        return;
    };
    let with_color = |color: &[f64]| {
        CustomOverride {
            color: color4(color),
            ..CustomOverride::default()
        }
        .into_option()
    };
    difficulty.light_events.push(LightEvent {
        beat: event.time,
        event_type,
        value,
        float_value,
        custom: with_color(&gradient.start_color),
    });
    difficulty.light_events.push(LightEvent {
        beat: event.time + gradient.duration,
        event_type,
        value: transition_value(value),
        float_value,
        custom: with_color(&gradient.end_color),
    });
}

/// Converts a slider, or returns its invalid color code.
fn convert_slider(slider: &RawSlider) -> Result<Arc, i32> {
    let color_code = code(slider.color);
    let color = NoteColor::from_code(color_code).ok_or(color_code)?;
    Ok(Arc {
        color,
        beat: slider.time,
        x: code(slider.head_line_index),
        y: code(slider.head_line_layer),
        head_direction: CutDirection(code(slider.head_cut_direction)),
        head_multiplier: slider.head_multiplier,
        tail_beat: slider.tail_time,
        tail_x: code(slider.tail_line_index),
        tail_y: code(slider.tail_line_layer),
        tail_direction: CutDirection(code(slider.tail_cut_direction)),
        tail_multiplier: slider.tail_multiplier,
        mid_anchor: MidAnchorMode::from_code(code(slider.mid_anchor)),
        custom: slider
            .custom_data
            .as_ref()
            .and_then(RawObjectCustom::to_override),
    })
}
