//! Current `3.x` difficulty conversion.
//!
//! The current format stores each category in its own array with short keys, so the
//! conversion is mostly a renaming. Omitted beats are `0`, omitted widths are `1`,
//! omitted multipliers and brightness values are `1.0`.

use serde::Deserialize;

use super::{
    ConvertError, ConvertOutput, ConvertWarning, RawObjectCustom, SchemaKind, code, color4,
    finish, from_json_slice, null_as_default,
};
use crate::map::{
    Difficulty, SchemaVersion,
    custom::{CustomOverride, DifficultyCustomData},
    objects::{
        Arc, Bomb, Bookmark, BoostEvent, Chain, CutDirection, LightEvent, MidAnchorMode, Note,
        NoteColor, RotationEvent, RotationTiming, TempoChange, Wall,
    },
};

const fn one() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDifficulty {
    #[serde(default)]
    version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    bpm_events: Vec<RawBpmEvent>,
    #[serde(default, deserialize_with = "null_as_default")]
    rotation_events: Vec<RawRotationEvent>,
    #[serde(default, deserialize_with = "null_as_default")]
    color_notes: Vec<RawColorNote>,
    #[serde(default, deserialize_with = "null_as_default")]
    bomb_notes: Vec<RawBombNote>,
    #[serde(default, deserialize_with = "null_as_default")]
    obstacles: Vec<RawObstacle>,
    #[serde(default, deserialize_with = "null_as_default")]
    sliders: Vec<RawSlider>,
    #[serde(default, deserialize_with = "null_as_default")]
    burst_sliders: Vec<RawBurstSlider>,
    #[serde(default, deserialize_with = "null_as_default")]
    basic_beatmap_events: Vec<RawBasicEvent>,
    #[serde(default, deserialize_with = "null_as_default")]
    color_boost_beatmap_events: Vec<RawBoostEvent>,
    #[serde(default, deserialize_with = "null_as_default")]
    use_normal_events_as_compatible_events: bool,
    #[serde(default)]
    custom_data: Option<RawDifficultyCustom>,
}

#[derive(Debug, Deserialize)]
struct RawBpmEvent {
    #[serde(default)]
    b: f64,
    #[serde(default)]
    m: f64,
}

#[derive(Debug, Deserialize)]
struct RawRotationEvent {
    #[serde(default)]
    b: f64,
    #[serde(default)]
    e: f64,
    #[serde(default)]
    r: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawColorNote {
    #[serde(default)]
    b: f64,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    c: f64,
    #[serde(default)]
    d: f64,
    #[serde(default)]
    a: f64,
    #[serde(default)]
    custom_data: Option<RawObjectCustom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBombNote {
    #[serde(default)]
    b: f64,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    custom_data: Option<RawObjectCustom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawObstacle {
    #[serde(default)]
    b: f64,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    d: f64,
    #[serde(default = "one")]
    w: f64,
    #[serde(default)]
    h: f64,
    #[serde(default)]
    custom_data: Option<RawObjectCustom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSlider {
    #[serde(default)]
    c: f64,
    #[serde(default)]
    b: f64,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    d: f64,
    #[serde(default = "one")]
    mu: f64,
    #[serde(default)]
    tb: f64,
    #[serde(default)]
    tx: f64,
    #[serde(default)]
    ty: f64,
    #[serde(default)]
    tc: f64,
    #[serde(default = "one")]
    tmu: f64,
    #[serde(default)]
    m: f64,
    #[serde(default)]
    custom_data: Option<RawObjectCustom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBurstSlider {
    #[serde(default)]
    c: f64,
    #[serde(default)]
    b: f64,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    d: f64,
    #[serde(default)]
    tb: f64,
    #[serde(default)]
    tx: f64,
    #[serde(default)]
    ty: f64,
    #[serde(default = "one")]
    sc: f64,
    #[serde(default = "one")]
    s: f64,
    #[serde(default)]
    custom_data: Option<RawObjectCustom>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBasicEvent {
    #[serde(default)]
    b: f64,
    #[serde(default)]
    et: f64,
    #[serde(default)]
    i: f64,
    #[serde(default = "one")]
    f: f64,
    #[serde(default)]
    custom_data: Option<RawObjectCustom>,
}

#[derive(Debug, Deserialize)]
struct RawBoostEvent {
    #[serde(default)]
    b: f64,
    #[serde(default)]
    o: bool,
}

#[derive(Debug, Default, Deserialize)]
struct RawDifficultyCustom {
    #[serde(default, deserialize_with = "null_as_default")]
    bookmarks: Vec<RawBookmark>,
}

#[derive(Debug, Deserialize)]
struct RawBookmark {
    #[serde(default)]
    b: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    n: String,
    #[serde(default)]
    c: Option<Vec<f64>>,
}

fn custom(data: Option<&RawObjectCustom>) -> Option<CustomOverride> {
    data.and_then(RawObjectCustom::to_override)
}

/// Converts a current `3.x` payload.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedPayload`] when the payload cannot be read.
pub fn convert(payload: &[u8]) -> Result<ConvertOutput, ConvertError> {
    let raw: RawDifficulty = from_json_slice(payload)?;
    let mut warnings = Vec::new();
    let version = raw
        .version
        .unwrap_or_else(|| SchemaKind::V3.default_version().to_string());

    let mut notes = Vec::with_capacity(raw.color_notes.len());
    for (index, note) in raw.color_notes.iter().enumerate() {
        let color_code = code(note.c);
        let Some(color) = NoteColor::from_code(color_code) else {
            warnings.push(ConvertWarning::InvalidColor {
                index,
                color: color_code,
            });
            continue;
        };
        notes.push(Note {
            beat: note.b,
            x: code(note.x),
            y: code(note.y),
            color,
            direction: CutDirection(code(note.d)),
            angle_offset: code(note.a),
            custom: custom(note.custom_data.as_ref()),
        });
    }

    let bombs = raw
        .bomb_notes
        .iter()
        .map(|bomb| Bomb {
            beat: bomb.b,
            x: code(bomb.x),
            y: code(bomb.y),
            custom: custom(bomb.custom_data.as_ref()),
        })
        .collect();

    let walls = raw
        .obstacles
        .iter()
        .map(|wall| Wall {
            beat: wall.b,
            duration: wall.d,
            x: code(wall.x),
            y: code(wall.y),
            width: code(wall.w),
            height: code(wall.h),
            custom: custom(wall.custom_data.as_ref()),
        })
        .collect();

    let mut arcs = Vec::with_capacity(raw.sliders.len());
    for (index, arc) in raw.sliders.iter().enumerate() {
        let color_code = code(arc.c);
        let Some(color) = NoteColor::from_code(color_code) else {
            warnings.push(ConvertWarning::InvalidColor {
                index,
                color: color_code,
            });
            continue;
        };
        arcs.push(Arc {
            color,
            beat: arc.b,
            x: code(arc.x),
            y: code(arc.y),
            head_direction: CutDirection(code(arc.d)),
            head_multiplier: arc.mu,
            tail_beat: arc.tb,
            tail_x: code(arc.tx),
            tail_y: code(arc.ty),
            tail_direction: CutDirection(code(arc.tc)),
            tail_multiplier: arc.tmu,
            mid_anchor: MidAnchorMode::from_code(code(arc.m)),
            custom: custom(arc.custom_data.as_ref()),
        });
    }

    let mut chains = Vec::with_capacity(raw.burst_sliders.len());
    for (index, chain) in raw.burst_sliders.iter().enumerate() {
        let color_code = code(chain.c);
        let Some(color) = NoteColor::from_code(color_code) else {
            warnings.push(ConvertWarning::InvalidColor {
                index,
                color: color_code,
            });
            continue;
        };
        chains.push(Chain {
            color,
            beat: chain.b,
            x: code(chain.x),
            y: code(chain.y),
            head_direction: CutDirection(code(chain.d)),
            tail_beat: chain.tb,
            tail_x: code(chain.tx),
            tail_y: code(chain.ty),
            segment_count: code(chain.sc),
            squish: chain.s,
            custom: custom(chain.custom_data.as_ref()),
        });
    }

    let difficulty = Difficulty {
        version: SchemaVersion::new(version),
        notes,
        bombs,
        walls,
        arcs,
        chains,
        light_events: raw
            .basic_beatmap_events
            .iter()
            .map(|event| LightEvent {
                beat: event.b,
                event_type: code(event.et),
                value: code(event.i),
                float_value: event.f,
                custom: custom(event.custom_data.as_ref()),
            })
            .collect(),
        rotation_events: raw
            .rotation_events
            .iter()
            .map(|event| RotationEvent {
                beat: event.b,
                execution: if code(event.e) == 0 {
                    RotationTiming::Early
                } else {
                    RotationTiming::Late
                },
                rotation: event.r,
            })
            .collect(),
        boost_events: raw
            .color_boost_beatmap_events
            .iter()
            .map(|event| BoostEvent {
                beat: event.b,
                on: event.o,
            })
            .collect(),
        tempo_changes: raw
            .bpm_events
            .iter()
            .map(|event| TempoChange {
                beat: event.b,
                bpm: event.m,
            })
            .collect(),
        use_normal_events_as_compatible_events: raw.use_normal_events_as_compatible_events,
        custom_data: DifficultyCustomData {
            bookmarks: raw
                .custom_data
                .map(|data| data.bookmarks)
                .unwrap_or_default()
                .into_iter()
                .map(|bookmark| Bookmark {
                    beat: bookmark.b,
                    name: bookmark.n,
                    color: bookmark.c.as_deref().and_then(color4),
                })
                .collect(),
        },
    };

    Ok(finish(difficulty, warnings))
}
