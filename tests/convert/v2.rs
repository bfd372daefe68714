use beatmap_rs::{
    convert::{ConvertError, ConvertWarning, convert, detect_version},
    map::prelude::*,
};
use pretty_assertions::assert_eq;

use super::{LEGACY_EXPERT, convert_fixture};

#[test]
fn test_legacy_fixture_is_sorted_and_complete() {
    let output = convert_fixture(LEGACY_EXPERT);
    let difficulty = &output.difficulty;
    assert_eq!(difficulty.version.as_str(), "2.2.0");
    assert_eq!(difficulty.version.major(), Some(2));
    assert!(difficulty.is_sorted());

    let beats: Vec<_> = difficulty.notes.iter().map(|n| n.beat).collect();
    assert_eq!(beats, vec![4.0, 8.0, 10.0]);
    assert_eq!(difficulty.notes[0].color, NoteColor::Red);
    assert_eq!(difficulty.notes[0].direction, CutDirection(2));
    assert_eq!(difficulty.notes[1].color, NoteColor::Blue);

    assert_eq!(
        difficulty.bombs,
        vec![Bomb {
            beat: 6.0,
            x: 0,
            y: 2,
            custom: None,
        }]
    );
}

#[test]
fn test_legacy_warnings_keep_source_indices() {
    let output = convert_fixture(LEGACY_EXPERT);
    assert_eq!(
        output.warnings,
        vec![
            ConvertWarning::UnknownNoteType {
                index: 4,
                note_type: 9,
            },
            ConvertWarning::TempoChangeWithoutValue { index: 3 },
            ConvertWarning::UnknownRotationValue {
                index: 5,
                value: 11,
            },
        ]
    );
}

#[test]
fn test_custom_angle_forces_down_direction() {
    let output = convert_fixture(LEGACY_EXPERT);
    let note = &output.difficulty.notes[2];
    assert_eq!(note.direction, CutDirection::DOWN);
    let custom = note.custom.as_ref().expect("note has an override");
    assert_eq!(custom.angle, Some(45.0));
    assert_eq!(custom.note_jump_speed, Some(20.0));

    let dot = convert(
        "2.0.0",
        br#"{"_notes":[{"_time":1,"_type":0,"_cutDirection":8,"_customData":{"_cutDirection":30}}]}"#,
    )
    .expect("must be converted");
    assert_eq!(dot.difficulty.notes[0].direction, CutDirection::DOT);
}

#[test]
fn test_legacy_walls() {
    let output = convert_fixture(LEGACY_EXPERT);
    assert_eq!(
        output.difficulty.walls,
        vec![
            Wall {
                beat: 10.0,
                duration: 5.0,
                x: 3,
                y: 0,
                width: 1,
                height: 5,
                custom: None,
            },
            Wall {
                beat: 12.0,
                duration: 1.0,
                x: 0,
                y: 2,
                width: 2,
                height: 3,
                custom: None,
            },
        ]
    );
}

#[test]
fn test_legacy_events_are_split_by_type() {
    let output = convert_fixture(LEGACY_EXPERT);
    let difficulty = &output.difficulty;

    assert_eq!(
        difficulty.boost_events,
        vec![
            BoostEvent { beat: 0.0, on: true },
            BoostEvent {
                beat: 20.0,
                on: false,
            },
        ]
    );
    assert_eq!(
        difficulty.tempo_changes,
        vec![TempoChange {
            beat: 4.0,
            bpm: 60.0,
        }]
    );
    assert_eq!(
        difficulty.rotation_events,
        vec![RotationEvent {
            beat: 6.0,
            execution: RotationTiming::Early,
            rotation: -30.0,
        }]
    );
    assert_eq!(
        difficulty.custom_data.bookmarks,
        vec![Bookmark {
            beat: 4.0,
            name: "drop".to_string(),
            color: Some([1.0, 1.0, 0.0, 1.0]),
        }]
    );
}

#[test]
fn test_light_gradient_expands_into_two_events() {
    let output = convert_fixture(LEGACY_EXPERT);
    let lights = &output.difficulty.light_events;
    assert_eq!(lights.len(), 3);

    assert_eq!(lights[0].beat, 2.0);
    assert_eq!(lights[0].float_value, 0.5);
    assert_eq!(lights[0].custom, None);

    assert_eq!(lights[1].beat, 16.0);
    assert_eq!(lights[1].event_type, 4);
    assert_eq!(lights[1].value, 5);
    assert_eq!(
        lights[1].custom.as_ref().and_then(|c| c.color),
        Some([1.0, 0.0, 0.0, 1.0])
    );

    assert_eq!(lights[2].beat, 18.0);
    assert_eq!(lights[2].value, 8);
    assert_eq!(
        lights[2].custom.as_ref().and_then(|c| c.color),
        Some([0.0, 0.0, 1.0, 0.5])
    );
}

#[test]
fn test_editor_tempo_changes_merge_into_tempo_list() {
    let output = convert(
        "2.5.0",
        br#"{
            "_events": [{ "_time": 8, "_type": 100, "_value": 0, "_floatValue": 150 }],
            "_customData": { "_BPMChanges": [{ "_time": 2, "_BPM": 90 }] }
        }"#,
    )
    .expect("must be converted");
    let beats: Vec<_> = output
        .difficulty
        .tempo_changes
        .iter()
        .map(|c| (c.beat, c.bpm))
        .collect();
    assert_eq!(beats, vec![(2.0, 90.0), (8.0, 150.0)]);
}

#[test]
fn test_version_detection() {
    assert_eq!(detect_version(LEGACY_EXPERT), Ok("2.2.0".to_string()));
    assert_eq!(detect_version(br#"{"_notes":[]}"#), Ok("2.0.0".to_string()));
    assert_eq!(detect_version(b"{}"), Ok("3.0.0".to_string()));
    assert!(matches!(
        detect_version(b"[1, 2]"),
        Err(ConvertError::MalformedPayload { .. })
    ));
}

#[test]
fn test_malformed_payload_reports_path() {
    let err = convert("2.0.0", br#"{"_notes":[{"_time":1},{"_time":"soon"}]}"#)
        .expect_err("must be rejected");
    let ConvertError::MalformedPayload { path, .. } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(path, "_notes[1]._time");
}

#[test]
fn test_omitted_version_stays_in_the_parsed_family() {
    let legacy = convert("2.0.0", br#"{"_notes":[]}"#).expect("must be converted");
    assert_eq!(legacy.difficulty.version.as_str(), "2.0.0");
    let current = convert("3.0.0", br#"{"colorNotes":[]}"#).expect("must be converted");
    assert_eq!(current.difficulty.version.as_str(), "3.0.0");
}
