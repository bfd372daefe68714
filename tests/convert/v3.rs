use beatmap_rs::{
    convert::{ConvertError, ConvertWarning, convert},
    map::{prelude::*, precision},
};
use pretty_assertions::assert_eq;

use super::{CURRENT_EXPERT, convert_fixture};

#[test]
fn test_current_fixture() {
    let output = convert_fixture(CURRENT_EXPERT);
    let difficulty = &output.difficulty;
    assert_eq!(difficulty.version.as_str(), "3.2.0");
    assert!(difficulty.is_sorted());
    assert!(difficulty.use_normal_events_as_compatible_events);

    assert_eq!(
        output.warnings,
        vec![ConvertWarning::InvalidColor { index: 3, color: 4 }]
    );
    assert_eq!(difficulty.notes.len(), 3);
    assert_eq!(difficulty.notes[1].angle_offset, 15);
    assert_eq!(difficulty.bombs.len(), 1);
    assert_eq!(difficulty.arcs.len(), 1);
    assert_eq!(difficulty.arcs[0].mid_anchor, MidAnchorMode::Clockwise);
    assert_eq!(difficulty.light_events[0].float_value, 1.0);
    assert_eq!(difficulty.boost_events, vec![BoostEvent { beat: 0.0, on: true }]);
    assert_eq!(
        difficulty.rotation_events,
        vec![RotationEvent {
            beat: 6.0,
            execution: RotationTiming::Late,
            rotation: 15.0,
        }]
    );
    assert_eq!(difficulty.custom_data.bookmarks[0].name, "verse");
    assert_eq!(difficulty.custom_data.bookmarks[0].color, None);
}

#[test]
fn test_omitted_fields_get_defaults() {
    let output = convert_fixture(CURRENT_EXPERT);
    let difficulty = &output.difficulty;

    let second_wall = &difficulty.walls[1];
    assert_eq!(second_wall.width, 1);
    assert_eq!(second_wall.height, 3);

    let arc = &difficulty.arcs[0];
    assert_eq!(arc.head_multiplier, 1.0);
    assert_eq!(arc.tail_multiplier, 1.0);

    let chain = &difficulty.chains[0];
    assert_eq!(chain.segment_count, 1);
    assert_eq!(chain.squish, 1.0);
}

#[test]
fn test_precision_values_pass_through() {
    let output = convert_fixture(CURRENT_EXPERT);
    let note = &output.difficulty.notes[2];
    assert_eq!(note.x, 1500);
    assert_eq!(precision::decode(note.x), Some(0.5));
    assert!(note.direction.is_precision());
}

#[test]
fn test_unsorted_input_is_sorted() {
    let output = convert(
        "3.0.0",
        br#"{"colorNotes":[{"b":3,"c":0},{"b":1,"c":1},{"b":2,"c":0}],"bpmEvents":[{"b":8,"m":90},{"b":0,"m":120}]}"#,
    )
    .expect("must be converted");
    let beats: Vec<_> = output.difficulty.notes.iter().map(|n| n.beat).collect();
    assert_eq!(beats, vec![1.0, 2.0, 3.0]);
    assert_eq!(output.difficulty.tempo_changes[0].bpm, 120.0);
}

#[test]
fn test_custom_data_keys() {
    let output = convert(
        "3.0.0",
        br#"{"colorNotes":[{"b":1,"c":0,"customData":{"coordinates":[0.5,1],"noteJumpStartBeatOffset":-1}}],
             "obstacles":[{"b":2,"customData":{"size":[2.5]}}]}"#,
    )
    .expect("must be converted");
    let note_custom = output.difficulty.notes[0]
        .custom
        .as_ref()
        .expect("note override");
    assert_eq!(note_custom.position, Some([0.5, 1.0]));
    assert_eq!(note_custom.spawn_offset, Some(-1.0));
    let wall_custom = output.difficulty.walls[0]
        .custom
        .as_ref()
        .expect("wall override");
    assert_eq!(wall_custom.size, Some([2.5, 1.0, 1.0]));
}

#[test]
fn test_unsupported_version() {
    assert_eq!(
        convert("4.0.0", b"{}"),
        Err(ConvertError::UnsupportedVersion("4.0.0".to_string()))
    );
    assert!(matches!(
        convert("3.0.0", b"{\"colorNotes\": 5}"),
        Err(ConvertError::MalformedPayload { .. })
    ));
}
