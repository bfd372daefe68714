use std::sync::Arc;

use beatmap_rs::{
    config::{DifficultySettings, PreviewConfig},
    map::prelude::*,
    preview::{DifficultyPreview, PreviewControl},
    spawn::ObjectIndex,
};
use pretty_assertions::assert_eq;

use super::{assert_time_close, note, wall};

const SETTINGS: DifficultySettings = DifficultySettings {
    base_bpm: 120.0,
    note_jump_speed: 16.0,
    spawn_offset: 0.0,
};

fn light(beat: f64) -> MapObject {
    MapObject::Light(LightEvent {
        beat,
        event_type: 1,
        value: 1,
        float_value: 1.0,
        custom: None,
    })
}

fn difficulty() -> Arc<Difficulty> {
    Arc::new(Difficulty::from_objects(
        SchemaVersion::new("3.0.0"),
        [
            note(30.0, 2).into(),
            note(10.0, 0).into(),
            note(20.0, 1).into(),
            wall(10.0, 5.0).into(),
            wall(12.0, 1.0).into(),
            light(25.0),
            light(1.0),
            light(15.0),
            BoostEvent { beat: 0.0, on: true }.into(),
        ],
    ))
}

#[test]
fn test_preview_reports_spawns_and_triggers() {
    let mut preview = DifficultyPreview::new(difficulty(), SETTINGS, &PreviewConfig::default());

    let frame = preview.update(20.0);
    assert_time_close(10.0, frame.time, "frame time");
    assert_eq!(frame.notes.entered, vec![ObjectIndex(1)]);
    assert_eq!(frame.light_events, vec![ObjectIndex(0), ObjectIndex(1)]);
    assert_eq!(frame.boost_events, vec![ObjectIndex(0)]);

    let frame = preview.update(26.0);
    assert_eq!(frame.notes.exited, vec![ObjectIndex(1)]);
    assert!(frame.notes.entered.is_empty());
    assert_eq!(frame.light_events, vec![ObjectIndex(2)]);
    assert!(frame.boost_events.is_empty());

    assert!(preview.update(26.0).is_empty());
}

#[test]
fn test_seeking_backward_fires_no_events() {
    let mut preview = DifficultyPreview::new(difficulty(), SETTINGS, &PreviewConfig::default());
    preview.update(26.0);

    let frame = preview.update(12.5);
    assert!(frame.light_events.is_empty());
    assert!(frame.boost_events.is_empty());
    assert_eq!(frame.walls.entered, vec![ObjectIndex(0), ObjectIndex(1)]);

    // Playing forward again only reports what lies ahead of the new position.
    let frame = preview.update(16.0);
    assert_eq!(frame.light_events, vec![ObjectIndex(1)]);
}

#[test]
fn test_controls_apply_on_next_update() {
    let mut preview = DifficultyPreview::new(difficulty(), SETTINGS, &PreviewConfig::default());
    preview.post_controls([
        PreviewControl::SetNoteJumpSpeed { njs: -1.0 },
        PreviewControl::SetNoteJumpSpeed { njs: 10.0 },
        PreviewControl::SetBehindCameraZ { z: 1.0 },
        PreviewControl::SetSpawnOffset { beats: f64::NAN },
    ]);
    assert_eq!(preview.settings().note_jump_speed, 16.0);

    preview.update(0.0);
    assert_eq!(preview.settings().note_jump_speed, 10.0);
    assert_eq!(preview.settings().spawn_offset, 0.0);
    assert_eq!(preview.behind_camera_z(), -5.0);
    assert_eq!(preview.jump_settings(0.0).half_jump_duration, 2.0);
}

#[test]
fn test_config_overrides_and_mirroring() {
    let config = PreviewConfig {
        note_jump_speed: Some(20.0),
        mirrored: true,
        ..PreviewConfig::default()
    };
    let preview = DifficultyPreview::new(difficulty(), SETTINGS, &config);
    assert!(preview.is_mirrored());
    assert_eq!(preview.settings().note_jump_speed, 20.0);
    let lanes: Vec<_> = preview.difficulty().notes.iter().map(|n| n.x).collect();
    assert_eq!(lanes, vec![3, 2, 1]);
    assert_eq!(preview.difficulty().notes[0].color, NoteColor::Blue);

    let unmirrored = preview.mirrored();
    assert!(!unmirrored.is_mirrored());
    assert_eq!(unmirrored.settings().note_jump_speed, 20.0);
    assert_eq!(unmirrored.difficulty().notes, difficulty().notes);
}

#[test]
fn test_reset_hides_everything() {
    let mut preview = DifficultyPreview::new(difficulty(), SETTINGS, &PreviewConfig::default());
    preview.update(12.5);
    assert_eq!(preview.visible().walls.entered.len(), 2);

    let frame = preview.reset();
    assert_eq!(frame.walls.exited, vec![ObjectIndex(0), ObjectIndex(1)]);
    assert!(preview.visible().is_empty());

    // After a reset the first update fires every event up to the play head again.
    let frame = preview.update(20.0);
    assert_eq!(frame.light_events.len(), 2);
}
