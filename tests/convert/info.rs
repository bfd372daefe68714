use beatmap_rs::{
    config::DifficultySettings,
    info::{DEFAULT_ENVIRONMENT, DifficultyRank, parse_info},
};
use pretty_assertions::assert_eq;

const INFO: &[u8] = include_bytes!("../files/Info.dat");

#[test]
fn test_info_fixture() {
    let info = parse_info(INFO).expect("must be parsed");
    assert_eq!(info.song_name, "Preview Test");
    assert_eq!(info.beats_per_minute, 120.0);
    assert_eq!(info.environment_name, DEFAULT_ENVIRONMENT);
    assert_eq!(info.difficulty_sets.len(), 2);

    let characteristics: Vec<_> = info.difficulties().map(|(c, d)| (c, d.rank)).collect();
    assert_eq!(
        characteristics,
        vec![
            ("Standard", Some(DifficultyRank::Expert)),
            ("Standard", Some(DifficultyRank::ExpertPlus)),
            ("360Degree", Some(DifficultyRank::Hard)),
        ]
    );
}

#[test]
fn test_info_settings() {
    let info = parse_info(INFO).expect("must be parsed");
    assert_eq!(
        info.settings_for("Standard", "ExpertPlus"),
        Some(DifficultySettings {
            base_bpm: 120.0,
            note_jump_speed: 16.0,
            spawn_offset: 0.5,
        })
    );
    let hard = info.difficulty("360Degree", "Hard").expect("hard exists");
    assert_eq!(hard.note_jump_speed, 10.0);
    assert_eq!(hard.beatmap_filename, "Hard360Degree.dat");
    assert!(info.difficulty("Standard", "Easy").is_none());
}
