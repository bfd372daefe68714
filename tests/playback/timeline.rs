use beatmap_rs::{
    map::objects::TempoChange,
    timing::{BpmTimeline, JumpSettings, half_jump_duration},
};
use pretty_assertions::assert_eq;

use super::assert_time_close;

fn slow_down_at_four() -> BpmTimeline {
    BpmTimeline::build(
        120.0,
        &[TempoChange {
            beat: 4.0,
            bpm: 60.0,
        }],
    )
}

#[test]
fn test_tempo_change_splits_segments() {
    let timeline = slow_down_at_four();
    assert_time_close(2.0, timeline.beat_to_time(4.0), "change beat");
    assert_time_close(6.0, timeline.beat_to_time(8.0), "after change");
    assert_time_close(1.0, timeline.beat_to_time(2.0), "before change");
    assert_eq!(timeline.bpm_at_beat(3.5), 120.0);
    assert_eq!(timeline.bpm_at_beat(4.0), 60.0);
    assert_eq!(timeline.seconds_per_beat_at(10.0), 1.0);
}

#[test]
fn test_beat_time_round_trip() {
    let timeline = BpmTimeline::build(
        150.0,
        &[
            TempoChange {
                beat: 16.0,
                bpm: 200.0,
            },
            TempoChange {
                beat: 7.0,
                bpm: 90.0,
            },
        ],
    );
    for beat in [0.0, 3.25, 7.0, 11.5, 16.0, 40.125] {
        let time = timeline.beat_to_time(beat);
        assert_time_close(beat, timeline.time_to_beat(time), "round trip");
    }
}

#[test]
fn test_negative_beats_extrapolate_base_tempo() {
    let timeline = slow_down_at_four();
    assert_time_close(-1.0, timeline.beat_to_time(-2.0), "before zero");
    assert_time_close(-2.0, timeline.time_to_beat(-1.0), "before zero");
}

#[test]
fn test_degenerate_tempo_yields_zero() {
    let timeline = BpmTimeline::build(0.0, &[]);
    assert_eq!(timeline.beat_to_time(12.0), 0.0);
    assert_eq!(timeline.time_to_beat(3.0), 0.0);
    assert_eq!(timeline.seconds_per_beat_at(1.0), 0.0);
}

#[test]
fn test_jump_settings() {
    assert_eq!(half_jump_duration(120.0, 10.0), 2.0);
    assert_eq!(half_jump_duration(100.0, 5.0), 4.0);
    let jump = JumpSettings::new(120.0, 16.0, 0.0);
    assert_time_close(1.0, jump.reaction_time, "reaction time");
    assert_eq!(jump.jump_distance, 32.0);
    let clamped = JumpSettings::new(120.0, 16.0, -10.0);
    assert_eq!(clamped.half_jump_duration, 0.25);
}
