use std::sync::Arc;

use beatmap_rs::{
    map::{
        custom::CustomOverride,
        objects::{Bomb, Note},
    },
    spawn::{
        BombRule, DEFAULT_BEHIND_CAMERA_Z, ObjectIndex, PointRule, SpanRule, SpawnContext,
        SpawnScheduler,
    },
    timing::BpmTimeline,
};
use pretty_assertions::assert_eq;

use super::{note, wall};

fn timeline() -> Arc<BpmTimeline> {
    Arc::new(BpmTimeline::build(120.0, &[]))
}

fn context(timeline: &BpmTimeline, beat: f64) -> SpawnContext {
    SpawnContext::at_beat(timeline, beat, 16.0, 0.0, DEFAULT_BEHIND_CAMERA_Z)
}

fn note_with(beat: f64, x: i32, custom: CustomOverride) -> Note {
    Note {
        custom: Some(custom),
        ..note(beat, x)
    }
}

#[test]
fn test_only_the_middle_note_is_visible() {
    let timeline = timeline();
    let notes = [note(10.0, 0), note(20.0, 1), note(30.0, 2)];
    let mut scheduler = SpawnScheduler::<PointRule>::new(&notes, Arc::clone(&timeline));

    let delta = scheduler.update(&context(&timeline, 20.0));
    assert_eq!(delta.entered, vec![ObjectIndex(1)]);
    assert!(delta.exited.is_empty());
    assert_eq!(scheduler.active().collect::<Vec<_>>(), vec![ObjectIndex(1)]);

    assert!(scheduler.update(&context(&timeline, 20.0)).is_empty());
}

#[test]
fn test_notes_enter_and_exit_once_while_playing() {
    let timeline = timeline();
    let notes = [note(4.0, 0), note(6.0, 1), note(8.0, 2)];
    let mut scheduler = SpawnScheduler::<PointRule>::new(&notes, Arc::clone(&timeline));

    let mut entered = Vec::new();
    let mut exited = Vec::new();
    let mut beat = 0.0;
    while beat <= 12.0 {
        let delta = scheduler.update(&context(&timeline, beat));
        entered.extend(delta.entered);
        exited.extend(delta.exited);
        beat += 0.125;
    }
    let all = vec![ObjectIndex(0), ObjectIndex(1), ObjectIndex(2)];
    assert_eq!(entered, all);
    assert_eq!(exited, all);
    assert_eq!(scheduler.active().count(), 0);
}

#[test]
fn test_overlapping_walls_are_both_visible() {
    let timeline = timeline();
    let walls = [wall(10.0, 5.0), wall(12.0, 1.0)];
    let mut scheduler = SpawnScheduler::<SpanRule>::new(&walls, Arc::clone(&timeline));

    let delta = scheduler.update(&context(&timeline, 12.5));
    assert_eq!(delta.entered, vec![ObjectIndex(0), ObjectIndex(1)]);

    // The short wall has passed, the long one is still visible.
    let delta = scheduler.update(&context(&timeline, 14.0));
    assert_eq!(delta.exited, vec![ObjectIndex(1)]);
    assert!(scheduler.is_active(ObjectIndex(0)));
}

#[test]
fn test_long_wall_stays_visible_behind_short_ones() {
    let timeline = timeline();
    let walls = [wall(0.0, 40.0), wall(2.0, 1.0), wall(24.0, 1.0)];
    let mut scheduler = SpawnScheduler::<SpanRule>::new(&walls, Arc::clone(&timeline));

    scheduler.update(&context(&timeline, 2.0));
    let delta = scheduler.update(&context(&timeline, 23.5));
    assert_eq!(delta.entered, vec![ObjectIndex(2)]);
    assert_eq!(delta.exited, vec![ObjectIndex(1)]);
    assert!(scheduler.is_active(ObjectIndex(0)));
}

#[test]
fn test_bomb_trails_behind_the_player() {
    let timeline = timeline();
    let bombs = [Bomb {
        beat: 20.0,
        x: 1,
        y: 0,
        custom: None,
    }];
    let mut scheduler = SpawnScheduler::<BombRule>::new(&bombs, Arc::clone(&timeline));

    assert_eq!(
        scheduler.update(&context(&timeline, 20.4)).entered,
        vec![ObjectIndex(0)]
    );
    // 0.4s past the bomb, beyond the 5/16s behind camera time.
    assert_eq!(
        scheduler.update(&context(&timeline, 20.8)).exited,
        vec![ObjectIndex(0)]
    );
}

#[test]
fn test_seeking_backward_restores_visibility() {
    let timeline = timeline();
    let notes: Vec<_> = (0..64).map(|i| note(f64::from(i) * 2.0, i % 4)).collect();
    let mut scheduler = SpawnScheduler::<PointRule>::new(&notes, Arc::clone(&timeline));

    scheduler.update(&context(&timeline, 101.0));
    assert_eq!(scheduler.active().collect::<Vec<_>>(), vec![ObjectIndex(51)]);
    let delta = scheduler.update(&context(&timeline, 11.0));
    assert_eq!(delta.entered, vec![ObjectIndex(6)]);
    assert_eq!(delta.exited, vec![ObjectIndex(51)]);

    let reset = scheduler.reset();
    assert_eq!(reset.exited, vec![ObjectIndex(6)]);
    assert_eq!(scheduler.active().count(), 0);
}

#[test]
fn test_slow_note_is_found_after_seeking_backward() {
    let timeline = timeline();
    let slow = CustomOverride {
        note_jump_speed: Some(2.0),
        ..CustomOverride::default()
    };
    let notes = [note_with(10.0, 0, slow), note(20.0, 1)];
    let mut scheduler = SpawnScheduler::<PointRule>::new(&notes, Arc::clone(&timeline));

    assert!(scheduler.update(&context(&timeline, 40.0)).is_empty());
    // 1.5s past the note, inside its 2.5s behind camera time at njs 2.
    let delta = scheduler.update(&context(&timeline, 13.0));
    assert_eq!(delta.entered, vec![ObjectIndex(0)]);
    assert!(delta.exited.is_empty());

    let delta = scheduler.update(&context(&timeline, 16.0));
    assert_eq!(delta.exited, vec![ObjectIndex(0)]);
    assert!(delta.entered.is_empty());
}

#[test]
fn test_early_spawning_note_is_not_blocked_by_an_earlier_one() {
    let timeline = timeline();
    let early = CustomOverride {
        spawn_offset: Some(4.0),
        ..CustomOverride::default()
    };
    let notes = [note(10.0, 0), note_with(11.0, 1, early), note(12.0, 2)];
    let mut scheduler = SpawnScheduler::<PointRule>::new(&notes, Arc::clone(&timeline));

    // 3s reaction time for the second note, 1s for the others.
    let delta = scheduler.update(&context(&timeline, 6.0));
    assert_eq!(delta.entered, vec![ObjectIndex(1)]);

    let delta = scheduler.update(&context(&timeline, 8.5));
    assert_eq!(delta.entered, vec![ObjectIndex(0)]);
    assert!(delta.exited.is_empty());
    assert_eq!(
        scheduler.active().collect::<Vec<_>>(),
        vec![ObjectIndex(0), ObjectIndex(1)]
    );
}
