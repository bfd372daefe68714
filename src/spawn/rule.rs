//! Window tests per object category.
//!
//! With `t` the current time, `rt` the reaction time and `b` the behind camera time
//! of the object's window:
//!
//! | Rule | Visible when |
//! |---|---|
//! | [`PointRule`] | `t_obj - rt <= t <= t_obj - b` |
//! | [`BombRule`] | `t_obj - rt <= t <= t_obj`, or `t_obj < t <= t_obj - b` |
//! | [`SpanRule`] | `t_start - rt <= t <= t_end - b` |

use super::{SpawnEntry, SpawnWindow};

/// Where the current time lies relative to an object's visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowPosition {
    /// The object has not spawned yet.
    Ahead,
    /// The object must be visible.
    Inside,
    /// The object has despawned.
    Behind,
}

/// Decides when an object of one category is visible.
pub trait SpawnRule {
    /// Whether the forward walk keeps going past an object that is ahead of the window,
    /// as long as that object starts before the end of an earlier walked object.
    const CONTINUES_OVERLAPS: bool = false;

    /// Locates `time` relative to the window of `entry`.
    fn position(entry: &SpawnEntry, window: &SpawnWindow, time: f64) -> WindowPosition;
}

fn classify(time: f64, from: f64, to: f64) -> WindowPosition {
    if time < from {
        WindowPosition::Ahead
    } else if time <= to {
        WindowPosition::Inside
    } else {
        WindowPosition::Behind
    }
}

/// Rule for color notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointRule;

impl SpawnRule for PointRule {
    fn position(entry: &SpawnEntry, window: &SpawnWindow, time: f64) -> WindowPosition {
        classify(
            time,
            entry.start_time - window.reaction_time,
            entry.start_time - window.behind_camera_time,
        )
    }
}

/// Rule for bombs, which test the approach and the trailing part separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct BombRule;

impl SpawnRule for BombRule {
    fn position(entry: &SpawnEntry, window: &SpawnWindow, time: f64) -> WindowPosition {
        let bomb_time = entry.start_time;
        if time < bomb_time - window.reaction_time {
            return WindowPosition::Ahead;
        }
        let approaching = time <= bomb_time;
        let trailing = time > bomb_time && time <= bomb_time - window.behind_camera_time;
        if approaching || trailing {
            WindowPosition::Inside
        } else {
            WindowPosition::Behind
        }
    }
}

/// Rule for objects with a duration: walls, arcs and chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanRule;

impl SpawnRule for SpanRule {
    const CONTINUES_OVERLAPS: bool = true;

    fn position(entry: &SpawnEntry, window: &SpawnWindow, time: f64) -> WindowPosition {
        classify(
            time,
            entry.start_time - window.reaction_time,
            entry.end_time - window.behind_camera_time,
        )
    }
}
