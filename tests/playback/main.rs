//! Tests for timing, spawn scheduling and previews.
//!
//! Time assertions allow an absolute error of one microsecond, see [`assert_time_close`].

#[cfg(feature = "loader")]
mod loader;
mod mirror;
mod preview;
mod spawn;
mod timeline;

use beatmap_rs::map::prelude::*;

/// Allowed absolute error of time assertions, in seconds.
pub(crate) const MICROSECOND_EPSILON: f64 = 1e-6;

/// Asserts that two times are equal within [`MICROSECOND_EPSILON`].
#[track_caller]
pub(crate) fn assert_time_close(expected: f64, actual: f64, msg: &str) {
    let diff = (expected - actual).abs();
    assert!(
        diff < MICROSECOND_EPSILON,
        "{msg}: expected {expected:.6}s, got {actual:.6}s, diff {diff:.9}s",
    );
}

pub(crate) fn note(beat: f64, x: i32) -> Note {
    Note {
        beat,
        x,
        y: 0,
        color: NoteColor::Red,
        direction: CutDirection::DOWN,
        angle_offset: 0,
        custom: None,
    }
}

pub(crate) fn wall(beat: f64, duration: f64) -> Wall {
    Wall {
        beat,
        duration,
        x: 0,
        y: 0,
        width: 1,
        height: 5,
        custom: None,
    }
}
