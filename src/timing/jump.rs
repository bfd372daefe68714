//! Jump duration, reaction time and jump distance.
//!
//! An object spawns half a jump before its beat and travels towards the player at the
//! note jump speed (NJS). The half jump duration (HJD) in beats starts at
//! [`INITIAL_HALF_JUMP_DURATION`] and is halved while the resulting jump distance would
//! exceed [`MAX_JUMP_DISTANCE`], but it never drops below [`MIN_HALF_JUMP_DURATION`].
//!
//! ```text
//! reaction_time = 60 / bpm * hjd
//! jump_distance = njs * 2 * reaction_time
//! ```

/// Upper bound of the jump distance, in meters.
pub const MAX_JUMP_DISTANCE: f64 = 35.998;

/// Lower bound of the half jump duration, in beats.
pub const MIN_HALF_JUMP_DURATION: f64 = 0.25;

/// Half jump duration before any halving, in beats.
pub const INITIAL_HALF_JUMP_DURATION: f64 = 4.0;

fn seconds_per_beat(bpm: f64) -> f64 {
    if bpm > 0.0 { 60.0 / bpm } else { 0.0 }
}

/// Computes the half jump duration in beats for a tempo and note jump speed.
///
/// The result is always within `MIN_HALF_JUMP_DURATION..=INITIAL_HALF_JUMP_DURATION`.
#[must_use]
pub fn half_jump_duration(bpm: f64, note_jump_speed: f64) -> f64 {
    let beat_seconds = seconds_per_beat(bpm);
    let mut hjd = INITIAL_HALF_JUMP_DURATION;
    while note_jump_speed * 2.0 * (beat_seconds * hjd) > MAX_JUMP_DISTANCE
        && hjd > MIN_HALF_JUMP_DURATION
    {
        hjd /= 2.0;
    }
    hjd.max(MIN_HALF_JUMP_DURATION)
}

/// Jump geometry for one tempo, note jump speed and spawn offset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JumpSettings {
    /// Half jump duration in beats, after applying the spawn offset.
    pub half_jump_duration: f64,
    /// Seconds between spawning and reaching the player.
    pub reaction_time: f64,
    /// Distance travelled during a full jump, in meters.
    pub jump_distance: f64,
}

impl JumpSettings {
    /// Derives the jump geometry.
    ///
    /// `spawn_offset` is added to the half jump duration in beats, and the sum is
    /// floored at [`MIN_HALF_JUMP_DURATION`] again. A non-positive `bpm` yields a zero
    /// reaction time.
    #[must_use]
    pub fn new(bpm: f64, note_jump_speed: f64, spawn_offset: f64) -> Self {
        let hjd = (half_jump_duration(bpm, note_jump_speed) + spawn_offset)
            .max(MIN_HALF_JUMP_DURATION);
        let reaction_time = seconds_per_beat(bpm) * hjd;
        Self {
            half_jump_duration: hjd,
            reaction_time,
            jump_distance: note_jump_speed * 2.0 * reaction_time,
        }
    }
}
