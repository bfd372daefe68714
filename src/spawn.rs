//! Windowed spawn scheduling.
//!
//! Every tick, a [`scheduler::SpawnScheduler`] decides which objects of one category
//! must currently be visible, and reports the change as a [`SpawnDelta`] of objects that
//! entered and exited the visible set since the previous tick.
//!
//! # Spawn window
//!
//! An object becomes visible one reaction time before it reaches the player, and stays
//! visible until it has travelled `behind_camera_z` meters past the player. With the
//! default `behind_camera_z` of `-5.0`, an object stays visible for `5.0 / njs` seconds
//! after its time. See [`SpawnWindow`].
//!
//! How the window applies to an object depends on the category, see [`rule`].

pub mod rule;
pub mod scheduler;

use crate::{
    map::{
        custom::CustomOverride,
        objects::{Arc, Bomb, Chain, Note, Timed, Wall},
    },
    timing::{BpmTimeline, JumpSettings},
};

pub use self::{
    rule::{BombRule, PointRule, SpanRule, SpawnRule, WindowPosition},
    scheduler::SpawnScheduler,
};

/// Default depth behind the player where objects are despawned, in meters.
pub const DEFAULT_BEHIND_CAMERA_Z: f64 = -5.0;

/// An object which can be scheduled for spawning.
pub trait SpawnObject: Timed {
    /// Beat where the object stops needing a visible representation.
    ///
    /// Defaults to its start beat.
    fn end_beat(&self) -> f64 {
        self.beat()
    }

    /// Per-object overrides, which may change the note jump speed and spawn offset.
    fn spawn_override(&self) -> Option<&CustomOverride>;
}

impl SpawnObject for Note {
    fn spawn_override(&self) -> Option<&CustomOverride> {
        self.custom.as_ref()
    }
}

impl SpawnObject for Bomb {
    fn spawn_override(&self) -> Option<&CustomOverride> {
        self.custom.as_ref()
    }
}

impl SpawnObject for Wall {
    fn end_beat(&self) -> f64 {
        self.beat + self.duration
    }

    fn spawn_override(&self) -> Option<&CustomOverride> {
        self.custom.as_ref()
    }
}

impl SpawnObject for Arc {
    fn end_beat(&self) -> f64 {
        self.tail_beat.max(self.beat)
    }

    fn spawn_override(&self) -> Option<&CustomOverride> {
        self.custom.as_ref()
    }
}

impl SpawnObject for Chain {
    fn end_beat(&self) -> f64 {
        self.tail_beat.max(self.beat)
    }

    fn spawn_override(&self) -> Option<&CustomOverride> {
        self.custom.as_ref()
    }
}

/// Index of an object in its sorted collection, which is its identity across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectIndex(pub usize);

impl ObjectIndex {
    /// Create a new `ObjectIndex`.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the index into the collection.
    #[must_use]
    pub const fn value(self) -> usize {
        self.0
    }
}

impl From<usize> for ObjectIndex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<ObjectIndex> for usize {
    fn from(value: ObjectIndex) -> Self {
        value.0
    }
}

/// Objects that entered or exited the visible set during one update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpawnDelta {
    /// Objects which became visible, ascending.
    pub entered: Vec<ObjectIndex>,
    /// Objects which stopped being visible, ascending.
    pub exited: Vec<ObjectIndex>,
}

impl SpawnDelta {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.exited.is_empty()
    }
}

/// Timing of one scheduled object, precomputed when the scheduler is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEntry {
    /// Beat of the object.
    pub start_beat: f64,
    /// End beat of the object, equal to `start_beat` for points.
    pub end_beat: f64,
    /// Seconds at `start_beat`.
    pub start_time: f64,
    /// Seconds at `end_beat`.
    pub end_time: f64,
    /// Note jump speed override of the object.
    pub note_jump_speed: Option<f64>,
    /// Spawn offset override of the object.
    pub spawn_offset: Option<f64>,
}

impl SpawnEntry {
    /// Precomputes the timing of `object` on `timeline`.
    #[must_use]
    pub fn new<T: SpawnObject>(object: &T, timeline: &BpmTimeline) -> Self {
        let start_beat = object.beat();
        let end_beat = object.end_beat();
        let custom = object.spawn_override();
        Self {
            start_beat,
            end_beat,
            start_time: timeline.beat_to_time(start_beat),
            end_time: timeline.beat_to_time(end_beat),
            note_jump_speed: custom.and_then(|c| c.note_jump_speed),
            spawn_offset: custom.and_then(|c| c.spawn_offset),
        }
    }
}

/// Visible window in seconds relative to an object's time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnWindow {
    /// Seconds before the object's time where it becomes visible.
    pub reaction_time: f64,
    /// Seconds relative to the object's time where it stops being visible.
    ///
    /// Negative values keep the object visible after it passed the player.
    pub behind_camera_time: f64,
}

impl SpawnWindow {
    /// Computes the window for a tempo, note jump speed and spawn offset.
    #[must_use]
    pub fn new(bpm: f64, note_jump_speed: f64, spawn_offset: f64, behind_camera_z: f64) -> Self {
        let jump = JumpSettings::new(bpm, note_jump_speed, spawn_offset);
        let behind_camera_time = if note_jump_speed > 0.0 {
            behind_camera_z / note_jump_speed
        } else {
            0.0
        };
        Self {
            reaction_time: jump.reaction_time,
            behind_camera_time,
        }
    }
}

/// Everything a scheduler needs to know about the current tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnContext {
    /// Current beat.
    pub current_beat: f64,
    /// Current time in seconds, consistent with `current_beat`.
    pub current_time: f64,
    /// Tempo at the current beat.
    pub bpm: f64,
    /// Difficulty note jump speed.
    pub note_jump_speed: f64,
    /// Difficulty spawn offset in beats.
    pub spawn_offset: f64,
    /// Depth behind the player where objects despawn, in meters.
    pub behind_camera_z: f64,
}

impl SpawnContext {
    /// Builds the context of `beat` on `timeline`.
    #[must_use]
    pub fn at_beat(
        timeline: &BpmTimeline,
        beat: f64,
        note_jump_speed: f64,
        spawn_offset: f64,
        behind_camera_z: f64,
    ) -> Self {
        Self {
            current_beat: beat,
            current_time: timeline.beat_to_time(beat),
            bpm: timeline.bpm_at_beat(beat),
            note_jump_speed,
            spawn_offset,
            behind_camera_z,
        }
    }

    /// The window with the difficulty values.
    #[must_use]
    pub fn window(&self) -> SpawnWindow {
        SpawnWindow::new(
            self.bpm,
            self.note_jump_speed,
            self.spawn_offset,
            self.behind_camera_z,
        )
    }

    /// The window of `entry`, honouring its overrides.
    #[must_use]
    pub fn window_for(&self, entry: &SpawnEntry) -> SpawnWindow {
        self.window_with(entry.note_jump_speed, entry.spawn_offset)
    }

    /// The window with the given overrides in place of the difficulty values.
    #[must_use]
    pub fn window_with(
        &self,
        note_jump_speed: Option<f64>,
        spawn_offset: Option<f64>,
    ) -> SpawnWindow {
        SpawnWindow::new(
            self.bpm,
            note_jump_speed.unwrap_or(self.note_jump_speed),
            spawn_offset.unwrap_or(self.spawn_offset),
            self.behind_camera_z,
        )
    }
}
