//! Preview of one difficulty.
//!
//! [`DifficultyPreview`] owns everything derived from the active difficulty: the tempo
//! timeline, one spawn scheduler per object category and trigger cursors for events.
//! Switching difficulties means building a new preview; nothing is shared globally.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use beatmap_rs::{
//!     config::{DifficultySettings, PreviewConfig},
//!     map::{Difficulty, SchemaVersion, objects::{CutDirection, MapObject, Note, NoteColor}},
//!     preview::DifficultyPreview,
//! };
//!
//! let note = Note {
//!     beat: 8.0,
//!     x: 1,
//!     y: 0,
//!     color: NoteColor::Red,
//!     direction: CutDirection::DOWN,
//!     angle_offset: 0,
//!     custom: None,
//! };
//! let difficulty = Difficulty::from_objects(SchemaVersion::new("3.0.0"), [MapObject::Note(note)]);
//! let settings = DifficultySettings { base_bpm: 120.0, note_jump_speed: 16.0, spawn_offset: 0.0 };
//! let mut preview = DifficultyPreview::new(Arc::new(difficulty), settings, &PreviewConfig::default());
//!
//! assert!(preview.update(0.0).notes.entered.is_empty());
//! assert_eq!(preview.update(7.0).notes.entered.len(), 1);
//! ```

use std::sync::Arc;

use log::debug;

use crate::{
    config::{DifficultySettings, PreviewConfig},
    map::{Difficulty, objects::Timed},
    spawn::{BombRule, ObjectIndex, PointRule, SpanRule, SpawnContext, SpawnDelta, SpawnScheduler},
    timing::{BpmTimeline, JumpSettings},
};

/// Runtime changes to a running preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewControl {
    /// Replaces the note jump speed. Non-positive or non-finite values are ignored.
    SetNoteJumpSpeed {
        /// New note jump speed.
        njs: f64,
    },
    /// Replaces the spawn offset. Non-finite values are ignored.
    SetSpawnOffset {
        /// New spawn offset in beats.
        beats: f64,
    },
    /// Replaces the despawn depth. Positive or non-finite values are ignored.
    SetBehindCameraZ {
        /// New depth in meters.
        z: f64,
    },
}

/// Walks a sorted event collection and reports the events crossed by the play head.
#[derive(Debug, Clone, Default)]
struct TriggerCursor {
    beats: Vec<f64>,
    /// Index of the first event after the play head.
    next: usize,
}

impl TriggerCursor {
    fn new<T: Timed>(events: &[T]) -> Self {
        Self {
            beats: events.iter().map(Timed::beat).collect(),
            next: 0,
        }
    }

    /// Moves the play head forward to `beat`, returning every event at or before it.
    fn advance(&mut self, beat: f64) -> Vec<ObjectIndex> {
        let start = self.next;
        while self.beats.get(self.next).is_some_and(|&b| b <= beat) {
            self.next += 1;
        }
        (start..self.next).map(ObjectIndex).collect()
    }

    /// Moves the play head to `beat` without reporting anything.
    fn seek(&mut self, beat: f64) {
        self.next = self.beats.partition_point(|&b| b <= beat);
    }
}

/// Changes of one preview update.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PreviewFrame {
    /// Beat of the update.
    pub beat: f64,
    /// Seconds at `beat`.
    pub time: f64,
    /// Color notes.
    pub notes: SpawnDelta,
    /// Bombs.
    pub bombs: SpawnDelta,
    /// Walls.
    pub walls: SpawnDelta,
    /// Arcs.
    pub arcs: SpawnDelta,
    /// Chains.
    pub chains: SpawnDelta,
    /// Lighting events crossed since the previous update.
    pub light_events: Vec<ObjectIndex>,
    /// Boost events crossed since the previous update.
    pub boost_events: Vec<ObjectIndex>,
    /// Rotation events crossed since the previous update.
    pub rotation_events: Vec<ObjectIndex>,
}

impl PreviewFrame {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
            && self.bombs.is_empty()
            && self.walls.is_empty()
            && self.arcs.is_empty()
            && self.chains.is_empty()
            && self.light_events.is_empty()
            && self.boost_events.is_empty()
            && self.rotation_events.is_empty()
    }
}

/// Preview state of one difficulty.
#[derive(Debug, Clone)]
pub struct DifficultyPreview {
    difficulty: Arc<Difficulty>,
    timeline: Arc<BpmTimeline>,
    /// Settings with the config overrides applied.
    settings: DifficultySettings,
    /// Settings as given, without the config overrides.
    original_settings: DifficultySettings,
    config: PreviewConfig,
    behind_camera_z: f64,
    notes: SpawnScheduler<PointRule>,
    bombs: SpawnScheduler<BombRule>,
    walls: SpawnScheduler<SpanRule>,
    arcs: SpawnScheduler<SpanRule>,
    chains: SpawnScheduler<SpanRule>,
    lights: TriggerCursor,
    boosts: TriggerCursor,
    rotations: TriggerCursor,
    last_beat: Option<f64>,
    inbox: Vec<PreviewControl>,
}

impl DifficultyPreview {
    /// Creates a preview of `difficulty`.
    ///
    /// When `config.mirrored` is set, the mirrored difficulty is previewed instead.
    #[must_use]
    pub fn new(
        difficulty: Arc<Difficulty>,
        settings: DifficultySettings,
        config: &PreviewConfig,
    ) -> Self {
        let difficulty = if config.mirrored {
            Arc::new(difficulty.mirrored())
        } else {
            difficulty
        };
        let timeline = Arc::new(BpmTimeline::build(
            settings.base_bpm,
            &difficulty.tempo_changes,
        ));
        debug!(
            "new preview of difficulty {} with {} objects",
            difficulty.version,
            difficulty.object_count()
        );
        Self {
            notes: SpawnScheduler::new(&difficulty.notes, Arc::clone(&timeline)),
            bombs: SpawnScheduler::new(&difficulty.bombs, Arc::clone(&timeline)),
            walls: SpawnScheduler::new(&difficulty.walls, Arc::clone(&timeline)),
            arcs: SpawnScheduler::new(&difficulty.arcs, Arc::clone(&timeline)),
            chains: SpawnScheduler::new(&difficulty.chains, Arc::clone(&timeline)),
            lights: TriggerCursor::new(&difficulty.light_events),
            boosts: TriggerCursor::new(&difficulty.boost_events),
            rotations: TriggerCursor::new(&difficulty.rotation_events),
            settings: config.apply(settings),
            original_settings: settings,
            config: config.clone(),
            behind_camera_z: config.behind_camera_z,
            difficulty,
            timeline,
            last_beat: None,
            inbox: Vec::new(),
        }
    }

    /// The previewed difficulty, already mirrored if requested.
    #[must_use]
    pub const fn difficulty(&self) -> &Arc<Difficulty> {
        &self.difficulty
    }

    /// The tempo timeline of the difficulty.
    #[must_use]
    pub const fn timeline(&self) -> &Arc<BpmTimeline> {
        &self.timeline
    }

    /// Current settings, with overrides and controls applied.
    #[must_use]
    pub const fn settings(&self) -> &DifficultySettings {
        &self.settings
    }

    /// Current despawn depth.
    #[must_use]
    pub const fn behind_camera_z(&self) -> f64 {
        self.behind_camera_z
    }

    /// Jump geometry at `beat`, with the difficulty values.
    #[must_use]
    pub fn jump_settings(&self, beat: f64) -> JumpSettings {
        JumpSettings::new(
            self.timeline.bpm_at_beat(beat),
            self.settings.note_jump_speed,
            self.settings.spawn_offset,
        )
    }

    /// Scheduling context of `beat`.
    #[must_use]
    pub fn context(&self, beat: f64) -> SpawnContext {
        SpawnContext::at_beat(
            &self.timeline,
            beat,
            self.settings.note_jump_speed,
            self.settings.spawn_offset,
            self.behind_camera_z,
        )
    }

    /// Queues controls, which are applied at the start of the next update.
    pub fn post_controls(&mut self, controls: impl IntoIterator<Item = PreviewControl>) {
        self.inbox.extend(controls);
    }

    fn apply_controls(&mut self) {
        for control in std::mem::take(&mut self.inbox) {
            match control {
                PreviewControl::SetNoteJumpSpeed { njs } => {
                    if njs.is_finite() && njs > 0.0 {
                        self.settings.note_jump_speed = njs;
                    }
                }
                PreviewControl::SetSpawnOffset { beats } => {
                    if beats.is_finite() {
                        self.settings.spawn_offset = beats;
                    }
                }
                PreviewControl::SetBehindCameraZ { z } => {
                    if z.is_finite() && z <= 0.0 {
                        self.behind_camera_z = z;
                    }
                }
            }
        }
    }

    /// Moves the play head to `beat`.
    ///
    /// Events are reported when the play head passes them moving forward, including
    /// every event up to `beat` on the first update. Moving backward reports no events.
    pub fn update(&mut self, beat: f64) -> PreviewFrame {
        self.apply_controls();
        let context = self.context(beat);
        let (light_events, boost_events, rotation_events) = match self.last_beat {
            Some(last) if beat < last => {
                self.lights.seek(beat);
                self.boosts.seek(beat);
                self.rotations.seek(beat);
                (Vec::new(), Vec::new(), Vec::new())
            }
            _ => (
                self.lights.advance(beat),
                self.boosts.advance(beat),
                self.rotations.advance(beat),
            ),
        };
        self.last_beat = Some(beat);
        PreviewFrame {
            beat,
            time: context.current_time,
            notes: self.notes.update(&context),
            bombs: self.bombs.update(&context),
            walls: self.walls.update(&context),
            arcs: self.arcs.update(&context),
            chains: self.chains.update(&context),
            light_events,
            boost_events,
            rotation_events,
        }
    }

    /// Hides everything and rewinds the event cursors.
    pub fn reset(&mut self) -> PreviewFrame {
        self.last_beat = None;
        self.lights.seek(f64::NEG_INFINITY);
        self.boosts.seek(f64::NEG_INFINITY);
        self.rotations.seek(f64::NEG_INFINITY);
        PreviewFrame {
            notes: self.notes.reset(),
            bombs: self.bombs.reset(),
            walls: self.walls.reset(),
            arcs: self.arcs.reset(),
            chains: self.chains.reset(),
            ..PreviewFrame::default()
        }
    }

    /// Visible objects of every spawned category.
    #[must_use]
    pub fn visible(&self) -> PreviewFrame {
        PreviewFrame {
            beat: self.last_beat.unwrap_or_default(),
            time: self
                .timeline
                .beat_to_time(self.last_beat.unwrap_or_default()),
            notes: visible_delta(self.notes.active()),
            bombs: visible_delta(self.bombs.active()),
            walls: visible_delta(self.walls.active()),
            arcs: visible_delta(self.arcs.active()),
            chains: visible_delta(self.chains.active()),
            ..PreviewFrame::default()
        }
    }

    /// A fresh preview of the mirrored difficulty with the same settings.
    ///
    /// Mirroring a mirrored preview gives back the original layout.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mirrored = Arc::new(self.difficulty.mirrored());
        let config = PreviewConfig {
            mirrored: false,
            ..self.config.clone()
        };
        let mut preview = Self::new(mirrored, self.original_settings, &config);
        preview.config.mirrored = !self.config.mirrored;
        preview.settings = self.settings;
        preview.behind_camera_z = self.behind_camera_z;
        preview
    }

    /// Whether the previewed difficulty is mirrored.
    #[must_use]
    pub const fn is_mirrored(&self) -> bool {
        self.config.mirrored
    }
}

fn visible_delta(active: impl Iterator<Item = ObjectIndex>) -> SpawnDelta {
    SpawnDelta {
        entered: active.collect(),
        exited: Vec::new(),
    }
}
