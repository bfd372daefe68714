//! Piecewise linear beat to time mapping over tempo changes.
//!
//! The timeline always starts with an implicit breakpoint `(beat 0, time 0, base bpm)`.
//! Each tempo change adds one breakpoint whose time is integrated from the previous
//! segment:
//!
//! ```text
//! time[i] = time[i - 1] + (beat[i] - beat[i - 1]) / bpm[i - 1] * 60
//! ```
//!
//! A segment with a non-positive tempo contributes no time, and conversions inside such
//! a segment return `0.0`.

use itertools::Itertools;
use log::debug;

use crate::map::objects::TempoChange;

/// Seconds in a minute.
const SECONDS_PER_MINUTE: f64 = 60.0;

/// A point where the tempo changes, with its position on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoBreakpoint {
    /// Beat of the change.
    pub beat: f64,
    /// Seconds from the start of the song to the change.
    pub time: f64,
    /// Tempo from this breakpoint on.
    pub bpm: f64,
}

/// Immutable beat/time coordinate system of one difficulty.
///
/// Rebuild it with [`BpmTimeline::build`] whenever the tempo changes change.
#[derive(Debug, Clone, PartialEq)]
pub struct BpmTimeline {
    base_bpm: f64,
    /// Ascending by beat, and the first one is always at beat 0.
    breakpoints: Vec<TempoBreakpoint>,
}

impl BpmTimeline {
    /// Builds the timeline from the song's base tempo and its tempo changes.
    ///
    /// The changes need not be sorted, they are stably sorted by beat here. Changes
    /// before beat 0 are treated as starting at beat 0.
    #[must_use]
    pub fn build(base_bpm: f64, changes: &[TempoChange]) -> Self {
        let mut breakpoints = Vec::with_capacity(changes.len() + 1);
        breakpoints.push(TempoBreakpoint {
            beat: 0.0,
            time: 0.0,
            bpm: base_bpm,
        });
        for change in changes
            .iter()
            .sorted_by(|a, b| a.beat.total_cmp(&b.beat))
        {
            let Some(&prev) = breakpoints.last() else {
                continue;
            };
            let beat = change.beat.max(0.0);
            let elapsed = if prev.bpm > 0.0 {
                (beat - prev.beat) / prev.bpm * SECONDS_PER_MINUTE
            } else {
                0.0
            };
            breakpoints.push(TempoBreakpoint {
                beat,
                time: prev.time + elapsed,
                bpm: change.bpm,
            });
        }
        debug!(
            "built tempo timeline: base {base_bpm} bpm, {} breakpoints",
            breakpoints.len()
        );
        Self {
            base_bpm,
            breakpoints,
        }
    }

    /// The base tempo the timeline was built with.
    #[must_use]
    pub const fn base_bpm(&self) -> f64 {
        self.base_bpm
    }

    /// All breakpoints, ascending by beat. Never empty.
    #[must_use]
    pub fn breakpoints(&self) -> &[TempoBreakpoint] {
        &self.breakpoints
    }

    /// Fallback breakpoint for the degenerate case of an empty list.
    fn origin(&self) -> TempoBreakpoint {
        TempoBreakpoint {
            beat: 0.0,
            time: 0.0,
            bpm: self.base_bpm,
        }
    }

    /// The last breakpoint at or before `key`, or the first one if `key` precedes all.
    fn segment_by(&self, key: impl Fn(&TempoBreakpoint) -> f64, at: f64) -> TempoBreakpoint {
        let after = self.breakpoints.partition_point(|bp| key(bp) <= at);
        self.breakpoints
            .get(after.saturating_sub(1))
            .copied()
            .unwrap_or_else(|| self.origin())
    }

    /// Converts a beat into seconds from the start of the song.
    #[must_use]
    pub fn beat_to_time(&self, beat: f64) -> f64 {
        let segment = self.segment_by(|bp| bp.beat, beat);
        if segment.bpm <= 0.0 {
            return 0.0;
        }
        segment.time + (beat - segment.beat) / segment.bpm * SECONDS_PER_MINUTE
    }

    /// Converts seconds from the start of the song into a beat.
    #[must_use]
    pub fn time_to_beat(&self, time: f64) -> f64 {
        let segment = self.segment_by(|bp| bp.time, time);
        if segment.bpm <= 0.0 {
            return 0.0;
        }
        segment.beat + (time - segment.time) / SECONDS_PER_MINUTE * segment.bpm
    }

    /// The tempo in effect at `beat`.
    #[must_use]
    pub fn bpm_at_beat(&self, beat: f64) -> f64 {
        self.segment_by(|bp| bp.beat, beat).bpm
    }

    /// Length of one beat in seconds at `beat`, or `0.0` for a non-positive tempo.
    #[must_use]
    pub fn seconds_per_beat_at(&self, beat: f64) -> f64 {
        let bpm = self.bpm_at_beat(beat);
        if bpm > 0.0 {
            SECONDS_PER_MINUTE / bpm
        } else {
            0.0
        }
    }
}
