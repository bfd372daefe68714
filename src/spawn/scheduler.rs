//! Incremental scheduler over one sorted object collection.

use std::{collections::BTreeSet, marker::PhantomData, sync::Arc};

use itertools::Itertools;
use log::{debug, trace};

use super::{
    ObjectIndex, SpawnContext, SpawnDelta, SpawnEntry, SpawnObject, SpawnWindow,
    rule::{SpawnRule, WindowPosition},
};
use crate::timing::BpmTimeline;

/// Tracks the visible subset of one object category across ticks.
///
/// Objects are identified by their [`ObjectIndex`] in the sorted slice the scheduler was
/// built from. Updating with the same context twice yields an empty delta the second
/// time: an object enters at most once while it stays visible, and exits exactly once.
///
/// The walk starts from a cursor which only moves forward while time moves forward.
/// Moving backward re-seeks the cursor with a binary search over the running maximum
/// of end times. Both the cursor and the end of the walk use the widest window among
/// the difficulty values and every per-object override, so an object with a longer
/// window than its neighbours is never skipped.
#[derive(Debug, Clone)]
pub struct SpawnScheduler<R> {
    timeline: Arc<BpmTimeline>,
    entries: Vec<SpawnEntry>,
    /// `max_end_times[i]` is the latest `end_time` among `entries[..=i]`.
    max_end_times: Vec<f64>,
    /// Distinct note jump speed and spawn offset overrides among the entries.
    overrides: Vec<(Option<f64>, Option<f64>)>,
    active: BTreeSet<ObjectIndex>,
    cursor: usize,
    /// Time edge of the previous update, `None` before the first one.
    last_edge: Option<f64>,
    _rule: PhantomData<R>,
}

impl<R: SpawnRule> SpawnScheduler<R> {
    /// Builds a scheduler over `objects`, which must be sorted ascending by beat.
    #[must_use]
    pub fn new<T: SpawnObject>(objects: &[T], timeline: Arc<BpmTimeline>) -> Self {
        let entries: Vec<_> = objects
            .iter()
            .map(|object| SpawnEntry::new(object, &timeline))
            .collect();
        let max_end_times = entries
            .iter()
            .scan(f64::NEG_INFINITY, |max, entry| {
                *max = max.max(entry.end_time);
                Some(*max)
            })
            .collect();
        let overrides = entries
            .iter()
            .filter(|entry| entry.note_jump_speed.is_some() || entry.spawn_offset.is_some())
            .map(|entry| (entry.note_jump_speed, entry.spawn_offset))
            .unique_by(|(njs, offset)| (njs.map(f64::to_bits), offset.map(f64::to_bits)))
            .collect();
        Self {
            timeline,
            entries,
            max_end_times,
            overrides,
            active: BTreeSet::new(),
            cursor: 0,
            last_edge: None,
            _rule: PhantomData,
        }
    }

    /// The timeline the object times were computed on.
    #[must_use]
    pub const fn timeline(&self) -> &Arc<BpmTimeline> {
        &self.timeline
    }

    /// Precomputed timing of every object.
    #[must_use]
    pub fn entries(&self) -> &[SpawnEntry] {
        &self.entries
    }

    /// Number of scheduled objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no objects to schedule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Currently visible objects, ascending.
    pub fn active(&self) -> impl Iterator<Item = ObjectIndex> + '_ {
        self.active.iter().copied()
    }

    /// Whether `index` is currently visible.
    #[must_use]
    pub fn is_active(&self, index: ObjectIndex) -> bool {
        self.active.contains(&index)
    }

    /// Moves the cursor to the first object which may still be visible at `edge`.
    fn seek(&mut self, edge: f64) {
        match self.last_edge {
            Some(last) if edge >= last => {
                while self
                    .max_end_times
                    .get(self.cursor)
                    .is_some_and(|&end| end < edge)
                {
                    self.cursor += 1;
                }
            }
            _ => {
                self.cursor = self.max_end_times.partition_point(|&end| end < edge);
                debug!("spawn cursor re-seeked to {} at edge {edge}", self.cursor);
            }
        }
        self.last_edge = Some(edge);
    }

    /// Earliest spawn and latest despawn among all windows any entry may use.
    fn widest_window(&self, context: &SpawnContext) -> SpawnWindow {
        self.overrides
            .iter()
            .map(|&(njs, offset)| context.window_with(njs, offset))
            .fold(context.window(), |widest, window| SpawnWindow {
                reaction_time: widest.reaction_time.max(window.reaction_time),
                behind_camera_time: widest.behind_camera_time.min(window.behind_camera_time),
            })
    }

    /// Brings the visible set up to date with `context`.
    pub fn update(&mut self, context: &SpawnContext) -> SpawnDelta {
        if self.entries.is_empty() {
            return SpawnDelta::default();
        }
        let time = context.current_time;
        let widest = self.widest_window(context);
        // An object is behind once `time > end_time - behind_camera_time`.
        self.seek(time + widest.behind_camera_time.min(0.0));

        let mut delta = SpawnDelta::default();
        let entries = &self.entries;
        self.active.retain(|&index| {
            let visible = entries.get(index.value()).is_some_and(|entry| {
                R::position(entry, &context.window_for(entry), time) == WindowPosition::Inside
            });
            if !visible {
                delta.exited.push(index);
            }
            visible
        });

        let mut last_end_beat = f64::NEG_INFINITY;
        for (i, entry) in self.entries.iter().enumerate().skip(self.cursor) {
            match R::position(entry, &context.window_for(entry), time) {
                WindowPosition::Inside => {
                    if self.active.insert(ObjectIndex(i)) {
                        delta.entered.push(ObjectIndex(i));
                    }
                }
                WindowPosition::Behind => {}
                WindowPosition::Ahead => {
                    let overlapping = R::CONTINUES_OVERLAPS && entry.start_beat < last_end_beat;
                    // Later objects start no earlier, so none of them can spawn yet.
                    if !overlapping && entry.start_time - widest.reaction_time > time {
                        break;
                    }
                }
            }
            last_end_beat = last_end_beat.max(entry.end_beat);
        }

        if !delta.is_empty() {
            trace!(
                "spawn update at beat {}: {} entered, {} exited",
                context.current_beat,
                delta.entered.len(),
                delta.exited.len()
            );
        }
        delta
    }

    /// Exits every visible object and forgets the cursor.
    pub fn reset(&mut self) -> SpawnDelta {
        self.cursor = 0;
        self.last_edge = None;
        SpawnDelta {
            entered: Vec::new(),
            exited: std::mem::take(&mut self.active).into_iter().collect(),
        }
    }
}
