//! The canonical difficulty model.
//!
//! Every supported schema version is converted into a [`Difficulty`], which is the only
//! representation the rest of the crate works on. Each collection of a difficulty is sorted
//! ascending by beat, keeping the authored order of objects on the same beat.
//!
//! A difficulty is not modified after it is built. [`Difficulty::mirrored`] returns a new
//! difficulty instead of flipping the objects in place.

pub mod custom;
pub mod mirror;
pub mod objects;
pub mod precision;
pub mod prelude;

use itertools::Itertools;

use self::{custom::DifficultyCustomData, objects::*};

/// Version tag of the schema a difficulty was converted from, such as `"2.6.0"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemaVersion(pub String);

impl SchemaVersion {
    /// Create a new `SchemaVersion`.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// Get the version string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Major component of the version, if it is numeric.
    #[must_use]
    pub fn major(&self) -> Option<u32> {
        self.0.split('.').next()?.trim().parse().ok()
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One difficulty of a beatmap in canonical form.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Difficulty {
    /// Schema version the difficulty was converted from.
    pub version: SchemaVersion,
    /// Color notes.
    pub notes: Vec<Note>,
    /// Bombs.
    pub bombs: Vec<Bomb>,
    /// Obstacles.
    pub walls: Vec<Wall>,
    /// Arcs.
    pub arcs: Vec<Arc>,
    /// Chains.
    pub chains: Vec<Chain>,
    /// Lighting events.
    pub light_events: Vec<LightEvent>,
    /// Lane rotations.
    pub rotation_events: Vec<RotationEvent>,
    /// Boost palette switches.
    pub boost_events: Vec<BoostEvent>,
    /// Tempo changes.
    pub tempo_changes: Vec<TempoChange>,
    /// Whether the basic events should also drive environments without v3 lighting.
    pub use_normal_events_as_compatible_events: bool,
    /// Custom data carried through conversion.
    pub custom_data: DifficultyCustomData,
}

fn sort_by_beat<T: Timed>(items: &mut [T]) {
    // `sort_by` is stable, which keeps the authored order on ties.
    items.sort_by(|a, b| a.beat().total_cmp(&b.beat()));
}

fn is_sorted_by_beat<T: Timed>(items: &[T]) -> bool {
    items
        .iter()
        .tuple_windows()
        .all(|(a, b)| a.beat().total_cmp(&b.beat()).is_le())
}

impl Difficulty {
    /// Sorts every collection ascending by beat. Objects on the same beat keep their order.
    pub fn sort_collections(&mut self) {
        sort_by_beat(&mut self.notes);
        sort_by_beat(&mut self.bombs);
        sort_by_beat(&mut self.walls);
        sort_by_beat(&mut self.arcs);
        sort_by_beat(&mut self.chains);
        sort_by_beat(&mut self.light_events);
        sort_by_beat(&mut self.rotation_events);
        sort_by_beat(&mut self.boost_events);
        sort_by_beat(&mut self.tempo_changes);
        sort_by_beat(&mut self.custom_data.bookmarks);
    }

    /// Whether every collection is sorted ascending by beat.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        is_sorted_by_beat(&self.notes)
            && is_sorted_by_beat(&self.bombs)
            && is_sorted_by_beat(&self.walls)
            && is_sorted_by_beat(&self.arcs)
            && is_sorted_by_beat(&self.chains)
            && is_sorted_by_beat(&self.light_events)
            && is_sorted_by_beat(&self.rotation_events)
            && is_sorted_by_beat(&self.boost_events)
            && is_sorted_by_beat(&self.tempo_changes)
            && is_sorted_by_beat(&self.custom_data.bookmarks)
    }

    /// Builds a sorted difficulty from loose objects.
    #[must_use]
    pub fn from_objects(version: SchemaVersion, objects: impl IntoIterator<Item = MapObject>) -> Self {
        let mut difficulty = Self {
            version,
            ..Self::default()
        };
        for object in objects {
            match object {
                MapObject::Note(o) => difficulty.notes.push(o),
                MapObject::Bomb(o) => difficulty.bombs.push(o),
                MapObject::Wall(o) => difficulty.walls.push(o),
                MapObject::Arc(o) => difficulty.arcs.push(o),
                MapObject::Chain(o) => difficulty.chains.push(o),
                MapObject::Light(o) => difficulty.light_events.push(o),
                MapObject::Rotation(o) => difficulty.rotation_events.push(o),
                MapObject::Boost(o) => difficulty.boost_events.push(o),
                MapObject::Tempo(o) => difficulty.tempo_changes.push(o),
                MapObject::Bookmark(o) => difficulty.custom_data.bookmarks.push(o),
            }
        }
        difficulty.sort_collections();
        difficulty
    }

    /// Iterates over every object of the difficulty ascending by beat.
    pub fn objects(&self) -> impl Iterator<Item = MapObject> + '_ {
        let collections: [Box<dyn Iterator<Item = MapObject> + '_>; 10] = [
            Box::new(self.notes.iter().cloned().map(MapObject::Note)),
            Box::new(self.bombs.iter().cloned().map(MapObject::Bomb)),
            Box::new(self.walls.iter().cloned().map(MapObject::Wall)),
            Box::new(self.arcs.iter().cloned().map(MapObject::Arc)),
            Box::new(self.chains.iter().cloned().map(MapObject::Chain)),
            Box::new(self.light_events.iter().cloned().map(MapObject::Light)),
            Box::new(self.rotation_events.iter().cloned().map(MapObject::Rotation)),
            Box::new(self.boost_events.iter().cloned().map(MapObject::Boost)),
            Box::new(self.tempo_changes.iter().cloned().map(MapObject::Tempo)),
            Box::new(
                self.custom_data
                    .bookmarks
                    .iter()
                    .cloned()
                    .map(MapObject::Bookmark),
            ),
        ];
        collections
            .into_iter()
            .kmerge_by(|a, b| a.beat() < b.beat())
    }

    /// Total number of objects in all collections.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.notes.len()
            + self.bombs.len()
            + self.walls.len()
            + self.arcs.len()
            + self.chains.len()
            + self.light_events.len()
            + self.rotation_events.len()
            + self.boost_events.len()
            + self.tempo_changes.len()
            + self.custom_data.bookmarks.len()
    }

    /// The last beat touched by a playable object, including the ends of spans.
    #[must_use]
    pub fn last_beat(&self) -> f64 {
        let notes = self.notes.iter().map(|n| n.beat);
        let bombs = self.bombs.iter().map(|b| b.beat);
        let walls = self.walls.iter().map(Wall::end_beat);
        let arcs = self.arcs.iter().map(|a| a.tail_beat.max(a.beat));
        let chains = self.chains.iter().map(|c| c.tail_beat.max(c.beat));
        notes
            .chain(bombs)
            .chain(walls)
            .chain(arcs)
            .chain(chains)
            .fold(0.0, f64::max)
    }

    /// Returns the left/right mirrored difficulty.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        mirror::mirror_difficulty(self)
    }
}
