//! Canonical timed object types.
//!
//! All beats are in the map's own beat coordinates, that is before applying any
//! tempo change. Lane coordinates `x` and `y` may carry mapping-extension precision
//! values, see [`super::precision`].

use super::custom::CustomOverride;

/// An object positioned on the beat axis.
pub trait Timed {
    /// Beat where the object starts.
    fn beat(&self) -> f64;
}

macro_rules! impl_timed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Timed for $ty {
                fn beat(&self) -> f64 {
                    self.beat
                }
            }
        )*
    };
}

impl_timed!(
    Note,
    Bomb,
    Wall,
    Arc,
    Chain,
    LightEvent,
    RotationEvent,
    BoostEvent,
    TempoChange,
    Bookmark,
);

/// Saber side of a note, arc or chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteColor {
    /// Left saber, type `0`.
    Red,
    /// Right saber, type `1`.
    Blue,
}

impl NoteColor {
    /// Converts the numeric color code of the file formats.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Red),
            1 => Some(Self::Blue),
            _ => None,
        }
    }

    /// Numeric color code used by the file formats.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Red => 0,
            Self::Blue => 1,
        }
    }

    /// The color of the other saber.
    #[must_use]
    pub const fn swapped(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}

/// Cut direction of a note or an arc/chain head.
///
/// Values `0..=7` are the eight standard directions, `8` is a dot note and values
/// `>= 1000` are mapping-extension angles where `d - 1000` is the angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CutDirection(pub i32);

impl CutDirection {
    /// Up.
    pub const UP: Self = Self(0);
    /// Down.
    pub const DOWN: Self = Self(1);
    /// Any direction.
    pub const DOT: Self = Self(8);

    /// Create a new `CutDirection`.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Get the raw direction code.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether this is a dot note.
    #[must_use]
    pub const fn is_dot(self) -> bool {
        self.0 == Self::DOT.0
    }

    /// Whether this is a mapping-extension angle.
    #[must_use]
    pub const fn is_precision(self) -> bool {
        self.0 >= 1000
    }
}

impl From<i32> for CutDirection {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<CutDirection> for i32 {
    fn from(value: CutDirection) -> Self {
        value.0
    }
}

/// A color note to be cut.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Beat of the note.
    pub beat: f64,
    /// Lane index, `0..=3` on the standard grid.
    pub x: i32,
    /// Layer index, `0..=2` on the standard grid.
    pub y: i32,
    /// Saber side.
    pub color: NoteColor,
    /// Cut direction.
    pub direction: CutDirection,
    /// Extra rotation in degrees applied on top of the direction.
    pub angle_offset: i32,
    /// Per-object overrides.
    pub custom: Option<CustomOverride>,
}

/// A bomb, which must not be cut.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bomb {
    /// Beat of the bomb.
    pub beat: f64,
    /// Lane index.
    pub x: i32,
    /// Layer index.
    pub y: i32,
    /// Per-object overrides.
    pub custom: Option<CustomOverride>,
}

/// An obstacle spanning a duration of beats.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wall {
    /// Beat where the wall reaches the player.
    pub beat: f64,
    /// Length in beats. Negative durations are kept as authored.
    pub duration: f64,
    /// Leftmost lane, may be precision encoded.
    pub x: i32,
    /// Bottom layer, may be precision encoded.
    pub y: i32,
    /// Width in lanes, may be precision encoded.
    pub width: i32,
    /// Height in layers, may be precision encoded.
    pub height: i32,
    /// Per-object overrides.
    pub custom: Option<CustomOverride>,
}

impl Wall {
    /// Beat where the wall ends.
    #[must_use]
    pub fn end_beat(&self) -> f64 {
        self.beat + self.duration
    }
}

/// How the middle control point of an arc bends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MidAnchorMode {
    /// No bend.
    #[default]
    Straight,
    /// Bends clockwise.
    Clockwise,
    /// Bends counter-clockwise.
    CounterClockwise,
}

impl MidAnchorMode {
    /// Converts the numeric code of the file formats. Unknown codes are straight.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Clockwise,
            2 => Self::CounterClockwise,
            _ => Self::Straight,
        }
    }

    /// The anchor seen in a mirror.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        match self {
            Self::Straight => Self::Straight,
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// A curved guide connecting a head and a tail position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// Saber side.
    pub color: NoteColor,
    /// Beat of the head.
    pub beat: f64,
    /// Head lane.
    pub x: i32,
    /// Head layer.
    pub y: i32,
    /// Direction at the head.
    pub head_direction: CutDirection,
    /// Control point length at the head.
    pub head_multiplier: f64,
    /// Beat of the tail.
    pub tail_beat: f64,
    /// Tail lane.
    pub tail_x: i32,
    /// Tail layer.
    pub tail_y: i32,
    /// Direction at the tail.
    pub tail_direction: CutDirection,
    /// Control point length at the tail.
    pub tail_multiplier: f64,
    /// Bend of the middle control point.
    pub mid_anchor: MidAnchorMode,
    /// Per-object overrides.
    pub custom: Option<CustomOverride>,
}

/// A head note followed by a chain of small links.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chain {
    /// Saber side.
    pub color: NoteColor,
    /// Beat of the head.
    pub beat: f64,
    /// Head lane.
    pub x: i32,
    /// Head layer.
    pub y: i32,
    /// Direction at the head.
    pub head_direction: CutDirection,
    /// Beat of the last link.
    pub tail_beat: f64,
    /// Tail lane.
    pub tail_x: i32,
    /// Tail layer.
    pub tail_y: i32,
    /// Number of segments including the head.
    pub segment_count: i32,
    /// Fraction of the path actually covered by links.
    pub squish: f64,
    /// Per-object overrides.
    pub custom: Option<CustomOverride>,
}

/// A lighting event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightEvent {
    /// Beat of the event.
    pub beat: f64,
    /// Environment group the event targets.
    pub event_type: i32,
    /// Light state, for example on, off, flash or fade with a color.
    pub value: i32,
    /// Brightness, defaults to `1.0`.
    pub float_value: f64,
    /// Per-object overrides. Only `color` is meaningful for lights.
    pub custom: Option<CustomOverride>,
}

/// When a rotation event is applied relative to objects on the same beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationTiming {
    /// Affects objects on the same beat.
    Early,
    /// Affects only objects after the event.
    Late,
}

/// A rotation of the lane around the player.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationEvent {
    /// Beat of the event.
    pub beat: f64,
    /// Early or late execution.
    pub execution: RotationTiming,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
}

/// Switches the boost color palette.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostEvent {
    /// Beat of the event.
    pub beat: f64,
    /// Whether the boost palette is enabled from here on.
    pub on: bool,
}

/// A change of tempo.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempoChange {
    /// Beat where the new tempo starts.
    pub beat: f64,
    /// Beats per minute from `beat` on.
    pub bpm: f64,
}

/// An editor bookmark.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bookmark {
    /// Beat of the bookmark.
    pub beat: f64,
    /// Label.
    pub name: String,
    /// Display color as RGBA.
    pub color: Option<[f64; 4]>,
}

/// Any canonical object, tagged by its subtype.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapObject {
    /// A color note.
    Note(Note),
    /// A bomb.
    Bomb(Bomb),
    /// An obstacle.
    Wall(Wall),
    /// An arc.
    Arc(Arc),
    /// A chain.
    Chain(Chain),
    /// A lighting event.
    Light(LightEvent),
    /// A lane rotation.
    Rotation(RotationEvent),
    /// A boost palette switch.
    Boost(BoostEvent),
    /// A tempo change.
    Tempo(TempoChange),
    /// An editor bookmark.
    Bookmark(Bookmark),
}

impl Timed for MapObject {
    fn beat(&self) -> f64 {
        match self {
            Self::Note(o) => o.beat(),
            Self::Bomb(o) => o.beat(),
            Self::Wall(o) => o.beat(),
            Self::Arc(o) => o.beat(),
            Self::Chain(o) => o.beat(),
            Self::Light(o) => o.beat(),
            Self::Rotation(o) => o.beat(),
            Self::Boost(o) => o.beat(),
            Self::Tempo(o) => o.beat(),
            Self::Bookmark(o) => o.beat(),
        }
    }
}

macro_rules! impl_from_object {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for MapObject {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_object!(
    Note(Note),
    Bomb(Bomb),
    Wall(Wall),
    Arc(Arc),
    Chain(Chain),
    Light(LightEvent),
    Rotation(RotationEvent),
    Boost(BoostEvent),
    Tempo(TempoChange),
    Bookmark(Bookmark),
);
