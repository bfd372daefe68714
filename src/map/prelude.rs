//! Prelude module for the canonical model.
//!
//! This module re-exports all public types of the `map` module for convenient access.

pub use super::{
    Difficulty, SchemaVersion,
    custom::{CustomOverride, DifficultyCustomData},
    mirror::mirror_object,
    objects::{
        Arc, Bomb, BoostEvent, Bookmark, Chain, CutDirection, LightEvent, MapObject,
        MidAnchorMode, Note, NoteColor, RotationEvent, RotationTiming, TempoChange, Timed, Wall,
    },
};
