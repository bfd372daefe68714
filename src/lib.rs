//! Beatmap preview core for block-slicing rhythm game charts.
//!
//! This crate reads difficulty files of the legacy `2.x` and the current `3.x` schema, and
//! turns them into one canonical [`map::Difficulty`]. On top of that model it provides what
//! a previewer needs to show a chart at an arbitrary song position:
//!
//! - [`timing::BpmTimeline`] converts between beats and seconds under tempo changes.
//! - [`timing::JumpSettings`] computes the half jump duration and reaction time.
//! - [`spawn::SpawnScheduler`] keeps the set of objects visible in the spawn window and
//!   reports which entered and exited since the last update.
//! - [`preview::DifficultyPreview`] bundles one scheduler per object kind with the event
//!   triggers, driven by the playback position.
//!
//! Objects of the `3.x` schema carry the mapping-extension precision encoding: values at or
//! beyond `1000` in magnitude encode fractional positions. See [`map::precision`].
//!
//! # Features
//!
//! - `serde`: serialization of the canonical model.
//! - `json` (default): the schema converter and the map info reader.
//! - `loader` (default): background conversion on a worker thread.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
#[cfg(feature = "json")]
pub mod convert;
#[cfg(feature = "json")]
pub mod info;
#[cfg(feature = "loader")]
pub mod loader;
pub mod map;
pub mod preview;
pub mod spawn;
pub mod timing;
