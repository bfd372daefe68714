//! Conversion between beats and seconds, and the jump geometry derived from it.
//!
//! - [`timeline::BpmTimeline`] integrates tempo changes into a piecewise linear
//!   beat to time mapping.
//! - [`jump::JumpSettings`] derives how long an object is visible before it reaches the
//!   player from the current tempo and the note jump speed.

pub mod jump;
pub mod timeline;

pub use self::{
    jump::{JumpSettings, half_jump_duration},
    timeline::{BpmTimeline, TempoBreakpoint},
};
