//! Tests for `beatmap_rs::convert` and `beatmap_rs::info`.
#![cfg(feature = "json")]

mod info;
mod v2;
mod v3;

use beatmap_rs::convert::{ConvertOutput, convert_auto};

pub(crate) const LEGACY_EXPERT: &[u8] = include_bytes!("../files/legacy_expert.dat");
pub(crate) const CURRENT_EXPERT: &[u8] = include_bytes!("../files/current_expert.dat");

/// Converts a fixture, which must be readable.
pub(crate) fn convert_fixture(payload: &[u8]) -> ConvertOutput {
    convert_auto(payload).expect("must be converted")
}
