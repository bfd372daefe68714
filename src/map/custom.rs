//! Per-object overrides and difficulty level custom data.

use super::objects::Bookmark;

/// Optional overrides attached to a single object.
///
/// When present, `position` and `size` take precedence over the geometry derived from
/// the grid, and `note_jump_speed` / `spawn_offset` take precedence over the
/// difficulty values when sizing the spawn window of this object.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomOverride {
    /// Free position `[x, y]` in lane units, where lane `0` is the center.
    pub position: Option<[f64; 2]>,
    /// RGBA color.
    pub color: Option<[f64; 4]>,
    /// Free size `[width, height, depth]`.
    pub size: Option<[f64; 3]>,
    /// Cut angle in degrees.
    pub angle: Option<f64>,
    /// Note jump speed for this object only.
    pub note_jump_speed: Option<f64>,
    /// Spawn offset for this object only.
    pub spawn_offset: Option<f64>,
}

impl CustomOverride {
    /// Whether no override is set at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.color.is_none()
            && self.size.is_none()
            && self.angle.is_none()
            && self.note_jump_speed.is_none()
            && self.spawn_offset.is_none()
    }

    /// Returns `None` if no override is set, to avoid keeping empty overrides around.
    #[must_use]
    pub fn into_option(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }
}

/// Difficulty level custom data which is carried through conversion verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyCustomData {
    /// Editor bookmarks, ascending by beat.
    pub bookmarks: Vec<Bookmark>,
}
