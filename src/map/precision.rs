//! Mapping-extension precision codec.
//!
//! Mapping extensions store sub-grid positions in the same integer fields as the
//! standard grid. A value `v` with `|v| >= 1000` is a fixed-point position offset
//! by 1000 away from zero: `1000` is lane 0, `1500` is lane 0.5, `4000` is lane 3
//! and `-2000` is lane -1. Everything closer to zero is a plain grid index.
//!
//! The same encoding is used for wall widths, wall heights and wall offsets.

/// Offset between precision values and the fractional position they encode.
pub const PRECISION_OFFSET: i32 = 1000;

/// Number of precision units in one grid cell.
const UNITS_PER_CELL: f64 = 1000.0;

/// Height of a full-height wall in grid layers.
pub const FULL_WALL_LAYERS: f64 = 5.0;

/// Returns whether `value` is a precision encoded coordinate.
#[must_use]
pub const fn is_precision(value: i32) -> bool {
    value.unsigned_abs() >= PRECISION_OFFSET.unsigned_abs()
}

/// Decodes a precision value into a fractional grid position.
///
/// Returns `None` for plain grid indices.
///
/// `-1000` decodes to `-0.0`, which keeps [`encode`] an exact inverse for every
/// precision value.
#[must_use]
pub fn decode(value: i32) -> Option<f64> {
    if !is_precision(value) {
        return None;
    }
    let sign = if value < 0 { -1.0 } else { 1.0 };
    let magnitude = value.unsigned_abs() - PRECISION_OFFSET.unsigned_abs();
    Some(sign * f64::from(magnitude) / UNITS_PER_CELL)
}

/// Encodes a fractional grid position into a precision value.
///
/// This is the inverse of [`decode`]: `encode(decode(v)) == v` for all `|v| >= 1000`.
#[must_use]
pub fn encode(position: f64) -> i32 {
    let offset = f64::from(PRECISION_OFFSET).copysign(position);
    ((position * UNITS_PER_CELL).round() + offset) as i32
}

/// Gets the grid position of `value`, decoding it if it is precision encoded.
#[must_use]
pub fn grid_value(value: i32) -> f64 {
    decode(value).unwrap_or_else(|| f64::from(value))
}

/// Vertical placement of a wall decoded from a legacy mapping-extension wall type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreciseWallPlacement {
    /// Bottom of the wall in grid layers.
    pub offset_layers: f64,
    /// Height of the wall in grid layers.
    pub height_layers: f64,
}

impl PreciseWallPlacement {
    /// Precision encoded `y` field of the canonical wall.
    #[must_use]
    pub fn encoded_offset(&self) -> i32 {
        encode(self.offset_layers)
    }

    /// Precision encoded `height` field of the canonical wall.
    #[must_use]
    pub fn encoded_height(&self) -> i32 {
        encode(self.height_layers)
    }
}

/// Upper bound of the simple `1000 + height` wall type form.
const SIMPLE_WALL_TYPE_MAX: i32 = 4000;
/// Base of the packed `height * 1000 + offset + 4001` wall type form.
const PACKED_WALL_TYPE_BASE: i32 = 4001;

/// Decodes a legacy wall `type` carrying a mapping-extension height.
///
/// - `1000..=4000`: `type - 1000` is the height in thousandths of a full wall, the wall
///   stands on the floor.
/// - `> 4000`: `type - 4001` packs the height (`/ 1000`) and the offset (`% 1000`),
///   both in thousandths of a full wall.
///
/// Returns `None` when `wall_type` is not a precision wall type.
#[must_use]
pub fn decode_legacy_wall_type(wall_type: i32) -> Option<PreciseWallPlacement> {
    let to_layers = |thousandths: i32| f64::from(thousandths) / UNITS_PER_CELL * FULL_WALL_LAYERS;
    match wall_type {
        PRECISION_OFFSET..=SIMPLE_WALL_TYPE_MAX => Some(PreciseWallPlacement {
            offset_layers: 0.0,
            height_layers: to_layers(wall_type - PRECISION_OFFSET),
        }),
        t if t > SIMPLE_WALL_TYPE_MAX => {
            let packed = t - PACKED_WALL_TYPE_BASE;
            Some(PreciseWallPlacement {
                offset_layers: to_layers(packed % 1000),
                height_layers: to_layers(packed / 1000),
            })
        }
        _ => None,
    }
}
