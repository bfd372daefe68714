//! Left/right mirroring of canonical objects.
//!
//! Every function returns a new value. Lighting, boost and tempo events have no
//! horizontal component and are returned unchanged; rotations are negated.

use super::{
    Difficulty,
    custom::CustomOverride,
    objects::{Arc, Bomb, Chain, CutDirection, MapObject, Note, RotationEvent, Wall},
    precision,
};

/// Number of lanes on the standard grid.
const GRID_LANES: f64 = 4.0;

/// Mirror table for the nine standard cut directions, indexed by direction.
const DIRECTION_MIRROR: [i32; 9] = [0, 1, 3, 2, 5, 4, 7, 6, 8];

/// Mirrors a lane index across the center of the four lane grid.
///
/// Precision values are decoded, reflected and encoded again. `-1000` and `1000` both
/// encode lane 0 and both mirror to `4000`, which mirrors back to `1000`.
#[must_use]
pub fn mirror_lane(x: i32) -> i32 {
    match precision::decode(x) {
        Some(p) => precision::encode(-(p - 2.0) + 1.0),
        None => -(x - 2) + 1,
    }
}

/// Mirrors a free override coordinate, where `0` is the center of the lanes.
#[must_use]
pub fn mirror_free(p: f64) -> f64 {
    -(p + 0.5) - 0.5
}

/// Mirrors the left edge of a wall of the given width.
///
/// When either the position or the width is precision encoded, the mirrored edge
/// is stored precision encoded.
#[must_use]
pub fn mirror_wall_lane(x: i32, width: i32) -> i32 {
    if precision::is_precision(x) || precision::is_precision(width) {
        let left = precision::grid_value(x);
        let width = precision::grid_value(width);
        precision::encode(GRID_LANES - left - width)
    } else {
        4 - x - width
    }
}

/// Mirrors a cut direction.
///
/// Standard directions use the left/right swap table, precision angles are negated
/// modulo 360. Unknown codes are kept.
#[must_use]
pub fn mirror_direction(direction: CutDirection) -> CutDirection {
    let d = direction.value();
    if direction.is_precision() {
        let angle = (d - 1000) % 360;
        return CutDirection(1000 + (-angle).rem_euclid(360));
    }
    usize::try_from(d)
        .ok()
        .and_then(|i| DIRECTION_MIRROR.get(i))
        .map_or(direction, |&m| CutDirection(m))
}

fn mirror_custom(custom: Option<&CustomOverride>) -> Option<CustomOverride> {
    custom.map(|c| CustomOverride {
        position: c.position.map(|[x, y]| [mirror_free(x), y]),
        angle: c.angle.map(|a| -a),
        ..c.clone()
    })
}

fn mirror_wall_custom(custom: Option<&CustomOverride>) -> Option<CustomOverride> {
    custom.map(|c| {
        let width = c.size.map_or(1.0, |[w, _, _]| w);
        CustomOverride {
            position: c.position.map(|[x, y]| [-x - width, y]),
            ..c.clone()
        }
    })
}

/// Mirrors a color note.
#[must_use]
pub fn mirror_note(note: &Note) -> Note {
    Note {
        beat: note.beat,
        x: mirror_lane(note.x),
        y: note.y,
        color: note.color.swapped(),
        direction: mirror_direction(note.direction),
        angle_offset: -note.angle_offset,
        custom: mirror_custom(note.custom.as_ref()),
    }
}

/// Mirrors a bomb.
#[must_use]
pub fn mirror_bomb(bomb: &Bomb) -> Bomb {
    Bomb {
        beat: bomb.beat,
        x: mirror_lane(bomb.x),
        y: bomb.y,
        custom: mirror_custom(bomb.custom.as_ref()),
    }
}

/// Mirrors a wall, taking its width into account.
#[must_use]
pub fn mirror_wall(wall: &Wall) -> Wall {
    Wall {
        x: mirror_wall_lane(wall.x, wall.width),
        custom: mirror_wall_custom(wall.custom.as_ref()),
        ..wall.clone()
    }
}

/// Mirrors an arc, including its mid anchor.
#[must_use]
pub fn mirror_arc(arc: &Arc) -> Arc {
    Arc {
        color: arc.color.swapped(),
        x: mirror_lane(arc.x),
        head_direction: mirror_direction(arc.head_direction),
        tail_x: mirror_lane(arc.tail_x),
        tail_direction: mirror_direction(arc.tail_direction),
        mid_anchor: arc.mid_anchor.mirrored(),
        custom: mirror_custom(arc.custom.as_ref()),
        ..arc.clone()
    }
}

/// Mirrors a chain.
#[must_use]
pub fn mirror_chain(chain: &Chain) -> Chain {
    Chain {
        color: chain.color.swapped(),
        x: mirror_lane(chain.x),
        head_direction: mirror_direction(chain.head_direction),
        tail_x: mirror_lane(chain.tail_x),
        custom: mirror_custom(chain.custom.as_ref()),
        ..chain.clone()
    }
}

/// Mirrors a lane rotation.
#[must_use]
pub fn mirror_rotation(event: &RotationEvent) -> RotationEvent {
    RotationEvent {
        rotation: -event.rotation,
        ..event.clone()
    }
}

/// Mirrors any object by dispatching on its kind.
#[must_use]
pub fn mirror_object(object: &MapObject) -> MapObject {
    match object {
        MapObject::Note(o) => MapObject::Note(mirror_note(o)),
        MapObject::Bomb(o) => MapObject::Bomb(mirror_bomb(o)),
        MapObject::Wall(o) => MapObject::Wall(mirror_wall(o)),
        MapObject::Arc(o) => MapObject::Arc(mirror_arc(o)),
        MapObject::Chain(o) => MapObject::Chain(mirror_chain(o)),
        MapObject::Rotation(o) => MapObject::Rotation(mirror_rotation(o)),
        MapObject::Light(_) | MapObject::Boost(_) | MapObject::Tempo(_) | MapObject::Bookmark(_) => {
            object.clone()
        }
    }
}

/// Mirrors a whole difficulty. The collections stay sorted.
#[must_use]
pub fn mirror_difficulty(difficulty: &Difficulty) -> Difficulty {
    Difficulty {
        notes: difficulty.notes.iter().map(mirror_note).collect(),
        bombs: difficulty.bombs.iter().map(mirror_bomb).collect(),
        walls: difficulty.walls.iter().map(mirror_wall).collect(),
        arcs: difficulty.arcs.iter().map(mirror_arc).collect(),
        chains: difficulty.chains.iter().map(mirror_chain).collect(),
        rotation_events: difficulty
            .rotation_events
            .iter()
            .map(mirror_rotation)
            .collect(),
        ..difficulty.clone()
    }
}
