use beatmap_rs::map::{
    mirror::{mirror_direction, mirror_lane, mirror_object, mirror_wall_lane},
    precision,
    prelude::*,
};
use pretty_assertions::assert_eq;

use super::note;

#[test]
fn test_precision_lane_mirrors_across_center() {
    // Lane 0.5 sits half a lane right of the left edge, its mirror half a lane left of lane 3.
    assert_eq!(mirror_lane(1500), precision::encode(2.5));
    assert_eq!(mirror_lane(mirror_lane(1500)), 1500);
    assert_eq!(mirror_lane(-2000), precision::encode(4.0));
}

#[test]
fn test_precision_walls_keep_their_width() {
    // A wall 1.5 lanes wide on the left edge ends on the right edge.
    let mirrored = mirror_wall_lane(1000, 2500);
    assert_eq!(precision::decode(mirrored), Some(2.5));
    assert_eq!(mirror_wall_lane(mirrored, 2500), 1000);
}

#[test]
fn test_precision_angles_are_negated() {
    assert_eq!(mirror_direction(CutDirection(1045)), CutDirection(1315));
    assert_eq!(mirror_direction(CutDirection(1000)), CutDirection(1000));
    assert_eq!(mirror_direction(CutDirection(2)), CutDirection(3));
    assert_eq!(mirror_direction(CutDirection::DOT), CutDirection::DOT);
}

#[test]
fn test_mirror_object_dispatch() {
    let object = MapObject::from(note(1.0, 0));
    let MapObject::Note(mirrored) = mirror_object(&object) else {
        panic!("mirroring must keep the kind");
    };
    assert_eq!(mirrored.x, 3);
    assert_eq!(mirrored.color, NoteColor::Blue);

    let tempo = MapObject::from(TempoChange {
        beat: 2.0,
        bpm: 90.0,
    });
    assert_eq!(mirror_object(&tempo), tempo);
}

#[cfg(feature = "json")]
#[test]
fn test_mirroring_converted_difficulties_twice_is_identity() {
    use beatmap_rs::convert::convert_auto;

    for payload in [
        include_bytes!("../files/legacy_expert.dat").as_slice(),
        include_bytes!("../files/current_expert.dat").as_slice(),
    ] {
        let difficulty = convert_auto(payload).expect("must be converted").difficulty;
        let mirrored = difficulty.mirrored();
        assert!(mirrored.is_sorted());
        assert_eq!(mirrored.mirrored(), difficulty);
    }
}
