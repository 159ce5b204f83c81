//! Property-based invariant tests for room geometry.
//!
//! 1. Overlap is symmetric.
//! 2. Rectangles sharing only an edge never overlap.
//! 3. Corner drags always produce a valid room and keep the opposite corner.
//! 4. Room moves always keep the room within the stage margins.
//! 5. Dragged items stay inside the room whenever they fit.
//! 6. Door snaps land on an allowed wall, exactly on it.
//! 7. Auto-placement returns a free, in-room position.
//! 8. Four quarter turns restore the starting footprint.
//!
//! Coordinates are drawn as whole pixels so containment checks are exact.

use proptest::prelude::*;
use roomplan::consts::{MARGIN, MIN_HEIGHT, MIN_WIDTH, STAGE_HEIGHT, STAGE_WIDTH};
use roomplan::door::{Door, Wall, snap_door};
use roomplan::geometry::{Point, Rect, effective_size, is_overlapping};
use roomplan::placed::drag_bound;
use roomplan::room::{Corner, Room};
use roomplan::zones::{find_free_position, is_blocked};

// ── Helpers ─────────────────────────────────────────────────────────────

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-200i32..=1000, -200i32..=1000, 0i32..=400, 0i32..=400)
        .prop_map(|(x, y, w, h)| Rect::new(x.into(), y.into(), w.into(), h.into()))
}

/// Rooms satisfying every room invariant.
fn room_strategy() -> impl Strategy<Value = Room> {
    let max_w = (STAGE_WIDTH - 2.0 * MARGIN) as i32;
    let max_h = (STAGE_HEIGHT - 2.0 * MARGIN) as i32;
    (MIN_WIDTH as i32..=max_w, MIN_HEIGHT as i32..=max_h).prop_flat_map(move |(w, h)| {
        (0..=max_w - w, 0..=max_h - h).prop_map(move |(dx, dy)| {
            Room::new(MARGIN + f64::from(dx), MARGIN + f64::from(dy), f64::from(w), f64::from(h))
        })
    })
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (-500i32..=1500, -500i32..=1500).prop_map(|(x, y)| Point::new(x.into(), y.into()))
}

fn corner_strategy() -> impl Strategy<Value = Corner> {
    prop::sample::select(Corner::ALL.to_vec())
}

fn wall_strategy() -> impl Strategy<Value = Wall> {
    prop::sample::select(Wall::ORDER.to_vec())
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Overlap
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(is_overlapping(&a, &b), is_overlapping(&b, &a));
    }

    #[test]
    fn shared_edge_is_not_overlap(a in rect_strategy(), dy in -100i32..=100, w in 1i32..=100, h in 1i32..=100) {
        let right = Rect::new(a.right(), a.y + f64::from(dy), w.into(), h.into());
        let below = Rect::new(a.x + f64::from(dy), a.bottom(), w.into(), h.into());
        prop_assert!(!is_overlapping(&a, &right), "a={:?} right={:?}", a, right);
        prop_assert!(!is_overlapping(&a, &below), "a={:?} below={:?}", a, below);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–4. Room resize and move
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn corner_drag_keeps_room_valid(room in room_strategy(), corner in corner_strategy(), pos in point_strategy()) {
        let resized = room.drag_corner(corner, pos);
        prop_assert!(resized.is_valid(), "{:?} dragged {:?} to {:?} gave {:?}", room, corner, pos, resized);
        prop_assert_eq!(resized.corner(corner.opposite()), room.corner(corner.opposite()));
    }

    #[test]
    fn room_move_stays_on_stage(room in room_strategy(), pos in point_strategy()) {
        let origin = room.clamp_move(pos.x, pos.y);
        let moved = Room::new(origin.x, origin.y, room.width, room.height);
        prop_assert!(moved.is_valid(), "{:?} moved to {:?}", room, origin);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Item drag containment
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dragged_item_stays_in_room(room in room_strategy(), w in 1i32..=50, h in 1i32..=50, pos in point_strategy()) {
        let size = (f64::from(w), f64::from(h));
        let bound = drag_bound(&room, size, pos, &[]);
        let bbox = Rect::centered(bound.position, size.0, size.1);
        prop_assert!(room.rect().contains_rect(&bbox), "{:?} not inside {:?}", bbox, room);
        prop_assert!(!bound.over_zone);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Door snapping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn door_snap_lands_on_allowed_wall(room in room_strategy(), wall in wall_strategy(), pos in point_strategy()) {
        let mut door = Door::on_wall(&room, wall);
        let snap = snap_door(&room, wall, pos);
        prop_assert_ne!(snap.wall, wall.opposite());
        door.apply_snap(snap);
        prop_assert!(door.is_on_wall(&room), "{:?} off wall after snap to {:?}", door, pos);
        prop_assert_eq!(door.wall, snap.wall);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Auto-placement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn free_position_is_free(
        room in room_strategy(),
        w in 1i32..=60,
        h in 1i32..=60,
        zones in prop::collection::vec(rect_strategy(), 0..6),
    ) {
        let size = (f64::from(w), f64::from(h));
        if let Some(pos) = find_free_position(&room, size, &zones) {
            let bbox = Rect::centered(pos, size.0, size.1);
            prop_assert!(room.rect().contains_rect(&bbox));
            prop_assert!(!is_blocked(&bbox, &zones));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. Rotation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn quarter_turns_swap_then_restore(w in 0i32..=500, h in 0i32..=500, turns in 0u8..8) {
        let (w, h) = (f64::from(w), f64::from(h));
        let rotation = f64::from(turns) * 90.0;
        let expected = if turns % 2 == 1 { (h, w) } else { (w, h) };
        prop_assert_eq!(effective_size(w, h, rotation), expected);
    }
}
