#![allow(clippy::float_cmp)]

use super::*;
use crate::consts::{MARGIN, STAGE_WIDTH};
use crate::error::ErrorCode;
use crate::geometry::mm_to_pixels;

fn room() -> Room {
    Room::new(100.0, 100.0, 300.0, 200.0)
}

fn bin(width_mm: f64, depth_mm: f64) -> ContainerDto {
    ContainerDto { id: 1, name: "240 L".into(), width: Some(width_mm), depth: Some(depth_mm), ..Default::default() }
}

// =============================================================
// Add / remove
// =============================================================

#[test]
fn add_container_lands_at_room_center() {
    let mut layout = Layout::new(room());
    let entity = layout.add_container(bin(600.0, 600.0)).unwrap();
    let c = layout.container(entity.id()).unwrap();
    assert_eq!(c.center(), Point::new(250.0, 200.0));
    assert_eq!(c.width, mm_to_pixels(Some(600.0)));
}

#[test]
fn second_container_avoids_first() {
    let mut layout = Layout::new(room());
    let first = layout.add_container(bin(600.0, 600.0)).unwrap();
    let second = layout.add_container(bin(600.0, 600.0)).unwrap();
    let a = layout.container(first.id()).unwrap().bounding_box();
    let b = layout.container(second.id()).unwrap().bounding_box();
    assert!(!crate::geometry::is_overlapping(&a, &b));
    assert!(layout.violations().is_empty());
}

#[test]
fn add_fails_when_room_is_full() {
    let mut layout = Layout::new(room());
    let err = layout.add_other_object("wall block", 400.0, 50.0).unwrap_err();
    assert!(matches!(err, PlanError::NoFreePlacement { .. }));
    assert_eq!(err.error_code(), "E_NO_FREE_PLACEMENT");
    assert!(layout.other_objects.is_empty());
}

#[test]
fn add_avoids_door_zone() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Top);
    let obj = layout.add_other_object("sink", 100.0, 100.0).unwrap();
    let zone = layout.door(door.id()).unwrap().zone();
    let bbox = layout.other_object(obj.id()).unwrap().bounding_box();
    assert!(!crate::geometry::is_overlapping(&zone, &bbox));
}

#[test]
fn remove_deletes_and_reports_missing() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Left);
    layout.remove(door).unwrap();
    assert!(layout.doors.is_empty());
    let err = layout.remove(door).unwrap_err();
    assert!(matches!(err, PlanError::EntityNotFound(e) if e == door));
}

#[test]
fn entities_lists_every_kind() {
    let mut layout = Layout::new(room());
    layout.add_door(Wall::Bottom);
    layout.add_container(bin(500.0, 500.0)).unwrap();
    layout.add_other_object("pillar", 20.0, 20.0).unwrap();
    let kinds: Vec<EntityRef> = layout.entities().iter().map(PlacedEntity::entity_ref).collect();
    assert!(matches!(kinds[0], EntityRef::Door(_)));
    assert!(matches!(kinds[1], EntityRef::Container(_)));
    assert!(matches!(kinds[2], EntityRef::OtherObject(_)));
    assert!(layout.entity(kinds[1]).is_some());
}

// =============================================================
// Room move / resize
// =============================================================

#[test]
fn move_room_translates_contents() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Top);
    let obj = layout.add_other_object("pillar", 20.0, 20.0).unwrap();
    let origin = layout.move_room(150.0, 120.0);
    assert_eq!(origin, Point::new(150.0, 120.0));
    assert_eq!(layout.door(door.id()).unwrap().position(), Point::new(300.0, 120.0));
    assert_eq!(layout.other_object(obj.id()).unwrap().center(), Point::new(300.0, 220.0));
}

#[test]
fn move_room_is_clamped_to_stage() {
    let mut layout = Layout::new(room());
    let origin = layout.move_room(5000.0, 0.0);
    assert_eq!(origin.x, STAGE_WIDTH - MARGIN - 300.0);
    assert_eq!(origin.y, MARGIN);
    assert!(layout.room.is_valid());
}

#[test]
fn shrinking_room_refits_doors_and_items() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Bottom);
    let obj = layout.add_other_object("pillar", 20.0, 20.0).unwrap();
    layout.resize_room(Corner::BottomRight, Point::new(200.0, 180.0));
    let d = layout.door(door.id()).unwrap();
    assert!(d.is_on_wall(&layout.room));
    assert_eq!(d.y, 180.0);
    let bbox = layout.other_object(obj.id()).unwrap().bounding_box();
    assert!(layout.room.rect().contains_rect(&bbox));
}

#[test]
fn shrinking_room_moves_item_off_door_zone() {
    let mut layout = Layout::new(room());
    layout.add_door(Wall::Left);
    let obj = OtherObjectInRoom::new("cart", Point::new(380.0, 200.0), 40.0, 40.0);
    let entity = EntityRef::OtherObject(obj.id);
    layout.other_objects.push(obj);

    let stranded = layout.resize_room(Corner::BottomRight, Point::new(160.0, 300.0));
    assert!(stranded.is_empty());
    assert_eq!(layout.room.width, 60.0);
    // Clamping alone would leave the cart at (140, 200), on the door zone.
    assert_eq!(layout.other_object(entity.id()).unwrap().center(), Point::new(120.0, 120.0));
    assert!(layout.violations().is_empty());
}

#[test]
fn shrinking_room_reports_items_that_no_longer_fit() {
    let mut layout = Layout::new(room());
    let obj = layout.add_other_object("press", 100.0, 100.0).unwrap();
    let stranded = layout.resize_room(Corner::BottomRight, Point::new(150.0, 150.0));
    assert_eq!((layout.room.width, layout.room.height), (50.0, 50.0));
    assert_eq!(stranded, vec![obj]);
}

// =============================================================
// Rotate / swing
// =============================================================

#[test]
fn rotate_swaps_footprint() {
    let mut layout = Layout::new(room());
    let obj = layout.add_other_object("bench", 60.0, 20.0).unwrap();
    let rotation = layout.rotate(obj).unwrap();
    assert_eq!(rotation, 90.0);
    let bbox = layout.other_object(obj.id()).unwrap().bounding_box();
    assert_eq!((bbox.width, bbox.height), (20.0, 60.0));
}

#[test]
fn rotate_wraps_after_full_turn() {
    let mut layout = Layout::new(room());
    let obj = layout.add_other_object("bench", 60.0, 20.0).unwrap();
    for _ in 0..3 {
        layout.rotate(obj).unwrap();
    }
    assert_eq!(layout.rotate(obj).unwrap(), 0.0);
}

#[test]
fn rotate_into_zone_is_refused() {
    let mut layout = Layout::new(room());
    let a = layout.add_other_object("long bench", 200.0, 20.0).unwrap();
    layout.place_item(a, Point::new(250.0, 200.0)).unwrap();
    let b = layout.add_other_object("post", 10.0, 10.0).unwrap();
    layout.place_item(b, Point::new(250.0, 250.0)).unwrap();
    let err = layout.rotate(a).unwrap_err();
    assert!(matches!(err, PlanError::Blocked(_)));
    assert_eq!(layout.other_object(a.id()).unwrap().rotation, 0.0);
}

#[test]
fn rotate_that_would_leave_room_is_refused() {
    let mut layout = Layout::new(room());
    let bench = layout.add_other_object("bench", 250.0, 40.0).unwrap();
    let err = layout.rotate(bench).unwrap_err();
    assert!(matches!(err, PlanError::Blocked(e) if e == bench));
    let obj = layout.other_object(bench.id()).unwrap();
    assert_eq!(obj.rotation, 0.0);
    assert_eq!((obj.bounding_box().width, obj.bounding_box().height), (250.0, 40.0));
    assert!(layout.violations().is_empty());
}

#[test]
fn doors_do_not_rotate() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Top);
    assert!(matches!(layout.rotate(door), Err(PlanError::NotRotatable(_))));
}

#[test]
fn toggle_swing_flips_direction() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Top);
    assert_eq!(layout.toggle_swing(door.id()).unwrap(), SwingDirection::Outward);
    assert_eq!(layout.toggle_swing(door.id()).unwrap(), SwingDirection::Inward);
}

// =============================================================
// Place / validate
// =============================================================

#[test]
fn place_door_commits_new_wall() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Top);
    layout.place_door(door.id(), Point::new(100.0, 150.0), Wall::Left).unwrap();
    let d = layout.door(door.id()).unwrap();
    assert_eq!(d.wall, Wall::Left);
    assert_eq!(d.rotation, 270.0);
}

#[test]
fn place_door_reports_covered_items() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Top);
    let obj = OtherObjectInRoom::new("bin", Point::new(130.0, 260.0), 20.0, 20.0);
    let entity = EntityRef::OtherObject(obj.id);
    layout.other_objects.push(obj);

    // Hinge at (100, 240) on the left wall sweeps down over the bin.
    let covered = layout.place_door(door.id(), Point::new(100.0, 240.0), Wall::Left).unwrap();
    assert_eq!(covered, vec![entity]);
    assert_eq!(layout.covered_by(layout.door(door.id()).unwrap()), vec![entity]);

    let covered = layout.place_door(door.id(), Point::new(200.0, 100.0), Wall::Top).unwrap();
    assert!(covered.is_empty());
}

#[test]
fn place_item_rejects_doors() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Top);
    assert!(layout.place_item(door, Point::new(0.0, 0.0)).is_err());
}

#[test]
fn is_blocked_at_ignores_self() {
    let mut layout = Layout::new(room());
    let obj = layout.add_other_object("pillar", 20.0, 20.0).unwrap();
    let center = layout.other_object(obj.id()).unwrap().center();
    assert!(!layout.is_blocked_at(obj, center));
}

#[test]
fn violations_report_overlap_and_outside() {
    let mut layout = Layout::new(room());
    let a = layout.add_other_object("a", 20.0, 20.0).unwrap();
    let b = layout.add_other_object("b", 20.0, 20.0).unwrap();
    layout.place_item(b, Point::new(250.0, 200.0)).unwrap();
    layout.place_item(a, Point::new(250.0, 200.0)).unwrap();
    layout.other_objects.push(OtherObjectInRoom::new("stray", Point::new(0.0, 0.0), 10.0, 10.0));
    let v = layout.violations();
    assert!(v.iter().any(|v| v.entity == a && v.kind == ViolationKind::Overlaps));
    assert!(v.iter().any(|v| v.kind == ViolationKind::OutsideRoom));
}

#[test]
fn violations_report_door_off_wall() {
    let mut layout = Layout::new(room());
    let door = layout.add_door(Wall::Top);
    layout.doors[0].y += 5.0;
    let v = layout.violations();
    assert_eq!(v, vec![Violation { entity: door, kind: ViolationKind::OffWall }]);
}
