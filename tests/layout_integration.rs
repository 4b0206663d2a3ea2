//! Integration tests for the zoo layout engine
//!
//! These drive a `Session` the way an editor front end would: pointer
//! gestures in grid and pixel coordinates, direct placement from the
//! palette, and share-string save/restore.

use glam::Vec2;
use zoo_planner::{
    AnimalRequirement, Catalog, CatalogEntry, CodecError, EnclosureStatus, EntityRef, ItemKind,
    LayoutEvent, PlacementError, PlannerConfig, PointerPos, Rect, Session, StateCodec,
};

const CELL_PX: f32 = 20.0;

fn at(x: f32, y: f32) -> PointerPos {
    PointerPos::new(Vec2::new(x, y), Vec2::new(x * CELL_PX, y * CELL_PX))
}

fn never(_: &str) -> bool {
    false
}

fn always(_: &str) -> bool {
    true
}

fn drag(session: &mut Session, from: (f32, f32), to: (f32, f32)) -> Vec<LayoutEvent> {
    let mut events = session.pointer_down(at(from.0, from.1));
    events.extend(session.pointer_move(at(to.0, to.1)));
    events.extend(session.pointer_up(at(to.0, to.1), &mut never));
    events
}

fn penguin_catalog(min_area: i64, min_perimeter: i64) -> Catalog {
    let tree = CatalogEntry {
        type_id: "tree".into(),
        label: "Tree".into(),
        icon: String::new(),
        color: String::new(),
        width: 1,
        height: 1,
        unlimited: true,
    };
    let animal = |id: &str, area: i64, perimeter: i64| AnimalRequirement {
        occupant_id: id.into(),
        label: id.into(),
        icon: String::new(),
        min_area: area,
        min_perimeter: perimeter,
    };
    Catalog::new(
        vec![],
        vec![tree],
        vec![animal("lion", 36, 24), animal("penguin", min_area, min_perimeter)],
    )
    .unwrap()
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_drawn_enclosure_meeting_requirement_is_ok() {
    let mut session = Session::new(penguin_catalog(12, 14), PlannerConfig::default()).unwrap();
    session.select_occupant(Some(1)).unwrap();

    let events = drag(&mut session, (0.5, 0.5), (3.5, 2.5));

    let enclosure = &session.store().enclosures()[0];
    assert_eq!(enclosure.rect(), Rect::new(0, 0, 4, 3));
    assert!(events.iter().any(|e| matches!(
        e,
        LayoutEvent::Created { status: Some(EnclosureStatus::Ok), .. }
    )));
    let report = session.enclosure_report(enclosure.id).unwrap();
    assert_eq!((report.area, report.perimeter), (12, 14));
}

#[test]
fn test_drawn_enclosure_too_small_is_warning() {
    let mut session = Session::new(penguin_catalog(20, 14), PlannerConfig::default()).unwrap();
    session.select_occupant(Some(1)).unwrap();

    drag(&mut session, (0.5, 0.5), (3.5, 2.5));

    let id = session.store().enclosures()[0].id;
    assert_eq!(session.enclosure_report(id).unwrap().status, EnclosureStatus::Warning);
    assert_eq!(session.summary().warnings, 1);
}

#[test]
fn test_draw_without_selection_does_nothing() {
    let mut session = Session::with_defaults();
    let events = drag(&mut session, (0.5, 0.5), (3.5, 2.5));
    assert!(events.is_empty());
    assert!(session.store().is_empty());
}

#[test]
fn test_draw_over_building_is_rejected() {
    let mut session = Session::with_defaults();
    session.place_item(ItemKind::Building, 0, Some((4, 4))).unwrap();
    session.select_occupant(Some(0)).unwrap();

    let events = drag(&mut session, (1.5, 1.5), (6.5, 6.5));
    assert!(events
        .iter()
        .any(|e| matches!(e, LayoutEvent::Rejected { entity: None, error: PlacementError::Overlap(_) })));
    assert!(session.store().enclosures().is_empty());
}

#[test]
fn test_draw_past_grid_edge_is_clamped() {
    let mut session = Session::with_defaults();
    session.select_occupant(Some(4)).unwrap();

    drag(&mut session, (27.5, 27.5), (41.0, 33.0));
    assert_eq!(session.store().enclosures()[0].rect(), Rect::new(27, 27, 3, 3));
}

// ============================================================================
// Placement rules
// ============================================================================

#[test]
fn test_second_unique_building_rejected() {
    let mut session = Session::with_defaults();
    session.place_item(ItemKind::Building, 1, Some((0, 0))).unwrap();
    let before = session.encode().unwrap();

    let err = session.place_item(ItemKind::Building, 1, Some((10, 10))).unwrap_err();
    assert_eq!(err, PlacementError::DuplicateUniqueType("restaurant".into()));
    assert_eq!(session.encode().unwrap(), before);
}

#[test]
fn test_palette_placement_fills_row_major() {
    let mut session = Session::with_defaults();
    let entrance = session.place_item(ItemKind::Building, 0, None).unwrap();
    let bench = session.place_item(ItemKind::Decoration, 1, None).unwrap();
    assert_eq!((entrance.x, entrance.y), (0, 0));
    assert_eq!((bench.x, bench.y), (3, 0));
}

#[test]
fn test_remove_all_of_type_leaves_others() {
    let mut session = Session::with_defaults();
    for x in 0..4 {
        session.place_item(ItemKind::Decoration, 0, Some((x * 2, 10))).unwrap();
    }
    session.place_item(ItemKind::Decoration, 3, Some((20, 20))).unwrap();

    let removed = session.remove_all_of_type(ItemKind::Decoration, 0);
    assert_eq!(removed.len(), 4);
    assert_eq!(session.store().items(ItemKind::Decoration).len(), 1);
}

// ============================================================================
// Moving
// ============================================================================

#[test]
fn test_drag_moves_item() {
    let mut session = Session::with_defaults();
    let tree = session.place_item(ItemKind::Decoration, 0, Some((10, 10))).unwrap();

    drag(&mut session, (10.5, 10.5), (15.5, 12.5));
    let moved = session.store().item(ItemKind::Decoration, tree.id).unwrap();
    assert_eq!((moved.x, moved.y), (15, 12));
}

#[test]
fn test_drop_onto_other_entity_reverts() {
    let mut session = Session::with_defaults();
    session.place_item(ItemKind::Building, 0, Some((0, 0))).unwrap();
    let tree = session.place_item(ItemKind::Decoration, 0, Some((10, 10))).unwrap();

    let events = drag(&mut session, (10.5, 10.5), (1.5, 1.5));
    assert!(events.iter().any(|e| matches!(e, LayoutEvent::Reverted { .. })));
    let tree = session.store().item(ItemKind::Decoration, tree.id).unwrap();
    assert_eq!((tree.x, tree.y), (10, 10));
}

#[test]
fn test_move_freezes_outside_margin() {
    let mut session = Session::with_defaults();
    let tree = session.place_item(ItemKind::Decoration, 0, Some((10, 10))).unwrap();

    session.pointer_down(at(10.5, 10.5));
    session.pointer_move(at(28.5, 10.5));
    // 50px beyond the grid edge is 2.5 cells
    assert!(session.pointer_move(at(33.0, 10.5)).is_empty());
    session.pointer_up(at(33.0, 10.5), &mut never);

    let tree = session.store().item(ItemKind::Decoration, tree.id).unwrap();
    assert_eq!((tree.x, tree.y), (28, 10));
}

#[test]
fn test_click_deletes_after_confirmation() {
    let mut session = Session::with_defaults();
    let shop = session.place_item(ItemKind::Building, 2, Some((5, 5))).unwrap();
    let entity = EntityRef::Item(ItemKind::Building, shop.id);

    session.pointer_down(at(6.5, 5.5));
    let mut asked = Vec::new();
    let mut confirm = |message: &str| {
        asked.push(message.to_string());
        true
    };
    let events = session.pointer_up(at(6.6, 5.6), &mut confirm);

    assert_eq!(asked, vec!["Remove Gift Shop?".to_string()]);
    assert!(events.contains(&LayoutEvent::Removed(entity)));
    assert!(session.store().is_empty());
}

#[test]
fn test_declined_click_keeps_entity() {
    let mut session = Session::with_defaults();
    session.place_item(ItemKind::Building, 2, Some((5, 5))).unwrap();

    session.pointer_down(at(6.5, 5.5));
    session.pointer_up(at(6.5, 5.5), &mut never);
    assert_eq!(session.store().len(), 1);
}

// ============================================================================
// Resizing
// ============================================================================

#[test]
fn test_resize_into_occupied_cell_rejected() {
    let mut session = Session::with_defaults();
    let enclosure = session.place_enclosure(1, Rect::new(2, 2, 3, 3)).unwrap();
    session.place_item(ItemKind::Decoration, 0, Some((7, 3))).unwrap();

    session.pointer_down(at(5.0, 3.5));
    let grown = session.pointer_move(at(6.5, 3.5));
    assert!(matches!(grown[..], [LayoutEvent::Updated { .. }]));

    let blocked = session.pointer_move(at(7.5, 3.5));
    assert!(matches!(
        blocked[..],
        [LayoutEvent::Rejected { error: PlacementError::Overlap(_), .. }]
    ));
    session.pointer_up(at(7.5, 3.5), &mut never);

    let rect = session.store().enclosure(enclosure.id).unwrap().rect();
    assert_eq!(rect, Rect::new(2, 2, 5, 3));
}

#[test]
fn test_resize_click_restores_and_offers_delete() {
    let mut session = Session::with_defaults();
    let enclosure = session.place_enclosure(0, Rect::new(4, 4, 6, 6)).unwrap();

    session.pointer_down(at(10.1, 7.0));
    let events = session.pointer_up(at(10.1, 7.1), &mut always);

    assert!(events.contains(&LayoutEvent::Removed(EntityRef::Enclosure(enclosure.id))));
    assert!(session.store().enclosures().is_empty());
}

#[test]
fn test_corner_resize_changes_both_axes() {
    let mut session = Session::with_defaults();
    let enclosure = session.place_enclosure(2, Rect::new(4, 4, 4, 4)).unwrap();

    drag(&mut session, (8.0, 8.0), (11.5, 12.5));
    let rect = session.store().enclosure(enclosure.id).unwrap().rect();
    assert_eq!(rect, Rect::new(4, 4, 8, 9));
}

// ============================================================================
// Share strings
// ============================================================================

#[test]
fn test_share_string_round_trip() {
    let mut session = Session::with_defaults();
    session.place_item(ItemKind::Building, 0, Some((0, 0))).unwrap();
    session.place_item(ItemKind::Building, 3, Some((10, 0))).unwrap();
    session.place_item(ItemKind::Building, 3, Some((12, 0))).unwrap();
    session.place_item(ItemKind::Decoration, 2, Some((20, 20))).unwrap();
    session.place_enclosure(3, Rect::new(0, 10, 8, 8)).unwrap();
    session.place_enclosure(1, Rect::new(15, 10, 4, 3)).unwrap();

    let encoded = session.encode().unwrap();
    assert_eq!(encoded, "0003a03c0.2kk.30a881fa43");

    let mut other = Session::with_defaults();
    other.restore(&encoded).unwrap();
    assert_eq!(other.encode().unwrap(), encoded);
    assert_eq!(other.summary(), session.summary());
}

#[test]
fn test_decoded_overlap_is_rejected_on_restore() {
    // Decodes to a restaurant at (10,10) and a fountain at (11,11)
    let snapshot = StateCodec::decode("1aa.2bb.0003b").unwrap();
    assert_eq!(snapshot.buildings.len(), 1);
    assert_eq!(snapshot.decorations.len(), 1);
    assert_eq!(snapshot.enclosures.len(), 1);

    let mut session = Session::with_defaults();
    let err = session.restore("1aa.2bb.0003b").unwrap_err();
    assert!(matches!(err, CodecError::Rejected(PlacementError::Overlap(_))));
    assert!(session.store().is_empty());
}

#[test]
fn test_restore_mixed_sections() {
    let mut session = Session::with_defaults();
    session.restore("1aa.2hh.0003b").unwrap();

    let store = session.store();
    let building = &store.items(ItemKind::Building)[0];
    assert_eq!((building.catalog_index, building.x, building.y), (1, 10, 10));
    let decoration = &store.items(ItemKind::Decoration)[0];
    assert_eq!((decoration.catalog_index, decoration.x, decoration.y), (2, 17, 17));
    assert_eq!(store.enclosures()[0].rect(), Rect::new(0, 0, 3, 11));
    assert_eq!(store.enclosures()[0].occupant_id, "lion");
}

#[test]
fn test_bad_share_string_means_no_saved_state() {
    let mut session = Session::with_defaults();
    session.place_item(ItemKind::Decoration, 0, Some((1, 1))).unwrap();

    assert!(matches!(session.restore("1a?"), Err(CodecError::InvalidDigit { .. })));
    assert_eq!(session.store().len(), 1);
}

#[test]
fn test_restore_cancels_active_gesture() {
    let mut session = Session::with_defaults();
    session.place_item(ItemKind::Decoration, 0, Some((1, 1))).unwrap();
    session.pointer_down(at(1.5, 1.5));
    assert!(!session.controller().is_idle());

    session.restore("").unwrap();
    assert!(session.controller().is_idle());
    assert!(session.store().is_empty());
}
