use crate::test_fixtures::{base_content, base_state, slot_id};
use crate::{resolve_tile, tile_of, TileHit};

#[test]
fn test_resolve_tile_finds_slots_and_zones() {
    let content = base_content();
    let state = base_state(&content);
    let layout = &content.layout;

    assert_eq!(
        resolve_tile(&state.slots, layout, 3, 3),
        TileHit::Slot(slot_id("A-01-1"))
    );
    assert_eq!(resolve_tile(&state.slots, layout, 22, 1), TileHit::Shipping);
    assert_eq!(resolve_tile(&state.slots, layout, 1, 16), TileHit::Receiving);
    assert_eq!(resolve_tile(&state.slots, layout, 12, 12), TileHit::Floor);
}

#[test]
fn test_zone_rects_are_half_open() {
    let content = base_content();
    let state = base_state(&content);
    let layout = &content.layout;

    // Shipping zone is x 21..25, y 0..4.
    assert_eq!(resolve_tile(&state.slots, layout, 21, 0), TileHit::Shipping);
    assert_eq!(resolve_tile(&state.slots, layout, 24, 3), TileHit::Shipping);
    assert_eq!(resolve_tile(&state.slots, layout, 20, 0), TileHit::Floor);
    assert_eq!(resolve_tile(&state.slots, layout, 21, 4), TileHit::Floor);
}

#[test]
fn test_tile_of_floors_continuous_positions() {
    assert_eq!(tile_of(0.0, 0.0, 32), (0, 0));
    assert_eq!(tile_of(31.9, 31.9, 32), (0, 0));
    assert_eq!(tile_of(32.0, 63.9, 32), (1, 1));
    assert_eq!(tile_of(400.0, 300.0, 32), (12, 9));
    assert_eq!(tile_of(-0.1, -33.0, 32), (-1, -2));
}
