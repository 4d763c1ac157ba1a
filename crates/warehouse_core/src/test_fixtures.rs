//! Shared test fixtures for warehouse_core and downstream crates.
//!
//! `base_content()` provides a full-featured `Content` (four-item palette,
//! two racks, one two-phase round). `base_state()` provides a hand-built
//! state with a known stock picture so selection-dependent tests can assert
//! exact outcomes.

use crate::{
    CarriedInventory, Constants, Content, Counters, ItemTypeDef, ItemTypeId, LayoutDef, MetaState,
    Mode, RackDef, RoundConfig, RoundId, Slot, SlotId, SlotStore, WarehouseState, ZoneId, ZoneRect,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn item(id: &str) -> ItemTypeId {
    ItemTypeId(id.to_string())
}

pub fn slot_id(id: &str) -> SlotId {
    SlotId(id.to_string())
}

/// Four-item palette, two three-slot racks, shipping/receiving zones from
/// a 25x19 floor, one `[Picking, Inbound]` round at 120 s.
pub fn base_content() -> Content {
    Content {
        content_version: "test".to_string(),
        items: vec![
            ItemTypeDef {
                id: item("item_red_box"),
                display_name: "Red Box".to_string(),
            },
            ItemTypeDef {
                id: item("item_blue_box"),
                display_name: "Blue Box".to_string(),
            },
            ItemTypeDef {
                id: item("item_green_box"),
                display_name: "Green Box".to_string(),
            },
            ItemTypeDef {
                id: item("item_yellow_box"),
                display_name: "Yellow Box".to_string(),
            },
        ],
        layout: LayoutDef {
            grid_width: 25,
            grid_height: 19,
            tile_size: 32,
            racks: vec![
                RackDef {
                    zone: ZoneId("A".to_string()),
                    row: 1,
                    origin_x: 3,
                    origin_y: 3,
                    slot_count: 3,
                    pitch: 2,
                },
                RackDef {
                    zone: ZoneId("B".to_string()),
                    row: 1,
                    origin_x: 3,
                    origin_y: 8,
                    slot_count: 3,
                    pitch: 2,
                },
            ],
            shipping_zone: ZoneRect {
                x: 21,
                y: 0,
                width: 4,
                height: 4,
            },
            receiving_zone: ZoneRect {
                x: 0,
                y: 15,
                width: 4,
                height: 3,
            },
        },
        rounds: vec![RoundConfig {
            id: RoundId("round_standard".to_string()),
            phases: vec![Mode::Picking, Mode::Inbound],
            time_limit_secs: 120,
        }],
        constants: Constants {
            slot_capacity: 15,
            max_carry: 3,
            order_min_lines: 1,
            order_max_lines: 2,
            inbound_min_tasks: 1,
            inbound_max_tasks: 2,
            initial_stock_fill: 0.5,
            initial_stock_max: 5,
            points_per_pick: 10,
            points_per_put_away: 10,
            points_per_order: 50,
            points_per_inbound_round: 50,
            time_bonus_per_sec: 2,
        },
    }
}

fn fixture_slot(id: &str, x: i32, y: i32, zone: &str, stock: Option<(&str, u32)>) -> Slot {
    let (item_type, quantity) = match stock {
        Some((item_id, quantity)) => (Some(item(item_id)), quantity),
        None => (None, 0),
    };
    Slot {
        id: slot_id(id),
        x,
        y,
        zone: ZoneId(zone.to_string()),
        item_type,
        quantity,
    }
}

/// Hand-built state matching `base_content()`'s racks with a known stock
/// picture: one Red Box in A-01-1, three Blue in A-01-2, A-01-3 empty,
/// B-01-1 full of Green (at capacity), B-01-2 empty, two Yellow in B-01-3.
pub fn base_state(content: &Content) -> WarehouseState {
    let slots = vec![
        fixture_slot("A-01-1", 3, 3, "A", Some(("item_red_box", 1))),
        fixture_slot("A-01-2", 5, 3, "A", Some(("item_blue_box", 3))),
        fixture_slot("A-01-3", 7, 3, "A", None),
        fixture_slot("B-01-1", 3, 8, "B", Some(("item_green_box", 15))),
        fixture_slot("B-01-2", 5, 8, "B", None),
        fixture_slot("B-01-3", 7, 8, "B", Some(("item_yellow_box", 2))),
    ];
    WarehouseState {
        meta: MetaState {
            frame: 0,
            seed: 42,
            schema_version: 1,
            content_version: content.content_version.clone(),
        },
        slots: SlotStore::new(slots),
        current_order: None,
        inbound_tasks: Vec::new(),
        carried: CarriedInventory::default(),
        mode: Mode::Picking,
        round: None,
        counters: Counters::default(),
    }
}

/// Deterministic RNG seeded with 42.
pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
