//! Content loading and world generation shared between drivers.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use warehouse_core::{
    CarriedInventory, Constants, Content, Counters, ItemTypeDef, LayoutDef, MetaState, Mode,
    RoundConfig, Slot, SlotId, SlotStore, WarehouseState,
};

#[derive(Deserialize)]
struct ItemsFile {
    content_version: String,
    items: Vec<ItemTypeDef>,
}

#[derive(Deserialize)]
struct RoundsFile {
    rounds: Vec<RoundConfig>,
}

/// Expands rack definitions into concrete slots, ids derived as
/// `"{zone}-{row:02}-{n}"` along the row.
pub fn expand_racks(layout: &LayoutDef) -> Vec<Slot> {
    let mut slots = Vec::new();
    for rack in &layout.racks {
        for n in 0..rack.slot_count {
            slots.push(Slot {
                id: SlotId(format!("{}-{:02}-{}", rack.zone, rack.row, n + 1)),
                x: rack.origin_x + i32::try_from(n).unwrap_or(0) * rack.pitch,
                y: rack.origin_y,
                zone: rack.zone.clone(),
                item_type: None,
                quantity: 0,
            });
        }
    }
    slots
}

/// Validates cross-references in loaded content, panicking on any authoring
/// error: duplicate or colliding slots, slots outside the grid or inside a
/// zone, empty palettes, degenerate constants.
pub fn validate_content(content: &Content) {
    let c = &content.constants;
    assert!(!content.items.is_empty(), "item palette is empty");
    let item_ids: HashSet<&str> = content.items.iter().map(|i| i.id.0.as_str()).collect();
    assert_eq!(
        item_ids.len(),
        content.items.len(),
        "item palette contains duplicate ids"
    );

    assert!(!content.rounds.is_empty(), "no round configs defined");
    for round in &content.rounds {
        assert!(
            !round.phases.is_empty(),
            "round '{}' has an empty phase sequence",
            round.id,
        );
        assert!(
            round.time_limit_secs > 0,
            "round '{}' has a zero time limit",
            round.id,
        );
    }

    assert!(c.slot_capacity > 0, "slot_capacity must be positive");
    assert!(c.max_carry > 0, "max_carry must be positive");
    assert!(
        c.order_min_lines >= 1 && c.order_min_lines <= c.order_max_lines,
        "order line bounds are degenerate ({}..{})",
        c.order_min_lines,
        c.order_max_lines,
    );
    assert!(
        c.inbound_min_tasks >= 1 && c.inbound_min_tasks <= c.inbound_max_tasks,
        "inbound task bounds are degenerate ({}..{})",
        c.inbound_min_tasks,
        c.inbound_max_tasks,
    );
    assert!(
        (0.0..=1.0).contains(&c.initial_stock_fill),
        "initial_stock_fill must be a probability, got {}",
        c.initial_stock_fill,
    );
    assert!(
        c.initial_stock_max >= 1 && c.initial_stock_max <= c.slot_capacity,
        "initial_stock_max must be in 1..=slot_capacity",
    );

    validate_slots(content);
}

fn validate_slots(content: &Content) {
    let layout = &content.layout;
    assert!(!layout.racks.is_empty(), "layout defines no racks");

    let mut ids = HashSet::new();
    let mut positions = HashSet::new();
    for slot in expand_racks(layout) {
        assert!(
            ids.insert(slot.id.clone()),
            "rack expansion produces duplicate slot id '{}'",
            slot.id,
        );
        assert!(
            positions.insert((slot.x, slot.y)),
            "slot '{}' collides with another slot at ({}, {})",
            slot.id,
            slot.x,
            slot.y,
        );
        assert!(
            slot.x >= 0 && slot.x < layout.grid_width && slot.y >= 0 && slot.y < layout.grid_height,
            "slot '{}' at ({}, {}) is outside the {}x{} grid",
            slot.id,
            slot.x,
            slot.y,
            layout.grid_width,
            layout.grid_height,
        );
        assert!(
            !layout.shipping_zone.contains(slot.x, slot.y)
                && !layout.receiving_zone.contains(slot.x, slot.y),
            "slot '{}' is placed inside a zone rect",
            slot.id,
        );
    }
}

pub fn load_content(content_dir: &str) -> Result<Content> {
    let dir = Path::new(content_dir);
    let constants: Constants = serde_json::from_str(
        &std::fs::read_to_string(dir.join("constants.json")).context("reading constants.json")?,
    )
    .context("parsing constants.json")?;
    let items_file: ItemsFile = serde_json::from_str(
        &std::fs::read_to_string(dir.join("items.json")).context("reading items.json")?,
    )
    .context("parsing items.json")?;
    let layout: LayoutDef = serde_json::from_str(
        &std::fs::read_to_string(dir.join("layout.json")).context("reading layout.json")?,
    )
    .context("parsing layout.json")?;
    let rounds_file: RoundsFile = serde_json::from_str(
        &std::fs::read_to_string(dir.join("rounds.json")).context("reading rounds.json")?,
    )
    .context("parsing rounds.json")?;
    let content = Content {
        content_version: items_file.content_version,
        items: items_file.items,
        layout,
        rounds: rounds_file.rounds,
        constants,
    };
    validate_content(&content);
    Ok(content)
}

/// Builds the initial warehouse: empty slots from the rack layout, then a
/// seeded stock pass. At least one slot is always stocked so the first
/// picking phase has an order to generate.
pub fn build_initial_state(content: &Content, seed: u64, rng: &mut impl Rng) -> WarehouseState {
    let c = &content.constants;
    let mut slots = expand_racks(&content.layout);

    for slot in &mut slots {
        if rng.gen::<f32>() < c.initial_stock_fill {
            stock_slot(slot, content, rng);
        }
    }
    if slots.iter().all(|slot| slot.quantity == 0) {
        let idx = rng.gen_range(0..slots.len());
        stock_slot(&mut slots[idx], content, rng);
    }

    WarehouseState {
        meta: MetaState {
            frame: 0,
            seed,
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

fn stock_slot(slot: &mut Slot, content: &Content, rng: &mut impl Rng) {
    let def = content
        .items
        .choose(rng)
        .expect("item palette is empty");
    slot.item_type = Some(def.id.clone());
    slot.quantity = rng.gen_range(1..=content.constants.initial_stock_max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use warehouse_core::test_fixtures::base_content;
    use warehouse_core::RackDef;

    #[test]
    fn test_valid_content_passes_validation() {
        let content = base_content();
        validate_content(&content); // should not panic
    }

    #[test]
    fn test_rack_expansion_derives_ids_and_positions() {
        let content = base_content();
        let slots = expand_racks(&content.layout);
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0].id.0, "A-01-1");
        assert_eq!((slots[0].x, slots[0].y), (3, 3));
        assert_eq!(slots[2].id.0, "A-01-3");
        assert_eq!((slots[2].x, slots[2].y), (7, 3));
        assert_eq!(slots[3].id.0, "B-01-1");
        assert!(slots.iter().all(|slot| slot.quantity == 0));
    }

    #[test]
    #[should_panic(expected = "duplicate slot id")]
    fn test_duplicate_rack_rows_panic() {
        let mut content = base_content();
        let rack = content.layout.racks[0].clone();
        content.layout.racks.push(RackDef {
            origin_y: 12,
            ..rack
        });
        validate_content(&content);
    }

    #[test]
    #[should_panic(expected = "outside the")]
    fn test_slot_outside_grid_panics() {
        let mut content = base_content();
        content.layout.racks[0].origin_x = 23;
        content.layout.racks[0].origin_y = 12; // 23, 25, 27 with pitch 2; 25 is off-grid
        validate_content(&content);
    }

    #[test]
    #[should_panic(expected = "inside a zone rect")]
    fn test_slot_inside_zone_panics() {
        let mut content = base_content();
        content.layout.racks[0].origin_x = 0;
        content.layout.racks[0].origin_y = 16; // receiving dock rows
        validate_content(&content);
    }

    #[test]
    #[should_panic(expected = "no round configs")]
    fn test_empty_round_list_panics() {
        let mut content = base_content();
        content.rounds.clear();
        validate_content(&content);
    }

    #[test]
    #[should_panic(expected = "empty phase sequence")]
    fn test_empty_phase_sequence_panics() {
        let mut content = base_content();
        content.rounds[0].phases.clear();
        validate_content(&content);
    }

    #[test]
    fn test_initial_state_honors_invariants_and_seed() {
        let content = base_content();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let state = build_initial_state(&content, 7, &mut rng);

        assert_eq!(state.slots.all().len(), 6);
        assert!(state.slots.stocked().count() >= 1, "at least one stocked slot");
        for slot in state.slots.all() {
            assert_eq!(slot.quantity == 0, slot.item_type.is_none());
            assert!(slot.quantity <= content.constants.slot_capacity);
        }

        let mut rng2 = ChaCha8Rng::seed_from_u64(7);
        let state2 = build_initial_state(&content, 7, &mut rng2);
        for (a, b) in state.slots.all().iter().zip(state2.slots.all()) {
            assert_eq!(a.item_type, b.item_type, "worldgen is seed-deterministic");
            assert_eq!(a.quantity, b.quantity);
        }
    }
}
