use crate::test_fixtures::{base_content, base_state, item, make_rng, slot_id};
use crate::{inbound, CarriedInventory, InboundTask};

fn task(target: &str, item_id: &str, received: bool, completed: bool) -> InboundTask {
    InboundTask {
        item_type: item(item_id),
        target_slot_id: slot_id(target),
        is_received: received,
        is_completed: completed,
    }
}

// --- Generation ---------------------------------------------------------

#[test]
fn test_generate_returns_empty_when_no_slot_has_space() {
    let content = base_content();
    let mut state = base_state(&content);
    let mut rng = make_rng();

    for slot in ["A-01-1", "A-01-2", "A-01-3", "B-01-2", "B-01-3"] {
        let id = slot_id(slot);
        let current = state.slots.get(&id).unwrap();
        let missing = content.constants.slot_capacity - current.quantity;
        let fill = current
            .item_type
            .clone()
            .unwrap_or_else(|| item("item_red_box"));
        assert!(state
            .slots
            .add_stock(&id, &fill, missing, content.constants.slot_capacity));
    }

    let tasks = inbound::generate(&state.slots, &content.items, &content.constants, &mut rng);
    assert!(tasks.is_empty());
}

#[test]
fn test_generate_targets_slots_with_space_and_matching_types() {
    let content = base_content();
    let state = base_state(&content);
    let mut rng = make_rng();

    let tasks = inbound::generate(&state.slots, &content.items, &content.constants, &mut rng);

    assert!((1..=2).contains(&tasks.len()));
    let palette: Vec<_> = content.items.iter().map(|def| &def.id).collect();
    for (i, task) in tasks.iter().enumerate() {
        let slot = state.slots.get(&task.target_slot_id).expect("real slot");
        assert!(slot.has_space(content.constants.slot_capacity));
        assert!(!task.is_received && !task.is_completed);
        match &slot.item_type {
            // Occupied target: the task must bring more of the same type.
            Some(held) => assert_eq!(&task.item_type, held),
            None => assert!(palette.contains(&&task.item_type)),
        }
        for other in &tasks[i + 1..] {
            assert_ne!(task.target_slot_id, other.target_slot_id);
        }
    }
}

// --- Receiving ----------------------------------------------------------

#[test]
fn test_receive_marks_first_unreceived_task() {
    let mut tasks = vec![
        task("A-01-3", "item_red_box", true, false),
        task("B-01-2", "item_blue_box", false, false),
        task("B-01-3", "item_yellow_box", false, false),
    ];
    let mut carried = CarriedInventory::default();

    let idx = inbound::receive(&mut tasks, &mut carried, 3);

    assert_eq!(idx, Some(1), "first unreceived task wins");
    assert!(tasks[1].is_received);
    assert!(!tasks[2].is_received);
    assert_eq!(carried.items(), &[item("item_blue_box")]);
}

#[test]
fn test_receive_refuses_at_carry_capacity() {
    let mut tasks = vec![task("A-01-3", "item_red_box", false, false)];
    let mut carried = CarriedInventory::default();
    for _ in 0..3 {
        carried.push(item("item_green_box"));
    }

    assert!(inbound::receive(&mut tasks, &mut carried, 3).is_none());
    assert!(!tasks[0].is_received, "refusal mutates nothing");
    assert_eq!(carried.len(), 3);
}

#[test]
fn test_receive_returns_none_when_everything_received() {
    let mut tasks = vec![task("A-01-3", "item_red_box", true, false)];
    let mut carried = CarriedInventory::default();
    assert!(inbound::receive(&mut tasks, &mut carried, 3).is_none());
}

// --- Put-away -----------------------------------------------------------

#[test]
fn test_put_away_completes_task_and_stores_stock() {
    let content = base_content();
    let mut state = base_state(&content);
    let mut tasks = vec![task("A-01-3", "item_red_box", true, false)];
    let mut carried = CarriedInventory::default();
    carried.push(item("item_red_box"));

    let stored = inbound::put_away(
        &mut tasks,
        &slot_id("A-01-3"),
        &mut state.slots,
        &mut carried,
        content.constants.slot_capacity,
    );

    assert_eq!(stored, Some(item("item_red_box")));
    assert!(tasks[0].is_completed);
    assert!(carried.is_empty());
    let slot = state.slots.get(&slot_id("A-01-3")).unwrap();
    assert_eq!(slot.item_type, Some(item("item_red_box")));
    assert_eq!(slot.quantity, 1);
}

#[test]
fn test_put_away_requires_task_received() {
    let content = base_content();
    let mut state = base_state(&content);
    let mut tasks = vec![task("A-01-3", "item_red_box", false, false)];
    let mut carried = CarriedInventory::default();
    carried.push(item("item_red_box"));

    assert!(inbound::put_away(
        &mut tasks,
        &slot_id("A-01-3"),
        &mut state.slots,
        &mut carried,
        content.constants.slot_capacity,
    )
    .is_none());
    assert!(!tasks[0].is_completed);
    assert_eq!(carried.len(), 1);
}

#[test]
fn test_put_away_requires_item_in_carried() {
    let content = base_content();
    let mut state = base_state(&content);
    let mut tasks = vec![task("A-01-3", "item_red_box", true, false)];
    let mut carried = CarriedInventory::default();
    carried.push(item("item_blue_box"));

    assert!(inbound::put_away(
        &mut tasks,
        &slot_id("A-01-3"),
        &mut state.slots,
        &mut carried,
        content.constants.slot_capacity,
    )
    .is_none());
    assert_eq!(state.slots.get(&slot_id("A-01-3")).unwrap().quantity, 0);
}

#[test]
fn test_put_away_refuses_when_slot_rejects_stock() {
    let content = base_content();
    let mut state = base_state(&content);
    // B-01-1 is already at capacity; add_stock must refuse, so the task
    // stays incomplete and the carried unit stays carried.
    let mut tasks = vec![task("B-01-1", "item_green_box", true, false)];
    let mut carried = CarriedInventory::default();
    carried.push(item("item_green_box"));

    assert!(inbound::put_away(
        &mut tasks,
        &slot_id("B-01-1"),
        &mut state.slots,
        &mut carried,
        content.constants.slot_capacity,
    )
    .is_none());
    assert!(!tasks[0].is_completed);
    assert_eq!(carried.len(), 1);
}

#[test]
fn test_put_away_removes_first_matching_carried_unit() {
    let content = base_content();
    let mut state = base_state(&content);
    let mut tasks = vec![task("A-01-3", "item_red_box", true, false)];
    let mut carried = CarriedInventory::default();
    carried.push(item("item_blue_box"));
    carried.push(item("item_red_box"));
    carried.push(item("item_red_box"));

    assert!(inbound::put_away(
        &mut tasks,
        &slot_id("A-01-3"),
        &mut state.slots,
        &mut carried,
        content.constants.slot_capacity,
    )
    .is_some());
    // Removal is by value, first occurrence; order of the rest is preserved.
    assert_eq!(carried.items(), &[item("item_blue_box"), item("item_red_box")]);
}

// --- Completion query ---------------------------------------------------

#[test]
fn test_all_completed_rejects_empty_set() {
    assert!(!inbound::all_completed(&[]), "an empty set is never complete");
}

#[test]
fn test_all_completed_requires_every_task_done() {
    let tasks = vec![
        task("A-01-3", "item_red_box", true, true),
        task("B-01-2", "item_blue_box", true, false),
    ];
    assert!(!inbound::all_completed(&tasks));

    let tasks = vec![
        task("A-01-3", "item_red_box", true, true),
        task("B-01-2", "item_blue_box", true, true),
    ];
    assert!(inbound::all_completed(&tasks));
}
