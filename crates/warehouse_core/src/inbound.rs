//! Inbound receiving and put-away tasks.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::slots::SlotStore;
use crate::{CarriedInventory, Constants, InboundTask, ItemTypeDef, ItemTypeId, SlotId};

/// Builds put-away tasks against distinct slots with spare capacity, the
/// task count drawn from the configured bounds.
///
/// A slot already holding stock is assigned its existing item type (a slot
/// holds exactly one type at a time); empty slots get a uniform draw from
/// the item palette. Returns an empty set when no slot has space.
pub(crate) fn generate(
    slots: &SlotStore,
    items: &[ItemTypeDef],
    constants: &Constants,
    rng: &mut impl Rng,
) -> Vec<InboundTask> {
    let open: Vec<&crate::Slot> = slots.with_space(constants.slot_capacity).collect();
    if open.is_empty() {
        return Vec::new();
    }

    let count = rng
        .gen_range(constants.inbound_min_tasks..=constants.inbound_max_tasks)
        .min(open.len());

    open.choose_multiple(rng, count)
        .map(|slot| {
            let item_type = match &slot.item_type {
                Some(held) => held.clone(),
                None => {
                    // Empty palettes are rejected by content validation.
                    let def = items.choose(rng).expect("item palette is empty");
                    def.id.clone()
                }
            };
            InboundTask {
                item_type,
                target_slot_id: slot.id.clone(),
                is_received: false,
                is_completed: false,
            }
        })
        .collect()
}

/// Receives the first unreceived task at the dock.
///
/// Refuses (returns `None`, mutating nothing) when every task is already
/// received or the carried inventory is at capacity. On success the task is
/// marked received, its item type is pushed onto the carried inventory, and
/// the task index is returned.
pub(crate) fn receive(
    tasks: &mut [InboundTask],
    carried: &mut CarriedInventory,
    max_carry: usize,
) -> Option<usize> {
    if !carried.can_carry(max_carry) {
        return None;
    }
    let idx = tasks.iter().position(|task| !task.is_received)?;
    tasks[idx].is_received = true;
    carried.push(tasks[idx].item_type.clone());
    Some(idx)
}

/// Puts one carried unit away into `slot_id`.
///
/// Requires a task targeting the slot that is received but not completed,
/// the task's item type present in the carried inventory, and the slot able
/// to accept the unit. Removes the first matching carried unit by value.
pub(crate) fn put_away(
    tasks: &mut [InboundTask],
    slot_id: &SlotId,
    slots: &mut SlotStore,
    carried: &mut CarriedInventory,
    slot_capacity: u32,
) -> Option<ItemTypeId> {
    let task = tasks.iter_mut().find(|task| {
        &task.target_slot_id == slot_id && task.is_received && !task.is_completed
    })?;

    if !carried.contains(&task.item_type) {
        return None;
    }
    if !slots.add_stock(slot_id, &task.item_type, 1, slot_capacity) {
        return None;
    }

    task.is_completed = true;
    carried.remove_first(&task.item_type);
    Some(task.item_type.clone())
}

/// True iff the set is non-empty and every task is completed. An empty set is
/// never complete — guards against vacuous success right after a generation
/// that returned nothing.
pub(crate) fn all_completed(tasks: &[InboundTask]) -> bool {
    !tasks.is_empty() && tasks.iter().all(|task| task.is_completed)
}
