//! Outbound order generation and fulfilment.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::slots::SlotStore;
use crate::{CarriedInventory, Constants, ItemTypeId, Order, OrderId, OrderItem, OrderStatus, SlotId};

/// Builds a new order against distinct stocked slots, one line per slot with
/// quantity 1. The line count is drawn from the configured bounds, capped by
/// how many slots actually hold stock.
///
/// Returns `None` when no slot holds stock — a valid, expected state, not an
/// error.
pub(crate) fn generate(
    slots: &SlotStore,
    constants: &Constants,
    rng: &mut impl Rng,
) -> Option<Order> {
    let stocked: Vec<&crate::Slot> = slots.stocked().collect();
    if stocked.is_empty() {
        return None;
    }

    let lines = rng
        .gen_range(constants.order_min_lines..=constants.order_max_lines)
        .min(stocked.len());
    let picks = stocked.choose_multiple(rng, lines);

    let items = picks
        .map(|slot| OrderItem {
            // Stocked slots always hold an item type (slot invariant).
            item_type: slot.item_type.clone().unwrap_or_else(|| {
                panic!("stocked slot '{}' has no item type", slot.id)
            }),
            quantity: 1,
            picked: 0,
            slot_id: slot.id.clone(),
        })
        .collect();

    let uuid = crate::generate_uuid(rng);
    Some(Order {
        id: OrderId(format!("ord_{uuid}")),
        items,
        status: OrderStatus::Pending,
    })
}

/// Picks one unit for the first order line matching `slot_id` with
/// `picked < quantity`.
///
/// Refuses when no line matches, the carried inventory is at capacity, or
/// the slot cannot supply a unit; a refusal mutates nothing. On success the
/// picked item type is returned and the order moves to `Packing` once every
/// line is fully picked.
pub(crate) fn pick(
    order: &mut Order,
    slot_id: &SlotId,
    slots: &mut SlotStore,
    carried: &mut CarriedInventory,
    max_carry: usize,
) -> Option<ItemTypeId> {
    let item = order
        .items
        .iter_mut()
        .find(|item| &item.slot_id == slot_id && item.picked < item.quantity)?;

    if !carried.can_carry(max_carry) {
        return None;
    }
    if !slots.remove_stock(slot_id, 1) {
        return None;
    }

    item.picked += 1;
    let picked_type = item.item_type.clone();
    carried.push(picked_type.clone());

    if order
        .items
        .iter()
        .all(|item| item.picked == item.quantity)
    {
        order.status = OrderStatus::Packing;
    }

    Some(picked_type)
}

/// Ships the order. Only valid from `Packing`; clears the ENTIRE carried
/// inventory, not just this order's items.
pub(crate) fn complete(order: &mut Order, carried: &mut CarriedInventory) -> bool {
    if order.status != OrderStatus::Packing {
        return false;
    }
    order.status = OrderStatus::Shipped;
    carried.clear();
    true
}
