//! Slot storage: the fixed set of storage cells and their stock mutations.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::{ItemTypeId, Slot, SlotId};

/// Owns every [`Slot`] in the warehouse. Slots are fixed at construction;
/// only stock mutates, and only through [`add_stock`](SlotStore::add_stock)
/// and [`remove_stock`](SlotStore::remove_stock).
///
/// Serializes as a plain slot list; the lookup indexes are rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<Slot>", into = "Vec<Slot>")]
pub struct SlotStore {
    slots: Vec<Slot>,
    by_id: AHashMap<SlotId, usize>,
    by_pos: AHashMap<(i32, i32), usize>,
}

impl SlotStore {
    pub fn new(slots: Vec<Slot>) -> Self {
        let by_id = slots
            .iter()
            .enumerate()
            .map(|(idx, slot)| (slot.id.clone(), idx))
            .collect();
        let by_pos = slots
            .iter()
            .enumerate()
            .map(|(idx, slot)| ((slot.x, slot.y), idx))
            .collect();
        Self {
            slots,
            by_id,
            by_pos,
        }
    }

    /// All slots in creation order.
    pub fn all(&self) -> &[Slot] {
        &self.slots
    }

    /// Exact tile match.
    pub fn at(&self, x: i32, y: i32) -> Option<&Slot> {
        self.by_pos.get(&(x, y)).map(|&idx| &self.slots[idx])
    }

    pub fn get(&self, id: &SlotId) -> Option<&Slot> {
        self.by_id.get(id).map(|&idx| &self.slots[idx])
    }

    /// Adds `amount` units of `item_type` to the slot.
    ///
    /// Refuses (returns false, mutating nothing) if the slot is unknown,
    /// `amount` is zero, the slot already holds a different item type, or the
    /// result would exceed `capacity`. A slot holds exactly one item type at
    /// a time.
    pub fn add_stock(
        &mut self,
        id: &SlotId,
        item_type: &ItemTypeId,
        amount: u32,
        capacity: u32,
    ) -> bool {
        if amount == 0 {
            return false;
        }
        let Some(slot) = self.by_id.get(id).map(|&idx| &mut self.slots[idx]) else {
            return false;
        };
        if let Some(held) = &slot.item_type {
            if held != item_type {
                return false;
            }
        }
        let Some(new_quantity) = slot.quantity.checked_add(amount) else {
            return false;
        };
        if new_quantity > capacity {
            return false;
        }
        slot.item_type = Some(item_type.clone());
        slot.quantity = new_quantity;
        true
    }

    /// Removes `amount` units from the slot.
    ///
    /// Refuses if the slot is unknown or holds fewer than `amount` units. On
    /// reaching zero the item type is cleared, freeing the slot for any
    /// future item type.
    pub fn remove_stock(&mut self, id: &SlotId, amount: u32) -> bool {
        let Some(slot) = self.by_id.get(id).map(|&idx| &mut self.slots[idx]) else {
            return false;
        };
        if amount == 0 || slot.quantity < amount {
            return false;
        }
        slot.quantity -= amount;
        if slot.quantity == 0 {
            slot.item_type = None;
        }
        true
    }

    /// Slots currently holding stock, in creation order.
    pub fn stocked(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.quantity > 0)
    }

    /// Slots with spare capacity, in creation order.
    pub fn with_space(&self, capacity: u32) -> impl Iterator<Item = &Slot> + '_ {
        self.slots.iter().filter(move |slot| slot.has_space(capacity))
    }
}

impl From<Vec<Slot>> for SlotStore {
    fn from(slots: Vec<Slot>) -> Self {
        Self::new(slots)
    }
}

impl From<SlotStore> for Vec<Slot> {
    fn from(store: SlotStore) -> Self {
        store.slots
    }
}
