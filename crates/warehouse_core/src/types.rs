//! Type definitions for `warehouse_core`.
//!
//! All public types, structs, enums, and ID newtypes used by the warehouse
//! state machine.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::slots::SlotStore;

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(SlotId);
string_id!(ItemTypeId);
string_id!(ZoneId);
string_id!(OrderId);
string_id!(RoundId);
string_id!(EventId);

// ---------------------------------------------------------------------------
// Core enums
// ---------------------------------------------------------------------------

/// Operating phase of the warehouse. Controls which task set is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Picking,
    Inbound,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Picking => f.write_str("Picking"),
            Mode::Inbound => f.write_str("Inbound"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    /// Carried for wire compatibility; the engine moves Pending → Packing
    /// directly once every line is fully picked.
    Picking,
    Packing,
    Shipped,
}

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarehouseState {
    pub meta: MetaState,
    pub slots: SlotStore,
    pub current_order: Option<Order>,
    pub inbound_tasks: Vec<InboundTask>,
    pub carried: CarriedInventory,
    pub mode: Mode,
    pub round: Option<RoundState>,
    pub counters: Counters,
}

impl WarehouseState {
    /// True iff the inbound task set is non-empty and every task is completed.
    /// An empty set is never complete.
    pub fn all_inbound_completed(&self) -> bool {
        crate::inbound::all_completed(&self.inbound_tasks)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaState {
    /// Driver-incremented frame counter; stamped onto events.
    pub frame: u64,
    pub seed: u64,
    pub schema_version: u32,
    pub content_version: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counters {
    pub next_event_id: u64,
    pub rounds_started: u64,
}

/// A fixed-location storage cell. Created once at world-gen, never destroyed;
/// only `item_type` and `quantity` mutate.
///
/// Invariant: `quantity == 0` iff `item_type.is_none()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub x: i32,
    pub y: i32,
    pub zone: ZoneId,
    pub item_type: Option<ItemTypeId>,
    pub quantity: u32,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.quantity == 0
    }

    pub fn has_space(&self, capacity: u32) -> bool {
        self.quantity < capacity
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub item_type: ItemTypeId,
    pub quantity: u32,
    pub picked: u32,
    pub slot_id: SlotId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
}

/// Invariant: `is_completed` implies `is_received`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundTask {
    pub item_type: ItemTypeId,
    pub target_slot_id: SlotId,
    pub is_received: bool,
    pub is_completed: bool,
}

/// The bounded, ordered multiset of item types the player is holding.
/// Shared between picking and put-away; pushed on pick/receive, drained on
/// put-away/ship.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarriedInventory {
    items: SmallVec<[ItemTypeId; 3]>,
}

impl CarriedInventory {
    pub fn items(&self) -> &[ItemTypeId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn can_carry(&self, max_carry: usize) -> bool {
        self.items.len() < max_carry
    }

    pub(crate) fn push(&mut self, item: ItemTypeId) {
        self.items.push(item);
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Removes the first carried unit matching `item` by value, not position.
    pub(crate) fn remove_first(&mut self, item: &ItemTypeId) -> bool {
        match self.items.iter().position(|carried| carried == item) {
            Some(pos) => {
                self.items.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn contains(&self, item: &ItemTypeId) -> bool {
        self.items.iter().any(|carried| carried == item)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub config: RoundConfig,
    pub current_phase_index: usize,
    /// Monotonically non-decreasing within a round; reset on restart.
    pub score: u32,
    pub is_finished: bool,
}

impl RoundState {
    /// The mode the round expects for its current phase, or `None` once the
    /// round is finished or the phase index has run past the sequence.
    pub fn current_phase(&self) -> Option<Mode> {
        if self.is_finished {
            return None;
        }
        self.config.phases.get(self.current_phase_index).copied()
    }
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EventId,
    pub frame: u64,
    pub event: Event,
}

/// Journal of notable state transitions. Refused commands never produce
/// events; refusal surfaces only through the command return value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    OrderGenerated {
        order_id: OrderId,
        lines: usize,
    },
    ItemPicked {
        slot_id: SlotId,
        item_type: ItemTypeId,
    },
    OrderPacked {
        order_id: OrderId,
    },
    OrderShipped {
        order_id: OrderId,
        items_shipped: usize,
    },
    InboundGenerated {
        tasks: usize,
    },
    ItemReceived {
        item_type: ItemTypeId,
        target_slot_id: SlotId,
    },
    ItemPutAway {
        slot_id: SlotId,
        item_type: ItemTypeId,
    },
    InboundCompleted {
        tasks: usize,
    },
    ModeSwitched {
        mode: Mode,
    },
    RoundStarted {
        round_id: RoundId,
        phases: usize,
        time_limit_secs: u32,
    },
    PhaseAdvanced {
        phase_index: usize,
        mode: Mode,
    },
    RoundFinished {
        round_id: RoundId,
        score: u32,
    },
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub content_version: String,
    pub items: Vec<ItemTypeDef>,
    pub layout: LayoutDef,
    pub rounds: Vec<RoundConfig>,
    pub constants: Constants,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTypeDef {
    pub id: ItemTypeId,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDef {
    pub grid_width: i32,
    pub grid_height: i32,
    /// Pixels per tile; used by drivers converting continuous positions.
    pub tile_size: u32,
    pub racks: Vec<RackDef>,
    pub shipping_zone: ZoneRect,
    pub receiving_zone: ZoneRect,
}

/// One row of storage slots. Slot ids are derived as
/// `"{zone}-{row:02}-{n}"` with `n` starting at 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RackDef {
    pub zone: ZoneId,
    pub row: u32,
    pub origin_x: i32,
    pub origin_y: i32,
    pub slot_count: u32,
    /// Tiles between adjacent slots along the row.
    pub pitch: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ZoneRect {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConfig {
    pub id: RoundId,
    /// Ordered phase sequence; the round finishes when the last phase's
    /// objective completes.
    pub phases: Vec<Mode>,
    pub time_limit_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constants {
    /// Per-slot quantity cap.
    pub slot_capacity: u32,
    /// Carried-inventory capacity.
    pub max_carry: usize,
    pub order_min_lines: usize,
    pub order_max_lines: usize,
    pub inbound_min_tasks: usize,
    pub inbound_max_tasks: usize,
    /// Probability a slot starts stocked at world-gen.
    pub initial_stock_fill: f32,
    /// Max units seeded into a stocked slot at world-gen.
    pub initial_stock_max: u32,
    pub points_per_pick: u32,
    pub points_per_put_away: u32,
    pub points_per_order: u32,
    pub points_per_inbound_round: u32,
    pub time_bonus_per_sec: u32,
}
