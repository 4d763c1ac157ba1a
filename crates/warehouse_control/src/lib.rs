//! Driver-side glue: per-frame player input, interact edge detection, and
//! the mapping from "interact on this tile" to a core command.
//!
//! Stands in for the presentation layer: a real UI would poll a keyboard
//! and a sprite position; the [`AutoPlayer`] derives the same inputs from
//! the warehouse state instead.

use serde::{Deserialize, Serialize};
use warehouse_core::{
    commands, resolve_tile, Content, InboundTask, Mode, OrderStatus, SlotId, TileHit,
    WarehouseState, ZoneRect,
};

/// One frame of player input: a single-tile step and the raw held state of
/// the interact control. Edge detection is the driver's job, via
/// [`InteractLatch`]. Serializable so drivers can record input streams for
/// deterministic replay.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrameInput {
    pub step: (i32, i32),
    pub interact_held: bool,
}

/// Produces one [`FrameInput`] per frame from the observable warehouse
/// state.
pub trait PlayerDriver {
    fn next_input(
        &mut self,
        state: &WarehouseState,
        content: &Content,
        pos: (i32, i32),
    ) -> FrameInput;
}

/// Turns a held interact control into a single-frame trigger: true only on
/// the frame the control transitions from released to pressed. Holding the
/// control never fires twice.
#[derive(Debug, Default)]
pub struct InteractLatch {
    held: bool,
}

impl InteractLatch {
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.held;
        self.held = pressed;
        edge
    }
}

/// What a resolved interaction did, for driver-side messaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    Picked(SlotId),
    PutAway(SlotId),
    Received(InboundTask),
    Shipped,
    /// A precondition failed (wrong mode, carry capacity, incomplete order,
    /// no matching task). The state is untouched.
    Refused,
    /// The tile has nothing to interact with.
    Nothing,
}

/// Applies the single interaction for the tile the player stands on:
/// slots pick or put away depending on mode, the shipping zone ships, the
/// receiving dock receives.
pub fn interact(
    state: &mut WarehouseState,
    content: &Content,
    pos: (i32, i32),
    events: &mut Vec<warehouse_core::EventEnvelope>,
) -> Interaction {
    match resolve_tile(&state.slots, &content.layout, pos.0, pos.1) {
        TileHit::Slot(slot_id) => match state.mode {
            Mode::Picking => {
                if commands::pick_item(state, content, &slot_id, events) {
                    Interaction::Picked(slot_id)
                } else {
                    Interaction::Refused
                }
            }
            Mode::Inbound => {
                if commands::put_away_item(state, content, &slot_id, events) {
                    Interaction::PutAway(slot_id)
                } else {
                    Interaction::Refused
                }
            }
        },
        TileHit::Shipping => {
            if commands::complete_order(state, content, events) {
                Interaction::Shipped
            } else {
                Interaction::Refused
            }
        }
        TileHit::Receiving => match commands::receive_from_dock(state, content, events) {
            Some(task) => Interaction::Received(task),
            None => Interaction::Refused,
        },
        TileHit::Floor => Interaction::Nothing,
    }
}

/// Walks to whatever tile the current objective needs and presses interact
/// there.
///
/// Objectives, in priority order: deliver a carried inbound item, receive
/// the next inbound item, pick the next order line, ship a packed order.
/// Idle when no round is running or the round is finished.
#[derive(Debug, Default)]
pub struct AutoPlayer {
    /// Release the interact control for one frame after each press so the
    /// latch re-arms.
    resting: bool,
}

impl AutoPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    fn objective(state: &WarehouseState, content: &Content) -> Option<(i32, i32)> {
        let round = state.round.as_ref()?;
        if round.is_finished {
            return None;
        }
        match state.mode {
            Mode::Picking => Self::picking_objective(state, content),
            Mode::Inbound => Self::inbound_objective(state, content),
        }
    }

    fn picking_objective(state: &WarehouseState, content: &Content) -> Option<(i32, i32)> {
        let order = state.current_order.as_ref()?;
        match order.status {
            OrderStatus::Pending | OrderStatus::Picking => {
                let line = order
                    .items
                    .iter()
                    .find(|line| line.picked < line.quantity)?;
                let slot = state.slots.get(&line.slot_id)?;
                Some((slot.x, slot.y))
            }
            OrderStatus::Packing => Some(zone_center(&content.layout.shipping_zone)),
            OrderStatus::Shipped => None,
        }
    }

    fn inbound_objective(state: &WarehouseState, content: &Content) -> Option<(i32, i32)> {
        // Deliver first: put away anything already carried before picking
        // more up at the dock.
        let deliverable = state.inbound_tasks.iter().find(|task| {
            task.is_received && !task.is_completed && state.carried.items().contains(&task.item_type)
        });
        if let Some(task) = deliverable {
            let slot = state.slots.get(&task.target_slot_id)?;
            return Some((slot.x, slot.y));
        }

        let pending = state.inbound_tasks.iter().any(|task| !task.is_received);
        if pending && state.carried.can_carry(content.constants.max_carry) {
            return Some(zone_center(&content.layout.receiving_zone));
        }
        None
    }
}

impl PlayerDriver for AutoPlayer {
    fn next_input(
        &mut self,
        state: &WarehouseState,
        content: &Content,
        pos: (i32, i32),
    ) -> FrameInput {
        let Some(target) = Self::objective(state, content) else {
            self.resting = false;
            return FrameInput::default();
        };

        if pos == target {
            let press = !self.resting;
            self.resting = press;
            return FrameInput {
                step: (0, 0),
                interact_held: press,
            };
        }

        self.resting = false;
        FrameInput {
            step: step_toward(pos, target),
            interact_held: false,
        }
    }
}

fn zone_center(rect: &ZoneRect) -> (i32, i32) {
    (rect.x + rect.width / 2, rect.y + rect.height / 2)
}

/// Axis-aligned single-tile step: close the x gap first, then y.
fn step_toward(pos: (i32, i32), target: (i32, i32)) -> (i32, i32) {
    if pos.0 != target.0 {
        ((target.0 - pos.0).signum(), 0)
    } else {
        (0, (target.1 - pos.1).signum())
    }
}
