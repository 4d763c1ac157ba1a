//! The mutating command surface consumed by drivers.
//!
//! Every command either fully applies or refuses as a no-op; refusal is
//! signalled through the return value, never through an event or a panic
//! (wrong mode, carry capacity, missing slot, missing stock, unreceived
//! task). Events produced by applied commands are appended to the
//! caller-supplied journal.

use rand::Rng;

use crate::{inbound, orders, rounds};
use crate::{
    Content, Event, InboundTask, Mode, OrderStatus, RoundConfig, SlotId, WarehouseState,
};

/// Picks one unit from `slot_id` for the current order. Picking mode only.
pub fn pick_item(
    state: &mut WarehouseState,
    content: &Content,
    slot_id: &SlotId,
    events: &mut Vec<crate::EventEnvelope>,
) -> bool {
    if state.mode != Mode::Picking {
        return false;
    }
    let frame = state.meta.frame;
    let Some(order) = state.current_order.as_mut() else {
        return false;
    };
    let Some(item_type) = orders::pick(
        order,
        slot_id,
        &mut state.slots,
        &mut state.carried,
        content.constants.max_carry,
    ) else {
        return false;
    };

    rounds::add_score(&mut state.round, content.constants.points_per_pick);
    events.push(crate::emit(
        &mut state.counters,
        frame,
        Event::ItemPicked {
            slot_id: slot_id.clone(),
            item_type,
        },
    ));
    if order.status == OrderStatus::Packing {
        events.push(crate::emit(
            &mut state.counters,
            frame,
            Event::OrderPacked {
                order_id: order.id.clone(),
            },
        ));
    }
    true
}

/// Receives the next pending inbound item at the dock. Inbound mode only.
/// Returns the received task so the driver can display its target slot.
pub fn receive_from_dock(
    state: &mut WarehouseState,
    content: &Content,
    events: &mut Vec<crate::EventEnvelope>,
) -> Option<InboundTask> {
    if state.mode != Mode::Inbound {
        return None;
    }
    let frame = state.meta.frame;
    let idx = inbound::receive(
        &mut state.inbound_tasks,
        &mut state.carried,
        content.constants.max_carry,
    )?;
    let task = state.inbound_tasks[idx].clone();
    events.push(crate::emit(
        &mut state.counters,
        frame,
        Event::ItemReceived {
            item_type: task.item_type.clone(),
            target_slot_id: task.target_slot_id.clone(),
        },
    ));
    Some(task)
}

/// Puts one carried unit away into `slot_id`. Inbound mode only. Completing
/// the final task of the set scores the inbound bonus and advances the round
/// phase.
pub fn put_away_item(
    state: &mut WarehouseState,
    content: &Content,
    slot_id: &SlotId,
    events: &mut Vec<crate::EventEnvelope>,
) -> bool {
    if state.mode != Mode::Inbound {
        return false;
    }
    let frame = state.meta.frame;
    let Some(item_type) = inbound::put_away(
        &mut state.inbound_tasks,
        slot_id,
        &mut state.slots,
        &mut state.carried,
        content.constants.slot_capacity,
    ) else {
        return false;
    };

    rounds::add_score(&mut state.round, content.constants.points_per_put_away);
    events.push(crate::emit(
        &mut state.counters,
        frame,
        Event::ItemPutAway {
            slot_id: slot_id.clone(),
            item_type,
        },
    ));

    if inbound::all_completed(&state.inbound_tasks) {
        rounds::add_score(&mut state.round, content.constants.points_per_inbound_round);
        events.push(crate::emit(
            &mut state.counters,
            frame,
            Event::InboundCompleted {
                tasks: state.inbound_tasks.len(),
            },
        ));
        rounds::advance_phase(&mut state.round, &mut state.counters, frame, events);
    }
    true
}

/// Ships the current order at the shipping zone. Only valid once the order
/// is fully picked (`Packing`); a second call refuses. Clears the entire
/// carried inventory and advances the round phase.
pub fn complete_order(
    state: &mut WarehouseState,
    content: &Content,
    events: &mut Vec<crate::EventEnvelope>,
) -> bool {
    if state.mode != Mode::Picking {
        return false;
    }
    let frame = state.meta.frame;
    let items_shipped = state.carried.len();
    let Some(order) = state.current_order.as_mut() else {
        return false;
    };
    if !orders::complete(order, &mut state.carried) {
        return false;
    }
    let order_id = order.id.clone();

    rounds::add_score(&mut state.round, content.constants.points_per_order);
    events.push(crate::emit(
        &mut state.counters,
        frame,
        Event::OrderShipped {
            order_id,
            items_shipped,
        },
    ));
    rounds::advance_phase(&mut state.round, &mut state.counters, frame, events);
    true
}

/// Switches the operating mode, discarding the other mode's task set and
/// regenerating the target mode's.
///
/// The carried inventory is NOT cleared: a player who switches mid-carry
/// keeps the items.
pub fn switch_mode(
    state: &mut WarehouseState,
    content: &Content,
    mode: Mode,
    rng: &mut impl Rng,
    events: &mut Vec<crate::EventEnvelope>,
) {
    let frame = state.meta.frame;
    state.mode = mode;
    events.push(crate::emit(
        &mut state.counters,
        frame,
        Event::ModeSwitched { mode },
    ));

    match mode {
        Mode::Inbound => {
            state.current_order = None;
            state.inbound_tasks =
                inbound::generate(&state.slots, &content.items, &content.constants, rng);
            events.push(crate::emit(
                &mut state.counters,
                frame,
                Event::InboundGenerated {
                    tasks: state.inbound_tasks.len(),
                },
            ));
        }
        Mode::Picking => {
            state.inbound_tasks.clear();
            state.current_order = orders::generate(&state.slots, &content.constants, rng);
            if let Some(order) = &state.current_order {
                events.push(crate::emit(
                    &mut state.counters,
                    frame,
                    Event::OrderGenerated {
                        order_id: order.id.clone(),
                        lines: order.items.len(),
                    },
                ));
            }
        }
    }
}

/// Starts the next round, cycling through the content's round configs.
pub fn start_round(
    state: &mut WarehouseState,
    content: &Content,
    rng: &mut impl Rng,
    events: &mut Vec<crate::EventEnvelope>,
) -> bool {
    let config = rounds::next_config(content, &state.counters);
    state.counters.rounds_started += 1;
    install_round(state, content, config, rng, events)
}

/// Replays the current round from scratch: same config, score and carried
/// inventory reset, task set regenerated.
pub fn restart_round(
    state: &mut WarehouseState,
    content: &Content,
    rng: &mut impl Rng,
    events: &mut Vec<crate::EventEnvelope>,
) -> bool {
    let Some(round) = &state.round else {
        return false;
    };
    let config = round.config.clone();
    install_round(state, content, config, rng, events)
}

fn install_round(
    state: &mut WarehouseState,
    content: &Content,
    config: RoundConfig,
    rng: &mut impl Rng,
    events: &mut Vec<crate::EventEnvelope>,
) -> bool {
    let Some(&first_phase) = config.phases.first() else {
        return false;
    };
    let frame = state.meta.frame;
    events.push(crate::emit(
        &mut state.counters,
        frame,
        Event::RoundStarted {
            round_id: config.id.clone(),
            phases: config.phases.len(),
            time_limit_secs: config.time_limit_secs,
        },
    ));
    state.round = Some(rounds::fresh_round(config));
    state.carried.clear();
    switch_mode(state, content, first_phase, rng, events);
    true
}
