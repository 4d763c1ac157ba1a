//! `warehouse_core` — deterministic warehouse game state machine.
//!
//! No IO, no clocks, no rendering. All randomness via the passed-in Rng;
//! drivers own the frame loop and the countdown timer.

pub mod commands;
mod grid;
mod id;
pub(crate) mod inbound;
pub(crate) mod orders;
mod rounds;
mod slots;
mod types;

pub use grid::{resolve_tile, tile_of, TileHit};
pub use id::generate_uuid;
pub use rounds::time_bonus;
pub use slots::SlotStore;
pub use types::*;

pub(crate) fn emit(counters: &mut Counters, frame: u64, event: Event) -> EventEnvelope {
    let id = EventId(format!("evt_{:06}", counters.next_event_id));
    counters.next_event_id += 1;
    EventEnvelope { id, frame, event }
}

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;
