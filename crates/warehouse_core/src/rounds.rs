//! Round configuration selection, phase advancement, and scoring helpers.

use crate::{Constants, Content, Counters, Event, EventEnvelope, RoundConfig, RoundState};

/// Picks the config for the next round, cycling through `content.rounds` in
/// order. Panics on an empty round list — content validation rejects that.
pub(crate) fn next_config(content: &Content, counters: &Counters) -> RoundConfig {
    assert!(!content.rounds.is_empty(), "content has no round configs");
    #[allow(clippy::cast_possible_truncation)]
    let idx = (counters.rounds_started % content.rounds.len() as u64) as usize;
    content.rounds[idx].clone()
}

pub(crate) fn fresh_round(config: RoundConfig) -> RoundState {
    RoundState {
        config,
        current_phase_index: 0,
        score: 0,
        is_finished: false,
    }
}

pub(crate) fn add_score(round: &mut Option<RoundState>, points: u32) {
    if let Some(round) = round.as_mut() {
        round.score = round.score.saturating_add(points);
    }
}

/// Bumps the phase index after a phase objective completes. Past the last
/// phase the round is marked finished and a `RoundFinished` event is emitted.
/// Aligning `state.mode` to the new phase stays an explicit driver call.
pub(crate) fn advance_phase(
    round: &mut Option<RoundState>,
    counters: &mut Counters,
    frame: u64,
    events: &mut Vec<EventEnvelope>,
) {
    let Some(round) = round.as_mut() else {
        return;
    };
    if round.is_finished {
        return;
    }

    round.current_phase_index += 1;
    if round.current_phase_index >= round.config.phases.len() {
        round.is_finished = true;
        events.push(crate::emit(
            counters,
            frame,
            Event::RoundFinished {
                round_id: round.config.id.clone(),
                score: round.score,
            },
        ));
    } else {
        let mode = round.config.phases[round.current_phase_index];
        events.push(crate::emit(
            counters,
            frame,
            Event::PhaseAdvanced {
                phase_index: round.current_phase_index,
                mode,
            },
        ));
    }
}

/// Time bonus for a round that finished with `seconds_left` on the clock.
///
/// A round that merely timed out mid-task yields zero bonus — only a round
/// whose objective completed (`is_finished`) earns one.
pub fn time_bonus(round: &RoundState, constants: &Constants, seconds_left: u32) -> u32 {
    if round.is_finished {
        seconds_left.saturating_mul(constants.time_bonus_per_sec)
    } else {
        0
    }
}
