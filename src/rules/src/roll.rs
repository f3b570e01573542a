// Copyright © racesim 2026-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rand::RngCore;

use data::ability_definitions::capability::MoveDistanceQuery;
use data::core::{RacerIdx, Source};
use data::events::{Event, EventKind, EventTriggerMode, Phase, RollContribution};
use data::game_states::GameState;
use utils::outcome::{Outcome, StopCondition};

use crate::dispatcher::{AgentProvider, Observer};
use crate::scheduler;

/// Rolls the die, runs every `roll_modify` ability the active racer holds,
/// and — unless a `roll_override` ability state entry is present — folds
/// the results into `RollState`. A roll override always wins outright and
/// skips the modifier chain, matching the "fixed result" ability pattern
/// (e.g. always-move-exactly-N).
pub fn handle_perform_main_roll(state: &mut GameState, target: RacerIdx) -> Outcome {
    if !state.racer(target).active() || state.racer(target).main_move_consumed {
        return utils::outcome::OK;
    }

    let roll_serial = state.roll_state.bump_serial();

    if let Some(overridden) = state.racer(target).roll_override() {
        state.roll_state.dice_value = None;
        state.roll_state.base_value = overridden;
        state.roll_state.final_value = overridden.max(0);
        return push_post_roll_events(state, target, roll_serial, Vec::new());
    }

    let dice_value = 1 + (state.rng.next_u32() % 6);
    let base_value = dice_value as i32;

    let mut query = MoveDistanceQuery::new(target, base_value);
    let modifiers: Vec<_> = state
        .racer(target)
        .abilities
        .iter()
        .filter_map(|a| a.definition.roll_modify.map(|f| (a.owner, f)))
        .collect();

    let mut extra_events = Vec::new();
    for (owner, modify) in modifiers {
        extra_events.extend(modify(&mut query, owner, state));
    }

    state.roll_state.dice_value = Some(dice_value);
    state.roll_state.base_value = base_value;
    state.roll_state.final_value = query.final_value();

    for event in extra_events {
        scheduler::push(state, event)?;
    }

    let breakdown = query.breakdown.iter().map(|(racer, delta)| RollContribution { source_racer: *racer, delta: *delta }).collect();
    push_post_roll_events(state, target, roll_serial, breakdown)
}

fn push_post_roll_events(state: &mut GameState, target: RacerIdx, roll_serial: data::core::Serial, breakdown: Vec<RollContribution>) -> Outcome {
    let window = Event::new(
        EventKind::RollModificationWindow { target, final_value: state.roll_state.final_value, roll_serial },
        Some(target),
        Source::System,
        Phase::RollWindow,
    );
    scheduler::push(state, window)?;

    let resolve = Event::new(
        EventKind::ResolveMainMove { target, roll_serial, roll_event_triggered_events: Vec::new(), modifier_breakdown: breakdown },
        Some(target),
        Source::System,
        Phase::MainAct,
    );
    scheduler::push(state, resolve)
}

/// Confirms the roll this `ResolveMainMove` was scheduled for is still the
/// live one — a reroll bumps `RollState::serial_id`, and any
/// already-queued resolution for the stale roll must be dropped rather
/// than silently acted on.
pub fn handle_resolve_main_move(state: &mut GameState, event: &Event) -> Outcome {
    let EventKind::ResolveMainMove { target, roll_serial, modifier_breakdown, .. } = &event.kind else {
        return utils::outcome::OK;
    };

    if *roll_serial != state.roll_state.serial_id {
        return Err(StopCondition::StaleRoll);
    }

    let final_value = state.roll_state.final_value;
    let dice_value = state.roll_state.dice_value;
    let base_value = state.roll_state.base_value;

    let result = Event::new(
        EventKind::RollResult { target: *target, dice_value, base_value, final_value, modifier_breakdown: modifier_breakdown.clone() },
        Some(*target),
        Source::System,
        Phase::MainAct,
    );
    scheduler::push(state, result)?;

    if final_value == 0 && !state.rules.count_0_moves_for_ability_triggered {
        let skip = Event::new(EventKind::MainMoveSkipped { target: *target }, Some(*target), Source::System, Phase::MainAct);
        return scheduler::push(state, skip);
    }

    let exec = Event::new(EventKind::ExecuteMainMove { target: *target }, Some(*target), Source::System, Phase::MainAct);
    scheduler::push(state, exec)
}

/// Converts the settled roll into a main `MoveCmd`, marking the racer's
/// main move as consumed for this turn. A racer whose main move was already
/// consumed (e.g. skipped out from under it by another racer's reaction to
/// `RollResult`) is left in place — this is the pre-emption hook abilities
/// like a forced-skip use.
pub fn handle_execute_main_move(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    target: RacerIdx,
) -> Outcome {
    if !state.racer(target).active() || state.racer(target).main_move_consumed {
        return utils::outcome::OK;
    }

    let distance = state.roll_state.final_value;
    state.racer_mut(target).main_move_consumed = true;
    let _ = (agents, observer);

    if distance <= 0 {
        return utils::outcome::OK;
    }

    let mv = Event::new(
        EventKind::MoveCmd { target, distance, is_main: true, emit_ability_triggered: EventTriggerMode::AfterResolution },
        Some(target),
        Source::System,
        Phase::MoveExec,
    );
    scheduler::push(state, mv)
}

/// Re-rolls for `target`: bumps the reroll counter and schedules another
/// `PerformMainRoll`, invalidating the stale roll serial so any
/// already-queued `ResolveMainMove` for the old roll is dropped.
pub fn trigger_reroll(state: &mut GameState, target: RacerIdx) -> Outcome {
    state.racer_mut(target).reroll_count += 1;
    let reroll = Event::new(EventKind::PerformMainRoll { target }, Some(target), Source::System, Phase::RollDice);
    scheduler::push(state, reroll)
}

#[cfg(test)]
mod tests {
    use data::board_states::Board;
    use data::core::TileIndex;
    use data::racer_states::RacerState;
    use data::rules_config::Rules;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;

    #[test]
    fn roll_schedules_modification_window_then_resolve() {
        let racers = vec![RacerState::new(RacerIdx(0), "R0", TileIndex(0))];
        let mut state = GameState::new(racers, Board::new(TileIndex(20)), Rules::default(), Xoshiro256StarStar::seed_from_u64(7));

        handle_perform_main_roll(&mut state, RacerIdx(0)).unwrap();
        assert_eq!(state.queue.len(), 2);

        let first = scheduler::pop(&mut state).unwrap();
        assert!(matches!(first.event.kind, EventKind::RollModificationWindow { .. }));
        let second = scheduler::pop(&mut state).unwrap();
        assert!(matches!(second.event.kind, EventKind::ResolveMainMove { .. }));
    }

    #[test]
    fn stale_roll_serial_is_rejected() {
        let racers = vec![RacerState::new(RacerIdx(0), "R0", TileIndex(0))];
        let mut state = GameState::new(racers, Board::new(TileIndex(20)), Rules::default(), Xoshiro256StarStar::seed_from_u64(7));
        state.roll_state.serial_id = data::core::Serial(5);

        let stale = Event::new(
            EventKind::ResolveMainMove {
                target: RacerIdx(0),
                roll_serial: data::core::Serial(1),
                roll_event_triggered_events: Vec::new(),
                modifier_breakdown: Vec::new(),
            },
            Some(RacerIdx(0)),
            Source::System,
            Phase::MainAct,
        );
        let result = handle_resolve_main_move(&mut state, &stale);
        assert!(matches!(result, Err(StopCondition::StaleRoll)));
    }
}
