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

use data::core::{RacerIdx, Source, TurnNumber};
use data::events::{Event, EventKind, Phase};
use data::game_states::GameState;
use utils::outcome::{Outcome, StopCondition};

use crate::dispatcher::{self, AgentProvider, Observer};
use crate::scheduler;

/// Runs the current racer's turn to completion: enqueues `TurnStart` and
/// the first `PerformMainRoll`, then drains the queue event by event.
/// Before every pop, the full game state is hashed and checked against
/// this turn's history set — a repeat means some ability chain has looped
/// back to a state already visited this turn, and the turn is aborted
/// rather than spinning forever.
pub fn run_turn(state: &mut GameState, agents: &dyn AgentProvider, observer: &mut Observer<'_>) -> Outcome {
    state.history.clear();

    let current = state.current_racer_idx;
    if !state.racer(current).active() {
        return utils::outcome::OK;
    }

    state.racer_mut(current).main_move_consumed = false;

    let turn_start = Event::new(EventKind::TurnStart { target: current }, Some(current), Source::System, Phase::System);
    scheduler::push(state, turn_start)?;

    let roll = Event::new(EventKind::PerformMainRoll { target: current }, Some(current), Source::System, Phase::RollDice);
    scheduler::push(state, roll)?;

    drain(state, agents, observer)
}

fn drain(state: &mut GameState, agents: &dyn AgentProvider, observer: &mut Observer<'_>) -> Outcome {
    loop {
        if state.queue.is_empty() {
            return utils::outcome::OK;
        }

        let hash = state.state_hash();
        if !state.history.insert(hash) {
            tracing::warn!(round = state.round.0, racer = state.current_racer_idx.0, "cycle detected, aborting turn");
            scheduler::clear(state);
            return Err(StopCondition::CycleDetected);
        }

        let Some(scheduled) = scheduler::pop(state) else {
            return utils::outcome::OK;
        };

        match dispatcher::dispatch_event(state, agents, observer, &scheduled) {
            Ok(()) => {}
            Err(StopCondition::StaleRoll) => {}
            Err(StopCondition::RaceOver) => return utils::outcome::OK,
            Err(StopCondition::CycleDetected) => return utils::outcome::OK,
            Err(other) => return Err(other),
        }

        if state.race_over {
            return utils::outcome::OK;
        }
    }
}

/// Advances `current_racer_idx` to the next active racer clockwise,
/// bumping `round` whenever the search wraps past index `0` (not merely
/// past whatever index play started the search from).
pub fn advance_turn(state: &mut GameState) {
    let n = state.racer_count();
    if n == 0 {
        return;
    }
    let curr = state.current_racer_idx.0;
    let mut next = (curr + 1) % n;
    while next != curr && !state.racer(RacerIdx(next)).active() {
        next = (next + 1) % n;
    }

    if next < curr {
        state.round = TurnNumber(state.round.0 + 1);
    }
    state.current_racer_idx = RacerIdx(next);
}

/// Runs whole turns until the race ends or `max_turns` rounds have
/// elapsed (when given — `None` runs to completion).
pub fn run_race(state: &mut GameState, agents: &dyn AgentProvider, observer: &mut Observer<'_>, max_turns: Option<u32>) -> Outcome {
    loop {
        if state.race_over {
            return utils::outcome::OK;
        }
        if let Some(max) = max_turns {
            if state.round.0 >= max {
                return utils::outcome::OK;
            }
        }

        run_turn(state, agents, observer)?;
        advance_turn(state);
    }
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
    use crate::test_support::{silent_observer, NullAgentProvider};

    fn state_with(n: usize) -> GameState {
        let racers = (0..n).map(|i| RacerState::new(RacerIdx(i), format!("R{i}"), TileIndex(0))).collect();
        GameState::new(racers, Board::new(TileIndex(5)), Rules::default(), Xoshiro256StarStar::seed_from_u64(11))
    }

    #[test]
    fn advance_turn_wraps_and_bumps_round() {
        let mut state = state_with(2);
        state.current_racer_idx = RacerIdx(1);
        advance_turn(&mut state);
        assert_eq!(state.current_racer_idx, RacerIdx(0));
        assert_eq!(state.round, TurnNumber(1));
    }

    #[test]
    fn advance_turn_skips_inactive_racers() {
        let mut state = state_with(3);
        state.racer_mut(RacerIdx(1)).finished = true;
        advance_turn(&mut state);
        assert_eq!(state.current_racer_idx, RacerIdx(2));
    }

    #[test]
    fn run_turn_drains_to_an_empty_queue() {
        let mut state = state_with(1);
        let mut observer = silent_observer;
        run_turn(&mut state, &NullAgentProvider, &mut observer).unwrap();
        assert!(state.queue.is_empty());
    }

    #[test]
    fn run_race_stops_after_max_turns() {
        let mut state = state_with(2);
        let mut observer = silent_observer;
        run_race(&mut state, &NullAgentProvider, &mut observer, Some(3)).unwrap();
        assert!(state.round.0 >= 3 || state.race_over);
    }
}
