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

use std::cmp::Reverse;

use data::core::Depth;
use data::events::{Event, EventKind, EventTriggerMode, Phase, ScheduledEvent};
use data::game_states::game_state::{GameState, ProcessingContext};
use utils::outcome::Outcome;
use utils::verify;

/// `priority = 0` for system/board events (no responsible racer), else the
/// clockwise turn-order offset from the current racer, `1 +
/// ((responsible - current) mod N)`.
fn compute_priority(state: &GameState, event: &Event) -> u32 {
    match event.responsible {
        None => 0,
        Some(responsible) => {
            let n = state.racer_count() as i64;
            let current = state.current_racer_idx.0 as i64;
            let offset = (responsible.0 as i64 - current).rem_euclid(n);
            1 + offset as u32
        }
    }
}

/// Depth assignment per spec.md §3/§4.1: `0` if the queue is idle or the new
/// event's phase differs from the currently-processing event's phase (a
/// fresh chronological step, not a reaction); within the same phase, keeps
/// the currently-processing event's depth when that event's own priority is
/// `0` (system continuation), otherwise `current_depth + 1` (a reaction
/// nested under a racer-owned event).
fn compute_depth(state: &GameState, event: &Event) -> Depth {
    match state.current_processing {
        None => Depth(0),
        Some(ProcessingContext { depth, priority, phase }) => {
            if event.phase != phase {
                Depth(0)
            } else if priority == 0 {
                depth
            } else {
                Depth(depth.0 + 1)
            }
        }
    }
}

/// Enqueues `event`, assigning serial/depth/priority/mode, and — per
/// `EventTriggerMode::Immediately` — synchronously pushes its
/// `AbilityTriggered` event right after, matching `push_event`'s tail call
/// in the engine this was grounded on.
pub fn push(state: &mut GameState, event: Event) -> Outcome {
    verify!(
        !(event.emit_ability_triggered() != EventTriggerMode::Never && event.responsible.is_none()),
        "event with a non-Never emit_ability_triggered mode must carry a responsible racer"
    );

    let priority = compute_priority(state, &event);
    let depth = compute_depth(state, &event);
    let serial = state.next_serial();
    let mode = state.rules.timing_mode;

    let immediate = event.emit_ability_triggered() == EventTriggerMode::Immediately;
    let responsible = event.responsible;
    let source = event.source.clone();
    let target = event.target_racer();

    state.queue.push(Reverse(ScheduledEvent::new(event, depth, priority, serial, mode)));

    if immediate {
        let trigger = Event::new(
            EventKind::AbilityTriggered { target, movement_distance: 0 },
            responsible,
            source,
            Phase::Reaction,
        );
        push(state, trigger)?;
    }

    utils::outcome::OK
}

/// Pops the least event by the mode-dependent sort key and records it as
/// the currently-processing event (consulted by the next `push`'s depth
/// computation).
pub fn pop(state: &mut GameState) -> Option<ScheduledEvent> {
    let scheduled = state.queue.pop().map(|Reverse(se)| se)?;
    state.current_processing =
        Some(ProcessingContext { depth: scheduled.depth, priority: scheduled.priority, phase: scheduled.phase() });
    Some(scheduled)
}

/// Empties the queue (used on race end).
pub fn clear(state: &mut GameState) {
    state.queue.clear();
    state.current_processing = None;
}

#[cfg(test)]
mod tests {
    use data::board_states::Board;
    use data::core::{RacerIdx, TileIndex};
    use data::events::EventTriggerMode;
    use data::game_states::GameState;
    use data::racer_states::RacerState;
    use data::rules_config::Rules;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;

    fn state_with(n: usize) -> GameState {
        let racers = (0..n).map(|i| RacerState::new(RacerIdx(i), format!("R{i}"), TileIndex(0))).collect();
        GameState::new(racers, Board::new(TileIndex(20)), Rules::default(), Xoshiro256StarStar::seed_from_u64(1))
    }

    fn turn_start(target: RacerIdx) -> Event {
        Event::new(EventKind::TurnStart { target }, None, data::core::Source::System, Phase::System)
    }

    #[test]
    fn system_events_get_priority_zero() {
        let mut state = state_with(3);
        push(&mut state, turn_start(RacerIdx(0))).unwrap();
        let popped = pop(&mut state).unwrap();
        assert_eq!(popped.priority, 0);
    }

    #[test]
    fn responsible_racer_gets_clockwise_priority() {
        let mut state = state_with(4);
        state.current_racer_idx = RacerIdx(1);
        let evt = Event::new(
            EventKind::MoveCmd { target: RacerIdx(3), distance: 1, is_main: false, emit_ability_triggered: EventTriggerMode::Never },
            Some(RacerIdx(3)),
            data::core::Source::named("Test"),
            Phase::Reaction,
        );
        push(&mut state, evt).unwrap();
        let popped = pop(&mut state).unwrap();
        // (3 - 1) mod 4 = 2, priority = 1 + 2 = 3
        assert_eq!(popped.priority, 3);
    }

    #[test]
    fn pop_on_empty_queue_returns_none() {
        let mut state = state_with(2);
        assert!(pop(&mut state).is_none());
    }
}
