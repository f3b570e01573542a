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

use data::ability_definitions::capability::ExecuteResult;
use data::ability_definitions::AbilityDefinition;
use data::agents::Agent;
use data::core::{AbilityInstanceId, RacerIdx, Source};
use data::events::{Event, EventKind, EventTag, EventTriggerMode};
use data::game_states::GameState;

/// Kicks back anyone Centaur passes on its own move.
pub static CENTAUR_TRAMPLE: AbilityDefinition =
    AbilityDefinition::new("CentaurTrample", &[EventTag::Passing]).with_execute(centaur_execute);

#[linkme::distributed_slice(abilities::ABILITY_REGISTRY)]
static CENTAUR_TRAMPLE_ENTRY: &AbilityDefinition = &CENTAUR_TRAMPLE;

fn centaur_execute(
    event: &Event,
    owner: RacerIdx,
    _instance: AbilityInstanceId,
    state: &mut GameState,
    _agent: &dyn Agent,
) -> ExecuteResult {
    let EventKind::Passing { mover, victim, .. } = &event.kind else {
        return ExecuteResult::skip();
    };
    if *mover != owner || !state.racer(*victim).active() {
        return ExecuteResult::skip();
    }

    let mv = Event::new(
        EventKind::MoveCmd { target: *victim, distance: -2, is_main: false, emit_ability_triggered: EventTriggerMode::AfterResolution },
        Some(owner),
        Source::named(CENTAUR_TRAMPLE.name),
        event.phase,
    );
    ExecuteResult::skip_with(vec![mv])
}

#[cfg(test)]
mod tests {
    use data::board_states::Board;
    use data::core::TileIndex;
    use data::events::Phase;
    use data::racer_states::RacerState;
    use data::rules_config::Rules;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;

    fn state_with(n: usize) -> GameState {
        let racers = (0..n).map(|i| RacerState::new(RacerIdx(i), format!("R{i}"), TileIndex(0))).collect();
        GameState::new(racers, Board::new(TileIndex(20)), Rules::default(), Xoshiro256StarStar::seed_from_u64(0))
    }

    struct NullAgent;
    impl Agent for NullAgent {
        fn make_boolean_decision(&self, _state: &GameState, _ctx: &data::agents::DecisionContext) -> bool {
            false
        }
        fn make_selection_decision(&self, _state: &GameState, _ctx: &data::agents::SelectionDecisionContext) -> usize {
            0
        }
    }

    #[test]
    fn tramples_the_victim_it_passed() {
        let mut state = state_with(2);
        let event = Event::new(
            EventKind::Passing { mover: RacerIdx(0), victim: RacerIdx(1), tile: TileIndex(1) },
            Some(RacerIdx(0)),
            Source::System,
            Phase::Reaction,
        );

        let result = centaur_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &NullAgent);
        assert_eq!(result.extra_events.len(), 1);
        assert!(matches!(
            result.extra_events[0].kind,
            EventKind::MoveCmd { target, distance: -2, .. } if target == RacerIdx(1)
        ));
    }

    #[test]
    fn ignores_passing_events_it_did_not_cause() {
        let mut state = state_with(3);
        let event = Event::new(
            EventKind::Passing { mover: RacerIdx(1), victim: RacerIdx(2), tile: TileIndex(1) },
            Some(RacerIdx(1)),
            Source::System,
            Phase::Reaction,
        );

        let result = centaur_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &NullAgent);
        assert!(result.extra_events.is_empty());
    }
}
