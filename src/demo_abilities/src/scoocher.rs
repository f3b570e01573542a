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

/// Reacts to any ability triggering but its own, scooching one tile closer
/// every time someone else does something.
pub static SCOOCH_STEP: AbilityDefinition =
    AbilityDefinition::new("ScoochStep", &[EventTag::AbilityTriggered]).with_execute(scooch_execute);

#[linkme::distributed_slice(abilities::ABILITY_REGISTRY)]
static SCOOCH_STEP_ENTRY: &AbilityDefinition = &SCOOCH_STEP;

fn scooch_execute(
    event: &Event,
    owner: RacerIdx,
    _instance: AbilityInstanceId,
    _state: &mut GameState,
    _agent: &dyn Agent,
) -> ExecuteResult {
    if !matches!(event.kind, EventKind::AbilityTriggered { .. }) || event.responsible == Some(owner) {
        return ExecuteResult::skip();
    }

    let mv = Event::new(
        EventKind::MoveCmd { target: owner, distance: 1, is_main: false, emit_ability_triggered: EventTriggerMode::AfterResolution },
        Some(owner),
        Source::named(SCOOCH_STEP.name),
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

    struct NullAgent;
    impl Agent for NullAgent {
        fn make_boolean_decision(&self, _state: &GameState, _ctx: &data::agents::DecisionContext) -> bool {
            false
        }
        fn make_selection_decision(&self, _state: &GameState, _ctx: &data::agents::SelectionDecisionContext) -> usize {
            0
        }
    }

    fn state_with(n: usize) -> GameState {
        let racers = (0..n).map(|i| RacerState::new(RacerIdx(i), format!("R{i}"), TileIndex(0))).collect();
        GameState::new(racers, Board::new(TileIndex(20)), Rules::default(), Xoshiro256StarStar::seed_from_u64(0))
    }

    #[test]
    fn scooches_on_someone_elses_trigger() {
        let mut state = state_with(2);
        let event = Event::new(
            EventKind::AbilityTriggered { target: Some(RacerIdx(1)), movement_distance: 3 },
            Some(RacerIdx(1)),
            Source::named("Other"),
            Phase::Reaction,
        );

        let result = scooch_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &NullAgent);
        assert_eq!(result.extra_events.len(), 1);
        assert!(matches!(result.extra_events[0].kind, EventKind::MoveCmd { distance: 1, .. }));
    }

    #[test]
    fn ignores_its_own_trigger() {
        let mut state = state_with(1);
        let event = Event::new(
            EventKind::AbilityTriggered { target: Some(RacerIdx(0)), movement_distance: 1 },
            Some(RacerIdx(0)),
            Source::named("ScoochStep"),
            Phase::Reaction,
        );

        let result = scooch_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &NullAgent);
        assert!(result.extra_events.is_empty());
    }
}
