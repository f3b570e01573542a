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

/// Whenever someone else rolls a 1, that roll never moves them — Inchworm
/// steals the turn and creeps forward one tile instead.
pub static INCHWORM_CREEP: AbilityDefinition =
    AbilityDefinition::new("InchwormCreep", &[EventTag::RollResult]).with_execute(inchworm_execute);

#[linkme::distributed_slice(abilities::ABILITY_REGISTRY)]
static INCHWORM_CREEP_ENTRY: &AbilityDefinition = &INCHWORM_CREEP;

fn inchworm_execute(
    event: &Event,
    owner: RacerIdx,
    _instance: AbilityInstanceId,
    state: &mut GameState,
    _agent: &dyn Agent,
) -> ExecuteResult {
    let EventKind::RollResult { target, dice_value, .. } = &event.kind else {
        return ExecuteResult::skip();
    };
    if *target == owner || *dice_value != Some(1) {
        return ExecuteResult::skip();
    }

    // Pre-empt the main move before it executes; `roll::handle_execute_main_move`
    // checks this flag and no-ops if it's already set.
    state.racer_mut(*target).main_move_consumed = true;

    let mv = Event::new(
        EventKind::MoveCmd { target: owner, distance: 1, is_main: false, emit_ability_triggered: EventTriggerMode::AfterResolution },
        Some(owner),
        Source::named(INCHWORM_CREEP.name),
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
    fn steals_the_main_move_on_someone_elses_roll_of_one() {
        let mut state = state_with(2);
        let event = Event::new(
            EventKind::RollResult { target: RacerIdx(1), dice_value: Some(1), base_value: 1, final_value: 1, modifier_breakdown: Vec::new() },
            Some(RacerIdx(1)),
            Source::System,
            Phase::MainAct,
        );

        let result = inchworm_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &NullAgent);

        assert!(state.racer(RacerIdx(1)).main_move_consumed);
        assert_eq!(result.extra_events.len(), 1);
        assert!(matches!(
            result.extra_events[0].kind,
            EventKind::MoveCmd { target, distance: 1, .. } if target == RacerIdx(0)
        ));
    }

    #[test]
    fn ignores_rolls_other_than_one() {
        let mut state = state_with(2);
        let event = Event::new(
            EventKind::RollResult { target: RacerIdx(1), dice_value: Some(4), base_value: 4, final_value: 4, modifier_breakdown: Vec::new() },
            Some(RacerIdx(1)),
            Source::System,
            Phase::MainAct,
        );

        let result = inchworm_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &NullAgent);
        assert!(!state.racer(RacerIdx(1)).main_move_consumed);
        assert!(result.extra_events.is_empty());
    }

    #[test]
    fn ignores_its_own_roll() {
        let mut state = state_with(1);
        let event = Event::new(
            EventKind::RollResult { target: RacerIdx(0), dice_value: Some(1), base_value: 1, final_value: 1, modifier_breakdown: Vec::new() },
            Some(RacerIdx(0)),
            Source::System,
            Phase::MainAct,
        );

        let result = inchworm_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &NullAgent);
        assert!(result.extra_events.is_empty());
    }
}
