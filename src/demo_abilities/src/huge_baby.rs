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
use data::board_states::BoardModifier;
use data::core::{AbilityInstanceId, ModifierId, RacerIdx, Source, TileIndex};
use data::events::{Event, EventKind, EventTag, EventTriggerMode, Phase, WarpData};
use data::game_states::GameState;

/// The physical blocker tile the Huge Baby leaves behind: lets its owner
/// pass through freely but redirects everyone else back one tile, the way
/// a board-attached bouncer would.
pub static HUGE_BABY_BLOCKER: AbilityDefinition =
    AbilityDefinition::new("HugeBabyBlocker", &[]).with_approach(huge_baby_approach);

/// Keeps the blocker tile in sync with the owner's position and pushes back
/// anyone caught standing where it lands.
pub static HUGE_BABY_PUSH: AbilityDefinition =
    AbilityDefinition::new("HugeBabyPush", &[EventTag::PostMove, EventTag::PostWarp])
        .with_execute(huge_baby_execute)
        .with_on_gain(huge_baby_on_gain)
        .with_on_loss(huge_baby_on_loss);

#[linkme::distributed_slice(abilities::ABILITY_REGISTRY)]
static HUGE_BABY_PUSH_ENTRY: &AbilityDefinition = &HUGE_BABY_PUSH;

fn huge_baby_approach(candidate: TileIndex, mover: RacerIdx, owner: RacerIdx, _state: &mut GameState) -> Option<TileIndex> {
    if mover == owner || candidate.0 == 0 {
        return None;
    }
    Some(TileIndex((candidate.0 - 1).max(0)))
}

fn huge_baby_on_gain(owner: RacerIdx, _instance: AbilityInstanceId, state: &mut GameState) {
    let Some(position) = state.racer(owner).position else {
        return;
    };
    if position.0 > 0 {
        state.board.add_dynamic(position, BoardModifier::new(&HUGE_BABY_BLOCKER, Some(owner)));
    }
}

fn huge_baby_on_loss(owner: RacerIdx, _instance: AbilityInstanceId, state: &mut GameState) {
    let id = ModifierId::new(HUGE_BABY_BLOCKER.name, Some(owner));
    state.board.remove_dynamic_by_identity(&id);
}

fn huge_baby_execute(
    event: &Event,
    owner: RacerIdx,
    _instance: AbilityInstanceId,
    state: &mut GameState,
    _agent: &dyn Agent,
) -> ExecuteResult {
    let (target, start, end) = match &event.kind {
        EventKind::PostMove { target, start, end } | EventKind::PostWarp { target, start, end } => (*target, *start, *end),
        _ => return ExecuteResult::skip(),
    };
    if target != owner {
        return ExecuteResult::skip();
    }

    let id = ModifierId::new(HUGE_BABY_BLOCKER.name, Some(owner));
    if start.0 != 0 {
        state.board.remove_dynamic_at(start, &id);
    }

    let mut extra_events = Vec::new();
    let still_has_push = state.racer(owner).abilities.iter().any(|a| a.definition.name == HUGE_BABY_PUSH.name);

    if end.0 != 0 && still_has_push {
        state.board.add_dynamic(end, BoardModifier::new(&HUGE_BABY_BLOCKER, Some(owner)));

        let victims: Vec<RacerIdx> =
            state.racers.iter().filter(|r| r.idx != owner && r.active() && r.position == Some(end)).map(|r| r.idx).collect();

        if !victims.is_empty() {
            let target_tile = TileIndex((end.0 - 1).max(0));
            let warps = victims.into_iter().map(|racer| WarpData { racer, target_tile }).collect();
            extra_events.push(Event::new(
                EventKind::SimultaneousWarpCmd { warps, emit_ability_triggered: EventTriggerMode::AfterResolution },
                Some(owner),
                Source::named(HUGE_BABY_PUSH.name),
                Phase::PreMain,
            ));
        }
    }

    ExecuteResult::skip_with(extra_events)
}

#[cfg(test)]
mod tests {
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
        GameState::new(racers, data::board_states::Board::new(TileIndex(20)), Rules::default(), Xoshiro256StarStar::seed_from_u64(0))
    }

    #[test]
    fn redirects_everyone_but_the_owner() {
        let mut state = state_with(2);
        assert_eq!(huge_baby_approach(TileIndex(5), RacerIdx(1), RacerIdx(0), &mut state), Some(TileIndex(4)));
        assert_eq!(huge_baby_approach(TileIndex(5), RacerIdx(0), RacerIdx(0), &mut state), None);
    }

    #[test]
    fn never_blocks_the_start_tile() {
        let mut state = state_with(2);
        assert_eq!(huge_baby_approach(TileIndex(0), RacerIdx(1), RacerIdx(0), &mut state), None);
    }

    #[test]
    fn relocates_blocker_and_pushes_victims_on_landing() {
        let mut state = state_with(2);
        state.racer_mut(RacerIdx(0)).abilities.push(data::ability_definitions::AbilityInstance::new(&HUGE_BABY_PUSH, RacerIdx(0)));
        state.racer_mut(RacerIdx(1)).position = Some(TileIndex(5));

        let event = Event::new(
            EventKind::PostMove { target: RacerIdx(0), start: TileIndex(0), end: TileIndex(5) },
            Some(RacerIdx(0)),
            Source::System,
            Phase::MoveExec,
        );
        let result = huge_baby_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &NullAgent);

        let id = ModifierId::new(HUGE_BABY_BLOCKER.name, Some(RacerIdx(0)));
        assert!(state.board.has_identity_at(TileIndex(5), &id));
        assert_eq!(result.extra_events.len(), 1);
        assert!(matches!(result.extra_events[0].kind, EventKind::SimultaneousWarpCmd { .. }));
    }
}
