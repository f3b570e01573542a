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

use data::ability_definitions::capability::{AbilityOutcome, ExecuteResult};
use data::ability_definitions::AbilityDefinition;
use data::agents::{Agent, SelectionDecisionContext};
use data::core::{AbilityInstanceId, RacerIdx};
use data::events::{Event, EventKind, EventTag};
use data::game_states::GameState;

/// Always has exactly the current sole leader's core ability set, plus
/// itself. Loses everyone else's abilities and copies no one once it is the
/// sole leader.
pub static COPY_LEAD: AbilityDefinition =
    AbilityDefinition::new("CopyLead", &[EventTag::TurnStart, EventTag::PostMove, EventTag::PostWarp])
        .with_execute(copy_lead_execute);

#[linkme::distributed_slice(abilities::ABILITY_REGISTRY)]
static COPY_LEAD_ENTRY: &AbilityDefinition = &COPY_LEAD;

fn core_ability_names(state: &GameState, racer: RacerIdx) -> Vec<&'static str> {
    state.racer(racer).abilities.iter().filter(|a| a.grantor.is_none()).map(|a| a.definition.name).collect()
}

fn copy_lead_execute(
    event: &Event,
    owner: RacerIdx,
    instance: AbilityInstanceId,
    state: &mut GameState,
    agent: &dyn Agent,
) -> ExecuteResult {
    if !matches!(event.kind, EventKind::TurnStart { .. } | EventKind::PostMove { .. } | EventKind::PostWarp { .. }) {
        return ExecuteResult::skip();
    }

    let Some(max_pos) = state.racers.iter().filter(|r| r.active()).filter_map(|r| r.position).max() else {
        return ExecuteResult::skip();
    };

    let mut leaders: Vec<RacerIdx> =
        state.racers.iter().filter(|r| r.idx != owner && r.active() && r.position == Some(max_pos)).map(|r| r.idx).collect();
    leaders.sort();

    if leaders.is_empty() {
        let bare = core_ability_names(state, owner) == vec![COPY_LEAD.name];
        if bare {
            return ExecuteResult::skip();
        }
        return ExecuteResult::skip_reassigning(vec![COPY_LEAD.name]);
    }

    let options: Vec<String> = leaders.iter().map(|r| state.racer(*r).name.to_string()).collect();
    let ctx = SelectionDecisionContext { requesting_ability: instance, source_racer: owner, options };
    let choice = agent.make_selection_decision(state, &ctx).min(leaders.len() - 1);
    let target = leaders[choice];

    let mut target_names = core_ability_names(state, target);
    if !target_names.contains(&COPY_LEAD.name) {
        target_names.push(COPY_LEAD.name);
    }

    let mut sorted_current = core_ability_names(state, owner);
    sorted_current.sort_unstable();
    let mut sorted_target = target_names.clone();
    sorted_target.sort_unstable();
    if sorted_current == sorted_target {
        return ExecuteResult::skip();
    }

    ExecuteResult {
        outcome: AbilityOutcome::Triggered { target: Some(target), movement_distance: 0 },
        extra_events: Vec::new(),
        reassign_abilities: Some(target_names),
    }
}

#[cfg(test)]
mod tests {
    use data::ability_definitions::AbilityInstance;
    use data::board_states::Board;
    use data::core::TileIndex;
    use data::events::Phase;
    use data::racer_states::RacerState;
    use data::rules_config::Rules;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;

    static OTHER_ABILITY: AbilityDefinition = AbilityDefinition::new("OtherAbility", &[]);

    struct FirstOptionAgent;
    impl Agent for FirstOptionAgent {
        fn make_boolean_decision(&self, _state: &GameState, _ctx: &data::agents::DecisionContext) -> bool {
            false
        }
        fn make_selection_decision(&self, _state: &GameState, _ctx: &SelectionDecisionContext) -> usize {
            0
        }
    }

    fn state_with(n: usize) -> GameState {
        let racers = (0..n).map(|i| RacerState::new(RacerIdx(i), format!("R{i}"), TileIndex(0))).collect();
        GameState::new(racers, Board::new(TileIndex(20)), Rules::default(), Xoshiro256StarStar::seed_from_u64(0))
    }

    fn turn_start(owner: RacerIdx) -> Event {
        Event::new(EventKind::TurnStart { target: owner }, Some(owner), data::core::Source::System, Phase::System)
    }

    #[test]
    fn copies_the_sole_leaders_core_abilities() {
        let mut state = state_with(2);
        state.racer_mut(RacerIdx(0)).position = Some(TileIndex(3));
        state.racer_mut(RacerIdx(1)).position = Some(TileIndex(10));
        state.racer_mut(RacerIdx(1)).abilities.push(AbilityInstance::new(&OTHER_ABILITY, RacerIdx(1)));

        let event = turn_start(RacerIdx(0));
        let result = copy_lead_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &FirstOptionAgent);

        let names = result.reassign_abilities.expect("copycat should request a reassignment");
        assert!(names.contains(&"OtherAbility"));
        assert!(names.contains(&COPY_LEAD.name));
    }

    #[test]
    fn sheds_every_ability_once_in_the_sole_lead() {
        let mut state = state_with(2);
        state.racer_mut(RacerIdx(0)).abilities.push(AbilityInstance::new(&COPY_LEAD, RacerIdx(0)));
        state.racer_mut(RacerIdx(0)).abilities.push(AbilityInstance::new(&OTHER_ABILITY, RacerIdx(0)));
        state.racer_mut(RacerIdx(0)).position = Some(TileIndex(10));
        state.racer_mut(RacerIdx(1)).position = Some(TileIndex(2));

        let event = turn_start(RacerIdx(0));
        let result = copy_lead_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &FirstOptionAgent);

        let names = result.reassign_abilities.expect("sole leader should reset to just itself");
        assert_eq!(names, vec![COPY_LEAD.name]);
    }

    #[test]
    fn already_bare_sole_leader_is_a_no_op() {
        let mut state = state_with(2);
        state.racer_mut(RacerIdx(0)).abilities.push(AbilityInstance::new(&COPY_LEAD, RacerIdx(0)));
        state.racer_mut(RacerIdx(0)).position = Some(TileIndex(10));
        state.racer_mut(RacerIdx(1)).position = Some(TileIndex(2));

        let event = turn_start(RacerIdx(0));
        let result = copy_lead_execute(&event, RacerIdx(0), AbilityInstanceId::fresh(), &mut state, &FirstOptionAgent);

        assert!(result.reassign_abilities.is_none());
    }
}
