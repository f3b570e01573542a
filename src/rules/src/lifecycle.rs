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

use data::ability_definitions::AbilityInstance;
use data::core::{AbilityInstanceId, FinishRank, RacerIdx, Source};
use data::events::{Event, EventKind, Phase};
use data::game_states::GameState;
use utils::outcome::Outcome;

use crate::scheduler;

/// Marks a racer finished at `rank` (defaulting to one past the number of
/// racers already finished), awarding victory points from `Rules::winner_vp`
/// (zero past the table's length). Re-ranking an already-finished racer is
/// allowed — the caller is responsible for any rank collision this causes —
/// and strips the old rank's VP before applying the new one. `RacerFinished`
/// only fires the first time a racer finishes; a re-rank re-runs the VP
/// bookkeeping and the ability strip without re-emitting it. Abilities are
/// always stripped afterward, even on a re-rank, so a board-owned hook never
/// keeps firing for a racer who has left the race.
pub fn mark_finished(state: &mut GameState, target: RacerIdx, rank: Option<FinishRank>) -> Outcome {
    let rank = rank.unwrap_or_else(|| FinishRank(state.racers.iter().filter(|r| r.finished).count() as u32 + 1));
    let old_rank = state.racer(target).finish_rank;

    if let Some(old) = old_rank {
        if let Some(&vp) = old.0.checked_sub(1).and_then(|idx| state.rules.winner_vp.get(idx as usize)) {
            state.racer_mut(target).victory_points -= vp;
        }
    }
    let new_vp = rank.0.checked_sub(1).and_then(|idx| state.rules.winner_vp.get(idx as usize)).copied().unwrap_or(0);

    let racer = state.racer_mut(target);
    racer.finished = true;
    racer.finish_rank = Some(rank);
    racer.victory_points += new_vp;

    if old_rank.is_none() {
        let event = Event::new(
            EventKind::RacerFinished { target, finishing_position: rank },
            Some(target),
            Source::System,
            Phase::Reaction,
        );
        scheduler::push(state, event)?;
    }

    strip_all_abilities(state, target)
}

/// Removes every ability currently held by `owner`, running each one's
/// `on_loss` hook. Called unconditionally by `mark_finished` so a finished
/// racer's board-owned hooks (e.g. a landing blocker) stop firing.
fn strip_all_abilities(state: &mut GameState, owner: RacerIdx) -> Outcome {
    let ids: Vec<_> = state.racer(owner).abilities.iter().map(|a| a.id).collect();
    for id in ids {
        uninstall(state, owner, id)?;
    }
    utils::outcome::OK
}

/// Reacts to a settled `RacerFinished` event by checking whether the race
/// should end.
pub fn on_racer_finished(state: &mut GameState, _target: RacerIdx) -> Outcome {
    if check_race_over_condition(state) {
        end_race(state)?;
    }
    utils::outcome::OK
}

/// The race ends once two racers have finished, or once at most one racer
/// remains active (everyone else finished or was eliminated) — the
/// sole-survivor rule that keeps a race from stalling forever when only one
/// contender is left.
pub fn check_race_over_condition(state: &GameState) -> bool {
    let finished = state.racers.iter().filter(|r| r.finished).count();
    finished >= 2 || state.active_racer_count() <= 1
}

pub fn end_race(state: &mut GameState) -> Outcome {
    state.race_over = true;
    scheduler::clear(state);
    utils::outcome::OK
}

/// Installs a granted ability (one attributed to `grantor` rather than the
/// racer's own core set), running its `setup`/`on_gain` hooks.
pub fn grant_ability(state: &mut GameState, owner: RacerIdx, grantor: RacerIdx, name: &str) -> Outcome {
    let Some(definition) = abilities::lookup(name) else {
        return utils::outcome::OK;
    };
    let instance = AbilityInstance::granted(definition, owner, grantor);
    install(state, owner, instance)
}

/// Removes a previously-granted ability by name and grantor identity,
/// running its `on_loss` hook.
pub fn revoke_ability(state: &mut GameState, owner: RacerIdx, grantor: RacerIdx, name: &str) -> Outcome {
    let id = state
        .racer(owner)
        .abilities
        .iter()
        .find(|a| a.definition.name == name && a.grantor == Some(grantor))
        .map(|a| a.id);
    let Some(id) = id else {
        return utils::outcome::OK;
    };
    uninstall(state, owner, id)
}

/// Reconciles `owner`'s core (non-granted) abilities with `target_names`:
/// removes core abilities no longer named, adds newly-named ones. Used
/// whenever a board position or rules condition recomputes which core
/// abilities a racer should hold (spec's capability-mixin reassignment,
/// not a one-time setup).
pub fn update_racer_abilities(state: &mut GameState, owner: RacerIdx, target_names: &[&'static str]) -> Outcome {
    let diff = abilities::diff_ability_names(&state.racer(owner).abilities, target_names);

    for id in diff.to_remove {
        uninstall(state, owner, id)?;
    }
    for name in diff.to_add {
        let Some(definition) = abilities::lookup(name) else {
            continue;
        };
        install(state, owner, AbilityInstance::new(definition, owner))?;
    }
    utils::outcome::OK
}

fn install(state: &mut GameState, owner: RacerIdx, instance: AbilityInstance) -> Outcome {
    let id = instance.id;
    let definition = instance.definition;
    state.racer_mut(owner).abilities.push(instance);

    if let Some(setup) = definition.setup {
        setup(owner, id, state);
    }
    if let Some(on_gain) = definition.on_gain {
        on_gain(owner, id, state);
    }
    utils::outcome::OK
}

fn uninstall(state: &mut GameState, owner: RacerIdx, id: AbilityInstanceId) -> Outcome {
    let Some(position) = state.racer(owner).abilities.iter().position(|a| a.id == id) else {
        return utils::outcome::OK;
    };
    let definition = state.racer(owner).abilities[position].definition;
    state.racer_mut(owner).abilities.remove(position);

    if let Some(on_loss) = definition.on_loss {
        on_loss(owner, id, state);
    }
    utils::outcome::OK
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

    fn state_with(n: usize) -> GameState {
        let racers = (0..n).map(|i| RacerState::new(RacerIdx(i), format!("R{i}"), TileIndex(0))).collect();
        GameState::new(racers, Board::new(TileIndex(20)), Rules::default(), Xoshiro256StarStar::seed_from_u64(3))
    }

    #[test]
    fn first_finisher_gets_rank_one_and_top_vp() {
        let mut state = state_with(2);
        mark_finished(&mut state, RacerIdx(0), None).unwrap();
        assert_eq!(state.racer(RacerIdx(0)).finish_rank, Some(FinishRank(1)));
        assert_eq!(state.racer(RacerIdx(0)).victory_points, state.rules.winner_vp[0]);
    }

    #[test]
    fn marking_finished_at_the_same_rank_again_is_idempotent() {
        let mut state = state_with(2);
        mark_finished(&mut state, RacerIdx(0), Some(FinishRank(1))).unwrap();
        let vp_before = state.racer(RacerIdx(0)).victory_points;
        mark_finished(&mut state, RacerIdx(0), Some(FinishRank(1))).unwrap();
        assert_eq!(state.racer(RacerIdx(0)).victory_points, vp_before);
    }

    #[test]
    fn re_ranking_a_finished_racer_subtracts_old_vp_and_applies_new_vp() {
        let mut state = state_with(2);
        mark_finished(&mut state, RacerIdx(0), Some(FinishRank(1))).unwrap();
        mark_finished(&mut state, RacerIdx(0), Some(FinishRank(2))).unwrap();
        assert_eq!(state.racer(RacerIdx(0)).finish_rank, Some(FinishRank(2)));
        assert_eq!(state.racer(RacerIdx(0)).victory_points, state.rules.winner_vp[1]);
    }

    #[test]
    fn abilities_are_stripped_on_finish() {
        use std::sync::atomic::{AtomicU32, Ordering};

        use data::ability_definitions::AbilityDefinition;

        static LOSSES: AtomicU32 = AtomicU32::new(0);
        static STUB: AbilityDefinition =
            AbilityDefinition::new("Stub", &[]).with_on_loss(|_, _, _| {
                LOSSES.fetch_add(1, Ordering::SeqCst);
            });

        let mut state = state_with(1);
        state.racer_mut(RacerIdx(0)).abilities.push(AbilityInstance::new(&STUB, RacerIdx(0)));
        mark_finished(&mut state, RacerIdx(0), None).unwrap();
        assert!(state.racer(RacerIdx(0)).abilities.is_empty());
        assert_eq!(LOSSES.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn race_ends_once_two_racers_finish() {
        let mut state = state_with(3);
        mark_finished(&mut state, RacerIdx(0), None).unwrap();
        assert!(!check_race_over_condition(&state));
        mark_finished(&mut state, RacerIdx(1), None).unwrap();
        assert!(check_race_over_condition(&state));
    }

    #[test]
    fn race_ends_when_one_racer_remains_active() {
        let mut state = state_with(2);
        state.racer_mut(RacerIdx(1)).eliminated = true;
        assert!(check_race_over_condition(&state));
    }
}
