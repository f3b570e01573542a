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

use data::core::{RacerIdx, TileIndex};
use data::game_states::GameState;
use utils::outcome::Outcome;

use crate::dispatcher::{AgentProvider, Observer};

/// Runs every landing hook registered on `tile`, in the board's priority
/// order (lowest first), after a `PostMove`/`PostWarp` event has settled
/// `mover` there. Landing hooks mutate state directly (trap tiles, bonus
/// tiles) rather than returning a value, mirroring the board-tile effects
/// this was grounded on.
pub fn trigger_on_land(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    mover: RacerIdx,
    tile: TileIndex,
) -> Outcome {
    let hooks: Vec<_> = state
        .board
        .get_modifiers_at(tile)
        .into_iter()
        .filter_map(|m| m.definition.landing.map(|f| (m.owner, f)))
        .collect();

    for (owner, landing) in hooks {
        if !state.racer(mover).active() || state.racer(mover).position != Some(tile) {
            break;
        }
        landing(tile, mover, owner.unwrap_or(mover), state);
    }

    let _ = (agents, observer);
    utils::outcome::OK
}

#[cfg(test)]
mod tests {
    use data::ability_definitions::AbilityDefinition;
    use data::board_states::{Board, BoardModifier};
    use data::core::RacerIdx;
    use data::racer_states::RacerState;
    use data::rules_config::Rules;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;
    use crate::test_support::NullAgentProvider;

    static LANDED_ON: AbilityDefinition = AbilityDefinition::new("LandedOn", &[]).with_landing(|_tile, mover, _owner, state| {
        state.racer_mut(mover).victory_points += 1;
    });

    #[test]
    fn landing_hook_fires_on_arrival() {
        let mut board = Board::new(TileIndex(20));
        board = board.with_static(TileIndex(3), BoardModifier::new(&LANDED_ON, None));
        let racers = vec![RacerState::new(RacerIdx(0), "R0", TileIndex(0))];
        let mut state = GameState::new(racers, board, Rules::default(), Xoshiro256StarStar::seed_from_u64(0));

        let mut observer = |_: &GameState, _: &data::events::Event| {};
        trigger_on_land(&mut state, &NullAgentProvider, &mut observer, RacerIdx(0), TileIndex(3)).unwrap();

        assert_eq!(state.racer(RacerIdx(0)).victory_points, 1);
    }
}
