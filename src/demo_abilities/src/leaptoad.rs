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

use data::ability_definitions::AbilityDefinition;
use data::core::{RacerIdx, Source, TileIndex};
use data::events::{Event, EventKind, Phase};
use data::game_states::GameState;

/// Jump-over-occupied-tiles movement: the racer's distance is spent on
/// *unoccupied* tiles only, so landing on top of another active racer never
/// costs a step.
pub static LEAPTOAD_JUMP: AbilityDefinition =
    AbilityDefinition::new("LeaptoadJump", &[]).with_destination_calculator(calculate_destination);

#[linkme::distributed_slice(abilities::ABILITY_REGISTRY)]
static LEAPTOAD_JUMP_ENTRY: &AbilityDefinition = &LEAPTOAD_JUMP;

fn racer_at(state: &GameState, tile: TileIndex, except: RacerIdx) -> Option<RacerIdx> {
    state.racers.iter().find(|r| r.idx != except && r.active() && r.position == Some(tile)).map(|r| r.idx)
}

fn calculate_destination(
    start: TileIndex,
    distance: i32,
    owner: RacerIdx,
    state: &mut GameState,
) -> (TileIndex, Vec<Event>) {
    let direction: i64 = if distance >= 0 { 1 } else { -1 };
    let mut remaining = distance.unsigned_abs();
    let mut current = start;
    let mut events = Vec::new();

    while remaining > 0 {
        current = TileIndex(current.0 + direction).clamp_non_negative();
        let mut guard = 0;
        while let Some(blocker) = racer_at(state, current, owner) {
            events.push(Event::new(
                EventKind::AbilityTriggered { target: Some(blocker), movement_distance: 0 },
                Some(owner),
                Source::named(LEAPTOAD_JUMP.name),
                Phase::Reaction,
            ));
            current = TileIndex(current.0 + direction).clamp_non_negative();
            guard += 1;
            if guard > 64 {
                break;
            }
        }
        remaining -= 1;
    }

    (current, events)
}

#[cfg(test)]
mod tests {
    use data::board_states::Board;
    use data::racer_states::RacerState;
    use data::rules_config::Rules;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;

    fn state_with_positions(positions: &[i64]) -> GameState {
        let racers = positions
            .iter()
            .enumerate()
            .map(|(i, &p)| RacerState::new(RacerIdx(i), format!("R{i}"), TileIndex(p)))
            .collect();
        GameState::new(racers, Board::new(TileIndex(20)), Rules::default(), Xoshiro256StarStar::seed_from_u64(0))
    }

    #[test]
    fn jumps_clean_over_a_single_occupied_tile() {
        let mut state = state_with_positions(&[0, 1]);
        let (end, events) = calculate_destination(TileIndex(0), 1, RacerIdx(0), &mut state);
        assert_eq!(end, TileIndex(2));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn does_not_jump_when_path_is_clear() {
        let mut state = state_with_positions(&[0, 10]);
        let (end, events) = calculate_destination(TileIndex(0), 3, RacerIdx(0), &mut state);
        assert_eq!(end, TileIndex(3));
        assert!(events.is_empty());
    }

    #[test]
    fn jumps_over_a_run_of_consecutive_occupied_tiles() {
        let mut state = state_with_positions(&[0, 1, 2, 3]);
        let (end, events) = calculate_destination(TileIndex(0), 1, RacerIdx(0), &mut state);
        assert_eq!(end, TileIndex(4));
        assert_eq!(events.len(), 3);
    }
}
