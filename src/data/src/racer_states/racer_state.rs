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

use std::borrow::Cow;

use crate::ability_definitions::AbilityInstance;
use crate::core::{AbilityInstanceId, FinishRank, RacerIdx, TileIndex};

/// A single racer's complete mutable record. Owned exclusively by
/// [crate::game_states::game_state::GameState].
#[derive(Clone)]
pub struct RacerState {
    pub idx: RacerIdx,
    pub name: Cow<'static, str>,

    /// `None` once eliminated; otherwise always in `[0, board.length]`.
    pub position: Option<TileIndex>,
    pub victory_points: i32,
    pub tripped: bool,
    pub finished: bool,
    pub eliminated: bool,
    pub finish_rank: Option<FinishRank>,

    /// Racers that have tripped this racer, oldest first. Preserved even
    /// while already tripped, per the "who tripped whom" attribution design
    /// note — trip-stacking is intentional, not a bug.
    pub tripping_racers: Vec<Option<RacerIdx>>,

    /// Both subscription-based abilities and racer-scoped modifiers
    /// (roll-modification etc.) live here uniformly, since
    /// [crate::ability_definitions::AbilityDefinition] covers both shapes.
    pub abilities: Vec<AbilityInstance>,

    pub reroll_count: u32,
    pub main_move_consumed: bool,
}

impl RacerState {
    pub fn new(idx: RacerIdx, name: impl Into<Cow<'static, str>>, start: TileIndex) -> RacerState {
        RacerState {
            idx,
            name: name.into(),
            position: Some(start),
            victory_points: 0,
            tripped: false,
            finished: false,
            eliminated: false,
            finish_rank: None,
            tripping_racers: Vec::new(),
            abilities: Vec::new(),
            reroll_count: 0,
            main_move_consumed: false,
        }
    }

    /// Derived per spec.md §3: `active := not finished and not eliminated`.
    pub fn active(&self) -> bool {
        !self.finished && !self.eliminated
    }

    pub fn repr(&self) -> String {
        format!("{}:{}", self.idx, self.name)
    }

    pub fn find_ability(&self, id: AbilityInstanceId) -> Option<&AbilityInstance> {
        self.abilities.iter().find(|a| a.id == id)
    }

    pub fn roll_override(&self) -> Option<i32> {
        self.abilities.iter().find_map(|a| a.state.roll_override())
    }
}
