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

use std::collections::HashMap;

use crate::ability_definitions::{AbilityDefinition, AbilityStateBag};
use crate::core::{AbilityInstanceId, ModifierId, RacerIdx, TileIndex};

/// A modifier attached to a board tile rather than a racer. Unlike
/// [crate::ability_definitions::AbilityInstance], the owner is optional:
/// some tile effects (a plain victory-point tile) belong to the board
/// itself, not to any racer.
#[derive(Clone)]
pub struct BoardModifier {
    pub id: AbilityInstanceId,
    pub definition: &'static AbilityDefinition,
    pub owner: Option<RacerIdx>,
    pub state: AbilityStateBag,
}

impl BoardModifier {
    pub fn new(definition: &'static AbilityDefinition, owner: Option<RacerIdx>) -> BoardModifier {
        BoardModifier { id: AbilityInstanceId::fresh(), definition, owner, state: AbilityStateBag::default() }
    }

    pub fn modifier_id(&self) -> ModifierId {
        ModifierId::new(self.definition.name, self.owner)
    }
}

/// The track: a linear sequence of tiles from `0` to `length` (the finish
/// tile), carrying static (scenario-construction-time) and dynamic
/// (placed/removed during play) tile modifiers.
#[derive(Clone)]
pub struct Board {
    pub length: TileIndex,
    static_modifiers: HashMap<TileIndex, Vec<BoardModifier>>,
    dynamic_modifiers: HashMap<TileIndex, Vec<BoardModifier>>,
}

impl Board {
    pub fn new(length: TileIndex) -> Board {
        Board { length, static_modifiers: HashMap::new(), dynamic_modifiers: HashMap::new() }
    }

    pub fn with_static(mut self, tile: TileIndex, modifier: BoardModifier) -> Board {
        self.static_modifiers.entry(tile).or_default().push(modifier);
        self
    }

    pub fn add_dynamic(&mut self, tile: TileIndex, modifier: BoardModifier) {
        self.dynamic_modifiers.entry(tile).or_default().push(modifier);
    }

    /// Invariant per spec.md §3: a tile never holds two modifiers with the
    /// same `(name, owner)` identity simultaneously.
    pub fn has_identity_at(&self, tile: TileIndex, id: &ModifierId) -> bool {
        self.get_modifiers_at(tile).iter().any(|m| &m.modifier_id() == id)
    }

    /// Removes every dynamic modifier across the whole board matching
    /// `id`, used by ownership-based cleanup when an ability with lifecycle
    /// hooks is revoked (spec.md §4.6).
    pub fn remove_dynamic_by_identity(&mut self, id: &ModifierId) {
        for modifiers in self.dynamic_modifiers.values_mut() {
            modifiers.retain(|m| &m.modifier_id() != id);
        }
    }

    pub fn remove_dynamic_at(&mut self, tile: TileIndex, id: &ModifierId) {
        if let Some(modifiers) = self.dynamic_modifiers.get_mut(&tile) {
            modifiers.retain(|m| &m.modifier_id() != id);
        }
    }

    /// `sorted(static ∪ dynamic, key=priority)`, exactly as
    /// `Board::get_modifiers_at` does in the engine this was grounded on.
    pub fn get_modifiers_at(&self, tile: TileIndex) -> Vec<&BoardModifier> {
        let mut all: Vec<&BoardModifier> = Vec::new();
        if let Some(statics) = self.static_modifiers.get(&tile) {
            all.extend(statics.iter());
        }
        if let Some(dynamics) = self.dynamic_modifiers.get(&tile) {
            all.extend(dynamics.iter());
        }
        all.sort_by_key(|m| m.definition.priority);
        all
    }

    pub fn is_finish(&self, tile: TileIndex) -> bool {
        tile >= self.length
    }
}
