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

use crate::core::{AbilityInstanceId, RacerIdx};
use crate::game_states::game_state::GameState;

/// Context passed to [Agent::make_boolean_decision].
#[derive(Debug, Clone)]
pub struct DecisionContext {
    pub requesting_ability: AbilityInstanceId,
    pub source_racer: RacerIdx,
}

/// Context passed to [Agent::make_selection_decision]. Options are carried
/// as human-readable labels; the agent's answer is the label's index, which
/// the requesting ability maps back to its own typed option list.
#[derive(Debug, Clone)]
pub struct SelectionDecisionContext {
    pub requesting_ability: AbilityInstanceId,
    pub source_racer: RacerIdx,
    pub options: Vec<String>,
}

/// A decision-maker for a single racer. Implementations must be pure reads
/// over `state` and must never mutate it; the engine invokes these only
/// from within an ability's `execute`.
pub trait Agent {
    fn make_boolean_decision(&self, state: &GameState, ctx: &DecisionContext) -> bool;

    /// Returns an index into `ctx.options`.
    fn make_selection_decision(&self, state: &GameState, ctx: &SelectionDecisionContext) -> usize;
}
