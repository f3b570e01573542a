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

//! Test-only fixtures shared by `rules`'s unit tests.

use data::agents::{Agent, DecisionContext, SelectionDecisionContext};
use data::core::RacerIdx;
use data::game_states::GameState;

use crate::dispatcher::AgentProvider;

/// An agent that always declines and always picks the first option,
/// matching `game::BaselineAgent`'s behavior without pulling in a
/// dependency on the `game` crate from tests here.
pub struct NullAgent;

impl Agent for NullAgent {
    fn make_boolean_decision(&self, _state: &GameState, _ctx: &DecisionContext) -> bool {
        false
    }

    fn make_selection_decision(&self, _state: &GameState, _ctx: &SelectionDecisionContext) -> usize {
        0
    }
}

/// Hands out the same [NullAgent] for every racer.
pub struct NullAgentProvider;

impl AgentProvider for NullAgentProvider {
    fn agent_for(&self, _racer: RacerIdx) -> &dyn Agent {
        &NullAgent
    }
}

pub fn silent_observer(_state: &GameState, _event: &data::events::Event) {}
