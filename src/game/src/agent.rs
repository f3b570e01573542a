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

//! Re-exports the [Agent] contract from `data` (ability `execute` functions
//! take `&dyn Agent` directly, so the trait has to live somewhere `rules`
//! can reach without depending on this crate) and adds the one concrete
//! implementation a demo or test needs when it doesn't care about actual
//! decision-making.

pub use data::agents::{Agent, DecisionContext, SelectionDecisionContext};
use data::game_states::GameState;

/// Declines every boolean decision and always picks the first offered
/// option, grounded in `core/agent.py::DefaultAutosolvableMixin`'s
/// auto-solve fallback.
pub struct BaselineAgent;

impl Agent for BaselineAgent {
    fn make_boolean_decision(&self, _state: &GameState, _ctx: &DecisionContext) -> bool {
        false
    }

    fn make_selection_decision(&self, _state: &GameState, _ctx: &SelectionDecisionContext) -> usize {
        0
    }
}
