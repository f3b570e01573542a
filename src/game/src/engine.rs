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

use data::core::RacerIdx;
use data::events::Event;
use data::game_states::GameState;
use rules::dispatcher::AgentProvider;
use rules::turn_loop;
use tracing::instrument;
use utils::outcome::Outcome;

use crate::agent::{Agent, BaselineAgent};

const FALLBACK_AGENT: BaselineAgent = BaselineAgent;

/// Borrows the engine's agent roster to satisfy [AgentProvider] without
/// requiring `Engine` itself to be passed where a `&mut GameState` borrow is
/// also live — the two borrows are of disjoint fields.
struct RosterProvider<'a> {
    agents: &'a HashMap<RacerIdx, Box<dyn Agent>>,
}

impl AgentProvider for RosterProvider<'_> {
    fn agent_for(&self, racer: RacerIdx) -> &dyn Agent {
        self.agents.get(&racer).map(|agent| agent.as_ref()).unwrap_or(&FALLBACK_AGENT)
    }
}

/// Owns a [GameState] together with the pieces `rules` needs to run it but
/// does not itself hold: the per-racer agent roster and an observer hook
/// invoked after every event the dispatcher pops, grounded in the teacher's
/// `game::server` as the orchestration layer sitting above the rules crate.
/// This is the thing a CLI or test constructs — nothing in `rules` or
/// `data` ever builds one.
pub struct Engine {
    state: GameState,
    agents: HashMap<RacerIdx, Box<dyn Agent>>,
    pub on_event_processed: Option<Box<dyn FnMut(&GameState, &Event)>>,
}

impl Engine {
    pub fn new(state: GameState, agents: HashMap<RacerIdx, Box<dyn Agent>>) -> Engine {
        Engine { state, agents, on_event_processed: None }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Runs the current racer's turn to completion, then hands off to the
    /// next active racer clockwise.
    #[instrument(skip(self))]
    pub fn run_turn(&mut self) -> Outcome {
        let provider = RosterProvider { agents: &self.agents };
        let mut hook = self.on_event_processed.take();
        let result = match &mut hook {
            Some(callback) => turn_loop::run_turn(&mut self.state, &provider, callback.as_mut()),
            None => turn_loop::run_turn(&mut self.state, &provider, &mut |_state: &GameState, _event: &Event| {}),
        };
        self.on_event_processed = hook;
        if result.is_ok() {
            turn_loop::advance_turn(&mut self.state);
        }
        result
    }

    /// Runs whole turns until the race ends or `max_turns` rounds have
    /// elapsed (`None` runs to completion).
    #[instrument(skip(self))]
    pub fn run_race(&mut self, max_turns: Option<u32>) -> Outcome {
        let provider = RosterProvider { agents: &self.agents };
        let mut hook = self.on_event_processed.take();
        let result = match &mut hook {
            Some(callback) => turn_loop::run_race(&mut self.state, &provider, callback.as_mut(), max_turns),
            None => turn_loop::run_race(&mut self.state, &provider, &mut |_state: &GameState, _event: &Event| {}, max_turns),
        };
        self.on_event_processed = hook;
        result
    }

    /// Consumes the engine, handing back the final game state for
    /// reporting (standings, VP totals, and so on).
    pub fn into_state(self) -> GameState {
        self.state
    }
}
