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

//! Assembles a [data::game_states::GameState] from a roster description —
//! the thing a CLI or test writes out by hand instead of loading from a
//! config file, since scenario-file loading is explicitly out of scope.

use std::collections::HashMap;

use data::board_states::Board;
use data::core::{RacerIdx, TileIndex};
use data::game_states::GameState;
use data::racer_states::RacerState;
use data::rules_config::Rules;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use utils::outcome::Outcome;

use crate::agent::{Agent, BaselineAgent};
use crate::engine::Engine;

/// One racer's starting roster entry: its display name and the core
/// abilities it should hold from turn one (looked up by name in
/// `abilities::ABILITY_REGISTRY` — whichever ability crate the caller has
/// pulled in, typically `demo_abilities`).
pub struct RacerSpec {
    pub name: String,
    pub core_abilities: Vec<&'static str>,
}

impl RacerSpec {
    pub fn new(name: impl Into<String>) -> RacerSpec {
        RacerSpec { name: name.into(), core_abilities: Vec::new() }
    }

    pub fn with_ability(mut self, name: &'static str) -> RacerSpec {
        self.core_abilities.push(name);
        self
    }
}

/// A fully-described race setup: board length, rules, RNG seed, and roster.
/// `build` turns this into a ready-to-run [Engine] with every racer's core
/// abilities installed and a [BaselineAgent] standing in for every racer
/// that the caller doesn't override with `with_agent`.
pub struct Scenario {
    pub board_length: TileIndex,
    pub rules: Rules,
    pub seed: u64,
    pub racers: Vec<RacerSpec>,
    agents: HashMap<RacerIdx, Box<dyn Agent>>,
}

impl Scenario {
    pub fn new(board_length: i64, rules: Rules, seed: u64, racers: Vec<RacerSpec>) -> Scenario {
        Scenario { board_length: TileIndex(board_length), rules, seed, racers, agents: HashMap::new() }
    }

    /// Overrides the decision-maker for one racer; racers left unset fall
    /// back to [BaselineAgent].
    pub fn with_agent(mut self, racer: RacerIdx, agent: Box<dyn Agent>) -> Scenario {
        self.agents.insert(racer, agent);
        self
    }

    pub fn build(self) -> Result<Engine, utils::outcome::StopCondition> {
        let racer_states: Vec<RacerState> = self
            .racers
            .iter()
            .enumerate()
            .map(|(i, spec)| RacerState::new(RacerIdx(i), spec.name.clone(), TileIndex::START))
            .collect();

        let mut state =
            GameState::new(racer_states, Board::new(self.board_length), self.rules, Xoshiro256StarStar::seed_from_u64(self.seed));

        install_core_abilities(&mut state, &self.racers)?;

        Ok(Engine::new(state, self.agents))
    }
}

fn install_core_abilities(state: &mut GameState, racers: &[RacerSpec]) -> Outcome {
    for (i, spec) in racers.iter().enumerate() {
        rules::lifecycle::update_racer_abilities(state, RacerIdx(i), &spec.core_abilities)?;
    }
    utils::outcome::OK
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_installs_core_abilities_and_starts_everyone_at_zero() {
        let scenario = Scenario::new(
            20,
            Rules::default(),
            7,
            vec![
                RacerSpec::new("Alpha").with_ability(demo_abilities::leaptoad::LEAPTOAD_JUMP.name),
                RacerSpec::new("Beta"),
            ],
        );
        let engine = scenario.build().expect("scenario should build cleanly");

        assert_eq!(engine.state().racer(RacerIdx(0)).position, Some(TileIndex::START));
        assert!(engine
            .state()
            .racer(RacerIdx(0))
            .abilities
            .iter()
            .any(|a| a.definition.name == demo_abilities::leaptoad::LEAPTOAD_JUMP.name));
        assert!(engine.state().racer(RacerIdx(1)).abilities.is_empty());
    }

    #[test]
    fn run_race_to_completion_finishes_at_least_two_racers() {
        let scenario = Scenario::new(6, Rules::default(), 42, vec![RacerSpec::new("Alpha"), RacerSpec::new("Beta")]);
        let mut engine = scenario.build().expect("scenario should build cleanly");
        engine.run_race(Some(200)).expect("race should not hit a developer error");

        let state = engine.into_state();
        let finished = state.racers.iter().filter(|r| r.finished).count();
        assert!(finished >= 1, "expected at least one racer to finish, got {finished}");
    }
}
