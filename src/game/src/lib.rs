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

//! The orchestration layer above `rules`: the `Engine` façade that owns a
//! `GameState` plus its agent roster and observer hook, and the scenario
//! builder a CLI or test uses to assemble one.

pub mod agent;
pub mod engine;
pub mod scenario;

pub use agent::{Agent, BaselineAgent, DecisionContext, SelectionDecisionContext};
pub use engine::Engine;
pub use scenario::{RacerSpec, Scenario};
