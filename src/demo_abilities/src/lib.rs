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

//! A sample pack of racer abilities, each registering itself into
//! `abilities::ABILITY_REGISTRY` on load. Pulling in this crate is what
//! makes these names resolvable by `rules::lifecycle::grant_ability` and
//! `update_racer_abilities` — nothing here is reachable from `rules` or
//! `data` directly.

pub mod centaur;
pub mod copycat;
pub mod huge_baby;
pub mod inchworm;
pub mod leaptoad;
pub mod scoocher;
