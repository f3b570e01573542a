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

//! The event-driven rules engine: scheduling, dispatch, movement, rolls,
//! board resolution, ability lifecycle, and the turn loop that ties them
//! together. Everything here operates on a `&mut data::game_states::GameState`
//! passed in by the caller (`game::Engine`); nothing in this crate owns
//! a game on its own.

pub mod board;
pub mod dispatcher;
pub mod lifecycle;
pub mod movement;
pub mod roll;
pub mod scheduler;
pub mod turn_loop;

#[cfg(test)]
mod test_support;
