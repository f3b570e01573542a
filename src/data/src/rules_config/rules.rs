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

use serde::{Deserialize, Serialize};

use crate::events::TimingMode;

/// Scenario-wide rules options (spec.md §6.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// `[winner_vp, second_place_vp]`, defaults `[4, 2]`.
    pub winner_vp: [i32; 2],
    pub timing_mode: TimingMode,
    /// When false (default), a move that resolves to zero net displacement
    /// never emits its own ability-trigger event.
    pub count_0_moves_for_ability_triggered: bool,
    /// House rule: a "steal first place" ability may assign its own rank
    /// even when another racer already holds it.
    pub hr_mastermind_steal_1st: bool,
}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            winner_vp: [4, 2],
            timing_mode: TimingMode::Flat,
            count_0_moves_for_ability_triggered: false,
            hr_mastermind_steal_1st: false,
        }
    }
}
