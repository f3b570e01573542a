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

use crate::core::Serial;

/// The current main racer's pending or just-resolved roll. `serial_id` is
/// bumped on every new main roll and on every reroll; any
/// `ResolveMainMove` whose tagged serial doesn't match the current value is
/// stale and is discarded (spec.md §3).
#[derive(Debug, Clone, Default)]
pub struct RollState {
    pub serial_id: Serial,
    pub dice_value: Option<u32>,
    pub base_value: i32,
    pub final_value: i32,
}

impl RollState {
    pub fn bump_serial(&mut self) -> Serial {
        self.serial_id = self.serial_id.next();
        self.serial_id
    }
}
