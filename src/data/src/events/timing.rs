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

/// Selects how `depth` participates in the scheduler's sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimingMode {
    /// Depth ignored: `(phase, 0, priority, serial)`.
    #[default]
    Flat,
    /// Ripple, level by level: `(phase, depth, priority, serial)`.
    Bfs,
    /// Nested reactions resolve first: `(phase, -depth, priority, serial)`.
    Dfs,
}

/// Controls whether a command event automatically emits its own
/// `AbilityTriggered` event, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EventTriggerMode {
    #[default]
    Never,
    Immediately,
    AfterResolution,
}
