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

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashSet;

use super::kind::Event;
use super::phase::Phase;
use super::timing::TimingMode;
use crate::core::{Depth, Serial};

/// An [Event] paired with its scheduling coordinates. Ordered by
/// [ScheduledEvent::sort_key], which the owning [TimingMode] folds `depth`
/// into differently. Equal sort keys are broken by `serial` (FIFO among
/// equals), since serial is itself part of the key.
#[derive(Debug, Clone)]
pub struct ScheduledEvent {
    pub depth: Depth,
    pub priority: u32,
    pub serial: Serial,
    pub event: Event,
    pub mode: TimingMode,
    /// Ability names suppressed for this event's processing, preventing a
    /// copied ability instance from double-firing on the same logical event.
    pub locked_abilities: HashSet<Cow<'static, str>>,
}

impl ScheduledEvent {
    pub fn new(
        event: Event,
        depth: Depth,
        priority: u32,
        serial: Serial,
        mode: TimingMode,
    ) -> ScheduledEvent {
        ScheduledEvent { depth, priority, serial, event, mode, locked_abilities: HashSet::new() }
    }

    pub fn phase(&self) -> Phase {
        self.event.phase
    }

    /// The `(phase, depth-folded-by-mode, priority, serial)` tuple compared
    /// to order the scheduler's queue.
    pub fn sort_key(&self) -> (Phase, i64, u32, Serial) {
        let depth = i64::from(self.depth.0);
        let folded_depth = match self.mode {
            TimingMode::Flat => 0,
            TimingMode::Bfs => depth,
            TimingMode::Dfs => -depth,
        };
        (self.phase(), folded_depth, self.priority, self.serial)
    }
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
