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

use std::cmp::Reverse;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BinaryHeap, HashSet};
use std::hash::{Hash, Hasher};

use rand_xoshiro::Xoshiro256StarStar;

use crate::board_states::Board;
use crate::core::{Depth, RacerIdx, Serial, TurnNumber};
use crate::events::{Phase, ScheduledEvent};
use crate::racer_states::RacerState;
use crate::rules_config::Rules;

use super::roll_state::RollState;

/// Coordinates of whatever event is currently being dispatched, consulted by
/// the scheduler when assigning `depth` to newly pushed events (spec.md
/// §4.1). `None` while the queue is idle (between turns, or before the
/// first push of a turn).
#[derive(Debug, Clone, Copy)]
pub struct ProcessingContext {
    pub depth: Depth,
    pub priority: u32,
    pub phase: Phase,
}

/// The entire authoritative state of a race: every racer record, the board,
/// the current roll, the scheduler queue, the per-turn cycle-detection
/// history, the rules, and the RNG. Only the engine (`rules`/`game` crates)
/// mutates this; agents and observers only ever read it.
pub struct GameState {
    pub racers: Vec<RacerState>,
    pub board: Board,
    pub roll_state: RollState,
    pub rules: Rules,
    pub rng: Xoshiro256StarStar,

    pub queue: BinaryHeap<Reverse<ScheduledEvent>>,
    pub history: HashSet<u64>,

    pub current_racer_idx: RacerIdx,
    pub round: TurnNumber,
    pub race_over: bool,
    /// Set by a "take another turn" ability; consumed (and cleared) by the
    /// next `advance_turn` instead of stepping clockwise.
    pub next_turn_override: Option<RacerIdx>,

    serial: Serial,
    pub current_processing: Option<ProcessingContext>,
}

impl GameState {
    pub fn new(racers: Vec<RacerState>, board: Board, rules: Rules, rng: Xoshiro256StarStar) -> GameState {
        GameState {
            racers,
            board,
            roll_state: RollState::default(),
            rules,
            rng,
            queue: BinaryHeap::new(),
            history: HashSet::new(),
            current_racer_idx: RacerIdx(0),
            round: TurnNumber::default(),
            race_over: false,
            next_turn_override: None,
            serial: Serial::default(),
            current_processing: None,
        }
    }

    pub fn racer(&self, idx: RacerIdx) -> &RacerState {
        &self.racers[idx.0]
    }

    pub fn racer_mut(&mut self, idx: RacerIdx) -> &mut RacerState {
        &mut self.racers[idx.0]
    }

    pub fn racer_count(&self) -> usize {
        self.racers.len()
    }

    pub fn active_racer_count(&self) -> usize {
        self.racers.iter().filter(|r| r.active()).count()
    }

    /// Allocates the next global serial, used both as the scheduler
    /// tiebreaker and as the roll serial.
    pub fn next_serial(&mut self) -> Serial {
        self.serial = self.serial.next();
        self.serial
    }

    pub fn current_serial(&self) -> Serial {
        self.serial
    }

    /// Full-state hash for per-turn cycle detection (spec.md §3/§4.8).
    /// Covers every racer's (position, tripped, finished, eliminated, vp,
    /// ability-name set, modifier-name set — unified here since both live
    /// in `RacerState::abilities`), every tile's dynamic-modifier-name set,
    /// and the current roll serial + base value.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();

        for racer in &self.racers {
            racer.position.hash(&mut hasher);
            racer.tripped.hash(&mut hasher);
            racer.finished.hash(&mut hasher);
            racer.eliminated.hash(&mut hasher);
            racer.victory_points.hash(&mut hasher);

            let mut names: Vec<&str> = racer.abilities.iter().map(|a| a.name()).collect();
            names.sort_unstable();
            names.hash(&mut hasher);
        }

        let board_length = self.board.length;
        board_length.hash(&mut hasher);
        for racer in &self.racers {
            if let Some(position) = racer.position {
                if position >= crate::core::TileIndex(0) && position < board_length {
                    let mut tile_names: Vec<&str> =
                        self.board.get_modifiers_at(position).iter().map(|m| m.definition.name).collect();
                    tile_names.sort_unstable();
                    tile_names.hash(&mut hasher);
                }
            }
        }

        self.roll_state.serial_id.hash(&mut hasher);
        self.roll_state.base_value.hash(&mut hasher);

        hasher.finish()
    }
}
