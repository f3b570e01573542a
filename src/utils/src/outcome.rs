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

use color_eyre::Report;

/// Possible reasons why the rules engine should halt the current turn or race.
///
/// Mirrors the error taxonomy of the specification: `CycleDetected` and
/// `StaleRoll` are recovered within the turn they occur in, `Developer`
/// variants are invariant violations that should never be reached in normal
/// play and are surfaced immediately.
#[derive(Debug)]
#[must_use]
pub enum StopCondition {
    /// The per-turn state-hash history set observed a repeat; the turn was
    /// aborted cleanly. Not an error, but execution for this turn stops.
    CycleDetected,

    /// A `ResolveMainMove` event was dropped because its roll serial no
    /// longer matches `RollState::serial_id` (a reroll intervened).
    StaleRoll,

    /// The race has ended (two finishers, or the sole-survivor rule fired).
    RaceOver,

    /// An internal invariant was violated. Never recovered.
    Developer(Report),
}

/// Represents the result of some game mutation.
///
/// The "outcome" system is a wrapper around [Result] that adds additional
/// cases where the rules engine should halt, which are not necessarily
/// traditional errors. See [StopCondition].
pub type Outcome = Result<(), StopCondition>;

/// Equivalent alias to [Outcome] which wraps a returned value.
pub type Value<T> = Result<T, StopCondition>;

/// Mutation completed successfully, execution can continue.
pub const OK: Outcome = Ok(());

/// The per-turn history set observed a repeated state hash.
pub const CYCLE_DETECTED: Outcome = Err(StopCondition::CycleDetected);

/// The race has ended.
pub const RACE_OVER: Outcome = Err(StopCondition::RaceOver);
