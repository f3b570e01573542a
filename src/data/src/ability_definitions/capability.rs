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

use crate::agents::Agent;
use crate::core::{AbilityInstanceId, RacerIdx, TileIndex};
use crate::events::Event;
use crate::game_states::game_state::GameState;

/// A pending dice-or-override roll plus the ordered, attributed chain of
/// deltas applied to it by `RollModification` modifiers.
#[derive(Debug, Clone)]
pub struct MoveDistanceQuery {
    pub racer: RacerIdx,
    pub base_amount: i32,
    pub modifiers: Vec<i32>,
    pub breakdown: Vec<(RacerIdx, i32)>,
}

impl MoveDistanceQuery {
    pub fn new(racer: RacerIdx, base_amount: i32) -> MoveDistanceQuery {
        MoveDistanceQuery { racer, base_amount, modifiers: Vec::new(), breakdown: Vec::new() }
    }

    /// Records a delta attributed to `owner`, matching `roll.py`'s
    /// modifier-breakdown construction: only non-zero deltas are recorded.
    pub fn apply_delta(&mut self, owner: RacerIdx, delta: i32) {
        self.modifiers.push(delta);
        if delta != 0 {
            self.breakdown.push((owner, delta));
        }
    }

    pub fn final_value(&self) -> i32 {
        (self.base_amount + self.modifiers.iter().sum::<i32>()).max(0)
    }
}

/// Whether invoking an ability's `execute` should also schedule an
/// `AbilityTriggered` event attributed to the owning instance.
/// `SkipTrigger` means the ability acted (or declined to act) without
/// producing one.
#[derive(Debug, Clone)]
pub enum AbilityOutcome {
    SkipTrigger,
    Triggered { target: Option<RacerIdx>, movement_distance: i32 },
}

/// The full result of one `execute` call: the trigger decision, plus any
/// further events (a reactive move, a skipped main move, a warp) the
/// ability wants scheduled. `execute` itself has no access to the
/// scheduler — it only builds `Event` values and hands them back, the same
/// way `RollModifyFn` reports its own side-effect events, so ability code
/// never needs to depend on the rules crate.
///
/// `reassign_abilities`, when set, asks the engine to reconcile the
/// owner's *core* ability set to exactly these names (add what's missing,
/// remove what's not listed) — the capability-swapping pattern used by
/// abilities that copy another racer's kit. `execute` cannot perform this
/// reconciliation itself since installing/removing abilities runs
/// `on_gain`/`on_loss` hooks through the scheduler-owning rules crate.
#[derive(Debug, Clone)]
pub struct ExecuteResult {
    pub outcome: AbilityOutcome,
    pub extra_events: Vec<Event>,
    pub reassign_abilities: Option<Vec<&'static str>>,
}

impl ExecuteResult {
    pub fn skip() -> ExecuteResult {
        ExecuteResult { outcome: AbilityOutcome::SkipTrigger, extra_events: Vec::new(), reassign_abilities: None }
    }

    pub fn skip_with(extra_events: Vec<Event>) -> ExecuteResult {
        ExecuteResult { outcome: AbilityOutcome::SkipTrigger, extra_events, reassign_abilities: None }
    }

    pub fn skip_reassigning(names: Vec<&'static str>) -> ExecuteResult {
        ExecuteResult { outcome: AbilityOutcome::SkipTrigger, extra_events: Vec::new(), reassign_abilities: Some(names) }
    }

    pub fn triggered(target: Option<RacerIdx>, movement_distance: i32) -> ExecuteResult {
        ExecuteResult {
            outcome: AbilityOutcome::Triggered { target, movement_distance },
            extra_events: Vec::new(),
            reassign_abilities: None,
        }
    }
}

/// `execute(event, owner, engine, agent)`, capability-mixin free function
/// form: reacts to a subscribed event.
pub type ExecuteFn = fn(
    event: &Event,
    owner: RacerIdx,
    instance: AbilityInstanceId,
    state: &mut GameState,
    agent: &dyn Agent,
) -> ExecuteResult;

/// `RollModification`: mutates a roll's `MoveDistanceQuery` and may return
/// immediate ability-trigger events of its own.
pub type RollModifyFn =
    fn(query: &mut MoveDistanceQuery, owner: RacerIdx, state: &mut GameState) -> Vec<Event>;

/// `Approach`: called while a mover is approaching `candidate`; returning
/// `Some(tile)` different from `candidate` redirects resolution there.
pub type ApproachFn =
    fn(candidate: TileIndex, mover: RacerIdx, owner: RacerIdx, state: &mut GameState) -> Option<TileIndex>;

/// `Landing`: called once a mover has settled on `tile`. Implementations
/// must re-check the mover is still on `tile` before mutating it further
/// (a previous hook may have moved them away).
pub type LandingFn = fn(tile: TileIndex, mover: RacerIdx, owner: RacerIdx, state: &mut GameState);

/// `DestinationCalculator`: computes a racer's physical landing tile for a
/// requested signed `distance`, possibly stepping tile-by-tile (e.g. a
/// "jump" modifier skipping occupied tiles). Returns the final tile and any
/// per-step ability-trigger events collected along the way.
pub type DestinationCalculatorFn =
    fn(start: TileIndex, distance: i32, owner: RacerIdx, state: &mut GameState) -> (TileIndex, Vec<Event>);

/// `MovementValidator`: returns `false` to veto a move outright (the move
/// then resolves to `start`).
pub type MovementValidatorFn =
    fn(start: TileIndex, end: TileIndex, mover: RacerIdx, owner: RacerIdx, state: &mut GameState) -> bool;

/// `Lifecycle`: `on_gain`/`on_loss` hooks fired around (de)registration.
pub type LifecycleFn = fn(owner: RacerIdx, instance: AbilityInstanceId, state: &mut GameState);

/// `SetupPhase`: fired once at scenario construction, before any turn runs.
pub type SetupFn = fn(owner: RacerIdx, instance: AbilityInstanceId, state: &mut GameState);
