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

use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};

use super::phase::Phase;
use super::timing::EventTriggerMode;
use crate::core::{FinishRank, RacerIdx, Serial, Source, TileIndex};

/// A single racer's requested move within a [EventKind::SimultaneousMoveCmd].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveData {
    pub racer: RacerIdx,
    pub distance: i32,
}

/// A single racer's requested warp within a [EventKind::SimultaneousWarpCmd].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarpData {
    pub racer: RacerIdx,
    pub target_tile: TileIndex,
}

/// One attributed delta in a roll's modifier chain, restored from
/// `original_source` for observability (see data model §3 of the design
/// notes); dropped by `skip_trigger` modifiers (delta == 0) and by
/// modifiers with no owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollContribution {
    pub source_racer: RacerIdx,
    pub delta: i32,
}

/// The payload-specific half of an [Event]. Common envelope fields
/// (`responsible`, `source`, `phase`) live on [Event] itself, mirroring the
/// `GameEvent` base class plus `HasTargetRacer`/`EmitsAbilityTriggeredEvent`
/// mixins of the engine this was distilled from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    TurnStart { target: RacerIdx },
    PerformMainRoll { target: RacerIdx },
    RollModificationWindow { target: RacerIdx, final_value: i32, roll_serial: Serial },
    ResolveMainMove {
        target: RacerIdx,
        roll_serial: Serial,
        roll_event_triggered_events: Vec<Event>,
        modifier_breakdown: Vec<RollContribution>,
    },
    RollResult {
        target: RacerIdx,
        dice_value: Option<u32>,
        base_value: i32,
        final_value: i32,
        modifier_breakdown: Vec<RollContribution>,
    },
    BaseValueModification { target: RacerIdx, old_value: f64, new_value: i32 },
    MainMoveSkipped { target: RacerIdx },
    ExecuteMainMove { target: RacerIdx },
    MoveCmd {
        target: RacerIdx,
        distance: i32,
        is_main: bool,
        emit_ability_triggered: EventTriggerMode,
    },
    SimultaneousMoveCmd { moves: Vec<MoveData>, emit_ability_triggered: EventTriggerMode },
    WarpCmd { target: RacerIdx, target_tile: TileIndex, emit_ability_triggered: EventTriggerMode },
    SimultaneousWarpCmd { warps: Vec<WarpData>, emit_ability_triggered: EventTriggerMode },
    TripCmd { target: RacerIdx, emit_ability_triggered: EventTriggerMode },
    TripRecovery { target: RacerIdx, tripping_racers: Vec<Option<RacerIdx>> },
    PreMove { target: RacerIdx, start: TileIndex, distance: i32 },
    PreWarp { target: RacerIdx, start: TileIndex, target_tile: TileIndex },
    PostMove { target: RacerIdx, start: TileIndex, end: TileIndex },
    PostWarp { target: RacerIdx, start: TileIndex, end: TileIndex },
    PostTrip { target: RacerIdx },
    Passing { mover: RacerIdx, victim: RacerIdx, tile: TileIndex },
    AbilityTriggered { target: Option<RacerIdx>, movement_distance: i32 },
    RacerFinished { target: RacerIdx, finishing_position: FinishRank },
}

/// Subscription key: one variant per [EventKind] case, no payload. Used as
/// the `HashMap` key for the dispatcher's subscriber table so that typed
/// handlers don't need to pattern-match a full event to register interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Sequence)]
pub enum EventTag {
    TurnStart,
    PerformMainRoll,
    RollModificationWindow,
    ResolveMainMove,
    RollResult,
    BaseValueModification,
    MainMoveSkipped,
    ExecuteMainMove,
    MoveCmd,
    SimultaneousMoveCmd,
    WarpCmd,
    SimultaneousWarpCmd,
    TripCmd,
    TripRecovery,
    PreMove,
    PreWarp,
    PostMove,
    PostWarp,
    PostTrip,
    Passing,
    AbilityTriggered,
    RacerFinished,
}

impl EventKind {
    pub fn tag(&self) -> EventTag {
        match self {
            EventKind::TurnStart { .. } => EventTag::TurnStart,
            EventKind::PerformMainRoll { .. } => EventTag::PerformMainRoll,
            EventKind::RollModificationWindow { .. } => EventTag::RollModificationWindow,
            EventKind::ResolveMainMove { .. } => EventTag::ResolveMainMove,
            EventKind::RollResult { .. } => EventTag::RollResult,
            EventKind::BaseValueModification { .. } => EventTag::BaseValueModification,
            EventKind::MainMoveSkipped { .. } => EventTag::MainMoveSkipped,
            EventKind::ExecuteMainMove { .. } => EventTag::ExecuteMainMove,
            EventKind::MoveCmd { .. } => EventTag::MoveCmd,
            EventKind::SimultaneousMoveCmd { .. } => EventTag::SimultaneousMoveCmd,
            EventKind::WarpCmd { .. } => EventTag::WarpCmd,
            EventKind::SimultaneousWarpCmd { .. } => EventTag::SimultaneousWarpCmd,
            EventKind::TripCmd { .. } => EventTag::TripCmd,
            EventKind::TripRecovery { .. } => EventTag::TripRecovery,
            EventKind::PreMove { .. } => EventTag::PreMove,
            EventKind::PreWarp { .. } => EventTag::PreWarp,
            EventKind::PostMove { .. } => EventTag::PostMove,
            EventKind::PostWarp { .. } => EventTag::PostWarp,
            EventKind::PostTrip { .. } => EventTag::PostTrip,
            EventKind::Passing { .. } => EventTag::Passing,
            EventKind::AbilityTriggered { .. } => EventTag::AbilityTriggered,
            EventKind::RacerFinished { .. } => EventTag::RacerFinished,
        }
    }

    /// The single racer this event concerns, if any. `None` for batched
    /// simultaneous commands and for passing events (which have two).
    pub fn target_racer(&self) -> Option<RacerIdx> {
        match self {
            EventKind::TurnStart { target }
            | EventKind::PerformMainRoll { target }
            | EventKind::RollModificationWindow { target, .. }
            | EventKind::ResolveMainMove { target, .. }
            | EventKind::RollResult { target, .. }
            | EventKind::BaseValueModification { target, .. }
            | EventKind::MainMoveSkipped { target }
            | EventKind::ExecuteMainMove { target }
            | EventKind::MoveCmd { target, .. }
            | EventKind::WarpCmd { target, .. }
            | EventKind::TripCmd { target, .. }
            | EventKind::TripRecovery { target, .. }
            | EventKind::PreMove { target, .. }
            | EventKind::PreWarp { target, .. }
            | EventKind::PostMove { target, .. }
            | EventKind::PostWarp { target, .. }
            | EventKind::PostTrip { target }
            | EventKind::RacerFinished { target, .. } => Some(*target),
            EventKind::AbilityTriggered { target, .. } => *target,
            EventKind::SimultaneousMoveCmd { .. }
            | EventKind::SimultaneousWarpCmd { .. }
            | EventKind::Passing { .. } => None,
        }
    }
}

/// A fully-formed game event: the payload plus the common envelope fields
/// every event in the original engine's `GameEvent` base class carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub responsible: Option<RacerIdx>,
    pub source: Source,
    pub phase: Phase,
}

impl Event {
    pub fn new(kind: EventKind, responsible: Option<RacerIdx>, source: Source, phase: Phase) -> Event {
        Event { kind, responsible, source, phase }
    }

    pub fn tag(&self) -> EventTag {
        self.kind.tag()
    }

    pub fn target_racer(&self) -> Option<RacerIdx> {
        self.kind.target_racer()
    }

    /// Mirrors `EmitsAbilityTriggeredEvent`: only a handful of command
    /// events carry an emit mode of their own.
    pub fn emit_ability_triggered(&self) -> EventTriggerMode {
        match &self.kind {
            EventKind::MoveCmd { emit_ability_triggered, .. }
            | EventKind::SimultaneousMoveCmd { emit_ability_triggered, .. }
            | EventKind::WarpCmd { emit_ability_triggered, .. }
            | EventKind::SimultaneousWarpCmd { emit_ability_triggered, .. }
            | EventKind::TripCmd { emit_ability_triggered, .. } => *emit_ability_triggered,
            _ => EventTriggerMode::Never,
        }
    }
}
