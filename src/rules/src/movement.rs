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

use std::collections::HashSet;

use data::core::{RacerIdx, Source, TileIndex};
use data::events::{Event, EventKind, EventTriggerMode, Phase};
use data::game_states::GameState;
use utils::outcome::Outcome;

use crate::dispatcher::{self, AgentProvider, Observer};
use crate::{board, lifecycle, scheduler};

/// Computes where `mover` ends up after travelling `distance` tiles from
/// `start`, consulting the mover's own destination-calculator abilities in
/// priority order. The first one found wins unconditionally — later hooks
/// are never consulted, even if the first one's result happens to equal
/// plain arithmetic — per the "first match only" rule that keeps chained
/// jump effects from compounding unpredictably.
fn compute_destination(state: &mut GameState, mover: RacerIdx, start: TileIndex, distance: i32) -> (TileIndex, Vec<Event>) {
    let definitions: Vec<_> = state
        .racer(mover)
        .abilities
        .iter()
        .filter_map(|a| a.definition.destination_calculator.map(|f| (a.owner, f)))
        .collect();

    for (owner, calc) in definitions {
        return calc(start, distance, owner, state);
    }

    (plain_arithmetic(start, distance), Vec::new())
}

fn plain_arithmetic(start: TileIndex, distance: i32) -> TileIndex {
    TileIndex(start.0 + i64::from(distance)).clamp_non_negative()
}

/// Iteratively asks every approach-capable modifier between `start` and the
/// candidate landing tile whether it wants to redirect the mover to an
/// earlier tile (e.g. a blocking racer). Guards against infinite
/// redirection loops with a visited-tile set.
fn resolve_approach(state: &mut GameState, mover: RacerIdx, start: TileIndex, mut candidate: TileIndex) -> TileIndex {
    let mut visited = HashSet::new();
    visited.insert(candidate);

    loop {
        let hooks: Vec<_> = state
            .board
            .get_modifiers_at(candidate)
            .into_iter()
            .filter_map(|m| m.definition.approach.map(|f| (m.owner, f)))
            .collect();

        let mut redirected = None;
        for (owner, approach) in hooks {
            if let Some(owner) = owner {
                if let Some(new_tile) = approach(candidate, mover, owner, state) {
                    if new_tile != candidate && !visited.contains(&new_tile) {
                        redirected = Some(new_tile);
                        break;
                    }
                }
            }
        }

        match redirected {
            Some(new_tile) => {
                visited.insert(new_tile);
                candidate = new_tile;
            }
            None => break,
        }

        if visited.len() > 64 {
            break;
        }
    }

    let _ = start;
    candidate
}

/// Runs every movement-validator hook against the candidate `end` tile,
/// stopping at the first one that vetoes and reporting the vetoing
/// ability's owner and name so the caller can fire its `AbilityTriggered`
/// event, matching `movement.py::_resolve_move_path`'s veto branch.
fn movement_allowed(
    state: &mut GameState,
    mover: RacerIdx,
    start: TileIndex,
    end: TileIndex,
) -> Option<(RacerIdx, &'static str)> {
    let hooks: Vec<_> = state
        .racer(mover)
        .abilities
        .iter()
        .filter_map(|a| a.definition.movement_validator.map(|f| (a.owner, f, a.definition.name)))
        .chain(
            state
                .board
                .get_modifiers_at(end)
                .into_iter()
                .filter_map(|m| m.definition.movement_validator.map(|f| (m.owner.unwrap_or(mover), f, m.definition.name))),
        )
        .collect();

    for (owner, validator, name) in hooks {
        if !validator(start, end, mover, owner, state) {
            return Some((owner, name));
        }
    }
    None
}

/// Checks whether `mover` has physically crossed the finish line and, if
/// so, runs the standard finish flow, returning whether it fired. Mirrors
/// `flow.py::check_finish`: a racer that is no longer active (already
/// finished or eliminated) never re-triggers it.
fn check_finish(state: &mut GameState, mover: RacerIdx) -> Result<bool, utils::outcome::StopCondition> {
    if !state.racer(mover).active() {
        return Ok(false);
    }
    let Some(position) = state.racer(mover).position else {
        return Ok(false);
    };
    if state.board.is_finish(position) {
        lifecycle::mark_finished(state, mover, None)?;
        return Ok(true);
    }
    Ok(false)
}

fn detect_passing(state: &GameState, mover: RacerIdx, start: TileIndex, end: TileIndex) -> Vec<Event> {
    if end <= start {
        return Vec::new();
    }
    let mut events = Vec::new();
    for racer in &state.racers {
        if racer.idx == mover || !racer.active() {
            continue;
        }
        if let Some(pos) = racer.position {
            if pos > start && pos <= end {
                events.push(Event::new(
                    EventKind::Passing { mover, victim: racer.idx, tile: pos },
                    Some(mover),
                    Source::System,
                    Phase::Reaction,
                ));
            }
        }
    }
    events
}

/// Executes one racer's move: publishes the departure hook, computes the
/// destination, lets approach hooks redirect it, validates it, applies it,
/// detects passed racers, and runs the landing bookend. A zero-distance
/// move is a no-op (no events, no triggers), and a move vetoed by a
/// validator fires exactly that validator's own `AbilityTriggered` event
/// and nothing else, matching `movement.py::handle_move_cmd` /
/// `_resolve_move_path`.
fn apply_move(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    mover: RacerIdx,
    distance: i32,
    emit_ability_triggered: EventTriggerMode,
) -> Outcome {
    if !state.racer(mover).active() || distance == 0 {
        return utils::outcome::OK;
    }
    let Some(start) = state.racer(mover).position else {
        return utils::outcome::OK;
    };

    let pre = Event::new(EventKind::PreMove { target: mover, start, distance }, Some(mover), Source::System, Phase::MoveExec);
    dispatcher::publish_now(state, agents, observer, pre)?;

    let (phys_end, extra_events) = compute_destination(state, mover, start, distance);

    if let Some((owner, name)) = movement_allowed(state, mover, start, phys_end) {
        let trigger = Event::new(
            EventKind::AbilityTriggered { target: Some(mover), movement_distance: 0 },
            Some(owner),
            Source::named(name),
            Phase::Reaction,
        );
        return scheduler::push(state, trigger);
    }

    let resolved = if state.board.is_finish(phys_end) { phys_end } else { resolve_approach(state, mover, start, phys_end) };
    let end = if resolved.0 < 0 { TileIndex(0) } else { resolved };

    let triggered = end != start || state.rules.count_0_moves_for_ability_triggered;

    state.racer_mut(mover).position = Some(end);

    if triggered {
        for event in extra_events {
            scheduler::push(state, event)?;
        }
    }

    if end == start {
        return utils::outcome::OK;
    }

    if emit_ability_triggered == EventTriggerMode::AfterResolution && triggered {
        let trigger = Event::new(
            EventKind::AbilityTriggered { target: Some(mover), movement_distance: distance },
            Some(mover),
            Source::System,
            Phase::Reaction,
        );
        scheduler::push(state, trigger)?;
    }

    let passing = detect_passing(state, mover, start, end);
    for event in passing {
        scheduler::push(state, event)?;
    }

    finalize_committed_move(state, agents, observer, mover, start, end)
}

/// Checks for a finish first (which, if it fires, strips abilities and
/// skips landing entirely); otherwise runs board landing hooks and
/// publishes `PostMove` to subscribers synchronously, matching
/// `movement.py::_finalize_committed_move`.
fn finalize_committed_move(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    mover: RacerIdx,
    start: TileIndex,
    end: TileIndex,
) -> Outcome {
    if check_finish(state, mover)? {
        return utils::outcome::OK;
    }

    board::trigger_on_land(state, agents, observer, mover, end)?;

    let post = Event::new(EventKind::PostMove { target: mover, start, end }, Some(mover), Source::System, Phase::MoveExec);
    dispatcher::publish_now(state, agents, observer, post)
}

pub fn handle_move_cmd(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    event: &Event,
) -> Outcome {
    let EventKind::MoveCmd { target, distance, emit_ability_triggered, .. } = &event.kind else {
        return utils::outcome::OK;
    };
    apply_move(state, agents, observer, *target, *distance, *emit_ability_triggered)
}

pub fn handle_simultaneous_move_cmd(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    event: &Event,
) -> Outcome {
    let EventKind::SimultaneousMoveCmd { moves, emit_ability_triggered } = &event.kind else {
        return utils::outcome::OK;
    };
    for mv in moves {
        apply_move(state, agents, observer, mv.racer, mv.distance, *emit_ability_triggered)?;
    }
    utils::outcome::OK
}

fn apply_warp(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    mover: RacerIdx,
    target_tile: TileIndex,
    emit_ability_triggered: EventTriggerMode,
) -> Outcome {
    if !state.racer(mover).active() {
        return utils::outcome::OK;
    }
    let Some(start) = state.racer(mover).position else {
        return utils::outcome::OK;
    };
    if start == target_tile {
        return utils::outcome::OK;
    }

    let pre = Event::new(EventKind::PreWarp { target: mover, start, target_tile }, Some(mover), Source::System, Phase::MoveExec);
    dispatcher::publish_now(state, agents, observer, pre)?;

    if let Some((owner, name)) = movement_allowed(state, mover, start, target_tile) {
        let trigger = Event::new(
            EventKind::AbilityTriggered { target: Some(mover), movement_distance: 0 },
            Some(owner),
            Source::named(name),
            Phase::Reaction,
        );
        return scheduler::push(state, trigger);
    }

    let resolved = resolve_approach(state, mover, start, target_tile);
    let end = if resolved.0 < 0 { TileIndex(0) } else { resolved };
    if end == start {
        return utils::outcome::OK;
    }

    if emit_ability_triggered == EventTriggerMode::AfterResolution {
        let trigger =
            Event::new(EventKind::AbilityTriggered { target: Some(mover), movement_distance: 0 }, Some(mover), Source::System, Phase::Reaction);
        scheduler::push(state, trigger)?;
    }

    state.racer_mut(mover).position = Some(end);

    if check_finish(state, mover)? {
        return utils::outcome::OK;
    }

    board::trigger_on_land(state, agents, observer, mover, end)?;

    let post = Event::new(EventKind::PostWarp { target: mover, start, end }, Some(mover), Source::System, Phase::MoveExec);
    dispatcher::publish_now(state, agents, observer, post)
}

pub fn handle_warp_cmd(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    event: &Event,
) -> Outcome {
    let EventKind::WarpCmd { target, target_tile, emit_ability_triggered } = &event.kind else {
        return utils::outcome::OK;
    };
    apply_warp(state, agents, observer, *target, *target_tile, *emit_ability_triggered)
}

pub fn handle_simultaneous_warp_cmd(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    event: &Event,
) -> Outcome {
    let EventKind::SimultaneousWarpCmd { warps, emit_ability_triggered } = &event.kind else {
        return utils::outcome::OK;
    };
    for warp in warps {
        apply_warp(state, agents, observer, warp.racer, warp.target_tile, *emit_ability_triggered)?;
    }
    utils::outcome::OK
}

/// Trips the target racer, recording who caused it so `TripRecovery` can
/// later report the full chain of blame. A racer who is no longer active
/// is never tripped, and who caused it is still recorded on a racer who is
/// already tripped, but the trip itself (and its events) only applies
/// once, matching `movement.py::handle_trip_cmd`.
pub fn handle_trip_cmd(state: &mut GameState, event: &Event) -> Outcome {
    let EventKind::TripCmd { target, emit_ability_triggered } = &event.kind else {
        return utils::outcome::OK;
    };
    if !state.racer(*target).active() {
        return utils::outcome::OK;
    }

    state.racer_mut(*target).tripping_racers.push(event.responsible);

    if state.racer(*target).tripped {
        return utils::outcome::OK;
    }
    state.racer_mut(*target).tripped = true;

    if *emit_ability_triggered != EventTriggerMode::Never {
        let trigger = Event::new(
            EventKind::AbilityTriggered { target: Some(*target), movement_distance: 0 },
            event.responsible,
            event.source.clone(),
            Phase::Reaction,
        );
        scheduler::push(state, trigger)?;
    }

    let post = Event::new(EventKind::PostTrip { target: *target }, event.responsible, event.source.clone(), Phase::Reaction);
    scheduler::push(state, post)
}
