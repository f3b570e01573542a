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

use data::agents::Agent;
use data::ability_definitions::capability::AbilityOutcome;
use data::core::{Depth, RacerIdx};
use data::events::{Event, EventKind, ScheduledEvent};
use data::game_states::GameState;
use utils::outcome::Outcome;

use crate::{lifecycle, movement, roll};

/// Looks up the [Agent] driving decisions for a racer. The dispatcher never
/// owns agents itself — `game::Engine` holds the roster and passes this
/// trait object through every call, matching the spec's rule that engine
/// access is always parameter-passed into ability code, never ambient.
pub trait AgentProvider {
    fn agent_for(&self, racer: RacerIdx) -> &dyn Agent;
}

/// Called once per event actually popped off the queue, after built-in
/// handling and ability dispatch have both run. `game::Engine` uses this to
/// drive its own telemetry/rendering without the rules crate depending on
/// anything UI-shaped.
pub type Observer<'a> = dyn FnMut(&GameState, &Event) + 'a;

/// Runs one event to completion: built-in mutation first (if the event kind
/// has one), then ability reactions in clockwise subscriber order, then the
/// observer callback. Mirrors the single `handle_event` dispatch loop this
/// was grounded on, just split by event family into the `movement`/`roll`/
/// `board`/`lifecycle` modules instead of one big branch.
pub fn dispatch_event(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    scheduled: &ScheduledEvent,
) -> Outcome {
    run_builtin(state, agents, observer, &scheduled.event)?;
    publish_to_subscribers(state, agents, observer, scheduled)?;
    observer(state, &scheduled.event);
    utils::outcome::OK
}

fn run_builtin(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    event: &Event,
) -> Outcome {
    match &event.kind {
        EventKind::TurnStart { .. } => utils::outcome::OK,
        EventKind::PerformMainRoll { target } => roll::handle_perform_main_roll(state, *target),
        EventKind::ResolveMainMove { .. } => roll::handle_resolve_main_move(state, event),
        EventKind::BaseValueModification { .. } => utils::outcome::OK,
        EventKind::MainMoveSkipped { .. } => utils::outcome::OK,
        EventKind::ExecuteMainMove { target } => roll::handle_execute_main_move(state, agents, observer, *target),
        EventKind::MoveCmd { .. } => movement::handle_move_cmd(state, agents, observer, event),
        EventKind::SimultaneousMoveCmd { .. } => movement::handle_simultaneous_move_cmd(state, agents, observer, event),
        EventKind::WarpCmd { .. } => movement::handle_warp_cmd(state, agents, observer, event),
        EventKind::SimultaneousWarpCmd { .. } => movement::handle_simultaneous_warp_cmd(state, agents, observer, event),
        EventKind::TripCmd { .. } => movement::handle_trip_cmd(state, event),
        EventKind::TripRecovery { .. } => utils::outcome::OK,
        // PreMove/PostMove/PreWarp/PostWarp never reach the queue: `movement`
        // publishes them straight to subscribers so listeners see them
        // inline, matching `movement.py`'s direct `publish_to_subscribers`
        // calls rather than `push_event`. Landing hooks run from `movement`
        // too, right before the `PostMove`/`PostWarp` publish.
        EventKind::PreMove { .. } | EventKind::PreWarp { .. } => utils::outcome::OK,
        EventKind::PostMove { .. } | EventKind::PostWarp { .. } => utils::outcome::OK,
        EventKind::PostTrip { .. } => utils::outcome::OK,
        EventKind::Passing { .. } => utils::outcome::OK,
        EventKind::AbilityTriggered { .. } => utils::outcome::OK,
        EventKind::RollModificationWindow { .. } => utils::outcome::OK,
        EventKind::RollResult { .. } => utils::outcome::OK,
        EventKind::RacerFinished { target, .. } => lifecycle::on_racer_finished(state, *target),
    }
}

/// Publishes `event` to subscribers immediately, without going through the
/// scheduler queue — the synchronous counterpart to `scheduler::push`, used
/// for the departure/arrival bookends (`PreMove`/`PostMove`/`PreWarp`/
/// `PostWarp`) that must be seen by listeners before the move that caused
/// them finishes resolving, matching `publish_to_subscribers` calls made
/// directly from `movement.py` rather than through `push_event`. Depth and
/// priority are irrelevant here since the event is never queued, only used
/// to pick subscribers by `tag()`.
pub(crate) fn publish_now(state: &mut GameState, agents: &dyn AgentProvider, observer: &mut Observer<'_>, event: Event) -> Outcome {
    let serial = state.next_serial();
    let scheduled = ScheduledEvent::new(event, Depth(0), 0, serial, state.rules.timing_mode);
    publish_to_subscribers(state, agents, observer, &scheduled)
}

/// Calls every active subscriber's wrapped handler in clockwise order
/// starting from the current racer, skipping abilities whose name is in
/// this event's `locked_abilities` set (reentrancy guard for the ability
/// that is itself causing the event, e.g. a copy ability not re-triggering
/// on the event it just emitted).
fn publish_to_subscribers(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    scheduled: &ScheduledEvent,
) -> Outcome {
    let tag = scheduled.event.tag();
    let current = state.current_racer_idx.0 as i64;
    let n = state.racer_count() as i64;
    if n == 0 {
        return utils::outcome::OK;
    }

    let mut order: Vec<RacerIdx> = (0..state.racer_count()).map(RacerIdx).collect();
    order.sort_by_key(|r| (r.0 as i64 - current).rem_euclid(n));

    for owner in order {
        if !state.racer(owner).active() {
            continue;
        }

        let instance_ids: Vec<_> = state
            .racer(owner)
            .abilities
            .iter()
            .filter(|a| a.definition.subscriptions.contains(&tag))
            .filter(|a| !scheduled.locked_abilities.contains(a.definition.name))
            .map(|a| a.id)
            .collect();

        for instance_id in instance_ids {
            invoke_wrapped_handler(state, agents, observer, &scheduled.event, owner, instance_id)?;
        }
    }

    utils::outcome::OK
}

fn invoke_wrapped_handler(
    state: &mut GameState,
    agents: &dyn AgentProvider,
    observer: &mut Observer<'_>,
    event: &Event,
    owner: RacerIdx,
    instance_id: data::core::AbilityInstanceId,
) -> Outcome {
    if !state.racer(owner).active() {
        return utils::outcome::OK;
    }
    // `definition` is `&'static`, so copying it out ends the borrow on
    // `state` before `execute` needs `state` mutably.
    let definition = match state.racer(owner).find_ability(instance_id) {
        Some(ability) => ability.definition,
        None => return utils::outcome::OK,
    };
    let Some(execute) = definition.execute else {
        return utils::outcome::OK;
    };

    let agent = agents.agent_for(owner);
    let result = execute(event, owner, instance_id, state, agent);

    if let Some(names) = result.reassign_abilities {
        lifecycle::update_racer_abilities(state, owner, &names)?;
    }

    for extra in result.extra_events {
        crate::scheduler::push(state, extra)?;
    }

    match result.outcome {
        AbilityOutcome::SkipTrigger => utils::outcome::OK,
        AbilityOutcome::Triggered { target, movement_distance } => {
            if !state.rules.count_0_moves_for_ability_triggered && movement_distance == 0 {
                return utils::outcome::OK;
            }
            let trigger = Event::new(
                EventKind::AbilityTriggered { target, movement_distance },
                Some(owner),
                data::core::Source::named(definition.name),
                data::events::Phase::Reaction,
            );
            let _ = observer;
            crate::scheduler::push(state, trigger)
        }
    }
}
