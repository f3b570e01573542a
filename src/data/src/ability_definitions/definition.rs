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

use crate::events::EventTag;

use super::capability::{
    ApproachFn, DestinationCalculatorFn, ExecuteFn, LandingFn, LifecycleFn, MovementValidatorFn,
    RollModifyFn, SetupFn,
};

/// A racer- or board-attached capability bundle. Covers both "abilities"
/// (subscription + `execute`) and "modifiers" (the remaining capability fn
/// pointers) from spec.md §3, since both are the same shape: a name, a
/// priority for board ordering, and an optional set of capability hooks.
/// Concrete instances are plain function pointers rather than trait
/// objects, matching the card-ability tables this crate's data layer was
/// grounded on: no `data -> abilities -> data` cycle is possible because
/// every definition lives in this crate as static data.
#[derive(Clone, Copy)]
pub struct AbilityDefinition {
    pub name: &'static str,
    /// Event types this ability reacts to via `execute`. Empty for
    /// pure modifiers that only implement a capability hook.
    pub subscriptions: &'static [EventTag],
    /// Tiebreaker when several modifiers sit on the same board tile; lower
    /// resolves first. Unused for racer-scoped abilities.
    pub priority: i32,

    pub execute: Option<ExecuteFn>,
    pub roll_modify: Option<RollModifyFn>,
    pub approach: Option<ApproachFn>,
    pub landing: Option<LandingFn>,
    pub destination_calculator: Option<DestinationCalculatorFn>,
    pub movement_validator: Option<MovementValidatorFn>,
    pub on_gain: Option<LifecycleFn>,
    pub on_loss: Option<LifecycleFn>,
    pub setup: Option<SetupFn>,
}

impl AbilityDefinition {
    pub const fn new(name: &'static str, subscriptions: &'static [EventTag]) -> AbilityDefinition {
        AbilityDefinition {
            name,
            subscriptions,
            priority: 0,
            execute: None,
            roll_modify: None,
            approach: None,
            landing: None,
            destination_calculator: None,
            movement_validator: None,
            on_gain: None,
            on_loss: None,
            setup: None,
        }
    }

    pub const fn with_priority(mut self, priority: i32) -> AbilityDefinition {
        self.priority = priority;
        self
    }

    pub const fn with_execute(mut self, f: ExecuteFn) -> AbilityDefinition {
        self.execute = Some(f);
        self
    }

    pub const fn with_roll_modify(mut self, f: RollModifyFn) -> AbilityDefinition {
        self.roll_modify = Some(f);
        self
    }

    pub const fn with_approach(mut self, f: ApproachFn) -> AbilityDefinition {
        self.approach = Some(f);
        self
    }

    pub const fn with_landing(mut self, f: LandingFn) -> AbilityDefinition {
        self.landing = Some(f);
        self
    }

    pub const fn with_destination_calculator(mut self, f: DestinationCalculatorFn) -> AbilityDefinition {
        self.destination_calculator = Some(f);
        self
    }

    pub const fn with_movement_validator(mut self, f: MovementValidatorFn) -> AbilityDefinition {
        self.movement_validator = Some(f);
        self
    }

    pub const fn with_on_gain(mut self, f: LifecycleFn) -> AbilityDefinition {
        self.on_gain = Some(f);
        self
    }

    pub const fn with_on_loss(mut self, f: LifecycleFn) -> AbilityDefinition {
        self.on_loss = Some(f);
        self
    }

    pub const fn with_setup(mut self, f: SetupFn) -> AbilityDefinition {
        self.setup = Some(f);
        self
    }
}
