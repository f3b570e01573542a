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

use crate::core::{AbilityInstanceId, ModifierId, RacerIdx};

use super::definition::AbilityDefinition;

/// Small, per-instance mutable state an ability needs beyond its shared
/// static [AbilityDefinition] (a roll-override value, a copied racer's
/// identity for a copy-style ability, a flag). Append-only, analogous to
/// the card-state list pattern this was grounded on: entries are never
/// mutated in place, only appended or replaced wholesale.
#[derive(Debug, Clone, Default)]
pub struct AbilityStateBag(Vec<AbilityStateEntry>);

#[derive(Debug, Clone, PartialEq)]
pub enum AbilityStateEntry {
    Flag(bool),
    Counter(i64),
    RollOverride(i32),
    RacerRef(RacerIdx),
    Tag(Cow<'static, str>),
}

impl AbilityStateBag {
    pub fn push(&mut self, entry: AbilityStateEntry) {
        self.0.push(entry);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn last(&self) -> Option<&AbilityStateEntry> {
        self.0.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityStateEntry> {
        self.0.iter()
    }

    pub fn counter(&self) -> i64 {
        self.0
            .iter()
            .rev()
            .find_map(|e| if let AbilityStateEntry::Counter(n) = e { Some(*n) } else { None })
            .unwrap_or(0)
    }

    pub fn flag(&self) -> bool {
        self.0
            .iter()
            .rev()
            .find_map(|e| if let AbilityStateEntry::Flag(f) = e { Some(*f) } else { None })
            .unwrap_or(false)
    }

    pub fn roll_override(&self) -> Option<i32> {
        self.0.iter().rev().find_map(|e| {
            if let AbilityStateEntry::RollOverride(v) = e { Some(*v) } else { None }
        })
    }

    pub fn racer_ref(&self) -> Option<RacerIdx> {
        self.0.iter().rev().find_map(|e| {
            if let AbilityStateEntry::RacerRef(r) = e { Some(*r) } else { None }
        })
    }
}

/// A live attachment of an [AbilityDefinition] to a racer.
#[derive(Clone)]
pub struct AbilityInstance {
    pub id: AbilityInstanceId,
    pub definition: &'static AbilityDefinition,
    pub owner: RacerIdx,
    /// Set when this instance was granted to `owner` by another racer's
    /// ability rather than installed as a core racer ability (spec.md §3's
    /// "external ability" identity).
    pub grantor: Option<RacerIdx>,
    pub state: AbilityStateBag,
}

impl AbilityInstance {
    pub fn new(definition: &'static AbilityDefinition, owner: RacerIdx) -> AbilityInstance {
        AbilityInstance {
            id: AbilityInstanceId::fresh(),
            definition,
            owner,
            grantor: None,
            state: AbilityStateBag::default(),
        }
    }

    pub fn granted(
        definition: &'static AbilityDefinition,
        owner: RacerIdx,
        grantor: RacerIdx,
    ) -> AbilityInstance {
        AbilityInstance {
            id: AbilityInstanceId::fresh(),
            definition,
            owner,
            grantor: Some(grantor),
            state: AbilityStateBag::default(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.definition.name
    }

    /// Board/modifier ownership identity `(name, owner)`, used for
    /// ownership-based cleanup (spec.md §4.6).
    pub fn modifier_id(&self) -> ModifierId {
        ModifierId::new(self.definition.name, Some(self.owner))
    }

    /// Grant identity `(name, grantor)`, used so multiple grants of the same
    /// ability from different sources coexist (spec.md §4.7).
    pub fn grant_id(&self) -> (&'static str, Option<RacerIdx>) {
        (self.definition.name, self.grantor)
    }
}
