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

use data::ability_definitions::AbilityDefinition;

/// Every ability/modifier definition in the program registers itself into
/// this slice with `#[linkme::distributed_slice(abilities::ABILITY_REGISTRY)]`
/// at the point it is declared (`demo_abilities` does this for its sample
/// abilities); no central list needs editing when a new one is added.
#[linkme::distributed_slice]
pub static ABILITY_REGISTRY: [&'static AbilityDefinition] = [..];

/// Looks up a definition by its unique name. `update_racer_abilities`
/// (spec.md §4.7) uses this to instantiate newly-added ability names.
pub fn lookup(name: &str) -> Option<&'static AbilityDefinition> {
    ABILITY_REGISTRY.iter().copied().find(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_of_unknown_name_is_none() {
        assert!(lookup("DefinitelyNotRegistered").is_none());
    }
}
