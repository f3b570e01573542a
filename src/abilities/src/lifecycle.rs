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

use data::ability_definitions::AbilityInstance;
use data::core::AbilityInstanceId;

/// The pure diff between a racer's current *core* ability set (instances
/// with no grantor) and a target name set, per `update_racer_abilities`
/// (spec.md §4.7). Granted abilities (`grantor.is_some()`) are excluded:
/// they're managed separately via `grant_ability`/`revoke_ability` so that
/// grants from distinct sources coexist independently of the core set.
#[derive(Debug, Clone, Default)]
pub struct DiffAbilityNames {
    pub to_remove: Vec<AbilityInstanceId>,
    pub to_add: Vec<&'static str>,
}

pub fn diff_ability_names(current: &[AbilityInstance], target: &[&'static str]) -> DiffAbilityNames {
    let core: Vec<&AbilityInstance> = current.iter().filter(|a| a.grantor.is_none()).collect();

    let to_remove = core
        .iter()
        .filter(|a| !target.contains(&a.definition.name))
        .map(|a| a.id)
        .collect();

    let current_names: HashSet<&str> = core.iter().map(|a| a.definition.name).collect();
    let to_add = target.iter().copied().filter(|name| !current_names.contains(name)).collect();

    DiffAbilityNames { to_remove, to_add }
}

#[cfg(test)]
mod tests {
    use data::ability_definitions::{AbilityDefinition, AbilityInstance};
    use data::core::RacerIdx;

    use super::*;

    static DEF_A: AbilityDefinition = AbilityDefinition::new("A", &[]);
    static DEF_B: AbilityDefinition = AbilityDefinition::new("B", &[]);

    #[test]
    fn adds_missing_and_removes_unwanted_core_abilities() {
        let owner = RacerIdx(0);
        let current = vec![AbilityInstance::new(&DEF_A, owner)];
        let diff = diff_ability_names(&current, &["B"]);
        assert_eq!(diff.to_add, vec!["B"]);
        assert_eq!(diff.to_remove.len(), 1);
    }

    #[test]
    fn granted_instances_are_never_diffed() {
        let owner = RacerIdx(0);
        let grantor = RacerIdx(1);
        let current = vec![AbilityInstance::granted(&DEF_A, owner, grantor)];
        let diff = diff_ability_names(&current, &[]);
        assert!(diff.to_remove.is_empty());
    }
}
