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
use std::sync::atomic::{AtomicU64, Ordering};

use derive_more::{Add, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Stable index of a racer within the roster. Never reused within a race.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
pub struct RacerIdx(pub usize);

/// A tile index on the board. `0` is the starting tile; `board.length` is the
/// finish tile.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Add, Serialize, Deserialize,
)]
pub struct TileIndex(pub i64);

impl TileIndex {
    pub const START: TileIndex = TileIndex(0);

    pub fn clamp_non_negative(self) -> TileIndex {
        TileIndex(self.0.max(0))
    }
}

/// Global monotonically increasing tiebreaker, also used as the roll serial.
#[derive(
    Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
pub struct Serial(pub u64);

impl Serial {
    pub fn next(self) -> Serial {
        Serial(self.0 + 1)
    }
}

/// Nesting level of an event relative to the event that pushed it, used by
/// the BFS/DFS timing modes.
#[derive(
    Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
pub struct Depth(pub u32);

/// 1-based round counter, incremented each time turn order wraps.
#[derive(
    Debug, Display, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
pub struct TurnNumber(pub u32);

/// 1-based finishing rank (1st, 2nd, ...).
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize)]
pub struct FinishRank(pub u32);

/// Opaque identity assigned to an ability instance at install time. Used to
/// distinguish multiple instances of the same ability name on one racer
/// (e.g. granted by different sources), matching the Python engine's
/// `getattr(sub.callback, "__self__", None) == instance` identity check.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize)]
pub struct AbilityInstanceId(pub u64);

static NEXT_ABILITY_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

impl AbilityInstanceId {
    /// Allocates a fresh, never-reused instance id.
    pub fn fresh() -> AbilityInstanceId {
        AbilityInstanceId(NEXT_ABILITY_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Attribution for an `AbilityTriggeredEvent` and for modifier/board-tile
/// identity. `System` and `Board` are the two non-ability sentinel sources;
/// `Named` carries an ability or modifier's unique name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    System,
    Board,
    Named(Cow<'static, str>),
}

impl Source {
    pub fn named(name: impl Into<Cow<'static, str>>) -> Source {
        Source::Named(name.into())
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Source::System | Source::Board)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::System => write!(f, "System"),
            Source::Board => write!(f, "Board"),
            Source::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Stable identity of a modifier attached to a racer or a board tile:
/// `(name, owner)`. Equality is by these fields only, never by interior
/// modifier state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierId {
    pub name: Cow<'static, str>,
    pub owner: Option<RacerIdx>,
}

impl ModifierId {
    pub fn new(name: impl Into<Cow<'static, str>>, owner: Option<RacerIdx>) -> ModifierId {
        ModifierId { name: name.into(), owner }
    }
}
