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

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::rules::Rules;

/// A canonical, hashable description of a scenario: `(racers, board, seed,
/// rules)`, matching `GameConfig` in `simulation/config.py`. Two configs
/// that are semantically equal always hash and encode identically,
/// regardless of field construction order — see [GameConfig::canonical_json].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub racers: Vec<String>,
    pub board: String,
    pub seed: u64,
    pub rules: Rules,
}

impl GameConfig {
    /// Builds the canonical JSON representation: top-level keys in the
    /// fixed order `racers, board, seed, rules`, with `rules`'s own keys in
    /// alphabetical order, serialized compactly (`","`/`":"` separators, no
    /// whitespace) exactly as `json.dumps(data, separators=(",", ":"))`
    /// does for the Python original. `serde_json::to_string` already emits
    /// that compact form; the only thing to get right here is key order,
    /// which is why this builds the `Map` by hand instead of deriving
    /// straight from `#[derive(Serialize)]` (whose order would follow
    /// struct declaration order, which already happens to match — this
    /// function exists to make that guarantee explicit and stable).
    pub fn canonical_json(&self) -> String {
        let mut rules = Map::new();
        rules.insert(
            "count_0_moves_for_ability_triggered".to_string(),
            Value::Bool(self.rules.count_0_moves_for_ability_triggered),
        );
        rules.insert(
            "hr_mastermind_steal_1st".to_string(),
            Value::Bool(self.rules.hr_mastermind_steal_1st),
        );
        rules.insert(
            "timing_mode".to_string(),
            serde_json::to_value(&self.rules.timing_mode).expect("TimingMode always serializes"),
        );
        rules.insert(
            "winner_vp".to_string(),
            Value::Array(self.rules.winner_vp.iter().map(|v| Value::from(*v)).collect()),
        );

        let mut top = Map::new();
        top.insert(
            "racers".to_string(),
            Value::Array(self.racers.iter().cloned().map(Value::String).collect()),
        );
        top.insert("board".to_string(), Value::String(self.board.clone()));
        top.insert("seed".to_string(), Value::from(self.seed));
        top.insert("rules".to_string(), Value::Object(rules));

        serde_json::to_string(&Value::Object(top)).expect("canonical config always serializes")
    }

    /// SHA-256 of [GameConfig::canonical_json]'s UTF-8 bytes.
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.canonical_json().as_bytes());
        hasher.finalize().into()
    }

    pub fn hash_hex(&self) -> String {
        self.hash().iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Shareable encoding: padded URL-safe base64 over the canonical JSON
    /// bytes, matching Python's `base64.urlsafe_b64encode` byte-for-byte.
    pub fn encode(&self) -> String {
        URL_SAFE.encode(self.canonical_json().as_bytes())
    }

    /// Inverse of [GameConfig::encode]. Since the canonical JSON's field
    /// names match this struct's field names, ordinary `serde_json`
    /// deserialization round-trips regardless of the encoder's key order.
    pub fn from_encoded(encoded: &str) -> Result<GameConfig, GameConfigDecodeError> {
        let bytes = URL_SAFE.decode(encoded).map_err(GameConfigDecodeError::Base64)?;
        let json = String::from_utf8(bytes).map_err(GameConfigDecodeError::Utf8)?;
        serde_json::from_str(&json).map_err(GameConfigDecodeError::Json)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GameConfigDecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
