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

use clap::{Parser, ValueEnum};
use color_eyre::eyre::eyre;
use data::events::TimingMode;
use data::rules_config::Rules;
use game::{RacerSpec, Scenario};
use tracing::info;

/// Runs a sample race between two demo racers, driving the rules engine
/// end to end. This is an ambient-stack exerciser, not a scenario-file
/// loader: the roster and abilities below are hardcoded, not configurable.
#[derive(Parser, Debug)]
#[command(name = "racesim", about = "Runs a demo race on the event-driven rules engine")]
struct Cli {
    /// RNG seed for the race.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of rounds to simulate before giving up.
    #[arg(long, default_value_t = 200)]
    turns: u32,

    /// Board length (finish tile index).
    #[arg(long, default_value_t = 20)]
    board_length: i64,

    /// Event ordering mode within a scheduling phase.
    #[arg(long, value_enum, default_value_t = TimingModeArg::Flat)]
    timing_mode: TimingModeArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TimingModeArg {
    Flat,
    Bfs,
    Dfs,
}

impl From<TimingModeArg> for TimingMode {
    fn from(value: TimingModeArg) -> TimingMode {
        match value {
            TimingModeArg::Flat => TimingMode::Flat,
            TimingModeArg::Bfs => TimingMode::Bfs,
            TimingModeArg::Dfs => TimingMode::Dfs,
        }
    }
}

fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    info!(?cli, "Starting race");

    let rules = Rules { timing_mode: cli.timing_mode.into(), ..Rules::default() };
    let racers = vec![
        RacerSpec::new("Leaptoad")
            .with_ability(demo_abilities::leaptoad::LEAPTOAD_JUMP.name)
            .with_ability(demo_abilities::huge_baby::HUGE_BABY_PUSH.name),
        RacerSpec::new("Inchworm")
            .with_ability(demo_abilities::inchworm::INCHWORM_CREEP.name)
            .with_ability(demo_abilities::centaur::CENTAUR_TRAMPLE.name),
        RacerSpec::new("Scoocher").with_ability(demo_abilities::scoocher::SCOOCH_STEP.name),
        RacerSpec::new("Copycat").with_ability(demo_abilities::copycat::COPY_LEAD.name),
    ];

    let scenario = Scenario::new(cli.board_length, rules, cli.seed, racers);
    let mut engine = scenario.build().map_err(|stop| eyre!("failed to build scenario: {stop:?}"))?;

    engine.on_event_processed = Some(Box::new(|state, event| {
        tracing::debug!(round = state.round.0, ?event.kind, "event processed");
    }));

    engine.run_race(Some(cli.turns)).map_err(|stop| eyre!("race aborted: {stop:?}"))?;

    let state = engine.into_state();
    println!("Race finished after {} round(s):", state.round.0);
    let mut standings: Vec<_> = state.racers.iter().collect();
    standings.sort_by_key(|r| r.finish_rank.map(|rank| rank.0).unwrap_or(u32::MAX));
    for racer in standings {
        let rank = racer.finish_rank.map(|r| r.0.to_string()).unwrap_or_else(|| "-".to_string());
        let position = racer.position.map(|p| p.0.to_string()).unwrap_or_else(|| "eliminated".to_string());
        println!("  #{rank:>2}  {:<10}  tile={:<4}  vp={}", racer.name, position, racer.victory_points);
    }

    Ok(())
}
