//! Run a seeded race between two drivers.
//!
//! Drivers come from a TOML roster (`--roster`) or the two built-in
//! presets. Events go to the log, or to stdout as JSON lines with `--json`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing::info;

use grid_duel::driver::roster::{self, MOSTAFA, VERSTAPPEN};
use grid_duel::{
    DriverConfig, DuelEvent, EventSink, HeuristicConfig, Liveness, PolicyConfig, Race,
    RaceConfig, RaceRng, RosterFile, Seat, SeatMap, TracingSink,
};

#[derive(Parser, Debug)]
#[command(name = "grid-duel")]
#[command(about = "Run a turn-based racing duel between two drivers")]
struct Args {
    /// Roster TOML file; may also carry a [race] table
    #[arg(long)]
    roster: Option<PathBuf>,

    /// First seat driver name
    #[arg(long, default_value = VERSTAPPEN)]
    first: String,

    /// Second seat driver name
    #[arg(long, default_value = MOSTAFA)]
    second: String,

    /// Race seed; each seat forks its own stream from it
    #[arg(long)]
    seed: Option<u64>,

    /// Override both drivers' policy
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Which resources keep a driver in the race
    #[arg(long, value_enum)]
    liveness: Option<LivenessArg>,

    /// Consecutive idle rounds before a stalemate; 0 disables
    #[arg(long)]
    stalemate_after: Option<u32>,

    /// Round cap
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Let the second seat attack first
    #[arg(long)]
    second_starts: bool,

    /// Print every event to stdout as a JSON line
    #[arg(long)]
    json: bool,

    /// Write the finished race record (bincode)
    #[arg(long)]
    record: Option<PathBuf>,

    /// Write the finished race record (JSON)
    #[arg(long)]
    record_json: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Random,
    Heuristic,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LivenessArg {
    Tire,
    TireAndFuel,
}

#[derive(Debug, Default, Deserialize)]
struct RaceSection {
    #[serde(default)]
    race: RaceConfig,
}

/// Writes each event as one line of JSON.
struct JsonLines;

impl EventSink for JsonLines {
    fn emit(&mut self, event: &DuelEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::warn!(%err, "failed to encode event"),
        }
    }
}

fn main() -> grid_duel::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("grid_duel=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let (grid, mut race_config) = match &args.roster {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let section: RaceSection = toml::from_str(&text)?;
            (RosterFile::from_toml_str(&text)?, section.race)
        }
        None => (
            RosterFile {
                drivers: roster::presets(seed),
            },
            RaceConfig::default(),
        ),
    };

    if let Some(liveness) = args.liveness {
        race_config = race_config.with_liveness(match liveness {
            LivenessArg::Tire => Liveness::TireOnly,
            LivenessArg::TireAndFuel => Liveness::TireAndFuel,
        });
    }
    if let Some(rounds) = args.stalemate_after {
        race_config = race_config.with_stalemate_after(Some(rounds));
    }
    if let Some(max_rounds) = args.max_rounds {
        race_config = race_config.with_max_rounds(max_rounds);
    }
    if args.second_starts {
        race_config = race_config.with_first_attacker(Seat::Second);
    }

    let mut root = RaceRng::new(seed);
    let seat_seeds = SeatMap::from_fn(|_| root.fork().seed());
    let first = pick(&grid, &args.first, &args, seat_seeds[Seat::First])?;
    let second = pick(&grid, &args.second, &args, seat_seeds[Seat::Second])?;

    info!(seed, first = %args.first, second = %args.second, "building race");
    let mut race = Race::new(first.build()?, second.build()?, race_config);
    let outcome = if args.json {
        race.run(&mut JsonLines)
    } else {
        race.run(&mut TracingSink)
    };

    match outcome.winner().zip(outcome.winner_vitals()) {
        Some((seat, vitals)) => {
            info!(
                winner = race.driver(seat).name(),
                tire_health = vitals.tire_health(),
                fuel = vitals.fuel(),
                reason = %outcome.reason,
                rounds = outcome.rounds,
                "winner"
            );
        }
        None => info!(reason = %outcome.reason, rounds = outcome.rounds, "draw"),
    }

    let record = race.record();
    if let Some(path) = &args.record {
        std::fs::write(path, record.to_bytes()?)?;
    }
    if let Some(path) = &args.record_json {
        std::fs::write(path, record.to_json()?)?;
    }
    Ok(())
}

/// Look up a driver and apply command-line overrides.
fn pick(
    roster: &RosterFile,
    name: &str,
    args: &Args,
    seed: u64,
) -> grid_duel::Result<DriverConfig> {
    let mut config = roster.require(name)?.clone();

    if args.seed.is_some() || args.roster.is_none() {
        config = config.with_seed(seed);
    }
    match args.policy {
        Some(PolicyArg::Random) => config = config.with_policy(PolicyConfig::Random),
        Some(PolicyArg::Heuristic) if !matches!(config.policy, PolicyConfig::Heuristic(_)) => {
            config = config.with_policy(PolicyConfig::Heuristic(HeuristicConfig::default()));
        }
        _ => {}
    }
    Ok(config)
}
