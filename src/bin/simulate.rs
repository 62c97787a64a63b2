use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use ascii_pacman::config::Settings;
use ascii_pacman::constants::keys;
use ascii_pacman::error::Result as GameResult;
use ascii_pacman::frontend::{Frontend, InputMode};
use ascii_pacman::game::Game;
use ascii_pacman::logging::{self, LogTarget};
use ascii_pacman::pieces::Piece;
use ascii_pacman::rng::Rng;
use ascii_pacman::types::{Direction, GameSummary, Layer, Snapshot};
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};

const MOVE_KEYS: [char; 4] = [keys::UP, keys::DOWN, keys::LEFT, keys::RIGHT];
const TURN_EVERY_TICKS: u64 = 6;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run headless autopilot games and print JSON results")]
struct Cli {
    #[arg(long, default_value_t = 3)]
    runs: u32,
    #[arg(long, default_value_t = 2_000)]
    ticks: u64,
    #[arg(long)]
    seed: Option<u32>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    summary_out: Option<PathBuf>,
}

/// Presses a random movement key every few ticks, starts the first game and quits
/// at the game-over prompt. Never sleeps.
struct Autopilot {
    rng: Rng,
    reads: u64,
    started: bool,
}

impl Autopilot {
    fn new(seed: u32) -> Self {
        Self {
            rng: Rng::new(seed ^ 0x9e37_79b9),
            reads: 0,
            started: false,
        }
    }
}

impl Frontend for Autopilot {
    fn draw(&mut self, _piece: &Piece, _layer: Layer) {}

    fn present(&mut self) -> GameResult<()> {
        Ok(())
    }

    fn show_status(&mut self, _text: &str) -> GameResult<()> {
        Ok(())
    }

    fn show_message(&mut self, _text: &str) -> GameResult<()> {
        Ok(())
    }

    fn read_key(&mut self, mode: InputMode) -> GameResult<Option<char>> {
        match mode {
            InputMode::Blocking if !self.started => {
                self.started = true;
                Ok(Some(keys::PLAY))
            }
            InputMode::Blocking => Ok(Some(keys::QUIT)),
            InputMode::NonBlocking => {
                self.reads += 1;
                if self.reads % TURN_EVERY_TICKS == 0 {
                    Ok(Some(MOVE_KEYS[self.rng.pick_index(MOVE_KEYS.len())]))
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn pause(&mut self, _duration: Duration) {}
}

#[derive(Clone, Debug, Serialize)]
struct RunResultLine {
    run: u32,
    seed: u32,
    #[serde(rename = "startedAt")]
    started_at: String,
    #[serde(flatten)]
    summary: GameSummary,
    anomalies: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct RunSummary {
    #[serde(rename = "startedAt")]
    started_at: String,
    #[serde(rename = "finishedAt")]
    finished_at: String,
    #[serde(rename = "runCount")]
    run_count: usize,
    #[serde(rename = "anomalyCount")]
    anomaly_count: usize,
    #[serde(rename = "averagePoints")]
    average_points: u32,
    #[serde(rename = "bestPoints")]
    best_points: u32,
    #[serde(rename = "highestLevel")]
    highest_level: u32,
    runs: Vec<RunResultLine>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(LogTarget::Stderr).context("failed to set up logging")?;

    let mut settings = match cli.config.as_deref() {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    let base_seed = settings.seed.unwrap_or_else(rand::random::<u32>);
    let started_at = timestamp();

    let mut results = Vec::new();
    for run in 0..cli.runs {
        let seed = base_seed.wrapping_add(run);
        info!(run, seed, ticks = cli.ticks, "run started");
        let result = run_once(run, seed, cli.ticks, &settings)?;
        for anomaly in &result.anomalies {
            warn!(run, seed, %anomaly, "anomaly detected");
        }
        info!(
            run,
            seed,
            points = result.summary.points,
            level = result.summary.level,
            "run finished"
        );
        println!("{}", serde_json::to_string(&result)?);
        results.push(result);
    }

    let summary = build_run_summary(started_at, timestamp(), results);
    println!("{}", serde_json::to_string(&summary)?);
    if let Some(path) = cli.summary_out.as_deref() {
        write_summary(path, &summary)?;
        info!(path = %path.display(), "summary written");
    }

    if summary.anomaly_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_once(run: u32, seed: u32, ticks: u64, settings: &Settings) -> anyhow::Result<RunResultLine> {
    let started_at = timestamp();
    let mut game = Game::new(settings.clone(), seed, Autopilot::new(seed)).with_tick_limit(ticks);
    let summary = game.run()?;
    let engine = game.engine();
    let mut anomalies = collect_snapshot_anomalies(&engine.snapshot(), settings);
    let player = engine.player().location();
    if engine.maze().is_wall(player) {
        anomalies.push(format!("player inside a wall at ({}, {})", player.x, player.y));
    }
    Ok(RunResultLine {
        run,
        seed,
        started_at,
        summary,
        anomalies,
    })
}

fn collect_snapshot_anomalies(snapshot: &Snapshot, settings: &Settings) -> Vec<String> {
    let mut anomalies = Vec::new();
    if snapshot.player.x < 0 || snapshot.player.y < 0 {
        anomalies.push(format!(
            "player off-grid at ({}, {})",
            snapshot.player.x, snapshot.player.y
        ));
    }
    if snapshot.player.lives > settings.start_lives {
        anomalies.push(format!("player has {} lives", snapshot.player.lives));
    }
    for ghost in &snapshot.ghosts {
        if ghost.x < 0 || ghost.y < 0 {
            anomalies.push(format!("{:?} off-grid at ({}, {})", ghost.id, ghost.x, ghost.y));
        }
        if ghost.x % 2 != 0 {
            anomalies.push(format!("{:?} on odd column {}", ghost.id, ghost.x));
        }
    }
    if snapshot.power_up_countdown > settings.power_up_length {
        anomalies.push(format!(
            "power-up countdown {} exceeds {}",
            snapshot.power_up_countdown, settings.power_up_length
        ));
    }
    if snapshot.player.dir == Direction::Still {
        anomalies.push("player lost its momentum".to_string());
    }
    anomalies
}

fn build_run_summary(
    started_at: String,
    finished_at: String,
    runs: Vec<RunResultLine>,
) -> RunSummary {
    let run_count = runs.len();
    let total_points: u64 = runs.iter().map(|run| run.summary.points as u64).sum();
    let average_points = if run_count == 0 {
        0
    } else {
        (total_points / run_count as u64) as u32
    };
    RunSummary {
        started_at,
        finished_at,
        run_count,
        anomaly_count: runs.iter().map(|run| run.anomalies.len()).sum(),
        average_points,
        best_points: runs.iter().map(|run| run.summary.points).max().unwrap_or(0),
        highest_level: runs.iter().map(|run| run.summary.level).max().unwrap_or(0),
        runs,
    }
}

fn write_summary(path: &Path, summary: &RunSummary) -> anyhow::Result<()> {
    let summary_text = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, summary_text)
        .with_context(|| format!("failed to write summary to {}", path.display()))
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
