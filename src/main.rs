//! Skyfire headless runner
//!
//! Plays seeded autopilot games at a fixed frame rate and prints the results
//! and the resulting leaderboard as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use skyfire::sim::{GameEngine, GameEvent, GameResult};
use skyfire::{Autopilot, Leaderboard, Tuning};

#[derive(Parser, Debug)]
#[command(name = "skyfire")]
#[command(about = "Run seeded autopilot games against the bullet-hell simulation core")]
struct Cli {
    /// Seed of the first run; later runs count up from it
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of runs
    #[arg(long, default_value_t = 1)]
    runs: u32,
    /// Wall-clock limit per run, in simulated seconds
    #[arg(long, default_value_t = 300.0)]
    seconds: f32,
    /// Fixed frame rate driving `update`
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Tuning JSON (missing fields take defaults)
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Autopilot weights JSON
    #[arg(long)]
    pilot: Option<PathBuf>,
    /// Leaderboard file, loaded if present and written back after the runs
    #[arg(long)]
    leaderboard: Option<PathBuf>,
    /// Name recorded on leaderboard entries
    #[arg(long, default_value = "autopilot")]
    name: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
enum Outcome {
    Victory,
    GameOver,
    TimeUp,
}

#[derive(Debug, Serialize)]
struct RunReport {
    seed: u64,
    outcome: Outcome,
    frames: u32,
    boss_warnings: u32,
    result: GameResult,
    rank: Option<usize>,
}

#[derive(Serialize)]
struct Summary<'a> {
    runs: &'a [RunReport],
    leaderboard: &'a Leaderboard,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.fps == 0 {
        bail!("--fps must be > 0");
    }
    if !(cli.seconds.is_finite() && cli.seconds > 0.0) {
        bail!("--seconds must be positive");
    }

    let tuning = match &cli.tuning {
        Some(path) => {
            let json = read(path)?;
            Tuning::from_json(&json).with_context(|| format!("bad tuning in {}", path.display()))?
        }
        None => Tuning::default(),
    };
    let pilot: Autopilot = match &cli.pilot {
        Some(path) => serde_json::from_str(&read(path)?)
            .with_context(|| format!("bad pilot weights in {}", path.display()))?,
        None => Autopilot::default(),
    };
    let mut board = match &cli.leaderboard {
        Some(path) if path.exists() => Leaderboard::from_json(&read(path)?)
            .with_context(|| format!("bad leaderboard in {}", path.display()))?,
        _ => Leaderboard::new(),
    };

    let mut engine = GameEngine::new(tuning, cli.seed).context("invalid tuning")?;
    let mut reports = Vec::with_capacity(cli.runs as usize);
    for i in 0..cli.runs {
        let seed = cli.seed.wrapping_add(u64::from(i));
        if i > 0 {
            engine.restart_with_seed(seed);
        }
        let mut report = play(&mut engine, &pilot, seed, cli.fps, cli.seconds);
        report.rank = board.submit(cli.name.clone(), report.result);
        log::info!(
            "Run {} (seed {}): {:?} with {} points",
            i + 1,
            seed,
            report.outcome,
            report.result.score
        );
        reports.push(report);
    }

    if let Some(path) = &cli.leaderboard {
        let json = board.to_json()?;
        fs::write(path, json).with_context(|| format!("failed writing {}", path.display()))?;
    }

    let summary = Summary {
        runs: &reports,
        leaderboard: &board,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Drive one run to its end or the time limit
fn play(engine: &mut GameEngine, pilot: &Autopilot, seed: u64, fps: u32, seconds: f32) -> RunReport {
    let dt = 1.0 / fps as f32;
    let max_frames = (seconds * fps as f32).ceil() as u32;
    let mut boss_warnings = 0;

    for frame in 1..=max_frames {
        engine.apply_input(pilot.decide(engine));
        for event in engine.update(dt) {
            let (outcome, result) = match event {
                GameEvent::BossWarning { .. } => {
                    boss_warnings += 1;
                    continue;
                }
                GameEvent::GameOver(result) => (Outcome::GameOver, result),
                GameEvent::Victory(result) => (Outcome::Victory, result),
            };
            return RunReport {
                seed,
                outcome,
                frames: frame,
                boss_warnings,
                result,
                rank: None,
            };
        }
    }

    RunReport {
        seed,
        outcome: Outcome::TimeUp,
        frames: max_frames,
        boss_warnings,
        result: engine.game_state().result(),
        rank: None,
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed reading {}", path.display()))
}
