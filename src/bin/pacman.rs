use std::path::PathBuf;

use anyhow::Context;
use ascii_pacman::config::Settings;
use ascii_pacman::game::Game;
use ascii_pacman::logging::{self, LogTarget};
use ascii_pacman::terminal::TerminalFrontend;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal Pac-Man")]
struct Cli {
    /// TOML settings file; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u32>,
    /// Milliseconds between ticks.
    #[arg(long)]
    tick_ms: Option<u64>,
    #[arg(long)]
    lives: Option<u32>,
    /// Write logs here. Without it nothing is logged, since the game owns the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn resolve_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match cli.config.as_deref() {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(tick_ms) = cli.tick_ms {
        settings.tick_ms = tick_ms;
    }
    if let Some(lives) = cli.lives {
        settings.start_lives = lives;
    }
    settings.validate().context("invalid command line override")?;
    Ok(settings)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let target = match cli.log_file.clone() {
        Some(path) => LogTarget::File(path),
        None => LogTarget::Off,
    };
    logging::init(target).context("failed to open log file")?;

    let settings = resolve_settings(&cli)?;
    let seed = settings.seed.unwrap_or_else(rand::random::<u32>);
    info!(seed, tick_ms = settings.tick_ms, "starting terminal game");

    let frontend = TerminalFrontend::new().context("failed to prepare the terminal")?;
    let mut game = Game::new(settings, seed, frontend);
    let summary = game.run()?;
    // Restore the terminal before printing the final score.
    drop(game);

    println!(
        "Final score: {}  level: {}  ghosts eaten: {}",
        summary.points, summary.level, summary.ghosts_eaten
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_settings() {
        let cli = Cli::parse_from(["pacman", "--seed", "5", "--tick-ms", "80", "--lives", "5"]);
        let settings = resolve_settings(&cli).expect("settings");
        assert_eq!(settings.seed, Some(5));
        assert_eq!(settings.tick_ms, 80);
        assert_eq!(settings.start_lives, 5);
        assert_eq!(settings.chase_length, Settings::default().chase_length);
    }

    #[test]
    fn zero_lives_override_is_rejected() {
        let cli = Cli::parse_from(["pacman", "--lives", "0"]);
        assert!(resolve_settings(&cli).is_err());
    }

    #[test]
    fn config_file_is_read_before_overrides() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "tick_ms = 120\nstart_lives = 4\n").expect("write settings");
        let cli = Cli::parse_from([
            "pacman".to_string(),
            "--config".to_string(),
            path.display().to_string(),
            "--lives".to_string(),
            "2".to_string(),
        ]);
        let settings = resolve_settings(&cli).expect("settings");
        assert_eq!(settings.tick_ms, 120);
        assert_eq!(settings.start_lives, 2);
    }
}
