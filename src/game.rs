use std::time::Duration;

use tracing::{info, trace};

use crate::config::Settings;
use crate::constants::{GAME_OVER_MESSAGE, RESET_BLINKS, START_MESSAGE};
use crate::engine::{BlinkGroup, GameEngine};
use crate::error::Result;
use crate::frontend::{Frontend, InputMode};
use crate::types::{Command, GameSummary};

/// Drives the engine against a frontend: start prompt, tick loop, animations and
/// the play-again prompt.
pub struct Game<F: Frontend> {
    engine: GameEngine,
    frontend: F,
    tick_limit: Option<u64>,
    games_played: u32,
}

impl<F: Frontend> Game<F> {
    pub fn new(settings: Settings, seed: u32, frontend: F) -> Self {
        Self::with_engine(GameEngine::new(settings, seed), frontend)
    }

    pub fn with_engine(engine: GameEngine, frontend: F) -> Self {
        Self {
            engine,
            frontend,
            tick_limit: None,
            games_played: 0,
        }
    }

    /// Stops the loop after `ticks` ticks, as if the player had quit.
    pub fn with_tick_limit(mut self, ticks: u64) -> Self {
        self.tick_limit = Some(ticks);
        self
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn into_frontend(self) -> F {
        self.frontend
    }

    pub fn run(&mut self) -> Result<GameSummary> {
        self.frontend.show_message(START_MESSAGE)?;
        if self.wait_for_play_or_quit()? == Command::Quit {
            return Ok(self.summary());
        }

        self.games_played += 1;
        info!(level = self.engine.level(), "game started");
        self.play()?;

        let summary = self.summary();
        info!(
            points = summary.points,
            level = summary.level,
            ticks = summary.ticks,
            games = summary.games_played,
            "session finished"
        );
        Ok(summary)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            points: self.engine.player().points(),
            level: self.engine.level(),
            ticks: self.engine.tick(),
            ghosts_eaten: self.engine.ghosts_eaten(),
            lives_lost: self.engine.lives_lost(),
            games_played: self.games_played,
        }
    }

    fn play(&mut self) -> Result<()> {
        self.render()?;
        loop {
            if self
                .tick_limit
                .is_some_and(|limit| self.engine.tick() >= limit)
            {
                return Ok(());
            }

            let command = Command::from_key(self.frontend.read_key(InputMode::NonBlocking)?);
            if command == Command::Quit {
                return Ok(());
            }

            let outcome = self.engine.step(command);
            for event in self.engine.drain_events() {
                trace!(?event, "runtime event");
            }
            self.render()?;

            if outcome.game_over {
                if !self.play_again()? {
                    return Ok(());
                }
                self.engine.reset_game();
                self.games_played += 1;
                info!(game = self.games_played, "game restarted");
                self.render()?;
            } else {
                if outcome.level_cleared {
                    self.clear_level()?;
                }
                if outcome.player_caught {
                    self.replay_capture()?;
                }
            }

            self.engine.end_tick();
            self.pause(self.engine.settings().tick_ms);
        }
    }

    fn wait_for_play_or_quit(&mut self) -> Result<Command> {
        loop {
            let command = Command::from_key(self.frontend.read_key(InputMode::Blocking)?);
            if matches!(command, Command::Play | Command::Quit) {
                return Ok(command);
            }
        }
    }

    fn play_again(&mut self) -> Result<bool> {
        self.blink_pieces(BlinkGroup::Scenery, RESET_BLINKS)?;
        self.frontend.show_message(GAME_OVER_MESSAGE)?;
        Ok(self.wait_for_play_or_quit()? == Command::Play)
    }

    fn replay_capture(&mut self) -> Result<()> {
        self.blink_pieces(BlinkGroup::Scenery, RESET_BLINKS)?;
        self.engine.reset_positions();
        self.render()?;
        self.pause(self.engine.settings().reset_pause_ms);
        self.blink_pieces(BlinkGroup::Agents, RESET_BLINKS)?;
        self.pause(self.engine.settings().reset_pause_ms);
        Ok(())
    }

    fn clear_level(&mut self) -> Result<()> {
        self.blink_pieces(BlinkGroup::AgentsAndWalls, RESET_BLINKS)?;
        self.engine.advance_level();
        self.render()?;
        self.pause(self.engine.settings().reset_pause_ms);
        self.blink_pieces(BlinkGroup::Everything, RESET_BLINKS)?;
        self.render()
    }

    /// Each blink hides the group and shows it again, rendering every state.
    fn blink_pieces(&mut self, group: BlinkGroup, times: u32) -> Result<()> {
        let animation_ms = self.engine.settings().animation_ms;
        for _ in 0..times {
            self.render()?;
            self.pause(animation_ms);
            self.engine.blink(group);
            self.render()?;
            self.pause(animation_ms);
            self.engine.blink(group);
            self.render()?;
            self.pause(animation_ms);
        }
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        for (piece, layer) in self.engine.pieces() {
            self.frontend.draw(piece, layer);
        }
        self.frontend.present()?;
        self.frontend.show_status(&self.engine.status_text())
    }

    fn pause(&mut self, millis: u64) {
        self.frontend.pause(Duration::from_millis(millis));
    }
}
