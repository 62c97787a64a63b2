use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use ascii_pacman::config::Settings;
use ascii_pacman::constants::{GAME_OVER_MESSAGE, START_MESSAGE};
use ascii_pacman::engine::GameEngine;
use ascii_pacman::error::Result;
use ascii_pacman::frontend::{Frontend, InputMode};
use ascii_pacman::game::Game;
use ascii_pacman::level::Level;
use ascii_pacman::pieces::Piece;
use ascii_pacman::types::{Coord, Layer};

/// Replays a fixed key script and records everything the game shows.
#[derive(Default)]
struct ScriptedFrontend {
    keys: VecDeque<Option<char>>,
    pending: HashMap<Coord, char>,
    frames: Vec<HashMap<Coord, char>>,
    statuses: Vec<String>,
    messages: Vec<String>,
    paused: Duration,
}

impl ScriptedFrontend {
    fn new(keys: &[Option<char>]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Frontend for ScriptedFrontend {
    fn draw(&mut self, piece: &Piece, _layer: Layer) {
        if !piece.is_visible() {
            return;
        }
        for cell in piece.cells() {
            self.pending.insert(cell, piece.symbol());
        }
    }

    fn present(&mut self) -> Result<()> {
        self.frames.push(std::mem::take(&mut self.pending));
        Ok(())
    }

    fn show_status(&mut self, text: &str) -> Result<()> {
        self.statuses.push(text.to_string());
        Ok(())
    }

    fn show_message(&mut self, text: &str) -> Result<()> {
        self.messages.push(text.to_string());
        Ok(())
    }

    /// Blocking reads skip empty slots and quit once the script runs out;
    /// non-blocking reads go idle instead.
    fn read_key(&mut self, mode: InputMode) -> Result<Option<char>> {
        match mode {
            InputMode::Blocking => {
                while let Some(key) = self.keys.pop_front() {
                    if key.is_some() {
                        return Ok(key);
                    }
                }
                Ok(Some('Q'))
            }
            InputMode::NonBlocking => Ok(self.keys.pop_front().flatten()),
        }
    }

    fn pause(&mut self, duration: Duration) {
        self.paused += duration;
    }
}

const BOARD: [&str; 7] = [
    "###########",
    "#         #",
    "###########",
    "## ### ####",
    "###########",
    "## ### ####",
    "###########",
];

fn draw(rows: &[String], marks: &[(i32, i32, char)]) -> String {
    let mut grid: Vec<Vec<char>> = rows.iter().map(|row| row.chars().collect()).collect();
    for &(x, y, c) in marks {
        grid[y as usize][x as usize] = c;
    }
    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>() + "\n")
        .collect()
}

/// One corridor with the player at its right end. Pinky, Clyde and Inky are sealed in.
fn corridor(points: &[(i32, i32)], blinky: (i32, i32)) -> Level {
    let rows: Vec<String> = BOARD.iter().map(|row| row.to_string()).collect();
    let dots: Vec<(i32, i32, char)> = points.iter().map(|&(x, y)| (x, y, '.')).collect();
    let shapes = draw(&rows, &dots);

    let blank = vec![" ".repeat(11); BOARD.len()];
    let spawns = [
        (8, 1, '<'),
        (blinky.0, blinky.1, 'B'),
        (2, 3, 'P'),
        (6, 3, 'C'),
        (2, 5, 'I'),
        (2, 0, 'b'),
        (10, 0, 'p'),
        (0, 6, 'c'),
        (10, 6, 'i'),
        (4, 4, 'l'),
        (8, 4, 'r'),
    ];
    let locations = draw(&blank, &spawns);
    Level::from_layouts(&shapes, &locations)
}

/// Blinky starts in the corridor and meets the player on the second tick.
fn ambush() -> Level {
    corridor(&[(8, 1)], (2, 1))
}

/// A single point one step from the player; Blinky is sealed in.
fn single_point() -> Level {
    corridor(&[(6, 1)], (6, 5))
}

fn quick_settings() -> Settings {
    Settings {
        tick_ms: 10,
        animation_ms: 1,
        reset_pause_ms: 100,
        ..Settings::default()
    }
}

fn game(level: &Level, settings: Settings, keys: &[Option<char>]) -> Game<ScriptedFrontend> {
    let engine = GameEngine::with_level(level, settings, 11);
    Game::with_engine(engine, ScriptedFrontend::new(keys))
}

#[test]
fn quitting_at_the_start_prompt_plays_nothing() {
    let mut game = game(&ambush(), quick_settings(), &[Some('Q')]);
    let summary = game.run().expect("run");
    assert_eq!(summary.games_played, 0);
    assert_eq!(summary.ticks, 0);

    let frontend = game.into_frontend();
    assert_eq!(frontend.messages, vec![START_MESSAGE.to_string()]);
    assert!(frontend.frames.is_empty());
}

#[test]
fn unknown_keys_are_ignored_at_the_prompt_and_in_play() {
    let mut game = game(&ambush(), quick_settings(), &[Some('x'), Some('p'), Some('k'), Some('Q')]);
    let summary = game.run().expect("run");
    assert_eq!(summary.games_played, 1);
    assert_eq!(summary.ticks, 1);
    assert_eq!(game.engine().player().location(), Coord::new(6, 1));
}

#[test]
fn first_frame_shows_maze_and_agents() {
    let mut game = game(&ambush(), quick_settings(), &[Some('p'), Some('Q')]);
    game.run().expect("run");

    let frontend = game.into_frontend();
    let first = &frontend.frames[0];
    assert_eq!(first.get(&Coord::new(8, 1)), Some(&'<'));
    assert_eq!(first.get(&Coord::new(2, 1)), Some(&'B'));
    assert_eq!(first.get(&Coord::new(0, 0)), Some(&'#'));
    assert_eq!(frontend.statuses[0], "Level: 1 \nScore: 0 \nLives: 3 \n");
}

#[test]
fn capture_costs_a_life_and_replays_the_reset_animation() {
    let keys = [Some('p'), None, None, None, Some('Q')];
    let mut game = game(&ambush(), quick_settings(), &keys);
    let summary = game.run().expect("run");

    assert_eq!(summary.ticks, 3);
    assert_eq!(summary.lives_lost, 1);
    assert_eq!(game.engine().player().lives(), 2);
    // back home after the capture, then one more step left
    assert_eq!(game.engine().player().location(), Coord::new(6, 1));

    let frontend = game.into_frontend();
    // three tick pauses, twelve blink pauses and two reset pauses
    assert_eq!(frontend.paused, Duration::from_millis(3 * 10 + 12 + 2 * 100));
    assert!(frontend
        .frames
        .iter()
        .any(|frame| !frame.values().any(|symbol| *symbol == '#')));
    assert_eq!(
        frontend.statuses.last().map(String::as_str),
        Some("Level: 1 \nScore: 0 \nLives: 2 \n")
    );
}

#[test]
fn game_over_offers_a_replay_that_starts_from_scratch() {
    let settings = Settings {
        start_lives: 1,
        ..quick_settings()
    };
    let keys = [Some('p'), None, None, Some('p'), None, None, Some('Q')];
    let mut game = game(&ambush(), settings, &keys);
    let summary = game.run().expect("run");

    assert_eq!(summary.games_played, 2);
    assert_eq!(summary.lives_lost, 2);
    assert_eq!(summary.ticks, 4);
    assert_eq!(summary.level, 1);

    let frontend = game.into_frontend();
    let game_overs = frontend
        .messages
        .iter()
        .filter(|message| message.as_str() == GAME_OVER_MESSAGE)
        .count();
    assert_eq!(game_overs, 2);
}

#[test]
fn clearing_every_point_advances_the_level_and_keeps_the_score() {
    let keys = [Some('p'), None, None, Some('Q')];
    let mut game = game(&single_point(), quick_settings(), &keys);
    let summary = game.run().expect("run");

    assert_eq!(summary.level, 3);
    assert_eq!(summary.points, 10);
    assert_eq!(summary.lives_lost, 0);
    assert_eq!(game.engine().points_left(), 1);

    let frontend = game.into_frontend();
    assert_eq!(
        frontend.statuses.last().map(String::as_str),
        Some("Level: 3 \nScore: 10 \nLives: 3 \n")
    );
    assert!(frontend
        .frames
        .iter()
        .any(|frame| !frame.values().any(|symbol| *symbol == '<')));
}

#[test]
fn tick_limit_stops_an_idle_game() {
    let mut game = game(&ambush(), quick_settings(), &[Some('p')]).with_tick_limit(5);
    let summary = game.run().expect("run");
    assert_eq!(summary.ticks, 5);
    assert_eq!(summary.lives_lost, 2);
    assert_eq!(summary.games_played, 1);
}
