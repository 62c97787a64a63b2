use std::time::Duration;

use crate::constants::keys;
use crate::error::Result;
use crate::pieces::Piece;
use crate::types::{Command, Layer};

/// Whether a key read waits for input or returns immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Blocking,
    NonBlocking,
}

/// Display and input surface the game loop drives. The engine never talks to it.
pub trait Frontend {
    /// Draws a piece's cells into the back buffer for `layer`.
    fn draw(&mut self, piece: &Piece, layer: Layer);

    /// Pushes the back buffer to the screen and clears it for the next frame.
    fn present(&mut self) -> Result<()>;

    fn show_status(&mut self, text: &str) -> Result<()>;

    fn show_message(&mut self, text: &str) -> Result<()>;

    /// `None` means no key was pressed, which only happens in non-blocking mode.
    fn read_key(&mut self, mode: InputMode) -> Result<Option<char>>;

    fn pause(&mut self, duration: Duration);
}

impl Command {
    pub fn from_key(key: Option<char>) -> Self {
        match key {
            Some(keys::UP) => Command::Up,
            Some(keys::DOWN) => Command::Down,
            Some(keys::LEFT) => Command::Left,
            Some(keys::RIGHT) => Command::Right,
            Some(keys::PLAY) => Command::Play,
            Some(keys::QUIT) => Command::Quit,
            _ => Command::None,
        }
    }
}
