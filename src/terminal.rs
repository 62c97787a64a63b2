use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};

use crate::constants::{keys, symbols, GAME_SCREEN_HEIGHT, GAME_SCREEN_WIDTH, STATUS_SCREEN_HEIGHT};
use crate::error::Result;
use crate::frontend::{Frontend, InputMode};
use crate::pieces::Piece;
use crate::types::Layer;

const LAYERS: usize = 3;

fn layer_index(layer: Layer) -> usize {
    match layer {
        Layer::Background => 0,
        Layer::Midground => 1,
        Layer::Foreground => 2,
    }
}

/// Character grid per layer; the topmost drawn symbol wins when composed.
struct FrameBuffer {
    layers: Vec<Vec<Option<char>>>,
}

impl FrameBuffer {
    fn new() -> Self {
        let cells = (GAME_SCREEN_WIDTH * GAME_SCREEN_HEIGHT) as usize;
        Self {
            layers: vec![vec![None; cells]; LAYERS],
        }
    }

    fn put(&mut self, layer: Layer, x: i32, y: i32, symbol: char) {
        if x < 0 || y < 0 || x >= GAME_SCREEN_WIDTH || y >= GAME_SCREEN_HEIGHT {
            return;
        }
        let idx = (y * GAME_SCREEN_WIDTH + x) as usize;
        self.layers[layer_index(layer)][idx] = Some(symbol);
    }

    fn compose_row(&self, y: i32) -> String {
        (0..GAME_SCREEN_WIDTH)
            .map(|x| {
                let idx = (y * GAME_SCREEN_WIDTH + x) as usize;
                self.layers
                    .iter()
                    .rev()
                    .find_map(|layer| layer[idx])
                    .unwrap_or(symbols::INVISIBLE)
            })
            .collect()
    }

    fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.fill(None);
        }
    }
}

/// Raw-mode alternate-screen terminal. Restores the terminal on drop.
pub struct TerminalFrontend {
    stdout: Stdout,
    frame: FrameBuffer,
}

impl TerminalFrontend {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;
        Ok(Self {
            stdout,
            frame: FrameBuffer::new(),
        })
    }

    fn print_block(&mut self, top: u16, text: &str) -> Result<()> {
        for (offset, line) in text.split('\n').enumerate() {
            self.stdout.queue(MoveTo(0, top + offset as u16))?;
            self.stdout.queue(Clear(ClearType::UntilNewLine))?;
            self.stdout.queue(Print(line.replace('\t', "    ")))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = self.stdout.execute(Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Arrow keys double as the letter bindings.
fn key_char(key: KeyEvent) -> Option<char> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Up => Some(keys::UP),
        KeyCode::Down => Some(keys::DOWN),
        KeyCode::Left => Some(keys::LEFT),
        KeyCode::Right => Some(keys::RIGHT),
        _ => None,
    }
}

impl Frontend for TerminalFrontend {
    fn draw(&mut self, piece: &Piece, layer: Layer) {
        let symbol = piece.display_symbol();
        if symbol == symbols::INVISIBLE {
            return;
        }
        for cell in piece.cells() {
            self.frame.put(layer, cell.x, cell.y, symbol);
        }
    }

    fn present(&mut self) -> Result<()> {
        for y in 0..GAME_SCREEN_HEIGHT {
            let row = self.frame.compose_row(y);
            self.stdout.queue(MoveTo(0, y as u16))?;
            self.stdout.queue(Print(row))?;
        }
        self.stdout.flush()?;
        self.frame.clear();
        Ok(())
    }

    fn show_status(&mut self, text: &str) -> Result<()> {
        let text: String = text
            .lines()
            .take(STATUS_SCREEN_HEIGHT as usize)
            .collect::<Vec<_>>()
            .join("\n");
        self.print_block(GAME_SCREEN_HEIGHT as u16, &text)
    }

    fn show_message(&mut self, text: &str) -> Result<()> {
        self.stdout.queue(Clear(ClearType::All))?;
        self.print_block(0, text)
    }

    fn read_key(&mut self, mode: InputMode) -> Result<Option<char>> {
        match mode {
            InputMode::Blocking => loop {
                if let Event::Key(key) = event::read()? {
                    if let Some(c) = key_char(key) {
                        return Ok(Some(c));
                    }
                }
            },
            InputMode::NonBlocking => {
                // Latest key wins when several arrived during one tick.
                let mut latest = None;
                while event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        if let Some(c) = key_char(key) {
                            latest = Some(c);
                        }
                    }
                }
                Ok(latest)
            }
        }
    }

    fn pause(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    #[test]
    fn higher_layers_cover_lower_ones() {
        let mut frame = FrameBuffer::new();
        frame.put(Layer::Background, 2, 0, '.');
        frame.put(Layer::Midground, 2, 0, '<');
        frame.put(Layer::Background, 4, 0, '#');
        let row = frame.compose_row(0);
        assert_eq!(&row[..6], "  < # ");
        frame.clear();
        assert_eq!(frame.compose_row(0).trim(), "");
    }

    #[test]
    fn cells_outside_the_screen_are_ignored() {
        let mut frame = FrameBuffer::new();
        frame.put(Layer::Background, -1, -1, '<');
        frame.put(Layer::Background, GAME_SCREEN_WIDTH, 0, '#');
        assert_eq!(frame.compose_row(0).trim(), "");
    }

    #[test]
    fn arrow_keys_map_to_movement_letters() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(key_char(press(KeyCode::Up)), Some('w'));
        assert_eq!(key_char(press(KeyCode::Left)), Some('a'));
        assert_eq!(key_char(press(KeyCode::Char('Q'))), Some('Q'));
        assert_eq!(key_char(press(KeyCode::Esc)), None);
    }
}
