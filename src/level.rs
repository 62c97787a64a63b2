use crate::constants::symbols;
use crate::types::{Coord, GhostId};

pub const CLASSIC_SHAPES: &str = include_str!("../assets/level_1_shapes.txt");
pub const CLASSIC_LOCATIONS: &str = include_str!("../assets/level_1_locations.txt");

/// A static character layout. Column index is x, line index is y.
#[derive(Clone, Copy, Debug)]
pub struct Layout<'a> {
    text: &'a str,
}

impl<'a> Layout<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn cells(&self) -> impl Iterator<Item = (Coord, char)> + 'a {
        self.text.lines().enumerate().flat_map(|(y, line)| {
            line.chars()
                .enumerate()
                .map(move |(x, c)| (Coord::new(x as i32, y as i32), c))
        })
    }

    pub fn coordinates(&self, symbol: char) -> Vec<Coord> {
        self.cells()
            .filter(|(_, c)| *c == symbol)
            .map(|(coord, _)| coord)
            .collect()
    }

    /// First coordinate bearing `symbol`, or `Coord::UNDEFINED` when the layout has none.
    pub fn coordinate(&self, symbol: char) -> Coord {
        self.cells()
            .find(|(_, c)| *c == symbol)
            .map(|(coord, _)| coord)
            .unwrap_or(Coord::UNDEFINED)
    }

    pub fn width(&self) -> i32 {
        self.text
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as i32
    }

    pub fn height(&self) -> i32 {
        self.text.lines().count() as i32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GhostSpawn {
    pub home: Coord,
    pub scatter_target: Coord,
}

/// Maze geometry and spawn points, fixed for the lifetime of a level.
#[derive(Clone, Debug)]
pub struct Level {
    pub width: i32,
    pub height: i32,
    pub walls: Vec<Coord>,
    pub invisible_walls: Vec<Coord>,
    pub points: Vec<Coord>,
    pub power_ups: Vec<Coord>,
    pub player_start: Coord,
    pub ghosts: [GhostSpawn; 4],
    pub left_warp: Coord,
    pub right_warp: Coord,
}

impl Level {
    pub fn classic() -> Self {
        Self::from_layouts(CLASSIC_SHAPES, CLASSIC_LOCATIONS)
    }

    pub fn from_layouts(shapes: &str, locations: &str) -> Self {
        let shapes = Layout::new(shapes);
        let locations = Layout::new(locations);
        let ghosts = GhostId::ALL.map(|id| {
            let (home_symbol, scatter_symbol) = spawn_symbols(id);
            GhostSpawn {
                home: required(&locations, home_symbol),
                scatter_target: required(&locations, scatter_symbol),
            }
        });

        Self {
            width: shapes.width().max(locations.width()),
            height: shapes.height().max(locations.height()),
            walls: shapes.coordinates(symbols::WALL),
            invisible_walls: shapes.coordinates(symbols::INVISIBLE_WALL),
            points: shapes.coordinates(symbols::POINT),
            power_ups: shapes.coordinates(symbols::POWER_UP),
            player_start: required(&locations, symbols::PLAYER),
            ghosts,
            left_warp: required(&locations, symbols::LEFT_WARP),
            right_warp: required(&locations, symbols::RIGHT_WARP),
        }
    }

    pub fn ghost(&self, id: GhostId) -> GhostSpawn {
        self.ghosts[id.index()]
    }
}

fn spawn_symbols(id: GhostId) -> (char, char) {
    match id {
        GhostId::Blinky => (symbols::BLINKY, symbols::BLINKY_FRIGHTENED),
        GhostId::Pinky => (symbols::PINKY, symbols::PINKY_FRIGHTENED),
        GhostId::Clyde => (symbols::CLYDE, symbols::CLYDE_FRIGHTENED),
        GhostId::Inky => (symbols::INKY, symbols::INKY_FRIGHTENED),
    }
}

fn required(layout: &Layout<'_>, symbol: char) -> Coord {
    let coord = layout.coordinate(symbol);
    if coord.is_undefined() {
        tracing::warn!(%symbol, "location symbol missing from layout, piece placed off-grid");
    }
    coord
}
