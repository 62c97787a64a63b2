use std::ops::{Add, Sub};

use serde::Serialize;

/// Grid position. Horizontal steps are two columns wide, vertical steps one row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Returned by layout lookups for a symbol that does not appear in the layout.
    pub const UNDEFINED: Coord = Coord { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_undefined(self) -> bool {
        self == Self::UNDEFINED
    }

    pub fn step(self, dir: Direction) -> Self {
        self + dir.offset()
    }

    /// Raw squared euclidean distance.
    pub fn squared_distance(self, other: Coord) -> i32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Squared distance with the horizontal difference halved (integer division)
    /// before squaring, so one horizontal step weighs the same as one vertical step.
    pub fn scaled_distance(self, other: Coord) -> i32 {
        let dx = (self.x - other.x) / 2;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Momentum of a moving piece: the last direction it was commanded to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Still,
}

impl Direction {
    /// Evaluation order for pursuer destinations. Earlier entries win distance ties.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    pub fn offset(self) -> Coord {
        match self {
            Direction::Up => Coord::new(0, -1),
            Direction::Down => Coord::new(0, 1),
            Direction::Left => Coord::new(-2, 0),
            Direction::Right => Coord::new(2, 0),
            Direction::Still => Coord::new(0, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Still => Direction::Still,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostId {
    Blinky,
    Pinky,
    Clyde,
    Inky,
}

impl GhostId {
    /// Movement and capture-check order.
    pub const ALL: [GhostId; 4] = [GhostId::Blinky, GhostId::Pinky, GhostId::Clyde, GhostId::Inky];

    pub fn index(self) -> usize {
        match self {
            GhostId::Blinky => 0,
            GhostId::Pinky => 1,
            GhostId::Clyde => 2,
            GhostId::Inky => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostState {
    Chase,
    Scatter,
    TurnAround,
    Frightened,
    Eaten,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PursuitMode {
    Chase,
    Scatter,
}

impl From<PursuitMode> for GhostState {
    fn from(mode: PursuitMode) -> Self {
        match mode {
            PursuitMode::Chase => GhostState::Chase,
            PursuitMode::Scatter => GhostState::Scatter,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpMode {
    Off,
    Active,
}

/// Logical input after key mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Play,
    Quit,
    None,
}

impl Command {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Command::Up => Some(Direction::Up),
            Command::Down => Some(Direction::Down),
            Command::Left => Some(Direction::Left),
            Command::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Background,
    Midground,
    Foreground,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Wall,
    InvisibleWall,
    Collectible,
    PowerUp,
    Warp,
    Player,
    Pursuer(GhostId),
}

impl PieceKind {
    /// Scenery sits below the agents.
    pub fn layer(self) -> Layer {
        match self {
            PieceKind::Player | PieceKind::Pursuer(_) => Layer::Midground,
            _ => Layer::Background,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerView {
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub lives: u32,
    pub points: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct GhostView {
    pub id: GhostId,
    pub x: i32,
    pub y: i32,
    pub dir: Direction,
    pub state: GhostState,
}

#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub level: u32,
    #[serde(rename = "pursuitMode")]
    pub pursuit_mode: PursuitMode,
    #[serde(rename = "pursuitTicks")]
    pub pursuit_ticks: u32,
    #[serde(rename = "powerUpMode")]
    pub power_up_mode: PowerUpMode,
    #[serde(rename = "powerUpCountdown")]
    pub power_up_countdown: u32,
    pub player: PlayerView,
    pub ghosts: Vec<GhostView>,
    #[serde(rename = "pointsLeft")]
    pub points_left: usize,
    #[serde(rename = "powerUpsLeft")]
    pub power_ups_left: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuntimeEvent {
    PointEaten { x: i32, y: i32 },
    PowerUpEaten { x: i32, y: i32 },
    GhostEaten { ghost: GhostId },
    PlayerCaught { by: GhostId, lives: u32 },
    PursuitModeChanged { mode: PursuitMode },
    PowerUpExpired,
    LevelCleared { level: u32 },
    GameOver { points: u32, level: u32 },
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct GameSummary {
    pub points: u32,
    pub level: u32,
    pub ticks: u64,
    #[serde(rename = "ghostsEaten")]
    pub ghosts_eaten: u32,
    #[serde(rename = "livesLost")]
    pub lives_lost: u32,
    #[serde(rename = "gamesPlayed")]
    pub games_played: u32,
}
