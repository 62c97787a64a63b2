use tracing::{debug, info};

use crate::config::Settings;
use crate::constants::{symbols, STARTING_LEVEL};
use crate::level::Level;
use crate::pieces::{CollectibleField, Ghost, Piece, Player};
use crate::rng::Rng;
use crate::types::{
    Command, Direction, GhostId, GhostView, Layer, PieceKind, PlayerView, PowerUpMode,
    RuntimeEvent, Snapshot,
};

mod ghost_ai;
mod maze;
mod scheduler;

pub use self::maze::Maze;
pub use self::scheduler::ModeScheduler;

use self::ghost_ai::{ChaseContext, ModeContext};

/// What a tick ended with. The orchestrator decides which animation to play.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub player_caught: bool,
    pub level_cleared: bool,
    pub game_over: bool,
}

/// Which pieces a blink animation toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkGroup {
    /// Walls and collectibles.
    Scenery,
    /// Player and ghosts.
    Agents,
    AgentsAndWalls,
    Everything,
}

#[derive(Clone, Debug, Default)]
struct EngineStats {
    ghosts_eaten: u32,
    lives_lost: u32,
}

#[derive(Clone, Debug)]
pub struct GameEngine {
    settings: Settings,
    maze: Maze,
    rng: Rng,
    player: Player,
    ghosts: [Ghost; 4],
    points: CollectibleField,
    power_ups: CollectibleField,
    scheduler: ModeScheduler,
    level: u32,
    tick_counter: u64,
    events: Vec<RuntimeEvent>,
    stats: EngineStats,
}

impl GameEngine {
    pub fn new(settings: Settings, seed: u32) -> Self {
        Self::with_level(&Level::classic(), settings, seed)
    }

    pub fn with_level(level: &Level, settings: Settings, seed: u32) -> Self {
        let player = Player::new(level.player_start, settings.start_lives, settings.start_points);
        let ghosts = GhostId::ALL.map(|id| {
            let spawn = level.ghost(id);
            Ghost::new(id, spawn.home, spawn.scatter_target, settings.ghost_value)
        });
        let points = CollectibleField::new(
            PieceKind::Collectible,
            level.points.clone(),
            symbols::POINT,
            settings.point_value,
        );
        let power_ups = CollectibleField::new(
            PieceKind::PowerUp,
            level.power_ups.clone(),
            symbols::POWER_UP,
            settings.power_up_value,
        );

        Self {
            maze: Maze::new(level),
            rng: Rng::new(seed),
            player,
            ghosts,
            points,
            power_ups,
            scheduler: ModeScheduler::new(&settings),
            level: STARTING_LEVEL,
            tick_counter: 0,
            events: Vec::new(),
            stats: EngineStats::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghost(&self, id: GhostId) -> &Ghost {
        &self.ghosts[id.index()]
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn scheduler(&self) -> &ModeScheduler {
        &self.scheduler
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn tick(&self) -> u64 {
        self.tick_counter
    }

    pub fn power_up_active(&self) -> bool {
        self.scheduler.power_up_mode() == PowerUpMode::Active
    }

    pub fn points_left(&self) -> usize {
        self.points.remaining()
    }

    pub fn power_ups_left(&self) -> usize {
        self.power_ups.remaining()
    }

    pub fn ghosts_eaten(&self) -> u32 {
        self.stats.ghosts_eaten
    }

    pub fn lives_lost(&self) -> u32 {
        self.stats.lives_lost
    }

    /// Runs one tick of simulation: player move, captures, ghost moves, captures
    /// again, scoring, then the power-up timer, ghost states and pursuit timer.
    /// Transient flags stay set until `end_tick`.
    pub fn step(&mut self, command: Command) -> TickOutcome {
        self.tick_counter += 1;

        self.move_player(command);
        self.check_captures();
        if !self.player.is_eaten() {
            self.move_ghosts();
            self.check_captures();
        }
        if !self.player.is_eaten() {
            self.score_collectibles();
        }
        self.update_modes();

        let player_caught = self.player.is_eaten();
        let game_over = player_caught && self.player.lives() == 0;
        if game_over {
            info!(
                points = self.player.points(),
                level = self.level,
                tick = self.tick_counter,
                "game over"
            );
            self.events.push(RuntimeEvent::GameOver {
                points: self.player.points(),
                level: self.level,
            });
        }

        TickOutcome {
            player_caught,
            level_cleared: self.points.all_eaten(),
            game_over,
        }
    }

    /// Clears the per-tick eaten/scored flags and advances the power-up blink.
    pub fn end_tick(&mut self) {
        self.player.clear_eaten();
        for ghost in &mut self.ghosts {
            ghost.clear_eaten();
        }
        self.points.clear_scored();
        self.power_ups.clear_scored();
        if self.scheduler.advance_blink() {
            self.power_ups.piece_mut().blink();
        }
    }

    /// Sends every agent home after a capture. Ghosts restart in scatter.
    pub fn reset_positions(&mut self) {
        self.player.mover_mut().jump_home(Player::START_MOMENTUM);
        self.player.clear_eaten();
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
    }

    /// Moves to the next level: agents home, collectibles restored, score and lives kept.
    pub fn advance_level(&mut self) {
        let cleared = self.level;
        self.player.mover_mut().jump_home(Player::START_MOMENTUM);
        self.player.clear_eaten();
        for ghost in &mut self.ghosts {
            ghost.mover_mut().jump_home(Direction::Still);
            ghost.clear_eaten();
        }
        self.points.reset();
        self.power_ups.reset();
        self.level += 1;
        info!(level = cleared, points = self.player.points(), "level cleared");
        self.events.push(RuntimeEvent::LevelCleared { level: cleared });
    }

    /// Full restart for a new game. Summary counters survive.
    pub fn reset_game(&mut self) {
        self.player.reset();
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
        self.points.reset();
        self.power_ups.reset();
        self.scheduler.reset();
        self.level = STARTING_LEVEL;
        self.set_all_visible();
    }

    pub fn blink(&mut self, group: BlinkGroup) {
        let (walls, collectibles, agents) = match group {
            BlinkGroup::Scenery => (true, true, false),
            BlinkGroup::Agents => (false, false, true),
            BlinkGroup::AgentsAndWalls => (true, false, true),
            BlinkGroup::Everything => (true, true, true),
        };
        if walls {
            self.maze.walls_mut().blink();
        }
        if collectibles {
            self.points.piece_mut().blink();
            self.power_ups.piece_mut().blink();
        }
        if agents {
            self.player.mover_mut().piece_mut().blink();
            for ghost in &mut self.ghosts {
                ghost.mover_mut().piece_mut().blink();
            }
        }
    }

    /// Every drawable piece with its layer, background first.
    pub fn pieces(&self) -> Vec<(&Piece, Layer)> {
        [
            self.maze.walls(),
            self.points.piece(),
            self.power_ups.piece(),
            self.player.piece(),
        ]
        .into_iter()
        .chain(self.ghosts.iter().map(Ghost::piece))
        .map(|piece| (piece, piece.kind().layer()))
        .collect()
    }

    pub fn status_text(&self) -> String {
        format!(
            "Level: {} \nScore: {} \nLives: {} \n",
            self.level,
            self.player.points(),
            self.player.lives()
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick_counter,
            level: self.level,
            pursuit_mode: self.scheduler.pursuit_mode(),
            pursuit_ticks: self.scheduler.pursuit_ticks(),
            power_up_mode: self.scheduler.power_up_mode(),
            power_up_countdown: self.scheduler.power_up_countdown(),
            player: PlayerView {
                x: self.player.location().x,
                y: self.player.location().y,
                dir: self.player.momentum(),
                lives: self.player.lives(),
                points: self.player.points(),
            },
            ghosts: self
                .ghosts
                .iter()
                .map(|ghost| GhostView {
                    id: ghost.id(),
                    x: ghost.location().x,
                    y: ghost.location().y,
                    dir: ghost.momentum(),
                    state: ghost.state(),
                })
                .collect(),
            points_left: self.points.remaining(),
            power_ups_left: self.power_ups.remaining(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<RuntimeEvent> {
        std::mem::take(&mut self.events)
    }

    fn move_player(&mut self, command: Command) {
        let here = self.player.location();
        let momentum = self.player.momentum();
        let chosen = command
            .direction()
            .filter(|dir| self.maze.player_can_enter(here.step(*dir)))
            .or_else(|| {
                Some(momentum).filter(|dir| {
                    *dir != Direction::Still && self.maze.player_can_enter(here.step(*dir))
                })
            });

        if let Some(dir) = chosen {
            self.player.mover_mut().step(dir);
            if let Some(destination) = self.maze.warp_destination(self.player.piece()) {
                self.player.mover_mut().jump(destination);
            }
        }
    }

    fn move_ghosts(&mut self) {
        for id in GhostId::ALL {
            let ctx = ChaseContext {
                player: self.player.location(),
                player_momentum: self.player.momentum(),
                blinky: self.ghosts[GhostId::Blinky.index()].location(),
                shy_distance: self.settings.clyde_shy_distance,
            };
            let ghost = &mut self.ghosts[id.index()];
            let target = ghost_ai::target(ghost, &ctx, &mut self.rng);
            let dir = ghost_ai::choose_destination(ghost, target, &self.maze);
            if dir == Direction::Still {
                continue;
            }
            ghost.mover_mut().step(dir);
            if let Some(destination) = self.maze.warp_destination(ghost.piece()) {
                ghost.mover_mut().jump(destination);
            }
        }
    }

    /// Dangerous ghosts take a life (once per tick, first ghost in order wins).
    /// Only a player still standing eats the vulnerable ghosts it overlaps.
    fn check_captures(&mut self) {
        for ghost in &self.ghosts {
            if ghost.catches(&self.player) && self.player.get_caught() {
                self.stats.lives_lost += 1;
                debug!(by = ?ghost.id(), lives = self.player.lives(), "player caught");
                self.events.push(RuntimeEvent::PlayerCaught {
                    by: ghost.id(),
                    lives: self.player.lives(),
                });
            }
        }
        if self.player.is_eaten() {
            return;
        }

        // Every vulnerable ghost on the player's cell is eaten in the same check.
        for ghost in &mut self.ghosts {
            if ghost.caught_by(&self.player) && !ghost.is_eaten() {
                ghost.mark_eaten();
                self.player.add_points(ghost.value());
                self.stats.ghosts_eaten += 1;
                debug!(ghost = ?ghost.id(), "ghost eaten");
                self.events.push(RuntimeEvent::GhostEaten { ghost: ghost.id() });
            }
        }
    }

    fn score_collectibles(&mut self) {
        if let Some(cell) = self.points.try_score(self.player.piece()) {
            self.player.add_points(self.points.value());
            self.events.push(RuntimeEvent::PointEaten {
                x: cell.x,
                y: cell.y,
            });
        }
        if let Some(cell) = self.power_ups.try_score(self.player.piece()) {
            self.player.add_points(self.power_ups.value());
            debug!(x = cell.x, y = cell.y, "power-up eaten");
            self.events.push(RuntimeEvent::PowerUpEaten {
                x: cell.x,
                y: cell.y,
            });
        }
    }

    fn update_modes(&mut self) {
        let power_up_scored = self.power_ups.scored();
        if self.scheduler.advance_power_up(power_up_scored) {
            debug!(tick = self.tick_counter, "power-up expired");
            self.events.push(RuntimeEvent::PowerUpExpired);
        }

        let modes = ModeContext {
            pursuit: self.scheduler.pursuit_mode(),
            power_up: self.scheduler.power_up_mode(),
            power_up_scored,
        };
        for ghost in &mut self.ghosts {
            let next = ghost_ai::next_state(ghost, &modes);
            if next != ghost.state() {
                ghost.set_state(next);
            }
        }

        if let Some(mode) = self.scheduler.advance_pursuit() {
            debug!(?mode, tick = self.tick_counter, "pursuit mode changed");
            self.events.push(RuntimeEvent::PursuitModeChanged { mode });
        }
    }

    fn set_all_visible(&mut self) {
        self.maze.walls_mut().set_visible(true);
        self.points.piece_mut().set_visible(true);
        self.power_ups.piece_mut().set_visible(true);
        self.player.mover_mut().piece_mut().set_visible(true);
        for ghost in &mut self.ghosts {
            ghost.mover_mut().piece_mut().set_visible(true);
        }
    }
}
