use super::maze::Maze;
use crate::pieces::Ghost;
use crate::rng::Rng;
use crate::types::{Coord, Direction, GhostState, PowerUpMode, PursuitMode};

/// Where the player and the lead ghost are at the moment a ghost picks its target.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ChaseContext {
    pub player: Coord,
    pub player_momentum: Direction,
    pub blinky: Coord,
    pub shy_distance: i32,
}

/// Game-level modes a ghost's next state is resolved against.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ModeContext {
    pub pursuit: PursuitMode,
    pub power_up: PowerUpMode,
    pub power_up_scored: bool,
}

type ChaseTarget = fn(&Ghost, &ChaseContext) -> Coord;

/// Chase strategies indexed by `GhostId::index`.
const CHASE_TARGETS: [ChaseTarget; 4] = [blinky_target, pinky_target, clyde_target, inky_target];

fn blinky_target(_ghost: &Ghost, ctx: &ChaseContext) -> Coord {
    ctx.player
}

fn pinky_target(_ghost: &Ghost, ctx: &ChaseContext) -> Coord {
    ahead_of_player(ctx)
}

fn clyde_target(ghost: &Ghost, ctx: &ChaseContext) -> Coord {
    if ghost.location().scaled_distance(ctx.player) > ctx.shy_distance {
        ctx.player
    } else {
        ghost.scatter_target()
    }
}

fn inky_target(_ghost: &Ghost, ctx: &ChaseContext) -> Coord {
    ahead_of_player(ctx) - ctx.blinky
}

/// Two grid steps in front of the player along its momentum.
fn ahead_of_player(ctx: &ChaseContext) -> Coord {
    let step = ctx.player_momentum.offset();
    ctx.player + step + step
}

pub(crate) fn target(ghost: &Ghost, ctx: &ChaseContext, rng: &mut Rng) -> Coord {
    match ghost.state() {
        GhostState::Chase => CHASE_TARGETS[ghost.id().index()](ghost, ctx),
        GhostState::Scatter => ghost.scatter_target(),
        GhostState::Eaten => ghost.home(),
        GhostState::Frightened => ghost.location().step(rng.direction()),
        GhostState::TurnAround => ghost.location().step(ghost.momentum().opposite()),
    }
}

/// Picks the neighbor closest to `target`. Reversing is only allowed while turning
/// around, or when three solid walls leave a single way out.
pub(crate) fn choose_destination(ghost: &Ghost, target: Coord, maze: &Maze) -> Direction {
    let here = ghost.location();
    let state = ghost.state();
    let mut best: Option<(Direction, i32)> = None;

    for dir in Direction::CARDINALS {
        if dir == ghost.momentum().opposite() && state != GhostState::TurnAround {
            continue;
        }
        let cell = here.step(dir);
        if !maze.ghost_can_enter(cell, dir, state) {
            continue;
        }
        let distance = cell.scaled_distance(target);
        if best.map_or(true, |(_, closest)| distance < closest) {
            best = Some((dir, distance));
        }
    }

    match best {
        Some((dir, _)) => dir,
        None => corner_escape(here, maze),
    }
}

fn corner_escape(here: Coord, maze: &Maze) -> Direction {
    match maze.open_directions(here).as_slice() {
        [only] => *only,
        _ => Direction::Still,
    }
}

pub(crate) fn next_state(ghost: &Ghost, ctx: &ModeContext) -> GhostState {
    match ghost.state() {
        GhostState::Chase | GhostState::Scatter => {
            if ctx.power_up_scored {
                GhostState::TurnAround
            } else {
                ctx.pursuit.into()
            }
        }
        GhostState::TurnAround => {
            if ghost.is_eaten() {
                GhostState::Eaten
            } else {
                GhostState::Frightened
            }
        }
        GhostState::Frightened => {
            if ghost.is_eaten() {
                GhostState::Eaten
            } else if ctx.power_up == PowerUpMode::Off {
                ctx.pursuit.into()
            } else {
                GhostState::Frightened
            }
        }
        GhostState::Eaten => {
            if ghost.is_home() {
                ctx.pursuit.into()
            } else {
                GhostState::Eaten
            }
        }
    }
}
