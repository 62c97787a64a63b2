use crate::constants::symbols;
use crate::level::Level;
use crate::pieces::{Piece, WarpPair};
use crate::types::{Coord, Direction, GhostState, PieceKind};

/// Static maze geometry and the collision queries movement is decided by.
#[derive(Clone, Debug)]
pub struct Maze {
    walls: Piece,
    invisible_walls: Piece,
    warps: WarpPair,
}

impl Maze {
    pub fn new(level: &Level) -> Self {
        Self {
            walls: Piece::scenery(PieceKind::Wall, level.walls.clone(), symbols::WALL),
            invisible_walls: Piece::scenery(
                PieceKind::InvisibleWall,
                level.invisible_walls.clone(),
                symbols::INVISIBLE,
            ),
            warps: WarpPair::new(level.left_warp, level.right_warp),
        }
    }

    pub fn walls(&self) -> &Piece {
        &self.walls
    }

    pub fn walls_mut(&mut self) -> &mut Piece {
        &mut self.walls
    }

    pub fn is_wall(&self, cell: Coord) -> bool {
        self.walls.occupies(cell)
    }

    pub fn is_invisible_wall(&self, cell: Coord) -> bool {
        self.invisible_walls.occupies(cell)
    }

    /// The player is stopped by both kinds of wall.
    pub fn player_can_enter(&self, cell: Coord) -> bool {
        !self.is_wall(cell) && !self.is_invisible_wall(cell)
    }

    /// Ghosts may always rise through invisible walls; only eaten ghosts may sink through them.
    pub fn ghost_can_enter(&self, cell: Coord, dir: Direction, state: GhostState) -> bool {
        if self.is_wall(cell) {
            return false;
        }
        if !self.is_invisible_wall(cell) {
            return true;
        }
        match dir {
            Direction::Up => true,
            Direction::Down => state == GhostState::Eaten,
            _ => false,
        }
    }

    /// Directions whose neighbor is not a solid wall, in evaluation order.
    pub fn open_directions(&self, cell: Coord) -> Vec<Direction> {
        Direction::CARDINALS
            .into_iter()
            .filter(|dir| !self.is_wall(cell.step(*dir)))
            .collect()
    }

    pub fn warp_destination(&self, agent: &Piece) -> Option<Coord> {
        self.warps.destination(agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: &str = "\
#########
#   x   #
#       #
#########
";

    fn maze() -> Maze {
        Maze::new(&Level::from_layouts(SHAPES, ""))
    }

    #[test]
    fn player_is_blocked_by_both_wall_kinds() {
        let maze = maze();
        assert!(!maze.player_can_enter(Coord::new(0, 1)));
        assert!(!maze.player_can_enter(Coord::new(4, 1)));
        assert!(maze.player_can_enter(Coord::new(2, 1)));
    }

    #[test]
    fn invisible_walls_only_open_upward_or_downward_when_eaten() {
        let maze = maze();
        let gate = Coord::new(4, 1);
        assert!(maze.ghost_can_enter(gate, Direction::Up, GhostState::Chase));
        assert!(maze.ghost_can_enter(gate, Direction::Up, GhostState::Frightened));
        assert!(!maze.ghost_can_enter(gate, Direction::Down, GhostState::Chase));
        assert!(maze.ghost_can_enter(gate, Direction::Down, GhostState::Eaten));
        assert!(!maze.ghost_can_enter(gate, Direction::Left, GhostState::Eaten));
        assert!(!maze.ghost_can_enter(Coord::new(0, 1), Direction::Up, GhostState::Eaten));
    }

    #[test]
    fn open_directions_ignore_invisible_walls() {
        let maze = maze();
        assert_eq!(
            maze.open_directions(Coord::new(2, 1)),
            vec![Direction::Right, Direction::Down]
        );
    }
}
