use crate::constants::symbols;
use crate::types::{Coord, Direction, GhostId, GhostState, PieceKind};

/// Anything drawn on the board: a location plus a shape of offsets from it.
#[derive(Clone, Debug)]
pub struct Piece {
    kind: PieceKind,
    location: Coord,
    shape: Vec<Coord>,
    symbol: char,
    visible: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, location: Coord, shape: Vec<Coord>, symbol: char) -> Self {
        Self {
            kind,
            location,
            shape,
            symbol,
            visible: true,
        }
    }

    /// Single-cell piece at `location`.
    pub fn single(kind: PieceKind, location: Coord, symbol: char) -> Self {
        Self::new(kind, location, vec![Coord::default()], symbol)
    }

    /// Piece anchored at the origin whose shape is the given absolute cells.
    pub fn scenery(kind: PieceKind, cells: Vec<Coord>, symbol: char) -> Self {
        Self::new(kind, Coord::default(), cells, symbol)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn location(&self) -> Coord {
        self.location
    }

    pub fn shape(&self) -> &[Coord] {
        &self.shape
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Symbol the render step should draw this frame.
    pub fn display_symbol(&self) -> char {
        if self.visible {
            self.symbol
        } else {
            symbols::INVISIBLE
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn blink(&mut self) {
        self.visible = !self.visible;
    }

    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.shape.iter().map(move |offset| *offset + self.location)
    }

    pub fn occupies(&self, cell: Coord) -> bool {
        self.cells().any(|mine| mine == cell)
    }

    pub fn overlaps(&self, other: &Piece) -> bool {
        self.cells().any(|mine| other.occupies(mine))
    }

    fn set_symbol(&mut self, symbol: char) {
        self.symbol = symbol;
    }

    fn relocate(&mut self, location: Coord) {
        self.location = location;
    }

    fn remove_offset(&mut self, offset: Coord) {
        if let Some(idx) = self.shape.iter().position(|candidate| *candidate == offset) {
            self.shape.remove(idx);
        }
    }

    fn set_shape(&mut self, shape: Vec<Coord>) {
        self.shape = shape;
    }
}

/// A piece that walks the grid and remembers its last commanded direction.
#[derive(Clone, Debug)]
pub struct Mover {
    piece: Piece,
    momentum: Direction,
    home: Coord,
}

impl Mover {
    pub fn new(kind: PieceKind, home: Coord, symbol: char, momentum: Direction) -> Self {
        Self {
            piece: Piece::single(kind, home, symbol),
            momentum,
            home,
        }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn piece_mut(&mut self) -> &mut Piece {
        &mut self.piece
    }

    pub fn location(&self) -> Coord {
        self.piece.location()
    }

    pub fn momentum(&self) -> Direction {
        self.momentum
    }

    pub fn home(&self) -> Coord {
        self.home
    }

    /// One grid step: two columns horizontally, one row vertically.
    pub fn step(&mut self, dir: Direction) {
        let next = self.location().step(dir);
        self.piece.relocate(next);
        self.momentum = dir;
    }

    /// Relocate without walking, keeping momentum.
    pub fn jump(&mut self, coord: Coord) {
        self.piece.relocate(coord);
    }

    pub fn jump_with(&mut self, coord: Coord, momentum: Direction) {
        self.piece.relocate(coord);
        self.momentum = momentum;
    }

    pub fn jump_home(&mut self, momentum: Direction) {
        self.jump_with(self.home, momentum);
    }

    pub fn is_home(&self) -> bool {
        self.location() == self.home
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    mover: Mover,
    lives: u32,
    points: u32,
    eaten: bool,
    start_lives: u32,
    start_points: u32,
}

impl Player {
    pub const START_MOMENTUM: Direction = Direction::Left;

    pub fn new(home: Coord, start_lives: u32, start_points: u32) -> Self {
        Self {
            mover: Mover::new(PieceKind::Player, home, symbols::PLAYER, Self::START_MOMENTUM),
            lives: start_lives,
            points: start_points,
            eaten: false,
            start_lives,
            start_points,
        }
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut Mover {
        &mut self.mover
    }

    pub fn piece(&self) -> &Piece {
        self.mover.piece()
    }

    pub fn location(&self) -> Coord {
        self.mover.location()
    }

    pub fn momentum(&self) -> Direction {
        self.mover.momentum()
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn add_points(&mut self, amount: u32) {
        self.points = self.points.saturating_add(amount);
    }

    pub fn is_eaten(&self) -> bool {
        self.eaten
    }

    /// Marks the player caught and takes a life. A no-op if already caught this tick.
    pub fn get_caught(&mut self) -> bool {
        if self.eaten {
            return false;
        }
        self.eaten = true;
        self.lives = self.lives.saturating_sub(1);
        true
    }

    pub fn clear_eaten(&mut self) {
        self.eaten = false;
    }

    /// Back to the starting lives, points and position.
    pub fn reset(&mut self) {
        self.mover.jump_home(Self::START_MOMENTUM);
        self.lives = self.start_lives;
        self.points = self.start_points;
        self.eaten = false;
    }
}

#[derive(Clone, Debug)]
pub struct Ghost {
    id: GhostId,
    mover: Mover,
    state: GhostState,
    eaten: bool,
    value: u32,
    scatter_target: Coord,
}

impl Ghost {
    pub fn new(id: GhostId, home: Coord, scatter_target: Coord, value: u32) -> Self {
        let mut ghost = Self {
            id,
            mover: Mover::new(PieceKind::Pursuer(id), home, chase_symbol(id), Direction::Still),
            state: GhostState::Scatter,
            eaten: false,
            value,
            scatter_target,
        };
        ghost.set_state(GhostState::Scatter);
        ghost
    }

    pub fn id(&self) -> GhostId {
        self.id
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut Mover {
        &mut self.mover
    }

    pub fn piece(&self) -> &Piece {
        self.mover.piece()
    }

    pub fn location(&self) -> Coord {
        self.mover.location()
    }

    pub fn momentum(&self) -> Direction {
        self.mover.momentum()
    }

    pub fn state(&self) -> GhostState {
        self.state
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn scatter_target(&self) -> Coord {
        self.scatter_target
    }

    pub fn home(&self) -> Coord {
        self.mover.home()
    }

    pub fn is_home(&self) -> bool {
        self.mover.is_home()
    }

    pub fn set_state(&mut self, state: GhostState) {
        self.state = state;
        let symbol = match state {
            GhostState::Chase | GhostState::Scatter => chase_symbol(self.id),
            GhostState::Frightened | GhostState::TurnAround => frightened_symbol(self.id),
            GhostState::Eaten => symbols::GHOST_EATEN,
        };
        self.mover.piece_mut().set_symbol(symbol);
    }

    /// Only chase and scatter ghosts are dangerous.
    pub fn is_dangerous(&self) -> bool {
        matches!(self.state, GhostState::Chase | GhostState::Scatter)
    }

    /// Only frightened and turning ghosts can be eaten.
    pub fn is_vulnerable(&self) -> bool {
        matches!(self.state, GhostState::Frightened | GhostState::TurnAround)
    }

    pub fn catches(&self, player: &Player) -> bool {
        self.is_dangerous() && self.piece().overlaps(player.piece())
    }

    pub fn caught_by(&self, player: &Player) -> bool {
        self.is_vulnerable() && self.piece().overlaps(player.piece())
    }

    pub fn is_eaten(&self) -> bool {
        self.eaten
    }

    pub fn mark_eaten(&mut self) {
        self.eaten = true;
    }

    pub fn clear_eaten(&mut self) {
        self.eaten = false;
    }

    pub fn reset(&mut self) {
        self.mover.jump_home(Direction::Still);
        self.set_state(GhostState::Scatter);
        self.eaten = false;
    }
}

fn chase_symbol(id: GhostId) -> char {
    match id {
        GhostId::Blinky => symbols::BLINKY,
        GhostId::Pinky => symbols::PINKY,
        GhostId::Clyde => symbols::CLYDE,
        GhostId::Inky => symbols::INKY,
    }
}

fn frightened_symbol(id: GhostId) -> char {
    match id {
        GhostId::Blinky => symbols::BLINKY_FRIGHTENED,
        GhostId::Pinky => symbols::PINKY_FRIGHTENED,
        GhostId::Clyde => symbols::CLYDE_FRIGHTENED,
        GhostId::Inky => symbols::INKY_FRIGHTENED,
    }
}

/// Collectibles that disappear cell by cell as the player eats them.
#[derive(Clone, Debug)]
pub struct CollectibleField {
    piece: Piece,
    initial: Vec<Coord>,
    value: u32,
    scored: bool,
}

impl CollectibleField {
    pub fn new(kind: PieceKind, cells: Vec<Coord>, symbol: char, value: u32) -> Self {
        Self {
            piece: Piece::scenery(kind, cells.clone(), symbol),
            initial: cells,
            value,
            scored: false,
        }
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn piece_mut(&mut self) -> &mut Piece {
        &mut self.piece
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn remaining(&self) -> usize {
        self.piece.shape().len()
    }

    pub fn all_eaten(&self) -> bool {
        self.piece.shape().is_empty()
    }

    /// Consumes the first remaining cell under `eater`, returning its absolute coordinate.
    pub fn try_score(&mut self, eater: &Piece) -> Option<Coord> {
        let location = self.piece.location();
        let hit = self
            .piece
            .shape()
            .iter()
            .copied()
            .find(|offset| eater.occupies(*offset + location));
        match hit {
            Some(offset) => {
                self.piece.remove_offset(offset);
                self.scored = true;
                Some(offset + location)
            }
            None => None,
        }
    }

    pub fn scored(&self) -> bool {
        self.scored
    }

    pub fn clear_scored(&mut self) {
        self.scored = false;
    }

    /// Restores every consumed cell.
    pub fn reset(&mut self) {
        self.piece.set_shape(self.initial.clone());
        self.scored = false;
    }
}

/// Two linked markers: stepping onto one moves the agent to the other.
#[derive(Clone, Debug)]
pub struct WarpPair {
    left: Piece,
    right: Piece,
}

impl WarpPair {
    pub fn new(left: Coord, right: Coord) -> Self {
        Self {
            left: Piece::single(PieceKind::Warp, left, symbols::INVISIBLE),
            right: Piece::single(PieceKind::Warp, right, symbols::INVISIBLE),
        }
    }

    pub fn destination(&self, agent: &Piece) -> Option<Coord> {
        if agent.overlaps(&self.left) {
            Some(self.right.location())
        } else if agent.overlaps(&self.right) {
            Some(self.left.location())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_compares_absolute_cells() {
        let wide = Piece::new(
            PieceKind::Wall,
            Coord::new(10, 5),
            vec![Coord::new(0, 0), Coord::new(2, 0)],
            '#',
        );
        let dot = Piece::single(PieceKind::Collectible, Coord::new(12, 5), '.');
        let far = Piece::single(PieceKind::Collectible, Coord::new(2, 0), '.');
        assert!(wide.overlaps(&dot));
        assert!(dot.overlaps(&wide));
        assert!(!wide.overlaps(&far));
        assert!(wide.occupies(Coord::new(10, 5)));
        assert!(!wide.occupies(Coord::new(11, 5)));
    }

    #[test]
    fn hidden_piece_draws_invisible_symbol() {
        let mut wall = Piece::single(PieceKind::Wall, Coord::default(), '#');
        assert_eq!(wall.display_symbol(), '#');
        wall.blink();
        assert_eq!(wall.display_symbol(), symbols::INVISIBLE);
        wall.blink();
        assert_eq!(wall.display_symbol(), '#');
    }

    #[test]
    fn step_sets_momentum_and_jump_keeps_it() {
        let mut mover = Mover::new(PieceKind::Player, Coord::new(10, 10), '<', Direction::Left);
        mover.step(Direction::Up);
        assert_eq!(mover.location(), Coord::new(10, 9));
        assert_eq!(mover.momentum(), Direction::Up);
        mover.jump(Coord::new(40, 3));
        assert_eq!(mover.momentum(), Direction::Up);
        assert!(!mover.is_home());
        mover.jump_home(Direction::Still);
        assert!(mover.is_home());
        assert_eq!(mover.momentum(), Direction::Still);
    }

    #[test]
    fn player_is_caught_at_most_once_until_cleared() {
        let mut player = Player::new(Coord::new(4, 4), 3, 0);
        assert!(player.get_caught());
        assert!(!player.get_caught());
        assert_eq!(player.lives(), 2);
        player.clear_eaten();
        assert!(player.get_caught());
        assert_eq!(player.lives(), 1);
    }

    #[test]
    fn player_reset_restores_start_values() {
        let mut player = Player::new(Coord::new(4, 4), 3, 0);
        player.add_points(55);
        player.get_caught();
        player.mover_mut().step(Direction::Down);
        player.reset();
        assert_eq!(player.lives(), 3);
        assert_eq!(player.points(), 0);
        assert_eq!(player.location(), Coord::new(4, 4));
        assert_eq!(player.momentum(), Direction::Left);
        assert!(!player.is_eaten());
    }

    #[test]
    fn ghost_symbol_tracks_state() {
        let mut ghost = Ghost::new(GhostId::Pinky, Coord::new(8, 8), Coord::new(0, 0), 20);
        assert_eq!(ghost.state(), GhostState::Scatter);
        assert_eq!(ghost.piece().symbol(), symbols::PINKY);
        ghost.set_state(GhostState::TurnAround);
        assert_eq!(ghost.piece().symbol(), symbols::PINKY_FRIGHTENED);
        ghost.set_state(GhostState::Frightened);
        assert_eq!(ghost.piece().symbol(), symbols::PINKY_FRIGHTENED);
        ghost.set_state(GhostState::Eaten);
        assert_eq!(ghost.piece().symbol(), symbols::GHOST_EATEN);
        ghost.set_state(GhostState::Chase);
        assert_eq!(ghost.piece().symbol(), symbols::PINKY);
    }

    #[test]
    fn ghost_danger_depends_on_state() {
        let player = Player::new(Coord::new(8, 8), 3, 0);
        let mut ghost = Ghost::new(GhostId::Blinky, Coord::new(8, 8), Coord::new(0, 0), 20);
        assert!(ghost.catches(&player));
        assert!(!ghost.caught_by(&player));
        ghost.set_state(GhostState::Frightened);
        assert!(!ghost.catches(&player));
        assert!(ghost.caught_by(&player));
        ghost.set_state(GhostState::Eaten);
        assert!(!ghost.catches(&player));
        assert!(!ghost.caught_by(&player));
    }

    #[test]
    fn collectible_cells_are_consumed_once_and_restored_on_reset() {
        let cells = vec![Coord::new(2, 1), Coord::new(4, 1)];
        let mut field = CollectibleField::new(PieceKind::Collectible, cells, '.', 5);
        let eater = Piece::single(PieceKind::Player, Coord::new(2, 1), '<');

        assert_eq!(field.try_score(&eater), Some(Coord::new(2, 1)));
        assert!(field.scored());
        assert_eq!(field.remaining(), 1);
        field.clear_scored();
        assert_eq!(field.try_score(&eater), None);
        assert!(!field.scored());

        field.reset();
        assert_eq!(field.remaining(), 2);
        assert!(!field.all_eaten());
    }

    #[test]
    fn warp_pair_links_both_ends() {
        let warps = WarpPair::new(Coord::new(2, 9), Coord::new(54, 9));
        let at_left = Piece::single(PieceKind::Player, Coord::new(2, 9), '<');
        let at_right = Piece::single(PieceKind::Player, Coord::new(54, 9), '<');
        let elsewhere = Piece::single(PieceKind::Player, Coord::new(4, 9), '<');
        assert_eq!(warps.destination(&at_left), Some(Coord::new(54, 9)));
        assert_eq!(warps.destination(&at_right), Some(Coord::new(2, 9)));
        assert_eq!(warps.destination(&elsewhere), None);
    }
}
