use rand::Rng;

use crate::error::MazeError;
use crate::goal::find_goal;
use crate::grid::{Direction, Grid, Pos};
use crate::maze::{generate, START};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    Won,
    Blocked,
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    player: Pos,
    goal: Pos,
    moves: u32,
    status: Status,
}

impl GameState {
    pub fn new(start: Pos, goal: Pos) -> Self {
        Self {
            player: start,
            goal,
            moves: 0,
            status: Status::Playing,
        }
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::Playing
    }

    pub fn attempt_move(&mut self, grid: &Grid, dir: Direction) -> MoveOutcome {
        if self.status != Status::Playing {
            return MoveOutcome::Ignored;
        }
        let Some(next) = self.player.step(dir).filter(|next| grid.is_open(*next)) else {
            tracing::trace!(from = ?self.player, ?dir, "move blocked");
            return MoveOutcome::Blocked;
        };

        self.player = next;
        self.moves += 1;
        if self.player == self.goal {
            self.status = Status::Won;
            tracing::info!(moves = self.moves, "goal reached");
            return MoveOutcome::Won;
        }
        MoveOutcome::Moved
    }

    pub fn reset(&mut self, start: Pos, goal: Pos) {
        *self = Self::new(start, goal);
    }

    /// Ends a game still in progress as lost. No core rule calls this.
    pub fn forfeit(&mut self) {
        if self.status == Status::Playing {
            self.status = Status::Lost;
        }
    }
}

/// Generates a maze and places the player at (0,0) and the goal at the
/// far end of a BFS from there.
pub fn new_game(
    width: usize,
    height: usize,
    rng: &mut (impl Rng + ?Sized),
) -> Result<(Grid, GameState), MazeError> {
    let grid = generate(width, height, rng)?;
    let goal = find_goal(&grid, START);
    Ok((grid, GameState::new(START, goal)))
}

#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    state: GameState,
}

impl Game {
    pub fn new(
        width: usize,
        height: usize,
        rng: &mut (impl Rng + ?Sized),
    ) -> Result<Self, MazeError> {
        let (grid, state) = new_game(width, height, rng)?;
        Ok(Self { grid, state })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn attempt_move(&mut self, dir: Direction) -> MoveOutcome {
        self.state.attempt_move(&self.grid, dir)
    }

    pub fn reset(&mut self, grid: Grid, start: Pos, goal: Pos) {
        debug_assert!(grid.is_open(start), "start {start:?} must be open");
        self.grid = grid;
        self.state.reset(start, goal);
    }

    pub fn restart(&mut self, rng: &mut (impl Rng + ?Sized)) -> Result<(), MazeError> {
        let (width, height) = (self.width(), self.height());
        let (grid, state) = new_game(width, height, rng)?;
        tracing::info!(width, height, goal = ?state.goal(), "restarted");
        self.reset(grid, state.player(), state.goal());
        Ok(())
    }

    pub fn forfeit(&mut self) {
        self.state.forfeit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn open_grid(cells: &[(usize, usize)], width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        for &(x, y) in cells {
            grid.set_open(Pos::new(x, y));
        }
        grid
    }

    #[test]
    fn move_into_wall_is_rejected() {
        let grid = open_grid(&[(0, 0), (1, 0)], 2, 2);
        let mut state = GameState::new(START, Pos::new(1, 0));

        assert_eq!(state.attempt_move(&grid, Direction::Down), MoveOutcome::Blocked);
        assert_eq!(state.attempt_move(&grid, Direction::Up), MoveOutcome::Blocked);
        assert_eq!(state.attempt_move(&grid, Direction::Left), MoveOutcome::Blocked);
        assert_eq!(state.player(), START);
        assert_eq!(state.moves(), 0);
        assert_eq!(state.status(), Status::Playing);
    }

    #[test]
    fn move_off_far_edge_is_rejected() {
        let grid = open_grid(&[(0, 0), (1, 0)], 2, 1);
        let mut state = GameState::new(Pos::new(1, 0), START);
        assert_eq!(state.attempt_move(&grid, Direction::Right), MoveOutcome::Blocked);
        assert_eq!(state.player(), Pos::new(1, 0));
    }

    #[test]
    fn accepted_moves_count_once() {
        let grid = open_grid(&[(0, 0), (1, 0), (2, 0)], 3, 1);
        let mut state = GameState::new(START, Pos::new(2, 0));

        assert_eq!(state.attempt_move(&grid, Direction::Right), MoveOutcome::Moved);
        assert_eq!(state.attempt_move(&grid, Direction::Left), MoveOutcome::Moved);
        assert_eq!(state.attempt_move(&grid, Direction::Left), MoveOutcome::Blocked);
        assert_eq!(state.moves(), 2);
        assert_eq!(state.player(), START);
    }

    #[test]
    fn reaching_goal_wins_and_freezes() {
        let grid = open_grid(&[(0, 0), (1, 0), (2, 0)], 3, 1);
        let mut state = GameState::new(START, Pos::new(2, 0));

        assert_eq!(state.attempt_move(&grid, Direction::Right), MoveOutcome::Moved);
        assert_eq!(state.status(), Status::Playing);
        assert_eq!(state.attempt_move(&grid, Direction::Right), MoveOutcome::Won);
        assert_eq!(state.status(), Status::Won);
        assert!(state.is_over());

        assert_eq!(state.attempt_move(&grid, Direction::Left), MoveOutcome::Ignored);
        assert_eq!(state.player(), Pos::new(2, 0));
        assert_eq!(state.moves(), 2);
    }

    #[test]
    fn forfeit_only_ends_live_games() {
        let grid = open_grid(&[(0, 0), (1, 0)], 2, 1);
        let mut state = GameState::new(START, Pos::new(1, 0));
        state.forfeit();
        assert_eq!(state.status(), Status::Lost);
        assert_eq!(state.attempt_move(&grid, Direction::Right), MoveOutcome::Ignored);

        let mut won = GameState::new(START, Pos::new(1, 0));
        won.attempt_move(&grid, Direction::Right);
        won.forfeit();
        assert_eq!(won.status(), Status::Won);
    }

    #[test]
    fn reset_clears_progress() {
        let grid = open_grid(&[(0, 0), (1, 0)], 2, 1);
        let mut state = GameState::new(START, Pos::new(1, 0));
        state.attempt_move(&grid, Direction::Right);
        state.reset(START, Pos::new(1, 0));
        assert_eq!(state, GameState::new(START, Pos::new(1, 0)));
    }

    #[test]
    fn new_game_places_goal_away_from_start() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let (grid, state) = new_game(5, 5, &mut rng).unwrap();
        assert!(grid.is_open(START));
        assert_eq!(state.player(), START);
        assert_ne!(state.goal(), START);
        assert!(grid.is_open(state.goal()));
        assert_eq!(state.moves(), 0);
    }

    #[test]
    fn restart_keeps_dimensions() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut game = Game::new(9, 7, &mut rng).unwrap();
        game.forfeit();
        assert_eq!(game.restart(&mut rng), Ok(()));
        assert_eq!((game.width(), game.height()), (9, 7));
        assert_eq!(game.state().status(), Status::Playing);
        assert_eq!(game.state().player(), START);
        assert!(game.grid().is_open(game.state().goal()));
    }
}
