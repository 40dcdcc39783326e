//! Game session - grid plus the active and upcoming pieces.
//!
//! Ties the pure pieces together: spawning, action dispatch, the gravity
//! tick, and the lock-and-respawn cycle. The shell drives this and only
//! reads state back for rendering.

use crate::core::grid::GameGrid;
use crate::core::rng::PieceGenerator;
use crate::core::tetromino::Tetromino;
use crate::types::{Direction, GameAction, DROP_INTERVAL_MS};

#[derive(Debug, Clone)]
pub struct Game {
    grid: GameGrid,
    generator: PieceGenerator,
    current: Tetromino,
    next: Tetromino,
    paused: bool,
    drop_timer_ms: u32,
    seed: u32,
}

impl Game {
    /// Start a session on a fresh grid with the given RNG seed.
    pub fn new(seed: u32, grid_h: usize, grid_w: usize) -> Self {
        let grid = GameGrid::new(grid_h, grid_w);
        let mut generator = PieceGenerator::new(seed);
        let current = Tetromino::spawn(generator.next_kind(), &grid, &mut generator);
        let next = Tetromino::spawn(generator.next_kind(), &grid, &mut generator);
        Self {
            grid,
            generator,
            current,
            next,
            paused: false,
            drop_timer_ms: 0,
            seed,
        }
    }

    pub fn grid(&self) -> &GameGrid {
        &self.grid
    }

    pub fn current(&self) -> &Tetromino {
        &self.current
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.grid.game_over()
    }

    pub fn score(&self) -> u32 {
        self.grid.score()
    }

    /// Apply a player action. After game over only Restart is accepted.
    pub fn apply_action(&mut self, action: GameAction) {
        if self.game_over() {
            if action == GameAction::Restart {
                self.restart();
            }
            return;
        }

        match action {
            GameAction::Pause => self.paused = !self.paused,
            GameAction::Restart => self.restart(),
            _ if self.paused => {}
            GameAction::MoveLeft => {
                self.current.try_move(Direction::Left, &self.grid);
            }
            GameAction::MoveRight => {
                self.current.try_move(Direction::Right, &self.grid);
            }
            GameAction::Rotate => {
                self.current.try_rotate(&self.grid);
            }
            GameAction::SoftDrop => self.step_down(),
            GameAction::HardDrop => {
                while self.current.try_move(Direction::Down, &self.grid) {}
                self.lock_current();
            }
        }
    }

    /// Advance timers; the active piece steps down once per drop interval.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.paused || self.game_over() {
            return;
        }
        self.drop_timer_ms += elapsed_ms;
        while self.drop_timer_ms >= DROP_INTERVAL_MS && !self.game_over() {
            self.drop_timer_ms -= DROP_INTERVAL_MS;
            self.step_down();
        }
    }

    /// One downward step; a failed step means the piece has landed.
    fn step_down(&mut self) {
        if !self.current.try_move(Direction::Down, &self.grid) {
            self.lock_current();
        }
    }

    /// Hand the piece's tiles to the grid, then promote the preview piece.
    fn lock_current(&mut self) {
        let (tiles, anchor) = self.current.min_bounded_tile_matrix();
        self.grid.update_grid(&tiles, anchor);
        if !self.grid.game_over() {
            self.current = self.next;
            self.next =
                Tetromino::spawn(self.generator.next_kind(), &self.grid, &mut self.generator);
        }
    }

    /// Fresh grid and pieces; the seed advances so replays differ.
    fn restart(&mut self) {
        *self = Game::new(
            self.seed.wrapping_add(1),
            self.grid.height(),
            self.grid.width(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GRID_HEIGHT, GRID_WIDTH, LOCK_SCORE};

    fn game() -> Game {
        Game::new(42, GRID_HEIGHT, GRID_WIDTH)
    }

    #[test]
    fn hard_drop_locks_and_scores() {
        let mut game = game();
        game.apply_action(GameAction::HardDrop);
        assert!(game.score() >= LOCK_SCORE);
        assert!(!game.game_over());
    }

    #[test]
    fn hard_drop_promotes_the_preview_piece() {
        let mut game = game();
        let preview_kind = game.next().kind();
        game.apply_action(GameAction::HardDrop);
        assert_eq!(game.current().kind(), preview_kind);
    }

    #[test]
    fn pause_blocks_movement() {
        let mut game = game();
        let anchor = game.current().anchor();
        game.apply_action(GameAction::Pause);
        game.apply_action(GameAction::MoveLeft);
        game.tick(10_000);
        assert_eq!(game.current().anchor(), anchor);
        assert!(game.paused());
    }

    #[test]
    fn tick_eventually_locks_a_piece() {
        let mut game = game();
        // Enough elapsed time to walk a piece to the floor and lock it.
        for _ in 0..200 {
            game.tick(1_000);
            if game.score() >= LOCK_SCORE {
                return;
            }
        }
        panic!("piece never locked");
    }

    #[test]
    fn endless_hard_drops_end_the_game() {
        let mut game = game();
        for _ in 0..10_000 {
            game.apply_action(GameAction::HardDrop);
            if game.game_over() {
                break;
            }
        }
        assert!(game.game_over(), "stacking forever must overflow the board");
    }

    #[test]
    fn restart_clears_the_board_after_game_over() {
        let mut game = game();
        for _ in 0..10_000 {
            game.apply_action(GameAction::HardDrop);
            if game.game_over() {
                break;
            }
        }
        assert!(game.game_over());

        game.apply_action(GameAction::Restart);
        assert!(!game.game_over());
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn same_seed_same_session() {
        let mut a = game();
        let mut b = game();
        for _ in 0..20 {
            a.apply_action(GameAction::HardDrop);
            b.apply_action(GameAction::HardDrop);
        }
        assert_eq!(a.score(), b.score());
        assert_eq!(a.current().kind(), b.current().kind());
    }
}
