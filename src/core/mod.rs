//! Core game logic - pure, deterministic, and testable
//!
//! Everything under this module is free of I/O and timing so the whole
//! rule set can be unit-tested headless:
//!
//! - [`tile`]: numbered 2048-style tiles and their value-derived colors
//! - [`tetromino`]: the 7 shapes, collision-aware movement and rotation
//! - [`grid`]: the board and its lock / clear / gravity / merge loop
//! - [`rng`]: seeded piece and tile-value generation
//! - [`game`]: session state driven by the shell

pub mod game;
pub mod grid;
pub mod rng;
pub mod tetromino;
pub mod tile;

pub use game::Game;
pub use grid::{GameGrid, MergeEvent};
pub use rng::{PieceGenerator, SimpleRng};
pub use tetromino::{Anchor, Tetromino, TileMatrix};
pub use tile::{Cell, Rgb, Tile};
