//! Terminal Tetris x 2048.
//!
//! Falling tetrominoes carry numbered tiles. When a piece locks, its tiles
//! join the grid and settle 2048-style: horizontally-connected groups fall
//! as rigid bodies and equal vertical neighbors merge, chaining until the
//! board reaches a fixed point.
//!
//! [`core`] holds the pure game rules; [`term`] and [`input`] are the
//! crossterm presentation shell.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
