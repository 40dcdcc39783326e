//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Default board dimensions.
pub const GRID_WIDTH: usize = 12;
pub const GRID_HEIGHT: usize = 20;

/// Frame tick length (milliseconds).
pub const TICK_MS: u32 = 16;

/// Interval between automatic downward steps of the active piece.
pub const DROP_INTERVAL_MS: u32 = 500;

/// Score awarded when a piece locks into the grid.
pub const LOCK_SCORE: u32 = 10;

/// Two Down presses within this window trigger a hard drop.
pub const DOUBLE_TAP_DROP_MS: u32 = 300;

/// How long merged tiles stay highlighted in the view.
pub const MERGE_FLASH_MS: u32 = 150;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    Z,
    T,
    J,
    L,
    S,
}

impl PieceKind {
    /// All seven kinds.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::Z => "z",
            PieceKind::T => "t",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
        }
    }
}

/// Direction for a single-cell translation of the active piece.
///
/// Row 0 is the bottom of the board, so `Down` decreases the anchor's y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// Game actions produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Pause,
    Restart,
}
