//! Tetromino module - shape tables, collision-aware movement and rotation.
//!
//! A piece is an n×n matrix of optional tiles (n = 2, 3 or 4) anchored by
//! its bottom-left corner on the board. Matrix row 0 is the top of the
//! matrix; board row 0 is the bottom of the board, so a matrix cell
//! `(row, col)` maps to board coordinates
//! `(anchor.x + col, anchor.y + n - 1 - row)`.
//!
//! Rotation is a plain 90° clockwise matrix rotation validated against the
//! board at the current anchor. There is no wall-kick search: a rotation
//! that would leave the board or overlap locked tiles is rejected outright.

use arrayvec::ArrayVec;

use crate::core::grid::GameGrid;
use crate::core::rng::PieceGenerator;
use crate::core::tile::{Cell, Tile};
use crate::types::{Direction, PieceKind};

/// Largest bounding matrix any shape needs (the I piece).
pub const MAX_PIECE_SIZE: usize = 4;

/// Board-relative position of a piece matrix's bottom-left corner.
///
/// `y` may point above the visible board while a piece is still falling in
/// from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: i16,
    pub y: i16,
}

impl Anchor {
    pub fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Fixed-capacity n×n matrix of optional tiles, row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMatrix {
    cells: [[Cell; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
    rows: usize,
    cols: usize,
}

impl TileMatrix {
    pub fn empty(rows: usize, cols: usize) -> Self {
        debug_assert!(rows <= MAX_PIECE_SIZE && cols <= MAX_PIECE_SIZE);
        Self {
            cells: [[None; MAX_PIECE_SIZE]; MAX_PIECE_SIZE],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row < self.rows && col < self.cols {
            self.cells[row][col]
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if row < self.rows && col < self.cols {
            self.cells[row][col] = cell;
        }
    }

    /// 90° clockwise rotation (square matrices only).
    fn rotated_cw(&self) -> Self {
        debug_assert_eq!(self.rows, self.cols);
        let n = self.rows;
        let mut out = Self::empty(n, n);
        for row in 0..n {
            for col in 0..n {
                out.cells[row][col] = self.cells[n - 1 - col][row];
            }
        }
        out
    }
}

/// Initial cell layout for a shape: bounding size plus the four occupied
/// `(row, col)` positions within it (row 0 = top).
fn shape_layout(kind: PieceKind) -> (usize, [(usize, usize); 4]) {
    match kind {
        PieceKind::I => (4, [(1, 0), (1, 1), (1, 2), (1, 3)]),
        PieceKind::O => (2, [(0, 0), (0, 1), (1, 0), (1, 1)]),
        PieceKind::Z => (3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
        PieceKind::T => (3, [(0, 1), (1, 0), (1, 1), (1, 2)]),
        PieceKind::J => (3, [(0, 0), (1, 0), (1, 1), (1, 2)]),
        PieceKind::L => (3, [(0, 2), (1, 0), (1, 1), (1, 2)]),
        PieceKind::S => (3, [(0, 1), (0, 2), (1, 0), (1, 1)]),
    }
}

/// A falling piece: shape matrix of tiles plus its board anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tetromino {
    kind: PieceKind,
    matrix: TileMatrix,
    anchor: Anchor,
}

impl Tetromino {
    /// Create a piece of the given kind with tiles drawn from `generator`,
    /// horizontally centered with its topmost occupied cell on the board's
    /// top row.
    pub fn spawn(kind: PieceKind, grid: &GameGrid, generator: &mut PieceGenerator) -> Self {
        let (n, layout) = shape_layout(kind);
        let mut matrix = TileMatrix::empty(n, n);
        let mut top_row = n;
        for &(row, col) in layout.iter() {
            matrix.set(row, col, Some(generator.next_tile()));
            top_row = top_row.min(row);
        }

        let x = ((grid.width() - n) / 2) as i16;
        let y = (grid.height() + top_row) as i16 - n as i16;
        Self {
            kind,
            matrix,
            anchor: Anchor::new(x, y),
        }
    }

    /// Build a piece from an explicit matrix and anchor (tests and the
    /// next-piece preview).
    pub fn from_parts(kind: PieceKind, matrix: TileMatrix, anchor: Anchor) -> Self {
        Self {
            kind,
            matrix,
            anchor,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn matrix(&self) -> &TileMatrix {
        &self.matrix
    }

    /// Board coordinates and tiles of every occupied cell.
    pub fn occupied_cells(&self) -> ArrayVec<(i16, i16, Tile), 4> {
        let mut cells = ArrayVec::new();
        let n = self.matrix.rows();
        for row in 0..n {
            for col in 0..n {
                if let Some(tile) = self.matrix.get(row, col) {
                    let x = self.anchor.x + col as i16;
                    let y = self.anchor.y + (n - 1 - row) as i16;
                    cells.push((x, y, tile));
                }
            }
        }
        cells
    }

    /// A board position is a legal resting place for one of this piece's
    /// cells: inside horizontal bounds, at or above the floor, and not
    /// overlapping a locked tile. Cells above the visible top are legal
    /// while the piece is still entering the board.
    fn cell_is_free(grid: &GameGrid, x: i16, y: i16) -> bool {
        x >= 0 && x < grid.width() as i16 && y >= 0 && !grid.is_occupied(x, y)
    }

    /// Attempt to translate the piece one cell in `direction`.
    ///
    /// All-or-nothing: on failure the anchor is unchanged.
    pub fn try_move(&mut self, direction: Direction, grid: &GameGrid) -> bool {
        let (dx, dy) = match direction {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
        };

        let fits = self
            .occupied_cells()
            .iter()
            .all(|&(x, y, _)| Self::cell_is_free(grid, x + dx, y + dy));

        if fits {
            self.anchor.x += dx;
            self.anchor.y += dy;
        }
        fits
    }

    /// Attempt a 90° clockwise rotation at the current anchor.
    ///
    /// Rejected (keeping the previous orientation) if any rotated cell
    /// would leave the board or overlap a locked tile.
    pub fn try_rotate(&mut self, grid: &GameGrid) -> bool {
        let rotated = self.matrix.rotated_cw();
        let candidate = Self {
            kind: self.kind,
            matrix: rotated,
            anchor: self.anchor,
        };

        let fits = candidate
            .occupied_cells()
            .iter()
            .all(|&(x, y, _)| Self::cell_is_free(grid, x, y));

        if fits {
            self.matrix = rotated;
        }
        fits
    }

    /// Smallest sub-matrix bounding all occupied cells, plus the
    /// bottom-left board position that maps it back onto the board.
    pub fn min_bounded_tile_matrix(&self) -> (TileMatrix, Anchor) {
        let n = self.matrix.rows();
        let mut min_row = n;
        let mut max_row = 0;
        let mut min_col = n;
        let mut max_col = 0;
        for row in 0..n {
            for col in 0..n {
                if self.matrix.get(row, col).is_some() {
                    min_row = min_row.min(row);
                    max_row = max_row.max(row);
                    min_col = min_col.min(col);
                    max_col = max_col.max(col);
                }
            }
        }
        debug_assert!(min_row <= max_row, "piece has no occupied cells");

        let mut bounded = TileMatrix::empty(max_row - min_row + 1, max_col - min_col + 1);
        for row in min_row..=max_row {
            for col in min_col..=max_col {
                bounded.set(row - min_row, col - min_col, self.matrix.get(row, col));
            }
        }

        let anchor = Anchor::new(
            self.anchor.x + min_col as i16,
            self.anchor.y + (n - 1 - max_row) as i16,
        );
        (bounded, anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GRID_HEIGHT, GRID_WIDTH};

    fn spawn(kind: PieceKind) -> (Tetromino, GameGrid) {
        let grid = GameGrid::new(GRID_HEIGHT, GRID_WIDTH);
        let mut generator = PieceGenerator::new(1);
        let piece = Tetromino::spawn(kind, &grid, &mut generator);
        (piece, grid)
    }

    #[test]
    fn every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            let (piece, _) = spawn(kind);
            assert_eq!(piece.occupied_cells().len(), 4, "{kind:?}");
        }
    }

    #[test]
    fn spawn_tops_out_at_the_board_ceiling() {
        for kind in PieceKind::ALL {
            let (piece, _) = spawn(kind);
            let top = piece
                .occupied_cells()
                .iter()
                .map(|&(_, y, _)| y)
                .max()
                .unwrap();
            assert_eq!(top, GRID_HEIGHT as i16 - 1, "{kind:?}");
        }
    }

    #[test]
    fn move_down_shifts_anchor() {
        let (mut piece, grid) = spawn(PieceKind::O);
        let before = piece.anchor();
        assert!(piece.try_move(Direction::Down, &grid));
        assert_eq!(piece.anchor(), Anchor::new(before.x, before.y - 1));
    }

    #[test]
    fn move_left_stops_at_the_wall() {
        let (mut piece, grid) = spawn(PieceKind::O);
        while piece.try_move(Direction::Left, &grid) {}
        assert_eq!(piece.anchor().x, 0);

        let at_wall = piece.anchor();
        assert!(!piece.try_move(Direction::Left, &grid));
        assert_eq!(piece.anchor(), at_wall, "failed move must be a no-op");
    }

    #[test]
    fn move_down_stops_at_the_floor() {
        let (mut piece, grid) = spawn(PieceKind::I);
        while piece.try_move(Direction::Down, &grid) {}
        let bottom = piece
            .occupied_cells()
            .iter()
            .map(|&(_, y, _)| y)
            .min()
            .unwrap();
        assert_eq!(bottom, 0);
    }

    #[test]
    fn rotation_preserves_cell_count_and_is_cyclic() {
        let (mut piece, grid) = spawn(PieceKind::T);
        // Drop into open space so rotations cannot clip the ceiling.
        for _ in 0..5 {
            assert!(piece.try_move(Direction::Down, &grid));
        }
        let original = *piece.matrix();
        for _ in 0..4 {
            assert!(piece.try_rotate(&grid));
            assert_eq!(piece.occupied_cells().len(), 4);
        }
        assert_eq!(*piece.matrix(), original, "four rotations = identity");
    }

    #[test]
    fn rotation_rejected_when_blocked() {
        let mut grid = GameGrid::new(GRID_HEIGHT, GRID_WIDTH);
        let mut generator = PieceGenerator::new(1);
        let mut piece = Tetromino::spawn(PieceKind::I, &grid, &mut generator);
        for _ in 0..5 {
            assert!(piece.try_move(Direction::Down, &grid));
        }

        // A clockwise I rotation lands in matrix column 2; wall it off.
        let Anchor { x, y } = piece.anchor();
        for dy in 0..4 {
            grid.set_tile(x + 2, y + dy, Some(Tile::new(2)));
        }

        let before = *piece.matrix();
        assert!(!piece.try_rotate(&grid));
        assert_eq!(*piece.matrix(), before, "rejected rotation keeps shape");
    }

    #[test]
    fn min_bounded_matrix_shrinks_the_o_piece() {
        let (piece, _) = spawn(PieceKind::O);
        let (bounded, anchor) = piece.min_bounded_tile_matrix();
        assert_eq!((bounded.rows(), bounded.cols()), (2, 2));
        for row in 0..2 {
            for col in 0..2 {
                assert!(bounded.get(row, col).is_some());
            }
        }
        assert_eq!(anchor, piece.anchor());
    }

    #[test]
    fn min_bounded_matrix_anchor_maps_cells_back() {
        let (piece, _) = spawn(PieceKind::S);
        let (bounded, anchor) = piece.min_bounded_tile_matrix();

        // Re-derive board cells from the bounded matrix and compare.
        let mut rebuilt: Vec<(i16, i16)> = Vec::new();
        for row in 0..bounded.rows() {
            for col in 0..bounded.cols() {
                if bounded.get(row, col).is_some() {
                    rebuilt.push((
                        anchor.x + col as i16,
                        anchor.y + (bounded.rows() - 1 - row) as i16,
                    ));
                }
            }
        }
        let mut direct: Vec<(i16, i16)> = piece
            .occupied_cells()
            .iter()
            .map(|&(x, y, _)| (x, y))
            .collect();
        rebuilt.sort_unstable();
        direct.sort_unstable();
        assert_eq!(rebuilt, direct);
    }
}
