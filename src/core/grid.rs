//! GameGrid module - the board and its consolidation loop.
//!
//! The grid owns every locked tile plus the running score and the terminal
//! flag. `update_grid` is the single entry point the shell calls when a
//! piece stops moving: it locks the piece's tiles, clears full rows, then
//! runs the gravity/merge convergence loop until the board stops changing.
//!
//! Coordinates are `(x, y)` with row 0 at the bottom; storage is a flat
//! row-major `Vec` (`index = y * width + x`).
//!
//! Gravity treats horizontally-connected runs of tiles as rigid bodies:
//! cells joined only through left/right adjacency fall together, one row
//! per pass. Vertical adjacency does not join a component, so stacked
//! unequal tiles separate once their support is gone, which is what
//! produces the cascading collapses.

use crate::core::tetromino::{Anchor, TileMatrix};
use crate::core::tile::{Cell, Tile};
use crate::types::LOCK_SCORE;

/// A single merge: the surviving cell's position and its doubled value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeEvent {
    pub x: usize,
    pub y: usize,
    pub value: u32,
}

/// The fixed-size board: locked tiles, score, terminal flag.
#[derive(Debug, Clone)]
pub struct GameGrid {
    height: usize,
    width: usize,
    /// Flat row-major cells, row 0 at the bottom.
    cells: Vec<Cell>,
    score: u32,
    game_over: bool,
    /// Merges found during the most recent `update_grid`, for the shell's
    /// flash/sound effects.
    merge_events: Vec<MergeEvent>,
}

impl GameGrid {
    /// Create an empty grid.
    pub fn new(grid_h: usize, grid_w: usize) -> Self {
        assert!(grid_h > 0 && grid_w > 0);
        Self {
            height: grid_h,
            width: grid_w,
            cells: vec![None; grid_h * grid_w],
            score: 0,
            game_over: false,
            merge_events: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Merges found by the most recent `update_grid` call.
    pub fn merge_events(&self) -> &[MergeEvent] {
        &self.merge_events
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16 {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn is_inside(&self, x: i16, y: i16) -> bool {
        self.index(x, y).is_some()
    }

    /// Whether the cell holds a locked tile. Out-of-bounds positions
    /// (including above the visible top) count as unoccupied.
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        self.index(x, y)
            .map(|index| self.cells[index].is_some())
            .unwrap_or(false)
    }

    /// Tile at the given position, if any.
    pub fn tile(&self, x: i16, y: i16) -> Option<Tile> {
        self.index(x, y).and_then(|index| self.cells[index])
    }

    /// Place or clear a cell directly. Returns false if out of bounds.
    pub fn set_tile(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(index) => {
                self.cells[index] = cell;
                true
            }
            None => false,
        }
    }

    /// Lock a piece's tile matrix onto the board, then resolve the grid.
    ///
    /// `anchor` is the board position of the matrix's bottom-left corner;
    /// matrix row 0 is its top row. Returns the terminal flag.
    ///
    /// Locking is fail-fast: a cell mapping above the board's top or
    /// outside horizontal bounds sets the terminal flag and aborts, with
    /// already-placed cells left in place.
    pub fn update_grid(&mut self, tiles: &TileMatrix, anchor: Anchor) -> bool {
        self.merge_events.clear();
        let rows = tiles.rows();

        for col in 0..tiles.cols() {
            for row in 0..rows {
                let Some(tile) = tiles.get(row, col) else {
                    continue;
                };
                let x = anchor.x + col as i16;
                let y = anchor.y + (rows - 1 - row) as i16;

                if y >= self.height as i16 {
                    self.game_over = true;
                    return true;
                }
                match self.index(x, y) {
                    Some(index) => self.cells[index] = Some(tile),
                    None => {
                        self.game_over = true;
                        return true;
                    }
                }
            }
        }
        self.score += LOCK_SCORE;

        self.clear_full_rows();
        self.settle();

        if self.any_column_full() {
            self.game_over = true;
        }
        self.game_over
    }

    /// Empty every fully occupied row in place (no shifting; the
    /// convergence loop compacts afterwards). Returns the row count.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        for y in 0..self.height {
            let start = y * self.width;
            let row = &mut self.cells[start..start + self.width];
            if row.iter().all(|cell| cell.is_some()) {
                row.fill(None);
                cleared += 1;
            }
        }
        cleared
    }

    /// Run gravity and merge passes until a full pass changes nothing.
    /// Returns whether anything changed at all.
    ///
    /// Terminates: merges strictly reduce the occupied-cell count and
    /// gravity only moves tiles toward row 0.
    pub fn settle(&mut self) -> bool {
        let mut any_change = false;
        loop {
            let mut changed = false;
            if self.gravity_pass() {
                changed = true;
            }
            if self.merge_pass() {
                changed = true;
            }
            if !changed {
                return any_change;
            }
            any_change = true;
        }
    }

    /// Drop every horizontally-connected component that can fall by one
    /// row. Components move atomically; returns whether anything moved.
    fn gravity_pass(&mut self) -> bool {
        let mut changed = false;
        let mut visited = vec![false; self.cells.len()];
        let mut stack: Vec<usize> = Vec::new();
        let mut component: Vec<usize> = Vec::new();

        for start in 0..self.cells.len() {
            if self.cells[start].is_none() || visited[start] {
                continue;
            }

            // Flood fill through left/right adjacency only.
            component.clear();
            visited[start] = true;
            stack.push(start);
            while let Some(index) = stack.pop() {
                component.push(index);
                let x = index % self.width;
                if x > 0 && !visited[index - 1] && self.cells[index - 1].is_some() {
                    visited[index - 1] = true;
                    stack.push(index - 1);
                }
                if x + 1 < self.width && !visited[index + 1] && self.cells[index + 1].is_some() {
                    visited[index + 1] = true;
                    stack.push(index + 1);
                }
            }

            // A component falls iff no cell sits in row 0 and nothing
            // outside the component is directly below any cell.
            let can_fall = component.iter().all(|&index| {
                index >= self.width
                    && (self.cells[index - self.width].is_none()
                        || component.contains(&(index - self.width)))
            });

            if can_fall {
                for &index in &component {
                    let tile = self.cells[index].take();
                    self.cells[index - self.width] = tile;
                }
                changed = true;
            }
        }
        changed
    }

    /// Merge equal vertically adjacent tiles, one scan per column from the
    /// bottom up. The lower cell clears, the upper cell doubles, and the
    /// scan skips the cell immediately above the merged pair so a
    /// just-doubled tile cannot merge again within the same pass.
    fn merge_pass(&mut self) -> bool {
        let mut changed = false;
        for x in 0..self.width {
            let mut y = 0;
            while y + 1 < self.height {
                let lower = y * self.width + x;
                let upper = lower + self.width;
                if let (Some(a), Some(b)) = (self.cells[lower], self.cells[upper]) {
                    if a.number() == b.number() {
                        self.cells[lower] = None;
                        let mut merged = b;
                        merged.double();
                        self.cells[upper] = Some(merged);
                        self.score += merged.number();
                        self.merge_events.push(MergeEvent {
                            x,
                            y: y + 1,
                            value: merged.number(),
                        });
                        changed = true;
                        y += 1;
                    }
                }
                y += 1;
            }
        }
        changed
    }

    /// A column occupied from bottom to top ends the session.
    fn any_column_full(&self) -> bool {
        (0..self.width).any(|x| {
            (0..self.height).all(|y| self.cells[y * self.width + x].is_some())
        })
    }
}
