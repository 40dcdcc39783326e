//! GameView: maps a `core::Game` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::grid::MergeEvent;
use crate::core::tile::{Rgb, Tile};
use crate::core::Game;
use crate::term::fb::{CellStyle, FrameBuffer};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders the board, the falling piece, and the side panel.
pub struct GameView {
    /// Board cell width in terminal columns (room for a centered number).
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 5 }
    }
}

const FLASH_BG: Rgb = Rgb::new(255, 255, 255);
const EMPTY_BG: Rgb = Rgb::new(35, 35, 45);
const TILE_FG: Rgb = Rgb::new(0, 0, 0);

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self { cell_w }
    }

    /// Render the current session into a framebuffer.
    ///
    /// `flash` holds merge positions still inside their highlight window;
    /// those tiles are drawn on a white background.
    pub fn render(&self, game: &Game, viewport: Viewport, flash: &[MergeEvent]) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let grid = game.grid();
        let board_w = (grid.width() as u16) * self.cell_w;
        let board_h = grid.height() as u16;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + 22) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(0, 100, 200), Rgb::new(0, 0, 0));
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Locked tiles (board row 0 is the bottom; screen rows grow down).
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let screen_x = start_x + 1 + (x as u16) * self.cell_w;
                let screen_y = start_y + 1 + (board_h - 1 - y as u16);
                match grid.tile(x as i16, y as i16) {
                    Some(tile) => {
                        let flashing = flash.iter().any(|event| event.x == x && event.y == y);
                        self.draw_tile(&mut fb, screen_x, screen_y, tile, flashing);
                    }
                    None => {
                        let empty = CellStyle::new(Rgb::new(70, 70, 85), EMPTY_BG);
                        fb.fill_rect(screen_x, screen_y, self.cell_w, 1, ' ', empty);
                        fb.put_char(screen_x + self.cell_w / 2, screen_y, '·', empty);
                    }
                }
            }
        }

        // The falling piece, clipped to the visible board.
        for &(x, y, tile) in game.current().occupied_cells().iter() {
            if x < 0 || x >= grid.width() as i16 || y < 0 || y >= grid.height() as i16 {
                continue;
            }
            let screen_x = start_x + 1 + (x as u16) * self.cell_w;
            let screen_y = start_y + 1 + (board_h - 1 - y as u16);
            self.draw_tile(&mut fb, screen_x, screen_y, tile, false);
        }

        self.draw_side_panel(&mut fb, game, start_x + frame_w + 2, start_y);

        if game.paused() {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED");
        } else if game.game_over() {
            self.draw_overlay(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }

        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, tile: Tile, flashing: bool) {
        let bg = if flashing { FLASH_BG } else { tile.color() };
        let style = CellStyle::new(TILE_FG, bg).bold();
        fb.fill_rect(x, y, self.cell_w, 1, ' ', style);

        let label = tile.number().to_string();
        let pad = (self.cell_w as usize).saturating_sub(label.len()) / 2;
        fb.put_str(x + pad as u16, y, &label, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, game: &Game, x: u16, y: u16) {
        let heading = CellStyle::default().bold();
        let text = CellStyle::default();

        fb.put_str(x, y, "Next:", heading);
        let (matrix, _) = game.next().min_bounded_tile_matrix();
        for row in 0..matrix.rows() {
            for col in 0..matrix.cols() {
                if let Some(tile) = matrix.get(row, col) {
                    self.draw_tile(
                        fb,
                        x + (col as u16) * self.cell_w,
                        y + 2 + row as u16,
                        tile,
                        false,
                    );
                }
            }
        }

        fb.put_str(x, y + 7, "Score:", heading);
        fb.put_str(x, y + 8, &game.score().to_string(), text);

        let controls = [
            "Controls:",
            "< > v : move",
            "^ : rotate",
            "space : drop",
            "v v : drop",
            "p : pause",
            "r : restart",
            "q : quit",
        ];
        for (i, line) in controls.iter().enumerate() {
            let style = if i == 0 { heading } else { text };
            fb.put_str(x, y + 11 + i as u16, line, style);
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, message: &str) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(120, 20, 20)).bold();
        let mx = x + w.saturating_sub(message.len() as u16) / 2;
        let my = y + h / 2;
        fb.put_str(mx, my, message, style);
    }
}
