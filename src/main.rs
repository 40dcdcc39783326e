//! Terminal Tetris x 2048 runner (default binary).
//!
//! Crossterm input polling plus a framebuffer renderer. The loop renders,
//! polls keys until the next tick, then advances the game clock.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_tetris_2048::core::{Game, MergeEvent};
use tui_tetris_2048::input::{should_quit, InputHandler};
use tui_tetris_2048::term::{GameView, TerminalRenderer, Viewport};
use tui_tetris_2048::types::{GRID_HEIGHT, GRID_WIDTH, MERGE_FLASH_MS, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn seed_from_clock() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game = Game::new(seed_from_clock(), GRID_HEIGHT, GRID_WIDTH);
    let view = GameView::default();
    let mut input_handler = InputHandler::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    // Merges currently highlighted, and time left on the highlight.
    let mut flash: Vec<MergeEvent> = Vec::new();
    let mut flash_timer_ms: i32 = 0;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game, Viewport::new(w, h), &flash);
        term.draw(&fb)?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = input_handler.handle_key_press(key.code) {
                        let score_before = game.score();
                        game.apply_action(action);
                        if game.score() != score_before {
                            refresh_flash(&game, &mut flash, &mut flash_timer_ms);
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            let score_before = game.score();
            game.tick(TICK_MS);
            if game.score() != score_before {
                refresh_flash(&game, &mut flash, &mut flash_timer_ms);
            }

            if !flash.is_empty() {
                flash_timer_ms -= TICK_MS as i32;
                if flash_timer_ms <= 0 {
                    flash.clear();
                }
            }
        }
    }
}

/// A lock just happened; pick up its merge events for the flash effect.
fn refresh_flash(game: &Game, flash: &mut Vec<MergeEvent>, timer_ms: &mut i32) {
    let events = game.grid().merge_events();
    if !events.is_empty() {
        flash.clear();
        flash.extend_from_slice(events);
        *timer_ms = MERGE_FLASH_MS as i32;
    }
}
