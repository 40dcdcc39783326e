//! Keyboard handler for the terminal shell.
//!
//! Maps key presses to game actions. Down is special-cased: two presses
//! inside a short window upgrade the second one to a hard drop. The window
//! is configurable here in the shell and never reaches board logic.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{GameAction, DOUBLE_TAP_DROP_MS};

#[derive(Debug, Clone)]
pub struct InputHandler {
    last_down_press: Option<Instant>,
    double_tap_window: Duration,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            last_down_press: None,
            double_tap_window: Duration::from_millis(DOUBLE_TAP_DROP_MS as u64),
        }
    }

    /// Override the double-tap hard-drop window.
    pub fn with_double_tap_window(mut self, window: Duration) -> Self {
        self.double_tap_window = window;
        self
    }

    /// Translate a key press into a game action, if any.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::MoveRight),
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::Rotate),
            KeyCode::Char(' ') => {
                self.last_down_press = None;
                Some(GameAction::HardDrop)
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(self.on_down_press()),
            KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
            _ => None,
        }
    }

    fn on_down_press(&mut self) -> GameAction {
        let now = Instant::now();
        let double_tap = self
            .last_down_press
            .map(|previous| now.duration_since(previous) < self.double_tap_window)
            .unwrap_or(false);

        if double_tap {
            self.last_down_press = None;
            GameAction::HardDrop
        } else {
            self.last_down_press = Some(now);
            GameAction::SoftDrop
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Quit keys: `q`, Esc, or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
