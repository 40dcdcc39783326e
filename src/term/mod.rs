//! Terminal presentation shell: framebuffer, renderer, game view.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{CellStyle, FrameBuffer, ScreenCell};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
