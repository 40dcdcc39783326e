//! Input layer: key-to-action mapping for the terminal shell.

pub mod handler;

pub use handler::{should_quit, InputHandler};
