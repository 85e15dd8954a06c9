//! Screen surfaces for gottem.
//!
//! - `TerminalSurface` - raw-mode terminal via crossterm and ratatui
//! - `TestSurface` - in-memory recorder with scripted input

mod headless;
mod terminal;

pub use headless::TestSurface;
pub use terminal::TerminalSurface;
