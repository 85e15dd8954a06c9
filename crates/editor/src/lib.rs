//! Modal transcript editor for gottem.
//!
//! The editor owns the transcript document, the cursor, the Visual mode
//! selection and the yank register. Keys are routed by [`Mode`] through
//! [`EditorCommand`]; Ctrl+E sends a query to the selected provider and
//! appends the response as a styled block.
//!
//! The editor talks to the outside world only through the collaborator
//! traits of `gottem-core`, so it runs the same against a real terminal
//! and against a headless test surface.

mod dispatch;
mod editor;
mod keymap;
mod mode;
mod render;

#[cfg(test)]
mod testing;

pub use editor::{Editor, EditorOptions, StatusMessage};
pub use keymap::{EditorCommand, Motion};
pub use mode::Mode;
pub use render::render;
