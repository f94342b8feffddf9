//! X11 host window
//!
//! Lets the command-line tool drive any top-level X11 window through the
//! activator, standing in for a GUI toolkit's own window object.

mod context;
mod window;

pub use context::{CachedAtoms, X11Session};
pub use window::X11Window;
