//! Host window collaborator
//!
//! The activator never owns a window. It borrows one through
//! [`ActivatableWindow`] for the duration of a single activation call.

use bitflags::bitflags;
use std::fmt;

/// Platform window identifier (an X11 XID on Linux)
pub type NativeWindowId = u64;

/// Display protocol the host window lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayProtocol {
    X11,
    Wayland,
    Unknown,
}

/// Style engine of the GUI toolkit hosting the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolkitStyle {
    /// Native GTK look, drawn through the GTK theme engine
    Gtk,
    Other(String),
}

impl ToolkitStyle {
    /// Parse a style name as reported by the toolkit (case-insensitive)
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.eq_ignore_ascii_case("gtk") || trimmed.eq_ignore_ascii_case("gtk+") {
            Self::Gtk
        } else {
            Self::Other(trimmed.to_string())
        }
    }
}

impl fmt::Display for ToolkitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gtk => write!(f, "gtk"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

bitflags! {
    /// Window-state bit set
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowState: u32 {
        const MINIMIZED = 1 << 0;
        const MAXIMIZED = 1 << 1;
        const FULLSCREEN = 1 << 2;
        const ACTIVE = 1 << 3;
    }
}

/// A top-level window owned by the host GUI toolkit
///
/// Every operation is infallible from the activator's point of view;
/// implementations log their own failures.
pub trait ActivatableWindow {
    /// Native identifier the window system knows this window by
    fn native_id(&self) -> NativeWindowId;

    /// Display protocol the window is presented on
    fn display_protocol(&self) -> DisplayProtocol;

    /// Active style engine of the toolkit drawing this window
    fn toolkit_style(&self) -> ToolkitStyle;

    fn window_state(&self) -> WindowState;

    fn set_window_state(&mut self, state: WindowState);

    /// Move the window to the top of the stacking order
    fn raise(&mut self);

    /// Request keyboard focus for the window
    fn activate_window(&mut self);

    fn is_minimized(&self) -> bool {
        self.window_state().contains(WindowState::MINIMIZED)
    }
}
