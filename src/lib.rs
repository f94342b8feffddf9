//! Force a window to the foreground on desktops that suppress plain
//! raise/activate requests.
//!
//! Under GNOME, focus-stealing prevention ignores stacking changes asked for
//! by a process it thinks is in the background. When the session really is
//! GTK-driven, the activator calls GTK's own `gtk_window_present_with_time`
//! (bound at runtime, never linked) with the timestamp of the triggering
//! input event, then performs the ordinary un-minimize / raise / activate.

#![deny(unsafe_code)]

pub mod activation;
pub mod config;
pub mod constants;
pub mod platform;
pub mod session;
pub mod window;
pub mod x11;

#[cfg(test)]
mod test_support;

pub use activation::{ActivationRequest, Activator, raise_and_activate_window};
pub use config::ActivatorConfig;
pub use platform::{ForceActivate, ForceOutcome};
pub use window::{ActivatableWindow, DisplayProtocol, NativeWindowId, ToolkitStyle, WindowState};
