//! Raise and activate a window
//!
//! The forced backend (if any) runs first as a best-effort extra. The
//! ordinary un-minimize / raise / activate sequence always follows, no
//! matter what the backend did.

use tracing::{debug, warn};

use crate::config::ActivatorConfig;
use crate::platform::{self, ForceActivate, ForceOutcome};
use crate::window::{ActivatableWindow, NativeWindowId, WindowState};

/// One activation call's inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationRequest {
    pub window_id: NativeWindowId,
    /// Try to defeat focus-stealing prevention
    pub force: bool,
    /// Timestamp of the input event that triggered the activation
    pub timestamp: i32,
}

pub struct Activator<P> {
    platform: P,
}

impl Activator<Box<dyn ForceActivate>> {
    /// Activator using this platform's backend
    pub fn for_current_platform(config: &ActivatorConfig) -> Self {
        Self::new(platform::for_current_platform(config))
    }
}

impl<P: ForceActivate> Activator<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Bring `window` to the foreground
    ///
    /// `timestamp` is only handed to the forced backend. Never fails.
    pub fn raise_and_activate<W: ActivatableWindow + ?Sized>(
        &self,
        window: &mut W,
        force: bool,
        timestamp: i32,
    ) -> Option<ForceOutcome> {
        let request = ActivationRequest {
            window_id: window.native_id(),
            force,
            timestamp,
        };

        let outcome = self.try_force(&*window, &request);

        if window.is_minimized() {
            window.set_window_state(window.window_state().difference(WindowState::MINIMIZED));
        }
        window.raise();
        window.activate_window();

        outcome
    }

    fn try_force<W: ActivatableWindow + ?Sized>(
        &self,
        window: &W,
        request: &ActivationRequest,
    ) -> Option<ForceOutcome> {
        if !request.force {
            return None;
        }

        let protocol = window.display_protocol();
        if !self.platform.supports(protocol) {
            debug!(
                backend = self.platform.name(),
                ?protocol,
                "Forced activation not supported for this display protocol"
            );
            return None;
        }

        let outcome = self
            .platform
            .force_activate(request, &window.toolkit_style());
        debug!(
            backend = self.platform.name(),
            window = request.window_id,
            ?outcome,
            "Forced activation attempted"
        );
        Some(outcome)
    }
}

/// Raise and activate `window` with an activator built from the user's config
///
/// A config that can't be read falls back to defaults.
pub fn raise_and_activate_window<W: ActivatableWindow + ?Sized>(
    window: &mut W,
    force: bool,
    timestamp: i32,
) {
    let config = ActivatorConfig::load().unwrap_or_else(|err| {
        warn!(error = %format!("{:#}", err), "Invalid activator config, using defaults");
        ActivatorConfig::default()
    });
    Activator::for_current_platform(&config).raise_and_activate(window, force, timestamp);
}
