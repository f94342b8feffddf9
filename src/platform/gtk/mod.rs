//! GTK presentation backend (X11)
//!
//! Under GNOME the window manager ignores plain raise/activate requests
//! from a process it considers in the background. GTK's
//! `gtk_window_present_with_time`, given the timestamp of the input event
//! that asked for activation, gets through. See
//! https://bugzilla.mozilla.org/show_bug.cgi?id=721498 for the same fix
//! elsewhere.

mod symbols;

pub use symbols::{
    DlsymSource, GTK_SYMBOLS, GtkApi, GtkLibrary, PresentMiss, RawSymbol, SymbolCache,
    SymbolSource,
};

use tracing::info;

use crate::activation::ActivationRequest;
use crate::config::ActivatorConfig;
use crate::session::{CommandRunner, EnvSource, ProcessEnv, SessionClassifier, SystemCommandRunner};
use crate::window::{DisplayProtocol, ToolkitStyle};

use super::{ForceActivate, ForceOutcome};

pub struct GtkForceActivator<'a, R, E, S> {
    classifier: SessionClassifier<R, E>,
    symbols: &'a SymbolCache<S>,
}

impl GtkForceActivator<'static, SystemCommandRunner, ProcessEnv, DlsymSource> {
    /// Live session probes over the process-wide symbol table
    pub fn system(config: &ActivatorConfig) -> Self {
        Self::new(
            SessionClassifier::new(SystemCommandRunner, ProcessEnv, config),
            &GTK_SYMBOLS,
        )
    }
}

impl<'a, R, E, S> GtkForceActivator<'a, R, E, S> {
    pub fn new(classifier: SessionClassifier<R, E>, symbols: &'a SymbolCache<S>) -> Self {
        Self {
            classifier,
            symbols,
        }
    }
}

impl<R: CommandRunner, E: EnvSource, S: SymbolSource> ForceActivate for GtkForceActivator<'_, R, E, S> {
    fn name(&self) -> &'static str {
        "gtk"
    }

    fn supports(&self, protocol: DisplayProtocol) -> bool {
        protocol == DisplayProtocol::X11
    }

    fn force_activate(&self, request: &ActivationRequest, style: &ToolkitStyle) -> ForceOutcome {
        if !self.classifier.is_target_environment(style) {
            return ForceOutcome::NotTargetSession;
        }

        // Resolution failures were already logged by the cache
        let Some(api) = self.symbols.obtain().api() else {
            return ForceOutcome::SymbolsUnavailable;
        };

        match api.present_native_window(request.window_id, request.timestamp) {
            Ok(()) => {
                info!(
                    window = request.window_id,
                    timestamp = request.timestamp,
                    "Presented window through GTK"
                );
                ForceOutcome::Presented
            }
            Err(miss) => miss.into(),
        }
    }
}

impl From<PresentMiss> for ForceOutcome {
    fn from(miss: PresentMiss) -> Self {
        match miss {
            PresentMiss::NoDisplay => Self::NoDisplay,
            PresentMiss::UnknownWindow => Self::UnknownWindow,
            PresentMiss::NoWidget => Self::NoWidget,
        }
    }
}
