//! Forced-activation backends
//!
//! Each platform supplies one [`ForceActivate`] implementation. Linux gets
//! the GTK presentation path; every other target gets [`NoopActivator`].

#[cfg(target_os = "linux")]
pub mod gtk;
mod noop;

pub use noop::NoopActivator;

use crate::activation::ActivationRequest;
use crate::config::ActivatorConfig;
use crate::window::{DisplayProtocol, ToolkitStyle};

/// What a forced activation attempt ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceOutcome {
    /// The toolkit's own presentation call was made
    Presented,
    /// Session checks said the toolkit is not in charge here
    NotTargetSession,
    /// Required entry points are missing from the process
    SymbolsUnavailable,
    /// Toolkit has no default display
    NoDisplay,
    /// Toolkit does not know the window
    UnknownWindow,
    /// Toolkit window has no owning top-level widget
    NoWidget,
    /// Backend has no forced path
    Unsupported,
}

/// Best-effort "bring to front despite focus-stealing prevention"
///
/// Implementations never fail the caller; whatever happens, the ordinary
/// raise/activate runs afterwards.
pub trait ForceActivate: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Whether this backend can act on windows shown over `protocol`
    fn supports(&self, protocol: DisplayProtocol) -> bool;

    fn force_activate(&self, request: &ActivationRequest, style: &ToolkitStyle) -> ForceOutcome;
}

impl<T: ForceActivate + ?Sized> ForceActivate for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn supports(&self, protocol: DisplayProtocol) -> bool {
        (**self).supports(protocol)
    }

    fn force_activate(&self, request: &ActivationRequest, style: &ToolkitStyle) -> ForceOutcome {
        (**self).force_activate(request, style)
    }
}

/// Backend for the running platform, honouring `force_enabled`
#[cfg(target_os = "linux")]
pub fn for_current_platform(config: &ActivatorConfig) -> Box<dyn ForceActivate> {
    if config.force_enabled {
        Box::new(gtk::GtkForceActivator::system(config))
    } else {
        Box::new(NoopActivator)
    }
}

/// Backend for the running platform, honouring `force_enabled`
#[cfg(not(target_os = "linux"))]
pub fn for_current_platform(_config: &ActivatorConfig) -> Box<dyn ForceActivate> {
    Box::new(NoopActivator)
}
