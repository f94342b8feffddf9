use crate::activation::ActivationRequest;
use crate::window::{DisplayProtocol, ToolkitStyle};

use super::{ForceActivate, ForceOutcome};

/// Backend for platforms without a forced-presentation path
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopActivator;

impl ForceActivate for NoopActivator {
    fn name(&self) -> &'static str {
        "noop"
    }

    fn supports(&self, _protocol: DisplayProtocol) -> bool {
        false
    }

    fn force_activate(&self, _request: &ActivationRequest, _style: &ToolkitStyle) -> ForceOutcome {
        ForceOutcome::Unsupported
    }
}
