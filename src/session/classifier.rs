//! GNOME/GTK session classifier
//!
//! The checks run in a fixed order and stop at the first negative signal:
//!
//! 1. the session-manager process is running (`pidof gnome-session`)
//! 2. the competing-session variable (`KDE_FULL_SESSION`) is unset or empty
//! 3. the host toolkit draws with its GTK style
//!
//! A probe that cannot even run counts as negative. The ordering is a
//! policy table: a set KDE variable vetoes a running gnome-session.

use tracing::{debug, error};

use crate::config::ActivatorConfig;
use crate::window::ToolkitStyle;

use super::probe::{CommandRunner, EnvSource};

/// Outcome of a session check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// GTK drives this session; the forced path may run
    Target,
    /// Session-manager process not found
    NoSessionProcess,
    /// Competing desktop variable is set
    CompetingSession,
    /// Host toolkit is not using its GTK style
    ForeignStyle(ToolkitStyle),
    /// Process query could not be executed
    ProbeFailed,
}

pub struct SessionClassifier<R, E> {
    runner: R,
    env: E,
    session_process: String,
    process_query_command: String,
    competing_session_var: String,
}

impl<R: CommandRunner, E: EnvSource> SessionClassifier<R, E> {
    pub fn new(runner: R, env: E, config: &ActivatorConfig) -> Self {
        Self {
            runner,
            env,
            session_process: config.session_process.clone(),
            process_query_command: config.process_query_command.clone(),
            competing_session_var: config.competing_session_var.clone(),
        }
    }

    /// Re-evaluated on every call so it tracks the live session
    pub fn classify(&self, style: &ToolkitStyle) -> Classification {
        let output = match self
            .runner
            .run(&self.process_query_command, &[self.session_process.as_str()])
        {
            Ok(output) => output,
            Err(err) => {
                error!(
                    command = %self.process_query_command,
                    process = %self.session_process,
                    error = %format!("{:#}", err),
                    "Session process query failed"
                );
                return Classification::ProbeFailed;
            }
        };

        if !output.success || output.stdout.is_empty() {
            debug!(process = %self.session_process, "Session process not running");
            return Classification::NoSessionProcess;
        }

        if let Some(value) = self.env.var(&self.competing_session_var)
            && !value.is_empty()
        {
            debug!(
                var = %self.competing_session_var,
                ?value,
                "Competing desktop session variable set"
            );
            return Classification::CompetingSession;
        }

        if *style != ToolkitStyle::Gtk {
            debug!(style = %style, "Host toolkit is not using the GTK style");
            return Classification::ForeignStyle(style.clone());
        }

        Classification::Target
    }

    pub fn is_target_environment(&self, style: &ToolkitStyle) -> bool {
        self.classify(style) == Classification::Target
    }
}
