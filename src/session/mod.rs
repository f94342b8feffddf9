//! Desktop session detection
//!
//! Decides whether GTK is the toolkit actually driving window decoration in
//! this session, using the process table, the environment and the host
//! toolkit's active style.

mod classifier;
mod diagnostics;
mod probe;

pub use classifier::{Classification, SessionClassifier};
pub use diagnostics::log_session_info;
pub use probe::{CommandOutput, CommandRunner, EnvSource, ProcessEnv, SystemCommandRunner};
