use std::process::Command;
use tracing::debug;

use crate::config::ActivatorConfig;
use crate::constants::session;

/// Log desktop session details relevant to window activation
///
/// Reports what the classifier will see under `config`.
pub fn log_session_info(config: &ActivatorConfig) {
    debug!("=== Session Information ===");

    if let Ok(kernel) = get_command_output("uname", &["-sr"]) {
        debug!("Kernel: {}", kernel);
    }

    for var in diagnostic_vars(config) {
        match std::env::var_os(var) {
            Some(value) => debug!("{}: {:?}", var, value),
            None => debug!("{}: <unset>", var),
        }
    }

    // Which session manager (if any) the heuristics will see
    match get_command_output(&config.process_query_command, &[config.session_process.as_str()]) {
        Ok(pids) if !pids.is_empty() => debug!("{} pids: {}", config.session_process, pids),
        Ok(_) => debug!("{} not running", config.session_process),
        Err(err) => debug!("{} query failed: {}", config.process_query_command, err),
    }

    debug!("===========================");
}

/// Standard session variables plus the configured competing-session one
fn diagnostic_vars(config: &ActivatorConfig) -> Vec<&str> {
    let mut vars = session::DIAGNOSTIC_VARS.to_vec();
    if !vars.contains(&config.competing_session_var.as_str()) {
        vars.push(&config.competing_session_var);
    }
    vars
}

fn get_command_output(cmd: &str, args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new(cmd).args(args).output()?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
