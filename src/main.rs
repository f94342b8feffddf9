#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use window_activator::session::log_session_info;
use window_activator::x11::{X11Session, X11Window};
use window_activator::{Activator, ActivatorConfig, ToolkitStyle};

#[derive(Parser)]
#[command(name = "window-activator")]
#[command(version)]
#[command(about = "Bring an X11 window to the foreground", long_about = None)]
struct Cli {
    /// Window to activate (decimal or 0x-prefixed hex XID)
    #[arg(long, value_parser = parse_window_id)]
    window: u32,

    /// Also try GTK's presentation call to get past focus-stealing prevention
    #[arg(long)]
    force: bool,

    /// Timestamp of the input event that triggered the activation
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    timestamp: i32,

    /// Style engine of the toolkit drawing the window (e.g. `gtk`)
    ///
    /// When omitted the window is treated as non-GTK and `--force` has no effect.
    #[arg(long)]
    style: Option<String>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// X11 display to connect to (defaults to $DISPLAY)
    #[arg(long)]
    display: Option<String>,

    /// Log session details and debug output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_window_id(value: &str) -> Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|err| format!("invalid window id `{}`: {}", value, err))
}

/// Style named on the command line; unknown when none was given
fn host_style(name: Option<&str>) -> ToolkitStyle {
    name.map(ToolkitStyle::from_name)
        .unwrap_or_else(|| ToolkitStyle::Other("unspecified".to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    let config = match &cli.config {
        Some(path) => ActivatorConfig::load_from(path)?,
        None => ActivatorConfig::load()?,
    };

    if cli.verbose {
        log_session_info(&config);
    }

    let session = X11Session::connect(cli.display.as_deref())
        .context("Cannot activate windows without an X11 connection")?;
    let mut window = X11Window::new(&session, cli.window, host_style(cli.style.as_deref()));

    let activator = Activator::for_current_platform(&config);
    let outcome = activator.raise_and_activate(&mut window, cli.force, cli.timestamp);

    info!(window = cli.window, force = cli.force, ?outcome, "Window raised and activated");
    Ok(())
}
