//! X11 connection and cached atoms

use anyhow::{Context, Result};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;

/// Pre-cached X11 atoms to avoid repeated roundtrips
pub struct CachedAtoms {
    pub net_wm_state: Atom,
    pub net_wm_state_hidden: Atom,
    pub net_active_window: Atom,
    pub wm_state: Atom,
}

fn intern(conn: &RustConnection, name: &str) -> Result<Atom> {
    Ok(conn
        .intern_atom(false, name.as_bytes())
        .with_context(|| format!("Failed to intern {} atom", name))?
        .reply()
        .with_context(|| format!("Failed to get reply for {} atom", name))?
        .atom)
}

impl CachedAtoms {
    pub fn new(conn: &RustConnection) -> Result<Self> {
        Ok(Self {
            net_wm_state: intern(conn, "_NET_WM_STATE")?,
            net_wm_state_hidden: intern(conn, "_NET_WM_STATE_HIDDEN")?,
            net_active_window: intern(conn, "_NET_ACTIVE_WINDOW")?,
            wm_state: intern(conn, "WM_STATE")?,
        })
    }
}

/// Open X11 connection with everything window operations need
pub struct X11Session {
    pub conn: RustConnection,
    pub root: Window,
    pub atoms: CachedAtoms,
}

impl X11Session {
    /// Connect to `display`, or `$DISPLAY` when `None`
    pub fn connect(display: Option<&str>) -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(display).context("Failed to connect to X11")?;
        let root = conn
            .setup()
            .roots
            .get(screen_num)
            .map(|screen| screen.root)
            .with_context(|| format!("X11 screen {} does not exist", screen_num))?;
        let atoms = CachedAtoms::new(&conn)?;
        Ok(Self { conn, root, atoms })
    }
}
