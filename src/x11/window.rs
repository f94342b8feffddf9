//! X11 top-level window driven through EWMH/ICCCM requests

use anyhow::{Context, Result};
use tracing::{debug, warn};
use x11rb::connection::Connection;
use x11rb::errors::ReplyError;
use x11rb::protocol::xproto::*;

use crate::constants::x11;
use crate::window::{ActivatableWindow, DisplayProtocol, NativeWindowId, ToolkitStyle, WindowState};

use super::X11Session;

/// Window on an X11 display, seen as the activator's host window
pub struct X11Window<'a> {
    session: &'a X11Session,
    window: Window,
    style: ToolkitStyle,
}

impl<'a> X11Window<'a> {
    pub fn new(session: &'a X11Session, window: Window, style: ToolkitStyle) -> Self {
        Self {
            session,
            window,
            style,
        }
    }

    fn query_state(&self) -> Result<WindowState> {
        let conn = &self.session.conn;
        let atoms = &self.session.atoms;
        let mut state = WindowState::empty();

        let reply = match conn
            .get_property(false, self.window, atoms.net_wm_state, AtomEnum::ATOM, 0, 1024)
            .context(format!("Failed to query _NET_WM_STATE for window {}", self.window))?
            .reply()
        {
            Ok(reply) => reply,
            Err(ReplyError::X11Error(err)) if err.error_kind == x11rb::protocol::ErrorKind::Window => {
                debug!(window = self.window, "Window destroyed before _NET_WM_STATE reply");
                return Ok(state);
            }
            Err(err) => {
                return Err(err).context(format!(
                    "Failed to get _NET_WM_STATE reply for window {}",
                    self.window
                ));
            }
        };

        if let Some(mut values) = reply.value32()
            && values.any(|value| value == atoms.net_wm_state_hidden)
        {
            state = state | WindowState::MINIMIZED;
        }

        // Fallback to ICCCM WM_STATE / IconicState detection
        if !state.contains(WindowState::MINIMIZED) {
            let reply = conn
                .get_property(false, self.window, atoms.wm_state, atoms.wm_state, 0, 2)
                .context(format!("Failed to query WM_STATE for window {}", self.window))?
                .reply()
                .context(format!("Failed to get WM_STATE reply for window {}", self.window))?;
            if let Some(mut values) = reply.value32()
                && values.next() == Some(x11::ICONIC_STATE)
            {
                state = state | WindowState::MINIMIZED;
            }
        }

        let active = conn
            .get_property(false, self.session.root, atoms.net_active_window, AtomEnum::WINDOW, 0, 1)
            .context("Failed to query _NET_ACTIVE_WINDOW property")?
            .reply()
            .context("Failed to get reply for _NET_ACTIVE_WINDOW query")?;
        if let Some(mut values) = active.value32()
            && values.next() == Some(self.window)
        {
            state = state | WindowState::ACTIVE;
        }

        Ok(state)
    }

    /// Send a `_NET_WM_STATE` change request to the window manager
    fn request_wm_state(&self, action: u32, first: Atom, second: Atom) -> Result<()> {
        let event = ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window: self.window,
            type_: self.session.atoms.net_wm_state,
            data: ClientMessageData::from([
                action,
                first,
                second,
                x11::ACTIVE_WINDOW_SOURCE_APPLICATION,
                0,
            ]),
        };
        self.session
            .conn
            .send_event(
                false,
                self.session.root,
                EventMask::SUBSTRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
                event,
            )
            .context(format!("Failed to send _NET_WM_STATE event for window {}", self.window))?;
        Ok(())
    }

    /// Restore a minimized window; every other state bit is left to the window manager
    fn apply_state(&self, current: WindowState, target: WindowState) -> Result<()> {
        if !needs_unminimize(current, target) {
            return Ok(());
        }

        self.request_wm_state(x11::NET_WM_STATE_REMOVE, self.session.atoms.net_wm_state_hidden, 0)?;
        self.session
            .conn
            .map_window(self.window)
            .context(format!("Failed to map window {}", self.window))?;
        self.session
            .conn
            .flush()
            .context("Failed to flush X11 connection after state change")?;
        Ok(())
    }

    fn raise_to_top(&self) -> Result<()> {
        self.session
            .conn
            .configure_window(self.window, &ConfigureWindowAux::new().stack_mode(StackMode::ABOVE))
            .context(format!("Failed to raise window {} to top of stack", self.window))?;
        self.session
            .conn
            .flush()
            .context("Failed to flush X11 connection after raise")?;
        Ok(())
    }

    fn request_activation(&self) -> Result<()> {
        let event = ClientMessageEvent {
            response_type: CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window: self.window,
            type_: self.session.atoms.net_active_window,
            data: ClientMessageData::from([
                x11::ACTIVE_WINDOW_SOURCE_APPLICATION,
                x11rb::CURRENT_TIME,
                0,
                0,
                0,
            ]),
        };
        self.session
            .conn
            .send_event(
                false,
                self.session.root,
                EventMask::SUBSTRUCTURE_NOTIFY | EventMask::SUBSTRUCTURE_REDIRECT,
                event,
            )
            .context(format!("Failed to send _NET_ACTIVE_WINDOW event for window {}", self.window))?;
        self.session
            .conn
            .flush()
            .context("Failed to flush X11 connection after window activation")?;
        Ok(())
    }
}

/// Only the minimized to restored transition is ever requested
fn needs_unminimize(current: WindowState, target: WindowState) -> bool {
    current.contains(WindowState::MINIMIZED) && !target.contains(WindowState::MINIMIZED)
}

impl ActivatableWindow for X11Window<'_> {
    fn native_id(&self) -> NativeWindowId {
        NativeWindowId::from(self.window)
    }

    fn display_protocol(&self) -> DisplayProtocol {
        DisplayProtocol::X11
    }

    fn toolkit_style(&self) -> ToolkitStyle {
        self.style.clone()
    }

    fn window_state(&self) -> WindowState {
        self.query_state().unwrap_or_else(|err| {
            warn!(window = self.window, error = %format!("{:#}", err), "Failed to read window state");
            WindowState::empty()
        })
    }

    fn set_window_state(&mut self, state: WindowState) {
        let current = self.window_state();
        if let Err(err) = self.apply_state(current, state) {
            warn!(window = self.window, error = %format!("{:#}", err), "Failed to change window state");
        }
    }

    fn raise(&mut self) {
        if let Err(err) = self.raise_to_top() {
            warn!(window = self.window, error = %format!("{:#}", err), "Failed to raise window");
        }
    }

    fn activate_window(&mut self) {
        if let Err(err) = self.request_activation() {
            warn!(window = self.window, error = %format!("{:#}", err), "Failed to activate window");
        }
    }
}
