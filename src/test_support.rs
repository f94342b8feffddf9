//! Fakes shared by unit tests

#![allow(unsafe_code)]

use std::collections::HashMap;
use std::ffi::OsString;
use std::sync::{Arc, Mutex};

use anyhow::{Result, anyhow};

use crate::session::{CommandOutput, CommandRunner, EnvSource};
use crate::window::{ActivatableWindow, DisplayProtocol, NativeWindowId, ToolkitStyle, WindowState};

/// Canned answer a [`FakeRunner`] gives every time
#[derive(Debug, Clone)]
enum RunnerReply {
    Output(CommandOutput),
    SpawnError,
}

/// Command runner with a fixed reply that records every invocation
#[derive(Debug, Clone)]
pub struct FakeRunner {
    reply: RunnerReply,
    invocations: Arc<Mutex<Vec<String>>>,
}

impl FakeRunner {
    fn with_reply(reply: RunnerReply) -> Self {
        Self {
            reply,
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Query succeeds and prints `stdout`
    pub fn running(stdout: &str) -> Self {
        Self::with_reply(RunnerReply::Output(CommandOutput {
            success: true,
            stdout: stdout.to_string(),
        }))
    }

    /// Query exits non-zero with no output
    pub fn not_running() -> Self {
        Self::with_reply(RunnerReply::Output(CommandOutput {
            success: false,
            stdout: String::new(),
        }))
    }

    /// Query cannot be spawned at all
    pub fn failing() -> Self {
        Self::with_reply(RunnerReply::SpawnError)
    }

    pub fn invocations(&self) -> Vec<String> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        self.invocations.lock().unwrap().push(line);

        match &self.reply {
            RunnerReply::Output(output) => Ok(output.clone()),
            RunnerReply::SpawnError => Err(anyhow!("No such file or directory (os error 2)")),
        }
    }
}

/// Environment backed by a map
#[derive(Debug, Clone, Default)]
pub struct FakeEnv {
    vars: HashMap<String, OsString>,
}

impl FakeEnv {
    pub fn with(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), OsString::from(*v)))
                .collect(),
        }
    }

    /// Single variable holding arbitrary bytes
    #[cfg(unix)]
    pub fn with_raw(name: &str, value: &[u8]) -> Self {
        use std::os::unix::ffi::OsStringExt;

        Self {
            vars: HashMap::from([(name.to_string(), OsString::from_vec(value.to_vec()))]),
        }
    }
}

impl EnvSource for FakeEnv {
    fn var(&self, name: &str) -> Option<OsString> {
        self.vars.get(name).cloned()
    }
}

/// Host-side operations a [`FakeWindow`] saw, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCall {
    SetState(WindowState),
    Raise,
    Activate,
}

/// In-memory window recording what the activator did to it
#[derive(Debug)]
pub struct FakeWindow {
    pub id: NativeWindowId,
    pub protocol: DisplayProtocol,
    pub style: ToolkitStyle,
    pub state: WindowState,
    pub calls: Vec<WindowCall>,
}

impl FakeWindow {
    pub fn new(id: NativeWindowId, state: WindowState) -> Self {
        Self {
            id,
            protocol: DisplayProtocol::X11,
            style: ToolkitStyle::Gtk,
            state,
            calls: Vec::new(),
        }
    }

    pub fn with_style(mut self, style: ToolkitStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_protocol(mut self, protocol: DisplayProtocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn count(&self, call: &WindowCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl ActivatableWindow for FakeWindow {
    fn native_id(&self) -> NativeWindowId {
        self.id
    }

    fn display_protocol(&self) -> DisplayProtocol {
        self.protocol
    }

    fn toolkit_style(&self) -> ToolkitStyle {
        self.style.clone()
    }

    fn window_state(&self) -> WindowState {
        self.state
    }

    fn set_window_state(&mut self, state: WindowState) {
        self.state = state;
        self.calls.push(WindowCall::SetState(state));
    }

    fn raise(&mut self) {
        self.calls.push(WindowCall::Raise);
    }

    fn activate_window(&mut self) {
        self.calls.push(WindowCall::Activate);
    }
}

/// Stand-ins for the GDK/GTK entry points
///
/// The fake symbols are real `extern "C"` functions, so the resolver and
/// the presentation chain run exactly as they do against GTK. Calls are
/// recorded per test thread.
#[cfg(target_os = "linux")]
pub mod gtk {
    use std::cell::RefCell;
    use std::collections::HashMap;
use std::ffi::OsString;
    use std::ffi::{CStr, c_ulong, c_void};
    use std::ptr::{self, NonNull};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::constants::gtk as names;
    use crate::platform::gtk::{RawSymbol, SymbolSource};
    use crate::window::NativeWindowId;

    pub const FAKE_DISPLAY: usize = 0xD150;
    pub const FAKE_GDK_WINDOW: usize = 0x6D00;
    pub const FAKE_ORPHAN_GDK_WINDOW: usize = 0x6D08;
    pub const FAKE_WIDGET: usize = 0x6700;

    /// XID GDK knows, owned by a GtkWindow
    pub const KNOWN_XID: NativeWindowId = 0x0420_0001;
    /// XID GDK knows, but with no owning widget
    pub const ORPHAN_XID: NativeWindowId = 0x0420_0002;

    thread_local! {
        static PRESENTED: RefCell<Vec<(usize, i32)>> = const { RefCell::new(Vec::new()) };
        static FOREIGN_CALLS: RefCell<usize> = const { RefCell::new(0) };
    }

    fn note_call() {
        FOREIGN_CALLS.with(|calls| *calls.borrow_mut() += 1);
    }

    extern "C" fn fake_display_get_default() -> *mut c_void {
        note_call();
        FAKE_DISPLAY as *mut c_void
    }

    extern "C" fn fake_null_display_get_default() -> *mut c_void {
        note_call();
        ptr::null_mut()
    }

    extern "C" fn fake_window_lookup_for_display(display: *mut c_void, xid: c_ulong) -> *mut c_void {
        note_call();
        if display as usize != FAKE_DISPLAY {
            return ptr::null_mut();
        }
        match xid as NativeWindowId {
            KNOWN_XID => FAKE_GDK_WINDOW as *mut c_void,
            ORPHAN_XID => FAKE_ORPHAN_GDK_WINDOW as *mut c_void,
            _ => ptr::null_mut(),
        }
    }

    extern "C" fn fake_window_get_user_data(window: *mut c_void, data: *mut *mut c_void) {
        note_call();
        let widget = if window as usize == FAKE_GDK_WINDOW {
            FAKE_WIDGET as *mut c_void
        } else {
            ptr::null_mut()
        };
        unsafe { *data = widget };
    }

    extern "C" fn fake_window_present_with_time(widget: *mut c_void, timestamp: u32) {
        note_call();
        PRESENTED.with(|p| p.borrow_mut().push((widget as usize, timestamp as i32)));
    }

    /// Forget everything recorded on this thread
    pub fn reset_calls() {
        PRESENTED.with(|p| p.borrow_mut().clear());
        FOREIGN_CALLS.with(|calls| *calls.borrow_mut() = 0);
    }

    /// `(widget, timestamp)` pairs presented on this thread
    pub fn presented() -> Vec<(usize, i32)> {
        PRESENTED.with(|p| p.borrow().clone())
    }

    /// Number of fake foreign functions invoked on this thread
    pub fn foreign_calls() -> usize {
        FOREIGN_CALLS.with(|calls| *calls.borrow())
    }

    /// Symbol namespace holding the fakes above
    #[derive(Debug)]
    pub struct FakeSymbols {
        table: HashMap<String, usize>,
        requested: Mutex<Vec<String>>,
        resets: AtomicUsize,
    }

    impl FakeSymbols {
        fn from_entries(entries: [(&CStr, usize); 4]) -> Self {
            Self {
                table: entries
                    .iter()
                    .map(|(name, address)| (name.to_string_lossy().into_owned(), *address))
                    .collect(),
                requested: Mutex::new(Vec::new()),
                resets: AtomicUsize::new(0),
            }
        }

        pub fn complete() -> Self {
            Self::from_entries([
                (names::DISPLAY_GET_DEFAULT, fake_display_get_default as usize),
                (
                    names::X11_WINDOW_LOOKUP_FOR_DISPLAY,
                    fake_window_lookup_for_display as usize,
                ),
                (names::WINDOW_GET_USER_DATA, fake_window_get_user_data as usize),
                (
                    names::WINDOW_PRESENT_WITH_TIME,
                    fake_window_present_with_time as usize,
                ),
            ])
        }

        /// All symbols present, but GTK has no default display
        pub fn without_display() -> Self {
            let mut symbols = Self::complete();
            symbols.table.insert(
                names::DISPLAY_GET_DEFAULT.to_string_lossy().into_owned(),
                fake_null_display_get_default as usize,
            );
            symbols
        }

        /// Drop one symbol from the namespace
        pub fn without(mut self, name: &CStr) -> Self {
            self.table.remove(name.to_string_lossy().as_ref());
            self
        }

        pub fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }

        pub fn resets(&self) -> usize {
            self.resets.load(Ordering::SeqCst)
        }
    }

    impl SymbolSource for FakeSymbols {
        fn reset_error(&self) {
            self.resets.fetch_add(1, Ordering::SeqCst);
        }

        fn resolve(&self, name: &CStr) -> Result<RawSymbol, String> {
            let name = name.to_string_lossy().into_owned();
            self.requested.lock().unwrap().push(name.clone());
            self.table
                .get(&name)
                .and_then(|address| NonNull::new(*address as *mut c_void))
                .ok_or_else(|| format!("undefined symbol: {}", name))
        }
    }
}
