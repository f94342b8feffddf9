//! Runtime binding of the GDK/GTK presentation entry points
//!
//! Nothing here links against GTK. The four entry points are looked up by
//! name in the process's global symbol namespace, where they exist only if
//! the host toolkit already pulled GTK in. Resolution happens at most once
//! per [`SymbolCache`] and the result is never mutated afterwards.

#![allow(unsafe_code)]

use std::ffi::{CStr, c_ulong, c_void};
use std::mem;
use std::ptr::{self, NonNull};
use std::sync::OnceLock;

use tracing::{debug, error};

use crate::constants::gtk;
use crate::window::NativeWindowId;

/// Address of a resolved symbol
pub type RawSymbol = NonNull<c_void>;

type DisplayGetDefaultFn = unsafe extern "C" fn() -> *mut c_void;
type WindowLookupForDisplayFn = unsafe extern "C" fn(*mut c_void, c_ulong) -> *mut c_void;
type WindowGetUserDataFn = unsafe extern "C" fn(*mut c_void, *mut *mut c_void);
// guint32 on the C side; the i32 timestamp is passed through bit-for-bit
type WindowPresentWithTimeFn = unsafe extern "C" fn(*mut c_void, u32);

/// Where symbol addresses come from
pub trait SymbolSource: Send + Sync {
    /// Clear any lookup error left behind by earlier, unrelated lookups
    fn reset_error(&self);

    /// Address of `name`, or the loader's description of why it is missing
    fn resolve(&self, name: &CStr) -> Result<RawSymbol, String>;
}

/// [`SymbolSource`] over `dlsym(RTLD_DEFAULT, ..)`
#[derive(Debug, Default, Clone, Copy)]
pub struct DlsymSource;

impl SymbolSource for DlsymSource {
    fn reset_error(&self) {
        // SAFETY: dlerror only reads and clears thread-local loader state
        unsafe {
            libc::dlerror();
        }
    }

    fn resolve(&self, name: &CStr) -> Result<RawSymbol, String> {
        // SAFETY: `name` is NUL-terminated and RTLD_DEFAULT is a valid pseudo-handle
        let address = unsafe { libc::dlsym(libc::RTLD_DEFAULT, name.as_ptr()) };

        // SAFETY: a non-null dlerror result is a valid C string until the next dl* call
        let message = unsafe { libc::dlerror() };
        if !message.is_null() {
            return Err(unsafe { CStr::from_ptr(message) }
                .to_string_lossy()
                .into_owned());
        }

        NonNull::new(address)
            .ok_or_else(|| format!("{}: symbol resolved to null", name.to_string_lossy()))
    }
}

/// The four GTK entry points, as far as they could be resolved
///
/// `loaded` is true only when every slot was filled. After a failure the
/// slots resolved before it stay filled but must not be called; [`api`]
/// enforces that.
///
/// [`api`]: GtkLibrary::api
#[derive(Debug)]
pub struct GtkLibrary {
    display_get_default: Option<DisplayGetDefaultFn>,
    window_lookup_for_display: Option<WindowLookupForDisplayFn>,
    window_get_user_data: Option<WindowGetUserDataFn>,
    window_present_with_time: Option<WindowPresentWithTimeFn>,
    loaded: bool,
    error: Option<String>,
}

impl GtkLibrary {
    /// Resolve all four entry points in order, stopping at the first miss
    pub fn resolve<S: SymbolSource + ?Sized>(source: &S) -> Self {
        let mut library = Self {
            display_get_default: None,
            window_lookup_for_display: None,
            window_get_user_data: None,
            window_present_with_time: None,
            loaded: false,
            error: None,
        };

        source.reset_error();
        match library.fill(source) {
            Ok(()) => library.loaded = true,
            Err(message) => library.error = Some(message),
        }
        library
    }

    fn fill<S: SymbolSource + ?Sized>(&mut self, source: &S) -> Result<(), String> {
        // SAFETY (all four transmutes): each address was exported under the
        // matching GDK/GTK name, whose C signature the fn type mirrors.
        let address = source.resolve(gtk::DISPLAY_GET_DEFAULT)?;
        self.display_get_default =
            Some(unsafe { mem::transmute::<*mut c_void, DisplayGetDefaultFn>(address.as_ptr()) });

        let address = source.resolve(gtk::X11_WINDOW_LOOKUP_FOR_DISPLAY)?;
        self.window_lookup_for_display = Some(unsafe {
            mem::transmute::<*mut c_void, WindowLookupForDisplayFn>(address.as_ptr())
        });

        let address = source.resolve(gtk::WINDOW_GET_USER_DATA)?;
        self.window_get_user_data =
            Some(unsafe { mem::transmute::<*mut c_void, WindowGetUserDataFn>(address.as_ptr()) });

        let address = source.resolve(gtk::WINDOW_PRESENT_WITH_TIME)?;
        self.window_present_with_time = Some(unsafe {
            mem::transmute::<*mut c_void, WindowPresentWithTimeFn>(address.as_ptr())
        });

        Ok(())
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Callable view of the table; `None` unless every symbol resolved
    pub fn api(&self) -> Option<GtkApi> {
        if !self.loaded {
            return None;
        }
        Some(GtkApi {
            display_get_default: self.display_get_default?,
            window_lookup_for_display: self.window_lookup_for_display?,
            window_get_user_data: self.window_get_user_data?,
            window_present_with_time: self.window_present_with_time?,
        })
    }

    #[cfg(test)]
    pub(crate) fn filled_slots(&self) -> usize {
        [
            self.display_get_default.is_some(),
            self.window_lookup_for_display.is_some(),
            self.window_get_user_data.is_some(),
            self.window_present_with_time.is_some(),
        ]
        .iter()
        .filter(|filled| **filled)
        .count()
    }
}

/// Why the presentation chain stopped before presenting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentMiss {
    /// GDK has no default display (GTK not initialised)
    NoDisplay,
    /// GDK does not know this XID
    UnknownWindow,
    /// The GdkWindow has no owning GtkWidget
    NoWidget,
}

/// Fully resolved GTK entry points
#[derive(Debug, Clone, Copy)]
pub struct GtkApi {
    display_get_default: DisplayGetDefaultFn,
    window_lookup_for_display: WindowLookupForDisplayFn,
    window_get_user_data: WindowGetUserDataFn,
    window_present_with_time: WindowPresentWithTimeFn,
}

impl GtkApi {
    fn default_display(&self) -> Option<NonNull<c_void>> {
        // SAFETY: takes no arguments
        NonNull::new(unsafe { (self.display_get_default)() })
    }

    fn lookup_window(&self, display: NonNull<c_void>, xid: NativeWindowId) -> Option<NonNull<c_void>> {
        // SAFETY: `display` came from gdk_display_get_default
        NonNull::new(unsafe { (self.window_lookup_for_display)(display.as_ptr(), xid as c_ulong) })
    }

    fn owning_widget(&self, window: NonNull<c_void>) -> Option<NonNull<c_void>> {
        let mut widget: *mut c_void = ptr::null_mut();
        // SAFETY: `window` came from the lookup above; `widget` is a valid out slot
        unsafe { (self.window_get_user_data)(window.as_ptr(), &mut widget) };
        NonNull::new(widget)
    }

    /// Map `xid` to its GtkWindow and present it with the triggering event's timestamp
    ///
    /// Each stage may legitimately come back empty; that ends the chain
    /// without touching anything.
    pub fn present_native_window(
        &self,
        xid: NativeWindowId,
        timestamp: i32,
    ) -> Result<(), PresentMiss> {
        let display = self.default_display().ok_or(PresentMiss::NoDisplay)?;
        let window = self
            .lookup_window(display, xid)
            .ok_or(PresentMiss::UnknownWindow)?;
        let widget = self.owning_widget(window).ok_or(PresentMiss::NoWidget)?;

        // SAFETY: `widget` is the GtkWindow owning the GdkWindow looked up above
        unsafe { (self.window_present_with_time)(widget.as_ptr(), timestamp as u32) };
        Ok(())
    }
}

/// Lazily resolved, never torn down [`GtkLibrary`]
pub struct SymbolCache<S> {
    source: S,
    library: OnceLock<GtkLibrary>,
}

impl<S: SymbolSource> SymbolCache<S> {
    pub const fn new(source: S) -> Self {
        Self {
            source,
            library: OnceLock::new(),
        }
    }

    /// Resolve on first use, then hand out the cached table
    ///
    /// A failed resolution is logged here, once.
    pub fn obtain(&self) -> &GtkLibrary {
        self.library.get_or_init(|| {
            let library = GtkLibrary::resolve(&self.source);
            match library.error() {
                Some(message) => error!(
                    error = %message,
                    "Failed to resolve GTK symbols, forced activation disabled"
                ),
                None => debug!("Resolved GTK presentation symbols"),
            }
            library
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.library.get().is_some()
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }
}

/// Process-wide table over the live symbol namespace
pub static GTK_SYMBOLS: SymbolCache<DlsymSource> = SymbolCache::new(DlsymSource);
