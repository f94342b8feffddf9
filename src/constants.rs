//! Application-wide constants
//!
//! Symbol names, session heuristics and X11 protocol values used across
//! the activator, kept in one place.

/// Foreign GTK/GDK entry points, resolved from the global symbol namespace
pub mod gtk {
    /// `GdkDisplay *gdk_display_get_default(void)`
    pub const DISPLAY_GET_DEFAULT: &std::ffi::CStr = c"gdk_display_get_default";

    /// `GdkWindow *gdk_x11_window_lookup_for_display(GdkDisplay *, Window)`
    pub const X11_WINDOW_LOOKUP_FOR_DISPLAY: &std::ffi::CStr = c"gdk_x11_window_lookup_for_display";

    /// `void gdk_window_get_user_data(GdkWindow *, gpointer *)`
    pub const WINDOW_GET_USER_DATA: &std::ffi::CStr = c"gdk_window_get_user_data";

    /// `void gtk_window_present_with_time(GtkWindow *, guint32)`
    pub const WINDOW_PRESENT_WITH_TIME: &std::ffi::CStr = c"gtk_window_present_with_time";

    /// Resolution order; the resolver stops at the first missing entry
    pub const SYMBOL_ORDER: [&std::ffi::CStr; 4] = [
        DISPLAY_GET_DEFAULT,
        X11_WINDOW_LOOKUP_FOR_DISPLAY,
        WINDOW_GET_USER_DATA,
        WINDOW_PRESENT_WITH_TIME,
    ];
}

/// Desktop session detection defaults
pub mod session {
    /// Process whose presence marks a GNOME session
    pub const SESSION_PROCESS: &str = "gnome-session";

    /// Command used to look up a process by name
    pub const PROCESS_QUERY_COMMAND: &str = "pidof";

    /// Set (non-empty) by KDE Plasma sessions
    pub const COMPETING_SESSION_VAR: &str = "KDE_FULL_SESSION";

    /// Environment variables worth reporting when diagnosing activation problems,
    /// alongside the configured competing-session variable
    pub const DIAGNOSTIC_VARS: &[&str] = &[
        "XDG_SESSION_TYPE",
        "XDG_CURRENT_DESKTOP",
        "DESKTOP_SESSION",
        "DISPLAY",
        "WAYLAND_DISPLAY",
    ];
}

/// X11 protocol constants
pub mod x11 {
    /// Source indication for _NET_ACTIVE_WINDOW (1 = normal application)
    pub const ACTIVE_WINDOW_SOURCE_APPLICATION: u32 = 1;

    /// _NET_WM_STATE action: remove/unset property (0)
    pub const NET_WM_STATE_REMOVE: u32 = 0;

    /// ICCCM WM_STATE value for an iconified window
    pub const ICONIC_STATE: u32 = 3;
}

/// Configuration file constants
pub mod config {
    /// Directory name under the user's config dir
    pub const APP_DIR: &str = "window-activator";

    /// Config file name
    pub const FILENAME: &str = "config.json";

    /// Environment variable overriding the config directory
    pub const DIR_OVERRIDE_VAR: &str = "WINDOW_ACTIVATOR_CONFIG_DIR";
}
