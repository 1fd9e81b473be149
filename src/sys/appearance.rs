//! Tracks whether the system-wide interface theme is dark.
//!
//! The flag is owned by the process and refreshed from the theme-changed
//! notification; readers only ever see the last observed state.

use std::sync::atomic::{AtomicBool, Ordering};

use objc2_foundation::{NSUserDefaults, ns_string};

static DARK_MODE: AtomicBool = AtomicBool::new(false);

pub fn init_appearance_state() {
    DARK_MODE.store(read_interface_theme(), Ordering::Relaxed);
}

/// Records the current dark-mode state, returning the previous one.
pub fn set_dark_mode_state(enabled: bool) -> bool {
    DARK_MODE.swap(enabled, Ordering::Relaxed)
}

pub fn dark_mode_enabled() -> bool {
    DARK_MODE.load(Ordering::Relaxed)
}

/// Reads the `AppleInterfaceStyle` global default. The key is only present
/// when dark mode is on; absence means the light theme.
pub fn read_interface_theme() -> bool {
    let style =
        unsafe { NSUserDefaults::standardUserDefaults().stringForKey(ns_string!("AppleInterfaceStyle")) };
    style.is_some_and(|s| s.to_string().to_lowercase().contains("dark"))
}
