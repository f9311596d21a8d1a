//! Visibility of the attached terminal
//!
//! On Windows the tool is linked as a console program, so a window appears
//! even when it is about to start the archive browser. The controller shows it
//! for batch work and hides it again for interactive mode. Other platforms
//! have nothing to toggle.

use tracing::debug;

use crate::types::ConsoleVisibility;

/// Single entry point for console visibility changes
pub trait ConsoleController {
    fn set_visibility(&mut self, visibility: ConsoleVisibility);

    fn show(&mut self) {
        self.set_visibility(ConsoleVisibility::Shown);
    }

    fn hide(&mut self) {
        self.set_visibility(ConsoleVisibility::Hidden);
    }
}

/// Console controller for the host platform
#[derive(Debug, Default)]
pub struct PlatformConsole {
    current: Option<ConsoleVisibility>,
}

impl PlatformConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last requested visibility, if any
    pub fn current(&self) -> Option<ConsoleVisibility> {
        self.current
    }
}

impl ConsoleController for PlatformConsole {
    fn set_visibility(&mut self, visibility: ConsoleVisibility) {
        let applied = platform::apply(visibility);
        debug!(?visibility, applied, "console visibility");
        self.current = Some(visibility);
    }
}

#[cfg(windows)]
mod platform {
    use std::ffi::c_void;

    use crate::types::ConsoleVisibility;

    const SW_HIDE: i32 = 0;
    const SW_SHOW: i32 = 5;

    #[link(name = "kernel32")]
    extern "system" {
        fn GetConsoleWindow() -> *mut c_void;
    }

    #[link(name = "user32")]
    extern "system" {
        fn ShowWindow(hwnd: *mut c_void, cmd_show: i32) -> i32;
    }

    pub(super) fn apply(visibility: ConsoleVisibility) -> bool {
        let cmd = match visibility {
            ConsoleVisibility::Shown => SW_SHOW,
            ConsoleVisibility::Hidden => SW_HIDE,
        };
        // SAFETY: both calls take no pointers we own; a null window handle
        // means no console is attached and is checked before use.
        unsafe {
            let window = GetConsoleWindow();
            if window.is_null() {
                return false;
            }
            ShowWindow(window, cmd);
        }
        true
    }
}

#[cfg(not(windows))]
mod platform {
    use crate::types::ConsoleVisibility;

    pub(super) fn apply(_visibility: ConsoleVisibility) -> bool {
        false
    }
}
