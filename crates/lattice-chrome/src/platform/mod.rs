//! Platform chrome capabilities.
//!
//! Platforms differ in who draws the window border, whether the frame gets
//! rounded corners, and whether the OS draws its own caption buttons. The
//! chrome widget asks a [`PlatformChrome`] instead of branching on the
//! target OS, and [`current`] picks the implementation at startup.
//!
//! ```
//! use lattice_chrome::platform::{self, LinuxChrome, PlatformChrome};
//!
//! let linux = LinuxChrome;
//! assert!(linux.supports_rounded_corners());
//!
//! let running = platform::current();
//! println!("chrome for {}", running.name());
//! ```

use std::sync::Arc;

use lattice_chrome_core::logging::targets;
use lattice_chrome_render::Rect;

use crate::window::HostWindow;

/// Platform-specific chrome behavior.
pub trait PlatformChrome: Send + Sync {
    /// Short platform name for logging.
    fn name(&self) -> &'static str;

    /// Whether the frame is drawn with rounded corners and the content area
    /// is clipped to match.
    fn supports_rounded_corners(&self) -> bool;

    /// Whether the OS draws the window border itself.
    fn borders_drawn_by_system(&self) -> bool;

    /// Whether the OS draws caption buttons that replace the chrome's own.
    fn native_caption_buttons_active(&self, _host: &dyn HostWindow) -> bool {
        false
    }

    /// Rectangle of the OS-drawn caption-button cluster.
    fn native_caption_buttons_rect(&self, _host: &dyn HostWindow) -> Rect {
        Rect::ZERO
    }

    /// Whether title-bar visibility is mirrored to the native caption buttons.
    fn manages_native_caption_buttons(&self) -> bool {
        false
    }
}

/// Linux: custom border and rounded corners drawn by the chrome.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxChrome;

impl PlatformChrome for LinuxChrome {
    fn name(&self) -> &'static str {
        "linux"
    }

    fn supports_rounded_corners(&self) -> bool {
        true
    }

    fn borders_drawn_by_system(&self) -> bool {
        false
    }
}

/// macOS: the system draws borders, and may draw the traffic-light buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacChrome;

impl PlatformChrome for MacChrome {
    fn name(&self) -> &'static str {
        "macos"
    }

    fn supports_rounded_corners(&self) -> bool {
        false
    }

    fn borders_drawn_by_system(&self) -> bool {
        true
    }

    fn native_caption_buttons_active(&self, host: &dyn HostWindow) -> bool {
        host.native_caption_buttons_visible()
    }

    fn native_caption_buttons_rect(&self, host: &dyn HostWindow) -> Rect {
        host.native_caption_buttons_rect()
    }

    fn manages_native_caption_buttons(&self) -> bool {
        true
    }
}

/// Windows: Windows 11 draws the border itself, Windows 10 does not.
#[derive(Debug, Clone, Copy)]
pub struct WindowsChrome {
    system_borders: bool,
}

impl WindowsChrome {
    /// Windows 11 and later (system-drawn borders).
    pub const fn windows11() -> Self {
        Self {
            system_borders: true,
        }
    }

    /// Windows 10 (chrome-drawn borders).
    pub const fn windows10() -> Self {
        Self {
            system_borders: false,
        }
    }
}

impl Default for WindowsChrome {
    fn default() -> Self {
        Self::windows11()
    }
}

impl PlatformChrome for WindowsChrome {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn supports_rounded_corners(&self) -> bool {
        false
    }

    fn borders_drawn_by_system(&self) -> bool {
        self.system_borders
    }
}

/// The chrome behavior for the running platform.
pub fn current() -> Arc<dyn PlatformChrome> {
    let platform: Arc<dyn PlatformChrome> = match std::env::consts::OS {
        "macos" => Arc::new(MacChrome),
        "windows" => Arc::new(WindowsChrome::default()),
        _ => Arc::new(LinuxChrome),
    };
    tracing::debug!(target: targets::CHROME, platform = platform.name(), "selected platform chrome");
    platform
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::MaskedHostWindow;
    use lattice_chrome_render::Size;

    #[test]
    fn test_capabilities() {
        assert!(LinuxChrome.supports_rounded_corners());
        assert!(!LinuxChrome.borders_drawn_by_system());
        assert!(MacChrome.borders_drawn_by_system());
        assert!(WindowsChrome::windows11().borders_drawn_by_system());
        assert!(!WindowsChrome::windows10().borders_drawn_by_system());
    }

    #[test]
    fn test_native_caption_buttons_follow_host_on_mac() {
        let host = MaskedHostWindow::new(Size::new(800, 600));
        host.set_native_caption_buttons_rect(Rect::new(8, 6, 52, 16));

        assert!(!MacChrome.native_caption_buttons_active(&host));
        host.set_native_caption_buttons_visible(true);
        assert!(MacChrome.native_caption_buttons_active(&host));
        assert_eq!(
            MacChrome.native_caption_buttons_rect(&host),
            Rect::new(8, 6, 52, 16)
        );

        // Other platforms never report native buttons.
        assert!(!LinuxChrome.native_caption_buttons_active(&host));
    }

    #[test]
    fn test_current_matches_os() {
        let platform = current();
        match std::env::consts::OS {
            "macos" => assert_eq!(platform.name(), "macos"),
            "windows" => assert_eq!(platform.name(), "windows"),
            _ => assert_eq!(platform.name(), "linux"),
        }
    }
}
