//! The host window contract.
//!
//! A host window is the native top-level window that owns OS-level
//! hit-testing. The chrome widget never draws into it directly; it only
//! pushes hit-test masks and reads back window state.

use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use lattice_chrome_core::Signal;
use lattice_chrome_render::{Rect, Region, Size};

use super::window_icon::WindowIcon;

/// State flags of a host window.
///
/// Flags combine with bitwise OR. A window with none of the minimized,
/// maximized or full-screen bits set is in the "normal" state; activation is
/// tracked independently.
///
/// # Example
///
/// ```
/// use lattice_chrome::window::WindowState;
///
/// let state = WindowState::MAXIMIZED | WindowState::ACTIVE;
/// assert!(state.is_maximized());
/// assert!(!state.is_normal());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowState(u8);

impl WindowState {
    /// No special state.
    pub const NO_STATE: WindowState = WindowState(0);

    /// Window is minimized (iconified).
    pub const MINIMIZED: WindowState = WindowState(1 << 0);

    /// Window is maximized.
    pub const MAXIMIZED: WindowState = WindowState(1 << 1);

    /// Window covers the entire screen.
    pub const FULL_SCREEN: WindowState = WindowState(1 << 2);

    /// Window has keyboard focus.
    pub const ACTIVE: WindowState = WindowState(1 << 3);

    const GEOMETRY_MASK: u8 = Self::MINIMIZED.0 | Self::MAXIMIZED.0 | Self::FULL_SCREEN.0;

    /// Check if a flag is set.
    pub fn has(&self, flag: WindowState) -> bool {
        (self.0 & flag.0) == flag.0
    }

    /// Return the state with `flag` set or cleared.
    pub fn with(self, flag: WindowState, on: bool) -> Self {
        if on {
            WindowState(self.0 | flag.0)
        } else {
            WindowState(self.0 & !flag.0)
        }
    }

    /// Check if the window is in the normal state (not minimized, maximized
    /// or full-screen).
    pub fn is_normal(&self) -> bool {
        self.0 & Self::GEOMETRY_MASK == 0
    }

    /// Check if the window is minimized.
    pub fn is_minimized(&self) -> bool {
        self.has(Self::MINIMIZED)
    }

    /// Check if the window is maximized.
    pub fn is_maximized(&self) -> bool {
        self.has(Self::MAXIMIZED)
    }

    /// Check if the window is full-screen.
    pub fn is_full_screen(&self) -> bool {
        self.has(Self::FULL_SCREEN)
    }

    /// Check if the window is active.
    pub fn is_active(&self) -> bool {
        self.has(Self::ACTIVE)
    }
}

impl BitOr for WindowState {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        WindowState(self.0 | rhs.0)
    }
}

impl BitOrAssign for WindowState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for WindowState {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        WindowState(self.0 & rhs.0)
    }
}

impl Not for WindowState {
    type Output = Self;

    fn not(self) -> Self::Output {
        WindowState(!self.0)
    }
}

/// Lifecycle notifications emitted by a host window.
///
/// The chrome widget subscribes to these instead of intercepting the
/// window's event stream.
#[derive(Default)]
pub struct HostWindowSignals {
    /// The window became visible.
    pub shown: Signal<()>,
    /// The window's client size changed.
    pub resized: Signal<Size>,
    /// The window state flags changed.
    pub state_changed: Signal<WindowState>,
    /// The window gained activation.
    pub activated: Signal<()>,
    /// The window lost activation.
    pub deactivated: Signal<()>,
    /// The window title changed.
    pub title_changed: Signal<String>,
    /// The window icon changed.
    pub icon_changed: Signal<Option<WindowIcon>>,
    /// Visibility of the OS-drawn caption buttons changed (macOS).
    pub native_caption_buttons_changed: Signal<bool>,
    /// Closing the window was requested.
    pub close_requested: Signal<()>,
}

impl std::fmt::Debug for HostWindowSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostWindowSignals").finish_non_exhaustive()
    }
}

/// A native top-level window that owns OS-level hit-testing.
///
/// # Mask semantics
///
/// Masks are expressed in window-local coordinates. Inside the title-bar band
/// (the top [`set_title_bar_height`](Self::set_title_bar_height) pixels):
///
/// - the leftmost [`set_icon_width`](Self::set_icon_width) pixels open the
///   system menu,
/// - the minimize/maximize/close masks map to the caption actions,
/// - the title-bar mask marks interactive islands whose events pass through
///   to ordinary widgets,
/// - everything else drags the window.
///
/// All methods take `&self`; implementations use interior mutability so a
/// window can be shared between the chrome widget and the event loop.
pub trait HostWindow: Send + Sync {
    // =========================================================================
    // Mask Setters
    // =========================================================================

    /// Set the height of the title-bar band in pixels.
    fn set_title_bar_height(&self, height: i32);

    /// Set the width of the system-menu area at the left of the band.
    fn set_icon_width(&self, width: i32);

    /// Set the minimize button hit region.
    fn set_minimize_mask(&self, mask: Region);

    /// Set the maximize/restore button hit region.
    fn set_maximize_mask(&self, mask: Region);

    /// Set the close button hit region.
    fn set_close_mask(&self, mask: Region);

    /// Set the interactive islands inside the title-bar band.
    fn set_title_bar_mask(&self, mask: Region);

    // =========================================================================
    // Queries
    // =========================================================================

    /// Check if the window is visible.
    fn is_visible(&self) -> bool;

    /// Current state flags.
    fn window_state(&self) -> WindowState;

    /// Current client size.
    fn size(&self) -> Size;

    /// Current window title.
    fn title(&self) -> String;

    /// Check if the window is minimized.
    fn is_minimized(&self) -> bool {
        self.window_state().is_minimized()
    }

    /// Check if the window is active.
    fn is_active(&self) -> bool {
        self.window_state().is_active()
    }

    /// Check if the window is maximized.
    fn is_maximized(&self) -> bool {
        self.window_state().is_maximized()
    }

    /// Check if the window is full-screen.
    fn is_full_screen(&self) -> bool {
        self.window_state().is_full_screen()
    }

    /// The title-bar band in window-local coordinates.
    fn title_bar_rect(&self) -> Rect;

    /// Lifecycle signals.
    fn signals(&self) -> &HostWindowSignals;

    // =========================================================================
    // Actions
    // =========================================================================

    /// Minimize the window.
    fn show_minimized(&self);

    /// Maximize the window.
    fn show_maximized(&self);

    /// Restore the window to the normal state.
    fn show_normal(&self);

    /// Request the window to close.
    fn close(&self);

    // =========================================================================
    // Native Caption Buttons (macOS)
    // =========================================================================

    /// Check if the OS-drawn caption buttons are visible.
    fn native_caption_buttons_visible(&self) -> bool {
        false
    }

    /// Show or hide the OS-drawn caption buttons.
    fn set_native_caption_buttons_visible(&self, _visible: bool) {}

    /// Rectangle of the OS-drawn caption-button cluster.
    fn native_caption_buttons_rect(&self) -> Rect {
        Rect::ZERO
    }
}

static_assertions::assert_impl_all!(HostWindowSignals: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_state_normal() {
        assert!(WindowState::NO_STATE.is_normal());
        assert!(WindowState::ACTIVE.is_normal());
        assert!(!WindowState::MINIMIZED.is_normal());
        assert!(!(WindowState::FULL_SCREEN | WindowState::ACTIVE).is_normal());
    }

    #[test]
    fn test_window_state_with() {
        let state = WindowState::NO_STATE
            .with(WindowState::MAXIMIZED, true)
            .with(WindowState::ACTIVE, true);
        assert!(state.is_maximized());
        assert!(state.is_active());

        let state = state.with(WindowState::MAXIMIZED, false);
        assert!(!state.is_maximized());
        assert!(state.is_normal());
        assert_eq!(state & WindowState::ACTIVE, WindowState::ACTIVE);
    }
}
