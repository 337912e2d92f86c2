//! A host window that stores the pushed masks and hit-tests against them.
//!
//! [`MaskedHostWindow`] keeps all window state in memory. It drives headless
//! setups (tests, off-screen rendering) directly, and [`WinitHostWindow`]
//! uses it as its mask and signal store.
//!
//! [`WinitHostWindow`]: super::WinitHostWindow

use parking_lot::Mutex;

use lattice_chrome_core::logging::targets;
use lattice_chrome_render::{Point, Rect, Region, Size};

use super::frameless_chrome::{ChromeHitTestResult, FramelessWindowChrome};
use super::host_window::{HostWindow, HostWindowSignals, WindowState};
use super::window_icon::WindowIcon;

/// Snapshot of the masks most recently pushed to a host window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostMasks {
    /// Height of the title-bar band.
    pub title_bar_height: i32,
    /// Width of the system-menu area.
    pub icon_width: i32,
    /// Interactive islands inside the band.
    pub title_bar: Region,
    /// Minimize button region.
    pub minimize: Region,
    /// Maximize button region.
    pub maximize: Region,
    /// Close button region.
    pub close: Region,
    /// Number of setter calls received, across all masks.
    pub pushes: u64,
}

#[derive(Debug)]
struct HostState {
    visible: bool,
    state: WindowState,
    size: Size,
    title: String,
    icon: Option<WindowIcon>,
    native_caption_buttons: bool,
    native_caption_buttons_rect: Rect,
    close_requests: u64,
    resize_border: i32,
    masks: HostMasks,
}

/// An in-memory host window.
///
/// State-changing methods emit the matching [`HostWindowSignals`], exactly
/// like a native window reporting OS events would.
///
/// # Example
///
/// ```
/// use lattice_chrome::render::Size;
/// use lattice_chrome::window::{HostWindow, MaskedHostWindow};
///
/// let host = MaskedHostWindow::new(Size::new(640, 480));
/// assert!(!host.is_visible());
///
/// host.show();
/// host.show_maximized();
/// assert!(host.is_maximized());
/// ```
pub struct MaskedHostWindow {
    state: Mutex<HostState>,
    signals: HostWindowSignals,
}

impl MaskedHostWindow {
    /// Create a hidden, inactive window of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            state: Mutex::new(HostState {
                visible: false,
                state: WindowState::NO_STATE,
                size,
                title: String::new(),
                icon: None,
                native_caption_buttons: false,
                native_caption_buttons_rect: Rect::ZERO,
                close_requests: 0,
                resize_border: 0,
                masks: HostMasks::default(),
            }),
            signals: HostWindowSignals::default(),
        }
    }

    // =========================================================================
    // Simulated OS Events
    // =========================================================================

    /// Make the window visible and emit `shown`.
    pub fn show(&self) {
        self.state.lock().visible = true;
        self.signals.shown.emit(());
    }

    /// Hide the window.
    pub fn hide(&self) {
        self.state.lock().visible = false;
    }

    /// Change the client size and emit `resized`.
    pub fn resize(&self, size: Size) {
        {
            let mut state = self.state.lock();
            if state.size == size {
                return;
            }
            state.size = size;
        }
        self.signals.resized.emit(size);
    }

    /// Change activation and emit `activated`/`deactivated`.
    pub fn set_active(&self, active: bool) {
        {
            let mut state = self.state.lock();
            if state.state.is_active() == active {
                return;
            }
            state.state = state.state.with(WindowState::ACTIVE, active);
        }
        if active {
            self.signals.activated.emit(());
        } else {
            self.signals.deactivated.emit(());
        }
    }

    /// Replace the minimized/maximized/full-screen flags and emit
    /// `state_changed`. The active flag is preserved.
    pub fn set_window_state(&self, flags: WindowState) {
        let new_state = {
            let mut state = self.state.lock();
            let active = state.state.is_active();
            let new_state = (flags & !WindowState::ACTIVE).with(WindowState::ACTIVE, active);
            if new_state == state.state {
                return;
            }
            state.state = new_state;
            new_state
        };
        tracing::debug!(target: targets::HOST, ?new_state, "host window state changed");
        self.signals.state_changed.emit(new_state);
    }

    /// Enter or leave full-screen.
    pub fn set_full_screen(&self, full_screen: bool) {
        let flags = if full_screen {
            WindowState::FULL_SCREEN
        } else {
            WindowState::NO_STATE
        };
        self.set_window_state(flags);
    }

    /// Change the title and emit `title_changed`.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.state.lock().title = title.clone();
        self.signals.title_changed.emit(title);
    }

    /// Change the icon and emit `icon_changed`.
    pub fn set_icon(&self, icon: Option<WindowIcon>) {
        self.state.lock().icon = icon.clone();
        self.signals.icon_changed.emit(icon);
    }

    /// Current icon.
    pub fn icon(&self) -> Option<WindowIcon> {
        self.state.lock().icon.clone()
    }

    /// Set the rectangle of the OS-drawn caption-button cluster.
    pub fn set_native_caption_buttons_rect(&self, rect: Rect) {
        self.state.lock().native_caption_buttons_rect = rect;
    }

    /// Set the resize border used by [`hit_test`](Self::hit_test) in the
    /// normal state.
    pub fn set_resize_border(&self, border: i32) {
        self.state.lock().resize_border = border.max(0);
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// The masks most recently pushed.
    pub fn masks(&self) -> HostMasks {
        self.state.lock().masks.clone()
    }

    /// Number of times [`close`](HostWindow::close) was called.
    pub fn close_requests(&self) -> u64 {
        self.state.lock().close_requests
    }

    /// Hit-test configuration built from the pushed masks.
    ///
    /// Resize borders only apply in the normal state.
    pub fn chrome(&self) -> FramelessWindowChrome {
        let state = self.state.lock();
        let masks = &state.masks;
        let border = if state.state.is_normal() {
            state.resize_border
        } else {
            0
        };
        FramelessWindowChrome::new()
            .with_title_bar_height(masks.title_bar_height)
            .with_icon_width(masks.icon_width)
            .with_title_bar_mask(masks.title_bar.clone())
            .with_minimize_mask(masks.minimize.clone())
            .with_maximize_mask(masks.maximize.clone())
            .with_close_mask(masks.close.clone())
            .with_resize_border(border)
    }

    /// Classify a point in window coordinates.
    pub fn hit_test(&self, point: Point) -> ChromeHitTestResult {
        let size = self.size();
        self.chrome().hit_test(point, size)
    }

    fn update_masks(&self, f: impl FnOnce(&mut HostMasks)) {
        let mut state = self.state.lock();
        f(&mut state.masks);
        state.masks.pushes += 1;
    }
}

impl HostWindow for MaskedHostWindow {
    fn set_title_bar_height(&self, height: i32) {
        self.update_masks(|m| m.title_bar_height = height.max(0));
    }

    fn set_icon_width(&self, width: i32) {
        self.update_masks(|m| m.icon_width = width.max(0));
    }

    fn set_minimize_mask(&self, mask: Region) {
        self.update_masks(|m| m.minimize = mask);
    }

    fn set_maximize_mask(&self, mask: Region) {
        self.update_masks(|m| m.maximize = mask);
    }

    fn set_close_mask(&self, mask: Region) {
        self.update_masks(|m| m.close = mask);
    }

    fn set_title_bar_mask(&self, mask: Region) {
        self.update_masks(|m| m.title_bar = mask);
    }

    fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    fn window_state(&self) -> WindowState {
        self.state.lock().state
    }

    fn size(&self) -> Size {
        self.state.lock().size
    }

    fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    fn title_bar_rect(&self) -> Rect {
        let state = self.state.lock();
        Rect::new(0, 0, state.size.width, state.masks.title_bar_height)
    }

    fn signals(&self) -> &HostWindowSignals {
        &self.signals
    }

    fn show_minimized(&self) {
        self.set_window_state(WindowState::MINIMIZED);
    }

    fn show_maximized(&self) {
        self.set_window_state(WindowState::MAXIMIZED);
    }

    fn show_normal(&self) {
        self.set_window_state(WindowState::NO_STATE);
    }

    fn close(&self) {
        self.state.lock().close_requests += 1;
        self.signals.close_requested.emit(());
    }

    fn native_caption_buttons_visible(&self) -> bool {
        self.state.lock().native_caption_buttons
    }

    fn set_native_caption_buttons_visible(&self, visible: bool) {
        {
            let mut state = self.state.lock();
            if state.native_caption_buttons == visible {
                return;
            }
            state.native_caption_buttons = visible;
        }
        self.signals.native_caption_buttons_changed.emit(visible);
    }

    fn native_caption_buttons_rect(&self) -> Rect {
        self.state.lock().native_caption_buttons_rect
    }
}

impl std::fmt::Debug for MaskedHostWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MaskedHostWindow")
            .field("visible", &state.visible)
            .field("state", &state.state)
            .field("size", &state.size)
            .field("title", &state.title)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(MaskedHostWindow: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_state_signals() {
        let host = MaskedHostWindow::new(Size::new(800, 600));
        let changes = Arc::new(AtomicUsize::new(0));

        let changes_clone = changes.clone();
        host.signals().state_changed.connect(move |_| {
            changes_clone.fetch_add(1, Ordering::SeqCst);
        });

        host.show_maximized();
        host.show_maximized();
        host.show_normal();

        assert_eq!(changes.load(Ordering::SeqCst), 2);
        assert!(host.window_state().is_normal());
    }

    #[test]
    fn test_active_flag_survives_state_change() {
        let host = MaskedHostWindow::new(Size::new(800, 600));
        host.set_active(true);
        host.show_maximized();

        assert!(host.is_active());
        assert!(host.is_maximized());
    }

    #[test]
    fn test_masks_recorded() {
        let host = MaskedHostWindow::new(Size::new(800, 600));
        host.set_title_bar_height(30);
        host.set_close_mask(Region::from_rect(Rect::new(764, 0, 36, 30)));

        let masks = host.masks();
        assert_eq!(masks.title_bar_height, 30);
        assert_eq!(masks.pushes, 2);
        assert_eq!(host.title_bar_rect(), Rect::new(0, 0, 800, 30));
        assert_eq!(
            host.hit_test(Point::new(780, 10)),
            ChromeHitTestResult::CloseButton
        );
        assert_eq!(host.hit_test(Point::new(400, 10)), ChromeHitTestResult::Caption);
    }

    #[test]
    fn test_resize_border_only_when_normal() {
        let host = MaskedHostWindow::new(Size::new(800, 600));
        host.set_resize_border(4);

        assert!(host.hit_test(Point::new(1, 300)).is_resize());
        host.show_maximized();
        assert_eq!(host.hit_test(Point::new(1, 300)), ChromeHitTestResult::Client);
    }

    #[test]
    fn test_close_emits_request() {
        let host = MaskedHostWindow::new(Size::new(800, 600));
        let closed = Arc::new(AtomicUsize::new(0));
        let closed_clone = closed.clone();
        host.signals().close_requested.connect(move |_| {
            closed_clone.fetch_add(1, Ordering::SeqCst);
        });

        host.close();
        assert_eq!(host.close_requests(), 1);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }
}
