//! A host window backed by a winit window.
//!
//! The winit window is created without decorations. Pushed masks are stored
//! in an inner [`MaskedHostWindow`]; mouse presses are classified with the
//! same frameless hit-test and turned into native drag, resize, system-menu
//! and caption operations.

use std::sync::Arc;

use parking_lot::Mutex;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use lattice_chrome_core::logging::targets;
use lattice_chrome_render::{Point, Rect, Region, Size};

use super::frameless_chrome::ChromeHitTestResult;
use super::host_window::{HostWindow, HostWindowSignals, WindowState};
use super::masked_host::{HostMasks, MaskedHostWindow};
use super::window_icon::{IconError, WindowIcon};

/// Default thickness of the invisible resize border, in physical pixels.
pub const DEFAULT_RESIZE_BORDER: i32 = 6;

/// Error type for native window operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NativeWindowError {
    /// Window creation failed.
    #[error("window creation failed: {0}")]
    CreationFailed(String),
    /// Window drag operation failed.
    #[error("window drag operation failed: {0}")]
    DragFailed(String),
    /// Window resize operation failed.
    #[error("window resize operation failed: {0}")]
    ResizeFailed(String),
}

/// A frameless winit window acting as a chrome host.
///
/// Geometry is in physical pixels. Feed every [`WindowEvent`] for this
/// window to [`handle_window_event`](Self::handle_window_event).
///
/// ```ignore
/// use lattice_chrome::window::{HostWindow, WinitHostWindow};
///
/// // In ApplicationHandler::resumed
/// let host: Arc<dyn HostWindow> = Arc::new(WinitHostWindow::create(event_loop, "App", size)?);
/// let chrome = ChromeWidget::new(&host, &queue);
///
/// // In ApplicationHandler::window_event
/// winit_host.handle_window_event(&event)?;
/// queue.run_turn();
/// ```
pub struct WinitHostWindow {
    window: Arc<Window>,
    store: MaskedHostWindow,
    cursor: Mutex<Point>,
    pressed: Mutex<Option<ChromeHitTestResult>>,
    last_state: Mutex<WindowState>,
}

impl WinitHostWindow {
    /// Create a frameless window on the running event loop.
    pub fn create(
        event_loop: &ActiveEventLoop,
        title: &str,
        size: Size,
    ) -> Result<Self, NativeWindowError> {
        let attrs = Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(
                size.width.max(1) as u32,
                size.height.max(1) as u32,
            ))
            .with_decorations(false)
            .with_visible(false);
        let window = event_loop
            .create_window(attrs)
            .map_err(|e| NativeWindowError::CreationFailed(e.to_string()))?;
        Ok(Self::new(Arc::new(window)))
    }

    /// Wrap an existing winit window, removing its decorations.
    pub fn new(window: Arc<Window>) -> Self {
        window.set_decorations(false);
        let size = window.inner_size();
        let store = MaskedHostWindow::new(Size::from((size.width, size.height)));
        store.set_resize_border(DEFAULT_RESIZE_BORDER);

        let host = Self {
            window,
            store,
            cursor: Mutex::new(Point::ZERO),
            pressed: Mutex::new(None),
            last_state: Mutex::new(WindowState::NO_STATE),
        };
        *host.last_state.lock() = host.window_state();
        host
    }

    /// The underlying winit window.
    pub fn winit_window(&self) -> &Window {
        &self.window
    }

    /// The winit window ID.
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// The masks most recently pushed.
    pub fn masks(&self) -> HostMasks {
        self.store.masks()
    }

    /// Set the resize border thickness (zero disables resizing).
    pub fn set_resize_border(&self, border: i32) {
        self.store.set_resize_border(border);
    }

    /// Show the window and emit `shown`.
    pub fn show(&self) {
        self.window.set_visible(true);
        self.signals().shown.emit(());
    }

    /// Change the title and emit `title_changed`.
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
        self.signals().title_changed.emit(title.to_string());
    }

    /// Change the icon and emit `icon_changed`.
    pub fn set_icon(&self, icon: Option<WindowIcon>) -> Result<(), IconError> {
        let native = icon.as_ref().map(WindowIcon::to_winit_icon).transpose()?;
        self.window.set_window_icon(native);
        self.signals().icon_changed.emit(icon);
        Ok(())
    }

    /// Classify a point in window coordinates.
    pub fn hit_test(&self, point: Point) -> ChromeHitTestResult {
        let mut chrome = self.store.chrome();
        if !self.window_state().is_normal() {
            chrome.set_resize_border(0);
        }
        chrome.hit_test(point, self.size())
    }

    /// Process a winit event for this window.
    ///
    /// Returns `Ok(true)` when the event was consumed by the chrome (a drag,
    /// resize or caption action started) and should not reach widgets.
    pub fn handle_window_event(&self, event: &WindowEvent) -> Result<bool, NativeWindowError> {
        match event {
            WindowEvent::Resized(size) => {
                self.signals()
                    .resized
                    .emit(Size::from((size.width, size.height)));
                self.sync_state();
                Ok(false)
            }
            WindowEvent::Focused(focused) => {
                if *focused {
                    self.signals().activated.emit(());
                } else {
                    self.signals().deactivated.emit(());
                }
                self.sync_state();
                Ok(false)
            }
            WindowEvent::CloseRequested => {
                self.signals().close_requested.emit(());
                Ok(true)
            }
            WindowEvent::CursorMoved { position, .. } => {
                *self.cursor.lock() = Point::new(position.x as i32, position.y as i32);
                Ok(false)
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.handle_left_button(*state),
            _ => Ok(false),
        }
    }

    fn handle_left_button(&self, state: ElementState) -> Result<bool, NativeWindowError> {
        let cursor = *self.cursor.lock();
        let hit = self.hit_test(cursor);

        match state {
            ElementState::Pressed => {
                *self.pressed.lock() = Some(hit);
                match hit {
                    ChromeHitTestResult::Caption => {
                        self.window
                            .drag_window()
                            .map_err(|e| NativeWindowError::DragFailed(e.to_string()))?;
                        Ok(true)
                    }
                    ChromeHitTestResult::ResizeBorder(direction) => {
                        self.window
                            .drag_resize_window(direction)
                            .map_err(|e| NativeWindowError::ResizeFailed(e.to_string()))?;
                        Ok(true)
                    }
                    ChromeHitTestResult::SysMenu => {
                        self.window
                            .show_window_menu(PhysicalPosition::new(cursor.x, cursor.y));
                        Ok(true)
                    }
                    ChromeHitTestResult::Client => Ok(false),
                    _ => Ok(true),
                }
            }
            ElementState::Released => {
                let pressed = self.pressed.lock().take();
                if !hit.is_button() || pressed != Some(hit) {
                    return Ok(false);
                }
                tracing::debug!(target: targets::HOST, ?hit, "caption button activated");
                match hit {
                    ChromeHitTestResult::MinimizeButton => self.show_minimized(),
                    ChromeHitTestResult::MaximizeButton if self.is_maximized() => {
                        self.show_normal()
                    }
                    ChromeHitTestResult::MaximizeButton => self.show_maximized(),
                    ChromeHitTestResult::CloseButton => self.close(),
                    _ => {}
                }
                Ok(true)
            }
        }
    }

    /// Emit `state_changed` if the native state differs from the last seen.
    fn sync_state(&self) {
        let current = self.window_state();
        let changed = {
            let mut last = self.last_state.lock();
            let changed = (*last & !WindowState::ACTIVE) != (current & !WindowState::ACTIVE);
            *last = current;
            changed
        };
        if changed {
            tracing::debug!(target: targets::HOST, state = ?current, "native window state changed");
            self.signals().state_changed.emit(current);
        }
    }
}

impl HostWindow for WinitHostWindow {
    fn set_title_bar_height(&self, height: i32) {
        self.store.set_title_bar_height(height);
    }

    fn set_icon_width(&self, width: i32) {
        self.store.set_icon_width(width);
    }

    fn set_minimize_mask(&self, mask: Region) {
        self.store.set_minimize_mask(mask);
    }

    fn set_maximize_mask(&self, mask: Region) {
        self.store.set_maximize_mask(mask);
    }

    fn set_close_mask(&self, mask: Region) {
        self.store.set_close_mask(mask);
    }

    fn set_title_bar_mask(&self, mask: Region) {
        self.store.set_title_bar_mask(mask);
    }

    fn is_visible(&self) -> bool {
        self.window.is_visible().unwrap_or(true)
    }

    fn window_state(&self) -> WindowState {
        WindowState::NO_STATE
            .with(
                WindowState::MINIMIZED,
                self.window.is_minimized().unwrap_or(false),
            )
            .with(WindowState::MAXIMIZED, self.window.is_maximized())
            .with(WindowState::FULL_SCREEN, self.window.fullscreen().is_some())
            .with(WindowState::ACTIVE, self.window.has_focus())
    }

    fn size(&self) -> Size {
        let size = self.window.inner_size();
        Size::from((size.width, size.height))
    }

    fn title(&self) -> String {
        self.window.title()
    }

    fn title_bar_rect(&self) -> Rect {
        Rect::new(0, 0, self.size().width, self.store.masks().title_bar_height)
    }

    fn signals(&self) -> &HostWindowSignals {
        self.store.signals()
    }

    fn show_minimized(&self) {
        self.window.set_minimized(true);
        self.sync_state();
    }

    fn show_maximized(&self) {
        self.window.set_maximized(true);
        self.sync_state();
    }

    fn show_normal(&self) {
        self.window.set_fullscreen(None);
        self.window.set_minimized(false);
        self.window.set_maximized(false);
        self.sync_state();
    }

    fn close(&self) {
        self.signals().close_requested.emit(());
    }
}

impl std::fmt::Debug for WinitHostWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinitHostWindow")
            .field("id", &self.window.id())
            .field("size", &self.size())
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(WinitHostWindow: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_window_error_display() {
        let err = NativeWindowError::CreationFailed("no display".to_string());
        assert!(err.to_string().contains("no display"));

        let err = NativeWindowError::DragFailed("not supported".to_string());
        assert!(err.to_string().contains("drag"));

        let err = NativeWindowError::ResizeFailed("not supported".to_string());
        assert!(err.to_string().contains("resize"));
    }
}
