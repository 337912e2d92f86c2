//! Host windows.
//!
//! The chrome widget talks to its native window only through the
//! [`HostWindow`] trait: it pushes hit-test masks and reads window state, and
//! it subscribes to the window's [`HostWindowSignals`].
//!
//! Two implementations ship with the crate:
//!
//! - [`MaskedHostWindow`] - an in-memory window for headless use and tests
//! - [`WinitHostWindow`] - a frameless winit window that turns mouse presses
//!   into native drag/resize/caption operations
//!
//! ```ignore
//! use lattice_chrome::window::{ChromeHitTestResult, MaskedHostWindow};
//!
//! let host = MaskedHostWindow::new(Size::new(800, 600));
//! // ... chrome pushes masks ...
//! match host.hit_test(Point::new(400, 10)) {
//!     ChromeHitTestResult::Caption => { /* drag */ }
//!     ChromeHitTestResult::Client => { /* widget handling */ }
//!     _ => {}
//! }
//! ```

mod frameless_chrome;
mod host_window;
mod masked_host;
mod window_icon;
mod winit_host;

pub use frameless_chrome::{ChromeHitTestResult, FramelessWindowChrome, ResizeDirection};
pub use host_window::{HostWindow, HostWindowSignals, WindowState};
pub use masked_host::{HostMasks, MaskedHostWindow};
pub use window_icon::{IconError, TITLE_BAR_ICON_SIZE, WindowIcon};
pub use winit_host::{DEFAULT_RESIZE_BORDER, NativeWindowError, WinitHostWindow};
