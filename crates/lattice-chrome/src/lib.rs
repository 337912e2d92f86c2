//! Lattice Chrome - custom window chrome for frameless desktop windows.
//!
//! A [`ChromeWidget`](widget::ChromeWidget) composes a title bar (caption
//! buttons, icon, title text and optional left/center/right widgets) with a
//! central content widget, and keeps the host window's hit-test masks in sync
//! with the rendered layout whenever the window is shown, resized, changes
//! state or gains/loses activation.
//!
//! This is the umbrella crate; it re-exports the core systems and exposes the
//! geometry crate as [`render`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lattice_chrome::TaskQueue;
//! use lattice_chrome::render::{Rect, Size};
//! use lattice_chrome::widget::{ChromeWidget, Element};
//! use lattice_chrome::window::{HostWindow, MaskedHostWindow};
//!
//! let queue = Arc::new(TaskQueue::new());
//! let host = Arc::new(MaskedHostWindow::new(Size::new(800, 600)));
//! let host_dyn: Arc<dyn HostWindow> = host.clone();
//!
//! let chrome = ChromeWidget::new(&host_dyn, &queue);
//! chrome.set_central_widget(Some(Arc::new(Element::new("content", Rect::ZERO))));
//!
//! host.show();
//! queue.run_turn();
//!
//! // Caption buttons are anchored to the right edge.
//! assert_eq!(host.masks().close.bounding_rect(), Rect::new(764, 0, 36, 30));
//! ```

pub use lattice_chrome_core::*;

/// Geometry, regions and coverage masks.
pub mod render {
    pub use lattice_chrome_render::*;
}

pub mod platform;
pub mod prelude;
pub mod widget;
pub mod window;
