//! Chrome for dialog windows.

use std::sync::Arc;

use lattice_chrome_core::TaskQueue;
use lattice_chrome_core::logging::targets;

use super::chrome_widget::ChromeWidget;
use super::element::Widget;
use crate::window::HostWindow;

/// What goes into a dialog's chrome.
#[derive(Clone)]
pub struct DialogParts {
    /// The dialog content, installed as the central widget.
    pub content: Option<Arc<dyn Widget>>,
    /// Left title-bar widget.
    pub left: Option<Arc<dyn Widget>>,
    /// Right title-bar widget.
    pub right: Option<Arc<dyn Widget>>,
    /// Show the title text.
    pub title_visible: bool,
    /// Show the icon.
    pub icon_visible: bool,
}

impl Default for DialogParts {
    fn default() -> Self {
        Self {
            content: None,
            left: None,
            right: None,
            title_visible: true,
            icon_visible: true,
        }
    }
}

/// Wrap a dialog in chrome matching its parent window.
///
/// The dialog host mirrors the parent host's native caption buttons, the
/// dialog content becomes the central widget, and when `base` is given its
/// title-bar color, active border color and title alignment are inherited.
/// The caller shows `dialog_host` and drives its event loop; the returned
/// chrome keeps the masks in sync while it is alive.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use lattice_chrome::TaskQueue;
/// use lattice_chrome::render::{Color, Rect, Size};
/// use lattice_chrome::widget::{ChromeWidget, DialogParts, Element, exec_dialog_with_window};
/// use lattice_chrome::window::{HostWindow, MaskedHostWindow};
///
/// let queue = Arc::new(TaskQueue::new());
/// let main: Arc<dyn HostWindow> = Arc::new(MaskedHostWindow::new(Size::new(800, 600)));
/// let main_chrome = ChromeWidget::new(&main, &queue);
/// main_chrome.set_active_border_color(Some(Color::rgb(200, 40, 40)));
///
/// let dialog: Arc<dyn HostWindow> = Arc::new(MaskedHostWindow::new(Size::new(320, 200)));
/// let parts = DialogParts {
///     content: Some(Arc::new(Element::new("form", Rect::ZERO))),
///     icon_visible: false,
///     ..Default::default()
/// };
/// let chrome = exec_dialog_with_window(&dialog, Some(&main), Some(&main_chrome), &queue, parts);
///
/// assert_eq!(chrome.active_border_color(), Color::rgb(200, 40, 40));
/// assert!(!chrome.config().icon_visible);
/// ```
pub fn exec_dialog_with_window(
    dialog_host: &Arc<dyn HostWindow>,
    parent_host: Option<&Arc<dyn HostWindow>>,
    base: Option<&ChromeWidget>,
    queue: &Arc<TaskQueue>,
    parts: DialogParts,
) -> ChromeWidget {
    if let Some(parent) = parent_host {
        dialog_host.set_native_caption_buttons_visible(parent.native_caption_buttons_visible());
    }

    let chrome = ChromeWidget::new(dialog_host, queue);
    chrome.set_central_widget(parts.content);
    chrome.set_left_title_bar_widget(parts.left, false);
    chrome.set_right_title_bar_widget(parts.right, false);

    if let Some(base) = base {
        chrome.inherit_style(base);
    }

    chrome.set_title_visible(parts.title_visible);
    chrome.set_icon_visible(parts.icon_visible);

    tracing::debug!(
        target: targets::CHROME,
        inherited = base.is_some(),
        "dialog chrome created"
    );
    chrome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, Rect, Size};
    use crate::widget::{Element, TitleAlignment, TitleBarSlot};
    use crate::window::MaskedHostWindow;

    fn host(size: Size) -> Arc<dyn HostWindow> {
        Arc::new(MaskedHostWindow::new(size))
    }

    #[test]
    fn test_inherits_style() {
        let queue = Arc::new(TaskQueue::new());
        let main = host(Size::new(800, 600));
        let base = ChromeWidget::new(&main, &queue);
        base.set_title_bar_color(Some(Color::rgb(40, 40, 40)));
        base.set_title_alignment(TitleAlignment::Center);

        let dialog = host(Size::new(300, 200));
        let chrome =
            exec_dialog_with_window(&dialog, Some(&main), Some(&base), &queue, DialogParts::default());

        assert_eq!(chrome.title_bar_color(), Some(Color::rgb(40, 40, 40)));
        assert_eq!(chrome.title_alignment(), TitleAlignment::Center);
        assert_eq!(chrome.active_border_color(), base.active_border_color());
    }

    #[test]
    fn test_transparent_base_color_not_copied() {
        let queue = Arc::new(TaskQueue::new());
        let main = host(Size::new(800, 600));
        let base = ChromeWidget::new(&main, &queue);
        base.set_unified_title_bar_and_content(true);

        let dialog = host(Size::new(300, 200));
        let chrome = exec_dialog_with_window(&dialog, None, Some(&base), &queue, DialogParts::default());

        assert_eq!(chrome.title_bar_color(), None);
    }

    #[test]
    fn test_installs_parts() {
        let queue = Arc::new(TaskQueue::new());
        let dialog = host(Size::new(300, 200));
        let parts = DialogParts {
            content: Some(Arc::new(Element::new("form", Rect::ZERO))),
            left: Some(Arc::new(Element::new("back", Rect::new(0, 0, 30, 30)))),
            title_visible: false,
            ..Default::default()
        };

        let chrome = exec_dialog_with_window(&dialog, None, None, &queue, parts);

        assert!(chrome.central_widget().is_some());
        assert!(chrome.slot_widget(TitleBarSlot::Left).is_some());
        assert!(chrome.slot_widget(TitleBarSlot::Right).is_none());
        assert!(!chrome.config().title_visible);
    }

    #[test]
    fn test_mirrors_native_caption_buttons() {
        let queue = Arc::new(TaskQueue::new());
        let main = host(Size::new(800, 600));
        main.set_native_caption_buttons_visible(true);

        let dialog = host(Size::new(300, 200));
        exec_dialog_with_window(&dialog, Some(&main), None, &queue, DialogParts::default());

        assert!(dialog.native_caption_buttons_visible());
    }
}
