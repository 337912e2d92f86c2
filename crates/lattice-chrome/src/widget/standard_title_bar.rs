//! The stock title bar.
//!
//! Layout, left to right:
//!
//! ```text
//! | margin | icon | left slot |   title ~ center slot ~ title   | right slot | _ | □ | x |
//! ```
//!
//! The left margin reserves room for OS-drawn caption buttons (macOS). The
//! icon cell is square. The center slot is centered in the space between the
//! left and right slots, which is also where the title text goes.

use std::sync::Arc;

use parking_lot::Mutex;

use lattice_chrome_core::logging::targets;
use lattice_chrome_render::{Color, Point, Rect, Size};

use super::element::Widget;
use super::title_bar::{TitleAlignment, TitleBar, TitleBarSignals, TitleBarSlot};
use crate::window::WindowIcon;

/// Default title-bar height in pixels.
pub const DEFAULT_TITLE_BAR_HEIGHT: i32 = 30;

/// Default caption-button width in pixels.
pub const DEFAULT_CAPTION_BUTTON_WIDTH: i32 = 36;

/// A caption button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionButton {
    /// Minimize.
    Minimize,
    /// Maximize or restore, depending on the maximized flag.
    Maximize,
    /// Close.
    Close,
}

struct TitleBarState {
    height: i32,
    width: i32,
    caption_button_width: i32,
    left_margin: Size,
    slots: [Option<Arc<dyn Widget>>; 3],
    /// Widths the slot widgets asked for when installed. Layout writes the
    /// widgets' geometry, so it never reads them back.
    preferred_widths: [i32; 3],
    placeholders: [Rect; 3],
    icon_rect: Rect,
    title_rect: Rect,
    buttons: [Rect; 3],
    alignment: TitleAlignment,
    background: Option<Color>,
    title: String,
    icon: Option<WindowIcon>,
    visible: bool,
    caption_buttons_visible: bool,
    title_visible: bool,
    icon_visible: bool,
    active: bool,
    maximized: bool,
    refreshes: u64,
}

impl TitleBarState {
    fn slot_width(&self, slot: TitleBarSlot) -> i32 {
        if self.slots[slot.index()].is_some() {
            self.preferred_widths[slot.index()]
        } else {
            0
        }
    }

    /// Recompute all rectangles for the current width. Returns the slot
    /// widgets with the geometry each should take inside its placeholder.
    fn relayout(&mut self) -> Vec<(Arc<dyn Widget>, Rect)> {
        let h = self.height;
        let width = self.width.max(0);
        let mut x = self.left_margin.width.clamp(0, width);

        let icon_width = if self.icon_visible { h } else { 0 };
        self.icon_rect = Rect::new(x, 0, icon_width.min(width - x), h);
        x = self.icon_rect.right();

        let buttons_width = if self.caption_buttons_visible {
            self.caption_button_width * 3
        } else {
            0
        };
        let buttons_left = (width - buttons_width).max(x);

        let left_width = self.slot_width(TitleBarSlot::Left).min(buttons_left - x);
        let left = Rect::new(x, 0, left_width, h);
        x = left.right();

        let right_width = self.slot_width(TitleBarSlot::Right).min(buttons_left - x);
        let right = Rect::new(buttons_left - right_width, 0, right_width, h);

        let available = right.left() - x;
        let center_width = self.slot_width(TitleBarSlot::Center).min(available);
        let center = Rect::new(x + (available - center_width) / 2, 0, center_width, h);

        self.placeholders = [left, center, right];
        self.title_rect = if self.title_visible {
            Rect::new(x, 0, available, h)
        } else {
            Rect::new(x, 0, 0, h)
        };

        let c = self.caption_button_width;
        self.buttons = if self.caption_buttons_visible {
            [
                Rect::new(width - 3 * c, 0, c, h),
                Rect::new(width - 2 * c, 0, c, h),
                Rect::new(width - c, 0, c, h),
            ]
        } else {
            [Rect::ZERO; 3]
        };

        TitleBarSlot::ALL
            .iter()
            .filter_map(|slot| {
                let i = slot.index();
                self.slots[i].clone().map(|w| {
                    let placeholder = self.placeholders[i];
                    (w, Rect::new(0, 0, placeholder.width(), placeholder.height()))
                })
            })
            .collect()
    }
}

/// The stock [`TitleBar`] implementation.
///
/// # Example
///
/// ```
/// use lattice_chrome::render::Rect;
/// use lattice_chrome::widget::{StandardTitleBar, TitleBar};
///
/// let title_bar = StandardTitleBar::new();
/// title_bar.layout(800);
/// assert_eq!(title_bar.close_button_rect(), Rect::new(764, 0, 36, 30));
/// ```
pub struct StandardTitleBar {
    state: Mutex<TitleBarState>,
    signals: TitleBarSignals,
}

impl StandardTitleBar {
    /// Create a visible title bar with default metrics.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TitleBarState {
                height: DEFAULT_TITLE_BAR_HEIGHT,
                width: 0,
                caption_button_width: DEFAULT_CAPTION_BUTTON_WIDTH,
                left_margin: Size::ZERO,
                slots: [None, None, None],
                preferred_widths: [0; 3],
                placeholders: [Rect::ZERO; 3],
                icon_rect: Rect::ZERO,
                title_rect: Rect::ZERO,
                buttons: [Rect::ZERO; 3],
                alignment: TitleAlignment::default(),
                background: None,
                title: String::new(),
                icon: None,
                visible: true,
                caption_buttons_visible: true,
                title_visible: true,
                icon_visible: true,
                active: false,
                maximized: false,
                refreshes: 0,
            }),
            signals: TitleBarSignals::default(),
        }
    }

    /// Rectangle of a slot placeholder.
    pub fn placeholder_rect(&self, slot: TitleBarSlot) -> Rect {
        self.state.lock().placeholders[slot.index()]
    }

    /// Rectangle of the icon cell.
    pub fn icon_rect(&self) -> Rect {
        self.state.lock().icon_rect
    }

    /// Rectangle available to the title text.
    pub fn title_rect(&self) -> Rect {
        self.state.lock().title_rect
    }

    /// Current title text.
    pub fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    /// Current icon.
    pub fn icon(&self) -> Option<WindowIcon> {
        self.state.lock().icon.clone()
    }

    /// Whether the title bar renders in the active palette.
    pub fn is_active(&self) -> bool {
        self.state.lock().active
    }

    /// Whether the maximize button shows the restore glyph.
    pub fn is_maximized(&self) -> bool {
        self.state.lock().maximized
    }

    /// Number of repaints requested.
    pub fn refresh_count(&self) -> u64 {
        self.state.lock().refreshes
    }

    /// The caption button under `point`, if any.
    pub fn button_at(&self, point: Point) -> Option<CaptionButton> {
        let state = self.state.lock();
        if !state.caption_buttons_visible {
            return None;
        }
        let [min, max, close] = state.buttons;
        if min.contains(point) {
            Some(CaptionButton::Minimize)
        } else if max.contains(point) {
            Some(CaptionButton::Maximize)
        } else if close.contains(point) {
            Some(CaptionButton::Close)
        } else {
            None
        }
    }

    /// Activate a caption button, emitting the matching request signal.
    pub fn click(&self, button: CaptionButton) {
        let maximized = self.state.lock().maximized;
        tracing::debug!(target: targets::CHROME, ?button, maximized, "caption button clicked");
        match button {
            CaptionButton::Minimize => self.signals.minimize_requested.emit(()),
            CaptionButton::Maximize if maximized => self.signals.restore_requested.emit(()),
            CaptionButton::Maximize => self.signals.maximize_requested.emit(()),
            CaptionButton::Close => self.signals.close_requested.emit(()),
        }
    }

    /// Handle a click at `point`. Returns `true` if a caption button was hit.
    pub fn click_at(&self, point: Point) -> bool {
        match self.button_at(point) {
            Some(button) => {
                self.click(button);
                true
            }
            None => false,
        }
    }

    fn update_layout(&self, f: impl FnOnce(&mut TitleBarState)) {
        let placements = {
            let mut state = self.state.lock();
            f(&mut state);
            state.relayout()
        };
        for (widget, rect) in placements {
            widget.set_geometry(rect);
        }
    }
}

impl Default for StandardTitleBar {
    fn default() -> Self {
        Self::new()
    }
}

impl TitleBar for StandardTitleBar {
    fn set_fixed_height(&self, height: i32) {
        self.update_layout(|s| s.height = height.max(0));
    }

    fn height(&self) -> i32 {
        self.state.lock().height
    }

    fn width(&self) -> i32 {
        self.state.lock().width
    }

    fn layout(&self, width: i32) {
        self.update_layout(|s| s.width = width.max(0));
    }

    fn set_caption_button_width(&self, width: i32) {
        self.update_layout(|s| s.caption_button_width = width.max(0));
    }

    fn caption_button_width(&self) -> i32 {
        self.state.lock().caption_button_width
    }

    fn minimize_button_rect(&self) -> Rect {
        self.state.lock().buttons[0]
    }

    fn maximize_button_rect(&self) -> Rect {
        self.state.lock().buttons[1]
    }

    fn close_button_rect(&self) -> Rect {
        self.state.lock().buttons[2]
    }

    fn set_left_margin(&self, size: Size) {
        self.update_layout(|s| s.left_margin = size);
    }

    fn left_margin(&self) -> Size {
        self.state.lock().left_margin
    }

    fn icon_widget_width(&self) -> i32 {
        self.state.lock().icon_rect.width()
    }

    fn set_slot_widget(
        &self,
        slot: TitleBarSlot,
        widget: Option<Arc<dyn Widget>>,
    ) -> Option<Arc<dyn Widget>> {
        let preferred = widget
            .as_ref()
            .map(|w| w.geometry().width().max(0))
            .unwrap_or(0);
        let mut previous = None;
        self.update_layout(|s| {
            s.preferred_widths[slot.index()] = preferred;
            previous = std::mem::replace(&mut s.slots[slot.index()], widget);
        });
        previous
    }

    fn slot_widget(&self, slot: TitleBarSlot) -> Option<Arc<dyn Widget>> {
        self.state.lock().slots[slot.index()].clone()
    }

    fn slot_placeholder_pos(&self, slot: TitleBarSlot) -> Point {
        self.state.lock().placeholders[slot.index()].origin
    }

    fn title_alignment(&self) -> TitleAlignment {
        self.state.lock().alignment
    }

    fn set_title_alignment(&self, alignment: TitleAlignment) {
        self.state.lock().alignment = alignment;
    }

    fn background_color(&self) -> Option<Color> {
        self.state.lock().background
    }

    fn set_background_color(&self, color: Option<Color>) {
        self.state.lock().background = color;
    }

    fn set_title(&self, title: &str) {
        self.state.lock().title = title.to_string();
    }

    fn set_icon(&self, icon: Option<WindowIcon>) {
        self.state.lock().icon = icon;
    }

    fn set_visible(&self, visible: bool) {
        let became_visible = {
            let mut state = self.state.lock();
            let became_visible = visible && !state.visible;
            state.visible = visible;
            became_visible
        };
        if became_visible {
            self.signals.shown.emit(());
        }
    }

    fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    fn set_caption_buttons_visible(&self, visible: bool) {
        self.update_layout(|s| s.caption_buttons_visible = visible);
    }

    fn caption_buttons_visible(&self) -> bool {
        self.state.lock().caption_buttons_visible
    }

    fn set_title_visible(&self, visible: bool) {
        self.update_layout(|s| s.title_visible = visible);
    }

    fn set_icon_visible(&self, visible: bool) {
        self.update_layout(|s| s.icon_visible = visible);
    }

    fn is_icon_visible(&self) -> bool {
        self.state.lock().icon_visible
    }

    fn set_active(&self, active: bool) {
        self.state.lock().active = active;
    }

    fn set_maximized(&self, maximized: bool) {
        self.state.lock().maximized = maximized;
    }

    fn refresh(&self) {
        self.state.lock().refreshes += 1;
    }

    fn signals(&self) -> &TitleBarSignals {
        &self.signals
    }
}

impl std::fmt::Debug for StandardTitleBar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("StandardTitleBar")
            .field("width", &state.width)
            .field("height", &state.height)
            .field("visible", &state.visible)
            .field("title", &state.title)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(StandardTitleBar: Send, Sync);
