//! The title bar contract.
//!
//! A title bar hosts three slot placeholders, a title, an icon and the
//! minimize/maximize/close buttons. The chrome widget configures it, reads
//! back its geometry when computing hit-test masks, and listens to its
//! signals. [`StandardTitleBar`](super::StandardTitleBar) is the stock
//! implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use lattice_chrome_core::Signal;
use lattice_chrome_render::{Color, Point, Rect, Size};

use super::element::Widget;
use crate::window::WindowIcon;

/// One of the three title-bar slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleBarSlot {
    /// After the icon.
    Left,
    /// Centered in the space between the left and right slots.
    Center,
    /// Before the caption buttons.
    Right,
}

impl TitleBarSlot {
    /// All slots, left to right.
    pub const ALL: [TitleBarSlot; 3] = [Self::Left, Self::Center, Self::Right];

    /// Position of the slot in [`ALL`](Self::ALL).
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }
}

/// Horizontal alignment of the title text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleAlignment {
    /// Left-aligned (default).
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right-aligned.
    Right,
}

/// Signals emitted by a title bar.
#[derive(Default)]
pub struct TitleBarSignals {
    /// The title bar went from hidden to visible.
    pub shown: Signal<()>,
    /// The minimize button was clicked.
    pub minimize_requested: Signal<()>,
    /// The maximize button was clicked while the window was not maximized.
    pub maximize_requested: Signal<()>,
    /// The maximize button was clicked while the window was maximized.
    pub restore_requested: Signal<()>,
    /// The close button was clicked.
    pub close_requested: Signal<()>,
}

impl std::fmt::Debug for TitleBarSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TitleBarSignals").finish_non_exhaustive()
    }
}

/// A title bar the chrome widget can drive.
///
/// Rectangles are in title-bar coordinates. All methods take `&self`;
/// implementations use interior mutability.
pub trait TitleBar: Send + Sync {
    // =========================================================================
    // Geometry
    // =========================================================================

    /// Set the fixed height.
    fn set_fixed_height(&self, height: i32);

    /// Current height.
    fn height(&self) -> i32;

    /// Current width.
    fn width(&self) -> i32;

    /// Resize to `width` and recompute placeholder and button rectangles.
    fn layout(&self, width: i32);

    /// Set the width of each caption button.
    fn set_caption_button_width(&self, width: i32);

    /// Width of each caption button.
    fn caption_button_width(&self) -> i32;

    /// Minimize button rectangle.
    fn minimize_button_rect(&self) -> Rect;

    /// Maximize/restore button rectangle.
    fn maximize_button_rect(&self) -> Rect;

    /// Close button rectangle.
    fn close_button_rect(&self) -> Rect;

    /// Reserve an empty area of `size` at the left edge, before the icon.
    fn set_left_margin(&self, size: Size);

    /// Size of the left margin placeholder.
    fn left_margin(&self) -> Size;

    /// Width of the icon widget as laid out.
    fn icon_widget_width(&self) -> i32;

    // =========================================================================
    // Slots
    // =========================================================================

    /// Install a widget in a slot, returning the previous one.
    fn set_slot_widget(
        &self,
        slot: TitleBarSlot,
        widget: Option<Arc<dyn Widget>>,
    ) -> Option<Arc<dyn Widget>>;

    /// The widget installed in a slot.
    fn slot_widget(&self, slot: TitleBarSlot) -> Option<Arc<dyn Widget>>;

    /// Top-left of a slot placeholder.
    fn slot_placeholder_pos(&self, slot: TitleBarSlot) -> Point;

    // =========================================================================
    // Appearance
    // =========================================================================

    /// Current title alignment.
    fn title_alignment(&self) -> TitleAlignment;

    /// Set the title alignment.
    fn set_title_alignment(&self, alignment: TitleAlignment);

    /// Background color, `None` for the theme default.
    fn background_color(&self) -> Option<Color>;

    /// Set the background color.
    fn set_background_color(&self, color: Option<Color>);

    /// Set the title text.
    fn set_title(&self, title: &str);

    /// Set the icon (already scaled for the title bar).
    fn set_icon(&self, icon: Option<WindowIcon>);

    // =========================================================================
    // Visibility And State
    // =========================================================================

    /// Show or hide the title bar.
    fn set_visible(&self, visible: bool);

    /// Check if the title bar is visible.
    fn is_visible(&self) -> bool;

    /// Show or hide the caption buttons.
    fn set_caption_buttons_visible(&self, visible: bool);

    /// Check if the caption buttons are visible.
    fn caption_buttons_visible(&self) -> bool;

    /// Show or hide the title text.
    fn set_title_visible(&self, visible: bool);

    /// Show or hide the icon.
    fn set_icon_visible(&self, visible: bool);

    /// Check if the icon is visible.
    fn is_icon_visible(&self) -> bool;

    /// Render in the active or inactive palette.
    fn set_active(&self, active: bool);

    /// Switch the maximize button between maximize and restore.
    fn set_maximized(&self, maximized: bool);

    /// Repaint with the current state.
    fn refresh(&self);

    /// Title-bar signals.
    fn signals(&self) -> &TitleBarSignals;
}

static_assertions::assert_impl_all!(TitleBarSignals: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_index() {
        for (i, slot) in TitleBarSlot::ALL.iter().enumerate() {
            assert_eq!(slot.index(), i);
        }
    }

    #[test]
    fn test_alignment_serde_names() {
        #[derive(Serialize, Deserialize)]
        struct Holder {
            alignment: TitleAlignment,
        }

        let text = toml::to_string(&Holder {
            alignment: TitleAlignment::Center,
        })
        .unwrap();
        assert_eq!(text.trim(), r#"alignment = "center""#);

        let parsed: Holder = toml::from_str(r#"alignment = "right""#).unwrap();
        assert_eq!(parsed.alignment, TitleAlignment::Right);
    }
}
