//! Chrome widgets.
//!
//! - [`ChromeWidget`] - composes a title bar and a central widget and keeps
//!   the host window's hit-test masks in sync
//! - [`StandardTitleBar`] - the stock [`TitleBar`]
//! - [`Element`] - a plain retained [`Widget`] for slot and central content
//! - [`regions`] - the pure hit-test region computation
//!
//! Options live in [`ChromeConfig`], which also loads from TOML.

mod chrome_widget;
mod config;
mod dialog;
mod element;
mod frame_style;
pub mod regions;
mod standard_title_bar;
mod title_bar;

pub use chrome_widget::{ChromeWidget, UpdateStats};
pub use config::{ChromeConfig, ConfigError};
pub use dialog::{DialogParts, exec_dialog_with_window};
pub use element::{Element, Widget};
pub use frame_style::{
    Border, DEFAULT_ACTIVE_BORDER_COLOR, FRAME_CORNER_RADIUS, FRAME_OBJECT_NAME, FrameStyle,
    INACTIVE_BORDER_COLOR,
};
pub use regions::{RegionInput, RegionSet, compute_regions};
pub use standard_title_bar::{
    CaptionButton, DEFAULT_CAPTION_BUTTON_WIDTH, DEFAULT_TITLE_BAR_HEIGHT, StandardTitleBar,
};
pub use title_bar::{TitleAlignment, TitleBar, TitleBarSignals, TitleBarSlot};
