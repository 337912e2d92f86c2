//! Prelude module for Lattice Chrome.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use lattice_chrome::prelude::*;
//! ```

// ============================================================================
// Event Loop Plumbing
// ============================================================================

pub use crate::{DeferredCall, Signal, TaskQueue};

// ============================================================================
// Geometry
// ============================================================================

pub use crate::render::{AlphaMask, Color, Point, Rect, Region, Size};

// ============================================================================
// Chrome
// ============================================================================

pub use crate::widget::{
    ChromeConfig, ChromeWidget, Element, FrameStyle, StandardTitleBar, TitleAlignment, TitleBar,
    TitleBarSlot, Widget,
};

// ============================================================================
// Host Windows
// ============================================================================

pub use crate::platform::PlatformChrome;
pub use crate::window::{HostWindow, MaskedHostWindow, WindowIcon, WindowState};
