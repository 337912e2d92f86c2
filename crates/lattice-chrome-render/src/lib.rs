//! Geometry, regions and coverage masks for Lattice Chrome.
//!
//! Window chrome works in whole device pixels: hit-test masks handed to the
//! native window are sets of integer rectangles. This crate provides:
//!
//! - [`Point`], [`Size`], [`Rect`] - integer geometry with
//!   half-open rectangles (`[left, right) × [top, bottom)`)
//! - [`Color`] - 8-bit RGBA colors with hex parsing and formatting
//! - [`Region`] - a canonical set of non-overlapping rectangles supporting
//!   union, subtraction, intersection and translation
//! - [`AlphaMask`] - anti-aliased coverage masks such as the rounded
//!   rectangle used to clip window content
//!
//! # Example
//!
//! ```
//! use lattice_chrome_render::{Rect, Region};
//!
//! let mut drag = Region::from_rect(Rect::new(0, 0, 800, 30));
//! drag.subtract_rect(Rect::new(692, 0, 108, 30));
//!
//! assert!(drag.contains_xy(10, 10));
//! assert!(!drag.contains_xy(700, 10));
//! ```

mod error;
mod mask;
mod region;
mod types;

pub use error::{ParseColorError, RenderError, RenderResult};
pub use mask::AlphaMask;
pub use region::Region;
pub use types::{Color, Point, Rect, Size};
