//! Hit-test region computation.
//!
//! Everything in this module is a pure function of its inputs: the chrome
//! widget captures the title bar and its slot widgets into a
//! [`RegionInput`], and [`compute_regions`] turns that into a
//! [`RegionSet`]. Running it twice on the same input yields the same output.
//!
//! # Example
//!
//! ```
//! use lattice_chrome::render::{Point, Rect, Size};
//! use lattice_chrome::widget::regions::{
//!     CaptionButtonRects, RegionInput, SlotShape, WidgetShape, compute_regions,
//! };
//!
//! let slot = SlotShape {
//!     placeholder_pos: Point::new(30, 0),
//!     widget: WidgetShape::from_rect(Rect::new(0, 0, 120, 30)),
//!     transparent_for_mouse: false,
//!     descendants: Vec::new(),
//! };
//! let input = RegionInput {
//!     title_bar_width: 800,
//!     slots: [Some(slot), None, None],
//!     buttons: CaptionButtonRects::default(),
//!     caption_buttons_visible: false,
//!     override_mask: None,
//!     content_size: Size::new(800, 570),
//!     rounded_content: false,
//! };
//!
//! let regions = compute_regions(&input);
//! assert_eq!(regions.drag.bounding_rect(), Rect::new(30, 0, 120, 30));
//! ```

use lattice_chrome_core::logging::targets;
use lattice_chrome_render::{AlphaMask, Point, Rect, Region, Size};

use super::element::Widget;

/// Corner radius of the rounded content mask.
pub const CONTENT_CORNER_RADIUS: f32 = 8.0;

/// Inset of the rounded content mask on every side.
pub const CONTENT_MASK_INSET: i32 = 1;

/// Hit-test shape of one widget, in slot-placeholder coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetShape {
    /// Bounding rectangle.
    pub geometry: Rect,
    /// Explicit mask, replacing the geometry when present.
    pub mask: Option<Region>,
    /// Whether mouse events pass through the widget.
    pub transparent_for_mouse: bool,
}

impl WidgetShape {
    /// An opaque rectangular shape.
    pub fn from_rect(geometry: Rect) -> Self {
        Self {
            geometry,
            mask: None,
            transparent_for_mouse: false,
        }
    }

    fn capture(widget: &dyn Widget, origin: Point) -> Self {
        let geometry = widget.geometry().translated(origin.x, origin.y);
        Self {
            geometry,
            mask: widget
                .mask()
                .map(|mask| mask.translated(geometry.origin.x, geometry.origin.y)),
            transparent_for_mouse: widget.is_transparent_for_mouse(),
        }
    }

    /// The region this shape blocks, with widths clamped to `max_width`.
    fn blocking_region(&self, max_width: i32) -> Region {
        if self.transparent_for_mouse {
            return Region::new();
        }
        match &self.mask {
            Some(mask) => mask.clone(),
            None if self.geometry.width() > max_width => {
                Region::from_rect(self.geometry.with_width(max_width))
            }
            None => Region::from_rect(self.geometry),
        }
    }
}

/// Snapshot of a populated title-bar slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotShape {
    /// Top-left of the slot placeholder in title-bar coordinates.
    pub placeholder_pos: Point,
    /// The slot widget itself.
    pub widget: WidgetShape,
    /// Exclude the slot widget itself (not its descendants) from the mask.
    pub transparent_for_mouse: bool,
    /// Every descendant of the slot widget, depth first.
    pub descendants: Vec<WidgetShape>,
}

impl SlotShape {
    /// Capture a slot widget and its subtree.
    ///
    /// Descendant geometry is mapped through each ancestor's offset so all
    /// shapes share the placeholder's coordinate space.
    pub fn capture(widget: &dyn Widget, placeholder_pos: Point, transparent_for_mouse: bool) -> Self {
        let own = WidgetShape::capture(widget, Point::ZERO);
        let mut descendants = Vec::new();
        collect_descendants(widget, own.geometry.origin, &mut descendants);
        Self {
            placeholder_pos,
            widget: own,
            transparent_for_mouse,
            descendants,
        }
    }

    /// Width of the slot widget, the limit applied to every contribution.
    pub fn width(&self) -> i32 {
        self.widget.geometry.width()
    }
}

fn collect_descendants(parent: &dyn Widget, origin: Point, out: &mut Vec<WidgetShape>) {
    for child in parent.children() {
        let shape = WidgetShape::capture(child.as_ref(), origin);
        let child_origin = shape.geometry.origin;
        out.push(shape);
        collect_descendants(child.as_ref(), child_origin, out);
    }
}

/// Region a slot occupies in title-bar coordinates.
///
/// A zero-width slot contributes nothing. Otherwise the slot widget (unless
/// the slot is mouse-transparent) and each descendant that is not itself
/// mouse-transparent contribute their explicit mask or, failing that, their
/// geometry with the width clamped to the slot widget's width.
pub fn slot_region(slot: &SlotShape) -> Region {
    let max_width = slot.width();
    if max_width <= 0 {
        return Region::new();
    }

    let own = (!slot.transparent_for_mouse).then_some(&slot.widget);
    let mut region = Region::new();
    for shape in own.into_iter().chain(&slot.descendants) {
        region.union_region(&shape.blocking_region(max_width));
    }
    region.translate(slot.placeholder_pos.x, slot.placeholder_pos.y);
    region
}

/// Interactive islands inside the title bar: the override mask (if any)
/// united with every slot region.
pub fn drag_region(override_mask: Option<&Region>, slot_regions: &[Region]) -> Region {
    let mut drag = override_mask.cloned().unwrap_or_default();
    for region in slot_regions {
        drag.union_region(region);
    }
    drag
}

/// The three caption-button rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaptionButtonRects {
    /// Minimize button.
    pub minimize: Rect,
    /// Maximize/restore button.
    pub maximize: Rect,
    /// Close button.
    pub close: Rect,
}

impl CaptionButtonRects {
    /// Check if all three rectangles are empty.
    pub fn is_empty(&self) -> bool {
        self.minimize.is_empty() && self.maximize.is_empty() && self.close.is_empty()
    }
}

/// Anchor the caption buttons to the right edge of a title bar.
///
/// Close ends at `title_bar_width`, maximize sits immediately left of close
/// and minimize immediately left of maximize; only the widths and vertical
/// extents of `buttons` are used. Hidden buttons yield three empty rects.
pub fn anchor_caption_buttons(
    title_bar_width: i32,
    buttons: CaptionButtonRects,
    visible: bool,
) -> CaptionButtonRects {
    if !visible {
        return CaptionButtonRects::default();
    }
    let close_left = title_bar_width - buttons.close.width();
    let maximize_left = close_left - buttons.maximize.width();
    let minimize_left = maximize_left - buttons.minimize.width();
    CaptionButtonRects {
        minimize: buttons.minimize.moved_left(minimize_left),
        maximize: buttons.maximize.moved_left(maximize_left),
        close: buttons.close.moved_left(close_left),
    }
}

/// Rounded clip mask for the content area, or `None` when no clipping
/// applies (non-normal state, or a platform without custom rounding).
pub fn rounded_content_mask(size: Size, applies: bool) -> Option<AlphaMask> {
    if !applies || size.is_empty() {
        return None;
    }
    Some(AlphaMask::rounded_rect(
        size,
        CONTENT_MASK_INSET,
        CONTENT_CORNER_RADIUS,
    ))
}

/// Everything the region computation reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionInput {
    /// Width of the title bar.
    pub title_bar_width: i32,
    /// Left, center and right slots.
    pub slots: [Option<SlotShape>; 3],
    /// Caption-button rectangles as reported by the title bar.
    pub buttons: CaptionButtonRects,
    /// Whether the caption buttons are shown.
    pub caption_buttons_visible: bool,
    /// Explicit title-bar mask set by the application.
    pub override_mask: Option<Region>,
    /// Client size of the content placeholder.
    pub content_size: Size,
    /// Whether the content area is clipped to rounded corners.
    pub rounded_content: bool,
}

/// The computed hit-test regions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegionSet {
    /// Interactive islands inside the title bar.
    pub drag: Region,
    /// Per-slot occupied regions (left, center, right).
    pub slots: [Region; 3],
    /// Anchored caption buttons.
    pub buttons: CaptionButtonRects,
    /// Rounded clip mask for the content area.
    pub content_mask: Option<AlphaMask>,
}

/// Compute all hit-test regions for one reconciliation pass.
pub fn compute_regions(input: &RegionInput) -> RegionSet {
    let slots = input
        .slots
        .each_ref()
        .map(|slot| slot.as_ref().map(slot_region).unwrap_or_default());
    let drag = drag_region(input.override_mask.as_ref(), &slots);
    let buttons = anchor_caption_buttons(
        input.title_bar_width,
        input.buttons,
        input.caption_buttons_visible,
    );
    let content_mask = rounded_content_mask(input.content_size, input.rounded_content);

    tracing::trace!(
        target: targets::REGION,
        drag_rects = drag.rect_count(),
        drag_bounds = ?drag.bounding_rect(),
        ?buttons,
        content_mask = content_mask.is_some(),
        "computed regions"
    );

    RegionSet {
        drag,
        slots,
        buttons,
        content_mask,
    }
}
