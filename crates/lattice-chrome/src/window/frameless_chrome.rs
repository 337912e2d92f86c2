//! Frameless window hit-testing from pushed chrome masks.
//!
//! A frameless window has no OS decorations, so the host has to decide for
//! every mouse press whether it lands on a caption button, the system menu, a
//! widget inside the title bar, a resize border or the draggable caption.
//! [`FramelessWindowChrome`] makes that decision from the masks the chrome
//! widget pushed to the host.
//!
//! # Hit Test Order
//!
//! 1. Caption buttons (close, maximize, minimize)
//! 2. System menu (icon area at the left of the title-bar band)
//! 3. Interactive islands from the title-bar mask
//! 4. Resize borders, when enabled
//! 5. The rest of the title-bar band drags the window
//! 6. Everything else is client area

use lattice_chrome_render::{Point, Rect, Region, Size};

/// Re-export of winit's ResizeDirection for convenience.
pub use winit::window::ResizeDirection;

/// Result of hit testing against frameless window chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeHitTestResult {
    /// The point is in the client area - handle as normal widget event.
    Client,

    /// The point is in the draggable part of the title bar.
    Caption,

    /// The point is in a resize border.
    ResizeBorder(ResizeDirection),

    /// The point is in the system menu (icon) area.
    SysMenu,

    /// The point is in the minimize button area.
    MinimizeButton,

    /// The point is in the maximize/restore button area.
    MaximizeButton,

    /// The point is in the close button area.
    CloseButton,
}

impl ChromeHitTestResult {
    /// Check if this result indicates a resize operation.
    pub fn is_resize(&self) -> bool {
        matches!(self, Self::ResizeBorder(_))
    }

    /// Check if this result indicates a draggable area.
    pub fn is_draggable(&self) -> bool {
        matches!(self, Self::Caption | Self::SysMenu)
    }

    /// Check if this result is a caption button.
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            Self::MinimizeButton | Self::MaximizeButton | Self::CloseButton
        )
    }
}

/// Hit-test configuration of a frameless window.
///
/// # Defaults
///
/// - Title bar height: 0 (no band until the chrome pushes one)
/// - Icon width: 0
/// - Resize border: 0 (disabled)
/// - Corner size: 8
/// - All masks empty
///
/// # Example
///
/// ```
/// use lattice_chrome::render::{Point, Rect, Region, Size};
/// use lattice_chrome::window::{ChromeHitTestResult, FramelessWindowChrome};
///
/// let chrome = FramelessWindowChrome::new()
///     .with_title_bar_height(30)
///     .with_close_mask(Region::from_rect(Rect::new(764, 0, 36, 30)))
///     .with_title_bar_mask(Region::from_rect(Rect::new(10, 5, 50, 20)));
///
/// let size = Size::new(800, 600);
/// assert_eq!(chrome.hit_test(Point::new(780, 10), size), ChromeHitTestResult::CloseButton);
/// assert_eq!(chrome.hit_test(Point::new(20, 10), size), ChromeHitTestResult::Client);
/// assert_eq!(chrome.hit_test(Point::new(400, 10), size), ChromeHitTestResult::Caption);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FramelessWindowChrome {
    /// Height of the title-bar band at the top of the window.
    title_bar_height: i32,

    /// Width of the system-menu area at the left of the band.
    icon_width: i32,

    /// Interactive islands inside the band.
    title_bar_mask: Region,

    minimize_mask: Region,
    maximize_mask: Region,
    close_mask: Region,

    /// Thickness of the invisible resize borders; zero disables resizing.
    resize_border: i32,

    /// Size of the diagonal resize corners.
    corner_size: i32,
}

impl FramelessWindowChrome {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            corner_size: 8,
            ..Self::default()
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the title-bar band height.
    pub fn with_title_bar_height(mut self, height: i32) -> Self {
        self.set_title_bar_height(height);
        self
    }

    /// Set the system-menu width.
    pub fn with_icon_width(mut self, width: i32) -> Self {
        self.set_icon_width(width);
        self
    }

    /// Set the interactive islands.
    pub fn with_title_bar_mask(mut self, mask: Region) -> Self {
        self.title_bar_mask = mask;
        self
    }

    /// Set the minimize button region.
    pub fn with_minimize_mask(mut self, mask: Region) -> Self {
        self.minimize_mask = mask;
        self
    }

    /// Set the maximize button region.
    pub fn with_maximize_mask(mut self, mask: Region) -> Self {
        self.maximize_mask = mask;
        self
    }

    /// Set the close button region.
    pub fn with_close_mask(mut self, mask: Region) -> Self {
        self.close_mask = mask;
        self
    }

    /// Set the resize border thickness.
    pub fn with_resize_border(mut self, border: i32) -> Self {
        self.resize_border = border.max(0);
        self
    }

    /// Set the corner size for diagonal resizing.
    pub fn with_corner_size(mut self, size: i32) -> Self {
        self.corner_size = size.max(0);
        self
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Set the title-bar band height.
    pub fn set_title_bar_height(&mut self, height: i32) {
        self.title_bar_height = height.max(0);
    }

    /// Set the system-menu width.
    pub fn set_icon_width(&mut self, width: i32) {
        self.icon_width = width.max(0);
    }

    /// Replace the interactive islands.
    pub fn set_title_bar_mask(&mut self, mask: Region) {
        self.title_bar_mask = mask;
    }

    /// Replace the minimize button region.
    pub fn set_minimize_mask(&mut self, mask: Region) {
        self.minimize_mask = mask;
    }

    /// Replace the maximize button region.
    pub fn set_maximize_mask(&mut self, mask: Region) {
        self.maximize_mask = mask;
    }

    /// Replace the close button region.
    pub fn set_close_mask(&mut self, mask: Region) {
        self.close_mask = mask;
    }

    /// Set the resize border thickness.
    pub fn set_resize_border(&mut self, border: i32) {
        self.resize_border = border.max(0);
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Title-bar band height.
    pub fn title_bar_height(&self) -> i32 {
        self.title_bar_height
    }

    /// System-menu width.
    pub fn icon_width(&self) -> i32 {
        self.icon_width
    }

    /// Interactive islands.
    pub fn title_bar_mask(&self) -> &Region {
        &self.title_bar_mask
    }

    /// Minimize button region.
    pub fn minimize_mask(&self) -> &Region {
        &self.minimize_mask
    }

    /// Maximize button region.
    pub fn maximize_mask(&self) -> &Region {
        &self.maximize_mask
    }

    /// Close button region.
    pub fn close_mask(&self) -> &Region {
        &self.close_mask
    }

    /// Resize border thickness.
    pub fn resize_border(&self) -> i32 {
        self.resize_border
    }

    /// The title-bar band for a window of the given width.
    pub fn title_bar_rect(&self, window_width: i32) -> Rect {
        Rect::new(0, 0, window_width, self.title_bar_height)
    }

    /// The pixels that drag the window: the band minus buttons, system menu
    /// and interactive islands.
    pub fn drag_region(&self, window_width: i32) -> Region {
        let mut region = Region::from_rect(self.title_bar_rect(window_width));
        region.subtract_rect(Rect::new(0, 0, self.icon_width, self.title_bar_height));
        region
            .subtracted(&self.minimize_mask)
            .subtracted(&self.maximize_mask)
            .subtracted(&self.close_mask)
            .subtracted(&self.title_bar_mask)
    }

    // =========================================================================
    // Hit Testing
    // =========================================================================

    /// Perform hit testing for a point in window coordinates.
    pub fn hit_test(&self, point: Point, window_size: Size) -> ChromeHitTestResult {
        let band = self.title_bar_rect(window_size.width);
        let in_band = band.contains(point);

        // 1. Caption buttons take priority inside the band
        if in_band && let Some(result) = self.hit_test_buttons(point) {
            return result;
        }

        // 2. System menu
        if in_band && point.x < self.icon_width {
            return ChromeHitTestResult::SysMenu;
        }

        // 3. Interactive islands pass through to widgets
        if self.title_bar_mask.contains(point) {
            return ChromeHitTestResult::Client;
        }

        // 4. Resize borders
        if self.resize_border > 0
            && let Some(direction) = self.hit_test_resize(point, window_size)
        {
            return ChromeHitTestResult::ResizeBorder(direction);
        }

        // 5. Remaining band drags
        if in_band {
            return ChromeHitTestResult::Caption;
        }

        ChromeHitTestResult::Client
    }

    fn hit_test_buttons(&self, point: Point) -> Option<ChromeHitTestResult> {
        if self.close_mask.contains(point) {
            return Some(ChromeHitTestResult::CloseButton);
        }
        if self.maximize_mask.contains(point) {
            return Some(ChromeHitTestResult::MaximizeButton);
        }
        if self.minimize_mask.contains(point) {
            return Some(ChromeHitTestResult::MinimizeButton);
        }
        None
    }

    fn hit_test_resize(&self, point: Point, window_size: Size) -> Option<ResizeDirection> {
        let (x, y) = (point.x, point.y);
        let (width, height) = (window_size.width, window_size.height);
        let border = self.resize_border;
        let corner = self.corner_size.max(border);

        let on_left = x < border;
        let on_right = x >= width - border;
        let on_top = y < border;
        let on_bottom = y >= height - border;

        let in_left_corner = x < corner;
        let in_right_corner = x >= width - corner;
        let in_top_corner = y < corner;
        let in_bottom_corner = y >= height - corner;

        if on_top && in_left_corner || on_left && in_top_corner {
            return Some(ResizeDirection::NorthWest);
        }
        if on_top && in_right_corner || on_right && in_top_corner {
            return Some(ResizeDirection::NorthEast);
        }
        if on_bottom && in_left_corner || on_left && in_bottom_corner {
            return Some(ResizeDirection::SouthWest);
        }
        if on_bottom && in_right_corner || on_right && in_bottom_corner {
            return Some(ResizeDirection::SouthEast);
        }

        if on_top {
            return Some(ResizeDirection::North);
        }
        if on_bottom {
            return Some(ResizeDirection::South);
        }
        if on_left {
            return Some(ResizeDirection::West);
        }
        if on_right {
            return Some(ResizeDirection::East);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome_800() -> FramelessWindowChrome {
        FramelessWindowChrome::new()
            .with_title_bar_height(30)
            .with_icon_width(30)
            .with_minimize_mask(Region::from_rect(Rect::new(692, 0, 36, 30)))
            .with_maximize_mask(Region::from_rect(Rect::new(728, 0, 36, 30)))
            .with_close_mask(Region::from_rect(Rect::new(764, 0, 36, 30)))
            .with_title_bar_mask(Region::from_rect(Rect::new(100, 5, 50, 20)))
    }

    #[test]
    fn test_default_chrome_has_no_band() {
        let chrome = FramelessWindowChrome::new();
        assert_eq!(chrome.title_bar_height(), 0);
        assert_eq!(chrome.resize_border(), 0);
        assert_eq!(
            chrome.hit_test(Point::new(10, 0), Size::new(800, 600)),
            ChromeHitTestResult::Client
        );
    }

    #[test]
    fn test_hit_test_buttons() {
        let chrome = chrome_800();
        let size = Size::new(800, 600);

        assert_eq!(
            chrome.hit_test(Point::new(700, 10), size),
            ChromeHitTestResult::MinimizeButton
        );
        assert_eq!(
            chrome.hit_test(Point::new(728, 10), size),
            ChromeHitTestResult::MaximizeButton
        );
        assert_eq!(
            chrome.hit_test(Point::new(799, 29), size),
            ChromeHitTestResult::CloseButton
        );
    }

    #[test]
    fn test_button_masks_ignored_without_band() {
        let chrome = FramelessWindowChrome::new()
            .with_close_mask(Region::from_rect(Rect::new(764, 0, 36, 30)));

        assert_eq!(
            chrome.hit_test(Point::new(780, 10), Size::new(800, 600)),
            ChromeHitTestResult::Client
        );
    }

    #[test]
    fn test_hit_test_band() {
        let chrome = chrome_800();
        let size = Size::new(800, 600);

        assert_eq!(
            chrome.hit_test(Point::new(5, 5), size),
            ChromeHitTestResult::SysMenu
        );
        assert_eq!(
            chrome.hit_test(Point::new(120, 10), size),
            ChromeHitTestResult::Client
        );
        assert_eq!(
            chrome.hit_test(Point::new(120, 2), size),
            ChromeHitTestResult::Caption
        );
        assert_eq!(
            chrome.hit_test(Point::new(400, 30), size),
            ChromeHitTestResult::Client
        );
    }

    #[test]
    fn test_drag_region_excludes_islands() {
        let drag = chrome_800().drag_region(800);

        assert!(drag.contains_xy(400, 10));
        assert!(!drag.contains_xy(10, 10));
        assert!(!drag.contains_xy(120, 10));
        assert!(!drag.contains_xy(750, 10));
        assert_eq!(drag.bounding_rect(), Rect::new(30, 0, 662, 30));
    }

    #[test]
    fn test_hit_test_resize_borders() {
        let chrome = chrome_800().with_resize_border(4);
        let size = Size::new(800, 600);

        assert_eq!(
            chrome.hit_test(Point::new(400, 598), size),
            ChromeHitTestResult::ResizeBorder(ResizeDirection::South)
        );
        assert_eq!(
            chrome.hit_test(Point::new(2, 300), size),
            ChromeHitTestResult::ResizeBorder(ResizeDirection::West)
        );
        assert_eq!(
            chrome.hit_test(Point::new(797, 597), size),
            ChromeHitTestResult::ResizeBorder(ResizeDirection::SouthEast)
        );
        // Top edge of the band resizes; buttons still win.
        assert_eq!(
            chrome.hit_test(Point::new(400, 1), size),
            ChromeHitTestResult::ResizeBorder(ResizeDirection::North)
        );
        assert_eq!(
            chrome.hit_test(Point::new(780, 1), size),
            ChromeHitTestResult::CloseButton
        );
    }

    #[test]
    fn test_hit_test_result_methods() {
        assert!(ChromeHitTestResult::ResizeBorder(ResizeDirection::North).is_resize());
        assert!(!ChromeHitTestResult::Caption.is_resize());

        assert!(ChromeHitTestResult::Caption.is_draggable());
        assert!(ChromeHitTestResult::SysMenu.is_draggable());
        assert!(!ChromeHitTestResult::Client.is_draggable());

        assert!(ChromeHitTestResult::CloseButton.is_button());
        assert!(!ChromeHitTestResult::Caption.is_button());
    }

    #[test]
    fn test_runtime_modification() {
        let mut chrome = FramelessWindowChrome::new();
        chrome.set_title_bar_height(-5);
        assert_eq!(chrome.title_bar_height(), 0);

        chrome.set_title_bar_height(40);
        chrome.set_close_mask(Region::from_rect(Rect::new(0, 0, 10, 10)));
        assert_eq!(chrome.close_mask().area(), 100);

        chrome.set_close_mask(Region::new());
        assert!(chrome.close_mask().is_empty());
    }
}
