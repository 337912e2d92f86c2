//! Frame border and corner styling.

use lattice_chrome_render::Color;

use crate::window::WindowState;

/// Object name of the frame widget the style sheet targets.
pub const FRAME_OBJECT_NAME: &str = "ChromeFrame";

/// Default border color of an active window (`#1883D7`).
pub const DEFAULT_ACTIVE_BORDER_COLOR: Color = Color::rgb(24, 131, 215);

/// Border color of an inactive window (`#AAAAAA`).
pub const INACTIVE_BORDER_COLOR: Color = Color::LIGHT_GRAY;

/// Corner radius of the frame in the normal state, where supported.
pub const FRAME_CORNER_RADIUS: u32 = 8;

/// A solid frame border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    /// Width in pixels.
    pub width: u32,
    /// Border color.
    pub color: Color,
}

/// Resolved frame appearance for one window state.
///
/// # Example
///
/// ```
/// use lattice_chrome::render::Color;
/// use lattice_chrome::widget::FrameStyle;
/// use lattice_chrome::window::WindowState;
///
/// let style = FrameStyle::resolve(true, WindowState::ACTIVE, Color::rgb(24, 131, 215), true);
/// assert_eq!(
///     style.to_style_sheet(),
///     "#ChromeFrame { border: 1px solid #1883d7; border-radius: 8px; }"
/// );
///
/// let maximized = FrameStyle::resolve(true, WindowState::MAXIMIZED, Color::BLACK, true);
/// assert_eq!(maximized.to_declaration(), "border: none;");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStyle {
    /// Border, absent when the OS draws it or the window is not normal.
    pub border: Option<Border>,
    /// Corner radius in pixels, zero for square corners.
    pub corner_radius: u32,
}

impl FrameStyle {
    /// Resolve the frame style.
    ///
    /// `draw_borders` is false when the OS draws the border itself, and
    /// `rounded` is whether the platform supports custom corner rounding.
    /// Only the normal state gets a border or rounded corners.
    pub fn resolve(draw_borders: bool, state: WindowState, active_color: Color, rounded: bool) -> Self {
        let normal = state.is_normal();
        let border = (draw_borders && normal).then(|| Border {
            width: 1,
            color: if state.is_active() {
                active_color
            } else {
                INACTIVE_BORDER_COLOR
            },
        });
        let corner_radius = if rounded && normal {
            FRAME_CORNER_RADIUS
        } else {
            0
        };
        Self {
            border,
            corner_radius,
        }
    }

    /// Check if the style draws nothing.
    pub fn is_plain(&self) -> bool {
        self.border.is_none() && self.corner_radius == 0
    }

    /// Render the declaration block body.
    pub fn to_declaration(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        match self.border {
            Some(border) => parts.push(format!(
                "border: {}px solid {};",
                border.width,
                border.color.name()
            )),
            None if self.corner_radius == 0 => parts.push("border: none;".to_string()),
            None => {}
        }
        if self.corner_radius > 0 {
            parts.push(format!("border-radius: {}px;", self.corner_radius));
        }
        parts.join(" ")
    }

    /// Render a style sheet rule targeting the frame widget.
    pub fn to_style_sheet(&self) -> String {
        format!("#{FRAME_OBJECT_NAME} {{ {} }}", self.to_declaration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_and_inactive_colors() {
        let accent = DEFAULT_ACTIVE_BORDER_COLOR;

        let active = FrameStyle::resolve(true, WindowState::ACTIVE, accent, false);
        assert_eq!(active.border.map(|b| b.color), Some(accent));

        let inactive = FrameStyle::resolve(true, WindowState::NO_STATE, accent, false);
        assert_eq!(inactive.border.map(|b| b.color), Some(INACTIVE_BORDER_COLOR));
        assert_eq!(inactive.to_declaration(), "border: 1px solid #aaaaaa;");
    }

    #[test]
    fn test_suppressed_outside_normal_state() {
        let accent = DEFAULT_ACTIVE_BORDER_COLOR;
        for state in [
            WindowState::MAXIMIZED | WindowState::ACTIVE,
            WindowState::FULL_SCREEN | WindowState::ACTIVE,
        ] {
            let style = FrameStyle::resolve(true, state, accent, true);
            assert!(style.is_plain());
            assert_eq!(style.to_style_sheet(), "#ChromeFrame { border: none; }");
        }
    }

    #[test]
    fn test_system_borders_keep_rounding() {
        let style = FrameStyle::resolve(false, WindowState::ACTIVE, Color::BLACK, true);
        assert!(style.border.is_none());
        assert_eq!(style.to_declaration(), "border-radius: 8px;");
    }
}
