//! Chrome configuration.
//!
//! [`ChromeConfig`] holds every user-facing chrome option. It is a plain
//! serde struct, so an application can ship a chrome theme as TOML:
//!
//! ```toml
//! title_bar_height = 34
//! caption_button_width = 46
//! title_alignment = "center"
//! active_border_color = "#2d7d9a"
//! ```
//!
//! Missing keys take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lattice_chrome_render::Color;

use super::frame_style::DEFAULT_ACTIVE_BORDER_COLOR;
use super::standard_title_bar::{DEFAULT_CAPTION_BUTTON_WIDTH, DEFAULT_TITLE_BAR_HEIGHT};
use super::title_bar::TitleAlignment;

/// Errors from loading or saving a [`ChromeConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed.
    #[error("invalid chrome config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized.
    #[error("failed to serialize chrome config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A metric is negative.
    #[error("chrome config field `{field}` must not be negative (got {value})")]
    NegativeMetric {
        /// Field name.
        field: &'static str,
        /// Offending value.
        value: i32,
    },

    /// Reading or writing the file failed.
    #[error("chrome config I/O error at {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Chrome options.
///
/// # Example
///
/// ```
/// use lattice_chrome::widget::{ChromeConfig, TitleAlignment};
///
/// let config = ChromeConfig::default()
///     .with_title_bar_height(34)
///     .with_title_alignment(TitleAlignment::Center);
/// assert_eq!(config.caption_button_width, 36);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeConfig {
    /// Show the title bar.
    pub title_bar_visible: bool,
    /// Show the minimize/maximize/close buttons.
    pub caption_buttons_visible: bool,
    /// Show the title text.
    pub title_visible: bool,
    /// Show the window icon.
    pub icon_visible: bool,
    /// System-menu width pushed to the host while the icon is hidden.
    pub icon_width: i32,
    /// Width of each caption button.
    pub caption_button_width: i32,
    /// Title-bar height.
    pub title_bar_height: i32,
    /// Title text alignment.
    pub title_alignment: TitleAlignment,
    /// Title-bar background, `None` for the theme default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_bar_color: Option<Color>,
    /// Border color of the active window.
    pub active_border_color: Color,
    /// Merge the title bar into the content area.
    pub unified_title_bar_and_content: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            title_bar_visible: true,
            caption_buttons_visible: true,
            title_visible: true,
            icon_visible: true,
            icon_width: 0,
            caption_button_width: DEFAULT_CAPTION_BUTTON_WIDTH,
            title_bar_height: DEFAULT_TITLE_BAR_HEIGHT,
            title_alignment: TitleAlignment::Left,
            title_bar_color: None,
            active_border_color: DEFAULT_ACTIVE_BORDER_COLOR,
            unified_title_bar_and_content: false,
        }
    }
}

impl ChromeConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Render the config as TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Write the config to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        std::fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject negative metrics.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("icon_width", self.icon_width),
            ("caption_button_width", self.caption_button_width),
            ("title_bar_height", self.title_bar_height),
        ] {
            if value < 0 {
                return Err(ConfigError::NegativeMetric { field, value });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set title-bar visibility.
    pub fn with_title_bar_visible(mut self, visible: bool) -> Self {
        self.title_bar_visible = visible;
        self
    }

    /// Set caption-button visibility.
    pub fn with_caption_buttons_visible(mut self, visible: bool) -> Self {
        self.caption_buttons_visible = visible;
        self
    }

    /// Set title-text visibility.
    pub fn with_title_visible(mut self, visible: bool) -> Self {
        self.title_visible = visible;
        self
    }

    /// Set icon visibility.
    pub fn with_icon_visible(mut self, visible: bool) -> Self {
        self.icon_visible = visible;
        self
    }

    /// Set the system-menu width used while the icon is hidden.
    pub fn with_icon_width(mut self, width: i32) -> Self {
        self.icon_width = width;
        self
    }

    /// Set the caption-button width.
    pub fn with_caption_button_width(mut self, width: i32) -> Self {
        self.caption_button_width = width;
        self
    }

    /// Set the title-bar height.
    pub fn with_title_bar_height(mut self, height: i32) -> Self {
        self.title_bar_height = height;
        self
    }

    /// Set the title alignment.
    pub fn with_title_alignment(mut self, alignment: TitleAlignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    /// Set the title-bar background color.
    pub fn with_title_bar_color(mut self, color: Option<Color>) -> Self {
        self.title_bar_color = color;
        self
    }

    /// Set the active border color.
    pub fn with_active_border_color(mut self, color: Color) -> Self {
        self.active_border_color = color;
        self
    }

    /// Set the unified title-bar-and-content flag.
    pub fn with_unified_title_bar_and_content(mut self, unified: bool) -> Self {
        self.unified_title_bar_and_content = unified;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChromeConfig::default();
        assert!(config.title_bar_visible);
        assert!(config.caption_buttons_visible);
        assert_eq!(config.icon_width, 0);
        assert_eq!(config.caption_button_width, 36);
        assert_eq!(config.title_bar_height, 30);
        assert_eq!(config.title_alignment, TitleAlignment::Left);
        assert_eq!(config.title_bar_color, None);
        assert_eq!(config.active_border_color, Color::rgb(24, 131, 215));
        assert!(!config.unified_title_bar_and_content);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ChromeConfig::from_toml_str(
            r##"
            title_bar_height = 34
            title_alignment = "center"
            title_bar_color = "#202020"
            "##,
        )
        .unwrap();

        assert_eq!(config.title_bar_height, 34);
        assert_eq!(config.title_alignment, TitleAlignment::Center);
        assert_eq!(config.title_bar_color, Some(Color::rgb(0x20, 0x20, 0x20)));
        assert_eq!(config.caption_button_width, 36);
    }

    #[test]
    fn test_rejects_negative_metrics() {
        let err = ChromeConfig::from_toml_str("caption_button_width = -4").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NegativeMetric {
                field: "caption_button_width",
                value: -4
            }
        ));
    }

    #[test]
    fn test_rejects_bad_color() {
        let err = ChromeConfig::from_toml_str(r#"active_border_color = "blue-ish""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chrome.toml");

        let config = ChromeConfig::default()
            .with_unified_title_bar_and_content(true)
            .with_title_bar_color(Some(Color::TRANSPARENT))
            .with_icon_visible(false)
            .with_icon_width(24);
        config.save(&path).unwrap();

        assert_eq!(ChromeConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ChromeConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
