//! Window icon support.
//!
//! Host windows report their icon through
//! [`HostWindowSignals::icon_changed`](super::HostWindowSignals); the chrome
//! widget scales it down to the title-bar icon size before handing it on.

use std::path::Path;

use image::RgbaImage;
use image::imageops::FilterType;

/// Edge length of the icon shown in the title bar.
pub const TITLE_BAR_ICON_SIZE: u32 = 16;

/// Error type for icon operations.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// Width or height is zero.
    #[error("icon dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length doesn't match the dimensions.
    #[error("icon data has {actual} bytes, expected {expected}")]
    DataSizeMismatch { expected: usize, actual: usize },

    /// Decoding the image failed.
    #[error("failed to load icon: {0}")]
    Load(#[from] image::ImageError),

    /// The platform rejected the icon.
    #[error("platform icon error: {0}")]
    Platform(String),
}

/// A window icon held as straight RGBA pixels.
///
/// # Example
///
/// ```
/// use lattice_chrome::window::WindowIcon;
///
/// // 2x2 red square
/// let rgba = vec![255, 0, 0, 255].repeat(4);
/// let icon = WindowIcon::from_rgba(rgba, 2, 2)?;
/// assert_eq!(icon.width(), 2);
/// # Ok::<(), lattice_chrome::window::IconError>(())
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct WindowIcon {
    /// RGBA pixel data, row-major.
    rgba: Vec<u8>,
    width: u32,
    height: u32,
}

impl WindowIcon {
    /// Create an icon from raw RGBA pixel data (4 bytes per pixel).
    pub fn from_rgba(rgba: Vec<u8>, width: u32, height: u32) -> Result<Self, IconError> {
        if width == 0 || height == 0 {
            return Err(IconError::InvalidDimensions { width, height });
        }

        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(IconError::DataSizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        Ok(Self {
            rgba,
            width,
            height,
        })
    }

    /// Load an icon from an image file.
    ///
    /// Supports PNG, JPEG, BMP, ICO, and other formats via the `image` crate.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, IconError> {
        let img = image::open(path.as_ref())?;
        Ok(Self::from_image(img.to_rgba8()))
    }

    /// Load an icon from in-memory image data; the format is auto-detected.
    pub fn from_memory(data: &[u8]) -> Result<Self, IconError> {
        let img = image::load_from_memory(data)?;
        Ok(Self::from_image(img.to_rgba8()))
    }

    fn from_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            rgba: img.into_raw(),
            width,
            height,
        }
    }

    /// Icon width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Icon height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Return a copy resampled to `width`×`height`.
    ///
    /// Returns a clone when the icon already has that size.
    pub fn scaled(&self, width: u32, height: u32) -> Result<Self, IconError> {
        if width == 0 || height == 0 {
            return Err(IconError::InvalidDimensions { width, height });
        }
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }

        let source = RgbaImage::from_raw(self.width, self.height, self.rgba.clone()).ok_or(
            IconError::DataSizeMismatch {
                expected: (self.width as usize) * (self.height as usize) * 4,
                actual: self.rgba.len(),
            },
        )?;
        let resized = image::imageops::resize(&source, width, height, FilterType::Triangle);
        Ok(Self::from_image(resized))
    }

    /// The icon at title-bar size (16×16).
    pub fn for_title_bar(&self) -> Result<Self, IconError> {
        self.scaled(TITLE_BAR_ICON_SIZE, TITLE_BAR_ICON_SIZE)
    }

    /// Convert to a winit icon.
    pub(crate) fn to_winit_icon(&self) -> Result<winit::window::Icon, IconError> {
        winit::window::Icon::from_rgba(self.rgba.clone(), self.width, self.height)
            .map_err(|e| IconError::Platform(e.to_string()))
    }
}

impl std::fmt::Debug for WindowIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowIcon")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("data_len", &self.rgba.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> WindowIcon {
        let rgba = [10u8, 20, 30, 255].repeat((width * height) as usize);
        WindowIcon::from_rgba(rgba, width, height).unwrap()
    }

    #[test]
    fn test_icon_from_rgba_zero_dimensions() {
        assert!(matches!(
            WindowIcon::from_rgba(vec![], 0, 10),
            Err(IconError::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn test_icon_from_rgba_size_mismatch() {
        let result = WindowIcon::from_rgba(vec![255; 8], 2, 2);
        assert!(matches!(
            result,
            Err(IconError::DataSizeMismatch {
                expected: 16,
                actual: 8
            })
        ));
    }

    #[test]
    fn test_icon_scaled_for_title_bar() {
        let icon = solid(64, 48).for_title_bar().unwrap();
        assert_eq!(icon.width(), 16);
        assert_eq!(icon.height(), 16);
        assert_eq!(icon.rgba().len(), 16 * 16 * 4);
        for (channel, expected) in icon.rgba()[0..4].iter().zip([10i32, 20, 30, 255]) {
            assert!((*channel as i32 - expected).abs() <= 1);
        }
    }

    #[test]
    fn test_icon_scaled_same_size_is_identity() {
        let icon = solid(16, 16);
        assert_eq!(icon.for_title_bar().unwrap(), icon);
        assert!(icon.scaled(0, 16).is_err());
    }

    #[test]
    fn test_icon_from_memory_rejects_garbage() {
        assert!(matches!(
            WindowIcon::from_memory(b"not an image"),
            Err(IconError::Load(_))
        ));
    }

    #[test]
    fn test_icon_debug() {
        let debug_str = format!("{:?}", solid(2, 2));
        assert!(debug_str.contains("WindowIcon"));
        assert!(debug_str.contains("width: 2"));
    }
}
