//! Anti-aliased coverage masks.

use crate::error::{RenderError, RenderResult};
use crate::region::Region;
use crate::types::{Rect, Size};

/// Samples per pixel along each axis when rasterizing shapes.
const SUPERSAMPLE: u32 = 4;

/// An 8-bit coverage mask.
///
/// Each pixel stores how much of it is covered by the shape, from `0`
/// (outside) to `255` (fully inside). Coordinates outside the mask read as
/// zero coverage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    coverage: Vec<u8>,
}

impl AlphaMask {
    /// Create a fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            coverage: vec![0; width as usize * height as usize],
        }
    }

    /// Create a mask from row-major coverage bytes.
    pub fn from_coverage(width: u32, height: u32, coverage: Vec<u8>) -> RenderResult<Self> {
        let expected = width as usize * height as usize;
        if coverage.len() != expected {
            return Err(RenderError::CoverageSizeMismatch {
                width,
                height,
                expected,
                actual: coverage.len(),
            });
        }
        Ok(Self {
            width,
            height,
            coverage,
        })
    }

    /// Rasterize a rounded rectangle filling `size`, shrunk by `inset` on
    /// every side, with corners of the given `radius`.
    ///
    /// The radius is clamped to half the shorter side of the inset rectangle.
    /// Edge pixels are anti-aliased with a 4×4 supersample grid.
    pub fn rounded_rect(size: Size, inset: i32, radius: f32) -> Self {
        let width = size.width.max(0) as u32;
        let height = size.height.max(0) as u32;
        let mut mask = Self::new(width, height);

        let shape = Rect::from_size(size).deflate(inset.max(0));
        if shape.is_empty() {
            return mask;
        }

        let left = shape.left() as f32;
        let top = shape.top() as f32;
        let right = shape.right() as f32;
        let bottom = shape.bottom() as f32;
        let radius = radius
            .max(0.0)
            .min(shape.width() as f32 / 2.0)
            .min(shape.height() as f32 / 2.0);

        let inside = |px: f32, py: f32| -> bool {
            if px < left || px >= right || py < top || py >= bottom {
                return false;
            }
            // Nearest point on the inner rectangle whose offset by `radius`
            // forms the rounded outline.
            let cx = px.clamp(left + radius, right - radius);
            let cy = py.clamp(top + radius, bottom - radius);
            let dx = px - cx;
            let dy = py - cy;
            dx * dx + dy * dy <= radius * radius
        };

        let samples = SUPERSAMPLE * SUPERSAMPLE;
        let step = 1.0 / SUPERSAMPLE as f32;
        for y in shape.top()..shape.bottom() {
            for x in shape.left()..shape.right() {
                let mut hits = 0u32;
                for sy in 0..SUPERSAMPLE {
                    for sx in 0..SUPERSAMPLE {
                        let px = x as f32 + (sx as f32 + 0.5) * step;
                        let py = y as f32 + (sy as f32 + 0.5) * step;
                        if inside(px, py) {
                            hits += 1;
                        }
                    }
                }
                let value = (hits * 255 + samples / 2) / samples;
                mask.coverage[y as usize * width as usize + x as usize] = value as u8;
            }
        }

        tracing::trace!(
            target: "lattice_chrome::region",
            width,
            height,
            inset,
            radius,
            "rasterized rounded rect mask"
        );
        mask
    }

    /// Mask width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Mask dimensions.
    pub fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    /// Check whether the mask has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw row-major coverage bytes.
    pub fn data(&self) -> &[u8] {
        &self.coverage
    }

    /// Coverage at `(x, y)`; zero outside the mask.
    pub fn coverage(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0;
        }
        self.coverage[y as usize * self.width as usize + x as usize]
    }

    /// The set of pixels whose coverage is at least `threshold`.
    ///
    /// A threshold of zero is treated as one, so fully transparent pixels are
    /// never included.
    pub fn to_region(&self, threshold: u8) -> Region {
        let threshold = threshold.max(1);
        let mut region = Region::new();
        let width = self.width as usize;

        for (y, row) in self.coverage.chunks(width.max(1)).enumerate() {
            let mut spans = Vec::new();
            let mut start: Option<usize> = None;
            for (x, &value) in row.iter().enumerate() {
                match (value >= threshold, start) {
                    (true, None) => start = Some(x),
                    (false, Some(s)) => {
                        spans.push((s as i32, x as i32));
                        start = None;
                    }
                    _ => {}
                }
            }
            if let Some(s) = start {
                spans.push((s as i32, row.len() as i32));
            }
            region.push_band(y as i32, y as i32 + 1, spans);
        }
        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_coverage_checks_length() {
        assert!(AlphaMask::from_coverage(2, 2, vec![0; 4]).is_ok());
        assert_eq!(
            AlphaMask::from_coverage(2, 2, vec![0; 3]),
            Err(RenderError::CoverageSizeMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_rounded_rect_corners_and_interior() {
        let mask = AlphaMask::rounded_rect(Size::new(200, 100), 1, 8.0);

        assert_eq!(mask.width(), 200);
        assert_eq!(mask.height(), 100);

        // Inset border is fully transparent.
        assert_eq!(mask.coverage(0, 50), 0);
        assert_eq!(mask.coverage(199, 50), 0);
        assert_eq!(mask.coverage(100, 0), 0);

        // Corner pixels are cut away.
        assert_eq!(mask.coverage(1, 1), 0);
        assert_eq!(mask.coverage(198, 98), 0);

        // Edges and interior are opaque.
        assert_eq!(mask.coverage(100, 1), 255);
        assert_eq!(mask.coverage(100, 50), 255);
        assert_eq!(mask.coverage(1, 50), 255);
    }

    #[test]
    fn test_rounded_rect_is_antialiased() {
        let mask = AlphaMask::rounded_rect(Size::new(64, 64), 1, 8.0);
        let partial = mask
            .data()
            .iter()
            .filter(|&&v| v > 0 && v < 255)
            .count();
        assert!(partial > 0);
    }

    #[test]
    fn test_rounded_rect_degenerate() {
        let mask = AlphaMask::rounded_rect(Size::new(2, 2), 1, 8.0);
        assert!(mask.data().iter().all(|&v| v == 0));
        assert!(mask.to_region(128).is_empty());
    }

    #[test]
    fn test_to_region_excludes_corners() {
        let mask = AlphaMask::rounded_rect(Size::new(100, 60), 1, 8.0);
        let region = mask.to_region(128);

        assert_eq!(region.bounding_rect(), Rect::new(1, 1, 98, 58));
        assert!(!region.contains_xy(1, 1));
        assert!(region.contains_xy(50, 30));
        assert!(region.contains_xy(1, 30));
    }

    #[test]
    fn test_out_of_bounds_coverage() {
        let mask = AlphaMask::new(4, 4);
        assert_eq!(mask.coverage(-1, 0), 0);
        assert_eq!(mask.coverage(4, 0), 0);
    }
}
