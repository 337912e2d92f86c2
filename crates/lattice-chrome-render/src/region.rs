//! Rectangle-set regions.
//!
//! A [`Region`] is an arbitrary set of pixels described by non-overlapping
//! rectangles. Internally it is a list of horizontal bands sorted top to
//! bottom; each band holds the sorted, non-touching x-spans covered within
//! it, and vertically adjacent bands with identical spans are merged. This
//! representation is canonical, so two regions covering the same pixels
//! compare equal.

use std::ops::{BitAnd, BitOr, BitOrAssign, Sub, SubAssign};

use crate::types::Rect;

/// A half-open horizontal span `[start, end)`.
type Span = (i32, i32);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Band {
    top: i32,
    bottom: i32,
    spans: Vec<Span>,
}

/// A set of pixels made of non-overlapping rectangles.
///
/// # Example
///
/// ```
/// use lattice_chrome_render::{Rect, Region};
///
/// let a = Region::from_rect(Rect::new(0, 0, 10, 10));
/// let b = Region::from_rect(Rect::new(10, 0, 10, 10));
///
/// // Touching rectangles merge into one.
/// assert_eq!(a.united(&b), Region::from_rect(Rect::new(0, 0, 20, 10)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Region {
    bands: Vec<Band>,
}

impl Region {
    /// Create an empty region.
    pub const fn new() -> Self {
        Self { bands: Vec::new() }
    }

    /// Create a region covering a single rectangle.
    ///
    /// Empty rectangles produce the empty region.
    pub fn from_rect(rect: Rect) -> Self {
        if rect.is_empty() {
            return Self::new();
        }
        Self {
            bands: vec![Band {
                top: rect.top(),
                bottom: rect.bottom(),
                spans: vec![(rect.left(), rect.right())],
            }],
        }
    }

    /// Check whether the region covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Remove every pixel from the region.
    pub fn clear(&mut self) {
        self.bands.clear();
    }

    /// Iterate the rectangles making up the region, top to bottom, left to right.
    pub fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.bands.iter().flat_map(|band| {
            band.spans
                .iter()
                .map(move |&(start, end)| Rect::from_edges(start, band.top, end, band.bottom))
        })
    }

    /// Number of rectangles in the canonical decomposition.
    pub fn rect_count(&self) -> usize {
        self.bands.iter().map(|b| b.spans.len()).sum()
    }

    /// Smallest rectangle containing the whole region.
    pub fn bounding_rect(&self) -> Rect {
        let (Some(first), Some(last)) = (self.bands.first(), self.bands.last()) else {
            return Rect::ZERO;
        };
        let left = self
            .bands
            .iter()
            .filter_map(|b| b.spans.first().map(|s| s.0))
            .min()
            .unwrap_or(0);
        let right = self
            .bands
            .iter()
            .filter_map(|b| b.spans.last().map(|s| s.1))
            .max()
            .unwrap_or(0);
        Rect::from_edges(left, first.top, right, last.bottom)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> i64 {
        self.bands
            .iter()
            .map(|b| {
                let width: i64 = b.spans.iter().map(|&(s, e)| (e - s) as i64).sum();
                width * (b.bottom - b.top) as i64
            })
            .sum()
    }

    /// Check whether the pixel at `(x, y)` belongs to the region.
    pub fn contains_xy(&self, x: i32, y: i32) -> bool {
        self.bands
            .iter()
            .find(|b| y >= b.top && y < b.bottom)
            .is_some_and(|b| b.spans.iter().any(|&(s, e)| x >= s && x < e))
    }

    /// Check whether the pixel at `point` belongs to the region.
    #[inline]
    pub fn contains(&self, point: crate::types::Point) -> bool {
        self.contains_xy(point.x, point.y)
    }

    /// Check whether the region overlaps a rectangle.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        !self.intersected(&Region::from_rect(rect)).is_empty()
    }

    /// Pixels in either region.
    pub fn united(&self, other: &Region) -> Region {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        self.combine(other, |a, b| a || b)
    }

    /// Pixels in `self` but not in `other`.
    pub fn subtracted(&self, other: &Region) -> Region {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        self.combine(other, |a, b| a && !b)
    }

    /// Pixels in both regions.
    pub fn intersected(&self, other: &Region) -> Region {
        if self.is_empty() || other.is_empty() {
            return Region::new();
        }
        self.combine(other, |a, b| a && b)
    }

    /// The region shifted by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Region {
        let mut region = self.clone();
        region.translate(dx, dy);
        region
    }

    /// Shift the region in place by `(dx, dy)`.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        for band in &mut self.bands {
            band.top += dy;
            band.bottom += dy;
            for span in &mut band.spans {
                span.0 += dx;
                span.1 += dx;
            }
        }
    }

    /// Add a rectangle to the region.
    pub fn union_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        *self = self.united(&Region::from_rect(rect));
    }

    /// Add another region to this one.
    pub fn union_region(&mut self, other: &Region) {
        if other.is_empty() {
            return;
        }
        *self = self.united(other);
    }

    /// Remove a rectangle from the region.
    pub fn subtract_rect(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        *self = self.subtracted(&Region::from_rect(rect));
    }

    /// Append a band below every existing band.
    ///
    /// `spans` must be sorted, non-empty, non-overlapping and non-touching,
    /// and `top` must not be above the current bottom edge. Used by mask
    /// rasterization, which produces rows in order.
    pub(crate) fn push_band(&mut self, top: i32, bottom: i32, spans: Vec<Span>) {
        if spans.is_empty() || top >= bottom {
            return;
        }
        if let Some(last) = self.bands.last_mut()
            && last.bottom == top
            && last.spans == spans
        {
            last.bottom = bottom;
            return;
        }
        self.bands.push(Band { top, bottom, spans });
    }

    fn combine(&self, other: &Region, op: impl Fn(bool, bool) -> bool) -> Region {
        let mut edges: Vec<i32> = self
            .bands
            .iter()
            .chain(other.bands.iter())
            .flat_map(|b| [b.top, b.bottom])
            .collect();
        edges.sort_unstable();
        edges.dedup();

        let mut out = Region::new();
        let mut cursor_a = 0;
        let mut cursor_b = 0;
        for pair in edges.windows(2) {
            let (top, bottom) = (pair[0], pair[1]);
            let a = spans_at(&self.bands, &mut cursor_a, top);
            let b = spans_at(&other.bands, &mut cursor_b, top);
            out.push_band(top, bottom, combine_spans(a, b, &op));
        }
        out
    }
}

/// Spans of the band covering row `y`, advancing `cursor` monotonically.
fn spans_at<'a>(bands: &'a [Band], cursor: &mut usize, y: i32) -> &'a [Span] {
    while *cursor < bands.len() && bands[*cursor].bottom <= y {
        *cursor += 1;
    }
    match bands.get(*cursor) {
        Some(band) if band.top <= y => &band.spans,
        _ => &[],
    }
}

fn covers(spans: &[Span], x: i32) -> bool {
    spans.iter().any(|&(s, e)| x >= s && x < e)
}

fn combine_spans(a: &[Span], b: &[Span], op: &impl Fn(bool, bool) -> bool) -> Vec<Span> {
    let mut edges: Vec<i32> = a.iter().chain(b.iter()).flat_map(|&(s, e)| [s, e]).collect();
    edges.sort_unstable();
    edges.dedup();

    let mut out: Vec<Span> = Vec::new();
    for pair in edges.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        if !op(covers(a, start), covers(b, start)) {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.1 == start => last.1 = end,
            _ => out.push((start, end)),
        }
    }
    out
}

impl From<Rect> for Region {
    fn from(rect: Rect) -> Self {
        Region::from_rect(rect)
    }
}

impl FromIterator<Rect> for Region {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        let mut region = Region::new();
        region.extend(iter);
        region
    }
}

impl Extend<Rect> for Region {
    fn extend<I: IntoIterator<Item = Rect>>(&mut self, iter: I) {
        for rect in iter {
            self.union_rect(rect);
        }
    }
}

impl BitOr for &Region {
    type Output = Region;

    fn bitor(self, rhs: &Region) -> Region {
        self.united(rhs)
    }
}

impl BitOrAssign<&Region> for Region {
    fn bitor_assign(&mut self, rhs: &Region) {
        self.union_region(rhs);
    }
}

impl BitAnd for &Region {
    type Output = Region;

    fn bitand(self, rhs: &Region) -> Region {
        self.intersected(rhs)
    }
}

impl Sub for &Region {
    type Output = Region;

    fn sub(self, rhs: &Region) -> Region {
        self.subtracted(rhs)
    }
}

impl SubAssign<&Region> for Region {
    fn sub_assign(&mut self, rhs: &Region) {
        *self = self.subtracted(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rects(region: &Region) -> Vec<Rect> {
        region.rects().collect()
    }

    #[test]
    fn test_empty_rect_gives_empty_region() {
        assert!(Region::from_rect(Rect::new(5, 5, 0, 10)).is_empty());
        assert_eq!(Region::new().bounding_rect(), Rect::ZERO);
        assert_eq!(Region::new().area(), 0);
    }

    #[test]
    fn test_union_disjoint() {
        let mut region = Region::from_rect(Rect::new(0, 0, 10, 10));
        region.union_rect(Rect::new(20, 0, 10, 10));

        assert_eq!(
            rects(&region),
            vec![Rect::new(0, 0, 10, 10), Rect::new(20, 0, 10, 10)]
        );
        assert_eq!(region.area(), 200);
        assert_eq!(region.bounding_rect(), Rect::new(0, 0, 30, 10));
    }

    #[test]
    fn test_union_overlapping_is_canonical() {
        let a: Region = [Rect::new(0, 0, 10, 10), Rect::new(5, 5, 10, 10)]
            .into_iter()
            .collect();
        let b: Region = [Rect::new(5, 5, 10, 10), Rect::new(0, 0, 10, 10)]
            .into_iter()
            .collect();

        assert_eq!(a, b);
        assert_eq!(a.area(), 175);
        assert_eq!(
            rects(&a),
            vec![
                Rect::new(0, 0, 10, 5),
                Rect::new(0, 5, 15, 5),
                Rect::new(5, 10, 10, 5),
            ]
        );
    }

    #[test]
    fn test_vertical_merge() {
        let region: Region = [Rect::new(0, 0, 10, 5), Rect::new(0, 5, 10, 5)]
            .into_iter()
            .collect();
        assert_eq!(rects(&region), vec![Rect::new(0, 0, 10, 10)]);
    }

    #[test]
    fn test_subtract_punches_hole() {
        let mut region = Region::from_rect(Rect::new(0, 0, 30, 30));
        region.subtract_rect(Rect::new(10, 10, 10, 10));

        assert_eq!(region.area(), 800);
        assert!(region.contains_xy(5, 15));
        assert!(!region.contains_xy(15, 15));
        assert!(region.contains_xy(25, 15));
        assert_eq!(region.rect_count(), 4);
    }

    #[test]
    fn test_subtract_everything() {
        let region = Region::from_rect(Rect::new(0, 0, 10, 10));
        assert!(region.subtracted(&region).is_empty());
    }

    #[test]
    fn test_intersect() {
        let a = Region::from_rect(Rect::new(0, 0, 20, 20));
        let b = Region::from_rect(Rect::new(10, 10, 20, 20));

        assert_eq!(&a & &b, Region::from_rect(Rect::new(10, 10, 10, 10)));
        assert!(a.intersects_rect(Rect::new(19, 19, 5, 5)));
        assert!(!a.intersects_rect(Rect::new(20, 0, 5, 5)));
    }

    #[test]
    fn test_translate() {
        let region = Region::from_rect(Rect::new(10, 5, 50, 20)).translated(100, 0);
        assert_eq!(rects(&region), vec![Rect::new(110, 5, 50, 20)]);
    }

    #[test]
    fn test_operators() {
        let a = Region::from_rect(Rect::new(0, 0, 10, 10));
        let b = Region::from_rect(Rect::new(5, 0, 10, 10));

        let mut c = &a | &b;
        assert_eq!(c, Region::from_rect(Rect::new(0, 0, 15, 10)));

        c -= &b;
        assert_eq!(c, Region::from_rect(Rect::new(0, 0, 5, 10)));
        assert_eq!(&a - &b, c);
    }
}
