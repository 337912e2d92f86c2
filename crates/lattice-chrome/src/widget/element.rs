//! The widget contract seen by the chrome.
//!
//! The chrome never paints slot widgets; it only needs their geometry,
//! optional hit-test masks, mouse transparency and children in order to
//! carve interactive islands out of the title bar. [`Widget`] captures
//! exactly that, and [`Element`] is a plain retained implementation.

use std::sync::Arc;

use parking_lot::Mutex;

use lattice_chrome_render::{Rect, Region};

/// A node of the widget tree as far as hit-testing is concerned.
///
/// Geometry is in the parent's coordinate space. A mask, when present, is in
/// the widget's own coordinate space (origin at the widget's top-left) and
/// replaces the geometry as the widget's hit-test shape.
pub trait Widget: Send + Sync {
    /// Geometry relative to the parent.
    fn geometry(&self) -> Rect;

    /// Move and resize the widget.
    fn set_geometry(&self, rect: Rect);

    /// Explicit hit-test mask, in widget-local coordinates.
    fn mask(&self) -> Option<Region> {
        None
    }

    /// Whether mouse events pass through this widget.
    fn is_transparent_for_mouse(&self) -> bool {
        false
    }

    /// Direct children.
    fn children(&self) -> Vec<Arc<dyn Widget>> {
        Vec::new()
    }
}

struct ElementData {
    name: String,
    geometry: Rect,
    mask: Option<Region>,
    transparent_for_mouse: bool,
    children: Vec<Arc<dyn Widget>>,
}

/// A retained widget node.
///
/// `Element` is a cheap handle: clones share the same node, so a caller can
/// keep a clone after handing one to a title-bar slot and still move or
/// reshape it later.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lattice_chrome::render::Rect;
/// use lattice_chrome::widget::{Element, Widget};
///
/// let search = Element::new("search", Rect::new(0, 0, 200, 30))
///     .with_child(Arc::new(Element::new("field", Rect::new(4, 4, 192, 22))));
/// assert_eq!(search.children().len(), 1);
/// ```
#[derive(Clone)]
pub struct Element {
    data: Arc<Mutex<ElementData>>,
}

impl Element {
    /// Create an element with the given name and geometry.
    pub fn new(name: impl Into<String>, geometry: Rect) -> Self {
        Self {
            data: Arc::new(Mutex::new(ElementData {
                name: name.into(),
                geometry,
                mask: None,
                transparent_for_mouse: false,
                children: Vec::new(),
            })),
        }
    }

    /// Builder: append a child.
    pub fn with_child(self, child: Arc<dyn Widget>) -> Self {
        self.add_child(child);
        self
    }

    /// Builder: set the hit-test mask.
    pub fn with_mask(self, mask: Region) -> Self {
        self.set_mask(Some(mask));
        self
    }

    /// Builder: set mouse transparency.
    pub fn with_transparent_for_mouse(self, transparent: bool) -> Self {
        self.set_transparent_for_mouse(transparent);
        self
    }

    /// The element's name.
    pub fn name(&self) -> String {
        self.data.lock().name.clone()
    }

    /// Append a child.
    pub fn add_child(&self, child: Arc<dyn Widget>) {
        self.data.lock().children.push(child);
    }

    /// Remove all children.
    pub fn clear_children(&self) {
        self.data.lock().children.clear();
    }

    /// Set or clear the hit-test mask.
    pub fn set_mask(&self, mask: Option<Region>) {
        self.data.lock().mask = mask;
    }

    /// Set mouse transparency.
    pub fn set_transparent_for_mouse(&self, transparent: bool) {
        self.data.lock().transparent_for_mouse = transparent;
    }
}

impl Widget for Element {
    fn geometry(&self) -> Rect {
        self.data.lock().geometry
    }

    fn set_geometry(&self, rect: Rect) {
        self.data.lock().geometry = rect;
    }

    fn mask(&self) -> Option<Region> {
        self.data.lock().mask.clone()
    }

    fn is_transparent_for_mouse(&self) -> bool {
        self.data.lock().transparent_for_mouse
    }

    fn children(&self) -> Vec<Arc<dyn Widget>> {
        self.data.lock().children.clone()
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = self.data.lock();
        f.debug_struct("Element")
            .field("name", &data.name)
            .field("geometry", &data.geometry)
            .field("transparent_for_mouse", &data.transparent_for_mouse)
            .field("children", &data.children.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Element: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let element = Element::new("button", Rect::new(0, 0, 10, 10));
        let handle = element.clone();

        handle.set_geometry(Rect::new(5, 5, 20, 20));
        handle.set_transparent_for_mouse(true);

        assert_eq!(element.geometry(), Rect::new(5, 5, 20, 20));
        assert!(element.is_transparent_for_mouse());
    }

    #[test]
    fn test_children_and_mask() {
        let element = Element::new("group", Rect::new(0, 0, 100, 30))
            .with_child(Arc::new(Element::new("a", Rect::new(0, 0, 10, 10))))
            .with_mask(Region::from_rect(Rect::new(0, 0, 50, 30)));

        assert_eq!(element.children().len(), 1);
        assert_eq!(
            element.mask().map(|m| m.bounding_rect()),
            Some(Rect::new(0, 0, 50, 30))
        );

        element.clear_children();
        element.set_mask(None);
        assert!(element.children().is_empty());
        assert!(element.mask().is_none());
    }
}
