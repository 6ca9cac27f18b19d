mod rect;

use std::collections::HashMap;

pub use rect::{Rect, Size};

/// Read-only view of the current layout.
///
/// Navigation never caches geometry; every query goes through this trait so
/// that a host can answer from live layout and tests can answer from a map.
pub trait Geometry {
    /// Bounding box of the element, or `None` when it is not rendered
    /// (hidden, detached, never laid out).
    fn bounds(&self, id: &str) -> Option<Rect>;

    /// Whether the element currently has layout.
    fn is_visible(&self, id: &str) -> bool {
        self.bounds(id).is_some()
    }
}

/// Element id to bounding box, as produced by a layout pass.
pub type LayoutResult = HashMap<String, Rect>;

impl Geometry for LayoutResult {
    fn bounds(&self, id: &str) -> Option<Rect> {
        self.get(id).copied()
    }
}

impl<G: Geometry + ?Sized> Geometry for &G {
    fn bounds(&self, id: &str) -> Option<Rect> {
        (**self).bounds(id)
    }

    fn is_visible(&self, id: &str) -> bool {
        (**self).is_visible(id)
    }
}
