use crate::element::Element;
use crate::layout::Geometry;

/// Find the deepest element at the given coordinates.
/// Returns None if the point is outside the root.
pub fn hit_test(geometry: &dyn Geometry, root: &Element, x: f32, y: f32) -> Option<String> {
    hit_test_element(geometry, root, x, y, &|_| true)
}

/// Find the deepest focusable element at the given coordinates.
/// Returns None if no focusable element contains the point.
pub fn hit_test_focusable(
    geometry: &dyn Geometry,
    root: &Element,
    x: f32,
    y: f32,
) -> Option<String> {
    hit_test_element(geometry, root, x, y, &Element::is_focusable)
}

fn hit_test_element(
    geometry: &dyn Geometry,
    element: &Element,
    x: f32,
    y: f32,
    accept: &dyn Fn(&Element) -> bool,
) -> Option<String> {
    let rect = geometry.bounds(&element.id)?;

    if !rect.contains(x, y) {
        return None;
    }

    // Check children in reverse order (last rendered = on top)
    for child in element.child_elements().iter().rev() {
        if let Some(id) = hit_test_element(geometry, child, x, y, accept) {
            return Some(id);
        }
    }

    if accept(element) {
        Some(element.id.clone())
    } else {
        None
    }
}
