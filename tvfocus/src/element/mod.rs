mod content;
mod node;
mod role;

pub use content::Content;
pub use node::{Element, NO_AUTOFOCUS};
pub use role::{InputKind, Role};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in root.child_elements() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Path from `root` down to the element with `id`, both ends included.
/// Returns None if the element is not in the tree.
pub fn path_to<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    let mut path = Vec::new();
    if path_recursive(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn path_recursive<'a>(element: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
    path.push(element);
    if element.id == id {
        return true;
    }
    for child in element.child_elements() {
        if path_recursive(child, id, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Ancestors of the element with `id`, innermost first, starting with the
/// element itself and ending with `root`.
pub fn ancestors<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    path_to(root, id).map(|mut path| {
        path.reverse();
        path
    })
}

/// Whether `id` is `ancestor_id` or lies beneath it.
pub fn is_within(root: &Element, ancestor_id: &str, id: &str) -> bool {
    find_element(root, ancestor_id)
        .map(|ancestor| find_element(ancestor, id).is_some())
        .unwrap_or(false)
}

/// Pre-order (tree order) iterator over `root` and all of its descendants.
pub fn walk(root: &Element) -> Walk<'_> {
    Walk { stack: vec![root] }
}

/// Iterator returned by [`walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.child_elements().iter().rev());
        Some(element)
    }
}
