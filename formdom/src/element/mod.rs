mod node;

pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in &root.children {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find the child-index path from `root` to the element with the given ID.
///
/// The root itself has an empty path.
pub fn find_path(root: &Element, id: &str) -> Option<Vec<usize>> {
    if root.id == id {
        return Some(Vec::new());
    }

    for (index, child) in root.children.iter().enumerate() {
        if let Some(mut path) = find_path(child, id) {
            path.insert(0, index);
            return Some(path);
        }
    }

    None
}

/// Collect every element in the tree in document order (pre-order).
pub fn collect_elements(root: &Element) -> Vec<&Element> {
    let mut out = Vec::new();
    collect_recursive(root, &mut out);
    out
}

fn collect_recursive<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    out.push(element);
    for child in &element.children {
        collect_recursive(child, out);
    }
}
