use crate::element::{collect_elements, find_element, find_path, Element};
use crate::error::DomError;
use crate::selector::Selector;

/// An owned element tree with id-addressed queries and mutations.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        find_element(&self.root, id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Element> {
        let path = find_path(&self.root, id)?;
        Some(walk_mut(&mut self.root, &path))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// ID of the element's parent, `None` for the root or an unknown id.
    pub fn parent_id(&self, id: &str) -> Option<&str> {
        let path = find_path(&self.root, id)?;
        let (_, parent_path) = path.split_last()?;
        Some(walk(&self.root, parent_path).id.as_str())
    }

    /// Ancestors of an element, nearest first. The element itself is excluded.
    pub fn ancestors(&self, id: &str) -> Vec<&Element> {
        let Some(path) = find_path(&self.root, id) else {
            return Vec::new();
        };
        (0..path.len())
            .rev()
            .map(|depth| walk(&self.root, &path[..depth]))
            .collect()
    }

    /// The element itself or its nearest ancestor matching `selector`.
    pub fn closest(&self, id: &str, selector: &Selector) -> Option<&Element> {
        let element = self.get(id)?;
        if selector.matches(element) {
            return Some(element);
        }
        self.ancestors(id)
            .into_iter()
            .find(|ancestor| selector.matches(ancestor))
    }

    /// Every element in the document matching `selector`, in document order.
    pub fn query_all(&self, selector: &Selector) -> Vec<&Element> {
        collect_elements(&self.root)
            .into_iter()
            .filter(|el| selector.matches(el))
            .collect()
    }

    /// Descendants of `id` matching `selector`, in document order.
    pub fn query_within(&self, id: &str, selector: &Selector) -> Vec<&Element> {
        let Some(scope) = self.get(id) else {
            return Vec::new();
        };
        scope
            .children
            .iter()
            .flat_map(collect_elements)
            .filter(|el| selector.matches(el))
            .collect()
    }

    // Mutations

    pub fn prepend_child(&mut self, parent: &str, child: Element) -> Result<(), DomError> {
        let node = self.require_mut(parent)?;
        node.children.insert(0, child);
        Ok(())
    }

    pub fn append_child(&mut self, parent: &str, child: Element) -> Result<(), DomError> {
        let node = self.require_mut(parent)?;
        node.children.push(child);
        Ok(())
    }

    /// Detach an element (and its subtree) from the document.
    pub fn remove(&mut self, id: &str) -> Result<Element, DomError> {
        let path = find_path(&self.root, id).ok_or_else(|| DomError::NodeNotFound(id.into()))?;
        let Some((&index, parent_path)) = path.split_last() else {
            return Err(DomError::RootRemoval);
        };
        let parent = walk_mut(&mut self.root, parent_path);
        log::trace!("[dom] removing {} from {}", id, parent.id);
        Ok(parent.children.remove(index))
    }

    /// Returns true if the class was newly added.
    pub fn add_class(&mut self, id: &str, class: &str) -> Result<bool, DomError> {
        Ok(self.require_mut(id)?.add_class(class))
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, id: &str, class: &str) -> Result<bool, DomError> {
        Ok(self.require_mut(id)?.remove_class(class))
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), DomError> {
        self.require_mut(id)?.value = value.into();
        Ok(())
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) -> Result<(), DomError> {
        self.require_mut(id)?.checked = checked;
        Ok(())
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut Element, DomError> {
        self.get_mut(id)
            .ok_or_else(|| DomError::NodeNotFound(id.to_string()))
    }
}

fn walk<'a>(root: &'a Element, path: &[usize]) -> &'a Element {
    path.iter().fold(root, |node, &index| &node.children[index])
}

fn walk_mut<'a>(root: &'a mut Element, path: &[usize]) -> &'a mut Element {
    path.iter()
        .fold(root, |node, &index| &mut node.children[index])
}
