//! Outbound interface to the element tree the controller decorates.

use formdom::{Document, Element, Selector};

use crate::config::{ErrorContainer, ErrorPlacement};
use crate::context::FieldSource;

/// The error element to insert for an invalid field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorElement {
    pub id: String,
    pub tag: String,
    pub class: Option<String>,
    pub text: String,
    /// Inline style declarations.
    pub style: Vec<(&'static str, String)>,
}

/// Mutations and lookups the presentation controller needs.
pub trait PresentationSurface: FieldSource {
    /// ID of the element that holds the field's error element.
    fn error_container(&self, field: &str, container: &ErrorContainer) -> Option<String>;

    /// IDs of the label elements inside a container.
    fn labels_within(&self, container: &str) -> Vec<String>;

    fn add_class(&mut self, node: &str, class: &str);

    fn remove_class(&mut self, node: &str, class: &str);

    /// Outer width of a node in pixels, margins included.
    fn outer_width(&self, node: &str) -> Option<u32>;

    /// Remove the child of `container` with id `error_id`.
    /// Returns true if something was removed.
    fn remove_error(&mut self, container: &str, error_id: &str) -> bool;

    fn insert_error(&mut self, container: &str, error: ErrorElement, placement: ErrorPlacement);
}

impl FieldSource for Document {
    fn field_value(&self, id: &str) -> Option<String> {
        self.get(id).map(|el| el.value.clone())
    }

    fn is_checked(&self, id: &str) -> bool {
        self.get(id).is_some_and(|el| el.is_checkable() && el.checked)
    }
}

impl PresentationSurface for Document {
    fn error_container(&self, field: &str, container: &ErrorContainer) -> Option<String> {
        match container {
            ErrorContainer::Parent => self.parent_id(field).map(str::to_string),
            ErrorContainer::Closest(selector) => {
                self.closest(field, selector).map(|el| el.id.clone())
            }
        }
    }

    fn labels_within(&self, container: &str) -> Vec<String> {
        self.query_within(container, &Selector::tag("label"))
            .into_iter()
            .map(|el| el.id.clone())
            .collect()
    }

    fn add_class(&mut self, node: &str, class: &str) {
        if let Err(err) = Document::add_class(self, node, class) {
            log::warn!("[present] {}", err);
        }
    }

    fn remove_class(&mut self, node: &str, class: &str) {
        if let Err(err) = Document::remove_class(self, node, class) {
            log::warn!("[present] {}", err);
        }
    }

    fn outer_width(&self, node: &str) -> Option<u32> {
        self.get(node).map(|el| el.outer_width)
    }

    fn remove_error(&mut self, container: &str, error_id: &str) -> bool {
        let is_child = self
            .get(container)
            .is_some_and(|el| el.children.iter().any(|child| child.id == error_id));
        is_child && self.remove(error_id).is_ok()
    }

    fn insert_error(&mut self, container: &str, error: ErrorElement, placement: ErrorPlacement) {
        let mut element = Element::new(error.tag).id(error.id).text(error.text);
        if let Some(class) = error.class {
            element = element.class(class);
        }
        for (property, value) in error.style {
            element = element.style(property, value);
        }

        let inserted = match placement {
            ErrorPlacement::Prepend => self.prepend_child(container, element),
            ErrorPlacement::Append => self.append_child(container, element),
        };
        if let Err(err) = inserted {
            log::warn!("[present] {}", err);
        }
    }
}
