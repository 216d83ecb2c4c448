//! Turns a verdict into class and error-element changes.

use crate::config::{ErrorContainer, ValidationConfig};
use crate::surface::{ErrorElement, PresentationSurface};
use crate::verdict::Verdict;

/// Applies one verdict to a field's presentation targets.
///
/// Holds no state between cycles: the surface is the only record of what was
/// shown.
#[derive(Debug, Clone, Copy)]
pub struct PresentationController<'a> {
    config: &'a ValidationConfig,
}

impl<'a> PresentationController<'a> {
    pub fn new(config: &'a ValidationConfig) -> Self {
        Self { config }
    }

    /// Update classes and the error element for `field`.
    pub fn apply<S: PresentationSurface + ?Sized>(
        &self,
        surface: &mut S,
        field: &str,
        verdict: Verdict,
    ) {
        let policy = self.config.container();
        let container = surface.error_container(field, policy);
        if container.is_none() {
            log::debug!("[present] no error container for {} ({:?})", field, policy);
        }

        self.apply_classes(surface, field, container.as_deref(), verdict);
        if let Some(container) = container {
            self.apply_error(surface, field, &container, verdict);
        }
    }

    fn apply_classes<S: PresentationSurface + ?Sized>(
        &self,
        surface: &mut S,
        field: &str,
        container: Option<&str>,
        verdict: Verdict,
    ) {
        let mut targets = vec![field.to_string()];
        if let Some(container) = container {
            if self.config.container().classes_labels() {
                targets.extend(surface.labels_within(container));
            }
        }

        let (add, remove) = match verdict {
            Verdict::Invalid => (self.config.invalid_class(), self.config.valid_class()),
            Verdict::Valid => (self.config.valid_class(), self.config.invalid_class()),
        };

        for target in &targets {
            if let Some(class) = add {
                surface.add_class(target, class);
            }
            if let Some(class) = remove {
                surface.remove_class(target, class);
            }
        }
    }

    fn apply_error<S: PresentationSurface + ?Sized>(
        &self,
        surface: &mut S,
        field: &str,
        container: &str,
        verdict: Verdict,
    ) {
        let error_id = self.error_id(field);
        if surface.remove_error(container, &error_id) {
            log::trace!("[present] removed {} from {}", error_id, container);
        }

        let options = self.config.error();
        if verdict.is_invalid() && options.show {
            let element = self.error_element(surface, field);
            log::trace!("[present] inserting {} into {}", element.id, container);
            surface.insert_error(container, element, options.placement);
        }
    }

    /// ID given to the error element of `field`.
    pub fn error_id(&self, field: &str) -> String {
        let prefix = self.config.error().class.as_deref().unwrap_or("error");
        format!("{prefix}-{field}")
    }

    fn error_element<S: PresentationSurface + ?Sized>(
        &self,
        surface: &S,
        field: &str,
    ) -> ErrorElement {
        let options = self.config.error();
        let style = match self.config.container() {
            ErrorContainer::Parent => {
                let width = surface.outer_width(field).unwrap_or(0);
                vec![
                    ("width", format!("{width}px")),
                    ("display", "block".to_string()),
                    ("float", "left".to_string()),
                    ("margin", "0".to_string()),
                ]
            }
            ErrorContainer::Closest(_) => Vec::new(),
        };

        ErrorElement {
            id: self.error_id(field),
            tag: options.tag.clone(),
            class: options.class.clone(),
            text: options.text.clone(),
            style,
        }
    }
}
