use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::selector::Selector;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    // Identity
    pub id: String,
    pub tag: String,

    // Presentation
    pub classes: Vec<String>,
    /// Inline style declarations in insertion order.
    pub style: Vec<(String, String)>,
    /// Rendered outer width including margins, in pixels.
    pub outer_width: u32,

    // Content
    pub text: Option<String>,
    pub attributes: HashMap<String, String>,

    // Form state
    pub value: String,
    pub checked: bool,

    pub children: Vec<Element>,
}

impl Default for Element {
    fn default() -> Self {
        Self {
            id: generate_id("el"),
            tag: "div".to_string(),
            classes: Vec::new(),
            style: Vec::new(),
            outer_width: 0,
            text: None,
            attributes: HashMap::new(),
            value: String::new(),
            checked: false,
            children: Vec::new(),
        }
    }
}

impl Element {
    /// Create an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into().to_ascii_lowercase();
        Self {
            id: generate_id(&tag),
            tag,
            ..Default::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn form() -> Self {
        Self::new("form")
    }

    pub fn span(text: impl Into<String>) -> Self {
        Self::new("span").text(text)
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new("label").text(text)
    }

    /// Create a text input.
    pub fn input() -> Self {
        Self::new("input").attr("type", "text")
    }

    /// Create a password input.
    pub fn password() -> Self {
        Self::new("input").attr("type", "password")
    }

    pub fn checkbox() -> Self {
        Self::new("input").attr("type", "checkbox")
    }

    pub fn radio() -> Self {
        Self::new("input").attr("type", "radio")
    }

    pub fn select() -> Self {
        Self::new("select")
    }

    // Identity
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    // Presentation
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.add_class(&class.into());
        self
    }

    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(&property.into(), value);
        self
    }

    pub fn outer_width(mut self, width: u32) -> Self {
        self.outer_width = width;
        self
    }

    // Content
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    // Form state
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    // Children
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    // Queries

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns true if the class was not already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if class.is_empty() || self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    /// Remove a class. Returns true if the class was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// The `type` attribute for inputs, lower-cased.
    pub fn input_type(&self) -> Option<String> {
        if self.tag != "input" {
            return None;
        }
        self.get_attr("type").map(str::to_ascii_lowercase)
    }

    /// Whether this element carries a checked state (checkbox or radio input).
    pub fn is_checkable(&self) -> bool {
        matches!(self.input_type().as_deref(), Some("checkbox" | "radio"))
    }

    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style declaration, replacing an existing one in place.
    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| p == property) {
            Some((_, existing)) => *existing = value,
            None => self.style.push((property.to_string(), value)),
        }
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        selector.matches(self)
    }
}
