use std::fmt;
use std::str::FromStr;

use crate::element::Element;
use crate::error::DomError;

/// A compound selector: an optional tag, an optional id and any number of
/// classes, e.g. `div.control-group`, `.field`, `#email`, `label`.
///
/// Combinators and attribute selectors are not supported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let text = input.trim();
        let invalid = |reason| DomError::InvalidSelector {
            selector: input.to_string(),
            reason,
        };

        if text.is_empty() {
            return Err(invalid("empty selector"));
        }

        let mut selector = Selector::default();
        let mut rest = text;

        if let Some(stripped) = rest.strip_prefix('*') {
            rest = stripped;
        } else {
            let tag = take_ident(rest);
            if !tag.is_empty() {
                selector.tag = Some(tag.to_ascii_lowercase());
                rest = &rest[tag.len()..];
            }
        }

        while let Some(marker) = rest.chars().next() {
            if marker != '.' && marker != '#' {
                return Err(invalid("unsupported selector syntax"));
            }
            let ident = take_ident(&rest[1..]);
            if ident.is_empty() {
                return Err(invalid("expected a name after '.' or '#'"));
            }
            if marker == '.' {
                selector.classes.push(ident.to_string());
            } else if selector.id.is_some() {
                return Err(invalid("more than one id"));
            } else {
                selector.id = Some(ident.to_string());
            }
            rest = &rest[1 + ident.len()..];
        }

        Ok(selector)
    }

    /// Selector matching a single tag name.
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_ascii_lowercase()),
            ..Default::default()
        }
    }

    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if &element.id != id {
                return false;
            }
        }
        self.classes.iter().all(|class| element.has_class(class))
    }
}

fn take_ident(input: &str) -> &str {
    let end = input
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    &input[..end]
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.tag {
            Some(tag) => write!(f, "{tag}")?,
            None if self.id.is_none() && self.classes.is_empty() => write!(f, "*")?,
            None => {}
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        Ok(())
    }
}
