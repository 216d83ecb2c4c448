//! Error types for configuring and attaching field validation.

use thiserror::Error;

use crate::config::ParamKind;

/// Setup-time configuration defects.
///
/// A failed validation is never reported through this type; see
/// [`Verdict`](crate::Verdict).
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A configured validator has no registry entry.
    #[error("Unknown validator '{0}'")]
    UnknownValidator(String),

    /// A validator was configured with a parameter of the wrong shape.
    #[error("Validator '{validator}' expects {expected}")]
    InvalidParameter {
        /// The validator name.
        validator: String,
        /// The parameter kind the validator accepts.
        expected: ParamKind,
    },

    /// A character-class pattern failed to compile.
    #[error("Pattern '{name}' is not a valid regular expression: {source}")]
    InvalidPattern {
        /// The option name of the pattern (e.g. `allowedAlpha`).
        name: String,
        /// The underlying compile error.
        source: regex::Error,
    },

    /// The error container selector is not one the document can match.
    #[error("Error container selector '{selector}' is not supported: {source}")]
    InvalidSelector {
        /// The selector text as configured.
        selector: String,
        /// The parse failure.
        source: formdom::DomError,
    },

    /// The error tag has no letters left after sanitising.
    #[error("Error tag '{0}' is not a valid tag name")]
    InvalidErrorTag(String),
}

/// Errors raised while attaching bindings to a document.
#[derive(Debug, Clone, Error)]
pub enum AttachError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dom(#[from] formdom::DomError),
}
