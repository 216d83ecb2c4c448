use thiserror::Error;

/// Errors raised by document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// No element with the given id exists in the document.
    #[error("No element with id '{0}'")]
    NodeNotFound(String),

    /// A selector could not be parsed.
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        /// The selector text as given.
        selector: String,
        /// What went wrong.
        reason: &'static str,
    },

    /// An event name that is not a known DOM event.
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    /// The document root cannot be detached.
    #[error("The document root cannot be removed")]
    RootRemoval,
}
