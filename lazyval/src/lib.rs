//! Per-field form validation.
//!
//! A field is bound to a set of named validators. Each time one of its
//! trigger events fires, the current value is run through every configured
//! validator, the outcomes are reduced to a [`Verdict`], and the verdict is
//! reflected on the page: CSS classes on the field (and its labels) and a
//! single error element in the configured container.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lazyval::{FieldBinding, ValidationOptions, ValidatorRegistry};
//!
//! let registry = Arc::new(ValidatorRegistry::builtin());
//! let options = ValidationOptions::new()
//!     .validate_on(["blur", "keyup"])
//!     .validator("notBlank", true)
//!     .validator("minimumLength", 3u64)
//!     .error_text("At least three characters");
//!
//! let mut binding = FieldBinding::new("username", options, registry)?;
//! binding.handle_event(&Event::blur("username"), &mut document)?;
//! ```

mod binding;
mod config;
mod context;
mod engine;
mod error;
mod hook;
mod presentation;
mod registry;
mod surface;
mod verdict;

pub mod validators;

pub use binding::{FieldBinding, FormBindings};
pub use config::{
    CharClasses, ClassOption, CrossFieldMatch, ErrorContainer, ErrorOptions, ErrorOverrides,
    ErrorParent, ErrorPlacement, EventSpec, OptionOverrides, Param, ParamKind, ParentOption,
    Patterns, RegexOverrides, TRIGGER_EVENTS, ValidationConfig, ValidationOptions,
};
pub use context::{FieldSource, ValidatorContext};
pub use engine::{Descriptive, Engine, EvaluationResult};
pub use error::{AttachError, ConfigError};
pub use hook::{CompletionHook, CycleReport};
pub use presentation::PresentationController;
pub use registry::{
    ValidatorDefinition, ValidatorFn, ValidatorRegistration, ValidatorRegistry,
    registered_validators,
};
pub use surface::{ErrorElement, PresentationSurface};
pub use verdict::{FieldState, Verdict, aggregate};

pub use inventory;
