//! Named validator catalog.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::ParamKind;
use crate::context::ValidatorContext;
use crate::error::ConfigError;
use crate::validators::BUILTINS;

/// Type alias for validator predicates.
pub type ValidatorFn = Arc<dyn Fn(&str, &ValidatorContext<'_>) -> bool + Send + Sync>;

/// A named pure predicate over a field value.
#[derive(Clone)]
pub struct ValidatorDefinition {
    name: String,
    param: ParamKind,
    check: ValidatorFn,
}

impl ValidatorDefinition {
    pub fn new<F>(name: impl Into<String>, param: ParamKind, check: F) -> Self
    where
        F: Fn(&str, &ValidatorContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            param,
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter shape this validator accepts.
    pub fn param_kind(&self) -> ParamKind {
        self.param
    }

    /// Run the predicate.
    pub fn check(&self, value: &str, cx: &ValidatorContext<'_>) -> bool {
        (self.check)(value, cx)
    }
}

impl fmt::Debug for ValidatorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorDefinition")
            .field("name", &self.name)
            .field("param", &self.param)
            .finish_non_exhaustive()
    }
}

/// Validator registration entry for inventory.
///
/// Crates linked into the program can contribute validators with
/// `inventory::submit!`; they are picked up by [`ValidatorRegistry::builtin`].
pub struct ValidatorRegistration {
    /// Validator name.
    pub name: &'static str,
    /// Accepted parameter shape.
    pub param: ParamKind,
    /// The predicate.
    pub check: fn(&str, &ValidatorContext<'_>) -> bool,
}

impl ValidatorRegistration {
    /// Create a new validator registration.
    pub const fn new(
        name: &'static str,
        param: ParamKind,
        check: fn(&str, &ValidatorContext<'_>) -> bool,
    ) -> Self {
        Self { name, param, check }
    }
}

inventory::collect!(ValidatorRegistration);

/// Get all validators registered through inventory.
pub fn registered_validators() -> impl Iterator<Item = &'static ValidatorRegistration> {
    inventory::iter::<ValidatorRegistration>()
}

impl From<&ValidatorRegistration> for ValidatorDefinition {
    fn from(registration: &ValidatorRegistration) -> Self {
        let check = registration.check;
        Self::new(registration.name, registration.param, check)
    }
}

/// Mapping from validator name to definition.
///
/// Built once and shared read-only by every engine that uses it.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, ValidatorDefinition>,
}

impl ValidatorRegistry {
    /// A registry with no validators.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock validators plus any registered through inventory.
    ///
    /// Inventory registrations with a stock name replace the stock validator.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for registration in BUILTINS.iter().chain(registered_validators()) {
            registry.insert(registration.into());
        }
        registry
    }

    /// Add or replace a validator.
    pub fn with(mut self, definition: ValidatorDefinition) -> Self {
        self.insert(definition);
        self
    }

    /// Add or replace a validator, returning the one it replaced.
    pub fn insert(&mut self, definition: ValidatorDefinition) -> Option<ValidatorDefinition> {
        self.validators
            .insert(definition.name().to_string(), definition)
    }

    pub fn get(&self, name: &str) -> Result<&ValidatorDefinition, ConfigError> {
        self.validators
            .get(name)
            .ok_or_else(|| ConfigError::UnknownValidator(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.validators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("validators", &self.names())
            .finish()
    }
}
