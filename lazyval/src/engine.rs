//! Runs the configured validators against a value.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::ValidationConfig;
use crate::context::{FieldSource, ValidatorContext};
use crate::error::ConfigError;
use crate::registry::{ValidatorDefinition, ValidatorRegistry};
use crate::validators::is_punctuation;

/// Informational metrics about a value. Never part of the verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Descriptive {
    /// Length in characters.
    pub length: usize,
    /// Contains a character outside `[A-Za-z]`.
    pub has_non_alpha: bool,
    /// Contains a character outside `[0-9]`.
    pub has_non_numeral: bool,
    /// Contains a character outside the punctuation set.
    pub has_non_punctuation: bool,
}

impl Descriptive {
    pub fn of(value: &str) -> Self {
        Self {
            length: value.chars().count(),
            has_non_alpha: value.chars().any(|c| !c.is_ascii_alphabetic()),
            has_non_numeral: value.chars().any(|c| !c.is_ascii_digit()),
            has_non_punctuation: value.chars().any(|c| !is_punctuation(c)),
        }
    }
}

/// Outcome of one evaluation: one entry per configured validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationResult {
    outcomes: BTreeMap<String, bool>,
    descriptive: Descriptive,
}

impl EvaluationResult {
    /// Outcome of the named validator, if it was configured.
    pub fn get(&self, validator: &str) -> Option<bool> {
        self.outcomes.get(validator).copied()
    }

    pub fn outcomes(&self) -> &BTreeMap<String, bool> {
        &self.outcomes
    }

    /// Names of the validators that returned false.
    pub fn failures(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|(_, passed)| !**passed)
            .map(|(name, _)| name.as_str())
    }

    pub fn descriptive(&self) -> &Descriptive {
        &self.descriptive
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Evaluates configured validators using a shared registry.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Arc<ValidatorRegistry>,
}

impl Engine {
    pub fn new(registry: Arc<ValidatorRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ValidatorRegistry {
        &self.registry
    }

    /// Run every validator configured in `config` against `value`.
    ///
    /// All names are looked up before any validator runs, so an unknown name
    /// fails the whole evaluation and no partial result is produced.
    pub fn evaluate(
        &self,
        value: &str,
        config: &ValidationConfig,
        fields: &dyn FieldSource,
        field_id: &str,
    ) -> Result<EvaluationResult, ConfigError> {
        let definitions = config
            .validators()
            .map(|(name, _)| self.registry.get(name))
            .collect::<Result<Vec<&ValidatorDefinition>, _>>()?;

        let cx = ValidatorContext::new(config, fields, field_id);
        let outcomes = definitions
            .into_iter()
            .map(|definition| {
                let passed = definition.check(value, &cx);
                log::trace!("[engine] {} {} -> {}", field_id, definition.name(), passed);
                (definition.name().to_string(), passed)
            })
            .collect();

        Ok(EvaluationResult {
            outcomes,
            descriptive: Descriptive::of(value),
        })
    }
}
