//! What a validator can see while it runs.

use crate::config::{Param, ValidationConfig};

/// Read-only access to the live values of form fields.
pub trait FieldSource {
    /// Current value of the field with the given id, `None` if there is no
    /// such field.
    fn field_value(&self, id: &str) -> Option<String>;

    /// Checked state of a checkbox or radio field. `false` for anything else.
    fn is_checked(&self, id: &str) -> bool;
}

/// Arguments passed to every validator besides the value itself.
#[derive(Clone, Copy)]
pub struct ValidatorContext<'a> {
    config: &'a ValidationConfig,
    fields: &'a dyn FieldSource,
    field_id: &'a str,
}

impl<'a> ValidatorContext<'a> {
    pub fn new(
        config: &'a ValidationConfig,
        fields: &'a dyn FieldSource,
        field_id: &'a str,
    ) -> Self {
        Self {
            config,
            fields,
            field_id,
        }
    }

    /// The full configuration of the field being validated.
    pub fn config(&self) -> &'a ValidationConfig {
        self.config
    }

    /// ID of the field being validated.
    pub fn field_id(&self) -> &'a str {
        self.field_id
    }

    pub fn param(&self, validator: &str) -> Option<&'a Param> {
        self.config.param(validator)
    }

    /// Integer parameter of a validator.
    pub fn count(&self, validator: &str) -> Option<usize> {
        self.param(validator)
            .and_then(Param::as_count)
            .map(|n| usize::try_from(n).unwrap_or(usize::MAX))
    }

    /// Current value of the field a cross-field validator points at.
    ///
    /// `None` when the validator has no field parameter or the field does not
    /// exist.
    pub fn other_field_value(&self, validator: &str) -> Option<String> {
        let id = self.param(validator)?.as_field()?;
        let value = self.fields.field_value(id);
        if value.is_none() {
            log::debug!("[engine] {}: field '{}' not found", validator, id);
        }
        value
    }

    /// Checked state of the field being validated.
    pub fn is_checked(&self) -> bool {
        self.fields.is_checked(self.field_id)
    }
}
