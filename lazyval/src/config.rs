//! Field configuration: defaults, overrides and the resolved per-field config.

use std::collections::BTreeMap;
use std::fmt;

use formdom::{EventKind, Selector};
use regex::Regex;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::hook::{CompletionHook, CycleReport};
use crate::registry::ValidatorRegistry;
use crate::validators;

/// Events a field binding may be triggered by. Any other name is ignored.
pub const TRIGGER_EVENTS: [EventKind; 19] = EventKind::ALL;

/// Parameter given to a configured validator.
///
/// `Flag(false)` switches the validator off.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Param {
    Flag(bool),
    Count(u64),
    Field(String),
}

impl Param {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Param::Flag(false))
    }

    pub fn as_count(&self) -> Option<u64> {
        match self {
            Param::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&str> {
        match self {
            Param::Field(id) => Some(id),
            _ => None,
        }
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Flag(value)
    }
}

impl From<u64> for Param {
    fn from(value: u64) -> Self {
        Param::Count(value)
    }
}

impl From<usize> for Param {
    fn from(value: usize) -> Self {
        Param::Count(value as u64)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Field(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Field(value)
    }
}

/// The parameter shape a validator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Enabled with `true`, no parameter.
    Flag,
    /// A non-negative integer threshold.
    Count,
    /// The id of another field.
    Field,
}

impl ParamKind {
    pub fn accepts(self, param: &Param) -> bool {
        match (self, param) {
            (ParamKind::Flag, Param::Flag(true)) => true,
            (ParamKind::Count, Param::Count(_)) => true,
            (ParamKind::Field, Param::Field(id)) => !id.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Flag => f.write_str("`true`"),
            ParamKind::Count => f.write_str("a non-negative integer"),
            ParamKind::Field => f.write_str("a field id"),
        }
    }
}

/// Where the error element for a field lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorParent {
    /// Inside the field's own parent element, with inline layout styles.
    Field,
    /// Inside the nearest ancestor matching the selector.
    Ancestor(String),
}

/// Resolved lookup of a field's error container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorContainer {
    /// The field's own parent element.
    Parent,
    /// The field itself or its nearest ancestor matching the selector.
    Closest(Selector),
}

impl ErrorContainer {
    fn resolve(parent: &ErrorParent) -> Result<Self, ConfigError> {
        match parent {
            ErrorParent::Field => Ok(ErrorContainer::Parent),
            ErrorParent::Ancestor(selector) => Selector::parse(selector)
                .map(ErrorContainer::Closest)
                .map_err(|source| ConfigError::InvalidSelector {
                    selector: selector.clone(),
                    source,
                }),
        }
    }

    /// Whether labels in the container are classed along with the field.
    pub fn classes_labels(&self) -> bool {
        matches!(self, ErrorContainer::Closest(_))
    }
}

/// Position of the error element inside its container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPlacement {
    #[default]
    Prepend,
    Append,
}

/// How cross-field validators interpret the other field's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossFieldMatch {
    /// The other value is matched as literal text.
    #[default]
    Literal,
    /// The other value is compiled as a regular expression.
    Pattern,
}

/// Error-message presentation options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorOptions {
    pub show: bool,
    pub placement: ErrorPlacement,
    pub text: String,
    pub tag: String,
    pub parent: ErrorParent,
    pub class: Option<String>,
}

impl Default for ErrorOptions {
    fn default() -> Self {
        Self {
            show: true,
            placement: ErrorPlacement::Prepend,
            text: "Error".to_string(),
            tag: "div".to_string(),
            parent: ErrorParent::Ancestor(".control-group".to_string()),
            class: None,
        }
    }
}

/// Configurable character-class patterns (regular expression sources).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClasses {
    pub allowed_alpha: String,
    pub allowed_numerals: String,
    pub allowed_alpha_numeric: String,
    pub only_alpha: String,
}

impl Default for CharClasses {
    fn default() -> Self {
        Self {
            allowed_alpha: "[a-zA-Z]".to_string(),
            allowed_numerals: "[0-9]".to_string(),
            allowed_alpha_numeric: "[a-zA-Z0-9]".to_string(),
            only_alpha: "^[a-zA-Z]+$".to_string(),
        }
    }
}

/// Full option set for one field, before resolution.
///
/// `Default` gives the stock behaviour; apply user settings with the builder
/// methods or with [`merge`](Self::merge).
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Event names that trigger a validation cycle.
    pub validate_on: Vec<String>,
    pub valid_class: Option<String>,
    pub invalid_class: Option<String>,
    pub error: ErrorOptions,
    pub validators: BTreeMap<String, Param>,
    pub regex: CharClasses,
    pub cross_field_match: CrossFieldMatch,
    pub on_validation_complete: Option<CompletionHook>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            validate_on: vec!["blur".to_string()],
            valid_class: None,
            invalid_class: Some("has-error".to_string()),
            error: ErrorOptions::default(),
            validators: BTreeMap::new(),
            regex: CharClasses::default(),
            cross_field_match: CrossFieldMatch::default(),
            on_validation_complete: None,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the trigger events.
    pub fn validate_on<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validate_on = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn valid_class(mut self, class: impl Into<String>) -> Self {
        self.valid_class = non_empty(class.into());
        self
    }

    pub fn without_valid_class(mut self) -> Self {
        self.valid_class = None;
        self
    }

    pub fn invalid_class(mut self, class: impl Into<String>) -> Self {
        self.invalid_class = non_empty(class.into());
        self
    }

    pub fn without_invalid_class(mut self) -> Self {
        self.invalid_class = None;
        self
    }

    /// Enable a validator with its parameter.
    pub fn validator(mut self, name: impl Into<String>, param: impl Into<Param>) -> Self {
        self.validators.insert(name.into(), param.into());
        self
    }

    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.error.text = text.into();
        self
    }

    pub fn error_tag(mut self, tag: impl Into<String>) -> Self {
        self.error.tag = tag.into();
        self
    }

    pub fn error_class(mut self, class: impl Into<String>) -> Self {
        self.error.class = non_empty(class.into());
        self
    }

    pub fn error_parent(mut self, parent: ErrorParent) -> Self {
        self.error.parent = parent;
        self
    }

    pub fn error_placement(mut self, placement: ErrorPlacement) -> Self {
        self.error.placement = placement;
        self
    }

    /// Never insert an error element; classes are still toggled.
    pub fn hide_errors(mut self) -> Self {
        self.error.show = false;
        self
    }

    pub fn cross_field_match(mut self, mode: CrossFieldMatch) -> Self {
        self.cross_field_match = mode;
        self
    }

    /// Callback run after every validation cycle.
    pub fn on_validation_complete<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CycleReport<'_>) + Send + Sync + 'static,
    {
        self.on_validation_complete = Some(CompletionHook::new(hook));
        self
    }

    /// Deep-merge user overrides onto these options.
    pub fn merge(mut self, overrides: OptionOverrides) -> Self {
        if let Some(events) = overrides.validate_on_event {
            self.validate_on = events.into_names();
        }
        if let Some(class) = overrides.valid_class {
            self.valid_class = class.into_class();
        }
        if let Some(class) = overrides.invalid_class {
            self.invalid_class = class.into_class();
        }
        if let Some(error) = overrides.error {
            self.error = error.merge_into(self.error);
        }
        self.validators.extend(overrides.validators);
        if let Some(regex) = overrides.regex {
            self.regex = regex.merge_into(self.regex);
        }
        if let Some(mode) = overrides.cross_field_match {
            self.cross_field_match = mode;
        }
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// User-supplied option overrides, using the plugin's option names.
///
/// Every field is optional; missing fields keep the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionOverrides {
    pub validate_on_event: Option<EventSpec>,
    pub valid_class: Option<ClassOption>,
    pub invalid_class: Option<ClassOption>,
    pub error: Option<ErrorOverrides>,
    pub validators: BTreeMap<String, Param>,
    pub regex: Option<RegexOverrides>,
    pub cross_field_match: Option<CrossFieldMatch>,
}

/// One event name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EventSpec {
    One(String),
    Many(Vec<String>),
}

impl EventSpec {
    fn into_names(self) -> Vec<String> {
        match self {
            EventSpec::One(name) => name.split_whitespace().map(str::to_string).collect(),
            EventSpec::Many(names) => names,
        }
    }
}

/// A class name, or `false` to disable it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClassOption {
    Toggle(bool),
    Name(String),
}

impl ClassOption {
    fn into_class(self) -> Option<String> {
        match self {
            ClassOption::Toggle(_) => None,
            ClassOption::Name(name) => non_empty(name),
        }
    }
}

/// An ancestor selector, or `"self"` / `false` for the field's own parent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ParentOption {
    Toggle(bool),
    Selector(String),
}

impl From<ParentOption> for ErrorParent {
    fn from(option: ParentOption) -> Self {
        match option {
            ParentOption::Selector(s) if !s.trim().is_empty() && s.trim() != "self" => {
                ErrorParent::Ancestor(s.trim().to_string())
            }
            _ => ErrorParent::Field,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorOverrides {
    pub show: Option<bool>,
    pub prepend: Option<bool>,
    pub append: Option<bool>,
    pub text: Option<String>,
    pub tag: Option<String>,
    pub parent: Option<ParentOption>,
    pub class: Option<ClassOption>,
}

impl ErrorOverrides {
    fn merge_into(self, mut base: ErrorOptions) -> ErrorOptions {
        if let Some(show) = self.show {
            base.show = show;
        }
        // prepend wins when both are set
        base.placement = match (self.prepend, self.append) {
            (Some(true), _) => ErrorPlacement::Prepend,
            (_, Some(true)) => ErrorPlacement::Append,
            (Some(false), _) => ErrorPlacement::Append,
            (None, Some(false)) => ErrorPlacement::Prepend,
            (None, None) => base.placement,
        };
        if let Some(text) = self.text {
            base.text = text;
        }
        if let Some(tag) = self.tag {
            base.tag = tag;
        }
        if let Some(parent) = self.parent {
            base.parent = parent.into();
        }
        if let Some(class) = self.class {
            base.class = class.into_class();
        }
        base
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegexOverrides {
    pub allowed_alpha: Option<String>,
    pub allowed_numerals: Option<String>,
    pub allowed_alpha_numeric: Option<String>,
    pub only_alpha: Option<String>,
}

impl RegexOverrides {
    fn merge_into(self, base: CharClasses) -> CharClasses {
        CharClasses {
            allowed_alpha: self.allowed_alpha.unwrap_or(base.allowed_alpha),
            allowed_numerals: self.allowed_numerals.unwrap_or(base.allowed_numerals),
            allowed_alpha_numeric: self
                .allowed_alpha_numeric
                .unwrap_or(base.allowed_alpha_numeric),
            only_alpha: self.only_alpha.unwrap_or(base.only_alpha),
        }
    }
}

/// Compiled character-class patterns used by the class-based validators.
#[derive(Debug, Clone)]
pub struct Patterns {
    /// A single allowed alpha character.
    pub alpha: Regex,
    /// A single allowed numeral.
    pub numerals: Regex,
    /// The whole value drawn from the allowed alphanumeric class.
    pub only_alpha_numeric: Regex,
    pub only_alpha: Regex,
    /// A run of at least `minAlpha` alpha characters, when configured.
    pub alpha_run: Option<Regex>,
    /// A run of at least `minNumerals` numerals, when configured.
    pub numeral_run: Option<Regex>,
}

impl Patterns {
    fn compile(
        classes: &CharClasses,
        validators: &BTreeMap<String, Param>,
    ) -> Result<Self, ConfigError> {
        let run = |validator: &str, option: &str, class: &str| {
            validators
                .get(validator)
                .and_then(Param::as_count)
                .map(|n| compile(option, &format!("(?:{class}){{{n},}}")))
                .transpose()
        };

        Ok(Self {
            alpha: compile("allowedAlpha", &classes.allowed_alpha)?,
            numerals: compile("allowedNumerals", &classes.allowed_numerals)?,
            only_alpha_numeric: compile(
                "allowedAlphaNumeric",
                &format!("^(?:{})+$", classes.allowed_alpha_numeric),
            )?,
            only_alpha: compile("onlyAlpha", &classes.only_alpha)?,
            alpha_run: run(validators::MIN_ALPHA, "allowedAlpha", &classes.allowed_alpha)?,
            numeral_run: run(
                validators::MIN_NUMERALS,
                "allowedNumerals",
                &classes.allowed_numerals,
            )?,
        })
    }
}

fn compile(name: &str, source: &str) -> Result<Regex, ConfigError> {
    Regex::new(source).map_err(|source| ConfigError::InvalidPattern {
        name: name.to_string(),
        source,
    })
}

/// The resolved, immutable configuration of one field binding.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    triggers: Vec<EventKind>,
    valid_class: Option<String>,
    invalid_class: Option<String>,
    error: ErrorOptions,
    container: ErrorContainer,
    validators: BTreeMap<String, Param>,
    patterns: Patterns,
    cross_field_match: CrossFieldMatch,
    on_validation_complete: Option<CompletionHook>,
}

impl ValidationConfig {
    /// Check options against the registry and compile them.
    ///
    /// Fails on unknown validator names, mis-shaped parameters, patterns that
    /// do not compile, unsupported container selectors and error tags without
    /// letters.
    pub fn resolve(
        options: ValidationOptions,
        registry: &ValidatorRegistry,
    ) -> Result<Self, ConfigError> {
        let validators: BTreeMap<String, Param> = options
            .validators
            .into_iter()
            .filter(|(_, param)| param.is_enabled())
            .collect();

        for (name, param) in &validators {
            let definition = registry.get(name)?;
            if !definition.param_kind().accepts(param) {
                return Err(ConfigError::InvalidParameter {
                    validator: name.clone(),
                    expected: definition.param_kind(),
                });
            }
        }

        let patterns = Patterns::compile(&options.regex, &validators)?;

        let mut error = options.error;
        error.tag = sanitize_tag(&error.tag)?;
        let container = ErrorContainer::resolve(&error.parent)?;

        Ok(Self {
            triggers: resolve_triggers(&options.validate_on),
            valid_class: options.valid_class,
            invalid_class: options.invalid_class,
            error,
            container,
            validators,
            patterns,
            cross_field_match: options.cross_field_match,
            on_validation_complete: options.on_validation_complete,
        })
    }

    /// Allowed trigger events, in configuration order.
    pub fn triggers(&self) -> &[EventKind] {
        &self.triggers
    }

    pub fn valid_class(&self) -> Option<&str> {
        self.valid_class.as_deref()
    }

    pub fn invalid_class(&self) -> Option<&str> {
        self.invalid_class.as_deref()
    }

    pub fn error(&self) -> &ErrorOptions {
        &self.error
    }

    pub fn container(&self) -> &ErrorContainer {
        &self.container
    }

    /// Enabled validators and their parameters, ordered by name.
    pub fn validators(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.validators.iter().map(|(name, param)| (name.as_str(), param))
    }

    pub fn param(&self, validator: &str) -> Option<&Param> {
        self.validators.get(validator)
    }

    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    pub fn cross_field_match(&self) -> CrossFieldMatch {
        self.cross_field_match
    }

    pub fn on_validation_complete(&self) -> Option<&CompletionHook> {
        self.on_validation_complete.as_ref()
    }
}

fn resolve_triggers(names: &[String]) -> Vec<EventKind> {
    let mut triggers = Vec::new();
    for name in names {
        match name.parse::<EventKind>() {
            Ok(kind) if TRIGGER_EVENTS.contains(&kind) => {
                if !triggers.contains(&kind) {
                    triggers.push(kind);
                }
            }
            _ => log::warn!("[config] ignoring trigger event '{}'", name),
        }
    }
    triggers
}

/// Keep ASCII letters only, lower-cased.
fn sanitize_tag(tag: &str) -> Result<String, ConfigError> {
    let clean: String = tag
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if clean.is_empty() {
        return Err(ConfigError::InvalidErrorTag(tag.to_string()));
    }
    Ok(clean)
}
