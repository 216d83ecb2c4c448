//! Ties fields to their configuration and runs validation cycles.

use std::collections::HashMap;
use std::sync::Arc;

use formdom::element::collect_elements;
use formdom::{Document, Event, EventKind, Selector};

use crate::config::{ValidationConfig, ValidationOptions};
use crate::engine::Engine;
use crate::error::{AttachError, ConfigError};
use crate::hook::CycleReport;
use crate::presentation::PresentationController;
use crate::registry::ValidatorRegistry;
use crate::surface::PresentationSurface;
use crate::verdict::{FieldState, Verdict, aggregate};

/// One field bound to one resolved configuration.
#[derive(Debug, Clone)]
pub struct FieldBinding {
    field_id: String,
    config: ValidationConfig,
    engine: Engine,
    state: FieldState,
}

impl FieldBinding {
    /// Resolve `options` against `registry` and bind them to `field_id`.
    pub fn new(
        field_id: impl Into<String>,
        options: ValidationOptions,
        registry: Arc<ValidatorRegistry>,
    ) -> Result<Self, ConfigError> {
        let config = ValidationConfig::resolve(options, &registry)?;
        Ok(Self::with_config(field_id, config, Engine::new(registry)))
    }

    /// Bind an already resolved configuration.
    pub fn with_config(
        field_id: impl Into<String>,
        config: ValidationConfig,
        engine: Engine,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            config,
            engine,
            state: FieldState::Unvalidated,
        }
    }

    pub fn field_id(&self) -> &str {
        &self.field_id
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    /// Whether any trigger event survived the allow-list.
    pub fn is_listening(&self) -> bool {
        !self.config.triggers().is_empty()
    }

    /// Whether `event` should start a cycle for this field.
    pub fn accepts(&self, event: &Event) -> bool {
        event.target == self.field_id
            && self.config.triggers().contains(&event.kind)
            && !event.is_tab()
    }

    /// Run a cycle if `event` is one of this field's triggers.
    ///
    /// The value is read from the surface. Tab keystrokes are ignored.
    pub fn handle_event<S: PresentationSurface>(
        &mut self,
        event: &Event,
        surface: &mut S,
    ) -> Result<Option<Verdict>, ConfigError> {
        if !self.accepts(event) {
            log::trace!("[binding] {} ignores {} on {}", self.field_id, event.kind, event.target);
            return Ok(None);
        }
        let value = surface.field_value(&self.field_id).unwrap_or_default();
        self.notify_value_changed(&value, surface).map(Some)
    }

    /// Run one full validation cycle for `raw_value`.
    ///
    /// Evaluate, aggregate, present, call the completion hook. A configuration
    /// error aborts before the surface is touched.
    pub fn notify_value_changed<S: PresentationSurface>(
        &mut self,
        raw_value: &str,
        surface: &mut S,
    ) -> Result<Verdict, ConfigError> {
        let result = self
            .engine
            .evaluate(raw_value, &self.config, &*surface, &self.field_id)?;
        let verdict = aggregate(&result);
        log::debug!(
            "[binding] {} -> {:?} ({} validators, failed: {:?})",
            self.field_id,
            verdict,
            result.len(),
            result.failures().collect::<Vec<_>>()
        );

        PresentationController::new(&self.config).apply(surface, &self.field_id, verdict);

        if let Some(hook) = self.config.on_validation_complete() {
            hook.call(&CycleReport {
                element: &self.field_id,
                result: &result,
                verdict,
            });
        }

        self.state = verdict.into();
        Ok(verdict)
    }
}

/// Bindings for every field of a document that has been attached.
///
/// An element is bound at most once.
#[derive(Debug)]
pub struct FormBindings {
    registry: Arc<ValidatorRegistry>,
    bindings: HashMap<String, FieldBinding>,
}

impl FormBindings {
    pub fn new(registry: Arc<ValidatorRegistry>) -> Self {
        Self {
            registry,
            bindings: HashMap::new(),
        }
    }

    /// Bind every element matching `selector` that is not bound yet.
    ///
    /// Returns the ids of the newly bound elements in document order.
    pub fn attach(
        &mut self,
        document: &Document,
        selector: &str,
        options: ValidationOptions,
    ) -> Result<Vec<String>, AttachError> {
        let selector = Selector::parse(selector)?;
        let config = ValidationConfig::resolve(options, &self.registry)?;
        let engine = Engine::new(Arc::clone(&self.registry));

        if config.triggers().is_empty() {
            log::warn!("[binding] no usable trigger events for '{}'", selector);
        }

        let mut bound = Vec::new();
        for element in document.query_all(&selector) {
            if self.bindings.contains_key(&element.id) {
                continue;
            }
            let binding = FieldBinding::with_config(&element.id, config.clone(), engine.clone());
            self.bindings.insert(element.id.clone(), binding);
            bound.push(element.id.clone());
        }
        log::debug!("[binding] attached {:?} via '{}'", bound, selector);
        Ok(bound)
    }

    /// Route an event to the binding of its target.
    pub fn dispatch(
        &mut self,
        event: &Event,
        document: &mut Document,
    ) -> Result<Option<Verdict>, ConfigError> {
        match self.bindings.get_mut(&event.target) {
            Some(binding) => binding.handle_event(event, document),
            None => Ok(None),
        }
    }

    /// Run a cycle on every binding that listens for `kind`, in document order.
    ///
    /// Bound ids no longer present in the document are skipped.
    pub fn trigger_all(
        &mut self,
        kind: EventKind,
        document: &mut Document,
    ) -> Result<Vec<(String, Verdict)>, ConfigError> {
        let ids: Vec<String> = collect_elements(document.root())
            .into_iter()
            .filter(|el| self.bindings.contains_key(&el.id))
            .map(|el| el.id.clone())
            .collect();

        let mut verdicts = Vec::new();
        for id in ids {
            let Some(binding) = self.bindings.get_mut(&id) else {
                continue;
            };
            if let Some(verdict) = binding.handle_event(&Event::new(kind, id.as_str()), document)? {
                verdicts.push((id, verdict));
            }
        }
        Ok(verdicts)
    }

    pub fn get(&self, id: &str) -> Option<&FieldBinding> {
        self.bindings.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut FieldBinding> {
        self.bindings.get_mut(id)
    }

    pub fn is_bound(&self, id: &str) -> bool {
        self.bindings.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
