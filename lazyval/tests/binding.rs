use std::sync::{Arc, Mutex};

use formdom::{Document, DomError, Element, Event, EventKind, Key};
use lazyval::{
    AttachError, ConfigError, Engine, ErrorParent, FieldBinding, FieldState, FormBindings,
    ParamKind, ValidationConfig, ValidationOptions, ValidatorContext, ValidatorRegistration,
    ValidatorRegistry, Verdict,
};

fn even_length(value: &str, _cx: &ValidatorContext<'_>) -> bool {
    value.chars().count() % 2 == 0
}

lazyval::inventory::submit! {
    ValidatorRegistration::new("evenLength", ParamKind::Flag, even_length)
}

fn page() -> Document {
    Document::new(
        Element::form()
            .id("signup")
            .child(
                Element::div()
                    .id("group-user")
                    .class("control-group")
                    .child(Element::label("User").id("label-user"))
                    .child(Element::input().id("user").class("validate")),
            )
            .child(
                Element::div()
                    .id("group-password")
                    .class("control-group")
                    .child(Element::password().id("password").class("validate"))
                    .child(Element::password().id("confirm")),
            )
            .child(
                Element::div()
                    .id("group-terms")
                    .class("control-group")
                    .child(Element::checkbox().id("terms")),
            ),
    )
}

fn registry() -> Arc<ValidatorRegistry> {
    Arc::new(ValidatorRegistry::builtin())
}

fn required() -> ValidationOptions {
    ValidationOptions::new().validator("notBlank", true)
}

// ============================================================================
// FieldBinding
// ============================================================================

#[test]
fn test_initial_state_is_unvalidated() {
    let binding = FieldBinding::new("user", required(), registry()).unwrap();
    assert_eq!(binding.state(), FieldState::Unvalidated);
    assert_eq!(binding.field_id(), "user");
    assert!(binding.is_listening());
}

#[test]
fn test_blur_runs_a_cycle() {
    let mut doc = page();
    let mut binding = FieldBinding::new("user", required(), registry()).unwrap();

    let verdict = binding.handle_event(&Event::blur("user"), &mut doc).unwrap();
    assert_eq!(verdict, Some(Verdict::Invalid));
    assert_eq!(binding.state(), FieldState::Invalid);
    assert!(doc.contains("error-user"));

    doc.set_value("user", "ada").unwrap();
    let verdict = binding.handle_event(&Event::blur("user"), &mut doc).unwrap();
    assert_eq!(verdict, Some(Verdict::Valid));
    assert_eq!(binding.state(), FieldState::Valid);
    assert!(!doc.contains("error-user"));
}

#[test]
fn test_ignored_events_change_nothing() {
    let mut doc = page();
    let before = doc.root().clone();
    let mut binding = FieldBinding::new("user", required(), registry()).unwrap();

    let ignored = [
        Event::change("user"),
        Event::keyup("user", Key::Char('a')),
        Event::blur("password"),
    ];
    for event in &ignored {
        assert_eq!(binding.handle_event(event, &mut doc).unwrap(), None);
    }
    assert_eq!(doc.root(), &before);
    assert_eq!(binding.state(), FieldState::Unvalidated);
}

#[test]
fn test_tab_keystrokes_are_ignored() {
    let mut doc = page();
    let options = required().validate_on(["keyup"]);
    let mut binding = FieldBinding::new("user", options, registry()).unwrap();

    assert!(!binding.accepts(&Event::keyup("user", Key::Tab)));
    assert_eq!(
        binding
            .handle_event(&Event::keyup("user", Key::BackTab), &mut doc)
            .unwrap(),
        None
    );
    assert_eq!(
        binding
            .handle_event(&Event::keyup("user", Key::Char('x')), &mut doc)
            .unwrap(),
        Some(Verdict::Invalid)
    );
}

#[test]
fn test_no_usable_triggers() {
    let mut doc = page();
    let options = required().validate_on(["submit", "scroll"]);
    let mut binding = FieldBinding::new("user", options, registry()).unwrap();

    assert!(!binding.is_listening());
    assert!(binding.config().triggers().is_empty());
    assert_eq!(binding.handle_event(&Event::blur("user"), &mut doc).unwrap(), None);
    assert_eq!(binding.state(), FieldState::Unvalidated);
}

#[test]
fn test_notify_uses_given_value() {
    let mut doc = page();
    doc.set_value("user", "ada").unwrap();
    let mut binding = FieldBinding::new("user", required(), registry()).unwrap();

    assert_eq!(binding.notify_value_changed("", &mut doc).unwrap(), Verdict::Invalid);
    assert_eq!(binding.notify_value_changed("   ", &mut doc).unwrap(), Verdict::Valid);
}

#[test]
fn test_cross_field_reads_live_document() {
    let mut doc = page();
    let options = ValidationOptions::new().validator("matchesField", "password");
    let mut binding = FieldBinding::new("confirm", options, registry()).unwrap();

    doc.set_value("password", "hunter2").unwrap();
    assert_eq!(
        binding.notify_value_changed("hunter2", &mut doc).unwrap(),
        Verdict::Valid
    );

    doc.set_value("password", "hunter3").unwrap();
    assert_eq!(
        binding.notify_value_changed("hunter2", &mut doc).unwrap(),
        Verdict::Invalid
    );
}

#[test]
fn test_checked_on_click() {
    let mut doc = page();
    let options = ValidationOptions::new()
        .validate_on(["click"])
        .validator("checked", true);
    let mut binding = FieldBinding::new("terms", options, registry()).unwrap();
    let click = Event::new(EventKind::Click, "terms");

    assert_eq!(
        binding.handle_event(&click, &mut doc).unwrap(),
        Some(Verdict::Invalid)
    );
    doc.set_checked("terms", true).unwrap();
    assert_eq!(
        binding.handle_event(&click, &mut doc).unwrap(),
        Some(Verdict::Valid)
    );
}

// ============================================================================
// Completion hook
// ============================================================================

#[test]
fn test_hook_sees_every_cycle() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let options = required()
        .validator("minimumLength", 3u64)
        .on_validation_complete(move |report| {
            let failures: Vec<String> = report.result.failures().map(str::to_string).collect();
            sink.lock().unwrap().push((
                report.element.to_string(),
                report.verdict,
                failures,
                report.descriptive().length,
            ));
        });

    let mut doc = page();
    let mut binding = FieldBinding::new("user", options, registry()).unwrap();
    binding.notify_value_changed("ab", &mut doc).unwrap();
    binding.notify_value_changed("abcd", &mut doc).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(
        seen[0],
        (
            "user".to_string(),
            Verdict::Invalid,
            vec!["minimumLength".to_string()],
            2
        )
    );
    assert_eq!(seen[1], ("user".to_string(), Verdict::Valid, vec![], 4));
}

#[test]
fn test_hook_runs_after_presentation() {
    let classed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&classed);
    let options = required().on_validation_complete(move |report| {
        *sink.lock().unwrap() = Some(report.is_invalid());
    });

    let mut doc = page();
    let mut binding = FieldBinding::new("user", options, registry()).unwrap();
    binding.notify_value_changed("", &mut doc).unwrap();

    assert_eq!(*classed.lock().unwrap(), Some(true));
    assert!(doc.get("user").unwrap().has_class("has-error"));
}

#[test]
fn test_config_error_aborts_cycle() {
    let calls = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&calls);
    let options = required().on_validation_complete(move |_| {
        *sink.lock().unwrap() += 1;
    });
    let config = ValidationConfig::resolve(options, &ValidatorRegistry::builtin()).unwrap();
    let engine = Engine::new(Arc::new(ValidatorRegistry::empty()));
    let mut binding = FieldBinding::with_config("user", config, engine);

    let mut doc = page();
    let before = doc.root().clone();
    let err = binding.notify_value_changed("", &mut doc).unwrap_err();

    assert!(matches!(err, ConfigError::UnknownValidator(ref name) if name == "notBlank"));
    assert_eq!(doc.root(), &before);
    assert_eq!(*calls.lock().unwrap(), 0);
    assert_eq!(binding.state(), FieldState::Unvalidated);
}

#[test]
fn test_combinator_container_rejected_at_bind() {
    let options = required()
        .error_parent(ErrorParent::Ancestor("form .control-group".to_string()));
    let err = FieldBinding::new("user", options.clone(), registry()).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidSelector { source: DomError::InvalidSelector { .. }, .. }
    ));

    let doc = page();
    let mut form = FormBindings::new(registry());
    let err = form.attach(&doc, "#user", options).unwrap_err();
    assert!(matches!(
        err,
        AttachError::Config(ConfigError::InvalidSelector { .. })
    ));
    assert!(form.is_empty());
}

#[test]
fn test_unknown_validator_rejected_at_bind() {
    let err = FieldBinding::new("user", required().validator("isPrime", true), registry())
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownValidator(_)));
}

// ============================================================================
// Registered validators
// ============================================================================

#[test]
fn test_registered_validator_is_available() {
    let registry = registry();
    assert!(registry.contains("evenLength"));
    assert!(registry.contains("notBlank"));

    let mut doc = page();
    let options = ValidationOptions::new().validator("evenLength", true);
    let mut binding = FieldBinding::new("user", options, registry).unwrap();
    assert_eq!(binding.notify_value_changed("abc", &mut doc).unwrap(), Verdict::Invalid);
    assert_eq!(binding.notify_value_changed("abcd", &mut doc).unwrap(), Verdict::Valid);
}

// ============================================================================
// FormBindings
// ============================================================================

#[test]
fn test_attach_binds_matching_elements() {
    let doc = page();
    let mut form = FormBindings::new(registry());

    let bound = form.attach(&doc, ".validate", required()).unwrap();
    assert_eq!(bound, vec!["user".to_string(), "password".to_string()]);
    assert_eq!(form.len(), 2);
    assert!(form.is_bound("user"));
    assert!(!form.is_bound("confirm"));
}

#[test]
fn test_reattach_is_a_no_op() {
    let doc = page();
    let mut form = FormBindings::new(registry());
    form.attach(&doc, ".validate", required()).unwrap();

    let options = ValidationOptions::new().valid_class("ok");
    let bound = form.attach(&doc, "input", options).unwrap();
    assert_eq!(bound, vec!["confirm".to_string(), "terms".to_string()]);
    assert_eq!(form.len(), 4);
    assert_eq!(form.get("user").unwrap().config().valid_class(), None);
    assert_eq!(form.get("confirm").unwrap().config().valid_class(), Some("ok"));
}

#[test]
fn test_dispatch_routes_by_target() {
    let mut doc = page();
    let mut form = FormBindings::new(registry());
    form.attach(&doc, "#user", required()).unwrap();

    assert_eq!(
        form.dispatch(&Event::blur("user"), &mut doc).unwrap(),
        Some(Verdict::Invalid)
    );
    assert_eq!(form.dispatch(&Event::blur("confirm"), &mut doc).unwrap(), None);
    assert_eq!(form.get("user").unwrap().state(), FieldState::Invalid);
}

#[test]
fn test_trigger_all() {
    let mut doc = page();
    doc.set_value("password", "secret").unwrap();
    let mut form = FormBindings::new(registry());
    form.attach(&doc, ".validate", required()).unwrap();
    form.attach(&doc, "#terms", required().validate_on(["change"]))
        .unwrap();

    let verdicts = form.trigger_all(EventKind::Blur, &mut doc).unwrap();
    assert_eq!(
        verdicts,
        vec![
            ("user".to_string(), Verdict::Invalid),
            ("password".to_string(), Verdict::Valid),
        ]
    );
    assert_eq!(form.get("terms").unwrap().state(), FieldState::Unvalidated);
}

#[test]
fn test_trigger_all_follows_document_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let options = || {
        let sink = Arc::clone(&order);
        required().on_validation_complete(move |report| {
            sink.lock().unwrap().push(report.element.to_string());
        })
    };

    let mut doc = page();
    let mut form = FormBindings::new(registry());
    // bound in reverse document order
    form.attach(&doc, "#terms", options()).unwrap();
    form.attach(&doc, "#confirm", options()).unwrap();
    form.attach(&doc, "#password", options()).unwrap();
    form.attach(&doc, "#user", options()).unwrap();

    for _ in 0..3 {
        order.lock().unwrap().clear();
        let verdicts = form.trigger_all(EventKind::Blur, &mut doc).unwrap();
        let ids: Vec<&str> = verdicts.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["user", "password", "confirm", "terms"]);
        assert_eq!(*order.lock().unwrap(), vec!["user", "password", "confirm", "terms"]);
    }
}

#[test]
fn test_trigger_all_skips_removed_fields() {
    let mut doc = page();
    let mut form = FormBindings::new(registry());
    form.attach(&doc, ".validate", required()).unwrap();
    doc.remove("group-password").unwrap();

    let verdicts = form.trigger_all(EventKind::Blur, &mut doc).unwrap();
    assert_eq!(verdicts, vec![("user".to_string(), Verdict::Invalid)]);
}

#[test]
fn test_attach_errors() {
    let doc = page();
    let mut form = FormBindings::new(registry());

    let err = form.attach(&doc, "input..x", required()).unwrap_err();
    assert!(matches!(err, AttachError::Dom(DomError::InvalidSelector { .. })));

    let err = form
        .attach(&doc, "input", required().validator("isPrime", true))
        .unwrap_err();
    assert!(matches!(
        err,
        AttachError::Config(ConfigError::UnknownValidator(_))
    ));
    assert!(form.is_empty());
}

#[test]
fn test_get_mut_allows_direct_cycles() {
    let mut doc = page();
    let mut form = FormBindings::new(registry());
    form.attach(&doc, "#user", required()).unwrap();

    let binding = form.get_mut("user").unwrap();
    assert_eq!(binding.notify_value_changed("x", &mut doc).unwrap(), Verdict::Valid);
    assert_eq!(form.get("user").unwrap().state(), FieldState::Valid);
}
