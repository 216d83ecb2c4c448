use std::sync::Arc;

use formdom::{Document, Element};
use lazyval::{
    ConfigError, Descriptive, Engine, ParamKind, ValidationConfig, ValidationOptions,
    ValidatorDefinition, ValidatorRegistry, Verdict, aggregate,
};

fn doc() -> Document {
    Document::new(
        Element::form()
            .id("form")
            .child(Element::input().id("name"))
            .child(Element::password().id("password").value("secret")),
    )
}

fn registry() -> Arc<ValidatorRegistry> {
    Arc::new(ValidatorRegistry::builtin())
}

fn resolve(options: ValidationOptions) -> ValidationConfig {
    ValidationConfig::resolve(options, &registry()).unwrap()
}

const SAMPLE_VALUES: [&str; 8] = [
    "", "a", "ab", "abc", "user@example.com", "aaaa", "a--b", "12345",
];

// ============================================================================
// Aggregation
// ============================================================================

#[test]
fn test_no_validators_is_always_valid() {
    let engine = Engine::new(registry());
    let config = resolve(ValidationOptions::new());
    let doc = doc();
    for value in SAMPLE_VALUES {
        let result = engine.evaluate(value, &config, &doc, "name").unwrap();
        assert!(result.is_empty());
        assert_eq!(aggregate(&result), Verdict::Valid, "{value:?}");
    }
}

#[test]
fn test_verdict_pair_is_always_a_negation() {
    let engine = Engine::new(registry());
    let config = resolve(
        ValidationOptions::new()
            .validator("notBlank", true)
            .validator("minimumLength", 3u64)
            .validator("maxCharacterRepeats", true),
    );
    let doc = doc();
    for value in SAMPLE_VALUES {
        let verdict = aggregate(&engine.evaluate(value, &config, &doc, "name").unwrap());
        assert_ne!(verdict.is_valid(), verdict.is_invalid(), "{value:?}");
    }
}

#[test]
fn test_any_failure_makes_invalid() {
    let engine = Engine::new(registry());
    let config = resolve(
        ValidationOptions::new()
            .validator("notBlank", true)
            .validator("minimumLength", 3u64),
    );
    let doc = doc();

    let result = engine.evaluate("ab", &config, &doc, "name").unwrap();
    assert_eq!(result.get("notBlank"), Some(true));
    assert_eq!(result.get("minimumLength"), Some(false));
    assert_eq!(result.failures().collect::<Vec<_>>(), vec!["minimumLength"]);
    assert_eq!(aggregate(&result), Verdict::Invalid);

    let result = engine.evaluate("abc", &config, &doc, "name").unwrap();
    assert_eq!(result.failures().count(), 0);
    assert_eq!(aggregate(&result), Verdict::Valid);
}

#[test]
fn test_result_has_entry_per_configured_validator() {
    let engine = Engine::new(registry());
    let config = resolve(
        ValidationOptions::new()
            .validator("notBlank", true)
            .validator("email", true)
            .validator("matchesField", "password")
            .validator("noSpaces", false),
    );
    let result = engine.evaluate("x", &config, &doc(), "name").unwrap();
    let names: Vec<&str> = result.outcomes().keys().map(String::as_str).collect();
    assert_eq!(names, vec!["email", "matchesField", "notBlank"]);
}

#[test]
fn test_evaluation_is_repeatable() {
    let engine = Engine::new(registry());
    let config = resolve(
        ValidationOptions::new()
            .validator("email", true)
            .validator("matchesField", "password"),
    );
    let doc = doc();
    let first = engine.evaluate("secret", &config, &doc, "name").unwrap();
    let second = engine.evaluate("secret", &config, &doc, "name").unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Descriptive metrics
// ============================================================================

#[test]
fn test_descriptive_metrics() {
    assert_eq!(
        Descriptive::of("abc"),
        Descriptive {
            length: 3,
            has_non_alpha: false,
            has_non_numeral: true,
            has_non_punctuation: true,
        }
    );
    assert_eq!(
        Descriptive::of("123"),
        Descriptive {
            length: 3,
            has_non_alpha: true,
            has_non_numeral: false,
            has_non_punctuation: true,
        }
    );
    assert!(!Descriptive::of("!?-").has_non_punctuation);
    assert_eq!(Descriptive::of(""), Descriptive::default());
    assert_eq!(Descriptive::of("äö").length, 2);
}

#[test]
fn test_descriptive_does_not_affect_verdict() {
    let engine = Engine::new(registry());
    let config = resolve(ValidationOptions::new());
    let result = engine.evaluate("a b!", &config, &doc(), "name").unwrap();
    assert!(result.descriptive().has_non_alpha);
    assert_eq!(aggregate(&result), Verdict::Valid);
}

// ============================================================================
// Registry
// ============================================================================

#[test]
fn test_unknown_validator_fails_resolution() {
    let err = ValidationConfig::resolve(
        ValidationOptions::new().validator("isPrime", true),
        &registry(),
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownValidator(name) if name == "isPrime"));
}

#[test]
fn test_unknown_validator_fails_evaluation() {
    let config = resolve(
        ValidationOptions::new()
            .validator("notBlank", true)
            .validator("email", true),
    );
    let engine = Engine::new(Arc::new(
        ValidatorRegistry::empty().with(ValidatorDefinition::new(
            "notBlank",
            ParamKind::Flag,
            |value, _| !value.is_empty(),
        )),
    ));
    let err = engine.evaluate("x", &config, &doc(), "name").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownValidator(name) if name == "email"));
}

#[test]
fn test_registry_override_as_test_double() {
    let registry = Arc::new(ValidatorRegistry::builtin().with(ValidatorDefinition::new(
        "notBlank",
        ParamKind::Flag,
        |_, _| false,
    )));
    let config =
        ValidationConfig::resolve(ValidationOptions::new().validator("notBlank", true), &registry)
            .unwrap();
    let result = Engine::new(registry)
        .evaluate("filled", &config, &doc(), "name")
        .unwrap();
    assert_eq!(aggregate(&result), Verdict::Invalid);
}

#[test]
fn test_closure_validator_reads_context() {
    let registry = Arc::new(ValidatorRegistry::builtin().with(ValidatorDefinition::new(
        "differsFromPassword",
        ParamKind::Flag,
        |value, cx| cx.field_id() == "name" && value != "secret",
    )));
    let config = ValidationConfig::resolve(
        ValidationOptions::new().validator("differsFromPassword", true),
        &registry,
    )
    .unwrap();
    let engine = Engine::new(registry);
    let doc = doc();
    assert_eq!(
        engine.evaluate("secret", &config, &doc, "name").unwrap().get("differsFromPassword"),
        Some(false)
    );
    assert_eq!(
        engine.evaluate("other", &config, &doc, "name").unwrap().get("differsFromPassword"),
        Some(true)
    );
}

#[test]
fn test_registry_names_sorted() {
    let registry = ValidatorRegistry::builtin();
    let names = registry.names();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert_eq!(registry.len(), names.len());
    assert!(ValidatorRegistry::empty().is_empty());
}
