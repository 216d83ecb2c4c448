//! Signup Example
//!
//! Binds validators to a small signup form and replays a scripted sequence
//! of user events against it, printing the state of each field after every
//! event. Validation cycles are logged to `signup.log`.

use std::fs::File;
use std::sync::Arc;

use formdom::{Document, Element, Event, EventKind, Key};
use lazyval::{ErrorParent, FormBindings, ValidationOptions, ValidatorRegistry};
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

// ============================================================================
// Form
// ============================================================================

fn group(id: &str, label: &str, field: Element) -> Element {
    Element::div()
        .id(format!("group-{id}"))
        .class("control-group")
        .child(Element::label(label).id(format!("label-{id}")))
        .child(field.id(id).outer_width(240))
}

fn signup_form() -> Document {
    Document::new(
        Element::form()
            .id("signup")
            .child(group("username", "Username", Element::input()))
            .child(group("email", "Email", Element::input()))
            .child(group("password", "Password", Element::password()))
            .child(group("confirm", "Confirm password", Element::password()))
            .child(
                Element::div()
                    .id("row-zip")
                    .child(Element::label("Zip code").id("label-zip"))
                    .child(Element::input().id("zip").outer_width(90)),
            )
            .child(group("terms", "I accept the terms", Element::checkbox())),
    )
}

fn print_state(doc: &Document, bindings: &FormBindings, step: &str) {
    println!("-- {step}");
    for id in ["username", "email", "password", "confirm", "zip", "terms"] {
        let Some(field) = doc.get(id) else { continue };
        let state = bindings
            .get(id)
            .map(|binding| format!("{:?}", binding.state()))
            .unwrap_or_default();
        let error = if doc.contains(&format!("error-{id}")) {
            " [error shown]"
        } else {
            ""
        };
        println!(
            "   {id:<10} {:<12} classes={:?}{error}",
            state, field.classes
        );
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    if let Ok(log_file) = File::create("signup.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let mut doc = signup_form();
    let mut bindings = FormBindings::new(Arc::new(ValidatorRegistry::builtin()));

    let setups = [
        (
            "#username",
            ValidationOptions::new()
                .validate_on(["blur", "keyup"])
                .validator("notBlank", true)
                .validator("minimumLength", 3u64)
                .validator("maximumLength", 16u64)
                .validator("startsWithAlphaNumeric", true)
                .validator("noSpaces", true)
                .error_text("3-16 characters, no spaces"),
        ),
        (
            "#email",
            ValidationOptions::new()
                .validator("email", true)
                .error_text("Enter a valid email address"),
        ),
        (
            "#password",
            ValidationOptions::new()
                .validator("minimumLength", 8u64)
                .validator("minNumerals", 1u64)
                .validator("dissimilarField", "username")
                .valid_class("has-success")
                .error_text("At least 8 characters and a digit"),
        ),
        (
            "#confirm",
            ValidationOptions::new()
                .validator("matchesField", "password")
                .error_text("Passwords do not match"),
        ),
        (
            "#zip",
            ValidationOptions::new()
                .validator("zipCode", true)
                .error_parent(ErrorParent::Field)
                .error_text("Invalid zip"),
        ),
        (
            "#terms",
            ValidationOptions::new()
                .validate_on(["click"])
                .validator("checked", true)
                .error_text("Required")
                .on_validation_complete(|report| {
                    println!("   terms hook: {:?}", report.verdict);
                }),
        ),
    ];

    for (selector, options) in setups {
        if let Err(e) = bindings.attach(&doc, selector, options) {
            eprintln!("Error: {}", e);
            return;
        }
    }

    let script: Vec<(&str, Option<(&str, &str)>, Event)> = vec![
        ("leave username empty", None, Event::blur("username")),
        (
            "type 'jo'",
            Some(("username", "jo")),
            Event::keyup("username", Key::Char('o')),
        ),
        ("tab away", None, Event::keyup("username", Key::Tab)),
        (
            "type 'joan'",
            Some(("username", "joan")),
            Event::keyup("username", Key::Char('n')),
        ),
        (
            "bad email",
            Some(("email", "joan@")),
            Event::blur("email"),
        ),
        (
            "good email",
            Some(("email", "joan@example.com")),
            Event::blur("email"),
        ),
        (
            "weak password",
            Some(("password", "joan")),
            Event::blur("password"),
        ),
        (
            "strong password",
            Some(("password", "correct horse 9")),
            Event::blur("password"),
        ),
        (
            "mistyped confirmation",
            Some(("confirm", "correct horse")),
            Event::blur("confirm"),
        ),
        (
            "matching confirmation",
            Some(("confirm", "correct horse 9")),
            Event::blur("confirm"),
        ),
        ("bad zip", Some(("zip", "1234")), Event::blur("zip")),
        ("good zip", Some(("zip", "12345-6789")), Event::blur("zip")),
        (
            "click terms without checking",
            None,
            Event::new(EventKind::Click, "terms"),
        ),
    ];

    for (step, input, event) in script {
        if let Some((id, value)) = input {
            if let Err(e) = doc.set_value(id, value) {
                eprintln!("Error: {}", e);
                return;
            }
        }
        if let Err(e) = bindings.dispatch(&event, &mut doc) {
            eprintln!("Error: {}", e);
            return;
        }
        print_state(&doc, &bindings, step);
    }

    if let Err(e) = doc.set_checked("terms", true) {
        eprintln!("Error: {}", e);
        return;
    }

    // Final pass over every field, as a submit handler would.
    match bindings.trigger_all(EventKind::Blur, &mut doc) {
        Ok(verdicts) => {
            let invalid = verdicts.iter().filter(|(_, v)| v.is_invalid()).count();
            print_state(&doc, &bindings, "final blur pass");
            println!("{} of {} blur-bound fields invalid", invalid, verdicts.len());
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}
