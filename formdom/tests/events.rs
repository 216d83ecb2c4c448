use formdom::{DomError, Event, EventKind, Key};

#[test]
fn test_event_kind_names_round_trip() {
    for kind in EventKind::ALL {
        assert_eq!(kind.name().parse::<EventKind>(), Ok(kind));
    }
}

#[test]
fn test_event_kind_parse_is_lenient_on_case() {
    assert_eq!(" Blur ".parse::<EventKind>(), Ok(EventKind::Blur));
    assert_eq!("KEYUP".parse::<EventKind>(), Ok(EventKind::KeyUp));
}

#[test]
fn test_unknown_event_kind() {
    assert_eq!(
        "scroll".parse::<EventKind>(),
        Err(DomError::UnknownEvent("scroll".to_string()))
    );
}

#[test]
fn test_tab_detection() {
    assert!(Event::keyup("name", Key::Tab).is_tab());
    assert!(Event::keyup("name", Key::BackTab).is_tab());
    assert!(!Event::keyup("name", Key::Char('a')).is_tab());
    assert!(!Event::blur("name").is_tab());
}

#[test]
fn test_only_bindable_events_parse() {
    assert_eq!(EventKind::ALL.len(), 19);
    for name in ["submit", "paste", "input", "scroll"] {
        assert!(name.parse::<EventKind>().is_err(), "{name}");
    }
}
