use std::fmt;
use std::str::FromStr;

use crate::error::DomError;

/// A host event delivered to a form element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    /// ID of the element the event is targeted at.
    pub target: String,
    /// The key involved, for keyboard events.
    pub key: Option<Key>,
}

impl Event {
    pub fn new(kind: EventKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            key: None,
        }
    }

    /// Keyboard event carrying a key.
    pub fn key(kind: EventKind, target: impl Into<String>, key: Key) -> Self {
        Self {
            key: Some(key),
            ..Self::new(kind, target)
        }
    }

    pub fn blur(target: impl Into<String>) -> Self {
        Self::new(EventKind::Blur, target)
    }

    pub fn change(target: impl Into<String>) -> Self {
        Self::new(EventKind::Change, target)
    }

    pub fn keyup(target: impl Into<String>, key: Key) -> Self {
        Self::key(EventKind::KeyUp, target, key)
    }

    /// Whether this is a Tab navigation keystroke.
    pub fn is_tab(&self) -> bool {
        matches!(self.key, Some(Key::Tab | Key::BackTab))
    }
}

/// DOM event names a field binding can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    KeyPress,
    KeyUp,
    MouseDown,
    MouseEnter,
    MouseLeave,
    MouseMove,
    MouseOut,
    MouseOver,
    MouseUp,
    Hover,
    Click,
    DblClick,
    Focus,
    Blur,
    FocusIn,
    FocusOut,
    Change,
    Select,
}

impl EventKind {
    pub const ALL: [EventKind; 19] = [
        EventKind::KeyDown,
        EventKind::KeyPress,
        EventKind::KeyUp,
        EventKind::MouseDown,
        EventKind::MouseEnter,
        EventKind::MouseLeave,
        EventKind::MouseMove,
        EventKind::MouseOut,
        EventKind::MouseOver,
        EventKind::MouseUp,
        EventKind::Hover,
        EventKind::Click,
        EventKind::DblClick,
        EventKind::Focus,
        EventKind::Blur,
        EventKind::FocusIn,
        EventKind::FocusOut,
        EventKind::Change,
        EventKind::Select,
    ];

    /// The lower-case DOM name of the event.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::KeyDown => "keydown",
            EventKind::KeyPress => "keypress",
            EventKind::KeyUp => "keyup",
            EventKind::MouseDown => "mousedown",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseOut => "mouseout",
            EventKind::MouseOver => "mouseover",
            EventKind::MouseUp => "mouseup",
            EventKind::Hover => "hover",
            EventKind::Click => "click",
            EventKind::DblClick => "dblclick",
            EventKind::Focus => "focus",
            EventKind::Blur => "blur",
            EventKind::FocusIn => "focusin",
            EventKind::FocusOut => "focusout",
            EventKind::Change => "change",
            EventKind::Select => "select",
        }
    }
}

impl FromStr for EventKind {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| DomError::UnknownEvent(s.to_string()))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
}
