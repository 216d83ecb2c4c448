pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod selector;

pub use document::Document;
pub use element::Element;
pub use error::DomError;
pub use event::{Event, EventKind, Key};
pub use selector::Selector;
