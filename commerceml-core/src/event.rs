//! Token source contract - the events the engine consumes.
//!
//! This is a SAX-style event model: some external tokenizer (the bundled
//! quick-xml adapter in `reader`, a socket pump, a test harness) delivers
//! an ordered, single-pass sequence of these events. The engine never
//! looks ahead and never asks the source to seek.
//!
//! Well-formed nesting is the source's responsibility; the engine verifies
//! it anyway and raises [`Error::MismatchedClose`](crate::Error) on
//! violation.

/// One event from the token source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Opening tag, with its attributes in source order.
    StartElement {
        name: String,
        attributes: Vec<(String, String)>,
    },

    /// Character content of the currently open element.
    Text { content: String },

    /// Closing tag. Must match the innermost open element.
    EndElement { name: String },
}

impl Event {
    /// Opening tag with no attributes, mostly for tests and examples.
    pub fn open(name: &str) -> Self {
        Event::StartElement {
            name: name.to_string(),
            attributes: Vec::new(),
        }
    }

    /// Opening tag with attributes.
    pub fn open_with(name: &str, attributes: &[(&str, &str)]) -> Self {
        Event::StartElement {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Character content event.
    pub fn text(content: &str) -> Self {
        Event::Text {
            content: content.to_string(),
        }
    }

    /// Closing tag.
    pub fn close(name: &str) -> Self {
        Event::EndElement {
            name: name.to_string(),
        }
    }

    /// Element name for start/end events.
    pub fn element_name(&self) -> Option<&str> {
        match self {
            Event::StartElement { name, .. } | Event::EndElement { name } => Some(name),
            Event::Text { .. } => None,
        }
    }
}
