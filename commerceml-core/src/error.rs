//! Error types for the streaming engine and its adapters.

use thiserror::Error;

/// Errors a listener may raise during emission. Propagated out of the
/// engine verbatim; the run does not continue past a listener failure.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for parser operations.
///
/// Structural errors are fatal: the parser halts and refuses further
/// events. Unknown tags or attributes are never errors - they are
/// silently ignored for forward compatibility with dialect extensions.
#[derive(Error, Debug)]
pub enum Error {
    /// Closing tag does not match the innermost open element
    #[error("closing tag </{found}> does not match open element <{expected}>")]
    MismatchedClose { expected: String, found: String },

    /// Closing tag with no open element at all
    #[error("closing tag </{0}> with no open element")]
    UnbalancedClose(String),

    /// Input ended while elements were still open
    #[error("input ended inside <{open}>")]
    UnexpectedEof { open: String },

    /// A rule's start path matched again inside an open match of the
    /// same rule (self-nesting is not supported)
    #[error("rule {0:?} activated inside an open match of itself")]
    ReentrantRule(String),

    /// Two rules registered under the same name
    #[error("duplicate rule name {0:?}")]
    DuplicateRule(String),

    /// The parser already failed; events are no longer accepted
    #[error("parser halted after a previous error")]
    Halted,

    /// A listener failed during emission
    #[error("listener for rule {rule:?} failed: {source}")]
    Listener {
        rule: String,
        #[source]
        source: ListenerError,
    },

    /// A required field was absent from a collected record
    #[error("missing field {field:?} in {context}")]
    MissingField { field: String, context: String },

    /// A numeric field did not parse
    #[error("field {field:?} is not a number: {value:?}")]
    InvalidNumber { field: String, value: String },

    /// XML syntax error from the tokenizer
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute from the tokenizer
    #[error("xml attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Character encoding error from the tokenizer
    #[error("xml encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Entity escape error from the tokenizer
    #[error("xml escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
}
