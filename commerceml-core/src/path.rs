//! Tag path bookkeeping.
//!
//! A path is an ordered sequence of element names from the document root
//! down to the current position, represented as `&[String]`. Two paths are
//! equal iff they have the same names at every position. Attributes never
//! participate in paths.

use crate::error::Error;

/// Stack of currently open element names.
///
/// Mirrors the tag nesting of the document exactly: one push per start
/// tag, one pop per end tag. The engine owns the only instance per run.
#[derive(Debug, Default)]
pub struct PathStack {
    names: Vec<String>,
}

impl PathStack {
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Number of currently open elements.
    #[inline]
    pub fn depth(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The current path, root first. Valid until the next push/pop.
    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    /// Innermost open element name, if any.
    #[inline]
    pub fn top(&self) -> Option<&str> {
        self.names.last().map(String::as_str)
    }

    pub fn push(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    /// Pop the innermost element, asserting it matches the closing tag.
    ///
    /// A mismatch means the source violated well-formedness; the run must
    /// abort.
    pub fn pop(&mut self, closing: &str) -> Result<(), Error> {
        match self.names.last() {
            Some(open) if open == closing => {
                self.names.pop();
                Ok(())
            }
            Some(open) => Err(Error::MismatchedClose {
                expected: open.clone(),
                found: closing.to_string(),
            }),
            None => Err(Error::UnbalancedClose(closing.to_string())),
        }
    }
}

/// Exact element-wise path equality.
#[inline]
pub(crate) fn paths_equal(a: &[String], b: &[String]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_tracks_nesting() {
        let mut stack = PathStack::new();
        stack.push("a");
        stack.push("b");
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.as_slice(), ["a".to_string(), "b".to_string()]);

        stack.pop("b").unwrap();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), Some("a"));
    }

    #[test]
    fn pop_rejects_wrong_name() {
        let mut stack = PathStack::new();
        stack.push("a");
        let err = stack.pop("x").unwrap_err();
        assert!(matches!(err, Error::MismatchedClose { .. }));
    }

    #[test]
    fn pop_rejects_empty_stack() {
        let mut stack = PathStack::new();
        let err = stack.pop("x").unwrap_err();
        assert!(matches!(err, Error::UnbalancedClose(_)));
    }
}
