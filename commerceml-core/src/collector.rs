//! Subtree collection for one active rule match.
//!
//! Every activation owns an independent [`ActiveMatch`]: a stack of
//! in-progress nodes mirroring the retained part of the subtree, plus a
//! skip counter for branches outside the rule's include paths. Skipped
//! branches cost nothing but a depth count - once an element is skipped,
//! the whole branch under it is skipped without further path checks,
//! because retention is monotone along a path.
//!
//! The engine drives this type; it never sees raw events from outside.

use crate::record::{Node, Value};
use crate::rule::Rule;

/// In-progress node for one retained open element.
#[derive(Debug)]
struct Frame {
    name: String,
    node: Node,
}

/// One rule occurrence currently collecting, between activation and
/// completion. The engine discards it the instant the start element's
/// closing tag is seen.
#[derive(Debug)]
pub(crate) struct ActiveMatch {
    rule_idx: usize,
    /// Stack depth at activation == length of the rule's start path.
    base_depth: usize,
    /// frames[0] is the match root; never empty until completion.
    frames: Vec<Frame>,
    /// Number of currently open skipped elements.
    skipping: usize,
}

impl ActiveMatch {
    /// Activate at the current start tag; the tag's attributes become the
    /// record root's attributes.
    pub(crate) fn activate(
        rule_idx: usize,
        base_depth: usize,
        name: &str,
        attributes: &[(String, String)],
    ) -> Self {
        ActiveMatch {
            rule_idx,
            base_depth,
            frames: vec![Frame {
                name: name.to_string(),
                node: Node::with_attributes(attributes.to_vec()),
            }],
            skipping: 0,
        }
    }

    #[inline]
    pub(crate) fn rule_idx(&self) -> usize {
        self.rule_idx
    }

    #[inline]
    pub(crate) fn base_depth(&self) -> usize {
        self.base_depth
    }

    /// A start tag below the match root. `path` is the absolute path
    /// including the new element.
    pub(crate) fn open(
        &mut self,
        rule: &Rule,
        path: &[String],
        name: &str,
        attributes: &[(String, String)],
    ) {
        if self.skipping > 0 {
            self.skipping += 1;
            return;
        }
        if !rule.retains(path) {
            self.skipping = 1;
            return;
        }
        self.frames.push(Frame {
            name: name.to_string(),
            node: Node::with_attributes(attributes.to_vec()),
        });
    }

    /// Character content of the innermost retained element.
    pub(crate) fn text(&mut self, content: &str) {
        if self.skipping > 0 {
            return;
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.node.append_text(content);
        }
    }

    /// An end tag strictly inside the match (not the root's own close).
    pub(crate) fn close(&mut self) {
        if self.skipping > 0 {
            self.skipping -= 1;
            return;
        }
        // Retained child finished: collapse and attach to its parent.
        if self.frames.len() > 1 {
            let frame = self.frames.pop().expect("frame stack underflow");
            let parent = self.frames.last_mut().expect("match root missing");
            parent.node.attach(frame.name, frame.node.into_value());
        }
    }

    /// The match root's own close: finalize into the emitted record.
    pub(crate) fn finish(mut self) -> Node {
        debug_assert_eq!(self.frames.len(), 1, "unclosed frames at completion");
        debug_assert_eq!(self.skipping, 0, "unclosed skipped branch at completion");
        self.frames.pop().map(|f| f.node).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn collects_retained_children() {
        let rule = Rule::new("r", ["A"]);
        let mut m = ActiveMatch::activate(0, 1, "A", &[]);
        m.open(&rule, &path(&["A", "B"]), "B", &[]);
        m.text("x");
        m.close();
        let record = m.finish();
        assert_eq!(record.child_text("B"), Some("x"));
    }

    #[test]
    fn skipped_branch_never_reaches_the_record() {
        let rule = Rule::new("r", ["A"]).retain([["A", "keep"]]);
        let mut m = ActiveMatch::activate(0, 1, "A", &[]);

        m.open(&rule, &path(&["A", "drop"]), "drop", &[]);
        // same name as an included path, but nested under a skipped branch
        m.open(&rule, &path(&["A", "drop", "keep"]), "keep", &[]);
        m.text("hidden");
        m.close();
        m.close();

        m.open(&rule, &path(&["A", "keep"]), "keep", &[]);
        m.text("visible");
        m.close();

        let record = m.finish();
        assert_eq!(record.child("keep").unwrap().len(), 1);
        assert_eq!(record.child_text("keep"), Some("visible"));
        assert!(record.child("drop").is_none());
    }

    #[test]
    fn text_directly_under_root_is_kept() {
        let rule = Rule::new("r", ["A"]).retain(Vec::<Vec<String>>::new());
        let mut m = ActiveMatch::activate(0, 1, "A", &[("k".into(), "v".into())]);
        m.text("body");
        let record = m.finish();
        assert_eq!(record.attr("k"), Some("v"));
        assert_eq!(record.text(), Some("body"));
    }
}
