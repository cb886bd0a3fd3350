//! The streaming engine: path tracking, rule matching, collection and
//! emission in one single pass.
//!
//! One [`StreamParser`] handles one document at a time. All state is
//! per-instance - independent parsers may run on independent threads
//! without coordination. Within an instance everything is sequential and
//! non-reentrant: a listener must not feed events back into the parser
//! that invoked it.
//!
//! Per rule occurrence the lifecycle is
//! Idle -> Matching (path equals start) -> Collecting -> Completed
//! (close tag seen, record emitted, state discarded). A later sibling
//! occurrence starts a fresh cycle.

use crate::collector::ActiveMatch;
use crate::dispatch::Dispatcher;
use crate::error::{Error, ListenerError};
use crate::event::Event;
use crate::path::PathStack;
use crate::record::Node;
use crate::rule::RuleSet;

/// Streaming path-rule parser.
///
/// ```
/// use commerceml_core::{Event, Rule, RuleSet, StreamParser};
///
/// let mut rules = RuleSet::new();
/// rules.register(Rule::new("item", ["list", "item"])).unwrap();
///
/// let mut parser = StreamParser::new(rules);
/// parser.on("item", |record| {
///     println!("id = {:?}", record.child_text("id"));
///     Ok(())
/// });
///
/// for event in [
///     Event::open("list"),
///     Event::open("item"),
///     Event::open("id"),
///     Event::text("42"),
///     Event::close("id"),
///     Event::close("item"),
///     Event::close("list"),
/// ] {
///     parser.feed(event).unwrap();
/// }
/// parser.finish().unwrap();
/// ```
pub struct StreamParser {
    rules: RuleSet,
    dispatcher: Dispatcher,
    stack: PathStack,
    /// Open matches in activation order; outer matches precede inner ones.
    active: Vec<ActiveMatch>,
    halted: bool,
}

impl StreamParser {
    /// Create a parser over a fixed rule set. The rules cannot change
    /// once streaming starts.
    pub fn new(rules: RuleSet) -> Self {
        StreamParser {
            rules,
            dispatcher: Dispatcher::new(),
            stack: PathStack::new(),
            active: Vec::new(),
            halted: false,
        }
    }

    /// Register a listener for a rule name. Multiple listeners per name
    /// run in registration order. Registration may happen at any point
    /// before the completion it should observe - including mid-stream.
    pub fn on<F>(&mut self, rule_name: &str, handler: F)
    where
        F: FnMut(&Node) -> Result<(), ListenerError> + 'static,
    {
        self.dispatcher.on(rule_name, handler);
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Feed one event from the token source.
    pub fn feed(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::StartElement { name, attributes } => {
                self.start_element(&name, &attributes)
            }
            Event::Text { content } => self.text(&content),
            Event::EndElement { name } => self.end_element(&name),
        }
    }

    /// Start-tag: extend the path, feed open matches, then activate every
    /// rule whose start path equals the new path exactly. A rule whose
    /// start path extends another's activates independently alongside it.
    pub fn start_element(
        &mut self,
        name: &str,
        attributes: &[(String, String)],
    ) -> Result<(), Error> {
        self.live()?;
        self.stack.push(name);
        let path = self.stack.as_slice();

        for m in &mut self.active {
            let rule = self.rules.get(m.rule_idx());
            m.open(rule, path, name, attributes);
        }

        for idx in self.rules.matches(path).collect::<Vec<_>>() {
            if self.active.iter().any(|m| m.rule_idx() == idx) {
                let rule_name = self.rules.get(idx).name().to_string();
                return self.halt(Error::ReentrantRule(rule_name));
            }
            tracing::trace!(
                rule = self.rules.get(idx).name(),
                depth = self.stack.depth(),
                "match activated"
            );
            self.active.push(ActiveMatch::activate(
                idx,
                self.stack.depth(),
                name,
                attributes,
            ));
        }
        Ok(())
    }

    /// Character content of the innermost open element.
    pub fn text(&mut self, content: &str) -> Result<(), Error> {
        self.live()?;
        for m in &mut self.active {
            m.text(content);
        }
        Ok(())
    }

    /// End-tag: verify nesting, complete matches rooted at this element
    /// (emitting their records before any outer match can complete), then
    /// shrink the path.
    pub fn end_element(&mut self, name: &str) -> Result<(), Error> {
        self.live()?;
        let mismatch = match self.stack.top() {
            Some(open) if open == name => None,
            Some(open) => Some(Error::MismatchedClose {
                expected: open.to_string(),
                found: name.to_string(),
            }),
            None => Some(Error::UnbalancedClose(name.to_string())),
        };
        if let Some(err) = mismatch {
            return self.halt(err);
        }

        let depth = self.stack.depth();
        let mut completed = Vec::new();
        let mut idx = 0;
        while idx < self.active.len() {
            if self.active[idx].base_depth() == depth {
                completed.push(self.active.remove(idx));
            } else {
                self.active[idx].close();
                idx += 1;
            }
        }

        for m in completed {
            let rule_name = self.rules.get(m.rule_idx()).name().to_string();
            let record = m.finish();
            tracing::debug!(rule = %rule_name, "record emitted");
            if let Err(err) = self.dispatcher.emit(&rule_name, &record) {
                return self.halt(err);
            }
        }

        self.stack.pop(name)
    }

    /// Signal end of input. Structural error if elements are still open;
    /// matches in progress at that point were abandoned, not emitted.
    pub fn finish(&self) -> Result<(), Error> {
        if let Some(open) = self.stack.top() {
            return Err(Error::UnexpectedEof {
                open: open.to_string(),
            });
        }
        Ok(())
    }

    fn live(&self) -> Result<(), Error> {
        if self.halted {
            return Err(Error::Halted);
        }
        Ok(())
    }

    fn halt(&mut self, err: Error) -> Result<(), Error> {
        self.halted = true;
        Err(err)
    }
}

impl std::fmt::Debug for StreamParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamParser")
            .field("depth", &self.stack.depth())
            .field("active", &self.active.len())
            .field("halted", &self.halted)
            .finish()
    }
}
