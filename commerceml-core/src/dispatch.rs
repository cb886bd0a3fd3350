//! Listener registry and synchronous emission.
//!
//! Listeners are keyed by rule name. Registration is dynamic: a handler
//! added mid-stream still receives every completion that happens after it
//! was added. Emission is strictly synchronous - the engine does not
//! consume further tokens until every handler for a completion has
//! returned, which is the backpressure mechanism for slow consumers.

use std::collections::HashMap;

use crate::error::{Error, ListenerError};
use crate::record::Node;

type Handler = Box<dyn FnMut(&Node) -> Result<(), ListenerError>>;

#[derive(Default)]
pub(crate) struct Dispatcher {
    handlers: HashMap<String, Vec<Handler>>,
}

impl Dispatcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a handler for a rule name, after any already registered for it.
    pub(crate) fn on<F>(&mut self, rule_name: &str, handler: F)
    where
        F: FnMut(&Node) -> Result<(), ListenerError> + 'static,
    {
        self.handlers
            .entry(rule_name.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Invoke all handlers for a completed record, in registration order.
    /// The first handler error aborts the run.
    pub(crate) fn emit(&mut self, rule_name: &str, record: &Node) -> Result<(), Error> {
        if let Some(handlers) = self.handlers.get_mut(rule_name) {
            for handler in handlers {
                handler(record).map_err(|source| Error::Listener {
                    rule: rule_name.to_string(),
                    source,
                })?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(k, v)| (k.as_str(), v.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("Dispatcher").field("handlers", &counts).finish()
    }
}
