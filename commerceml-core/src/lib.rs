//! CommerceML Core Parser
//!
//! Streaming, event-based parser for CommerceML business documents.
//! Collects rule-matched subtrees from a single pass over SAX events
//! without building a DOM - memory stays bounded by the largest matched
//! subtree, not the document.
//!
//! # Architecture
//!
//! - **path.rs** - PathStack mirroring the current tag nesting
//! - **rule.rs** - Rule/RuleSet, exact start-path matching, include paths
//! - **record.rs** - generic collected records (Node/Value/Child)
//! - **collector.rs** - per-match subtree building with include filtering
//! - **parser.rs** - the engine: one pass, activation to emission
//! - **dispatch.rs** - listener registry, synchronous emission
//! - **reader.rs** - quick-xml adapter (the only tokenizer-aware module)
//! - **commerceml/** - typed offers/orders layer over the generic engine
//!
//! # Example
//!
//! ```
//! use commerceml_core::{Rule, RuleSet, StreamParser, reader};
//!
//! let mut rules = RuleSet::new();
//! rules.register(Rule::new("item", ["catalog", "item"])).unwrap();
//!
//! let mut parser = StreamParser::new(rules);
//! parser.on("item", |record| {
//!     assert_eq!(record.attr("id"), Some("1"));
//!     Ok(())
//! });
//!
//! reader::parse_str("<catalog><item id=\"1\"/></catalog>", &mut parser).unwrap();
//! ```

pub mod commerceml;
pub mod error;
pub mod event;
pub mod parser;
pub mod path;
pub mod reader;
pub mod record;
pub mod rule;

mod collector;
mod dispatch;

pub use error::{Error, ListenerError};
pub use event::Event;
pub use parser::StreamParser;
pub use path::PathStack;
pub use record::{Child, Node, Value};
pub use rule::{Include, Rule, RuleSet};
