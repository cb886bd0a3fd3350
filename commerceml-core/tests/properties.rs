//! Property-based tests for the streaming engine.
//!
//! These verify structural invariants that must hold for ANY well-formed
//! event sequence, not just crafted examples: sibling arity maps onto
//! Single/Many exactly, and independent parser instances agree on every
//! emitted record.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use commerceml_core::{Event, Node, Rule, RuleSet, StreamParser};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 100,
        max_shrink_iters: 100,
        ..ProptestConfig::default()
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Run one rule over the events and return every emitted record.
fn collect(rules: RuleSet, watch: &str, events: &[Event]) -> Vec<Node> {
    let mut parser = StreamParser::new(rules);
    let sink: Rc<RefCell<Vec<Node>>> = Rc::default();
    let handle = Rc::clone(&sink);
    parser.on(watch, move |record| {
        handle.borrow_mut().push(record.clone());
        Ok(())
    });
    for event in events {
        parser.feed(event.clone()).unwrap();
    }
    parser.finish().unwrap();
    drop(parser);
    Rc::try_unwrap(sink).expect("parser dropped").into_inner()
}

fn root_rule() -> RuleSet {
    let mut rules = RuleSet::new();
    rules.register(Rule::new("root", ["R"])).unwrap();
    rules
}

/// A random element subtree: either a text leaf or a named element with
/// children, drawn from a small tag alphabet so sibling collisions (and
/// therefore list promotion) actually happen.
#[derive(Debug, Clone)]
enum Subtree {
    Leaf(String),
    Element(String, Vec<Subtree>),
}

fn tag_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(str::to_string)
}

fn subtree() -> impl Strategy<Value = Subtree> {
    let leaf = "[a-z]{0,6}".prop_map(Subtree::Leaf);
    leaf.prop_recursive(4, 24, 5, |inner| {
        (tag_name(), prop::collection::vec(inner, 0..5))
            .prop_map(|(name, children)| Subtree::Element(name, children))
    })
}

fn push_events(tree: &Subtree, out: &mut Vec<Event>) {
    match tree {
        Subtree::Leaf(text) => {
            if !text.is_empty() {
                out.push(Event::text(text));
            }
        }
        Subtree::Element(name, children) => {
            out.push(Event::open(name));
            for child in children {
                push_events(child, out);
            }
            out.push(Event::close(name));
        }
    }
}

fn document(trees: &[Subtree]) -> Vec<Event> {
    let mut events = vec![Event::open("R")];
    for tree in trees {
        push_events(tree, &mut events);
    }
    events.push(Event::close("R"));
    events
}

// =============================================================================
// Property: sibling arity maps onto Single/Many exactly
// =============================================================================

proptest! {
    #![proptest_config(config())]

    #[test]
    fn repeated_siblings_yield_a_list_of_their_count(k in 1usize..8) {
        let mut events = vec![Event::open("R")];
        for i in 0..k {
            events.push(Event::open("item"));
            events.push(Event::text(&format!("v{i}")));
            events.push(Event::close("item"));
        }
        events.push(Event::close("R"));

        let records = collect(root_rule(), "root", &events);
        prop_assert_eq!(records.len(), 1);

        let child = records[0].child("item").unwrap();
        prop_assert_eq!(child.len(), k);
        prop_assert_eq!(child.is_many(), k >= 2);

        // document order is preserved
        let texts: Vec<_> = child.iter().map(|v| v.text().unwrap().to_string()).collect();
        let expected: Vec<_> = (0..k).map(|i| format!("v{i}")).collect();
        prop_assert_eq!(texts, expected);
    }
}

// =============================================================================
// Property: independent instances agree on every record
// =============================================================================

proptest! {
    #![proptest_config(config())]

    #[test]
    fn independent_parsers_emit_deeply_equal_records(
        trees in prop::collection::vec(subtree(), 0..6),
    ) {
        let events = document(&trees);
        let a = collect(root_rule(), "root", &events);
        let b = collect(root_rule(), "root", &events);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn exactly_one_completion_per_activation(
        trees in prop::collection::vec(subtree(), 0..6),
    ) {
        // every direct <a> child of the root is one activation of the
        // nested rule; each must complete exactly once
        let mut rules = RuleSet::new();
        rules.register(Rule::new("nested", ["R", "a"])).unwrap();
        let events = document(&trees);

        let expected = trees
            .iter()
            .filter(|t| matches!(t, Subtree::Element(name, _) if name == "a"))
            .count();
        let records = collect(rules, "nested", &events);
        prop_assert_eq!(records.len(), expected);
    }
}
