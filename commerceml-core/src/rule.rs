//! Collection rules: where a subtree starts and what of it to keep.
//!
//! A rule names an exact start path. While a match is open, only tokens
//! that fall inside the rule's include paths are retained; everything else
//! passes through untouched (but still drives path bookkeeping, so match
//! completion never depends on filtering).
//!
//! Include entries are written as absolute tag paths from the document
//! root, the way CommerceML rule tables are written in practice:
//!
//! ```
//! use commerceml_core::{Rule, RuleSet};
//!
//! let mut rules = RuleSet::new();
//! rules.register(
//!     Rule::new("offer", ["КоммерческаяИнформация", "ПакетПредложений",
//!                         "Предложения", "Предложение"]),
//! ).unwrap();
//! ```

use crate::error::Error;
use crate::path::paths_equal;

/// What part of a matched subtree is retained.
#[derive(Debug, Clone)]
pub enum Include {
    /// Retain everything below the start element.
    All,
    /// Retain only tokens on or under the listed absolute paths. An empty
    /// list keeps just the start element itself (attributes and direct
    /// text) - useful for header rules rooted near the document root.
    Paths(Vec<Vec<String>>),
}

/// One registered collection rule. Static configuration: built before the
/// run, never mutated during it.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    start: Vec<String>,
    include: Include,
}

impl Rule {
    /// Rule retaining the whole subtree under `start`.
    pub fn new<I, S>(name: &str, start: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule {
            name: name.to_string(),
            start: start.into_iter().map(Into::into).collect(),
            include: Include::All,
        }
    }

    /// Restrict retention to the given absolute paths. Call once with all
    /// entries; an empty iterator keeps only the start element itself.
    pub fn retain<I, P, S>(mut self, include: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Include::Paths(
            include
                .into_iter()
                .map(|p| p.into_iter().map(Into::into).collect())
                .collect(),
        );
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn start(&self) -> &[String] {
        &self.start
    }

    /// Should a token at absolute path `path` be retained by this rule?
    ///
    /// A token is kept when it sits on or below an include entry, or is an
    /// ancestor container of one (so the included content has a place to
    /// live in the record). The start element itself is always kept.
    pub(crate) fn retains(&self, path: &[String]) -> bool {
        if path.len() <= self.start.len() {
            return true;
        }
        match &self.include {
            Include::All => true,
            Include::Paths(entries) => entries
                .iter()
                .any(|e| path.starts_with(e) || e.starts_with(path)),
        }
    }
}

/// The set of rules for one parser run. Read-only once streaming begins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule. Names must be unique; start paths may be shared
    /// or nested between rules.
    pub fn register(&mut self, rule: Rule) -> Result<(), Error> {
        if self.rules.iter().any(|r| r.name == rule.name) {
            return Err(Error::DuplicateRule(rule.name));
        }
        self.rules.push(rule);
        Ok(())
    }

    #[inline]
    pub(crate) fn get(&self, idx: usize) -> &Rule {
        &self.rules[idx]
    }

    /// Indices of rules whose start path equals `path` exactly.
    pub(crate) fn matches<'a>(
        &'a self,
        path: &'a [String],
    ) -> impl Iterator<Item = usize> + 'a {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, r)| paths_equal(&r.start, path))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut rules = RuleSet::new();
        rules.register(Rule::new("a", ["x"])).unwrap();
        let err = rules.register(Rule::new("a", ["y"])).unwrap_err();
        assert!(matches!(err, Error::DuplicateRule(_)));
    }

    #[test]
    fn shared_start_paths_allowed() {
        let mut rules = RuleSet::new();
        rules.register(Rule::new("a", ["x"])).unwrap();
        rules.register(Rule::new("b", ["x"])).unwrap();
        assert_eq!(rules.matches(&path(&["x"])).count(), 2);
    }

    #[test]
    fn retains_descendants_and_ancestors_of_entries() {
        let rule = Rule::new("pkg", ["root", "pkg"]).retain([["root", "pkg", "prices"]]);

        // the include target and everything below it
        assert!(rule.retains(&path(&["root", "pkg", "prices"])));
        assert!(rule.retains(&path(&["root", "pkg", "prices", "price"])));
        // the start element itself
        assert!(rule.retains(&path(&["root", "pkg"])));
        // a sibling branch is skipped
        assert!(!rule.retains(&path(&["root", "pkg", "stores"])));
    }

    #[test]
    fn empty_include_keeps_only_the_start() {
        let rule = Rule::new("hdr", ["root"]).retain(Vec::<Vec<String>>::new());
        assert!(rule.retains(&path(&["root"])));
        assert!(!rule.retains(&path(&["root", "child"])));
    }
}
