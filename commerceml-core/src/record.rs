//! Generic collected records - the schema-free tree handed to listeners.
//!
//! The engine knows nothing about the CommerceML schema. A completed
//! subtree is delivered as a [`Node`]: an attribute map, optional
//! character content, and named children. A child name maps to either a
//! single value or an ordered list ([`Child::Single`] / [`Child::Many`]),
//! so consumers must handle repetition explicitly at compile time instead
//! of discovering it at run time.
//!
//! Child elements that carry no attributes and no children of their own
//! collapse to plain [`Value::Text`], which keeps the common
//! `<Ид>abc-123</Ид>` shape cheap to store and to read.

// ============================================================================
// Core Types
// ============================================================================

/// A collected value: raw character content or a structured node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Pure text element (no attributes, no children).
    Text(String),
    /// Structured element.
    Node(Node),
}

/// One child name's worth of values under a parent.
///
/// `Single` becomes `Many` the moment a second sibling with the same name
/// closes under the same parent; document order of all occurrences,
/// including the first, is preserved. Promotion is per parent node, never
/// global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Single(Value),
    Many(Vec<Value>),
}

/// A structured element: attributes, optional text, named children.
///
/// Children are stored in document order of first occurrence; lookups are
/// linear, which is the right trade for the handful of children a
/// CommerceML block carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<(String, Child)>,
}

// ============================================================================
// Accessors
// ============================================================================

impl Value {
    /// Text content: the raw text, or the structured node's own text.
    pub fn text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::Node(n) => n.text(),
        }
    }

    /// Structured view, if this value kept attributes or children.
    #[inline]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            Value::Text(_) => None,
        }
    }
}

impl Child {
    /// All values for this name, in document order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        match self {
            Child::Single(v) => std::slice::from_ref(v).iter(),
            Child::Many(vs) => vs.iter(),
        }
    }

    /// First value in document order.
    pub fn first(&self) -> &Value {
        match self {
            Child::Single(v) => v,
            // Many is only ever created with at least two entries
            Child::Many(vs) => &vs[0],
        }
    }

    /// Number of occurrences.
    pub fn len(&self) -> usize {
        match self {
            Child::Single(_) => 1,
            Child::Many(vs) => vs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn is_many(&self) -> bool {
        matches!(self, Child::Many(_))
    }
}

impl Node {
    /// Attribute value by name. Order-insensitive lookup.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in source order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// This element's own character content.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Child entry by element name. Absent key means the element never
    /// occurred - there are no implicit defaults.
    pub fn child(&self, name: &str) -> Option<&Child> {
        self.children
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, c)| c)
    }

    /// All values under a child name, empty if the name never occurred.
    pub fn values<'a>(&'a self, name: &str) -> Box<dyn Iterator<Item = &'a Value> + 'a> {
        match self.child(name) {
            Some(c) => Box::new(c.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    /// Text of a single child element, the common CommerceML field shape.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(|c| c.first().text())
    }

    /// First structured child under a name.
    pub fn child_node(&self, name: &str) -> Option<&Node> {
        self.child(name).and_then(|c| c.first().as_node())
    }

    /// All children in document order of first occurrence.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Child)> {
        self.children.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }
}

// ============================================================================
// Construction (engine-side)
// ============================================================================

impl Node {
    pub(crate) fn with_attributes(attributes: Vec<(String, String)>) -> Self {
        Node {
            attributes,
            text: None,
            children: Vec::new(),
        }
    }

    pub(crate) fn append_text(&mut self, content: &str) {
        match &mut self.text {
            Some(t) => t.push_str(content),
            None => self.text = Some(content.to_string()),
        }
    }

    /// Attach a finished child, promoting Single to Many on repetition.
    pub(crate) fn attach(&mut self, name: String, value: Value) {
        if let Some((_, slot)) = self.children.iter_mut().find(|(k, _)| *k == name) {
            match slot {
                Child::Single(first) => {
                    let first = std::mem::replace(first, Value::Text(String::new()));
                    *slot = Child::Many(vec![first, value]);
                }
                Child::Many(vs) => vs.push(value),
            }
        } else {
            self.children.push((name, Child::Single(value)));
        }
    }

    /// Finish this element: collapse to pure text when nothing structured
    /// was retained.
    pub(crate) fn into_value(self) -> Value {
        if self.attributes.is_empty() && self.children.is_empty() {
            Value::Text(self.text.unwrap_or_default())
        } else {
            Value::Node(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_promotes_second_sibling_to_list() {
        let mut node = Node::default();
        node.attach("B".into(), Value::Text("x".into()));
        assert!(!node.child("B").unwrap().is_many());

        node.attach("B".into(), Value::Text("y".into()));
        let b = node.child("B").unwrap();
        assert!(b.is_many());
        let texts: Vec<_> = b.iter().map(|v| v.text().unwrap()).collect();
        assert_eq!(texts, ["x", "y"]);
    }

    #[test]
    fn promotion_is_per_parent() {
        let mut outer = Node::default();
        let mut inner = Node::default();
        inner.attach("B".into(), Value::Text("1".into()));
        outer.attach("B".into(), Value::Text("2".into()));
        outer.attach("wrap".into(), inner.into_value());

        assert_eq!(outer.child("B").unwrap().len(), 1);
        let wrap = outer.child_node("wrap").unwrap();
        assert_eq!(wrap.child("B").unwrap().len(), 1);
    }

    #[test]
    fn bare_element_collapses_to_text() {
        let mut node = Node::default();
        node.append_text("hello");
        assert_eq!(node.into_value(), Value::Text("hello".into()));
    }

    #[test]
    fn attributed_element_stays_structured() {
        let mut node = Node::with_attributes(vec![("a".into(), "1".into())]);
        node.append_text("hello");
        let value = node.into_value();
        let n = value.as_node().unwrap();
        assert_eq!(n.attr("a"), Some("1"));
        assert_eq!(n.text(), Some("hello"));
    }

    #[test]
    fn absent_child_is_absent() {
        let node = Node::default();
        assert!(node.child("nope").is_none());
        assert_eq!(node.values("nope").count(), 0);
    }
}
