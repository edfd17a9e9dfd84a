//! Typed, fallible views over a raw configuration tree.
//!
//! Event files are parsed into a [`serde_yml::Value`] first. [`Node`]
//! borrows into that tree and offers accessors that return `Option`
//! instead of failing, so every fatal-versus-default decision is an
//! explicit branch in the resolver.

use serde_yml::Value;

/// A borrowed node of the configuration tree.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    value: &'a Value,
}

impl<'a> Node<'a> {
    /// Wrap a raw value.
    pub const fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The underlying raw value.
    pub const fn raw(&self) -> &'a Value {
        self.value
    }

    /// Whether the node is an explicit null (e.g. `key:` or `key: ~`).
    pub const fn is_null(&self) -> bool {
        matches!(self.value, Value::Null)
    }

    /// Whether the node is a mapping.
    pub const fn is_map(&self) -> bool {
        matches!(self.value, Value::Mapping(_))
    }

    /// Read an integer.
    ///
    /// Numeric strings such as `"5"` are accepted; floats, booleans, and
    /// collections are not.
    pub fn as_int(&self) -> Option<i64> {
        match self.value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            Value::Tagged(tagged) => Self::new(&tagged.value).as_int(),
            _ => None,
        }
    }

    /// Read a scalar as text.
    ///
    /// Numbers and booleans are rendered as written; null and collections
    /// yield `None`.
    pub fn as_string(&self) -> Option<String> {
        match self.value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => Self::new(&tagged.value).as_string(),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    /// Read a sequence.
    pub fn as_list(&self) -> Option<Vec<Self>> {
        match self.value {
            Value::Sequence(items) => Some(items.iter().map(Self::new).collect()),
            _ => None,
        }
    }

    /// Read a mapping as `(key, child)` pairs in authoring order.
    ///
    /// Scalar keys are rendered as text; collection keys are skipped.
    pub fn children_map(&self) -> Option<Vec<(String, Self)>> {
        match self.value {
            Value::Mapping(map) => Some(
                map.iter()
                    .filter_map(|(k, v)| Self::new(k).as_string().map(|key| (key, Self::new(v))))
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Look up a child of a mapping by key.
    pub fn get(&self, key: &str) -> Option<Node<'a>> {
        let Value::Mapping(map) = self.value else {
            return None;
        };
        map.iter()
            .find(|(k, _)| Self::new(k).as_string().as_deref() == Some(key))
            .map(|(_, v)| Self::new(v))
    }

    /// Whether a mapping contains `key`, even if its value is null.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yml::from_str(text).unwrap()
    }

    #[test]
    fn int_accessor_accepts_numbers_and_numeric_strings() {
        let value = yaml("a: 5\nb: '7'\nc: 1.5\nd: nope\ne: true");
        let node = Node::new(&value);
        assert_eq!(node.get("a").unwrap().as_int(), Some(5));
        assert_eq!(node.get("b").unwrap().as_int(), Some(7));
        assert_eq!(node.get("c").unwrap().as_int(), None);
        assert_eq!(node.get("d").unwrap().as_int(), None);
        assert_eq!(node.get("e").unwrap().as_int(), None);
    }

    #[test]
    fn string_accessor_renders_scalars() {
        let value = yaml("a: text\nb: 20\nc: false\nd: ~\ne: [1]");
        let node = Node::new(&value);
        assert_eq!(node.get("a").unwrap().as_string().as_deref(), Some("text"));
        assert_eq!(node.get("b").unwrap().as_string().as_deref(), Some("20"));
        assert_eq!(node.get("c").unwrap().as_string().as_deref(), Some("false"));
        assert_eq!(node.get("d").unwrap().as_string(), None);
        assert_eq!(node.get("e").unwrap().as_string(), None);
    }

    #[test]
    fn contains_sees_null_values() {
        let value = yaml("command: ~");
        let node = Node::new(&value);
        assert!(node.contains("command"));
        assert!(node.get("command").unwrap().is_null());
        assert!(!node.contains("as"));
    }

    #[test]
    fn children_keep_authoring_order() {
        let value = yaml("zeta: 1\nalpha: 2\n10: 3");
        let keys: Vec<String> = Node::new(&value)
            .children_map()
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "10"]);
    }

    #[test]
    fn numeric_keys_are_addressable_as_text() {
        let value = yaml("10: {steps: []}");
        assert!(Node::new(&value).get("10").unwrap().is_map());
    }

    #[test]
    fn list_accessor() {
        let value = yaml("- 1\n- 2");
        assert_eq!(Node::new(&value).as_list().unwrap().len(), 2);
        assert!(Node::new(&Value::Null).as_list().is_none());
    }
}
