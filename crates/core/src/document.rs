//! The JSON document tree
//!
//! [`Document`] is the single JSON object the server persists and serves.
//! It wraps `serde_json::Map` so the root is an object by construction, and
//! exposes the three path-addressed operations: [`get`](Document::get),
//! [`set`](Document::set), and [`delete`](Document::delete).
//!
//! The operations are pure tree walks over the explicit document, with no
//! hidden state and no I/O. Semantics:
//!
//! - `get` and `delete` never create structure: a missing or non-object
//!   intermediate means not-found.
//! - `set` auto-creates intermediate objects, replacing any non-object
//!   value standing in the way of a deeper path. This silently discards
//!   the prior value; it is an accepted semantic, not a failure.

use crate::path::KeyPath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// The JSON document: a tree of nodes rooted at an object
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document(Map::new())
    }

    /// Build a document from a parsed root value
    ///
    /// The root must be an object; anything else (including a valid JSON
    /// scalar or array) is replaced with an empty document.
    pub fn from_value(root: Value) -> Self {
        match root {
            Value::Object(map) => Document(map),
            _ => Document::new(),
        }
    }

    /// The document as a JSON value (for serialization)
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the document has no top-level keys
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up the node at `path`
    ///
    /// Returns `None` if any intermediate segment is missing or not an
    /// object, or if the final segment is absent.
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        let (init, last) = path.split_last()?;
        let mut current = &self.0;
        for segment in init {
            current = current.get(segment)?.as_object()?;
        }
        current.get(last)
    }

    /// Assign `value` at `path`, overwriting whatever was there
    ///
    /// Intermediate objects are created as needed; a non-object value at
    /// an intermediate segment is replaced with an empty object.
    pub fn set(&mut self, path: &KeyPath, value: Value) {
        let Some((init, last)) = path.split_last() else {
            return;
        };
        let mut current = &mut self.0;
        for segment in init {
            let slot = current
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            current = as_object_slot(slot);
        }
        current.insert(last.clone(), value);
    }

    /// Remove the node at `path`
    ///
    /// Returns `true` if a node was removed. A missing or non-object
    /// intermediate leaves the document unchanged and returns `false`.
    pub fn delete(&mut self, path: &KeyPath) -> bool {
        let Some((init, last)) = path.split_last() else {
            return false;
        };
        let mut current = &mut self.0;
        for segment in init {
            match current.get_mut(segment) {
                Some(Value::Object(map)) => current = map,
                _ => return false,
            }
        }
        current.remove(last).is_some()
    }
}

/// Coerce a slot to an object map, replacing any non-object value
fn as_object_slot(slot: &mut Value) -> &mut Map<String, Value> {
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just replaced with an object"),
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn path(segments: &[&str]) -> KeyPath {
        KeyPath::from_segments(segments.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let mut doc = Document::new();
        doc.set(&path(&["x"]), json!("hello"));
        assert_eq!(doc.get(&path(&["x"])), Some(&json!("hello")));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let doc = Document::new();
        assert_eq!(doc.get(&path(&["x"])), None);
    }

    #[test]
    fn test_get_through_scalar_is_none() {
        let mut doc = Document::new();
        doc.set(&path(&["a"]), json!(1));
        assert_eq!(doc.get(&path(&["a", "b"])), None);
    }

    #[test]
    fn test_get_never_creates_structure() {
        let mut doc = Document::new();
        assert_eq!(doc.get(&path(&["a", "b", "c"])), None);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_set_auto_creates_intermediates() {
        let mut doc = Document::new();
        doc.set(&path(&["a", "b", "c"]), json!(1));
        assert!(doc.get(&path(&["a", "b"])).unwrap().is_object());
        assert_eq!(doc.get(&path(&["a", "b", "c"])), Some(&json!(1)));
    }

    #[test]
    fn test_set_discards_scalar_in_the_way() {
        let mut doc = Document::new();
        doc.set(&path(&["a"]), json!("scalar"));
        doc.set(&path(&["a", "b"]), json!(1));
        assert_eq!(doc.get(&path(&["a", "b"])), Some(&json!(1)));
        assert_eq!(doc.get(&path(&["a"])), Some(&json!({"b": 1})));
    }

    #[test]
    fn test_set_overwrites_object_with_scalar() {
        let mut doc = Document::new();
        doc.set(&path(&["a", "b"]), json!(1));
        doc.set(&path(&["a"]), json!("flat"));
        assert_eq!(doc.get(&path(&["a"])), Some(&json!("flat")));
        assert_eq!(doc.get(&path(&["a", "b"])), None);
    }

    #[test]
    fn test_delete_then_get_is_none() {
        let mut doc = Document::new();
        doc.set(&path(&["x"]), json!(true));
        assert!(doc.delete(&path(&["x"])));
        assert_eq!(doc.get(&path(&["x"])), None);
    }

    #[test]
    fn test_delete_absent_is_idempotent() {
        let mut doc = Document::new();
        doc.set(&path(&["keep"]), json!(1));
        let before = doc.clone();
        assert!(!doc.delete(&path(&["gone"])));
        assert!(!doc.delete(&path(&["gone"])));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_delete_never_creates_structure() {
        let mut doc = Document::new();
        assert!(!doc.delete(&path(&["a", "b"])));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_delete_nested_leaves_siblings() {
        let mut doc = Document::new();
        doc.set(&path(&["a", "b"]), json!(1));
        doc.set(&path(&["a", "c"]), json!(2));
        assert!(doc.delete(&path(&["a", "b"])));
        assert_eq!(doc.get(&path(&["a", "c"])), Some(&json!(2)));
    }

    #[test]
    fn test_from_value_replaces_non_object_root() {
        assert!(Document::from_value(json!([1, 2, 3])).is_empty());
        assert!(Document::from_value(json!("text")).is_empty());
        assert_eq!(
            Document::from_value(json!({"a": 1})).get(&path(&["a"])),
            Some(&json!(1))
        );
    }

    // Any JSON node kind survives a set/get round trip at any path.
    fn arb_node() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[a-z ]{0,12}".prop_map(Value::from),
            proptest::collection::vec(any::<i64>(), 0..4)
                .prop_map(|v| json!(v)),
            "[a-z]{1,6}".prop_map(|k| {
                let mut map = Map::new();
                map.insert(k, Value::from(1));
                Value::Object(map)
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            segments in proptest::collection::vec("[a-z]{1,8}", 1..4),
            value in arb_node()
        ) {
            let mut doc = Document::new();
            let p = KeyPath::from_segments(segments);
            doc.set(&p, value.clone());
            prop_assert_eq!(doc.get(&p), Some(&value));
        }

        #[test]
        fn prop_delete_then_get(
            segments in proptest::collection::vec("[a-z]{1,8}", 1..4),
            value in arb_node()
        ) {
            let mut doc = Document::new();
            let p = KeyPath::from_segments(segments);
            doc.set(&p, value);
            prop_assert!(doc.delete(&p));
            prop_assert_eq!(doc.get(&p), None);
        }
    }
}
