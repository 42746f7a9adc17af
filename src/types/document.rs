//! # Documents
//!
//! A `Document` is a record as the client sees it: an optional class name
//! and a mapping from field names to typed values. Documents are ephemeral,
//! built by callers for the encoder or produced by the decoder; they own no
//! connection to the database.
//!
//! The class name is either a non-empty string or absent; field order is
//! not part of the value (the encoder emits fields in sorted name order for
//! deterministic output, the decoder accepts any order).

use hashbrown::HashMap;

use crate::types::rid::Rid;
use crate::types::value::Value;

/// A database record: optional class name plus named, typed fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    class: Option<String>,
    fields: HashMap<String, Value>,
}

impl Document {
    /// Creates an empty document with no class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document of the given class.
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            fields: HashMap::new(),
        }
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn set_class(&mut self, class: impl Into<String>) {
        self.class = Some(class.into());
    }

    pub fn clear_class(&mut self) {
        self.class = None;
    }

    /// Inserts a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in arbitrary order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_boolean(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer field widened to `i64`, whatever tagged width it carries.
    pub fn get_long(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Short(v) => Some(i64::from(*v)),
            Value::Int(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Floating-point field widened to `f64`.
    pub fn get_double(&self, name: &str) -> Option<f64> {
        match self.get(name)? {
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn get_binary(&self, name: &str) -> Option<&[u8]> {
        match self.get(name)? {
            Value::Binary(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn get_link(&self, name: &str) -> Option<Rid> {
        match self.get(name)? {
            Value::Link(rid) => Some(*rid),
            _ => None,
        }
    }

    pub fn get_document(&self, name: &str) -> Option<&Document> {
        match self.get(name)? {
            Value::Embedded(doc) => Some(doc),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_converts_through_from() {
        let mut doc = Document::with_class("Person");
        doc.insert("name", "Ada");
        doc.insert("age", 36i32);
        doc.insert("score", 1.5f64);

        assert_eq!(doc.class(), Some("Person"));
        assert_eq!(doc.get("name"), Some(&Value::String("Ada".into())));
        assert_eq!(doc.get("age"), Some(&Value::Int(36)));
        assert_eq!(doc.get("score"), Some(&Value::Double(1.5)));
    }

    #[test]
    fn typed_getters_widen_numeric_fields() {
        let mut doc = Document::new();
        doc.insert("s", 1i16);
        doc.insert("i", 2i32);
        doc.insert("l", 3i64);
        doc.insert("f", 0.5f32);

        assert_eq!(doc.get_long("s"), Some(1));
        assert_eq!(doc.get_long("i"), Some(2));
        assert_eq!(doc.get_long("l"), Some(3));
        assert_eq!(doc.get_double("f"), Some(0.5));
        assert_eq!(doc.get_long("f"), None);
    }

    #[test]
    fn class_is_optional_and_mutable() {
        let mut doc = Document::new();
        assert_eq!(doc.class(), None);
        doc.set_class("Edge");
        assert_eq!(doc.class(), Some("Edge"));
        doc.clear_class();
        assert_eq!(doc.class(), None);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let mut a = Document::new();
        a.insert("x", 1i32);
        a.insert("y", 2i32);

        let mut b = Document::new();
        b.insert("y", 2i32);
        b.insert("x", 1i32);

        assert_eq!(a, b);
    }
}
