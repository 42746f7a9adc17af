//! # Global Property Schema
//!
//! Records can reference fields by *global property ID* instead of spelling
//! the field name and type inline, saving header bytes on hot classes. The
//! `Schema` is the caller-supplied lookup that resolves those references
//! during decode.
//!
//! The schema is immutable once built and is borrowed for the duration of a
//! single decode call; the codec never retains it. A property ID the schema
//! does not define fails the decode with `UnknownProperty` - references are
//! never skipped silently.

use hashbrown::HashMap;

use crate::records::type_tag::TypeTag;

/// A schema-registered field: declared name and declared wire type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub ty: TypeTag,
}

impl Property {
    pub fn new(name: impl Into<String>, ty: TypeTag) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Immutable mapping from global property ID to declared name and type.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    properties: HashMap<u32, Property>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property, replacing any previous definition of the id.
    pub fn define(&mut self, id: u32, name: impl Into<String>, ty: TypeTag) {
        self.properties.insert(id, Property::new(name, ty));
    }

    pub fn property(&self, id: u32) -> Option<&Property> {
        self.properties.get(&id)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl FromIterator<(u32, Property)> for Schema {
    fn from_iter<I: IntoIterator<Item = (u32, Property)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}
