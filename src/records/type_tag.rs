//! # Wire Type Tags
//!
//! Single-byte discriminants for every kind in the value universe, as used
//! in embedded list/set element types, embedded map key and value types,
//! and header field types.
//!
//! ## Discriminant Values
//!
//! | Tag | Kind | Tag | Kind |
//! |-----|------|-----|------|
//! | 0 | boolean | 12 | embedded map |
//! | 1 | int | 13 | link |
//! | 2 | short | 14 | link-list |
//! | 3 | long | 15 | link-set |
//! | 4 | float | 16 | link-map |
//! | 5 | double | 17 | link-bag |
//! | 6 | datetime | 19 | decimal |
//! | 7 | string | 22 | date |
//! | 8 | binary | 23 | any |
//! | 9 | embedded document | | |
//! | 10 | embedded list | | |
//! | 11 | embedded set | | |
//!
//! Gaps (18, 20, 21) belong to format revisions this core does not speak;
//! they decode as `UnknownType` like any other unassigned byte. `Any` is
//! the uniform element type emitted for heterogeneous lists and sets, and
//! doubles as the element tag for a null list element, which has no body.

use crate::error::{CodecError, Result};
use crate::types::Value;

/// Wire discriminant for a value kind.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Boolean = 0,
    Int = 1,
    Short = 2,
    Long = 3,
    Float = 4,
    Double = 5,
    DateTime = 6,
    String = 7,
    Binary = 8,
    Embedded = 9,
    List = 10,
    Set = 11,
    Map = 12,
    Link = 13,
    LinkList = 14,
    LinkSet = 15,
    LinkMap = 16,
    LinkBag = 17,
    Decimal = 19,
    Date = 22,
    Any = 23,
}

impl TypeTag {
    /// Decodes a tag byte, rejecting anything outside the defined set.
    pub fn from_byte(tag: u8) -> Result<Self> {
        Ok(match tag {
            0 => TypeTag::Boolean,
            1 => TypeTag::Int,
            2 => TypeTag::Short,
            3 => TypeTag::Long,
            4 => TypeTag::Float,
            5 => TypeTag::Double,
            6 => TypeTag::DateTime,
            7 => TypeTag::String,
            8 => TypeTag::Binary,
            9 => TypeTag::Embedded,
            10 => TypeTag::List,
            11 => TypeTag::Set,
            12 => TypeTag::Map,
            13 => TypeTag::Link,
            14 => TypeTag::LinkList,
            15 => TypeTag::LinkSet,
            16 => TypeTag::LinkMap,
            17 => TypeTag::LinkBag,
            19 => TypeTag::Decimal,
            22 => TypeTag::Date,
            23 => TypeTag::Any,
            tag => return Err(CodecError::UnknownType { tag }),
        })
    }

    /// The single emission tag for a value. `Null` maps to `Any`, which is
    /// only ever written where a null body is legal (list and set elements).
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => TypeTag::Any,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Short(_) => TypeTag::Short,
            Value::Int(_) => TypeTag::Int,
            Value::Long(_) => TypeTag::Long,
            Value::Float(_) => TypeTag::Float,
            Value::Double(_) => TypeTag::Double,
            Value::DateTime(_) => TypeTag::DateTime,
            Value::Date(_) => TypeTag::Date,
            Value::String(_) => TypeTag::String,
            Value::Binary(_) => TypeTag::Binary,
            Value::Embedded(_) => TypeTag::Embedded,
            Value::List(_) => TypeTag::List,
            Value::Set(_) => TypeTag::Set,
            Value::Map(_) => TypeTag::Map,
            Value::Link(_) => TypeTag::Link,
            Value::LinkList(_) => TypeTag::LinkList,
            Value::LinkSet(_) => TypeTag::LinkSet,
            Value::LinkMap(_) => TypeTag::LinkMap,
            Value::LinkBag(_) => TypeTag::LinkBag,
            Value::Decimal(_) => TypeTag::Decimal,
        }
    }

    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_defined_tag_roundtrips_through_its_byte() {
        let tags = [
            TypeTag::Boolean,
            TypeTag::Int,
            TypeTag::Short,
            TypeTag::Long,
            TypeTag::Float,
            TypeTag::Double,
            TypeTag::DateTime,
            TypeTag::String,
            TypeTag::Binary,
            TypeTag::Embedded,
            TypeTag::List,
            TypeTag::Set,
            TypeTag::Map,
            TypeTag::Link,
            TypeTag::LinkList,
            TypeTag::LinkSet,
            TypeTag::LinkMap,
            TypeTag::LinkBag,
            TypeTag::Decimal,
            TypeTag::Date,
            TypeTag::Any,
        ];
        for tag in tags {
            assert_eq!(TypeTag::from_byte(tag.as_byte()).unwrap(), tag);
        }
    }

    #[test]
    fn unassigned_bytes_are_rejected() {
        for tag in [18u8, 20, 21, 24, 99, 255] {
            assert_eq!(
                TypeTag::from_byte(tag),
                Err(CodecError::UnknownType { tag })
            );
        }
    }

    #[test]
    fn emission_tags_are_unique_per_kind() {
        assert_eq!(TypeTag::of(&Value::Int(1)).as_byte(), 1);
        assert_eq!(TypeTag::of(&Value::Short(1)).as_byte(), 2);
        assert_eq!(TypeTag::of(&Value::String("x".into())).as_byte(), 7);
        assert_eq!(TypeTag::of(&Value::Date(0)).as_byte(), 22);
        assert_eq!(TypeTag::of(&Value::Null).as_byte(), 23);
    }
}
