//! # Record Encoder
//!
//! Turns documents and values into the version-0 binary record format.
//!
//! ## Record Layout
//!
//! ```text
//! +---------+--------------+------------------------+------+--------------+
//! | version | class prefix | header entries ... 0x00 | data bodies ...   |
//! | (1B)    | varint + str | name/offset/tag each    | offset-addressed  |
//! +---------+--------------+------------------------+------+--------------+
//! ```
//!
//! Header offsets are 4-byte big-endian positions measured from the start
//! of the document body (the class prefix); the top-level version byte sits
//! outside the body. An embedded document is the same body layout inlined
//! without a version byte, so its offsets are measured from its own start.
//!
//! ## Two-Pass Offset Fixup
//!
//! The encoder writes the header with zeroed placeholder offsets, remembers
//! each placeholder position, then emits the field bodies in header order
//! and patches the placeholders with the final positions. Null fields keep
//! offset zero and contribute no data bytes. Embedded maps use the same
//! scheme within their own sub-encoding.
//!
//! ## Determinism
//!
//! Document fields and map entries are emitted in sorted key order. The
//! wire contract does not require any order; sorting just makes output
//! reproducible for fixtures and interop testing. Set elements are
//! deduplicated before the count is written.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::encoding::{primitive, varint};
use crate::error::{CodecError, Result};
use crate::records::type_tag::TypeTag;
use crate::records::{MAX_NESTING_DEPTH, RECORD_VERSION};
use crate::types::{Document, Rid, Value};

/// Encodes a top-level record, version byte included.
pub fn encode_document(doc: &Document) -> Result<Vec<u8>> {
    let body = encode_document_body(doc, 0)?;
    let mut buf = Vec::with_capacity(body.len() + 1);
    buf.push(RECORD_VERSION);
    buf.extend_from_slice(&body);
    Ok(buf)
}

/// Encodes the body of a single value, without its type tag.
///
/// This is the value-kind dispatch for callers working outside a document
/// frame; [`crate::records::decode_type`] is its inverse.
pub fn encode_value(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_value_into(value, &mut buf, 0)?;
    Ok(buf)
}

/// Encodes a document body: class prefix, header, data region.
pub(crate) fn encode_document_body(doc: &Document, depth: usize) -> Result<Vec<u8>> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(CodecError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }

    let mut buf = Vec::new();

    match doc.class() {
        Some(class) => primitive::write_string(&mut buf, class),
        None => varint::write_signed(&mut buf, -1),
    }

    let mut fields: Vec<(&str, &Value)> = doc.fields().collect();
    fields.sort_unstable_by_key(|(name, _)| *name);

    let mut pending: SmallVec<[(usize, &Value); 16]> = SmallVec::new();
    for &(name, value) in &fields {
        if name.is_empty() {
            return Err(CodecError::EmptyFieldName);
        }
        primitive::write_string(&mut buf, name);
        let fixup = buf.len();
        buf.extend_from_slice(&[0u8; 4]);
        if value.is_null() {
            // offset stays zero; the tag is ignored on decode
            buf.push(0);
        } else {
            buf.push(TypeTag::of(value).as_byte());
            pending.push((fixup, value));
        }
    }
    buf.push(0x00);

    for (fixup, value) in pending {
        let offset = buf.len() as u32;
        buf[fixup..fixup + 4].copy_from_slice(&offset.to_be_bytes());
        encode_value_into(value, &mut buf, depth)?;
    }

    Ok(buf)
}

fn write_link(buf: &mut Vec<u8>, rid: &Rid) {
    varint::write_signed(buf, i64::from(rid.cluster_id));
    varint::write_signed(buf, rid.position as i64);
}

pub(crate) fn encode_value_into(value: &Value, buf: &mut Vec<u8>, depth: usize) -> Result<()> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CodecError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }

    match value {
        Value::Null => {}
        Value::Boolean(v) => primitive::write_bool(buf, *v),
        Value::Short(v) => varint::write_signed(buf, i64::from(*v)),
        Value::Int(v) => varint::write_signed(buf, i64::from(*v)),
        Value::Long(v) => varint::write_signed(buf, *v),
        Value::Float(v) => primitive::write_f32(buf, *v),
        Value::Double(v) => primitive::write_f64(buf, *v),
        Value::DateTime(ms) => varint::write_signed(buf, *ms),
        Value::Date(days) => varint::write_signed(buf, *days),
        Value::String(s) => primitive::write_string(buf, s),
        Value::Binary(b) => primitive::write_bytes(buf, b),
        Value::Embedded(doc) => {
            let body = encode_document_body(doc, depth + 1)?;
            buf.extend_from_slice(&body);
        }
        Value::List(items) => encode_elements(items.iter(), items.len(), buf, depth)?,
        Value::Set(items) => {
            let mut unique: Vec<&Value> = Vec::with_capacity(items.len());
            for item in items {
                if !unique.contains(&item) {
                    unique.push(item);
                }
            }
            let count = unique.len();
            encode_elements(unique.into_iter(), count, buf, depth)?;
        }
        Value::Map(map) => encode_map(map, buf, depth)?,
        Value::Link(rid) => write_link(buf, rid),
        Value::LinkList(rids) => {
            varint::write_signed(buf, rids.len() as i64);
            for rid in rids {
                write_link(buf, rid);
            }
        }
        Value::LinkSet(rids) => {
            varint::write_signed(buf, rids.len() as i64);
            for rid in rids {
                write_link(buf, rid);
            }
        }
        Value::LinkMap(map) => {
            let mut entries: Vec<(&String, &Rid)> = map.iter().collect();
            entries.sort_unstable_by_key(|(key, _)| *key);
            varint::write_signed(buf, entries.len() as i64);
            for (key, rid) in entries {
                primitive::write_u8(buf, TypeTag::String.as_byte());
                primitive::write_string(buf, key);
                write_link(buf, rid);
            }
        }
        Value::LinkBag(rids) => {
            // embedded form only; the tree form is never produced
            primitive::write_u8(buf, 0x01);
            primitive::write_u32(buf, rids.len() as u32);
            for rid in rids {
                primitive::write_u16(buf, rid.cluster_id);
                primitive::write_u64(buf, rid.position);
            }
        }
        Value::Decimal(d) => {
            primitive::write_u32(buf, d.scale());
            primitive::write_u32(buf, d.unscaled_bytes().len() as u32);
            buf.extend_from_slice(d.unscaled_bytes());
        }
    }
    Ok(())
}

fn encode_elements<'a>(
    items: impl Iterator<Item = &'a Value>,
    count: usize,
    buf: &mut Vec<u8>,
    depth: usize,
) -> Result<()> {
    varint::write_signed(buf, count as i64);
    primitive::write_u8(buf, TypeTag::Any.as_byte());
    for item in items {
        primitive::write_u8(buf, TypeTag::of(item).as_byte());
        encode_value_into(item, buf, depth + 1)?;
    }
    Ok(())
}

fn encode_map(map: &HashMap<String, Value>, buf: &mut Vec<u8>, depth: usize) -> Result<()> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_unstable_by_key(|(key, _)| *key);

    // offsets are relative to the start of the map encoding, so the map is
    // built in its own buffer and appended whole
    let mut sub = Vec::new();
    varint::write_signed(&mut sub, entries.len() as i64);

    let mut pending: SmallVec<[(usize, &Value); 16]> = SmallVec::new();
    for &(key, value) in &entries {
        primitive::write_u8(&mut sub, TypeTag::String.as_byte());
        primitive::write_string(&mut sub, key);
        let fixup = sub.len();
        sub.extend_from_slice(&[0u8; 4]);
        if value.is_null() {
            sub.push(0);
        } else {
            sub.push(TypeTag::of(value).as_byte());
            pending.push((fixup, value));
        }
    }

    for (fixup, value) in pending {
        let offset = sub.len() as u32;
        sub[fixup..fixup + 4].copy_from_slice(&offset.to_be_bytes());
        encode_value_into(value, &mut sub, depth + 1)?;
    }

    buf.extend_from_slice(&sub);
    Ok(())
}
