//! # Record Decoder
//!
//! Parses version-0 binary records back into documents and values.
//!
//! ## Decoding Strategy
//!
//! The header is parsed entry by entry up to its zero terminator, resolving
//! property references against the caller's schema as they appear. Field
//! bodies are then read sequentially in header order: the wire guarantees
//! bodies follow the header in emission order, so the cursor walks them
//! without seeking, and a header offset is consulted only for the null
//! check (offset zero means the field has no body). Records whose stored
//! offsets disagree with their body layout therefore still decode, which
//! matches what servers actually emit under header rewriting.
//!
//! Embedded maps do seek: their value offsets are relative to the start of
//! the map encoding and are validated against the record bounds, failing
//! with `OffsetOutOfRange` when a stored offset points outside the input.
//!
//! A top-level decode consumes the record exactly; bytes remaining after
//! the last field body are reported as `TrailingBytes`.
//!
//! ## Schema Resolution
//!
//! A header entry with a negative length encodes global property id
//! `-(length) - 1`. The schema supplies the field name and the type tag
//! (the entry carries neither); a missing id fails with `UnknownProperty`.

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::encoding::{primitive, varint};
use crate::error::{CodecError, Result};
use crate::records::schema::Schema;
use crate::records::type_tag::TypeTag;
use crate::records::{MAX_NESTING_DEPTH, RECORD_VERSION};
use crate::types::{Decimal, Document, Rid, Value};

/// Decodes a top-level record, schema optional.
pub fn decode_document(data: &[u8], schema: Option<&Schema>) -> Result<Document> {
    let mut pos = 0;
    let version = primitive::read_u8(data, &mut pos)?;
    if version != RECORD_VERSION {
        return Err(CodecError::UnsupportedRecordVersion { got: version });
    }

    let body = &data[1..];
    let mut pos = 0;
    let doc = decode_document_body(body, &mut pos, schema, 0)?;
    if pos < body.len() {
        return Err(CodecError::TrailingBytes {
            remaining: body.len() - pos,
        });
    }
    Ok(doc)
}

/// Parses one value body of the given type and returns the unconsumed tail.
pub fn decode_type(data: &[u8], tag: TypeTag) -> Result<(Value, &[u8])> {
    let mut pos = 0;
    let value = decode_value(data, &mut pos, tag, None, 0)?;
    Ok((value, &data[pos..]))
}

/// One parsed header entry, type resolution deferred for named fields so
/// that the tag byte of a null field is never interpreted.
struct HeaderEntry {
    name: String,
    offset: u32,
    tag: EntryTag,
}

enum EntryTag {
    /// Inline tag byte of a named field.
    Byte(u8),
    /// Declared type of a schema-resolved property.
    Declared(TypeTag),
}

pub(crate) fn decode_document_body(
    data: &[u8],
    pos: &mut usize,
    schema: Option<&Schema>,
    depth: usize,
) -> Result<Document> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(CodecError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }

    let class = match varint::read_signed(data, pos)? {
        -1 => None,
        len if len >= 0 => Some(read_utf8(data, pos, len as usize)?),
        _ => return Err(CodecError::MalformedVarInt),
    };

    let mut entries: SmallVec<[HeaderEntry; 16]> = SmallVec::new();
    loop {
        // the terminator byte 0x00 reads as varint zero
        let len = varint::read_signed(data, pos)?;
        if len == 0 {
            break;
        }
        if len > 0 {
            let name = read_utf8(data, pos, len as usize)?;
            let offset = primitive::read_u32(data, pos)?;
            let tag = primitive::read_u8(data, pos)?;
            entries.push(HeaderEntry {
                name,
                offset,
                tag: EntryTag::Byte(tag),
            });
        } else {
            let id = property_id(len)?;
            let offset = primitive::read_u32(data, pos)?;
            let property = schema
                .and_then(|s| s.property(id))
                .ok_or(CodecError::UnknownProperty { id })?;
            entries.push(HeaderEntry {
                name: property.name.clone(),
                offset,
                tag: EntryTag::Declared(property.ty),
            });
        }
    }

    let mut doc = match class {
        Some(class) => Document::with_class(class),
        None => Document::new(),
    };
    for entry in entries {
        if entry.offset == 0 {
            doc.insert(entry.name, Value::Null);
            continue;
        }
        let tag = match entry.tag {
            EntryTag::Byte(byte) => TypeTag::from_byte(byte)?,
            EntryTag::Declared(tag) => tag,
        };
        let value = decode_value(data, pos, tag, schema, depth)?;
        doc.insert(entry.name, value);
    }
    Ok(doc)
}

/// Maps a negative header length back to a global property id.
fn property_id(len: i64) -> Result<u32> {
    let id = -(len as i128) - 1;
    u32::try_from(id).map_err(|_| CodecError::MalformedVarInt)
}

pub(crate) fn decode_value(
    data: &[u8],
    pos: &mut usize,
    tag: TypeTag,
    schema: Option<&Schema>,
    depth: usize,
) -> Result<Value> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CodecError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }

    Ok(match tag {
        TypeTag::Any => Value::Null,
        TypeTag::Boolean => Value::Boolean(primitive::read_bool(data, pos)?),
        TypeTag::Short => Value::Short(narrow(varint::read_signed(data, pos)?)?),
        TypeTag::Int => Value::Int(narrow(varint::read_signed(data, pos)?)?),
        TypeTag::Long => Value::Long(varint::read_signed(data, pos)?),
        TypeTag::Float => Value::Float(primitive::read_f32(data, pos)?),
        TypeTag::Double => Value::Double(primitive::read_f64(data, pos)?),
        TypeTag::DateTime => Value::DateTime(varint::read_signed(data, pos)?),
        TypeTag::Date => Value::Date(varint::read_signed(data, pos)?),
        TypeTag::String => Value::String(primitive::read_string(data, pos)?),
        TypeTag::Binary => Value::Binary(primitive::read_bytes(data, pos)?.to_vec()),
        TypeTag::Embedded => Value::Embedded(decode_document_body(data, pos, schema, depth + 1)?),
        TypeTag::List => Value::List(decode_elements(data, pos, schema, depth)?),
        TypeTag::Set => {
            let items = decode_elements(data, pos, schema, depth)?;
            let mut unique = Vec::with_capacity(items.len());
            for item in items {
                if !unique.contains(&item) {
                    unique.push(item);
                }
            }
            Value::Set(unique)
        }
        TypeTag::Map => decode_map(data, pos, schema, depth)?,
        TypeTag::Link => Value::Link(read_link(data, pos)?),
        TypeTag::LinkList => {
            let count = read_count(data, pos)?;
            let mut rids = Vec::with_capacity(bounded(count, data.len() - *pos));
            for _ in 0..count {
                rids.push(read_link(data, pos)?);
            }
            Value::LinkList(rids)
        }
        TypeTag::LinkSet => {
            let count = read_count(data, pos)?;
            let mut rids = HashSet::with_capacity(bounded(count, data.len() - *pos));
            for _ in 0..count {
                rids.insert(read_link(data, pos)?);
            }
            Value::LinkSet(rids)
        }
        TypeTag::LinkMap => {
            let count = read_count(data, pos)?;
            let mut map = HashMap::with_capacity(bounded(count, data.len() - *pos));
            for _ in 0..count {
                let key_tag = primitive::read_u8(data, pos)?;
                if key_tag != TypeTag::String.as_byte() {
                    return Err(CodecError::UnknownType { tag: key_tag });
                }
                let key = primitive::read_string(data, pos)?;
                let rid = read_link(data, pos)?;
                map.insert(key, rid);
            }
            Value::LinkMap(map)
        }
        TypeTag::LinkBag => {
            let discriminator = primitive::read_u8(data, pos)?;
            if discriminator != 0x01 {
                return Err(CodecError::TreeLinkBagUnsupported { discriminator });
            }
            let count = primitive::read_u32(data, pos)? as usize;
            let mut rids = Vec::with_capacity(bounded(count, data.len() - *pos));
            for _ in 0..count {
                let cluster_id = primitive::read_u16(data, pos)?;
                let position = primitive::read_u64(data, pos)?;
                rids.push(Rid::new(cluster_id, position));
            }
            Value::LinkBag(rids)
        }
        TypeTag::Decimal => {
            let scale = primitive::read_u32(data, pos)?;
            let len = primitive::read_u32(data, pos)? as usize;
            let end = pos.checked_add(len).ok_or(CodecError::MalformedVarInt)?;
            let bytes = data.get(*pos..end).ok_or_else(|| CodecError::TruncatedInput {
                expected: end - data.len(),
                kind: "decimal body",
            })?;
            *pos = end;
            Value::Decimal(Decimal::from_unscaled_bytes(bytes, scale))
        }
    })
}

fn decode_elements(
    data: &[u8],
    pos: &mut usize,
    schema: Option<&Schema>,
    depth: usize,
) -> Result<Vec<Value>> {
    let count = read_count(data, pos)?;
    // the uniform element type is advisory; elements carry their own tags
    let _uniform = primitive::read_u8(data, pos)?;
    let mut items = Vec::with_capacity(bounded(count, data.len() - *pos));
    for _ in 0..count {
        let tag = TypeTag::from_byte(primitive::read_u8(data, pos)?)?;
        items.push(decode_value(data, pos, tag, schema, depth + 1)?);
    }
    Ok(items)
}

fn decode_map(
    data: &[u8],
    pos: &mut usize,
    schema: Option<&Schema>,
    depth: usize,
) -> Result<Value> {
    let base = *pos;
    let count = read_count(data, pos)?;

    let mut entries: SmallVec<[(String, u32, u8); 8]> = SmallVec::new();
    for _ in 0..count {
        let key_tag = primitive::read_u8(data, pos)?;
        if key_tag != TypeTag::String.as_byte() {
            return Err(CodecError::UnknownType { tag: key_tag });
        }
        let key = primitive::read_string(data, pos)?;
        let offset = primitive::read_u32(data, pos)?;
        let value_tag = primitive::read_u8(data, pos)?;
        entries.push((key, offset, value_tag));
    }

    let mut end = *pos;
    let mut map = HashMap::with_capacity(entries.len());
    for (key, offset, value_tag) in entries {
        if offset == 0 {
            map.insert(key, Value::Null);
            continue;
        }
        let target = base + offset as usize;
        if target >= data.len() {
            return Err(CodecError::OffsetOutOfRange {
                offset: target,
                record_len: data.len(),
            });
        }
        *pos = target;
        let tag = TypeTag::from_byte(value_tag)?;
        let value = decode_value(data, pos, tag, schema, depth + 1)?;
        end = end.max(*pos);
        map.insert(key, value);
    }
    *pos = end;
    Ok(Value::Map(map))
}

fn read_link(data: &[u8], pos: &mut usize) -> Result<Rid> {
    let cluster_id = varint::read_signed(data, pos)?;
    let position = varint::read_signed(data, pos)?;
    Ok(Rid::new(
        u16::try_from(cluster_id).map_err(|_| CodecError::MalformedVarInt)?,
        u64::try_from(position).map_err(|_| CodecError::MalformedVarInt)?,
    ))
}

/// Reads a ZigZag-varint element count, rejecting negatives.
fn read_count(data: &[u8], pos: &mut usize) -> Result<usize> {
    let count = varint::read_signed(data, pos)?;
    usize::try_from(count).map_err(|_| CodecError::MalformedVarInt)
}

/// Caps a wire-supplied count before pre-allocating; each element consumes
/// at least one input byte, so `remaining` bounds any honest count.
fn bounded(count: usize, remaining: usize) -> usize {
    count.min(remaining)
}

/// Reads `len` bytes of UTF-8 at `*pos`.
fn read_utf8(data: &[u8], pos: &mut usize, len: usize) -> Result<String> {
    let end = pos.checked_add(len).ok_or(CodecError::MalformedVarInt)?;
    let bytes = data.get(*pos..end).ok_or_else(|| CodecError::TruncatedInput {
        expected: end - data.len(),
        kind: "string body",
    })?;
    *pos = end;
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| CodecError::InvalidUtf8)
}

/// Narrows a varint-decoded integer into the width its tag requires.
fn narrow<T: TryFrom<i64>>(value: i64) -> Result<T> {
    T::try_from(value).map_err(|_| CodecError::MalformedVarInt)
}
