//! Fuzz testing for the record decoder.
//!
//! Feeds arbitrary byte sequences and schemas to `decode_document` and
//! `decode_type` to ensure malformed input always fails with a typed error
//! instead of panicking, and that anything that decodes re-encodes without
//! panicking.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use arcus_client::records::{decode_document, decode_type, encode_document, Schema, TypeTag};

#[derive(Debug, Arbitrary)]
struct DecoderInput {
    record: Vec<u8>,
    properties: Vec<(u32, String, FuzzTypeTag)>,
    standalone_tag: u8,
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzTypeTag {
    Boolean,
    Int,
    Long,
    String,
    Embedded,
    List,
    Map,
    Link,
    LinkBag,
    Decimal,
}

impl From<FuzzTypeTag> for TypeTag {
    fn from(tag: FuzzTypeTag) -> Self {
        match tag {
            FuzzTypeTag::Boolean => TypeTag::Boolean,
            FuzzTypeTag::Int => TypeTag::Int,
            FuzzTypeTag::Long => TypeTag::Long,
            FuzzTypeTag::String => TypeTag::String,
            FuzzTypeTag::Embedded => TypeTag::Embedded,
            FuzzTypeTag::List => TypeTag::List,
            FuzzTypeTag::Map => TypeTag::Map,
            FuzzTypeTag::Link => TypeTag::Link,
            FuzzTypeTag::LinkBag => TypeTag::LinkBag,
            FuzzTypeTag::Decimal => TypeTag::Decimal,
        }
    }
}

fuzz_target!(|input: DecoderInput| {
    let mut schema = Schema::new();
    for (id, name, tag) in &input.properties {
        schema.define(*id, name.clone(), (*tag).into());
    }

    if let Ok(doc) = decode_document(&input.record, Some(&schema)) {
        // anything that decodes must re-encode cleanly
        let _ = encode_document(&doc);
    }
    let _ = decode_document(&input.record, None);

    if let Ok(tag) = TypeTag::from_byte(input.standalone_tag) {
        let _ = decode_type(&input.record, tag);
    }
});
