//! # Record Serialization
//!
//! The version-0 binary record codec: documents and typed values to bytes
//! and back, byte-exact.
//!
//! ## Record Binary Layout
//!
//! ```text
//! +---------+--------------+---------------------------+---------------+
//! | version | class prefix | header ........... | 0x00 | data bodies   |
//! | (1B)    | varint + str | entries                   | offset-addr.  |
//! +---------+--------------+---------------------------+---------------+
//! ```
//!
//! | Component | Encoding |
//! |-----------|----------|
//! | **version** | single byte, always 0 |
//! | **class prefix** | ZigZag-varint length + UTF-8; length -1 = absent |
//! | **header entry** | name + 4-byte offset + type tag, or negative property reference + offset |
//! | **terminator** | single `0x00` byte |
//! | **data** | field bodies in header order; null fields have offset 0 and no body |
//!
//! Embedded documents repeat the body layout without a version byte. The
//! document and value codecs are mutually recursive, bounded by
//! [`MAX_NESTING_DEPTH`].
//!
//! ## Module Structure
//!
//! - `type_tag`: single-byte wire discriminants for every value kind
//! - `schema`: global property lookup consumed during decode
//! - `encoder`: two-pass encode with header offset fixup
//! - `decoder`: header parse plus sequential body decode

pub mod decoder;
pub mod encoder;
pub mod schema;
pub mod type_tag;


pub use decoder::{decode_document, decode_type};
pub use encoder::{encode_document, encode_value};
pub use schema::{Property, Schema};
pub use type_tag::TypeTag;

/// The only record serialization version this core emits or accepts.
pub const RECORD_VERSION: u8 = 0;

/// Maximum depth of nested values before encode/decode gives up instead of
/// risking stack exhaustion on pathological input.
pub const MAX_NESTING_DEPTH: usize = 32;
