//! # ArcusDB Client - Record Serialization Core
//!
//! This crate is the serialization heart of the ArcusDB client: it
//! translates between a Rust-native value universe (documents, links,
//! scalars, collections, identifier bags) and ArcusDB's version-0 binary
//! record format, byte-exact in both directions. A small companion codec
//! handles the fixed-width primitive terms of the RPC envelope.
//!
//! ## Quick Start
//!
//! ```
//! use arcus_client::records::{decode_document, encode_document};
//! use arcus_client::types::{Document, Rid};
//!
//! let mut doc = Document::with_class("Person");
//! doc.insert("name", "Ada");
//! doc.insert("age", 36i32);
//! doc.insert("manager", Rid::new(12, 0));
//!
//! let bytes = encode_document(&doc).unwrap();
//! assert_eq!(decode_document(&bytes, None).unwrap(), doc);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------+
//! |        Client API (out of this crate)       |
//! +---------------------+----------------------+
//! |   Record Codec      |   Envelope Codec     |
//! |   (records)         |   (protocol)         |
//! +---------------------+----------------------+
//! |   Value Universe (types)                   |
//! +--------------------------------------------+
//! |   Wire Primitives (encoding)               |
//! +--------------------------------------------+
//! ```
//!
//! Connection handling, command dispatch, and query execution live above
//! this crate and interact with it only through byte slices.
//!
//! ## Module Overview
//!
//! - [`types`]: `Value`, `Document`, `Rid`, `Decimal`
//! - [`encoding`]: varints, ZigZag, big-endian primitives
//! - [`records`]: the two-pass record encoder and the schema-aware decoder
//! - [`protocol`]: RPC envelope terms
//! - [`error`]: the `CodecError` taxonomy
//!
//! ## Guarantees
//!
//! - Pure and synchronous: every operation is a total or fallible function
//!   of its inputs; no I/O, no global state, safe to call from any thread
//! - Byte-exact round-trips for every supported value kind (unordered
//!   collections compare by membership)
//! - Typed errors for every malformed input; no panics on wire data

pub mod encoding;
pub mod error;
pub mod protocol;
pub mod records;
pub mod types;

pub use error::{CodecError, Result};
pub use records::{
    decode_document, decode_type, encode_document, encode_value, Property, Schema, TypeTag,
};
pub use types::{Decimal, Document, Rid, Value};
