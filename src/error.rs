//! # Codec Error Taxonomy
//!
//! This module defines `CodecError`, the single error type reported by the
//! record serialization core and the envelope term codec. Every variant
//! carries enough structured context for upstream reporting; the message
//! rendered through `Display` is human-readable on its own.
//!
//! The codec does not attempt recovery: one error aborts the current encode
//! or decode call. No variant is ever swallowed or downgraded.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors reported by the record and envelope codecs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The record's leading version byte is not a version this core speaks.
    #[error("unsupported record serialization version {got}, only version 0 is supported")]
    UnsupportedRecordVersion { got: u8 },

    /// A varint was truncated, overlong, or carried a value that does not
    /// fit the width its context requires.
    #[error("malformed varint: truncated, overlong, or out of range for its context")]
    MalformedVarInt,

    /// A value-type tag outside the defined set.
    #[error("unknown value type tag {tag}")]
    UnknownType { tag: u8 },

    /// A header referenced a global property id the supplied schema does
    /// not define.
    #[error("header references unknown global property id {id}")]
    UnknownProperty { id: u32 },

    /// A link bag whose leading discriminator selects the tree form.
    #[error("tree-based link bags are not supported (discriminator 0x{discriminator:02X})")]
    TreeLinkBagUnsupported { discriminator: u8 },

    /// Not enough bytes remained to satisfy a fixed-width read.
    #[error("truncated input: needed {expected} more byte(s) for {kind}")]
    TruncatedInput { expected: usize, kind: &'static str },

    /// A string body that is not valid UTF-8.
    #[error("string body is not valid UTF-8")]
    InvalidUtf8,

    /// A boolean body outside {0, 1}.
    #[error("invalid boolean byte 0x{byte:02X}")]
    InvalidBoolean { byte: u8 },

    /// A header or map offset pointing beyond the record.
    #[error("offset {offset} out of range for record of {record_len} byte(s)")]
    OffsetOutOfRange { offset: usize, record_len: usize },

    /// Bytes left over after a top-level record was fully decoded.
    #[error("{remaining} trailing byte(s) after record end")]
    TrailingBytes { remaining: usize },

    /// Value nesting beyond the recursion limit, on encode or decode.
    #[error("value nesting exceeds the maximum depth of {max}")]
    NestingTooDeep { max: usize },

    /// A document field with an empty name; the header encodes names with a
    /// positive length, and a zero length is the header terminator.
    #[error("document field names must be non-empty")]
    EmptyFieldName,
}
