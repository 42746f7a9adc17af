//! # RPC Envelope Terms
//!
//! The framing layer speaks a much simpler dialect than records: fixed-width
//! big-endian integers and 4-byte length-prefixed byte strings, no varints,
//! no headers. This module encodes and decodes those terms.
//!
//! ## Encoding
//!
//! | Term | Encoding |
//! |------|----------|
//! | boolean | 1 byte |
//! | null | lone 4-byte big-endian length of -1 |
//! | short / int / long | fixed-width big-endian of the tagged width |
//! | string / bytes | 4-byte big-endian length + bytes |
//! | raw | the bytes verbatim, no length prefix |
//! | sequence | concatenation of the encoded members |
//!
//! Plain Rust integers convert to `Term::Int` (4-byte); the wider and
//! narrower widths need the explicit `Term::Long` / `Term::Short` forms.
//! Sequences let callers assemble a frame from parts before flattening it
//! to the socket; encoding a sequence is exactly the concatenation of
//! encoding its members.
//!
//! ## Decoding
//!
//! Terms are not self-describing, so `decode_term` takes the expected
//! [`TermKind`] and returns the parsed term plus the unconsumed tail.
//! Length-prefixed kinds decode a -1 length to `Term::Null`.

use crate::encoding::primitive;
use crate::error::{CodecError, Result};

/// A value on the RPC envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Null,
    Bool(bool),
    Short(i16),
    Int(i32),
    Long(i64),
    String(String),
    Bytes(Vec<u8>),
    /// Pre-encoded bytes spliced into the frame verbatim.
    Raw(Vec<u8>),
    /// A run of terms encoded back to back.
    Sequence(Vec<Term>),
}

/// Expected wire shape for [`decode_term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Bool,
    Short,
    Int,
    Long,
    String,
    Bytes,
}

/// Appends the encoded form of `term` to `buf`.
pub fn encode_term(term: &Term, buf: &mut Vec<u8>) {
    match term {
        Term::Null => primitive::write_i32(buf, -1),
        Term::Bool(v) => primitive::write_bool(buf, *v),
        Term::Short(v) => primitive::write_i16(buf, *v),
        Term::Int(v) => primitive::write_i32(buf, *v),
        Term::Long(v) => primitive::write_i64(buf, *v),
        Term::String(s) => {
            primitive::write_i32(buf, s.len() as i32);
            buf.extend_from_slice(s.as_bytes());
        }
        Term::Bytes(b) => {
            primitive::write_i32(buf, b.len() as i32);
            buf.extend_from_slice(b);
        }
        Term::Raw(b) => buf.extend_from_slice(b),
        Term::Sequence(terms) => {
            for term in terms {
                encode_term(term, buf);
            }
        }
    }
}

/// Encodes a term into a fresh buffer.
pub fn encode_term_to_vec(term: &Term) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_term(term, &mut buf);
    buf
}

/// Decodes one term of the expected kind, returning the unconsumed tail.
pub fn decode_term(data: &[u8], kind: TermKind) -> Result<(Term, &[u8])> {
    let mut pos = 0;
    let term = match kind {
        TermKind::Bool => Term::Bool(primitive::read_bool(data, &mut pos)?),
        TermKind::Short => Term::Short(primitive::read_i16(data, &mut pos)?),
        TermKind::Int => Term::Int(primitive::read_i32(data, &mut pos)?),
        TermKind::Long => Term::Long(primitive::read_i64(data, &mut pos)?),
        TermKind::String => match read_prefixed(data, &mut pos)? {
            None => Term::Null,
            Some(bytes) => Term::String(
                std::str::from_utf8(bytes)
                    .map(str::to_owned)
                    .map_err(|_| CodecError::InvalidUtf8)?,
            ),
        },
        TermKind::Bytes => match read_prefixed(data, &mut pos)? {
            None => Term::Null,
            Some(bytes) => Term::Bytes(bytes.to_vec()),
        },
    };
    Ok((term, &data[pos..]))
}

/// Reads a 4-byte length-prefixed byte string; a length of -1 is null.
fn read_prefixed<'a>(data: &'a [u8], pos: &mut usize) -> Result<Option<&'a [u8]>> {
    let len = primitive::read_i32(data, pos)?;
    if len == -1 {
        return Ok(None);
    }
    let len = usize::try_from(len).map_err(|_| CodecError::TruncatedInput {
        expected: 0,
        kind: "envelope length prefix",
    })?;
    let end = *pos + len;
    let bytes = data.get(*pos..end).ok_or_else(|| CodecError::TruncatedInput {
        expected: end - data.len(),
        kind: "envelope body",
    })?;
    *pos = end;
    Ok(Some(bytes))
}

impl From<bool> for Term {
    fn from(v: bool) -> Self {
        Term::Bool(v)
    }
}

impl From<i16> for Term {
    fn from(v: i16) -> Self {
        Term::Short(v)
    }
}

impl From<i32> for Term {
    fn from(v: i32) -> Self {
        Term::Int(v)
    }
}

impl From<i64> for Term {
    fn from(v: i64) -> Self {
        Term::Long(v)
    }
}

impl From<&str> for Term {
    fn from(v: &str) -> Self {
        Term::String(v.to_owned())
    }
}

impl From<String> for Term {
    fn from(v: String) -> Self {
        Term::String(v)
    }
}

impl From<Vec<u8>> for Term {
    fn from(v: Vec<u8>) -> Self {
        Term::Bytes(v)
    }
}

impl From<Vec<Term>> for Term {
    fn from(v: Vec<Term>) -> Self {
        Term::Sequence(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booleans_are_single_bytes() {
        assert_eq!(encode_term_to_vec(&Term::Bool(true)), [0x01]);
        assert_eq!(encode_term_to_vec(&Term::Bool(false)), [0x00]);

        let (term, tail) = decode_term(&[0x01, 0xFF], TermKind::Bool).unwrap();
        assert_eq!(term, Term::Bool(true));
        assert_eq!(tail, [0xFF]);
    }

    #[test]
    fn null_is_a_lone_negative_length() {
        assert_eq!(encode_term_to_vec(&Term::Null), [0xFF, 0xFF, 0xFF, 0xFF]);

        let (term, tail) = decode_term(&[0xFF, 0xFF, 0xFF, 0xFF], TermKind::String).unwrap();
        assert_eq!(term, Term::Null);
        assert!(tail.is_empty());

        let (term, _) = decode_term(&[0xFF, 0xFF, 0xFF, 0xFF], TermKind::Bytes).unwrap();
        assert_eq!(term, Term::Null);
    }

    #[test]
    fn tagged_widths_use_fixed_big_endian() {
        assert_eq!(encode_term_to_vec(&Term::Short(-2)), [0xFF, 0xFE]);
        assert_eq!(
            encode_term_to_vec(&Term::Int(258)),
            [0x00, 0x00, 0x01, 0x02]
        );
        assert_eq!(
            encode_term_to_vec(&Term::Long(1)),
            [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01]
        );
    }

    #[test]
    fn plain_integers_default_to_int() {
        assert_eq!(Term::from(7i32), Term::Int(7));
        assert_eq!(encode_term_to_vec(&Term::from(7i32)).len(), 4);
    }

    #[test]
    fn strings_carry_a_four_byte_length() {
        let encoded = encode_term_to_vec(&Term::from("ok"));
        assert_eq!(encoded, [0x00, 0x00, 0x00, 0x02, 0x6F, 0x6B]);

        let (term, tail) = decode_term(&encoded, TermKind::String).unwrap();
        assert_eq!(term, Term::String("ok".into()));
        assert!(tail.is_empty());
    }

    #[test]
    fn bytes_roundtrip() {
        let encoded = encode_term_to_vec(&Term::Bytes(vec![1, 2, 3]));
        let (term, _) = decode_term(&encoded, TermKind::Bytes).unwrap();
        assert_eq!(term, Term::Bytes(vec![1, 2, 3]));
    }

    #[test]
    fn raw_is_spliced_verbatim() {
        let encoded = encode_term_to_vec(&Term::Raw(vec![0xDE, 0xAD, 0xBE, 0xEF]));
        assert_eq!(encoded, [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn sequences_concatenate_members() {
        let frame = Term::Sequence(vec![
            Term::Bool(true),
            Term::from("db"),
            Term::Null,
            Term::Raw(vec![0x99]),
        ]);
        let encoded = encode_term_to_vec(&frame);

        let mut expected = vec![0x01];
        expected.extend_from_slice(&[0x00, 0x00, 0x00, 0x02, 0x64, 0x62]);
        expected.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
        expected.push(0x99);
        assert_eq!(encoded, expected);
    }

    #[test]
    fn nested_sequences_flatten() {
        let frame = Term::Sequence(vec![
            Term::Sequence(vec![Term::Short(1), Term::Short(2)]),
            Term::Short(3),
        ]);
        assert_eq!(
            encode_term_to_vec(&frame),
            [0x00, 0x01, 0x00, 0x02, 0x00, 0x03]
        );
    }

    #[test]
    fn fixed_width_terms_roundtrip_with_tail() {
        let mut buf = encode_term_to_vec(&Term::Long(-42));
        buf.extend_from_slice(&[0x77]);

        let (term, tail) = decode_term(&buf, TermKind::Long).unwrap();
        assert_eq!(term, Term::Long(-42));
        assert_eq!(tail, [0x77]);
    }

    #[test]
    fn truncated_terms_are_rejected() {
        assert!(matches!(
            decode_term(&[0x00, 0x01], TermKind::Int).unwrap_err(),
            CodecError::TruncatedInput { .. }
        ));
        assert!(matches!(
            decode_term(&[0x00, 0x00, 0x00, 0x05, 0x61], TermKind::String).unwrap_err(),
            CodecError::TruncatedInput { .. }
        ));
    }

    #[test]
    fn negative_lengths_other_than_null_are_rejected() {
        // length -2
        let bytes = [0xFF, 0xFF, 0xFF, 0xFE];
        assert!(decode_term(&bytes, TermKind::Bytes).is_err());
    }

    #[test]
    fn invalid_boolean_byte_is_rejected() {
        assert_eq!(
            decode_term(&[0x07], TermKind::Bool).unwrap_err(),
            CodecError::InvalidBoolean { byte: 0x07 }
        );
    }
}
