//! # Primitive Wire Codec
//!
//! Fixed-width and length-prefixed primitives shared by the record codec and
//! the RPC envelope codec:
//!
//! | Primitive | Encoding |
//! |-----------|----------|
//! | short     | 2-byte big-endian two's-complement |
//! | int       | 4-byte big-endian two's-complement |
//! | long      | 8-byte big-endian two's-complement |
//! | float     | 4-byte big-endian IEEE-754 |
//! | double    | 8-byte big-endian IEEE-754 |
//! | boolean   | 1 byte, `0x00` false / `0x01` true |
//! | bytes     | ZigZag-varint length + raw bytes |
//! | string    | ZigZag-varint length + UTF-8 bytes |
//!
//! All readers take `(data, &mut pos)` and advance the cursor past what they
//! consume. Fixed-width reads fail with `TruncatedInput`; booleans outside
//! {0, 1} fail with `InvalidBoolean`; negative byte-string lengths fail with
//! `MalformedVarInt` (the length lives in varint space and is senseless
//! negative).

use crate::encoding::varint;
use crate::error::{CodecError, Result};

macro_rules! fixed_width {
    ($write:ident, $read:ident, $ty:ty, $len:expr, $kind:expr) => {
        #[doc = concat!("Appends a big-endian `", stringify!($ty), "` to `buf`.")]
        pub fn $write(buf: &mut Vec<u8>, value: $ty) {
            buf.extend_from_slice(&value.to_be_bytes());
        }

        #[doc = concat!("Reads a big-endian `", stringify!($ty), "` from `data` at `*pos`.")]
        pub fn $read(data: &[u8], pos: &mut usize) -> Result<$ty> {
            let end = *pos + $len;
            let bytes = data
                .get(*pos..end)
                .ok_or(CodecError::TruncatedInput {
                    expected: end - data.len().min(end),
                    kind: $kind,
                })?;
            *pos = end;
            Ok(<$ty>::from_be_bytes(bytes.try_into().unwrap()))
        }
    };
}

fixed_width!(write_i16, read_i16, i16, 2, "short");
fixed_width!(write_i32, read_i32, i32, 4, "int");
fixed_width!(write_i64, read_i64, i64, 8, "long");
fixed_width!(write_u16, read_u16, u16, 2, "unsigned short");
fixed_width!(write_u32, read_u32, u32, 4, "unsigned int");
fixed_width!(write_u64, read_u64, u64, 8, "unsigned long");

/// Appends a big-endian IEEE-754 single to `buf`.
pub fn write_f32(buf: &mut Vec<u8>, value: f32) {
    buf.extend_from_slice(&value.to_bits().to_be_bytes());
}

/// Reads a big-endian IEEE-754 single from `data` at `*pos`.
pub fn read_f32(data: &[u8], pos: &mut usize) -> Result<f32> {
    read_u32(data, pos).map(f32::from_bits)
}

/// Appends a big-endian IEEE-754 double to `buf`.
pub fn write_f64(buf: &mut Vec<u8>, value: f64) {
    buf.extend_from_slice(&value.to_bits().to_be_bytes());
}

/// Reads a big-endian IEEE-754 double from `data` at `*pos`.
pub fn read_f64(data: &[u8], pos: &mut usize) -> Result<f64> {
    read_u64(data, pos).map(f64::from_bits)
}

/// Appends a single raw byte to `buf`.
pub fn write_u8(buf: &mut Vec<u8>, value: u8) {
    buf.push(value);
}

/// Reads a single raw byte from `data` at `*pos`.
pub fn read_u8(data: &[u8], pos: &mut usize) -> Result<u8> {
    let byte = *data.get(*pos).ok_or(CodecError::TruncatedInput {
        expected: 1,
        kind: "byte",
    })?;
    *pos += 1;
    Ok(byte)
}

/// Appends a boolean byte to `buf`.
pub fn write_bool(buf: &mut Vec<u8>, value: bool) {
    buf.push(u8::from(value));
}

/// Reads a boolean byte from `data` at `*pos`, rejecting anything outside
/// {0, 1}.
pub fn read_bool(data: &[u8], pos: &mut usize) -> Result<bool> {
    let byte = *data.get(*pos).ok_or(CodecError::TruncatedInput {
        expected: 1,
        kind: "boolean",
    })?;
    *pos += 1;
    match byte {
        0x00 => Ok(false),
        0x01 => Ok(true),
        byte => Err(CodecError::InvalidBoolean { byte }),
    }
}

/// Appends a ZigZag-varint length prefix and the raw bytes to `buf`.
pub fn write_bytes(buf: &mut Vec<u8>, value: &[u8]) {
    varint::write_signed(buf, value.len() as i64);
    buf.extend_from_slice(value);
}

/// Appends a length-prefixed UTF-8 string to `buf`.
pub fn write_string(buf: &mut Vec<u8>, value: &str) {
    write_bytes(buf, value.as_bytes());
}

/// Reads a length-prefixed byte string from `data` at `*pos`.
pub fn read_bytes<'a>(data: &'a [u8], pos: &mut usize) -> Result<&'a [u8]> {
    let len = varint::read_signed(data, pos)?;
    let len = usize::try_from(len).map_err(|_| CodecError::MalformedVarInt)?;
    let end = pos.checked_add(len).ok_or(CodecError::MalformedVarInt)?;
    let bytes = data.get(*pos..end).ok_or_else(|| CodecError::TruncatedInput {
        expected: end - data.len(),
        kind: "byte string body",
    })?;
    *pos = end;
    Ok(bytes)
}

/// Reads a length-prefixed UTF-8 string from `data` at `*pos`.
pub fn read_string(data: &[u8], pos: &mut usize) -> Result<String> {
    let bytes = read_bytes(data, pos)?;
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| CodecError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_integers_are_big_endian() {
        let mut buf = Vec::new();
        write_i16(&mut buf, 0x0102);
        write_i32(&mut buf, 0x03040506);
        write_i64(&mut buf, 0x0708090A0B0C0D0E);
        assert_eq!(
            buf,
            [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E]
        );
    }

    #[test]
    fn negative_integers_roundtrip() {
        let mut buf = Vec::new();
        write_i16(&mut buf, -2);
        write_i32(&mut buf, -70000);
        write_i64(&mut buf, i64::MIN);

        let mut pos = 0;
        assert_eq!(read_i16(&buf, &mut pos).unwrap(), -2);
        assert_eq!(read_i32(&buf, &mut pos).unwrap(), -70000);
        assert_eq!(read_i64(&buf, &mut pos).unwrap(), i64::MIN);
        assert_eq!(pos, buf.len());
    }

    #[test]
    fn floats_preserve_bits() {
        let mut buf = Vec::new();
        write_f32(&mut buf, 1.5);
        write_f64(&mut buf, -2.25);

        let mut pos = 0;
        assert_eq!(read_f32(&buf, &mut pos).unwrap(), 1.5);
        assert_eq!(read_f64(&buf, &mut pos).unwrap(), -2.25);
    }

    #[test]
    fn truncated_fixed_width_reports_missing_bytes() {
        let mut pos = 0;
        let err = read_i32(&[0x00, 0x01], &mut pos).unwrap_err();
        assert_eq!(
            err,
            CodecError::TruncatedInput {
                expected: 2,
                kind: "int"
            }
        );
    }

    #[test]
    fn boolean_rejects_other_bytes() {
        let mut pos = 0;
        assert!(read_bool(&[0x00], &mut pos).unwrap() == false);
        let mut pos = 0;
        assert!(read_bool(&[0x01], &mut pos).unwrap());
        let mut pos = 0;
        assert_eq!(
            read_bool(&[0x02], &mut pos),
            Err(CodecError::InvalidBoolean { byte: 0x02 })
        );
    }

    #[test]
    fn strings_roundtrip_with_zigzag_length() {
        let mut buf = Vec::new();
        write_string(&mut buf, "hello");
        assert_eq!(buf[0], 0x0A); // zigzag(5)
        assert_eq!(&buf[1..], b"hello");

        let mut pos = 0;
        assert_eq!(read_string(&buf, &mut pos).unwrap(), "hello");
        assert_eq!(pos, buf.len());
    }

    #[test]
    fn empty_string_is_single_zero_byte() {
        let mut buf = Vec::new();
        write_string(&mut buf, "");
        assert_eq!(buf, [0x00]);

        let mut pos = 0;
        assert_eq!(read_string(&buf, &mut pos).unwrap(), "");
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let mut buf = Vec::new();
        write_bytes(&mut buf, &[0xFF, 0xFE]);
        let mut pos = 0;
        assert_eq!(read_string(&buf, &mut pos), Err(CodecError::InvalidUtf8));
    }

    #[test]
    fn byte_string_rejects_negative_length() {
        // zigzag(-3) = 5
        let buf = [0x05, 0xAA, 0xBB, 0xCC];
        let mut pos = 0;
        assert_eq!(
            read_bytes(&buf, &mut pos),
            Err(CodecError::MalformedVarInt)
        );
    }

    #[test]
    fn byte_string_rejects_truncated_body() {
        let mut buf = Vec::new();
        write_bytes(&mut buf, &[1, 2, 3, 4]);
        buf.truncate(3);
        let mut pos = 0;
        assert!(matches!(
            read_bytes(&buf, &mut pos),
            Err(CodecError::TruncatedInput { .. })
        ));
    }
}
