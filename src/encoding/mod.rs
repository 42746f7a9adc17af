//! # Encoding Module
//!
//! Low-level wire primitives shared by the record codec and the RPC envelope
//! codec:
//!
//! - **VarInt encoding**: unsigned LEB128 and the ZigZag signed mapping
//! - **Primitive codec**: big-endian fixed-width integers and floats,
//!   length-prefixed byte strings, booleans

pub mod primitive;
pub mod varint;
