//! # RPC Envelope Codec
//!
//! The companion codec for the framing layer: fixed-width and
//! length-prefixed primitive terms, assembled into frames by
//! concatenation. Distinct from the record codec - no varints, no type
//! tags, no headers.

pub mod term;

pub use term::{decode_term, encode_term, encode_term_to_vec, Term, TermKind};
