//! # Client Type System
//!
//! The value universe shared by the record codec and the client API:
//!
//! - `value`: the closed `Value` enum, one variant per wire type
//! - `document`: `Document`, a class name plus named fields
//! - `rid`: `Rid`, the `(cluster, position)` record identifier
//! - `decimal`: `Decimal`, arbitrary-precision scaled decimals
//!
//! All types here are plain values: structural equality, no wire logic, no
//! retained references into the database.

pub mod decimal;
pub mod document;
pub mod rid;
pub mod value;

pub use decimal::{Decimal, ParseDecimalError};
pub use document::Document;
pub use rid::{ParseRidError, Rid};
pub use value::Value;
