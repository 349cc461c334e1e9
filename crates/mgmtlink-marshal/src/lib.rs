//! Schema-driven binary marshalling for management control messages.
//!
//! Every control message is a fixed sequence of typed fields dictated by
//! its operation schema. This crate implements the wire encoding of those
//! fields and the two-pass measure/encode discipline:
//!
//! - [`measure`] computes the exact encoded length of a value list.
//! - [`encode`] writes the same value list into a caller-supplied buffer.
//! - [`decode`] walks a received buffer in schema order, validating bounds
//!   at every step.
//!
//! `measure` and `encode` called with identical inputs always agree
//! byte-for-byte, which is what makes single-allocation framing (length
//! header plus payload in one buffer) safe.
//!
//! Wire convention, applied uniformly: integers are `i64` little-endian;
//! length prefixes are `u32` little-endian; strings carry a trailing NUL
//! counted in their length prefix; opaque data carries no terminator.

pub mod decode;
pub mod encode;
pub mod error;
pub mod field;

pub use decode::decode;
pub use encode::{encode, encode_to_vec, measure};
pub use error::{MarshalError, Result};
pub use field::{FieldType, FieldValue, INT_WIDTH, LEN_PREFIX_WIDTH};
