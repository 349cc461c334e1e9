use crate::field::FieldType;

/// Errors raised while marshalling or unmarshalling a field list.
///
/// Every variant is a parameter error in the protocol's taxonomy: it
/// signals caller misuse (schema/value mismatch) or a malformed buffer
/// from the peer, never a transport fault.
#[derive(Debug, thiserror::Error)]
pub enum MarshalError {
    /// The value list does not have the field count the schema requires.
    #[error("field count mismatch (schema has {expected}, got {actual})")]
    ArityMismatch { expected: usize, actual: usize },

    /// A value's type disagrees with the schema at its position.
    #[error("field {index}: type mismatch (schema says {expected:?}, value is {actual:?})")]
    TypeMismatch {
        index: usize,
        expected: FieldType,
        actual: FieldType,
    },

    /// The output buffer is too small for the field being written.
    #[error("field {index}: output buffer exhausted ({needed} bytes needed, {available} left)")]
    BufferExhausted {
        index: usize,
        needed: usize,
        available: usize,
    },

    /// The input buffer ended inside the field being read.
    #[error("field {index}: truncated input ({needed} bytes needed, {available} left)")]
    Truncated {
        index: usize,
        needed: usize,
        available: usize,
    },

    /// A string length prefix of zero leaves no room for the terminator.
    #[error("field {index}: zero-length string prefix (no room for NUL terminator)")]
    ZeroStringLength { index: usize },

    /// A string field's final byte is not NUL.
    #[error("field {index}: string is not NUL-terminated")]
    MissingTerminator { index: usize },

    /// A string value contains an interior NUL and cannot go on the wire.
    #[error("field {index}: string contains interior NUL")]
    InteriorNul { index: usize },

    /// A decoded string is not valid UTF-8.
    #[error("field {index}: string is not valid UTF-8")]
    InvalidUtf8 { index: usize },

    /// A string or data payload exceeds what a u32 length prefix can carry.
    #[error("field {index}: payload too long for length prefix ({len} bytes)")]
    FieldTooLong { index: usize, len: usize },

    /// A whole message exceeds what a u32 frame header can carry.
    #[error("message too long for frame header ({len} bytes)")]
    MessageTooLong { len: usize },
}

pub type Result<T> = std::result::Result<T, MarshalError>;
