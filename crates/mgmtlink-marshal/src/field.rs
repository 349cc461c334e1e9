use bytes::Bytes;

/// Wire width of an [`FieldType::Int`] field: `i64`, little-endian.
pub const INT_WIDTH: usize = 8;

/// Wire width of the length prefix on string and data fields: `u32`,
/// little-endian.
pub const LEN_PREFIX_WIDTH: usize = 4;

/// The closed set of wire-level field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Fixed-width signed integer.
    Int,
    /// Length-prefixed text, NUL-terminated on the wire (the prefix counts
    /// the terminator).
    Str,
    /// Length-prefixed binary payload, no terminator; may contain embedded
    /// zero bytes.
    Data,
}

/// One typed field of a control message.
///
/// Built by callers (or literals in tests) to match an operation schema
/// slot-for-slot. Decoded values own their buffers; the engine never
/// retains them after a call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Str(String),
    Data(Bytes),
}

impl FieldValue {
    /// The wire kind of this value.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Int(_) => FieldType::Int,
            FieldValue::Str(_) => FieldType::Str,
            FieldValue::Data(_) => FieldType::Data,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Str(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Str(v)
    }
}

impl From<Bytes> for FieldValue {
    fn from(v: Bytes) -> Self {
        FieldValue::Data(v)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(v: Vec<u8>) -> Self {
        FieldValue::Data(Bytes::from(v))
    }
}
