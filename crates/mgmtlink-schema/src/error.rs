use crate::opcode::{Direction, OpCode};

/// Errors from operation schema lookups.
///
/// Both variants are parameter errors at the dispatch boundary: callers
/// must not proceed to marshal or parse on a failed lookup.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The raw operation code is outside the defined range.
    #[error("unknown operation code {0}")]
    UnknownOp(i64),

    /// The operation carries no message in this direction.
    #[error("operation {op:?} has no {direction:?} schema")]
    NoSchema { op: OpCode, direction: Direction },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
