//! Operation codes and field schemas for the management control protocol.
//!
//! Each logical operation has a fixed, statically declared field sequence
//! for its request and, independently, for its response. The tables are
//! built once, validated at construction, and never mutated, so lookups
//! are safe from any thread.
//!
//! An empty field sequence is a sentinel: the operation carries no message
//! in that direction (fire-and-forget notifications have no response).

pub mod error;
pub mod opcode;
pub mod registry;

pub use error::{Result, SchemaError};
pub use opcode::{Direction, OpCode};
pub use registry::{registry, OperationSchema, SchemaRegistry};
