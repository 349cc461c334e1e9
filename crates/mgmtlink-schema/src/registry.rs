use std::collections::HashMap;
use std::sync::OnceLock;

use mgmtlink_marshal::FieldType;

use crate::error::{Result, SchemaError};
use crate::opcode::{Direction, OpCode};

use FieldType::{Data, Int, Str};

/// Declared field sequences per operation: (code, request, response).
///
/// Requests always begin with the operation code as an `Int`; responses
/// with a status `Int`. An empty response sequence means the operation has
/// no reply.
const DECLARATIONS: &[(OpCode, &[FieldType], &[FieldType])] = &[
    (OpCode::FileRead, &[Int, Int], &[Int, Int, Data]),
    (OpCode::FileWrite, &[Int, Int, Int, Data], &[Int]),
    (OpCode::RecordSet, &[Int, Str, Str], &[Int, Int]),
    (OpCode::RecordGet, &[Int, Str], &[Int, Int, Str, Data]),
    (OpCode::ProxyStateGet, &[Int], &[Int, Int]),
    (OpCode::ProxyStateSet, &[Int, Int, Int], &[Int]),
    (OpCode::Reconfigure, &[Int], &[Int]),
    (OpCode::Restart, &[Int, Int], &[Int]),
    (OpCode::Bounce, &[Int, Int], &[Int]),
    (OpCode::EventResolve, &[Int, Str], &[Int]),
    (OpCode::EventGetPending, &[Int], &[Int, Str]),
    (OpCode::EventActive, &[Int, Str], &[Int, Int]),
    (OpCode::EventRegisterCallback, &[Int, Str], &[]),
    (OpCode::EventUnregisterCallback, &[Int, Str], &[]),
    (OpCode::EventNotify, &[Int, Str, Str], &[]),
    (OpCode::SnapshotTake, &[Int, Str], &[Int]),
    (OpCode::SnapshotRestore, &[Int, Str], &[Int]),
    (OpCode::SnapshotRemove, &[Int, Str], &[Int]),
    (OpCode::SnapshotGetPending, &[Int], &[Int, Str]),
    (OpCode::Diagnostics, &[Int, Int, Str], &[]),
    (OpCode::StatsResetNode, &[Int, Str], &[Int]),
    (OpCode::StatsResetCluster, &[Int, Str], &[Int]),
    (OpCode::StorageDeviceOffline, &[Int, Str], &[Int]),
    (OpCode::RecordMatchGet, &[Int, Str], &[Int, Int, Str, Data]),
    (OpCode::Ping, &[Int, Int], &[]),
    (OpCode::ServerBacktrace, &[Int, Int], &[Int, Str]),
];

/// One operation's field sequence in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSchema {
    op: OpCode,
    direction: Direction,
    fields: &'static [FieldType],
}

impl OperationSchema {
    /// The operation this schema belongs to.
    pub fn op(&self) -> OpCode {
        self.op
    }

    /// The direction this schema applies to.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The ordered field types of the message.
    pub fn fields(&self) -> &'static [FieldType] {
        self.fields
    }
}

/// Immutable map from operation code and direction to field schema.
///
/// Built once and validated at construction; safe for unsynchronized
/// concurrent reads. Use [`registry`] for the process-wide instance.
pub struct SchemaRegistry {
    requests: HashMap<OpCode, OperationSchema>,
    responses: HashMap<OpCode, OperationSchema>,
}

impl SchemaRegistry {
    /// Build the registry from the declaration table.
    ///
    /// Panics if the table is malformed (duplicate or missing operation,
    /// or a request schema that does not lead with the operation-code
    /// `Int`); the table is part of the program, not runtime input.
    pub fn new() -> Self {
        let mut requests = HashMap::with_capacity(DECLARATIONS.len());
        let mut responses = HashMap::with_capacity(DECLARATIONS.len());

        for &(op, request, response) in DECLARATIONS {
            assert_eq!(
                request.first(),
                Some(&Int),
                "request schema for {op:?} must lead with the operation code"
            );
            let prev = requests.insert(
                op,
                OperationSchema {
                    op,
                    direction: Direction::Request,
                    fields: request,
                },
            );
            assert!(prev.is_none(), "duplicate declaration for {op:?}");
            responses.insert(
                op,
                OperationSchema {
                    op,
                    direction: Direction::Response,
                    fields: response,
                },
            );
        }

        for op in OpCode::ALL {
            assert!(requests.contains_key(&op), "no declaration for {op:?}");
        }

        Self {
            requests,
            responses,
        }
    }

    /// Look up the schema for `op` in `direction`.
    ///
    /// Fails with [`SchemaError::NoSchema`] when the operation carries no
    /// message in that direction (the empty-schema sentinel).
    pub fn lookup(&self, direction: Direction, op: OpCode) -> Result<&OperationSchema> {
        let table = match direction {
            Direction::Request => &self.requests,
            Direction::Response => &self.responses,
        };
        // Construction guarantees every opcode is present.
        let schema = table
            .get(&op)
            .ok_or(SchemaError::NoSchema { op, direction })?;
        if schema.fields.is_empty() {
            return Err(SchemaError::NoSchema { op, direction });
        }
        Ok(schema)
    }

    /// Look up by raw wire code, failing with [`SchemaError::UnknownOp`]
    /// for codes outside the defined range.
    pub fn lookup_raw(&self, direction: Direction, code: i64) -> Result<&OperationSchema> {
        let op = OpCode::try_from(code)?;
        self.lookup(direction, op)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide schema registry.
pub fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(SchemaRegistry::new)
}
