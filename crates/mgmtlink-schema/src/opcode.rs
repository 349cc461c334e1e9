use crate::error::SchemaError;

/// Message direction a schema applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Request,
    Response,
}

/// Operation codes of the management control protocol.
///
/// Discriminants are wire values; they are stable for the lifetime of a
/// channel and never renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum OpCode {
    /// Read a managed configuration file.
    FileRead = 0,
    /// Write a managed configuration file.
    FileWrite = 1,
    /// Set a configuration record.
    RecordSet = 2,
    /// Read a configuration record.
    RecordGet = 3,
    /// Query whether the proxy is running.
    ProxyStateGet = 4,
    /// Start or stop the proxy.
    ProxyStateSet = 5,
    /// Re-read configuration.
    Reconfigure = 6,
    /// Restart coordinator and proxies.
    Restart = 7,
    /// Restart the proxies only.
    Bounce = 8,
    /// Mark an alarm event resolved.
    EventResolve = 9,
    /// List unresolved alarm events.
    EventGetPending = 10,
    /// Query whether an alarm event is active.
    EventActive = 11,
    /// Subscribe to alarm event notifications.
    EventRegisterCallback = 12,
    /// Unsubscribe from alarm event notifications.
    EventUnregisterCallback = 13,
    /// Alarm event push from the coordinator (the one coordinator-to-client
    /// message).
    EventNotify = 14,
    /// Snapshot the current configuration.
    SnapshotTake = 15,
    /// Restore a configuration snapshot.
    SnapshotRestore = 16,
    /// Delete a configuration snapshot.
    SnapshotRemove = 17,
    /// List existing snapshots.
    SnapshotGetPending = 18,
    /// Emit a diagnostic message on the managed side.
    Diagnostics = 19,
    /// Reset statistics on one node.
    StatsResetNode = 20,
    /// Reset statistics cluster-wide.
    StatsResetCluster = 21,
    /// Take a storage device offline.
    StorageDeviceOffline = 22,
    /// Read all records matching a pattern.
    RecordMatchGet = 23,
    /// Liveness probe.
    Ping = 24,
    /// Capture a server stack backtrace.
    ServerBacktrace = 25,
}

impl OpCode {
    /// Every defined operation, in wire-code order.
    pub const ALL: [OpCode; 26] = [
        OpCode::FileRead,
        OpCode::FileWrite,
        OpCode::RecordSet,
        OpCode::RecordGet,
        OpCode::ProxyStateGet,
        OpCode::ProxyStateSet,
        OpCode::Reconfigure,
        OpCode::Restart,
        OpCode::Bounce,
        OpCode::EventResolve,
        OpCode::EventGetPending,
        OpCode::EventActive,
        OpCode::EventRegisterCallback,
        OpCode::EventUnregisterCallback,
        OpCode::EventNotify,
        OpCode::SnapshotTake,
        OpCode::SnapshotRestore,
        OpCode::SnapshotRemove,
        OpCode::SnapshotGetPending,
        OpCode::Diagnostics,
        OpCode::StatsResetNode,
        OpCode::StatsResetCluster,
        OpCode::StorageDeviceOffline,
        OpCode::RecordMatchGet,
        OpCode::Ping,
        OpCode::ServerBacktrace,
    ];

    /// The wire value of this operation.
    pub fn code(self) -> i64 {
        self as i64
    }
}

impl TryFrom<i64> for OpCode {
    type Error = SchemaError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| OpCode::ALL.get(idx).copied())
            .ok_or(SchemaError::UnknownOp(code))
    }
}
