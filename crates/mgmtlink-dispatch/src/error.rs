use mgmtlink_frame::FrameError;
use mgmtlink_marshal::MarshalError;
use mgmtlink_schema::SchemaError;

/// Errors surfaced at the dispatch boundary.
///
/// The taxonomy matters to callers: parameter errors are local and
/// non-retryable (caller misuse or a corrupted peer); network errors are
/// channel faults a caller may answer with a reconnect. This layer never
/// retries anything.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Unknown operation, missing direction schema.
    #[error("parameter error: {0}")]
    Schema(#[from] SchemaError),

    /// Schema/value mismatch or a malformed field in a received buffer.
    #[error("parameter error: {0}")]
    Marshal(#[from] MarshalError),

    /// The transport write failed.
    #[error("network write error: {0}")]
    NetWrite(#[source] FrameError),

    /// The transport read failed, including a stream that ended inside a
    /// frame.
    #[error("network read error: {0}")]
    NetRead(#[source] FrameError),
}

impl DispatchError {
    /// True for the non-retryable parameter category.
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, DispatchError::Schema(_) | DispatchError::Marshal(_))
    }
}

pub type Result<T> = std::result::Result<T, DispatchError>;
